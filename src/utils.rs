use rand::Rng;

use crate::plotter::Color;

// --- Helper Functions ---

// random_petal_color: warm wheel, one channel saturated, one sliding
pub fn random_petal_color<R: Rng + ?Sized>(rng: &mut R) -> Color {
    let random = rng.gen_range(0.0..3.0f32);
    let channel = (0.5 * 255.0 * random.fract()) as u8;

    if random < 1.0 {
        Color::new(255, 0, 255 - channel)
    } else if random < 2.0 {
        Color::new(255, channel, 0)
    } else {
        Color::new(255 - channel, 255, 0)
    }
}
