use glam::Vec2;
use rand::Rng;

/// Smooth time-varying 2D sample: linear blend between periodically
/// resampled random targets in `[0, 1)²`.
pub struct Noise {
    period: f32,
    time: f32,
    last: Vec2,
    next: Vec2,
}

impl Noise {
    pub fn new<R: Rng + ?Sized>(rng: &mut R, period: f32) -> Self {
        Self {
            period,
            time: 0.0,
            last: Self::random_vector(rng),
            next: Self::random_vector(rng),
        }
    }

    pub fn compute<R: Rng + ?Sized>(&mut self, dt: f32, rng: &mut R) -> Vec2 {
        self.time += dt;
        if self.time > self.period {
            self.last = self.next;
            self.next = Self::random_vector(rng);
            self.time %= self.period;
        }

        let r = self.time / self.period;
        self.last.lerp(self.next, r)
    }

    fn random_vector<R: Rng + ?Sized>(rng: &mut R) -> Vec2 {
        Vec2::new(rng.gen_range(0.0..1.0), rng.gen_range(0.0..1.0))
    }
}
