// --- File: config.rs ---
use glam::Vec2;

use crate::plotter::Color;

/// Live parameter snapshot, rebuilt by the host every frame and passed
/// explicitly into `manage`/`update`/`draw`. The simulation never reads
/// configuration from anywhere else.
#[derive(Debug, Clone)]
pub struct SimulationConfig {
    /// Flowers per horizontal pixel of the domain.
    pub flowers_density: f32,
    /// Petals each corolla starts with.
    pub petals_count: usize,
    /// Horizontal wind intensity.
    pub wind: f32,
    pub speed_multiplier: f32,
    /// Verlet velocity retention per step; values below 1 bleed energy.
    pub dampening: f32,
    /// Stem length range, as fractions of the domain height.
    pub min_stem_ratio: f32,
    pub max_stem_ratio: f32,
    /// When false the pointer force field is inert.
    pub flee_pointer: bool,
    pub pointer_position: Vec2,
    /// When set, every corolla uses `petal_color` instead of its own.
    pub single_petal_color: bool,
    pub background_color: Color,
    pub lines_color: Color,
    pub petal_color: Color,
    pub petal_opacity: f32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            flowers_density: 0.06,
            petals_count: 12,
            wind: 0.5,
            speed_multiplier: 1.0,
            dampening: 0.99,
            min_stem_ratio: 0.2,
            max_stem_ratio: 0.8,
            flee_pointer: true,
            pointer_position: Vec2::ZERO,
            single_petal_color: false,
            background_color: Color::new(250, 248, 240),
            lines_color: Color::new(38, 54, 38),
            petal_color: Color::new(255, 105, 180),
            petal_opacity: 0.7,
        }
    }
}
// --- End of File: config.rs ---
