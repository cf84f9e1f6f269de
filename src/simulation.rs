// --- File: simulation.rs ---
use glam::Vec2;
use rand::Rng;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;

use crate::config::SimulationConfig;
use crate::constants::MAX_FRAME_DT;
use crate::flower::Flower;
use crate::force_field::ForceField;
use crate::plotter::{Plotter, Polyline};

pub type SimRng = StdRng;

/// Owns the live flower population and keeps it tracking the density target:
/// growth is immediate, shrinking happens only as flowers die.
pub struct FlowersManager {
    flowers: Vec<Flower>,
    rng: SimRng,
}

impl FlowersManager {
    pub fn new() -> Self {
        Self {
            flowers: Vec::new(),
            rng: SimRng::from_entropy(),
        }
    }

    /// Deterministic construction for tests and replays.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            flowers: Vec::new(),
            rng: SimRng::seed_from_u64(seed),
        }
    }

    pub fn reset(&mut self) {
        self.flowers.clear();
    }

    pub fn manage(&mut self, domain_width: f32, domain_height: f32, config: &SimulationConfig) {
        let ideal_count = (domain_width * config.flowers_density).round().max(0.0) as usize;

        // create new flowers if needed
        while self.flowers.len() < ideal_count {
            let flower = Self::create_flower(&mut self.rng, domain_width, domain_height, config);
            self.flowers.push(flower);
        }

        // handle old flowers
        let mut index = self.flowers.len();
        while index > 0 {
            index -= 1;
            if self.flowers[index].is_dead(domain_height) {
                if self.flowers.len() > ideal_count {
                    // too many flowers already, kill old ones
                    self.flowers.remove(index);
                } else {
                    // we must maintain this count, recycle in place
                    log::debug!("recycling dead flower in slot {}", index);
                    self.flowers[index] =
                        Self::create_flower(&mut self.rng, domain_width, domain_height, config);
                }
            }
        }
    }

    /// Advances every flower. Flowers are mutually independent within a
    /// frame (each owns its rope, corolla and rng), so they update in
    /// parallel.
    pub fn update(&mut self, dt: f32, force_field: &ForceField, config: &SimulationConfig) {
        // clamp so a delayed frame cannot feed the integrator an explosive step
        let dt = dt.min(MAX_FRAME_DT) * config.speed_multiplier;
        if dt <= 0.0 {
            return;
        }

        self.flowers
            .par_iter_mut()
            .for_each(|flower| flower.update(dt, force_field, config));
    }

    /// All stems in one batched line call, then every corolla on top.
    /// Non-mutating, so the same call can render to an alternate plotter
    /// (e.g. an SVG export) at any time.
    pub fn draw(&self, plotter: &mut dyn Plotter, config: &SimulationConfig) {
        let stems: Vec<Polyline> = self.flowers.iter().map(Flower::drawable_stem).collect();
        plotter.draw_lines(&stems);

        for flower in &self.flowers {
            flower.draw_corolla(plotter, config);
        }
    }

    pub fn flower_count(&self) -> usize {
        self.flowers.len()
    }

    pub fn flowers(&self) -> &[Flower] {
        &self.flowers
    }

    fn create_flower(
        rng: &mut SimRng,
        domain_width: f32,
        domain_height: f32,
        config: &SimulationConfig,
    ) -> Flower {
        let attach_point = Vec2::new(rng.gen_range(0.0..domain_width), domain_height);
        let length = rng.gen_range(config.min_stem_ratio..config.max_stem_ratio) * domain_height;
        Flower::new(rng, attach_point, length, config)
    }
}

impl Default for FlowersManager {
    fn default() -> Self {
        Self::new()
    }
}
// --- End of File: simulation.rs ---

#[cfg(test)]
mod tests {
    use super::*;

    fn disabled_field() -> ForceField {
        ForceField::new(Vec2::ZERO, 100.0, false)
    }

    #[test]
    fn manage_reaches_ideal_count_from_empty() {
        let config = SimulationConfig {
            flowers_density: 0.06,
            ..SimulationConfig::default()
        };
        let mut manager = FlowersManager::with_seed(1);

        manager.manage(1000.0, 800.0, &config);
        assert_eq!(manager.flower_count(), 60);

        // a second call has nothing left to do
        manager.manage(1000.0, 800.0, &config);
        assert_eq!(manager.flower_count(), 60);
    }

    #[test]
    fn manage_does_not_cull_live_flowers_when_target_shrinks() {
        let config = SimulationConfig::default();
        let mut manager = FlowersManager::with_seed(2);

        manager.manage(1000.0, 800.0, &config);
        assert_eq!(manager.flower_count(), 60);

        // dead-flower detection is the only removal trigger
        manager.manage(500.0, 800.0, &config);
        assert_eq!(manager.flower_count(), 60);
    }

    #[test]
    fn reset_clears_the_population() {
        let config = SimulationConfig::default();
        let mut manager = FlowersManager::with_seed(3);

        manager.manage(1000.0, 800.0, &config);
        assert!(manager.flower_count() > 0);

        manager.reset();
        assert_eq!(manager.flower_count(), 0);
    }

    #[test]
    fn update_keeps_corollas_anchored_to_their_stems() {
        let config = SimulationConfig::default();
        let mut manager = FlowersManager::with_seed(4);
        let field = disabled_field();

        manager.manage(200.0, 600.0, &config);
        for _ in 0..30 {
            manager.update(1.0 / 60.0, &field, &config);
        }

        for flower in manager.flowers() {
            assert_eq!(flower.corolla().position(), flower.stem().end_position());
        }
    }

    #[test]
    fn zero_speed_multiplier_freezes_the_field() {
        let config = SimulationConfig {
            speed_multiplier: 0.0,
            ..SimulationConfig::default()
        };
        let mut manager = FlowersManager::with_seed(5);
        let field = disabled_field();

        manager.manage(200.0, 600.0, &config);
        let before: Vec<Vec2> = manager
            .flowers()
            .iter()
            .map(|flower| flower.stem().end_position())
            .collect();

        manager.update(1.0 / 60.0, &field, &config);

        let after: Vec<Vec2> = manager
            .flowers()
            .iter()
            .map(|flower| flower.stem().end_position())
            .collect();
        assert_eq!(before, after);
    }

    #[test]
    fn same_seed_produces_identical_populations() {
        let config = SimulationConfig::default();
        let field = disabled_field();
        let mut first = FlowersManager::with_seed(42);
        let mut second = FlowersManager::with_seed(42);

        for _ in 0..60 {
            first.manage(800.0, 600.0, &config);
            first.update(1.0 / 60.0, &field, &config);
            second.manage(800.0, 600.0, &config);
            second.update(1.0 / 60.0, &field, &config);
        }

        assert_eq!(first.flower_count(), second.flower_count());
        for (a, b) in first.flowers().iter().zip(second.flowers()) {
            assert_eq!(a.stem().end_position(), b.stem().end_position());
            assert_eq!(a.corolla().attached_count(), b.corolla().attached_count());
        }
    }
}
