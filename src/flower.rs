use glam::Vec2;
use rand::{Rng, RngCore, SeedableRng};

use crate::config::SimulationConfig;
use crate::constants::{MAX_SEGMENT_LENGTH, MIN_DRAW_SEGMENT_LENGTH};
use crate::corolla::Corolla;
use crate::force_field::ForceField;
use crate::plotter::{Plotter, Polyline};
use crate::rope::Rope;
use crate::simulation::SimRng;

/// One rope (the stem) and one corolla. Owns its own rng, seeded from the
/// manager's, so a frame update touches nothing outside the flower.
pub struct Flower {
    attach_point: Vec2,
    stem: Rope,
    corolla: Corolla,
    rng: SimRng,
}

impl Flower {
    /// Longer flowers get proportionally more nodes, keeping every segment
    /// under the maximum length so visual smoothness stays constant.
    pub fn new<R: Rng + ?Sized>(
        seed_source: &mut R,
        attach_point: Vec2,
        length: f32,
        config: &SimulationConfig,
    ) -> Self {
        let mut rng = SimRng::seed_from_u64(seed_source.next_u64());

        let node_count = (length / MAX_SEGMENT_LENGTH).ceil().max(1.0) as usize;
        let stem = Rope::new(
            &mut rng,
            attach_point,
            length / node_count as f32,
            node_count,
        );

        let mut corolla = Corolla::new(&mut rng, config.petals_count);
        corolla.set_position(stem.end_position());

        Self {
            attach_point,
            stem,
            corolla,
            rng,
        }
    }

    /// Corolla first (it supplies the stem forcing), then the stem, then the
    /// corolla is re-anchored to the moving free end.
    pub fn update(&mut self, dt: f32, force_field: &ForceField, config: &SimulationConfig) {
        self.corolla.update(dt, &mut self.rng, config);
        let acceleration = self.corolla.get_acceleration(force_field);
        self.stem
            .update(dt, self.attach_point, acceleration, config.dampening);
        self.corolla.set_position(self.stem.end_position());
    }

    pub fn drawable_stem(&self) -> Polyline {
        self.stem.drawable_line(MIN_DRAW_SEGMENT_LENGTH)
    }

    pub fn draw_corolla(&self, plotter: &mut dyn Plotter, config: &SimulationConfig) {
        self.corolla.draw(plotter, config);
    }

    /// The whole flower must be gone: corolla dispersed and fallen, stem
    /// fully past the lower bound.
    pub fn is_dead(&self, lowest_allowed: f32) -> bool {
        self.corolla.is_dead(lowest_allowed) && self.stem.highest_point() >= lowest_allowed
    }

    pub fn stem(&self) -> &Rope {
        &self.stem
    }

    pub fn corolla(&self) -> &Corolla {
        &self.corolla
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;

    fn test_rng() -> StdRng {
        StdRng::seed_from_u64(21)
    }

    #[test]
    fn stem_segments_stay_under_the_maximum_length() {
        let mut rng = test_rng();
        let config = SimulationConfig::default();

        let flower = Flower::new(&mut rng, Vec2::new(100.0, 500.0), 300.0, &config);
        assert!(flower.stem().segment_length() <= MAX_SEGMENT_LENGTH);
        assert!((flower.stem().total_length() - 300.0).abs() < 0.001);

        // a stem shorter than one segment still gets a node
        let short = Flower::new(&mut rng, Vec2::new(100.0, 500.0), 8.0, &config);
        assert!((short.stem().total_length() - 8.0).abs() < 0.001);
    }

    #[test]
    fn corolla_tracks_the_stem_free_end() {
        let mut rng = test_rng();
        let config = SimulationConfig::default();
        let field = ForceField::new(Vec2::ZERO, 100.0, false);

        let mut flower = Flower::new(&mut rng, Vec2::new(100.0, 500.0), 300.0, &config);
        assert_eq!(flower.corolla().position(), flower.stem().end_position());

        for _ in 0..30 {
            flower.update(1.0 / 60.0, &field, &config);
            assert_eq!(flower.corolla().position(), flower.stem().end_position());
        }
    }

    #[test]
    fn a_fresh_flower_is_not_dead() {
        let mut rng = test_rng();
        let config = SimulationConfig::default();

        let flower = Flower::new(&mut rng, Vec2::new(100.0, 500.0), 300.0, &config);
        assert!(!flower.is_dead(500.0));
    }
}
