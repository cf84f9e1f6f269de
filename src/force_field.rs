use std::f32::consts::PI;

use glam::Vec2;

use crate::constants::DISTANCE_EPSILON;

/// Repulsion away from a fixed influence center (the pointer). Rebuilt by the
/// host each frame from the current pointer position.
pub struct ForceField {
    center: Vec2,
    max_influence_distance: f32,
    enabled: bool,
}

impl ForceField {
    pub fn new(center: Vec2, max_influence_distance: f32, enabled: bool) -> Self {
        Self {
            center,
            max_influence_distance,
            enabled,
        }
    }

    /// Zero when disabled, beyond the influence radius, or at the center
    /// itself. The falloff tapers value and derivative to zero at the
    /// boundary, so nothing pops when crossing the influence radius.
    pub fn compute_force(&self, location: Vec2) -> Vec2 {
        if !self.enabled {
            return Vec2::ZERO;
        }

        let from_center = location - self.center;
        let distance = from_center.length();
        if distance >= self.max_influence_distance || distance < DISTANCE_EPSILON {
            return Vec2::ZERO;
        }

        let influence = 0.5 * (1.0 + (PI * distance / self.max_influence_distance).cos());
        from_center * (influence * influence / distance)
    }
}
