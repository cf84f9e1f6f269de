use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;

use crate::constants::{CHAIKIN_RATIO, CONSTRAINT_ITERATIONS, DISTANCE_EPSILON};

/// One mass point of the chain. The previous position is the implicit
/// velocity store of the Verlet scheme; there is no velocity field.
#[derive(Debug, Clone)]
struct RopeNode {
    position: Vec2,
    previous_position: Vec2,
    acceleration: Vec2,
}

impl RopeNode {
    fn new(position: Vec2) -> Self {
        Self {
            position,
            previous_position: position,
            acceleration: Vec2::ZERO,
        }
    }
}

/// Chain of mass points connected by rigid segments, anchored at node 0 and
/// driven by an external acceleration at the free end. Segment lengths are
/// maintained by iterative constraint relaxation, so exact equality is never
/// guaranteed under extreme accelerations.
pub struct Rope {
    nodes: Vec<RopeNode>,
    segment_length: f32,
    total_length: f32,
}

impl Rope {
    /// Builds `node_count + 1` nodes starting at `anchor`, each subsequent
    /// node one segment away at a random angle (jittered initial pose).
    pub fn new<R: Rng + ?Sized>(
        rng: &mut R,
        anchor: Vec2,
        segment_length: f32,
        node_count: usize,
    ) -> Self {
        let mut nodes = Vec::with_capacity(node_count + 1);
        nodes.push(RopeNode::new(anchor));
        for _ in 0..node_count {
            let angle = rng.gen_range(0.0..TAU);
            let previous = nodes[nodes.len() - 1].position;
            nodes.push(RopeNode::new(
                previous + segment_length * Vec2::from_angle(angle),
            ));
        }

        Self {
            nodes,
            segment_length,
            total_length: segment_length * node_count as f32,
        }
    }

    pub fn update(&mut self, dt: f32, anchor: Vec2, free_end_acceleration: Vec2, dampening: f32) {
        self.apply_forces(free_end_acceleration);
        self.apply_verlet(dt, dampening);

        for _ in 0..CONSTRAINT_ITERATIONS {
            self.apply_constraints(anchor);
        }
    }

    /// All forces act through the free end; intermediate nodes are passive
    /// and move only by constraint propagation.
    fn apply_forces(&mut self, free_end_acceleration: Vec2) {
        for node in self.nodes.iter_mut().skip(1) {
            node.acceleration = Vec2::ZERO;
        }
        let last = self.nodes.len() - 1;
        self.nodes[last].acceleration = free_end_acceleration;
    }

    fn apply_verlet(&mut self, dt: f32, dampening: f32) {
        for node in &mut self.nodes {
            let new_position = node.position
                + dampening * (node.position - node.previous_position)
                + dt * dt * node.acceleration;
            node.previous_position = node.position;
            node.position = new_position;
        }
    }

    /// One relaxation pass: redistribute half the length error of each
    /// segment symmetrically, then force the anchor back in place. The anchor
    /// clamp runs after the pass, so node 0 is exact when `update` returns.
    fn apply_constraints(&mut self, anchor: Vec2) {
        for i in 1..self.nodes.len() {
            let delta = self.nodes[i].position - self.nodes[i - 1].position;
            let distance = delta.length();
            let correction =
                delta * (0.5 * (1.0 - self.segment_length / (distance + DISTANCE_EPSILON)));
            self.nodes[i].position -= correction;
            self.nodes[i - 1].position += correction;
        }

        self.nodes[0].position = anchor;
    }

    pub fn end_position(&self) -> Vec2 {
        self.nodes[self.nodes.len() - 1].position
    }

    /// Minimum y across nodes (y grows downward).
    pub fn highest_point(&self) -> f32 {
        self.nodes
            .iter()
            .map(|node| node.position.y)
            .fold(f32::INFINITY, f32::min)
    }

    pub fn segment_length(&self) -> f32 {
        self.segment_length
    }

    pub fn total_length(&self) -> f32 {
        self.total_length
    }

    pub fn node_positions(&self) -> impl Iterator<Item = Vec2> + '_ {
        self.nodes.iter().map(|node| node.position)
    }

    /// Rendering smoothing only: corner-cutting until the polyline is dense
    /// enough for the target on-screen segment length. Physical state is
    /// untouched.
    pub fn drawable_line(&self, min_segment_length: f32) -> Vec<Vec2> {
        let mut points: Vec<Vec2> = self.nodes.iter().map(|node| node.position).collect();
        if points.len() < 2 {
            return points;
        }

        let minimum_points = (self.total_length / min_segment_length).ceil() as usize;
        while points.len() < minimum_points {
            points = Self::subdivide_line(&points, CHAIKIN_RATIO);
        }
        points
    }

    // Chaikin
    fn subdivide_line(source: &[Vec2], ratio: f32) -> Vec<Vec2> {
        let mut result = Vec::with_capacity(2 * source.len());
        result.push(source[0]);
        for pair in source.windows(2) {
            result.push(pair[0].lerp(pair[1], ratio));
            result.push(pair[0].lerp(pair[1], 1.0 - ratio));
        }
        result.push(source[source.len() - 1]);
        result
    }
}
