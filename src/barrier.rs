/*
 * Barrier Module
 *
 * A barrier is a circular obstacle the boids steer around. Barriers are
 * supplied by the environment and are read-only as far as the simulation
 * core is concerned; they may be moved externally between ticks.
 */

use crate::vector::Vec2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Barrier {
    pub position: Vec2,
    pub radius: f32,
}

impl Barrier {
    pub fn new(x: f32, y: f32, radius: f32) -> Self {
        Self {
            position: Vec2::new(x, y),
            radius,
        }
    }

    // Distance from a point to the barrier's edge, negative inside it.
    pub fn edge_distance(&self, point: Vec2) -> f32 {
        point.distance(self.position) - self.radius
    }
}
