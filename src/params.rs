/*
 * Simulation Parameters Module
 *
 * This module defines the SimulationParams struct that contains all the
 * tunable constants for the flocking simulation, including the world bounds
 * handed in by the environment. The struct is passed by reference into the
 * simulation rather than living as ambient globals, so two flocks with
 * different tunings can coexist.
 */

// Tunable constants for the simulation.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationParams {
    // World bounds supplied by the environment; positions wrap into
    // [0, world_width) x [0, world_height).
    pub world_width: f32,
    pub world_height: f32,

    // Perception
    pub sight_distance: f32,
    pub personal_space: f32,

    // Steering limits
    pub max_speed: f32,
    pub max_force: f32,
    pub acceleration_factor: f32,

    // Stochastic heading variation
    pub max_variation: f32,  // radians
    pub variation_rate: f32, // expected draws per second

    // Force weights
    pub cohesion_factor: f32,
    pub separation_factor: f32,
    pub alignment_factor: f32,
    pub wall_factor: f32, // 0.0 disables wall avoidance
    pub barrier_factor: f32,

    // Performance settings
    pub enable_parallel: bool,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            world_width: 1280.0,
            world_height: 720.0,
            sight_distance: 90.0,
            personal_space: 60.0,
            max_speed: 120.0, // per second
            max_force: 20.0,
            acceleration_factor: 80.0,
            max_variation: 50.0f32.to_radians(),
            variation_rate: 0.5,
            cohesion_factor: 0.5,
            separation_factor: 1.0,
            alignment_factor: 1.0,
            wall_factor: 0.0,
            barrier_factor: 10.0,
            enable_parallel: false,
        }
    }
}

impl SimulationParams {
    pub fn world_center(&self) -> (f32, f32) {
        (self.world_width / 2.0, self.world_height / 2.0)
    }
}
