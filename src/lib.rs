/*
 * Boid Flocking Simulation Core - Module Definitions
 *
 * This file defines the module structure for the flocking simulation core.
 * Rendering, windowing and input live outside this crate; the core exposes
 * positions and headings for an external presentation layer to draw.
 */

// Re-export key components for easier access
pub use barrier::Barrier;
pub use boid::Boid;
pub use flock::Flock;
pub use params::SimulationParams;
pub use vector::Vec2;

// Define modules
pub mod barrier;
pub mod boid;
pub mod flock;
pub mod params;
pub mod vector;
