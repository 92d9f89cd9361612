/*
 * Flock Module
 *
 * This module owns the boid and barrier collections and advances the
 * simulation one tick at a time. Each tick is a two-phase update: every
 * steering force is computed against an immutable snapshot of the previous
 * tick's state, and only then are the boids mutated. No boid ever observes
 * another boid's already-updated state within the same tick.
 */

use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;

use crate::barrier::Barrier;
use crate::boid::Boid;
use crate::params::SimulationParams;
use crate::vector::Vec2;

pub struct Flock {
    boids: Vec<Boid>,
    barriers: Vec<Barrier>,
    params: SimulationParams,
    rng: StdRng,
}

impl Flock {
    pub fn new(params: SimulationParams) -> Self {
        Self::from_rng(params, StdRng::from_entropy())
    }

    // Deterministic construction: a fixed seed and a fixed tick sequence
    // reproduce the exact same trajectories.
    pub fn with_seed(params: SimulationParams, seed: u64) -> Self {
        Self::from_rng(params, StdRng::seed_from_u64(seed))
    }

    fn from_rng(params: SimulationParams, rng: StdRng) -> Self {
        Self {
            boids: Vec::new(),
            barriers: Vec::new(),
            params,
            rng,
        }
    }

    pub fn params(&self) -> &SimulationParams {
        &self.params
    }

    pub fn boids(&self) -> &[Boid] {
        &self.boids
    }

    pub fn barriers(&self) -> &[Barrier] {
        &self.barriers
    }

    pub fn add_boid(&mut self, boid: Boid) {
        self.boids.push(boid);
    }

    pub fn add_barrier(&mut self, barrier: Barrier) {
        self.barriers.push(barrier);
    }

    pub fn remove_boid(&mut self, index: usize) -> Boid {
        self.boids.remove(index)
    }

    // Spawn `count` boids at the world center with zero heading.
    pub fn spawn_centered(&mut self, count: usize) {
        for _ in 0..count {
            self.boids.push(Boid::at_center(&self.params));
        }
    }

    // Spawn `count` boids at random positions with random headings.
    pub fn scatter(&mut self, count: usize) {
        for _ in 0..count {
            let boid = Boid::random(&mut self.rng, &self.params);
            self.boids.push(boid);
        }
    }

    // Advance the whole flock by `dt` seconds.
    pub fn step(&mut self, dt: f32) {
        // Phase 1: compute every steering force against a snapshot of the
        // pre-tick state.
        let snapshot = self.boids.clone();
        let forces = self.compute_forces(&snapshot);

        // Phase 2: apply steering, stochastic variation and movement in
        // index order. The RNG is consumed serially here, so sequential and
        // parallel runs of phase 1 yield identical trajectories.
        for (boid, force) in self.boids.iter_mut().zip(forces) {
            if let Some(force) = force {
                boid.apply_steering(force, dt, &self.params);
            }
            boid.maybe_vary_heading(dt, &self.params, &mut self.rng);
            boid.update(dt);
            boid.wrap_edges(self.params.world_width, self.params.world_height);
        }
    }

    // The compute phase is read-only over the snapshot and embarrassingly
    // parallel; rayon is used when enabled in the params.
    fn compute_forces(&self, snapshot: &[Boid]) -> Vec<Option<Vec2>> {
        if self.params.enable_parallel {
            snapshot
                .par_iter()
                .enumerate()
                .map(|(i, boid)| boid.compute_steering(i, snapshot, &self.barriers, &self.params))
                .collect()
        } else {
            snapshot
                .iter()
                .enumerate()
                .map(|(i, boid)| boid.compute_steering(i, snapshot, &self.barriers, &self.params))
                .collect()
        }
    }
}
