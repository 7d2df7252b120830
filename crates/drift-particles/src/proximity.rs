//! Per-frame proximity graph between particles
//!
//! Candidate pairs are scanned in index order (`j > i`), compared by squared
//! distance, and accepted until an endpoint reaches the tier's connection
//! cap. The scan for `i` stops as soon as `i` is saturated, which bounds the
//! edge count at `population × max_connections` even though the candidate
//! scan stays quadratic in the worst case.
//!
//! Acceptance follows index order, not distance: a particle keeps the first
//! in-range partners it meets, which are not necessarily its nearest.

use crate::particle::Particle;
use crate::tier::PerformanceTier;

/// A transient edge between two particles, valid for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Connection {
    /// Index of the lower particle in population order
    pub a: usize,
    /// Index of the higher particle (`b > a`)
    pub b: usize,
    /// `1 - distance / connection_distance`, in [0, 1]
    pub strength: f32,
}

/// Recomputes connections every frame, reusing its buffers
#[derive(Debug, Default)]
pub struct ProximityGraph {
    connections: Vec<Connection>,
    degree: Vec<usize>,
}

impl ProximityGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compute this frame's connections. Nothing from the previous frame
    /// survives the call.
    pub fn compute(&mut self, particles: &[Particle], tier: &PerformanceTier) -> &[Connection] {
        self.connections.clear();
        self.degree.clear();

        let max = tier.max_connections_per_entity;
        let distance = tier.connection_distance;
        if particles.len() < 2 || max == 0 || !distance.is_finite() || distance <= 0.0 {
            return &self.connections;
        }

        self.degree.resize(particles.len(), 0);
        let max_dist_sq = distance * distance;

        for i in 0..particles.len() {
            if self.degree[i] >= max {
                continue;
            }
            let pi = particles[i].position;

            for j in (i + 1)..particles.len() {
                if self.degree[j] >= max {
                    continue;
                }
                let dist_sq = pi.distance_squared(particles[j].position);
                if dist_sq >= max_dist_sq {
                    continue;
                }

                let strength = (1.0 - dist_sq.sqrt() / distance).clamp(0.0, 1.0);
                self.connections.push(Connection { a: i, b: j, strength });
                self.degree[i] += 1;
                self.degree[j] += 1;

                if self.degree[i] >= max {
                    break;
                }
            }
        }

        &self.connections
    }

    /// Connections from the most recent `compute`
    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }
}
