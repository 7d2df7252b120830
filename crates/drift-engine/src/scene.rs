//! The animated scene: pool, proximity graph and painter bound to a surface

use crate::surface::Surface;
use drift_core::Dimensions;
use drift_particles::{DrawContext, EntityPool, Painter, PerformanceTier, ProximityGraph};
use drift_runtime::FrameSystem;

/// Counters maintained by the scene itself
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SceneStats {
    /// Simulation steps taken
    pub steps: u64,
    /// Draw passes that reached the context
    pub draws: u64,
    /// Connections drawn in the most recent frame
    pub connections: usize,
}

/// One mount's worth of animated state.
///
/// Implements [`FrameSystem`] so a scheduler can tick it: `update` steps
/// the pool, `connect` rebuilds the proximity graph, `draw` paints.
pub struct AmbientScene<S: Surface> {
    surface: S,
    pool: EntityPool,
    graph: ProximityGraph,
    painter: Painter,
    tier: PerformanceTier,
    size: Dimensions,
    stats: SceneStats,
}

impl<S: Surface> AmbientScene<S> {
    pub fn new(surface: S, pool: EntityPool, painter: Painter, tier: PerformanceTier) -> Self {
        let size = surface.viewport().clamped();
        Self {
            surface,
            pool,
            graph: ProximityGraph::new(),
            painter,
            tier,
            size,
            stats: SceneStats::default(),
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn pool(&self) -> &EntityPool {
        &self.pool
    }

    pub fn tier(&self) -> &PerformanceTier {
        &self.tier
    }

    pub fn size(&self) -> Dimensions {
        self.size
    }

    pub fn stats(&self) -> SceneStats {
        self.stats
    }

    /// Re-allocate the drawing buffer. Entities keep their positions and
    /// wrap into the new bounds on the next step.
    pub fn resize(&mut self, size: Dimensions) {
        let size = size.clamped();
        self.size = size;
        if let Some(ctx) = self.surface.context() {
            ctx.resize(size);
        }
    }
}

impl<S: Surface> FrameSystem for AmbientScene<S> {
    fn update(&mut self, delta_frames: f32) {
        self.pool.step(delta_frames, self.size);
        self.stats.steps += 1;
    }

    fn connect(&mut self) {
        let connections = self.graph.compute(self.pool.particles(), &self.tier);
        self.stats.connections = connections.len();
    }

    fn draw(&mut self) {
        let Some(ctx) = self.surface.context() else {
            return;
        };
        self.painter
            .paint_frame(ctx, &self.pool, self.graph.connections());
        self.stats.draws += 1;
    }

    fn name(&self) -> &str {
        "ambient"
    }
}
