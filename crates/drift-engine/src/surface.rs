//! Rendering surfaces

use drift_core::Dimensions;
use drift_particles::DrawContext;

/// A drawable area owned exclusively by one engine.
///
/// The 2D context may be unavailable (unsupported environment, lost
/// device). Engines treat that as "draw nothing" rather than an error.
pub trait Surface {
    type Context: DrawContext;

    /// The 2D drawing context, if the environment provides one
    fn context(&mut self) -> Option<&mut Self::Context>;

    /// Size the surface should cover right now
    fn viewport(&self) -> Dimensions;
}

/// A surface backed by an optional in-memory context
pub struct CanvasSurface<C> {
    context: Option<C>,
    viewport: Dimensions,
}

impl<C: DrawContext> CanvasSurface<C> {
    pub fn new(context: C, viewport: Dimensions) -> Self {
        Self {
            context: Some(context),
            viewport,
        }
    }

    /// A surface whose context can never be acquired
    pub fn unsupported(viewport: Dimensions) -> Self {
        Self {
            context: None,
            viewport,
        }
    }

    pub fn context_ref(&self) -> Option<&C> {
        self.context.as_ref()
    }
}

impl<C: DrawContext> Surface for CanvasSurface<C> {
    type Context = C;

    fn context(&mut self) -> Option<&mut C> {
        self.context.as_mut()
    }

    fn viewport(&self) -> Dimensions {
        self.viewport
    }
}
