//! Drives an engine from a manual host, one simulated host paint at a time

use drift_core::Dimensions;
use drift_engine::{AmbientEngine, Surface};
use drift_runtime::{FrameHost, ManualHost};

/// A scripted sequence of host paints with optional mid-run events
#[derive(Debug, Clone, PartialEq)]
pub struct RunPlan {
    /// Host refresh rate (paints per second)
    pub host_hz: f64,
    /// Number of host paints to simulate
    pub frames: u32,
    /// Paint index at which the page becomes hidden
    pub hide_at: Option<u32>,
    /// Paint index at which the page becomes visible again
    pub show_at: Option<u32>,
    /// Paint index and size of a viewport resize
    pub resize_at: Option<(u32, Dimensions)>,
}

impl RunPlan {
    pub fn new(host_hz: f64, frames: u32) -> Self {
        Self {
            host_hz,
            frames,
            hide_at: None,
            show_at: None,
            resize_at: None,
        }
    }

    /// Milliseconds between host paints
    pub fn paint_interval(&self) -> f64 {
        if self.host_hz.is_finite() && self.host_hz > 0.0 {
            1000.0 / self.host_hz
        } else {
            1000.0 / 60.0
        }
    }
}

/// Run `plan` against a mounted engine. Returns the host time at the end.
pub fn drive<S: Surface>(engine: &mut AmbientEngine<ManualHost, S>, plan: &RunPlan) -> f64 {
    let interval = plan.paint_interval();

    for i in 0..plan.frames {
        if plan.hide_at == Some(i) {
            log::info!("[headless] Hiding at paint {i}");
            engine.on_visibility_change(true);
        }
        if plan.show_at == Some(i) {
            log::info!("[headless] Showing at paint {i}");
            engine.on_visibility_change(false);
        }
        if let Some((at, size)) = plan.resize_at {
            if at == i {
                log::info!("[headless] Resizing to {}x{} at paint {i}", size.width, size.height);
                engine.on_resize(size);
            }
        }

        for callback in engine.host_mut().advance_frame(interval) {
            engine.dispatch(callback);
        }
    }

    engine.host().now()
}
