//! Engine lifecycle: mount, visibility, resize debouncing and teardown
//!
//! An engine is created once per host and may be mounted onto at most one
//! surface at a time. Everything it schedules (frame requests, the resize
//! debounce timer, listener subscriptions) is owned by the current mount and
//! released by `unmount`, which is the only cancellation point.

use crate::scene::{AmbientScene, SceneStats};
use crate::surface::Surface;
use drift_core::{Dimensions, DriftError, Result};
use drift_particles::{DeviceSignals, DrawContext, EngineConfig, EntityPool, Painter, PerformanceProfiler};
use drift_runtime::{
    FrameHandle, FrameHost, FrameScheduler, FrameStats, HostCallback, HostEventKind, ListenerId,
    SchedulerState, TickOutcome, TimerHandle,
};

/// What `mount` ended up doing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MountOutcome {
    /// Frame loop started
    Animating,
    /// Reduced motion: one static frame, nothing scheduled
    StaticFrame,
    /// No drawing context: nothing drawn, nothing scheduled
    Degraded,
}

/// Diagnostics for the current mount
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EngineStats {
    /// Simulation steps taken
    pub steps: u64,
    /// Draw passes, including a static frame
    pub draws: u64,
    /// Host callbacks skipped by throttling
    pub skipped: u64,
    /// Stale or out-of-state callbacks
    pub ignored: u64,
    /// Connections drawn in the most recent frame
    pub connections: usize,
}

impl EngineStats {
    fn from_parts(scheduler: FrameStats, scene: SceneStats) -> Self {
        Self {
            steps: scene.steps,
            draws: scene.draws,
            skipped: scheduler.throttled,
            ignored: scheduler.ignored,
            connections: scene.connections,
        }
    }
}

struct Animation<S: Surface> {
    scene: AmbientScene<S>,
    scheduler: FrameScheduler,
    listeners: Vec<ListenerId>,
    resize_timer: Option<TimerHandle>,
    pending_size: Option<Dimensions>,
}

enum Mount<S: Surface> {
    Degraded(S),
    Static { surface: S, draws: u64 },
    Animating(Box<Animation<S>>),
}

/// Binds a particle scene to a surface and drives it from a [`FrameHost`].
pub struct AmbientEngine<H: FrameHost, S: Surface> {
    host: H,
    config: EngineConfig,
    profiler: PerformanceProfiler,
    painter: Painter,
    mount: Option<Mount<S>>,
}

impl<H: FrameHost, S: Surface> AmbientEngine<H, S> {
    pub fn new(host: H, config: EngineConfig) -> Self {
        let profiler = config.profiler();
        let painter = config.painter();
        Self {
            host,
            config,
            profiler,
            painter,
            mount: None,
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn is_mounted(&self) -> bool {
        self.mount.is_some()
    }

    /// Scheduler state of the current mount; `Stopped` unless animating
    pub fn state(&self) -> SchedulerState {
        match &self.mount {
            Some(Mount::Animating(anim)) => anim.scheduler.state(),
            _ => SchedulerState::Stopped,
        }
    }

    /// The mounted surface, if any
    pub fn surface(&self) -> Option<&S> {
        match self.mount.as_ref()? {
            Mount::Degraded(surface) | Mount::Static { surface, .. } => Some(surface),
            Mount::Animating(anim) => Some(anim.scene.surface()),
        }
    }

    /// The animated scene, if the current mount is animating
    pub fn scene(&self) -> Option<&AmbientScene<S>> {
        match &self.mount {
            Some(Mount::Animating(anim)) => Some(&anim.scene),
            _ => None,
        }
    }

    pub fn stats(&self) -> EngineStats {
        match &self.mount {
            Some(Mount::Animating(anim)) => {
                EngineStats::from_parts(anim.scheduler.stats(), anim.scene.stats())
            }
            Some(Mount::Static { draws, .. }) => EngineStats {
                draws: *draws,
                ..EngineStats::default()
            },
            Some(Mount::Degraded(_)) | None => EngineStats::default(),
        }
    }

    /// Take ownership of `surface` and start rendering onto it.
    ///
    /// Fails only when already mounted, in which case nothing changes and
    /// `surface` is dropped.
    pub fn mount(&mut self, mut surface: S, signals: &DeviceSignals) -> Result<MountOutcome> {
        if self.mount.is_some() {
            return Err(DriftError::AlreadyMounted);
        }

        if surface.context().is_none() {
            log::warn!("[engine] No drawing context available, rendering nothing");
            self.mount = Some(Mount::Degraded(surface));
            return Ok(MountOutcome::Degraded);
        }

        let viewport = surface.viewport().clamped();
        let tier = self.profiler.select_tier(signals);
        let mut draws = 0;
        if let Some(ctx) = surface.context() {
            ctx.resize(viewport);
            if tier.is_reduced() {
                self.painter.paint_static(ctx);
                draws += 1;
            }
        }
        if tier.is_reduced() {
            log::info!("[engine] Reduced motion: drew {draws} static frame(s)");
            self.mount = Some(Mount::Static { surface, draws });
            return Ok(MountOutcome::StaticFrame);
        }

        let mut pool = EntityPool::new(self.config.pool_settings(), self.config.rng());
        pool.initialize(&tier, viewport);
        let scene = AmbientScene::new(surface, pool, self.painter.clone(), tier);

        let listeners = vec![
            self.host.subscribe(HostEventKind::Resize),
            self.host.subscribe(HostEventKind::Visibility),
        ];
        let mut scheduler = FrameScheduler::new(tier.target_fps);
        scheduler.start(&mut self.host);

        log::info!(
            "[engine] Mounted {:?} variant at {}x{}, {} tier",
            self.config.variant,
            viewport.width,
            viewport.height,
            tier.kind.as_str()
        );
        self.mount = Some(Mount::Animating(Box::new(Animation {
            scene,
            scheduler,
            listeners,
            resize_timer: None,
            pending_size: None,
        })));
        Ok(MountOutcome::Animating)
    }

    /// Release everything the current mount holds. Safe to call repeatedly
    /// and after a degraded mount.
    pub fn unmount(&mut self) {
        let Some(mount) = self.mount.take() else {
            return;
        };
        if let Mount::Animating(mut anim) = mount {
            anim.scheduler.stop(&mut self.host);
            if let Some(timer) = anim.resize_timer.take() {
                self.host.clear_timer(timer);
            }
            for id in anim.listeners.drain(..) {
                self.host.unsubscribe(id);
            }
            log::info!(
                "[engine] Unmounted after {} step(s)",
                anim.scene.stats().steps
            );
        } else {
            log::debug!("[engine] Unmounted");
        }
    }

    /// Pause while hidden, resume when visible again.
    pub fn on_visibility_change(&mut self, hidden: bool) {
        let Some(Mount::Animating(anim)) = &mut self.mount else {
            return;
        };
        if hidden {
            if anim.scheduler.pause(&mut self.host) {
                log::debug!("[engine] Hidden, paused");
            }
        } else if anim.scheduler.resume(&mut self.host) {
            log::debug!("[engine] Visible, resumed");
        }
    }

    /// Schedule a resize after the debounce period. A newer notification
    /// replaces any pending one.
    pub fn on_resize(&mut self, size: Dimensions) {
        let Some(Mount::Animating(anim)) = &mut self.mount else {
            return;
        };
        if let Some(timer) = anim.resize_timer.take() {
            self.host.clear_timer(timer);
        }
        anim.pending_size = Some(size);
        anim.resize_timer = Some(self.host.set_timer(self.config.resize_debounce_ms));
    }

    /// Host animation frame callback
    pub fn on_animation_frame(&mut self, handle: FrameHandle, timestamp: f64) -> TickOutcome {
        let Some(Mount::Animating(anim)) = &mut self.mount else {
            return TickOutcome::Ignored;
        };
        anim.scheduler
            .on_frame(&mut self.host, &mut anim.scene, handle, timestamp)
    }

    /// Host timer callback. Only the current debounce timer has an effect.
    pub fn on_timer(&mut self, handle: TimerHandle) {
        let Some(Mount::Animating(anim)) = &mut self.mount else {
            return;
        };
        if anim.resize_timer != Some(handle) {
            return;
        }
        anim.resize_timer = None;
        if let Some(size) = anim.pending_size.take() {
            anim.scene.resize(size);
            log::debug!("[engine] Resized to {}x{}", size.width, size.height);
        }
    }

    /// Route a host callback to its handler
    pub fn dispatch(&mut self, callback: HostCallback) {
        match callback {
            HostCallback::Frame { handle, timestamp } => {
                self.on_animation_frame(handle, timestamp);
            }
            HostCallback::Timer { handle } => self.on_timer(handle),
        }
    }
}
