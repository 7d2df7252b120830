//! Cooperative frame scheduler
//!
//! Drives a [`FrameSystem`] from host frame callbacks at a target rate. At
//! most one frame request is outstanding at any time; every transition that
//! leaves `Running` cancels it.

use crate::clock::FrameClock;
use crate::host::{FrameHandle, FrameHost};
use crate::state::{SchedulerEvent, SchedulerState};
use crate::system::FrameSystem;

/// Counters describing what the scheduler has done since creation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Host callbacks that matched the pending request
    pub callbacks: u64,
    /// Callbacks that ran update, connect and draw
    pub frames: u64,
    /// Callbacks skipped because the target interval had not elapsed
    pub throttled: u64,
    /// Stale callbacks or callbacks delivered outside `Running`
    pub ignored: u64,
}

/// What a host callback resulted in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// One full update/connect/draw cycle ran
    Rendered,
    /// Too early for the target rate; a new callback was requested
    Throttled,
    /// Callback did not belong to this scheduler's pending request
    Ignored,
}

/// Frame loop state machine bound to a target frame rate
pub struct FrameScheduler {
    state: SchedulerState,
    clock: FrameClock,
    pending: Option<FrameHandle>,
    stats: FrameStats,
}

impl FrameScheduler {
    pub fn new(target_fps: u32) -> Self {
        Self {
            state: SchedulerState::Stopped,
            clock: FrameClock::with_target_fps(target_fps),
            pending: None,
            stats: FrameStats::default(),
        }
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    pub fn stats(&self) -> FrameStats {
        self.stats
    }

    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    /// The frame request currently outstanding, if any
    pub fn pending_frame(&self) -> Option<FrameHandle> {
        self.pending
    }

    fn transition(&mut self, event: SchedulerEvent) -> bool {
        match self.state.next(event) {
            Some(next) => {
                log::debug!("[scheduler] {:?} --{:?}--> {:?}", self.state, event, next);
                self.state = next;
                true
            }
            None => false,
        }
    }

    fn request<H: FrameHost + ?Sized>(&mut self, host: &mut H) {
        // Never more than one request in flight
        if let Some(stale) = self.pending.take() {
            host.cancel_frame(stale);
        }
        self.pending = Some(host.request_frame());
    }

    fn cancel<H: FrameHost + ?Sized>(&mut self, host: &mut H) {
        if let Some(handle) = self.pending.take() {
            host.cancel_frame(handle);
        }
    }

    /// `Stopped → Running`: request the first frame. The first callback is
    /// always accepted.
    pub fn start<H: FrameHost + ?Sized>(&mut self, host: &mut H) -> bool {
        if !self.transition(SchedulerEvent::Start) {
            return false;
        }
        self.clock.clear();
        self.request(host);
        true
    }

    /// `Running → Paused`: cancel the outstanding request.
    pub fn pause<H: FrameHost + ?Sized>(&mut self, host: &mut H) -> bool {
        if !self.transition(SchedulerEvent::Hide) {
            return false;
        }
        self.cancel(host);
        true
    }

    /// `Paused → Running`: rebase the clock on the host's current time so
    /// the hidden interval is not replayed, then request a frame.
    pub fn resume<H: FrameHost + ?Sized>(&mut self, host: &mut H) -> bool {
        if !self.transition(SchedulerEvent::Show) {
            return false;
        }
        self.clock.reset(host.now());
        self.request(host);
        true
    }

    /// `Running/Paused → Stopped`: cancel unconditionally. Safe to call in
    /// any state.
    pub fn stop<H: FrameHost + ?Sized>(&mut self, host: &mut H) {
        self.transition(SchedulerEvent::Stop);
        self.cancel(host);
    }

    /// Handle a host frame callback.
    pub fn on_frame<H, S>(
        &mut self,
        host: &mut H,
        system: &mut S,
        handle: FrameHandle,
        timestamp: f64,
    ) -> TickOutcome
    where
        H: FrameHost + ?Sized,
        S: FrameSystem + ?Sized,
    {
        if !self.state.is_running() || self.pending != Some(handle) {
            self.stats.ignored += 1;
            return TickOutcome::Ignored;
        }
        // The host consumed this request
        self.pending = None;
        self.stats.callbacks += 1;

        let Some(delta_frames) = self.clock.accept(timestamp) else {
            self.stats.throttled += 1;
            self.request(host);
            return TickOutcome::Throttled;
        };

        system.update(delta_frames as f32);
        system.connect();
        system.draw();
        self.stats.frames += 1;

        self.request(host);
        TickOutcome::Rendered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event_bus::HostCallback;
    use crate::host::ManualHost;

    #[derive(Default)]
    struct Recorder {
        log: Vec<&'static str>,
        deltas: Vec<f32>,
    }

    impl FrameSystem for Recorder {
        fn update(&mut self, delta_frames: f32) {
            self.log.push("update");
            self.deltas.push(delta_frames);
        }
        fn connect(&mut self) {
            self.log.push("connect");
        }
        fn draw(&mut self) {
            self.log.push("draw");
        }
        fn name(&self) -> &str {
            "recorder"
        }
    }

    fn pump(
        scheduler: &mut FrameScheduler,
        host: &mut ManualHost,
        system: &mut Recorder,
        ms: f64,
    ) -> Vec<TickOutcome> {
        host.advance_frame(ms)
            .into_iter()
            .filter_map(|cb| match cb {
                HostCallback::Frame { handle, timestamp } => {
                    Some(scheduler.on_frame(host, system, handle, timestamp))
                }
                HostCallback::Timer { .. } => None,
            })
            .collect()
    }

    #[test]
    fn start_requests_first_frame() {
        let mut host = ManualHost::new();
        let mut scheduler = FrameScheduler::new(30);
        assert!(scheduler.start(&mut host));
        assert_eq!(scheduler.state(), SchedulerState::Running);
        assert_eq!(host.pending_frame_count(), 1);
        assert!(!scheduler.start(&mut host));
        assert_eq!(host.pending_frame_count(), 1);
    }

    #[test]
    fn phases_run_in_order() {
        let mut host = ManualHost::new();
        let mut system = Recorder::default();
        let mut scheduler = FrameScheduler::new(60);
        scheduler.start(&mut host);

        let outcomes = pump(&mut scheduler, &mut host, &mut system, 17.0);
        assert_eq!(outcomes, vec![TickOutcome::Rendered]);
        assert_eq!(system.log, vec!["update", "connect", "draw"]);
        assert_eq!(host.pending_frame_count(), 1);
    }

    #[test]
    fn throttles_to_target_rate() {
        let mut host = ManualHost::new();
        let mut system = Recorder::default();
        let mut scheduler = FrameScheduler::new(25);
        scheduler.start(&mut host);

        // 100Hz host for one second
        for _ in 0..100 {
            pump(&mut scheduler, &mut host, &mut system, 10.0);
        }
        let stats = scheduler.stats();
        assert_eq!(stats.callbacks, 100);
        assert_eq!(stats.frames, 25);
        assert_eq!(stats.throttled, 75);
        assert_eq!(host.pending_frame_count(), 1);
    }

    #[test]
    fn pause_cancels_and_ignores_stale_callbacks() {
        let mut host = ManualHost::new();
        let mut system = Recorder::default();
        let mut scheduler = FrameScheduler::new(30);
        scheduler.start(&mut host);
        pump(&mut scheduler, &mut host, &mut system, 40.0);
        let stale = scheduler.pending_frame().unwrap();

        assert!(scheduler.pause(&mut host));
        assert_eq!(host.pending_frame_count(), 0);

        let steps_before = system.deltas.len();
        for i in 0..10 {
            let outcome =
                scheduler.on_frame(&mut host, &mut system, stale, 100.0 + i as f64 * 16.0);
            assert_eq!(outcome, TickOutcome::Ignored);
        }
        assert_eq!(system.deltas.len(), steps_before);
        assert_eq!(scheduler.stats().ignored, 10);
    }

    #[test]
    fn resume_rebases_clock() {
        let mut host = ManualHost::new();
        let mut system = Recorder::default();
        let mut scheduler = FrameScheduler::new(30);
        scheduler.start(&mut host);
        pump(&mut scheduler, &mut host, &mut system, 40.0);
        scheduler.pause(&mut host);

        host.advance(10_000.0);
        assert!(scheduler.resume(&mut host));
        assert_eq!(scheduler.clock().baseline(), Some(host.now()));

        let outcomes = pump(&mut scheduler, &mut host, &mut system, 40.0);
        assert_eq!(outcomes, vec![TickOutcome::Rendered]);
        // One step, sized by the post-resume interval only
        assert_eq!(system.deltas.len(), 2);
        assert!(system.deltas[1] < 2.0);
    }

    #[test]
    fn stop_from_any_state_clears_request() {
        let mut host = ManualHost::new();
        let mut scheduler = FrameScheduler::new(30);

        scheduler.stop(&mut host);
        assert_eq!(scheduler.state(), SchedulerState::Stopped);

        scheduler.start(&mut host);
        scheduler.stop(&mut host);
        assert_eq!(host.pending_frame_count(), 0);

        let mut scheduler = FrameScheduler::new(30);
        scheduler.start(&mut host);
        scheduler.pause(&mut host);
        scheduler.stop(&mut host);
        assert_eq!(scheduler.state(), SchedulerState::Stopped);
        assert_eq!(host.pending_frame_count(), 0);
    }

    #[test]
    fn callbacks_after_stop_ignored() {
        let mut host = ManualHost::new();
        let mut system = Recorder::default();
        let mut scheduler = FrameScheduler::new(30);
        scheduler.start(&mut host);
        let handle = scheduler.pending_frame().unwrap();
        scheduler.stop(&mut host);

        let outcome = scheduler.on_frame(&mut host, &mut system, handle, 100.0);
        assert_eq!(outcome, TickOutcome::Ignored);
        assert!(system.log.is_empty());
        assert_eq!(host.pending_frame_count(), 0);
    }
}
