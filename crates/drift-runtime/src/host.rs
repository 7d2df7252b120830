//! Host environment abstraction
//!
//! The engine never owns a thread or a timer. Everything that happens over
//! time is requested from a [`FrameHost`]: animation frame callbacks, one-shot
//! timers and listener subscriptions. The host later calls back into the
//! engine with the handle it returned, which lets stale callbacks be told
//! apart from the current one.

use crate::event_bus::{CallbackQueue, HostCallback};

/// Handle for a pending animation frame request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub u64);

/// Handle for a pending one-shot timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(pub u64);

/// Handle for a listener subscription
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

/// Host notifications the engine can subscribe to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HostEventKind {
    Resize,
    Visibility,
}

/// The environment driving the engine.
///
/// All methods are called from the single cooperative thread that also
/// delivers callbacks, so none of them need to be thread-safe.
pub trait FrameHost {
    /// Current host time in milliseconds
    fn now(&self) -> f64;

    /// Ask for one animation frame callback
    fn request_frame(&mut self) -> FrameHandle;

    /// Cancel a pending frame request. Unknown handles are ignored.
    fn cancel_frame(&mut self, handle: FrameHandle);

    /// Schedule a one-shot timer `delay_ms` from now
    fn set_timer(&mut self, delay_ms: f64) -> TimerHandle;

    /// Cancel a pending timer. Unknown handles are ignored.
    fn clear_timer(&mut self, handle: TimerHandle);

    /// Start receiving notifications of the given kind
    fn subscribe(&mut self, kind: HostEventKind) -> ListenerId;

    /// Stop receiving notifications. Unknown ids are ignored.
    fn unsubscribe(&mut self, id: ListenerId);
}

/// A host whose clock only moves when told to.
///
/// Frame requests behave like browser animation frames: every request that
/// is pending when the host "paints" fires once with the paint timestamp and
/// is then consumed. Timers fire in due order before the paint.
pub struct ManualHost {
    now: f64,
    next_id: u64,
    pending_frames: Vec<FrameHandle>,
    timers: Vec<(TimerHandle, f64)>,
    listeners: Vec<(ListenerId, HostEventKind)>,
    queue: CallbackQueue,
    /// Total frame requests made over the host's lifetime
    pub frame_requests: u64,
    /// Total timers set over the host's lifetime
    pub timers_set: u64,
}

impl Default for ManualHost {
    fn default() -> Self {
        Self::new()
    }
}

impl ManualHost {
    pub fn new() -> Self {
        Self::starting_at(0.0)
    }

    /// Create a host whose clock starts at `now` (ms)
    pub fn starting_at(now: f64) -> Self {
        Self {
            now,
            next_id: 1,
            pending_frames: Vec::new(),
            timers: Vec::new(),
            listeners: Vec::new(),
            queue: CallbackQueue::new(),
            frame_requests: 0,
            timers_set: 0,
        }
    }

    fn next_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Move the clock forward without painting. Due timers are queued.
    pub fn advance(&mut self, ms: f64) -> Vec<HostCallback> {
        self.now += ms.max(0.0);
        self.collect_due_timers();
        self.queue.drain()
    }

    /// Move the clock forward and paint: due timers fire first, then every
    /// pending frame request fires at the new timestamp.
    pub fn advance_frame(&mut self, ms: f64) -> Vec<HostCallback> {
        self.now += ms.max(0.0);
        self.collect_due_timers();
        let timestamp = self.now;
        for handle in std::mem::take(&mut self.pending_frames) {
            self.queue.push(HostCallback::Frame { handle, timestamp });
        }
        self.queue.drain()
    }

    fn collect_due_timers(&mut self) {
        let now = self.now;
        let mut due: Vec<(TimerHandle, f64)> = Vec::new();
        self.timers.retain(|&(handle, at)| {
            if at <= now {
                due.push((handle, at));
                false
            } else {
                true
            }
        });
        due.sort_by(|a, b| a.1.total_cmp(&b.1));
        for (handle, _) in due {
            self.queue.push(HostCallback::Timer { handle });
        }
    }

    pub fn pending_frame_count(&self) -> usize {
        self.pending_frames.len()
    }

    pub fn pending_timer_count(&self) -> usize {
        self.timers.len()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// True if a listener of `kind` is currently subscribed
    pub fn is_subscribed(&self, kind: HostEventKind) -> bool {
        self.listeners.iter().any(|&(_, k)| k == kind)
    }

    /// True when nothing is pending and nobody is listening
    pub fn is_idle(&self) -> bool {
        self.pending_frames.is_empty() && self.timers.is_empty() && self.listeners.is_empty()
    }
}

impl FrameHost for ManualHost {
    fn now(&self) -> f64 {
        self.now
    }

    fn request_frame(&mut self) -> FrameHandle {
        let handle = FrameHandle(self.next_id());
        self.pending_frames.push(handle);
        self.frame_requests += 1;
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        self.pending_frames.retain(|&h| h != handle);
    }

    fn set_timer(&mut self, delay_ms: f64) -> TimerHandle {
        let handle = TimerHandle(self.next_id());
        let delay = if delay_ms.is_finite() {
            delay_ms.max(0.0)
        } else {
            0.0
        };
        self.timers.push((handle, self.now + delay));
        self.timers_set += 1;
        handle
    }

    fn clear_timer(&mut self, handle: TimerHandle) {
        self.timers.retain(|&(h, _)| h != handle);
    }

    fn subscribe(&mut self, kind: HostEventKind) -> ListenerId {
        let id = ListenerId(self.next_id());
        self.listeners.push((id, kind));
        id
    }

    fn unsubscribe(&mut self, id: ListenerId) {
        self.listeners.retain(|&(l, _)| l != id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_request_fires_once() {
        let mut host = ManualHost::new();
        let handle = host.request_frame();
        assert_eq!(host.pending_frame_count(), 1);

        let callbacks = host.advance_frame(16.0);
        assert_eq!(
            callbacks,
            vec![HostCallback::Frame {
                handle,
                timestamp: 16.0
            }]
        );
        assert_eq!(host.pending_frame_count(), 0);
        assert!(host.advance_frame(16.0).is_empty());
    }

    #[test]
    fn cancelled_frame_never_fires() {
        let mut host = ManualHost::new();
        let handle = host.request_frame();
        host.cancel_frame(handle);
        assert!(host.advance_frame(16.0).is_empty());
        assert_eq!(host.frame_requests, 1);
    }

    #[test]
    fn advance_without_paint_keeps_frames_pending() {
        let mut host = ManualHost::new();
        host.request_frame();
        assert!(host.advance(100.0).is_empty());
        assert_eq!(host.pending_frame_count(), 1);
        assert_eq!(host.now(), 100.0);
    }

    #[test]
    fn timers_fire_in_due_order() {
        let mut host = ManualHost::new();
        let late = host.set_timer(50.0);
        let early = host.set_timer(10.0);
        assert!(host.advance(5.0).is_empty());

        let callbacks = host.advance(100.0);
        assert_eq!(
            callbacks,
            vec![
                HostCallback::Timer { handle: early },
                HostCallback::Timer { handle: late },
            ]
        );
        assert_eq!(host.pending_timer_count(), 0);
    }

    #[test]
    fn cleared_timer_never_fires() {
        let mut host = ManualHost::new();
        let handle = host.set_timer(10.0);
        host.clear_timer(handle);
        assert!(host.advance(20.0).is_empty());
    }

    #[test]
    fn subscriptions_tracked() {
        let mut host = ManualHost::new();
        let resize = host.subscribe(HostEventKind::Resize);
        let vis = host.subscribe(HostEventKind::Visibility);
        assert_eq!(host.listener_count(), 2);
        assert!(host.is_subscribed(HostEventKind::Resize));

        host.unsubscribe(resize);
        assert!(!host.is_subscribed(HostEventKind::Resize));
        host.unsubscribe(vis);
        host.unsubscribe(vis);
        assert!(host.is_idle());
    }

    #[test]
    fn negative_advance_does_not_rewind() {
        let mut host = ManualHost::starting_at(1000.0);
        host.advance(-50.0);
        assert_eq!(host.now(), 1000.0);
    }
}
