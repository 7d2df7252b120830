//! Frame clock that throttles host callbacks to a target rate

/// Decides which host frame callbacks are turned into simulated frames.
///
/// Hosts may deliver callbacks faster than the target rate (a 120Hz display
/// driving a 30fps tier). A callback is accepted only once at least one
/// frame interval has elapsed since the last accepted frame.
pub struct FrameClock {
    /// Target simulated frames per second
    pub target_fps: u32,
    /// Minimum time between accepted frames, in milliseconds
    pub frame_interval: f64,
    /// Timestamp baseline of the last accepted frame (ms)
    last_frame: Option<f64>,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::with_target_fps(60)
    }
}

impl FrameClock {
    /// Create a clock for the given rate. Zero is treated as 1fps.
    pub fn with_target_fps(fps: u32) -> Self {
        let fps = fps.max(1);
        Self {
            target_fps: fps,
            frame_interval: 1000.0 / fps as f64,
            last_frame: None,
        }
    }

    /// Forget the baseline; the next callback is accepted unconditionally.
    pub fn clear(&mut self) {
        self.last_frame = None;
    }

    /// Restart timing from `now`, so time spent paused is not replayed.
    pub fn reset(&mut self, now: f64) {
        self.last_frame = Some(now);
    }

    /// Timestamp baseline of the last accepted frame
    pub fn baseline(&self) -> Option<f64> {
        self.last_frame
    }

    /// Offer a host callback at `now` (ms).
    ///
    /// Returns `None` when the callback arrives before a full interval has
    /// elapsed. Otherwise returns the elapsed time in frame units (1.0 = one
    /// target interval) and advances the baseline, keeping the remainder so
    /// the cadence does not drift.
    pub fn accept(&mut self, now: f64) -> Option<f64> {
        let Some(last) = self.last_frame else {
            self.last_frame = Some(now);
            return Some(1.0);
        };

        let elapsed = now - last;
        if elapsed < 0.0 || !elapsed.is_finite() {
            // Host clock went backwards; rebase without rendering
            self.last_frame = Some(now);
            return None;
        }
        if elapsed < self.frame_interval {
            return None;
        }

        self.last_frame = Some(now - elapsed % self.frame_interval);
        Some(elapsed / self.frame_interval)
    }
}
