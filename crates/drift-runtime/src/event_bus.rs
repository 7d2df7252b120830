//! Queue of host callbacks that are due for delivery

use crate::host::{FrameHandle, TimerHandle};

/// A callback the host owes the engine
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HostCallback {
    /// A requested animation frame fired at `timestamp` (ms)
    Frame {
        handle: FrameHandle,
        timestamp: f64,
    },
    /// A timer set with `FrameHost::set_timer` expired
    Timer { handle: TimerHandle },
}

/// A simple queue that the host pushes to and the driver drains
pub struct CallbackQueue {
    callbacks: Vec<HostCallback>,
}

impl Default for CallbackQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl CallbackQueue {
    pub fn new() -> Self {
        Self {
            callbacks: Vec::new(),
        }
    }

    /// Push a callback onto the queue
    pub fn push(&mut self, callback: HostCallback) {
        self.callbacks.push(callback);
    }

    /// Drain all callbacks in delivery order
    pub fn drain(&mut self) -> Vec<HostCallback> {
        std::mem::take(&mut self.callbacks)
    }

    /// Check if there are pending callbacks
    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }

    /// Number of pending callbacks
    pub fn len(&self) -> usize {
        self.callbacks.len()
    }
}
