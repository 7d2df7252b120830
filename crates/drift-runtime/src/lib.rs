//! Drift Runtime - Frame loop infrastructure
//!
//! Provides the cooperative frame loop building blocks:
//! - `FrameHost` - the environment's frame callbacks, timers and listeners
//! - `ManualHost` - a host driven by an explicit clock (tests, headless runs)
//! - `FrameClock` - throttles host callbacks down to a target frame rate
//! - `SchedulerState` - Stopped / Running / Paused transitions
//! - `FrameSystem` - trait for the work performed on each accepted frame
//! - `FrameScheduler` - ties the above together

mod clock;
mod event_bus;
mod host;
mod scheduler;
mod state;
mod system;

pub use clock::FrameClock;
pub use event_bus::{CallbackQueue, HostCallback};
pub use host::{FrameHandle, FrameHost, HostEventKind, ListenerId, ManualHost, TimerHandle};
pub use scheduler::{FrameScheduler, FrameStats, TickOutcome};
pub use state::{SchedulerEvent, SchedulerState};
pub use system::FrameSystem;
