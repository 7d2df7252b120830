//! Scheduler state machine
//!
//! `Stopped` is both the initial and the terminal state. Transitions that
//! are not listed below are ignored rather than treated as errors, since
//! hosts routinely deliver redundant notifications (two "hidden" events in
//! a row, a visibility change after teardown).
//!
//! ```text
//! Stopped --Start--> Running --Hide--> Paused --Show--> Running
//! Running/Paused --Stop--> Stopped
//! ```

/// Scheduling state of a frame loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SchedulerState {
    /// No frame requests outstanding; initial and terminal.
    #[default]
    Stopped,
    /// A frame request is (or is about to be) outstanding.
    Running,
    /// Host is hidden; state preserved but not ticked.
    Paused,
}

/// Inputs that drive the state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerEvent {
    Start,
    Hide,
    Show,
    Stop,
}

impl SchedulerState {
    /// The state reached from `self` on `event`, or `None` if the event does
    /// not apply in this state.
    pub fn next(self, event: SchedulerEvent) -> Option<SchedulerState> {
        use SchedulerEvent::*;
        use SchedulerState::*;

        match (self, event) {
            (Stopped, Start) => Some(Running),
            (Running, Hide) => Some(Paused),
            (Paused, Show) => Some(Running),
            (Running | Paused, Stop) => Some(Stopped),
            _ => None,
        }
    }

    pub fn is_running(self) -> bool {
        self == SchedulerState::Running
    }

    pub fn is_stopped(self) -> bool {
        self == SchedulerState::Stopped
    }
}
