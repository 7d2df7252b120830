//! Frame system trait

/// Work performed for each accepted frame.
///
/// The scheduler calls the three phases in order within one tick: `update`
/// always precedes `connect`, which always precedes `draw`. Implementations
/// must not block; each call returns before the host regains control.
pub trait FrameSystem {
    /// Advance the simulation. `delta_frames` is the elapsed time expressed
    /// in target frame intervals (1.0 = exactly one interval).
    fn update(&mut self, delta_frames: f32);

    /// Derive per-frame relationships from the updated state
    fn connect(&mut self);

    /// Paint the current state
    fn draw(&mut self);

    /// Human-readable name for this system
    fn name(&self) -> &str;
}
