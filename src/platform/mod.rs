//! Platform abstraction layer
//!
//! The host (browser or native loop) supplies timestamps; the tick sources
//! here decide when the round's periodic activities fire. A stopped source
//! never fires, so a late host callback cannot touch a finished round.

pub mod clock;

pub use clock::{FrameClock, IntervalClock};

/// A cancellable periodic activity driven by host timestamps (milliseconds)
pub trait TickSource {
    /// What one firing delivers
    type Tick;

    /// Begin firing, measuring from `now_ms`. Restarting resets all timing.
    fn start(&mut self, now_ms: f64);

    /// Stop firing until the next `start`
    fn stop(&mut self);

    fn is_running(&self) -> bool;

    /// Next due firing at `now_ms`, if any. Call repeatedly to drain.
    fn poll(&mut self, now_ms: f64) -> Option<Self::Tick>;
}
