//! Real-time session engine: virtual clock, timing-point timeline,
//! replay playback, judgment and transient visual feedback.
//!
//! Everything in here is driven by the tick loop and never reads
//! wall-clock time; given the same inputs and the same call cadence the
//! whole engine is deterministic.

pub mod clock;
pub mod feedback;
pub mod judge;
pub mod replay;
pub mod timeline;

pub use clock::{TICKS_PER_SECOND, TickClock};
pub use feedback::{ComboCounter, DelayedMode, DelayedValue, MarkColor, MeterMark, TimingMeter};
pub use judge::{HitWindow, Judge};
pub use replay::{ReplayAction, ReplayPlayback};
pub use timeline::{Timeline, TimingPoint};
