//! Lap Playback
//!
//! Time-indexed reproduction of recorded laps: the [`RecordedLap`] data
//! model with sample interpolation, and the [`RecordedLapPlayer`] state
//! machine that advances a playing time over it.

mod lap;
mod player;

pub use lap::{RecordedLap, RecordedLapError, TimeSource};
pub use player::{PlaybackState, RecordedLapPlayer, ReproductionType};
