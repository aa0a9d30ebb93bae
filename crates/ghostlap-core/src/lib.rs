//! # GhostLap Core Library
//!
//! Core functionality for the GhostLap lap recording and playback tools.

#![warn(missing_docs)]

//!
//! This library provides:
//! - Lap file writing (delimited text tables with strict schema enforcement)
//! - Lap file loading back into time-indexed recordings
//! - Deterministic playback with seek, scrubbing and variable speed
//! - Tick-driven telemetry capture ahead of the writer
//!
//! ## Example
//!
//! ```rust,ignore
//! use ghostlap_core::lapfile::LapFileWriter;
//! use ghostlap_core::playback::{RecordedLap, RecordedLapPlayer, TimeSource};
//! use std::sync::Arc;
//!
//! // Record two samples of speed and rpm
//! let mut writer = LapFileWriter::create("lap.csv")?;
//! writer.write_headers(&["time", "speed", "rpm"])?;
//! writer.write_row_safe(&[0.0, 0.0, 850.0])?;
//! writer.write_row_safe(&[0.1, 1.2, 1100.0])?;
//! drop(writer);
//!
//! // Play it back at half speed
//! let lap = Arc::new(RecordedLap::load("lap.csv", TimeSource::channel("time"))?);
//! let mut player = RecordedLapPlayer::new(lap);
//! player.set_reproduction_speed(0.5);
//! player.play();
//! player.update(0.1);
//! println!("speed: {:?}", player.get_channel_by_name("speed"));
//! ```

pub mod demo;
pub mod lapfile;
pub mod playback;
pub mod recorder;
pub mod timefmt;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::demo::DemoDriver;
    pub use crate::lapfile::{LapData, LapFileError, LapFileWriter, SEPARATOR};
    pub use crate::playback::{
        PlaybackState, RecordedLap, RecordedLapError, RecordedLapPlayer, ReproductionType,
        TimeSource,
    };
    pub use crate::recorder::LapRecorder;
}

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
