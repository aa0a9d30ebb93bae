//! Recorded lap data model
//!
//! An immutable, time-indexed representation of one full recording. The
//! sample buffer is read-only after construction and may be shared across
//! multiple players behind an `Arc`.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::lapfile::{read_lap_file, LapData, LapFileError};

/// Errors that can occur when building a recorded lap
#[derive(Debug, thiserror::Error)]
pub enum RecordedLapError {
    #[error("unknown time channel '{0}'")]
    UnknownTimeChannel(String),

    #[error("sample time decreases at row {row}")]
    NonMonotonicTime { row: usize },

    #[error("row {row} has {actual} values, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("fixed sample interval must be positive, got {0}")]
    InvalidInterval(f32),

    #[error("lap file error: {0}")]
    File(#[from] LapFileError),
}

/// Where a recording's sample times come from
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum TimeSource {
    /// Times are read from the named schema channel
    Channel(String),
    /// Samples are evenly spaced at the given interval in seconds
    FixedInterval(f32),
}

impl TimeSource {
    /// Shorthand for [`TimeSource::Channel`]
    pub fn channel(name: impl Into<String>) -> Self {
        TimeSource::Channel(name.into())
    }
}

/// One full recording, indexed by sample time.
///
/// Sample times are non-decreasing; `total_time` is the time of the last
/// sample. Channel values at any time inside the recording are produced by
/// linear interpolation between the bracketing stored samples.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordedLap {
    schema: Vec<String>,
    times: Vec<f32>,
    rows: Vec<Vec<f32>>,
    /// Schema index the times were read from, if any
    time_channel: Option<usize>,
}

impl RecordedLap {
    /// Build a recorded lap from loaded file data.
    ///
    /// With [`TimeSource::Channel`] the sample times are taken from that
    /// channel and validated to be non-decreasing; with
    /// [`TimeSource::FixedInterval`] they are synthesized as
    /// `row index * interval`.
    pub fn from_data(data: LapData, source: TimeSource) -> Result<Self, RecordedLapError> {
        for (row, values) in data.rows.iter().enumerate() {
            if values.len() != data.schema.len() {
                return Err(RecordedLapError::RaggedRow {
                    row,
                    expected: data.schema.len(),
                    actual: values.len(),
                });
            }
        }

        let (times, time_channel) = match &source {
            TimeSource::Channel(name) => {
                let index = data
                    .channel_index(name)
                    .ok_or_else(|| RecordedLapError::UnknownTimeChannel(name.clone()))?;

                let times: Vec<f32> = data.rows.iter().map(|row| row[index]).collect();
                for (row, pair) in times.windows(2).enumerate() {
                    if pair[1] < pair[0] {
                        return Err(RecordedLapError::NonMonotonicTime { row: row + 1 });
                    }
                }
                (times, Some(index))
            }
            TimeSource::FixedInterval(interval) => {
                if !(*interval > 0.0) {
                    return Err(RecordedLapError::InvalidInterval(*interval));
                }
                let times = (0..data.rows.len()).map(|i| i as f32 * interval).collect();
                (times, None)
            }
        };

        Ok(Self {
            schema: data.schema,
            times,
            rows: data.rows,
            time_channel,
        })
    }

    /// Read a lap file from disk and build a recorded lap from it
    pub fn load<P: AsRef<Path>>(path: P, source: TimeSource) -> Result<Self, RecordedLapError> {
        Self::from_data(read_lap_file(path)?, source)
    }

    /// Ordered channel names
    pub fn schema(&self) -> &[String] {
        &self.schema
    }

    /// Number of channels in the schema
    pub fn channel_count(&self) -> usize {
        self.schema.len()
    }

    /// Number of channels carrying values, excluding the time channel
    /// when the times were read from one
    pub fn value_channel_count(&self) -> usize {
        self.schema.len() - usize::from(self.time_channel.is_some())
    }

    /// Find the index of a channel by name
    pub fn channel_index(&self, name: &str) -> Option<usize> {
        self.schema.iter().position(|c| c == name)
    }

    /// Number of stored samples
    pub fn sample_count(&self) -> usize {
        self.times.len()
    }

    /// Whether the recording holds no samples
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Time of the last sample, 0 for an empty recording
    pub fn total_time(&self) -> f32 {
        self.times.last().copied().unwrap_or(0.0)
    }

    /// Channel value at a point in time.
    ///
    /// Returns the linear interpolation between the two stored samples
    /// bracketing `time`. Outside `[0, total_time]` the first or last
    /// sample's value is returned unchanged; there is no extrapolation.
    /// `None` for an unknown channel or an empty recording.
    pub fn value_at(&self, channel: usize, time: f32) -> Option<f32> {
        if self.times.is_empty() || channel >= self.schema.len() {
            return None;
        }

        let (lo, hi, alpha) = self.bracket(time);
        let v0 = self.rows[lo][channel];
        let v1 = self.rows[hi][channel];
        Some(v0 + (v1 - v0) * alpha)
    }

    /// Channel value at a point in time, by channel name
    pub fn value_by_name(&self, name: &str, time: f32) -> Option<f32> {
        self.value_at(self.channel_index(name)?, time)
    }

    /// Whole interpolated row at a point in time, in schema order
    pub fn sample_at(&self, time: f32) -> Option<Vec<f32>> {
        if self.times.is_empty() {
            return None;
        }

        let (lo, hi, alpha) = self.bracket(time);
        let row = self.rows[lo]
            .iter()
            .zip(&self.rows[hi])
            .map(|(v0, v1)| v0 + (v1 - v0) * alpha)
            .collect();
        Some(row)
    }

    /// Locate the bracketing sample pair for `time` and the interpolation
    /// factor between them. Requires at least one sample.
    fn bracket(&self, time: f32) -> (usize, usize, f32) {
        let last = self.times.len() - 1;
        if time <= self.times[0] {
            return (0, 0, 0.0);
        }
        if time >= self.times[last] {
            return (last, last, 0.0);
        }

        // first index whose time is strictly greater than `time`
        let hi = self.times.partition_point(|&t| t <= time);
        if hi == 0 {
            return (0, 0, 0.0);
        }
        let lo = hi - 1;

        let (t0, t1) = (self.times[lo], self.times[hi]);
        if t1 <= t0 {
            // duplicate timestamps; take the later sample
            return (hi, hi, 0.0);
        }
        (lo, hi, (time - t0) / (t1 - t0))
    }
}
