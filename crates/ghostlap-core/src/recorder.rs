//! Lap recorder
//!
//! Captures telemetry samples from a tick-driven producer ahead of the
//! lap file writer. Sample times come from the caller, so capture stays
//! deterministic under simulation time.

use std::collections::VecDeque;
use std::path::Path;

use crate::lapfile::{LapFileError, LapFileWriter};

/// Maximum samples to keep in memory before evicting the oldest
const MAX_BUFFER_SIZE: usize = 100_000;

/// Name of the time column the recorder prepends to its channels
const TIME_CHANNEL: &str = "time";

/// Tick-driven telemetry capture buffer
pub struct LapRecorder {
    /// Channel names, excluding the implicit time column
    channels: Vec<String>,
    /// Buffered (time, values) samples in capture order
    buffer: VecDeque<(f32, Vec<f32>)>,
    /// Whether capture is active
    is_recording: bool,
    /// Target sample rate in Hz
    sample_rate: f32,
    /// Time of the last accepted sample
    last_sample: Option<f32>,
}

impl LapRecorder {
    /// Create a new recorder for the given channels
    pub fn new(channels: Vec<String>) -> Self {
        Self {
            channels,
            buffer: VecDeque::new(),
            is_recording: false,
            sample_rate: 50.0,
            last_sample: None,
        }
    }

    /// Set the target sample rate in Hz
    pub fn set_sample_rate(&mut self, rate: f32) {
        self.sample_rate = rate.clamp(1.0, 1000.0);
    }

    /// Get the sample rate
    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Start capturing, discarding any previously buffered samples
    pub fn start(&mut self) {
        self.is_recording = true;
        self.last_sample = None;
        self.buffer.clear();
    }

    /// Stop capturing. Buffered samples stay available for writing.
    pub fn stop(&mut self) {
        self.is_recording = false;
    }

    /// Check if capture is active
    pub fn is_recording(&self) -> bool {
        self.is_recording
    }

    /// Record one sample at `time` seconds from lap start.
    ///
    /// Ignored while stopped, when called faster than the sample rate
    /// allows, or when `values` does not match the channel list.
    pub fn record(&mut self, time: f32, values: Vec<f32>) {
        if !self.is_recording {
            return;
        }

        if values.len() != self.channels.len() {
            tracing::warn!(
                "dropping sample with {} values for {} channels",
                values.len(),
                self.channels.len()
            );
            return;
        }

        let min_interval = 1.0 / self.sample_rate;
        if let Some(last) = self.last_sample {
            if time - last < min_interval {
                return;
            }
        }

        if self.buffer.len() >= MAX_BUFFER_SIZE {
            self.buffer.pop_front();
        }

        self.buffer.push_back((time, values));
        self.last_sample = Some(time);
    }

    /// Number of buffered samples
    pub fn entry_count(&self) -> usize {
        self.buffer.len()
    }

    /// Time of the last buffered sample, 0 when empty
    pub fn duration(&self) -> f32 {
        self.buffer.back().map(|(t, _)| *t).unwrap_or(0.0)
    }

    /// Channel names, excluding the implicit time column
    pub fn channels(&self) -> &[String] {
        &self.channels
    }

    /// Discard all buffered samples
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.last_sample = None;
    }

    /// Drain the buffer into a lap file writer: a `time` column followed
    /// by the recorder's channels, one row per sample.
    pub fn write_to(&self, writer: &mut LapFileWriter) -> Result<(), LapFileError> {
        let mut headers = Vec::with_capacity(self.channels.len() + 1);
        headers.push(TIME_CHANNEL.to_string());
        headers.extend(self.channels.iter().cloned());
        writer.write_headers(&headers)?;

        let mut row = Vec::with_capacity(headers.len());
        for (time, values) in &self.buffer {
            row.clear();
            row.push(*time);
            row.extend_from_slice(values);
            writer.write_row(&row)?;
        }
        Ok(())
    }

    /// Write the buffered samples to a new lap file at `path`
    pub fn save_csv<P: AsRef<Path>>(&self, path: P) -> Result<(), LapFileError> {
        let mut writer = LapFileWriter::create(path)?;
        self.write_to(&mut writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_test_recorder() -> LapRecorder {
        LapRecorder::new(vec!["speed".into(), "rpm".into()])
    }

    #[test]
    fn test_recorder_lifecycle() {
        let mut recorder = make_test_recorder();
        assert!(!recorder.is_recording());

        recorder.start();
        assert!(recorder.is_recording());

        recorder.record(0.0, vec![10.0, 1500.0]);
        assert_eq!(recorder.entry_count(), 1);

        recorder.stop();
        assert!(!recorder.is_recording());
        assert_eq!(recorder.entry_count(), 1);
    }

    #[test]
    fn test_ignores_samples_while_stopped() {
        let mut recorder = make_test_recorder();
        recorder.record(0.0, vec![10.0, 1500.0]);
        assert_eq!(recorder.entry_count(), 0);
    }

    #[test]
    fn test_drops_mismatched_rows() {
        let mut recorder = make_test_recorder();
        recorder.start();
        recorder.record(0.0, vec![10.0]);
        assert_eq!(recorder.entry_count(), 0);
    }

    #[test]
    fn test_honors_sample_rate() {
        let mut recorder = make_test_recorder();
        recorder.set_sample_rate(10.0);
        recorder.start();

        recorder.record(0.0, vec![1.0, 1.0]);
        recorder.record(0.05, vec![2.0, 2.0]); // too soon at 10 Hz
        recorder.record(0.1, vec![3.0, 3.0]);

        assert_eq!(recorder.entry_count(), 2);
        assert_eq!(recorder.duration(), 0.1);
    }

    #[test]
    fn test_start_discards_previous_capture() {
        let mut recorder = make_test_recorder();
        recorder.start();
        recorder.record(0.0, vec![1.0, 1.0]);

        recorder.start();
        assert_eq!(recorder.entry_count(), 0);
    }
}
