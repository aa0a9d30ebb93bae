//! Recorded lap player
//!
//! A state machine that advances a virtual playing time over a recorded
//! lap and exposes interpolated channel values at that time. Driven by a
//! periodic external tick; all commands take effect synchronously.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::RecordedLap;

/// Reproduction speed ceiling, matching the UI's 3x slider bound
const MAX_SPEED: f32 = 3.0;

/// Playback state of a [`RecordedLapPlayer`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackState {
    /// Not advancing; the playing time stays where it is
    Stopped,
    /// Advancing on every tick
    Playing,
    /// Temporarily halted; resuming keeps the playing time
    Paused,
}

/// What happens when the playing time reaches the end of the lap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ReproductionType {
    /// Clamp at the end and stop
    #[default]
    Once,
    /// Wrap around to the start and keep playing
    Loop,
    /// Reflect at both ends, reversing direction
    PingPong,
}

/// Playback engine for one recorded lap.
///
/// Holds a non-owning reference to the recording, so several players can
/// replay the same lap concurrently. The playing time always stays inside
/// `[0, total_time]`.
#[derive(Debug, Clone)]
pub struct RecordedLapPlayer {
    lap: Arc<RecordedLap>,
    state: PlaybackState,
    playing_time: f32,
    reproduction_speed: f32,
    reproduction_type: ReproductionType,
    /// Travel direction, flipped by ping-pong reflection
    direction: f32,
}

impl RecordedLapPlayer {
    /// Create a stopped player at time 0 over the given recording
    pub fn new(lap: Arc<RecordedLap>) -> Self {
        Self {
            lap,
            state: PlaybackState::Stopped,
            playing_time: 0.0,
            reproduction_speed: 1.0,
            reproduction_type: ReproductionType::default(),
            direction: 1.0,
        }
    }

    /// The recording being played
    pub fn lap(&self) -> &RecordedLap {
        &self.lap
    }

    /// Point the player at a different recording.
    ///
    /// Only possible while stopped; returns whether the recording was
    /// swapped. The playing time is clamped into the new recording's
    /// duration.
    pub fn set_lap(&mut self, lap: Arc<RecordedLap>) -> bool {
        if self.state != PlaybackState::Stopped {
            return false;
        }
        self.lap = lap;
        self.playing_time = self.playing_time.clamp(0.0, self.lap.total_time());
        true
    }

    /// Current playback state
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Whether the player advances on ticks
    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    /// Current position within the recording, in seconds
    pub fn playing_time(&self) -> f32 {
        self.playing_time
    }

    /// Duration of the recording, in seconds
    pub fn total_time(&self) -> f32 {
        self.lap.total_time()
    }

    /// Playback progress in `[0, 1]`
    pub fn progress(&self) -> f32 {
        let total = self.total_time();
        if total <= 0.0 {
            return 0.0;
        }
        self.playing_time / total
    }

    /// Start or resume playback. No-op if already playing.
    pub fn play(&mut self) {
        self.state = PlaybackState::Playing;
    }

    /// Pause playback, keeping the playing time. No-op unless playing.
    pub fn pause(&mut self) {
        if self.state == PlaybackState::Playing {
            self.state = PlaybackState::Paused;
        }
    }

    /// Stop playback. The playing time stays where it is, which is what
    /// distinguishes this from [`restart`].
    ///
    /// [`restart`]: RecordedLapPlayer::restart
    pub fn stop(&mut self) {
        self.state = PlaybackState::Stopped;
    }

    /// Stop playback and rewind the playing time to 0
    pub fn restart(&mut self) {
        self.state = PlaybackState::Stopped;
        self.playing_time = 0.0;
        self.direction = 1.0;
    }

    /// Scrub to a position. The time is clamped into `[0, total_time]`;
    /// the playback state is left unchanged.
    pub fn set_playing_time(&mut self, time: f32) {
        self.playing_time = time.clamp(0.0, self.total_time());
    }

    /// Current reproduction speed multiplier
    pub fn reproduction_speed(&self) -> f32 {
        self.reproduction_speed
    }

    /// Set the reproduction speed multiplier, clamped into `[0, 3]`
    pub fn set_reproduction_speed(&mut self, speed: f32) {
        self.reproduction_speed = speed.clamp(0.0, MAX_SPEED);
    }

    /// Current end-of-lap behavior
    pub fn reproduction_type(&self) -> ReproductionType {
        self.reproduction_type
    }

    /// Set the end-of-lap behavior
    pub fn set_reproduction_type(&mut self, reproduction_type: ReproductionType) {
        self.reproduction_type = reproduction_type;
        if reproduction_type != ReproductionType::PingPong {
            self.direction = 1.0;
        }
    }

    /// Advance the playing time by one tick.
    ///
    /// Only has an effect while playing. The step is
    /// `delta_time * reproduction_speed`, travelling backwards when a
    /// ping-pong reflection has reversed the direction. Reaching the end
    /// in [`ReproductionType::Once`] mode clamps at `total_time` and stops
    /// the player.
    pub fn update(&mut self, delta_time: f32) {
        if self.state != PlaybackState::Playing {
            return;
        }

        let total = self.total_time();
        if total <= 0.0 {
            self.state = PlaybackState::Stopped;
            return;
        }

        let sign = match self.reproduction_type {
            ReproductionType::PingPong => self.direction,
            _ => 1.0,
        };
        let mut time = self.playing_time + delta_time * self.reproduction_speed * sign;

        match self.reproduction_type {
            ReproductionType::Once => {
                if time >= total {
                    self.playing_time = total;
                    self.state = PlaybackState::Stopped;
                } else {
                    self.playing_time = time.max(0.0);
                }
            }
            ReproductionType::Loop => {
                while time >= total {
                    time -= total;
                }
                while time < 0.0 {
                    time += total;
                }
                self.playing_time = time;
            }
            ReproductionType::PingPong => {
                loop {
                    if time > total {
                        time = total - (time - total);
                        self.direction = -self.direction;
                    } else if time < 0.0 {
                        time = -time;
                        self.direction = -self.direction;
                    } else {
                        break;
                    }
                }
                self.playing_time = time;
            }
        }
    }

    /// Interpolated channel value at the current playing time
    pub fn get_channel(&self, channel: usize) -> Option<f32> {
        self.lap.value_at(channel, self.playing_time)
    }

    /// Interpolated channel value at the current playing time, by name
    pub fn get_channel_by_name(&self, name: &str) -> Option<f32> {
        self.lap.value_by_name(name, self.playing_time)
    }

    /// Whole interpolated row at the current playing time
    pub fn sample(&self) -> Option<Vec<f32>> {
        self.lap.sample_at(self.playing_time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lapfile::LapData;
    use crate::playback::TimeSource;

    fn make_test_player() -> RecordedLapPlayer {
        let data = LapData {
            schema: vec!["time".into(), "speed".into()],
            rows: vec![
                vec![0.0, 0.0],
                vec![1.0, 10.0],
                vec![2.0, 20.0],
                vec![3.0, 30.0],
                vec![4.0, 40.0],
            ],
        };
        let lap = RecordedLap::from_data(data, TimeSource::channel("time")).unwrap();
        RecordedLapPlayer::new(Arc::new(lap))
    }

    #[test]
    fn test_state_transitions() {
        let mut player = make_test_player();
        assert_eq!(player.state(), PlaybackState::Stopped);

        player.play();
        assert_eq!(player.state(), PlaybackState::Playing);

        player.pause();
        assert_eq!(player.state(), PlaybackState::Paused);

        player.play();
        assert_eq!(player.state(), PlaybackState::Playing);

        player.stop();
        assert_eq!(player.state(), PlaybackState::Stopped);

        // pause is a no-op unless playing
        player.pause();
        assert_eq!(player.state(), PlaybackState::Stopped);
    }

    #[test]
    fn test_pause_and_stop_keep_time() {
        let mut player = make_test_player();
        player.play();
        player.update(1.5);
        assert_eq!(player.playing_time(), 1.5);

        player.pause();
        assert_eq!(player.playing_time(), 1.5);

        player.play();
        player.update(0.5);
        assert_eq!(player.playing_time(), 2.0);

        player.stop();
        assert_eq!(player.playing_time(), 2.0);
    }

    #[test]
    fn test_restart_rewinds() {
        let mut player = make_test_player();
        player.play();
        player.update(2.0);
        player.restart();

        assert_eq!(player.state(), PlaybackState::Stopped);
        assert_eq!(player.playing_time(), 0.0);
    }

    #[test]
    fn test_scrub_clamps() {
        let mut player = make_test_player();
        player.set_playing_time(-5.0);
        assert_eq!(player.playing_time(), 0.0);

        player.set_playing_time(100.0);
        assert_eq!(player.playing_time(), 4.0);

        player.set_playing_time(2.5);
        assert_eq!(player.playing_time(), 2.5);
        assert_eq!(player.state(), PlaybackState::Stopped);
    }

    #[test]
    fn test_speed_clamps() {
        let mut player = make_test_player();
        player.set_reproduction_speed(2.0);
        assert_eq!(player.reproduction_speed(), 2.0);

        player.set_reproduction_speed(100.0);
        assert_eq!(player.reproduction_speed(), 3.0);

        player.set_reproduction_speed(-1.0);
        assert_eq!(player.reproduction_speed(), 0.0);
    }

    #[test]
    fn test_speed_scales_advance() {
        let mut player = make_test_player();
        player.set_reproduction_speed(2.0);
        player.play();
        player.update(0.5);
        assert_eq!(player.playing_time(), 1.0);
    }

    #[test]
    fn test_update_ignored_unless_playing() {
        let mut player = make_test_player();
        player.update(1.0);
        assert_eq!(player.playing_time(), 0.0);

        player.play();
        player.pause();
        player.update(1.0);
        assert_eq!(player.playing_time(), 0.0);
    }

    #[test]
    fn test_once_stops_at_end() {
        let mut player = make_test_player();
        player.play();
        player.update(10.0);

        assert_eq!(player.playing_time(), 4.0);
        assert_eq!(player.state(), PlaybackState::Stopped);
        assert_eq!(player.progress(), 1.0);
    }

    #[test]
    fn test_loop_wraps() {
        let mut player = make_test_player();
        player.set_reproduction_type(ReproductionType::Loop);
        player.play();
        player.update(5.0);

        assert_eq!(player.state(), PlaybackState::Playing);
        assert_eq!(player.playing_time(), 1.0);
    }

    #[test]
    fn test_ping_pong_reflects() {
        let mut player = make_test_player();
        player.set_reproduction_type(ReproductionType::PingPong);
        player.play();
        player.update(5.0);

        assert_eq!(player.state(), PlaybackState::Playing);
        assert_eq!(player.playing_time(), 3.0);

        // now travelling backwards
        player.update(1.0);
        assert_eq!(player.playing_time(), 2.0);

        // reflect off the start
        player.update(3.0);
        assert_eq!(player.playing_time(), 1.0);
    }

    #[test]
    fn test_get_channel_follows_playing_time() {
        let mut player = make_test_player();
        player.set_playing_time(1.5);

        assert_eq!(player.get_channel_by_name("speed"), Some(15.0));
        assert_eq!(player.get_channel(1), Some(15.0));
        assert_eq!(player.sample(), Some(vec![1.5, 15.0]));
    }

    #[test]
    fn test_set_lap_only_while_stopped() {
        let mut player = make_test_player();
        let other = Arc::new(
            RecordedLap::from_data(
                LapData {
                    schema: vec!["time".into()],
                    rows: vec![vec![0.0], vec![1.0]],
                },
                TimeSource::channel("time"),
            )
            .unwrap(),
        );

        player.play();
        assert!(!player.set_lap(Arc::clone(&other)));

        player.stop();
        player.set_playing_time(3.0);
        assert!(player.set_lap(other));
        // clamped into the shorter recording
        assert_eq!(player.playing_time(), 1.0);
        assert_eq!(player.total_time(), 1.0);
    }
}
