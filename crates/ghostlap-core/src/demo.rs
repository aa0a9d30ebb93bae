//! Demo Mode - Simulated lap telemetry generator for testing
//!
//! Synthesizes a plausible car lapping a closed course, for UI work and
//! tests that need telemetry without a vehicle. Channels are correlated:
//! speed drops into corners, rpm tracks speed, throttle and brake oppose
//! each other, and position integrates speed around a circuit.

use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;

use crate::lapfile::LapData;

/// Channel names produced by [`DemoDriver::sample`], in order
pub const CHANNELS: [&str; 7] = [
    "speed", "rpm", "throttle", "brake", "steering", "pos_x", "pos_z",
];

/// Course radius in meters
const TRACK_RADIUS: f32 = 180.0;

/// Simulated driver that generates correlated lap telemetry
pub struct DemoDriver {
    /// Corners per lap of the imaginary course
    corner_count: f32,
    /// Phase offset so laps do not all start mid-corner
    corner_phase: f32,
    /// Straight-line cruising speed in m/s
    base_speed: f32,
    /// Distance travelled so far, integrated from speed
    distance: f32,
    /// Time of the previous sample
    last_time: f32,
    /// Random number generator for sensor noise
    rng: StdRng,
}

impl Default for DemoDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl DemoDriver {
    /// Create a demo driver with an entropy-seeded course
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_entropy())
    }

    /// Create a demo driver that reproduces the same lap for the same seed
    pub fn seeded(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(mut rng: StdRng) -> Self {
        Self {
            corner_count: rng.gen_range(3..7) as f32,
            corner_phase: rng.gen_range(0.0..std::f32::consts::TAU),
            base_speed: rng.gen_range(45.0..60.0),
            distance: 0.0,
            last_time: 0.0,
            rng,
        }
    }

    /// Channel names produced by [`sample`], in order
    ///
    /// [`sample`]: DemoDriver::sample
    pub fn channels(&self) -> &'static [&'static str] {
        &CHANNELS
    }

    /// Generate the telemetry row for `time` seconds into the lap.
    ///
    /// Expects non-decreasing times across calls; position integrates the
    /// speed between them.
    pub fn sample(&mut self, time: f32) -> Vec<f32> {
        // corner shaping: -1 at full cornering, +1 mid-straight
        let corner = (time * self.corner_count * 0.1 + self.corner_phase).sin();

        let noise = self.rng.gen_range(-0.5..0.5);
        let speed = (self.base_speed + 20.0 * corner + noise).max(5.0);

        let rpm = 1800.0 + speed * 110.0 + self.rng.gen_range(-40.0..40.0);

        // accelerating out of corners, braking into them
        let throttle = ((corner + 1.0) * 0.5).clamp(0.05, 1.0);
        let brake = if corner < -0.6 { -corner - 0.6 } else { 0.0 };

        let steering = 0.4 * (1.0 - corner) * (time * 0.7).sin();

        let dt = (time - self.last_time).max(0.0);
        self.distance += speed * dt;
        self.last_time = time;

        let angle = self.distance / TRACK_RADIUS;
        let pos_x = TRACK_RADIUS * angle.cos();
        let pos_z = TRACK_RADIUS * angle.sin();

        vec![speed, rpm, throttle, brake, steering, pos_x, pos_z]
    }

    /// Record a whole lap as ready-to-use lap data: a `time` column
    /// followed by the demo channels, sampled at `sample_hz`.
    pub fn record_lap(&mut self, lap_time: f32, sample_hz: f32) -> LapData {
        let mut schema = vec!["time".to_string()];
        schema.extend(CHANNELS.iter().map(|c| c.to_string()));

        let hz = sample_hz.clamp(1.0, 1000.0);
        let steps = (lap_time.max(0.0) * hz).floor() as usize;

        let mut rows = Vec::with_capacity(steps + 1);
        for i in 0..=steps {
            let time = i as f32 / hz;
            let mut row = Vec::with_capacity(schema.len());
            row.push(time);
            row.extend(self.sample(time));
            rows.push(row);
        }

        LapData { schema, rows }
    }
}
