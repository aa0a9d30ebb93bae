//! Records a synthetic lap to a CSV file, loads it back, and replays it
//! as a ghost at 1.5x speed.
//!
//! Run with `cargo run --example record_and_replay`.

use std::sync::Arc;

use anyhow::Result;
use ghostlap_core::demo::DemoDriver;
use ghostlap_core::playback::{RecordedLap, RecordedLapPlayer, TimeSource};
use ghostlap_core::recorder::LapRecorder;
use ghostlap_core::timefmt::format_lap_time;

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    // Capture 30 seconds of demo telemetry at 50 Hz
    let mut driver = DemoDriver::seeded(424);
    let mut recorder = LapRecorder::new(driver.channels().iter().map(|c| c.to_string()).collect());
    recorder.start();
    for tick in 0..1500 {
        let time = tick as f32 / 50.0;
        let values = driver.sample(time);
        recorder.record(time, values);
    }
    recorder.stop();

    let path = std::env::temp_dir().join("ghostlap_demo.csv");
    recorder.save_csv(&path)?;
    println!(
        "Recorded {} samples ({}) to {}",
        recorder.entry_count(),
        format_lap_time(recorder.duration()),
        path.display()
    );

    // Load the file back and drive a ghost over it
    let lap = Arc::new(RecordedLap::load(&path, TimeSource::channel("time"))?);
    let mut player = RecordedLapPlayer::new(lap);
    player.set_reproduction_speed(1.5);
    player.play();

    println!("Replaying at {}x:", player.reproduction_speed());
    while player.is_playing() {
        player.update(2.0);
        let speed = player.get_channel_by_name("speed").unwrap_or(0.0);
        let rpm = player.get_channel_by_name("rpm").unwrap_or(0.0);
        println!(
            "  {} / {}  speed={:5.1} m/s  rpm={:5.0}",
            format_lap_time(player.playing_time()),
            format_lap_time(player.total_time()),
            speed,
            rpm
        );
    }

    Ok(())
}
