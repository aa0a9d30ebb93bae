//! Lap time formatting
//!
//! Renders lap times the way every consumer displays them, as
//! minutes:seconds.milliseconds. Keeping this here means the editor, the
//! UI tables and file names all agree on rounding.

/// Format a lap time in seconds as `m:ss.fff`, e.g. `1:23.456`.
///
/// Negative inputs clamp to zero. Rounding is to the nearest millisecond
/// and carries into seconds and minutes.
pub fn format_lap_time(seconds: f32) -> String {
    let (minutes, secs, millis) = split_time(seconds);
    format!("{}:{:02}.{:03}", minutes, secs, millis)
}

/// Format a lap time as `m.ss.fff`, safe for use inside file names
pub fn format_file_stamp(seconds: f32) -> String {
    let (minutes, secs, millis) = split_time(seconds);
    format!("{}.{:02}.{:03}", minutes, secs, millis)
}

fn split_time(seconds: f32) -> (u64, u64, u64) {
    let total_millis = (f64::from(seconds.max(0.0)) * 1000.0).round() as u64;
    let minutes = total_millis / 60_000;
    let secs = (total_millis % 60_000) / 1000;
    let millis = total_millis % 1000;
    (minutes, secs, millis)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_lap_time() {
        assert_eq!(format_lap_time(0.0), "0:00.000");
        assert_eq!(format_lap_time(83.456), "1:23.456");
        assert_eq!(format_lap_time(600.0), "10:00.000");
    }

    #[test]
    fn test_rounding_carries() {
        assert_eq!(format_lap_time(59.9996), "1:00.000");
        assert_eq!(format_lap_time(0.0004), "0:00.000");
    }

    #[test]
    fn test_negative_clamps_to_zero() {
        assert_eq!(format_lap_time(-5.0), "0:00.000");
    }

    #[test]
    fn test_file_stamp_has_no_colon() {
        let stamp = format_file_stamp(83.456);
        assert_eq!(stamp, "1.23.456");
        assert!(!stamp.contains(':'));
    }
}
