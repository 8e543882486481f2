/// Formats a case length as hours and minutes, e.g. "2h5m".
pub fn format_duration(seconds: f64) -> String {
    let seconds = whole_seconds(seconds);
    format!("{}h{}m", seconds / 3600, (seconds % 3600) / 60)
}

/// Formats a recording offset as zero-padded "HH:MM:SS".
pub fn format_time(seconds: f64) -> String {
    let seconds = whole_seconds(seconds);
    format!(
        "{:02}:{:02}:{:02}",
        seconds / 3600,
        (seconds % 3600) / 60,
        seconds % 60
    )
}

/// Negative, NaN and infinite inputs count as zero.
fn whole_seconds(seconds: f64) -> u64 {
    if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(0.0), "0h0m");
        assert_eq!(format_duration(59.9), "0h0m");
        assert_eq!(format_duration(7500.0), "2h5m");
        assert_eq!(format_duration(36000.0), "10h0m");
        assert_eq!(format_duration(-5.0), "0h0m");
    }

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(0.0), "00:00:00");
        assert_eq!(format_time(3661.7), "01:01:01");
        assert_eq!(format_time(45296.0), "12:34:56");
        assert_eq!(format_time(f64::NAN), "00:00:00");
    }
}
