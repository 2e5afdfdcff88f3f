//! Conversions between interpreter milliseconds and system time

use super::stamp::SysTime;

/// Milliseconds (as a float) to microseconds, rounding half up
pub fn time_from_ms(ms: f64) -> SysTime {
    (ms * 1000.0 + 0.5) as SysTime
}

/// Microseconds to milliseconds (as a float)
pub fn ms_from_time(time: SysTime) -> f64 {
    time as f64 / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_half_up() {
        assert_eq!(time_from_ms(1.0), 1000);
        assert_eq!(time_from_ms(0.0004), 0);
        assert_eq!(time_from_ms(0.0005), 1);
        assert_eq!(time_from_ms(2.5), 2500);
    }

    #[test]
    fn test_to_ms() {
        assert_eq!(ms_from_time(1500), 1.5);
        assert_eq!(ms_from_time(0), 0.0);
    }
}
