//! Time-related utilities with clock abstraction for testability.

use chrono::{DateTime, Local, TimeZone};

/// Clock trait for dependency injection and testing
pub trait Clock: Send + Sync {
    /// Current local wall-clock time
    fn now(&self) -> DateTime<Local>;
}

/// System clock implementation (uses actual system time)
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Fixed clock implementation for testing (returns a fixed time)
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    fixed_time: DateTime<Local>,
}

impl FixedClock {
    /// Create a new fixed clock returning `fixed_time`
    pub fn new(fixed_time: DateTime<Local>) -> Self {
        Self { fixed_time }
    }

    /// Create a fixed clock at the given local date and time.
    ///
    /// Returns `None` when the local time does not exist (e.g. skipped by DST).
    pub fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> Option<Self> {
        Local
            .with_ymd_and_hms(year, month, day, hour, minute, 0)
            .single()
            .map(Self::new)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Local> {
        self.fixed_time
    }
}

/// Format a time as the `HH:MM` label attached to chat messages
pub fn format_message_time(time: &DateTime<Local>) -> String {
    time.format("%H:%M").to_string()
}

/// Label for the current time of `clock`
pub fn message_time_now(clock: &dyn Clock) -> String {
    format_message_time(&clock.now())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock_returns_same_time() {
        // given:
        let clock = FixedClock::at(2024, 5, 1, 9, 30).unwrap();

        // when:
        let first = clock.now();
        let second = clock.now();

        // then:
        assert_eq!(first, second);
    }

    #[test]
    fn test_format_message_time_is_zero_padded_hours_and_minutes() {
        // given:
        let clock = FixedClock::at(2024, 5, 1, 7, 5).unwrap();

        // when:
        let label = message_time_now(&clock);

        // then:
        assert_eq!(label, "07:05");
    }

    #[test]
    fn test_format_message_time_uses_24_hour_clock() {
        // given:
        let clock = FixedClock::at(2024, 5, 1, 21, 45).unwrap();

        // when:
        let label = format_message_time(&clock.now());

        // then:
        assert_eq!(label, "21:45");
    }

    #[test]
    fn test_system_clock_label_has_expected_shape() {
        // given:
        let clock = SystemClock;

        // when:
        let label = message_time_now(&clock);

        // then:
        assert_eq!(label.len(), 5);
        assert_eq!(label.as_bytes()[2], b':');
    }
}
