//! Typing indicator state.
//!
//! The indicator shows the last user who sent a typing notice and clears
//! itself a fixed time after that notice. Other events do not clear it.

use std::time::{Duration, Instant};

/// How long an indicator stays up after the latest notice
pub const TYPING_INDICATOR_TIMEOUT: Duration = Duration::from_millis(1500);

#[derive(Debug)]
pub struct TypingIndicator {
    timeout: Duration,
    current: Option<(String, Instant)>,
}

impl Default for TypingIndicator {
    fn default() -> Self {
        Self::new(TYPING_INDICATOR_TIMEOUT)
    }
}

impl TypingIndicator {
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            current: None,
        }
    }

    /// Record a typing notice from `name` received at `now`.
    ///
    /// Returns `true` when the indicator changes (nothing was shown, the
    /// previous one had expired, or another user is now typing) so the
    /// caller knows to display it.
    pub fn notice(&mut self, name: &str, now: Instant) -> bool {
        let changed = self.active(now) != Some(name);
        self.current = Some((name.to_string(), now));
        changed
    }

    /// Name to show at `now`, if the indicator has not expired
    pub fn active(&self, now: Instant) -> Option<&str> {
        match &self.current {
            Some((name, since)) if now.saturating_duration_since(*since) < self.timeout => {
                Some(name.as_str())
            }
            _ => None,
        }
    }

    /// Clear an expired indicator; returns the name that was showing
    pub fn expire(&mut self, now: Instant) -> Option<String> {
        if self.current.is_some() && self.active(now).is_none() {
            self.current.take().map(|(name, _)| name)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_notice_is_shown() {
        // given:
        let mut indicator = TypingIndicator::default();
        let now = Instant::now();

        // when:
        let changed = indicator.notice("Bob", now);

        // then:
        assert!(changed);
        assert_eq!(indicator.active(now), Some("Bob"));
    }

    #[test]
    fn test_indicator_clears_after_timeout() {
        // given:
        let mut indicator = TypingIndicator::default();
        let start = Instant::now();
        indicator.notice("Bob", start);

        // when / then:
        let just_before = start + TYPING_INDICATOR_TIMEOUT - Duration::from_millis(1);
        assert_eq!(indicator.active(just_before), Some("Bob"));
        assert_eq!(indicator.expire(just_before), None);

        let at_timeout = start + TYPING_INDICATOR_TIMEOUT;
        assert_eq!(indicator.active(at_timeout), None);
        assert_eq!(indicator.expire(at_timeout), Some("Bob".to_string()));
        assert_eq!(indicator.expire(at_timeout), None);
    }

    #[test]
    fn test_repeated_notice_extends_without_redisplay() {
        // given:
        let mut indicator = TypingIndicator::default();
        let start = Instant::now();
        indicator.notice("Bob", start);

        // when:
        let later = start + Duration::from_millis(1000);
        let changed = indicator.notice("Bob", later);

        // then: still showing 1.5s after the latest notice
        assert!(!changed);
        assert_eq!(
            indicator.active(start + Duration::from_millis(2000)),
            Some("Bob")
        );
        assert_eq!(indicator.active(later + TYPING_INDICATOR_TIMEOUT), None);
    }

    #[test]
    fn test_notice_after_expiry_is_shown_again() {
        let mut indicator = TypingIndicator::default();
        let start = Instant::now();
        indicator.notice("Bob", start);
        assert!(indicator.notice("Bob", start + Duration::from_secs(2)));
    }

    #[test]
    fn test_another_user_replaces_indicator() {
        let mut indicator = TypingIndicator::default();
        let start = Instant::now();
        indicator.notice("Bob", start);
        assert!(indicator.notice("Carol", start + Duration::from_millis(100)));
        assert_eq!(
            indicator.active(start + Duration::from_millis(200)),
            Some("Carol")
        );
    }
}
