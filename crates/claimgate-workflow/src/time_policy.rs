//! Time policy shared by the approval engine and the compliance monitor.
//!
//! Pure functions only; no clock access and no error conditions. Unknown or
//! low urgency falls back to the widest window, which is documented degraded
//! behavior rather than a failure.

use chrono::{DateTime, Duration, Utc};

use crate::types::Urgency;

/// How long an approval request stays actionable, by urgency tier.
///
/// | urgency | window  |
/// |---------|---------|
/// | urgent  | 24 hours|
/// | high    | 3 days  |
/// | normal  | 7 days  |
/// | low     | 14 days |
pub fn approval_window(urgency: Urgency) -> Duration {
    match urgency {
        Urgency::Urgent => Duration::hours(24),
        Urgency::High => Duration::days(3),
        Urgency::Normal => Duration::days(7),
        Urgency::Low => Duration::days(14),
    }
}

/// Whether `date` falls within `window` of `now`, inclusive of `now` itself.
///
/// A date already in the past is not "within the window"; overdue is a
/// separate condition.
pub fn is_within_window(date: DateTime<Utc>, now: DateTime<Utc>, window: Duration) -> bool {
    date >= now && date <= now + window
}

/// Whole days between `now` and `due`; negative means overdue.
pub fn days_until(due: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (due - now).num_days()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(s: &str) -> DateTime<Utc> {
        s.parse().unwrap()
    }

    #[test]
    fn windows_shrink_as_urgency_rises() {
        let low = approval_window(Urgency::Low);
        let normal = approval_window(Urgency::Normal);
        let high = approval_window(Urgency::High);
        let urgent = approval_window(Urgency::Urgent);

        assert!(low >= normal);
        assert!(normal >= high);
        assert!(high >= urgent);
        assert_eq!(urgent, Duration::hours(24));
        assert_eq!(high, Duration::days(3));
        assert_eq!(normal, Duration::days(7));
        assert_eq!(low, Duration::days(14));
    }

    #[test]
    fn within_window_bounds() {
        let now = t("2024-01-01T00:00:00Z");
        let window = Duration::days(30);

        assert!(is_within_window(now, now, window));
        assert!(is_within_window(now + Duration::days(10), now, window));
        assert!(is_within_window(now + Duration::days(30), now, window));
        assert!(!is_within_window(now + Duration::days(31), now, window));
        // Past dates are overdue, not expiring.
        assert!(!is_within_window(now - Duration::days(1), now, window));
    }

    #[test]
    fn days_until_goes_negative_when_overdue() {
        let now = t("2024-01-10T00:00:00Z");
        assert_eq!(days_until(t("2024-01-15T00:00:00Z"), now), 5);
        assert_eq!(days_until(t("2024-01-07T00:00:00Z"), now), -3);
        assert_eq!(days_until(now, now), 0);
    }
}
