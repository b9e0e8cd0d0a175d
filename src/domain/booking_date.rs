//! Booking date and operating-hours validation
//!
//! Pure calendar rules shared by the reservation endpoints and the
//! availability listings. All functions take `today` as a parameter so the
//! window logic is testable without clock control.

use chrono::{DateTime, Duration, Local, NaiveDate};

use super::error::DomainError;

/// Furthest a booking may be placed ahead of today.
pub const MAX_BOOKING_DAYS_AHEAD: i64 = 14;

/// Today's calendar date in server-local time.
///
/// Booking dates are compared as plain calendar days; the outlet operates
/// in the server's timezone.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Parse and validate a booking date string (`YYYY-MM-DD`).
///
/// Defaults to `today` when no date is supplied. `min_days_ahead` is the
/// minimum lead time (0 = today allowed, 1 = tomorrow earliest — used for
/// delivery).
pub fn validate_booking_date(
    date_str: Option<&str>,
    min_days_ahead: i64,
    today: NaiveDate,
) -> Result<NaiveDate, DomainError> {
    let date = match date_str {
        Some(s) => parse_date(s.trim()).ok_or(DomainError::InvalidDate)?,
        None => today,
    };

    if date < today {
        return Err(DomainError::PastDate);
    }

    if date < today + Duration::days(min_days_ahead) {
        return Err(DomainError::SameDayBooking);
    }

    if date > today + Duration::days(MAX_BOOKING_DAYS_AHEAD) {
        return Err(DomainError::DateTooFar);
    }

    Ok(date)
}

/// Accepts `YYYY-MM-DD`, or an RFC 3339 timestamp whose date part is taken.
fn parse_date(s: &str) -> Option<NaiveDate> {
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(d);
    }
    DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive())
}

/// Check whether a slot's time-of-day falls within an outlet's operating
/// hours. Times are `HH:MM` strings; the window is inclusive on both ends.
/// Malformed input is treated as outside hours.
pub fn time_within_hours(slot_time: &str, open_time: &str, close_time: &str) -> bool {
    match (
        minutes_of(slot_time),
        minutes_of(open_time),
        minutes_of(close_time),
    ) {
        (Some(slot), Some(open), Some(close)) => slot >= open && slot <= close,
        _ => false,
    }
}

/// Minutes since midnight for an `HH:MM` string.
fn minutes_of(time: &str) -> Option<u32> {
    let (h, m) = time.split_once(':')?;
    let hours: u32 = h.parse().ok()?;
    let minutes: u32 = m.parse().ok()?;
    if hours > 23 || minutes > 59 {
        return None;
    }
    Some(hours * 60 + minutes)
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn base_day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 10).unwrap()
    }

    #[test]
    fn whole_window_is_accepted() {
        let today = base_day();
        for offset in 0..=MAX_BOOKING_DAYS_AHEAD {
            let d = today + Duration::days(offset);
            let parsed = validate_booking_date(
                Some(&d.format("%Y-%m-%d").to_string()),
                0,
                today,
            )
            .unwrap();
            assert_eq!(parsed, d);
        }
    }

    #[test]
    fn missing_date_defaults_to_today() {
        let today = base_day();
        assert_eq!(validate_booking_date(None, 0, today).unwrap(), today);
    }

    #[test]
    fn past_date_is_rejected() {
        let today = base_day();
        let err = validate_booking_date(Some("2026-03-09"), 0, today).unwrap_err();
        assert!(matches!(err, DomainError::PastDate));
    }

    #[test]
    fn beyond_horizon_is_rejected() {
        let today = base_day();
        let too_far = today + Duration::days(MAX_BOOKING_DAYS_AHEAD + 1);
        let err = validate_booking_date(
            Some(&too_far.format("%Y-%m-%d").to_string()),
            0,
            today,
        )
        .unwrap_err();
        assert!(matches!(err, DomainError::DateTooFar));
    }

    #[test]
    fn delivery_rejects_same_day() {
        let today = base_day();
        let err = validate_booking_date(Some("2026-03-10"), 1, today).unwrap_err();
        assert!(matches!(err, DomainError::SameDayBooking));

        // Tomorrow passes the one-day lead time.
        let d = validate_booking_date(Some("2026-03-11"), 1, today).unwrap();
        assert_eq!(d, NaiveDate::from_ymd_opt(2026, 3, 11).unwrap());
    }

    #[test]
    fn default_date_fails_lead_time_for_delivery() {
        let today = base_day();
        let err = validate_booking_date(None, 1, today).unwrap_err();
        assert!(matches!(err, DomainError::SameDayBooking));
    }

    #[test]
    fn garbage_is_invalid() {
        let today = base_day();
        for s in ["not-a-date", "2026-13-40", ""] {
            let err = validate_booking_date(Some(s), 0, today).unwrap_err();
            assert!(matches!(err, DomainError::InvalidDate), "input: {s:?}");
        }
    }

    #[test]
    fn rfc3339_date_part_is_taken() {
        let today = base_day();
        let d = validate_booking_date(Some("2026-03-12T00:00:00+08:00"), 0, today).unwrap();
        assert_eq!(d, NaiveDate::from_ymd_opt(2026, 3, 12).unwrap());
    }

    #[test]
    fn hours_window_is_inclusive() {
        assert!(time_within_hours("10:00", "10:00", "22:00"));
        assert!(time_within_hours("22:00", "10:00", "22:00"));
        assert!(time_within_hours("14:30", "10:00", "22:00"));
        assert!(!time_within_hours("09:59", "10:00", "22:00"));
        assert!(!time_within_hours("22:01", "10:00", "22:00"));
    }

    #[test]
    fn malformed_times_are_outside_hours() {
        assert!(!time_within_hours("25:00", "10:00", "22:00"));
        assert!(!time_within_hours("noon", "10:00", "22:00"));
        assert!(!time_within_hours("14:30", "", "22:00"));
    }
}
