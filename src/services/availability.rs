//! availability.rs
//!
//! Availability engine for a single venue: expands existing bookings into the
//! set of occupied calendar days and validates proposed date ranges against
//! that set.
//!
//! All comparisons happen at day granularity (`NaiveDate`); time-of-day on
//! the wire timestamps is ignored. The engine treats the booking list it is
//! given as the source of truth and never proposes a day inside any existing
//! range — the external booking API remains the authoritative validator.

use chrono::NaiveDate;
use std::collections::BTreeSet;
use tracing::warn;

use crate::models::Booking;

/// Errors produced while validating a proposed booking range. All are
/// recoverable and surface as user-facing rejections, never as panics.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AvailabilityError {
    /// The range ends before it starts.
    #[error("invalid range: {from} is after {to}")]
    InvalidRange { from: NaiveDate, to: NaiveDate },
    /// The range touches a day that is already booked.
    #[error("date {conflict} is already booked")]
    Overlap { conflict: NaiveDate },
    /// The range starts before the current date.
    #[error("range starts in the past: {from} is before {today}")]
    PastDate { from: NaiveDate, today: NaiveDate },
}

/// Result of expanding a venue's bookings into occupied days.
///
/// `anomalies` lists bookings whose `date_from` lies after `date_to`. Such
/// records contribute no days (the upstream API should never produce them,
/// but a malformed record must not be able to stall the expansion loop) and
/// are reported so the caller can flag the data-integrity problem.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookedDates {
    pub days: BTreeSet<NaiveDate>,
    pub anomalies: Vec<String>,
}

impl BookedDates {
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn contains(&self, day: NaiveDate) -> bool {
        self.days.contains(&day)
    }
}

/// Expands every booking into its inclusive `[date_from, date_to]` day range
/// and returns the union. A day covered by several bookings appears once.
///
/// Iteration is bounded by the signed day count of each range, so a record
/// with `date_from > date_to` is skipped (and recorded as an anomaly) rather
/// than looped over.
pub fn expand_booked_dates(bookings: &[Booking]) -> BookedDates {
    let mut booked = BookedDates::default();

    for booking in bookings {
        let start = booking.date_from.date_naive();
        let end = booking.date_to.date_naive();

        let span = (end - start).num_days();
        if span < 0 {
            warn!(
                booking_id = %booking.id,
                %start,
                %end,
                "booking range ends before it starts, skipping"
            );
            booked.anomalies.push(booking.id.clone());
            continue;
        }

        for offset in 0..=span {
            // Offsets stay within the validated span, so the checked add
            // cannot fail for representable dates.
            if let Some(day) = start.checked_add_signed(chrono::Duration::days(offset)) {
                booked.days.insert(day);
            }
        }
    }

    booked
}

/// Whether `date` falls on a day occupied by an existing booking.
///
/// Guarantees no false negatives: every day inside any expanded booking
/// range reports unavailable. Used to disable calendar picker cells and as
/// the guard before submitting a new booking request.
pub fn is_date_unavailable(date: NaiveDate, booked_dates: &BTreeSet<NaiveDate>) -> bool {
    booked_dates.contains(&date)
}

/// Validates a proposed `[from, to]` range against the occupied-day set.
///
/// Requires `from <= to`, `from >= today` (the caller supplies `today` so
/// the check stays deterministic under test) and that no day of the range is
/// occupied. On overlap the first conflicting day is reported.
pub fn validate_proposed_range(
    from: NaiveDate,
    to: NaiveDate,
    booked_dates: &BTreeSet<NaiveDate>,
    today: NaiveDate,
) -> Result<(), AvailabilityError> {
    if from > to {
        return Err(AvailabilityError::InvalidRange { from, to });
    }
    if from < today {
        return Err(AvailabilityError::PastDate { from, today });
    }

    let mut day = from;
    while day <= to {
        if booked_dates.contains(&day) {
            return Err(AvailabilityError::Overlap { conflict: day });
        }
        match day.succ_opt() {
            Some(next) => day = next,
            None => break,
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn booking(id: &str, from: &str, to: &str) -> Booking {
        let ts = |d: &str| {
            Utc.from_utc_datetime(&date(d).and_hms_opt(14, 30, 0).unwrap())
        };
        Booking {
            id: id.to_string(),
            date_from: ts(from),
            date_to: ts(to),
            guests: 2,
            created: Utc::now(),
            updated: Utc::now(),
            customer: None,
            venue: None,
        }
    }

    #[test]
    fn expands_inclusive_range_ignoring_time_of_day() {
        let booked = expand_booked_dates(&[booking("b1", "2024-03-01", "2024-03-03")]);
        let expected: BTreeSet<NaiveDate> =
            [date("2024-03-01"), date("2024-03-02"), date("2024-03-03")]
                .into_iter()
                .collect();
        assert_eq!(booked.days, expected);
        assert!(booked.anomalies.is_empty());
    }

    #[test]
    fn overlapping_bookings_union_without_duplicates() {
        let booked = expand_booked_dates(&[
            booking("b1", "2024-03-01", "2024-03-03"),
            booking("b2", "2024-03-03", "2024-03-05"),
        ]);
        assert_eq!(booked.days.len(), 5);
    }

    #[test]
    fn inverted_range_adds_no_days_and_is_flagged() {
        let booked = expand_booked_dates(&[booking("bad", "2024-03-05", "2024-03-01")]);
        assert!(booked.days.is_empty());
        assert_eq!(booked.anomalies, vec!["bad".to_string()]);
    }

    #[test]
    fn unavailable_inside_range_available_outside() {
        let booked = expand_booked_dates(&[booking("b1", "2024-03-01", "2024-03-03")]);
        assert!(is_date_unavailable(date("2024-03-02"), &booked.days));
        assert!(!is_date_unavailable(date("2024-03-04"), &booked.days));
    }

    #[test]
    fn proposed_range_on_booked_day_reports_conflict() {
        let booked = expand_booked_dates(&[booking("b1", "2024-03-01", "2024-03-03")]);
        let err = validate_proposed_range(
            date("2024-03-02"),
            date("2024-03-02"),
            &booked.days,
            date("2024-02-01"),
        )
        .unwrap_err();
        assert_eq!(
            err,
            AvailabilityError::Overlap {
                conflict: date("2024-03-02")
            }
        );
    }

    #[test]
    fn first_conflicting_day_is_reported() {
        let booked = expand_booked_dates(&[booking("b1", "2024-03-03", "2024-03-04")]);
        let err = validate_proposed_range(
            date("2024-03-01"),
            date("2024-03-05"),
            &booked.days,
            date("2024-02-01"),
        )
        .unwrap_err();
        assert_eq!(
            err,
            AvailabilityError::Overlap {
                conflict: date("2024-03-03")
            }
        );
    }

    #[test]
    fn free_range_validates() {
        let booked = expand_booked_dates(&[booking("b1", "2024-03-01", "2024-03-03")]);
        assert!(validate_proposed_range(
            date("2024-03-04"),
            date("2024-03-06"),
            &booked.days,
            date("2024-02-01"),
        )
        .is_ok());
    }

    #[test]
    fn past_start_is_rejected() {
        let err = validate_proposed_range(
            date("2024-03-01"),
            date("2024-03-02"),
            &BTreeSet::new(),
            date("2024-03-02"),
        )
        .unwrap_err();
        assert!(matches!(err, AvailabilityError::PastDate { .. }));
    }

    #[test]
    fn inverted_proposal_is_rejected_before_past_check() {
        let err = validate_proposed_range(
            date("2024-03-05"),
            date("2024-03-01"),
            &BTreeSet::new(),
            date("2024-04-01"),
        )
        .unwrap_err();
        assert!(matches!(err, AvailabilityError::InvalidRange { .. }));
    }
}
