//! Display helpers shared by the marketplace UI surfaces: price and date
//! formatting, rating rounding, humanized time spans. Pure string builders,
//! no locale or timezone state is consulted.

use chrono::{DateTime, Utc};

/// Placeholder shown where a date has not been picked yet.
pub const DATE_PLACEHOLDER: &str = "Select a date";

/// Default date format, e.g. `2024 May 13`.
pub const DEFAULT_DATE_FORMAT: &str = "%Y %b %d";

/// Formats a date with the given chrono format string, falling back to the
/// picker placeholder when no date is present.
pub fn format_date(date: Option<DateTime<Utc>>, format: &str) -> String {
    match date {
        Some(date) => date.format(format).to_string(),
        None => DATE_PLACEHOLDER.to_string(),
    }
}

/// Formats an amount as en-US dollars with thousands separators and two
/// decimal places, e.g. `$1,234.50`.
pub fn format_price(amount: f64) -> String {
    let sign = if amount < 0.0 { "-" } else { "" };
    let cents = (amount.abs() * 100.0).round() as u128;
    let dollars = cents / 100;
    let fraction = cents % 100;

    let digits = dollars.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{sign}${grouped}.{fraction:02}")
}

/// Rounds a rating to the nearest half star.
pub fn star_from_rating(rating: f64) -> f64 {
    (rating * 2.0).round() / 2.0
}

/// Humanizes the span between two instants, e.g. `3 days` or `2 hours`.
/// Used for "N days booked" labels and "created N ago" lines.
pub fn format_time_frame(from: DateTime<Utc>, to: DateTime<Utc>) -> String {
    let span = to.signed_duration_since(from);
    let minutes = span.num_minutes().max(0);

    let (count, unit) = if minutes < 60 {
        (minutes.max(1), "minute")
    } else if minutes < 60 * 24 {
        (span.num_hours(), "hour")
    } else if span.num_days() < 7 {
        (span.num_days(), "day")
    } else if span.num_days() < 30 {
        (span.num_days() / 7, "week")
    } else if span.num_days() < 365 {
        (span.num_days() / 30, "month")
    } else {
        (span.num_days() / 365, "year")
    };

    if count == 1 {
        format!("1 {unit}")
    } else {
        format!("{count} {unit}s")
    }
}
