//! statistics.rs
//!
//! Revenue and booking statistics for the venue-manager dashboard.
//!
//! The pipeline mirrors what the dashboard needs: flatten bookings into
//! day-stamped revenue events, fold them into a day-level series, bucket the
//! series into calendar weeks, and derive the headline numbers (week-over-week
//! change, latest sale, booking counts). Every step is a pure transformation;
//! the conservation law (series total == input total) holds through both the
//! daily fold and the weekly bucketing.

use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

use crate::models::Venue;

/// One booking's contribution to revenue: the calendar day of its check-in
/// and the venue's nightly price at booking time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevenueEvent {
    pub date: NaiveDate,
    pub amount: f64,
}

/// One entry of the day-level revenue series. Serializes `time` as
/// `yyyy-MM-dd`, which is what the dashboard chart consumes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RevenuePoint {
    pub time: NaiveDate,
    pub value: f64,
}

/// Flattens venues into revenue events: one event per embedded booking,
/// valued at the owning venue's nightly price (the price is denormalized
/// onto the booking at aggregation time, the venue list is the source).
pub fn revenue_events_from_venues(venues: &[Venue]) -> Vec<RevenueEvent> {
    venues
        .iter()
        .flat_map(|venue| {
            venue.bookings().iter().map(|booking| RevenueEvent {
                date: booking.date_from.date_naive(),
                amount: venue.price,
            })
        })
        .collect()
}

/// Groups events by calendar day and sums their amounts into one entry per
/// day, ascending by day. Events sharing a check-in day accumulate; the
/// output total always equals the input total.
pub fn build_daily_revenue_series(events: &[RevenueEvent]) -> Vec<RevenuePoint> {
    let mut by_day: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for event in events {
        *by_day.entry(event.date).or_insert(0.0) += event.amount;
    }

    by_day
        .into_iter()
        .map(|(time, value)| RevenuePoint { time, value })
        .collect()
}

/// Sum of the whole series.
pub fn total_revenue(series: &[RevenuePoint]) -> f64 {
    series.iter().map(|point| point.value).sum()
}

/// Buckets the series into calendar weeks, keyed by each week's first day.
/// `week_starts_on` fixes the convention (ISO weeks start on Monday); it is
/// passed explicitly rather than read from ambient state.
pub fn group_by_week(
    series: &[RevenuePoint],
    week_starts_on: Weekday,
) -> BTreeMap<NaiveDate, f64> {
    let mut buckets: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for point in series {
        let week_start = point.time.week(week_starts_on).first_day();
        *buckets.entry(week_start).or_insert(0.0) += point.value;
    }
    buckets
}

/// Week-over-week change in percent. A zero previous value returns `0.0` —
/// the documented contract for the "no previous data" case, chosen over an
/// unrepresentable infinite growth figure. No rounding is applied here; the
/// presentation layer rounds for display.
pub fn calculate_percentage_change(current: f64, previous: f64) -> f64 {
    if previous == 0.0 {
        return 0.0;
    }
    (current - previous) / previous * 100.0
}

/// Value of the chronologically last entry, or `None` for an empty series.
/// The series must already be sorted ascending by `time`; this does not
/// re-sort.
pub fn latest_purchase_price(series: &[RevenuePoint]) -> Option<f64> {
    series.last().map(|point| point.value)
}

/// Number of entries with `period_start <= time < period_end`.
pub fn calculate_period_booking_count(
    series: &[RevenuePoint],
    period_start: NaiveDate,
    period_end_exclusive: NaiveDate,
) -> usize {
    series
        .iter()
        .filter(|point| point.time >= period_start && point.time < period_end_exclusive)
        .count()
}

/// Headline numbers for the dashboard, derived from a sorted revenue series.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DashboardSummary {
    #[serde(rename = "totalRevenue")]
    pub total_revenue: f64,
    /// Number of distinct revenue days, shown as "total sales".
    #[serde(rename = "totalSales")]
    pub total_sales: usize,
    #[serde(rename = "currentWeekRevenue")]
    pub current_week_revenue: f64,
    #[serde(rename = "lastWeekRevenue")]
    pub last_week_revenue: f64,
    #[serde(rename = "percentageChange")]
    pub percentage_change: f64,
    #[serde(rename = "currentWeekBookings")]
    pub current_week_bookings: usize,
    #[serde(rename = "lastWeekBookings")]
    pub last_week_bookings: usize,
    #[serde(rename = "latestPurchasePrice")]
    pub latest_purchase_price: Option<f64>,
}

impl DashboardSummary {
    /// Derives the summary from an already-sorted daily revenue series.
    ///
    /// "Current week" and "last week" are the two most recent weeks that
    /// contain any booking, not the wall-clock weeks: the weeks observed in
    /// the data are sorted and the last two picked. With no bookings in the
    /// current real-world week, the summary therefore describes the most
    /// recent booked weeks. Callers that want wall-clock windows should use
    /// [`group_by_week`] and [`calculate_period_booking_count`] with anchors
    /// of their own.
    pub fn from_series(series: &[RevenuePoint], week_starts_on: Weekday) -> Self {
        let weekly = group_by_week(series, week_starts_on);
        // BTreeMap iterates in ascending key order, so the last entries are
        // the most recent weeks.
        let mut weeks = weekly.iter().rev();
        let current = weeks.next().map(|(start, value)| (*start, *value));
        let previous = weeks.next().map(|(start, value)| (*start, *value));

        let (current_week_revenue, current_week_bookings) = match current {
            Some((start, value)) => (
                value,
                calculate_period_booking_count(series, start, NaiveDate::MAX),
            ),
            None => (0.0, 0),
        };
        let (last_week_revenue, last_week_bookings) = match (previous, current) {
            (Some((prev_start, value)), Some((cur_start, _))) => (
                value,
                calculate_period_booking_count(series, prev_start, cur_start),
            ),
            _ => (0.0, 0),
        };

        let summary = DashboardSummary {
            total_revenue: total_revenue(series),
            total_sales: series.len(),
            current_week_revenue,
            last_week_revenue,
            percentage_change: calculate_percentage_change(
                current_week_revenue,
                last_week_revenue,
            ),
            current_week_bookings,
            last_week_bookings,
            latest_purchase_price: latest_purchase_price(series),
        };

        debug!(
            total = summary.total_revenue,
            current_week = summary.current_week_revenue,
            last_week = summary.last_week_revenue,
            change = summary.percentage_change,
            "dashboard summary computed"
        );

        summary
    }
}
