//! Core library for a holiday-rental marketplace.
//!
//! Two small computational units live under `services`: the availability
//! engine (which calendar days of a venue are already taken) and the revenue
//! statistics aggregator (dashboard numbers derived from bookings). Around
//! them sit the wire models for the external booking API, a thin HTTP client
//! for it, and display helpers. Everything in `services` is a pure function
//! over in-memory data; all I/O stays in `api_client`.

pub mod api_client;
pub mod config;
pub mod format;
pub mod models;
pub mod services;

pub use api_client::{ApiClientError, MarketApiClient};
pub use config::Config;
pub use models::{Booking, Profile, Venue};
pub use services::availability::{
    expand_booked_dates, is_date_unavailable, validate_proposed_range, AvailabilityError,
    BookedDates,
};
pub use services::statistics::{
    build_daily_revenue_series, calculate_percentage_change, calculate_period_booking_count,
    group_by_week, latest_purchase_price, revenue_events_from_venues, DashboardSummary,
    RevenueEvent, RevenuePoint,
};
