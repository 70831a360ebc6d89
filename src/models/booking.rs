use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{Profile, Venue};

/// A reservation of a venue for an inclusive date range.
///
/// `date_from` and `date_to` are full timestamps on the wire; everything in
/// the availability engine works on their calendar days only. `customer` and
/// `venue` are present only when the corresponding `_customer`/`_venue`
/// expansions were requested.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub id: String,
    #[serde(rename = "dateFrom")]
    pub date_from: DateTime<Utc>,
    #[serde(rename = "dateTo")]
    pub date_to: DateTime<Utc>,
    pub guests: u32,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
    #[serde(default)]
    pub customer: Option<Profile>,
    #[serde(default)]
    pub venue: Option<Venue>,
}

impl Booking {
    /// Number of nights, i.e. the day distance between check-in and
    /// check-out. Zero for a same-day range, negative for malformed records.
    pub fn nights(&self) -> i64 {
        (self.date_to.date_naive() - self.date_from.date_naive()).num_days()
    }
}

/// Payload for creating a booking through the external API.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateBooking {
    #[serde(rename = "dateFrom")]
    pub date_from: DateTime<Utc>,
    #[serde(rename = "dateTo")]
    pub date_to: DateTime<Utc>,
    #[validate(range(min = 1, message = "At least one guest is required."))]
    pub guests: u32,
    #[serde(rename = "venueId")]
    #[validate(length(min = 1, message = "A venue id is required."))]
    pub venue_id: String,
}
