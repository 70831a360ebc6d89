use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{Booking, Profile};

/// Image attached to a venue or profile.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Media {
    #[validate(url(message = "Invalid URL for media."), length(max = 500))]
    pub url: String,
    #[serde(default)]
    pub alt: String,
}

/// Amenity flags the API exposes under `meta`.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Amenities {
    #[serde(default)]
    pub wifi: bool,
    #[serde(default)]
    pub parking: bool,
    #[serde(default)]
    pub breakfast: bool,
    #[serde(default)]
    pub pets: bool,
}

/// Venue location. Every field is optional on the wire.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeoLocation {
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub zip: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub continent: Option<String>,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lng: Option<f64>,
}

/// A bookable property listing as returned by the booking API.
///
/// `price` is the nightly rate; the statistics aggregator reads it as the
/// denormalized booking value. `bookings` is only present when the venue was
/// fetched with `_bookings=true`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Venue {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub media: Vec<Media>,
    pub price: f64,
    #[serde(rename = "maxGuests")]
    pub max_guests: u32,
    #[serde(default)]
    pub rating: f64,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
    #[serde(default)]
    pub meta: Amenities,
    #[serde(default)]
    pub location: GeoLocation,
    #[serde(default)]
    pub owner: Option<Profile>,
    #[serde(default)]
    pub bookings: Option<Vec<Booking>>,
}

impl Venue {
    /// Bookings embedded in this venue, empty when none were requested.
    pub fn bookings(&self) -> &[Booking] {
        self.bookings.as_deref().unwrap_or_default()
    }
}

/// Payload for creating or updating a venue listing.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateVenue {
    #[validate(length(min = 1, message = "Name is required."))]
    pub name: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    #[validate(nested)]
    pub media: Vec<Media>,
    #[validate(range(min = 0.0, message = "Price cannot be negative."))]
    pub price: f64,
    #[serde(rename = "maxGuests")]
    #[validate(range(min = 1, message = "A venue must accommodate at least one guest."))]
    pub max_guests: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Amenities>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<GeoLocation>,
}
