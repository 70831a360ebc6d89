pub mod booking;
pub mod profile;
pub mod venue;

pub use booking::{Booking, CreateBooking};
pub use profile::Profile;
pub use venue::{Amenities, CreateVenue, GeoLocation, Media, Venue};

use serde::{Deserialize, Serialize};

/// Pagination metadata attached to list responses by the booking API.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Meta {
    #[serde(rename = "isFirstPage", default)]
    pub is_first_page: bool,
    #[serde(rename = "isLastPage", default)]
    pub is_last_page: bool,
    #[serde(rename = "currentPage", default = "default_page")]
    pub current_page: u32,
    #[serde(rename = "previousPage", default)]
    pub previous_page: Option<u32>,
    #[serde(rename = "nextPage", default)]
    pub next_page: Option<u32>,
    #[serde(rename = "pageCount", default = "default_page")]
    pub page_count: u32,
    #[serde(rename = "totalCount", default)]
    pub total_count: u64,
}

fn default_page() -> u32 {
    1
}

/// `{ data, meta }` envelope every successful API response arrives in.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiEnvelope<T> {
    pub data: T,
    #[serde(default)]
    pub meta: Meta,
}

/// One entry of the API's error body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub message: String,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub path: Vec<serde_json::Value>,
}

/// Error body the API returns for non-2xx responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub errors: Vec<ErrorDetail>,
    #[serde(default)]
    pub status: String,
    #[serde(rename = "statusCode", default)]
    pub status_code: u16,
}

impl ErrorBody {
    /// First error message, or a placeholder when the body carried none.
    pub fn first_message(&self) -> &str {
        self.errors
            .first()
            .map(|e| e.message.as_str())
            .unwrap_or("unknown API error")
    }
}
