use serde::{Deserialize, Serialize};

use super::Media;

/// Counts the API attaches to a profile under `_count`.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ProfileCounts {
    #[serde(default)]
    pub venues: u64,
    #[serde(default)]
    pub bookings: u64,
}

/// A user profile. Doubles as the `owner` of a venue and the `customer` of a
/// booking (the API omits `banner` and `_count` in those embedded forms).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub avatar: Option<Media>,
    #[serde(default)]
    pub banner: Option<Media>,
    #[serde(rename = "venueManager", default)]
    pub venue_manager: bool,
    #[serde(rename = "_count", default)]
    pub counts: ProfileCounts,
}
