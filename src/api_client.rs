//! api_client.rs
//!
//! Thin pass-through client for the external booking REST API.
//!
//! The marketplace owns no persistence: venues, profiles and bookings all
//! live behind this API. The client only shapes requests and unwraps the
//! `{ data, meta }` envelope; validation of business rules (availability,
//! overlap) stays in `services` and the API remains the authoritative
//! validator for anything it accepts.
//!
//! Authenticated endpoints need a bearer access token and, where the API
//! demands it, a service API key header. Obtaining those credentials is the
//! caller's concern; the client just forwards them.

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::{error, info};
use validator::Validate;

use crate::config::ApiConfig;
use crate::models::{ApiEnvelope, Booking, CreateBooking, CreateVenue, ErrorBody, Meta, Profile, Venue};

/// Name of the API-key header the booking service expects.
const API_KEY_HEADER: &str = "X-Noroff-API-Key";

/// Errors surfaced by the booking API client.
#[derive(Debug, thiserror::Error)]
pub enum ApiClientError {
    #[error("request to booking API failed: {0}")]
    Http(#[from] reqwest::Error),
    /// The API answered with a non-success status and an error body.
    #[error("booking API rejected the request ({status}): {message}")]
    Api {
        status: u16,
        message: String,
        body: ErrorBody,
    },
    #[error("endpoint requires an access token")]
    MissingAccessToken,
    #[error("invalid request payload: {0}")]
    Validation(#[from] validator::ValidationErrors),
    #[error("failed to encode query string: {0}")]
    Query(#[from] serde_urlencoded::ser::Error),
}

#[derive(Debug, Serialize, Default)]
struct VenueQuery {
    #[serde(rename = "_owner", skip_serializing_if = "std::ops::Not::not")]
    owner: bool,
    #[serde(rename = "_bookings", skip_serializing_if = "std::ops::Not::not")]
    bookings: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    page: Option<u32>,
}

#[derive(Debug, Serialize, Default)]
struct BookingsQuery {
    #[serde(rename = "_customer", skip_serializing_if = "std::ops::Not::not")]
    customer: bool,
    #[serde(rename = "_venue", skip_serializing_if = "std::ops::Not::not")]
    venue: bool,
}

/// Client for the external booking service.
#[derive(Debug, Clone)]
pub struct MarketApiClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    access_token: Option<String>,
}

impl MarketApiClient {
    /// Builds the client from configuration. No credentials are attached;
    /// read-only public endpoints work as-is.
    pub fn from_config(config: &ApiConfig) -> Result<Self, ApiClientError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            access_token: None,
        })
    }

    /// Returns a client that sends `Authorization: Bearer <token>` on every
    /// request, enabling the profile and write endpoints.
    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    /// GET a single venue, optionally with its bookings and owner embedded.
    pub async fn fetch_venue_by_id(
        &self,
        venue_id: &str,
        with_bookings: bool,
    ) -> Result<Venue, ApiClientError> {
        let query = VenueQuery {
            owner: true,
            bookings: with_bookings,
            ..Default::default()
        };
        let url = self.url_with(&format!("/holidaze/venues/{venue_id}"), &query)?;
        info!(%venue_id, with_bookings, "fetching venue");

        let response = self.get(&url, false).await?;
        Ok(self.parse::<Venue>(response).await?.data)
    }

    /// GET a page of venues.
    pub async fn fetch_all_venues(
        &self,
        limit: Option<u32>,
        page: Option<u32>,
    ) -> Result<(Vec<Venue>, Meta), ApiClientError> {
        let query = VenueQuery {
            limit,
            page,
            ..Default::default()
        };
        let url = self.url_with("/holidaze/venues", &query)?;

        let response = self.get(&url, false).await?;
        let envelope = self.parse::<Vec<Venue>>(response).await?;
        Ok((envelope.data, envelope.meta))
    }

    /// GET the venues managed by a profile, bookings embedded. This is the
    /// dashboard's data source. Requires an access token.
    pub async fn fetch_venues_by_profile(
        &self,
        profile_name: &str,
    ) -> Result<Vec<Venue>, ApiClientError> {
        let query = VenueQuery {
            bookings: true,
            ..Default::default()
        };
        let url = self.url_with(&format!("/holidaze/profiles/{profile_name}/venues"), &query)?;
        info!(%profile_name, "fetching venues for profile");

        let response = self.get(&url, true).await?;
        Ok(self.parse::<Vec<Venue>>(response).await?.data)
    }

    /// GET a profile by name. Requires an access token.
    pub async fn fetch_profile_by_name(
        &self,
        profile_name: &str,
    ) -> Result<Profile, ApiClientError> {
        let url = self.url(&format!("/holidaze/profiles/{profile_name}"));

        let response = self.get(&url, true).await?;
        Ok(self.parse::<Profile>(response).await?.data)
    }

    /// GET the bookings made by a profile. Requires an access token.
    pub async fn fetch_bookings_by_profile(
        &self,
        profile_name: &str,
        include_customer: bool,
        include_venue: bool,
    ) -> Result<Vec<Booking>, ApiClientError> {
        let query = BookingsQuery {
            customer: include_customer,
            venue: include_venue,
        };
        let url = self.url_with(
            &format!("/holidaze/profiles/{profile_name}/bookings"),
            &query,
        )?;

        let response = self.get(&url, true).await?;
        Ok(self.parse::<Vec<Booking>>(response).await?.data)
    }

    /// POST a new booking. The payload is validated locally first; the API
    /// performs the authoritative availability check. Requires an access
    /// token.
    pub async fn create_booking(&self, booking: &CreateBooking) -> Result<Booking, ApiClientError> {
        booking.validate()?;

        let url = self.url("/holidaze/bookings");
        info!(venue_id = %booking.venue_id, guests = booking.guests, "creating booking");

        let response = self
            .authorize(self.http.post(&url), true)?
            .json(booking)
            .send()
            .await?;
        Ok(self.parse::<Booking>(response).await?.data)
    }

    /// POST a new venue listing. Requires an access token.
    pub async fn create_venue(&self, venue: &CreateVenue) -> Result<Venue, ApiClientError> {
        venue.validate()?;

        let url = self.url("/holidaze/venues");
        info!(name = %venue.name, "creating venue");

        let response = self
            .authorize(self.http.post(&url), true)?
            .json(venue)
            .send()
            .await?;
        Ok(self.parse::<Venue>(response).await?.data)
    }

    // --- plumbing ---

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn url_with<Q: Serialize>(&self, path: &str, query: &Q) -> Result<String, ApiClientError> {
        let query_string = serde_urlencoded::to_string(query)?;
        if query_string.is_empty() {
            Ok(self.url(path))
        } else {
            Ok(format!("{}{path}?{query_string}", self.base_url))
        }
    }

    async fn get(&self, url: &str, needs_auth: bool) -> Result<reqwest::Response, ApiClientError> {
        Ok(self
            .authorize(self.http.get(url), needs_auth)?
            .send()
            .await?)
    }

    fn authorize(
        &self,
        mut request: reqwest::RequestBuilder,
        needs_auth: bool,
    ) -> Result<reqwest::RequestBuilder, ApiClientError> {
        if needs_auth {
            let token = self
                .access_token
                .as_deref()
                .ok_or(ApiClientError::MissingAccessToken)?;
            request = request.bearer_auth(token);
        } else if let Some(token) = self.access_token.as_deref() {
            request = request.bearer_auth(token);
        }
        if let Some(key) = self.api_key.as_deref() {
            request = request.header(API_KEY_HEADER, key);
        }
        Ok(request)
    }

    /// Unwraps the `{ data, meta }` envelope, mapping non-success statuses
    /// to [`ApiClientError::Api`] with the body's first error message.
    async fn parse<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<ApiEnvelope<T>, ApiClientError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.json::<ErrorBody>().await.unwrap_or(ErrorBody {
                errors: vec![],
                status: status
                    .canonical_reason()
                    .unwrap_or("Error")
                    .to_string(),
                status_code: status.as_u16(),
            });
            let message = body.first_message().to_string();
            error!(status = status.as_u16(), %message, "booking API error");
            return Err(ApiClientError::Api {
                status: status.as_u16(),
                message,
                body,
            });
        }

        // 204 has no body to unwrap; the envelope endpoints never return it,
        // so treat it as a malformed response like any other decode failure.
        debug_assert_ne!(status, StatusCode::NO_CONTENT);
        Ok(response.json::<ApiEnvelope<T>>().await?)
    }
}
