//! Integration tests for the booking API client against a local mock of the
//! external service.

use chrono::{TimeZone, Utc};
use fake::faker::company::en::CompanyName;
use fake::Fake;
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use holidaze_market::api_client::{ApiClientError, MarketApiClient};
use holidaze_market::config::ApiConfig;
use holidaze_market::models::CreateBooking;

fn client_for(server: &MockServer, api_key: Option<&str>) -> MarketApiClient {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();

    MarketApiClient::from_config(&ApiConfig {
        base_url: server.uri(),
        api_key: api_key.map(str::to_string),
        timeout_seconds: 5,
    })
    .expect("client builds")
}

fn venue_json(id: &str, name: &str, price: f64) -> serde_json::Value {
    json!({
        "id": id,
        "name": name,
        "description": "A quiet cabin by the fjord",
        "media": [],
        "price": price,
        "maxGuests": 4,
        "rating": 4.5,
        "created": "2024-01-10T08:00:00.000Z",
        "updated": "2024-02-01T08:00:00.000Z",
        "meta": { "wifi": true, "parking": false, "breakfast": false, "pets": true },
        "location": { "city": "Bergen", "country": "Norway" },
        "bookings": [
            {
                "id": "b-1",
                "dateFrom": "2024-03-01T00:00:00.000Z",
                "dateTo": "2024-03-03T00:00:00.000Z",
                "guests": 2,
                "created": "2024-02-15T12:00:00.000Z",
                "updated": "2024-02-15T12:00:00.000Z"
            }
        ]
    })
}

#[tokio::test]
async fn fetches_venue_with_bookings() {
    let server = MockServer::start().await;
    let name: String = CompanyName().fake();

    Mock::given(method("GET"))
        .and(path("/holidaze/venues/v-1"))
        .and(query_param("_owner", "true"))
        .and(query_param("_bookings", "true"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "data": venue_json("v-1", &name, 120.0), "meta": {} })),
        )
        .mount(&server)
        .await;

    let venue = client_for(&server, None)
        .fetch_venue_by_id("v-1", true)
        .await
        .expect("venue fetch succeeds");

    assert_eq!(venue.id, "v-1");
    assert_eq!(venue.name, name);
    assert_eq!(venue.price, 120.0);
    assert_eq!(venue.bookings().len(), 1);
    assert_eq!(
        venue.bookings()[0].date_from,
        Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap()
    );
}

#[tokio::test]
async fn api_error_bodies_become_typed_errors() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/holidaze/venues/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "errors": [{ "message": "No venue with such ID" }],
            "status": "Not Found",
            "statusCode": 404
        })))
        .mount(&server)
        .await;

    let err = client_for(&server, None)
        .fetch_venue_by_id("missing", false)
        .await
        .expect_err("missing venue is an error");

    match err {
        ApiClientError::Api {
            status, message, ..
        } => {
            assert_eq!(status, 404);
            assert_eq!(message, "No venue with such ID");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn create_booking_sends_credentials_and_payload() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/holidaze/bookings"))
        .and(header("Authorization", "Bearer token-123"))
        .and(header("X-Noroff-API-Key", "key-abc"))
        .and(body_partial_json(json!({ "venueId": "v-1", "guests": 2 })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "data": {
                "id": "b-9",
                "dateFrom": "2024-03-04T00:00:00.000Z",
                "dateTo": "2024-03-06T00:00:00.000Z",
                "guests": 2,
                "created": "2024-02-20T09:00:00.000Z",
                "updated": "2024-02-20T09:00:00.000Z"
            },
            "meta": {}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let booking = client_for(&server, Some("key-abc"))
        .with_access_token("token-123")
        .create_booking(&CreateBooking {
            date_from: Utc.with_ymd_and_hms(2024, 3, 4, 0, 0, 0).unwrap(),
            date_to: Utc.with_ymd_and_hms(2024, 3, 6, 0, 0, 0).unwrap(),
            guests: 2,
            venue_id: "v-1".to_string(),
        })
        .await
        .expect("booking created");

    assert_eq!(booking.id, "b-9");
}

#[tokio::test]
async fn authenticated_endpoints_refuse_to_run_without_a_token() {
    let server = MockServer::start().await;

    let err = client_for(&server, None)
        .fetch_venues_by_profile("alice")
        .await
        .expect_err("no token configured");

    assert!(matches!(err, ApiClientError::MissingAccessToken));
}

#[tokio::test]
async fn invalid_payloads_never_reach_the_wire() {
    let server = MockServer::start().await;

    let err = client_for(&server, None)
        .with_access_token("token-123")
        .create_booking(&CreateBooking {
            date_from: Utc.with_ymd_and_hms(2024, 3, 4, 0, 0, 0).unwrap(),
            date_to: Utc.with_ymd_and_hms(2024, 3, 6, 0, 0, 0).unwrap(),
            guests: 0,
            venue_id: "v-1".to_string(),
        })
        .await
        .expect_err("zero guests is invalid");

    assert!(matches!(err, ApiClientError::Validation(_)));
    // No mock mounted: any request reaching the server would have failed
    // the test with a 404 from wiremock anyway.
}
