use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use ride_dispatch::config::environment::EnvironmentConfig;
use ride_dispatch::events::memory::MemoryEventChannel;
use ride_dispatch::geo::memory::MemoryGeoIndex;
use ride_dispatch::models::booking::Booking;
use ride_dispatch::models::vehicle::Vehicle;
use ride_dispatch::repositories::memory::MemoryStore;
use ride_dispatch::routes::{booking_routes, vehicle_routes};
use ride_dispatch::services::booking_service::BookingService;
use ride_dispatch::services::vehicle_service::VehicleService;
use ride_dispatch::state::AppState;

// App completa sobre backends en memoria
fn create_test_app() -> Router {
    let geo = Arc::new(MemoryGeoIndex::new());
    let channel = Arc::new(MemoryEventChannel::new());

    let vehicles = Arc::new(VehicleService::new(
        Arc::new(MemoryStore::<Vehicle>::new()),
        geo.clone(),
    ));
    let bookings = Arc::new(BookingService::new(
        Arc::new(MemoryStore::<Booking>::new()),
        geo,
        channel,
    ));

    let state = AppState::new(EnvironmentConfig::default(), bookings, vehicles);

    Router::new()
        .nest("/api/booking", booking_routes::create_booking_router())
        .nest("/api/vehicle", vehicle_routes::create_vehicle_router())
        .with_state(state)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = match body {
        Some(json_body) => Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json_body.to_string()))
            .unwrap(),
        None => Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

#[tokio::test]
async fn book_endpoint_creates_active_booking() {
    let app = create_test_app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/booking",
        Some(json!({
            "start": { "latitude": 6.9280, "longitude": 79.8655 },
            "end": { "latitude": 6.9000, "longitude": 79.9000 },
            "customer_id": 42,
            "category": "MINI"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["status"], "ACTIVE");
    assert!(body["data"]["id"].as_str().is_some());
}

#[tokio::test]
async fn unknown_booking_maps_to_404() {
    let app = create_test_app();

    let (status, body) = send(&app, Method::GET, "/api/booking/nope", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn out_of_range_coordinates_map_to_400() {
    let app = create_test_app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/booking",
        Some(json!({
            "start": { "latitude": 999.0, "longitude": 79.8655 },
            "end": { "latitude": 6.9000, "longitude": 79.9000 },
            "customer_id": 42,
            "category": "MINI"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn conflicting_cancel_maps_to_409() {
    let app = create_test_app();

    let (_, created) = send(
        &app,
        Method::POST,
        "/api/booking",
        Some(json!({
            "start": { "latitude": 6.9280, "longitude": 79.8655 },
            "end": { "latitude": 6.9000, "longitude": 79.9000 },
            "customer_id": 42,
            "category": "MINI"
        })),
    )
    .await;
    let id = created["data"]["id"].as_str().unwrap().to_string();

    let (status, _) = send(
        &app,
        Method::PUT,
        &format!("/api/booking/{}/accept", id),
        Some(json!({ "vehicle_id": "V1" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/api/booking/{}/cancel", id),
        Some(json!({ "reason": "too late" })),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "CONFLICT");
}

#[tokio::test]
async fn vehicle_register_then_nearby_query() {
    let app = create_test_app();

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/vehicle/register",
        Some(json!({ "vehicle_id": "V1", "category": "MINI" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(
        &app,
        Method::PUT,
        "/api/vehicle/V1/location",
        Some(json!({ "location": { "latitude": 6.9276, "longitude": 79.8651 } })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(
        &app,
        Method::GET,
        "/api/vehicle?category=MINI&latitude=6.9280&longitude=79.8655&radius=1",
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let ids: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["V1"]);
}

#[tokio::test]
async fn vehicle_status_endpoint_round_trips() {
    let app = create_test_app();

    send(
        &app,
        Method::POST,
        "/api/vehicle/register",
        Some(json!({ "vehicle_id": "V1", "category": "SEDAN" })),
    )
    .await;

    let (status, body) = send(
        &app,
        Method::PUT,
        "/api/vehicle/V1/status",
        Some(json!({ "status": "OCCUPIED" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "OCCUPIED");

    let (status, body) = send(&app, Method::GET, "/api/vehicle/V1/status", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["vehicle_id"], "V1");
    assert_eq!(body["status"], "OCCUPIED");
}
