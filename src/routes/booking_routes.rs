use axum::{
    extract::{Path, Query, State},
    routing::{get, post, put},
    Json, Router,
};
use chrono::Utc;
use validator::Validate;

use crate::dto::booking_dto::{
    AcceptBookingRequest, BookRequest, BookingResponse, CancelBookingRequest,
    UpdateBookingStatusRequest,
};
use crate::dto::{ApiResponse, NearbyQuery};
use crate::geo::GeoEntry;
use crate::services::booking_service::BookingRequest;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_booking_router() -> Router<AppState> {
    Router::new()
        .route("/", post(book).get(nearby_bookings))
        .route("/:id", get(get_booking))
        .route("/:id/cancel", put(cancel_booking))
        .route("/:id/accept", put(accept_booking))
        .route("/:id/status", put(update_booking_status))
}

async fn book(
    State(state): State<AppState>,
    Json(request): Json<BookRequest>,
) -> Result<Json<ApiResponse<BookingResponse>>, AppError> {
    request.validate()?;

    let booking = state
        .bookings
        .book(BookingRequest {
            start: request.start.into(),
            end: request.end.into(),
            booked_time: request.booked_time.unwrap_or_else(Utc::now),
            customer_id: request.customer_id,
            category: request.category,
        })
        .await?;

    Ok(Json(ApiResponse::success_with_message(
        booking.into(),
        "Booking creado exitosamente".to_string(),
    )))
}

async fn get_booking(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<BookingResponse>, AppError> {
    let booking = state.bookings.get(&id).await?;
    Ok(Json(booking.into()))
}

async fn cancel_booking(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<CancelBookingRequest>,
) -> Result<Json<BookingResponse>, AppError> {
    request.validate()?;
    let cancel_time = request.cancel_time.unwrap_or_else(Utc::now);
    let booking = state.bookings.cancel(&id, request.reason, cancel_time).await?;
    Ok(Json(booking.into()))
}

async fn accept_booking(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<AcceptBookingRequest>,
) -> Result<Json<BookingResponse>, AppError> {
    request.validate()?;
    let accepted_time = request.accepted_time.unwrap_or_else(Utc::now);
    let booking = state
        .bookings
        .accept(&id, &request.vehicle_id, accepted_time)
        .await?;
    Ok(Json(booking.into()))
}

async fn update_booking_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateBookingStatusRequest>,
) -> Result<Json<BookingResponse>, AppError> {
    let booking = state.bookings.update_status(&id, request.into_status()).await?;
    Ok(Json(booking.into()))
}

async fn nearby_bookings(
    State(state): State<AppState>,
    Query(query): Query<NearbyQuery>,
) -> Result<Json<Vec<GeoEntry>>, AppError> {
    let radius = query.radius.unwrap_or(state.config.default_radius_km);
    let center = crate::models::location::GeoPoint::new(query.latitude, query.longitude);
    let entries = state.bookings.nearby(query.category, center, radius).await?;
    Ok(Json(entries))
}
