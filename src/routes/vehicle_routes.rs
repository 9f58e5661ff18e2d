use axum::{
    extract::{Path, Query, State},
    routing::{get, post, put},
    Json, Router,
};
use validator::Validate;

use crate::dto::vehicle_dto::{
    RegisterVehicleRequest, UpdateLocationRequest, UpdateVehicleStatusRequest, VehicleResponse,
    VehicleStatusResponse,
};
use crate::dto::{ApiResponse, NearbyQuery};
use crate::geo::GeoEntry;
use crate::models::location::GeoPoint;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_vehicle_router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register_vehicle))
        .route("/", get(nearby_vehicles))
        .route("/:id", get(get_vehicle))
        .route("/:id/location", put(update_location))
        .route("/:id/status", put(update_status).get(get_status))
}

async fn register_vehicle(
    State(state): State<AppState>,
    Json(request): Json<RegisterVehicleRequest>,
) -> Result<Json<ApiResponse<VehicleResponse>>, AppError> {
    request.validate()?;
    let vehicle = state
        .vehicles
        .register(request.vehicle_id, request.category)
        .await?;

    Ok(Json(ApiResponse::success_with_message(
        vehicle.into(),
        "Vehículo registrado exitosamente".to_string(),
    )))
}

async fn get_vehicle(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<VehicleResponse>, AppError> {
    let vehicle = state.vehicles.get(&id).await?;
    Ok(Json(vehicle.into()))
}

async fn update_location(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateLocationRequest>,
) -> Result<Json<VehicleResponse>, AppError> {
    request.validate()?;
    let vehicle = state
        .vehicles
        .update_location(&id, request.location.into())
        .await?;
    Ok(Json(vehicle.into()))
}

async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateVehicleStatusRequest>,
) -> Result<Json<VehicleResponse>, AppError> {
    let vehicle = state.vehicles.update_status(&id, request.status).await?;
    Ok(Json(vehicle.into()))
}

async fn get_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<VehicleStatusResponse>, AppError> {
    let status = state.vehicles.get_status(&id).await?;
    Ok(Json(VehicleStatusResponse {
        vehicle_id: id,
        status,
    }))
}

async fn nearby_vehicles(
    State(state): State<AppState>,
    Query(query): Query<NearbyQuery>,
) -> Result<Json<Vec<GeoEntry>>, AppError> {
    let radius = query.radius.unwrap_or(state.config.default_radius_km);
    let center = GeoPoint::new(query.latitude, query.longitude);
    let entries = state.vehicles.nearby(query.category, center, radius).await?;
    Ok(Json(entries))
}
