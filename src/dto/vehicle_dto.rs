//! DTOs de vehículo

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::LocationDto;
use crate::models::vehicle::{Vehicle, VehicleCategory, VehicleStatus};

/// Request para registrar un vehículo
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterVehicleRequest {
    /// Id propio del vehículo; si falta se genera un UUID
    #[validate(length(min = 1, max = 100))]
    pub vehicle_id: Option<String>,

    pub category: VehicleCategory,
}

/// Request para actualizar la ubicación de un vehículo
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateLocationRequest {
    #[validate]
    pub location: LocationDto,
}

/// Request para actualizar el estado de un vehículo
#[derive(Debug, Deserialize)]
pub struct UpdateVehicleStatusRequest {
    pub status: VehicleStatus,
}

/// Response de vehículo para la API
#[derive(Debug, Serialize)]
pub struct VehicleResponse {
    pub id: String,
    pub category: VehicleCategory,
    pub status: VehicleStatus,
    pub registered_at: DateTime<Utc>,
}

impl From<Vehicle> for VehicleResponse {
    fn from(vehicle: Vehicle) -> Self {
        Self {
            id: vehicle.id,
            category: vehicle.category,
            status: vehicle.status,
            registered_at: vehicle.registered_at,
        }
    }
}

/// Response del estado de un vehículo
#[derive(Debug, Serialize)]
pub struct VehicleStatusResponse {
    pub vehicle_id: String,
    pub status: VehicleStatus,
}
