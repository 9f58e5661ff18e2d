//! DTOs de la API
//!
//! Este módulo contiene los requests/responses de la capa HTTP y la
//! envoltura genérica de respuesta. La capa es deliberadamente fina:
//! DTO de entrada, llamada al servicio, DTO de salida.

pub mod booking_dto;
pub mod vehicle_dto;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::location::GeoPoint;

// Response genérica
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: Option<String>,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
        }
    }

    pub fn success_with_message(data: T, message: String) -> Self {
        Self {
            success: true,
            message: Some(message),
            data: Some(data),
        }
    }
}

/// Parámetros de consulta por proximidad (bookings y vehículos)
#[derive(Debug, Deserialize)]
pub struct NearbyQuery {
    pub category: crate::models::vehicle::VehicleCategory,
    pub latitude: f64,
    pub longitude: f64,
    /// Radio en kilómetros; por defecto 1 km
    pub radius: Option<f64>,
}

/// Coordenada en un request o response
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Validate)]
pub struct LocationDto {
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,

    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
}

impl From<LocationDto> for GeoPoint {
    fn from(dto: LocationDto) -> Self {
        GeoPoint::new(dto.latitude, dto.longitude)
    }
}

impl From<GeoPoint> for LocationDto {
    fn from(point: GeoPoint) -> Self {
        Self {
            latitude: point.latitude,
            longitude: point.longitude,
        }
    }
}
