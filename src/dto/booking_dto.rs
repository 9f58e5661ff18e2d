//! DTOs de booking

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::LocationDto;
use crate::models::booking::{Booking, BookingStatus};
use crate::models::vehicle::VehicleCategory;

/// Request para crear un booking
#[derive(Debug, Deserialize, Validate)]
pub struct BookRequest {
    #[validate]
    pub start: LocationDto,

    #[validate]
    pub end: LocationDto,

    /// Hora de la reserva; por defecto, ahora
    pub booked_time: Option<DateTime<Utc>>,

    pub customer_id: i64,

    pub category: VehicleCategory,
}

/// Request para cancelar un booking
#[derive(Debug, Deserialize, Validate)]
pub struct CancelBookingRequest {
    #[validate(length(min = 1, max = 500))]
    pub reason: String,

    /// Hora de cancelación; por defecto, ahora
    pub cancel_time: Option<DateTime<Utc>>,
}

/// Request para aceptar un booking
#[derive(Debug, Deserialize, Validate)]
pub struct AcceptBookingRequest {
    #[validate(length(min = 1, max = 100))]
    pub vehicle_id: String,

    /// Hora de aceptación; por defecto, ahora
    pub accepted_time: Option<DateTime<Utc>>,
}

/// Estados alcanzables vía update de estado. ACCEPTED no aparece:
/// la aceptación lleva datos propios y tiene su propio endpoint.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BookingStatusName {
    Active,
    Cancelled,
    Completed,
}

/// Request para actualizar el estado de un booking
#[derive(Debug, Deserialize)]
pub struct UpdateBookingStatusRequest {
    pub status: BookingStatusName,

    /// Motivo, solo relevante para CANCELLED
    pub reason: Option<String>,
}

impl UpdateBookingStatusRequest {
    /// Convierte el request en el estado de dominio correspondiente
    pub fn into_status(self) -> BookingStatus {
        match self.status {
            BookingStatusName::Active => BookingStatus::Active,
            BookingStatusName::Cancelled => BookingStatus::Cancelled {
                reason: self.reason.unwrap_or_else(|| "unspecified".to_string()),
                cancel_time: Utc::now(),
            },
            BookingStatusName::Completed => BookingStatus::Completed,
        }
    }
}

/// Response de booking para la API
#[derive(Debug, Serialize)]
pub struct BookingResponse {
    pub id: String,
    pub status: String,
    pub start: LocationDto,
    pub end: LocationDto,
    pub booked_time: DateTime<Utc>,
    pub customer_id: i64,
    pub category: VehicleCategory,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vehicle_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accepted_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason_to_cancel: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancel_time: Option<DateTime<Utc>>,
}

impl From<Booking> for BookingResponse {
    fn from(booking: Booking) -> Self {
        let status = booking.status.name().to_string();
        let (vehicle_id, accepted_time, reason_to_cancel, cancel_time) = match booking.status {
            BookingStatus::Accepted {
                vehicle_id,
                accepted_time,
            } => (Some(vehicle_id), Some(accepted_time), None, None),
            BookingStatus::Cancelled { reason, cancel_time } => {
                (None, None, Some(reason), Some(cancel_time))
            }
            _ => (None, None, None, None),
        };

        Self {
            id: booking.id,
            status,
            start: booking.start.into(),
            end: booking.end.into(),
            booked_time: booking.booked_time,
            customer_id: booking.customer_id,
            category: booking.category,
            vehicle_id,
            accepted_time,
            reason_to_cancel,
            cancel_time,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::location::GeoPoint;

    #[test]
    fn accepted_booking_flattens_vehicle_fields() {
        let mut booking = Booking::new(
            "b-1".to_string(),
            GeoPoint::new(6.9280, 79.8655),
            GeoPoint::new(6.9000, 79.9000),
            Utc::now(),
            42,
            VehicleCategory::Mini,
        );
        booking.status = BookingStatus::Accepted {
            vehicle_id: "v-1".to_string(),
            accepted_time: Utc::now(),
        };

        let response = BookingResponse::from(booking);
        assert_eq!(response.status, "ACCEPTED");
        assert_eq!(response.vehicle_id.as_deref(), Some("v-1"));
        assert!(response.reason_to_cancel.is_none());
    }

    #[test]
    fn update_status_request_cannot_name_accepted() {
        let err = serde_json::from_str::<UpdateBookingStatusRequest>(r#"{"status":"ACCEPTED"}"#);
        assert!(err.is_err());
    }
}
