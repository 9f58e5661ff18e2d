//! Modelo de Booking
//!
//! Este módulo contiene el struct Booking y su estado como variante etiquetada:
//! un booking aceptado lleva el vehículo y la hora de aceptación dentro del
//! propio estado, de forma que "cancelado pero aceptado" no es representable.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::location::GeoPoint;
use crate::models::vehicle::VehicleCategory;
use crate::repositories::Entity;

/// Estado del booking
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "state", rename_all = "UPPERCASE")]
pub enum BookingStatus {
    Active,
    Accepted {
        vehicle_id: String,
        accepted_time: DateTime<Utc>,
    },
    Cancelled {
        reason: String,
        cancel_time: DateTime<Utc>,
    },
    Completed,
}

impl BookingStatus {
    /// Nombre del estado, para mensajes y respuestas
    pub fn name(&self) -> &'static str {
        match self {
            BookingStatus::Active => "ACTIVE",
            BookingStatus::Accepted { .. } => "ACCEPTED",
            BookingStatus::Cancelled { .. } => "CANCELLED",
            BookingStatus::Completed => "COMPLETED",
        }
    }

    /// Tabla de transiciones permitidas.
    ///
    /// Active -> Accepted | Cancelled; Accepted -> Completed.
    /// Cancelled y Completed son terminales; re-aceptar, re-cancelar o
    /// cancelar un booking ya aceptado se rechaza.
    pub fn can_transition_to(&self, next: &BookingStatus) -> bool {
        matches!(
            (self, next),
            (BookingStatus::Active, BookingStatus::Accepted { .. })
                | (BookingStatus::Active, BookingStatus::Cancelled { .. })
                | (BookingStatus::Accepted { .. }, BookingStatus::Completed)
        )
    }
}

/// Booking principal - registro persistido en el record store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub id: String,
    pub start: GeoPoint,
    pub end: GeoPoint,
    pub booked_time: DateTime<Utc>,
    pub customer_id: i64,
    pub category: VehicleCategory,
    pub status: BookingStatus,
}

impl Booking {
    pub fn new(
        id: String,
        start: GeoPoint,
        end: GeoPoint,
        booked_time: DateTime<Utc>,
        customer_id: i64,
        category: VehicleCategory,
    ) -> Self {
        Self {
            id,
            start,
            end,
            booked_time,
            customer_id,
            category,
            status: BookingStatus::Active,
        }
    }

    /// Vehículo asignado, si el booking fue aceptado
    pub fn vehicle_id(&self) -> Option<&str> {
        match &self.status {
            BookingStatus::Accepted { vehicle_id, .. } => Some(vehicle_id),
            _ => None,
        }
    }
}

impl Entity for Booking {
    const KIND: &'static str = "booking";

    fn id(&self) -> &str {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn accepted() -> BookingStatus {
        BookingStatus::Accepted {
            vehicle_id: "v-1".to_string(),
            accepted_time: Utc::now(),
        }
    }

    fn cancelled() -> BookingStatus {
        BookingStatus::Cancelled {
            reason: "no driver".to_string(),
            cancel_time: Utc::now(),
        }
    }

    #[test]
    fn active_can_be_accepted_or_cancelled() {
        assert!(BookingStatus::Active.can_transition_to(&accepted()));
        assert!(BookingStatus::Active.can_transition_to(&cancelled()));
    }

    #[test]
    fn accepted_can_only_complete() {
        assert!(accepted().can_transition_to(&BookingStatus::Completed));
        assert!(!accepted().can_transition_to(&accepted()));
        assert!(!accepted().can_transition_to(&cancelled()));
    }

    #[test]
    fn terminal_states_reject_everything() {
        assert!(!cancelled().can_transition_to(&BookingStatus::Active));
        assert!(!cancelled().can_transition_to(&cancelled()));
        assert!(!BookingStatus::Completed.can_transition_to(&cancelled()));
    }

    #[test]
    fn status_round_trips_through_json() {
        let status = accepted();
        let json = serde_json::to_string(&status).unwrap();
        assert!(json.contains("\"state\":\"ACCEPTED\""));
        let back: BookingStatus = serde_json::from_str(&json).unwrap();
        assert_eq!(back, status);
    }
}
