//! Eventos entre servicios
//!
//! Este módulo define el payload del evento booking-accepted, el único
//! contrato estable que cruza la frontera entre el servicio de bookings
//! y el servicio de flota. Se serializa como JSON en un canal dedicado.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Evento publicado cuando un booking es aceptado por un vehículo
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BookingAcceptedEvent {
    pub booking_id: String,
    pub vehicle_id: String,
    pub accepted_time: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_keeps_its_field_names() {
        let event = BookingAcceptedEvent {
            booking_id: "b-1".to_string(),
            vehicle_id: "v-1".to_string(),
            accepted_time: Utc::now(),
        };
        let json = serde_json::to_value(&event).unwrap();
        // Contrato estable entre servicios: los nombres no pueden cambiar
        assert!(json.get("booking_id").is_some());
        assert!(json.get("vehicle_id").is_some());
        assert!(json.get("accepted_time").is_some());
    }
}
