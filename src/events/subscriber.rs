//! Listener del evento booking-accepted
//!
//! Cuando el servicio de bookings publica la aceptación, este listener
//! marca el vehículo asignado como OCCUPIED en el lado de la flota.
//! Un payload malformado o un vehículo desconocido se loguea y el evento
//! se descarta: la entrega es at-most-once y no hay dead-letter.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info};

use super::EventHandler;
use crate::models::events::BookingAcceptedEvent;
use crate::models::vehicle::VehicleStatus;
use crate::services::vehicle_service::VehicleService;

/// Consumidor del canal accepted_event_channel
pub struct BookingAcceptedListener {
    vehicles: Arc<VehicleService>,
}

impl BookingAcceptedListener {
    pub fn new(vehicles: Arc<VehicleService>) -> Self {
        Self { vehicles }
    }
}

#[async_trait]
impl EventHandler for BookingAcceptedListener {
    async fn handle(&self, payload: String) {
        let event: BookingAcceptedEvent = match serde_json::from_str(&payload) {
            Ok(event) => event,
            Err(e) => {
                error!("❌ Evento booking-accepted malformado, descartado: {}", e);
                return;
            }
        };

        info!(
            "📩 Evento aceptado: booking {} -> vehículo {}",
            event.booking_id, event.vehicle_id
        );

        if let Err(e) = self
            .vehicles
            .update_status(&event.vehicle_id, VehicleStatus::Occupied)
            .await
        {
            error!(
                "❌ No se pudo marcar el vehículo {} como OCCUPIED: {}",
                event.vehicle_id, e
            );
        }
    }
}
