//! Booking Lifecycle
//!
//! Este módulo gobierna el estado de los bookings: creación, cancelación,
//! aceptación y consulta por proximidad. Al aceptar, publica el evento
//! booking-accepted en el canal de eventos; la publicación es
//! fire-and-forget y nunca revierte la aceptación ya persistida.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{error, info};
use uuid::Uuid;

use crate::events::{EventChannel, ACCEPTED_EVENT_CHANNEL};
use crate::geo::{booking_index_key, GeoEntry, GeoIndex};
use crate::models::booking::{Booking, BookingStatus};
use crate::models::events::BookingAcceptedEvent;
use crate::models::location::GeoPoint;
use crate::models::vehicle::VehicleCategory;
use crate::repositories::{RecordStore, Versioned};
use crate::services::LockTable;
use crate::utils::errors::{not_found_error, transition_error, AppResult};

/// Datos para crear un booking
#[derive(Debug, Clone)]
pub struct BookingRequest {
    pub start: GeoPoint,
    pub end: GeoPoint,
    pub booked_time: DateTime<Utc>,
    pub customer_id: i64,
    pub category: VehicleCategory,
}

/// Servicio del lifecycle de bookings
pub struct BookingService {
    store: Arc<dyn RecordStore<Booking>>,
    geo: Arc<dyn GeoIndex>,
    channel: Arc<dyn EventChannel>,
    locks: LockTable,
}

impl BookingService {
    pub fn new(
        store: Arc<dyn RecordStore<Booking>>,
        geo: Arc<dyn GeoIndex>,
        channel: Arc<dyn EventChannel>,
    ) -> Self {
        Self {
            store,
            geo,
            channel,
            locks: LockTable::new(),
        }
    }

    /// Crea un booking ACTIVE, lo persiste e indexa su punto de partida
    /// en el índice geo de la categoría.
    pub async fn book(&self, request: BookingRequest) -> AppResult<Booking> {
        request.start.validate()?;
        request.end.validate()?;

        let booking = Booking::new(
            Uuid::new_v4().to_string(),
            request.start,
            request.end,
            request.booked_time,
            request.customer_id,
            request.category,
        );

        let saved = self.store.put(booking).await?;
        self.geo
            .upsert(
                &booking_index_key(saved.record.category),
                &saved.record.id,
                saved.record.start,
            )
            .await?;

        info!("🚕 Booking {} creado ({})", saved.record.id, saved.record.category);
        Ok(saved.record)
    }

    /// Cancela un booking ACTIVE. Cancelar un booking aceptado, ya
    /// cancelado o completado se rechaza con Conflict.
    pub async fn cancel(
        &self,
        booking_id: &str,
        reason: String,
        cancel_time: DateTime<Utc>,
    ) -> AppResult<Booking> {
        let next = BookingStatus::Cancelled { reason, cancel_time };
        let saved = self.transition(booking_id, next).await?;
        info!("🚫 Booking {} cancelado", booking_id);
        Ok(saved.record)
    }

    /// Acepta un booking: asigna el vehículo, persiste y publica el evento
    /// booking-accepted. El fallo del publish se loguea y no se reintenta.
    pub async fn accept(
        &self,
        booking_id: &str,
        vehicle_id: &str,
        accepted_time: DateTime<Utc>,
    ) -> AppResult<Booking> {
        let next = BookingStatus::Accepted {
            vehicle_id: vehicle_id.to_string(),
            accepted_time,
        };
        let saved = self.transition(booking_id, next).await?;
        info!("✅ Booking {} aceptado por vehículo {}", booking_id, vehicle_id);

        let event = BookingAcceptedEvent {
            booking_id: booking_id.to_string(),
            vehicle_id: vehicle_id.to_string(),
            accepted_time,
        };
        self.publish_accepted(event).await;

        Ok(saved.record)
    }

    /// Actualiza el estado del booking. Entrar en ACCEPTED por esta vía se
    /// rechaza: la aceptación lleva datos propios y pasa por `accept`.
    pub async fn update_status(&self, booking_id: &str, status: BookingStatus) -> AppResult<Booking> {
        if matches!(status, BookingStatus::Accepted { .. }) {
            return Err(crate::utils::errors::AppError::Conflict(format!(
                "booking '{}': ACCEPTED can only be entered through accept",
                booking_id
            )));
        }
        let saved = self.transition(booking_id, status).await?;
        info!("🔄 Booking {} ahora {}", booking_id, saved.record.status.name());
        Ok(saved.record)
    }

    /// Ids de bookings de la categoría a como máximo `radius_km` del punto
    pub async fn nearby(
        &self,
        category: VehicleCategory,
        center: GeoPoint,
        radius_km: f64,
    ) -> AppResult<Vec<GeoEntry>> {
        self.geo
            .radius(&booking_index_key(category), center, radius_km)
            .await
    }

    pub async fn get(&self, booking_id: &str) -> AppResult<Booking> {
        let versioned = self
            .store
            .get(booking_id)
            .await?
            .ok_or_else(|| not_found_error("Booking", booking_id))?;
        Ok(versioned.record)
    }

    /// Load-mutate-persist bajo el lock del id, validando la transición y
    /// persistiendo con compare-and-swap sobre la versión leída.
    async fn transition(&self, booking_id: &str, next: BookingStatus) -> AppResult<Versioned<Booking>> {
        let _guard = self.locks.acquire(booking_id).await;

        let versioned = self
            .store
            .get(booking_id)
            .await?
            .ok_or_else(|| not_found_error("Booking", booking_id))?;

        let mut booking = versioned.record;
        if !booking.status.can_transition_to(&next) {
            return Err(transition_error(
                "Booking",
                booking_id,
                booking.status.name(),
                next.name(),
            ));
        }
        booking.status = next;

        self.store.compare_and_swap(versioned.version, booking).await
    }

    async fn publish_accepted(&self, event: BookingAcceptedEvent) {
        let payload = match serde_json::to_string(&event) {
            Ok(payload) => payload,
            Err(e) => {
                error!("❌ No se pudo serializar el evento booking-accepted: {}", e);
                return;
            }
        };

        if let Err(e) = self.channel.publish(ACCEPTED_EVENT_CHANNEL, payload).await {
            error!(
                "❌ Error publicando en el canal {}: {}",
                ACCEPTED_EVENT_CHANNEL, e
            );
        }
    }
}
