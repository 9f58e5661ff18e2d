//! Canal de eventos entre servicios
//!
//! Este módulo define el transporte publish/subscribe que desacopla el
//! lifecycle de bookings del lifecycle de vehículos. La entrega es
//! at-most-once, asíncrona y sin backpressure: un publish nunca bloquea
//! esperando a los suscriptores, y un evento perdido no se reintenta.

pub mod memory;
pub mod redis;
pub mod subscriber;

use std::sync::Arc;

use async_trait::async_trait;

use crate::utils::errors::AppResult;

/// Canal dedicado al evento booking-accepted
pub const ACCEPTED_EVENT_CHANNEL: &str = "accepted_event_channel";

/// Handler registrado contra un canal.
///
/// Un fallo del handler es terminal para ese único evento: se loguea y el
/// evento se descarta, sin retry ni dead-letter.
#[async_trait]
pub trait EventHandler: Send + Sync {
    async fn handle(&self, payload: String);
}

/// Transporte publish/subscribe
#[async_trait]
pub trait EventChannel: Send + Sync {
    /// Publica un payload en un canal. Fire-and-forget: que no haya
    /// suscriptores no es un error.
    async fn publish(&self, channel: &str, payload: String) -> AppResult<()>;

    /// Registra un handler que recibirá cada payload publicado en el canal
    /// a partir de este momento.
    async fn subscribe(&self, channel: &str, handler: Arc<dyn EventHandler>) -> AppResult<()>;
}
