//! Canal de eventos en memoria
//!
//! Backend para tests y desarrollo: un broadcast de tokio por canal y una
//! tarea por suscriptor. Conserva la semántica del transporte real:
//! at-most-once, sin orden garantizado entre suscriptores y sin backpressure.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::broadcast;
use tracing::warn;

use super::{EventChannel, EventHandler};
use crate::utils::errors::AppResult;

/// Capacidad del buffer por canal; un suscriptor lento pierde eventos
/// (coherente con at-most-once)
const CHANNEL_CAPACITY: usize = 256;

/// Canal de eventos en memoria sobre tokio::sync::broadcast
#[derive(Clone, Default)]
pub struct MemoryEventChannel {
    senders: Arc<Mutex<HashMap<String, broadcast::Sender<String>>>>,
}

impl MemoryEventChannel {
    pub fn new() -> Self {
        Self::default()
    }

    fn sender(&self, channel: &str) -> broadcast::Sender<String> {
        let mut senders = self.senders.lock().unwrap_or_else(|e| e.into_inner());
        senders
            .entry(channel.to_string())
            .or_insert_with(|| broadcast::channel(CHANNEL_CAPACITY).0)
            .clone()
    }
}

#[async_trait]
impl EventChannel for MemoryEventChannel {
    async fn publish(&self, channel: &str, payload: String) -> AppResult<()> {
        // send() falla solo si no hay receivers; fire-and-forget lo ignora
        let _ = self.sender(channel).send(payload);
        Ok(())
    }

    async fn subscribe(&self, channel: &str, handler: Arc<dyn EventHandler>) -> AppResult<()> {
        let mut receiver = self.sender(channel).subscribe();
        let channel = channel.to_string();

        tokio::spawn(async move {
            loop {
                match receiver.recv().await {
                    Ok(payload) => handler.handle(payload).await,
                    Err(broadcast::error::RecvError::Lagged(missed)) => {
                        warn!("⚠️ Suscriptor de '{}' perdió {} eventos", channel, missed);
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        });

        Ok(())
    }
}
