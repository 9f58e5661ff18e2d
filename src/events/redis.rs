//! Canal de eventos sobre Redis pub/sub
//!
//! Backend de producción: PUBLISH por la conexión multiplexada y una
//! conexión pub/sub dedicada por suscripción, consumida en una tarea
//! propia. Redis pub/sub ya es at-most-once: un suscriptor desconectado
//! pierde los eventos publicados mientras tanto.

use std::sync::Arc;

use async_trait::async_trait;
use futures::StreamExt;
use redis::AsyncCommands;
use tracing::{debug, info, warn};

use super::{EventChannel, EventHandler};
use crate::repositories::redis::RedisClient;
use crate::utils::errors::AppResult;

/// Canal de eventos respaldado por Redis
#[derive(Clone)]
pub struct RedisEventChannel {
    redis: RedisClient,
}

impl RedisEventChannel {
    pub fn new(redis: RedisClient) -> Self {
        Self { redis }
    }
}

#[async_trait]
impl EventChannel for RedisEventChannel {
    async fn publish(&self, channel: &str, payload: String) -> AppResult<()> {
        let mut conn = self.redis.manager();
        let receivers: i64 = conn.publish(channel, payload).await?;
        debug!("📣 Evento publicado en '{}' ({} receptores)", channel, receivers);
        Ok(())
    }

    async fn subscribe(&self, channel: &str, handler: Arc<dyn EventHandler>) -> AppResult<()> {
        // Conexión dedicada: una conexión en modo subscribe no puede
        // ejecutar otros comandos
        let conn = self.redis.client().get_async_connection().await?;
        let mut pubsub = conn.into_pubsub();
        pubsub.subscribe(channel).await?;

        info!("👂 Suscrito al canal '{}'", channel);
        let channel = channel.to_string();

        tokio::spawn(async move {
            let mut stream = pubsub.on_message();
            while let Some(msg) = stream.next().await {
                match msg.get_payload::<String>() {
                    Ok(payload) => handler.handle(payload).await,
                    Err(e) => {
                        warn!("⚠️ Payload ilegible en canal '{}': {}", channel, e);
                    }
                }
            }
            warn!("⚠️ Stream pub/sub del canal '{}' terminado", channel);
        });

        Ok(())
    }
}
