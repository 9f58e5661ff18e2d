//! Record store sobre Redis
//!
//! Este módulo contiene el cliente Redis compartido (connection manager)
//! y el backend de persistencia: cada registro se guarda como JSON
//! versionado bajo una clave con prefijo, y el compare-and-swap se hace
//! atómico con un script Lua del lado del servidor.

use std::marker::PhantomData;

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use tracing::{debug, info};

use super::{Entity, RecordStore, Versioned};
use crate::utils::errors::{version_conflict_error, AppResult};

/// Prefijo global de claves de la aplicación
const KEY_NAMESPACE: &str = "ride_dispatch";

/// Script de compare-and-swap: reemplaza el valor solo si la versión
/// almacenada coincide con la esperada (0 = la clave no debe existir).
const CAS_SCRIPT: &str = r#"
local cur = redis.call('GET', KEYS[1])
if cur then
  local ver = cjson.decode(cur)['version']
  if tostring(ver) == ARGV[1] then
    redis.call('SET', KEYS[1], ARGV[2])
    return 1
  end
  return 0
end
if ARGV[1] == '0' then
  redis.call('SET', KEYS[1], ARGV[2])
  return 1
end
return 0
"#;

/// Cliente Redis con connection pooling y operaciones async
#[derive(Clone)]
pub struct RedisClient {
    client: redis::Client,
    manager: ConnectionManager,
}

impl RedisClient {
    /// Crear nuevo cliente Redis y verificar la conexión
    pub async fn new(redis_url: &str) -> AppResult<Self> {
        info!("🔗 Conectando a Redis: {}", redis_url);

        let client = redis::Client::open(redis_url)?;
        let manager = ConnectionManager::new(client.clone()).await?;

        // Test de conexión usando un comando simple
        let mut conn = manager.clone();
        let _: () = redis::cmd("PING").query_async(&mut conn).await?;

        info!("✅ Redis conectado exitosamente");

        Ok(Self { client, manager })
    }

    /// Generar clave con el namespace de la aplicación
    pub fn make_key(&self, prefix: &str, identifier: &str) -> String {
        format!("{}:{}:{}", KEY_NAMESPACE, prefix, identifier)
    }

    /// Conexión multiplexada para comandos
    pub fn manager(&self) -> ConnectionManager {
        self.manager.clone()
    }

    /// Cliente subyacente, para conexiones pub/sub dedicadas
    pub fn client(&self) -> redis::Client {
        self.client.clone()
    }

    /// Verificar si Redis está conectado
    pub async fn is_connected(&self) -> bool {
        let mut conn = self.manager.clone();
        match redis::cmd("PING").query_async::<_, String>(&mut conn).await {
            Ok(response) => response == "PONG",
            Err(_) => false,
        }
    }
}

/// Record store respaldado por Redis
pub struct RedisStore<R> {
    redis: RedisClient,
    _record: PhantomData<R>,
}

impl<R> RedisStore<R> {
    pub fn new(redis: RedisClient) -> Self {
        Self {
            redis,
            _record: PhantomData,
        }
    }
}

impl<R: Entity> RedisStore<R> {
    fn key(&self, id: &str) -> String {
        self.redis.make_key(R::KIND, id)
    }
}

#[async_trait]
impl<R: Entity> RecordStore<R> for RedisStore<R> {
    async fn get(&self, id: &str) -> AppResult<Option<Versioned<R>>> {
        let mut conn = self.redis.manager();
        let raw: Option<String> = conn.get(self.key(id)).await?;
        match raw {
            Some(json) => {
                debug!("📥 Registro encontrado: {}:{}", R::KIND, id);
                Ok(Some(serde_json::from_str(&json)?))
            }
            None => Ok(None),
        }
    }

    async fn put(&self, record: R) -> AppResult<Versioned<R>> {
        // Last-writer-wins: leer la versión actual y sobrescribir
        let current = self.get(record.id()).await?.map_or(0, |v| v.version);
        let versioned = Versioned {
            version: current + 1,
            record,
        };

        let mut conn = self.redis.manager();
        let json = serde_json::to_string(&versioned)?;
        let key = self.key(versioned.record.id());
        let _: () = conn.set(&key, json).await?;

        debug!("💾 Registro guardado: {} (v{})", key, versioned.version);
        Ok(versioned)
    }

    async fn compare_and_swap(&self, expected_version: u64, record: R) -> AppResult<Versioned<R>> {
        let versioned = Versioned {
            version: expected_version + 1,
            record,
        };
        let json = serde_json::to_string(&versioned)?;
        let key = self.key(versioned.record.id());

        let mut conn = self.redis.manager();
        let swapped: i64 = redis::Script::new(CAS_SCRIPT)
            .key(&key)
            .arg(expected_version)
            .arg(json)
            .invoke_async(&mut conn)
            .await?;

        if swapped == 1 {
            debug!("💾 CAS aplicado: {} (v{})", key, versioned.version);
            Ok(versioned)
        } else {
            Err(version_conflict_error(
                R::KIND,
                versioned.record.id(),
                expected_version,
            ))
        }
    }

    async fn delete(&self, id: &str) -> AppResult<()> {
        let mut conn = self.redis.manager();
        let _: i64 = conn.del(self.key(id)).await?;
        debug!("🗑️ Registro eliminado: {}:{}", R::KIND, id);
        Ok(())
    }

    async fn list(&self) -> AppResult<Vec<Versioned<R>>> {
        let mut conn = self.redis.manager();
        let pattern = self.redis.make_key(R::KIND, "*");
        let keys: Vec<String> = redis::cmd("KEYS").arg(pattern).query_async(&mut conn).await?;

        let mut records = Vec::with_capacity(keys.len());
        for key in keys {
            let raw: Option<String> = conn.get(&key).await?;
            if let Some(json) = raw {
                records.push(serde_json::from_str(&json)?);
            }
        }
        Ok(records)
    }
}
