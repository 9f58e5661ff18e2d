//! Índice geoespacial sobre Redis
//!
//! Backend de producción: GEOADD para upsert, GEORADIUS con distancias para
//! las consultas y ZREM para eliminar (los conjuntos GEO de Redis son sorted
//! sets por debajo). Comparte el cliente con el record store.

use async_trait::async_trait;
use redis::geo::{Coord, RadiusOptions, RadiusOrder, RadiusSearchResult, Unit};
use redis::AsyncCommands;
use tracing::debug;

use super::{GeoEntry, GeoIndex};
use crate::models::location::GeoPoint;
use crate::repositories::redis::RedisClient;
use crate::utils::errors::AppResult;

/// Índice geoespacial respaldado por Redis
#[derive(Clone)]
pub struct RedisGeoIndex {
    redis: RedisClient,
}

impl RedisGeoIndex {
    pub fn new(redis: RedisClient) -> Self {
        Self { redis }
    }

    fn key(&self, index_key: &str) -> String {
        self.redis.make_key("geo", index_key)
    }
}

#[async_trait]
impl GeoIndex for RedisGeoIndex {
    async fn upsert(&self, key: &str, id: &str, point: GeoPoint) -> AppResult<()> {
        point.validate()?;
        let mut conn = self.redis.manager();
        let _: i64 = conn
            .geo_add(
                self.key(key),
                (Coord::lon_lat(point.longitude, point.latitude), id),
            )
            .await?;
        debug!("📍 GEOADD {} {} ({}, {})", key, id, point.latitude, point.longitude);
        Ok(())
    }

    async fn radius(&self, key: &str, center: GeoPoint, radius_km: f64) -> AppResult<Vec<GeoEntry>> {
        center.validate()?;
        let mut conn = self.redis.manager();
        let results: Vec<RadiusSearchResult> = conn
            .geo_radius(
                self.key(key),
                center.longitude,
                center.latitude,
                radius_km,
                Unit::Kilometers,
                RadiusOptions::default().with_dist().order(RadiusOrder::Asc),
            )
            .await?;

        Ok(results
            .into_iter()
            .map(|r| GeoEntry {
                id: r.name,
                distance_km: r.dist.unwrap_or(0.0),
            })
            .collect())
    }

    async fn remove(&self, key: &str, id: &str) -> AppResult<()> {
        let mut conn = self.redis.manager();
        let _: i64 = conn.zrem(self.key(key), id).await?;
        debug!("🗑️ Entrada geo eliminada: {} {}", key, id);
        Ok(())
    }
}
