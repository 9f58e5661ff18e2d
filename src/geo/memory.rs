//! Índice geoespacial en memoria
//!
//! Backend para tests y desarrollo: un mapa índice -> (id -> punto) y un
//! escaneo con distancia haversine por consulta. Suficiente para flotas
//! de tamaño razonable; el backend de Redis hace lo mismo del lado del
//! servidor con estructuras GEO.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{GeoEntry, GeoIndex};
use crate::models::location::GeoPoint;
use crate::utils::errors::AppResult;

/// Índice en memoria detrás de un RwLock
#[derive(Clone, Default)]
pub struct MemoryGeoIndex {
    indexes: Arc<RwLock<HashMap<String, HashMap<String, GeoPoint>>>>,
}

impl MemoryGeoIndex {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl GeoIndex for MemoryGeoIndex {
    async fn upsert(&self, key: &str, id: &str, point: GeoPoint) -> AppResult<()> {
        point.validate()?;
        let mut indexes = self.indexes.write().await;
        indexes
            .entry(key.to_string())
            .or_default()
            .insert(id.to_string(), point);
        Ok(())
    }

    async fn radius(&self, key: &str, center: GeoPoint, radius_km: f64) -> AppResult<Vec<GeoEntry>> {
        center.validate()?;
        let indexes = self.indexes.read().await;
        let Some(entries) = indexes.get(key) else {
            return Ok(Vec::new());
        };

        let mut results: Vec<GeoEntry> = entries
            .iter()
            .map(|(id, point)| GeoEntry {
                id: id.clone(),
                distance_km: center.haversine_km(point),
            })
            .filter(|entry| entry.distance_km <= radius_km)
            .collect();

        results.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
        Ok(results)
    }

    async fn remove(&self, key: &str, id: &str) -> AppResult<()> {
        let mut indexes = self.indexes.write().await;
        if let Some(entries) = indexes.get_mut(key) {
            entries.remove(id);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn empty_index_returns_empty_vec() {
        let index = MemoryGeoIndex::new();
        let results = index
            .radius("MINI-vehicles", GeoPoint::new(6.9271, 79.8612), 5.0)
            .await
            .unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn upsert_replaces_previous_point() {
        let index = MemoryGeoIndex::new();
        let key = "MINI-vehicles";

        index.upsert(key, "v-1", GeoPoint::new(6.9271, 79.8612)).await.unwrap();
        // Mover el vehículo lejos: la consulta en el punto original ya no lo ve
        index.upsert(key, "v-1", GeoPoint::new(7.2906, 80.6337)).await.unwrap();

        let near_old = index
            .radius(key, GeoPoint::new(6.9271, 79.8612), 1.0)
            .await
            .unwrap();
        assert!(near_old.is_empty());

        let near_new = index
            .radius(key, GeoPoint::new(7.2906, 80.6337), 1.0)
            .await
            .unwrap();
        assert_eq!(near_new.len(), 1);
        assert_eq!(near_new[0].id, "v-1");
    }

    #[tokio::test]
    async fn upsert_rejects_invalid_point() {
        let index = MemoryGeoIndex::new();
        let result = index
            .upsert("MINI-vehicles", "v-1", GeoPoint::new(f64::NAN, 79.0))
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn results_sorted_by_distance() {
        let index = MemoryGeoIndex::new();
        let key = "SEDAN-vehicles";
        let center = GeoPoint::new(6.9271, 79.8612);

        index.upsert(key, "far", GeoPoint::new(6.9400, 79.8700)).await.unwrap();
        index.upsert(key, "near", GeoPoint::new(6.9275, 79.8615)).await.unwrap();

        let results = index.radius(key, center, 5.0).await.unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].id, "near");
        assert_eq!(results[1].id, "far");
        assert!(results[0].distance_km <= results[1].distance_km);
    }

    #[tokio::test]
    async fn remove_is_idempotent() {
        let index = MemoryGeoIndex::new();
        let key = "VAN-vehicles";

        index.upsert(key, "v-1", GeoPoint::new(6.9271, 79.8612)).await.unwrap();
        index.remove(key, "v-1").await.unwrap();
        index.remove(key, "v-1").await.unwrap();

        let results = index
            .radius(key, GeoPoint::new(6.9271, 79.8612), 10.0)
            .await
            .unwrap();
        assert!(results.is_empty());
    }
}
