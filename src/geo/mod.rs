//! Índice geoespacial
//!
//! Este módulo define el contrato del índice por categoría (upsert, consulta
//! por radio, remove) y las claves de índice por (tipo de entidad, categoría).
//! El índice es una proyección derivada y reconstruible: la fuente de verdad
//! siempre es el record store.

pub mod memory;
pub mod redis;

use async_trait::async_trait;
use serde::Serialize;

use crate::models::location::GeoPoint;
use crate::models::vehicle::VehicleCategory;
use crate::utils::errors::AppResult;

/// Entrada devuelta por una consulta por radio
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct GeoEntry {
    pub id: String,
    pub distance_km: f64,
}

/// Contrato del índice geoespacial.
///
/// Los resultados de `radius` vienen ordenados por distancia ascendente y el
/// borde es inclusivo: una entrada exactamente a `radius_km` del centro entra
/// en el resultado. Una categoría sin entradas devuelve un vector vacío.
#[async_trait]
pub trait GeoIndex: Send + Sync {
    /// Inserta o reemplaza el punto de `id` dentro del índice `key`.
    /// Falla con InvalidLocation si las coordenadas no son finitas o
    /// están fuera de rango.
    async fn upsert(&self, key: &str, id: &str, point: GeoPoint) -> AppResult<()>;

    /// Todas las entradas de `key` a como máximo `radius_km` de `center`.
    async fn radius(&self, key: &str, center: GeoPoint, radius_km: f64) -> AppResult<Vec<GeoEntry>>;

    /// Elimina la entrada de `id` si existe. No falla si no existe.
    async fn remove(&self, key: &str, id: &str) -> AppResult<()>;
}

/// Clave del índice de bookings activos de una categoría
pub fn booking_index_key(category: VehicleCategory) -> String {
    format!("{}-bookings", category)
}

/// Clave del índice de vehículos de una categoría
pub fn vehicle_index_key(category: VehicleCategory) -> String {
    format!("{}-vehicles", category)
}
