//! Vehicle Lifecycle
//!
//! Este módulo gobierna el estado de la flota: registro, ubicación y
//! disponibilidad. La ubicación actual vive solo en el índice geoespacial
//! (no se persiste en el record store); el estado sí es durable y lo
//! mueven tanto los requests explícitos como el evento booking-accepted.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crate::geo::{vehicle_index_key, GeoEntry, GeoIndex};
use crate::models::location::GeoPoint;
use crate::models::vehicle::{Vehicle, VehicleCategory, VehicleStatus};
use crate::repositories::RecordStore;
use crate::services::LockTable;
use crate::utils::errors::{not_found_error, AppResult};

/// Servicio del lifecycle de vehículos
pub struct VehicleService {
    store: Arc<dyn RecordStore<Vehicle>>,
    geo: Arc<dyn GeoIndex>,
    locks: LockTable,
}

impl VehicleService {
    pub fn new(store: Arc<dyn RecordStore<Vehicle>>, geo: Arc<dyn GeoIndex>) -> Self {
        Self {
            store,
            geo,
            locks: LockTable::new(),
        }
    }

    /// Registra un vehículo AVAILABLE. No toca el índice geo: la ubicación
    /// llega con el primer update_location.
    pub async fn register(
        &self,
        vehicle_id: Option<String>,
        category: VehicleCategory,
    ) -> AppResult<Vehicle> {
        let id = vehicle_id.unwrap_or_else(|| Uuid::new_v4().to_string());
        let vehicle = Vehicle::new(id, category);
        let saved = self.store.put(vehicle).await?;
        info!("🚗 Vehículo {} registrado ({})", saved.record.id, saved.record.category);
        Ok(saved.record)
    }

    /// Actualiza la ubicación del vehículo en el índice geo de su categoría.
    /// El record store no se toca: el índice es el único lugar que conoce
    /// la ubicación actual.
    pub async fn update_location(&self, vehicle_id: &str, point: GeoPoint) -> AppResult<Vehicle> {
        let versioned = self
            .store
            .get(vehicle_id)
            .await?
            .ok_or_else(|| not_found_error("Vehicle", vehicle_id))?;

        self.geo
            .upsert(
                &vehicle_index_key(versioned.record.category),
                vehicle_id,
                point,
            )
            .await?;

        Ok(versioned.record)
    }

    /// Cambia el estado del vehículo. Cualquier transición está permitida:
    /// AVAILABLE ⇄ OCCUPIED, desde requests explícitos o desde el listener
    /// del evento booking-accepted.
    pub async fn update_status(&self, vehicle_id: &str, status: VehicleStatus) -> AppResult<Vehicle> {
        let _guard = self.locks.acquire(vehicle_id).await;

        let versioned = self
            .store
            .get(vehicle_id)
            .await?
            .ok_or_else(|| not_found_error("Vehicle", vehicle_id))?;

        let mut vehicle = versioned.record;
        vehicle.status = status;

        let saved = self.store.compare_and_swap(versioned.version, vehicle).await?;
        info!("🔄 Vehículo {} ahora {}", vehicle_id, saved.record.status);
        Ok(saved.record)
    }

    pub async fn get_status(&self, vehicle_id: &str) -> AppResult<VehicleStatus> {
        let versioned = self
            .store
            .get(vehicle_id)
            .await?
            .ok_or_else(|| not_found_error("Vehicle", vehicle_id))?;
        Ok(versioned.record.status)
    }

    pub async fn get(&self, vehicle_id: &str) -> AppResult<Vehicle> {
        let versioned = self
            .store
            .get(vehicle_id)
            .await?
            .ok_or_else(|| not_found_error("Vehicle", vehicle_id))?;
        Ok(versioned.record)
    }

    /// Ids de vehículos de la categoría a como máximo `radius_km` del punto
    pub async fn nearby(
        &self,
        category: VehicleCategory,
        center: GeoPoint,
        radius_km: f64,
    ) -> AppResult<Vec<GeoEntry>> {
        self.geo
            .radius(&vehicle_index_key(category), center, radius_km)
            .await
    }
}
