//! Services module
//!
//! Este módulo contiene la lógica de negocio: los dos lifecycles
//! (bookings y vehículos) y la tabla de locks por id que serializa
//! cada secuencia load-mutate-persist.

pub mod booking_service;
pub mod vehicle_service;

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, OwnedMutexGuard};

/// Tabla de locks por id de entidad.
///
/// El store no es transaccional: dos writers concurrentes sobre el mismo id
/// harían lost-update. Cada operación de lifecycle toma el lock de su id
/// durante todo el span load-mutate-persist; el compare-and-swap del store
/// queda como segunda línea de defensa frente a writers de otra instancia.
#[derive(Clone, Default)]
pub struct LockTable {
    locks: Arc<Mutex<HashMap<String, Arc<Mutex<()>>>>>,
}

impl LockTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adquiere el lock de `id`, creándolo si es la primera vez que se usa.
    /// Los locks no se purgan: una entrada por entidad viva es aceptable
    /// para el tamaño de flota que maneja el sistema.
    pub async fn acquire(&self, id: &str) -> OwnedMutexGuard<()> {
        let entry = {
            let mut locks = self.locks.lock().await;
            locks
                .entry(id.to_string())
                .or_insert_with(|| Arc::new(Mutex::new(())))
                .clone()
        };
        entry.lock_owned().await
    }
}
