//! Capa de persistencia
//!
//! Este módulo define el contrato del record store — la fuente de verdad
//! del sistema — y sus dos backends: memoria (tests/desarrollo) y Redis
//! (producción). El índice geoespacial es una proyección derivada; los
//! registros versionados de este store son lo que manda.

pub mod memory;
pub mod redis;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::utils::errors::AppResult;

/// Registro persistible con identidad propia
pub trait Entity: Clone + Send + Sync + Serialize + DeserializeOwned + 'static {
    /// Prefijo de clave bajo el que se guarda este tipo de registro
    const KIND: &'static str;

    fn id(&self) -> &str;
}

/// Registro acompañado de su versión, para compare-and-swap
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Versioned<R> {
    pub version: u64,
    pub record: R,
}

/// Contrato del record store.
///
/// `put` es last-writer-wins; quien necesite load-mutate-persist atómico
/// debe serializar en la capa de servicios y persistir con
/// `compare_and_swap`, que falla con Conflict si la versión cambió.
#[async_trait]
pub trait RecordStore<R: Entity>: Send + Sync {
    async fn get(&self, id: &str) -> AppResult<Option<Versioned<R>>>;

    async fn put(&self, record: R) -> AppResult<Versioned<R>>;

    /// Reemplaza el registro solo si la versión almacenada sigue siendo
    /// `expected_version` (0 = el registro no debe existir todavía).
    async fn compare_and_swap(&self, expected_version: u64, record: R) -> AppResult<Versioned<R>>;

    async fn delete(&self, id: &str) -> AppResult<()>;

    async fn list(&self) -> AppResult<Vec<Versioned<R>>>;
}
