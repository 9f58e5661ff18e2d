//! Modelo de Vehicle
//!
//! Este módulo contiene el struct Vehicle y sus enums de categoría y estado.
//! La ubicación actual del vehículo NO vive aquí: solo existe en el índice
//! geoespacial, que es una proyección reconstruible.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::repositories::Entity;

/// Categoría del vehículo - particiona los índices geoespaciales
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum VehicleCategory {
    Mini,
    Sedan,
    Van,
}

impl fmt::Display for VehicleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VehicleCategory::Mini => write!(f, "MINI"),
            VehicleCategory::Sedan => write!(f, "SEDAN"),
            VehicleCategory::Van => write!(f, "VAN"),
        }
    }
}

/// Estado del vehículo
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum VehicleStatus {
    Available,
    Occupied,
}

impl fmt::Display for VehicleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VehicleStatus::Available => write!(f, "AVAILABLE"),
            VehicleStatus::Occupied => write!(f, "OCCUPIED"),
        }
    }
}

/// Vehicle principal - registro persistido en el record store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: String,
    pub category: VehicleCategory,
    pub status: VehicleStatus,
    pub registered_at: DateTime<Utc>,
}

impl Vehicle {
    pub fn new(id: String, category: VehicleCategory) -> Self {
        Self {
            id,
            category,
            status: VehicleStatus::Available,
            registered_at: Utc::now(),
        }
    }
}

impl Entity for Vehicle {
    const KIND: &'static str = "vehicle";

    fn id(&self) -> &str {
        &self.id
    }
}
