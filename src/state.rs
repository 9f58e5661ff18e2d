//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum: la configuración y los dos lifecycles.

use std::sync::Arc;

use crate::config::environment::EnvironmentConfig;
use crate::services::booking_service::BookingService;
use crate::services::vehicle_service::VehicleService;

#[derive(Clone)]
pub struct AppState {
    pub config: EnvironmentConfig,
    pub bookings: Arc<BookingService>,
    pub vehicles: Arc<VehicleService>,
}

impl AppState {
    pub fn new(
        config: EnvironmentConfig,
        bookings: Arc<BookingService>,
        vehicles: Arc<VehicleService>,
    ) -> Self {
        Self {
            config,
            bookings,
            vehicles,
        }
    }
}
