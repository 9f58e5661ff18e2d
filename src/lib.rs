//! ride_dispatch
//!
//! Coordinación de dos autoridades independientes — bookings y flota — que
//! acuerdan, sin llamadas síncronas entre sí, qué vehículo atiende qué
//! booking. El record store es la fuente de verdad; el índice geoespacial
//! es una proyección por categoría para consultas por proximidad; el canal
//! de eventos lleva la aceptación de un booking hasta el lifecycle de la
//! flota.

pub mod config;
pub mod dto;
pub mod events;
pub mod geo;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;
