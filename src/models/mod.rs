//! Modelos del sistema
//!
//! Este módulo contiene los modelos de dominio: bookings, vehículos,
//! coordenadas y el evento que cruza la frontera entre servicios.

pub mod booking;
pub mod events;
pub mod location;
pub mod vehicle;
