//! Middleware del sistema
//!
//! Este módulo contiene el middleware de CORS de la API.

pub mod cors;

pub use cors::*;
