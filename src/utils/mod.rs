//! Utilidades del sistema
//!
//! Este módulo contiene el manejo de errores y helpers de ubicación.

pub mod errors;
pub mod location;

pub use errors::*;
pub use location::*;
