//! Generador de ubicaciones aleatorias
//!
//! Helper para scripts de seed y tests: genera puntos aleatorios
//! dentro de un radio alrededor de un punto central.

use rand::Rng;

use crate::models::location::GeoPoint;

/// Genera una ubicación aleatoria dentro de `radius_m` metros alrededor de `center`.
///
/// La coordenada este-oeste se corrige por la contracción de los meridianos
/// a la latitud del centro, para que la distribución sea uniforme en el disco.
pub fn random_location_within(center: &GeoPoint, radius_m: u32) -> GeoPoint {
    let mut rng = rand::thread_rng();

    // Radio en grados (~111 km por grado)
    let radius_deg = f64::from(radius_m) / 111_000.0;

    let u: f64 = rng.gen();
    let v: f64 = rng.gen();

    // Punto aleatorio uniforme dentro del círculo
    let w = radius_deg * u.sqrt();
    let t = 2.0 * std::f64::consts::PI * v;
    let x = w * t.cos();
    let y = w * t.sin();

    // Corrección este-oeste
    let new_x = x / center.latitude.to_radians().cos();

    GeoPoint {
        latitude: center.latitude + y,
        longitude: center.longitude + new_x,
    }
}
