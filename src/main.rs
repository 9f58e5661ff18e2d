use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::{response::Json, routing::get, Router};
use dotenvy::dotenv;
use serde_json::json;
use tokio::signal;
use tracing::{error, info};

use ride_dispatch::config::environment::EnvironmentConfig;
use ride_dispatch::events::subscriber::BookingAcceptedListener;
use ride_dispatch::events::redis::RedisEventChannel;
use ride_dispatch::events::{EventChannel, ACCEPTED_EVENT_CHANNEL};
use ride_dispatch::geo::redis::RedisGeoIndex;
use ride_dispatch::middleware::cors::cors_middleware;
use ride_dispatch::models::booking::Booking;
use ride_dispatch::models::location::GeoPoint;
use ride_dispatch::models::vehicle::{Vehicle, VehicleCategory};
use ride_dispatch::repositories::redis::{RedisClient, RedisStore};
use ride_dispatch::routes::{booking_routes, vehicle_routes};
use ride_dispatch::services::booking_service::BookingService;
use ride_dispatch::services::vehicle_service::VehicleService;
use ride_dispatch::state::AppState;
use ride_dispatch::utils::location::random_location_within;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    info!("🚕 Ride Dispatch - bookings + flota sobre Redis");
    info!("================================================");

    let config = EnvironmentConfig::default();

    // Inicializar Redis: registros, índice GEO y pub/sub
    let redis_client = match RedisClient::new(&config.redis_url).await {
        Ok(client) => client,
        Err(e) => {
            error!("❌ Error conectando a Redis: {}", e);
            return Err(anyhow::anyhow!("Error de Redis: {}", e));
        }
    };

    let booking_store: Arc<RedisStore<Booking>> = Arc::new(RedisStore::new(redis_client.clone()));
    let vehicle_store: Arc<RedisStore<Vehicle>> = Arc::new(RedisStore::new(redis_client.clone()));
    let geo_index = Arc::new(RedisGeoIndex::new(redis_client.clone()));
    let channel = Arc::new(RedisEventChannel::new(redis_client));

    let vehicles = Arc::new(VehicleService::new(vehicle_store, geo_index.clone()));
    let bookings = Arc::new(BookingService::new(
        booking_store,
        geo_index,
        channel.clone(),
    ));

    // Suscribir el lifecycle de la flota al evento booking-accepted
    let listener = Arc::new(BookingAcceptedListener::new(vehicles.clone()));
    channel.subscribe(ACCEPTED_EVENT_CHANNEL, listener).await?;

    // Flota de demostración, solo en desarrollo
    if config.is_development() {
        seed_fleet(&vehicles).await;
    }

    // Crear router de la API
    let app_state = AppState::new(config.clone(), bookings, vehicles);

    let app = Router::new()
        .route("/health", get(health))
        .nest("/api/booking", booking_routes::create_booking_router())
        .nest("/api/vehicle", vehicle_routes::create_vehicle_router())
        .layer(cors_middleware())
        .with_state(app_state);

    let addr: SocketAddr = config.server_addr().parse()?;

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health - Health check");
    info!("🚕 Endpoints - Booking:");
    info!("   POST /api/booking - Crear booking");
    info!("   GET  /api/booking?category&latitude&longitude&radius - Bookings cercanos");
    info!("   GET  /api/booking/:id - Obtener booking");
    info!("   PUT  /api/booking/:id/cancel - Cancelar booking");
    info!("   PUT  /api/booking/:id/accept - Aceptar booking");
    info!("   PUT  /api/booking/:id/status - Actualizar estado");
    info!("🚗 Endpoints - Vehicle:");
    info!("   POST /api/vehicle/register - Registrar vehículo");
    info!("   GET  /api/vehicle?category&latitude&longitude&radius - Vehículos cercanos");
    info!("   GET  /api/vehicle/:id - Obtener vehículo");
    info!("   PUT  /api/vehicle/:id/location - Actualizar ubicación");
    info!("   PUT  /api/vehicle/:id/status - Actualizar estado");
    info!("   GET  /api/vehicle/:id/status - Obtener estado");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| {
            error!("❌ Error del servidor: {}", e);
            e
        })?;

    info!("👋 Servidor terminado");
    Ok(())
}

/// Siembra vehículos de demostración alrededor de Colombo
async fn seed_fleet(vehicles: &VehicleService) {
    let center = GeoPoint::new(6.9271, 79.8612);
    let categories = [
        VehicleCategory::Mini,
        VehicleCategory::Sedan,
        VehicleCategory::Van,
    ];

    let mut seeded = 0;
    for (i, category) in categories.iter().cycle().take(9).enumerate() {
        let id = format!("seed-{}-{}", category, i);
        match vehicles.register(Some(id.clone()), *category).await {
            Ok(vehicle) => {
                let point = random_location_within(&center, 2_000);
                match vehicles.update_location(&vehicle.id, point).await {
                    Ok(_) => seeded += 1,
                    Err(e) => error!("❌ No se pudo ubicar el vehículo {}: {}", vehicle.id, e),
                }
            }
            Err(e) => error!("❌ No se pudo registrar el vehículo seed {}: {}", id, e),
        }
    }

    info!("🌱 Flota de demostración: {} vehículos alrededor de Colombo", seeded);
}

/// Health check simple
async fn health() -> Json<serde_json::Value> {
    Json(json!({
        "service": "ride-dispatch",
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
