//! Flujo completo entre los dos lifecycles: booking aceptado -> evento ->
//! vehículo OCCUPIED, más los casos degenerados (evento perdido) y la
//! carrera de dos accepts concurrentes.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;

use ride_dispatch::events::memory::MemoryEventChannel;
use ride_dispatch::events::subscriber::BookingAcceptedListener;
use ride_dispatch::events::{EventChannel, ACCEPTED_EVENT_CHANNEL};
use ride_dispatch::geo::memory::MemoryGeoIndex;
use ride_dispatch::models::booking::Booking;
use ride_dispatch::models::location::GeoPoint;
use ride_dispatch::models::vehicle::{Vehicle, VehicleCategory, VehicleStatus};
use ride_dispatch::repositories::memory::MemoryStore;
use ride_dispatch::services::booking_service::{BookingRequest, BookingService};
use ride_dispatch::services::vehicle_service::VehicleService;

struct Fixture {
    bookings: Arc<BookingService>,
    vehicles: Arc<VehicleService>,
    channel: Arc<MemoryEventChannel>,
}

// Las dos "autoridades" completas, unidas solo por el canal de eventos
fn fixture() -> Fixture {
    let geo = Arc::new(MemoryGeoIndex::new());
    let channel = Arc::new(MemoryEventChannel::new());

    let vehicles = Arc::new(VehicleService::new(
        Arc::new(MemoryStore::<Vehicle>::new()),
        geo.clone(),
    ));
    let bookings = Arc::new(BookingService::new(
        Arc::new(MemoryStore::<Booking>::new()),
        geo,
        channel.clone(),
    ));

    Fixture {
        bookings,
        vehicles,
        channel,
    }
}

async fn wire_listener(fixture: &Fixture) {
    let listener = Arc::new(BookingAcceptedListener::new(fixture.vehicles.clone()));
    fixture
        .channel
        .subscribe(ACCEPTED_EVENT_CHANNEL, listener)
        .await
        .unwrap();
}

#[tokio::test]
async fn accepted_booking_marks_vehicle_occupied_through_the_channel() {
    let fixture = fixture();
    wire_listener(&fixture).await;

    // Registrar V1 (MINI) y ubicarlo cerca del punto de partida de B1
    fixture
        .vehicles
        .register(Some("V1".to_string()), VehicleCategory::Mini)
        .await
        .unwrap();
    fixture
        .vehicles
        .update_location("V1", GeoPoint::new(6.9276, 79.8651))
        .await
        .unwrap();

    let booking = fixture
        .bookings
        .book(BookingRequest {
            start: GeoPoint::new(6.9280, 79.8655),
            end: GeoPoint::new(6.9000, 79.9000),
            booked_time: Utc::now(),
            customer_id: 7,
            category: VehicleCategory::Mini,
        })
        .await
        .unwrap();

    // El dispatcher encontraría a V1 a menos de 1 km del punto de partida
    let candidates = fixture
        .vehicles
        .nearby(VehicleCategory::Mini, booking.start, 1.0)
        .await
        .unwrap();
    assert!(candidates.iter().any(|e| e.id == "V1"));

    fixture
        .bookings
        .accept(&booking.id, "V1", Utc::now())
        .await
        .unwrap();

    // La entrega es asíncrona; esperar a que el listener corra
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(
        fixture.vehicles.get_status("V1").await.unwrap(),
        VehicleStatus::Occupied
    );
}

#[tokio::test]
async fn without_listener_the_vehicle_stays_available() {
    // Evento perdido: nadie suscrito al canal. La aceptación persiste
    // igualmente y la flota queda desincronizada, tal como documenta
    // el modelo at-most-once.
    let fixture = fixture();

    fixture
        .vehicles
        .register(Some("V1".to_string()), VehicleCategory::Mini)
        .await
        .unwrap();

    let booking = fixture
        .bookings
        .book(BookingRequest {
            start: GeoPoint::new(6.9280, 79.8655),
            end: GeoPoint::new(6.9000, 79.9000),
            booked_time: Utc::now(),
            customer_id: 7,
            category: VehicleCategory::Mini,
        })
        .await
        .unwrap();

    let accepted = fixture
        .bookings
        .accept(&booking.id, "V1", Utc::now())
        .await
        .unwrap();
    assert_eq!(accepted.vehicle_id(), Some("V1"));

    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(
        fixture.vehicles.get_status("V1").await.unwrap(),
        VehicleStatus::Available
    );
}

#[tokio::test]
async fn malformed_event_is_dropped_without_side_effects() {
    let fixture = fixture();
    wire_listener(&fixture).await;

    fixture
        .vehicles
        .register(Some("V1".to_string()), VehicleCategory::Mini)
        .await
        .unwrap();

    fixture
        .channel
        .publish(ACCEPTED_EVENT_CHANNEL, "not json at all".to_string())
        .await
        .unwrap();

    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(
        fixture.vehicles.get_status("V1").await.unwrap(),
        VehicleStatus::Available
    );
}

#[tokio::test]
async fn concurrent_accepts_have_exactly_one_winner() {
    let fixture = fixture();

    let booking = fixture
        .bookings
        .book(BookingRequest {
            start: GeoPoint::new(6.9280, 79.8655),
            end: GeoPoint::new(6.9000, 79.9000),
            booked_time: Utc::now(),
            customer_id: 7,
            category: VehicleCategory::Mini,
        })
        .await
        .unwrap();

    let a = {
        let bookings = fixture.bookings.clone();
        let id = booking.id.clone();
        tokio::spawn(async move { bookings.accept(&id, "V-A", Utc::now()).await })
    };
    let b = {
        let bookings = fixture.bookings.clone();
        let id = booking.id.clone();
        tokio::spawn(async move { bookings.accept(&id, "V-B", Utc::now()).await })
    };

    let results = [a.await.unwrap(), b.await.unwrap()];
    let winners: Vec<_> = results.iter().filter(|r| r.is_ok()).collect();
    assert_eq!(winners.len(), 1, "exactly one accept must win");

    // El vehículo persistido es el del accept ganador, completo y sin mezclar
    let stored = fixture.bookings.get(&booking.id).await.unwrap();
    let winner_vehicle = winners[0].as_ref().unwrap().vehicle_id().unwrap();
    assert_eq!(stored.vehicle_id(), Some(winner_vehicle));
    assert!(matches!(winner_vehicle, "V-A" | "V-B"));
}
