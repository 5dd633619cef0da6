#[cfg(feature = "pg_integration")]
use chrono::Utc;
#[cfg(feature = "pg_integration")]
use fleet_sim::adapters::outbound::PostgresFleetStore;
#[cfg(feature = "pg_integration")]
use fleet_sim::config::PostgresConfig;
#[cfg(feature = "pg_integration")]
use fleet_sim::domains::fleet::*;
#[cfg(feature = "pg_integration")]
use rand::rngs::StdRng;
#[cfg(feature = "pg_integration")]
use rand::SeedableRng;

/// Needs a running Postgres; `PG_TEST_PORT` selects the port (default 5433).
#[cfg(feature = "pg_integration")]
#[tokio::test]
async fn test_postgres_fleet_store_roundtrip() -> Result<(), Box<dyn std::error::Error>> {
    let port = std::env::var("PG_TEST_PORT")
        .ok()
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(5433u16);
    let config = PostgresConfig {
        host: "127.0.0.1".to_string(),
        port,
        database: "postgres".to_string(),
        username: "postgres".to_string(),
        password: "postgres".to_string(),
        max_connections: 2,
    };

    let store = PostgresFleetStore::connect(config).await?;
    let registry: &dyn FleetRegistry = &store;
    let ledger: &dyn TripLedger = &store;

    let mut rng = StdRng::seed_from_u64(21);
    let location =
        initial_location(&mut rng, ORIGIN_LAT, ORIGIN_LNG, INITIAL_JITTER_DEG, Utc::now());
    let vehicle = Vehicle::random(&mut rng, location);

    let id = registry.create(&vehicle).await?;
    let loaded = registry.get(id).await?.ok_or("vehicle not stored")?;
    assert_eq!(loaded.plate_number, vehicle.plate_number);
    assert_eq!(loaded.province, vehicle.province);

    let next = perturb(&mut rng, &loaded.current_location, MOVE_JITTER_DEG, Utc::now());
    registry.update_position(id, &next).await?;
    let moved = registry.get(id).await?.ok_or("vehicle vanished")?;
    assert_eq!(moved.current_location.lat, next.lat);
    assert_eq!(moved.current_location.lng, next.lng);

    let before = ledger.count().await?;
    ledger.create(&Trip::generate(&mut rng, id, &FareSchedule::default(), Utc::now())).await?;
    assert_eq!(ledger.count().await?, before + 1);

    assert!(registry.get(uuid::Uuid::new_v4()).await?.is_none());

    store.close();
    assert!(registry.get(id).await.is_err());
    Ok(())
}
