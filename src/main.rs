use fleet_sim::adapters::outbound::{
    init_tracing, init_tracing_logger, InMemoryFleetStore, PostgresFleetStore,
};
use fleet_sim::application::SimulationService;
use fleet_sim::config::StoreBackend;
use fleet_sim::domains::fleet::{FleetRegistry, TripLedger};
use fleet_sim::Config;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config_path = std::env::args().nth(1).unwrap_or_else(|| "config.toml".to_string());
    let config = Config::load(&config_path)?;

    init_tracing(&config.logging.filter);
    info!("Starting fleet simulator");
    info!(
        backend = ?config.store.backend,
        fleet_size = config.simulation.fleet_size,
        "Configuration loaded from {}",
        config_path
    );

    let (registry, ledger, pg_store): (
        Arc<dyn FleetRegistry>,
        Arc<dyn TripLedger>,
        Option<Arc<PostgresFleetStore>>,
    ) = match config.store.backend {
        StoreBackend::Memory => {
            let store = Arc::new(InMemoryFleetStore::new());
            (store.clone() as Arc<dyn FleetRegistry>, store as Arc<dyn TripLedger>, None)
        }
        StoreBackend::Postgres => {
            info!("PostgreSQL host: {}:{}", config.postgres.host, config.postgres.port);
            let store = Arc::new(PostgresFleetStore::connect(config.postgres.clone()).await?);
            (
                store.clone() as Arc<dyn FleetRegistry>,
                store.clone() as Arc<dyn TripLedger>,
                Some(store),
            )
        }
    };

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Shutdown requested");
            let _ = shutdown_tx.send(true);
        }
    });

    let mut service = SimulationService::new(
        registry,
        ledger.clone(),
        init_tracing_logger(),
        config.simulation.clone(),
        config.fare.clone(),
    );

    let result = service.run(shutdown_rx).await;

    match &result {
        Ok(rounds) => match ledger.count().await {
            Ok(trips) => info!(rounds, trips, "Simulation finished"),
            Err(e) => error!("Could not count trips: {}", e),
        },
        Err(e) => error!("Simulation aborted: {}", e),
    }

    if let Some(store) = pg_store {
        store.close();
    }

    result?;
    Ok(())
}
