use async_trait::async_trait;
use fleet_sim::adapters::outbound::{init_silent_logger, init_tracing_logger, InMemoryFleetStore};
use fleet_sim::application::SimulationService;
use fleet_sim::common::{DomainError, DomainResult};
use fleet_sim::config::SimulationConfig;
use fleet_sim::domains::fleet::{FareSchedule, Trip, TripId, TripLedger};
use fleet_sim::domains::logger::DomainLogger;
use std::sync::{Arc, Mutex};
use tokio::sync::watch;

struct BridgeCapture {
    messages: Arc<Mutex<Vec<String>>>,
}

impl BridgeCapture {
    fn new() -> Self { Self { messages: Arc::new(Mutex::new(Vec::new())) } }
}

impl DomainLogger for BridgeCapture {
    fn info(&self, msg: &str) { self.messages.lock().unwrap().push(format!("INFO:{}", msg)); }
    fn warn(&self, msg: &str) { self.messages.lock().unwrap().push(format!("WARN:{}", msg)); }
    fn error(&self, msg: &str) { self.messages.lock().unwrap().push(format!("ERR:{}", msg)); }
}

#[tokio::test]
async fn test_simulation_reports_through_injected_logger() {
    let capture = Arc::new(BridgeCapture::new());
    let store = Arc::new(InMemoryFleetStore::new());
    let mut service = SimulationService::new(
        store.clone(),
        store,
        capture.clone(),
        SimulationConfig {
            fleet_size: 2,
            round_interval_secs: 0,
            max_rounds: Some(2),
            seed: Some(3),
            ..SimulationConfig::default()
        },
        FareSchedule::default(),
    );
    let (_tx, rx) = watch::channel(false);
    service.run(rx).await.unwrap();

    let msgs = capture.messages.lock().unwrap();
    assert_eq!(msgs.iter().filter(|m| m.starts_with("INFO:Created vehicle")).count(), 2);
    assert_eq!(msgs.iter().filter(|m| m.contains("moved to")).count(), 4);
    assert_eq!(msgs.iter().filter(|m| m.starts_with("INFO:Trip for vehicle")).count(), 4);
    assert_eq!(msgs.iter().filter(|m| m.starts_with("INFO:Waiting 0 seconds")).count(), 1);
    assert!(msgs.iter().any(|m| m.contains("Simulation stopped after 2 rounds")));
    assert!(!msgs.iter().any(|m| m.starts_with("ERR:")));
}

#[tokio::test]
async fn test_missing_vehicle_is_reported_as_warning() {
    let capture = Arc::new(BridgeCapture::new());
    let store = Arc::new(InMemoryFleetStore::new());
    let mut service = SimulationService::new(
        store.clone(),
        store.clone(),
        capture.clone(),
        SimulationConfig { fleet_size: 2, seed: Some(4), ..SimulationConfig::default() },
        FareSchedule::default(),
    );
    let fleet = service.create_fleet().await.unwrap().to_vec();
    store.remove_vehicle(fleet[0]).await.unwrap();

    let summary = service.run_round().await.unwrap();
    assert_eq!(summary.vehicles_missing, 1);

    let msgs = capture.messages.lock().unwrap();
    let expected = format!("WARN:Vehicle {} not found, skipping move", fleet[0]);
    assert_eq!(msgs.iter().filter(|m| **m == expected).count(), 1);
    assert_eq!(msgs.iter().filter(|m| m.starts_with("WARN:")).count(), 1);
}

struct ClosedLedger;

#[async_trait]
impl TripLedger for ClosedLedger {
    async fn create(&self, _trip: &Trip) -> DomainResult<TripId> {
        Err(DomainError::StoreUnavailable("pool closed".to_string()))
    }

    async fn count(&self) -> DomainResult<u64> {
        Ok(0)
    }
}

#[tokio::test]
async fn test_aborted_round_is_reported_as_error() {
    let capture = Arc::new(BridgeCapture::new());
    let store = Arc::new(InMemoryFleetStore::new());
    let mut service = SimulationService::new(
        store,
        Arc::new(ClosedLedger),
        capture.clone(),
        SimulationConfig { fleet_size: 1, seed: Some(5), ..SimulationConfig::default() },
        FareSchedule::default(),
    );
    let (_tx, rx) = watch::channel(false);

    assert!(service.run(rx).await.is_err());

    let msgs = capture.messages.lock().unwrap();
    let errors: Vec<&String> = msgs.iter().filter(|m| m.starts_with("ERR:")).collect();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("Round 1 aborted"));
    assert!(errors[0].contains("pool closed"));
}

#[test]
fn test_tracing_and_silent_loggers_accept_calls() {
    let tracing_logger = init_tracing_logger();
    tracing_logger.info("ignored without a subscriber");
    tracing_logger.warn("ignored");

    let silent = init_silent_logger();
    silent.info("ignored");
    silent.error("ignored-err");
}
