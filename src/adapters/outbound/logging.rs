use crate::domains::logger::DomainLogger;
use std::sync::Arc;

/// Forwards domain log lines to `tracing` under the `fleet_sim::simulation` target.
struct TracingBridge;

impl DomainLogger for TracingBridge {
    fn info(&self, msg: &str) {
        tracing::info!(target: "fleet_sim::simulation", "{}", msg);
    }

    fn warn(&self, msg: &str) {
        tracing::warn!(target: "fleet_sim::simulation", "{}", msg);
    }

    fn error(&self, msg: &str) {
        tracing::error!(target: "fleet_sim::simulation", "{}", msg);
    }
}

/// Domain logger backed by the process-wide tracing subscriber.
pub fn init_tracing_logger() -> Arc<dyn DomainLogger> {
    Arc::new(TracingBridge {})
}

/// Install the fmt subscriber. `RUST_LOG` wins over `default_filter` when set.
pub fn init_tracing(default_filter: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

struct Silent;

impl DomainLogger for Silent {
    fn info(&self, _msg: &str) {}
    fn warn(&self, _msg: &str) {}
    fn error(&self, _msg: &str) {}
}

/// Logger that drops everything; handy in tests.
pub fn init_silent_logger() -> Arc<dyn DomainLogger> {
    Arc::new(Silent {})
}
