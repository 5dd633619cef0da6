use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use anyhow::{ensure, Result};

use crate::domains::fleet::{
    FareSchedule, INITIAL_JITTER_DEG, MOVE_JITTER_DEG, ORIGIN_LAT, ORIGIN_LNG,
};

/// Prefix for environment overrides, e.g. `FLEETSIM__POSTGRES__HOST`.
pub const ENV_PREFIX: &str = "FLEETSIM";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub store: StoreConfig,
    pub postgres: PostgresConfig,
    pub simulation: SimulationConfig,
    pub fare: FareSchedule,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Memory,
    Postgres,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    pub backend: StoreBackend,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostgresConfig {
    pub host: String,
    pub port: u16,
    pub database: String,
    pub username: String,
    pub password: String,
    pub max_connections: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub fleet_size: usize,
    pub round_interval_secs: u64,
    pub origin_lat: f64,
    pub origin_lng: f64,
    pub initial_jitter_deg: f64,
    pub move_jitter_deg: f64,
    /// Stop after this many rounds; run until shutdown when unset.
    pub max_rounds: Option<u64>,
    /// Seed for a reproducible run.
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub filter: String,
}

impl SimulationConfig {
    pub fn round_interval(&self) -> Duration {
        Duration::from_secs(self.round_interval_secs)
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            fleet_size: 5,
            round_interval_secs: 30,
            origin_lat: ORIGIN_LAT,
            origin_lng: ORIGIN_LNG,
            initial_jitter_deg: INITIAL_JITTER_DEG,
            move_jitter_deg: MOVE_JITTER_DEG,
            max_rounds: None,
            seed: None,
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self { backend: StoreBackend::Memory }
    }
}

impl Default for PostgresConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 5432,
            database: "smart_transport".to_string(),
            username: "postgres".to_string(),
            password: "password".to_string(),
            max_connections: 4,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { filter: "info".to_string() }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store: StoreConfig::default(),
            postgres: PostgresConfig::default(),
            simulation: SimulationConfig::default(),
            fare: FareSchedule::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    /// Strict load of a single TOML file; missing sections fall back to defaults.
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = tokio::fs::read_to_string(path).await?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Layered load: defaults, then `path` if it exists, then `FLEETSIM__*`
    /// environment variables.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::Config::try_from(&Config::default())?)
            .add_source(config::File::from(path.as_ref()).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;
        let config: Config = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the simulation cannot draw from.
    pub fn validate(&self) -> Result<()> {
        let sim = &self.simulation;
        ensure!(
            sim.origin_lat.is_finite() && sim.origin_lng.is_finite(),
            "simulation origin must be finite"
        );
        for (name, value) in [
            ("initial_jitter_deg", sim.initial_jitter_deg),
            ("move_jitter_deg", sim.move_jitter_deg),
        ] {
            ensure!(
                value.is_finite() && value >= 0.0,
                "simulation.{} must be a finite, non-negative number, got {}",
                name,
                value
            );
        }

        let fare = &self.fare;
        for (name, value) in [
            ("base_fare", fare.base_fare),
            ("rate_per_km", fare.rate_per_km),
            ("vat_rate", fare.vat_rate),
            ("min_distance_km", fare.min_distance_km),
            ("max_distance_km", fare.max_distance_km),
        ] {
            ensure!(value.is_finite(), "fare.{} must be finite, got {}", name, value);
        }
        ensure!(
            fare.min_distance_km <= fare.max_distance_km,
            "fare distance range is empty: min_distance_km {} > max_distance_km {}",
            fare.min_distance_km,
            fare.max_distance_km
        );
        Ok(())
    }
}
