use crate::common::{ApplicationError, ApplicationResult};
use crate::config::SimulationConfig;
use crate::domains::fleet::{
    initial_location, perturb, FareSchedule, FleetRegistry, Location, Trip, TripId, TripLedger,
    Vehicle, VehicleId,
};
use crate::domains::DynLogger;
use chrono::Utc;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;
use tokio::sync::watch;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulationState {
    Initializing,
    Running,
    Stopped,
}

/// Outcome of one pass over the fleet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundSummary {
    pub round: u64,
    pub vehicles_moved: usize,
    pub vehicles_missing: usize,
    pub trips_recorded: usize,
}

/// Drives the fleet: creates it once, then moves every vehicle and records a
/// trip for it each round, pausing between rounds until stopped.
pub struct SimulationService {
    registry: Arc<dyn FleetRegistry>,
    ledger: Arc<dyn TripLedger>,
    logger: DynLogger,
    settings: SimulationConfig,
    fare: FareSchedule,
    rng: StdRng,
    fleet: Vec<VehicleId>,
    state: SimulationState,
    rounds_completed: u64,
}

impl SimulationService {
    pub fn new(
        registry: Arc<dyn FleetRegistry>,
        ledger: Arc<dyn TripLedger>,
        logger: DynLogger,
        settings: SimulationConfig,
        fare: FareSchedule,
    ) -> Self {
        let rng = match settings.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            registry,
            ledger,
            logger,
            settings,
            fare,
            rng,
            fleet: Vec::new(),
            state: SimulationState::Initializing,
            rounds_completed: 0,
        }
    }

    pub fn state(&self) -> SimulationState {
        self.state
    }

    pub fn fleet(&self) -> &[VehicleId] {
        &self.fleet
    }

    pub fn rounds_completed(&self) -> u64 {
        self.rounds_completed
    }

    /// Register `fleet_size` fresh vehicles around the origin.
    pub async fn create_fleet(&mut self) -> ApplicationResult<&[VehicleId]> {
        if self.state != SimulationState::Initializing {
            return Err(ApplicationError::Simulation("fleet already created".to_string()));
        }

        for _ in 0..self.settings.fleet_size {
            let location = initial_location(
                &mut self.rng,
                self.settings.origin_lat,
                self.settings.origin_lng,
                self.settings.initial_jitter_deg,
                Utc::now(),
            );
            let vehicle = Vehicle::random(&mut self.rng, location);
            let id = self.registry.create(&vehicle).await?;
            self.fleet.push(id);
            self.logger.info(&format!(
                "Created vehicle {} in {}",
                vehicle.plate_number, vehicle.province
            ));
        }

        self.state = SimulationState::Running;
        Ok(&self.fleet)
    }

    /// Nudge a vehicle's position. Returns `None` without touching the store
    /// when the registry no longer knows the vehicle.
    pub async fn move_vehicle(&mut self, id: VehicleId) -> ApplicationResult<Option<Location>> {
        let vehicle = match self.registry.get(id).await? {
            Some(vehicle) => vehicle,
            None => {
                self.logger.warn(&format!("Vehicle {} not found, skipping move", id));
                return Ok(None);
            }
        };

        let next = perturb(
            &mut self.rng,
            &vehicle.current_location,
            self.settings.move_jitter_deg,
            Utc::now(),
        );
        self.registry.update_position(id, &next).await?;
        self.logger.info(&format!(
            "Vehicle {} moved to ({}, {})",
            vehicle.plate_number, next.lat, next.lng
        ));

        Ok(Some(next))
    }

    /// Fabricate a trip for `id` and write it to the ledger.
    pub async fn record_trip(&mut self, id: VehicleId) -> ApplicationResult<TripId> {
        let trip = Trip::generate(&mut self.rng, id, &self.fare, Utc::now());
        let trip_id = self.ledger.create(&trip).await?;
        self.logger.info(&format!(
            "Trip for vehicle {} - distance {}km, fare R{}",
            id, trip.distance_km, trip.fare.total
        ));
        Ok(trip_id)
    }

    /// One pass over the fleet in creation order. Any store error aborts the round.
    pub async fn run_round(&mut self) -> ApplicationResult<RoundSummary> {
        if self.state != SimulationState::Running {
            return Err(ApplicationError::Simulation(format!(
                "cannot run a round while {:?}",
                self.state
            )));
        }

        let mut summary = RoundSummary {
            round: self.rounds_completed + 1,
            vehicles_moved: 0,
            vehicles_missing: 0,
            trips_recorded: 0,
        };

        for id in self.fleet.clone() {
            match self.move_vehicle(id).await? {
                Some(_) => summary.vehicles_moved += 1,
                None => summary.vehicles_missing += 1,
            }
            self.record_trip(id).await?;
            summary.trips_recorded += 1;
        }

        self.rounds_completed += 1;
        Ok(summary)
    }

    /// Create the fleet if needed, then run rounds until `shutdown` flips to
    /// `true` or `max_rounds` is reached. Returns the number of rounds run.
    pub async fn run(&mut self, mut shutdown: watch::Receiver<bool>) -> ApplicationResult<u64> {
        if self.state == SimulationState::Initializing {
            self.create_fleet().await?;
        }

        self.logger.info(&format!(
            "Starting simulation of {} vehicles every {} seconds",
            self.fleet.len(),
            self.settings.round_interval_secs
        ));

        let started_at = self.rounds_completed;
        loop {
            if *shutdown.borrow() || self.round_limit_reached(started_at) {
                break;
            }

            if let Err(e) = self.run_round().await {
                let round = self.rounds_completed + 1;
                self.logger.error(&format!("Round {} aborted: {}", round, e));
                return Err(e);
            }

            if self.round_limit_reached(started_at) {
                break;
            }

            self.logger.info(&format!(
                "Waiting {} seconds",
                self.settings.round_interval_secs
            ));
            tokio::select! {
                _ = tokio::time::sleep(self.settings.round_interval()) => {}
                _ = wait_for_shutdown(&mut shutdown) => break,
            }
        }

        self.state = SimulationState::Stopped;
        self.logger.info(&format!(
            "Simulation stopped after {} rounds",
            self.rounds_completed
        ));
        Ok(self.rounds_completed - started_at)
    }

    fn round_limit_reached(&self, started_at: u64) -> bool {
        self.settings
            .max_rounds
            .is_some_and(|max| self.rounds_completed - started_at >= max)
    }
}

/// Resolves once the flag is `true`. A dropped sender can never stop the run,
/// so it parks forever instead.
async fn wait_for_shutdown(shutdown: &mut watch::Receiver<bool>) {
    while !*shutdown.borrow_and_update() {
        if shutdown.changed().await.is_err() {
            std::future::pending::<()>().await;
        }
    }
}
