use crate::common::DomainResult;
use crate::domains::fleet::{FleetRegistry, Location, Trip, TripId, TripLedger, Vehicle, VehicleId};
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

/// In-memory fleet registry and trip ledger for tests and offline runs.
#[derive(Debug, Default)]
pub struct InMemoryFleetStore {
    vehicles: RwLock<HashMap<VehicleId, Vehicle>>,
    trips: RwLock<Vec<(TripId, Trip)>>,
    position_updates: RwLock<u64>,
}

impl InMemoryFleetStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `update_position` calls that hit a stored vehicle.
    pub async fn position_updates(&self) -> u64 {
        *self.position_updates.read().await
    }

    pub async fn vehicles(&self) -> HashMap<VehicleId, Vehicle> {
        self.vehicles.read().await.clone()
    }

    pub async fn trips(&self) -> Vec<(TripId, Trip)> {
        self.trips.read().await.clone()
    }

    pub async fn remove_vehicle(&self, id: VehicleId) -> Option<Vehicle> {
        self.vehicles.write().await.remove(&id)
    }
}

#[async_trait]
impl FleetRegistry for InMemoryFleetStore {
    async fn create(&self, vehicle: &Vehicle) -> DomainResult<VehicleId> {
        let id = Uuid::new_v4();
        self.vehicles.write().await.insert(id, vehicle.clone());
        Ok(id)
    }

    async fn get(&self, id: VehicleId) -> DomainResult<Option<Vehicle>> {
        Ok(self.vehicles.read().await.get(&id).cloned())
    }

    async fn update_position(&self, id: VehicleId, location: &Location) -> DomainResult<()> {
        let mut vehicles = self.vehicles.write().await;
        if let Some(vehicle) = vehicles.get_mut(&id) {
            vehicle.current_location = *location;
            *self.position_updates.write().await += 1;
        }
        Ok(())
    }
}

#[async_trait]
impl TripLedger for InMemoryFleetStore {
    async fn create(&self, trip: &Trip) -> DomainResult<TripId> {
        let id = Uuid::new_v4();
        self.trips.write().await.push((id, trip.clone()));
        Ok(id)
    }

    async fn count(&self) -> DomainResult<u64> {
        Ok(self.trips.read().await.len() as u64)
    }
}
