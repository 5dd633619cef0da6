use crate::common::DomainResult;
use async_trait::async_trait;

use super::trip::{Trip, TripId};
use super::vehicle::{Location, Vehicle, VehicleId};

/// Port for persisting vehicles and their current position.
/// Implementations assign the vehicle identifier.
#[async_trait]
pub trait FleetRegistry: Send + Sync {
    async fn create(&self, vehicle: &Vehicle) -> DomainResult<VehicleId>;
    async fn get(&self, id: VehicleId) -> DomainResult<Option<Vehicle>>;
    /// Overwrite the stored position. Unknown ids are ignored.
    async fn update_position(&self, id: VehicleId, location: &Location) -> DomainResult<()>;
}

/// Port for recording fabricated trips.
#[async_trait]
pub trait TripLedger: Send + Sync {
    async fn create(&self, trip: &Trip) -> DomainResult<TripId>;
    async fn count(&self) -> DomainResult<u64>;
}
