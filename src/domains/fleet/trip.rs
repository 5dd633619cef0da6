use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::{Builder, Uuid};

use super::fare::{FareBreakdown, FareSchedule};
use super::vehicle::VehicleId;

pub type TripId = Uuid;

/// Shortest and longest offsets, in whole minutes, used for trip timing.
pub const TRIP_MINUTES_MIN: i64 = 10;
pub const TRIP_MINUTES_MAX: i64 = 30;

/// A completed trip. Driver and route references are opaque placeholders with
/// no stored entity behind them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trip {
    pub vehicle_id: VehicleId,
    pub driver_id: Uuid,
    pub route_id: Uuid,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub distance_km: f64,
    pub fare: FareBreakdown,
}

impl Trip {
    /// Fabricate a trip for `vehicle_id` that ended somewhere around `now`.
    pub fn generate<R: Rng + ?Sized>(
        rng: &mut R,
        vehicle_id: VehicleId,
        schedule: &FareSchedule,
        now: DateTime<Utc>,
    ) -> Self {
        let driver_id = random_uuid(rng);
        let route_id = random_uuid(rng);

        let distance_km = schedule.draw_distance(rng);
        let surcharge = schedule.draw_surcharge(rng);
        let fare = schedule.compute(distance_km, surcharge);

        let start_time =
            now - Duration::minutes(rng.gen_range(TRIP_MINUTES_MIN..=TRIP_MINUTES_MAX));
        let end_time =
            start_time + Duration::minutes(rng.gen_range(TRIP_MINUTES_MIN..=TRIP_MINUTES_MAX));

        Self {
            vehicle_id,
            driver_id,
            route_id,
            start_time,
            end_time,
            distance_km,
            fare,
        }
    }
}

/// v4 UUID drawn from `rng`, so seeded runs stay reproducible.
pub fn random_uuid<R: Rng + ?Sized>(rng: &mut R) -> Uuid {
    Builder::from_random_bytes(rng.gen()).into_uuid()
}
