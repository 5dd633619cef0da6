//! Position drift for simulated vehicles.

use chrono::{DateTime, Utc};
use rand::Rng;

use super::vehicle::Location;
use crate::common::round_to;

/// Decimal places kept for coordinates.
pub const COORDINATE_PLACES: usize = 6;

/// Largest per-axis step, in degrees, taken in one round.
pub const MOVE_JITTER_DEG: f64 = 0.001;

/// Largest per-axis distance, in degrees, of an initial position from the origin.
pub const INITIAL_JITTER_DEG: f64 = 0.01;

/// Fleet origin (Pretoria).
pub const ORIGIN_LAT: f64 = -25.7479;
pub const ORIGIN_LNG: f64 = 28.2293;

fn jitter<R: Rng + ?Sized>(rng: &mut R, bound: f64) -> f64 {
    // also covers NaN
    if !(bound > 0.0) {
        return 0.0;
    }
    rng.gen_range(-bound..=bound)
}

/// Place a vehicle near `(origin_lat, origin_lng)`.
pub fn initial_location<R: Rng + ?Sized>(
    rng: &mut R,
    origin_lat: f64,
    origin_lng: f64,
    jitter_deg: f64,
    now: DateTime<Utc>,
) -> Location {
    Location {
        lat: round_to(origin_lat + jitter(rng, jitter_deg), COORDINATE_PLACES),
        lng: round_to(origin_lng + jitter(rng, jitter_deg), COORDINATE_PLACES),
        timestamp: now,
    }
}

/// Next position of a vehicle currently at `current`.
///
/// Each axis moves by an independent offset in `[-jitter_deg, jitter_deg]`.
/// Positions are not clamped, so repeated calls random-walk without bound.
pub fn perturb<R: Rng + ?Sized>(
    rng: &mut R,
    current: &Location,
    jitter_deg: f64,
    now: DateTime<Utc>,
) -> Location {
    let move_lat = round_to(jitter(rng, jitter_deg), COORDINATE_PLACES);
    let move_lng = round_to(jitter(rng, jitter_deg), COORDINATE_PLACES);

    Location {
        lat: round_to(current.lat + move_lat, COORDINATE_PLACES),
        lng: round_to(current.lng + move_lng, COORDINATE_PLACES),
        timestamp: now,
    }
}
