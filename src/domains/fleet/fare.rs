//! Fare computation for fabricated trips.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::common::round_to;

/// Flat fee charged on every trip.
pub const BASE_FARE: f64 = 10.00;

/// Charge per kilometre travelled.
pub const RATE_PER_KM: f64 = 2.50;

/// Value-added tax applied to the subtotal.
pub const VAT_RATE: f64 = 0.15;

/// Surcharges a trip may attract, picked uniformly.
pub const SURCHARGE_OPTIONS: [u32; 3] = [0, 5, 10];

/// Pricing constants used to build a fare. `Default` yields the standard tariff.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FareSchedule {
    pub base_fare: f64,
    pub rate_per_km: f64,
    pub vat_rate: f64,
    pub surcharge_options: Vec<u32>,
    pub min_distance_km: f64,
    pub max_distance_km: f64,
}

impl Default for FareSchedule {
    fn default() -> Self {
        Self {
            base_fare: BASE_FARE,
            rate_per_km: RATE_PER_KM,
            vat_rate: VAT_RATE,
            surcharge_options: SURCHARGE_OPTIONS.to_vec(),
            min_distance_km: 5.0,
            max_distance_km: 25.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FareBreakdown {
    pub base_fare: f64,
    pub distance_rate: f64,
    pub surcharge: u32,
    pub vat: f64,
    pub total: f64,
}

impl FareBreakdown {
    /// Subtotal before tax, left unrounded.
    pub fn subtotal(&self) -> f64 {
        self.base_fare + self.distance_rate + f64::from(self.surcharge)
    }
}

impl FareSchedule {
    /// Price a trip of `distance_km` with the given surcharge.
    ///
    /// The distance charge and VAT are rounded to cents individually; the
    /// subtotal feeding VAT and total stays unrounded.
    pub fn compute(&self, distance_km: f64, surcharge: u32) -> FareBreakdown {
        let distance_rate = round_to(self.rate_per_km * distance_km, 2);
        let subtotal = self.base_fare + distance_rate + f64::from(surcharge);
        let vat = round_to(subtotal * self.vat_rate, 2);
        let total = round_to(subtotal + vat, 2);

        FareBreakdown {
            base_fare: self.base_fare,
            distance_rate,
            surcharge,
            vat,
            total,
        }
    }

    /// Trip distance drawn uniformly from the schedule's range, one decimal.
    pub fn draw_distance<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        round_to(rng.gen_range(self.min_distance_km..=self.max_distance_km), 1)
    }

    pub fn draw_surcharge<R: Rng + ?Sized>(&self, rng: &mut R) -> u32 {
        self.surcharge_options.choose(rng).copied().unwrap_or(0)
    }
}
