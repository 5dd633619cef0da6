use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type VehicleId = Uuid;

/// A fleet vehicle as persisted by the registry. The identifier is owned by
/// the registry and kept outside the document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub plate_number: String,
    #[serde(rename = "type")]
    pub vehicle_type: VehicleType,
    pub status: VehicleStatus,
    pub province: Province,
    pub current_location: Location,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VehicleType {
    Bus,
    Taxi,
    Truck,
    Van,
}

impl VehicleType {
    pub const ALL: [VehicleType; 4] = [
        VehicleType::Bus,
        VehicleType::Taxi,
        VehicleType::Truck,
        VehicleType::Van,
    ];
}

/// The simulator only ever registers active vehicles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum VehicleStatus {
    #[default]
    Active,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Province {
    Gauteng,
    #[serde(rename = "Western Cape")]
    WesternCape,
    #[serde(rename = "KwaZulu-Natal")]
    KwaZuluNatal,
    #[serde(rename = "Eastern Cape")]
    EasternCape,
    #[serde(rename = "Free State")]
    FreeState,
    Limpopo,
    Mpumalanga,
    #[serde(rename = "North West")]
    NorthWest,
    #[serde(rename = "Northern Cape")]
    NorthernCape,
}

impl Province {
    pub const ALL: [Province; 9] = [
        Province::Gauteng,
        Province::WesternCape,
        Province::KwaZuluNatal,
        Province::EasternCape,
        Province::FreeState,
        Province::Limpopo,
        Province::Mpumalanga,
        Province::NorthWest,
        Province::NorthernCape,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Province::Gauteng => "Gauteng",
            Province::WesternCape => "Western Cape",
            Province::KwaZuluNatal => "KwaZulu-Natal",
            Province::EasternCape => "Eastern Cape",
            Province::FreeState => "Free State",
            Province::Limpopo => "Limpopo",
            Province::Mpumalanga => "Mpumalanga",
            Province::NorthWest => "North West",
            Province::NorthernCape => "Northern Cape",
        }
    }
}

impl std::fmt::Display for Province {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl Vehicle {
    /// Fabricate a vehicle with a random plate, category and province, placed
    /// at `location`.
    pub fn random<R: Rng + ?Sized>(rng: &mut R, location: Location) -> Self {
        Self {
            plate_number: super::plate::generate_plate(rng),
            vehicle_type: *VehicleType::ALL.choose(rng).unwrap_or(&VehicleType::Taxi),
            status: VehicleStatus::Active,
            province: *Province::ALL.choose(rng).unwrap_or(&Province::Gauteng),
            current_location: location,
        }
    }
}
