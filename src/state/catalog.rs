//! Variant tables and scene object paths.
//!
//! The stage ships a single hero body, the concept car, and every
//! selectable vehicle is displayed on it. Vehicles differ only in their
//! inference base id and in how many ride-height indices the inference
//! backend addresses for them. Variant indices are what the store and the
//! inference id use; the string values are what the scene's variant sets
//! expect.

use super::{PartCategory, VehicleId};

/// Scene object holding the body variant set.
pub const BODY_VARIANT_PRIM: &str = "/World/AllVehicles/HeroVehicles";
/// Variant set that selects the displayed body.
pub const BODY_VARIANT_SET: &str = "Variant_Set";
/// The only value of [`BODY_VARIANT_SET`] the stage carries.
pub const HERO_BODY_VARIANT: &str = "ConceptCar";

/// Object carrying the rim, mirror and spoiler variant sets.
pub const HERO_PARTS_PRIM: &str = "/World/AllVehicles/HeroVehicles/Concept_Car";
/// Object carrying the ride-height variant set.
pub const HERO_RIDE_HEIGHT_PRIM: &str =
    "/World/AllVehicles/HeroVehicles/Concept_Car/root/Body";

const RIMS: &[&str] = &["Standard", "Aero"];
const MIRRORS: &[&str] = &["On", "Off"];
const SPOILERS: &[&str] = &["Off", "On"];
const RIDE_HEIGHTS: &[&str] = &["Standard", "High"];

/// Ride-height indices the inference backend addresses for every vehicle
/// but the concept car (standard, low, high).
const FULL_RIDE_HEIGHT_COUNT: u32 = 3;

/// Ride-height index the web client uses for "high".
const UI_RIDE_HEIGHT_HIGH: u32 = 2;

/// Name of the variant set controlling `part`.
#[must_use]
pub const fn variant_set(part: PartCategory) -> &'static str {
    match part {
        PartCategory::Rim => "Rims",
        PartCategory::Mirror => "Mirrors",
        PartCategory::Spoiler => "Spoiler",
        PartCategory::RideHeight => "Ride_Height",
    }
}

/// Scene object carrying the variant set for `part`.
#[must_use]
pub const fn prim(part: PartCategory) -> &'static str {
    match part {
        PartCategory::RideHeight => HERO_RIDE_HEIGHT_PRIM,
        _ => HERO_PARTS_PRIM,
    }
}

/// Variant values the hero body carries for `part`.
#[must_use]
pub const fn values(part: PartCategory) -> &'static [&'static str] {
    match part {
        PartCategory::Rim => RIMS,
        PartCategory::Mirror => MIRRORS,
        PartCategory::Spoiler => SPOILERS,
        PartCategory::RideHeight => RIDE_HEIGHTS,
    }
}

/// Scene value for variant `index` of `part` on the hero body.
///
/// Indices the body does not carry (a non-concept "high" ride height) show
/// the first variant; the store keeps the index for the inference id.
#[must_use]
pub fn scene_value(part: PartCategory, index: u32) -> &'static str {
    let table = values(part);
    table.get(index as usize).copied().unwrap_or(table[0])
}

/// Inference-side description of one selectable vehicle.
#[derive(Debug)]
pub struct VehicleEntry {
    /// Vehicle this entry describes.
    pub vehicle: VehicleId,
    ride_height_count: u32,
}

const CATALOG: [VehicleEntry; 5] = [
    VehicleEntry {
        vehicle: VehicleId::Truck,
        ride_height_count: FULL_RIDE_HEIGHT_COUNT,
    },
    VehicleEntry {
        vehicle: VehicleId::Suv,
        ride_height_count: FULL_RIDE_HEIGHT_COUNT,
    },
    VehicleEntry {
        vehicle: VehicleId::Electric,
        ride_height_count: FULL_RIDE_HEIGHT_COUNT,
    },
    VehicleEntry {
        vehicle: VehicleId::Sedan,
        ride_height_count: FULL_RIDE_HEIGHT_COUNT,
    },
    VehicleEntry {
        vehicle: VehicleId::Concept,
        ride_height_count: RIDE_HEIGHTS.len() as u32,
    },
];

/// Catalog entry for `vehicle`.
#[must_use]
pub fn entry(vehicle: VehicleId) -> &'static VehicleEntry {
    match vehicle {
        VehicleId::Truck => &CATALOG[0],
        VehicleId::Suv => &CATALOG[1],
        VehicleId::Electric => &CATALOG[2],
        VehicleId::Sedan => &CATALOG[3],
        VehicleId::Concept => &CATALOG[4],
    }
}

impl VehicleEntry {
    /// Number of valid variant indices for `part`.
    #[must_use]
    pub const fn variant_count(&self, part: PartCategory) -> u32 {
        match part {
            PartCategory::RideHeight => self.ride_height_count,
            _ => values(part).len() as u32,
        }
    }
}

/// Translate a ride-height index from the web client's three-slot layout.
///
/// The concept car only ships "Standard" and "High", which the inference
/// backend addresses as 0 and 1, while the client always sends 2 for
/// "High".
#[must_use]
pub fn ride_height_from_ui(vehicle: VehicleId, ui_index: u32) -> u32 {
    if vehicle == VehicleId::Concept && ui_index == UI_RIDE_HEIGHT_HIGH {
        1
    } else {
        ui_index
    }
}
