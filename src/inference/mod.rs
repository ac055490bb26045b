//! Composite inference id encoding and the backend seam.
//!
//! The inference service addresses its precomputed results by a single
//! integer: a hundred-aligned vehicle base plus a four-bit offset built from
//! the part variants. [`encode`] is the only place that mapping lives.

pub mod dispatcher;
pub mod events;
pub mod loopback;

use serde::{Deserialize, Serialize};

use crate::options::InferenceOptions;
use crate::state::{ConfigurationState, PartCategory, VehicleId};

/// Number of distinct variant offsets within one vehicle's id space.
pub const VARIANT_OFFSET_SPAN: u32 = 16;

/// One request for precomputed flow data.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InferenceRequest {
    /// Composite configuration id.
    pub id: u32,
    /// Wind speed, rounded to the nearest integer.
    pub param: f32,
}

impl InferenceRequest {
    /// Vehicle whose id space `id` falls into.
    #[must_use]
    pub fn vehicle(&self) -> Option<VehicleId> {
        VehicleId::from_base_id(self.id / 100 * 100)
    }

    /// Variant offset within the vehicle's id space.
    #[must_use]
    pub const fn offset(&self) -> u32 {
        self.id % 100
    }
}

/// Map a configuration snapshot to its inference request.
///
/// `id = base + mirror + 2*spoiler + 4*rim + 8*ride_height` and
/// `param = round(wind_speed)`.
#[must_use]
pub fn encode(state: &ConfigurationState) -> InferenceRequest {
    let parts = &state.parts;
    let offset = parts.get(PartCategory::Mirror)
        + 2 * parts.get(PartCategory::Spoiler)
        + 4 * parts.get(PartCategory::Rim)
        + 8 * parts.get(PartCategory::RideHeight);
    InferenceRequest {
        id: state.vehicle.base_id() + offset,
        param: state.wind_speed.round(),
    }
}

/// Connection-oriented client of the inference service.
pub trait InferenceBackend {
    /// Establish (or re-establish) the connection. Returns whether the
    /// backend is now reachable.
    fn connect(&mut self, options: &InferenceOptions) -> bool;

    /// Whether the last connection attempt succeeded and is still live.
    fn is_connected(&self) -> bool;

    /// Ask for the results of configuration `id` at wind speed `param`,
    /// with the point cloud scaled by `scale`.
    fn request(&mut self, id: u32, param: f32, scale: f32);
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::state::PartVariants;

    fn state(vehicle: VehicleId, parts: PartVariants, wind: f32) -> ConfigurationState {
        ConfigurationState {
            vehicle,
            parts,
            wind_speed: wind,
            ..ConfigurationState::default()
        }
    }

    #[test]
    fn weights_match_part_bits() {
        let s = state(VehicleId::Sedan, PartVariants::new(1, 1, 1, 1), 75.0);
        assert_eq!(encode(&s).id, 400 + 1 + 2 + 4 + 8);
        let s = state(VehicleId::Concept, PartVariants::new(0, 0, 1, 0), 75.0);
        assert_eq!(encode(&s).id, 502);
    }

    #[test]
    fn param_rounds_wind_speed() {
        let s = state(VehicleId::Truck, PartVariants::default(), 74.6);
        assert_eq!(encode(&s).param, 75.0);
        let s = state(VehicleId::Truck, PartVariants::default(), 74.4);
        assert_eq!(encode(&s).param, 74.0);
    }

    #[test]
    fn injective_within_each_vehicle() {
        for v in VehicleId::ALL {
            let mut seen = HashSet::new();
            for rim in 0..2 {
                for mirror in 0..2 {
                    for spoiler in 0..2 {
                        for ride in 0..2 {
                            let parts = PartVariants::new(rim, mirror, spoiler, ride);
                            let req = encode(&state(v, parts, 50.0));
                            assert!(req.offset() < VARIANT_OFFSET_SPAN);
                            assert_eq!(req.vehicle(), Some(v));
                            assert!(seen.insert(req.id), "collision at {}", req.id);
                        }
                    }
                }
            }
            assert_eq!(seen.len(), VARIANT_OFFSET_SPAN as usize);
        }
    }

    #[test]
    fn encoding_is_deterministic() {
        let s = state(VehicleId::Electric, PartVariants::new(1, 0, 1, 1), 33.3);
        assert_eq!(encode(&s), encode(&s.clone()));
    }
}
