//! Discrete configuration of the digital twin.
//!
//! A single [`ConfigurationState`] lives inside the [`ConfigStore`] for the
//! lifetime of the orchestrator. Everything here is plain data: the store
//! owns validation and the orchestrator owns the side effects.

pub mod catalog;
mod store;

use glam::Vec3;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
pub use store::{ConfigStore, Mutation};

/// Wind speed the process starts with, before the first reset.
pub const INITIAL_WIND_SPEED: f32 = 25.0;
/// Scene camera the twin is framed with after a reset.
pub const DEFAULT_CAMERA_PATH: &str = "/World/InteractiveCams/demoCam03";

// ---------------------------------------------------------------------------
// Vehicle
// ---------------------------------------------------------------------------

/// Selectable vehicle body.
///
/// Serialized as its hundred-aligned inference base id so transport
/// payloads match what the web client sends (`500` for the concept car).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize,
)]
#[serde(into = "u32", try_from = "u32")]
pub enum VehicleId {
    /// Pickup truck (base 100).
    Truck,
    /// Sport utility vehicle (base 200).
    Suv,
    /// Electric hatchback (base 300).
    Electric,
    /// Sedan (base 400).
    Sedan,
    /// Concept car (base 500), the default hero vehicle.
    #[default]
    Concept,
}

impl VehicleId {
    /// Every vehicle, in base-id order.
    pub const ALL: [Self; 5] = [
        Self::Truck,
        Self::Suv,
        Self::Electric,
        Self::Sedan,
        Self::Concept,
    ];

    /// Hundred-aligned base of this vehicle's inference id space.
    #[must_use]
    pub const fn base_id(self) -> u32 {
        match self {
            Self::Truck => 100,
            Self::Suv => 200,
            Self::Electric => 300,
            Self::Sedan => 400,
            Self::Concept => 500,
        }
    }

    /// Vehicle for an inference base id, if one exists.
    #[must_use]
    pub fn from_base_id(id: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.base_id() == id)
    }

    /// Display name used in logs.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Truck => "truck",
            Self::Suv => "suv",
            Self::Electric => "electric",
            Self::Sedan => "sedan",
            Self::Concept => "concept",
        }
    }
}

impl From<VehicleId> for u32 {
    fn from(v: VehicleId) -> Self {
        v.base_id()
    }
}

impl TryFrom<u32> for VehicleId {
    type Error = String;

    fn try_from(id: u32) -> Result<Self, Self::Error> {
        Self::from_base_id(id).ok_or_else(|| format!("unknown vehicle id {id}"))
    }
}

// ---------------------------------------------------------------------------
// Part variants
// ---------------------------------------------------------------------------

/// Interchangeable vehicle part with a selectable variant.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum PartCategory {
    /// Wheel rims.
    Rim,
    /// Side mirrors.
    Mirror,
    /// Rear spoiler.
    Spoiler,
    /// Suspension ride height.
    RideHeight,
}

impl PartCategory {
    /// Every part, in storage order.
    pub const ALL: [Self; 4] =
        [Self::Rim, Self::Mirror, Self::Spoiler, Self::RideHeight];

    const fn slot(self) -> usize {
        match self {
            Self::Rim => 0,
            Self::Mirror => 1,
            Self::Spoiler => 2,
            Self::RideHeight => 3,
        }
    }
}

/// Selected variant index per [`PartCategory`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PartVariants([u32; 4]);

impl PartVariants {
    /// Variants from explicit per-part indices.
    #[must_use]
    pub const fn new(rim: u32, mirror: u32, spoiler: u32, ride_height: u32) -> Self {
        Self([rim, mirror, spoiler, ride_height])
    }

    /// Selected index for `part`.
    #[must_use]
    pub const fn get(&self, part: PartCategory) -> u32 {
        self.0[part.slot()]
    }

    pub(crate) fn set(&mut self, part: PartCategory, index: u32) {
        self.0[part.slot()] = index;
    }

    /// `(part, index)` pairs in storage order.
    pub fn iter(&self) -> impl Iterator<Item = (PartCategory, u32)> + '_ {
        PartCategory::ALL.into_iter().map(|p| (p, self.get(p)))
    }
}

// ---------------------------------------------------------------------------
// Visualization
// ---------------------------------------------------------------------------

/// Exclusive CFD visualization layer.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum VisualizationMode {
    /// No layer shown.
    #[default]
    None,
    /// Flow smoke probes.
    SmokeProbe,
    /// Seeded streamlines.
    Streamline,
    /// IndeX volume rendering.
    IndexVolume,
    /// IndeX axis-aligned slice.
    IndexSlice,
}

impl VisualizationMode {
    /// The four real layers (everything except [`Self::None`]).
    pub const LAYERS: [Self; 4] = [
        Self::Streamline,
        Self::SmokeProbe,
        Self::IndexVolume,
        Self::IndexSlice,
    ];
}

/// Scalar field the visualizations are colored by.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum ColorAttribute {
    /// Velocity magnitude.
    #[default]
    Velocity,
    /// Static pressure.
    Pressure,
}

/// Axis of the IndeX slice plane.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum SliceAxis {
    /// Plane normal to X.
    X,
    /// Plane normal to Y.
    Y,
    /// Plane normal to Z.
    Z,
    /// No slice shown.
    #[default]
    Cleared,
}

/// Colormap domain shared by every visualization layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GradientDomain {
    /// Value mapped to the low end of the colormap.
    pub min: f32,
    /// Value mapped to the high end of the colormap.
    pub max: f32,
}

impl Default for GradientDomain {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: 150.0,
        }
    }
}

// ---------------------------------------------------------------------------
// ConfigurationState
// ---------------------------------------------------------------------------

/// Snapshot of everything the user can configure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigurationState {
    /// Currently displayed body.
    pub vehicle: VehicleId,
    /// Per-part variant indices, valid for `vehicle`.
    pub parts: PartVariants,
    /// Free-stream wind speed, never negative.
    pub wind_speed: f32,
    /// Active visualization layer.
    pub mode: VisualizationMode,
    /// Field the layers are colored by.
    pub color_attribute: ColorAttribute,
    /// Slice axis; only meaningful in [`VisualizationMode::IndexSlice`].
    pub slice_axis: SliceAxis,
    /// Slice offset along its axis, as a fraction in `[-1, 1]`.
    pub slice_position: f32,
    /// Colormap domain.
    pub gradient: GradientDomain,
    /// Streamline seed sphere position, per-axis fraction of its bounds.
    pub streamline_position: Vec3,
    /// Streamline seed sphere radius as a fraction of its allowed range.
    pub streamline_radius: f32,
    /// Smoke probe emitter position, per-axis fraction of its bounds.
    pub smoke_probe_position: Vec3,
    /// Scene camera the viewport is driven from.
    pub camera_path: String,
}

impl Default for ConfigurationState {
    fn default() -> Self {
        Self {
            vehicle: VehicleId::Concept,
            parts: PartVariants::default(),
            wind_speed: INITIAL_WIND_SPEED,
            mode: VisualizationMode::None,
            color_attribute: ColorAttribute::Velocity,
            slice_axis: SliceAxis::Cleared,
            slice_position: 0.0,
            gradient: GradientDomain::default(),
            streamline_position: Vec3::new(-1.0, 0.0, 0.0),
            streamline_radius: 0.5,
            smoke_probe_position: Vec3::new(0.0, -1.0, -1.0),
            camera_path: DEFAULT_CAMERA_PATH.to_owned(),
        }
    }
}

impl ConfigurationState {
    /// Serialize the snapshot for the transport layer.
    ///
    /// # Errors
    ///
    /// Returns the serializer's message if encoding fails.
    pub fn to_json(&self) -> Result<String, String> {
        serde_json::to_string(self).map_err(|e| e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vehicle_serializes_as_base_id() {
        let json = serde_json::to_string(&VehicleId::Sedan).unwrap();
        assert_eq!(json, "400");
        let parsed: VehicleId = serde_json::from_str("200").unwrap();
        assert_eq!(parsed, VehicleId::Suv);
    }

    #[test]
    fn unknown_vehicle_id_is_rejected() {
        assert!(serde_json::from_str::<VehicleId>("250").is_err());
        assert_eq!(VehicleId::from_base_id(600), None);
    }

    #[test]
    fn base_ids_are_hundred_aligned_and_distinct() {
        for (i, v) in VehicleId::ALL.iter().enumerate() {
            assert_eq!(v.base_id(), 100 * (i as u32 + 1));
        }
    }

    #[test]
    fn part_variants_index_by_category() {
        let mut parts = PartVariants::new(1, 0, 1, 2);
        assert_eq!(parts.get(PartCategory::Rim), 1);
        assert_eq!(parts.get(PartCategory::RideHeight), 2);
        parts.set(PartCategory::Mirror, 1);
        let collected: Vec<_> = parts.iter().collect();
        assert_eq!(
            collected,
            vec![
                (PartCategory::Rim, 1),
                (PartCategory::Mirror, 1),
                (PartCategory::Spoiler, 1),
                (PartCategory::RideHeight, 2),
            ]
        );
    }

    #[test]
    fn default_state_is_concept_with_no_layer() {
        let state = ConfigurationState::default();
        assert_eq!(state.vehicle, VehicleId::Concept);
        assert_eq!(state.mode, VisualizationMode::None);
        assert_eq!(state.wind_speed, INITIAL_WIND_SPEED);
        assert_eq!(state.gradient, GradientDomain { min: 0.0, max: 150.0 });
    }

    #[test]
    fn snapshot_json_carries_vehicle_id() {
        let json = ConfigurationState::default().to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["vehicle"], 500);
        assert_eq!(value["mode"], "none");
    }
}
