use glam::Vec3;

use super::catalog;
use super::{
    ColorAttribute, ConfigurationState, GradientDomain, PartCategory,
    PartVariants, SliceAxis, VehicleId, VisualizationMode,
};
use crate::error::OrchestratorError;

/// A single, total change to the configuration.
///
/// Every variant is validated in full before anything is written, so a
/// rejected mutation leaves the state untouched.
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    /// Switch the displayed body. Re-clamps the ride height.
    SelectVehicle(VehicleId),
    /// Select a variant for one part of the current vehicle.
    SetPartVariant {
        /// Part to change.
        part: PartCategory,
        /// Internal (already UI-translated) variant index.
        index: u32,
    },
    /// Replace all part variants, re-clamping the ride height.
    ResetPartVariants(PartVariants),
    /// Free-stream wind speed.
    SetWindSpeed(f32),
    /// Active visualization layer.
    SetMode(VisualizationMode),
    /// Field the layers are colored by.
    SetColorAttribute(ColorAttribute),
    /// Slice plane axis.
    SetSliceAxis(SliceAxis),
    /// Slice offset fraction.
    SetSlicePosition(f32),
    /// Colormap domain.
    SetGradient(GradientDomain),
    /// Streamline seed position fractions.
    SetStreamlinePosition(Vec3),
    /// Streamline seed radius fraction.
    SetStreamlineRadius(f32),
    /// Smoke probe emitter position fractions.
    SetSmokeProbePosition(Vec3),
    /// Viewport camera object.
    SetCamera(String),
}

/// Owner of the process-wide [`ConfigurationState`].
///
/// [`apply`](Self::apply) is the only path through which the state
/// changes. Exclusive access (`&mut self`) serializes mutations.
#[derive(Debug, Default)]
pub struct ConfigStore {
    state: ConfigurationState,
}

impl ConfigStore {
    /// Store holding the documented startup defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Owned snapshot of the current state.
    #[must_use]
    pub fn get(&self) -> ConfigurationState {
        self.state.clone()
    }

    /// Borrow the current state.
    #[must_use]
    pub fn state(&self) -> &ConfigurationState {
        &self.state
    }

    /// Validate and commit a mutation.
    ///
    /// # Errors
    ///
    /// Returns [`OrchestratorError::InvalidInput`] when the mutation is out
    /// of range for the current state; nothing is written in that case.
    pub fn apply(&mut self, mutation: Mutation) -> Result<(), OrchestratorError> {
        let state = &mut self.state;
        match mutation {
            Mutation::SelectVehicle(vehicle) => {
                state.vehicle = vehicle;
                clamp_ride_height(state);
            }
            Mutation::SetPartVariant { part, index } => {
                let count = catalog::entry(state.vehicle).variant_count(part);
                if index >= count {
                    return Err(OrchestratorError::invalid(format!(
                        "{part:?} variant {index} out of range for {} \
                         ({count} variants)",
                        state.vehicle.name()
                    )));
                }
                state.parts.set(part, index);
            }
            Mutation::ResetPartVariants(parts) => {
                let entry = catalog::entry(state.vehicle);
                for (part, index) in parts.iter() {
                    if part != PartCategory::RideHeight
                        && index >= entry.variant_count(part)
                    {
                        return Err(OrchestratorError::invalid(format!(
                            "default {part:?} variant {index} out of range"
                        )));
                    }
                }
                state.parts = parts;
                clamp_ride_height(state);
            }
            Mutation::SetWindSpeed(speed) => {
                if !speed.is_finite() || speed < 0.0 {
                    return Err(OrchestratorError::invalid(format!(
                        "wind speed must be a non-negative number, got {speed}"
                    )));
                }
                state.wind_speed = speed;
            }
            Mutation::SetMode(mode) => state.mode = mode,
            Mutation::SetColorAttribute(attr) => state.color_attribute = attr,
            Mutation::SetSliceAxis(axis) => state.slice_axis = axis,
            Mutation::SetSlicePosition(pct) => {
                state.slice_position = unit_fraction("slice position", pct)?;
            }
            Mutation::SetGradient(domain) => {
                if !domain.min.is_finite()
                    || !domain.max.is_finite()
                    || domain.min > domain.max
                {
                    return Err(OrchestratorError::invalid(format!(
                        "gradient domain [{}, {}] is not an ordered range",
                        domain.min, domain.max
                    )));
                }
                state.gradient = domain;
            }
            Mutation::SetStreamlinePosition(pct) => {
                state.streamline_position =
                    unit_cube("streamline position", pct)?;
            }
            Mutation::SetStreamlineRadius(pct) => {
                if !(0.0..=1.0).contains(&pct) {
                    return Err(OrchestratorError::invalid(format!(
                        "streamline radius {pct} outside [0, 1]"
                    )));
                }
                state.streamline_radius = pct;
            }
            Mutation::SetSmokeProbePosition(pct) => {
                state.smoke_probe_position =
                    unit_cube("smoke probe position", pct)?;
            }
            Mutation::SetCamera(path) => {
                if path.is_empty() {
                    return Err(OrchestratorError::invalid(
                        "camera path is empty",
                    ));
                }
                state.camera_path = path;
            }
        }
        Ok(())
    }
}

/// Ride height falls back to the first variant when the vehicle has fewer.
fn clamp_ride_height(state: &mut ConfigurationState) {
    let count = catalog::entry(state.vehicle)
        .variant_count(PartCategory::RideHeight);
    if state.parts.get(PartCategory::RideHeight) >= count {
        state.parts.set(PartCategory::RideHeight, 0);
    }
}

fn unit_fraction(what: &str, pct: f32) -> Result<f32, OrchestratorError> {
    if (-1.0..=1.0).contains(&pct) {
        Ok(pct)
    } else {
        Err(OrchestratorError::invalid(format!(
            "{what} {pct} outside [-1, 1]"
        )))
    }
}

fn unit_cube(what: &str, pct: Vec3) -> Result<Vec3, OrchestratorError> {
    for c in pct.to_array() {
        let _ = unit_fraction(what, c)?;
    }
    Ok(pct)
}
