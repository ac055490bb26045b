//! The orchestrator's complete request vocabulary.
//!
//! Every operation the web client can issue is a [`Request`]. The transport
//! layer decodes JSON into requests with [`Request::from_json`] and passes
//! them to [`Orchestrator::execute`](super::Orchestrator::execute).

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::OrchestratorError;
use crate::state::{
    ColorAttribute, PartCategory, SliceAxis, VehicleId, VisualizationMode,
};

/// A user-facing operation, tagged by `"op"` on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Request {
    /// Restore the documented defaults.
    Reset,

    // ── Vehicle ──
    /// Queue a vehicle swap (latest wins).
    SelectVehicle {
        /// Vehicle base id (100..500).
        vehicle: VehicleId,
    },
    /// Select a part variant, using the web client's indexing.
    SetPartVariant {
        /// Part to change.
        part: PartCategory,
        /// Variant index as sent by the client.
        index: u32,
    },

    // ── Visualization ──
    /// Make one layer exclusive.
    SetMode {
        /// Layer to show.
        mode: VisualizationMode,
    },
    /// Field the layers are colored by.
    SetColorAttribute {
        /// Velocity or pressure.
        attribute: ColorAttribute,
    },
    /// Slice plane axis (slice mode only, `cleared` always accepted).
    SetSliceAxis {
        /// Axis, or `cleared`.
        axis: SliceAxis,
    },
    /// Slice offset along its axis.
    SetSlicePosition {
        /// Fraction in `[-1, 1]`.
        pct: f32,
    },
    /// Colormap domain.
    SetGradientScale {
        /// Low end.
        min: f32,
        /// High end.
        max: f32,
    },

    // ── Flow ──
    /// Free-stream wind speed; re-requests inference.
    SetWindSpeed {
        /// Non-negative speed.
        speed: f32,
        /// Point-cloud scale; the configured default when absent.
        #[serde(default)]
        point_scale: Option<f32>,
    },
    /// Streamline seed position.
    SetStreamlinePosition {
        /// Per-axis fractions in `[-1, 1]`.
        pct: Vec3,
    },
    /// Streamline seed radius.
    SetStreamlineRadius {
        /// Fraction in `[0, 1]`.
        pct: f32,
    },
    /// Smoke probe emitter position.
    SetSmokeProbePosition {
        /// Per-axis fractions in `[-1, 1]`.
        pct: Vec3,
    },

    // ── Camera ──
    /// Drive the viewport from a scene camera.
    SetCamera {
        /// Camera object path.
        path: String,
    },
}

impl Request {
    /// Decode one JSON request.
    ///
    /// # Errors
    ///
    /// [`OrchestratorError::RequestParse`] for malformed payloads, unknown
    /// operations and unknown vehicle ids.
    pub fn from_json(json: &str) -> Result<Self, OrchestratorError> {
        serde_json::from_str(json)
            .map_err(|e| OrchestratorError::RequestParse(e.to_string()))
    }
}
