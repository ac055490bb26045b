use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Inference backend connection settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Inference", inline)]
#[serde(default)]
pub struct InferenceOptions {
    /// Serve precomputed results from disk instead of the live service.
    pub from_files: bool,
    /// Signed-distance window the backend prunes sample points to.
    pub distance_range: [f32; 2],
    /// Point-cloud scale sent with a wind-speed change when the caller
    /// gives none.
    #[schemars(title = "Point Scale", range(min = 0.01, max = 10.0))]
    pub point_scale: f32,
}

impl Default for InferenceOptions {
    fn default() -> Self {
        Self {
            from_files: false,
            distance_range: [-10.0, 0.0],
            point_scale: 1.0,
        }
    }
}
