use glam::Vec3;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::state::{
    ColorAttribute, GradientDomain, PartVariants, VisualizationMode,
    DEFAULT_CAMERA_PATH,
};

/// Configuration restored by a reset, matching what the web client shows
/// after it reloads.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Defaults", inline)]
#[serde(default)]
pub struct DefaultsOptions {
    /// Wind speed.
    #[schemars(title = "Wind Speed", range(min = 0.0, max = 200.0))]
    pub wind_speed: f32,
    /// Colormap lower bound.
    pub gradient_min: f32,
    /// Colormap upper bound.
    pub gradient_max: f32,
    /// Layer shown once the reset's vehicle swap completes.
    pub mode: VisualizationMode,
    /// Field the layers are colored by.
    pub color_attribute: ColorAttribute,
    /// Viewport camera object.
    pub camera_path: String,
    /// Smoke probe emitter position fractions.
    pub smoke_probe_position: [f32; 3],
    /// Streamline seed position fractions.
    pub streamline_position: [f32; 3],
    /// Streamline seed radius fraction.
    #[schemars(range(min = 0.0, max = 1.0))]
    pub streamline_radius: f32,
    /// Slice offset applied whenever a slice axis is chosen.
    pub slice_position: f32,
    /// Rim variant index.
    pub rim: u32,
    /// Mirror variant index.
    pub mirror: u32,
    /// Spoiler variant index.
    pub spoiler: u32,
    /// Ride-height variant index.
    pub ride_height: u32,
}

impl DefaultsOptions {
    /// Default part variants.
    #[must_use]
    pub const fn parts(&self) -> PartVariants {
        PartVariants::new(self.rim, self.mirror, self.spoiler, self.ride_height)
    }

    /// Default colormap domain.
    #[must_use]
    pub const fn gradient(&self) -> GradientDomain {
        GradientDomain {
            min: self.gradient_min,
            max: self.gradient_max,
        }
    }

    /// Default smoke probe position as a vector.
    #[must_use]
    pub fn smoke_probe_position(&self) -> Vec3 {
        Vec3::from_array(self.smoke_probe_position)
    }

    /// Default streamline position as a vector.
    #[must_use]
    pub fn streamline_position(&self) -> Vec3 {
        Vec3::from_array(self.streamline_position)
    }
}

impl Default for DefaultsOptions {
    fn default() -> Self {
        Self {
            wind_speed: 75.0,
            gradient_min: 0.0,
            gradient_max: 150.0,
            mode: VisualizationMode::SmokeProbe,
            color_attribute: ColorAttribute::Velocity,
            camera_path: DEFAULT_CAMERA_PATH.to_owned(),
            smoke_probe_position: [0.0, -1.0, -1.0],
            streamline_position: [-1.0, 0.0, 0.0],
            streamline_radius: 0.5,
            slice_position: 0.0,
            rim: 0,
            mirror: 0,
            spoiler: 0,
            ride_height: 0,
        }
    }
}
