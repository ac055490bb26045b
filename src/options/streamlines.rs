use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Streamline seed sphere sizing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Streamlines", inline)]
#[serde(default)]
pub struct StreamlineOptions {
    /// Seed sphere radius at fraction 0.
    #[schemars(title = "Min Radius", range(min = 1.0, max = 100.0))]
    pub radius_min: f32,
    /// Seed sphere radius at fraction 1.
    #[schemars(title = "Max Radius", range(min = 1.0, max = 100.0))]
    pub radius_max: f32,
    /// Seed count at the minimum radius.
    #[schemars(title = "Seed Density", range(min = 1, max = 400))]
    pub seed_density: u32,
}

impl StreamlineOptions {
    /// Seed sphere radius for a fraction in `[0, 1]`.
    #[must_use]
    pub fn radius(&self, pct: f32) -> f32 {
        self.radius_min + pct * (self.radius_max - self.radius_min)
    }

    /// Seeds per grid side so that seed density per area stays constant as
    /// the sphere grows.
    #[must_use]
    pub fn seed_grid(&self, radius: f32) -> u32 {
        let ratio = radius / self.radius_min;
        (self.seed_density as f32 * ratio * ratio).sqrt().floor() as u32
    }
}

impl Default for StreamlineOptions {
    fn default() -> Self {
        Self {
            radius_min: 10.0,
            radius_max: 30.0,
            seed_density: 25,
        }
    }
}
