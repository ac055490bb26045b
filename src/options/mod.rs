//! Orchestrator options with TOML preset support.
//!
//! Frame counts, reset defaults, streamline sizing and the inference
//! connection are consolidated here. Every section uses `#[serde(default)]`
//! so a partial TOML file (e.g. only overriding `[timing]`) works.

mod defaults;
mod inference;
mod streamlines;
mod timing;

use std::path::Path;

pub use defaults::DefaultsOptions;
pub use inference::InferenceOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
pub use streamlines::StreamlineOptions;
pub use timing::TimingOptions;

use crate::error::OrchestratorError;

/// Top-level options container.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Choreography frame counts.
    pub timing: TimingOptions,
    /// Values restored by a reset.
    pub defaults: DefaultsOptions,
    /// Streamline seed sphere sizing.
    pub streamlines: StreamlineOptions,
    /// Inference backend connection.
    pub inference: InferenceOptions,
}

impl Options {
    /// Generate JSON Schema describing the options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// [`OrchestratorError::Io`] if the file cannot be read,
    /// [`OrchestratorError::OptionsParse`] if it is malformed or
    /// inconsistent.
    pub fn load(path: &Path) -> Result<Self, OrchestratorError> {
        let content =
            std::fs::read_to_string(path).map_err(OrchestratorError::Io)?;
        Self::from_toml(&content)
    }

    /// Parse options from TOML text.
    ///
    /// # Errors
    ///
    /// [`OrchestratorError::OptionsParse`] on malformed or inconsistent
    /// values.
    pub fn from_toml(content: &str) -> Result<Self, OrchestratorError> {
        let options: Self = toml::from_str(content)
            .map_err(|e| OrchestratorError::OptionsParse(e.to_string()))?;
        options.validate()?;
        Ok(options)
    }

    /// Save options to a TOML file (pretty-printed).
    ///
    /// # Errors
    ///
    /// [`OrchestratorError::OptionsParse`] if serialization fails,
    /// [`OrchestratorError::Io`] if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), OrchestratorError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| OrchestratorError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(OrchestratorError::Io)?;
        }
        std::fs::write(path, content).map_err(OrchestratorError::Io)
    }

    fn validate(&self) -> Result<(), OrchestratorError> {
        let d = &self.defaults;
        if d.gradient_min > d.gradient_max {
            return Err(OrchestratorError::OptionsParse(format!(
                "defaults.gradient_min {} exceeds gradient_max {}",
                d.gradient_min, d.gradient_max
            )));
        }
        if d.wind_speed < 0.0 {
            return Err(OrchestratorError::OptionsParse(format!(
                "defaults.wind_speed {} is negative",
                d.wind_speed
            )));
        }
        let scale = self.inference.point_scale;
        if !scale.is_finite() || scale <= 0.0 {
            return Err(OrchestratorError::OptionsParse(format!(
                "inference.point_scale {scale} must be positive"
            )));
        }
        let s = &self.streamlines;
        if s.radius_min <= 0.0 || s.radius_min > s.radius_max {
            return Err(OrchestratorError::OptionsParse(format!(
                "streamlines radius range [{}, {}] is invalid",
                s.radius_min, s.radius_max
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::VisualizationMode;

    #[test]
    fn default_round_trips_through_toml() {
        let opts = Options::default();
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed = Options::from_toml(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r"
[timing]
platform_down_frames = 12
";
        let opts = Options::from_toml(toml_str).unwrap();
        assert_eq!(opts.timing.platform_down_frames, 12);
        assert_eq!(opts.timing.disable_visuals_frames, 30);
        assert_eq!(opts.defaults.wind_speed, 75.0);
        assert_eq!(opts.defaults.mode, VisualizationMode::SmokeProbe);
    }

    #[test]
    fn documented_phase_frames_total_520() {
        assert_eq!(TimingOptions::default().swap_frames(), 520);
    }

    #[test]
    fn inverted_gradient_is_rejected() {
        let toml_str = r"
[defaults]
gradient_min = 10.0
gradient_max = 1.0
";
        assert!(matches!(
            Options::from_toml(toml_str),
            Err(OrchestratorError::OptionsParse(_))
        ));
    }

    #[test]
    fn schema_names_sections() {
        let schema = serde_json::to_value(Options::json_schema()).unwrap();
        let props = &schema["properties"];
        assert!(props.get("timing").is_some());
        assert!(props.get("inference").is_some());
    }
}
