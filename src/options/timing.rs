use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Frame counts of the vehicle swap phases and the smoke-probe toggle.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[schemars(title = "Timing", inline)]
#[serde(default)]
pub struct TimingOptions {
    /// Frames to wait after hiding the visualization layers.
    #[schemars(title = "Disable Visuals", range(min = 0, max = 600))]
    pub disable_visuals_frames: u32,
    /// Frames for the platform to lower.
    #[schemars(title = "Platform Down", range(min = 0, max = 1200))]
    pub platform_down_frames: u32,
    /// Frames to wait after switching the body.
    #[schemars(title = "Swap Body", range(min = 0, max = 600))]
    pub swap_body_frames: u32,
    /// Frames for the platform to rise.
    #[schemars(title = "Platform Up", range(min = 0, max = 1200))]
    pub platform_up_frames: u32,
    /// Frames to wait after restoring the visualization layer.
    #[schemars(title = "Restore Visuals", range(min = 0, max = 600))]
    pub restore_visuals_frames: u32,
    /// Frames between disabling and re-enabling the smoke probes.
    #[schemars(title = "Smoke Probe Toggle", range(min = 0, max = 60))]
    pub smoke_probe_toggle_frames: u32,
    /// Frame rate the headless host ticks at (0 = unlimited).
    #[schemars(skip)]
    pub target_fps: u32,
}

impl TimingOptions {
    /// Total frames a vehicle swap suspends for.
    #[must_use]
    pub fn swap_frames(&self) -> u32 {
        self.disable_visuals_frames
            + self.platform_down_frames
            + self.swap_body_frames
            + self.platform_up_frames
            + self.restore_visuals_frames
    }
}

impl Default for TimingOptions {
    fn default() -> Self {
        Self {
            disable_visuals_frames: 30,
            platform_down_frames: 240,
            swap_body_frames: 60,
            platform_up_frames: 180,
            restore_visuals_frames: 10,
            smoke_probe_toggle_frames: 5,
            target_fps: 60,
        }
    }
}
