//! Read-only queries and backend access for [`Orchestrator`].

use std::sync::mpsc;

use super::Orchestrator;
use crate::choreography::{ReadinessGate, SwapPhase};
use crate::error::OrchestratorError;
use crate::inference::dispatcher::VolumeUploadFlag;
use crate::inference::events::OrchestratorEvent;
use crate::inference::InferenceBackend;
use crate::options::Options;
use crate::scene::SceneBackend;
use crate::state::ConfigurationState;

// ── Configuration ──

impl<S: SceneBackend, B: InferenceBackend> Orchestrator<S, B> {
    /// Current configuration.
    #[must_use]
    pub fn state(&self) -> &ConfigurationState {
        self.store.state()
    }

    /// Configuration snapshot as JSON, for the transport layer.
    ///
    /// # Errors
    ///
    /// [`OrchestratorError::StateEncode`] if the snapshot fails to encode.
    pub fn state_json(&self) -> Result<String, OrchestratorError> {
        self.store
            .state()
            .to_json()
            .map_err(OrchestratorError::StateEncode)
    }

    /// Options the orchestrator was built with.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }
}

// ── Choreography ──

impl<S: SceneBackend, B: InferenceBackend> Orchestrator<S, B> {
    /// Gate guarding the start of a new swap.
    #[must_use]
    pub fn readiness_gate(&self) -> ReadinessGate {
        self.coalescer.gate()
    }

    /// Whether no swap is running.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.coalescer.gate().is_open()
    }

    /// Phase of the running swap, if any.
    #[must_use]
    pub fn swap_phase(&self) -> Option<SwapPhase> {
        self.swap.as_ref().map(|s| s.phase())
    }

    /// Whether a vehicle selection is waiting for the gate.
    pub fn has_pending_selection(&mut self) -> bool {
        self.coalescer.has_pending()
    }

    /// Whether the smoke probes are waiting to be re-enabled.
    #[must_use]
    pub fn is_toggle_pending(&self) -> bool {
        self.modes.is_toggle_pending()
    }

    /// Frames seen by [`on_frame`](Self::on_frame).
    #[must_use]
    pub fn frame(&self) -> u64 {
        self.frame
    }
}

// ── Renderer-facing outputs ──

impl<S: SceneBackend, B: InferenceBackend> Orchestrator<S, B> {
    /// Streamline seeds per grid side for the current radius.
    #[must_use]
    pub fn seed_grid(&self) -> u32 {
        self.seed_grid
    }

    /// Flag raised after every successful inference request.
    #[must_use]
    pub fn upload_flag(&self) -> VolumeUploadFlag {
        self.dispatcher.upload_flag()
    }

    /// Point-cloud scale sent with requests that do not name their own.
    #[must_use]
    pub fn default_point_scale(&self) -> f32 {
        self.dispatcher.default_point_scale()
    }

    /// Receive an event for every dispatched inference request.
    pub fn subscribe(&mut self) -> mpsc::Receiver<OrchestratorEvent> {
        self.dispatcher.subscribe()
    }
}

// ── Backends ──

impl<S: SceneBackend, B: InferenceBackend> Orchestrator<S, B> {
    /// The scene backend.
    #[must_use]
    pub fn scene(&self) -> &S {
        &self.scene
    }

    /// The scene backend, mutably. Changes made here bypass the store.
    pub fn scene_mut(&mut self) -> &mut S {
        &mut self.scene
    }

    /// The inference backend.
    #[must_use]
    pub fn inference(&self) -> &B {
        self.dispatcher.backend()
    }

    /// The inference backend, mutably.
    pub fn inference_mut(&mut self) -> &mut B {
        self.dispatcher.backend_mut()
    }
}
