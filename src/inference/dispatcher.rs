//! Connection-checking front end of the inference backend.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};

use super::events::{EventBus, OrchestratorEvent};
use super::{encode, InferenceBackend, InferenceRequest};
use crate::options::InferenceOptions;
use crate::state::ConfigurationState;

/// Flag the renderer polls to know the volumetric data must be re-uploaded.
///
/// Cloning shares the flag.
#[derive(Debug, Clone, Default)]
pub struct VolumeUploadFlag(Arc<AtomicBool>);

impl VolumeUploadFlag {
    pub(crate) fn raise(&self) {
        self.0.store(true, Ordering::Release);
    }

    /// Whether a re-upload is pending, without consuming it.
    #[must_use]
    pub fn is_raised(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    /// Consume the pending re-upload, if any.
    pub fn take(&self) -> bool {
        self.0.swap(false, Ordering::AcqRel)
    }
}

/// Result of one dispatch attempt.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DispatchOutcome {
    /// The request reached the backend.
    Sent(InferenceRequest),
    /// Backend unreachable even after one reconnect; nothing was sent.
    Unreachable,
}

/// Sends encoded requests, reconnecting lazily.
///
/// Connectivity loss never surfaces as an error: the visible configuration
/// keeps changing and a warning is logged.
pub struct InferenceDispatcher<B> {
    backend: B,
    options: InferenceOptions,
    upload_flag: VolumeUploadFlag,
    events: EventBus,
}

impl<B: InferenceBackend> InferenceDispatcher<B> {
    /// Wrap `backend`. No connection is attempted until
    /// [`connect`](Self::connect) or the first dispatch.
    pub fn new(backend: B, options: InferenceOptions) -> Self {
        Self {
            backend,
            options,
            upload_flag: VolumeUploadFlag::default(),
            events: EventBus::new(),
        }
    }

    /// Attempt a (re)connect, logging failure.
    pub fn connect(&mut self) -> bool {
        let connected = self.backend.connect(&self.options);
        if connected {
            log::info!("inference backend connected");
        } else {
            log::warn!("could not acquire inference backend");
        }
        connected
    }

    /// Point-cloud scale sent when a dispatch does not name its own.
    #[must_use]
    pub fn default_point_scale(&self) -> f32 {
        self.options.point_scale
    }

    /// Encode `state` and send it at the configured point-cloud scale.
    pub fn dispatch(&mut self, state: &ConfigurationState) -> DispatchOutcome {
        self.request(encode(state), self.options.point_scale)
    }

    /// Encode `state` and send it at `point_scale`, for this request only.
    pub fn dispatch_scaled(
        &mut self,
        state: &ConfigurationState,
        point_scale: f32,
    ) -> DispatchOutcome {
        self.request(encode(state), point_scale)
    }

    /// Send an already-encoded request.
    pub fn request(
        &mut self,
        request: InferenceRequest,
        point_scale: f32,
    ) -> DispatchOutcome {
        if !self.backend.is_connected() && !self.connect() {
            log::warn!(
                "inference unreachable, dropping request {} at {}",
                request.id,
                request.param
            );
            return DispatchOutcome::Unreachable;
        }
        self.backend
            .request(request.id, request.param, point_scale);
        self.upload_flag.raise();
        log::info!(
            "requesting inference for config {} at speed {}",
            request.id,
            request.param
        );
        self.events
            .publish(&OrchestratorEvent::inference_started(request));
        DispatchOutcome::Sent(request)
    }

    /// Register an observer of dispatched requests.
    pub fn subscribe(&mut self) -> mpsc::Receiver<OrchestratorEvent> {
        self.events.subscribe()
    }

    /// Shared re-upload flag.
    #[must_use]
    pub fn upload_flag(&self) -> VolumeUploadFlag {
        self.upload_flag.clone()
    }

    /// The wrapped backend.
    #[must_use]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// The wrapped backend, mutably.
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }
}
