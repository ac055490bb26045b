//! In-process inference backend that records what it is asked for.

use super::InferenceBackend;
use crate::options::InferenceOptions;

/// One request as received by [`LoopbackInference`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecordedRequest {
    /// Composite configuration id.
    pub id: u32,
    /// Rounded wind speed.
    pub param: f32,
    /// Point-cloud scale.
    pub scale: f32,
}

/// Backend that never leaves the process.
#[derive(Debug)]
pub struct LoopbackInference {
    reachable: bool,
    connected: bool,
    connect_attempts: u32,
    requests: Vec<RecordedRequest>,
}

impl Default for LoopbackInference {
    fn default() -> Self {
        Self::new()
    }
}

impl LoopbackInference {
    /// Backend that accepts connections.
    #[must_use]
    pub fn new() -> Self {
        Self {
            reachable: true,
            connected: false,
            connect_attempts: 0,
            requests: Vec::new(),
        }
    }

    /// Backend that refuses every connection attempt.
    #[must_use]
    pub fn unreachable() -> Self {
        Self {
            reachable: false,
            ..Self::new()
        }
    }

    /// Make later connection attempts succeed or fail.
    pub fn set_reachable(&mut self, reachable: bool) {
        self.reachable = reachable;
    }

    /// Simulate the service going away.
    pub fn drop_connection(&mut self) {
        self.connected = false;
    }

    /// Requests received so far.
    #[must_use]
    pub fn requests(&self) -> &[RecordedRequest] {
        &self.requests
    }

    /// Most recent request.
    #[must_use]
    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.requests.last().copied()
    }

    /// Number of [`InferenceBackend::connect`] calls.
    #[must_use]
    pub fn connect_attempts(&self) -> u32 {
        self.connect_attempts
    }
}

impl InferenceBackend for LoopbackInference {
    fn connect(&mut self, options: &InferenceOptions) -> bool {
        self.connect_attempts += 1;
        self.connected = self.reachable;
        log::debug!(
            "loopback inference connect (from_files={}, reachable={})",
            options.from_files,
            self.reachable
        );
        self.connected
    }

    fn is_connected(&self) -> bool {
        self.connected
    }

    fn request(&mut self, id: u32, param: f32, scale: f32) {
        self.requests.push(RecordedRequest { id, param, scale });
    }
}
