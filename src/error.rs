//! Crate-level error types.

use std::fmt;

use crate::scene::SceneError;

/// Errors produced by the orchestrator's request surface.
///
/// Backend connectivity problems are deliberately absent: the inference
/// dispatcher degrades to a logged warning instead of failing the caller.
#[derive(Debug)]
pub enum OrchestratorError {
    /// A referenced scene object, attribute, variant set or relationship is
    /// missing.
    Scene(SceneError),
    /// Rejected before any state was mutated.
    InvalidInput(String),
    /// Malformed request payload from the transport layer.
    RequestParse(String),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// The configuration snapshot could not be encoded as JSON.
    StateEncode(String),
    /// Generic I/O failure.
    Io(std::io::Error),
}

impl OrchestratorError {
    /// Shorthand for an [`OrchestratorError::InvalidInput`].
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}

impl fmt::Display for OrchestratorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scene(e) => write!(f, "scene integrity error: {e}"),
            Self::InvalidInput(msg) => write!(f, "invalid input: {msg}"),
            Self::RequestParse(msg) => {
                write!(f, "request parse error: {msg}")
            }
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::StateEncode(msg) => {
                write!(f, "state encode error: {msg}")
            }
            Self::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for OrchestratorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Scene(e) => Some(e),
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<SceneError> for OrchestratorError {
    fn from(e: SceneError) -> Self {
        Self::Scene(e)
    }
}

impl From<std::io::Error> for OrchestratorError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
