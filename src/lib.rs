// -- Lint policy ---------------------------------------------------------
// Crate-wide lint levels live in the workspace `[lints]` tables of
// Cargo.toml; only lints without a Cargo.toml form are set here.
#![deny(rustdoc::broken_intra_doc_links)]

//! Frame-paced configuration orchestrator for a vehicle wind-tunnel digital
//! twin.
//!
//! The orchestrator owns the user's configuration (vehicle, part variants,
//! wind speed, visualization layer, colormap) and turns every change into
//! calls against two external systems: a rendered scene graph
//! ([`scene::SceneBackend`]) and a CFD inference service
//! ([`inference::InferenceBackend`]).
//!
//! # Key entry points
//!
//! - [`engine::Orchestrator`] - request surface and per-frame driver
//! - [`engine::command::Request`] - the JSON request vocabulary
//! - [`state::ConfigStore`] - single owner of the configuration
//! - [`options::Options`] - timing, defaults and inference settings (TOML)
//!
//! # Architecture
//!
//! Everything runs on the host's frame thread. Vehicle selections go
//! through a latest-wins [`choreography::RequestCoalescer`] and run as a
//! [`choreography::SwapSequence`] that the host advances by calling
//! [`engine::Orchestrator::on_frame`] once per frame: hide the layers, lower
//! the platform, switch the body, raise the platform, restore the layer.
//! Visualization layers are mutually exclusive and switched by
//! [`modes::ModeStateMachine`].

pub mod choreography;
pub mod engine;
pub mod error;
pub mod inference;
pub mod modes;
pub mod options;
pub mod scene;
pub mod state;
pub mod util;

pub use engine::command::Request;
pub use engine::Orchestrator;
pub use error::OrchestratorError;
pub use options::Options;
