//! Frame-paced vehicle swap choreography.
//!
//! A selection flows through the [`RequestCoalescer`] (latest wins, gated by
//! the [`ReadinessGate`]) into a [`SwapSequence`], which the orchestrator
//! ticks once per frame until it reports [`SwapAction::Finish`]. At most one
//! sequence is in flight because the gate stays closed for its duration.

pub mod coalescer;
pub mod sequence;

pub use coalescer::{PendingSelection, ReadinessGate, RequestCoalescer};
pub use sequence::{SwapAction, SwapPhase, SwapSequence};
