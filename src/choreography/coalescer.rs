//! Latest-wins vehicle selection slot and the readiness gate.

use crate::state::{VehicleId, VisualizationMode};

/// A vehicle swap waiting for the gate to open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingSelection {
    /// Vehicle to switch to.
    pub vehicle: VehicleId,
    /// Layer to show once the swap finishes. `None` restores whatever was
    /// active when the swap began.
    pub restore_mode: Option<VisualizationMode>,
}

impl PendingSelection {
    /// Plain user selection.
    #[must_use]
    pub const fn vehicle(vehicle: VehicleId) -> Self {
        Self {
            vehicle,
            restore_mode: None,
        }
    }
}

/// Open while no swap sequence is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadinessGate {
    open: bool,
}

impl Default for ReadinessGate {
    fn default() -> Self {
        Self { open: true }
    }
}

impl ReadinessGate {
    /// Whether a new sequence may start.
    #[must_use]
    pub const fn is_open(self) -> bool {
        self.open
    }
}

/// Single-slot overwrite queue in front of the swap sequence.
///
/// [`submit`](Self::submit) replaces whatever is pending and never blocks.
/// [`poll`](Self::poll) hands out the pending selection only while the gate
/// is open, so a burst of submissions during a running swap collapses into
/// one follow-up carrying the last value.
pub struct RequestCoalescer {
    slot_in: triple_buffer::Input<Option<PendingSelection>>,
    slot_out: triple_buffer::Output<Option<PendingSelection>>,
    gate: ReadinessGate,
}

impl Default for RequestCoalescer {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestCoalescer {
    /// Empty slot, gate open.
    #[must_use]
    pub fn new() -> Self {
        let (slot_in, slot_out) = triple_buffer::triple_buffer(&None);
        Self {
            slot_in,
            slot_out,
            gate: ReadinessGate::default(),
        }
    }

    /// Overwrite the pending selection.
    pub fn submit(&mut self, selection: PendingSelection) {
        log::debug!("pending vehicle selection: {:?}", selection.vehicle);
        self.slot_in.write(Some(selection));
    }

    /// Take the pending selection if the gate is open.
    pub fn poll(&mut self) -> Option<PendingSelection> {
        if !self.gate.is_open() {
            return None;
        }
        let _ = self.slot_out.update();
        self.slot_out.output_buffer_mut().take()
    }

    /// Whether a selection is waiting, regardless of the gate.
    pub fn has_pending(&mut self) -> bool {
        let _ = self.slot_out.update();
        self.slot_out.output_buffer_mut().is_some()
    }

    /// Current gate state.
    #[must_use]
    pub fn gate(&self) -> ReadinessGate {
        self.gate
    }

    pub(crate) fn close_gate(&mut self) {
        self.gate.open = false;
    }

    pub(crate) fn open_gate(&mut self) {
        self.gate.open = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn burst_collapses_to_last_submission() {
        let mut c = RequestCoalescer::new();
        c.close_gate();
        for v in [VehicleId::Truck, VehicleId::Suv, VehicleId::Sedan] {
            c.submit(PendingSelection::vehicle(v));
        }
        assert_eq!(c.poll(), None);
        assert!(c.has_pending());

        c.open_gate();
        assert_eq!(c.poll(), Some(PendingSelection::vehicle(VehicleId::Sedan)));
        assert_eq!(c.poll(), None);
    }

    #[test]
    fn submission_after_peek_still_wins() {
        let mut c = RequestCoalescer::new();
        c.close_gate();
        c.submit(PendingSelection::vehicle(VehicleId::Truck));
        assert!(c.has_pending());
        c.submit(PendingSelection::vehicle(VehicleId::Electric));
        c.open_gate();
        assert_eq!(
            c.poll().map(|s| s.vehicle),
            Some(VehicleId::Electric)
        );
    }

    #[test]
    fn empty_slot_polls_nothing() {
        let mut c = RequestCoalescer::new();
        assert!(c.gate().is_open());
        assert_eq!(c.poll(), None);
        assert!(!c.has_pending());
    }
}
