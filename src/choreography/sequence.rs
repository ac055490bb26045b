//! Frame-counted phases of a vehicle swap.

use crate::options::TimingOptions;
use crate::state::{VehicleId, VisualizationMode};

/// Suspension phase of a swap, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwapPhase {
    /// Layers hidden, waiting for the scene to settle.
    DisableVisuals,
    /// Platform lowering.
    PlatformDown,
    /// Body switched, waiting before the platform rises.
    SwapBody,
    /// Platform rising.
    PlatformUp,
    /// Layer restored, waiting before the gate reopens.
    RestoreVisuals,
}

impl SwapPhase {
    /// Every phase, in order.
    pub const ORDER: [Self; 5] = [
        Self::DisableVisuals,
        Self::PlatformDown,
        Self::SwapBody,
        Self::PlatformUp,
        Self::RestoreVisuals,
    ];

    /// Frames this phase suspends for.
    #[must_use]
    pub fn frames(self, timing: &TimingOptions) -> u32 {
        match self {
            Self::DisableVisuals => timing.disable_visuals_frames,
            Self::PlatformDown => timing.platform_down_frames,
            Self::SwapBody => timing.swap_body_frames,
            Self::PlatformUp => timing.platform_up_frames,
            Self::RestoreVisuals => timing.restore_visuals_frames,
        }
    }

    const fn next(self) -> Option<Self> {
        match self {
            Self::DisableVisuals => Some(Self::PlatformDown),
            Self::PlatformDown => Some(Self::SwapBody),
            Self::SwapBody => Some(Self::PlatformUp),
            Self::PlatformUp => Some(Self::RestoreVisuals),
            Self::RestoreVisuals => None,
        }
    }
}

/// Scene work due when a phase's wait runs out.
///
/// Hiding the layers belongs to the synchronous prologue and has no action
/// here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwapAction {
    /// Fire the platform trigger to lower the vehicle.
    PlatformDown,
    /// Select the body variant for the vehicle.
    SwapBody(VehicleId),
    /// Fire the platform trigger again to raise it.
    PlatformUp,
    /// Re-activate the layer shown before the swap.
    RestoreVisuals(VisualizationMode),
    /// Sequence complete; reopen the gate.
    Finish,
}

/// Tick-driven swap state machine.
///
/// Created once the synchronous prologue (commit, variants, inference,
/// layers hidden) has run, i.e. already inside
/// [`SwapPhase::DisableVisuals`]. Each [`tick`](Self::tick) consumes one
/// frame; a phase waits at least one frame.
#[derive(Debug, Clone)]
pub struct SwapSequence {
    vehicle: VehicleId,
    restore_mode: VisualizationMode,
    phase: SwapPhase,
    remaining: u32,
    elapsed: u32,
    timing: TimingOptions,
}

impl SwapSequence {
    /// Sequence swapping to `vehicle` and finally restoring `restore_mode`.
    #[must_use]
    pub fn new(
        vehicle: VehicleId,
        restore_mode: VisualizationMode,
        timing: &TimingOptions,
    ) -> Self {
        let phase = SwapPhase::DisableVisuals;
        Self {
            vehicle,
            restore_mode,
            phase,
            remaining: phase.frames(timing).max(1),
            elapsed: 0,
            timing: timing.clone(),
        }
    }

    /// Consume one frame. Returns the action due if the current phase's
    /// wait just ran out.
    pub fn tick(&mut self) -> Option<SwapAction> {
        self.elapsed += 1;
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining > 0 {
            return None;
        }
        let action = self.completion_action();
        match self.phase.next() {
            Some(next) => {
                self.phase = next;
                self.remaining = next.frames(&self.timing).max(1);
                log::info!("vehicle swap phase {next:?}");
            }
            None => {
                log::info!("vehicle swap to {} complete", self.vehicle.name());
            }
        }
        Some(action)
    }

    /// Action that ends the current phase and opens the next one.
    const fn completion_action(&self) -> SwapAction {
        match self.phase {
            SwapPhase::DisableVisuals => SwapAction::PlatformDown,
            SwapPhase::PlatformDown => SwapAction::SwapBody(self.vehicle),
            SwapPhase::SwapBody => SwapAction::PlatformUp,
            SwapPhase::PlatformUp => {
                SwapAction::RestoreVisuals(self.restore_mode)
            }
            SwapPhase::RestoreVisuals => SwapAction::Finish,
        }
    }

    /// Vehicle being swapped in.
    #[must_use]
    pub const fn vehicle(&self) -> VehicleId {
        self.vehicle
    }

    /// Phase currently waiting.
    #[must_use]
    pub const fn phase(&self) -> SwapPhase {
        self.phase
    }

    /// Frames consumed so far.
    #[must_use]
    pub const fn elapsed(&self) -> u32 {
        self.elapsed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(timing: &TimingOptions) -> Vec<(u32, SwapAction)> {
        let mut seq =
            SwapSequence::new(VehicleId::Truck, VisualizationMode::Streamline, timing);
        let mut actions = Vec::new();
        loop {
            if let Some(action) = seq.tick() {
                actions.push((seq.elapsed(), action));
                if action == SwapAction::Finish {
                    return actions;
                }
            }
        }
    }

    #[test]
    fn documented_timing_suspends_520_frames_in_five_phases() {
        let actions = run(&TimingOptions::default());
        assert_eq!(
            actions,
            vec![
                (30, SwapAction::PlatformDown),
                (270, SwapAction::SwapBody(VehicleId::Truck)),
                (330, SwapAction::PlatformUp),
                (510, SwapAction::RestoreVisuals(VisualizationMode::Streamline)),
                (520, SwapAction::Finish),
            ]
        );
    }

    #[test]
    fn phases_follow_declared_order() {
        let mut seq = SwapSequence::new(
            VehicleId::Suv,
            VisualizationMode::None,
            &TimingOptions::default(),
        );
        let mut seen = vec![seq.phase()];
        while seq.tick() != Some(SwapAction::Finish) {
            if seen.last() != Some(&seq.phase()) {
                seen.push(seq.phase());
            }
        }
        assert_eq!(seen, SwapPhase::ORDER.to_vec());
    }

    #[test]
    fn each_phase_ends_with_exactly_one_action() {
        let actions = run(&TimingOptions::default());
        assert_eq!(actions.len(), SwapPhase::ORDER.len());
        assert_eq!(
            actions.iter().filter(|(_, a)| *a == SwapAction::Finish).count(),
            1
        );
    }

    #[test]
    fn zero_frame_phase_still_takes_one_tick() {
        let timing = TimingOptions {
            disable_visuals_frames: 0,
            platform_down_frames: 1,
            swap_body_frames: 0,
            platform_up_frames: 1,
            restore_visuals_frames: 0,
            ..TimingOptions::default()
        };
        let actions = run(&timing);
        assert_eq!(actions.last(), Some(&(5, SwapAction::Finish)));
    }
}
