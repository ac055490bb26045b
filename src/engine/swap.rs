//! Vehicle swap driving: gate polling, the synchronous prologue and the
//! per-frame phase actions.

use serde_json::json;

use super::Orchestrator;
use crate::choreography::{PendingSelection, SwapAction, SwapSequence};
use crate::error::OrchestratorError;
use crate::inference::InferenceBackend;
use crate::scene::layout::TRIGGER_CAR_SWAP;
use crate::scene::SceneBackend;
use crate::state::catalog::{
    self, BODY_VARIANT_PRIM, BODY_VARIANT_SET, HERO_BODY_VARIANT,
};
use crate::state::{Mutation, PartCategory, VehicleId, VisualizationMode};

impl<S: SceneBackend, B: InferenceBackend> Orchestrator<S, B> {
    /// Start the pending selection if the gate is open. The only place a
    /// swap sequence is created.
    pub(crate) fn poll_selection(&mut self) -> Result<(), OrchestratorError> {
        match self.coalescer.poll() {
            Some(selection) => self.begin_swap(selection),
            None => Ok(()),
        }
    }

    fn begin_swap(
        &mut self,
        selection: PendingSelection,
    ) -> Result<(), OrchestratorError> {
        self.coalescer.close_gate();
        log::info!(
            "vehicle swap {} -> {}",
            self.store.state().vehicle.name(),
            selection.vehicle.name()
        );
        if let Err(e) = self.swap_prologue(selection) {
            log::error!("vehicle swap to {} aborted: {e}", selection.vehicle.name());
            self.swap = None;
            self.coalescer.open_gate();
            return Err(e);
        }
        Ok(())
    }

    /// Commit the vehicle, re-apply its parts, request inference and hide
    /// every layer. The frame-paced phases follow from `advance_swap`.
    fn swap_prologue(
        &mut self,
        selection: PendingSelection,
    ) -> Result<(), OrchestratorError> {
        let state = self.store.state();
        let previous = state.vehicle;
        let restore = selection.restore_mode.unwrap_or(state.mode);

        if previous == VehicleId::Concept || selection.vehicle == VehicleId::Concept {
            self.store.apply(Mutation::SetPartVariant {
                part: PartCategory::RideHeight,
                index: 0,
            })?;
        }
        self.store.apply(Mutation::SelectVehicle(selection.vehicle))?;
        self.apply_part_variants()?;
        let _ = self.dispatcher.dispatch(self.store.state());

        self.swap = Some(SwapSequence::new(
            selection.vehicle,
            restore,
            &self.options.timing,
        ));
        self.modes.activate(
            &mut self.scene,
            &mut self.store,
            VisualizationMode::None,
        )
    }

    /// Tick the running swap, performing whatever action falls due. The
    /// gate reopens when the sequence finishes or an action fails.
    pub(crate) fn advance_swap(&mut self) -> Result<(), OrchestratorError> {
        let Some(action) = self.swap.as_mut().and_then(SwapSequence::tick) else {
            return Ok(());
        };
        let result = self.perform(action);
        if let Err(e) = &result {
            log::error!("vehicle swap aborted in {action:?}: {e}");
        }
        if action == SwapAction::Finish || result.is_err() {
            self.swap = None;
            self.coalescer.open_gate();
        }
        result
    }

    fn perform(&mut self, action: SwapAction) -> Result<(), OrchestratorError> {
        match action {
            SwapAction::PlatformDown | SwapAction::PlatformUp => {
                self.scene.fire_trigger(TRIGGER_CAR_SWAP, json!({}))?;
                Ok(())
            }
            SwapAction::SwapBody(vehicle) => {
                log::debug!("showing {} on the hero body", vehicle.name());
                self.scene.set_variant(
                    BODY_VARIANT_PRIM,
                    BODY_VARIANT_SET,
                    HERO_BODY_VARIANT,
                )?;
                Ok(())
            }
            SwapAction::RestoreVisuals(mode) => {
                self.modes.activate(&mut self.scene, &mut self.store, mode)
            }
            SwapAction::Finish => Ok(()),
        }
    }

    // ── Part variants ──

    pub(crate) fn apply_part_variants(&mut self) -> Result<(), OrchestratorError> {
        for part in PartCategory::ALL {
            self.apply_part_variant(part)?;
        }
        Ok(())
    }

    /// Push the committed variant of `part` to the hero body.
    pub(crate) fn apply_part_variant(
        &mut self,
        part: PartCategory,
    ) -> Result<(), OrchestratorError> {
        let index = self.store.state().parts.get(part);
        let value = catalog::scene_value(part, index);
        self.scene
            .set_variant(catalog::prim(part), catalog::variant_set(part), value)?;
        Ok(())
    }
}
