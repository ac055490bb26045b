//! Exclusive visualization-layer transitions.
//!
//! [`ModeStateMachine::activate`] disables every other layer before enabling
//! the target, so at most one layer is shown at a time. The smoke probes are
//! special: the flow simulation only restarts on a falling-then-rising edge,
//! so activating them disables, waits a few frames, then enables, even when
//! they are already the active layer.

pub(crate) mod appearance;
mod layers;
pub(crate) mod probes;
pub(crate) mod slice;

use crate::error::OrchestratorError;
use crate::scene::SceneBackend;
use crate::state::{ConfigStore, Mutation, VisualizationMode};

/// Layer transition logic plus the pending smoke-probe re-enable.
#[derive(Debug)]
pub struct ModeStateMachine {
    toggle_frames: u32,
    slice_position: f32,
    /// Frames left before the smoke probes are re-enabled.
    pending_smoke: Option<u32>,
}

impl ModeStateMachine {
    /// State machine waiting `toggle_frames` between smoke-probe disable and
    /// enable, placing new slices at `slice_position`.
    #[must_use]
    pub fn new(toggle_frames: u32, slice_position: f32) -> Self {
        Self {
            toggle_frames,
            slice_position,
            pending_smoke: None,
        }
    }

    /// Make `target` the only shown layer.
    ///
    /// Not short-circuited when `target` is already active. A pending
    /// smoke-probe enable from an earlier activation is cancelled.
    ///
    /// # Errors
    ///
    /// [`OrchestratorError::Scene`] if an expected object is missing. The
    /// remaining steps are skipped and nothing already applied is undone.
    pub fn activate<S: SceneBackend + ?Sized>(
        &mut self,
        scene: &mut S,
        store: &mut ConfigStore,
        target: VisualizationMode,
    ) -> Result<(), OrchestratorError> {
        self.pending_smoke = None;
        store.apply(Mutation::SetMode(target))?;
        log::debug!("activating {target:?}");

        for mode in VisualizationMode::LAYERS {
            if mode != target {
                layers::disable(scene, store, mode, self.slice_position)?;
            }
        }

        match target {
            VisualizationMode::None => {}
            VisualizationMode::SmokeProbe => {
                layers::disable(scene, store, target, self.slice_position)?;
                if self.toggle_frames == 0 {
                    layers::enable(scene, store, target, self.slice_position)?;
                } else {
                    self.pending_smoke = Some(self.toggle_frames);
                }
            }
            _ => layers::enable(scene, store, target, self.slice_position)?,
        }
        Ok(())
    }

    /// Advance the smoke-probe toggle by one frame, enabling the probes once
    /// the wait is exhausted.
    ///
    /// # Errors
    ///
    /// [`OrchestratorError::Scene`] if the smoke objects are missing.
    pub fn on_frame<S: SceneBackend + ?Sized>(
        &mut self,
        scene: &mut S,
        store: &mut ConfigStore,
    ) -> Result<(), OrchestratorError> {
        let Some(remaining) = self.pending_smoke.as_mut() else {
            return Ok(());
        };
        *remaining = remaining.saturating_sub(1);
        if *remaining > 0 {
            return Ok(());
        }
        self.pending_smoke = None;
        layers::enable(
            scene,
            store,
            VisualizationMode::SmokeProbe,
            self.slice_position,
        )
    }

    /// Whether a smoke-probe enable is waiting on frames.
    #[must_use]
    pub fn is_toggle_pending(&self) -> bool {
        self.pending_smoke.is_some()
    }

    /// Best-effort disable of every layer, logging failures. Used on
    /// shutdown.
    pub fn disable_all<S: SceneBackend + ?Sized>(
        &mut self,
        scene: &mut S,
        store: &mut ConfigStore,
    ) {
        self.pending_smoke = None;
        for mode in VisualizationMode::LAYERS {
            if let Err(e) = layers::disable(scene, store, mode, self.slice_position)
            {
                log::warn!("failed to disable {mode:?} on shutdown: {e}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::layout::{
        ATTR_FORCE_SIMULATE, INDEX_ROOT, SMOKE_ROOT, SMOKE_SIMULATION,
        STREAMLINES_ROOT,
    };
    use crate::scene::memory::{InMemoryScene, SceneCall};
    use crate::scene::AttrValue;

    fn machine() -> ModeStateMachine {
        ModeStateMachine::new(5, 0.0)
    }

    fn smoke_simulate_writes(scene: &InMemoryScene) -> Vec<bool> {
        scene
            .calls()
            .iter()
            .filter_map(|c| match c {
                SceneCall::Attribute {
                    path,
                    attribute,
                    value: AttrValue::Bool(b),
                } if path == SMOKE_SIMULATION
                    && attribute == ATTR_FORCE_SIMULATE =>
                {
                    Some(*b)
                }
                _ => None,
            })
            .collect()
    }

    #[test]
    fn at_most_one_layer_after_any_activation_sequence() {
        let mut scene = InMemoryScene::twin_stage();
        let mut store = ConfigStore::new();
        let mut modes = machine();
        let sequence = [
            VisualizationMode::Streamline,
            VisualizationMode::IndexSlice,
            VisualizationMode::IndexVolume,
            VisualizationMode::IndexVolume,
            VisualizationMode::SmokeProbe,
            VisualizationMode::IndexSlice,
            VisualizationMode::None,
            VisualizationMode::Streamline,
        ];
        for target in sequence {
            modes.activate(&mut scene, &mut store, target).unwrap();
            for _ in 0..5 {
                modes.on_frame(&mut scene, &mut store).unwrap();
            }
            let shown = scene.shown_layers();
            assert!(shown.len() <= 1, "{target:?} left {shown:?} shown");
            if target != VisualizationMode::None {
                assert_eq!(shown, vec![target]);
            }
            assert_eq!(store.state().mode, target);
        }
    }

    #[test]
    fn smoke_probe_hard_toggles_even_when_active() {
        let mut scene = InMemoryScene::twin_stage();
        let mut store = ConfigStore::new();
        let mut modes = machine();
        modes
            .activate(&mut scene, &mut store, VisualizationMode::SmokeProbe)
            .unwrap();
        for _ in 0..5 {
            modes.on_frame(&mut scene, &mut store).unwrap();
        }
        scene.clear_calls();

        modes
            .activate(&mut scene, &mut store, VisualizationMode::SmokeProbe)
            .unwrap();
        assert_eq!(smoke_simulate_writes(&scene), vec![false]);
        assert_eq!(scene.is_visible(SMOKE_ROOT), Some(false));

        for _ in 0..4 {
            modes.on_frame(&mut scene, &mut store).unwrap();
        }
        assert!(modes.is_toggle_pending());
        assert_eq!(smoke_simulate_writes(&scene), vec![false]);

        modes.on_frame(&mut scene, &mut store).unwrap();
        assert!(!modes.is_toggle_pending());
        assert_eq!(smoke_simulate_writes(&scene), vec![false, true]);
        assert_eq!(scene.is_visible(SMOKE_ROOT), Some(true));
    }

    #[test]
    fn new_activation_cancels_pending_smoke_enable() {
        let mut scene = InMemoryScene::twin_stage();
        let mut store = ConfigStore::new();
        let mut modes = machine();
        modes
            .activate(&mut scene, &mut store, VisualizationMode::SmokeProbe)
            .unwrap();
        modes
            .activate(&mut scene, &mut store, VisualizationMode::IndexVolume)
            .unwrap();
        for _ in 0..10 {
            modes.on_frame(&mut scene, &mut store).unwrap();
        }
        assert_eq!(scene.shown_layers(), vec![VisualizationMode::IndexVolume]);
    }

    #[test]
    fn zero_toggle_frames_enables_immediately() {
        let mut scene = InMemoryScene::twin_stage();
        let mut store = ConfigStore::new();
        let mut modes = ModeStateMachine::new(0, 0.0);
        modes
            .activate(&mut scene, &mut store, VisualizationMode::SmokeProbe)
            .unwrap();
        assert!(!modes.is_toggle_pending());
        assert_eq!(scene.shown_layers(), vec![VisualizationMode::SmokeProbe]);
    }

    #[test]
    fn failure_aborts_without_rollback() {
        let mut scene = InMemoryScene::twin_stage();
        scene.remove_prim(INDEX_ROOT);
        let mut store = ConfigStore::new();
        let mut modes = machine();

        let err = modes.activate(
            &mut scene,
            &mut store,
            VisualizationMode::SmokeProbe,
        );
        assert!(matches!(err, Err(OrchestratorError::Scene(_))));
        // Streamlines were disabled before the IndeX failure and stay so.
        assert_eq!(scene.is_visible(STREAMLINES_ROOT), Some(false));
        // Smoke probes were never reached.
        assert_eq!(scene.is_visible(SMOKE_ROOT), Some(true));
        assert!(!modes.is_toggle_pending());
        assert_eq!(store.state().mode, VisualizationMode::SmokeProbe);
    }

    #[test]
    fn disable_all_is_best_effort() {
        let mut scene = InMemoryScene::twin_stage();
        scene.remove_prim(INDEX_ROOT);
        let mut store = ConfigStore::new();
        let mut modes = machine();
        modes.disable_all(&mut scene, &mut store);
        assert_eq!(scene.is_visible(SMOKE_ROOT), Some(false));
        assert!(scene.shown_layers().is_empty());
    }
}
