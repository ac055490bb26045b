//! The orchestrator: request handlers, per-frame driving and the vehicle
//! swap, split across submodules by concern.

mod accessors;
pub mod command;
mod requests;
mod swap;

use self::command::Request;
use crate::choreography::{RequestCoalescer, SwapSequence};
use crate::error::OrchestratorError;
use crate::inference::dispatcher::InferenceDispatcher;
use crate::inference::InferenceBackend;
use crate::modes::ModeStateMachine;
use crate::options::Options;
use crate::scene::SceneBackend;
use crate::state::ConfigStore;

/// Configuration orchestrator of the wind-tunnel twin.
///
/// Owns the configuration, the scene and inference backends, the exclusive
/// layer state machine and the vehicle swap choreography. All methods are
/// meant to be called from the host's frame thread; vehicle selections are
/// queued and run across frames driven by [`on_frame`](Self::on_frame).
pub struct Orchestrator<S, B> {
    pub(crate) scene: S,
    pub(crate) store: ConfigStore,
    pub(crate) modes: ModeStateMachine,
    pub(crate) dispatcher: InferenceDispatcher<B>,
    pub(crate) coalescer: RequestCoalescer,
    pub(crate) swap: Option<SwapSequence>,
    pub(crate) options: Options,
    /// Streamline seeds per grid side, read by the renderer.
    pub(crate) seed_grid: u32,
    pub(crate) frame: u64,
}

impl<S: SceneBackend, B: InferenceBackend> Orchestrator<S, B> {
    /// Orchestrator over `scene` and `backend` with the startup defaults.
    /// Nothing touches the backends until [`initialize`](Self::initialize).
    pub fn new(scene: S, backend: B, options: Options) -> Self {
        let modes = ModeStateMachine::new(
            options.timing.smoke_probe_toggle_frames,
            options.defaults.slice_position,
        );
        let dispatcher =
            InferenceDispatcher::new(backend, options.inference.clone());
        let seed_grid = options
            .streamlines
            .seed_grid(options.streamlines.radius_min);
        Self {
            scene,
            store: ConfigStore::new(),
            modes,
            dispatcher,
            coalescer: RequestCoalescer::new(),
            swap: None,
            options,
            seed_grid,
            frame: 0,
        }
    }

    /// One-time startup: hide the cross-section tool, connect inference and
    /// reset to the defaults.
    ///
    /// # Errors
    ///
    /// Propagates scene-integrity failures from the reset.
    pub fn initialize(&mut self) -> Result<(), OrchestratorError> {
        log::info!("orchestrator initializing");
        self.scene.set_section_enabled(false)?;
        let _ = self.dispatcher.connect();
        self.reset()
    }

    /// Advance one frame: the smoke-probe toggle, the running swap, then
    /// any pending selection (which may start on the tick the gate opens).
    ///
    /// # Errors
    ///
    /// The first scene-integrity failure of this frame. A failing swap
    /// phase aborts the sequence and reopens the gate.
    pub fn on_frame(&mut self) -> Result<(), OrchestratorError> {
        self.frame += 1;
        let toggled = self.modes.on_frame(&mut self.scene, &mut self.store);
        let advanced = self.advance_swap();
        let started = self.poll_selection();
        toggled.and(advanced).and(started)
    }

    /// Run one request.
    ///
    /// # Errors
    ///
    /// [`OrchestratorError::InvalidInput`] when rejected before any state
    /// changed, [`OrchestratorError::Scene`] when the scene is missing an
    /// expected object.
    pub fn execute(&mut self, request: Request) -> Result<(), OrchestratorError> {
        log::debug!("frame {}: {request:?}", self.frame);
        let result = match request {
            Request::Reset => self.reset(),
            Request::SelectVehicle { vehicle } => {
                self.select_vehicle(vehicle);
                Ok(())
            }
            Request::SetPartVariant { part, index } => {
                self.set_part_variant(part, index)
            }
            Request::SetMode { mode } => self.set_mode(mode),
            Request::SetColorAttribute { attribute } => {
                self.set_color_attribute(attribute)
            }
            Request::SetSliceAxis { axis } => self.set_slice_axis(axis),
            Request::SetSlicePosition { pct } => self.set_slice_position(pct),
            Request::SetGradientScale { min, max } => {
                self.set_gradient_scale(min, max)
            }
            Request::SetWindSpeed { speed, point_scale } => {
                self.set_wind_speed(speed, point_scale)
            }
            Request::SetStreamlinePosition { pct } => {
                self.set_streamline_position(pct)
            }
            Request::SetStreamlineRadius { pct } => {
                self.set_streamline_radius(pct)
            }
            Request::SetSmokeProbePosition { pct } => {
                self.set_smoke_probe_position(pct)
            }
            Request::SetCamera { path } => self.set_camera(&path),
        };
        match &result {
            Err(OrchestratorError::Scene(e)) => log::error!("{e}"),
            Err(e) => log::warn!("request rejected: {e}"),
            Ok(()) => {}
        }
        result
    }

    /// Hide every layer, best-effort. A swap still in flight is abandoned
    /// where it stands.
    pub fn shutdown(&mut self) {
        if let Some(swap) = self.swap.take() {
            log::warn!(
                "abandoning vehicle swap to {} in {:?}",
                swap.vehicle().name(),
                swap.phase()
            );
        }
        self.modes.disable_all(&mut self.scene, &mut self.store);
        log::info!("orchestrator shut down after {} frames", self.frame);
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::Orchestrator;
    use crate::inference::loopback::LoopbackInference;
    use crate::options::Options;
    use crate::scene::memory::InMemoryScene;

    pub(crate) type TestOrchestrator = Orchestrator<InMemoryScene, LoopbackInference>;

    /// Orchestrator over the full twin stage, not yet initialized.
    pub(crate) fn orchestrator() -> TestOrchestrator {
        Orchestrator::new(
            InMemoryScene::twin_stage(),
            LoopbackInference::new(),
            Options::default(),
        )
    }

    /// Initialized orchestrator with the startup swap already finished.
    pub(crate) fn settled() -> TestOrchestrator {
        let mut o = orchestrator();
        o.initialize().unwrap();
        run_frames(&mut o, 600);
        o.scene_mut().clear_calls();
        o
    }

    pub(crate) fn run_frames(o: &mut TestOrchestrator, frames: u32) {
        for _ in 0..frames {
            o.on_frame().unwrap();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::{orchestrator, run_frames, settled};
    use super::*;
    use crate::scene::layout::SMOKE_ROOT;
    use crate::state::VisualizationMode;

    #[test]
    fn initialize_hides_section_tool_and_starts_swap() {
        let mut o = orchestrator();
        o.initialize().unwrap();
        assert!(!o.scene().section().enabled);
        assert!(!o.is_ready());
        assert_eq!(o.scene().shown_layers(), Vec::<VisualizationMode>::new());
    }

    #[test]
    fn execute_reports_invalid_input_without_mutating() {
        let mut o = settled();
        let before = o.state().clone();
        let err = o.execute(Request::SetGradientScale {
            min: 5.0,
            max: 1.0,
        });
        assert!(matches!(err, Err(OrchestratorError::InvalidInput(_))));
        assert_eq!(o.state(), &before);
    }

    #[test]
    fn state_json_reports_the_committed_snapshot() {
        let o = settled();
        let json = o.state_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["vehicle"], 500);
        assert_eq!(value["wind_speed"], 75.0);
    }

    #[test]
    fn execute_reports_missing_objects_as_scene_errors() {
        let mut o = settled();
        o.scene_mut().remove_prim(SMOKE_ROOT);
        let err = o.execute(Request::SetMode {
            mode: VisualizationMode::IndexVolume,
        });
        assert!(matches!(err, Err(OrchestratorError::Scene(_))));
    }

    #[test]
    fn shutdown_abandons_swap_and_hides_layers() {
        let mut o = orchestrator();
        o.initialize().unwrap();
        run_frames(&mut o, 520);
        assert_eq!(o.scene().shown_layers(), vec![VisualizationMode::SmokeProbe]);

        o.select_vehicle(crate::state::VehicleId::Truck);
        run_frames(&mut o, 40);
        assert!(o.swap_phase().is_some());

        o.shutdown();
        assert_eq!(o.swap_phase(), None);
        assert!(o.scene().shown_layers().is_empty());
    }
}
