//! User-facing request handlers for [`Orchestrator`].
//!
//! Each handler validates through the [`ConfigStore`](crate::state::ConfigStore)
//! first, so a rejected request changes nothing, then pushes the committed
//! value to the scene and, where the inference id depends on it, to the
//! inference backend.

use glam::Vec3;
use serde_json::json;

use super::Orchestrator;
use crate::choreography::PendingSelection;
use crate::error::OrchestratorError;
use crate::inference::InferenceBackend;
use crate::modes::{appearance, probes, slice};
use crate::scene::layout::{TRIGGER_START_CONFIG, TRIGGER_SWITCH_CAMERA};
use crate::scene::SceneBackend;
use crate::state::catalog;
use crate::state::{
    ColorAttribute, GradientDomain, Mutation, PartCategory, SliceAxis,
    VehicleId, VisualizationMode,
};

// ── Reset ──

impl<S: SceneBackend, B: InferenceBackend> Orchestrator<S, B> {
    /// Restore the configured defaults.
    ///
    /// Queues a swap to the concept car that ends on the default layer, so
    /// the smoke probes get a fresh hard-toggle even if they were already
    /// shown. Everything else is applied immediately.
    ///
    /// # Errors
    ///
    /// The first invalid default or missing scene object; later steps are
    /// skipped.
    pub fn reset(&mut self) -> Result<(), OrchestratorError> {
        log::info!("resetting configuration to defaults");
        let _ = self.dispatcher.connect();

        let defaults = self.options.defaults.clone();
        self.store.apply(Mutation::ResetPartVariants(defaults.parts()))?;
        self.apply_part_variants()?;

        self.coalescer.submit(PendingSelection {
            vehicle: VehicleId::Concept,
            restore_mode: Some(defaults.mode),
        });
        self.poll_selection()?;

        self.scene.fire_trigger(TRIGGER_START_CONFIG, json!({}))?;
        self.set_camera(&defaults.camera_path)?;
        self.set_color_attribute(defaults.color_attribute)?;
        self.set_wind_speed(defaults.wind_speed, None)?;
        let gradient = defaults.gradient();
        self.set_gradient_scale(gradient.min, gradient.max)?;
        self.set_smoke_probe_position(defaults.smoke_probe_position())?;
        self.set_streamline_position(defaults.streamline_position())?;
        self.set_streamline_radius(defaults.streamline_radius)
    }
}

// ── Vehicle ──

impl<S: SceneBackend, B: InferenceBackend> Orchestrator<S, B> {
    /// Queue a swap to `vehicle`. Returns immediately; only the latest
    /// selection made while a swap runs is honored once it finishes.
    pub fn select_vehicle(&mut self, vehicle: VehicleId) {
        self.coalescer.submit(PendingSelection::vehicle(vehicle));
    }

    /// Select a variant for `part` on the current vehicle and show it on
    /// the hero body.
    ///
    /// `index` uses the web client's layout: a ride height of 2 on the
    /// concept car means its second (high) variant.
    ///
    /// # Errors
    ///
    /// [`OrchestratorError::InvalidInput`] when the index is out of range
    /// for the vehicle.
    pub fn set_part_variant(
        &mut self,
        part: PartCategory,
        index: u32,
    ) -> Result<(), OrchestratorError> {
        let index = match part {
            PartCategory::RideHeight => {
                catalog::ride_height_from_ui(self.store.state().vehicle, index)
            }
            _ => index,
        };
        self.store.apply(Mutation::SetPartVariant { part, index })?;
        self.apply_part_variant(part)?;
        let _ = self.dispatcher.dispatch(self.store.state());
        Ok(())
    }
}

// ── Visualization ──

impl<S: SceneBackend, B: InferenceBackend> Orchestrator<S, B> {
    /// Make `mode` the only shown layer.
    ///
    /// # Errors
    ///
    /// [`OrchestratorError::Scene`]; the transition is left where it
    /// stopped.
    pub fn set_mode(
        &mut self,
        mode: VisualizationMode,
    ) -> Result<(), OrchestratorError> {
        self.modes.activate(&mut self.scene, &mut self.store, mode)
    }

    /// Recolor every layer by `attribute`, carrying the gradient domain
    /// over to its colormap.
    ///
    /// # Errors
    ///
    /// [`OrchestratorError::Scene`] if a material or flow object is missing.
    pub fn set_color_attribute(
        &mut self,
        attribute: ColorAttribute,
    ) -> Result<(), OrchestratorError> {
        self.store.apply(Mutation::SetColorAttribute(attribute))?;
        appearance::apply_color_attribute(&mut self.scene, attribute)?;
        appearance::apply_gradient(
            &mut self.scene,
            attribute,
            self.store.state().gradient,
        )?;
        Ok(())
    }

    /// Switch the slice plane axis.
    ///
    /// # Errors
    ///
    /// [`OrchestratorError::InvalidInput`] unless the slice layer is active
    /// or `axis` is [`SliceAxis::Cleared`].
    pub fn set_slice_axis(
        &mut self,
        axis: SliceAxis,
    ) -> Result<(), OrchestratorError> {
        let mode = self.store.state().mode;
        if axis != SliceAxis::Cleared && mode != VisualizationMode::IndexSlice {
            return Err(OrchestratorError::invalid(format!(
                "slice axis {axis:?} requires the slice layer, active layer \
                 is {mode:?}"
            )));
        }
        slice::set_axis(
            &mut self.scene,
            &mut self.store,
            axis,
            self.options.defaults.slice_position,
        )
    }

    /// Move the slice plane along its axis.
    ///
    /// # Errors
    ///
    /// [`OrchestratorError::InvalidInput`] outside `[-1, 1]`.
    pub fn set_slice_position(&mut self, pct: f32) -> Result<(), OrchestratorError> {
        self.store.apply(Mutation::SetSlicePosition(pct))?;
        slice::place(&mut self.scene, self.store.state().slice_axis, pct)?;
        Ok(())
    }

    /// Set the colormap domain.
    ///
    /// # Errors
    ///
    /// [`OrchestratorError::InvalidInput`] when `min > max`.
    pub fn set_gradient_scale(
        &mut self,
        min: f32,
        max: f32,
    ) -> Result<(), OrchestratorError> {
        let domain = GradientDomain { min, max };
        self.store.apply(Mutation::SetGradient(domain))?;
        appearance::apply_gradient(
            &mut self.scene,
            self.store.state().color_attribute,
            domain,
        )?;
        Ok(())
    }
}

// ── Flow ──

impl<S: SceneBackend, B: InferenceBackend> Orchestrator<S, B> {
    /// Set the free-stream speed and request new inference results.
    ///
    /// `point_scale` applies to this request only and falls back to the
    /// configured default. An unreachable
    /// inference backend is logged and does not fail the call.
    ///
    /// # Errors
    ///
    /// [`OrchestratorError::InvalidInput`] for a negative speed or a
    /// non-positive scale.
    pub fn set_wind_speed(
        &mut self,
        speed: f32,
        point_scale: Option<f32>,
    ) -> Result<(), OrchestratorError> {
        let scale = point_scale.unwrap_or(self.options.inference.point_scale);
        if !scale.is_finite() || scale <= 0.0 {
            return Err(OrchestratorError::invalid(format!(
                "point scale must be positive, got {scale}"
            )));
        }
        self.store.apply(Mutation::SetWindSpeed(speed))?;
        let _ = self.dispatcher.dispatch_scaled(self.store.state(), scale);
        Ok(())
    }

    /// Move the streamline seed sphere within its bounds.
    ///
    /// # Errors
    ///
    /// Out-of-range fractions, or missing seed objects.
    pub fn set_streamline_position(
        &mut self,
        pct: Vec3,
    ) -> Result<(), OrchestratorError> {
        self.store.apply(Mutation::SetStreamlinePosition(pct))?;
        probes::place_streamline_seed(&mut self.scene, pct)?;
        Ok(())
    }

    /// Resize the streamline seed sphere and recompute the seed grid.
    ///
    /// # Errors
    ///
    /// Fractions outside `[0, 1]`, or a missing seed sphere.
    pub fn set_streamline_radius(&mut self, pct: f32) -> Result<(), OrchestratorError> {
        self.store.apply(Mutation::SetStreamlineRadius(pct))?;
        self.seed_grid = probes::size_streamline_seed(
            &mut self.scene,
            &self.options.streamlines,
            pct,
        )?;
        log::debug!("streamline seed grid {0}x{0}", self.seed_grid);
        Ok(())
    }

    /// Move the smoke probe emitters within their bounds.
    ///
    /// # Errors
    ///
    /// Out-of-range fractions, or missing probe objects.
    pub fn set_smoke_probe_position(
        &mut self,
        pct: Vec3,
    ) -> Result<(), OrchestratorError> {
        self.store.apply(Mutation::SetSmokeProbePosition(pct))?;
        probes::place_smoke_probes(&mut self.scene, pct)?;
        Ok(())
    }
}

// ── Camera ──

impl<S: SceneBackend, B: InferenceBackend> Orchestrator<S, B> {
    /// Drive the viewport from the scene camera at `path`.
    ///
    /// # Errors
    ///
    /// An empty path, or a host that rejects the trigger.
    pub fn set_camera(&mut self, path: &str) -> Result<(), OrchestratorError> {
        self.store.apply(Mutation::SetCamera(path.to_owned()))?;
        self.scene
            .fire_trigger(TRIGGER_SWITCH_CAMERA, json!({ "targetCamera": path }))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::{orchestrator, run_frames, settled};
    use super::*;
    use crate::inference::events::{OrchestratorEvent, INFERENCE_START_MESSAGE};
    use crate::inference::loopback::LoopbackInference;
    use crate::options::Options;
    use crate::scene::layout::{
        ATTR_COLORMAP_MAX, ATTR_DOMAIN, ATTR_RADIUS, FLOW_RAY_MARCH,
        INDEX_PRESSURE_COLORMAP, STREAMLINES_SEED_SPHERE,
    };
    use crate::scene::memory::{InMemoryScene, SceneCall};
    use crate::scene::AttrValue;
    use crate::state::PartVariants;

    #[test]
    fn reset_restores_documented_defaults() {
        let mut o = orchestrator();
        o.initialize().unwrap();
        run_frames(&mut o, 520);

        let state = o.state();
        assert_eq!(state.vehicle, VehicleId::Concept);
        assert_eq!(state.parts, PartVariants::new(0, 0, 0, 0));
        assert_eq!(state.wind_speed, 75.0);
        assert_eq!(state.gradient, GradientDomain { min: 0.0, max: 150.0 });
        assert_eq!(state.mode, VisualizationMode::SmokeProbe);
        assert_eq!(o.scene().shown_layers(), vec![VisualizationMode::SmokeProbe]);
        assert!(o.is_ready());
    }

    #[test]
    fn reset_fires_startup_then_default_camera() {
        let mut o = orchestrator();
        o.initialize().unwrap();
        let triggers: Vec<_> = o
            .scene()
            .calls()
            .iter()
            .filter_map(|c| match c {
                SceneCall::Trigger { name, payload } => {
                    Some((name.clone(), payload.clone()))
                }
                _ => None,
            })
            .collect();
        assert_eq!(
            triggers,
            vec![
                (TRIGGER_START_CONFIG.to_owned(), json!({})),
                (
                    TRIGGER_SWITCH_CAMERA.to_owned(),
                    json!({ "targetCamera": crate::state::DEFAULT_CAMERA_PATH })
                ),
            ]
        );
    }

    #[test]
    fn concept_ride_height_high_maps_to_second_variant() {
        let mut o = settled();
        o.set_part_variant(PartCategory::RideHeight, 2).unwrap();
        assert_eq!(o.state().parts.get(PartCategory::RideHeight), 1);
        assert_eq!(
            o.scene().variant(
                catalog::prim(PartCategory::RideHeight),
                catalog::variant_set(PartCategory::RideHeight)
            ),
            Some("High")
        );
        let sent = o.inference().last_request().unwrap();
        assert_eq!(sent.id, 500 + 8);
    }

    #[test]
    fn out_of_range_variant_is_rejected_before_dispatch() {
        let mut o = settled();
        let sent = o.inference().requests().len();
        let err = o.set_part_variant(PartCategory::Rim, 5);
        assert!(matches!(err, Err(OrchestratorError::InvalidInput(_))));
        assert_eq!(o.inference().requests().len(), sent);
        assert!(o.scene().calls().is_empty());
    }

    #[test]
    fn unreachable_inference_still_updates_state() {
        let mut o = Orchestrator::new(
            InMemoryScene::twin_stage(),
            LoopbackInference::unreachable(),
            Options::default(),
        );
        o.initialize().unwrap();
        o.set_wind_speed(40.0, None).unwrap();
        o.set_part_variant(PartCategory::Spoiler, 1).unwrap();
        assert_eq!(o.state().wind_speed, 40.0);
        assert_eq!(o.state().parts.get(PartCategory::Spoiler), 1);
        assert!(o.inference().requests().is_empty());
        assert!(!o.upload_flag().is_raised());
    }

    #[test]
    fn wind_speed_broadcasts_inference_start() {
        let mut o = settled();
        let events = o.subscribe();
        o.set_wind_speed(42.6, Some(2.0)).unwrap();
        let OrchestratorEvent::InferenceRequestStarted { message, request } =
            events.try_recv().unwrap();
        assert_eq!(message, INFERENCE_START_MESSAGE);
        assert_eq!(request.id, 500);
        assert_eq!(request.param, 43.0);
        assert_eq!(o.inference().last_request().unwrap().scale, 2.0);
        assert!(o.upload_flag().take());
    }

    #[test]
    fn one_off_point_scale_does_not_stick() {
        let mut o = settled();
        o.set_wind_speed(40.0, Some(2.0)).unwrap();
        o.set_part_variant(PartCategory::Mirror, 1).unwrap();
        let last = o.inference().last_request().unwrap();
        assert_eq!(last.scale, 1.0);
        assert_eq!(o.default_point_scale(), 1.0);
    }

    #[test]
    fn bad_point_scale_leaves_speed_untouched() {
        let mut o = settled();
        let err = o.set_wind_speed(10.0, Some(0.0));
        assert!(matches!(err, Err(OrchestratorError::InvalidInput(_))));
        assert_eq!(o.state().wind_speed, 75.0);
    }

    #[test]
    fn slice_axis_requires_slice_layer() {
        let mut o = settled();
        let err = o.set_slice_axis(SliceAxis::Y);
        assert!(matches!(err, Err(OrchestratorError::InvalidInput(_))));
        o.set_slice_axis(SliceAxis::Cleared).unwrap();

        o.set_mode(VisualizationMode::IndexSlice).unwrap();
        assert_eq!(o.state().slice_axis, SliceAxis::X);
        o.set_slice_axis(SliceAxis::Y).unwrap();
        assert_eq!(o.state().slice_axis, SliceAxis::Y);
        assert!(o.scene().section().enabled);
        o.set_slice_position(0.25).unwrap();
        assert_eq!(o.state().slice_position, 0.25);
    }

    #[test]
    fn color_attribute_moves_gradient_to_its_colormap() {
        let mut o = settled();
        o.set_gradient_scale(-20.0, 80.0).unwrap();
        o.set_color_attribute(ColorAttribute::Pressure).unwrap();
        assert_eq!(
            o.scene().attribute(INDEX_PRESSURE_COLORMAP, ATTR_DOMAIN),
            Some(&AttrValue::Vec2(glam::Vec2::new(-20.0, 80.0)))
        );
        assert_eq!(
            o.scene().attribute(FLOW_RAY_MARCH, ATTR_COLORMAP_MAX),
            Some(&AttrValue::Float(80.0))
        );
    }

    #[test]
    fn streamline_radius_updates_seed_grid() {
        let mut o = settled();
        let before = o.seed_grid();
        o.set_streamline_radius(1.0).unwrap();
        assert_eq!(
            o.scene().attribute(STREAMLINES_SEED_SPHERE, ATTR_RADIUS),
            Some(&AttrValue::Float(30.0))
        );
        assert!(o.seed_grid() > before);
    }

    #[test]
    fn empty_camera_path_is_rejected() {
        let mut o = settled();
        assert!(o.set_camera("").is_err());
        assert_eq!(o.state().camera_path, crate::state::DEFAULT_CAMERA_PATH);
        assert_eq!(o.scene().trigger_count(TRIGGER_SWITCH_CAMERA), 0);
    }
}
