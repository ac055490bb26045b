//! Scene-side enable/disable of each visualization layer.

use super::slice;
use crate::error::OrchestratorError;
use crate::scene::layout::{
    ATTR_FORCE_CLEAR, ATTR_FORCE_SIMULATE, INDEX_ROOT, INDEX_VOLUME,
    SMOKE_ROOT, SMOKE_SIMULATION, STREAMLINES_CURVES, STREAMLINES_POINT_CLOUD,
    STREAMLINES_ROOT, STREAMLINES_SEED_SPHERE,
};
use crate::scene::{AttrValue, SceneBackend, SceneResult};
use crate::state::{ConfigStore, SliceAxis, VisualizationMode};

/// Show `mode`'s objects.
pub(crate) fn enable<S: SceneBackend + ?Sized>(
    scene: &mut S,
    store: &mut ConfigStore,
    mode: VisualizationMode,
    slice_position: f32,
) -> Result<(), OrchestratorError> {
    log::debug!("enabling {mode:?} layer");
    match mode {
        VisualizationMode::None => {}
        VisualizationMode::SmokeProbe => {
            scene.set_attribute(
                SMOKE_SIMULATION,
                ATTR_FORCE_CLEAR,
                AttrValue::Bool(false),
            )?;
            scene.set_attribute(
                SMOKE_SIMULATION,
                ATTR_FORCE_SIMULATE,
                AttrValue::Bool(true),
            )?;
            scene.set_visibility(SMOKE_ROOT, true)?;
        }
        VisualizationMode::Streamline => {
            best_effort(scene.set_active(STREAMLINES_CURVES, true));
            best_effort(scene.set_visibility(STREAMLINES_CURVES, true));
            best_effort(scene.set_visibility(STREAMLINES_ROOT, true));
            best_effort(scene.set_visibility(STREAMLINES_SEED_SPHERE, true));
            best_effort(scene.set_visibility(STREAMLINES_POINT_CLOUD, false));
        }
        VisualizationMode::IndexVolume => {
            scene.set_visibility(INDEX_ROOT, true)?;
            scene.set_visibility(INDEX_VOLUME, true)?;
        }
        VisualizationMode::IndexSlice => {
            scene.set_visibility(INDEX_ROOT, true)?;
            slice::set_axis(scene, store, SliceAxis::X, slice_position)?;
        }
    }
    Ok(())
}

/// Hide `mode`'s objects.
pub(crate) fn disable<S: SceneBackend + ?Sized>(
    scene: &mut S,
    store: &mut ConfigStore,
    mode: VisualizationMode,
    slice_position: f32,
) -> Result<(), OrchestratorError> {
    log::debug!("disabling {mode:?} layer");
    match mode {
        VisualizationMode::None => {}
        VisualizationMode::SmokeProbe => {
            scene.set_attribute(
                SMOKE_SIMULATION,
                ATTR_FORCE_CLEAR,
                AttrValue::Bool(true),
            )?;
            scene.set_attribute(
                SMOKE_SIMULATION,
                ATTR_FORCE_SIMULATE,
                AttrValue::Bool(false),
            )?;
            scene.set_visibility(SMOKE_ROOT, false)?;
        }
        VisualizationMode::Streamline => {
            best_effort(scene.set_visibility(STREAMLINES_POINT_CLOUD, false));
            best_effort(scene.set_active(STREAMLINES_CURVES, false));
            best_effort(scene.set_visibility(STREAMLINES_CURVES, false));
            best_effort(scene.set_visibility(STREAMLINES_ROOT, false));
        }
        VisualizationMode::IndexVolume => {
            scene.set_visibility(INDEX_ROOT, false)?;
            scene.set_visibility(INDEX_VOLUME, false)?;
        }
        VisualizationMode::IndexSlice => {
            scene.set_visibility(INDEX_ROOT, false)?;
            slice::set_axis(scene, store, SliceAxis::Cleared, slice_position)?;
        }
    }
    Ok(())
}

/// Streamline objects are generated lazily by the renderer and may not
/// exist yet; their failures are logged instead of raised.
fn best_effort(result: SceneResult<()>) {
    if let Err(e) = result {
        log::warn!("streamline layer: {e}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::memory::InMemoryScene;

    #[test]
    fn missing_streamlines_do_not_fail() {
        let mut scene = InMemoryScene::twin_stage();
        scene.remove_prim(STREAMLINES_CURVES);
        let mut store = ConfigStore::new();
        enable(&mut scene, &mut store, VisualizationMode::Streamline, 0.0)
            .unwrap();
        disable(&mut scene, &mut store, VisualizationMode::Streamline, 0.0)
            .unwrap();
        assert_eq!(scene.is_visible(STREAMLINES_ROOT), Some(false));
    }

    #[test]
    fn missing_smoke_root_fails() {
        let mut scene = InMemoryScene::twin_stage();
        scene.remove_prim(SMOKE_ROOT);
        let mut store = ConfigStore::new();
        let err =
            disable(&mut scene, &mut store, VisualizationMode::SmokeProbe, 0.0);
        assert!(matches!(err, Err(OrchestratorError::Scene(_))));
    }

    #[test]
    fn slice_layer_drives_axis() {
        let mut scene = InMemoryScene::twin_stage();
        let mut store = ConfigStore::new();
        enable(&mut scene, &mut store, VisualizationMode::IndexSlice, 0.0)
            .unwrap();
        assert_eq!(store.state().slice_axis, SliceAxis::X);
        assert!(scene.section().enabled);
        disable(&mut scene, &mut store, VisualizationMode::IndexSlice, 0.0)
            .unwrap();
        assert_eq!(store.state().slice_axis, SliceAxis::Cleared);
        assert!(!scene.section().enabled);
        assert_eq!(scene.is_visible(INDEX_ROOT), Some(false));
    }
}
