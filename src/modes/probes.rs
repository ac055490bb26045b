//! Streamline seed sphere and smoke probe placement.

use glam::Vec3;

use crate::options::StreamlineOptions;
use crate::scene::layout::{
    ATTR_RADIUS, ATTR_TRANSLATE, SMOKE_BOUNDS, SMOKE_PROBES,
    STREAMLINES_BOUNDS, STREAMLINES_SEED_SPHERE,
};
use crate::scene::{placement, AttrValue, SceneBackend, SceneResult};

/// Move the streamline seed sphere to `pct` of its slider bounds.
pub(crate) fn place_streamline_seed<S: SceneBackend + ?Sized>(
    scene: &mut S,
    pct: Vec3,
) -> SceneResult<()> {
    let pos = placement::local_position(&*scene, &[STREAMLINES_BOUNDS], pct)?;
    scene.set_attribute(STREAMLINES_SEED_SPHERE, ATTR_TRANSLATE, AttrValue::Vec3(pos))
}

/// Move the smoke probe emitters to `pct` of their slider bounds.
pub(crate) fn place_smoke_probes<S: SceneBackend + ?Sized>(
    scene: &mut S,
    pct: Vec3,
) -> SceneResult<()> {
    let pos = placement::local_position(&*scene, &[SMOKE_BOUNDS], pct)?;
    scene.set_attribute(SMOKE_PROBES, ATTR_TRANSLATE, AttrValue::Vec3(pos))
}

/// Resize the seed sphere and return the seed grid side it now supports.
pub(crate) fn size_streamline_seed<S: SceneBackend + ?Sized>(
    scene: &mut S,
    options: &StreamlineOptions,
    pct: f32,
) -> SceneResult<u32> {
    let radius = options.radius(pct);
    scene.set_attribute(
        STREAMLINES_SEED_SPHERE,
        ATTR_RADIUS,
        AttrValue::Float(radius),
    )?;
    Ok(options.seed_grid(radius))
}
