//! Positions expressed as fractions of an object's bounds.

use glam::Vec3;

use super::{Aabb, BoundsSpace, SceneBackend, SceneResult};

/// Point inside `bounds` where each component of `pct` in `[-1, 1]` maps
/// from the minimum to the maximum face.
#[must_use]
pub fn position_in_bounds(bounds: &Aabb, pct: Vec3) -> Vec3 {
    bounds.midpoint() + 0.5 * pct * bounds.size()
}

/// [`position_in_bounds`] against the local bounds of `paths`.
///
/// # Errors
///
/// Propagates the backend's bounds failure.
pub fn local_position<S: SceneBackend + ?Sized>(
    scene: &S,
    paths: &[&str],
    pct: Vec3,
) -> SceneResult<Vec3> {
    let bounds = scene.compute_bounds(paths, BoundsSpace::Local)?;
    Ok(position_in_bounds(&bounds, pct))
}

/// [`position_in_bounds`] against the world bounds of `paths`.
///
/// # Errors
///
/// Propagates the backend's bounds failure.
pub fn world_position<S: SceneBackend + ?Sized>(
    scene: &S,
    paths: &[&str],
    pct: Vec3,
) -> SceneResult<Vec3> {
    let bounds = scene.compute_bounds(paths, BoundsSpace::World)?;
    Ok(position_in_bounds(&bounds, pct))
}
