//! IndeX slice plane and cross-section widget placement.
//!
//! The slice objects are authored in a rotated frame, so a user axis maps
//! to a different slice object and widget alignment:
//!
//! | axis | widget align | clip dir | visible slice |
//! |------|--------------|----------|---------------|
//! | X    | x            | 1        | `Volume_SliceX` |
//! | Y    | z            | 1        | `Volume_SliceZ` |
//! | Z    | y            | 0        | `Volume_SliceY` |

use glam::Vec3;

use crate::error::OrchestratorError;
use crate::scene::layout::{
    ATTR_TRANSLATE, INDEX_BOUNDS, INDEX_SLICE_X, INDEX_SLICE_Y, INDEX_SLICE_Z,
};
use crate::scene::{placement, AttrValue, Axis, SceneBackend, SceneResult};
use crate::state::{ConfigStore, Mutation, SliceAxis};

const SLICES: [&str; 3] = [INDEX_SLICE_X, INDEX_SLICE_Y, INDEX_SLICE_Z];

struct SliceGeometry {
    widget_axis: Axis,
    direction: u8,
    slice_prim: &'static str,
    /// Bounds fractions of the widget (world) for a slider fraction.
    widget_pct: fn(f32) -> Vec3,
    /// Bounds fractions of the slice object (local) for a slider fraction.
    slice_pct: fn(f32) -> Vec3,
}

fn geometry(axis: SliceAxis) -> Option<SliceGeometry> {
    match axis {
        SliceAxis::X => Some(SliceGeometry {
            widget_axis: Axis::X,
            direction: 1,
            slice_prim: INDEX_SLICE_X,
            widget_pct: |p| Vec3::new(p, 0.0, 0.0),
            slice_pct: |p| Vec3::new(0.0, -(p + 0.5), -0.5),
        }),
        SliceAxis::Y => Some(SliceGeometry {
            widget_axis: Axis::Z,
            direction: 1,
            slice_prim: INDEX_SLICE_Z,
            widget_pct: |p| Vec3::new(0.0, 0.0, p),
            slice_pct: |p| Vec3::new(0.0, 0.5, p),
        }),
        SliceAxis::Z => Some(SliceGeometry {
            widget_axis: Axis::Y,
            direction: 0,
            slice_prim: INDEX_SLICE_Y,
            widget_pct: |p| Vec3::new(0.0, p, 0.0),
            slice_pct: |p| Vec3::new(p, 0.0, -0.5),
        }),
        SliceAxis::Cleared => None,
    }
}

/// Switch the slice plane to `axis` and place it at `position`.
///
/// `Cleared` hides every slice object and the cross-section tool.
pub(crate) fn set_axis<S: SceneBackend + ?Sized>(
    scene: &mut S,
    store: &mut ConfigStore,
    axis: SliceAxis,
    position: f32,
) -> Result<(), OrchestratorError> {
    store.apply(Mutation::SetSliceAxis(axis))?;
    scene.set_section_enabled(axis != SliceAxis::Cleared)?;
    let visible = match geometry(axis) {
        Some(g) => {
            scene.align_section_widget(g.widget_axis, g.direction)?;
            Some(g.slice_prim)
        }
        None => None,
    };
    for prim in SLICES {
        scene.set_visibility(prim, Some(prim) == visible)?;
    }
    store.apply(Mutation::SetSlicePosition(position))?;
    place(scene, axis, position)?;
    Ok(())
}

/// Move the widget and the slice object for `axis` to `pct`. No-op when
/// the axis is cleared.
pub(crate) fn place<S: SceneBackend + ?Sized>(
    scene: &mut S,
    axis: SliceAxis,
    pct: f32,
) -> SceneResult<()> {
    let Some(g) = geometry(axis) else {
        return Ok(());
    };
    let widget =
        placement::world_position(&*scene, &[INDEX_BOUNDS], (g.widget_pct)(pct))?;
    let slice =
        placement::local_position(&*scene, &[INDEX_BOUNDS], (g.slice_pct)(pct))?;
    scene.move_section_widget(widget)?;
    scene.set_attribute(g.slice_prim, ATTR_TRANSLATE, AttrValue::Vec3(slice))
}
