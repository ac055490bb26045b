//! Color attribute and colormap domain shared by every layer.

use glam::Vec2;

use crate::scene::layout::{
    ATTR_COLORMAP_MAX, ATTR_COLORMAP_MIN, ATTR_DOMAIN, ATTR_ENABLED,
    ATTR_LAYER, FLOW_EMITTER_PRESSURE, FLOW_EMITTER_VELOCITY,
    FLOW_LAYER_HIDDEN, FLOW_LAYER_SHOWN, FLOW_OFFSCREEN_PRESSURE,
    FLOW_OFFSCREEN_VELOCITY, FLOW_RAY_MARCH, FLOW_RENDER_PRESSURE,
    FLOW_RENDER_VELOCITY, FLOW_SHADOW, INDEX_PRESSURE_COLORMAP,
    INDEX_SLICE_PRESSURE_MATERIAL, INDEX_SLICE_VELOCITY_MATERIAL,
    INDEX_SLICE_X, INDEX_SLICE_Y, INDEX_SLICE_Z, INDEX_VELOCITY_COLORMAP,
    INDEX_VOLUME, INDEX_VOLUME_PRESSURE_MATERIAL,
    INDEX_VOLUME_VELOCITY_MATERIAL, REL_MATERIAL_BINDING,
};
use crate::scene::{AttrValue, SceneBackend, SceneResult};
use crate::state::{ColorAttribute, GradientDomain};

/// Flow objects rendering one field.
struct FlowField {
    offscreen: &'static str,
    render: &'static str,
    emitter: &'static str,
}

const VELOCITY: FlowField = FlowField {
    offscreen: FLOW_OFFSCREEN_VELOCITY,
    render: FLOW_RENDER_VELOCITY,
    emitter: FLOW_EMITTER_VELOCITY,
};

const PRESSURE: FlowField = FlowField {
    offscreen: FLOW_OFFSCREEN_PRESSURE,
    render: FLOW_RENDER_PRESSURE,
    emitter: FLOW_EMITTER_PRESSURE,
};

fn show_flow<S: SceneBackend + ?Sized>(
    scene: &mut S,
    field: &FlowField,
    shown: bool,
) -> SceneResult<()> {
    let layer = if shown { FLOW_LAYER_SHOWN } else { FLOW_LAYER_HIDDEN };
    scene.set_attribute(field.offscreen, ATTR_LAYER, AttrValue::Int(layer))?;
    scene.set_attribute(field.render, ATTR_LAYER, AttrValue::Int(layer))?;
    scene.set_attribute(field.emitter, ATTR_ENABLED, AttrValue::Bool(shown))
}

/// Rebind the IndeX materials and swap the flow render layers to `attr`.
pub(crate) fn apply_color_attribute<S: SceneBackend + ?Sized>(
    scene: &mut S,
    attr: ColorAttribute,
) -> SceneResult<()> {
    let (volume_material, slice_material) = match attr {
        ColorAttribute::Velocity => {
            (INDEX_VOLUME_VELOCITY_MATERIAL, INDEX_SLICE_VELOCITY_MATERIAL)
        }
        ColorAttribute::Pressure => {
            (INDEX_VOLUME_PRESSURE_MATERIAL, INDEX_SLICE_PRESSURE_MATERIAL)
        }
    };
    scene.set_relationship(INDEX_VOLUME, REL_MATERIAL_BINDING, volume_material)?;
    for slice in [INDEX_SLICE_X, INDEX_SLICE_Y, INDEX_SLICE_Z] {
        scene.set_relationship(slice, REL_MATERIAL_BINDING, slice_material)?;
    }

    let velocity_shown = attr == ColorAttribute::Velocity;
    show_flow(scene, &VELOCITY, velocity_shown)?;
    show_flow(scene, &PRESSURE, !velocity_shown)
}

/// Write `domain` to the flow colormaps and the active IndeX colormap.
pub(crate) fn apply_gradient<S: SceneBackend + ?Sized>(
    scene: &mut S,
    attr: ColorAttribute,
    domain: GradientDomain,
) -> SceneResult<()> {
    for path in [FLOW_RAY_MARCH, FLOW_SHADOW] {
        scene.set_attribute(path, ATTR_COLORMAP_MIN, AttrValue::Float(domain.min))?;
        scene.set_attribute(path, ATTR_COLORMAP_MAX, AttrValue::Float(domain.max))?;
    }
    let colormap = match attr {
        ColorAttribute::Velocity => INDEX_VELOCITY_COLORMAP,
        ColorAttribute::Pressure => INDEX_PRESSURE_COLORMAP,
    };
    scene.set_attribute(
        colormap,
        ATTR_DOMAIN,
        AttrValue::Vec2(Vec2::new(domain.min, domain.max)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::memory::InMemoryScene;

    #[test]
    fn pressure_swaps_materials_and_layers() {
        let mut scene = InMemoryScene::twin_stage();
        apply_color_attribute(&mut scene, ColorAttribute::Pressure).unwrap();
        assert_eq!(
            scene.relationship(INDEX_VOLUME, REL_MATERIAL_BINDING),
            Some(INDEX_VOLUME_PRESSURE_MATERIAL)
        );
        assert_eq!(
            scene.relationship(INDEX_SLICE_Y, REL_MATERIAL_BINDING),
            Some(INDEX_SLICE_PRESSURE_MATERIAL)
        );
        assert_eq!(
            scene.attribute(FLOW_RENDER_PRESSURE, ATTR_LAYER),
            Some(&AttrValue::Int(2))
        );
        assert_eq!(
            scene.attribute(FLOW_RENDER_VELOCITY, ATTR_LAYER),
            Some(&AttrValue::Int(0))
        );
        assert_eq!(
            scene.attribute(FLOW_EMITTER_VELOCITY, ATTR_ENABLED),
            Some(&AttrValue::Bool(false))
        );
    }

    #[test]
    fn gradient_targets_active_colormap_only() {
        let mut scene = InMemoryScene::twin_stage();
        let domain = GradientDomain { min: -5.0, max: 5.0 };
        apply_gradient(&mut scene, ColorAttribute::Pressure, domain).unwrap();
        assert_eq!(
            scene.attribute(INDEX_PRESSURE_COLORMAP, ATTR_DOMAIN),
            Some(&AttrValue::Vec2(Vec2::new(-5.0, 5.0)))
        );
        assert_eq!(
            scene.attribute(INDEX_VELOCITY_COLORMAP, ATTR_DOMAIN),
            Some(&AttrValue::Vec2(Vec2::new(0.0, 1.0)))
        );
        assert_eq!(
            scene.attribute(FLOW_SHADOW, ATTR_COLORMAP_MAX),
            Some(&AttrValue::Float(5.0))
        );
    }
}
