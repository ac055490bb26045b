//! Recording, in-process scene backend.
//!
//! Stands in for the rendering host in the headless binary and in tests.
//! Objects must be declared up front (see [`InMemoryScene::twin_stage`]),
//! so missing-object failures behave like the real stage. Successful
//! mutations are appended to a call log that keeps the most recent
//! [`DEFAULT_CALL_LOG_LIMIT`] entries.

use glam::Vec3;
use rustc_hash::FxHashMap;

use super::layout::{
    ATTR_COLORMAP_MAX, ATTR_COLORMAP_MIN, ATTR_DOMAIN, ATTR_ENABLED,
    ATTR_FORCE_CLEAR, ATTR_FORCE_SIMULATE, ATTR_LAYER, ATTR_RADIUS,
    ATTR_TRANSLATE, FLOW_EMITTER_PRESSURE, FLOW_EMITTER_VELOCITY,
    FLOW_LAYER_SHOWN, FLOW_OFFSCREEN_PRESSURE, FLOW_OFFSCREEN_VELOCITY,
    FLOW_RAY_MARCH, FLOW_RENDER_PRESSURE, FLOW_RENDER_VELOCITY, FLOW_SHADOW,
    INDEX_BOUNDS, INDEX_PRESSURE_COLORMAP, INDEX_ROOT, INDEX_SLICE_X,
    INDEX_SLICE_Y, INDEX_SLICE_Z, INDEX_VELOCITY_COLORMAP, INDEX_VOLUME,
    REL_MATERIAL_BINDING, SMOKE_BOUNDS, SMOKE_PROBES, SMOKE_ROOT,
    SMOKE_SIMULATION, STREAMLINES_BOUNDS, STREAMLINES_CURVES,
    STREAMLINES_POINT_CLOUD, STREAMLINES_ROOT, STREAMLINES_SEED_SPHERE,
};
use super::{
    Aabb, AttrValue, Axis, BoundsSpace, SceneBackend, SceneError, SceneResult,
};
use crate::state::catalog::{
    self, BODY_VARIANT_PRIM, BODY_VARIANT_SET, HERO_BODY_VARIANT,
};
use crate::state::{PartCategory, VisualizationMode};

/// Call-log entries kept by a scene built with [`InMemoryScene::new`].
pub const DEFAULT_CALL_LOG_LIMIT: usize = 4096;

/// One successful backend mutation, in call order.
#[derive(Debug, Clone, PartialEq)]
pub enum SceneCall {
    /// [`SceneBackend::set_variant`].
    Variant {
        /// Object path.
        path: String,
        /// Variant set.
        variant_set: String,
        /// Selected value.
        value: String,
    },
    /// [`SceneBackend::set_attribute`].
    Attribute {
        /// Object path.
        path: String,
        /// Attribute name.
        attribute: String,
        /// Written value.
        value: AttrValue,
    },
    /// [`SceneBackend::set_relationship`].
    Relationship {
        /// Object path.
        path: String,
        /// Relationship name.
        relationship: String,
        /// New target.
        target: String,
    },
    /// [`SceneBackend::set_visibility`].
    Visibility {
        /// Object path.
        path: String,
        /// New visibility.
        visible: bool,
    },
    /// [`SceneBackend::set_active`].
    Active {
        /// Object path.
        path: String,
        /// New active state.
        active: bool,
    },
    /// [`SceneBackend::fire_trigger`].
    Trigger {
        /// Event name.
        name: String,
        /// Event payload.
        payload: serde_json::Value,
    },
    /// [`SceneBackend::set_section_enabled`].
    SectionEnabled(bool),
    /// [`SceneBackend::align_section_widget`].
    SectionAligned {
        /// Widget axis.
        axis: Axis,
        /// Clip direction.
        direction: u8,
    },
    /// [`SceneBackend::move_section_widget`].
    SectionMoved(Vec3),
}

#[derive(Debug, Default)]
struct VariantSet {
    values: Vec<String>,
    selection: Option<String>,
}

#[derive(Debug)]
struct Prim {
    visible: bool,
    active: bool,
    attributes: FxHashMap<String, AttrValue>,
    variant_sets: FxHashMap<String, VariantSet>,
    relationships: FxHashMap<String, Option<String>>,
    bounds: Option<Aabb>,
    world_offset: Vec3,
}

impl Default for Prim {
    fn default() -> Self {
        Self {
            visible: true,
            active: true,
            attributes: FxHashMap::default(),
            variant_sets: FxHashMap::default(),
            relationships: FxHashMap::default(),
            bounds: None,
            world_offset: Vec3::ZERO,
        }
    }
}

/// Cross-section tool state as last written.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SectionState {
    /// Whether the tool is shown.
    pub enabled: bool,
    /// Widget alignment, once aligned.
    pub axis: Option<Axis>,
    /// Clip direction.
    pub direction: u8,
    /// Widget world position.
    pub position: Vec3,
}

/// Scene backend backed by hash maps.
#[derive(Debug)]
pub struct InMemoryScene {
    prims: FxHashMap<String, Prim>,
    section: SectionState,
    calls: Vec<SceneCall>,
    call_log_limit: usize,
    /// Fire counts per trigger, kept across call-log trimming.
    triggers: FxHashMap<String, usize>,
}

impl Default for InMemoryScene {
    fn default() -> Self {
        Self {
            prims: FxHashMap::default(),
            section: SectionState::default(),
            calls: Vec::new(),
            call_log_limit: DEFAULT_CALL_LOG_LIMIT,
            triggers: FxHashMap::default(),
        }
    }
}

impl InMemoryScene {
    /// Scene with no objects.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep at most `limit` call-log entries (0 disables the log).
    #[must_use]
    pub fn with_call_log_limit(mut self, limit: usize) -> Self {
        self.call_log_limit = limit;
        self.trim_calls();
        self
    }

    /// Scene declaring every object the orchestrator touches, with every
    /// layer initially shown.
    #[must_use]
    pub fn twin_stage() -> Self {
        let mut scene = Self::new();

        scene.add_variant_set(
            BODY_VARIANT_PRIM,
            BODY_VARIANT_SET,
            &[HERO_BODY_VARIANT],
        );
        for part in PartCategory::ALL {
            scene.add_variant_set(
                catalog::prim(part),
                catalog::variant_set(part),
                catalog::values(part),
            );
        }

        for path in [STREAMLINES_ROOT, STREAMLINES_CURVES, STREAMLINES_POINT_CLOUD]
        {
            scene.add_prim(path);
        }
        scene.add_attribute(STREAMLINES_SEED_SPHERE, ATTR_TRANSLATE, AttrValue::Vec3(Vec3::ZERO));
        scene.add_attribute(STREAMLINES_SEED_SPHERE, ATTR_RADIUS, AttrValue::Float(10.0));

        scene.add_prim(SMOKE_ROOT);
        scene.add_attribute(SMOKE_SIMULATION, ATTR_FORCE_CLEAR, AttrValue::Bool(false));
        scene.add_attribute(SMOKE_SIMULATION, ATTR_FORCE_SIMULATE, AttrValue::Bool(true));
        scene.add_attribute(SMOKE_PROBES, ATTR_TRANSLATE, AttrValue::Vec3(Vec3::ZERO));

        for path in [
            FLOW_OFFSCREEN_VELOCITY,
            FLOW_RENDER_VELOCITY,
            FLOW_OFFSCREEN_PRESSURE,
            FLOW_RENDER_PRESSURE,
        ] {
            scene.add_attribute(path, ATTR_LAYER, AttrValue::Int(FLOW_LAYER_SHOWN));
        }
        for path in [FLOW_EMITTER_VELOCITY, FLOW_EMITTER_PRESSURE] {
            scene.add_attribute(path, ATTR_ENABLED, AttrValue::Bool(true));
        }
        for path in [FLOW_RAY_MARCH, FLOW_SHADOW] {
            scene.add_attribute(path, ATTR_COLORMAP_MIN, AttrValue::Float(0.0));
            scene.add_attribute(path, ATTR_COLORMAP_MAX, AttrValue::Float(1.0));
        }

        scene.add_prim(INDEX_ROOT);
        for path in [INDEX_VOLUME, INDEX_SLICE_X, INDEX_SLICE_Y, INDEX_SLICE_Z] {
            scene.add_relationship(path, REL_MATERIAL_BINDING);
            scene.add_attribute(path, ATTR_TRANSLATE, AttrValue::Vec3(Vec3::ZERO));
        }
        for path in [INDEX_VELOCITY_COLORMAP, INDEX_PRESSURE_COLORMAP] {
            scene.add_attribute(path, ATTR_DOMAIN, AttrValue::Vec2(glam::Vec2::new(0.0, 1.0)));
        }

        scene.set_bounds(
            STREAMLINES_BOUNDS,
            Aabb::new(Vec3::new(-200.0, 0.0, -100.0), Vec3::new(200.0, 150.0, 100.0)),
        );
        scene.set_bounds(
            SMOKE_BOUNDS,
            Aabb::new(Vec3::new(-300.0, 0.0, -120.0), Vec3::new(300.0, 160.0, 120.0)),
        );
        scene.set_bounds(
            INDEX_BOUNDS,
            Aabb::new(Vec3::new(-400.0, 0.0, -150.0), Vec3::new(400.0, 200.0, 150.0)),
        );
        scene
    }

    // -- Declaration --

    /// Declare an object (no-op if it exists).
    pub fn add_prim(&mut self, path: &str) {
        let _ = self.prims.entry(path.to_owned()).or_default();
    }

    /// Remove an object, e.g. to provoke a scene-integrity failure.
    pub fn remove_prim(&mut self, path: &str) {
        drop(self.prims.remove(path));
    }

    /// Declare an attribute with its initial value.
    pub fn add_attribute(&mut self, path: &str, attribute: &str, value: AttrValue) {
        let prim = self.prims.entry(path.to_owned()).or_default();
        drop(prim.attributes.insert(attribute.to_owned(), value));
    }

    /// Declare a variant set offering `values`.
    pub fn add_variant_set(&mut self, path: &str, variant_set: &str, values: &[&str]) {
        let prim = self.prims.entry(path.to_owned()).or_default();
        let set = prim.variant_sets.entry(variant_set.to_owned()).or_default();
        for v in values {
            if !set.values.iter().any(|existing| existing == v) {
                set.values.push((*v).to_owned());
            }
        }
    }

    /// Declare an unset relationship.
    pub fn add_relationship(&mut self, path: &str, relationship: &str) {
        let prim = self.prims.entry(path.to_owned()).or_default();
        let _ = prim.relationships.entry(relationship.to_owned()).or_default();
    }

    /// Give an object local bounds.
    pub fn set_bounds(&mut self, path: &str, bounds: Aabb) {
        self.prims.entry(path.to_owned()).or_default().bounds = Some(bounds);
    }

    /// Offset between an object's local and world bounds.
    pub fn set_world_offset(&mut self, path: &str, offset: Vec3) {
        self.prims.entry(path.to_owned()).or_default().world_offset = offset;
    }

    // -- Inspection --

    /// Most recent successful mutations in call order.
    #[must_use]
    pub fn calls(&self) -> &[SceneCall] {
        &self.calls
    }

    /// Forget the recorded calls and trigger counts.
    pub fn clear_calls(&mut self) {
        self.calls.clear();
        self.triggers.clear();
    }

    /// Own visibility of an object.
    #[must_use]
    pub fn is_visible(&self, path: &str) -> Option<bool> {
        self.prims.get(path).map(|p| p.visible)
    }

    /// Active state of an object.
    #[must_use]
    pub fn is_active(&self, path: &str) -> Option<bool> {
        self.prims.get(path).map(|p| p.active)
    }

    /// Current attribute value.
    #[must_use]
    pub fn attribute(&self, path: &str, attribute: &str) -> Option<&AttrValue> {
        self.prims.get(path)?.attributes.get(attribute)
    }

    /// Current variant selection.
    #[must_use]
    pub fn variant(&self, path: &str, variant_set: &str) -> Option<&str> {
        self.prims
            .get(path)?
            .variant_sets
            .get(variant_set)?
            .selection
            .as_deref()
    }

    /// Current relationship target.
    #[must_use]
    pub fn relationship(&self, path: &str, relationship: &str) -> Option<&str> {
        self.prims
            .get(path)?
            .relationships
            .get(relationship)?
            .as_deref()
    }

    /// Cross-section tool state.
    #[must_use]
    pub fn section(&self) -> SectionState {
        self.section
    }

    /// How many times `name` has been fired since the last
    /// [`clear_calls`](Self::clear_calls).
    #[must_use]
    pub fn trigger_count(&self, name: &str) -> usize {
        self.triggers.get(name).copied().unwrap_or(0)
    }

    /// Layers whose objects are currently shown.
    #[must_use]
    pub fn shown_layers(&self) -> Vec<VisualizationMode> {
        let visible = |p: &str| self.is_visible(p).unwrap_or(false);
        let index_root = visible(INDEX_ROOT);
        VisualizationMode::LAYERS
            .into_iter()
            .filter(|mode| match mode {
                VisualizationMode::SmokeProbe => {
                    visible(SMOKE_ROOT)
                        && self.attribute(SMOKE_SIMULATION, ATTR_FORCE_SIMULATE)
                            == Some(&AttrValue::Bool(true))
                }
                VisualizationMode::Streamline => {
                    visible(STREAMLINES_ROOT) && visible(STREAMLINES_CURVES)
                }
                VisualizationMode::IndexVolume => {
                    index_root && visible(INDEX_VOLUME)
                }
                VisualizationMode::IndexSlice => {
                    index_root
                        && [INDEX_SLICE_X, INDEX_SLICE_Y, INDEX_SLICE_Z]
                            .into_iter()
                            .any(visible)
                }
                VisualizationMode::None => false,
            })
            .collect()
    }

    fn record(&mut self, call: SceneCall) {
        if let SceneCall::Trigger { name, .. } = &call {
            *self.triggers.entry(name.clone()).or_default() += 1;
        }
        if self.call_log_limit == 0 {
            return;
        }
        self.calls.push(call);
        self.trim_calls();
    }

    fn trim_calls(&mut self) {
        if self.calls.len() > self.call_log_limit {
            let excess = self.calls.len() - self.call_log_limit;
            drop(self.calls.drain(..excess));
        }
    }

    fn prim_mut(&mut self, path: &str) -> SceneResult<&mut Prim> {
        self.prims.get_mut(path).ok_or_else(|| SceneError::PrimNotFound {
            path: path.to_owned(),
        })
    }
}

impl SceneBackend for InMemoryScene {
    fn set_variant(
        &mut self,
        path: &str,
        variant_set: &str,
        value: &str,
    ) -> SceneResult<()> {
        let set = self
            .prim_mut(path)?
            .variant_sets
            .get_mut(variant_set)
            .ok_or_else(|| SceneError::VariantSetNotFound {
                path: path.to_owned(),
                variant_set: variant_set.to_owned(),
            })?;
        if !set.values.iter().any(|v| v == value) {
            return Err(SceneError::VariantValueNotFound {
                path: path.to_owned(),
                variant_set: variant_set.to_owned(),
                value: value.to_owned(),
            });
        }
        set.selection = Some(value.to_owned());
        self.record(SceneCall::Variant {
            path: path.to_owned(),
            variant_set: variant_set.to_owned(),
            value: value.to_owned(),
        });
        Ok(())
    }

    fn set_attribute(
        &mut self,
        path: &str,
        attribute: &str,
        value: AttrValue,
    ) -> SceneResult<()> {
        let slot = self
            .prim_mut(path)?
            .attributes
            .get_mut(attribute)
            .ok_or_else(|| SceneError::AttributeNotFound {
                path: path.to_owned(),
                attribute: attribute.to_owned(),
            })?;
        *slot = value.clone();
        self.record(SceneCall::Attribute {
            path: path.to_owned(),
            attribute: attribute.to_owned(),
            value,
        });
        Ok(())
    }

    fn set_relationship(
        &mut self,
        path: &str,
        relationship: &str,
        target: &str,
    ) -> SceneResult<()> {
        let slot = self
            .prim_mut(path)?
            .relationships
            .get_mut(relationship)
            .ok_or_else(|| SceneError::RelationshipNotFound {
                path: path.to_owned(),
                relationship: relationship.to_owned(),
            })?;
        *slot = Some(target.to_owned());
        self.record(SceneCall::Relationship {
            path: path.to_owned(),
            relationship: relationship.to_owned(),
            target: target.to_owned(),
        });
        Ok(())
    }

    fn set_visibility(&mut self, path: &str, visible: bool) -> SceneResult<()> {
        self.prim_mut(path)?.visible = visible;
        self.record(SceneCall::Visibility {
            path: path.to_owned(),
            visible,
        });
        Ok(())
    }

    fn set_active(&mut self, path: &str, active: bool) -> SceneResult<()> {
        self.prim_mut(path)?.active = active;
        self.record(SceneCall::Active {
            path: path.to_owned(),
            active,
        });
        Ok(())
    }

    fn fire_trigger(
        &mut self,
        name: &str,
        payload: serde_json::Value,
    ) -> SceneResult<()> {
        self.record(SceneCall::Trigger {
            name: name.to_owned(),
            payload,
        });
        Ok(())
    }

    fn compute_bounds(
        &self,
        paths: &[&str],
        space: BoundsSpace,
    ) -> SceneResult<Aabb> {
        let mut total: Option<Aabb> = None;
        for path in paths {
            let prim = self.prims.get(*path).ok_or_else(|| {
                SceneError::PrimNotFound {
                    path: (*path).to_owned(),
                }
            })?;
            let Some(local) = prim.bounds else {
                continue;
            };
            let bounds = match space {
                BoundsSpace::Local => local,
                BoundsSpace::World => Aabb::new(
                    local.min + prim.world_offset,
                    local.max + prim.world_offset,
                ),
            };
            total = Some(total.map_or(bounds, |t| t.union(&bounds)));
        }
        total.ok_or_else(|| SceneError::EmptyBounds {
            paths: paths.iter().map(|p| (*p).to_owned()).collect(),
        })
    }

    fn set_section_enabled(&mut self, enabled: bool) -> SceneResult<()> {
        self.section.enabled = enabled;
        self.record(SceneCall::SectionEnabled(enabled));
        Ok(())
    }

    fn align_section_widget(
        &mut self,
        axis: Axis,
        direction: u8,
    ) -> SceneResult<()> {
        self.section.axis = Some(axis);
        self.section.direction = direction;
        self.record(SceneCall::SectionAligned { axis, direction });
        Ok(())
    }

    fn move_section_widget(&mut self, position: Vec3) -> SceneResult<()> {
        self.section.position = position;
        self.record(SceneCall::SectionMoved(position));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_objects_fail_with_integrity_errors() {
        let mut scene = InMemoryScene::new();
        assert_eq!(
            scene.set_visibility("/World/Nope", true),
            Err(SceneError::PrimNotFound {
                path: "/World/Nope".to_owned()
            })
        );
        scene.add_prim("/World/Box");
        assert!(matches!(
            scene.set_attribute("/World/Box", "radius", AttrValue::Float(1.0)),
            Err(SceneError::AttributeNotFound { .. })
        ));
        assert!(matches!(
            scene.set_variant("/World/Box", "Rims", "Aero"),
            Err(SceneError::VariantSetNotFound { .. })
        ));
        assert!(scene.calls().is_empty());
    }

    #[test]
    fn variant_values_are_checked() {
        let mut scene = InMemoryScene::new();
        scene.add_variant_set("/World/Car", "Rims", &["Standard", "Aero"]);
        scene.set_variant("/World/Car", "Rims", "Aero").unwrap();
        assert_eq!(scene.variant("/World/Car", "Rims"), Some("Aero"));
        assert!(matches!(
            scene.set_variant("/World/Car", "Rims", "Chrome"),
            Err(SceneError::VariantValueNotFound { .. })
        ));
    }

    #[test]
    fn bounds_union_and_world_offset() {
        let mut scene = InMemoryScene::new();
        scene.set_bounds("/a", Aabb::new(Vec3::ZERO, Vec3::ONE));
        scene.set_bounds("/b", Aabb::new(Vec3::splat(2.0), Vec3::splat(3.0)));
        scene.set_world_offset("/b", Vec3::X);
        scene.add_prim("/empty");

        let local = scene
            .compute_bounds(&["/a", "/b", "/empty"], BoundsSpace::Local)
            .unwrap();
        assert_eq!(local, Aabb::new(Vec3::ZERO, Vec3::splat(3.0)));
        let world = scene.compute_bounds(&["/b"], BoundsSpace::World).unwrap();
        assert_eq!(world.min, Vec3::new(3.0, 2.0, 2.0));
        assert!(matches!(
            scene.compute_bounds(&["/empty"], BoundsSpace::Local),
            Err(SceneError::EmptyBounds { .. })
        ));
    }

    #[test]
    fn call_log_keeps_only_the_latest_entries() {
        let mut scene = InMemoryScene::new().with_call_log_limit(3);
        scene.add_prim("/World/Box");
        for i in 0..10 {
            scene.set_visibility("/World/Box", i % 2 == 0).unwrap();
            scene.fire_trigger("carSwap", serde_json::json!({})).unwrap();
        }
        assert_eq!(scene.calls().len(), 3);
        assert_eq!(
            scene.calls().last(),
            Some(&SceneCall::Trigger {
                name: "carSwap".to_owned(),
                payload: serde_json::json!({}),
            })
        );
        assert_eq!(scene.trigger_count("carSwap"), 10);
    }

    #[test]
    fn disabled_call_log_records_nothing() {
        let mut scene = InMemoryScene::twin_stage().with_call_log_limit(0);
        scene.set_visibility(SMOKE_ROOT, false).unwrap();
        assert!(scene.calls().is_empty());
        assert_eq!(scene.is_visible(SMOKE_ROOT), Some(false));
    }

    #[test]
    fn twin_stage_starts_with_every_layer_shown() {
        let scene = InMemoryScene::twin_stage();
        assert_eq!(scene.shown_layers().len(), 4);
        assert!(scene
            .compute_bounds(&[INDEX_BOUNDS], BoundsSpace::World)
            .is_ok());
    }
}
