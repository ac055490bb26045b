//! Scene backend seam.
//!
//! The renderer owns the scene graph; the orchestrator only issues thin,
//! synchronous mutations through [`SceneBackend`]. Every call fails with a
//! [`SceneError`] when the referenced object, attribute, variant set or
//! relationship does not exist.

pub mod layout;
pub mod memory;
pub mod placement;

use std::fmt;

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Values
// ---------------------------------------------------------------------------

/// Value written to a scene attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AttrValue {
    /// Boolean flag.
    Bool(bool),
    /// Integer (render layers, enums).
    Int(i64),
    /// Scalar.
    Float(f32),
    /// Two-component vector (colormap domains).
    Vec2(Vec2),
    /// Three-component vector (translations).
    Vec3(Vec3),
}

/// Coordinate space for [`SceneBackend::compute_bounds`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundsSpace {
    /// Relative to each object's parent.
    Local,
    /// World space.
    World,
}

/// World axis the cross-section widget is aligned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    /// X axis.
    X,
    /// Y axis.
    Y,
    /// Z axis.
    Z,
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner.
    pub min: Vec3,
    /// Maximum corner.
    pub max: Vec3,
}

impl Aabb {
    /// Box spanning `min` to `max`.
    #[must_use]
    pub const fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Center of the box.
    #[must_use]
    pub fn midpoint(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Extent along each axis.
    #[must_use]
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Smallest box containing both.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Scene-integrity failure: something the orchestrator expects is missing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SceneError {
    /// No object at `path`.
    PrimNotFound {
        /// Requested object path.
        path: String,
    },
    /// Object exists but has no such attribute.
    AttributeNotFound {
        /// Object path.
        path: String,
        /// Requested attribute.
        attribute: String,
    },
    /// Object exists but has no such variant set.
    VariantSetNotFound {
        /// Object path.
        path: String,
        /// Requested variant set.
        variant_set: String,
    },
    /// Variant set exists but does not offer the value.
    VariantValueNotFound {
        /// Object path.
        path: String,
        /// Variant set.
        variant_set: String,
        /// Requested value.
        value: String,
    },
    /// Object exists but has no such relationship.
    RelationshipNotFound {
        /// Object path.
        path: String,
        /// Requested relationship.
        relationship: String,
    },
    /// None of the objects contributed any geometry.
    EmptyBounds {
        /// Objects that were measured.
        paths: Vec<String>,
    },
}

impl fmt::Display for SceneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PrimNotFound { path } => {
                write!(f, "prim '{path}' not found")
            }
            Self::AttributeNotFound { path, attribute } => {
                write!(f, "attribute '{attribute}' not found on '{path}'")
            }
            Self::VariantSetNotFound { path, variant_set } => {
                write!(f, "variant set '{variant_set}' not found on '{path}'")
            }
            Self::VariantValueNotFound {
                path,
                variant_set,
                value,
            } => write!(
                f,
                "variant '{value}' not offered by '{variant_set}' on '{path}'"
            ),
            Self::RelationshipNotFound { path, relationship } => write!(
                f,
                "relationship '{relationship}' not found on '{path}'"
            ),
            Self::EmptyBounds { paths } => {
                write!(f, "no bounds for {}", paths.join(", "))
            }
        }
    }
}

impl std::error::Error for SceneError {}

/// Result alias for scene backend calls.
pub type SceneResult<T> = Result<T, SceneError>;

// ---------------------------------------------------------------------------
// Backend
// ---------------------------------------------------------------------------

/// Mutation primitives of the rendering host's scene graph.
///
/// Implementations are expected to be synchronous and cheap; the
/// orchestrator calls them from the frame thread.
pub trait SceneBackend {
    /// Select `value` in `variant_set` on the object at `path`.
    fn set_variant(
        &mut self,
        path: &str,
        variant_set: &str,
        value: &str,
    ) -> SceneResult<()>;

    /// Write an existing attribute.
    fn set_attribute(
        &mut self,
        path: &str,
        attribute: &str,
        value: AttrValue,
    ) -> SceneResult<()>;

    /// Point a relationship (e.g. a material binding) at `target`.
    fn set_relationship(
        &mut self,
        path: &str,
        relationship: &str,
        target: &str,
    ) -> SceneResult<()>;

    /// Show or hide the object and its descendants.
    fn set_visibility(&mut self, path: &str, visible: bool) -> SceneResult<()>;

    /// Activate or deactivate the object.
    fn set_active(&mut self, path: &str, active: bool) -> SceneResult<()>;

    /// Push a named event onto the host's message bus.
    fn fire_trigger(
        &mut self,
        name: &str,
        payload: serde_json::Value,
    ) -> SceneResult<()>;

    /// Union of the bounds of every object in `paths`.
    fn compute_bounds(
        &self,
        paths: &[&str],
        space: BoundsSpace,
    ) -> SceneResult<Aabb>;

    /// Show or hide the cross-section tool.
    fn set_section_enabled(&mut self, enabled: bool) -> SceneResult<()>;

    /// Align the cross-section widget and choose which side it clips.
    fn align_section_widget(
        &mut self,
        axis: Axis,
        direction: u8,
    ) -> SceneResult<()>;

    /// Move the cross-section widget to a world position.
    fn move_section_widget(&mut self, position: Vec3) -> SceneResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aabb_midpoint_and_size() {
        let b = Aabb::new(Vec3::new(-2.0, 0.0, 4.0), Vec3::new(2.0, 10.0, 6.0));
        assert_eq!(b.midpoint(), Vec3::new(0.0, 5.0, 5.0));
        assert_eq!(b.size(), Vec3::new(4.0, 10.0, 2.0));
    }

    #[test]
    fn aabb_union_covers_both() {
        let a = Aabb::new(Vec3::ZERO, Vec3::ONE);
        let b = Aabb::new(Vec3::splat(-1.0), Vec3::splat(0.5));
        let u = a.union(&b);
        assert_eq!(u.min, Vec3::splat(-1.0));
        assert_eq!(u.max, Vec3::ONE);
    }

    #[test]
    fn error_messages_name_the_object() {
        let e = SceneError::AttributeNotFound {
            path: "/World/IndeX".to_owned(),
            attribute: "radius".to_owned(),
        };
        assert_eq!(e.to_string(), "attribute 'radius' not found on '/World/IndeX'");
    }
}
