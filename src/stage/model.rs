//! Loaded model description and per-part handles.

use glam::{Quat, Vec3};

/// One sub-part of the loaded model, in model-local space after
/// auto-centering and scaling.
#[derive(Debug, Clone)]
pub struct PartDescriptor {
    /// Part name from the source asset (mesh or node name).
    pub name: String,
    /// Authored translation.
    pub position: Vec3,
    /// Authored rotation.
    pub rotation: Quat,
    /// Bounding-box center, used to derive the deconstruction direction.
    pub bbox_center: Vec3,
    /// Bounding-box extent.
    pub bbox_size: Vec3,
}

/// A loaded, normalized model: centered on the origin and scaled so its
/// largest extent matches the configured target.
#[derive(Debug, Clone, Default)]
pub struct ModelDescriptor {
    /// Sub-parts in asset traversal order.
    pub parts: Vec<PartDescriptor>,
}

impl ModelDescriptor {
    /// Number of sub-parts.
    #[must_use]
    pub fn part_count(&self) -> usize {
        self.parts.len()
    }
}

/// Mutable handle for one model part, mutated by scene timelines.
#[derive(Debug, Clone, PartialEq)]
pub struct PartHandle {
    /// Part name from the source asset.
    pub name: String,
    /// Current animated position.
    pub position: Vec3,
    /// Authored position the reassembly scene returns to.
    pub authored_position: Vec3,
    /// Authored rotation (not animated).
    pub rotation: Quat,
    /// Bounding-box center used for deconstruction direction.
    pub bbox_center: Vec3,
    /// Precomputed outward displacement for the deconstruction scene.
    pub deconstruction_offset: Vec3,
}

impl PartHandle {
    /// Build a handle from a loaded part descriptor. The deconstruction
    /// offset starts at zero and is filled in by the registry's one-time
    /// precompute pass.
    #[must_use]
    pub fn from_descriptor(part: &PartDescriptor) -> Self {
        Self {
            name: part.name.clone(),
            position: part.position,
            authored_position: part.position,
            rotation: part.rotation,
            bbox_center: part.bbox_center,
            deconstruction_offset: Vec3::ZERO,
        }
    }

    /// Target position when fully disassembled.
    #[must_use]
    pub fn deconstructed_position(&self) -> Vec3 {
        self.authored_position + self.deconstruction_offset
    }
}
