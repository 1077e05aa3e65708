//! The object registry: named mutable handles for everything timelines
//! animate.
//!
//! The registry replaces the original experience's module-level globals
//! (camera, model, lights referenced by free functions) with one explicit
//! owner passed `&mut` into the director. Writes resolve by property key;
//! a key whose target is absent (an overlay the page never registered, a
//! part index past the model's range) is a silent no-op so timelines
//! authored against a richer stage still run.

pub mod camera;
pub mod deconstruct;
pub mod model;
pub mod overlay;

use glam::{Mat4, Vec3};
use rand::Rng;
use rustc_hash::FxHashMap;

pub use camera::{CameraPose, CameraUniform};
pub use model::{ModelDescriptor, PartDescriptor, PartHandle};
pub use overlay::{OverlayProp, OverlayStyle};

/// The lights of the showcase stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LightKind {
    /// Subtle fill from all directions.
    Ambient,
    /// Warm key light from top-right.
    Key,
    /// Cool fill from the left.
    Fill,
    /// Blue rim from behind.
    Rim,
    /// Spot used for the reassembly light sweep.
    Sweep,
    /// Point light for the energy-awakening scene.
    Energy,
}

/// Scalar light intensities plus the sweep spot's animatable X position.
#[derive(Debug, Clone, PartialEq)]
pub struct LightRig {
    /// Ambient intensity.
    pub ambient: f32,
    /// Key light intensity.
    pub key: f32,
    /// Fill light intensity.
    pub fill: f32,
    /// Rim light intensity.
    pub rim: f32,
    /// Sweep spot intensity (0 except during the reassembly sweep).
    pub sweep: f32,
    /// Energy point-light intensity.
    pub energy: f32,
    /// Sweep spot world X position.
    pub sweep_x: f32,
}

impl Default for LightRig {
    fn default() -> Self {
        Self {
            ambient: 0.1,
            key: 1.5,
            fill: 0.4,
            rim: 0.8,
            sweep: 0.0,
            energy: 0.0,
            sweep_x: -5.0,
        }
    }
}

impl LightRig {
    /// Read one intensity.
    #[must_use]
    pub fn intensity(&self, kind: LightKind) -> f32 {
        match kind {
            LightKind::Ambient => self.ambient,
            LightKind::Key => self.key,
            LightKind::Fill => self.fill,
            LightKind::Rim => self.rim,
            LightKind::Sweep => self.sweep,
            LightKind::Energy => self.energy,
        }
    }

    /// Mutable access to one intensity.
    pub fn intensity_mut(&mut self, kind: LightKind) -> &mut f32 {
        match kind {
            LightKind::Ambient => &mut self.ambient,
            LightKind::Key => &mut self.key,
            LightKind::Fill => &mut self.fill,
            LightKind::Rim => &mut self.rim,
            LightKind::Sweep => &mut self.sweep,
            LightKind::Energy => &mut self.energy,
        }
    }
}

/// Transform of the model group: the showcase only translates and yaws it.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ModelTransform {
    /// Group translation.
    pub position: Vec3,
    /// Rotation around Y in radians.
    pub yaw: f32,
}

impl ModelTransform {
    /// World matrix for the group.
    #[must_use]
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_translation(self.position) * Mat4::from_rotation_y(self.yaw)
    }
}

/// A value a keyframe can write: one scalar or one vector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    /// Scalar property value.
    Scalar(f32),
    /// Vector property value.
    Vector(Vec3),
}

impl Value {
    /// Linear interpolation toward `to`. Mismatched kinds (unreachable via
    /// the keyframe constructors) return `self` unchanged.
    #[must_use]
    pub fn lerp(self, to: Self, t: f32) -> Self {
        match (self, to) {
            (Self::Scalar(a), Self::Scalar(b)) => Self::Scalar(a + (b - a) * t),
            (Self::Vector(a), Self::Vector(b)) => Self::Vector(a.lerp(b, t)),
            _ => self,
        }
    }

    /// The scalar payload, if any.
    #[must_use]
    pub fn as_scalar(self) -> Option<f32> {
        match self {
            Self::Scalar(v) => Some(v),
            Self::Vector(_) => None,
        }
    }

    /// The vector payload, if any.
    #[must_use]
    pub fn as_vector(self) -> Option<Vec3> {
        match self {
            Self::Vector(v) => Some(v),
            Self::Scalar(_) => None,
        }
    }
}

/// Logical name of one animatable property on the stage.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyKey {
    /// Camera eye position (vector).
    CameraEye,
    /// Model group translation (vector).
    ModelPosition,
    /// Model group yaw in radians (scalar).
    ModelYaw,
    /// Position of one model part (vector).
    PartPosition(usize),
    /// Intensity of one light (scalar).
    LightIntensity(LightKind),
    /// Sweep spot X position (scalar).
    SweepLightX,
    /// Reflective floor material opacity (scalar).
    FloorOpacity,
    /// Global particle-system opacity uniform (scalar).
    ParticleOpacity,
    /// One scalar style field of a named caption overlay.
    Overlay(String, OverlayProp),
}

/// Mutable handles for every renderable the timelines animate.
///
/// Entries have externally owned lifetime: the model parts are created
/// during asset load and live as long as the showcase.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectRegistry {
    /// Camera pose; `eye` is timeline-driven, `target` tracks the model.
    pub camera: CameraPose,
    /// Model group transform.
    pub model: ModelTransform,
    /// Light intensities and sweep position.
    pub lights: LightRig,
    /// Reflective floor opacity (fades in during the opening scene).
    pub floor_opacity: f32,
    /// Global particle opacity uniform, mirrored into the particle field.
    pub particle_opacity: f32,
    parts: Vec<PartHandle>,
    overlays: FxHashMap<String, OverlayStyle>,
}

impl ObjectRegistry {
    /// Empty registry with the given camera pose.
    #[must_use]
    pub fn new(camera: CameraPose) -> Self {
        Self {
            camera,
            ..Self::default()
        }
    }

    /// Install the loaded model, replacing any previous parts.
    pub fn install_model(&mut self, descriptor: &ModelDescriptor) {
        self.parts = descriptor
            .parts
            .iter()
            .map(PartHandle::from_descriptor)
            .collect();
    }

    /// One-time precompute of per-part deconstruction offsets. Call after
    /// [`install_model`](Self::install_model).
    pub fn precompute_deconstruction(&mut self, rng: &mut impl Rng) {
        for part in &mut self.parts {
            part.deconstruction_offset =
                deconstruct::deconstruction_offset(part.bbox_center, rng);
        }
    }

    /// Register a caption overlay so timelines can animate it.
    /// Re-registering an existing overlay keeps its current style.
    pub fn insert_overlay(&mut self, name: &str) {
        if !self.overlays.contains_key(name) {
            let _ = self
                .overlays
                .insert(name.to_owned(), OverlayStyle::default());
        }
    }

    /// Model part handles in asset order.
    #[must_use]
    pub fn parts(&self) -> &[PartHandle] {
        &self.parts
    }

    /// Style of a named overlay, if registered.
    #[must_use]
    pub fn overlay(&self, name: &str) -> Option<&OverlayStyle> {
        self.overlays.get(name)
    }

    /// Registered overlays with their current styles, unordered.
    pub fn overlays(&self) -> impl Iterator<Item = (&str, &OverlayStyle)> {
        self.overlays.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Write one property. Missing targets and kind mismatches are silent
    /// no-ops; this never panics.
    pub fn write(&mut self, key: &PropertyKey, value: Value) {
        match (key, value) {
            (PropertyKey::CameraEye, Value::Vector(v)) => self.camera.eye = v,
            (PropertyKey::ModelPosition, Value::Vector(v)) => {
                self.model.position = v;
            }
            (PropertyKey::ModelYaw, Value::Scalar(v)) => self.model.yaw = v,
            (PropertyKey::PartPosition(i), Value::Vector(v)) => {
                if let Some(part) = self.parts.get_mut(*i) {
                    part.position = v;
                }
            }
            (PropertyKey::LightIntensity(kind), Value::Scalar(v)) => {
                *self.lights.intensity_mut(*kind) = v;
            }
            (PropertyKey::SweepLightX, Value::Scalar(v)) => {
                self.lights.sweep_x = v;
            }
            (PropertyKey::FloorOpacity, Value::Scalar(v)) => {
                self.floor_opacity = v;
            }
            (PropertyKey::ParticleOpacity, Value::Scalar(v)) => {
                self.particle_opacity = v;
            }
            (PropertyKey::Overlay(name, prop), Value::Scalar(v)) => {
                if let Some(style) = self.overlays.get_mut(name) {
                    *style.field_mut(*prop) = v;
                }
            }
            // Kind mismatch: authored tables cannot produce this, but a
            // hand-built keyframe must not bring the frame down.
            _ => {}
        }
    }

    /// Read one property back. `None` for missing targets.
    #[must_use]
    pub fn read(&self, key: &PropertyKey) -> Option<Value> {
        match key {
            PropertyKey::CameraEye => Some(Value::Vector(self.camera.eye)),
            PropertyKey::ModelPosition => {
                Some(Value::Vector(self.model.position))
            }
            PropertyKey::ModelYaw => Some(Value::Scalar(self.model.yaw)),
            PropertyKey::PartPosition(i) => {
                self.parts.get(*i).map(|p| Value::Vector(p.position))
            }
            PropertyKey::LightIntensity(kind) => {
                Some(Value::Scalar(self.lights.intensity(*kind)))
            }
            PropertyKey::SweepLightX => Some(Value::Scalar(self.lights.sweep_x)),
            PropertyKey::FloorOpacity => Some(Value::Scalar(self.floor_opacity)),
            PropertyKey::ParticleOpacity => {
                Some(Value::Scalar(self.particle_opacity))
            }
            PropertyKey::Overlay(name, prop) => self
                .overlays
                .get(name)
                .map(|style| Value::Scalar(style.field(*prop))),
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    fn registry_with_parts(centers: &[Vec3]) -> ObjectRegistry {
        let descriptor = ModelDescriptor {
            parts: centers
                .iter()
                .enumerate()
                .map(|(i, &c)| PartDescriptor {
                    name: format!("part-{i}"),
                    position: c,
                    rotation: glam::Quat::IDENTITY,
                    bbox_center: c,
                    bbox_size: Vec3::ONE,
                })
                .collect(),
        };
        let mut registry = ObjectRegistry::default();
        registry.install_model(&descriptor);
        registry
    }

    #[test]
    fn write_and_read_round_trip() {
        let mut registry = registry_with_parts(&[Vec3::X]);
        registry.insert_overlay("final-text");

        let cases = [
            (PropertyKey::CameraEye, Value::Vector(Vec3::new(1.0, 2.0, 3.0))),
            (PropertyKey::ModelPosition, Value::Vector(Vec3::Y)),
            (PropertyKey::ModelYaw, Value::Scalar(0.5)),
            (PropertyKey::PartPosition(0), Value::Vector(Vec3::Z)),
            (
                PropertyKey::LightIntensity(LightKind::Energy),
                Value::Scalar(2.0),
            ),
            (PropertyKey::SweepLightX, Value::Scalar(5.0)),
            (PropertyKey::FloorOpacity, Value::Scalar(0.25)),
            (PropertyKey::ParticleOpacity, Value::Scalar(0.8)),
            (
                PropertyKey::Overlay("final-text".to_owned(), OverlayProp::Opacity),
                Value::Scalar(1.0),
            ),
        ];

        for (key, value) in cases {
            registry.write(&key, value);
            assert_eq!(registry.read(&key), Some(value), "key {key:?}");
        }
    }

    #[test]
    fn missing_targets_are_no_ops() {
        let mut registry = registry_with_parts(&[Vec3::X]);
        let before = registry.clone();

        registry.write(&PropertyKey::PartPosition(99), Value::Vector(Vec3::Z));
        registry.write(
            &PropertyKey::Overlay("absent".to_owned(), OverlayProp::Opacity),
            Value::Scalar(1.0),
        );

        assert_eq!(registry.read(&PropertyKey::PartPosition(99)), None);
        assert_eq!(
            registry.read(&PropertyKey::PartPosition(0)),
            before.read(&PropertyKey::PartPosition(0))
        );
    }

    #[test]
    fn kind_mismatch_is_a_no_op() {
        let mut registry = registry_with_parts(&[]);
        registry.write(&PropertyKey::CameraEye, Value::Scalar(1.0));
        assert_eq!(
            registry.read(&PropertyKey::CameraEye),
            Some(Value::Vector(CameraPose::default().eye))
        );
    }

    #[test]
    fn precompute_fills_every_part() {
        let mut registry =
            registry_with_parts(&[Vec3::ZERO, Vec3::X, Vec3::new(0.0, 2.0, 1.0)]);
        let mut rng = StdRng::seed_from_u64(5);
        registry.precompute_deconstruction(&mut rng);

        for part in registry.parts() {
            assert!(part.deconstruction_offset.length() > 0.0);
            assert_eq!(
                part.deconstructed_position(),
                part.authored_position + part.deconstruction_offset
            );
        }
    }

    #[test]
    fn insert_overlay_is_idempotent() {
        let mut registry = ObjectRegistry::default();
        registry.insert_overlay("whisper-1");
        registry.write(
            &PropertyKey::Overlay("whisper-1".to_owned(), OverlayProp::Opacity),
            Value::Scalar(0.7),
        );
        registry.insert_overlay("whisper-1");
        assert_eq!(
            registry.overlay("whisper-1").map(|s| s.opacity),
            Some(0.7),
            "re-registering must not reset style"
        );
    }
}
