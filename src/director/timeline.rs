//! Declarative keyframe tables and the interpolation engine that applies
//! them.
//!
//! A timeline is data, not code: an ordered list of keyframes consumed by
//! one generic `apply` loop. Application is stateless in progress — the
//! same progress always produces the same registry state, so scrubbing
//! backward reverses the stage exactly.

use crate::easing::EasingFunction;
use crate::stage::{ObjectRegistry, PropertyKey, Value};

/// One authored start/end value pair for a property, active over a
/// sub-range of the owning scene's progress.
#[derive(Debug, Clone)]
pub struct Keyframe {
    /// Property this keyframe writes.
    pub target: PropertyKey,
    /// Value at and before the start of the span.
    pub from: Value,
    /// Value at and after the end of the span.
    pub to: Value,
    /// Span start within the scene's [0, 1] progress.
    pub offset: f32,
    /// Span length; zero authors a hard step at `offset`.
    pub duration: f32,
    /// Easing applied to the local span progress.
    pub easing: EasingFunction,
}

impl Keyframe {
    /// Scalar keyframe with the default easing.
    #[must_use]
    pub fn scalar(
        target: PropertyKey,
        from: f32,
        to: f32,
        offset: f32,
        duration: f32,
    ) -> Self {
        Self {
            target,
            from: Value::Scalar(from),
            to: Value::Scalar(to),
            offset,
            duration,
            easing: EasingFunction::DEFAULT,
        }
    }

    /// Vector keyframe with the default easing.
    #[must_use]
    pub fn vector(
        target: PropertyKey,
        from: glam::Vec3,
        to: glam::Vec3,
        offset: f32,
        duration: f32,
    ) -> Self {
        Self {
            target,
            from: Value::Vector(from),
            to: Value::Vector(to),
            offset,
            duration,
            easing: EasingFunction::DEFAULT,
        }
    }

    /// Replace the easing curve.
    #[must_use]
    pub fn with_easing(mut self, easing: EasingFunction) -> Self {
        self.easing = easing;
        self
    }

    /// End of the span.
    #[must_use]
    pub fn end(&self) -> f32 {
        self.offset + self.duration.max(0.0)
    }

    /// Value at scene progress `p`: start value before the span, eased
    /// interpolation within it, end value after it.
    #[must_use]
    pub fn sample(&self, p: f32) -> Value {
        if self.duration <= 0.0 {
            return if p < self.offset { self.from } else { self.to };
        }
        let t = ((p - self.offset) / self.duration).clamp(0.0, 1.0);
        self.from.lerp(self.to, self.easing.evaluate(t))
    }
}

/// An ordered keyframe table for one scene.
///
/// Keyframes are applied in authored order, so a later entry targeting the
/// same property wins — matching the source timelines where a caption's
/// fade-out tween overrides its earlier fade-in once both have completed.
#[derive(Debug, Clone, Default)]
pub struct Timeline {
    keyframes: Vec<Keyframe>,
}

impl Timeline {
    /// Build a timeline, normalizing spans if any keyframe ends past 1.0.
    ///
    /// Staggered tables (the deconstruction scene's per-part tweens)
    /// overflow the nominal unit duration; rescaling maps the furthest end
    /// back to 1.0 so the whole choreography plays within the trigger
    /// region, as the source's scrubbed timelines did.
    #[must_use]
    pub fn new(mut keyframes: Vec<Keyframe>) -> Self {
        let max_end = keyframes.iter().map(Keyframe::end).fold(0.0, f32::max);
        if max_end > 1.0 {
            for kf in &mut keyframes {
                kf.offset /= max_end;
                kf.duration /= max_end;
            }
        }
        Self { keyframes }
    }

    /// Apply the table at `progress` (clamped to [0, 1]).
    ///
    /// Every keyframe writes on every call, which makes application
    /// idempotent and direction-independent. Keyframes whose target is
    /// absent from the registry are no-ops.
    pub fn apply(&self, progress: f32, registry: &mut ObjectRegistry) {
        let p = progress.clamp(0.0, 1.0);
        for kf in &self.keyframes {
            registry.write(&kf.target, kf.sample(p));
        }
    }

    /// Number of keyframes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.keyframes.len()
    }

    /// Whether the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keyframes.is_empty()
    }

    /// The keyframe table.
    #[must_use]
    pub fn keyframes(&self) -> &[Keyframe] {
        &self.keyframes
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::stage::{LightKind, OverlayProp};

    fn test_registry() -> ObjectRegistry {
        let mut registry = ObjectRegistry::default();
        registry.insert_overlay("caption");
        registry
    }

    #[test]
    fn keyframe_endpoints_are_exact() {
        let kf = Keyframe::vector(
            PropertyKey::CameraEye,
            Vec3::new(0.0, 0.5, 5.0),
            Vec3::new(0.0, 0.25, 4.0),
            0.0,
            1.0,
        )
        .with_easing(EasingFunction::CubicOut);

        assert_eq!(kf.sample(0.0), Value::Vector(Vec3::new(0.0, 0.5, 5.0)));
        assert_eq!(kf.sample(1.0), Value::Vector(Vec3::new(0.0, 0.25, 4.0)));
    }

    #[test]
    fn keyframe_holds_start_before_and_end_after_span() {
        let kf = Keyframe::scalar(PropertyKey::FloorOpacity, 0.0, 0.25, 0.3, 0.6);
        assert_eq!(kf.sample(0.0), Value::Scalar(0.0));
        assert_eq!(kf.sample(0.29), Value::Scalar(0.0));
        assert_eq!(kf.sample(0.9), Value::Scalar(0.25));
        assert_eq!(kf.sample(1.0), Value::Scalar(0.25));
    }

    #[test]
    fn zero_duration_is_a_step() {
        let kf = Keyframe::scalar(PropertyKey::FloorOpacity, 0.0, 1.0, 0.5, 0.0);
        assert_eq!(kf.sample(0.49), Value::Scalar(0.0));
        assert_eq!(kf.sample(0.5), Value::Scalar(1.0));
    }

    #[test]
    fn linear_midpoint_is_halfway() {
        let kf = Keyframe::scalar(PropertyKey::ParticleOpacity, 0.0, 1.0, 0.0, 1.0)
            .with_easing(EasingFunction::Linear);
        assert_eq!(kf.sample(0.5), Value::Scalar(0.5));
    }

    #[test]
    fn apply_is_idempotent() {
        let timeline = Timeline::new(vec![
            Keyframe::vector(
                PropertyKey::ModelPosition,
                Vec3::new(0.0, -3.0, 0.0),
                Vec3::ZERO,
                0.0,
                1.0,
            ),
            Keyframe::scalar(
                PropertyKey::LightIntensity(LightKind::Ambient),
                0.1,
                0.15,
                0.0,
                0.5,
            ),
        ]);

        let mut registry = test_registry();
        timeline.apply(0.37, &mut registry);
        let first = registry.clone();
        timeline.apply(0.37, &mut registry);

        assert_eq!(
            registry.read(&PropertyKey::ModelPosition),
            first.read(&PropertyKey::ModelPosition)
        );
        assert_eq!(
            registry.read(&PropertyKey::LightIntensity(LightKind::Ambient)),
            first.read(&PropertyKey::LightIntensity(LightKind::Ambient))
        );
    }

    #[test]
    fn scrubbing_back_restores_start_state() {
        let timeline = Timeline::new(vec![Keyframe::vector(
            PropertyKey::ModelPosition,
            Vec3::new(0.0, -3.0, 0.0),
            Vec3::ZERO,
            0.0,
            1.0,
        )]);

        let mut registry = test_registry();
        timeline.apply(0.0, &mut registry);
        let start = registry.read(&PropertyKey::ModelPosition);

        for p in [0.2, 0.8, 1.0, 0.6, 0.1, 0.0] {
            timeline.apply(p, &mut registry);
        }
        assert_eq!(registry.read(&PropertyKey::ModelPosition), start);
    }

    #[test]
    fn later_keyframes_win_on_shared_targets() {
        // Fade-in over [0.1, 0.4], fade-out over [0.7, 1.0].
        let key = PropertyKey::Overlay("caption".to_owned(), OverlayProp::Opacity);
        let timeline = Timeline::new(vec![
            Keyframe::scalar(key.clone(), 0.0, 1.0, 0.1, 0.3),
            Keyframe::scalar(key.clone(), 1.0, 0.0, 0.7, 0.3),
        ]);

        let mut registry = test_registry();
        timeline.apply(0.5, &mut registry);
        assert_eq!(registry.read(&key), Some(Value::Scalar(1.0)));
        timeline.apply(1.0, &mut registry);
        assert_eq!(registry.read(&key), Some(Value::Scalar(0.0)));
        timeline.apply(0.5, &mut registry);
        assert_eq!(registry.read(&key), Some(Value::Scalar(1.0)));
    }

    #[test]
    fn missing_target_leaves_other_keyframes_intact() {
        let timeline = Timeline::new(vec![
            Keyframe::scalar(
                PropertyKey::Overlay("absent".to_owned(), OverlayProp::Opacity),
                0.0,
                1.0,
                0.0,
                1.0,
            ),
            Keyframe::scalar(PropertyKey::FloorOpacity, 0.0, 0.25, 0.0, 1.0)
                .with_easing(EasingFunction::Linear),
        ]);

        let mut registry = test_registry();
        timeline.apply(1.0, &mut registry);
        assert_eq!(
            registry.read(&PropertyKey::FloorOpacity),
            Some(Value::Scalar(0.25))
        );
    }

    #[test]
    fn overflowing_spans_are_normalized() {
        // Last span ends at 1.5; normalization maps it back to 1.0.
        let timeline = Timeline::new(vec![
            Keyframe::scalar(PropertyKey::FloorOpacity, 0.0, 1.0, 0.0, 1.0),
            Keyframe::scalar(PropertyKey::ParticleOpacity, 0.0, 1.0, 0.5, 1.0),
        ]);

        let max_end = timeline
            .keyframes()
            .iter()
            .map(Keyframe::end)
            .fold(0.0, f32::max);
        assert!((max_end - 1.0).abs() < 1e-6);

        // Both keyframes still complete at progress 1.
        let mut registry = test_registry();
        timeline.apply(1.0, &mut registry);
        assert_eq!(
            registry.read(&PropertyKey::ParticleOpacity),
            Some(Value::Scalar(1.0))
        );
    }
}
