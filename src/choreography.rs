//! The authored seven-scene scroll narrative.
//!
//! Each scene is a declarative keyframe table built once at boot from the
//! loaded registry state. The tables are data consumed by the generic
//! timeline engine; nothing here runs per frame.
//!
//! Keyframe `from` values are threaded explicitly from scene to scene
//! (the camera ends scene 2 where scene 3 picks it up), which is what
//! makes scrubbing to an arbitrary scroll offset land on a consistent
//! stage.

use std::f32::consts::PI;

use glam::Vec3;

use crate::director::{
    DocumentLayout, Keyframe, Marker, Scene, Timeline,
};
use crate::easing::EasingFunction;
use crate::options::Options;
use crate::stage::{
    LightKind, ObjectRegistry, OverlayProp, PropertyKey,
};

/// Number of scenes in the narrative.
pub const SCENE_COUNT: usize = 7;

/// Caption overlays the choreography animates. Registered at boot;
/// deployments may omit any of them and the related keyframes become
/// no-ops.
pub const OVERLAY_NAMES: &[&str] = &[
    "whisper-1",
    "subtitle-2",
    "subtitle-2b",
    "title-3",
    "title-3b",
    "depth-text",
    "depth-sub",
    "reveal-line",
    "spec-1",
    "spec-2",
    "spec-3",
    "spec-4",
    "final-text",
];

/// Marker shown once the opening scene is mostly scrolled past.
pub const MARKER_NAV: &str = "nav";
/// Marker that hides the scroll indicator after the first real scroll.
pub const MARKER_SCROLL_INDICATOR: &str = "scroll-indicator";

fn caption(name: &str, prop: OverlayProp) -> PropertyKey {
    PropertyKey::Overlay(name.to_owned(), prop)
}

/// Fade a caption in over `[offset, offset + in_duration]` and out over
/// `[out_offset, out_offset + out_duration]`.
fn caption_in_out(
    keyframes: &mut Vec<Keyframe>,
    name: &str,
    offset: f32,
    in_duration: f32,
    out_offset: f32,
    out_duration: f32,
) {
    keyframes.push(Keyframe::scalar(
        caption(name, OverlayProp::Opacity),
        0.0,
        1.0,
        offset,
        in_duration,
    ));
    keyframes.push(Keyframe::scalar(
        caption(name, OverlayProp::Opacity),
        1.0,
        0.0,
        out_offset,
        out_duration,
    ));
}

/// Build the scroll markers for the current layout.
#[must_use]
pub fn build_markers(layout: &DocumentLayout) -> Vec<Marker> {
    vec![
        // Nav appears when the opening section's bottom crosses 80% of
        // the viewport.
        Marker {
            id: MARKER_NAV.to_owned(),
            threshold: 0.2 * layout.viewport_height(),
        },
        // Scroll indicator disappears 100px into the document.
        Marker {
            id: MARKER_SCROLL_INDICATOR.to_owned(),
            threshold: 100.0,
        },
    ]
}

/// Build the seven scenes against the loaded registry state.
///
/// Part keyframes are derived from the registry's authored part positions
/// and precomputed deconstruction offsets, so this must run after the
/// model is installed.
#[must_use]
pub fn build_scenes(
    registry: &ObjectRegistry,
    layout: &DocumentLayout,
    options: &Options,
) -> Vec<Scene> {
    let lighting = &options.lighting;
    let drop_depth = options.loader.drop_depth;
    let scrub = |s: f32| s * options.scroll.scrub_scale;

    // Camera waypoints threaded through the narrative.
    let cam = [
        Vec3::new(0.0, 0.5, 5.0),  // opening pose
        Vec3::new(0.0, 0.3, 4.0),  // after energy awakening
        Vec3::new(2.5, 1.0, 3.5),  // after deconstruction orbit
        Vec3::new(0.0, 0.5, 5.5),  // after typography pull-back
        Vec3::new(0.0, 0.3, 4.5),  // after reassembly return
        Vec3::new(-0.5, 0.8, 4.0), // after luxury rotation
        Vec3::new(-0.5, 0.5, 8.0), // final retreat
    ];

    let mut scenes = Vec::with_capacity(SCENE_COUNT);

    // ── Scene 1: void. Model rises from darkness, floor fades in. ──────
    {
        let mut kf = vec![
            Keyframe::vector(
                PropertyKey::ModelPosition,
                Vec3::new(0.0, -drop_depth, 0.0),
                Vec3::ZERO,
                0.0,
                1.0,
            )
            .with_easing(EasingFunction::CubicOut),
            Keyframe::scalar(PropertyKey::FloorOpacity, 0.0, 0.25, 0.3, 0.6),
            Keyframe::scalar(
                PropertyKey::LightIntensity(LightKind::Ambient),
                lighting.ambient,
                0.15,
                0.0,
                0.5,
            ),
        ];
        caption_in_out(&mut kf, "whisper-1", 0.1, 0.3, 0.7, 0.3);
        scenes.push(
            Scene::new("void", layout.region(0), Timeline::new(kf))
                .with_priority(0)
                .with_scrub(scrub(1.2)),
        );
    }

    // ── Scene 2: energy awakening. Particles activate, model turns. ────
    {
        let mut kf = vec![
            Keyframe::vector(PropertyKey::CameraEye, cam[0], cam[1], 0.0, 1.0),
            Keyframe::scalar(PropertyKey::ModelYaw, 0.0, PI * 0.15, 0.0, 1.0),
            Keyframe::scalar(PropertyKey::ParticleOpacity, 0.0, 1.0, 0.0, 1.0)
                .with_easing(EasingFunction::Linear),
            Keyframe::scalar(
                PropertyKey::LightIntensity(LightKind::Energy),
                0.0,
                2.0,
                0.2,
                0.5,
            ),
        ];
        for (name, offset) in [("subtitle-2", 0.2), ("subtitle-2b", 0.35)] {
            caption_in_out(&mut kf, name, offset, 0.3, 0.8, 0.2);
            kf.push(Keyframe::scalar(
                caption(name, OverlayProp::TranslateY),
                40.0,
                0.0,
                offset,
                0.3,
            ));
        }
        scenes.push(
            Scene::new("energy-awakening", layout.region(1), Timeline::new(kf))
                .with_priority(1)
                .with_scrub(scrub(1.2)),
        );
    }

    // ── Scene 3: structural deconstruction. Parts separate, camera
    // orbits to the side. ──────────────────────────────────────────────
    {
        let mut kf = vec![
            Keyframe::vector(PropertyKey::CameraEye, cam[1], cam[2], 0.0, 1.0),
            Keyframe::scalar(PropertyKey::ParticleOpacity, 1.0, 0.0, 0.0, 0.3)
                .with_easing(EasingFunction::Linear),
            Keyframe::scalar(
                PropertyKey::LightIntensity(LightKind::Energy),
                2.0,
                0.0,
                0.0,
                0.5,
            ),
        ];
        for (i, part) in registry.parts().iter().enumerate() {
            kf.push(
                Keyframe::vector(
                    PropertyKey::PartPosition(i),
                    part.authored_position,
                    part.deconstructed_position(),
                    0.1 + i as f32 * 0.02,
                    1.0,
                )
                .with_easing(EasingFunction::CubicInOut),
            );
        }
        for (name, offset) in [("title-3", 0.3), ("title-3b", 0.45)] {
            caption_in_out(&mut kf, name, offset, 0.3, 0.85, 0.2);
            kf.push(Keyframe::scalar(
                caption(name, OverlayProp::TranslateX),
                -60.0,
                0.0,
                offset,
                0.4,
            ));
        }
        scenes.push(
            Scene::new("deconstruction", layout.region(2), Timeline::new(kf))
                .with_priority(2)
                .with_scrub(scrub(1.5)),
        );
    }

    // ── Scene 4: typography from depth. Camera pulls back while the
    // monumental text settles from 2.5x scale. ─────────────────────────
    {
        let mut kf = vec![Keyframe::vector(
            PropertyKey::CameraEye,
            cam[2],
            cam[3],
            0.0,
            1.0,
        )];
        caption_in_out(&mut kf, "depth-text", 0.1, 0.5, 0.82, 0.2);
        kf.push(Keyframe::scalar(
            caption("depth-text", OverlayProp::Scale),
            2.5,
            1.0,
            0.1,
            0.5,
        ));
        caption_in_out(&mut kf, "depth-sub", 0.4, 0.3, 0.82, 0.2);
        kf.push(Keyframe::scalar(
            caption("depth-sub", OverlayProp::TranslateY),
            20.0,
            0.0,
            0.4,
            0.3,
        ));
        scenes.push(
            Scene::new("typography-depth", layout.region(3), Timeline::new(kf))
                .with_priority(3)
                .with_scrub(scrub(1.2)),
        );
    }

    // ── Scene 5: perfect reassembly. Parts glide home, light sweep. ────
    {
        let mut kf = vec![Keyframe::vector(
            PropertyKey::CameraEye,
            cam[3],
            cam[4],
            0.0,
            1.0,
        )];
        for (i, part) in registry.parts().iter().enumerate() {
            kf.push(
                Keyframe::vector(
                    PropertyKey::PartPosition(i),
                    part.deconstructed_position(),
                    part.authored_position,
                    i as f32 * 0.01,
                    1.0,
                )
                .with_easing(EasingFunction::QuarticInOut),
            );
        }
        kf.push(Keyframe::scalar(
            PropertyKey::LightIntensity(LightKind::Sweep),
            0.0,
            3.0,
            0.4,
            0.3,
        ));
        kf.push(Keyframe::scalar(PropertyKey::SweepLightX, -5.0, 5.0, 0.4, 0.5));
        kf.push(Keyframe::scalar(
            PropertyKey::LightIntensity(LightKind::Sweep),
            3.0,
            0.0,
            0.7,
            0.3,
        ));
        caption_in_out(&mut kf, "reveal-line", 0.5, 0.3, 0.85, 0.2);
        kf.push(Keyframe::scalar(
            caption("reveal-line", OverlayProp::TranslateY),
            20.0,
            0.0,
            0.5,
            0.3,
        ));
        scenes.push(
            Scene::new("reassembly", layout.region(4), Timeline::new(kf))
                .with_priority(4)
                .with_scrub(scrub(1.5)),
        );
    }

    // ── Scene 6: luxury rotation. Full slow turn, specs appear one by
    // one. ─────────────────────────────────────────────────────────────
    {
        let mut kf = vec![
            Keyframe::vector(PropertyKey::CameraEye, cam[4], cam[5], 0.0, 1.0),
            Keyframe::scalar(
                PropertyKey::ModelYaw,
                PI * 0.15,
                PI * 2.15,
                0.0,
                1.0,
            )
            .with_easing(EasingFunction::Linear),
        ];
        for (i, name) in ["spec-1", "spec-2", "spec-3", "spec-4"]
            .into_iter()
            .enumerate()
        {
            let offset = 0.15 + i as f32 * 0.15;
            kf.push(Keyframe::scalar(
                caption(name, OverlayProp::Opacity),
                0.0,
                1.0,
                offset,
                0.15,
            ));
            kf.push(Keyframe::scalar(
                caption(name, OverlayProp::TranslateY),
                25.0,
                0.0,
                offset,
                0.2,
            ));
            kf.push(Keyframe::scalar(
                caption(name, OverlayProp::Opacity),
                1.0,
                0.0,
                0.85,
                0.15,
            ));
        }
        scenes.push(
            Scene::new("luxury-rotation", layout.region(5), Timeline::new(kf))
                .with_priority(5)
                .with_scrub(scrub(1.5)),
        );
    }

    // ── Scene 7: final strike. Camera retreats into darkness. ──────────
    {
        let mut kf = vec![
            Keyframe::vector(PropertyKey::CameraEye, cam[5], cam[6], 0.0, 1.0),
            Keyframe::vector(
                PropertyKey::ModelPosition,
                Vec3::ZERO,
                Vec3::new(0.0, -0.5, 0.0),
                0.0,
                1.0,
            ),
            Keyframe::scalar(
                PropertyKey::LightIntensity(LightKind::Key),
                lighting.key,
                0.3,
                0.3,
                0.5,
            ),
            Keyframe::scalar(
                PropertyKey::LightIntensity(LightKind::Rim),
                lighting.rim,
                0.2,
                0.3,
                0.5,
            ),
            Keyframe::scalar(PropertyKey::FloorOpacity, 0.25, 0.0, 0.3, 0.5),
            Keyframe::scalar(
                caption("final-text", OverlayProp::Opacity),
                0.0,
                1.0,
                0.4,
                0.4,
            ),
            Keyframe::scalar(
                caption("final-text", OverlayProp::LetterSpacing),
                0.8,
                0.1,
                0.4,
                0.5,
            ),
        ];
        scenes.push(
            Scene::new("final-strike", layout.region(6), Timeline::new(kf))
                .with_priority(6)
                .with_scrub(scrub(1.5)),
        );
    }

    scenes
}

#[cfg(test)]
mod tests {
    use glam::Quat;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::stage::{ModelDescriptor, PartDescriptor, Value};

    fn loaded_registry(part_count: usize) -> ObjectRegistry {
        let descriptor = ModelDescriptor {
            parts: (0..part_count)
                .map(|i| PartDescriptor {
                    name: format!("part-{i}"),
                    position: Vec3::new(i as f32 * 0.2, 0.0, 0.0),
                    rotation: Quat::IDENTITY,
                    bbox_center: Vec3::new(i as f32 * 0.2, 0.1, 0.0),
                    bbox_size: Vec3::splat(0.3),
                })
                .collect(),
        };
        let mut registry = ObjectRegistry::default();
        registry.install_model(&descriptor);
        registry.precompute_deconstruction(&mut StdRng::seed_from_u64(9));
        for name in OVERLAY_NAMES {
            registry.insert_overlay(name);
        }
        registry
    }

    fn scenes(part_count: usize) -> (Vec<Scene>, ObjectRegistry) {
        let registry = loaded_registry(part_count);
        let layout = DocumentLayout::new(900.0, SCENE_COUNT);
        let scenes = build_scenes(&registry, &layout, &Options::default());
        (scenes, registry)
    }

    #[test]
    fn seven_scenes_in_document_order() {
        let (scenes, _) = scenes(4);
        assert_eq!(scenes.len(), SCENE_COUNT);
        for (i, scene) in scenes.iter().enumerate() {
            assert_eq!(scene.region.start, i as f32 * 900.0);
            assert_eq!(scene.priority, i as i32);
            assert!(scene.scrub > 0.0);
        }
    }

    #[test]
    fn camera_waypoints_are_continuous() {
        // Every scene that moves the camera must start where the previous
        // one ended, or scrubbing would jump.
        let (scenes, _) = scenes(3);
        let mut last_end: Option<Value> = None;
        for scene in &scenes {
            for kf in scene.timeline.keyframes() {
                if kf.target == PropertyKey::CameraEye {
                    if let Some(prev) = last_end {
                        assert_eq!(
                            kf.from, prev,
                            "camera jump entering scene '{}'",
                            scene.id
                        );
                    }
                    last_end = Some(kf.to);
                }
            }
        }
        assert!(last_end.is_some());
    }

    #[test]
    fn deconstruction_and_reassembly_are_inverse() {
        let (scenes, registry) = scenes(5);
        let deconstruct = &scenes[2];
        let reassemble = &scenes[4];

        for (i, part) in registry.parts().iter().enumerate() {
            let key = PropertyKey::PartPosition(i);
            let out = deconstruct
                .timeline
                .keyframes()
                .iter()
                .find(|kf| kf.target == key)
                .map(|kf| kf.to);
            let back = reassemble
                .timeline
                .keyframes()
                .iter()
                .find(|kf| kf.target == key)
                .map(|kf| kf.from);
            assert_eq!(out, back, "part {i} reassembles from where it landed");
            assert_eq!(
                reassemble
                    .timeline
                    .keyframes()
                    .iter()
                    .find(|kf| kf.target == key)
                    .map(|kf| kf.to),
                Some(Value::Vector(part.authored_position))
            );
        }
    }

    #[test]
    fn stagger_normalization_keeps_spans_inside_unit_range() {
        let (scenes, _) = scenes(40);
        for scene in &scenes {
            for kf in scene.timeline.keyframes() {
                assert!(
                    kf.end() <= 1.0 + 1e-5,
                    "keyframe in '{}' ends at {}",
                    scene.id,
                    kf.end()
                );
            }
        }
    }

    #[test]
    fn markers_cover_nav_and_indicator() {
        let layout = DocumentLayout::new(900.0, SCENE_COUNT);
        let markers = build_markers(&layout);
        assert_eq!(markers.len(), 2);
        assert_eq!(markers[0].id, MARKER_NAV);
        assert_eq!(markers[0].threshold, 180.0);
        assert_eq!(markers[1].threshold, 100.0);
    }

    #[test]
    fn zero_part_model_still_builds() {
        let (scenes, _) = scenes(0);
        assert_eq!(scenes.len(), SCENE_COUNT);
    }
}
