//! The showcase facade: boot sequence, per-frame advance, and render
//! snapshot production.
//!
//! Mirrors the experience's lifecycle: load the model (with progress
//! reporting), populate the registry, precompute deconstruction offsets,
//! create the particle field, author the choreography, then hand control
//! to the external frame loop. The facade performs no scheduling of its
//! own — the loop owner calls [`Showcase::advance`] and
//! [`Showcase::render`] once per frame.

use std::path::Path;

use glam::{Mat4, Vec3};
use rand::Rng;

use crate::choreography::{
    self, MARKER_NAV, MARKER_SCROLL_INDICATOR, OVERLAY_NAMES, SCENE_COUNT,
};
use crate::director::{Director, DocumentLayout};
use crate::error::VitrineError;
use crate::loader;
use crate::options::Options;
use crate::particles::{ParticleField, ParticleVertex};
use crate::stage::{
    CameraPose, CameraUniform, LightRig, ModelDescriptor, ObjectRegistry,
    OverlayStyle,
};

/// Per-frame state handed to the external renderer.
#[derive(Debug)]
pub struct RenderSnapshot<'a> {
    /// Camera uniform ready for upload.
    pub camera: CameraUniform,
    /// Model group world matrix.
    pub model_matrix: Mat4,
    /// Per-part world matrices, in model-local space under the group.
    pub part_matrices: Vec<Mat4>,
    /// Light intensities and sweep position.
    pub lights: LightRig,
    /// Reflective floor opacity.
    pub floor_opacity: f32,
    /// Global particle opacity uniform.
    pub particle_opacity: f32,
    /// Particle color as linear RGB.
    pub particle_color: [f32; 3],
    /// Displaced particle vertices.
    pub particles: &'a [ParticleVertex],
    /// Captions currently visible, with their animated styles.
    pub captions: Vec<(&'a str, &'a OverlayStyle)>,
}

/// The scroll-driven cinematic showcase.
pub struct Showcase {
    options: Options,
    registry: ObjectRegistry,
    director: Director,
    particles: ParticleField,
    layout: DocumentLayout,
    camera_uniform: CameraUniform,
    elapsed: f32,
}

impl Showcase {
    /// Boot from a glTF model on disk. `on_progress` receives load
    /// fractions in [0, 1] for a loading UI. Fails once on load errors;
    /// there is no retry.
    pub fn load(
        path: &Path,
        options: Options,
        mut on_progress: impl FnMut(f32),
    ) -> Result<Self, VitrineError> {
        let descriptor =
            loader::load_model(path, &options.loader, &mut on_progress)?;
        Ok(Self::from_descriptor(&descriptor, options, &mut rand::rng()))
    }

    /// Boot from an already-loaded model. Deterministic given the RNG;
    /// used directly by tests and benches.
    #[must_use]
    pub fn from_descriptor(
        descriptor: &ModelDescriptor,
        options: Options,
        rng: &mut impl Rng,
    ) -> Self {
        let camera = CameraPose {
            fovy: options.camera.fovy,
            znear: options.camera.znear,
            zfar: options.camera.zfar,
            ..CameraPose::default()
        };

        let mut registry = ObjectRegistry::new(camera);
        registry.lights = LightRig {
            ambient: options.lighting.ambient,
            key: options.lighting.key,
            fill: options.lighting.fill,
            rim: options.lighting.rim,
            ..LightRig::default()
        };
        registry.install_model(descriptor);
        registry.precompute_deconstruction(rng);
        for name in OVERLAY_NAMES {
            registry.insert_overlay(name);
        }

        let layout =
            DocumentLayout::new(options.scroll.viewport_height, SCENE_COUNT);
        let scenes = choreography::build_scenes(&registry, &layout, &options);
        let mut director = Director::new(scenes)
            .with_markers(choreography::build_markers(&layout));

        let particles =
            ParticleField::generate(&options.particles, rng);

        let mut camera_uniform = CameraUniform::new();
        camera_uniform.fog_density = options.lighting.fog_density;

        // Establish the authored opening state before the first frame.
        director.update(0.0, &mut registry);

        let mut showcase = Self {
            options,
            registry,
            director,
            particles,
            layout,
            camera_uniform,
            elapsed: 0.0,
        };
        showcase.sync_stage();
        showcase
    }

    /// Frame update: advance the director with scrub smoothing, keep the
    /// camera tracking the model, and run the particle wave motion.
    pub fn advance(&mut self, scroll: f32, dt: f32) {
        self.elapsed += dt.max(0.0);
        self.director.advance(scroll, dt, &mut self.registry);
        self.sync_stage();
        self.particles.update(self.elapsed);
    }

    /// Exact (unsmoothed) scrub to a scroll offset. Idempotent: repeated
    /// calls with the same offset produce the same stage.
    pub fn scrub_to(&mut self, scroll: f32) {
        self.director.update(scroll, &mut self.registry);
        self.sync_stage();
    }

    /// Post-update stage coupling: camera look-at and the particle
    /// opacity uniform.
    fn sync_stage(&mut self) {
        let track = self.options.camera.track_height;
        self.registry.camera.target =
            self.registry.model.position + Vec3::new(0.0, track, 0.0);
        self.particles.set_opacity(self.registry.particle_opacity);
    }

    /// Viewport resize: updates the camera aspect and re-derives scroll
    /// regions and marker thresholds from the new viewport height.
    pub fn resize(&mut self, width: f32, height: f32) {
        if width <= 0.0 || height <= 0.0 {
            return;
        }
        self.registry.camera.aspect = width / height;
        self.layout.set_viewport_height(height);
        self.director.relayout(&self.layout);
        self.director
            .set_markers(choreography::build_markers(&self.layout));
    }

    /// Produce the per-frame snapshot for the external renderer.
    pub fn render(&mut self) -> RenderSnapshot<'_> {
        self.camera_uniform.update_view_proj(&self.registry.camera);

        let part_matrices = self
            .registry
            .parts()
            .iter()
            .map(|p| Mat4::from_rotation_translation(p.rotation, p.position))
            .collect();

        let captions = self
            .registry
            .overlays()
            .filter(|(_, style)| style.is_visible())
            .collect();

        RenderSnapshot {
            camera: self.camera_uniform,
            model_matrix: self.registry.model.matrix(),
            part_matrices,
            lights: self.registry.lights.clone(),
            floor_opacity: self.registry.floor_opacity,
            particle_opacity: self.particles.opacity(),
            particle_color: self.options.particles.color,
            particles: self.particles.vertices(),
            captions,
        }
    }

    /// Scroll offset at which the narrative completes.
    #[must_use]
    pub fn max_scroll(&self) -> f32 {
        self.layout.max_scroll()
    }

    /// Whether the nav chrome should be visible.
    #[must_use]
    pub fn nav_visible(&self) -> bool {
        self.director.marker_active(MARKER_NAV).unwrap_or(false)
    }

    /// Whether the scroll indicator should be visible (hidden once the
    /// user has scrolled past the first hundred pixels).
    #[must_use]
    pub fn scroll_indicator_visible(&self) -> bool {
        !self
            .director
            .marker_active(MARKER_SCROLL_INDICATOR)
            .unwrap_or(true)
    }

    /// The object registry.
    #[must_use]
    pub fn registry(&self) -> &ObjectRegistry {
        &self.registry
    }

    /// The scene director.
    #[must_use]
    pub fn director(&self) -> &Director {
        &self.director
    }

    /// Active options.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }
}
