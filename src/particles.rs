//! Sound-wave particle field surrounding the model.
//!
//! Particles are distributed once into a cylindrical shell around the
//! origin; per-frame motion displaces each particle from its origin as a
//! pure function of elapsed time, so updates are idempotent per timestamp
//! and the field never drifts. The only timeline-driven input is a single
//! global opacity scalar.

use glam::{Vec2, Vec3};
use rand::Rng;

use crate::options::ParticleOptions;

/// Per-particle vertex data laid out for direct GPU upload.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ParticleVertex {
    /// Current world position.
    pub position: [f32; 3],
    /// Point size in pixels.
    pub size: f32,
    /// Per-particle base opacity, modulated by the global uniform.
    pub opacity: f32,
    /// Padding for GPU alignment.
    pub(crate) _pad: [f32; 3],
}

/// The particle system: static origins plus per-frame displaced vertices.
#[derive(Debug, Clone)]
pub struct ParticleField {
    origins: Vec<Vec3>,
    vertices: Vec<ParticleVertex>,
    opacity: f32,
}

impl ParticleField {
    /// Generate the field from options. Positions fill a cylindrical shell
    /// around the origin; sizes and base opacities are randomized per
    /// particle.
    #[must_use]
    pub fn generate(options: &ParticleOptions, rng: &mut impl Rng) -> Self {
        let mut origins = Vec::with_capacity(options.count);
        let mut vertices = Vec::with_capacity(options.count);

        for _ in 0..options.count {
            let angle = rng.random_range(0.0..core::f32::consts::TAU);
            let radius = options.shell_radius
                + (rng.random::<f32>() - 0.5) * options.radius_jitter;
            let height = (rng.random::<f32>() - 0.5) * options.height_span;

            let origin =
                Vec3::new(angle.cos() * radius, height, angle.sin() * radius);
            origins.push(origin);
            vertices.push(ParticleVertex {
                position: origin.to_array(),
                size: rng.random::<f32>() * 3.0 + 0.5,
                opacity: rng.random::<f32>() * 0.5 + 0.1,
                _pad: [0.0; 3],
            });
        }

        Self {
            origins,
            vertices,
            opacity: 0.0,
        }
    }

    /// Displace every particle for elapsed `time` seconds: a vertical wave
    /// plus a subtle radial pulse, both derived from the static origin.
    pub fn update(&mut self, time: f32) {
        for (origin, vertex) in self.origins.iter().zip(&mut self.vertices) {
            let wave = (origin.x * 1.5 + time * 0.8).sin() * 0.15
                + (origin.z * 1.2 + time * 0.6).cos() * 0.1;

            let dist = Vec2::new(origin.x, origin.z).length();
            let pulse = (dist * 2.0 - time * 1.5).sin() * 0.05;
            let radial = 1.0 + pulse;

            vertex.position = [
                origin.x * radial,
                origin.y + wave,
                origin.z * radial,
            ];
        }
    }

    /// Set the global opacity uniform (timeline-driven).
    pub fn set_opacity(&mut self, opacity: f32) {
        self.opacity = opacity.clamp(0.0, 1.0);
    }

    /// Current global opacity uniform.
    #[must_use]
    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    /// Vertex data for upload.
    #[must_use]
    pub fn vertices(&self) -> &[ParticleVertex] {
        &self.vertices
    }

    /// Particle count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Whether the field is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}
