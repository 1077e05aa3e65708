//! Scroll-synchronized cinematic showcase engine.
//!
//! Vitrine maps a continuous scroll-progress signal to keyframed visual
//! state across a fixed sequence of scenes: camera pose, model and
//! per-part transforms, light intensities, a global particle-opacity
//! uniform, and 2D caption styles. Rendering is external — the crate
//! produces a per-frame [`showcase::RenderSnapshot`] for whatever loop
//! owns the surface.
//!
//! # Key entry points
//!
//! - [`showcase::Showcase`] - boot, per-frame advance, render snapshot
//! - [`director::Director`] - scene list, progress mapping, timelines
//! - [`stage::ObjectRegistry`] - mutable handles timelines write
//! - [`options::Options`] - runtime configuration with TOML presets
//!
//! # Architecture
//!
//! Everything is single-threaded and frame-driven: scroll and resize
//! events mutate state read by the next frame, and all registry mutation
//! happens between frames, so "last write this frame wins" is the only
//! discipline required. The authored seven-scene narrative lives in
//! [`choreography`] as declarative keyframe tables consumed by one
//! generic interpolation engine.

pub mod choreography;
pub mod director;
pub mod easing;
pub mod error;
pub mod loader;
pub mod options;
pub mod particles;
pub mod showcase;
pub mod stage;
