//! Centralized showcase options with TOML preset support.
//!
//! All tweakable settings (camera, lighting, particles, scroll mapping,
//! loader) are consolidated here. Options serialize to/from TOML so a
//! deployment can override the authored defaults without rebuilding.

mod camera;
mod lighting;
mod loader;
mod particles;
mod scroll;

use std::path::Path;

pub use camera::CameraOptions;
pub use lighting::LightingOptions;
pub use loader::LoaderOptions;
pub use particles::ParticleOptions;
pub use scroll::ScrollOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::VitrineError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[particles]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Camera projection and tracking.
    pub camera: CameraOptions,
    /// Initial light rig intensities.
    pub lighting: LightingOptions,
    /// Particle-field generation.
    pub particles: ParticleOptions,
    /// Scroll mapping and scrub smoothing.
    pub scroll: ScrollOptions,
    /// Model loading.
    pub loader: LoaderOptions,
}

impl Options {
    /// Generate JSON Schema describing the exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, VitrineError> {
        let content = std::fs::read_to_string(path).map_err(VitrineError::Io)?;
        toml::from_str(&content)
            .map_err(|e| VitrineError::OptionsParse(e.to_string()))
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), VitrineError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| VitrineError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(VitrineError::Io)?;
        }
        std::fs::write(path, content).map_err(VitrineError::Io)
    }
}
