use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Lighting", inline)]
#[serde(default)]
/// Initial light intensities for the stage rig. Timelines animate these
/// from the values authored here.
pub struct LightingOptions {
    /// Ambient fill intensity.
    #[schemars(title = "Ambient", range(min = 0.0, max = 1.0))]
    pub ambient: f32,
    /// Warm key light intensity.
    #[schemars(title = "Key Light", range(min = 0.0, max = 3.0))]
    pub key: f32,
    /// Cool fill light intensity.
    #[schemars(title = "Fill Light", range(min = 0.0, max = 2.0))]
    pub fill: f32,
    /// Rim light intensity.
    #[schemars(title = "Rim Light", range(min = 0.0, max = 2.0))]
    pub rim: f32,
    /// Exponential fog density for the void background.
    #[schemars(skip)]
    pub fog_density: f32,
}

impl Default for LightingOptions {
    fn default() -> Self {
        Self {
            ambient: 0.1,
            key: 1.5,
            fill: 0.4,
            rim: 0.8,
            fog_density: 0.08,
        }
    }
}
