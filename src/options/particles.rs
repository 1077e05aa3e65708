use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Particles", inline)]
#[serde(default)]
/// Particle-field generation parameters.
pub struct ParticleOptions {
    /// Number of particles.
    #[schemars(title = "Count", range(min = 0, max = 10000))]
    pub count: usize,
    /// Radius of the cylindrical shell the particles fill.
    #[schemars(title = "Shell Radius", range(min = 0.5, max = 10.0))]
    pub shell_radius: f32,
    /// Radial spread around the shell radius.
    #[schemars(skip)]
    pub radius_jitter: f32,
    /// Vertical extent of the shell.
    #[schemars(skip)]
    pub height_span: f32,
    /// Particle color as linear RGB.
    #[schemars(skip)]
    pub color: [f32; 3],
}

impl Default for ParticleOptions {
    fn default() -> Self {
        Self {
            count: 1500,
            shell_radius: 3.0,
            radius_jitter: 2.0,
            height_span: 3.0,
            // 0x4a9eff, the energy blue used by the lights as well.
            color: [0.29, 0.62, 1.0],
        }
    }
}
