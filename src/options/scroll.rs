use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Scroll", inline)]
#[serde(default)]
/// Scroll-mapping parameters.
pub struct ScrollOptions {
    /// Viewport height in pixels used to lay out the scene sections until
    /// the first resize event arrives.
    #[schemars(skip)]
    pub viewport_height: f32,
    /// Multiplier on the authored per-scene scrub smoothing constants.
    /// 0 disables smoothing entirely (progress applies exactly).
    #[schemars(title = "Scrub Scale", range(min = 0.0, max = 3.0))]
    pub scrub_scale: f32,
}

impl Default for ScrollOptions {
    fn default() -> Self {
        Self {
            viewport_height: 900.0,
            scrub_scale: 1.0,
        }
    }
}
