use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Loader", inline)]
#[serde(default)]
/// Model-loading parameters.
pub struct LoaderOptions {
    /// Largest extent the loaded model is scaled to.
    #[schemars(title = "Target Extent", range(min = 0.5, max = 10.0))]
    pub target_extent: f32,
    /// How far below the origin the model group starts (the void scene
    /// raises it into view).
    #[schemars(skip)]
    pub drop_depth: f32,
}

impl Default for LoaderOptions {
    fn default() -> Self {
        Self {
            target_extent: 2.5,
            drop_depth: 3.0,
        }
    }
}
