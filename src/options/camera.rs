use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Camera", inline)]
#[serde(default)]
/// Camera projection and tracking parameters.
pub struct CameraOptions {
    /// Vertical field of view in degrees.
    #[schemars(title = "Field of View", range(min = 20.0, max = 90.0))]
    pub fovy: f32,
    /// Near clipping plane distance.
    #[schemars(skip)]
    pub znear: f32,
    /// Far clipping plane distance.
    #[schemars(skip)]
    pub zfar: f32,
    /// Height above the model center the camera keeps looking at.
    #[schemars(title = "Track Height", range(min = 0.0, max = 1.0))]
    pub track_height: f32,
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            fovy: 40.0,
            znear: 0.1,
            zfar: 100.0,
            track_height: 0.3,
        }
    }
}
