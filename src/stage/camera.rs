//! Camera pose and the GPU uniform derived from it.

use glam::{Mat4, Vec3};

/// Perspective camera defined by eye position, target, and projection
/// parameters. Timelines write `eye` directly; `target` tracks the model
/// group each frame.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraPose {
    /// Eye (camera) position in world space.
    pub eye: Vec3,
    /// Look-at target position.
    pub target: Vec3,
    /// Up direction vector.
    pub up: Vec3,
    /// Viewport aspect ratio (width / height).
    pub aspect: f32,
    /// Vertical field of view in degrees.
    pub fovy: f32,
    /// Near clipping plane distance.
    pub znear: f32,
    /// Far clipping plane distance.
    pub zfar: f32,
}

impl Default for CameraPose {
    /// The authored opening pose: slightly above the origin, looking in
    /// from five units out.
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, 0.5, 5.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect: 16.0 / 9.0,
            fovy: 40.0,
            znear: 0.1,
            zfar: 100.0,
        }
    }
}

impl CameraPose {
    /// Build the combined view-projection matrix.
    #[must_use]
    pub fn build_matrix(&self) -> Mat4 {
        let view = Mat4::look_at_rh(self.eye, self.target, self.up);
        let proj = Mat4::perspective_rh(
            self.fovy.to_radians(),
            self.aspect,
            self.znear,
            self.zfar,
        );
        proj * view
    }
}

/// GPU uniform buffer layout holding the view-projection matrix and camera
/// metadata for an external renderer.
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    /// Combined view-projection matrix.
    pub view_proj: [[f32; 4]; 4],
    /// Camera world-space position.
    pub position: [f32; 3],
    /// Viewport aspect ratio.
    pub aspect: f32,
    /// Camera forward direction for lighting.
    pub forward: [f32; 3],
    /// Vertical field of view in degrees.
    pub fovy: f32,
    /// Exponential fog density applied by the background pass.
    pub fog_density: f32,
    /// Padding for GPU alignment.
    pub(crate) _pad: [f32; 3],
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self::new()
    }
}

impl CameraUniform {
    /// Create a new camera uniform with identity view-projection.
    #[must_use]
    pub fn new() -> Self {
        Self {
            view_proj: Mat4::IDENTITY.to_cols_array_2d(),
            position: [0.0; 3],
            aspect: 1.6,
            forward: [0.0, 0.0, -1.0],
            fovy: 40.0,
            fog_density: 0.08,
            _pad: [0.0; 3],
        }
    }

    /// Update uniform fields from the given pose's current state.
    pub fn update_view_proj(&mut self, pose: &CameraPose) {
        self.view_proj = pose.build_matrix().to_cols_array_2d();
        self.position = pose.eye.to_array();
        self.aspect = pose.aspect;
        let forward = (pose.target - pose.eye).normalize_or_zero();
        self.forward = forward.to_array();
        self.fovy = pose.fovy;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pose() -> CameraPose {
        CameraPose {
            eye: Vec3::new(0.0, 0.5, 5.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect: 16.0 / 9.0,
            fovy: 40.0,
            znear: 0.1,
            zfar: 100.0,
        }
    }

    #[test]
    fn uniform_tracks_pose() {
        let mut uniform = CameraUniform::new();
        uniform.update_view_proj(&pose());

        assert_eq!(uniform.position, [0.0, 0.5, 5.0]);
        assert_eq!(uniform.fovy, 40.0);
        // Forward points from eye toward the origin.
        assert!(uniform.forward[2] < 0.0);
    }

    #[test]
    fn matrix_maps_target_to_view_center() {
        let pose = pose();
        let clip = pose.build_matrix() * pose.target.extend(1.0);
        let ndc = clip / clip.w;
        assert!(ndc.x.abs() < 1e-5);
        assert!(ndc.y.abs() < 1e-5);
    }
}
