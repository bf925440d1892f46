use glam::{Mat4, Vec3};

pub const FOV_Y_DEGREES: f32 = 45.0;
pub const NEAR_PLANE: f32 = 0.1;
pub const FAR_PLANE: f32 = 100.0;

/// Look-at camera pose returned by a scene's `camera` hook.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
}

impl CameraPose {
    pub fn new(eye: Vec3, target: Vec3, up: Vec3) -> Self {
        Self { eye, target, up }
    }

    /// Eye on the +Z axis looking at the origin, Y up.
    pub fn from_z(distance: f32) -> Self {
        Self::new(Vec3::new(0.0, 0.0, distance), Vec3::ZERO, Vec3::Y)
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    /// Combined view-projection with 0..1 clip depth.
    pub fn view_proj(&self, aspect: f32) -> Mat4 {
        let proj = Mat4::perspective_rh(
            FOV_Y_DEGREES.to_radians(),
            aspect,
            NEAR_PLANE,
            FAR_PLANE,
        );
        proj * self.view()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_moves_eye_to_origin() {
        let pose = CameraPose::from_z(2.5);
        let eye_in_view = pose.view().transform_point3(pose.eye);
        assert!(eye_in_view.length() < 1e-5);
    }

    #[test]
    fn test_target_projects_to_screen_center() {
        let pose = CameraPose::from_z(4.0);
        let clip = pose.view_proj(1.0) * pose.target.extend(1.0);
        let ndc = clip / clip.w;
        assert!(ndc.x.abs() < 1e-5);
        assert!(ndc.y.abs() < 1e-5);
        assert!(ndc.z > 0.0 && ndc.z < 1.0);
    }

    #[test]
    fn test_nearer_point_has_smaller_depth() {
        let pose = CameraPose::from_z(4.0);
        let vp = pose.view_proj(1.0);
        let near = vp * Vec3::new(0.0, 0.0, 1.0).extend(1.0);
        let far = vp * Vec3::new(0.0, 0.0, -1.0).extend(1.0);
        assert!(near.z / near.w < far.z / far.w);
    }
}
