use glam::{Mat4, Vec3};

#[derive(Copy, Clone, Debug)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Cube of the given edge length centered on the origin.
    pub fn centered_cube(size: f32) -> Self {
        let half = Vec3::splat(size * 0.5);
        Self::new(-half, half)
    }

    pub fn union(&self, other: &Aabb) -> Aabb {
        Aabb {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn corners(&self) -> [Vec3; 8] {
        let (lo, hi) = (self.min, self.max);
        [
            Vec3::new(lo.x, lo.y, lo.z),
            Vec3::new(hi.x, lo.y, lo.z),
            Vec3::new(lo.x, hi.y, lo.z),
            Vec3::new(hi.x, hi.y, lo.z),
            Vec3::new(lo.x, lo.y, hi.z),
            Vec3::new(hi.x, lo.y, hi.z),
            Vec3::new(lo.x, hi.y, hi.z),
            Vec3::new(hi.x, hi.y, hi.z),
        ]
    }

    /// Axis-aligned bounds of this box after an affine transform.
    /// Conservative for rotations (bounds of the 8 transformed corners).
    pub fn transformed(&self, transform: Mat4) -> Aabb {
        let mut min = Vec3::splat(f32::INFINITY);
        let mut max = Vec3::splat(f32::NEG_INFINITY);
        for corner in self.corners() {
            let p = transform.transform_point3(corner);
            min = min.min(p);
            max = max.max(p);
        }
        Aabb { min, max }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_4;

    #[test]
    fn test_aabb_new() {
        let min = Vec3::new(0.0, 0.0, 0.0);
        let max = Vec3::new(1.0, 1.0, 1.0);
        let aabb = Aabb::new(min, max);
        assert_eq!(aabb.min, min);
        assert_eq!(aabb.max, max);
    }

    #[test]
    fn test_centered_cube() {
        let aabb = Aabb::centered_cube(2.0);
        assert_eq!(aabb.min, Vec3::splat(-1.0));
        assert_eq!(aabb.max, Vec3::splat(1.0));
        assert_eq!(aabb.center(), Vec3::ZERO);
    }

    #[test]
    fn test_aabb_union_non_overlapping() {
        let aabb1 = Aabb::new(Vec3::new(0.0, 0.0, 0.0), Vec3::new(1.0, 1.0, 1.0));
        let aabb2 = Aabb::new(Vec3::new(2.0, 2.0, 2.0), Vec3::new(3.0, 3.0, 3.0));
        let union = aabb1.union(&aabb2);
        assert_eq!(union.min, Vec3::new(0.0, 0.0, 0.0));
        assert_eq!(union.max, Vec3::new(3.0, 3.0, 3.0));
    }

    #[test]
    fn test_transformed_translation() {
        let aabb = Aabb::centered_cube(1.0);
        let moved = aabb.transformed(Mat4::from_translation(Vec3::new(2.0, 0.0, 0.0)));
        assert!((moved.center().x - 2.0).abs() < 1e-5);
        assert!((moved.max.x - moved.min.x - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_transformed_rotation_grows_bounds() {
        // A unit cube rotated 45 degrees about Y spans sqrt(2) in X/Z.
        let aabb = Aabb::centered_cube(1.0);
        let rotated = aabb.transformed(Mat4::from_rotation_y(FRAC_PI_4));
        let extent = rotated.max - rotated.min;
        assert!((extent.x - 2.0_f32.sqrt()).abs() < 1e-4);
        assert!((extent.y - 1.0).abs() < 1e-5);
        assert!((extent.z - 2.0_f32.sqrt()).abs() < 1e-4);
    }
}
