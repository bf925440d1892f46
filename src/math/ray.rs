use glam::Vec3;

/// Slab test returning the full [entry, exit] parameter interval along the
/// ray, or None on a miss. Intervals entirely behind the origin are misses.
pub fn intersect_aabb_interval(
    ray_origin: Vec3,
    ray_dir: Vec3,
    box_min: Vec3,
    box_max: Vec3,
) -> Option<(f32, f32)> {
    const EPSILON: f32 = 1e-8;

    // Clamp near-zero direction components so the division stays finite.
    let inv_dir = Vec3::new(
        if ray_dir.x.abs() < EPSILON { 1.0 / EPSILON.copysign(ray_dir.x) } else { 1.0 / ray_dir.x },
        if ray_dir.y.abs() < EPSILON { 1.0 / EPSILON.copysign(ray_dir.y) } else { 1.0 / ray_dir.y },
        if ray_dir.z.abs() < EPSILON { 1.0 / EPSILON.copysign(ray_dir.z) } else { 1.0 / ray_dir.z },
    );

    let t_min = (box_min - ray_origin) * inv_dir;
    let t_max = (box_max - ray_origin) * inv_dir;

    let t1 = t_min.min(t_max);
    let t2 = t_min.max(t_max);

    let t_near = t1.x.max(t1.y).max(t1.z);
    let t_far = t2.x.min(t2.y).min(t2.z);

    if t_near > t_far || t_far < 0.0 {
        return None;
    }

    Some((t_near.max(0.0), t_far))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_hit() {
        let origin = Vec3::new(0.0, 0.0, 0.0);
        let dir = Vec3::new(1.0, 0.0, 0.0);
        let (near, far) = intersect_aabb_interval(
            origin,
            dir,
            Vec3::new(5.0, -1.0, -1.0),
            Vec3::new(10.0, 1.0, 1.0),
        )
        .expect("ray should hit the box");
        assert!((near - 5.0).abs() < 0.01);
        assert!((far - 10.0).abs() < 0.01);
    }

    #[test]
    fn test_interval_miss() {
        let origin = Vec3::new(0.0, 0.0, 0.0);
        let dir = Vec3::new(1.0, 0.0, 0.0);
        let hit = intersect_aabb_interval(
            origin,
            dir,
            Vec3::new(5.0, 2.0, 2.0),
            Vec3::new(10.0, 3.0, 3.0),
        );
        assert!(hit.is_none());
    }

    #[test]
    fn test_interval_behind_origin() {
        let origin = Vec3::new(0.0, 0.0, 0.0);
        let dir = Vec3::new(1.0, 0.0, 0.0);
        let hit = intersect_aabb_interval(
            origin,
            dir,
            Vec3::new(-10.0, -1.0, -1.0),
            Vec3::new(-5.0, 1.0, 1.0),
        );
        assert!(hit.is_none());
    }

    #[test]
    fn test_interval_origin_inside() {
        let origin = Vec3::ZERO;
        let dir = Vec3::new(0.0, 0.0, -1.0);
        let (near, far) = intersect_aabb_interval(
            origin,
            dir,
            Vec3::splat(-2.0),
            Vec3::splat(2.0),
        )
        .expect("ray from inside should exit the box");
        assert!(near.abs() < 1e-6);
        assert!((far - 2.0).abs() < 0.01);
    }

    #[test]
    fn test_interval_axis_parallel_inside_slab() {
        // Direction parallel to X, origin inside the Y/Z slab.
        let origin = Vec3::new(-5.0, 0.5, 0.5);
        let dir = Vec3::new(1.0, 0.0, 0.0);
        let (near, far) = intersect_aabb_interval(
            origin,
            dir,
            Vec3::ZERO,
            Vec3::splat(1.0),
        )
        .expect("parallel ray inside slab should hit");
        assert!((near - 5.0).abs() < 0.01);
        assert!((far - 6.0).abs() < 0.01);
    }
}
