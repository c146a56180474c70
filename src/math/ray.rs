use crate::math::AABB;
use glam::Vec3;

#[derive(Copy, Clone, Debug)]
pub struct Ray {
    pub origin: Vec3,
    pub dir: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, dir: Vec3) -> Self {
        Self { origin, dir }
    }

    pub fn point_at(&self, t: f32) -> Vec3 {
        self.origin + self.dir * t
    }
}

/// Slab-method ray/box intersection. Returns the entry distance, or the exit
/// distance when the origin is inside the box. Negative means no hit.
pub fn intersect_aabb(ray: &Ray, bounds: &AABB) -> f32 {
    const EPSILON: f32 = 1e-8;

    // Clamp near-zero direction components so the inverse stays finite
    let inv_dir = Vec3::new(
        if ray.dir.x.abs() < EPSILON { 1.0 / EPSILON.copysign(ray.dir.x) } else { 1.0 / ray.dir.x },
        if ray.dir.y.abs() < EPSILON { 1.0 / EPSILON.copysign(ray.dir.y) } else { 1.0 / ray.dir.y },
        if ray.dir.z.abs() < EPSILON { 1.0 / EPSILON.copysign(ray.dir.z) } else { 1.0 / ray.dir.z },
    );

    let t_min = (bounds.min - ray.origin) * inv_dir;
    let t_max = (bounds.max - ray.origin) * inv_dir;

    let t1 = t_min.min(t_max);
    let t2 = t_min.max(t_max);

    let t_near = t1.x.max(t1.y).max(t1.z);
    let t_far = t2.x.min(t2.y).min(t2.z);

    if t_near > t_far || t_far < 0.0 {
        return -1.0;
    }

    if t_near < 0.0 {
        if t_far > 0.001 {
            t_far
        } else {
            -1.0
        }
    } else {
        t_near
    }
}
