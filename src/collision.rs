use crate::math::{intersect_aabb, intersect_triangle, Ray, AABB};
use glam::Vec3;

/// Nearest intersection between a ray and collision geometry
#[derive(Debug, Clone, Copy)]
pub struct RayHit {
    pub distance: f32,
    pub point: Vec3,
    pub normal: Vec3,
}

/// A solid the navigation controllers cannot walk through
#[derive(Debug, Clone)]
pub enum Collider {
    Box(AABB),
    Mesh(Vec<[Vec3; 3]>),
}

impl Collider {
    pub fn raycast(&self, ray: &Ray) -> Option<RayHit> {
        match self {
            Collider::Box(bounds) => {
                let t = intersect_aabb(ray, bounds);
                if t < 0.0 {
                    return None;
                }
                let point = ray.point_at(t);
                Some(RayHit {
                    distance: t,
                    point,
                    normal: face_toward_ray(bounds.normal_at(point), ray.dir),
                })
            }
            Collider::Mesh(triangles) => {
                let mut closest: Option<RayHit> = None;
                for tri in triangles {
                    if let Some(hit) = intersect_triangle(ray, tri[0], tri[1], tri[2]) {
                        if closest.map_or(true, |c| hit.t < c.distance) {
                            closest = Some(RayHit {
                                distance: hit.t,
                                point: ray.point_at(hit.t),
                                normal: face_toward_ray(hit.normal, ray.dir),
                            });
                        }
                    }
                }
                closest
            }
        }
    }

    pub fn bounds(&self) -> AABB {
        match self {
            Collider::Box(bounds) => *bounds,
            Collider::Mesh(triangles) => {
                let mut bounds = AABB::new(
                    Vec3::splat(f32::INFINITY),
                    Vec3::splat(f32::NEG_INFINITY),
                );
                for tri in triangles {
                    for v in tri {
                        bounds.min = bounds.min.min(*v);
                        bounds.max = bounds.max.max(*v);
                    }
                }
                bounds
            }
        }
    }
}

// Walls can be approached from either side, so hit normals always face the
// ray origin regardless of winding.
fn face_toward_ray(normal: Vec3, ray_dir: Vec3) -> Vec3 {
    if normal.dot(ray_dir) > 0.0 {
        -normal
    } else {
        normal
    }
}

/// The scene's collision geometry. Owned by the host, read-only to the
/// controllers.
#[derive(Debug, Clone, Default)]
pub struct CollisionSet {
    colliders: Vec<Collider>,
}

impl CollisionSet {
    pub fn new() -> Self {
        Self {
            colliders: Vec::new(),
        }
    }

    pub fn push(&mut self, collider: Collider) {
        self.colliders.push(collider);
    }

    pub fn is_empty(&self) -> bool {
        self.colliders.is_empty()
    }

    pub fn len(&self) -> usize {
        self.colliders.len()
    }

    /// Nearest hit across all colliders
    pub fn raycast(&self, ray: &Ray) -> Option<RayHit> {
        let mut closest: Option<RayHit> = None;
        for collider in &self.colliders {
            if let Some(hit) = collider.raycast(ray) {
                if closest.map_or(true, |c| hit.distance < c.distance) {
                    closest = Some(hit);
                }
            }
        }
        closest
    }

    /// Combined bounds of the set, or None when it is empty
    pub fn bounds(&self) -> Option<AABB> {
        self.colliders
            .iter()
            .map(|c| c.bounds())
            .reduce(|a, b| a.union(&b))
    }
}
