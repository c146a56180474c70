mod aabb;
mod ray;
mod triangle;

pub use aabb::AABB;
pub use ray::{intersect_aabb, Ray};
pub use triangle::{intersect_triangle, TriangleHit};
