use crate::collision::{Collider, CollisionSet};
use crate::math::AABB;
use crate::scene::SceneContext;
use crate::terrain::GridTerrain;
use glam::{Vec2, Vec3};
use std::rc::Rc;

// ============================================================================
// Primitive Generators - Common collision shapes
// ============================================================================

/// Creates a solid box collider from a ground footprint, rising from z = 0
pub fn building(center: Vec2, footprint: Vec2, height: f32) -> Collider {
    let half = footprint * 0.5;
    Collider::Box(AABB::new(
        (center - half).extend(0.0),
        (center + half).extend(height),
    ))
}

/// Creates a wall slab spanning two ground points, inflated by half the
/// thickness on every side
pub fn wall(from: Vec2, to: Vec2, thickness: f32, height: f32) -> Collider {
    let half = Vec2::splat(thickness * 0.5);
    let min = from.min(to) - half;
    let max = from.max(to) + half;
    Collider::Box(AABB::new(min.extend(0.0), max.extend(height)))
}

/// Creates a gabled roof mesh over a rectangular footprint. The ridge runs
/// north-south through the footprint center, with gable triangles closing
/// both ends.
pub fn gabled_roof(
    center: Vec2,
    footprint: Vec2,
    eave_height: f32,
    ridge_height: f32,
) -> Collider {
    let half = footprint * 0.5;

    let sw = Vec3::new(center.x - half.x, center.y - half.y, eave_height);
    let se = Vec3::new(center.x + half.x, center.y - half.y, eave_height);
    let ne = Vec3::new(center.x + half.x, center.y + half.y, eave_height);
    let nw = Vec3::new(center.x - half.x, center.y + half.y, eave_height);
    let ridge_s = Vec3::new(center.x, center.y - half.y, ridge_height);
    let ridge_n = Vec3::new(center.x, center.y + half.y, ridge_height);

    Collider::Mesh(vec![
        // west slope
        [sw, nw, ridge_n],
        [sw, ridge_n, ridge_s],
        // east slope
        [se, ne, ridge_n],
        [se, ridge_n, ridge_s],
        // gable ends
        [sw, se, ridge_s],
        [nw, ne, ridge_n],
    ])
}

// ============================================================================
// Scene Builders - Deterministic demo environments
// ============================================================================

/// Square walled yard with a gateway in the south wall and two planters to
/// slide along
pub fn create_courtyard_scene() -> CollisionSet {
    let mut set = CollisionSet::new();

    let half = 20.0;
    let wall_height = 6.0;
    let wall_thickness = 1.0;
    let gate_half_width = 3.0;

    set.push(wall(
        Vec2::new(-half, half),
        Vec2::new(half, half),
        wall_thickness,
        wall_height,
    ));
    set.push(wall(
        Vec2::new(-half, -half),
        Vec2::new(-half, half),
        wall_thickness,
        wall_height,
    ));
    set.push(wall(
        Vec2::new(half, -half),
        Vec2::new(half, half),
        wall_thickness,
        wall_height,
    ));

    // south wall split around the gateway
    set.push(wall(
        Vec2::new(-half, -half),
        Vec2::new(-gate_half_width, -half),
        wall_thickness,
        wall_height,
    ));
    set.push(wall(
        Vec2::new(gate_half_width, -half),
        Vec2::new(half, -half),
        wall_thickness,
        wall_height,
    ));

    set.push(building(Vec2::new(8.0, 5.0), Vec2::new(2.0, 2.0), 4.0));
    set.push(building(Vec2::new(-6.0, -8.0), Vec2::new(3.0, 2.0), 5.0));

    set
}

/// Small town: a plaza ringed by solid buildings, one cottage wearing a
/// pitched roof
pub fn create_town_scene() -> CollisionSet {
    let mut set = CollisionSet::new();

    // town hall north of the plaza
    set.push(building(Vec2::new(0.0, 18.0), Vec2::new(14.0, 8.0), 10.0));

    // shop row along the west edge
    for i in 0..3 {
        let center = Vec2::new(-16.0, -10.0 + i as f32 * 8.0);
        set.push(building(center, Vec2::new(6.0, 5.0), 6.0 + i as f32));
    }

    // watchtower
    set.push(building(Vec2::new(14.0, -4.0), Vec2::new(4.0, 4.0), 16.0));

    // cottage east of the plaza
    let cottage = Vec2::new(8.0, 8.0);
    let cottage_footprint = Vec2::new(8.0, 6.0);
    set.push(building(cottage, cottage_footprint, 4.0));
    set.push(gabled_roof(cottage, cottage_footprint, 4.0, 7.0));

    set
}

/// Rolling hill south-west of the structures. The grid covers [-60, 60] on
/// both axes and is exactly flat everywhere the demo buildings stand.
pub fn create_hill_terrain() -> GridTerrain {
    let origin = Vec2::new(-60.0, -60.0);
    let cell_size = 2.0;
    let size = 61;
    let peak = Vec2::new(-38.0, -38.0);
    let peak_height = 12.0;
    let radius = 22.0;

    GridTerrain::from_fn(origin, cell_size, size, size, move |xy| {
        let d = xy.distance(peak);
        if d < radius {
            peak_height * 0.5 * (1.0 + (std::f32::consts::PI * d / radius).cos())
        } else {
            0.0
        }
    })
}

// ============================================================================
// Scene Selection
// ============================================================================

/// Builds the collision and terrain for a named demo scene. Unknown names
/// fall back to the courtyard.
pub fn build_scene(name: &str) -> Rc<SceneContext> {
    let collision = match name {
        "town" => create_town_scene(),
        _ => create_courtyard_scene(),
    };
    log::info!("demo scene '{}': {} colliders", name, collision.len());

    let scene = SceneContext::new();
    scene.set_collision(collision);
    scene.set_terrain(create_hill_terrain());
    Rc::new(scene)
}

/// Initial walk pose for a scene: standing position on the ground and the
/// look direction
pub fn start_pose(name: &str) -> (Vec3, Vec3) {
    match name {
        "town" => (Vec3::new(0.0, -6.0, 0.0), Vec3::Y),
        _ => (Vec3::new(0.0, -14.0, 0.0), Vec3::Y),
    }
}
