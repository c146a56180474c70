use glam::{Vec2, Vec3};
use std::rc::Rc;
use terrain_nav::input::{InputEvent, NavKey, PointerButton, PointerEvent, PointerKind};
use terrain_nav::math::AABB;
use terrain_nav::scene::ControlsKind;
use terrain_nav::{
    Camera, Collider, CollisionSet, FirstPersonControls, FirstPersonSettings, FlatTerrain,
    SceneContext,
};

fn scene_with(colliders: Vec<Collider>) -> Rc<SceneContext> {
    let scene = SceneContext::new();
    let mut set = CollisionSet::new();
    for collider in colliders {
        set.push(collider);
    }
    scene.set_collision(set);
    Rc::new(scene)
}

fn wall_box(min: Vec3, max: Vec3) -> Collider {
    Collider::Box(AABB::new(min, max))
}

/// Walker standing at the origin at eye height, facing north
fn connected(scene: &Rc<SceneContext>) -> FirstPersonControls {
    let camera = Camera::new(Vec3::new(0.0, -3.0, 3.0), Vec3::new(0.0, 0.0, 3.0));
    let mut controls = FirstPersonControls::new(camera, FirstPersonSettings::default());
    controls.connect(Rc::clone(scene));
    controls.set_view(Vec3::new(0.0, 0.0, 3.0), Vec3::Y, None);
    controls
}

fn mouse(button: PointerButton, x: f32, y: f32) -> PointerEvent {
    PointerEvent {
        id: 3,
        kind: PointerKind::Mouse,
        button,
        position: Vec2::new(x, y),
    }
}

fn key(key: NavKey, pressed: bool) -> InputEvent {
    InputEvent::Key { key, pressed }
}

// ============================================================================
// Collision Tests
// ============================================================================

#[test]
fn test_walk_stops_a_buffer_short_of_walls() {
    let scene = scene_with(vec![wall_box(
        Vec3::new(-10.0, 4.0, 0.0),
        Vec3::new(10.0, 5.0, 6.0),
    )]);
    let mut controls = connected(&scene);

    controls.pan_view(0.0, 10.0);

    // The move ends half a unit short of the wall face at y = 4
    let target = controls.target();
    assert!((target.y - 3.5).abs() < 1e-3);
    assert!(target.x.abs() < 1e-3);
    assert!((target.z - 3.0).abs() < 1e-3);
}

#[test]
fn test_diagonal_hit_slides_along_the_wall() {
    let scene = scene_with(vec![wall_box(
        Vec3::new(-10.0, 2.0, 0.0),
        Vec3::new(10.0, 3.0, 6.0),
    )]);
    let mut controls = connected(&scene);

    // North-east at 45 degrees into an east-west wall
    controls.pan_view(3.0, 3.0);

    // The blocked share of the step deflects east along the face
    let target = controls.target();
    assert!((target.x - 3.0).abs() < 1e-3);
    assert!((target.y - 1.6464).abs() < 1e-3);
    assert!(target.y < 2.0);

    // Deflection never moves farther than the requested step
    let requested = Vec2::new(3.0, 3.0).length();
    assert!(target.truncate().length() <= requested + 1e-3);
}

#[test]
fn test_inside_buffer_pushes_back_out() {
    let scene = scene_with(vec![wall_box(
        Vec3::new(-10.0, 2.0, 0.0),
        Vec3::new(10.0, 3.0, 6.0),
    )]);
    let mut controls = connected(&scene);
    controls.set_view(Vec3::new(0.0, 1.8, 3.0), Vec3::Y, None);

    controls.pan_view(0.0, 1.0);

    // Starting inside the wall buffer, the clamped step is negative and
    // backs the walker out to the buffer line
    let target = controls.target();
    assert!((target.y - 1.5).abs() < 1e-3);
}

// ============================================================================
// Ground Height Tests
// ============================================================================

#[test]
fn test_height_settles_toward_terrain() {
    let scene = SceneContext::new();
    scene.set_terrain(FlatTerrain::new(2.0));
    let scene = Rc::new(scene);
    let mut controls = connected(&scene);

    // Resting height over 2-high ground is 5; one step blends a quarter of
    // the gap
    controls.pan_view(0.0, 1.0);
    assert!((controls.target().z - 3.5).abs() < 1e-3);

    for _ in 0..20 {
        controls.pan_view(0.0, 1.0);
    }
    assert!((controls.target().z - 5.0).abs() < 0.05);
}

#[test]
fn test_collision_ground_wins_over_terrain() {
    let scene = SceneContext::new();
    scene.set_collision(terrain_nav::demo::create_town_scene());
    scene.set_terrain(FlatTerrain::new(0.0));
    let scene = Rc::new(scene);

    let mut controls = connected(&scene);
    // Standing on the cottage roof's west slope, facing east up the pitch
    controls.set_view(Vec3::new(4.5, 8.0, 7.375), Vec3::X, None);

    let z_before = controls.target().z;
    controls.pan_view(0.0, 1.0);

    // The roof surface under the new footing is higher, so the walker
    // climbs instead of blending down toward the terrain at zero
    let target = controls.target();
    assert!((target.x - 5.5).abs() < 1e-3);
    assert!(target.z > z_before + 0.1);
    assert!(target.z < 8.2);
}

// ============================================================================
// Input Tests
// ============================================================================

#[test]
fn test_scroll_is_ignored_while_walking() {
    let scene = Rc::new(SceneContext::new());
    let mut controls = connected(&scene);
    let position = controls.camera().position;
    let target = controls.target();

    controls.handle_event(&InputEvent::Scroll(3.0));
    controls.tick(0.1);

    assert_eq!(controls.camera().position, position);
    assert_eq!(controls.target(), target);
}

#[test]
fn test_arrow_left_turns_then_walk_follows_heading() {
    let scene = Rc::new(SceneContext::new());
    let mut controls = connected(&scene);

    controls.handle_event(&key(NavKey::ArrowLeft, true));
    controls.tick(0.06);
    controls.handle_event(&key(NavKey::ArrowLeft, false));

    // One repeat step turns two degrees counterclockwise
    assert!(controls.yaw() > 0.03);

    controls.handle_event(&key(NavKey::ArrowUp, true));
    controls.tick(0.06);
    controls.handle_event(&key(NavKey::ArrowUp, false));

    // The walk step follows the new heading, drifting west of due north
    let target = controls.target();
    assert!(target.y > 1.4);
    assert!(target.x < -0.03);
}

#[test]
fn test_shift_tilts_instead_of_walking() {
    let scene = Rc::new(SceneContext::new());
    let mut controls = connected(&scene);

    controls.handle_event(&key(NavKey::Shift, true));
    controls.handle_event(&key(NavKey::ArrowUp, true));
    controls.tick(0.06);

    assert!(controls.pitch() > 0.03);
    assert!(controls.target().distance(Vec3::new(0.0, 0.0, 3.0)) < 1e-4);
}

#[test]
fn test_control_strafes_instead_of_turning() {
    let scene = Rc::new(SceneContext::new());
    let mut controls = connected(&scene);

    controls.handle_event(&key(NavKey::Control, true));
    controls.handle_event(&key(NavKey::ArrowRight, true));
    controls.tick(0.06);

    assert!(controls.yaw().abs() < 1e-5);
    assert!((controls.target().x - 1.125).abs() < 1e-3);
}

#[test]
fn test_page_keys_adjust_person_height_with_floor() {
    let scene = Rc::new(SceneContext::new());
    let mut controls = connected(&scene);

    controls.handle_event(&key(NavKey::PageUp, true));
    controls.tick(0.06);
    controls.handle_event(&key(NavKey::PageUp, false));

    assert!((controls.person_height() - 3.15).abs() < 1e-3);
    assert!((controls.target().z - 3.15).abs() < 1e-3);

    controls.handle_event(&key(NavKey::PageDown, true));
    for _ in 0..12 {
        controls.tick(1.0);
    }
    controls.handle_event(&key(NavKey::PageDown, false));

    // Shrinking bottoms out exactly at the configured minimum
    assert_eq!(controls.person_height(), 2.0);
    assert!((controls.target().z - 2.0).abs() < 1e-3);
}

#[test]
fn test_blur_drops_held_keys() {
    let scene = Rc::new(SceneContext::new());
    let mut controls = connected(&scene);

    controls.handle_event(&key(NavKey::ArrowUp, true));
    controls.tick(0.06);
    let after_walk = controls.target();
    assert!(after_walk.y > 1.0);

    controls.handle_event(&InputEvent::Blur);
    controls.tick(0.5);
    assert_eq!(controls.target(), after_walk);
}

#[test]
fn test_mouse_drags_rotate_and_walk() {
    let scene = Rc::new(SceneContext::new());
    let mut controls = connected(&scene);

    // Secondary drag right turns the view
    controls.handle_event(&InputEvent::PointerDown(mouse(PointerButton::Secondary, 400.0, 300.0)));
    controls.handle_event(&InputEvent::PointerMove(mouse(PointerButton::None, 500.0, 300.0)));
    controls.handle_event(&InputEvent::PointerUp(mouse(PointerButton::None, 500.0, 300.0)));
    assert!(controls.yaw() > 0.0);

    // Primary drag toward the viewer backs up
    controls.set_view(Vec3::new(0.0, 0.0, 3.0), Vec3::Y, None);
    controls.handle_event(&InputEvent::PointerDown(mouse(PointerButton::Primary, 400.0, 300.0)));
    controls.handle_event(&InputEvent::PointerMove(mouse(PointerButton::None, 400.0, 250.0)));
    controls.handle_event(&InputEvent::PointerUp(mouse(PointerButton::None, 400.0, 250.0)));
    assert!(controls.target().y < -4.9);
}

// ============================================================================
// Lifecycle Tests
// ============================================================================

#[test]
fn test_connect_claims_and_disconnect_releases() {
    let scene = Rc::new(SceneContext::new());
    let mut controls = connected(&scene);
    assert_eq!(scene.active_controls(), Some(ControlsKind::FirstPerson));

    controls.disconnect();
    controls.disconnect();
    assert_eq!(scene.active_controls(), None);

    let target = controls.target();
    controls.handle_event(&key(NavKey::ArrowUp, true));
    controls.tick(1.0);
    assert_eq!(controls.target(), target);
}
