use glam::{Vec2, Vec3};
use std::cell::Cell;
use std::f32::consts::{FRAC_PI_4, TAU};
use std::rc::Rc;
use terrain_nav::input::{InputEvent, InteractionState, NavKey, PointerButton, PointerEvent, PointerKind};
use terrain_nav::scene::ControlsKind;
use terrain_nav::{Camera, FlatTerrain, OrbitControls, OrbitSettings, SceneContext};

fn empty_scene() -> Rc<SceneContext> {
    Rc::new(SceneContext::new())
}

fn terrain_scene(elevation: f32) -> Rc<SceneContext> {
    let scene = SceneContext::new();
    scene.set_terrain(FlatTerrain::new(elevation));
    Rc::new(scene)
}

fn connected(position: Vec3, target: Vec3, scene: &Rc<SceneContext>) -> OrbitControls {
    let camera = Camera::new(position, target);
    let mut controls = OrbitControls::new(camera, OrbitSettings::default());
    controls.connect(Rc::clone(scene));
    controls.set_view(position, target);
    controls
}

fn mouse(button: PointerButton, x: f32, y: f32) -> PointerEvent {
    PointerEvent {
        id: 7,
        kind: PointerKind::Mouse,
        button,
        position: Vec2::new(x, y),
    }
}

// ============================================================================
// View Transition Tests
// ============================================================================

#[test]
fn test_animate_to_reaches_end_pose_and_fires_callback_once() {
    let scene = empty_scene();
    let mut controls = connected(Vec3::new(0.0, -10.0, 10.0), Vec3::ZERO, &scene);

    let end_position = Vec3::new(0.0, -30.0, 30.0);
    let end_target = Vec3::new(10.0, 0.0, 0.0);
    // Azimuth consistent with the end pose, so landing needs no realignment
    let azimuth = (-10.0f32).atan2(30.0);

    let fired = Rc::new(Cell::new(0u32));
    let counter = Rc::clone(&fired);
    controls.animate_to(
        end_position,
        end_target,
        azimuth,
        Some(Box::new(move || counter.set(counter.get() + 1))),
    );

    // Stock duration is two seconds; partway through it is still in flight
    for _ in 0..10 {
        controls.tick(0.1);
    }
    assert!(controls.animating());
    assert_eq!(fired.get(), 0);
    assert!(controls.camera().position.distance(Vec3::new(0.0, -10.0, 10.0)) > 1.0);

    for _ in 0..15 {
        controls.tick(0.1);
    }
    assert!(!controls.animating());
    assert_eq!(fired.get(), 1, "Completion callback should run exactly once");
    assert!(controls.camera().position.distance(end_position) < 1e-2);
    assert!(controls.target().distance(end_target) < 1e-2);
}

#[test]
fn test_animate_to_realigns_azimuth_on_landing() {
    let scene = empty_scene();
    let mut controls = connected(Vec3::new(0.0, -10.0, 10.0), Vec3::ZERO, &scene);

    // The end pose sits at a nonzero azimuth but north-up is requested
    let end_position = Vec3::new(0.0, -30.0, 30.0);
    let end_target = Vec3::new(10.0, 0.0, 0.0);
    controls.animate_to(end_position, end_target, 0.0, None);

    for _ in 0..25 {
        controls.tick(0.1);
    }

    assert!(controls.azimuthal_angle().abs() < 1e-3);
    assert!(controls.target().distance(end_target) < 1e-2);
    // Realignment swings around the target: height and range are preserved
    assert!((controls.camera().position.z - 30.0).abs() < 1e-2);
    assert!((controls.camera().position.x - 10.0).abs() < 0.05);
    assert!((controls.camera().position.y + 31.62).abs() < 0.05);
}

#[test]
fn test_second_animate_supersedes_first() {
    let scene = empty_scene();
    let mut controls = connected(Vec3::new(0.0, -10.0, 10.0), Vec3::ZERO, &scene);

    let first_fired = Rc::new(Cell::new(0u32));
    let first_counter = Rc::clone(&first_fired);
    controls.animate_to(
        Vec3::new(200.0, 0.0, 50.0),
        Vec3::new(200.0, 0.0, 0.0),
        0.0,
        Some(Box::new(move || first_counter.set(first_counter.get() + 1))),
    );
    controls.tick(0.1);

    let second_fired = Rc::new(Cell::new(0u32));
    let second_counter = Rc::clone(&second_fired);
    controls.animate_to(
        Vec3::new(0.0, -20.0, 20.0),
        Vec3::ZERO,
        0.0,
        Some(Box::new(move || second_counter.set(second_counter.get() + 1))),
    );

    for _ in 0..25 {
        controls.tick(0.1);
    }

    assert_eq!(first_fired.get(), 0, "Superseded callback must never run");
    assert_eq!(second_fired.get(), 1);
    assert!(controls.camera().position.distance(Vec3::new(0.0, -20.0, 20.0)) < 1e-2);
    assert!(controls.camera().position.x < 50.0);
}

#[test]
fn test_wheel_input_cancels_transition() {
    let scene = empty_scene();
    let mut controls = connected(Vec3::new(0.0, -10.0, 10.0), Vec3::ZERO, &scene);

    let fired = Rc::new(Cell::new(0u32));
    let counter = Rc::clone(&fired);
    controls.animate_to(
        Vec3::new(200.0, 0.0, 50.0),
        Vec3::new(200.0, 0.0, 0.0),
        0.0,
        Some(Box::new(move || counter.set(counter.get() + 1))),
    );
    controls.tick(0.1);

    let before = controls.camera().distance_to_target();
    controls.handle_event(&InputEvent::Scroll(1.0));
    assert!(!controls.animating());

    // Wheel toward the viewer dollies out immediately; the parked animation
    // settles on the next tick without moving toward the destination
    assert!(controls.camera().distance_to_target() > before);
    controls.tick(0.1);
    controls.tick(0.1);
    assert_eq!(fired.get(), 0);
    assert!(controls.camera().position.x < 50.0);
}

#[test]
fn test_pointer_down_cancels_transition() {
    let scene = empty_scene();
    let mut controls = connected(Vec3::new(0.0, -10.0, 10.0), Vec3::ZERO, &scene);

    controls.animate_to(Vec3::new(200.0, 0.0, 50.0), Vec3::new(200.0, 0.0, 0.0), 0.0, None);
    controls.tick(0.1);
    assert!(controls.animating());

    controls.handle_event(&InputEvent::PointerDown(mouse(PointerButton::Primary, 400.0, 300.0)));
    assert!(!controls.animating());

    controls.tick(0.1);
    assert!(controls.camera().position.x < 50.0);
}

#[test]
fn test_set_view_does_not_cancel_transition() {
    let scene = empty_scene();
    let mut controls = connected(Vec3::new(0.0, -10.0, 10.0), Vec3::ZERO, &scene);

    controls.animate_to(Vec3::new(100.0, 0.0, 30.0), Vec3::new(100.0, 0.0, 0.0), 0.0, None);
    controls.tick(0.1);

    controls.set_view(Vec3::new(0.0, -5.0, 5.0), Vec3::ZERO);
    assert!(controls.animating());

    // The glide keeps heading for its destination
    let x_before = controls.camera().position.x;
    for _ in 0..5 {
        controls.tick(0.1);
    }
    assert!(controls.camera().position.x > x_before);
}

// ============================================================================
// Gesture and Keyboard Tests
// ============================================================================

#[test]
fn test_rotate_drag_drains_through_damping() {
    let scene = empty_scene();
    let mut controls = connected(Vec3::new(0.0, -10.0, 5.0), Vec3::ZERO, &scene);
    assert!(controls.azimuthal_angle().abs() < 1e-5);

    controls.handle_event(&InputEvent::PointerDown(mouse(PointerButton::Secondary, 400.0, 300.0)));
    assert_eq!(controls.interaction_state(), InteractionState::Rotate);
    controls.handle_event(&InputEvent::PointerMove(mouse(PointerButton::None, 500.0, 300.0)));
    controls.handle_event(&InputEvent::PointerUp(mouse(PointerButton::None, 500.0, 300.0)));
    assert_eq!(controls.interaction_state(), InteractionState::None);

    // Damping applies only a share of the swing on the first update
    let first = controls.azimuthal_angle();
    assert!(first < 0.0);

    for _ in 0..40 {
        controls.tick(0.016);
    }

    // The full 100-pixel swing lands once the queued delta drains
    let expected = -(100.0 * TAU / 1080.0);
    assert!((controls.azimuthal_angle() - expected).abs() < 1e-2);
    assert!(controls.azimuthal_angle() < first);
}

#[test]
fn test_pan_view_moves_camera_and_target_in_lockstep() {
    let scene = empty_scene();
    let mut controls = connected(Vec3::new(0.0, -10.0, 10.0), Vec3::ZERO, &scene);

    let position_before = controls.camera().position;
    let target_before = controls.target();

    controls.pan_view(100.0, 0.0);
    for _ in 0..40 {
        controls.tick(0.016);
    }

    // Map-drag convention: the ground follows the pointer to the right, so
    // the camera slides left by the drag width in world units
    let factor = 2.0 * 200.0f32.sqrt() * (FRAC_PI_4 * 0.5).tan() / 1080.0;
    let shift = controls.target() - target_before;
    assert!((shift.x + 100.0 * factor).abs() < 0.01);
    assert!(shift.y.abs() < 1e-3);
    assert!(shift.z.abs() < 1e-3);
    assert!((controls.camera().position - position_before - shift).length() < 1e-3);
}

#[test]
fn test_tilt_view_respects_horizon_limit() {
    let scene = empty_scene();
    let mut controls = connected(Vec3::new(0.0, -10.0, 0.5), Vec3::ZERO, &scene);

    // Far more downward tilt than the horizon allows
    controls.tilt_view(0.0, -0.5);
    for _ in 0..30 {
        controls.tick(0.016);
        assert!(controls.camera().position.z > -1e-3);
    }

    // Clamped at the horizon: camera level with the target, range unchanged
    assert!(controls.camera().position.z.abs() < 0.02);
    assert!((controls.camera().distance_to_target() - 10.012).abs() < 0.05);
    assert!(controls.azimuthal_angle().abs() < 1e-4);
}

#[test]
fn test_arrow_keys_pan_after_repeat_interval() {
    let scene = empty_scene();
    let mut controls = connected(Vec3::new(0.0, -10.0, 10.0), Vec3::ZERO, &scene);
    let target_before = controls.target();

    controls.handle_event(&InputEvent::Key {
        key: NavKey::ArrowRight,
        pressed: true,
    });
    for _ in 0..40 {
        controls.tick(0.05);
    }
    controls.handle_event(&InputEvent::Key {
        key: NavKey::ArrowRight,
        pressed: false,
    });

    // Arrow right walks the view east: the target slides +x
    assert!(controls.target().x > target_before.x + 0.1);

    // Whatever damping still holds drains out, then the pose is stable
    for _ in 0..40 {
        controls.tick(0.05);
    }
    let settled = controls.target();
    for _ in 0..10 {
        controls.tick(0.05);
    }
    assert!(controls.target().distance(settled) < 0.01);
}

// ============================================================================
// Terrain Tracking Tests
// ============================================================================

#[test]
fn test_target_height_follows_camera_altitude() {
    let scene = terrain_scene(5.0);
    let mut controls = connected(Vec3::new(0.0, -20.0, 8.0), Vec3::new(0.0, 0.0, 6.0), &scene);

    // Effective terrain fades with camera height: at z=8 over 5-high ground
    // it contributes 2, leaving a user offset of 4
    assert!((controls.height_offset() - 4.0).abs() < 1e-3);
    assert!((controls.target().z - 6.0).abs() < 1e-3);

    let z_before = controls.camera().position.z;
    controls.zoom_view(-2.0);

    // Dollying out raises the camera, so the terrain tie weakens and the
    // target settles lower while the offset itself is preserved
    assert!(controls.camera().position.z > z_before);
    assert!(controls.target().z < 6.0);
    assert!(controls.target().z > 5.0);
    assert!((controls.height_offset() - 4.0).abs() < 1e-3);
}

#[test]
fn test_sea_level_terrain_contributes_nothing() {
    let scene = terrain_scene(0.0);
    let mut controls = connected(Vec3::new(0.0, -10.0, 5.0), Vec3::new(0.0, 0.0, 3.0), &scene);

    assert!((controls.height_offset() - 3.0).abs() < 1e-3);

    controls.zoom_view(1.0);
    controls.zoom_view(-3.0);
    assert!((controls.target().z - 3.0).abs() < 1e-3);
    assert!(controls.target().z.is_finite());
}

#[test]
fn test_page_keys_scale_height_offset() {
    let scene = terrain_scene(0.0);
    let mut controls = connected(Vec3::new(0.0, -10.0, 5.0), Vec3::new(0.0, 0.0, 2.0), &scene);
    assert!((controls.height_offset() - 2.0).abs() < 1e-3);

    controls.handle_event(&InputEvent::Key {
        key: NavKey::PageDown,
        pressed: true,
    });
    controls.tick(0.06);
    controls.handle_event(&InputEvent::Key {
        key: NavKey::PageDown,
        pressed: false,
    });

    // One step scales the offset down five percent and lowers the camera by
    // the same amount
    assert!((controls.height_offset() - 1.9).abs() < 1e-3);
    assert!((controls.target().z - 1.9).abs() < 1e-3);
    assert!((controls.camera().position.z - 4.9).abs() < 1e-3);
}

#[test]
fn test_height_offset_clamps_at_terrain() {
    let scene = terrain_scene(5.0);
    // Camera low over high ground with the target sunk beneath the effective
    // terrain height, leaving a negative offset
    let mut controls = connected(Vec3::new(0.0, -10.0, 6.0), Vec3::new(0.0, 0.0, 3.0), &scene);
    assert!(controls.height_offset() < 0.0);

    controls.handle_event(&InputEvent::Key {
        key: NavKey::PageUp,
        pressed: true,
    });
    controls.tick(0.06);

    // Any page step clamps a negative offset straight to zero, snapping the
    // target back up to the terrain surface
    assert_eq!(controls.height_offset(), 0.0);
    assert!((controls.target().z - 4.0).abs() < 1e-3);
    assert!((controls.camera().position.z - 7.0).abs() < 1e-3);
}

// ============================================================================
// Lifecycle Tests
// ============================================================================

#[test]
fn test_connect_claims_and_disconnect_releases() {
    let scene = empty_scene();
    let mut controls = connected(Vec3::new(0.0, -10.0, 10.0), Vec3::ZERO, &scene);
    assert_eq!(scene.active_controls(), Some(ControlsKind::Orbit));

    controls.disconnect();
    controls.disconnect();
    assert_eq!(scene.active_controls(), None);

    // Input is ignored while disconnected
    let distance = controls.camera().distance_to_target();
    controls.handle_event(&InputEvent::Scroll(2.0));
    controls.tick(0.1);
    assert!((controls.camera().distance_to_target() - distance).abs() < 1e-5);

    controls.connect(Rc::clone(&scene));
    assert_eq!(scene.active_controls(), Some(ControlsKind::Orbit));
}

#[test]
fn test_disconnect_drops_transition_silently() {
    let scene = empty_scene();
    let mut controls = connected(Vec3::new(0.0, -10.0, 10.0), Vec3::ZERO, &scene);

    let fired = Rc::new(Cell::new(0u32));
    let counter = Rc::clone(&fired);
    controls.animate_to(
        Vec3::new(100.0, 0.0, 30.0),
        Vec3::new(100.0, 0.0, 0.0),
        0.0,
        Some(Box::new(move || counter.set(counter.get() + 1))),
    );
    controls.tick(0.1);

    controls.disconnect();
    assert!(!controls.animating());
    assert_eq!(fired.get(), 0);
}

#[test]
fn test_change_listeners_follow_gestures() {
    let scene = empty_scene();
    let mut controls = connected(Vec3::new(0.0, -10.0, 10.0), Vec3::ZERO, &scene);

    let calls = Rc::new(Cell::new(0u32));
    let counter = Rc::clone(&calls);
    let id = controls.on_change(move || counter.set(counter.get() + 1));

    controls.pan_view(50.0, 0.0);
    assert!(calls.get() >= 1);

    let seen = calls.get();
    controls.remove_listener(id);
    controls.pan_view(50.0, 0.0);
    assert_eq!(calls.get(), seen);
}
