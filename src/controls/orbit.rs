use glam::{Quat, Vec3};
use std::f32::consts::{PI, TAU};
use std::rc::Rc;

use crate::camera::Camera;
use crate::config::OrbitSettings;
use crate::controls::MapOrbit;
use crate::events::{ChangeDispatcher, ListenerId};
use crate::input::{DragMove, InputEvent, InteractionState, KeyNavState, PointerTracker};
use crate::scene::{ControlsKind, SceneContext, DEFAULT_VIEWPORT_HEIGHT};
use crate::timer::RepeatTimer;

/// Wrap an angle into [-pi, pi]
fn normalize_angle(angle: f32) -> f32 {
    let wrapped = angle % TAU;
    if wrapped > PI {
        wrapped - TAU
    } else if wrapped < -PI {
        wrapped + TAU
    } else {
        wrapped
    }
}

/// Cosine ease, flat at both ends
fn ease(x: f32) -> f32 {
    0.5 * (1.0 - (x * PI).cos())
}

struct ViewAnimation {
    token: u64,
    elapsed: f32,
    duration: f32,
    start_position: Vec3,
    start_target: Vec3,
    end_position: Vec3,
    end_target: Vec3,
    rotate_angle: f32,
    end_azimuth: f32,
    callback: Option<Box<dyn FnOnce()>>,
}

/// Bird's-eye navigation controller wrapping the orbit primitive. Keeps the
/// focal target tied to the terrain surface as the camera moves and runs
/// cancellable view transition animations.
///
/// Transitions are cancelled cooperatively: `stop_animations` invalidates
/// the current animation token, and the parked animation notices on the
/// next `tick`, settles silently and drops its completion callback.
pub struct OrbitControls {
    camera: Camera,
    core: MapOrbit,
    settings: OrbitSettings,
    scene: Option<Rc<SceneContext>>,
    enabled: bool,

    height_offset: f32,
    target_terrain_height: f32,

    pointer: PointerTracker,
    keys: KeyNavState,
    repeat: RepeatTimer,

    animation: Option<ViewAnimation>,
    token_seq: u64,

    dispatcher: ChangeDispatcher,
}

impl OrbitControls {
    /// Wrap a camera. The controller stays inert until `connect`.
    pub fn new(camera: Camera, settings: OrbitSettings) -> Self {
        let repeat = RepeatTimer::new(settings.key_repeat_interval);
        Self {
            camera,
            core: MapOrbit::new(settings.clone()),
            settings,
            scene: None,
            enabled: false,
            height_offset: 0.0,
            target_terrain_height: 0.0,
            pointer: PointerTracker::new(),
            keys: KeyNavState::new(),
            repeat,
            animation: None,
            token_seq: 0,
            dispatcher: ChangeDispatcher::new(),
        }
    }

    /// Attach to a scene and start accepting input. Callers normally follow
    /// up with `set_view` to establish the initial pose.
    pub fn connect(&mut self, scene: Rc<SceneContext>) {
        self.camera.near = self.settings.near_plane;
        scene.claim_controls(ControlsKind::Orbit);
        self.scene = Some(scene);
        self.enabled = true;
        log::debug!("orbit controls connected");
    }

    /// Detach from the scene. An in-flight animation is cancelled silently
    /// and held input state is dropped. Safe to call more than once.
    pub fn disconnect(&mut self) {
        self.stop_animations();
        if self.animation.take().is_some() {
            self.core.damping_enabled = true;
        }
        if let Some(scene) = self.scene.take() {
            scene.release_controls(ControlsKind::Orbit);
            log::debug!("orbit controls disconnected");
        }
        self.pointer.clear();
        self.keys.clear();
        self.repeat.reset();
        self.enabled = false;
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn target(&self) -> Vec3 {
        self.camera.look_target
    }

    pub fn height_offset(&self) -> f32 {
        self.height_offset
    }

    pub fn azimuthal_angle(&self) -> f32 {
        self.core.azimuthal_angle(&self.camera)
    }

    /// True while a view transition is in flight and its token is current
    pub fn animating(&self) -> bool {
        self.animation
            .as_ref()
            .is_some_and(|a| a.token == self.token_seq)
    }

    pub fn interaction_state(&self) -> InteractionState {
        self.pointer.state()
    }

    pub fn on_change(&mut self, listener: impl FnMut() + 'static) -> ListenerId {
        self.dispatcher.on_change(listener)
    }

    pub fn remove_listener(&mut self, id: ListenerId) {
        self.dispatcher.remove(id);
    }

    /// Jump the camera to a pose and rebase the height offset on the
    /// terrain under the new target
    pub fn set_view(&mut self, position: Vec3, target: Vec3) {
        self.camera.position = position;
        self.camera.look_at(target);
        self.sync_terrain_offset();
        self.core.update(&mut self.camera);
        self.dispatcher.emit();
    }

    /// Pan by a screen-space pixel delta, map-drag convention: the ground
    /// follows the delta, so positive `dx` slides the camera left
    pub fn pan_view(&mut self, dx: f32, dy: f32) {
        if dx == 0.0 && dy == 0.0 {
            return;
        }
        let viewport = self.viewport_height();
        self.core.pan_pixels(&self.camera, dx, dy, viewport);
        self.apply_core();
    }

    /// Swing the view by azimuth/polar deltas; the polar angle stays above
    /// the configured horizon limit
    pub fn tilt_view(&mut self, d_azimuth: f32, d_polar: f32) {
        if d_azimuth != 0.0 {
            self.core.rotate_left(d_azimuth);
        }
        if d_polar != 0.0 {
            self.core.rotate_up(d_polar);
        }
        if d_azimuth != 0.0 || d_polar != 0.0 {
            self.apply_core();
        }
    }

    /// Dolly by a zoom delta, positive moving toward the scene
    pub fn zoom_view(&mut self, delta: f32) {
        let scale = self.core.zoom_scale(delta.abs());
        if delta > 0.0 {
            self.core.dolly_in(scale);
        } else if delta < 0.0 {
            self.core.dolly_out(scale);
        } else {
            return;
        }
        self.apply_core();
    }

    /// Glide the camera to a new pose over the animation duration, swinging
    /// the approach azimuth the short way round to `azimuth`. Starting a
    /// new transition supersedes an in-flight one; the superseded
    /// animation's callback is dropped, never invoked.
    pub fn animate_to(
        &mut self,
        position: Vec3,
        target: Vec3,
        azimuth: f32,
        callback: Option<Box<dyn FnOnce()>>,
    ) {
        let start_azimuth = self.core.azimuthal_angle(&self.camera);
        self.token_seq = self.token_seq.wrapping_add(1);
        self.core.damping_enabled = false;
        self.animation = Some(ViewAnimation {
            token: self.token_seq,
            elapsed: 0.0,
            duration: self.settings.animation_duration,
            start_position: self.camera.position,
            start_target: self.camera.look_target,
            end_position: position,
            end_target: target,
            rotate_angle: normalize_angle(azimuth - start_azimuth),
            end_azimuth: azimuth,
            callback,
        });
    }

    /// Invalidate the in-flight transition token. The parked animation
    /// notices on the next tick and settles silently.
    pub fn stop_animations(&mut self) {
        self.token_seq = self.token_seq.wrapping_add(1);
    }

    /// Feed one normalized input event. Ignored while disconnected.
    pub fn handle_event(&mut self, event: &InputEvent) {
        if !self.enabled {
            return;
        }
        match event {
            InputEvent::PointerDown(e) => {
                self.stop_animations();
                self.pointer.pointer_down(*e);
            }
            InputEvent::PointerMove(e) => {
                if let Some(drag) = self.pointer.pointer_move(*e) {
                    self.apply_drag(drag);
                }
            }
            InputEvent::PointerUp(e) => self.pointer.pointer_up(*e),
            InputEvent::Scroll(amount) => {
                self.stop_animations();
                self.zoom_view(-amount);
            }
            InputEvent::Key { key, pressed } => self.keys.set(*key, *pressed),
            InputEvent::Blur => {
                self.pointer.clear();
                self.keys.clear();
                self.repeat.reset();
            }
        }
    }

    /// Advance the in-flight animation, damping inertia and the keyboard
    /// repeat by a frame delta
    pub fn tick(&mut self, delta: f32) {
        if !self.enabled {
            return;
        }

        if let Some(animation) = self.animation.take() {
            if animation.token == self.token_seq {
                self.advance_animation(animation, delta);
                return;
            }
            // Superseded mid-flight: settle silently, the callback is
            // dropped without running
            self.core.damping_enabled = true;
            self.sync_terrain_offset();
        }

        if self.keys.has_motion() {
            let steps = self.repeat.tick(delta);
            for _ in 0..steps {
                self.apply_key_step();
            }
        } else {
            self.repeat.reset();
        }

        // Damping keeps draining queued deltas after the input stops
        if self.core.update(&mut self.camera) {
            self.update_controls_target();
            self.dispatcher.emit();
        }
    }

    fn advance_animation(&mut self, mut animation: ViewAnimation, delta: f32) {
        animation.elapsed += delta;
        let x = animation.elapsed / animation.duration;

        if x < 1.0 {
            let k = ease(x);
            let target = animation.start_target.lerp(animation.end_target, k);
            let position = animation.start_position.lerp(animation.end_position, k);
            // Swing the approach around the focal point's vertical axis so
            // the azimuth sweeps the short way instead of unwinding at the
            // end of the glide
            let swing = Quat::from_rotation_z(animation.rotate_angle * k);
            self.camera.position = target + swing * (position - target);
            self.camera.look_at(target);
            self.core.update(&mut self.camera);
            self.animation = Some(animation);
            self.dispatcher.emit();
            return;
        }

        // Landed: snap to the requested pose and realign the azimuth
        // exactly before restoring damping and handing over to the caller
        self.camera.position = animation.end_position;
        self.camera.look_at(animation.end_target);
        let residual = self.core.azimuthal_angle(&self.camera) - animation.end_azimuth;
        self.core.rotate_left(residual);
        self.core.update(&mut self.camera);
        self.core.damping_enabled = true;
        self.sync_terrain_offset();
        self.dispatcher.emit();
        if let Some(callback) = animation.callback.take() {
            callback();
        }
    }

    fn apply_drag(&mut self, drag: DragMove) {
        let viewport = self.viewport_height();
        match drag.state {
            InteractionState::Rotate | InteractionState::TouchRotate => {
                let scale = TAU * self.settings.rotate_speed / viewport;
                self.core.rotate_left(drag.delta.x * scale);
                self.core.rotate_up(drag.delta.y * scale);
            }
            InteractionState::Pan | InteractionState::TouchPan => {
                self.core
                    .pan_pixels(&self.camera, drag.delta.x, drag.delta.y, viewport);
            }
            InteractionState::None => return,
        }
        self.apply_core();
    }

    fn apply_key_step(&mut self) {
        let signals = self.keys.signals();

        if signals.left_right != 0.0 || signals.up_down != 0.0 {
            let viewport = self.viewport_height();
            self.core.pan_pixels(
                &self.camera,
                -signals.left_right * self.settings.key_pan_speed,
                signals.up_down * self.settings.key_pan_speed,
                viewport,
            );
        }

        if signals.page != 0.0 {
            let adjusted = (self.height_offset
                + self.height_offset * signals.page * self.settings.height_step)
                .max(0.0);
            let delta = adjusted - self.height_offset;
            self.height_offset = adjusted;
            self.camera.look_target.z = self.target_terrain_height + self.height_offset;
            self.camera.position.z += delta;
            self.dispatcher.emit();
        }
    }

    fn apply_core(&mut self) {
        if self.core.update(&mut self.camera) {
            self.update_controls_target();
            self.dispatcher.emit();
        }
    }

    fn viewport_height(&self) -> f32 {
        self.scene
            .as_ref()
            .map_or(DEFAULT_VIEWPORT_HEIGHT, |s| s.viewport_height())
    }

    /// Re-tie the target height to the terrain under it, preserving the
    /// user's height offset. Skipped while a transition is animating.
    fn update_controls_target(&mut self) {
        if self.animating() {
            return;
        }
        self.target_terrain_height = self.terrain_height_under_target();
        self.camera.look_target.z = self.target_terrain_height + self.height_offset;
    }

    /// Rebase the height offset so the current pose becomes authoritative
    fn sync_terrain_offset(&mut self) {
        self.target_terrain_height = self.terrain_height_under_target();
        self.height_offset = self.camera.look_target.z - self.target_terrain_height;
    }

    /// Effective terrain height under the target, faded out as the camera
    /// climbs: full height when the camera sits at terrain level, zero once
    /// it reaches twice the terrain height. Zero at or below sea level,
    /// which also guards the division.
    fn terrain_height_under_target(&self) -> f32 {
        let target = self.camera.look_target;
        let height = self
            .scene
            .as_ref()
            .and_then(|s| s.terrain_height_at(target.truncate()))
            .unwrap_or(0.0);
        if height > 0.0 {
            (1.0 - (self.camera.position.z - height) / height).max(0.0) * height
        } else {
            0.0
        }
    }
}
