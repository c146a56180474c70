use glam::{Vec2, Vec3};
use std::f32::consts::{FRAC_PI_2, TAU};
use std::rc::Rc;

use crate::camera::Camera;
use crate::config::FirstPersonSettings;
use crate::events::{ChangeDispatcher, ListenerId};
use crate::input::{DragMove, InputEvent, InteractionState, KeyNavState, PointerTracker};
use crate::math::Ray;
use crate::scene::{ControlsKind, SceneContext};
use crate::timer::RepeatTimer;

/// Unit look direction for a yaw/pitch pair. Yaw zero faces +Y and grows
/// counterclockwise seen from above; pitch raises toward +Z.
pub fn look_direction(yaw: f32, pitch: f32) -> Vec3 {
    Vec3::new(
        -yaw.sin() * pitch.cos(),
        yaw.cos() * pitch.cos(),
        pitch.sin(),
    )
}

/// Street-level navigation controller. Drags and arrow keys walk a focal
/// target across the ground; walls stop or deflect the walk and the eye
/// height follows the terrain. The camera trails the target.
pub struct FirstPersonControls {
    camera: Camera,
    settings: FirstPersonSettings,
    scene: Option<Rc<SceneContext>>,
    enabled: bool,

    target: Vec3,
    yaw: f32,
    pitch: f32,
    look: Vec3,
    person_height: f32,

    pointer: PointerTracker,
    keys: KeyNavState,
    repeat: RepeatTimer,

    dirty: bool,
    dispatcher: ChangeDispatcher,
}

impl FirstPersonControls {
    /// Wrap a camera. The controller stays inert until `connect`.
    pub fn new(camera: Camera, settings: FirstPersonSettings) -> Self {
        let look = camera.forward();
        let pitch = look.z.clamp(-1.0, 1.0).asin();
        let yaw = (-look.x).atan2(look.y);

        let repeat = RepeatTimer::new(settings.key_repeat_interval);
        let person_height = settings.person_height;

        Self {
            target: camera.look_target,
            camera,
            settings,
            scene: None,
            enabled: false,
            yaw,
            pitch,
            look,
            person_height,
            pointer: PointerTracker::new(),
            keys: KeyNavState::new(),
            repeat,
            dirty: false,
            dispatcher: ChangeDispatcher::new(),
        }
    }

    /// Attach to a scene and start accepting input
    pub fn connect(&mut self, scene: Rc<SceneContext>) {
        self.camera.near = self.settings.near_plane;
        scene.claim_controls(ControlsKind::FirstPerson);
        self.scene = Some(scene);
        self.enabled = true;
        log::debug!("first-person controls connected");
    }

    /// Detach from the scene, dropping all held input state. Safe to call
    /// more than once.
    pub fn disconnect(&mut self) {
        if let Some(scene) = self.scene.take() {
            scene.release_controls(ControlsKind::FirstPerson);
            log::debug!("first-person controls disconnected");
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
        self.target
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn look(&self) -> Vec3 {
        self.look
    }

    pub fn person_height(&self) -> f32 {
        self.person_height
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

    /// Jump to a pose: stand at `target` looking along `look_dir`. Applies
    /// immediately and notifies listeners.
    pub fn set_view(&mut self, target: Vec3, look_dir: Vec3, person_height: Option<f32>) {
        self.target = target;
        if let Some(height) = person_height {
            self.person_height = height.max(self.settings.min_person_height);
        }

        let look = look_dir.normalize_or_zero();
        self.pitch = look.z.clamp(-1.0, 1.0).asin();
        self.yaw = (-look.x).atan2(look.y);

        self.refresh_camera();
        self.dirty = false;
        self.dispatcher.emit();
    }

    /// Turn by yaw/pitch deltas, pitch clamped to straight up/down
    pub fn tilt_view(&mut self, dyaw: f32, dpitch: f32) {
        self.rotate(dyaw, dpitch);
        self.update();
    }

    /// Walk by a view-relative ground step, stopping at walls and sliding
    /// along them
    pub fn pan_view(&mut self, dx: f32, dy: f32) {
        self.pan(dx, dy);
        self.update();
    }

    /// Feed one normalized input event. Ignored while disconnected.
    pub fn handle_event(&mut self, event: &InputEvent) {
        if !self.enabled {
            return;
        }
        match event {
            InputEvent::PointerDown(e) => self.pointer.pointer_down(*e),
            InputEvent::PointerMove(e) => {
                if let Some(drag) = self.pointer.pointer_move(*e) {
                    self.apply_drag(drag);
                }
            }
            InputEvent::PointerUp(e) => self.pointer.pointer_up(*e),
            // Walking has no zoom
            InputEvent::Scroll(_) => {}
            InputEvent::Key { key, pressed } => self.keys.set(*key, *pressed),
            InputEvent::Blur => {
                self.pointer.clear();
                self.keys.clear();
                self.repeat.reset();
            }
        }
    }

    /// Advance the keyboard repeat by a frame delta
    pub fn tick(&mut self, delta: f32) {
        if !self.enabled {
            return;
        }
        if !self.keys.has_motion() {
            self.repeat.reset();
            return;
        }

        let steps = self.repeat.tick(delta);
        for _ in 0..steps {
            self.apply_key_step();
        }
        if steps > 0 {
            self.update();
        }
    }

    /// Recompute the camera pose and notify listeners, once, if anything
    /// changed since the last update
    pub fn update(&mut self) {
        if !self.dirty {
            return;
        }
        self.refresh_camera();
        self.dirty = false;
        self.dispatcher.emit();
    }

    fn apply_drag(&mut self, drag: DragMove) {
        match drag.state {
            InteractionState::Pan | InteractionState::TouchPan => {
                let speed = self.settings.mouse_pan_speed;
                self.pan(-drag.delta.x * speed, drag.delta.y * speed);
            }
            InteractionState::Rotate | InteractionState::TouchRotate => {
                let viewport = self
                    .scene
                    .as_ref()
                    .map_or(crate::scene::DEFAULT_VIEWPORT_HEIGHT, |s| {
                        s.viewport_height()
                    });
                let scale = TAU * self.settings.mouse_rotate_speed / viewport;
                self.rotate(drag.delta.x * scale, drag.delta.y * scale);
            }
            InteractionState::None => {}
        }
        self.update();
    }

    fn apply_key_step(&mut self) {
        let signals = self.keys.signals();

        let dpitch = if signals.shift {
            signals.up_down * self.settings.key_rotate_step
        } else {
            0.0
        };
        let dyaw = if signals.control {
            0.0
        } else {
            -signals.left_right * self.settings.key_rotate_step
        };
        // Control strafes instead of turning, Shift tilts instead of walking
        let dx = if signals.control {
            signals.left_right * self.settings.key_pan_step * 0.75
        } else {
            0.0
        };
        let dy = if signals.shift {
            0.0
        } else {
            signals.up_down * self.settings.key_pan_step
        };

        self.rotate(dyaw, dpitch);
        self.pan(dx, dy);

        if signals.page != 0.0 {
            let adjusted = (self.person_height
                + self.person_height * signals.page * self.settings.height_step)
                .max(self.settings.min_person_height);
            self.target.z += adjusted - self.person_height;
            self.person_height = adjusted;
            self.dirty = true;
        }
    }

    fn rotate(&mut self, dyaw: f32, dpitch: f32) {
        self.yaw += dyaw;
        self.pitch = (self.pitch + dpitch).clamp(-FRAC_PI_2, FRAC_PI_2);
        self.dirty = true;
    }

    /// Move the target by a view-relative ground step. Collision geometry
    /// stops the move a wall buffer short and deflects the remainder along
    /// the wall; afterwards the target height settles toward the ground
    /// surface plus the person height.
    fn pan(&mut self, dx: f32, dy: f32) {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let world = Vec2::new(cos_yaw * dx - sin_yaw * dy, sin_yaw * dx + cos_yaw * dy);

        let step = world.length();
        if step < self.settings.pan_epsilon {
            return;
        }
        let dir = world / step;
        let dir3 = Vec3::new(dir.x, dir.y, 0.0);
        let buffer = self.settings.wall_buffer;

        let blocked = self
            .scene
            .as_ref()
            .and_then(|scene| scene.raycast(&Ray::new(self.target, dir3)))
            .filter(|hit| hit.distance - buffer < step);

        match blocked {
            Some(hit) => {
                // Advance to the wall buffer; negative pushes back out of it
                let allowed = hit.distance - buffer;
                self.target += dir3 * allowed;

                let overstep = step - allowed;
                let tangent =
                    Vec2::new(-hit.normal.y, hit.normal.x).normalize_or_zero();
                let mut slide = tangent.dot(dir) * overstep;
                let mut tangent = Vec3::new(tangent.x, tangent.y, 0.0);
                if slide < 0.0 {
                    slide = -slide;
                    tangent = -tangent;
                }

                if slide > 0.0 {
                    if let Some(scene) = &self.scene {
                        if let Some(side) = scene.raycast(&Ray::new(self.target, tangent)) {
                            // A second wall may shorten the slide, possibly
                            // below zero, which backs out of its buffer
                            slide = slide.min(side.distance - buffer);
                        }
                    }
                    self.target += tangent * slide;
                }
            }
            None => {
                self.target += dir3 * step;
            }
        }

        self.settle_height();
        self.dirty = true;
    }

    /// Blend the target height toward the surface underfoot. Collision
    /// geometry wins over the terrain model; with neither, height is
    /// unconstrained and stays where it is.
    fn settle_height(&mut self) {
        let Some(scene) = &self.scene else {
            return;
        };

        let ground = scene
            .raycast(&Ray::new(self.target, Vec3::NEG_Z))
            .map(|hit| hit.point.z)
            .or_else(|| scene.terrain_height_at(self.target.truncate()));

        if let Some(ground) = ground {
            let smoothing = self.settings.height_smoothing;
            self.target.z = (1.0 - smoothing) * self.target.z
                + smoothing * (ground + self.person_height);
        }
    }

    fn refresh_camera(&mut self) {
        self.look = look_direction(self.yaw, self.pitch);
        self.camera.position = self.target - self.look * self.settings.camera_offset;
        self.camera.look_at(self.target);
    }
}
