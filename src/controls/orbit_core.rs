use glam::Vec3;

use crate::camera::Camera;
use crate::config::OrbitSettings;

const POLAR_EPS: f32 = 1e-6;
const CHANGE_EPS_SQ: f32 = 1e-10;

/// Z-up orbit primitive in the map-controls style. Accumulates rotation,
/// dolly and pan deltas and applies them to a camera on `update`, with
/// optional damping that spreads each delta over several updates.
///
/// Spherical convention: theta is the azimuth (zero when the camera sits
/// south of its target looking north, growing counterclockwise from above)
/// and phi is the polar angle from +Z.
pub struct MapOrbit {
    settings: OrbitSettings,
    pub damping_enabled: bool,

    theta_delta: f32,
    phi_delta: f32,
    scale: f32,
    pan_offset: Vec3,
}

impl MapOrbit {
    pub fn new(settings: OrbitSettings) -> Self {
        Self {
            settings,
            damping_enabled: true,
            theta_delta: 0.0,
            phi_delta: 0.0,
            scale: 1.0,
            pan_offset: Vec3::ZERO,
        }
    }

    /// Azimuth of the camera around its target
    pub fn azimuthal_angle(&self, camera: &Camera) -> f32 {
        let offset = camera.position - camera.look_target;
        offset.x.atan2(-offset.y)
    }

    /// Queue a counterclockwise swing of the camera around the target
    pub fn rotate_left(&mut self, angle: f32) {
        self.theta_delta -= angle;
    }

    /// Queue a swing toward the zenith
    pub fn rotate_up(&mut self, angle: f32) {
        self.phi_delta -= angle;
    }

    /// Scale factor for one zoom step
    pub fn zoom_scale(&self, amount: f32) -> f32 {
        0.95f32.powf(self.settings.zoom_speed * amount)
    }

    pub fn dolly_in(&mut self, scale: f32) {
        self.scale *= scale;
    }

    pub fn dolly_out(&mut self, scale: f32) {
        self.scale /= scale;
    }

    /// Queue a ground-plane pan in world units along the view axes,
    /// +x to the camera's right, +y away from the camera
    pub fn pan_world(&mut self, camera: &Camera, dx: f32, dy: f32) {
        let theta = self.azimuthal_angle(camera);
        let (sin_t, cos_t) = theta.sin_cos();
        let right = Vec3::new(cos_t, sin_t, 0.0);
        let forward = Vec3::new(-sin_t, cos_t, 0.0);
        self.pan_offset += right * dx + forward * dy;
    }

    /// Queue a pan from a pixel drag; the viewed ground follows the pointer
    pub fn pan_pixels(&mut self, camera: &Camera, dx: f32, dy: f32, viewport_height: f32) {
        let target_distance = camera.distance_to_target() * (camera.fov_y * 0.5).tan();
        let factor = 2.0 * target_distance / viewport_height.max(1.0);
        self.pan_world(camera, -dx * factor, dy * factor);
    }

    /// Apply queued deltas to the camera. Returns whether the pose moved.
    pub fn update(&mut self, camera: &mut Camera) -> bool {
        let old_position = camera.position;
        let old_target = camera.look_target;

        let offset = old_position - old_target;
        let radius = offset.length().max(POLAR_EPS);
        let mut theta = offset.x.atan2(-offset.y);
        let mut phi = (offset.z / radius).clamp(-1.0, 1.0).acos();

        let factor = if self.damping_enabled {
            self.settings.damping_factor
        } else {
            1.0
        };

        theta += self.theta_delta * factor;
        phi += self.phi_delta * factor;
        phi = phi.clamp(
            POLAR_EPS,
            self.settings
                .max_polar_angle
                .min(std::f32::consts::PI - POLAR_EPS),
        );

        let radius = (radius * self.scale).clamp(
            self.settings.min_distance.max(POLAR_EPS),
            self.settings.max_distance,
        );

        let target = old_target + self.pan_offset * factor;
        let (sin_t, cos_t) = theta.sin_cos();
        let (sin_p, cos_p) = phi.sin_cos();
        let position = target + radius * Vec3::new(sin_p * sin_t, -sin_p * cos_t, cos_p);

        camera.position = position;
        camera.look_at(target);

        if self.damping_enabled {
            let keep = 1.0 - self.settings.damping_factor;
            self.theta_delta *= keep;
            self.phi_delta *= keep;
            self.pan_offset *= keep;
        } else {
            self.theta_delta = 0.0;
            self.phi_delta = 0.0;
            self.pan_offset = Vec3::ZERO;
        }
        self.scale = 1.0;

        (position - old_position).length_squared() > CHANGE_EPS_SQ
            || (target - old_target).length_squared() > CHANGE_EPS_SQ
    }

    /// Drop queued deltas without applying them
    pub fn reset_deltas(&mut self) {
        self.theta_delta = 0.0;
        self.phi_delta = 0.0;
        self.pan_offset = Vec3::ZERO;
        self.scale = 1.0;
    }
}
