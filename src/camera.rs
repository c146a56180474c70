use glam::{Mat4, Vec3};

pub const DEFAULT_FOV_Y: f32 = std::f32::consts::FRAC_PI_4;
pub const DEFAULT_NEAR: f32 = 0.1;

/// Z-up viewing camera. Controllers own and drive it; rendering layers only
/// read it.
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    pub position: Vec3,
    pub look_target: Vec3,
    pub fov_y: f32,
    pub near: f32,
}

impl Camera {
    pub fn new(position: Vec3, look_target: Vec3) -> Self {
        Self {
            position,
            look_target,
            fov_y: DEFAULT_FOV_Y,
            near: DEFAULT_NEAR,
        }
    }

    /// Point the camera at a world position without moving it
    pub fn look_at(&mut self, target: Vec3) {
        self.look_target = target;
    }

    pub fn forward(&self) -> Vec3 {
        (self.look_target - self.position).normalize_or_zero()
    }

    pub fn distance_to_target(&self) -> f32 {
        (self.look_target - self.position).length()
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.look_target, Vec3::Z)
    }
}
