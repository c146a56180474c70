use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Tuning parameters for the first-person controller. Angles are radians.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FirstPersonSettings {
    /// Ground units walked per keyboard tick
    pub key_pan_step: f32,
    /// Radians turned per keyboard tick
    pub key_rotate_step: f32,
    /// Ground units per pixel of pointer drag
    pub mouse_pan_speed: f32,
    /// Rotation speed scale for pointer drags, applied per viewport height
    pub mouse_rotate_speed: f32,
    /// Eye height above the ground surface
    pub person_height: f32,
    /// Lower bound enforced when the eye height is adjusted
    pub min_person_height: f32,
    /// Distance the camera trails behind the focal target
    pub camera_offset: f32,
    /// Minimum clearance kept between the target and walls
    pub wall_buffer: f32,
    /// Weight of the newly sampled ground height in the vertical blend
    pub height_smoothing: f32,
    /// Pan steps shorter than this are dropped
    pub pan_epsilon: f32,
    /// Seconds between keyboard navigation ticks
    pub key_repeat_interval: f32,
    /// Fraction of the eye height added or removed per height-adjust tick
    pub height_step: f32,
    /// Camera near plane while walking
    pub near_plane: f32,
}

impl Default for FirstPersonSettings {
    fn default() -> Self {
        Self {
            key_pan_step: 1.5,
            key_rotate_step: 2.0_f32.to_radians(),
            mouse_pan_speed: 0.1,
            mouse_rotate_speed: 10.0_f32.to_radians(),
            person_height: 3.0,
            min_person_height: 2.0,
            camera_offset: 3.0,
            wall_buffer: 0.5,
            height_smoothing: 0.25,
            pan_epsilon: 1e-3,
            key_repeat_interval: 0.05,
            height_step: 0.05,
            near_plane: 0.1,
        }
    }
}

/// Tuning parameters for the orbit controller. Angles are radians.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbitSettings {
    /// Per-update decay factor for rotation and pan inertia
    pub damping_factor: f32,
    /// Rotation speed scale for pointer drags, applied per viewport height
    pub rotate_speed: f32,
    /// Screen pixels panned per keyboard tick
    pub key_pan_speed: f32,
    /// Polar angle ceiling, keeps the camera above the horizon
    pub max_polar_angle: f32,
    /// Scroll-to-dolly sensitivity
    pub zoom_speed: f32,
    /// Dolly distance floor
    pub min_distance: f32,
    /// Dolly distance ceiling
    pub max_distance: f32,
    /// Seconds a view transition animation runs
    pub animation_duration: f32,
    /// Seconds between keyboard navigation ticks
    pub key_repeat_interval: f32,
    /// Fraction of the height offset added or removed per height-adjust tick
    pub height_step: f32,
    /// Camera near plane while orbiting
    pub near_plane: f32,
}

impl Default for OrbitSettings {
    fn default() -> Self {
        Self {
            damping_factor: 0.2,
            rotate_speed: 1.0,
            key_pan_speed: 10.0,
            max_polar_angle: std::f32::consts::FRAC_PI_2,
            zoom_speed: 1.0,
            min_distance: 0.0,
            max_distance: f32::INFINITY,
            animation_duration: 2.0,
            key_repeat_interval: 0.05,
            height_step: 0.05,
            near_plane: 2.0,
        }
    }
}

/// Combined navigation settings, loadable from a JSON file. Missing fields
/// fall back to the stock tuning.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NavSettings {
    pub first_person: FirstPersonSettings,
    pub orbit: OrbitSettings,
}

impl NavSettings {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file {}", path.display()))?;
        let settings = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse settings file {}", path.display()))?;
        Ok(settings)
    }
}
