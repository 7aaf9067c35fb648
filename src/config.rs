//! Tunable parameters for the particle backdrop.
//!
//! Everything that shapes the animation lives here so the literals are not
//! scattered through the field, camera, and renderer. A config can be loaded
//! from a JSON file; missing fields fall back to the defaults below.

use serde::Deserialize;

/// Perspective camera parameters.
#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Distance back along +Z from the origin.
    pub z_offset: f32,
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    /// Near clip plane distance.
    pub near: f32,
    /// Far clip plane distance.
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            z_offset: 40.0,
            fov_degrees: 75.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

/// Full backdrop configuration.
///
/// The defaults give the stock look: 700 particles spread over [-40, 40] on
/// each axis under a slow constant rotation. The camera eases toward the
/// pointer at 5% per step.
#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(default)]
pub struct BackdropConfig {
    /// Number of particles in the field.
    pub particle_count: usize,
    /// Half-extent of the field; each coordinate is sampled in [-spread, spread].
    pub spread: f32,
    /// Seed for the deterministic particle layout.
    pub seed: u64,
    /// Per-step rotation increment around X, in radians.
    pub rotation_delta_x: f32,
    /// Per-step rotation increment around Y, in radians.
    pub rotation_delta_y: f32,
    /// Fraction of the remaining distance the camera covers each step.
    pub ease_factor: f32,
    /// Maps the normalized pointer offset to world-space camera travel.
    pub parallax_scale: f32,
    /// Particle billboard size in world units.
    pub point_size: f32,
    /// Particle color (linear RGB).
    pub point_color: [f32; 3],
    /// Particle opacity (0.0-1.0).
    pub point_opacity: f32,
    /// Background clear color (linear RGBA).
    pub clear_color: [f32; 4],
    /// Camera parameters.
    pub camera: CameraConfig,
}

impl Default for BackdropConfig {
    fn default() -> Self {
        Self {
            particle_count: 700,
            spread: 40.0,
            seed: 0,
            rotation_delta_x: 0.0005,
            rotation_delta_y: 0.001,
            ease_factor: 0.05,
            parallax_scale: 10.0,
            point_size: 0.35,
            point_color: [0.541, 0.706, 0.973],
            point_opacity: 0.75,
            clear_color: [0.039, 0.059, 0.118, 1.0],
            camera: CameraConfig::default(),
        }
    }
}
