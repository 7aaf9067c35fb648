//! Parallax camera for the backdrop.
//!
//! The camera sits on the +Z axis and always looks at the origin. Pointer
//! movement sets a goal position opposite the cursor offset; each animation
//! step eases the camera a fixed fraction of the remaining distance toward
//! that goal, so motion trails the cursor smoothly instead of snapping.

use glam::{Mat4, Vec3};

use crate::config::BackdropConfig;
use crate::pointer::PointerOffset;

// ============================================================================
// Parallax Camera
// ============================================================================

/// A look-at camera whose X/Y position eases toward a pointer-derived goal.
#[derive(Clone, Debug)]
pub struct ParallaxCamera {
    position: Vec3,
    goal: Vec3,
    ease_factor: f32,
    parallax_scale: f32,
    fov_degrees: f32,
    near: f32,
    far: f32,
    aspect: f32,
}

impl ParallaxCamera {
    /// Create a camera at (0, 0, z_offset) looking at the origin.
    pub fn new(config: &BackdropConfig, width: u32, height: u32) -> Self {
        let rest = Vec3::new(0.0, 0.0, config.camera.z_offset);
        let mut camera = Self {
            position: rest,
            goal: rest,
            ease_factor: config.ease_factor,
            parallax_scale: config.parallax_scale,
            fov_degrees: config.camera.fov_degrees,
            near: config.camera.near,
            far: config.camera.far,
            aspect: 1.0,
        };
        camera.set_aspect(width, height);
        camera
    }

    /// Current camera position in world space.
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// The position the camera is currently easing toward.
    pub fn goal(&self) -> Vec3 {
        self.goal
    }

    /// Update the goal from a pointer offset.
    ///
    /// The goal moves opposite the cursor so the scene appears to shift away
    /// from it. Z is never affected; the camera keeps its distance.
    pub fn set_parallax_target(&mut self, offset: PointerOffset) {
        self.goal.x = -offset.x * self.parallax_scale;
        self.goal.y = -offset.y * self.parallax_scale;
    }

    /// Move a fixed fraction of the remaining distance toward the goal.
    ///
    /// Called once per animation step. The step size is a constant fraction,
    /// so the camera converges exponentially and never overshoots.
    pub fn ease_step(&mut self) {
        self.position.x += (self.goal.x - self.position.x) * self.ease_factor;
        self.position.y += (self.goal.y - self.position.y) * self.ease_factor;
    }

    /// Update the projection aspect ratio from a window size in pixels.
    ///
    /// A zero-sized window leaves the previous aspect in place.
    pub fn set_aspect(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    /// Compute the view matrix. The camera always looks at the origin.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, Vec3::ZERO, Vec3::Y)
    }

    /// Compute the projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_degrees.to_radians(), self.aspect, self.near, self.far)
    }

    /// Compute the combined view-projection matrix.
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Compute the forward direction vector (toward the origin).
    pub fn forward(&self) -> Vec3 {
        (Vec3::ZERO - self.position).normalize()
    }

    /// Compute the right direction vector.
    pub fn right(&self) -> Vec3 {
        self.forward().cross(Vec3::Y).normalize()
    }

    /// Compute the camera's actual up vector (may differ from world up).
    pub fn camera_up(&self) -> Vec3 {
        self.right().cross(self.forward())
    }
}

// ============================================================================
// Tests
// ============================================================================
