//! The backdrop controller.
//!
//! Owns the particle field, the parallax camera, and the last-seen pointer
//! offset, and advances them in lockstep. The controller holds no GPU state;
//! the renderer reads matrices and particle data from it each frame.
//!
//! Teardown is explicit and idempotent: once torn down, every input and step
//! is ignored, so a late animation callback or stray pointer event after
//! shutdown cannot mutate state or schedule more work.

use crate::camera::ParallaxCamera;
use crate::config::BackdropConfig;
use crate::field::ParticleField;
use crate::pointer::PointerOffset;

/// Animation state for the particle backdrop.
#[derive(Clone, Debug)]
pub struct Backdrop {
    config: BackdropConfig,
    field: ParticleField,
    camera: ParallaxCamera,
    pointer: PointerOffset,
    width: u32,
    height: u32,
    steps: u64,
    torn_down: bool,
}

impl Backdrop {
    /// Build a backdrop for a window of the given size in pixels.
    pub fn new(config: BackdropConfig, width: u32, height: u32) -> Self {
        Self {
            field: ParticleField::new(&config),
            camera: ParallaxCamera::new(&config, width, height),
            pointer: PointerOffset::CENTERED,
            config,
            width,
            height,
            steps: 0,
            torn_down: false,
        }
    }

    pub fn config(&self) -> &BackdropConfig {
        &self.config
    }

    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    pub fn camera(&self) -> &ParallaxCamera {
        &self.camera
    }

    /// The most recent normalized pointer offset.
    pub fn pointer_offset(&self) -> PointerOffset {
        self.pointer
    }

    /// Number of animation steps taken so far.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Window size in pixels as last reported to [`Backdrop::on_resize`].
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// Record a pointer position in pixels and retarget the camera.
    ///
    /// Positions are normalized against the current window size. Every event
    /// overwrites the previous offset; there is no smoothing here, the easing
    /// happens in the camera.
    pub fn on_pointer_move(&mut self, cursor_x: f32, cursor_y: f32) {
        if self.torn_down {
            return;
        }
        self.pointer = PointerOffset::from_cursor(cursor_x, cursor_y, self.width, self.height);
        self.camera.set_parallax_target(self.pointer);
    }

    /// Record a new window size.
    ///
    /// A zero dimension (minimized window) is ignored and the previous size
    /// kept, so pointer normalization and the projection stay well-defined.
    pub fn on_resize(&mut self, width: u32, height: u32) {
        if self.torn_down || width == 0 || height == 0 {
            return;
        }
        self.width = width;
        self.height = height;
        self.camera.set_aspect(width, height);
    }

    /// Advance the animation by one step.
    ///
    /// Rotates the field by its fixed deltas and eases the camera toward its
    /// goal. Returns whether the step ran; after teardown it does nothing and
    /// returns false.
    pub fn step(&mut self) -> bool {
        if self.torn_down {
            return false;
        }
        self.field.step_rotation();
        self.camera.ease_step();
        self.steps += 1;
        true
    }

    /// Stop the backdrop permanently.
    ///
    /// Idempotent. All later calls to [`Backdrop::step`],
    /// [`Backdrop::on_pointer_move`] and [`Backdrop::on_resize`] are ignored.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.torn_down = true;
        log::debug!("backdrop torn down after {} steps", self.steps);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_backdrop() -> Backdrop {
        Backdrop::new(BackdropConfig::default(), 1000, 800)
    }

    #[test]
    fn test_initial_state() {
        let backdrop = test_backdrop();
        assert_eq!(backdrop.steps(), 0);
        assert!(!backdrop.is_torn_down());
        assert_eq!(backdrop.pointer_offset(), PointerOffset::CENTERED);
        assert_eq!(backdrop.size(), (1000, 800));
        assert_eq!(backdrop.field().len(), 700);
    }

    #[test]
    fn test_pointer_move_retargets_camera() {
        let mut backdrop = test_backdrop();
        backdrop.on_pointer_move(100.0, 50.0);

        let offset = backdrop.pointer_offset();
        assert!((offset.x - -0.4).abs() < 0.001);
        assert!((offset.y - -0.4375).abs() < 0.001);
        assert!((backdrop.camera().goal().x - 4.0).abs() < 0.001);
        assert!((backdrop.camera().goal().y - 4.375).abs() < 0.001);
    }

    #[test]
    fn test_last_pointer_event_wins() {
        let mut backdrop = test_backdrop();
        backdrop.on_pointer_move(0.0, 0.0);
        backdrop.on_pointer_move(1000.0, 800.0);

        assert!((backdrop.pointer_offset().x - 0.5).abs() < 0.001);
        assert!((backdrop.camera().goal().x - -5.0).abs() < 0.001);
    }

    #[test]
    fn test_resize_changes_normalization() {
        let mut backdrop = test_backdrop();
        backdrop.on_resize(200, 100);
        backdrop.on_pointer_move(100.0, 50.0);

        // (100, 50) is now the centre
        assert!(backdrop.pointer_offset().x.abs() < 0.001);
        assert!(backdrop.pointer_offset().y.abs() < 0.001);
    }

    #[test]
    fn test_zero_resize_is_ignored() {
        let mut backdrop = test_backdrop();
        backdrop.on_resize(0, 600);
        backdrop.on_resize(800, 0);
        assert_eq!(backdrop.size(), (1000, 800));
    }

    #[test]
    fn test_step_advances_field_and_camera() {
        let mut backdrop = test_backdrop();
        backdrop.on_pointer_move(100.0, 50.0);

        assert!(backdrop.step());
        assert_eq!(backdrop.steps(), 1);
        assert!((backdrop.field().rotation_x() - 0.0005).abs() < 1e-6);
        assert!((backdrop.field().rotation_y() - 0.001).abs() < 1e-6);
        assert!((backdrop.camera().position().x - 0.2).abs() < 0.001);
        assert!((backdrop.camera().position().y - 0.21875).abs() < 0.001);
    }

    #[test]
    fn test_teardown_freezes_everything() {
        let mut backdrop = test_backdrop();
        backdrop.step();
        backdrop.teardown();
        assert!(backdrop.is_torn_down());

        let rotation = backdrop.field().rotation_x();
        let position = backdrop.camera().position();
        let offset = backdrop.pointer_offset();

        assert!(!backdrop.step());
        backdrop.on_pointer_move(900.0, 700.0);
        backdrop.on_resize(640, 480);

        assert_eq!(backdrop.steps(), 1);
        assert_eq!(backdrop.field().rotation_x(), rotation);
        assert_eq!(backdrop.camera().position(), position);
        assert_eq!(backdrop.pointer_offset(), offset);
        assert_eq!(backdrop.size(), (1000, 800));
    }

    #[test]
    fn test_teardown_is_idempotent() {
        let mut backdrop = test_backdrop();
        backdrop.teardown();
        backdrop.teardown();
        assert!(backdrop.is_torn_down());
        assert!(!backdrop.step());
    }
}
