//! Pointer position normalized against the window size.
//!
//! The backdrop reacts to the cursor through a single value: its offset from
//! the window centre, with each axis in [-0.5, 0.5]. Only the most recent
//! position matters; updates simply overwrite the previous offset.

/// Cursor offset from the window centre, each axis in [-0.5, 0.5].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerOffset {
    pub x: f32,
    pub y: f32,
}

impl PointerOffset {
    /// The neutral offset: cursor at the exact centre of the window.
    pub const CENTERED: Self = Self { x: 0.0, y: 0.0 };

    /// Normalize a cursor position in pixels against the window size.
    ///
    /// (0, 0) is the top-left corner and maps to (-0.5, -0.5); the bottom-right
    /// corner maps to (0.5, 0.5). A zero-sized window yields the neutral
    /// offset.
    pub fn from_cursor(cursor_x: f32, cursor_y: f32, width: u32, height: u32) -> Self {
        if width == 0 || height == 0 {
            return Self::CENTERED;
        }
        Self {
            x: cursor_x / width as f32 - 0.5,
            y: cursor_y / height as f32 - 0.5,
        }
    }
}

impl Default for PointerOffset {
    fn default() -> Self {
        Self::CENTERED
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_top_left_corner() {
        let offset = PointerOffset::from_cursor(0.0, 0.0, 1920, 1080);
        assert!((offset.x - -0.5).abs() < 0.001);
        assert!((offset.y - -0.5).abs() < 0.001);
    }

    #[test]
    fn test_bottom_right_corner() {
        let offset = PointerOffset::from_cursor(1920.0, 1080.0, 1920, 1080);
        assert!((offset.x - 0.5).abs() < 0.001);
        assert!((offset.y - 0.5).abs() < 0.001);
    }

    #[test]
    fn test_centre() {
        let offset = PointerOffset::from_cursor(960.0, 540.0, 1920, 1080);
        assert!(offset.x.abs() < 0.001);
        assert!(offset.y.abs() < 0.001);
    }

    #[test]
    fn test_upper_left_position() {
        let offset = PointerOffset::from_cursor(100.0, 50.0, 1000, 800);
        assert!((offset.x - -0.4).abs() < 0.001);
        assert!((offset.y - -0.4375).abs() < 0.001);
    }

    #[test]
    fn test_zero_sized_window_is_neutral() {
        assert_eq!(
            PointerOffset::from_cursor(100.0, 50.0, 0, 600),
            PointerOffset::CENTERED
        );
        assert_eq!(
            PointerOffset::from_cursor(100.0, 50.0, 800, 0),
            PointerOffset::CENTERED
        );
    }
}
