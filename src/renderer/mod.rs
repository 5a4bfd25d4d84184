//! Rendering module
//!
//! The scene is drawn through the [`Surface`] trait so the draw order can be
//! recorded and checked off-browser. The web build implements it over a
//! Canvas 2D context.

pub mod draw_list;
pub mod frame;

pub use draw_list::{DrawCmd, DrawList};
pub use frame::{render_frames, render_scene};

use glam::Vec2;

/// CSS `hsla()` colour
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsla {
    /// Degrees
    pub h: f32,
    /// Percent
    pub s: f32,
    /// Percent
    pub l: f32,
    pub a: f32,
}

impl Hsla {
    pub fn new(h: f32, s: f32, l: f32, a: f32) -> Self {
        Self { h, s, l, a }
    }

    /// Same colour at a different opacity
    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// CSS colour string
    pub fn css(&self) -> String {
        format!("hsla({}, {}%, {}%, {})", self.h, self.s, self.l, self.a)
    }
}

/// A 2D drawing target
pub trait Surface {
    /// Fade everything already drawn toward transparent by `alpha`
    fn fade(&mut self, alpha: f32);

    /// Stroke a circle outline
    fn stroke_ring(&mut self, center: Vec2, radius: f32, width: f32, color: Hsla);

    /// Stroke a straight segment
    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Hsla);

    /// Fill a disc; `opacity` multiplies the colour's own alpha
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Hsla, opacity: f32);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_css_string() {
        let c = Hsla::new(210.0, 80.0, 60.0, 0.8);
        assert_eq!(c.css(), "hsla(210, 80%, 60%, 0.8)");
    }

    #[test]
    fn test_with_alpha() {
        let c = Hsla::new(10.0, 80.0, 60.0, 0.8).with_alpha(0.25);
        assert_eq!(c.a, 0.25);
        assert_eq!(c.h, 10.0);
    }
}
