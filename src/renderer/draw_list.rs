//! Recording surface
//!
//! Captures draw calls in order. Used by tests and by the headless native
//! build to count what a frame would draw.

use glam::Vec2;

use super::{Hsla, Surface};

/// One recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Fade {
        alpha: f32,
    },
    Ring {
        center: Vec2,
        radius: f32,
        width: f32,
        color: Hsla,
    },
    Line {
        from: Vec2,
        to: Vec2,
        width: f32,
        color: Hsla,
    },
    Circle {
        center: Vec2,
        radius: f32,
        color: Hsla,
        opacity: f32,
    },
}

#[derive(Debug, Clone, Default)]
pub struct DrawList {
    pub cmds: Vec<DrawCmd>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.cmds.clear();
    }

    pub fn rings(&self) -> impl Iterator<Item = &DrawCmd> {
        self.cmds.iter().filter(|c| matches!(c, DrawCmd::Ring { .. }))
    }

    pub fn lines(&self) -> impl Iterator<Item = &DrawCmd> {
        self.cmds.iter().filter(|c| matches!(c, DrawCmd::Line { .. }))
    }

    pub fn circles(&self) -> impl Iterator<Item = &DrawCmd> {
        self.cmds
            .iter()
            .filter(|c| matches!(c, DrawCmd::Circle { .. }))
    }
}

impl Surface for DrawList {
    fn fade(&mut self, alpha: f32) {
        self.cmds.push(DrawCmd::Fade { alpha });
    }

    fn stroke_ring(&mut self, center: Vec2, radius: f32, width: f32, color: Hsla) {
        self.cmds.push(DrawCmd::Ring {
            center,
            radius,
            width,
            color,
        });
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Hsla) {
        self.cmds.push(DrawCmd::Line {
            from,
            to,
            width,
            color,
        });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Hsla, opacity: f32) {
        self.cmds.push(DrawCmd::Circle {
            center,
            radius,
            color,
            opacity,
        });
    }
}
