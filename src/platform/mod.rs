//! Browser platform layer
//!
//! Creates the full-viewport overlay canvas and draws onto it through the
//! Canvas 2D API.

use glam::Vec2;
use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, Window};

use crate::renderer::{Hsla, Surface};
use crate::tuning::Tuning;

/// Element that may carry a JSON tuning override
pub const TUNING_ELEMENT_ID: &str = "impulse-flow-tuning";

#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("no global window")]
    NoWindow,
    #[error("window has no document")]
    NoDocument,
    #[error("document has no body")]
    NoBody,
    #[error("2d canvas context unavailable")]
    NoContext,
    #[error("javascript error: {0}")]
    Js(String),
}

impl From<JsValue> for PlatformError {
    fn from(value: JsValue) -> Self {
        PlatformError::Js(format!("{value:?}"))
    }
}

pub fn window() -> Result<Window, PlatformError> {
    web_sys::window().ok_or(PlatformError::NoWindow)
}

pub fn document() -> Result<Document, PlatformError> {
    window()?.document().ok_or(PlatformError::NoDocument)
}

/// Current viewport size in CSS pixels
pub fn viewport_size(window: &Window) -> Result<Vec2, PlatformError> {
    let w = window.inner_width()?.as_f64().unwrap_or(0.0);
    let h = window.inner_height()?.as_f64().unwrap_or(0.0);
    Ok(Vec2::new(w as f32, h as f32))
}

/// Read the optional tuning override from the page.
///
/// A missing element means defaults; a broken one is logged and ignored.
pub fn load_tuning(document: &Document) -> Tuning {
    let Some(json) = document
        .get_element_by_id(TUNING_ELEMENT_ID)
        .and_then(|el| el.text_content())
    else {
        return Tuning::default();
    };

    match Tuning::from_json(&json) {
        Ok(tuning) => {
            log::info!("Loaded tuning override");
            tuning
        }
        Err(e) => {
            log::warn!("Ignoring tuning override: {e}");
            Tuning::default()
        }
    }
}

/// Fixed, full-viewport canvas that sits behind page content and never
/// receives pointer events
pub struct Overlay {
    pub canvas: HtmlCanvasElement,
    pub ctx: CanvasRenderingContext2d,
}

impl Overlay {
    /// Create the canvas and append it to `<body>`
    pub fn attach(document: &Document) -> Result<Self, PlatformError> {
        let canvas: HtmlCanvasElement = document
            .create_element("canvas")?
            .dyn_into()
            .map_err(|_| PlatformError::Js("created element is not a canvas".into()))?;

        let style = canvas.style();
        style.set_property("position", "fixed")?;
        style.set_property("top", "0")?;
        style.set_property("left", "0")?;
        style.set_property("width", "100%")?;
        style.set_property("height", "100%")?;
        style.set_property("z-index", "-1")?;
        style.set_property("pointer-events", "none")?;

        document
            .body()
            .ok_or(PlatformError::NoBody)?
            .append_child(&canvas)?;

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or(PlatformError::NoContext)?
            .dyn_into()
            .map_err(|_| PlatformError::NoContext)?;

        Ok(Self { canvas, ctx })
    }

    /// Match the backing store to the viewport
    pub fn resize(&self, size: Vec2) {
        self.canvas.set_width(size.x as u32);
        self.canvas.set_height(size.y as u32);
    }

    fn circle_path(&self, center: Vec2, radius: f32) {
        self.ctx.begin_path();
        if let Err(e) = self.ctx.arc(
            center.x as f64,
            center.y as f64,
            radius.max(0.0) as f64,
            0.0,
            std::f64::consts::TAU,
        ) {
            log::warn!("arc failed: {e:?}");
        }
    }

    fn set_composite(&self, op: &str) {
        if let Err(e) = self.ctx.set_global_composite_operation(op) {
            log::warn!("composite operation {op} rejected: {e:?}");
        }
    }
}

impl Surface for Overlay {
    fn fade(&mut self, alpha: f32) {
        let w = self.canvas.width() as f64;
        let h = self.canvas.height() as f64;
        self.set_composite("destination-out");
        self.ctx
            .set_fill_style_str(&Hsla::new(0.0, 0.0, 100.0, alpha).css());
        self.ctx.fill_rect(0.0, 0.0, w, h);
        self.set_composite("source-over");
    }

    fn stroke_ring(&mut self, center: Vec2, radius: f32, width: f32, color: Hsla) {
        self.circle_path(center, radius);
        self.ctx.set_stroke_style_str(&color.css());
        self.ctx.set_line_width(width as f64);
        self.ctx.stroke();
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Hsla) {
        self.ctx.begin_path();
        self.ctx.move_to(from.x as f64, from.y as f64);
        self.ctx.line_to(to.x as f64, to.y as f64);
        self.ctx.set_stroke_style_str(&color.css());
        self.ctx.set_line_width(width as f64);
        self.ctx.stroke();
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Hsla, opacity: f32) {
        self.ctx.set_global_alpha(opacity as f64);
        self.circle_path(center, radius);
        self.ctx.set_fill_style_str(&color.css());
        self.ctx.fill();
        self.ctx.set_global_alpha(1.0);
    }
}
