//! Drawing surface contract

use super::color::Rgb;

/// Point in surface coordinates (y grows downwards)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Point at `angle` radians and distance `radius` from `self`
    pub fn polar(&self, radius: f64, angle: f64) -> Self {
        Self::new(self.x + radius * angle.cos(), self.y + radius * angle.sin())
    }
}

/// Measured size of a text run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextExtents {
    pub width: f64,
    pub height: f64,
}

/// 2D drawing context the progress ring is painted on.
///
/// Paths follow the usual current-point model: `arc` connects to the
/// current point with a straight line if there is one, `fill`/`stroke`
/// consume the path. Angles are in radians, increasing clockwise on screen.
pub trait DrawingSurface {
    fn set_source_rgb(&mut self, color: Rgb);
    fn set_line_width(&mut self, width: f64);
    fn move_to(&mut self, point: Point);
    fn line_to(&mut self, point: Point);
    fn arc(&mut self, center: Point, radius: f64, start_angle: f64, end_angle: f64);
    fn close_path(&mut self);
    fn fill(&mut self);
    fn stroke(&mut self);
    fn set_font_size(&mut self, size: f64);
    fn text_extents(&self, text: &str) -> TextExtents;
    /// Draw `text` with its baseline starting at the current point
    fn show_text(&mut self, text: &str);
}

/// One primitive call recorded by `RecordingSurface`
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceOp {
    SetSourceRgb(Rgb),
    SetLineWidth(f64),
    MoveTo(Point),
    LineTo(Point),
    Arc {
        center: Point,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
    },
    ClosePath,
    Fill,
    Stroke,
    SetFontSize(f64),
    ShowText(String),
}

/// Surface that records every primitive call.
///
/// Text is measured as if every glyph were `0.6 em` wide and `0.7 em` tall.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    ops: Vec<SurfaceOp>,
    font_size: f64,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ops(&self) -> &[SurfaceOp] {
        &self.ops
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }
}

impl DrawingSurface for RecordingSurface {
    fn set_source_rgb(&mut self, color: Rgb) {
        self.ops.push(SurfaceOp::SetSourceRgb(color));
    }

    fn set_line_width(&mut self, width: f64) {
        self.ops.push(SurfaceOp::SetLineWidth(width));
    }

    fn move_to(&mut self, point: Point) {
        self.ops.push(SurfaceOp::MoveTo(point));
    }

    fn line_to(&mut self, point: Point) {
        self.ops.push(SurfaceOp::LineTo(point));
    }

    fn arc(&mut self, center: Point, radius: f64, start_angle: f64, end_angle: f64) {
        self.ops.push(SurfaceOp::Arc {
            center,
            radius,
            start_angle,
            end_angle,
        });
    }

    fn close_path(&mut self) {
        self.ops.push(SurfaceOp::ClosePath);
    }

    fn fill(&mut self) {
        self.ops.push(SurfaceOp::Fill);
    }

    fn stroke(&mut self) {
        self.ops.push(SurfaceOp::Stroke);
    }

    fn set_font_size(&mut self, size: f64) {
        self.font_size = size;
        self.ops.push(SurfaceOp::SetFontSize(size));
    }

    fn text_extents(&self, text: &str) -> TextExtents {
        approximate_extents(text, self.font_size)
    }

    fn show_text(&mut self, text: &str) {
        self.ops.push(SurfaceOp::ShowText(text.to_string()));
    }
}

/// Rough text metrics for surfaces without a font engine
pub(crate) fn approximate_extents(text: &str, font_size: f64) -> TextExtents {
    TextExtents {
        width: text.chars().count() as f64 * font_size * 0.6,
        height: font_size * 0.7,
    }
}
