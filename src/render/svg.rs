//! SVG output for the progress ring

use std::f64::consts::{PI, TAU};
use std::fmt::Write;

use super::{
    color::Rgb,
    surface::{approximate_extents, DrawingSurface, Point, TextExtents},
};

/// Surface that writes an SVG document.
///
/// Arcs are emitted as SVG elliptical arc segments of at most half a turn.
#[derive(Debug)]
pub struct SvgSurface {
    width: f64,
    height: f64,
    body: String,
    path: String,
    color: Rgb,
    line_width: f64,
    font_size: f64,
    current: Option<Point>,
    subpath_start: Option<Point>,
}

impl SvgSurface {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            body: String::new(),
            path: String::new(),
            color: Rgb::new(0.0, 0.0, 0.0),
            line_width: 1.0,
            font_size: 10.0,
            current: None,
            subpath_start: None,
        }
    }

    /// Finish the document
    pub fn finish(self) -> String {
        format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">{body}</svg>"#,
            w = fmt_num(self.width),
            h = fmt_num(self.height),
            body = self.body,
        )
    }

    fn push_point(&mut self, cmd: char, p: Point) {
        let _ = write!(self.path, "{}{} {} ", cmd, fmt_num(p.x), fmt_num(p.y));
    }

    fn take_path(&mut self) -> String {
        self.current = None;
        self.subpath_start = None;
        std::mem::take(&mut self.path).trim_end().to_string()
    }
}

impl DrawingSurface for SvgSurface {
    fn set_source_rgb(&mut self, color: Rgb) {
        self.color = color;
    }

    fn set_line_width(&mut self, width: f64) {
        self.line_width = width;
    }

    fn move_to(&mut self, point: Point) {
        self.push_point('M', point);
        self.current = Some(point);
        self.subpath_start = Some(point);
    }

    fn line_to(&mut self, point: Point) {
        if self.current.is_none() {
            self.move_to(point);
            return;
        }
        self.push_point('L', point);
        self.current = Some(point);
    }

    fn arc(&mut self, center: Point, radius: f64, start_angle: f64, end_angle: f64) {
        let mut end_angle = end_angle;
        while end_angle < start_angle {
            end_angle += TAU;
        }

        let start = center.polar(radius, start_angle);
        self.line_to(start);

        let sweep = end_angle - start_angle;
        if sweep <= 0.0 {
            return;
        }
        let segments = (sweep / PI).ceil().max(1.0) as usize;
        for i in 1..=segments {
            let angle = start_angle + sweep * i as f64 / segments as f64;
            let p = center.polar(radius, angle);
            let r = fmt_num(radius);
            let _ = write!(self.path, "A{r} {r} 0 0 1 {} {} ", fmt_num(p.x), fmt_num(p.y));
            self.current = Some(p);
        }
    }

    fn close_path(&mut self) {
        self.path.push_str("Z ");
        self.current = self.subpath_start;
    }

    fn fill(&mut self) {
        let d = self.take_path();
        if d.is_empty() {
            return;
        }
        let _ = write!(self.body, r#"<path d="{}" fill="{}"/>"#, d, self.color.to_css());
    }

    fn stroke(&mut self) {
        let d = self.take_path();
        if d.is_empty() {
            return;
        }
        let _ = write!(
            self.body,
            r#"<path d="{}" fill="none" stroke="{}" stroke-width="{}"/>"#,
            d,
            self.color.to_css(),
            fmt_num(self.line_width),
        );
    }

    fn set_font_size(&mut self, size: f64) {
        self.font_size = size;
    }

    fn text_extents(&self, text: &str) -> TextExtents {
        approximate_extents(text, self.font_size)
    }

    fn show_text(&mut self, text: &str) {
        let at = self.current.unwrap_or(Point::new(0.0, 0.0));
        let _ = write!(
            self.body,
            r#"<text x="{}" y="{}" font-family="sans-serif" font-weight="bold" font-size="{}" fill="{}">{}</text>"#,
            fmt_num(at.x),
            fmt_num(at.y),
            fmt_num(self.font_size),
            self.color.to_css(),
            escape_xml(text),
        );
    }
}

fn fmt_num(n: f64) -> String {
    let s = format!("{:.2}", n);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}

fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
