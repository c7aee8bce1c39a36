//! Progress ring geometry and colors

use std::f64::consts::{FRAC_PI_2, TAU};

use super::{
    color::Rgb,
    format_clock,
    surface::{DrawingSurface, Point},
};

/// Backdrop color, shown for elapsed time
pub const DONE_COLOR: Rgb = Rgb::new(0.15, 0.65, 0.40);
/// Wedge color when the countdown is full
pub const ACTIVE_COLOR: Rgb = Rgb::new(0.75, 0.11, 0.18);
pub const BORDER_COLOR: Rgb = Rgb::new(0.5, 0.5, 0.5);
pub const LABEL_COLOR: Rgb = Rgb::new(1.0, 1.0, 1.0);
pub const BORDER_WIDTH: f64 = 3.0;

/// Space kept between the ring and the frame edge
const MARGIN: f64 = 20.0;
/// Below this radius nothing is drawn
const MIN_RADIUS: f64 = 10.0;
/// Fractions at or below this draw no wedge
const MIN_WEDGE_FRACTION: f64 = 0.001;
/// Label font size relative to the radius
const LABEL_SCALE: f64 = 0.4;
/// 12 o'clock
const TOP: f64 = -FRAC_PI_2;

/// Size of the area the ring is drawn into
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub width: f64,
    pub height: f64,
}

impl Frame {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }

    fn radius(&self) -> f64 {
        self.width.min(self.height) / 2.0 - MARGIN
    }
}

/// High level drawing instruction produced by `render`
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Filled disc
    Disc { center: Point, radius: f64, color: Rgb },
    /// Pie slice from `start_angle` sweeping clockwise by `sweep`
    Wedge {
        center: Point,
        radius: f64,
        start_angle: f64,
        sweep: f64,
        color: Rgb,
    },
    /// Circle outline
    Ring {
        center: Point,
        radius: f64,
        width: f64,
        color: Rgb,
    },
    /// Text centered on `center`
    Label {
        center: Point,
        text: String,
        font_size: f64,
        color: Rgb,
    },
}

impl DrawCommand {
    /// Replay this command with surface primitives
    pub fn paint<S: DrawingSurface + ?Sized>(&self, surface: &mut S) {
        match self {
            DrawCommand::Disc { center, radius, color } => {
                surface.set_source_rgb(*color);
                surface.arc(*center, *radius, 0.0, TAU);
                surface.fill();
            }
            DrawCommand::Wedge {
                center,
                radius,
                start_angle,
                sweep,
                color,
            } => {
                surface.set_source_rgb(*color);
                surface.move_to(*center);
                surface.arc(*center, *radius, *start_angle, start_angle + sweep);
                surface.close_path();
                surface.fill();
            }
            DrawCommand::Ring {
                center,
                radius,
                width,
                color,
            } => {
                surface.set_source_rgb(*color);
                surface.set_line_width(*width);
                surface.arc(*center, *radius, 0.0, TAU);
                surface.stroke();
            }
            DrawCommand::Label {
                center,
                text,
                font_size,
                color,
            } => {
                surface.set_source_rgb(*color);
                surface.set_font_size(*font_size);
                let extents = surface.text_extents(text);
                surface.move_to(Point::new(
                    center.x - extents.width / 2.0,
                    center.y + extents.height / 2.0,
                ));
                surface.show_text(text);
            }
        }
    }
}

/// Describe the progress ring for `fraction` of the countdown left.
///
/// Returns no commands when the frame is too small to hold a usable ring.
pub fn render(frame: Frame, fraction: f64, remaining_seconds: u64) -> Vec<DrawCommand> {
    let radius = frame.radius();
    if radius < MIN_RADIUS {
        return Vec::new();
    }

    let center = frame.center();
    let fraction = fraction.clamp(0.0, 1.0);
    let mut commands = Vec::with_capacity(4);

    commands.push(DrawCommand::Disc {
        center,
        radius,
        color: DONE_COLOR,
    });

    if fraction > MIN_WEDGE_FRACTION {
        commands.push(DrawCommand::Wedge {
            center,
            radius,
            start_angle: TOP,
            sweep: TAU * fraction,
            color: ACTIVE_COLOR.mix(&DONE_COLOR, fraction),
        });
    }

    commands.push(DrawCommand::Ring {
        center,
        radius,
        width: BORDER_WIDTH,
        color: BORDER_COLOR,
    });

    commands.push(DrawCommand::Label {
        center,
        text: format_clock(remaining_seconds),
        font_size: radius * LABEL_SCALE,
        color: LABEL_COLOR,
    });

    commands
}

/// Render and paint in one go
pub fn paint<S: DrawingSurface + ?Sized>(
    surface: &mut S,
    frame: Frame,
    fraction: f64,
    remaining_seconds: u64,
) {
    for command in render(frame, fraction, remaining_seconds) {
        command.paint(surface);
    }
}
