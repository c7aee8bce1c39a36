//! Progress ring rendering
//! 
//! The ring is described as a list of draw commands that can be replayed on
//! any surface implementing `DrawingSurface`.

pub mod color;
pub mod ring;
pub mod surface;
pub mod svg;

// Re-export main types
pub use color::Rgb;
pub use ring::{paint, render, DrawCommand, Frame};
pub use surface::{DrawingSurface, Point, RecordingSurface, SurfaceOp, TextExtents};
pub use svg::SvgSurface;

/// Format a number of seconds as `M:SS`
pub fn format_clock(seconds: u64) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::format_clock;

    #[test]
    fn clock_label_pads_seconds_only() {
        assert_eq!(format_clock(300), "5:00");
        assert_eq!(format_clock(150), "2:30");
        assert_eq!(format_clock(9), "0:09");
        assert_eq!(format_clock(0), "0:00");
        assert_eq!(format_clock(3600), "60:00");
    }
}
