//! RGB colors for the progress ring

/// Solid color with channels in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Rgb {
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Blend towards `other`: `self * t + other * (1 - t)` per channel
    pub fn mix(&self, other: &Self, t: f64) -> Self {
        let t = t.clamp(0.0, 1.0);
        Self::new(
            self.r * t + other.r * (1.0 - t),
            self.g * t + other.g * (1.0 - t),
            self.b * t + other.b * (1.0 - t),
        )
    }

    /// CSS `rgb()` notation with 8-bit channels
    pub fn to_css(&self) -> String {
        let to_byte = |c: f64| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!("rgb({},{},{})", to_byte(self.r), to_byte(self.g), to_byte(self.b))
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn css_notation() {
        assert_eq!(Rgb::new(1.0, 0.0, 0.5).to_css(), "rgb(255,0,128)");
    }

    #[test]
    fn mix_halfway() {
        let mid = Rgb::new(1.0, 0.0, 0.0).mix(&Rgb::new(0.0, 0.0, 1.0), 0.5);
        assert!((mid.r - 0.5).abs() < 1e-9);
        assert!((mid.b - 0.5).abs() < 1e-9);
    }

    proptest! {
        #[test]
        fn prop_mix_endpoints(r in 0.0f64..1.0, g in 0.0f64..1.0, b in 0.0f64..1.0) {
            let a = Rgb::new(r, g, b);
            let other = Rgb::new(1.0 - r, 1.0 - g, 1.0 - b);
            let at_one = a.mix(&other, 1.0);
            let at_zero = a.mix(&other, 0.0);
            prop_assert!((at_one.r - a.r).abs() < 1e-9);
            prop_assert!((at_one.g - a.g).abs() < 1e-9);
            prop_assert!((at_one.b - a.b).abs() < 1e-9);
            prop_assert!((at_zero.r - other.r).abs() < 1e-9);
            prop_assert!((at_zero.g - other.g).abs() < 1e-9);
            prop_assert!((at_zero.b - other.b).abs() < 1e-9);
        }
    }
}
