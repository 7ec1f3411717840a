//! Colour channels of AC3D materials

use std::fmt;

/// Floating point RGB triple, nominally in `0.0..=1.0`.
///
/// Values outside the nominal range are kept as read; the format does not
/// clamp them and neither does the codec.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Rgb {
    /// Create a new colour
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Rgb { r, g, b }
    }

    /// Same value on every channel
    pub const fn gray(v: f64) -> Self {
        Rgb { r: v, g: v, b: v }
    }

    pub const BLACK: Rgb = Rgb::gray(0.0);
    pub const WHITE: Rgb = Rgb::gray(1.0);

    /// Channels as an array, in file order
    pub fn to_array(&self) -> [f64; 3] {
        [self.r, self.g, self.b]
    }

    /// Average of the three channels
    pub fn mean(&self) -> f64 {
        (self.r + self.g + self.b) / 3.0
    }

    /// True when no channel is NaN or infinite
    pub fn is_finite(&self) -> bool {
        self.r.is_finite() && self.g.is_finite() && self.b.is_finite()
    }
}

impl Default for Rgb {
    fn default() -> Self {
        Rgb::BLACK
    }
}

impl From<[f64; 3]> for Rgb {
    fn from(v: [f64; 3]) -> Self {
        Rgb::new(v[0], v[1], v[2])
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.r, self.g, self.b)
    }
}
