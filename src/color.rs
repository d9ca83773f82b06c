// Simple color struct with a fractional alpha, formatted as a CSS rgba() string
// when handed to the canvas

use std::fmt;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Color {
    pub const WHITE: Color = Color { r: 255, g: 255, b: 255, a: 1.0 };
    pub const EMERALD: Color = Color { r: 16, g: 185, b: 129, a: 0.5 };
    pub const CYAN: Color = Color { r: 34, g: 211, b: 238, a: 0.5 };

    pub fn with_alpha(self, a: f64) -> Color {
        Color { a, ..self }
    }

    pub fn to_css(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}
