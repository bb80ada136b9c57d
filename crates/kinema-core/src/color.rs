use serde::{Deserialize, Serialize};
use std::fmt;

/// RGBA color with f32 components in the [0.0, 1.0] range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    /// Create a new RGBA color.
    pub fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque RGB color (alpha = 1.0).
    pub fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Parse a hex color string ("#3b82f6" or "#3b82f680").
    pub fn from_hex(hex: &str) -> Result<Self, ColorError> {
        let hex = hex.trim_start_matches('#');
        let byte = |range: std::ops::Range<usize>| {
            hex.get(range)
                .and_then(|s| u8::from_str_radix(s, 16).ok())
                .ok_or(ColorError::InvalidHex)
        };
        match hex.len() {
            6 => Ok(Self::rgb(
                byte(0..2)? as f32 / 255.0,
                byte(2..4)? as f32 / 255.0,
                byte(4..6)? as f32 / 255.0,
            )),
            8 => Ok(Self::rgba(
                byte(0..2)? as f32 / 255.0,
                byte(2..4)? as f32 / 255.0,
                byte(4..6)? as f32 / 255.0,
                byte(6..8)? as f32 / 255.0,
            )),
            _ => Err(ColorError::InvalidHex),
        }
    }

    /// Convert to packed RGBA bytes.
    pub fn to_rgba8(&self) -> [u8; 4] {
        [
            (self.r * 255.0).clamp(0.0, 255.0) as u8,
            (self.g * 255.0).clamp(0.0, 255.0) as u8,
            (self.b * 255.0).clamp(0.0, 255.0) as u8,
            (self.a * 255.0).clamp(0.0, 255.0) as u8,
        ]
    }

    /// Return the same color with a different alpha.
    pub fn with_alpha(&self, a: f32) -> Color {
        Color {
            a: a.clamp(0.0, 1.0),
            ..*self
        }
    }

    /// Multiply the alpha channel by a factor. Used when an animated opacity
    /// is stacked on top of the primitive's own fill alpha.
    pub fn scale_alpha(&self, factor: f32) -> Color {
        self.with_alpha(self.a * factor.clamp(0.0, 1.0))
    }

    /// Linearly interpolate between two colors.
    pub fn lerp(&self, other: &Color, t: f32) -> Color {
        let t = t.clamp(0.0, 1.0);
        Color {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
            a: self.a + (other.a - self.a) * t,
        }
    }

    pub const TRANSPARENT: Color = Color {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 0.0,
    };
    pub const BLACK: Color = Color {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 1.0,
    };
    pub const WHITE: Color = Color {
        r: 1.0,
        g: 1.0,
        b: 1.0,
        a: 1.0,
    };
}

impl Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b, a] = self.to_rgba8();
        if a == 255 {
            write!(f, "#{:02X}{:02X}{:02X}", r, g, b)
        } else {
            write!(f, "#{:02X}{:02X}{:02X}{:02X}", r, g, b, a)
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ColorError {
    #[error("invalid hex color string")]
    InvalidHex,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hex_rgb() {
        let c = Color::from_hex("#3b82f6").unwrap();
        assert_eq!(c.to_rgba8(), [0x3b, 0x82, 0xf6, 255]);
    }

    #[test]
    fn test_from_hex_rgba_and_no_hash() {
        let c = Color::from_hex("10b98180").unwrap();
        assert_eq!(c.to_rgba8(), [0x10, 0xb9, 0x81, 128]);
    }

    #[test]
    fn test_from_hex_invalid() {
        assert!(Color::from_hex("#zzz").is_err());
        assert!(Color::from_hex("#12345").is_err());
    }

    #[test]
    fn test_lerp_midpoint() {
        let mid = Color::BLACK.lerp(&Color::WHITE, 0.5);
        assert!((mid.r - 0.5).abs() < 0.01);
        assert!((mid.a - 1.0).abs() < 0.01);
    }

    #[test]
    fn test_scale_alpha_stacks() {
        let c = Color::WHITE.with_alpha(0.5).scale_alpha(0.5);
        assert!((c.a - 0.25).abs() < 0.001);
    }

    #[test]
    fn test_display_roundtrip() {
        let c = Color::from_hex("#F59E0B").unwrap();
        assert_eq!(format!("{}", c), "#F59E0B");
    }
}
