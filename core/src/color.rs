use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::utils::lerp_u8;

// RGBA color with 8-bit channels.
// Equality and hashing are channel-wise; ordering is strict per channel:
// `a < b` only if all four channels of `a` are lower.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Color {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub alpha: u8,
}

// Picks the grey level of a color
pub type GrayscaleStrategy = fn(Color) -> u8;

impl Color {
    pub const BLACK: Color = Color::new(0, 0, 0, 255);
    pub const WHITE: Color = Color::new(255, 255, 255, 255);
    pub const RED: Color = Color::new(255, 0, 0, 255);
    pub const GREEN: Color = Color::new(0, 255, 0, 255);
    pub const BLUE: Color = Color::new(0, 0, 255, 255);
    pub const TRANSPARENT: Color = Color::new(0, 0, 0, 0);

    pub const fn new(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    // Fully opaque
    pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self::new(red, green, blue, 255)
    }

    // Channel-wise interpolation including alpha
    pub fn lerp(c0: Color, c1: Color, t: f32) -> Color {
        Color {
            red: lerp_u8(c0.red, c1.red, t),
            green: lerp_u8(c0.green, c1.green, t),
            blue: lerp_u8(c0.blue, c1.blue, t),
            alpha: lerp_u8(c0.alpha, c1.alpha, t),
        }
    }

    // Interpolates color channels only; the result is opaque
    pub fn lerp24(c0: Color, c1: Color, t: f32) -> Color {
        Color {
            alpha: 255,
            ..Self::lerp(c0, c1, t)
        }
    }

    // Opaque grey using the luminosity strategy
    pub fn grayscale(self) -> Color {
        self.grayscale_with(Self::luminosity)
    }

    pub fn grayscale_with(self, strategy: GrayscaleStrategy) -> Color {
        let v = strategy(self);
        Color::rgb(v, v, v)
    }

    pub fn lightness(c: Color) -> u8 {
        let max = c.red.max(c.green).max(c.blue) as u16;
        let min = c.red.min(c.green).min(c.blue) as u16;
        ((max + min) / 2) as u8
    }

    pub fn average(c: Color) -> u8 {
        ((c.red as u16 + c.green as u16 + c.blue as u16) / 3) as u8
    }

    pub fn luminosity(c: Color) -> u8 {
        (0.21 * c.red as f32 + 0.71 * c.green as f32 + 0.07 * c.blue as f32) as u8
    }
}

impl PartialOrd for Color {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        let a = [self.red, self.green, self.blue, self.alpha];
        let b = [other.red, other.green, other.blue, other.alpha];
        if a == b {
            Some(Ordering::Equal)
        } else if a.iter().zip(&b).all(|(x, y)| x < y) {
            Some(Ordering::Less)
        } else if a.iter().zip(&b).all(|(x, y)| x > y) {
            Some(Ordering::Greater)
        } else {
            None
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Color({},{},{},{})",
            self.red, self.green, self.blue, self.alpha
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering_is_strict_per_channel() {
        let low = Color::new(1, 1, 1, 1);
        let high = Color::new(2, 2, 2, 2);
        let mixed = Color::new(3, 0, 3, 3);
        assert!(low < high);
        assert!(high > low);
        assert!(!(mixed > low));
        assert!(!(mixed < low));
        assert_eq!(mixed.partial_cmp(&low), None);
        assert!(low <= low);
        assert!(!(Color::new(1, 2, 2, 2) < high));
    }

    #[test]
    fn equal_colors_hash_equally() {
        use std::collections::HashSet;
        let mut set = HashSet::new();
        set.insert(Color::rgb(10, 20, 30));
        assert!(set.contains(&Color::new(10, 20, 30, 255)));
    }

    #[test]
    fn lerp_blends_every_channel() {
        let c = Color::lerp(Color::BLACK, Color::new(200, 100, 50, 55), 0.5);
        assert_eq!(c, Color::new(100, 50, 25, 155));
        let c = Color::lerp24(Color::TRANSPARENT, Color::WHITE, 0.0);
        assert_eq!(c, Color::new(0, 0, 0, 255));
    }

    #[test]
    fn grayscale_strategies() {
        let c = Color::rgb(30, 60, 90);
        assert_eq!(Color::average(c), 60);
        assert_eq!(Color::lightness(c), 60);
        assert_eq!(c.grayscale_with(Color::average), Color::rgb(60, 60, 60));
        assert_eq!(Color::WHITE.grayscale().alpha, 255);
    }

    #[test]
    fn display_lists_channels() {
        assert_eq!(Color::RED.to_string(), "Color(255,0,0,255)");
    }
}
