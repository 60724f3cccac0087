//! Hex color helpers
//!
//! Colors are packed `0xRRGGBB` values. The render pass never uses real alpha
//! blending: fades and the day/night sky are produced by blending toward
//! another color instead.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A packed 24-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color(pub u32);

impl Color {
    pub const BLACK: Color = Color(0x000000);
    pub const WHITE: Color = Color(0xffffff);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color(((r as u32) << 16) | ((g as u32) << 8) | b as u32)
    }

    #[inline]
    pub fn r(self) -> u8 {
        (self.0 >> 16) as u8
    }

    #[inline]
    pub fn g(self) -> u8 {
        (self.0 >> 8) as u8
    }

    #[inline]
    pub fn b(self) -> u8 {
        self.0 as u8
    }

    /// Parse `#rrggbb` or `rrggbb`
    pub fn from_hex(s: &str) -> Option<Self> {
        let digits = s.strip_prefix('#').unwrap_or(s);
        if digits.len() != 6 {
            return None;
        }
        u32::from_str_radix(digits, 16).ok().map(Color)
    }

    /// `#rrggbb`, lowercase
    pub fn to_hex(self) -> String {
        self.to_string()
    }

    /// Linear blend from `self` (t = 0) to `other` (t = 1), t clamped
    pub fn blend(self, other: Color, t: f32) -> Color {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let lerp = |a: u8, b: u8| -> u8 {
            let v = a as f32 + (b as f32 - a as f32) * t;
            v.round().clamp(0.0, 255.0) as u8
        };
        Color::rgb(
            lerp(self.r(), other.r()),
            lerp(self.g(), other.g()),
            lerp(self.b(), other.b()),
        )
    }

    /// Even mix of two colors
    pub fn mix(self, other: Color) -> Color {
        self.blend(other, 0.5)
    }

    /// Channel-wise inverse (used by high-contrast mode)
    pub fn invert(self) -> Color {
        Color(!self.0 & 0xffffff)
    }

    /// Relative brightness in [0, 1], Rec. 601 weights
    pub fn luma(self) -> f32 {
        (0.299 * self.r() as f32 + 0.587 * self.g() as f32 + 0.114 * self.b() as f32) / 255.0
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06x}", self.0 & 0xffffff)
    }
}

/// Blend two hex strings; `None` if either fails to parse
pub fn blend_hex(from: &str, to: &str, t: f32) -> Option<String> {
    Some(Color::from_hex(from)?.blend(Color::from_hex(to)?, t).to_hex())
}

/// Invert a hex string; `None` if it fails to parse
pub fn invert_hex(hex: &str) -> Option<String> {
    Color::from_hex(hex).map(|c| c.invert().to_hex())
}

/// Scene palette
pub mod palette {
    use super::Color;

    pub const SKY_DAY: Color = Color(0x87ceeb);
    pub const SKY_NIGHT: Color = Color(0x0b1030);
    pub const GROUND: Color = Color(0xc2a878);
    pub const GROUND_LINE: Color = Color(0x5a4a32);
    pub const PEBBLE: Color = Color(0x8b7650);
    pub const CLOUD: Color = Color(0xf5f7fa);
    pub const STAR: Color = Color(0xfff8dc);
    pub const PLAYER: Color = Color(0x3c3c3c);
    pub const PLAYER_EYE: Color = Color(0xffffff);
    pub const SHIELD: Color = Color(0x4fc3f7);
    pub const CACTUS: Color = Color(0x2e7d32);
    pub const BIRD: Color = Color(0x6d4c41);
    pub const COIN: Color = Color(0xffd54f);
    pub const COIN_EDGE: Color = Color(0xb8860b);
    pub const SLOWMO: Color = Color(0xba68c8);
    pub const DUST: Color = Color(0xa08c64);
    pub const SPARK: Color = Color(0xffeb3b);
    pub const TEXT: Color = Color(0x202020);
    pub const TEXT_LIGHT: Color = Color(0xe6e6e6);
    pub const OVERLAY: Color = Color(0x000000);
    pub const FAULT: Color = Color(0xff5c5c);
    pub const DEBUG: Color = Color(0xff00ff);

    // Grid snake
    pub const BOARD: Color = Color(0x1e1e1e);
    pub const BOARD_LINE: Color = Color(0x2a2a2a);
    pub const SNAKE: Color = Color(0x8aff80);
    pub const SNAKE_HEAD: Color = Color(0x00ff66);
    pub const FOOD: Color = Color(0xff5c5c);
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_hex_parse_and_format() {
        assert_eq!(Color::from_hex("#87ceeb"), Some(Color(0x87ceeb)));
        assert_eq!(Color::from_hex("87CEEB"), Some(Color(0x87ceeb)));
        assert_eq!(Color::from_hex("#fff"), None);
        assert_eq!(Color::from_hex("#zzzzzz"), None);
        assert_eq!(Color(0x0b1030).to_hex(), "#0b1030");
    }

    #[test]
    fn test_blend_endpoints_and_midpoint() {
        let a = Color::BLACK;
        let b = Color::WHITE;
        assert_eq!(a.blend(b, 0.0), a);
        assert_eq!(a.blend(b, 1.0), b);
        assert_eq!(a.mix(b), Color::rgb(128, 128, 128));
        // Out of range t is clamped
        assert_eq!(a.blend(b, 3.0), b);
        assert_eq!(a.blend(b, f32::NAN), a);
    }

    #[test]
    fn test_invert() {
        assert_eq!(Color(0x87ceeb).invert(), Color(0x783114));
        assert_eq!(invert_hex("#000000").as_deref(), Some("#ffffff"));
        assert_eq!(blend_hex("#000000", "#ffffff", 1.0).as_deref(), Some("#ffffff"));
        assert_eq!(blend_hex("nope", "#ffffff", 0.5), None);
    }

    proptest! {
        #[test]
        fn prop_invert_is_involution(c in 0u32..=0xffffff) {
            prop_assert_eq!(Color(c).invert().invert(), Color(c));
        }

        #[test]
        fn prop_blend_stays_between_channels(a in 0u32..=0xffffff, b in 0u32..=0xffffff, t in 0.0f32..=1.0) {
            let (a, b) = (Color(a), Color(b));
            let m = a.blend(b, t);
            prop_assert!(m.r() >= a.r().min(b.r()) && m.r() <= a.r().max(b.r()));
            prop_assert!(m.g() >= a.g().min(b.g()) && m.g() <= a.g().max(b.g()));
            prop_assert!(m.b() >= a.b().min(b.b()) && m.b() <= a.b().max(b.b()));
        }

        #[test]
        fn prop_hex_round_trip(c in 0u32..=0xffffff) {
            prop_assert_eq!(Color::from_hex(&Color(c).to_hex()), Some(Color(c)));
        }
    }
}
