//! Normalized color value and the string boundary around it.
//!
//! Everything inside the crate works with [`Rgb`]. Strings only appear where a
//! collaborator hands one over (options, `<input type="color">`, Canvas 2D
//! style properties), and are converted at that point.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::error::{GraphPaperError, Result};

/// Opaque RGB color with u8 components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Self = Self::new(255, 255, 255);
    pub const BLACK: Self = Self::new(0, 0, 0);

    /// Create a new RGB color.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse from a hex string (with or without #).
    ///
    /// Accepts both the six digit and the three digit shorthand form.
    pub fn from_hex(s: &str) -> Option<Self> {
        let s = s.trim();
        let hex = s.strip_prefix('#').unwrap_or(s);
        // from_str_radix would also take a leading sign
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        match hex.len() {
            6 => {
                let r = u8::from_str_radix(hex.get(0..2)?, 16).ok()?;
                let g = u8::from_str_radix(hex.get(2..4)?, 16).ok()?;
                let b = u8::from_str_radix(hex.get(4..6)?, 16).ok()?;
                Some(Self { r, g, b })
            }
            3 => {
                let r = u8::from_str_radix(hex.get(0..1)?, 16).ok()?;
                let g = u8::from_str_radix(hex.get(1..2)?, 16).ok()?;
                let b = u8::from_str_radix(hex.get(2..3)?, 16).ok()?;
                Some(Self {
                    r: r * 17,
                    g: g * 17,
                    b: b * 17,
                })
            }
            _ => None,
        }
    }

    /// Parse any color string a picker or an options object may carry.
    ///
    /// Supports formats:
    /// - "#RRGGBB" / "RRGGBB"
    /// - "#RGB"
    /// - "rgb(r, g, b)"
    /// - "rgba(r, g, b, a)" (alpha is dropped, cells are opaque)
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        let lower = s.to_ascii_lowercase();
        if lower.starts_with("rgba(") {
            parse_rgba_string(&lower)
        } else if lower.starts_with("rgb(") {
            parse_rgb_string(&lower)
        } else {
            Self::from_hex(s)
        }
    }

    /// Convert to CSS hex string (#RRGGBB).
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Lowercase hex, the only format `<input type="color">` accepts as a value.
    pub fn to_input_value(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Convert to a CSS `rgb()` functional string.
    pub fn to_css_rgb(self) -> String {
        format!("rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

impl Default for Rgb {
    fn default() -> Self {
        Self::WHITE
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = GraphPaperError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s).ok_or_else(|| GraphPaperError::InvalidColor(s.to_string()))
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

/// A decimal 0-255 channel. Signs are rejected.
fn channel(s: &str) -> Option<u8> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

fn parse_rgb_string(s: &str) -> Option<Rgb> {
    let inner = s.strip_prefix("rgb(")?.strip_suffix(')')?;
    let mut parts = inner.split(',').map(str::trim);
    let r = channel(parts.next()?)?;
    let g = channel(parts.next()?)?;
    let b = channel(parts.next()?)?;
    if parts.next().is_some() {
        return None;
    }
    Some(Rgb { r, g, b })
}

fn parse_rgba_string(s: &str) -> Option<Rgb> {
    let inner = s.strip_prefix("rgba(")?.strip_suffix(')')?;
    let mut parts = inner.split(',').map(str::trim);
    let r = channel(parts.next()?)?;
    let g = channel(parts.next()?)?;
    let b = channel(parts.next()?)?;
    let _alpha: f64 = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some(Rgb { r, g, b })
}

/// Default colors of a fresh sheet of graph paper.
pub mod palette {
    use super::Rgb;

    /// Paper (unpainted cell fill).
    pub const PAPER: Rgb = Rgb::WHITE;

    /// Draw color (light gray).
    pub const DRAW: Rgb = Rgb::new(200, 200, 200);

    /// Grid line color (gray).
    pub const GRID: Rgb = Rgb::new(190, 190, 190);
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("#FF8040" ; "hex upper")]
    #[test_case("#ff8040" ; "hex lower")]
    #[test_case("FF8040" ; "hex without hash")]
    #[test_case("  #ff8040  " ; "surrounding whitespace")]
    #[test_case("rgb(255, 128, 64)" ; "css rgb")]
    #[test_case("RGB(255,128,64)" ; "css rgb uppercase no spaces")]
    #[test_case("rgba(255, 128, 64, 0.5)" ; "css rgba drops alpha")]
    fn test_parse_equivalent_forms(input: &str) {
        assert_eq!(Rgb::parse(input), Some(Rgb::new(255, 128, 64)));
    }

    #[test]
    fn test_parse_shorthand_hex() {
        assert_eq!(Rgb::parse("#fa0"), Some(Rgb::new(255, 170, 0)));
    }

    #[test_case("" ; "empty")]
    #[test_case("#12345" ; "five digits")]
    #[test_case("#GGGGGG" ; "not hex")]
    #[test_case("rgb(256, 0, 0)" ; "channel overflow")]
    #[test_case("rgb(1, 2)" ; "missing channel")]
    #[test_case("rgb(1, 2, 3, 4)" ; "extra channel")]
    #[test_case("rgba(1, 2, 3)" ; "rgba without alpha")]
    #[test_case("lightgray" ; "named color")]
    #[test_case("#+f+f+f" ; "signed hex digits")]
    #[test_case("+fffff" ; "signed six digit hex")]
    #[test_case("#-12" ; "negative shorthand")]
    #[test_case("rgb(+1, 2, 3)" ; "signed channel")]
    #[test_case("rgb(1, , 3)" ; "empty channel")]
    fn test_parse_rejects(input: &str) {
        assert_eq!(Rgb::parse(input), None);
    }

    #[test]
    fn test_formats() {
        let c = Rgb::new(200, 10, 255);
        assert_eq!(c.to_hex(), "#C80AFF");
        assert_eq!(c.to_input_value(), "#c80aff");
        assert_eq!(c.to_css_rgb(), "rgb(200, 10, 255)");
        assert_eq!(c.to_string(), "#C80AFF");
    }

    #[test]
    fn test_hex_and_rgb_strings_compare_equal_once_parsed() {
        // The same color reaching us as a picker hex value and as a CSS
        // attribute string must be one value.
        let from_picker = Rgb::parse("#c8c8c8").unwrap();
        let from_attr = Rgb::parse("rgb(200, 200, 200)").unwrap();
        assert_eq!(from_picker, from_attr);
        assert_eq!(from_picker, palette::DRAW);
    }

    #[test]
    fn test_from_str_error() {
        let err = "nope".parse::<Rgb>().unwrap_err();
        assert!(matches!(err, GraphPaperError::InvalidColor(ref s) if s == "nope"));
    }

    #[test]
    fn test_serializes_as_hex() {
        let json = serde_json::to_string(&Rgb::new(1, 2, 3)).unwrap();
        assert_eq!(json, "\"#010203\"");
    }
}
