//! Palette colors and the small color math drafts use to vary them.
//!
//! Drafts reflect the palette without copying it verbatim, so each variant can
//! mix, lighten, or darken the four brand colors.
use anyhow::{anyhow, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_PRIMARY: Rgb = Rgb::new(0x1f, 0x3a, 0x5f);
pub const DEFAULT_SECONDARY: Rgb = Rgb::new(0x4a, 0x6f, 0xa5);
pub const DEFAULT_ACCENT: Rgb = Rgb::new(0xf2, 0xa5, 0x41);
pub const DEFAULT_BACKGROUND: Rgb = Rgb::new(0xf7, 0xf5, 0xf0);

/// A 24-bit sRGB color, rendered as lowercase `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(0xff, 0xff, 0xff);

    /// Linear blend toward `other`; `weight` 0.0 keeps `self`, 1.0 yields `other`.
    pub fn mix(self, other: Rgb, weight: f64) -> Rgb {
        let weight = weight.clamp(0.0, 1.0);
        let blend = |a: u8, b: u8| -> u8 {
            let value = f64::from(a) + (f64::from(b) - f64::from(a)) * weight;
            value.round().clamp(0.0, 255.0) as u8
        };
        Rgb::new(
            blend(self.r, other.r),
            blend(self.g, other.g),
            blend(self.b, other.b),
        )
    }

    pub fn lighten(self, amount: f64) -> Rgb {
        self.mix(Rgb::WHITE, amount)
    }

    pub fn darken(self, amount: f64) -> Rgb {
        self.mix(Rgb::BLACK, amount)
    }

    /// WCAG relative luminance in `0.0..=1.0`.
    pub fn luminance(self) -> f64 {
        let channel = |c: u8| {
            let c = f64::from(c) / 255.0;
            if c <= 0.039_28 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        };
        0.2126 * channel(self.r) + 0.7152 * channel(self.g) + 0.0722 * channel(self.b)
    }

    pub fn contrast_ratio(self, other: Rgb) -> f64 {
        let (a, b) = (self.luminance(), other.luminance());
        let (hi, lo) = if a >= b { (a, b) } else { (b, a) };
        (hi + 0.05) / (lo + 0.05)
    }

    /// Near-black or near-white, whichever reads better on `self`.
    pub fn readable_text(self) -> Rgb {
        let dark = Rgb::new(0x1a, 0x1a, 0x1a);
        let light = Rgb::new(0xfa, 0xfa, 0xfa);
        if self.contrast_ratio(dark) >= self.contrast_ratio(light) {
            dark
        } else {
            light
        }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = anyhow::Error;

    fn from_str(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        let hex = trimmed
            .strip_prefix('#')
            .ok_or_else(|| anyhow!("color must start with '#' (got {trimmed:?})"))?;
        if !hex.chars().all(|ch| ch.is_ascii_hexdigit()) {
            return Err(anyhow!("color has non-hex digits (got {trimmed:?})"));
        }
        let expanded = match hex.len() {
            3 => hex.chars().flat_map(|ch| [ch, ch]).collect::<String>(),
            6 => hex.to_string(),
            _ => {
                return Err(anyhow!(
                    "color must be #rgb or #rrggbb (got {trimmed:?})"
                ))
            }
        };
        let channel = |idx: usize| u8::from_str_radix(&expanded[idx..idx + 2], 16);
        Ok(Rgb::new(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Rgb {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

/// The four brand colors every draft reflects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    pub primary: Rgb,
    pub secondary: Rgb,
    pub accent: Rgb,
    pub background: Rgb,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            primary: DEFAULT_PRIMARY,
            secondary: DEFAULT_SECONDARY,
            accent: DEFAULT_ACCENT,
            background: DEFAULT_BACKGROUND,
        }
    }
}

/// Per-color overrides, typically from CLI flags.
#[derive(Debug, Clone, Default)]
pub struct PaletteOverrides {
    pub primary: Option<Rgb>,
    pub secondary: Option<Rgb>,
    pub accent: Option<Rgb>,
    pub background: Option<Rgb>,
}

impl Palette {
    pub fn with_overrides(self, overrides: &PaletteOverrides) -> Palette {
        Palette {
            primary: overrides.primary.unwrap_or(self.primary),
            secondary: overrides.secondary.unwrap_or(self.secondary),
            accent: overrides.accent.unwrap_or(self.accent),
            background: overrides.background.unwrap_or(self.background),
        }
    }

    /// CSS custom properties exposing the raw palette to every draft.
    pub fn css_variables(&self) -> String {
        format!(
            "  --palette-primary: {};\n  --palette-secondary: {};\n  --palette-accent: {};\n  --palette-background: {};\n",
            self.primary, self.secondary, self.accent, self.background
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_long_and_short_hex() {
        assert_eq!("#1F3A5F".parse::<Rgb>().unwrap(), DEFAULT_PRIMARY);
        assert_eq!("#fff".parse::<Rgb>().unwrap(), Rgb::WHITE);
        assert_eq!(" #000000 ".parse::<Rgb>().unwrap(), Rgb::BLACK);
    }

    #[test]
    fn rejects_malformed_colors() {
        for bad in ["1f3a5f", "#12345", "#ggg", "#", "#1234567"] {
            assert!(bad.parse::<Rgb>().is_err(), "{bad} should be rejected");
        }
    }

    #[test]
    fn displays_lowercase_hex() {
        assert_eq!(Rgb::new(0xAB, 0x0C, 0xFF).to_string(), "#ab0cff");
    }

    #[test]
    fn mix_endpoints_and_midpoint() {
        let black = Rgb::BLACK;
        assert_eq!(black.mix(Rgb::WHITE, 0.0), black);
        assert_eq!(black.mix(Rgb::WHITE, 1.0), Rgb::WHITE);
        assert_eq!(black.mix(Rgb::WHITE, 0.5), Rgb::new(128, 128, 128));
        assert_eq!(black.mix(Rgb::WHITE, 4.0), Rgb::WHITE);
    }

    #[test]
    fn readable_text_contrasts_with_surface() {
        assert!(DEFAULT_BACKGROUND.readable_text().luminance() < 0.1);
        assert!(DEFAULT_PRIMARY.readable_text().luminance() > 0.9);
        assert!(Rgb::WHITE.contrast_ratio(Rgb::BLACK) > 20.0);
    }

    #[test]
    fn palette_serializes_as_hex_strings() {
        let json = serde_json::to_value(Palette::default()).unwrap();
        assert_eq!(json["primary"], "#1f3a5f");
        assert_eq!(json["background"], "#f7f5f0");
        let back: Palette = serde_json::from_value(json).unwrap();
        assert_eq!(back, Palette::default());
    }

    #[test]
    fn overrides_replace_only_given_colors() {
        let overrides = PaletteOverrides {
            accent: Some(Rgb::new(1, 2, 3)),
            ..PaletteOverrides::default()
        };
        let palette = Palette::default().with_overrides(&overrides);
        assert_eq!(palette.accent, Rgb::new(1, 2, 3));
        assert_eq!(palette.primary, DEFAULT_PRIMARY);
    }
}
