//! Theme presets and `#RRGGBB` color parsing.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use thiserror::Error;

/// Built-in color schemes.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreset {
    /// White background, blue accent, black text.
    #[default]
    Light,
    Dark,
}

impl ThemePreset {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    #[must_use]
    pub const fn toggle(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    #[must_use]
    pub const fn colors(self) -> ThemeColors {
        match self {
            Self::Light => ThemeColors {
                background: HexColor::new(0xFF, 0xFF, 0xFF),
                accent: HexColor::new(0x00, 0x7B, 0xFF),
                text: HexColor::new(0x00, 0x00, 0x00),
            },
            Self::Dark => ThemeColors {
                background: HexColor::new(0x1E, 0x1E, 0x1E),
                accent: HexColor::new(0x4D, 0xA3, 0xFF),
                text: HexColor::new(0xE6, 0xE6, 0xE6),
            },
        }
    }
}

impl fmt::Display for ThemePreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown theme preset '{0}'; expected 'light' or 'dark'")]
pub struct UnknownPreset(pub String);

impl FromStr for ThemePreset {
    type Err = UnknownPreset;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            _ => Err(UnknownPreset(s.to_string())),
        }
    }
}

/// A 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HexColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl HexColor {
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Perceived brightness in `[0, 1]` (Rec. 601 weights).
    #[must_use]
    pub fn luma(self) -> f64 {
        (0.299 * f64::from(self.r) + 0.587 * f64::from(self.g) + 0.114 * f64::from(self.b))
            / 255.0
    }

    /// Linear blend toward `other`; `t = 0` is `self`, `t = 1` is `other`.
    #[must_use]
    pub fn mix(self, other: Self, t: f64) -> Self {
        let t = t.clamp(0.0, 1.0);
        let lerp = |a: u8, b: u8| (f64::from(a) + (f64::from(b) - f64::from(a)) * t).round() as u8;
        Self::new(
            lerp(self.r, other.r),
            lerp(self.g, other.g),
            lerp(self.b, other.b),
        )
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid color '{0}'; expected #RRGGBB")]
pub struct ColorParseError(pub String);

impl FromStr for HexColor {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ColorParseError(s.to_string());
        let hex = s.trim().strip_prefix('#').ok_or_else(err)?;
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(err());
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| err());
        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }
}

/// The three base colors every palette is derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeColors {
    pub background: HexColor,
    pub accent: HexColor,
    pub text: HexColor,
}

impl Default for ThemeColors {
    fn default() -> Self {
        ThemePreset::default().colors()
    }
}

/// Resolved theme: the active preset plus any per-color overrides.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ThemeSettings {
    pub preset: ThemePreset,
    pub overrides: ColorOverrides,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColorOverrides {
    pub background: Option<HexColor>,
    pub accent: Option<HexColor>,
    pub text: Option<HexColor>,
}

impl ThemeSettings {
    /// Preset colors with overrides applied.
    #[must_use]
    pub fn colors(&self) -> ThemeColors {
        let base = self.preset.colors();
        ThemeColors {
            background: self.overrides.background.unwrap_or(base.background),
            accent: self.overrides.accent.unwrap_or(base.accent),
            text: self.overrides.text.unwrap_or(base.text),
        }
    }

    /// Switch presets. Overrides are kept; they apply to either preset.
    #[must_use]
    pub fn toggled(self) -> Self {
        Self {
            preset: self.preset.toggle(),
            ..self
        }
    }
}
