//! Theme module for material-card
//!
//! This module provides the color and font primitives shared by cards,
//! cells and ripples, plus the built-in material palette used when no
//! appearance is supplied.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// An sRGB color with straight (non-premultiplied) alpha in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn gray(value: u8) -> Self {
        Self::rgb(value, value, value)
    }

    pub const fn gray_alpha(value: u8, a: f32) -> Self {
        Self::rgba(value, value, value, a)
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// Composite `self` over an opaque `base` color ("source over").
    pub fn blend_over(self, base: Rgba) -> Rgba {
        let a = self.a.clamp(0.0, 1.0);
        let mix = |src: u8, dst: u8| -> u8 {
            (src as f32 * a + dst as f32 * (1.0 - a)).round() as u8
        };
        Rgba::rgb(mix(self.r, base.r), mix(self.g, base.g), mix(self.b, base.b))
    }

    /// Parse `#rrggbb` or `#rrggbbaa`.
    pub fn parse_hex(input: &str) -> Result<Self, ConfigError> {
        let invalid = || ConfigError::InvalidColor(input.to_string());
        let hex = input.strip_prefix('#').ok_or_else(invalid)?;
        if !hex.is_ascii() || (hex.len() != 6 && hex.len() != 8) {
            return Err(invalid());
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
        let (r, g, b) = (channel(0)?, channel(2)?, channel(4)?);
        let a = if hex.len() == 8 {
            channel(6)? as f32 / 255.0
        } else {
            1.0
        };
        Ok(Rgba::rgba(r, g, b, a))
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a >= 1.0 {
            write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            let a = (self.a.clamp(0.0, 1.0) * 255.0).round() as u8;
            write!(f, "#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, a)
        }
    }
}

impl TryFrom<String> for Rgba {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Rgba::parse_hex(&value)
    }
}

impl From<Rgba> for String {
    fn from(color: Rgba) -> Self {
        color.to_string()
    }
}

/// Font weight; only the two weights the card uses are modeled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FontWeight {
    #[default]
    Regular,
    DemiBold,
}

/// Font descriptor consumed by text measurement and rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Font {
    pub family: String,
    pub size: f32,
    #[serde(default)]
    pub weight: FontWeight,
}

impl Font {
    pub fn new(family: &str, size: f32, weight: FontWeight) -> Self {
        Self {
            family: family.to_string(),
            size,
            weight,
        }
    }

    pub fn is_bold(&self) -> bool {
        self.weight == FontWeight::DemiBold
    }
}

// ============================================================================
// Card Backgrounds
// ============================================================================

/// Header and footer background (gray 242)
pub const CARD_HEADER: Rgba = Rgba::gray(242);

/// Body cell background (gray 249)
pub const CARD_CELL: Rgba = Rgba::gray(249);

/// Divider line between cells (gray 200)
pub const CARD_BORDER: Rgba = Rgba::gray(200);

/// Screen behind the cards in the terminal demo
pub const BACKDROP: Rgba = Rgba::gray(230);

// ============================================================================
// Effects
// ============================================================================

/// Ripple disc color (gray 51 at 10%)
pub const RIPPLE: Rgba = Rgba::gray_alpha(51, 0.1);

/// Card shadow color (gray 51)
pub const SHADOW: Rgba = Rgba::gray(51);

/// Dimming overlay played with a ripple (black at 5%)
pub const OVERLAY: Rgba = Rgba::gray_alpha(0, 0.05);

// ============================================================================
// Text
// ============================================================================

/// Title text color (gray 51)
pub const TITLE: Rgba = Rgba::gray(51);

/// Body text color (gray 144)
pub const TEXT: Rgba = Rgba::gray(144);

pub const FONT_FAMILY: &str = "AvenirNext";

pub fn title_font() -> Font {
    Font::new(FONT_FAMILY, 15.0, FontWeight::DemiBold)
}

pub fn text_font() -> Font {
    Font::new(FONT_FAMILY, 13.0, FontWeight::Regular)
}
