//! Fabric color values.
//!
//! Colors travel through the configuration record as free-form strings so
//! that any CSS color an editor produces survives a round trip untouched.
//! Parsing only happens when the renderer needs to do math on a color
//! (shading a recessed panel, filling the capture background).

use palette::Srgb;
use serde::{Deserialize, Serialize};

/// A color as written in the configuration record (`#1e293b`, `white`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub struct Color(String);

impl Color {
    /// Creates a color from any string. No validation happens here.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the color exactly as it was written.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parses the color into 8-bit sRGB.
    ///
    /// Accepts hex codes (`#abc`, `#aabbcc`, with or without `#`) and
    /// CSS/SVG named colors. Returns `None` for anything else.
    pub fn to_rgb(&self) -> Option<Srgb<u8>> {
        let value = self.0.trim();
        if let Some(hex) = value.strip_prefix('#') {
            return hex.parse::<Srgb<u8>>().ok();
        }
        palette::named::from_str(&value.to_ascii_lowercase())
            .or_else(|| value.parse::<Srgb<u8>>().ok())
    }

    /// Scales every channel by `factor`, like the CSS `brightness()` filter.
    ///
    /// Colors that cannot be parsed are returned unchanged.
    pub fn brightness(&self, factor: f32) -> Color {
        let Some(rgb) = self.to_rgb() else {
            log::warn!("cannot shade unparseable color {:?}; using it as-is", self.0);
            return self.clone();
        };
        let factor = factor.max(0.0);
        let scale = |c: u8| (c as f32 * factor).round().min(255.0) as u8;
        Self::from_rgb(Srgb::new(scale(rgb.red), scale(rgb.green), scale(rgb.blue)))
    }

    /// Formats an sRGB triple as a lowercase hex color.
    pub fn from_rgb(rgb: Srgb<u8>) -> Self {
        Self(format!("#{:02x}{:02x}{:02x}", rgb.red, rgb.green, rgb.blue))
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::new("#ffffff")
    }
}

impl From<&str> for Color {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Color {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Swatches offered by the design editor.
pub const PRESET_COLORS: [&str; 16] = [
    "#ffffff", "#000000", "#1e293b", "#334155", "#ef4444", "#f97316", "#f59e0b", "#84cc16",
    "#10b981", "#06b6d4", "#3b82f6", "#6366f1", "#8b5cf6", "#d946ef", "#f43f5e", "#78350f",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_and_named_colors() {
        assert_eq!(Color::new("#ef4444").to_rgb(), Some(Srgb::new(0xef, 0x44, 0x44)));
        assert_eq!(Color::new("#fff").to_rgb(), Some(Srgb::new(255, 255, 255)));
        assert_eq!(Color::new("White").to_rgb(), Some(Srgb::new(255, 255, 255)));
        assert_eq!(Color::new("not a color").to_rgb(), None);
    }

    #[test]
    fn brightness_scales_channels() {
        let shaded = Color::new("#c86464").brightness(0.5);
        assert_eq!(shaded.as_str(), "#643232");
    }

    #[test]
    fn brightness_passes_through_unparseable_colors() {
        let color = Color::new("var(--brand)");
        assert_eq!(color.brightness(0.6), color);
    }

    #[test]
    fn presets_are_valid_colors() {
        for preset in PRESET_COLORS {
            assert!(Color::new(preset).to_rgb().is_some(), "{preset} should parse");
        }
    }
}
