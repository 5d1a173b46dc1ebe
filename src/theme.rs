//! Presentation settings that are not part of a garment design.
//!
//! A [`Theme`] carries the colors of the rendering surroundings: the shirt
//! interior, the neck label, stitching, and the capture background. Two
//! presets ship with the crate; `studio` is the default.

use serde::{Deserialize, Serialize};

use crate::color::Color;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase", default)]
pub struct Theme {
    /// Back panel seen through the neck opening.
    pub interior: Color,
    pub label_fill: Color,
    pub label_text_color: Color,
    pub label_text: String,
    /// Hem and placket stitching.
    pub stitch: Color,
    /// Button thread.
    pub thread: Color,
    pub capture_background: Color,
    /// Whether the garment casts a soft shadow.
    pub drop_shadow: bool,
}

impl Theme {
    /// Dark interior on a white capture background.
    pub fn studio() -> Self {
        Self {
            interior: Color::new("#111"),
            label_fill: Color::new("#f5f5f5"),
            label_text_color: Color::new("#333"),
            label_text: "NEXUS".to_string(),
            stitch: Color::new("#000"),
            thread: Color::new("#ccc"),
            capture_background: Color::new("#ffffff"),
            drop_shadow: true,
        }
    }

    /// Lighter interior and a warm off-white background.
    pub fn daylight() -> Self {
        Self {
            interior: Color::new("#2a2a2a"),
            label_fill: Color::new("#ffffff"),
            label_text_color: Color::new("#1f2937"),
            label_text: "NEXUS".to_string(),
            stitch: Color::new("#1f2937"),
            thread: Color::new("#d1d5db"),
            capture_background: Color::new("#faf7f2"),
            drop_shadow: true,
        }
    }

    /// Looks a preset up by name.
    pub fn preset(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "studio" => Some(Self::studio()),
            "daylight" => Some(Self::daylight()),
            _ => None,
        }
    }

    pub fn with_label_text(mut self, text: impl Into<String>) -> Self {
        self.label_text = text.into();
        self
    }

    pub fn with_capture_background(mut self, color: impl Into<Color>) -> Self {
        self.capture_background = color.into();
        self
    }

    pub fn with_drop_shadow(mut self, enabled: bool) -> Self {
        self.drop_shadow = enabled;
        self
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::studio()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_studio() {
        assert_eq!(Theme::default(), Theme::studio());
        assert_eq!(Theme::default().capture_background.as_str(), "#ffffff");
    }

    #[test]
    fn presets_by_name() {
        assert_eq!(Theme::preset("Daylight"), Some(Theme::daylight()));
        assert!(Theme::preset("neon").is_none());
    }

    #[test]
    fn partial_json_fills_defaults() {
        let theme = Theme::from_json(r#"{"labelText":"ACME"}"#).unwrap();
        assert_eq!(theme.label_text, "ACME");
        assert_eq!(theme.interior, Theme::studio().interior);
    }
}
