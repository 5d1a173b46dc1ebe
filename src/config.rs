//! The garment configuration record.
//!
//! A [`GarmentConfig`] is the only input of the renderer. It is plain data,
//! serializes to camelCase JSON and is safe to persist: its shape is the
//! renderer's one stable external schema.
//!
//! # Example
//!
//! ```
//! use tailor_renderer::{GarmentConfig, GarmentVariant};
//!
//! let config = GarmentConfig::new()
//!     .with_variant(GarmentVariant::Crew)
//!     .with_trim_line_count(2)
//!     .with_collar_scale(1.2);
//!
//! let json = config.to_json().unwrap();
//! let restored = GarmentConfig::from_json(&json).unwrap();
//! assert_eq!(restored, config);
//! ```

use serde::{Deserialize, Serialize};

use crate::color::Color;

/// Domain of [`GarmentConfig::collar_scale`].
pub const COLLAR_SCALE_RANGE: (f32, f32) = (0.8, 1.5);

/// Domain of [`GarmentConfig::logo_scale`].
pub const LOGO_SCALE_RANGE: (f32, f32) = (0.5, 2.0);

/// Largest supported [`GarmentConfig::trim_line_count`].
pub const MAX_TRIM_LINES: u32 = 3;

// ============================================================================
// Variant & Logo
// ============================================================================

/// The two supported silhouettes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub enum GarmentVariant {
    /// Folded collar, placket and buttons.
    #[default]
    Polo,
    /// Ribbed round neck.
    Crew,
}

/// Reference to the logo image placed on the chest.
///
/// Any `href` an SVG `<image>` accepts: a `data:` URL, a file path or a URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub struct LogoAsset(String);

impl LogoAsset {
    pub fn new(href: impl Into<String>) -> Self {
        Self(href.into())
    }

    pub fn href(&self) -> &str {
        &self.0
    }
}

// ============================================================================
// GarmentConfig
// ============================================================================

/// Every user-chosen parameter of one garment design.
///
/// Numeric fields may hold out-of-domain values (for example after loading a
/// hand-edited file); the renderer clamps them instead of failing. Use
/// [`clamped`](Self::clamped) to see the values that will actually be drawn.
///
/// Fields missing from JSON take their [`Default`] value, and the field names
/// used by earlier releases of the design editor (`type`, `collarSize`,
/// `logoUrl`, `tippingLines`, `enableChestStripe`) are accepted as aliases.
///
/// # JSON Format
///
/// ```json
/// {
///   "garmentVariant": "polo",
///   "baseColor": "#1e293b",
///   "sleeveColor": "#1e293b",
///   "collarColor": "#ef4444",
///   "buttonColor": "#ffffff",
///   "accentColor": "#ffffff",
///   "collarScale": 1.0,
///   "logoAsset": null,
///   "logoScale": 1.0,
///   "trimLineCount": 0,
///   "chestStripeEnabled": false
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub struct GarmentConfig {
    /// Selects the neckline sub-structure.
    #[serde(alias = "type")]
    pub garment_variant: GarmentVariant,

    /// Torso fabric.
    pub base_color: Color,

    /// Sleeve fabric.
    pub sleeve_color: Color,

    /// Polo collar, crew neck rib and both cuffs.
    pub collar_color: Color,

    /// Polo buttons.
    pub button_color: Color,

    /// Trim lines and the chest stripe.
    pub accent_color: Color,

    /// Collar spread / rib thickness multiplier, domain [0.8, 1.5].
    #[serde(alias = "collarSize")]
    pub collar_scale: f32,

    /// Chest logo. `None` renders no logo.
    #[serde(alias = "logoUrl")]
    pub logo_asset: Option<LogoAsset>,

    /// Logo size multiplier, domain [0.5, 2.0].
    pub logo_scale: f32,

    /// Number of tipping lines on every band, 0 to 3.
    #[serde(alias = "tippingLines")]
    pub trim_line_count: u32,

    /// Draws an accent stripe across the chest.
    #[serde(alias = "enableChestStripe")]
    pub chest_stripe_enabled: bool,
}

impl Default for GarmentConfig {
    fn default() -> Self {
        Self {
            garment_variant: GarmentVariant::Polo,
            base_color: Color::new("#1e293b"),
            sleeve_color: Color::new("#1e293b"),
            collar_color: Color::new("#ef4444"),
            button_color: Color::new("#ffffff"),
            accent_color: Color::new("#ffffff"),
            collar_scale: 1.0,
            logo_asset: None,
            logo_scale: 1.0,
            trim_line_count: 0,
            chest_stripe_enabled: false,
        }
    }
}

impl GarmentConfig {
    /// Creates the default design (navy polo with a red collar).
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_variant(mut self, variant: GarmentVariant) -> Self {
        self.garment_variant = variant;
        self
    }

    pub fn with_base_color(mut self, color: impl Into<Color>) -> Self {
        self.base_color = color.into();
        self
    }

    pub fn with_sleeve_color(mut self, color: impl Into<Color>) -> Self {
        self.sleeve_color = color.into();
        self
    }

    pub fn with_collar_color(mut self, color: impl Into<Color>) -> Self {
        self.collar_color = color.into();
        self
    }

    pub fn with_button_color(mut self, color: impl Into<Color>) -> Self {
        self.button_color = color.into();
        self
    }

    pub fn with_accent_color(mut self, color: impl Into<Color>) -> Self {
        self.accent_color = color.into();
        self
    }

    pub fn with_collar_scale(mut self, scale: f32) -> Self {
        self.collar_scale = scale;
        self
    }

    pub fn with_logo(mut self, logo: Option<LogoAsset>) -> Self {
        self.logo_asset = logo;
        self
    }

    pub fn with_logo_scale(mut self, scale: f32) -> Self {
        self.logo_scale = scale;
        self
    }

    pub fn with_trim_line_count(mut self, count: u32) -> Self {
        self.trim_line_count = count;
        self
    }

    pub fn with_chest_stripe(mut self, enabled: bool) -> Self {
        self.chest_stripe_enabled = enabled;
        self
    }

    /// Returns a copy with every numeric field clamped into its domain.
    pub fn clamped(&self) -> Self {
        let clamped = Self {
            collar_scale: clamp_to(self.collar_scale, COLLAR_SCALE_RANGE),
            logo_scale: clamp_to(self.logo_scale, LOGO_SCALE_RANGE),
            trim_line_count: self.trim_line_count.min(MAX_TRIM_LINES),
            ..self.clone()
        };
        if clamped != *self {
            log::debug!(
                "clamped garment config (collar {} -> {}, logo {} -> {}, trim {} -> {})",
                self.collar_scale,
                clamped.collar_scale,
                self.logo_scale,
                clamped.logo_scale,
                self.trim_line_count,
                clamped.trim_line_count,
            );
        }
        clamped
    }

    /// Returns true if rendering `other` would produce a different scene.
    ///
    /// Both configs are compared after clamping, so `collar_scale` values of
    /// 10 and 1.5 do not differ.
    pub fn differs_from(&self, other: &Self) -> bool {
        self.clamped() != other.clamped()
    }

    /// Serializes the config to a JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serializes the config to a pretty-printed JSON string.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserializes a config from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Returns the JSON schema of the configuration record.
    #[cfg(feature = "jsonschema")]
    pub fn json_schema() -> schemars::schema::RootSchema {
        schemars::schema_for!(GarmentConfig)
    }
}

/// Clamps `value` into `(min, max)`; NaN maps to `min`.
fn clamp_to(value: f32, (min, max): (f32, f32)) -> f32 {
    if value.is_nan() {
        min
    } else {
        value.clamp(min, max)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_uses_camel_case_field_names() {
        let json = GarmentConfig::new().to_json_pretty().unwrap();

        assert!(json.contains("\"garmentVariant\": \"polo\""));
        assert!(json.contains("\"trimLineCount\""));
        assert!(json.contains("\"chestStripeEnabled\""));
        assert!(json.contains("\"logoAsset\": null"));
    }

    #[test]
    fn empty_object_deserializes_to_default() {
        let config = GarmentConfig::from_json("{}").unwrap();
        assert_eq!(config, GarmentConfig::default());
    }

    #[test]
    fn legacy_field_names_are_accepted() {
        let json = r##"{
            "type": "crew",
            "collarSize": 1.3,
            "logoUrl": "data:image/png;base64,AAAA",
            "tippingLines": 2,
            "enableChestStripe": true,
            "accentColor": "#f59e0b"
        }"##;
        let config = GarmentConfig::from_json(json).unwrap();

        assert_eq!(config.garment_variant, GarmentVariant::Crew);
        assert_eq!(config.collar_scale, 1.3);
        assert_eq!(
            config.logo_asset.as_ref().map(LogoAsset::href),
            Some("data:image/png;base64,AAAA")
        );
        assert_eq!(config.trim_line_count, 2);
        assert!(config.chest_stripe_enabled);
        assert_eq!(config.accent_color.as_str(), "#f59e0b");
    }

    #[test]
    fn clamping_pins_numbers_to_their_domains() {
        let config = GarmentConfig::new()
            .with_collar_scale(10.0)
            .with_logo_scale(0.0)
            .with_trim_line_count(7)
            .clamped();

        assert_eq!(config.collar_scale, 1.5);
        assert_eq!(config.logo_scale, 0.5);
        assert_eq!(config.trim_line_count, 3);

        let low = GarmentConfig::new().with_collar_scale(-2.0).clamped();
        assert_eq!(low.collar_scale, 0.8);

        let nan = GarmentConfig::new().with_collar_scale(f32::NAN).clamped();
        assert_eq!(nan.collar_scale, 0.8);
    }

    #[test]
    fn in_domain_config_is_unchanged_by_clamping() {
        let config = GarmentConfig::new().with_collar_scale(1.2).with_trim_line_count(2);
        assert_eq!(config.clamped(), config);
    }

    #[test]
    fn differs_from_compares_clamped_values() {
        let a = GarmentConfig::new().with_collar_scale(10.0);
        let b = GarmentConfig::new().with_collar_scale(1.5);
        assert!(!a.differs_from(&b));

        let c = GarmentConfig::new().with_accent_color("#000000");
        assert!(GarmentConfig::new().differs_from(&c));
    }

    #[test]
    fn tiny_scale_steps_are_changes() {
        let base = GarmentConfig::new();
        let nudged = GarmentConfig::new().with_collar_scale(1.00005);
        assert!(base.differs_from(&nudged));

        let logo = GarmentConfig::new().with_logo_scale(1.00005);
        assert!(base.differs_from(&logo));
    }
}
