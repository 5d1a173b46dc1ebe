//! tailor-renderer: parametric vector renderer for polo and crew-neck shirts
//!
//! A [`GarmentConfig`] describes one shirt design: variant, colors, collar
//! size, tipping lines, chest stripe and logo. [`render`] turns it into a
//! layered [`Scene`] of shaded vector shapes, which serializes to a
//! standalone SVG document or rasterizes to PNG through a
//! [`CaptureBridge`](capture::CaptureBridge).
//!
//! # Example
//!
//! ```
//! use tailor_renderer::{GarmentConfig, GarmentVariant};
//! use tailor_renderer::scene::{LayerKind, Role};
//!
//! let config = GarmentConfig::new()
//!     .with_variant(GarmentVariant::Crew)
//!     .with_accent_color("#f59e0b")
//!     .with_trim_line_count(2)
//!     .with_chest_stripe(true);
//!
//! let scene = tailor_renderer::render(&config);
//! assert!(scene.has_layer(LayerKind::ChestStripe));
//! assert!(scene.contains(Role::NeckRib));
//! assert!(!scene.contains(Role::Placket));
//!
//! let svg = scene.to_svg();
//! assert!(svg.starts_with("<svg"));
//! ```
//!
//! # Live Editing
//!
//! Editors hold a [`GarmentRenderer`], which detects no-op updates and
//! memoizes the last scene:
//!
//! ```
//! use tailor_renderer::{GarmentConfig, GarmentRenderer, Theme};
//!
//! let mut renderer = GarmentRenderer::new(GarmentConfig::new()).with_theme(Theme::daylight());
//! renderer.update(|config| config.collar_scale = 1.3);
//!
//! let json = renderer.config().to_json().unwrap();
//! assert!(json.contains("\"collarScale\":1.3"));
//! ```
//!
//! # Pipeline
//!
//! 1. [`geometry::build`] computes outlines from the clamped config.
//! 2. [`decoration`] spreads tipping lines across cuff, collar and rib bands.
//! 3. [`shading`] finishes each region with grain, volume and shadows.
//! 4. [`scene::assemble`] stacks everything in a fixed paint order.
//! 5. [`capture`] rasterizes the scene on demand.

mod color;
mod config;
mod renderer;
mod theme;

pub mod capture;
pub mod decoration;
pub mod geometry;
pub mod scene;
pub mod shading;
pub mod tryon;

#[cfg(feature = "wasm")]
mod wasm;

pub use color::{Color, PRESET_COLORS};
pub use config::{
    COLLAR_SCALE_RANGE, GarmentConfig, GarmentVariant, LOGO_SCALE_RANGE, LogoAsset, MAX_TRIM_LINES,
};
pub use renderer::{CacheKey, GarmentRenderer};
pub use scene::Scene;
pub use theme::Theme;

#[cfg(feature = "wasm")]
pub use wasm::{GarmentPreview, default_config, preset_colors, render_svg};

/// Renders `config` with the default theme.
///
/// Always succeeds: out-of-domain values are clamped and nothing is read
/// from disk or the network.
pub fn render(config: &GarmentConfig) -> Scene {
    scene::assemble(config)
}
