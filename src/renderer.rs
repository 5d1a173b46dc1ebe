//! Stateful renderer holding the current design.
//!
//! [`GarmentRenderer`] is what an editor talks to: it owns the current
//! [`GarmentConfig`] and [`Theme`], reports whether an update actually
//! changed anything, and memoizes the last assembled scene so repeated
//! renders of an unchanged design are free.
//!
//! # Example
//!
//! ```
//! use tailor_renderer::{GarmentConfig, GarmentRenderer, GarmentVariant};
//!
//! let mut renderer = GarmentRenderer::new(GarmentConfig::new());
//! assert!(renderer.update(|c| c.garment_variant = GarmentVariant::Crew));
//! assert!(!renderer.update(|c| c.garment_variant = GarmentVariant::Crew));
//!
//! let svg = renderer.to_svg();
//! assert!(svg.contains("data-role=\"neck-rib\""));
//! ```

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use log::debug;

use crate::capture::{CaptureBridge, CaptureError, capture_with_retry};
use crate::config::GarmentConfig;
use crate::scene::{Scene, assemble_with_theme};
use crate::theme::Theme;

// ============================================================================
// CacheKey
// ============================================================================

/// Hash of everything that affects the assembled scene.
///
/// Built from the clamped config, so inputs that clamp to the same values
/// share a key. Floats are hashed by their bit patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CacheKey(u64);

impl CacheKey {
    pub fn new(config: &GarmentConfig, theme: &Theme) -> Self {
        let config = config.clamped();
        let mut hasher = DefaultHasher::new();
        config.garment_variant.hash(&mut hasher);
        config.base_color.hash(&mut hasher);
        config.sleeve_color.hash(&mut hasher);
        config.collar_color.hash(&mut hasher);
        config.button_color.hash(&mut hasher);
        config.accent_color.hash(&mut hasher);
        config.collar_scale.to_bits().hash(&mut hasher);
        config.logo_asset.hash(&mut hasher);
        config.logo_scale.to_bits().hash(&mut hasher);
        config.trim_line_count.hash(&mut hasher);
        config.chest_stripe_enabled.hash(&mut hasher);
        theme.hash(&mut hasher);
        Self(hasher.finish())
    }
}

// ============================================================================
// GarmentRenderer
// ============================================================================

pub struct GarmentRenderer {
    config: GarmentConfig,
    theme: Theme,
    version: u64,
    cache: Option<(CacheKey, Scene)>,
}

impl Default for GarmentRenderer {
    fn default() -> Self {
        Self::new(GarmentConfig::default())
    }
}

impl GarmentRenderer {
    pub fn new(config: GarmentConfig) -> Self {
        Self {
            config,
            theme: Theme::default(),
            version: 0,
            cache: None,
        }
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.set_theme(theme);
        self
    }

    pub fn config(&self) -> &GarmentConfig {
        &self.config
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Incremented on every change to the config or theme.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Replaces the config. Returns true if it changed.
    pub fn set_config(&mut self, config: GarmentConfig) -> bool {
        if self.config.differs_from(&config) {
            self.config = config;
            self.version = self.version.wrapping_add(1);
            true
        } else {
            false
        }
    }

    /// Edits a copy of the config and applies it. Returns true if it changed.
    pub fn update(&mut self, edit: impl FnOnce(&mut GarmentConfig)) -> bool {
        let mut config = self.config.clone();
        edit(&mut config);
        self.set_config(config)
    }

    /// Restores the default design.
    pub fn reset(&mut self) -> bool {
        self.set_config(GarmentConfig::default())
    }

    pub fn set_theme(&mut self, theme: Theme) -> bool {
        if self.theme != theme {
            self.theme = theme;
            self.version = self.version.wrapping_add(1);
            self.cache = None;
            true
        } else {
            false
        }
    }

    /// Returns the scene for the current design, assembling it if needed.
    pub fn render(&mut self) -> &Scene {
        let key = CacheKey::new(&self.config, &self.theme);
        let scene = match self.cache.take() {
            Some((cached, scene)) if cached == key => {
                debug!("scene cache hit (version {})", self.version);
                scene
            }
            _ => {
                debug!("scene cache miss (version {})", self.version);
                assemble_with_theme(&self.config, &self.theme)
            }
        };
        &self.cache.insert((key, scene)).1
    }

    pub fn to_svg(&mut self) -> String {
        self.render().to_svg()
    }

    /// Captures the current design, retrying once on failure.
    pub fn capture<B: CaptureBridge + ?Sized>(
        &mut self,
        bridge: &B,
    ) -> Result<Vec<u8>, CaptureError> {
        capture_with_retry(bridge, self.render())
    }

    /// Drops the memoized scene.
    pub fn clear_cache(&mut self) {
        self.cache = None;
    }

    pub fn is_cached(&self) -> bool {
        let key = CacheKey::new(&self.config, &self.theme);
        self.cache.as_ref().is_some_and(|(cached, _)| *cached == key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GarmentVariant;
    use crate::scene::{Role, assemble};

    #[test]
    fn equal_config_is_not_a_change() {
        let mut renderer = GarmentRenderer::default();
        assert!(!renderer.set_config(GarmentConfig::new()));
        assert_eq!(renderer.version(), 0);

        assert!(renderer.set_config(GarmentConfig::new().with_trim_line_count(2)));
        assert_eq!(renderer.version(), 1);
    }

    #[test]
    fn values_that_clamp_alike_are_not_a_change() {
        let mut renderer = GarmentRenderer::new(GarmentConfig::new().with_collar_scale(1.5));
        assert!(!renderer.update(|c| c.collar_scale = 9.0));
    }

    #[test]
    fn small_slider_steps_keep_the_scene_in_sync() {
        let mut renderer = GarmentRenderer::default();
        let mut wanted = 1.0_f32;
        let mut accepted = 0;
        for _ in 0..100 {
            wanted += 0.00005;
            if renderer.update(|c| c.collar_scale = wanted) {
                accepted += 1;
            }
        }
        assert_eq!(accepted, 100);
        assert_eq!(renderer.config().collar_scale, wanted);

        let expected = assemble(&GarmentConfig::new().with_collar_scale(wanted));
        assert_eq!(renderer.render(), &expected);
    }

    #[test]
    fn render_matches_assemble() {
        let config = GarmentConfig::new()
            .with_variant(GarmentVariant::Crew)
            .with_chest_stripe(true);
        let mut renderer = GarmentRenderer::new(config.clone());
        assert_eq!(renderer.render(), &assemble(&config));
    }

    #[test]
    fn scene_is_memoized_until_the_design_changes() {
        let mut renderer = GarmentRenderer::default();
        assert!(!renderer.is_cached());
        renderer.render();
        assert!(renderer.is_cached());

        renderer.update(|c| c.garment_variant = GarmentVariant::Crew);
        assert!(!renderer.is_cached());
        assert!(renderer.render().contains(Role::NeckRib));

        renderer.clear_cache();
        assert!(!renderer.is_cached());
    }

    #[test]
    fn theme_change_invalidates() {
        let mut renderer = GarmentRenderer::default();
        renderer.render();
        assert!(renderer.set_theme(Theme::daylight()));
        assert!(!renderer.is_cached());
        assert!(!renderer.set_theme(Theme::daylight()));
    }

    #[test]
    fn reset_restores_defaults() {
        let mut renderer = GarmentRenderer::new(GarmentConfig::new().with_chest_stripe(true));
        assert!(renderer.reset());
        assert_eq!(renderer.config(), &GarmentConfig::default());
    }

    #[test]
    fn cache_key_follows_clamping() {
        let theme = Theme::default();
        assert_eq!(
            CacheKey::new(&GarmentConfig::new().with_logo_scale(7.0), &theme),
            CacheKey::new(&GarmentConfig::new().with_logo_scale(2.0), &theme)
        );
        assert_ne!(
            CacheKey::new(&GarmentConfig::new(), &theme),
            CacheKey::new(&GarmentConfig::new(), &Theme::daylight())
        );
    }
}
