//! JavaScript bindings for browser-side live preview.
//!
//! Only available with the `wasm` feature. Configs cross the boundary as
//! plain JS objects in the same camelCase shape as the JSON record.
//!
//! ```javascript
//! import init, { GarmentPreview, defaultConfig } from 'tailor-renderer';
//!
//! await init();
//! const preview = new GarmentPreview(defaultConfig());
//! preview.update({ ...defaultConfig(), garmentVariant: 'crew', trimLineCount: 2 });
//! container.innerHTML = preview.svg();
//! ```

use wasm_bindgen::prelude::*;

use crate::color::PRESET_COLORS;
use crate::config::GarmentConfig;
use crate::renderer::GarmentRenderer;
use crate::theme::Theme;

fn config_from_js(value: JsValue) -> Result<GarmentConfig, JsError> {
    serde_wasm_bindgen::from_value(value)
        .map_err(|e| JsError::new(&format!("Invalid garment config: {}", e)))
}

/// Renders a config object straight to SVG markup.
#[wasm_bindgen(js_name = "renderSvg")]
pub fn render_svg(config: JsValue) -> Result<String, JsError> {
    let config = config_from_js(config)?;
    Ok(crate::render(&config).to_svg())
}

#[wasm_bindgen(js_name = "defaultConfig")]
pub fn default_config() -> Result<JsValue, JsError> {
    serde_wasm_bindgen::to_value(&GarmentConfig::default())
        .map_err(|e| JsError::new(&format!("Failed to export config: {}", e)))
}

#[wasm_bindgen(js_name = "presetColors")]
pub fn preset_colors() -> Vec<String> {
    PRESET_COLORS.iter().map(|c| c.to_string()).collect()
}

/// A [`GarmentRenderer`] exposed to JavaScript.
#[wasm_bindgen]
pub struct GarmentPreview {
    renderer: GarmentRenderer,
}

#[wasm_bindgen]
impl GarmentPreview {
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<GarmentPreview, JsError> {
        Ok(Self {
            renderer: GarmentRenderer::new(config_from_js(config)?),
        })
    }

    /// Replaces the config. Returns whether the design changed.
    pub fn update(&mut self, config: JsValue) -> Result<bool, JsError> {
        Ok(self.renderer.set_config(config_from_js(config)?))
    }

    /// Switches the presentation theme by preset name.
    #[wasm_bindgen(js_name = "setTheme")]
    pub fn set_theme(&mut self, name: &str) -> Result<bool, JsError> {
        let theme =
            Theme::preset(name).ok_or_else(|| JsError::new(&format!("Unknown theme: {}", name)))?;
        Ok(self.renderer.set_theme(theme))
    }

    pub fn reset(&mut self) -> bool {
        self.renderer.reset()
    }

    pub fn svg(&mut self) -> String {
        self.renderer.to_svg()
    }

    #[wasm_bindgen(js_name = "configJson")]
    pub fn config_json(&self) -> Result<String, JsError> {
        self.renderer
            .config()
            .to_json()
            .map_err(|e| JsError::new(&format!("Failed to export config: {}", e)))
    }
}
