//! Rasterizing a scene into an image payload.
//!
//! The [`CaptureBridge`] trait is the seam between the pure scene and
//! whatever turns it into pixels. [`ResvgCapture`] is the default bridge: it
//! serializes the scene to SVG, renders it with resvg at 2x over an opaque
//! background, and encodes a PNG.
//!
//! # Example
//!
//! ```no_run
//! use tailor_renderer::capture::{CaptureBridge, ResvgCapture};
//! use tailor_renderer::GarmentConfig;
//!
//! let scene = tailor_renderer::render(&GarmentConfig::new());
//! let png = ResvgCapture::default().capture(&scene)?;
//! std::fs::write("shirt.png", png)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::io::Cursor;
use std::path::PathBuf;

use image::{ImageFormat, Rgba, RgbaImage};
use log::{debug, warn};
use resvg::tiny_skia::{self, Pixmap, Transform};
use resvg::usvg::{Options, Tree};
use thiserror::Error;

use crate::color::Color;
use crate::scene::Scene;
use crate::theme::Theme;

/// Upscale factor applied to the view box when capturing.
pub const DEFAULT_CAPTURE_SCALE: f32 = 2.0;

#[derive(Error, Debug)]
pub enum CaptureError {
    #[error("could not capture design: invalid scene markup: {0}")]
    Parse(#[from] resvg::usvg::Error),

    #[error("could not capture design: cannot allocate a {width}x{height} surface")]
    SurfaceUnavailable { width: u32, height: u32 },

    #[error("could not capture design: {0}")]
    Encode(#[from] image::ImageError),
}

/// Turns a scene into an encoded raster image.
pub trait CaptureBridge {
    fn capture(&self, scene: &Scene) -> Result<Vec<u8>, CaptureError>;
}

/// Captures `scene`, retrying once if the first attempt fails.
pub fn capture_with_retry<B: CaptureBridge + ?Sized>(
    bridge: &B,
    scene: &Scene,
) -> Result<Vec<u8>, CaptureError> {
    match bridge.capture(scene) {
        Ok(bytes) => Ok(bytes),
        Err(err) => {
            warn!("{err}; retrying once");
            bridge.capture(scene)
        }
    }
}

// ============================================================================
// ResvgCapture
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct CaptureOptions {
    /// Pixels per view-box unit.
    pub scale: f32,
    /// Opaque fill behind the garment; `None` keeps transparency.
    pub background: Option<Color>,
    /// Load system fonts so the neck label text renders.
    pub load_system_fonts: bool,
    /// Base directory for relative logo paths.
    pub resources_dir: Option<PathBuf>,
}

impl Default for CaptureOptions {
    fn default() -> Self {
        Self {
            scale: DEFAULT_CAPTURE_SCALE,
            background: Some(Color::new("#ffffff")),
            load_system_fonts: true,
            resources_dir: None,
        }
    }
}

/// The default capture bridge, backed by resvg.
#[derive(Debug, Clone, Default)]
pub struct ResvgCapture {
    pub options: CaptureOptions,
}

impl ResvgCapture {
    pub fn new(options: CaptureOptions) -> Self {
        Self { options }
    }

    /// Uses the theme's capture background.
    pub fn for_theme(theme: &Theme) -> Self {
        Self::new(CaptureOptions {
            background: Some(theme.capture_background.clone()),
            ..CaptureOptions::default()
        })
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.options.scale = scale;
        self
    }

    pub fn with_background(mut self, background: Option<Color>) -> Self {
        self.options.background = background;
        self
    }

    /// Renders the scene to an RGBA image without encoding it.
    pub fn rasterize(&self, scene: &Scene) -> Result<RgbaImage, CaptureError> {
        render_svg(&scene.to_svg(), &self.options)
    }
}

impl CaptureBridge for ResvgCapture {
    fn capture(&self, scene: &Scene) -> Result<Vec<u8>, CaptureError> {
        let image = self.rasterize(scene)?;
        let mut bytes = Vec::new();
        image.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
        debug!(
            "captured {}x{} design ({} bytes)",
            image.width(),
            image.height(),
            bytes.len()
        );
        Ok(bytes)
    }
}

// ============================================================================
// SVG Rendering
// ============================================================================

/// Renders SVG markup at `options.scale` pixels per user unit.
pub fn render_svg(svg_data: &str, options: &CaptureOptions) -> Result<RgbaImage, CaptureError> {
    let mut opts = Options {
        resources_dir: options.resources_dir.clone(),
        ..Options::default()
    };
    if options.load_system_fonts {
        opts.fontdb_mut().load_system_fonts();
    }
    let tree = Tree::from_str(svg_data, &opts)?;

    let svg_size = tree.size();
    let scale = options.scale.max(f32::EPSILON);
    let width = (svg_size.width() * scale).ceil() as u32;
    let height = (svg_size.height() * scale).ceil() as u32;

    let mut pixmap =
        Pixmap::new(width, height).ok_or(CaptureError::SurfaceUnavailable { width, height })?;
    if let Some(rgb) = options.background.as_ref().and_then(Color::to_rgb) {
        pixmap.fill(tiny_skia::Color::from_rgba8(rgb.red, rgb.green, rgb.blue, 255));
    }

    resvg::render(&tree, Transform::from_scale(scale, scale), &mut pixmap.as_mut());
    Ok(pixmap_to_rgba_image(&pixmap))
}

/// Converts a tiny_skia Pixmap to an image::RgbaImage.
fn pixmap_to_rgba_image(pixmap: &Pixmap) -> RgbaImage {
    let mut img = RgbaImage::new(pixmap.width(), pixmap.height());
    for (pixel, out) in pixmap.pixels().iter().zip(img.pixels_mut()) {
        // tiny_skia stores premultiplied alpha.
        let (r, g, b, a) = unpremultiply(pixel.red(), pixel.green(), pixel.blue(), pixel.alpha());
        *out = Rgba([r, g, b, a]);
    }
    img
}

/// Unpremultiplies a premultiplied alpha pixel.
fn unpremultiply(r: u8, g: u8, b: u8, a: u8) -> (u8, u8, u8, u8) {
    if a == 0 {
        (0, 0, 0, 0)
    } else {
        let a_f = a as f32 / 255.0;
        (
            (r as f32 / a_f).round().min(255.0) as u8,
            (g as f32 / a_f).round().min(255.0) as u8,
            (b as f32 / a_f).round().min(255.0) as u8,
            a,
        )
    }
}
