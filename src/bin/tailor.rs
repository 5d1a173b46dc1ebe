//! Renders a garment design to SVG or PNG from the command line.
//!
//! ```text
//! tailor --config design.json --variant crew --trim-lines 2 -o shirt.png
//! ```

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use log::info;

use tailor_renderer::capture::{CaptureBridge, CaptureOptions, ResvgCapture};
use tailor_renderer::{GarmentConfig, GarmentRenderer, GarmentVariant, Theme};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Variant {
    Polo,
    Crew,
}

impl From<Variant> for GarmentVariant {
    fn from(variant: Variant) -> Self {
        match variant {
            Variant::Polo => GarmentVariant::Polo,
            Variant::Crew => GarmentVariant::Crew,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Svg,
    Png,
}

#[derive(Parser, Debug)]
#[command(name = "tailor", about = "Render a polo or crew-neck shirt design")]
struct Args {
    /// JSON garment config; defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long, value_enum)]
    variant: Option<Variant>,

    /// Tipping lines on cuffs and neckline (0-3).
    #[arg(long)]
    trim_lines: Option<u32>,

    /// Collar size multiplier (0.8-1.5).
    #[arg(long)]
    collar_scale: Option<f32>,

    #[arg(long)]
    stripe: Option<bool>,

    /// Theme preset: studio or daylight.
    #[arg(long, default_value = "studio")]
    theme: String,

    /// Output format; inferred from the output extension when omitted.
    #[arg(long, value_enum)]
    format: Option<Format>,

    /// Pixels per view-box unit for PNG output.
    #[arg(long, default_value_t = 2.0)]
    scale: f32,

    /// Output file; writes to stdout when omitted.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print the config JSON schema and exit.
    #[cfg(feature = "jsonschema")]
    #[arg(long)]
    schema: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    #[cfg(feature = "jsonschema")]
    if args.schema {
        println!("{}", serde_json::to_string_pretty(&GarmentConfig::json_schema())?);
        return Ok(());
    }

    let config = load_config(&args)?;
    let Some(theme) = Theme::preset(&args.theme) else {
        bail!("unknown theme '{}' (expected studio or daylight)", args.theme);
    };

    let mut renderer = GarmentRenderer::new(config).with_theme(theme.clone());
    let format = args.format.unwrap_or_else(|| infer_format(args.output.as_ref()));

    let bytes = match format {
        Format::Svg => renderer.to_svg().into_bytes(),
        Format::Png => {
            let bridge = ResvgCapture::new(CaptureOptions {
                scale: args.scale,
                background: Some(theme.capture_background.clone()),
                resources_dir: args
                    .config
                    .as_ref()
                    .and_then(|path| path.parent())
                    .map(PathBuf::from),
                ..CaptureOptions::default()
            });
            bridge
                .capture(renderer.render())
                .context("failed to capture design")?
        }
    };

    match &args.output {
        Some(path) => {
            fs::write(path, &bytes)
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!("wrote {} ({} bytes)", path.display(), bytes.len());
        }
        None => io::stdout().write_all(&bytes)?,
    }
    Ok(())
}

fn load_config(args: &Args) -> Result<GarmentConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            GarmentConfig::from_json(&json)
                .with_context(|| format!("invalid garment config in {}", path.display()))?
        }
        None => GarmentConfig::default(),
    };

    if let Some(variant) = args.variant {
        config.garment_variant = variant.into();
    }
    if let Some(count) = args.trim_lines {
        config.trim_line_count = count;
    }
    if let Some(scale) = args.collar_scale {
        config.collar_scale = scale;
    }
    if let Some(stripe) = args.stripe {
        config.chest_stripe_enabled = stripe;
    }
    Ok(config)
}

fn infer_format(output: Option<&PathBuf>) -> Format {
    match output.and_then(|path| path.extension()).and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("png") => Format::Png,
        _ => Format::Svg,
    }
}
