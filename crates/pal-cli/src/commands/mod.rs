//! CLI command implementations

pub mod convert;
pub mod formats;
pub mod gradient;
pub mod info;

use anyhow::{Context, Result};
use pal_codec::{GradientRegistry, PaletteRegistry};
use pal_core::{Color, Gradients, Palette};
use std::path::Path;

/// Load palette from path, by forced extension, signature or file extension
pub fn load_palette(path: &Path, from: Option<&str>, auto: bool) -> Result<Palette> {
    let registry = PaletteRegistry::global();
    let loaded = if auto {
        registry.load_auto(path)
    } else {
        registry.load(path, from)
    };
    loaded.with_context(|| format!("Failed to load: {}", path.display()))
}

/// Save palette to path
pub fn save_palette(path: &Path, palette: &Palette, to: Option<&str>) -> Result<()> {
    PaletteRegistry::global()
        .save(palette, path, to)
        .with_context(|| format!("Failed to save: {}", path.display()))
}

/// Save gradients to path
pub fn save_gradients(path: &Path, gradients: &Gradients) -> Result<()> {
    GradientRegistry::global()
        .save(gradients, path, None)
        .with_context(|| format!("Failed to save: {}", path.display()))
}

/// One-line description of a color: hex when it has an RGB form, raw components otherwise.
pub fn describe_color(color: &Color) -> String {
    let value = match color.hex_rgba(true) {
        Ok(hex) if color.alpha() < 1.0 => hex,
        Ok(_) => color.hex_rgb(true).unwrap_or_default(),
        Err(_) => {
            let parts: Vec<String> = color.components().iter().map(|c| format!("{c:.3}")).collect();
            format!("{}({})", color.colorspace(), parts.join(", "))
        }
    };
    let name = if color.name().is_empty() { "-" } else { color.name() };
    format!("{value:<10} {:<5} {:<7} {name}", color.colorspace().as_str(), color.color_type().as_str())
}
