//! Palette info command.
//!
//! Prints palette name, group layout and color counts, and optionally every color.

use crate::InfoArgs;
use anyhow::Result;
use pal_codec::PaletteRegistry;
use pal_core::Palette;
use std::path::Path;
use tracing::trace;

/// Runs the info command.
pub fn run(args: InfoArgs, verbose: u8) -> Result<()> {
    for path in &args.input {
        trace!(input = %path.display(), "info::run");
        let palette = super::load_palette(path, args.from.as_deref(), args.auto)?;
        let format = coder_name(path, args.from.as_deref(), args.auto);
        print_text(path, &palette, format, args.colors || verbose > 0);

        if args.input.len() > 1 {
            println!();
        }
    }
    Ok(())
}

/// Name of the coder that decoded `path`, resolved the same way the load was.
fn coder_name(path: &Path, from: Option<&str>, auto: bool) -> &'static str {
    let registry = PaletteRegistry::global();
    let detected = if auto {
        std::fs::read(path).ok().and_then(|data| registry.detect(&data).map(|c| c.name()))
    } else {
        None
    };
    let by_extension = match from {
        Some(ext) => registry.coder_for_extension(ext),
        None => registry.coder_for_path(path),
    };
    detected
        .or_else(|| by_extension.map(|c| c.name()))
        .unwrap_or("unknown")
}

fn print_text(path: &Path, palette: &Palette, format: &str, show_colors: bool) {
    println!("{}", path.display());
    println!("  Format:  {format}");
    if !palette.name.is_empty() {
        println!("  Name:    {}", palette.name);
    }
    println!("  Colors:  {}", palette.color_count());
    println!("  Groups:  {}", palette.groups.len());

    for group in palette.all_groups() {
        if group.colors.is_empty() && !show_colors {
            continue;
        }
        println!("  [{}] {} colors", group.name, group.colors.len());
        if show_colors {
            for color in &group.colors {
                println!("    {}", super::describe_color(color));
            }
        }
    }
}
