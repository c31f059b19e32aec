//! Palette conversion command.
//!
//! Reads a palette with one coder and writes it with another, optionally
//! converting every color to a single colorspace first.

use crate::ConvertArgs;
use anyhow::{Context, Result};
use tracing::{debug, info, trace};

/// Runs the convert command.
pub fn run(args: ConvertArgs, verbose: u8) -> Result<()> {
    trace!(input = %args.input.display(), output = %args.output.display(), "convert::run");

    let mut palette = super::load_palette(&args.input, args.from.as_deref(), false)?;

    if let Some(target) = args.colorspace {
        debug!(to = %target, colors = palette.color_count(), "Converting colorspace");
        palette = palette
            .converted(target)
            .with_context(|| format!("Cannot convert {} to {target}", args.input.display()))?;
    }

    super::save_palette(&args.output, &palette, args.to.as_deref())?;

    info!(
        input = %args.input.display(),
        output = %args.output.display(),
        colors = palette.color_count(),
        "Converted palette"
    );
    if verbose > 0 {
        println!(
            "Converted {} -> {} ({} colors)",
            args.input.display(),
            args.output.display(),
            palette.color_count()
        );
    }
    Ok(())
}
