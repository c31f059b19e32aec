//! Gradient command.
//!
//! Loads a gradient file, or spreads a palette evenly into a gradient, then
//! prints its stops, samples it and optionally writes it out.

use crate::GradientArgs;
use anyhow::{Context, Result};
use pal_codec::GradientRegistry;
use pal_core::{Gradient, Gradients};
use std::path::Path;
use tracing::{debug, trace};

/// Runs the gradient command.
pub fn run(args: GradientArgs, verbose: u8) -> Result<()> {
    trace!(input = %args.input.display(), "gradient::run");

    let mut gradients = load(&args.input, args.from.as_deref())?;

    if args.merge_alpha {
        let merged = gradients
            .gradients
            .iter()
            .map(Gradient::merge_transparency_stops)
            .collect::<pal_core::Result<Vec<_>>>()
            .context("Failed to merge transparency stops")?;
        gradients = Gradients::new(merged);
    }

    for (index, gradient) in gradients.gradients.iter().enumerate() {
        print_gradient(index, gradient, verbose > 0);
        if let Some(count) = args.samples {
            print_samples(gradient, count)?;
        }
    }

    if let Some(output) = &args.output {
        super::save_gradients(output, &gradients)?;
        if verbose > 0 {
            println!("Wrote {} gradient(s) to {}", gradients.len(), output.display());
        }
    }
    Ok(())
}

/// Gradient files go through the gradient registry, anything else is read as a palette.
fn load(path: &Path, from: Option<&str>) -> Result<Gradients> {
    let registry = GradientRegistry::global();
    let is_gradient = match from {
        Some(ext) => registry.coder_for_extension(ext).is_some(),
        None => registry.coder_for_path(path).is_some(),
    };

    if is_gradient {
        return registry
            .load(path, from)
            .with_context(|| format!("Failed to load: {}", path.display()));
    }

    let palette = super::load_palette(path, from, false)?;
    debug!(colors = palette.color_count(), "Spreading palette into a gradient");
    Ok(Gradients::from(Gradient::from_palette(&palette)))
}

fn print_gradient(index: usize, gradient: &Gradient, show_stops: bool) {
    let name = gradient.name.as_deref().unwrap_or("(unnamed)");
    print!("#{index} {name}: {} stops", gradient.stops.len());
    match &gradient.transparency_stops {
        Some(ts) => println!(", {} transparency stops", ts.len()),
        None => println!(),
    }
    if show_stops {
        for stop in &gradient.sorted().stops {
            println!("  {:>8.4}  {}", stop.position, super::describe_color(&stop.color));
        }
    }
}

fn print_samples(gradient: &Gradient, count: usize) -> Result<()> {
    for i in 0..count {
        let t = if count > 1 { i as f64 / (count - 1) as f64 } else { 0.0 };
        let color = gradient
            .color_at(t)
            .with_context(|| format!("Cannot sample gradient at {t:.4}"))?;
        let alpha = color.alpha() as f64 * gradient.alpha_at(t)?;
        let color = color.with_alpha(alpha as f32);
        println!("  {t:>8.4}  {}", super::describe_color(&color));
    }
    Ok(())
}
