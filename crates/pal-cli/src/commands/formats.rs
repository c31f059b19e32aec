//! Lists the registered palette and gradient coders.

use anyhow::Result;
use pal_codec::{GradientRegistry, PaletteRegistry};

/// Runs the formats command.
pub fn run() -> Result<()> {
    println!("Palette formats:");
    for coder in PaletteRegistry::global().coders() {
        println!("  {:<30} .{}", coder.name(), coder.extensions().join(", ."));
    }
    println!();
    println!("Gradient formats:");
    for coder in GradientRegistry::global().coders() {
        println!("  {:<30} .{}", coder.name(), coder.extensions().join(", ."));
    }
    Ok(())
}
