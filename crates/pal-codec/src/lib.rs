//! # pal-codec
//!
//! Palette and gradient file formats.
//!
//! Every format is a [`Coder`](coder::Coder) that decodes bytes into a
//! [`Palette`] or [`Gradients`] and encodes them back. Coders are collected
//! in two ordered registries, one per model, that resolve a coder from a
//! file extension or from the first bytes of a file.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use pal_codec::{load_palette, save_palette};
//!
//! // Coder picked by extension
//! let palette = load_palette("swatches.ase")?;
//!
//! // Write the same colors as a GIMP palette
//! save_palette(&palette, "swatches.gpl")?;
//! ```
//!
//! # Format-Specific Usage
//!
//! ```rust
//! use pal_codec::coder::Coder;
//! use pal_codec::formats::PaintShopProCoder;
//!
//! let data = b"JASC-PAL\r\n0100\r\n5\r\n255 0 0\r\n0 255 0\r\n0 0 255\r\n";
//! let report = PaintShopProCoder::new().decode_detailed(data).unwrap();
//! assert!(report.count_mismatch());
//! assert_eq!(report.palette.colors.len(), 3);
//!
//! // Strict mode turns the mismatch into an error
//! assert!(PaintShopProCoder::new().with_strict(true).decode(data).is_err());
//! ```
//!
//! See [`formats`] for the full list of formats and extensions.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod binary;
pub mod coder;
pub mod formats;
pub mod registry;

pub use coder::{Coder, GradientCoder, PaletteCoder};
pub use registry::{GradientRegistry, PaletteRegistry, Registry};

use pal_core::{Gradients, Palette, Result};
use std::path::Path;

/// Loads a palette, choosing the coder by file extension.
///
/// # Errors
///
/// [`pal_core::Error::UnsupportedCoderType`] if no palette coder claims the
/// extension, otherwise whatever the coder reports.
pub fn load_palette<P: AsRef<Path>>(path: P) -> Result<Palette> {
    PaletteRegistry::global().load(path.as_ref(), None)
}

/// Loads a palette with the coder for `ext`, ignoring the file's extension.
///
/// This is how ambiguous `.txt` files are retried under another coder.
pub fn load_palette_as<P: AsRef<Path>>(path: P, ext: &str) -> Result<Palette> {
    PaletteRegistry::global().load(path.as_ref(), Some(ext))
}

/// Writes a palette, choosing the coder by file extension.
pub fn save_palette<P: AsRef<Path>>(palette: &Palette, path: P) -> Result<()> {
    PaletteRegistry::global().save(palette, path.as_ref(), None)
}

/// Loads gradients, choosing the coder by file extension.
pub fn load_gradients<P: AsRef<Path>>(path: P) -> Result<Gradients> {
    GradientRegistry::global().load(path.as_ref(), None)
}

/// Writes gradients, choosing the coder by file extension.
pub fn save_gradients<P: AsRef<Path>>(gradients: &Gradients, path: P) -> Result<()> {
    GradientRegistry::global().save(gradients, path.as_ref(), None)
}
