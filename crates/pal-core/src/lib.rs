//! # pal-core
//!
//! In-memory model for color palettes and gradients.
//!
//! Every format coder in `pal-codec` decodes into and encodes from these
//! types, so a swatch read from one format can be written to any other.
//!
//! # Types
//!
//! - [`Color`] - named color in RGB, CMYK, Gray or LAB, with alpha and type
//! - [`Palette`] / [`Group`] - global colors plus named, non-nested groups
//! - [`Gradient`] / [`Stop`] / [`TransparencyStop`] - color ramps
//! - [`Gradients`] - several gradients bundled in one file
//! - [`NamedColorList`] - flat form used by host color-list adapters
//!
//! # Usage
//!
//! ```rust
//! use pal_core::{Color, ColorSpace, Gradient, Palette};
//!
//! let palette = Palette::new("sunset", vec![
//!     Color::from_hex("#ff8800").unwrap().with_name("orange"),
//!     Color::rgb255(64, 0, 128).with_name("violet"),
//! ]);
//!
//! let cmyk = palette.converted(ColorSpace::Cmyk).unwrap();
//! assert_eq!(cmyk.colors[0].name(), "orange");
//!
//! let ramp = Gradient::from_palette(&palette);
//! assert_eq!(ramp.stops.len(), 2);
//! ```
//!
//! # Dependencies
//!
//! - [`thiserror`] - Error handling

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod color;
mod error;
mod gradient;
mod palette;
pub mod adapter;

pub use adapter::{ColorListAdapter, NamedColorList};
pub use color::{quantize_u8, quantize_u16, Color, ColorSpace, ColorType};
pub use error::{Error, ErrorKind, Result};
pub use gradient::{Gradient, Gradients, Stop, TransparencyStop};
pub use palette::{Group, Palette, GLOBAL_GROUP_NAME};
