//! Format coders, one module per file format.
//!
//! | Format                 | Extensions             | Model       | Sniffed |
//! |------------------------|------------------------|-------------|---------|
//! | Adobe Swatch Exchange  | `ase`                  | `Palette`   | yes     |
//! | Adobe Color Swatch     | `aco`                  | `Palette`   | yes     |
//! | Paint.NET              | `txt`                  | `Palette`   | yes     |
//! | RGB / RGBA hex lists   | `rgb`, `rgba`          | `Palette`   | rgb     |
//! | JASC Paint Shop Pro    | `psppalette`, `pal`    | `Palette`   | yes     |
//! | GIMP palette           | `gpl`                  | `Palette`   | yes     |
//! | Corel XML              | `xml`                  | `Palette`   | yes     |
//! | Basic XML              | `xml`                  | `Palette`   | yes     |
//! | Microsoft RIFF         | `riff`, `pal`          | `Palette`   | yes     |
//! | JSON palette           | `jsoncolorpalette`     | `Palette`   | yes     |
//! | JSON gradient          | `jsongradient`         | `Gradients` | yes     |
//! | GIMP gradient          | `ggr`                  | `Gradients` | yes     |

mod aco;
mod ase;
mod basic_xml;
mod corel_xml;
mod ggr;
mod gimp;
mod hex_rgb;
mod jasc;
mod json;
mod paint_net;
mod riff;
mod xml;

pub use aco::AcoCoder;
pub use ase::AseCoder;
pub use basic_xml::BasicXmlCoder;
pub use corel_xml::{CorelDecodeReport, CorelXmlCoder};
pub use ggr::GgrCoder;
pub use gimp::GimpCoder;
pub use hex_rgb::HexListCoder;
pub use jasc::{JascDecodeReport, PaintShopProCoder};
pub use json::{JsonGradientCoder, JsonPaletteCoder};
pub use paint_net::PaintNetCoder;
pub use riff::RiffCoder;
