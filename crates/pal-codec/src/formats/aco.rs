//! Adobe Color Swatch (.aco) format.
//!
//! Two consecutive big-endian sections with the same colors: version 1
//! without names, then an optional version 2 that adds a name per color.
//!
//! ```text
//! u16 version  u16 count
//! entry: u16 space  u16 w  u16 x  u16 y  u16 z  [v2: u32 length  UTF-16BE name]
//! ```
//!
//! | id | space | values                                  |
//! |----|-------|-----------------------------------------|
//! | 0  | RGB   | `/ 65535`                               |
//! | 1  | HSB   | unsupported                             |
//! | 2  | CMYK  | `(65535 - raw) / 65535`, 0 is full ink  |
//! | 7  | LAB   | unsupported                             |
//! | 8  | Gray  | `/ 10000`                               |

use crate::binary::{read_integer_be, read_unicode_string, write_integer_be, write_unicode_string};
use crate::coder::Coder;
use pal_core::{quantize_u16, Color, ColorSpace, Error, Palette, Result};
use std::io::Cursor;
use tracing::debug;

const SPACE_RGB: u16 = 0;
const SPACE_HSB: u16 = 1;
const SPACE_CMYK: u16 = 2;
const SPACE_LAB: u16 = 7;
const SPACE_GRAY: u16 = 8;

const GRAY_MAX: u16 = 10000;

/// Adobe Color Swatch coder.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcoCoder;

impl AcoCoder {
    /// Creates the coder.
    pub fn new() -> Self {
        Self
    }
}

impl Coder for AcoCoder {
    type Model = Palette;

    fn name(&self) -> &'static str {
        "Adobe Color Swatch"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["aco"]
    }

    fn can_decode(&self, header: &[u8]) -> bool {
        header.len() >= 4 && header[0] == 0 && (header[1] == 1 || header[1] == 2)
    }

    fn decode(&self, data: &[u8]) -> Result<Palette> {
        let mut cur = Cursor::new(data);

        let version: u16 = read_integer_be(&mut cur)?;
        let colors = match version {
            1 => {
                let v1 = read_section(&mut cur, false)?;
                // optional version 2 section
                match read_integer_be::<u16, _>(&mut cur) {
                    Err(Error::EndOfStream) => {
                        debug!(colors = v1.len(), "ACO version 1 only");
                        v1
                    }
                    Err(e) => return Err(e),
                    Ok(2) => read_section(&mut cur, true)?,
                    Ok(other) => {
                        debug!(version = other, "unexpected data after ACO version 1 section");
                        v1
                    }
                }
            }
            2 => read_section(&mut cur, true)?,
            other => return Err(Error::InvalidVersion(format!("ACO version {other}"))),
        };
        Ok(Palette::new("", colors))
    }

    fn encode(&self, palette: &Palette) -> Result<Vec<u8>> {
        let colors = palette.all_colors();
        let count = u16::try_from(colors.len()).map_err(|_| Error::TooManyEntries {
            count: colors.len(),
            max: u16::MAX as usize,
        })?;
        let entries = colors.iter().map(entry_values).collect::<Result<Vec<_>>>()?;

        let mut out = Vec::with_capacity(4 + colors.len() * 40);
        for version in [1u16, 2] {
            write_integer_be(&mut out, version)?;
            write_integer_be(&mut out, count)?;
            for (color, values) in colors.iter().zip(&entries) {
                for &v in values {
                    write_integer_be(&mut out, v)?;
                }
                if version == 2 {
                    write_unicode_string(&mut out, color.name())?;
                }
            }
        }
        Ok(out)
    }
}

fn read_section(cur: &mut Cursor<&[u8]>, named: bool) -> Result<Vec<Color>> {
    let count: u16 = read_integer_be(cur)?;
    let mut colors = Vec::with_capacity(count as usize);
    for _ in 0..count {
        let space: u16 = read_integer_be(cur)?;
        let mut raw = [0u16; 4];
        for v in raw.iter_mut() {
            *v = read_integer_be(cur)?;
        }
        let name = if named { read_unicode_string(cur)? } else { String::new() };
        colors.push(decode_entry(space, raw)?.with_name(name));
    }
    Ok(colors)
}

fn decode_entry(space: u16, [w, x, y, z]: [u16; 4]) -> Result<Color> {
    let unit = |v: u16| v as f32 / 65535.0;
    let ink = |v: u16| (65535 - v) as f32 / 65535.0;
    match space {
        SPACE_RGB => Ok(Color::rgb(unit(w), unit(x), unit(y))),
        SPACE_CMYK => Ok(Color::cmyk(ink(w), ink(x), ink(y), ink(z))),
        SPACE_GRAY => {
            if w > GRAY_MAX {
                return Err(Error::format(format!("ACO gray value {w} exceeds {GRAY_MAX}")));
            }
            Ok(Color::gray(w as f32 / GRAY_MAX as f32))
        }
        SPACE_HSB => Err(Error::UnsupportedColorSpace("HSB".into())),
        SPACE_LAB => Err(Error::UnsupportedColorSpace("LAB".into())),
        other => Err(Error::UnsupportedColorSpace(format!("ACO space id {other}"))),
    }
}

fn entry_values(color: &Color) -> Result<[u16; 5]> {
    let c = color.components();
    match color.colorspace() {
        ColorSpace::Rgb => Ok([
            SPACE_RGB,
            quantize_u16(c[0], u16::MAX),
            quantize_u16(c[1], u16::MAX),
            quantize_u16(c[2], u16::MAX),
            0,
        ]),
        ColorSpace::Cmyk => Ok([
            SPACE_CMYK,
            u16::MAX - quantize_u16(c[0], u16::MAX),
            u16::MAX - quantize_u16(c[1], u16::MAX),
            u16::MAX - quantize_u16(c[2], u16::MAX),
            u16::MAX - quantize_u16(c[3], u16::MAX),
        ]),
        ColorSpace::Gray => Ok([SPACE_GRAY, quantize_u16(c[0], GRAY_MAX), 0, 0, 0]),
        ColorSpace::Lab => Err(Error::UnsupportedColorSpace("LAB".into())),
    }
}
