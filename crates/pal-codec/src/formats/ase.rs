//! Adobe Swatch Exchange (.ase) format.
//!
//! Big-endian container of typed blocks. Groups are bracketed by start/end
//! blocks and may not nest; colors outside any group are global.
//!
//! # Layout
//!
//! ```text
//! "ASEF"  u16 major (1)  u16 minor (0)  u32 block count
//! block:  u16 type  u32 payload length  payload
//!   0x0001 color:        name  tag("RGB "|"CMYK"|"LAB "|"Gray")  f32 x N  u16 color type
//!   0xC001 group start:  name
//!   0xC002 group end:    (empty)
//! name:   u16 length (incl. null)  UTF-16BE  0x0000
//! ```
//!
//! The palette name is not stored.

use crate::binary::{
    read_bytes, read_f32_be, read_integer_be, read_pascal_unicode_string, read_tag,
    write_f32_be, write_integer_be, write_pascal_unicode_string,
};
use crate::coder::Coder;
use pal_core::{Color, ColorSpace, ColorType, Error, Group, Palette, Result};
use std::io::Cursor;
use tracing::trace;

const MAGIC: &[u8; 4] = b"ASEF";
const VERSION_MAJOR: u16 = 1;
const VERSION_MINOR: u16 = 0;

const BLOCK_COLOR: u16 = 0x0001;
const BLOCK_GROUP_START: u16 = 0xC001;
const BLOCK_GROUP_END: u16 = 0xC002;

/// Adobe Swatch Exchange coder.
#[derive(Debug, Clone, Copy, Default)]
pub struct AseCoder;

impl AseCoder {
    /// Creates the coder.
    pub fn new() -> Self {
        Self
    }
}

impl Coder for AseCoder {
    type Model = Palette;

    fn name(&self) -> &'static str {
        "Adobe Swatch Exchange"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["ase"]
    }

    fn can_decode(&self, header: &[u8]) -> bool {
        header.starts_with(MAGIC)
    }

    fn decode(&self, data: &[u8]) -> Result<Palette> {
        let mut cur = Cursor::new(data);

        if &read_tag(&mut cur)? != MAGIC {
            return Err(Error::format("missing ASEF signature"));
        }
        let major: u16 = read_integer_be(&mut cur)?;
        let minor: u16 = read_integer_be(&mut cur)?;
        if major != VERSION_MAJOR || minor != VERSION_MINOR {
            return Err(Error::InvalidVersion(format!("ASE {major}.{minor}")));
        }
        let block_count: u32 = read_integer_be(&mut cur)?;

        let mut palette = Palette::default();
        let mut open_group: Option<Group> = None;

        for index in 0..block_count {
            let block_type: u16 = read_integer_be(&mut cur)?;
            let len: u32 = read_integer_be(&mut cur)?;
            let payload = read_bytes(&mut cur, len as usize)?;
            let mut block = Cursor::new(payload.as_slice());
            trace!(index, block_type, len, "ASE block");

            match block_type {
                BLOCK_GROUP_START => {
                    if let Some(group) = &open_group {
                        return Err(Error::format(format!(
                            "group start inside group '{}'",
                            group.name
                        )));
                    }
                    let name = read_pascal_unicode_string(&mut block)?;
                    open_group = Some(Group::new(name, Vec::new()));
                }
                BLOCK_GROUP_END => {
                    let group = open_group
                        .take()
                        .ok_or_else(|| Error::format("group end without group start"))?;
                    palette.groups.push(group);
                }
                BLOCK_COLOR => {
                    let color = read_color(&mut block)?;
                    match open_group.as_mut() {
                        Some(group) => group.colors.push(color),
                        None => palette.colors.push(color),
                    }
                }
                other => {
                    return Err(Error::format(format!("unknown block type 0x{other:04X}")));
                }
            }
        }

        if let Some(group) = open_group {
            return Err(Error::format(format!("group '{}' is never closed", group.name)));
        }
        Ok(palette)
    }

    fn encode(&self, palette: &Palette) -> Result<Vec<u8>> {
        let block_count = palette.colors.len()
            + palette.groups.iter().map(|g| g.colors.len() + 2).sum::<usize>();
        let block_count = u32::try_from(block_count).map_err(|_| Error::TooManyEntries {
            count: block_count,
            max: u32::MAX as usize,
        })?;

        let mut out = Vec::with_capacity(1024);
        out.extend_from_slice(MAGIC);
        write_integer_be(&mut out, VERSION_MAJOR)?;
        write_integer_be(&mut out, VERSION_MINOR)?;
        write_integer_be(&mut out, block_count)?;

        for color in &palette.colors {
            write_block(&mut out, BLOCK_COLOR, &color_payload(color)?)?;
        }
        for group in &palette.groups {
            let mut name = Vec::new();
            write_pascal_unicode_string(&mut name, &group.name)?;
            write_block(&mut out, BLOCK_GROUP_START, &name)?;
            for color in &group.colors {
                write_block(&mut out, BLOCK_COLOR, &color_payload(color)?)?;
            }
            write_block(&mut out, BLOCK_GROUP_END, &[])?;
        }
        Ok(out)
    }
}

fn model_tag(colorspace: ColorSpace) -> &'static [u8; 4] {
    match colorspace {
        ColorSpace::Rgb => b"RGB ",
        ColorSpace::Cmyk => b"CMYK",
        ColorSpace::Lab => b"LAB ",
        ColorSpace::Gray => b"Gray",
    }
}

fn colorspace_for_tag(tag: &[u8; 4]) -> Result<ColorSpace> {
    match tag {
        b"RGB " => Ok(ColorSpace::Rgb),
        b"CMYK" => Ok(ColorSpace::Cmyk),
        b"LAB " => Ok(ColorSpace::Lab),
        b"Gray" => Ok(ColorSpace::Gray),
        other => Err(Error::UnsupportedColorSpace(
            String::from_utf8_lossy(other).trim_end().to_string(),
        )),
    }
}

fn color_type_code(color_type: ColorType) -> u16 {
    match color_type {
        ColorType::Global => 0,
        ColorType::Spot => 1,
        ColorType::Normal => 2,
    }
}

fn read_color(block: &mut Cursor<&[u8]>) -> Result<Color> {
    let name = read_pascal_unicode_string(block)?;
    let colorspace = colorspace_for_tag(&read_tag(block)?)?;
    let components = (0..colorspace.component_count())
        .map(|_| read_f32_be(block))
        .collect::<Result<Vec<_>>>()?;
    let color_type = match read_integer_be::<u16, _>(block)? {
        0 => ColorType::Global,
        1 => ColorType::Spot,
        2 => ColorType::Normal,
        other => return Err(Error::format(format!("unknown color type {other}"))),
    };
    Ok(Color::new(name, colorspace, components)?.with_color_type(color_type))
}

fn color_payload(color: &Color) -> Result<Vec<u8>> {
    let mut payload = Vec::new();
    write_pascal_unicode_string(&mut payload, color.name())?;
    payload.extend_from_slice(model_tag(color.colorspace()));
    for &v in color.components() {
        write_f32_be(&mut payload, v)?;
    }
    write_integer_be(&mut payload, color_type_code(color.color_type()))?;
    Ok(payload)
}

fn write_block(out: &mut Vec<u8>, block_type: u16, payload: &[u8]) -> Result<()> {
    let len = u32::try_from(payload.len())
        .map_err(|_| Error::format("ASE block payload exceeds u32 length"))?;
    write_integer_be(out, block_type)?;
    write_integer_be(out, len)?;
    out.extend_from_slice(payload);
    Ok(())
}
