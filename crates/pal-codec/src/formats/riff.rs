//! Microsoft RIFF palette (.pal, .riff).
//!
//! ```text
//! "RIFF"  u32le size  "PAL "
//! chunk:  tag  u32le size  payload  [pad byte to even size]
//! "data": u16le version (0x0300)  u16le count  (r g b flags) x count
//! ```
//!
//! Chunks other than `data` are skipped. Colors are 8-bit RGB; flags and
//! alpha are not kept.

use crate::binary::{read_bytes, read_integer_le, read_tag, write_integer_le};
use crate::coder::Coder;
use pal_core::{Color, Error, Palette, Result};
use std::io::Cursor;
use tracing::trace;

const RIFF: &[u8; 4] = b"RIFF";
const FORM_PAL: &[u8; 4] = b"PAL ";
const DATA: &[u8; 4] = b"data";
const PAL_VERSION: u16 = 0x0300;

/// RIFF palette coder.
#[derive(Debug, Clone, Copy, Default)]
pub struct RiffCoder;

impl RiffCoder {
    /// Creates the coder.
    pub fn new() -> Self {
        Self
    }
}

impl Coder for RiffCoder {
    type Model = Palette;

    fn name(&self) -> &'static str {
        "Microsoft RIFF Palette"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["riff", "pal"]
    }

    fn can_decode(&self, header: &[u8]) -> bool {
        header.len() >= 12 && &header[..4] == RIFF && &header[8..12] == FORM_PAL
    }

    fn decode(&self, data: &[u8]) -> Result<Palette> {
        let mut cur = Cursor::new(data);
        if &read_tag(&mut cur)? != RIFF {
            return Err(Error::format("missing RIFF signature"));
        }
        let _riff_size: u32 = read_integer_le(&mut cur)?;
        if &read_tag(&mut cur)? != FORM_PAL {
            return Err(Error::format("RIFF form is not PAL"));
        }

        loop {
            let tag = read_tag(&mut cur)?;
            let size: u32 = read_integer_le(&mut cur)?;
            let payload = read_bytes(&mut cur, size as usize)?;
            trace!(tag = %String::from_utf8_lossy(&tag), size, "RIFF chunk");

            if &tag == DATA {
                return Ok(Palette::new("", read_data_chunk(&payload)?));
            }
            if size % 2 == 1 {
                // a missing pad byte at the very end is harmless
                let _ = read_bytes(&mut cur, 1);
            }
        }
    }

    fn encode(&self, palette: &Palette) -> Result<Vec<u8>> {
        let colors = palette.all_colors();
        let count = u16::try_from(colors.len()).map_err(|_| Error::TooManyEntries {
            count: colors.len(),
            max: u16::MAX as usize,
        })?;

        let data_size = 4 + 4 * colors.len() as u32;
        let mut out = Vec::with_capacity(20 + data_size as usize + 1);
        out.extend_from_slice(RIFF);
        // form tag + chunk header + payload (+ pad, never needed: payload is a multiple of 4)
        write_integer_le(&mut out, 4 + 8 + data_size)?;
        out.extend_from_slice(FORM_PAL);
        out.extend_from_slice(DATA);
        write_integer_le(&mut out, data_size)?;
        write_integer_le(&mut out, PAL_VERSION)?;
        write_integer_le(&mut out, count)?;
        for color in &colors {
            let [r, g, b, _] = color.to_rgba8()?;
            out.extend_from_slice(&[r, g, b, 0]);
        }
        Ok(out)
    }
}

fn read_data_chunk(payload: &[u8]) -> Result<Vec<Color>> {
    let mut cur = Cursor::new(payload);
    let version: u16 = read_integer_le(&mut cur)?;
    if version != PAL_VERSION {
        return Err(Error::InvalidVersion(format!("RIFF palette version 0x{version:04X}")));
    }
    let count: u16 = read_integer_le(&mut cur)?;
    let entries = read_bytes(&mut cur, count as usize * 4)?;
    Ok(entries
        .chunks_exact(4)
        .map(|e| Color::rgb255(e[0], e[1], e[2]))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip() {
        let palette = Palette::new(
            "",
            vec![Color::rgb255(0, 0, 0), Color::rgb255(157, 157, 157), Color::rgb255(49, 162, 242)],
        );
        let data = RiffCoder.encode(&palette).unwrap();
        assert!(RiffCoder.can_decode(&data));
        assert_eq!(&data[..4], b"RIFF");
        assert_eq!(u32::from_le_bytes([data[4], data[5], data[6], data[7]]) as usize, data.len() - 8);

        let decoded = RiffCoder.decode(&data).unwrap();
        assert_eq!(decoded, palette);
    }

    #[test]
    fn test_skips_unknown_chunks() {
        let mut data = Vec::new();
        data.extend_from_slice(b"RIFF\x00\x00\x00\x00PAL ");
        // odd-sized chunk with pad byte
        data.extend_from_slice(b"note\x03\x00\x00\x00abc\x00");
        data.extend_from_slice(b"data\x08\x00\x00\x00\x00\x03\x01\x00\xff\x00\x00\x00");
        let palette = RiffCoder.decode(&data).unwrap();
        assert_eq!(palette.colors, vec![Color::rgb255(255, 0, 0)]);
    }

    #[test]
    fn test_errors() {
        assert!(matches!(RiffCoder.decode(b"RIFX\x00\x00\x00\x00PAL "), Err(Error::InvalidFormat(_))));
        assert!(matches!(RiffCoder.decode(b"RIFF\x00\x00\x00\x00WAVE"), Err(Error::InvalidFormat(_))));
        // no data chunk
        assert!(matches!(RiffCoder.decode(b"RIFF\x00\x00\x00\x00PAL "), Err(Error::EndOfStream)));
        let bad_version = b"RIFF\x00\x00\x00\x00PAL data\x04\x00\x00\x00\x00\x01\x00\x00";
        assert!(matches!(RiffCoder.decode(bad_version), Err(Error::InvalidVersion(_))));
    }

    #[test]
    fn test_too_many_colors() {
        let palette = Palette::new("", vec![Color::gray(0.0); 65536]);
        assert!(matches!(
            RiffCoder.encode(&palette),
            Err(Error::TooManyEntries { count: 65536, max: 65535 })
        ));
    }
}
