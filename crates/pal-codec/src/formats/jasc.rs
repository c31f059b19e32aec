//! JASC Paint Shop Pro palette (.pal, .psppalette).
//!
//! ```text
//! JASC-PAL
//! 0100
//! 3
//! 255 0 0
//! 0 255 0
//! 0 0 255
//! ```
//!
//! Rows that do not match `R G B` are ignored. A declared count that
//! disagrees with the rows found is logged, or rejected in strict mode.

use crate::coder::{decode_utf8, header_text, Coder};
use lazy_static::lazy_static;
use pal_core::{Color, Error, Palette, Result};
use regex::Regex;
use std::io::Write;
use tracing::{debug, warn};

const SIGNATURE: &str = "JASC-PAL";
const VERSION: &str = "0100";

lazy_static! {
    static ref ROW: Regex = Regex::new(r"^\s*(\d+)\s+(\d+)\s+(\d+)\s*$").unwrap();
}

/// Outcome of a JASC decode, including the header count check.
#[derive(Debug, Clone, PartialEq)]
pub struct JascDecodeReport {
    /// Decoded palette.
    pub palette: Palette,
    /// Count from the header.
    pub declared_count: usize,
}

impl JascDecodeReport {
    /// True when the header count differs from the colors decoded.
    pub fn count_mismatch(&self) -> bool {
        self.declared_count != self.palette.colors.len()
    }
}

/// JASC palette coder.
///
/// # Example
///
/// ```rust
/// use pal_codec::formats::PaintShopProCoder;
///
/// let data = b"JASC-PAL\n0100\n5\n255 0 0\n0 255 0\n0 0 255\n";
/// let report = PaintShopProCoder::new().decode_detailed(data).unwrap();
/// assert_eq!(report.palette.colors.len(), 3);
/// assert!(report.count_mismatch());
///
/// assert!(PaintShopProCoder::new().with_strict(true).decode_detailed(data).is_err());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct PaintShopProCoder {
    strict: bool,
}

impl PaintShopProCoder {
    /// Lenient coder: count mismatches are only logged.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail on a count mismatch instead of logging it.
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Whether count mismatches are errors.
    pub fn is_strict(&self) -> bool {
        self.strict
    }

    /// Decodes and reports the header count check.
    pub fn decode_detailed(&self, data: &[u8]) -> Result<JascDecodeReport> {
        let text = decode_utf8(data)?;
        let lines: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();
        if lines.len() <= 2 {
            return Err(Error::format("JASC palette header is incomplete"));
        }
        if !lines[0].contains(SIGNATURE) {
            return Err(Error::format("missing JASC-PAL signature"));
        }
        if lines[1].trim() != VERSION {
            return Err(Error::InvalidVersion(format!("JASC {}", lines[1].trim())));
        }
        let declared_count: usize = lines[2]
            .trim()
            .parse()
            .map_err(|_| Error::format(format!("invalid JASC color count {:?}", lines[2])))?;

        let mut colors = Vec::with_capacity(declared_count.min(1024));
        for line in &lines[3..] {
            match parse_row(line) {
                Some([r, g, b]) => colors.push(Color::rgb255(r, g, b)),
                None => debug!(row = line, "skipping unmatched JASC row"),
            }
        }

        let report = JascDecodeReport {
            palette: Palette::new("", colors),
            declared_count,
        };
        if report.count_mismatch() {
            let found = report.palette.colors.len();
            if self.strict {
                return Err(Error::format(format!(
                    "JASC header declares {declared_count} colors, found {found}"
                )));
            }
            warn!(declared = declared_count, found, "JASC color count mismatch");
        }
        Ok(report)
    }
}

fn parse_row(line: &str) -> Option<[u8; 3]> {
    let caps = ROW.captures(line)?;
    let channel = |i: usize| -> Option<u8> {
        let v: u64 = caps.get(i)?.as_str().parse().ok()?;
        Some(v.min(255) as u8)
    };
    Some([channel(1)?, channel(2)?, channel(3)?])
}

impl Coder for PaintShopProCoder {
    type Model = Palette;

    fn name(&self) -> &'static str {
        "JASC Paint Shop Pro Palette"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["psppalette", "pal"]
    }

    fn can_decode(&self, header: &[u8]) -> bool {
        header_text(header).starts_with(SIGNATURE)
    }

    fn decode(&self, data: &[u8]) -> Result<Palette> {
        Ok(self.decode_detailed(data)?.palette)
    }

    fn encode(&self, palette: &Palette) -> Result<Vec<u8>> {
        let colors = palette.all_colors();
        let mut out = Vec::new();
        write!(out, "{SIGNATURE}\r\n{VERSION}\r\n{}\r\n", colors.len())?;
        for color in &colors {
            let [r, g, b, _] = color.to_rgba8()?;
            write!(out, "{r} {g} {b}\r\n")?;
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pal_core::Group;

    #[test]
    fn test_decode() {
        let data = b"JASC-PAL\n0100\n3\n255 0 0\n0 255 0\n0 0 255\n";
        let report = PaintShopProCoder::new().decode_detailed(data).unwrap();
        assert!(!report.count_mismatch());
        let colors = &report.palette.colors;
        assert_eq!(colors.len(), 3);
        assert_eq!(colors[0].to_rgba8().unwrap(), [255, 0, 0, 255]);
        assert_eq!(colors[2].to_rgba8().unwrap(), [0, 0, 255, 255]);
    }

    #[test]
    fn test_count_mismatch_is_lenient() {
        let data = b"JASC-PAL\r\n0100\r\n5\r\n1 2 3\r\n4 5 6\r\n7 8 9\r\n";
        let report = PaintShopProCoder::new().decode_detailed(data).unwrap();
        assert_eq!(report.palette.colors.len(), 3);
        assert_eq!(report.declared_count, 5);
        assert!(report.count_mismatch());

        let strict = PaintShopProCoder::new().with_strict(true);
        assert!(strict.is_strict());
        assert!(matches!(strict.decode(data), Err(Error::InvalidFormat(_))));
    }

    #[test]
    fn test_row_pattern() {
        let data = b"JASC-PAL\n0100\n4\n  10\t20  30  \n1 2\n300 0 0\nred 0 0\n";
        let palette = PaintShopProCoder::new().decode(data).unwrap();
        assert_eq!(palette.colors.len(), 2);
        assert_eq!(palette.colors[0].to_rgba8().unwrap(), [10, 20, 30, 255]);
        // clamped
        assert_eq!(palette.colors[1].to_rgba8().unwrap(), [255, 0, 0, 255]);
    }

    #[test]
    fn test_header_errors() {
        let coder = PaintShopProCoder::new();
        assert!(matches!(coder.decode(b"JASC-PAL\n0100\n"), Err(Error::InvalidFormat(_))));
        assert!(matches!(coder.decode(b"GIMP\n0100\n1\n0 0 0\n"), Err(Error::InvalidFormat(_))));
        assert!(matches!(coder.decode(b"JASC-PAL\n0200\n1\n0 0 0\n"), Err(Error::InvalidVersion(_))));
        assert!(matches!(coder.decode(b"JASC-PAL\n0100\nmany\n0 0 0\n"), Err(Error::InvalidFormat(_))));
    }

    #[test]
    fn test_encode_flattens_groups() {
        let palette = Palette::new("", vec![Color::rgb255(1, 2, 3)])
            .with_group(Group::new("g", vec![Color::cmyk(0.0, 0.0, 0.0, 1.0)]));
        let data = PaintShopProCoder::new().encode(&palette).unwrap();
        assert_eq!(data, b"JASC-PAL\r\n0100\r\n2\r\n1 2 3\r\n0 0 0\r\n");
        assert!(PaintShopProCoder::new().can_decode(&data));
        assert_eq!(PaintShopProCoder::new().decode(&data).unwrap().colors.len(), 2);
    }
}
