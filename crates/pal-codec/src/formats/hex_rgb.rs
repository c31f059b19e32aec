//! Plain hex color lists (.rgb, .rgba).
//!
//! One color per line, an optional name after the hex value:
//!
//! ```text
//! #ff0000 red
//! #00ff0080
//! ```
//!
//! Both variants read 3, 4, 6 or 8 digit values; they differ in what they
//! write. `//` and `;` lines are comments.

use crate::coder::{decode_utf8, header_text, Coder};
use pal_core::{Color, Error, Palette, Result};
use std::io::Write;

/// Hex list coder, with or without an alpha byte on output.
#[derive(Debug, Clone, Copy)]
pub struct HexListCoder {
    alpha: bool,
}

impl HexListCoder {
    /// Writes `#rrggbb`.
    pub fn rgb() -> Self {
        Self { alpha: false }
    }

    /// Writes `#rrggbbaa`.
    pub fn rgba() -> Self {
        Self { alpha: true }
    }
}

impl Coder for HexListCoder {
    type Model = Palette;

    fn name(&self) -> &'static str {
        if self.alpha { "RGBA Hex List" } else { "RGB Hex List" }
    }

    fn extensions(&self) -> &'static [&'static str] {
        if self.alpha { &["rgba"] } else { &["rgb"] }
    }

    fn can_decode(&self, header: &[u8]) -> bool {
        // RGBA never claims a header; RGB reads both
        if self.alpha {
            return false;
        }
        let text = header_text(header);
        let mut chars = text.chars();
        chars.next() == Some('#') && chars.next().is_some_and(|c| c.is_ascii_hexdigit())
    }

    fn decode(&self, data: &[u8]) -> Result<Palette> {
        let text = decode_utf8(data)?;
        let mut colors = Vec::new();
        for (lineno, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with("//") || line.starts_with(';') {
                continue;
            }
            let (hex, name) = match line.split_once(char::is_whitespace) {
                Some((hex, name)) => (hex, name.trim()),
                None => (line, ""),
            };
            let color = Color::from_hex(hex)
                .map_err(|e| Error::format(format!("line {}: {e}", lineno + 1)))?;
            colors.push(color.with_name(name));
        }
        Ok(Palette::new("", colors))
    }

    fn encode(&self, palette: &Palette) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        for color in palette.all_colors() {
            let hex = if self.alpha { color.hex_rgba(true)? } else { color.hex_rgb(true)? };
            if color.name().is_empty() {
                writeln!(out, "{hex}")?;
            } else {
                writeln!(out, "{hex} {}", color.name())?;
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode() {
        let data = b"// swatches\n#ff0000 bright red\n\n  #00ff0080\n#fff\n";
        let palette = HexListCoder::rgba().decode(data).unwrap();
        assert_eq!(palette.colors.len(), 3);
        assert_eq!(palette.colors[0].name(), "bright red");
        assert_eq!(palette.colors[1].to_rgba8().unwrap(), [0, 255, 0, 128]);
        assert_eq!(palette.colors[2].hex_rgb(true).unwrap(), "#ffffff");
    }

    #[test]
    fn test_bad_row() {
        let err = HexListCoder::rgb().decode(b"#ff0000\n#ff00g0\n").unwrap_err();
        assert!(matches!(err, Error::InvalidFormat(ref m) if m.starts_with("line 2")));
    }

    #[test]
    fn test_encode_variants() {
        let palette = Palette::new("", vec![Color::rgba255(255, 0, 0, 128).with_name("red")]);
        let rgb = HexListCoder::rgb().encode(&palette).unwrap();
        assert_eq!(rgb, b"#ff0000 red\n");
        let rgba = HexListCoder::rgba().encode(&palette).unwrap();
        assert_eq!(rgba, b"#ff000080 red\n");
        assert_eq!(HexListCoder::rgba().decode(&rgba).unwrap(), palette);
    }

    #[test]
    fn test_can_decode() {
        assert!(HexListCoder::rgb().can_decode(b"#a0b0c0"));
        assert!(!HexListCoder::rgb().can_decode(b"# comment"));
        assert!(!HexListCoder::rgba().can_decode(b"#a0b0c0"));
    }
}
