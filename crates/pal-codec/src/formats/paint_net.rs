//! Paint.NET palette (.txt).
//!
//! ```text
//! ; paint.net Palette File
//! ; Colors are written as 8-digit hexadecimal numbers: aarrggbb
//! FF000000
//! FF404040
//! ```

use crate::coder::{decode_utf8, header_text, Coder};
use pal_core::{Color, Error, Palette, Result};
use std::io::Write;
use tracing::debug;

/// Paint.NET hex list coder.
#[derive(Debug, Clone, Copy, Default)]
pub struct PaintNetCoder;

impl PaintNetCoder {
    /// Creates the coder.
    pub fn new() -> Self {
        Self
    }
}

impl Coder for PaintNetCoder {
    type Model = Palette;

    fn name(&self) -> &'static str {
        "Paint.NET Palette"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["txt"]
    }

    fn can_decode(&self, header: &[u8]) -> bool {
        header_text(header).to_ascii_lowercase().starts_with("; paint.net")
    }

    fn decode(&self, data: &[u8]) -> Result<Palette> {
        if data.len() <= 3 {
            return Err(Error::format("Paint.NET palette is too short"));
        }
        let text = decode_utf8(data)?;

        let mut colors = Vec::new();
        for (lineno, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with(';') {
                continue;
            }
            if line.chars().count() != 8 {
                return Err(Error::format(format!(
                    "line {}: expected 8 hex digits (aarrggbb), got {:?}",
                    lineno + 1,
                    line
                )));
            }
            match u32::from_str_radix(line, 16) {
                Ok(argb) => {
                    let [a, r, g, b] = argb.to_be_bytes();
                    colors.push(Color::rgba255(r, g, b, a));
                }
                Err(_) => debug!(line = lineno + 1, value = line, "skipping non-hex Paint.NET row"),
            }
        }
        Ok(Palette::new("", colors))
    }

    fn encode(&self, palette: &Palette) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        out.extend_from_slice(
            b"; paint.net Palette File\n\
              ; Lines that start with a semicolon are comments\n\
              ; Colors are written as 8-digit hexadecimal numbers: aarrggbb\n",
        );
        if !palette.name.is_empty() {
            writeln!(out, "; Palette: {}", palette.name)?;
        }
        for color in palette.all_colors() {
            let [r, g, b, a] = color.to_rgba8()?;
            writeln!(out, "{a:02X}{r:02X}{g:02X}{b:02X}")?;
        }
        Ok(out)
    }
}
