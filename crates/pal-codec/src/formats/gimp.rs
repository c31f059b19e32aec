//! GIMP palette (.gpl).
//!
//! ```text
//! GIMP Palette
//! Name: Sunset
//! Columns: 4
//! #
//! 255 136   0	orange
//!  64   0 128	violet
//! ```

use crate::coder::{decode_utf8, header_text, Coder};
use lazy_static::lazy_static;
use pal_core::{Color, Error, Gradient, Palette, Result};
use regex::Regex;
use std::io::Write;
use tracing::trace;

const SIGNATURE: &str = "GIMP Palette";

lazy_static! {
    static ref ROW: Regex = Regex::new(r"^\s*(\d+)\s+(\d+)\s+(\d+)\s*(.*)$").unwrap();
}

/// GIMP palette coder.
#[derive(Debug, Clone, Copy, Default)]
pub struct GimpCoder {
    columns: Option<usize>,
}

impl GimpCoder {
    /// Creates the coder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes a `Columns:` hint for GIMP's palette view.
    pub fn with_columns(mut self, columns: usize) -> Self {
        self.columns = Some(columns);
        self
    }

    /// Decodes a palette as a gradient with one evenly spaced stop per color.
    pub fn decode_gradient(&self, data: &[u8]) -> Result<Gradient> {
        Ok(Gradient::from_palette(&self.decode(data)?))
    }
}

impl Coder for GimpCoder {
    type Model = Palette;

    fn name(&self) -> &'static str {
        "GIMP Palette"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["gpl"]
    }

    fn can_decode(&self, header: &[u8]) -> bool {
        header_text(header).starts_with(SIGNATURE)
    }

    fn decode(&self, data: &[u8]) -> Result<Palette> {
        let text = decode_utf8(data)?;
        let mut lines = text.lines().enumerate().filter(|(_, l)| !l.trim().is_empty());

        match lines.next() {
            Some((_, first)) if first.trim().starts_with(SIGNATURE) => {}
            _ => return Err(Error::format("missing 'GIMP Palette' signature")),
        }

        let mut palette = Palette::default();
        for (lineno, line) in lines {
            let line = line.trim();
            if let Some(name) = line.strip_prefix("Name:") {
                palette.name = name.trim().to_string();
            } else if let Some(columns) = line.strip_prefix("Columns:") {
                trace!(columns = columns.trim(), "ignoring GIMP column hint");
            } else if line.starts_with('#') {
                continue;
            } else {
                let caps = ROW.captures(line).ok_or_else(|| {
                    Error::format(format!("line {}: expected 'R G B [name]', got {line:?}", lineno + 1))
                })?;
                let channel = |i: usize| -> Result<u8> {
                    let v: u64 = caps[i]
                        .parse()
                        .map_err(|_| Error::format(format!("line {}: channel out of range", lineno + 1)))?;
                    Ok(v.min(255) as u8)
                };
                let color = Color::rgb255(channel(1)?, channel(2)?, channel(3)?);
                palette.colors.push(color.with_name(caps[4].trim()));
            }
        }
        Ok(palette)
    }

    fn encode(&self, palette: &Palette) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        writeln!(out, "{SIGNATURE}\nName: {}", palette.name)?;
        if let Some(columns) = self.columns {
            writeln!(out, "Columns: {columns}")?;
        }
        writeln!(out, "#")?;
        for color in palette.all_colors() {
            let [r, g, b, _] = color.to_rgba8()?;
            if color.name().is_empty() {
                writeln!(out, "{r:3} {g:3} {b:3}")?;
            } else {
                writeln!(out, "{r:3} {g:3} {b:3}\t{}", color.name())?;
            }
        }
        Ok(out)
    }
}
