//! The coder trait shared by palette and gradient formats.

use pal_core::{Error, Gradients, Palette, Result};
use std::io::Read;
use std::path::Path;
use tracing::debug;

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// A stateless encoder/decoder for one file format.
///
/// Coders are registered once and shared across threads, so they hold only
/// configuration, never per-call state.
pub trait Coder: Send + Sync {
    /// What the format stores: [`Palette`] or [`Gradients`].
    type Model;

    /// Human-readable format name.
    fn name(&self) -> &'static str;

    /// Lowercase file extensions without dots.
    fn extensions(&self) -> &'static [&'static str];

    /// True if `header` (the first bytes of a file) looks like this format.
    fn can_decode(&self, _header: &[u8]) -> bool {
        false
    }

    /// Decodes a complete file.
    fn decode(&self, data: &[u8]) -> Result<Self::Model>;

    /// Encodes a model to file bytes.
    fn encode(&self, model: &Self::Model) -> Result<Vec<u8>>;

    /// Reads a stream to its end and decodes it.
    fn decode_reader(&self, reader: &mut dyn Read) -> Result<Self::Model> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        self.decode(&data)
    }

    /// Loads a file.
    fn load(&self, path: &Path) -> Result<Self::Model> {
        debug!(coder = self.name(), path = %path.display(), "decoding");
        let data = std::fs::read(path)?;
        self.decode(&data)
    }

    /// Encodes and writes a file.
    fn save(&self, model: &Self::Model, path: &Path) -> Result<()> {
        let data = self.encode(model)?;
        debug!(coder = self.name(), path = %path.display(), bytes = data.len(), "encoded");
        std::fs::write(path, data)?;
        Ok(())
    }
}

/// A coder for palette formats.
pub trait PaletteCoder: Coder<Model = Palette> {}
impl<T: Coder<Model = Palette>> PaletteCoder for T {}

/// A coder for gradient formats.
pub trait GradientCoder: Coder<Model = Gradients> {}
impl<T: Coder<Model = Gradients>> GradientCoder for T {}

/// Decodes UTF-8 text, dropping a leading byte-order mark.
pub(crate) fn decode_utf8(data: &[u8]) -> Result<&str> {
    let data = data.strip_prefix(UTF8_BOM).unwrap_or(data);
    std::str::from_utf8(data).map_err(|e| Error::InvalidString(e.to_string()))
}

/// Header text for sniffing, BOM and leading whitespace removed. Lossy.
pub(crate) fn header_text(header: &[u8]) -> String {
    let header = header.strip_prefix(UTF8_BOM).unwrap_or(header);
    String::from_utf8_lossy(header).trim_start().to_string()
}
