//! Coder registries for extension lookup, format detection and load/save.
//!
//! Palettes and gradients live in two disjoint registries. Each is an ordered
//! list of coders: when several coders claim an extension (`pal`, `xml`),
//! the one registered first wins. The built-in lists are created once per
//! process and never change afterwards.
//!
//! # Example
//!
//! ```ignore
//! use pal_codec::registry::PaletteRegistry;
//!
//! let registry = PaletteRegistry::global();
//!
//! // `.pal` resolves to JASC, the first coder that claims it
//! let coder = registry.coder_for_extension("PAL").unwrap();
//! println!("{}", coder.name());
//!
//! // Retry an ambiguous text file under another coder
//! let palette = registry.load("colors.txt".as_ref(), Some("rgb"))?;
//! ```

use crate::coder::Coder;
use crate::formats::{
    AcoCoder, AseCoder, BasicXmlCoder, CorelXmlCoder, GgrCoder, GimpCoder, HexListCoder,
    JsonGradientCoder, JsonPaletteCoder, PaintNetCoder, PaintShopProCoder, RiffCoder,
};
use pal_core::{Error, Gradients, Palette, Result};
use std::path::Path;
use std::sync::OnceLock;
use tracing::debug;

/// Bytes handed to [`Coder::can_decode`] during detection.
pub const SNIFF_LEN: usize = 512;

/// An ordered list of coders for one model type.
pub struct Registry<M> {
    coders: Vec<Box<dyn Coder<Model = M>>>,
}

/// Registry of palette coders.
pub type PaletteRegistry = Registry<Palette>;

/// Registry of gradient coders.
pub type GradientRegistry = Registry<Gradients>;

fn normalize_extension(ext: &str) -> String {
    ext.trim().trim_start_matches('.').to_ascii_lowercase()
}

fn path_extension(path: &Path) -> Option<&str> {
    path.extension().and_then(|e| e.to_str())
}

impl<M: 'static> Registry<M> {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self { coders: Vec::new() }
    }

    /// Appends a coder. Earlier coders take precedence on shared extensions.
    pub fn register(&mut self, coder: impl Coder<Model = M> + 'static) {
        self.coders.push(Box::new(coder));
    }

    /// Registered coders in precedence order.
    pub fn coders(&self) -> impl Iterator<Item = &dyn Coder<Model = M>> + '_ {
        self.coders.iter().map(|c| c.as_ref())
    }

    /// Every registered extension once, in precedence order.
    pub fn extensions(&self) -> Vec<&'static str> {
        let mut out: Vec<&'static str> = Vec::new();
        for ext in self.coders.iter().flat_map(|c| c.extensions()) {
            if !out.contains(ext) {
                out.push(ext);
            }
        }
        out
    }

    /// First coder declaring `ext`. Case-insensitive, a leading dot is ignored.
    pub fn coder_for_extension(&self, ext: &str) -> Option<&dyn Coder<Model = M>> {
        let ext = normalize_extension(ext);
        self.coders()
            .find(|c| c.extensions().iter().any(|e| *e == ext))
    }

    /// Coder for the extension of `path`.
    pub fn coder_for_path(&self, path: &Path) -> Option<&dyn Coder<Model = M>> {
        path_extension(path).and_then(|ext| self.coder_for_extension(ext))
    }

    /// Coder by its display name, case-insensitive.
    pub fn coder_named(&self, name: &str) -> Option<&dyn Coder<Model = M>> {
        self.coders().find(|c| c.name().eq_ignore_ascii_case(name))
    }

    /// First coder whose signature check accepts `header`.
    pub fn detect(&self, header: &[u8]) -> Option<&dyn Coder<Model = M>> {
        let header = &header[..header.len().min(SNIFF_LEN)];
        self.coders().find(|c| c.can_decode(header))
    }

    fn require_extension(&self, ext: &str) -> Result<&dyn Coder<Model = M>> {
        self.coder_for_extension(ext)
            .ok_or_else(|| Error::UnsupportedCoderType(normalize_extension(ext)))
    }

    fn require_path(&self, path: &Path, forced_ext: Option<&str>) -> Result<&dyn Coder<Model = M>> {
        match forced_ext.or_else(|| path_extension(path)) {
            Some(ext) => self.require_extension(ext),
            None => Err(Error::UnsupportedCoderType(format!(
                "{} has no extension",
                path.display()
            ))),
        }
    }

    /// Loads a file using `forced_ext` if given, else the file's own extension.
    pub fn load(&self, path: &Path, forced_ext: Option<&str>) -> Result<M> {
        self.require_path(path, forced_ext)?.load(path)
    }

    /// Decodes bytes with the coder for `ext`.
    pub fn load_data(&self, data: &[u8], ext: &str) -> Result<M> {
        self.require_extension(ext)?.decode(data)
    }

    /// Encodes a model with the coder for `ext`.
    pub fn data(&self, model: &M, ext: &str) -> Result<Vec<u8>> {
        self.require_extension(ext)?.encode(model)
    }

    /// Writes a model using `forced_ext` if given, else the path's extension.
    pub fn save(&self, model: &M, path: &Path, forced_ext: Option<&str>) -> Result<()> {
        self.require_path(path, forced_ext)?.save(model, path)
    }

    /// Loads a file by content signature, falling back to its extension.
    pub fn load_auto(&self, path: &Path) -> Result<M> {
        let data = std::fs::read(path)?;
        let coder = match self.detect(&data) {
            Some(coder) => {
                debug!(coder = coder.name(), path = %path.display(), "detected by signature");
                coder
            }
            None => self.require_path(path, None)?,
        };
        coder.decode(&data)
    }
}

impl<M: 'static> Default for Registry<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl PaletteRegistry {
    /// Process-wide registry with every built-in palette coder.
    pub fn global() -> &'static PaletteRegistry {
        static INSTANCE: OnceLock<PaletteRegistry> = OnceLock::new();
        INSTANCE.get_or_init(Self::with_builtin_coders)
    }

    /// A fresh registry holding the built-in palette coders.
    pub fn with_builtin_coders() -> Self {
        let mut registry = Self::new();
        registry.register(AseCoder::new());
        registry.register(AcoCoder::new());
        registry.register(PaintNetCoder::new());
        registry.register(HexListCoder::rgb());
        registry.register(HexListCoder::rgba());
        registry.register(PaintShopProCoder::new());
        registry.register(GimpCoder::new());
        registry.register(CorelXmlCoder::new());
        registry.register(BasicXmlCoder::new());
        registry.register(RiffCoder::new());
        registry.register(JsonPaletteCoder::new());
        registry
    }
}

impl GradientRegistry {
    /// Process-wide registry with every built-in gradient coder.
    pub fn global() -> &'static GradientRegistry {
        static INSTANCE: OnceLock<GradientRegistry> = OnceLock::new();
        INSTANCE.get_or_init(Self::with_builtin_coders)
    }

    /// A fresh registry holding the built-in gradient coders.
    pub fn with_builtin_coders() -> Self {
        let mut registry = Self::new();
        registry.register(JsonGradientCoder::new());
        registry.register(GgrCoder::new());
        registry
    }
}
