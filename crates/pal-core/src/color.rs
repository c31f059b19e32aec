//! Color representation and colorspace conversion.
//!
//! A [`Color`] is an immutable value: a name, a [`ColorSpace`], a component
//! vector whose length always matches the colorspace arity, an alpha and a
//! [`ColorType`]. Conversions return new colors and never mutate in place.
//!
//! # Conversions
//!
//! | From \ To | RGB | CMYK | Gray | LAB |
//! |-----------|-----|------|------|-----|
//! | RGB       | =   | yes  | yes  | no  |
//! | CMYK      | yes | =    | yes  | no  |
//! | Gray      | yes | yes  | =    | no  |
//! | LAB       | no  | no   | no   | =   |
//!
//! LAB needs a white point and a full CIE pipeline, which this library does
//! not approximate, so any conversion to or from LAB fails with
//! [`Error::CannotConvertColorSpace`].
//!
//! # Example
//!
//! ```rust
//! use pal_core::{Color, ColorSpace};
//!
//! let red = Color::rgb255(255, 0, 0);
//! let cmyk = red.convert(ColorSpace::Cmyk).unwrap();
//! assert_eq!(cmyk.components(), &[0.0, 1.0, 1.0, 0.0]);
//! assert_eq!(red.hex_rgb(true).unwrap(), "#ff0000");
//! ```

use crate::{Error, Result};
use std::fmt;

/// Rec. 709 luma weights used for RGB -> Gray.
const LUMA_R: f32 = 0.2126;
const LUMA_G: f32 = 0.7152;
const LUMA_B: f32 = 0.0722;

/// The color model of a [`Color`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorSpace {
    /// Red, green, blue.
    Rgb,
    /// Cyan, magenta, yellow, black.
    Cmyk,
    /// Single white component.
    Gray,
    /// CIE L*a*b*. Components are stored as supplied by the source format.
    Lab,
}

impl ColorSpace {
    /// Number of components a color in this space carries.
    #[inline]
    pub const fn component_count(self) -> usize {
        match self {
            ColorSpace::Rgb | ColorSpace::Lab => 3,
            ColorSpace::Cmyk => 4,
            ColorSpace::Gray => 1,
        }
    }

    /// Canonical display name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ColorSpace::Rgb => "RGB",
            ColorSpace::Cmyk => "CMYK",
            ColorSpace::Gray => "Gray",
            ColorSpace::Lab => "LAB",
        }
    }

    /// Parses a colorspace name, case-insensitive.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rgb" => Some(ColorSpace::Rgb),
            "cmyk" => Some(ColorSpace::Cmyk),
            "gray" | "grey" => Some(ColorSpace::Gray),
            "lab" => Some(ColorSpace::Lab),
            _ => None,
        }
    }
}

impl fmt::Display for ColorSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a color is used inside a swatch document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ColorType {
    /// Process color shared across the document.
    #[default]
    Global,
    /// Spot (named ink) color.
    Spot,
    /// Plain process color.
    Normal,
}

impl ColorType {
    /// Lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ColorType::Global => "global",
            ColorType::Spot => "spot",
            ColorType::Normal => "normal",
        }
    }

    /// Parses a color type name, case-insensitive.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "global" => Some(ColorType::Global),
            "spot" => Some(ColorType::Spot),
            "normal" => Some(ColorType::Normal),
            _ => None,
        }
    }
}

/// An immutable named color.
#[derive(Debug, Clone, PartialEq)]
pub struct Color {
    name: String,
    colorspace: ColorSpace,
    components: Vec<f32>,
    alpha: f32,
    color_type: ColorType,
}

impl Color {
    /// Creates an opaque global color.
    ///
    /// Component values are conventionally in `[0, 1]` but are not clamped.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidComponentCount`] if `components.len()` does not match
    /// [`ColorSpace::component_count`].
    pub fn new(
        name: impl Into<String>,
        colorspace: ColorSpace,
        components: Vec<f32>,
    ) -> Result<Self> {
        let expected = colorspace.component_count();
        if components.len() != expected {
            return Err(Error::InvalidComponentCount {
                colorspace,
                expected,
                actual: components.len(),
            });
        }
        Ok(Self {
            name: name.into(),
            colorspace,
            components,
            alpha: 1.0,
            color_type: ColorType::Global,
        })
    }

    /// Opaque RGB color from unit floats.
    pub fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::rgba(r, g, b, 1.0)
    }

    /// RGB color with alpha from unit floats.
    pub fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self::unchecked(ColorSpace::Rgb, vec![r, g, b]).with_alpha(a)
    }

    /// Opaque CMYK color from unit floats.
    pub fn cmyk(c: f32, m: f32, y: f32, k: f32) -> Self {
        Self::unchecked(ColorSpace::Cmyk, vec![c, m, y, k])
    }

    /// Opaque gray color from a unit white value.
    pub fn gray(white: f32) -> Self {
        Self::unchecked(ColorSpace::Gray, vec![white])
    }

    /// Opaque LAB color.
    pub fn lab(l: f32, a: f32, b: f32) -> Self {
        Self::unchecked(ColorSpace::Lab, vec![l, a, b])
    }

    /// Opaque RGB color from 8-bit channels.
    pub fn rgb255(r: u8, g: u8, b: u8) -> Self {
        Self::rgba255(r, g, b, 255)
    }

    /// RGB color with alpha from 8-bit channels.
    pub fn rgba255(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::rgba(
            r as f32 / 255.0,
            g as f32 / 255.0,
            b as f32 / 255.0,
            a as f32 / 255.0,
        )
    }

    /// Parses `#RGB`, `#RGBA`, `#RRGGBB` or `#RRGGBBAA` (hash optional).
    ///
    /// ```rust
    /// use pal_core::Color;
    ///
    /// let c = Color::from_hex("#ff000080").unwrap();
    /// assert_eq!(c.to_rgba8().unwrap(), [255, 0, 0, 128]);
    /// assert!(Color::from_hex("#12345").is_err());
    /// ```
    pub fn from_hex(hex: &str) -> Result<Self> {
        let digits = hex.trim();
        let digits = digits.strip_prefix('#').unwrap_or(digits);
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(Error::format(format!("invalid hex color: {hex}")));
        }

        let nibble = |i: usize| -> u8 {
            let v = u8::from_str_radix(&digits[i..i + 1], 16).unwrap_or(0);
            v * 17
        };
        let byte = |i: usize| -> u8 { u8::from_str_radix(&digits[i..i + 2], 16).unwrap_or(0) };

        let [r, g, b, a] = match digits.len() {
            3 => [nibble(0), nibble(1), nibble(2), 255],
            4 => [nibble(0), nibble(1), nibble(2), nibble(3)],
            6 => [byte(0), byte(2), byte(4), 255],
            8 => [byte(0), byte(2), byte(4), byte(6)],
            n => {
                return Err(Error::format(format!(
                    "hex color must have 3, 4, 6 or 8 digits, got {n}: {hex}"
                )))
            }
        };
        Ok(Self::rgba255(r, g, b, a))
    }

    fn unchecked(colorspace: ColorSpace, components: Vec<f32>) -> Self {
        debug_assert_eq!(components.len(), colorspace.component_count());
        Self {
            name: String::new(),
            colorspace,
            components,
            alpha: 1.0,
            color_type: ColorType::Global,
        }
    }

    /// Returns a copy with a different name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Returns a copy with a different alpha.
    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.alpha = alpha;
        self
    }

    /// Returns a copy with a different color type.
    pub fn with_color_type(mut self, color_type: ColorType) -> Self {
        self.color_type = color_type;
        self
    }

    /// Color name (may be empty).
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Colorspace of the components.
    #[inline]
    pub fn colorspace(&self) -> ColorSpace {
        self.colorspace
    }

    /// Components, `colorspace().component_count()` long.
    #[inline]
    pub fn components(&self) -> &[f32] {
        &self.components
    }

    /// Alpha in `[0, 1]`.
    #[inline]
    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    /// Color type.
    #[inline]
    pub fn color_type(&self) -> ColorType {
        self.color_type
    }

    /// Converts to another colorspace, keeping name, alpha and type.
    ///
    /// Converting to the same colorspace returns an identical copy.
    ///
    /// # Errors
    ///
    /// [`Error::CannotConvertColorSpace`] for any conversion involving LAB.
    pub fn convert(&self, target: ColorSpace) -> Result<Color> {
        if target == self.colorspace {
            return Ok(self.clone());
        }

        let c = &self.components;
        let components = match (self.colorspace, target) {
            (ColorSpace::Rgb, ColorSpace::Cmyk) => rgb_to_cmyk([c[0], c[1], c[2]]).to_vec(),
            (ColorSpace::Rgb, ColorSpace::Gray) => vec![rgb_to_gray([c[0], c[1], c[2]])],
            (ColorSpace::Cmyk, ColorSpace::Rgb) => cmyk_to_rgb([c[0], c[1], c[2], c[3]]).to_vec(),
            (ColorSpace::Cmyk, ColorSpace::Gray) => {
                vec![rgb_to_gray(cmyk_to_rgb([c[0], c[1], c[2], c[3]]))]
            }
            (ColorSpace::Gray, ColorSpace::Rgb) => vec![c[0], c[0], c[0]],
            (ColorSpace::Gray, ColorSpace::Cmyk) => rgb_to_cmyk([c[0], c[0], c[0]]).to_vec(),
            (from, to) => return Err(Error::CannotConvertColorSpace { from, to }),
        };

        Ok(Self {
            name: self.name.clone(),
            colorspace: target,
            components,
            alpha: self.alpha,
            color_type: self.color_type,
        })
    }

    /// RGB components of this color, converting if needed.
    pub fn rgb_components(&self) -> Result<[f32; 3]> {
        let rgb = self.convert(ColorSpace::Rgb)?;
        Ok([rgb.components[0], rgb.components[1], rgb.components[2]])
    }

    /// 8-bit RGBA, rounded to nearest after clamping.
    pub fn to_rgba8(&self) -> Result<[u8; 4]> {
        let [r, g, b] = self.rgb_components()?;
        Ok([quantize_u8(r), quantize_u8(g), quantize_u8(b), quantize_u8(self.alpha)])
    }

    /// Lowercase `rrggbb` hex string.
    pub fn hex_rgb(&self, hashmark: bool) -> Result<String> {
        let [r, g, b, _] = self.to_rgba8()?;
        let prefix = if hashmark { "#" } else { "" };
        Ok(format!("{prefix}{r:02x}{g:02x}{b:02x}"))
    }

    /// Lowercase `rrggbbaa` hex string.
    pub fn hex_rgba(&self, hashmark: bool) -> Result<String> {
        let [r, g, b, a] = self.to_rgba8()?;
        let prefix = if hashmark { "#" } else { "" };
        Ok(format!("{prefix}{r:02x}{g:02x}{b:02x}{a:02x}"))
    }

    /// Linear mix between `self` (t = 0) and `other` (t = 1).
    ///
    /// Colors sharing a colorspace are mixed in that space; otherwise both
    /// are converted to RGB first. The result is unnamed.
    pub fn mix(&self, other: &Color, t: f32) -> Result<Color> {
        let (a, b) = if self.colorspace == other.colorspace {
            (self.clone(), other.clone())
        } else {
            (self.convert(ColorSpace::Rgb)?, other.convert(ColorSpace::Rgb)?)
        };
        let components = a
            .components
            .iter()
            .zip(&b.components)
            .map(|(x, y)| lerp(*x, *y, t))
            .collect();
        Ok(Self {
            name: String::new(),
            colorspace: a.colorspace,
            components,
            alpha: lerp(a.alpha, b.alpha, t),
            color_type: self.color_type,
        })
    }

    /// `count` colors evenly spaced from `first` to `last`, both included.
    pub fn interpolate(first: &Color, last: &Color, count: usize) -> Result<Vec<Color>> {
        match count {
            0 => Ok(Vec::new()),
            1 => Ok(vec![first.clone()]),
            _ => {
                let step = 1.0 / (count - 1) as f32;
                (0..count).map(|i| first.mix(last, i as f32 * step)).collect()
            }
        }
    }
}

#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Quantizes a unit float to 8 bits: clamp to `[0, 1]`, scale, round to nearest.
#[inline]
pub fn quantize_u8(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Quantizes a unit float to `0..=max`: clamp to `[0, 1]`, scale, round to nearest.
#[inline]
pub fn quantize_u16(v: f32, max: u16) -> u16 {
    (v.clamp(0.0, 1.0) * max as f32).round() as u16
}

fn rgb_to_cmyk([r, g, b]: [f32; 3]) -> [f32; 4] {
    let k = 1.0 - r.max(g).max(b);
    if k >= 1.0 {
        return [0.0, 0.0, 0.0, 1.0];
    }
    let inv = 1.0 - k;
    [(1.0 - r - k) / inv, (1.0 - g - k) / inv, (1.0 - b - k) / inv, k]
}

fn cmyk_to_rgb([c, m, y, k]: [f32; 4]) -> [f32; 3] {
    [(1.0 - c) * (1.0 - k), (1.0 - m) * (1.0 - k), (1.0 - y) * (1.0 - k)]
}

fn rgb_to_gray([r, g, b]: [f32; 3]) -> f32 {
    (LUMA_R * r + LUMA_G * g + LUMA_B * b).clamp(0.0, 1.0)
}
