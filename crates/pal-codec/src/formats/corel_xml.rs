//! CorelDRAW-style XML swatch book (.xml).
//!
//! ```xml
//! <palette name="Inks">
//!   <colorspaces>
//!     <colorspace name="Flex">
//!       <color cs="CMYK" tints="0,0.5,1,0" name="Flex Orange"/>
//!     </colorspace>
//!   </colorspaces>
//!   <colors>
//!     <page>
//!       <color cs="RGB" tints="1,0,0" name="Red"/>
//!     </page>
//!     <page name="Spot">
//!       <color cs="Flex" tints="0.5" name="Flex Orange"/>
//!     </page>
//!   </colors>
//! </palette>
//! ```
//!
//! Unnamed pages hold global colors, named pages become groups. A color in
//! a custom colorspace resolves to the colorspace's base color of the same
//! name (or its only color), tinted toward paper white by its single tint,
//! and is typed [`ColorType::Spot`]. Colors naming a colorspace that is not
//! declared are skipped and counted in [`CorelDecodeReport::skipped`]; a
//! color without any `cs` is malformed.
//!
//! Optional `alpha` and `type` attributes carry opacity and [`ColorType`].
//! They are written only when they differ from opaque and global.

use super::xml::{attribute, document_writer, element_name, read_error, sniff, write_error};
use crate::coder::Coder;
use pal_core::{Color, ColorSpace, ColorType, Error, Group, Palette, Result};
use quick_xml::events::{BytesEnd, BytesStart, Event};
use quick_xml::Reader;
use tracing::{debug, warn};

/// Outcome of a Corel XML decode.
#[derive(Debug, Clone, PartialEq)]
pub struct CorelDecodeReport {
    /// Decoded palette.
    pub palette: Palette,
    /// Colors dropped because their colorspace could not be resolved.
    pub skipped: usize,
}

/// Corel XML palette coder.
#[derive(Debug, Clone, Copy, Default)]
pub struct CorelXmlCoder;

impl CorelXmlCoder {
    /// Creates the coder.
    pub fn new() -> Self {
        Self
    }

    /// Decodes and reports how many colors were skipped.
    pub fn decode_detailed(&self, data: &[u8]) -> Result<CorelDecodeReport> {
        let mut xml = Reader::from_reader(data);
        xml.config_mut().trim_text(true);

        let mut doc = Document::default();
        let mut buf = Vec::new();
        loop {
            match xml.read_event_into(&mut buf).map_err(read_error)? {
                Event::Start(ref e) => doc.open(e, false)?,
                Event::Empty(ref e) => doc.open(e, true)?,
                Event::End(ref e) => doc.close(e.name().as_ref()),
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }
        doc.finish()
    }
}

impl Coder for CorelXmlCoder {
    type Model = Palette;

    fn name(&self) -> &'static str {
        "Corel XML Palette"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["xml"]
    }

    fn can_decode(&self, header: &[u8]) -> bool {
        let text = sniff(header);
        text.contains("<palette")
            && (text.contains("<colors") || text.contains("<colorspaces") || text.contains("<page"))
    }

    fn decode(&self, data: &[u8]) -> Result<Palette> {
        Ok(self.decode_detailed(data)?.palette)
    }

    fn encode(&self, palette: &Palette) -> Result<Vec<u8>> {
        let mut xml = document_writer()?;

        let mut root = BytesStart::new("palette");
        root.push_attribute(("name", palette.name.as_str()));
        xml.write_event(Event::Start(root)).map_err(write_error)?;
        xml.write_event(Event::Start(BytesStart::new("colors"))).map_err(write_error)?;

        let mut pages: Vec<(Option<&str>, &[Color])> = Vec::new();
        if !palette.colors.is_empty() {
            pages.push((None, palette.colors.as_slice()));
        }
        pages.extend(palette.groups.iter().map(|g| (Some(g.name.as_str()), g.colors.as_slice())));

        for (name, colors) in pages {
            let mut page = BytesStart::new("page");
            if let Some(name) = name {
                page.push_attribute(("name", name));
            }
            xml.write_event(Event::Start(page)).map_err(write_error)?;
            for color in colors {
                let tints = color
                    .components()
                    .iter()
                    .map(|v| v.to_string())
                    .collect::<Vec<_>>()
                    .join(",");
                let mut elem = BytesStart::new("color");
                elem.push_attribute(("cs", cs_name(color.colorspace())));
                elem.push_attribute(("tints", tints.as_str()));
                elem.push_attribute(("name", color.name()));
                let alpha = color.alpha().to_string();
                if color.alpha() != 1.0 {
                    elem.push_attribute(("alpha", alpha.as_str()));
                }
                if color.color_type() != ColorType::Global {
                    elem.push_attribute(("type", color.color_type().as_str()));
                }
                xml.write_event(Event::Empty(elem)).map_err(write_error)?;
            }
            xml.write_event(Event::End(BytesEnd::new("page"))).map_err(write_error)?;
        }

        xml.write_event(Event::End(BytesEnd::new("colors"))).map_err(write_error)?;
        xml.write_event(Event::End(BytesEnd::new("palette"))).map_err(write_error)?;
        Ok(xml.into_inner())
    }
}

fn cs_name(colorspace: ColorSpace) -> &'static str {
    match colorspace {
        ColorSpace::Rgb => "RGB",
        ColorSpace::Cmyk => "CMYK",
        ColorSpace::Gray => "GRAY",
        ColorSpace::Lab => "LAB",
    }
}

/// A `<color>` before colorspace resolution.
struct RawColor {
    cs: String,
    tints: Vec<f32>,
    name: String,
    alpha: Option<f32>,
    color_type: Option<ColorType>,
}

impl RawColor {
    fn parse(e: &BytesStart<'_>) -> Result<Self> {
        let name = attribute(e, b"name").unwrap_or_default();
        let cs = attribute(e, b"cs")
            .filter(|cs| !cs.trim().is_empty())
            .ok_or_else(|| Error::format(format!("color '{name}': missing cs attribute")))?;
        let tints = attribute(e, b"tints")
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(|t| {
                t.parse::<f32>()
                    .map_err(|_| Error::format(format!("color '{name}': invalid tint {t:?}")))
            })
            .collect::<Result<Vec<_>>>()?;
        let alpha = attribute(e, b"alpha")
            .map(|a| {
                a.trim()
                    .parse::<f32>()
                    .map_err(|_| Error::format(format!("color '{name}': invalid alpha {a:?}")))
            })
            .transpose()?;
        let color_type = attribute(e, b"type")
            .map(|t| {
                ColorType::from_str(&t).ok_or_else(|| Error::format(format!("color '{name}': unknown type {t:?}")))
            })
            .transpose()?;
        Ok(Self {
            cs,
            tints,
            name,
            alpha,
            color_type,
        })
    }
}

struct RawPage {
    name: Option<String>,
    colors: Vec<RawColor>,
}

#[derive(Default)]
struct Document {
    saw_root: bool,
    name: String,
    colorspaces: Vec<(String, Vec<RawColor>)>,
    pages: Vec<RawPage>,
    loose: Vec<RawColor>,
    open_colorspace: Option<(String, Vec<RawColor>)>,
    open_page: Option<RawPage>,
}

impl Document {
    fn open(&mut self, e: &BytesStart<'_>, empty: bool) -> Result<()> {
        match element_name(e).as_str() {
            "palette" => {
                self.saw_root = true;
                self.name = attribute(e, b"name").unwrap_or_default();
            }
            "colorspace" => {
                let cs = (attribute(e, b"name").unwrap_or_default(), Vec::new());
                if empty {
                    self.colorspaces.push(cs);
                } else {
                    self.open_colorspace = Some(cs);
                }
            }
            "page" => {
                let page = RawPage {
                    name: attribute(e, b"name").filter(|n| !n.is_empty()),
                    colors: Vec::new(),
                };
                if empty {
                    self.pages.push(page);
                } else {
                    self.open_page = Some(page);
                }
            }
            "color" => {
                let raw = RawColor::parse(e)?;
                if let Some((_, colors)) = self.open_colorspace.as_mut() {
                    colors.push(raw);
                } else if let Some(page) = self.open_page.as_mut() {
                    page.colors.push(raw);
                } else {
                    self.loose.push(raw);
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn close(&mut self, name: &[u8]) {
        match name {
            b"colorspace" => {
                if let Some(cs) = self.open_colorspace.take() {
                    self.colorspaces.push(cs);
                }
            }
            b"page" => {
                if let Some(page) = self.open_page.take() {
                    self.pages.push(page);
                }
            }
            _ => {}
        }
    }

    fn finish(self) -> Result<CorelDecodeReport> {
        if !self.saw_root {
            return Err(Error::format("missing <palette> root element"));
        }

        let mut skipped = 0;
        let mut palette = Palette::new(self.name.clone(), self.resolve_all(&self.loose, &mut skipped)?);
        for page in &self.pages {
            let colors = self.resolve_all(&page.colors, &mut skipped)?;
            match &page.name {
                Some(name) => palette.groups.push(Group::new(name.clone(), colors)),
                None => palette.colors.extend(colors),
            }
        }

        if skipped > 0 {
            warn!(skipped, "skipped colors in unresolvable colorspaces");
        }
        Ok(CorelDecodeReport { palette, skipped })
    }

    fn resolve_all(&self, raws: &[RawColor], skipped: &mut usize) -> Result<Vec<Color>> {
        let mut colors = Vec::with_capacity(raws.len());
        for raw in raws {
            match self.resolve(raw)? {
                Some(color) => colors.push(color),
                None => {
                    debug!(name = %raw.name, cs = %raw.cs, "unresolvable colorspace");
                    *skipped += 1;
                }
            }
        }
        Ok(colors)
    }

    fn resolve(&self, raw: &RawColor) -> Result<Option<Color>> {
        let resolved = self.resolve_base(raw)?;
        Ok(resolved.map(|mut color| {
            if let Some(alpha) = raw.alpha {
                color = color.with_alpha(alpha);
            }
            if let Some(color_type) = raw.color_type {
                color = color.with_color_type(color_type);
            }
            color
        }))
    }

    fn resolve_base(&self, raw: &RawColor) -> Result<Option<Color>> {
        if let Some(space) = ColorSpace::from_str(&raw.cs) {
            return Ok(Some(Color::new(raw.name.clone(), space, raw.tints.clone())?));
        }

        let Some((_, bases)) = self.colorspaces.iter().find(|(n, _)| n.eq_ignore_ascii_case(&raw.cs))
        else {
            return Ok(None);
        };
        let base = bases
            .iter()
            .find(|b| b.name == raw.name)
            .or_else(|| if bases.len() == 1 { bases.first() } else { None });
        let Some(base) = base else {
            return Ok(None);
        };
        let Some(space) = ColorSpace::from_str(&base.cs) else {
            return Ok(None);
        };

        let base_color = Color::new(raw.name.clone(), space, base.tints.clone())?;
        let tint = raw.tints.first().copied().unwrap_or(1.0);
        Ok(Some(
            apply_tint(&base_color, tint)?
                .with_name(raw.name.clone())
                .with_color_type(ColorType::Spot),
        ))
    }
}

/// Blends `base` toward paper white; tint 1 is the full color.
fn apply_tint(base: &Color, tint: f32) -> Result<Color> {
    if tint >= 1.0 {
        return Ok(base.clone());
    }
    let paper = match base.colorspace() {
        ColorSpace::Rgb => Color::rgb(1.0, 1.0, 1.0),
        ColorSpace::Cmyk => Color::cmyk(0.0, 0.0, 0.0, 0.0),
        ColorSpace::Gray => Color::gray(1.0),
        ColorSpace::Lab => return Ok(base.clone()),
    };
    paper.mix(base, tint.max(0.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<palette guid="1" name="Inks">
  <colorspaces>
    <colorspace name="Flex">
      <color cs="CMYK" tints="0,0.5,1,0" name="Flex Orange"/>
    </colorspace>
  </colorspaces>
  <colors>
    <page>
      <color cs="RGB" tints="1,0,0" name="Red"/>
      <color cs="GRAY" tints="0.5" name="Mid"/>
    </page>
    <page name="Spot">
      <color cs="Flex" tints="0.5" name="Flex Orange"/>
      <color cs="Mystery" tints="1" name="Lost"/>
    </page>
  </colors>
</palette>"#;

    #[test]
    fn test_decode() {
        let report = CorelXmlCoder.decode_detailed(SAMPLE.as_bytes()).unwrap();
        assert_eq!(report.skipped, 1);

        let palette = report.palette;
        assert_eq!(palette.name, "Inks");
        assert_eq!(palette.colors.len(), 2);
        assert_eq!(palette.colors[1].colorspace(), ColorSpace::Gray);
        assert_eq!(palette.groups.len(), 1);
        assert_eq!(palette.groups[0].name, "Spot");

        let spot = &palette.groups[0].colors[0];
        assert_eq!(spot.name(), "Flex Orange");
        assert_eq!(spot.color_type(), ColorType::Spot);
        assert_eq!(spot.colorspace(), ColorSpace::Cmyk);
        assert_relative_eq!(spot.components()[1], 0.25);
        assert_relative_eq!(spot.components()[2], 0.5);
    }

    #[test]
    fn test_roundtrip() {
        let palette = Palette::new(
            "db32 & friends",
            vec![Color::rgb(0.1, 0.2, 0.3).with_name("a"), Color::lab(50.0, -10.0, 5.5)],
        )
        .with_group(Group::new("print", vec![Color::cmyk(0.0, 1.0, 0.25, 0.125).with_name("<ink>")]))
        .with_group(Group::new("empty", vec![]));

        let data = CorelXmlCoder.encode(&palette).unwrap();
        assert!(CorelXmlCoder.can_decode(&data));
        let decoded = CorelXmlCoder.decode(&data).unwrap();
        assert_eq!(decoded, palette);
    }

    #[test]
    fn test_roundtrip_alpha_and_type() {
        let palette = Palette::new(
            "",
            vec![
                Color::rgb(1.0, 0.0, 0.0).with_name("glass").with_alpha(0.5),
                Color::rgb(0.0, 0.5, 1.0).with_name("ink").with_color_type(ColorType::Spot),
                Color::gray(0.2).with_color_type(ColorType::Normal),
            ],
        );
        let data = CorelXmlCoder.encode(&palette).unwrap();
        let text = String::from_utf8(data.clone()).unwrap();
        assert_eq!(text.matches("alpha=").count(), 1);
        assert_eq!(CorelXmlCoder.decode(&data).unwrap(), palette);
    }

    #[test]
    fn test_missing_cs_fails() {
        let basic = br##"<palette name="Web"><color name="Red" hex="#ff0000"/></palette>"##;
        assert!(matches!(CorelXmlCoder.decode(basic), Err(Error::InvalidFormat(_))));
        let empty = br#"<palette><colors><page><color cs=" " tints="1" name="x"/></page></colors></palette>"#;
        assert!(matches!(CorelXmlCoder.decode(empty), Err(Error::InvalidFormat(_))));
    }

    #[test]
    fn test_errors() {
        assert!(matches!(CorelXmlCoder.decode(b"<swatches/>"), Err(Error::InvalidFormat(_))));
        assert!(matches!(
            CorelXmlCoder.decode(b"<palette><colors></palette>"),
            Err(Error::InvalidFormat(_))
        ));
        assert!(matches!(
            CorelXmlCoder.decode(br#"<palette><colors><color cs="RGB" tints="1,x,0"/></colors></palette>"#),
            Err(Error::InvalidFormat(_))
        ));
        assert!(matches!(
            CorelXmlCoder.decode(br#"<palette><colors><color cs="RGB" tints="1,0"/></colors></palette>"#),
            Err(Error::InvalidComponentCount { .. })
        ));
    }
}
