//! Minimal XML palette (.xml).
//!
//! ```xml
//! <palette name="basicxml">
//!   <color name="Red" hex="#ff0000"/>
//!   <color name="Glass" hex="#00ff0080"/>
//! </palette>
//! ```
//!
//! Flat color list only; groups are flattened on encode.

use super::xml::{attribute, document_writer, element_name, read_error, sniff, write_error};
use crate::coder::Coder;
use pal_core::{Color, Error, Palette, Result};
use quick_xml::events::{BytesEnd, BytesStart, Event};
use quick_xml::Reader;

/// Basic XML palette coder.
#[derive(Debug, Clone, Copy, Default)]
pub struct BasicXmlCoder;

impl BasicXmlCoder {
    /// Creates the coder.
    pub fn new() -> Self {
        Self
    }
}

impl Coder for BasicXmlCoder {
    type Model = Palette;

    fn name(&self) -> &'static str {
        "Basic XML Palette"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["xml"]
    }

    fn can_decode(&self, header: &[u8]) -> bool {
        let text = sniff(header);
        text.contains("<palette") && text.contains("hex=")
    }

    fn decode(&self, data: &[u8]) -> Result<Palette> {
        let mut xml = Reader::from_reader(data);
        xml.config_mut().trim_text(true);

        let mut palette: Option<Palette> = None;
        let mut buf = Vec::new();
        loop {
            match xml.read_event_into(&mut buf).map_err(read_error)? {
                Event::Start(ref e) | Event::Empty(ref e) => match element_name(e).as_str() {
                    "palette" => {
                        palette = Some(Palette::new(attribute(e, b"name").unwrap_or_default(), Vec::new()));
                    }
                    "color" => {
                        let target = palette
                            .as_mut()
                            .ok_or_else(|| Error::format("<color> outside <palette>"))?;
                        let hex = attribute(e, b"hex")
                            .ok_or_else(|| Error::format("<color> without hex attribute"))?;
                        let name = attribute(e, b"name").unwrap_or_default();
                        target.colors.push(Color::from_hex(&hex)?.with_name(name));
                    }
                    _ => {}
                },
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }
        palette.ok_or_else(|| Error::format("missing <palette> root element"))
    }

    fn encode(&self, palette: &Palette) -> Result<Vec<u8>> {
        let mut xml = document_writer()?;

        let mut root = BytesStart::new("palette");
        root.push_attribute(("name", palette.name.as_str()));
        xml.write_event(Event::Start(root)).map_err(write_error)?;

        for color in palette.all_colors() {
            let hex = if color.alpha() < 1.0 { color.hex_rgba(true)? } else { color.hex_rgb(true)? };
            let mut elem = BytesStart::new("color");
            elem.push_attribute(("name", color.name()));
            elem.push_attribute(("hex", hex.as_str()));
            xml.write_event(Event::Empty(elem)).map_err(write_error)?;
        }

        xml.write_event(Event::End(BytesEnd::new("palette"))).map_err(write_error)?;
        Ok(xml.into_inner())
    }
}
