//! quick-xml helpers shared by the XML swatch-book coders.

use pal_core::{Error, Result};
use quick_xml::events::{BytesDecl, BytesStart, Event};
use quick_xml::Writer;
use std::fmt::Display;

/// Unescaped value of attribute `key`, if present.
pub(crate) fn attribute(e: &BytesStart<'_>, key: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|attr| attr.key.as_ref() == key)
        .map(|attr| {
            let raw = String::from_utf8_lossy(&attr.value).into_owned();
            match quick_xml::escape::unescape(&raw) {
                Ok(text) => text.into_owned(),
                Err(_) => raw,
            }
        })
}

/// Element name as text.
pub(crate) fn element_name(e: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(e.name().as_ref()).to_string()
}

pub(crate) fn read_error(e: impl Display) -> Error {
    Error::format(format!("XML error: {e}"))
}

pub(crate) fn write_error(e: impl Display) -> Error {
    Error::Io(std::io::Error::other(e.to_string()))
}

/// Indented writer with the XML declaration already written.
pub(crate) fn document_writer() -> Result<Writer<Vec<u8>>> {
    let mut xml = Writer::new_with_indent(Vec::new(), b' ', 2);
    xml.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .map_err(write_error)?;
    Ok(xml)
}

/// Lowercased header text for cheap sniffing.
pub(crate) fn sniff(header: &[u8]) -> String {
    crate::coder::header_text(header).to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use quick_xml::Reader;

    #[test]
    fn test_attribute_unescapes() {
        let mut reader = Reader::from_reader(&b"<color name=\"Salt &amp; Pepper\" hex=\"#fff\"/>"[..]);
        let mut buf = Vec::new();
        match reader.read_event_into(&mut buf).unwrap() {
            Event::Empty(e) => {
                assert_eq!(element_name(&e), "color");
                assert_eq!(attribute(&e, b"name").as_deref(), Some("Salt & Pepper"));
                assert_eq!(attribute(&e, b"hex").as_deref(), Some("#fff"));
                assert_eq!(attribute(&e, b"missing"), None);
            }
            other => panic!("unexpected event {other:?}"),
        }
    }
}
