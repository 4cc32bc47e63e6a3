use quick_xml::{events::Event, Reader};

use crate::{Error, Result};

use super::RawStation;

/// Collects the attributes of every `<marker>` that is a direct child of the
/// document root. Anything else in the document is ignored.
pub fn parse_markers(text: &str) -> Result<Vec<RawStation>> {
    let mut reader = Reader::from_str(text);
    let mut markers = Vec::new();
    let mut depth = 0usize;
    let mut seen_root = false;

    loop {
        match reader.read_event().map_err(|e| malformed(&reader, e))? {
            Event::Start(e) => {
                if depth == 0 && seen_root {
                    return Err(extra_root(&reader));
                }
                if depth == 1 && e.name().as_ref() == b"marker" {
                    markers.push(attributes(&e)?);
                }
                seen_root = true;
                depth += 1;
            }
            Event::Empty(e) => {
                if depth == 0 && seen_root {
                    return Err(extra_root(&reader));
                }
                if depth == 1 && e.name().as_ref() == b"marker" {
                    markers.push(attributes(&e)?);
                }
                seen_root = true;
            }
            Event::End(_) => depth = depth.saturating_sub(1),
            Event::Text(e) if depth == 0 && !e.iter().all(u8::is_ascii_whitespace) => {
                return Err(stray_text(&reader));
            }
            Event::CData(_) if depth == 0 => return Err(stray_text(&reader)),
            Event::Eof => break,
            _ => {}
        }
    }

    if !seen_root {
        return Err(Error::parse("markers document has no root element"));
    }
    if depth != 0 {
        return Err(Error::parse("markers document ended inside an element"));
    }

    Ok(markers)
}

fn attributes(e: &quick_xml::events::BytesStart) -> Result<RawStation> {
    e.attributes()
        .map(|attr| -> Result<(String, String)> {
            let attr = attr.map_err(|e| Error::parse(format!("bad marker attribute: {e}")))?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let value = attr
                .unescape_value()
                .map_err(|e| Error::parse(format!("bad value for {key:?}: {e}")))?
                .into_owned();
            Ok((key, value))
        })
        .collect()
}

fn extra_root(reader: &Reader<&[u8]>) -> Error {
    Error::parse(format!(
        "markers document has a second root element at byte {}",
        reader.buffer_position()
    ))
}

fn stray_text(reader: &Reader<&[u8]>) -> Error {
    Error::parse(format!(
        "markers document has text outside the root element at byte {}",
        reader.buffer_position()
    ))
}

fn malformed(reader: &Reader<&[u8]>, e: quick_xml::Error) -> Error {
    Error::parse(format!(
        "malformed markers document at byte {}: {e}",
        reader.buffer_position()
    ))
}
