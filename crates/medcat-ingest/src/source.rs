//! The XML event source.
//!
//! [`XmlSource`] turns a byte stream into a lazy, strictly forward sequence
//! of [`XmlEvent`]s. Nothing beyond the reader's internal buffer is held, so
//! a consumer sees the document exactly once, in order, and a fresh pass
//! requires re-opening the source. Ill-formed markup surfaces as
//! [`CatalogError::MalformedInput`] with the reader's byte position.
//!
//! The event grammar is deliberately three-valued (start, end, text):
//! declarations, comments, processing instructions and doctype are consumed
//! internally; CDATA is surfaced as text; empty elements are expanded into a
//! start/end pair. Adjacent text pieces are joined into one event. Element
//! and attribute names are reported by local name, so attribute
//! qualification in prefixed documents is tolerated.

use std::collections::VecDeque;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::str;

use quick_xml::Reader;
use quick_xml::escape::unescape;
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::QName;

use medcat_model::{CatalogError, Result};

/// A discrete parse notification, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlEvent {
    /// An element opened. Attribute keys are local names.
    Start {
        name: String,
        attributes: Vec<(String, String)>,
    },
    /// An element closed.
    End { name: String },
    /// Character content between markup.
    Text(String),
    /// End of the sequence; the source is exhausted.
    Eof,
}

/// Lazy forward-only event source over an XML byte stream.
pub struct XmlSource<R: BufRead> {
    reader: Reader<R>,
    buf: Vec<u8>,
    pending: VecDeque<XmlEvent>,
}

impl XmlSource<BufReader<File>> {
    /// Open a catalog file.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Source`] when the file cannot be opened. The
    /// handle is owned by the source and released when it is dropped, on
    /// every exit path.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|error| CatalogError::source(path, error))?;
        Ok(Self::from_reader(BufReader::new(file)))
    }
}

impl<R: BufRead> XmlSource<R> {
    /// Build an event source over any buffered byte stream.
    pub fn from_reader(reader: R) -> Self {
        let mut reader = Reader::from_reader(reader);
        // No reader-level trimming: runs are joined and trimmed once in
        // flush_text, so entity references never split a value.
        let config = reader.config_mut();
        config.expand_empty_elements = true;
        Self {
            reader,
            buf: Vec::new(),
            pending: VecDeque::new(),
        }
    }

    /// Approximate byte position in the input, for diagnostics.
    pub fn position(&self) -> u64 {
        self.reader.buffer_position()
    }

    /// Pull the next event.
    ///
    /// Returns [`XmlEvent::Eof`] once the document is exhausted; every call
    /// after that keeps returning `Eof`. This is the only point where the
    /// source may block on the underlying read.
    ///
    /// # Errors
    ///
    /// [`CatalogError::MalformedInput`] when the markup is ill-formed or an
    /// entity reference cannot be resolved.
    pub fn next_event(&mut self) -> Result<XmlEvent> {
        if let Some(event) = self.pending.pop_front() {
            return Ok(event);
        }

        let mut text = String::new();
        loop {
            self.buf.clear();
            let event = match self.reader.read_event_into(&mut self.buf) {
                Ok(event) => event,
                Err(error) => {
                    return Err(CatalogError::malformed(
                        self.reader.error_position(),
                        error.to_string(),
                    ));
                }
            };
            let position = self.reader.buffer_position();
            match event {
                Event::Decl(_) | Event::Comment(_) | Event::PI(_) | Event::DocType(_) => {}
                Event::Text(piece) => {
                    text.push_str(&decode_text(piece.as_ref(), position)?);
                }
                Event::CData(piece) => {
                    text.push_str(decode_utf8(piece.as_ref(), position)?);
                }
                Event::GeneralRef(reference) => {
                    let name = decode_utf8(reference.as_ref(), position)?;
                    text.push_str(&resolve_reference(name, position)?);
                }
                Event::Start(start) => {
                    let event = convert_start(&start, position)?;
                    return Ok(self.flush_text(&text, event));
                }
                Event::Empty(start) => {
                    // Not emitted with expand_empty_elements, but kept total.
                    let end = XmlEvent::End {
                        name: local_name(start.name(), position)?,
                    };
                    let event = convert_start(&start, position)?;
                    let first = self.flush_text(&text, event);
                    self.pending.push_back(end);
                    return Ok(first);
                }
                Event::End(end) => {
                    let event = XmlEvent::End {
                        name: local_name(end.name(), position)?,
                    };
                    return Ok(self.flush_text(&text, event));
                }
                Event::Eof => {
                    return Ok(self.flush_text(&text, XmlEvent::Eof));
                }
            }
        }
    }

    /// Return the joined, trimmed text run first, queueing the structural
    /// event; whitespace-only runs are dropped.
    fn flush_text(&mut self, text: &str, event: XmlEvent) -> XmlEvent {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            event
        } else {
            self.pending.push_back(event);
            XmlEvent::Text(trimmed.to_string())
        }
    }
}

fn convert_start(start: &BytesStart<'_>, position: u64) -> Result<XmlEvent> {
    let name = local_name(start.name(), position)?;
    let mut attributes = Vec::new();
    for attribute in start.attributes() {
        let attribute =
            attribute.map_err(|error| CatalogError::malformed(position, error.to_string()))?;
        let key = decode_utf8(attribute.key.local_name().as_ref(), position)?.to_string();
        let value = decode_text(&attribute.value, position)?;
        attributes.push((key, value));
    }
    Ok(XmlEvent::Start { name, attributes })
}

fn local_name(name: QName<'_>, position: u64) -> Result<String> {
    Ok(decode_utf8(name.local_name().as_ref(), position)?.to_string())
}

fn decode_utf8(bytes: &[u8], position: u64) -> Result<&str> {
    str::from_utf8(bytes)
        .map_err(|error| CatalogError::malformed(position, format!("invalid UTF-8: {error}")))
}

fn decode_text(bytes: &[u8], position: u64) -> Result<String> {
    let raw = decode_utf8(bytes, position)?;
    let resolved =
        unescape(raw).map_err(|error| CatalogError::malformed(position, error.to_string()))?;
    Ok(resolved.into_owned())
}

/// Resolve a general entity reference to its character content.
///
/// Only the predefined XML entities and character references are supported;
/// the catalog schema declares no others.
fn resolve_reference(name: &str, position: u64) -> Result<String> {
    let resolved = match name {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "apos" => '\'',
        "quot" => '"',
        _ => {
            let code = name
                .strip_prefix('#')
                .and_then(|digits| {
                    digits
                        .strip_prefix('x')
                        .or_else(|| digits.strip_prefix('X'))
                        .map_or_else(
                            || digits.parse::<u32>().ok(),
                            |hex| u32::from_str_radix(hex, 16).ok(),
                        )
                })
                .and_then(char::from_u32);
            code.ok_or_else(|| {
                CatalogError::malformed(position, format!("unresolved entity reference &{name};"))
            })?
        }
    };
    Ok(resolved.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn events(xml: &str) -> Vec<XmlEvent> {
        let mut source = XmlSource::from_reader(xml.as_bytes());
        let mut out = Vec::new();
        loop {
            let event = source.next_event().expect("well-formed input");
            let done = event == XmlEvent::Eof;
            out.push(event);
            if done {
                break;
            }
        }
        out
    }

    #[test]
    fn yields_events_in_document_order() {
        let out = events("<a x=\"1\"><b>hi</b></a>");
        assert_eq!(
            out,
            vec![
                XmlEvent::Start {
                    name: "a".to_string(),
                    attributes: vec![("x".to_string(), "1".to_string())],
                },
                XmlEvent::Start {
                    name: "b".to_string(),
                    attributes: Vec::new(),
                },
                XmlEvent::Text("hi".to_string()),
                XmlEvent::End {
                    name: "b".to_string()
                },
                XmlEvent::End {
                    name: "a".to_string()
                },
                XmlEvent::Eof,
            ]
        );
    }

    #[test]
    fn expands_empty_elements() {
        let out = events("<a><b/></a>");
        assert_eq!(
            out,
            vec![
                XmlEvent::Start {
                    name: "a".to_string(),
                    attributes: Vec::new(),
                },
                XmlEvent::Start {
                    name: "b".to_string(),
                    attributes: Vec::new(),
                },
                XmlEvent::End {
                    name: "b".to_string()
                },
                XmlEvent::End {
                    name: "a".to_string()
                },
                XmlEvent::Eof,
            ]
        );
    }

    #[test]
    fn skips_comments_and_joins_text() {
        let out = events("<a>one<!-- note -->two</a>");
        assert_eq!(
            out[1],
            XmlEvent::Text("onetwo".to_string()),
            "text around a comment arrives as one event"
        );
    }

    #[test]
    fn whitespace_between_elements_is_trimmed() {
        let out = events("<a>\n    <b>x</b>\n</a>");
        assert!(
            !out.iter()
                .any(|event| matches!(event, XmlEvent::Text(text) if text.trim().is_empty())),
            "no whitespace-only text events"
        );
    }

    #[test]
    fn reports_position_for_malformed_markup() {
        let mut source = XmlSource::from_reader("<a><b></a>".as_bytes());
        let err = loop {
            match source.next_event() {
                Ok(XmlEvent::Eof) => panic!("expected malformed input"),
                Ok(_) => {}
                Err(err) => break err,
            }
        };
        assert!(matches!(err, CatalogError::MalformedInput { .. }));
    }
}
