//! Pull-based XML event sources.
//!
//! The layout parser consumes XML through the [`EventSource`] trait, which
//! reduces a document to start/end element events and a single error slot.
//! [`XmlEventSource`] implements it on top of `quick_xml` and adds the
//! well-formedness checks the parser relies on.

use quick_xml::Reader;
use quick_xml::errors::{Error as XmlError, IllFormedError};
use quick_xml::events::Event;
use std::io::BufRead;

/// Element-level event produced by an [`EventSource`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlEvent {
    /// Opening tag of an element, with its local name.
    StartElement(String),
    /// Closing tag of the innermost open element.
    EndElement,
    /// No more events: the input is exhausted or an error was raised.
    EndOfInput,
}

/// Attributes of the current start element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes {
    entries: Vec<(String, String)>,
}

impl Attributes {
    /// Creates an empty attribute list.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Appends an attribute.
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries.push((name.into(), value.into()));
    }

    /// Returns the value of `name`, or an empty string if it is absent.
    #[must_use]
    pub fn value(&self, name: &str) -> &str {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map_or("", |(_, value)| value.as_str())
    }

    /// Iterates over `(name, value)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of attributes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no attributes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn clear(&mut self) {
        self.entries.clear();
    }
}

/// A fail-fast stream of element events with a single error slot.
///
/// The first error raised, by the source itself or by its consumer, is kept;
/// later calls to [`raise_error`](EventSource::raise_error) are ignored. Once
/// an error is set, [`advance`](EventSource::advance) only returns
/// [`XmlEvent::EndOfInput`].
pub trait EventSource {
    /// Moves to the next element event.
    fn advance(&mut self) -> XmlEvent;

    /// Attributes of the most recent start element.
    fn attributes(&self) -> &Attributes;

    /// Records `message` unless an error is already set.
    fn raise_error(&mut self, message: String);

    /// Returns true once an error has been raised.
    fn has_error(&self) -> bool;

    /// The recorded error message, empty if none.
    fn error_message(&self) -> &str;

    /// Reads up to the next child start element of the current element.
    ///
    /// Returns `None` when the current element's end tag is consumed, at end
    /// of input, or after an error.
    fn read_next_start_element(&mut self) -> Option<String> {
        match self.advance() {
            XmlEvent::StartElement(name) => Some(name),
            XmlEvent::EndElement | XmlEvent::EndOfInput => None,
        }
    }

    /// Consumes the rest of the current element, including its end tag.
    fn skip_current_element(&mut self) {
        let mut depth = 1usize;
        while depth > 0 {
            match self.advance() {
                XmlEvent::StartElement(_) => depth += 1,
                XmlEvent::EndElement => depth -= 1,
                XmlEvent::EndOfInput => break,
            }
        }
    }
}

/// Raw reader output, detached from the read buffer.
enum RawEvent {
    /// Qualified name, local name, attributes.
    Start(String, String, Attributes),
    End(String),
    Text { blank: bool },
    Eof,
    Skip,
}

/// [`EventSource`] over a `quick_xml` reader.
///
/// Checks on top of `quick_xml`: matching end tags, a single root element,
/// no content after the root, no unclosed elements at end of input, and
/// element name characters.
pub struct XmlEventSource<R> {
    reader: Reader<R>,
    buf: Vec<u8>,
    attributes: Attributes,
    open: Vec<String>,
    root_seen: bool,
    finished: bool,
    error: Option<String>,
}

impl<'a> XmlEventSource<&'a [u8]> {
    /// Creates an event source over an in-memory document.
    #[allow(clippy::should_implement_trait)]
    #[must_use]
    pub fn from_str(xml: &'a str) -> Self {
        Self::with_reader(Reader::from_str(xml))
    }
}

impl<R: BufRead> XmlEventSource<R> {
    /// Creates an event source over a buffered reader.
    pub fn from_reader(reader: R) -> Self {
        Self::with_reader(Reader::from_reader(reader))
    }

    fn with_reader(mut reader: Reader<R>) -> Self {
        let config = reader.config_mut();
        config.expand_empty_elements = true;
        config.check_end_names = false;

        Self {
            reader,
            buf: Vec::new(),
            attributes: Attributes::new(),
            open: Vec::new(),
            root_seen: false,
            finished: false,
            error: None,
        }
    }

    /// Number of elements currently open.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.open.len()
    }

    fn root_closed(&self) -> bool {
        self.root_seen && self.open.is_empty()
    }

    fn read_raw(&mut self) -> Result<RawEvent, String> {
        self.buf.clear();
        let event = match self.reader.read_event_into(&mut self.buf) {
            Ok(event) => event,
            // An end tag with nothing open; `accept` decides what it means.
            Err(XmlError::IllFormed(IllFormedError::UnmatchedEndTag(name))) => {
                return Ok(RawEvent::End(name));
            }
            Err(e) => return Err(e.to_string()),
        };

        let raw = match event {
            Event::Start(ref e) => {
                let name = std::str::from_utf8(e.name().as_ref())
                    .map_err(|e| e.to_string())?
                    .to_string();
                let local = std::str::from_utf8(e.local_name().as_ref())
                    .map_err(|e| e.to_string())?
                    .to_string();
                let mut attributes = Attributes::new();
                for attr in e.attributes() {
                    let attr = attr.map_err(|e| e.to_string())?;
                    let key = std::str::from_utf8(attr.key.as_ref()).map_err(|e| e.to_string())?;
                    let value = attr.unescape_value().map_err(|e| e.to_string())?;
                    attributes.push(key, value.into_owned());
                }
                RawEvent::Start(name, local, attributes)
            }
            Event::End(ref e) => RawEvent::End(
                std::str::from_utf8(e.name().as_ref())
                    .map_err(|e| e.to_string())?
                    .to_string(),
            ),
            Event::Text(ref t) => RawEvent::Text {
                blank: t.iter().all(u8::is_ascii_whitespace),
            },
            Event::CData(_) | Event::GeneralRef(_) => RawEvent::Text { blank: false },
            Event::Eof => RawEvent::Eof,
            _ => RawEvent::Skip,
        };

        Ok(raw)
    }

    /// Applies document-level checks to a raw event.
    fn accept(&mut self, raw: RawEvent) -> Result<Option<XmlEvent>, String> {
        match raw {
            RawEvent::Start(name, local, attributes) => {
                if self.root_closed() {
                    return Err("Extra content at end of document.".to_string());
                }
                check_name(&name)?;
                self.root_seen = true;
                self.open.push(name);
                self.attributes = attributes;
                Ok(Some(XmlEvent::StartElement(local)))
            }
            RawEvent::End(name) => match self.open.pop() {
                Some(open) if open == name => Ok(Some(XmlEvent::EndElement)),
                Some(_) => Err("Opening and ending tag mismatch.".to_string()),
                None if self.root_seen => Err("Extra content at end of document.".to_string()),
                None => {
                    // A stray end tag before the root: leave it to the consumer
                    // to report the missing root element.
                    self.finished = true;
                    Ok(Some(XmlEvent::EndOfInput))
                }
            },
            RawEvent::Text { blank: true } | RawEvent::Skip => Ok(None),
            RawEvent::Text { blank: false } => {
                if self.root_closed() {
                    Err("Extra content at end of document.".to_string())
                } else if !self.root_seen {
                    Err("Start tag expected.".to_string())
                } else {
                    Ok(None)
                }
            }
            RawEvent::Eof => {
                self.finished = true;
                if self.open.is_empty() {
                    Ok(Some(XmlEvent::EndOfInput))
                } else {
                    Err("Premature end of document.".to_string())
                }
            }
        }
    }
}

impl<R: BufRead> EventSource for XmlEventSource<R> {
    fn advance(&mut self) -> XmlEvent {
        while !self.finished && self.error.is_none() {
            match self.read_raw().and_then(|raw| self.accept(raw)) {
                Ok(Some(event)) => return event,
                Ok(None) => {}
                Err(message) => self.raise_error(message),
            }
        }
        self.attributes.clear();
        XmlEvent::EndOfInput
    }

    fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    fn raise_error(&mut self, message: String) {
        if self.error.is_none() {
            self.error = Some(message);
        }
    }

    fn has_error(&self) -> bool {
        self.error.is_some()
    }

    fn error_message(&self) -> &str {
        self.error.as_deref().unwrap_or("")
    }
}

impl<R> std::fmt::Debug for XmlEventSource<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("XmlEventSource")
            .field("open", &self.open)
            .field("root_seen", &self.root_seen)
            .field("finished", &self.finished)
            .field("error", &self.error)
            .finish_non_exhaustive()
    }
}

/// Validates the characters of an element name.
fn check_name(name: &str) -> Result<(), String> {
    let mut chars = name.chars();
    let mut first = true;

    while let Some(c) = chars.next() {
        if c == '/' {
            // `<a/b>`: the tag was meant to be closed at the slash.
            return Err(match chars.next() {
                Some(next) => format!("Expected '>', but got '{next}'."),
                None => "Invalid XML name.".to_string(),
            });
        }
        let valid = if first {
            c.is_alphabetic() || c == '_' || c == ':' || !c.is_ascii()
        } else {
            c.is_alphanumeric() || matches!(c, '_' | ':' | '-' | '.') || !c.is_ascii()
        };
        if !valid {
            return Err("Invalid XML name.".to_string());
        }
        first = false;
    }

    if first {
        return Err("Invalid XML name.".to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect_events(xml: &str) -> (Vec<XmlEvent>, String) {
        let mut source = XmlEventSource::from_str(xml);
        let mut events = Vec::new();
        loop {
            let event = source.advance();
            let done = event == XmlEvent::EndOfInput;
            events.push(event);
            if done {
                break;
            }
        }
        (events, source.error_message().to_string())
    }

    #[test]
    fn test_empty_elements_are_expanded() {
        let (events, error) = collect_events(r#"<?xml version="1.0"?><a><b/></a>"#);
        assert_eq!(error, "");
        assert_eq!(
            events,
            vec![
                XmlEvent::StartElement("a".to_string()),
                XmlEvent::StartElement("b".to_string()),
                XmlEvent::EndElement,
                XmlEvent::EndElement,
                XmlEvent::EndOfInput,
            ]
        );
    }

    #[test]
    fn test_text_and_comments_are_skipped() {
        let (events, error) = collect_events("<a>\n  text <!-- note --> <b></b>\n</a>\n");
        assert_eq!(error, "");
        assert_eq!(events.len(), 5);
    }

    #[test]
    fn test_attributes() {
        let mut source = XmlEventSource::from_str(r#"<a x="1" y="&lt;2&gt;"/>"#);
        assert_eq!(source.advance(), XmlEvent::StartElement("a".to_string()));
        let attributes = source.attributes();
        assert_eq!(attributes.len(), 2);
        assert_eq!(attributes.value("x"), "1");
        assert_eq!(attributes.value("y"), "<2>");
        assert_eq!(attributes.value("z"), "");
    }

    #[test]
    fn test_tag_mismatch() {
        let (_, error) = collect_events("<a><b></c></a>");
        assert_eq!(error, "Opening and ending tag mismatch.");
    }

    #[test]
    fn test_extra_content() {
        let (_, error) = collect_events("<a/><b/>");
        assert_eq!(error, "Extra content at end of document.");

        let (_, error) = collect_events("<a/>trailing");
        assert_eq!(error, "Extra content at end of document.");
    }

    #[test]
    fn test_trailing_content_after_root() {
        for xml in [
            "<a/></b>",
            "<a></a></a>",
            "<a/>&amp;",
            "<a/><![CDATA[x]]>",
            "<a/>\n<b></b>",
        ] {
            let (_, error) = collect_events(xml);
            assert_eq!(error, "Extra content at end of document.", "{xml}");
        }

        let (_, error) = collect_events("<a/>\n<!-- done -->\n");
        assert_eq!(error, "");
    }

    #[test]
    fn test_prefixed_names_report_local_name() {
        let (events, error) = collect_events(r#"<kb:a xmlns:kb="urn:kb"><kb:b/></kb:a>"#);
        assert_eq!(error, "");
        assert_eq!(events[0], XmlEvent::StartElement("a".to_string()));
        assert_eq!(events[1], XmlEvent::StartElement("b".to_string()));

        let (_, error) = collect_events(r#"<kb:a xmlns:kb="urn:kb"></a>"#);
        assert_eq!(error, "Opening and ending tag mismatch.");
    }

    #[test]
    fn test_premature_end() {
        let (_, error) = collect_events("<a><b>");
        assert_eq!(error, "Premature end of document.");
    }

    #[test]
    fn test_text_before_root() {
        let (_, error) = collect_events("hello<a/>");
        assert_eq!(error, "Start tag expected.");
    }

    #[test]
    fn test_stray_end_tag_before_root_ends_input() {
        let (events, error) = collect_events("</foo><a/>");
        assert_eq!(events, vec![XmlEvent::EndOfInput]);
        assert_eq!(error, "");

        let (events, error) = collect_events(r#"<?xml version="1.0"?></foo>"#);
        assert_eq!(events, vec![XmlEvent::EndOfInput]);
        assert_eq!(error, "");
    }

    #[test]
    fn test_slash_inside_name() {
        let (_, error) = collect_events("<a><b/</a>");
        assert_eq!(error, "Expected '>', but got '<'.");
    }

    #[test]
    fn test_error_is_kept_and_ends_stream() {
        let mut source = XmlEventSource::from_str("<a><b/></a>");
        assert!(matches!(source.advance(), XmlEvent::StartElement(_)));
        source.raise_error("first".to_string());
        source.raise_error("second".to_string());
        assert_eq!(source.advance(), XmlEvent::EndOfInput);
        assert_eq!(source.error_message(), "first");
        assert!(source.attributes().is_empty());
    }

    #[test]
    fn test_skip_current_element() {
        let mut source = XmlEventSource::from_str("<a><b><c/><c><d/></c></b><e/></a>");
        assert_eq!(source.advance(), XmlEvent::StartElement("a".to_string()));
        assert_eq!(source.read_next_start_element().as_deref(), Some("b"));
        source.skip_current_element();
        assert_eq!(source.read_next_start_element().as_deref(), Some("e"));
        assert_eq!(source.read_next_start_element(), None);
        assert_eq!(source.read_next_start_element(), None);
        assert_eq!(source.depth(), 0);
        assert!(!source.has_error());
    }

    #[test]
    fn test_from_reader() {
        let data = b"<a>\n<b/>\n</a>".to_vec();
        let mut source = XmlEventSource::from_reader(std::io::Cursor::new(data));
        assert_eq!(source.advance(), XmlEvent::StartElement("a".to_string()));
        assert_eq!(source.read_next_start_element().as_deref(), Some("b"));
    }

    #[test]
    fn test_check_name() {
        assert!(check_name("keyboard").is_ok());
        assert!(check_name("ns:key-1.x").is_ok());
        assert_eq!(check_name("1a"), Err("Invalid XML name.".to_string()));
        assert_eq!(
            check_name("foo/x"),
            Err("Expected '>', but got 'x'.".to_string())
        );
    }
}
