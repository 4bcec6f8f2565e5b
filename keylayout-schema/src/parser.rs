//! Keyboard layout parser.
//!
//! A recursive-descent walker over an [`EventSource`] that validates the
//! layout vocabulary:
//!
//! ```text
//! keyboard -> (import | layout)*
//! layout   -> section+
//! section  -> row*
//! row      -> key*
//! key      -> binding*
//! ```
//!
//! Only the first error is reported. After an error the event source stops
//! producing events, so nothing more is added to the result.

use crate::error::LayoutError;
use crate::source::{EventSource, XmlEvent, XmlEventSource};
use crate::types::{
    KeyboardMetadata, Keyword, LayoutDescriptor, LayoutDocument, LayoutOrientation, LayoutType,
};
use std::io::BufRead;

/// Validating parser for one keyboard layout document.
#[derive(Debug)]
pub struct LayoutParser<S> {
    source: S,
    document: LayoutDocument,
    parsed: bool,
    schema_error: bool,
}

impl<'a> LayoutParser<XmlEventSource<&'a [u8]>> {
    /// Creates a parser over an in-memory document.
    #[allow(clippy::should_implement_trait)]
    #[must_use]
    pub fn from_str(xml: &'a str) -> Self {
        Self::new(XmlEventSource::from_str(xml))
    }
}

impl<R: BufRead> LayoutParser<XmlEventSource<R>> {
    /// Creates a parser over a buffered reader.
    pub fn from_reader(reader: R) -> Self {
        Self::new(XmlEventSource::from_reader(reader))
    }
}

impl<S: EventSource> LayoutParser<S> {
    /// Creates a parser over an event source.
    pub fn new(source: S) -> Self {
        Self {
            source,
            document: LayoutDocument::default(),
            parsed: false,
            schema_error: false,
        }
    }

    /// Parses the whole input.
    ///
    /// Returns true if neither the XML nor the layout schema had an error.
    /// The input is consumed on the first call; later calls return the same
    /// outcome.
    pub fn parse(&mut self) -> bool {
        if !self.parsed {
            self.parsed = true;

            if let Some(root) = self.find_root_element() {
                self.parse_keyboard(&root);
            }

            self.read_to_end();
        }

        !self.source.has_error()
    }

    /// The first error raised, or an empty string.
    #[must_use]
    pub fn error_string(&self) -> &str {
        self.source.error_message()
    }

    /// Keyboard metadata, once the root element was read.
    #[must_use]
    pub fn keyboard(&self) -> Option<&KeyboardMetadata> {
        self.document.keyboard.as_ref()
    }

    /// Imported files in document order.
    #[must_use]
    pub fn imports(&self) -> &[String] {
        &self.document.imports
    }

    /// Layouts in document order.
    #[must_use]
    pub fn layouts(&self) -> &[LayoutDescriptor] {
        &self.document.layouts
    }

    /// Everything collected so far.
    #[must_use]
    pub fn document(&self) -> &LayoutDocument {
        &self.document
    }

    /// Consumes the parser, returning what it collected.
    #[must_use]
    pub fn into_document(self) -> LayoutDocument {
        self.document
    }

    /// Parses the input and converts the outcome into a `Result`.
    ///
    /// # Errors
    /// Returns [`LayoutError::Xml`] if the input is not well-formed and
    /// [`LayoutError::Schema`] if it is not a valid layout.
    pub fn into_result(mut self) -> Result<LayoutDocument, LayoutError> {
        if self.parse() {
            return Ok(self.document);
        }

        let message = self.source.error_message().to_string();
        if self.schema_error {
            Err(LayoutError::schema(message))
        } else {
            Err(LayoutError::xml(message))
        }
    }

    fn error(&mut self, message: String) {
        if self.source.has_error() {
            return;
        }

        tracing::debug!("Layout schema error: {}", message);
        self.schema_error = true;
        self.source.raise_error(message);
    }

    fn find_root_element(&mut self) -> Option<String> {
        loop {
            match self.source.advance() {
                XmlEvent::StartElement(name) => return Some(name),
                XmlEvent::EndElement => {}
                XmlEvent::EndOfInput => {
                    self.error("Expected '<keyboard>'.".to_string());
                    return None;
                }
            }
        }
    }

    fn parse_keyboard(&mut self, name: &str) {
        if name != "keyboard" {
            self.error(format!("Expected '<keyboard>', but got '<{name}>'."));
        }

        let attributes = self.source.attributes();
        let version = attributes.value("version").to_string();
        let title = attributes.value("title").to_string();
        let language = attributes.value("language").to_string();
        let catalog = attributes.value("catalog").to_string();
        let autocapitalization = attributes.value("autocapitalization").to_string();
        let autocapitalization = self.bool_value(&autocapitalization, true);

        let keyboard = KeyboardMetadata::new(version, title, language, catalog, autocapitalization);
        tracing::debug!(
            "Keyboard '{}' version {} language '{}'",
            keyboard.title(),
            keyboard.version(),
            keyboard.language()
        );
        self.document.keyboard = Some(keyboard);

        while let Some(child) = self.source.read_next_start_element() {
            match child.as_str() {
                "import" => self.parse_import(),
                "layout" => self.parse_layout(),
                _ => self.error(format!(
                    "Expected '<layout>' or '<import>', but got '<{child}>'."
                )),
            }
        }
    }

    fn bool_value(&mut self, value: &str, default: bool) -> bool {
        match value {
            "" => default,
            "true" | "1" => true,
            "false" | "0" => false,
            _ => {
                self.error(format!(
                    "Excpected 'true', 'false', '1' or '0', but got '{value}'."
                ));
                default
            }
        }
    }

    fn enum_value<K: Keyword>(&mut self, attribute: &str) -> K {
        if self.source.has_error() {
            return K::default();
        }

        let value = self.source.attributes().value(attribute).to_string();
        if value.is_empty() {
            return K::default();
        }

        K::parse(&value).unwrap_or_else(|| {
            self.error(format!(
                "Expected one of {}, but got '{value}'.",
                K::candidates()
            ));
            K::default()
        })
    }

    fn parse_import(&mut self) {
        let file = self.source.attributes().value("file").to_string();
        if !file.is_empty() {
            tracing::debug!("Import of '{}'", file);
            self.document.imports.push(file);
        }

        self.source.skip_current_element();
    }

    fn parse_layout(&mut self) {
        let layout_type: LayoutType = self.enum_value("type");
        let orientation: LayoutOrientation = self.enum_value("orientation");

        tracing::debug!("Layout {} ({})", layout_type, orientation);
        self.document
            .layouts
            .push(LayoutDescriptor::new(layout_type, orientation));

        let mut found_section = false;

        while let Some(child) = self.source.read_next_start_element() {
            if child == "section" {
                found_section = true;
                self.parse_section();
            } else {
                self.error(format!("Expected '<section>', but got '<{child}>'."));
            }
        }

        if !found_section {
            self.error("Expected '<section>'.".to_string());
        }
    }

    fn parse_section(&mut self) {
        while let Some(child) = self.source.read_next_start_element() {
            if child == "row" {
                self.parse_row();
            } else {
                self.error(format!("Expected '<row>', but got '<{child}>'."));
            }
        }
    }

    fn parse_row(&mut self) {
        while let Some(child) = self.source.read_next_start_element() {
            if child == "key" {
                self.parse_key();
            } else {
                self.error(format!("Expected '<key>', but got '<{child}>'."));
            }
        }
    }

    fn parse_key(&mut self) {
        while let Some(child) = self.source.read_next_start_element() {
            if child == "binding" {
                // Binding attributes are not interpreted.
                self.source.skip_current_element();
            } else {
                self.error(format!("Expected '<binding>', but got '<{child}>'."));
            }
        }
    }

    fn read_to_end(&mut self) {
        while self.source.advance() != XmlEvent::EndOfInput {}
    }
}
