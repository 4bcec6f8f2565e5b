//! Layout type definitions.
//!
//! This module contains the value objects produced by the layout parser:
//! keyboard metadata, layout descriptors and the keyword enums used by the
//! `layout` element attributes.

use std::fmt;

/// Version reported when the `keyboard` element carries no `version` attribute.
pub const DEFAULT_VERSION: &str = "1.0";

/// An attribute value drawn from a fixed, case-sensitive vocabulary.
pub trait Keyword: Sized + Copy + Default + 'static {
    /// Every variant, in vocabulary order.
    const ALL: &'static [Self];

    /// Returns the XML spelling of the variant.
    fn as_str(self) -> &'static str;

    /// Parses the XML spelling of a variant.
    fn parse(s: &str) -> Option<Self>;

    /// Returns the vocabulary as `'a', 'b', 'c'` for error messages.
    #[must_use]
    fn candidates() -> String {
        let names: Vec<&str> = Self::ALL.iter().map(|k| k.as_str()).collect();
        format!("'{}'", names.join("', '"))
    }
}

/// Metadata carried by the `keyboard` root element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyboardMetadata {
    version: String,
    title: String,
    language: String,
    catalog: String,
    autocapitalization: bool,
}

impl KeyboardMetadata {
    /// Creates keyboard metadata, substituting [`DEFAULT_VERSION`] for an
    /// empty version.
    #[must_use]
    pub fn new(
        version: impl Into<String>,
        title: impl Into<String>,
        language: impl Into<String>,
        catalog: impl Into<String>,
        autocapitalization: bool,
    ) -> Self {
        let version = version.into();
        Self {
            version: if version.is_empty() {
                DEFAULT_VERSION.to_string()
            } else {
                version
            },
            title: title.into(),
            language: language.into(),
            catalog: catalog.into(),
            autocapitalization,
        }
    }

    /// Layout file format version.
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Human readable keyboard title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Language the keyboard is meant for.
    #[must_use]
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Translation catalog name.
    #[must_use]
    pub fn catalog(&self) -> &str {
        &self.catalog
    }

    /// Whether the keyboard capitalizes automatically.
    #[must_use]
    pub const fn autocapitalization(&self) -> bool {
        self.autocapitalization
    }
}

impl Default for KeyboardMetadata {
    fn default() -> Self {
        Self::new("", "", "", "", true)
    }
}

/// Kind of text input a layout is designed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LayoutType {
    /// General purpose text entry.
    #[default]
    General,
    /// URL entry.
    Url,
    /// E-mail address entry.
    Email,
    /// Numeric entry.
    Number,
    /// Phone number entry.
    PhoneNumber,
    /// Keys shared by every layout of the keyboard.
    Common,
}

impl Keyword for LayoutType {
    const ALL: &'static [Self] = &[
        Self::General,
        Self::Url,
        Self::Email,
        Self::Number,
        Self::PhoneNumber,
        Self::Common,
    ];

    fn as_str(self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Url => "url",
            Self::Email => "email",
            Self::Number => "number",
            Self::PhoneNumber => "phonenumber",
            Self::Common => "common",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s {
            "general" => Some(Self::General),
            "url" => Some(Self::Url),
            "email" => Some(Self::Email),
            "number" => Some(Self::Number),
            "phonenumber" => Some(Self::PhoneNumber),
            "common" => Some(Self::Common),
            _ => None,
        }
    }
}

impl fmt::Display for LayoutType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Screen orientation a layout applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LayoutOrientation {
    /// Landscape orientation.
    #[default]
    Landscape,
    /// Portrait orientation.
    Portrait,
}

impl Keyword for LayoutOrientation {
    const ALL: &'static [Self] = &[Self::Landscape, Self::Portrait];

    fn as_str(self) -> &'static str {
        match self {
            Self::Landscape => "landscape",
            Self::Portrait => "portrait",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s {
            "landscape" => Some(Self::Landscape),
            "portrait" => Some(Self::Portrait),
            _ => None,
        }
    }
}

impl fmt::Display for LayoutOrientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Type and orientation of one `layout` element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct LayoutDescriptor {
    layout_type: LayoutType,
    orientation: LayoutOrientation,
}

impl LayoutDescriptor {
    /// Creates a new layout descriptor.
    #[must_use]
    pub const fn new(layout_type: LayoutType, orientation: LayoutOrientation) -> Self {
        Self {
            layout_type,
            orientation,
        }
    }

    /// Input kind of the layout.
    #[must_use]
    pub const fn layout_type(&self) -> LayoutType {
        self.layout_type
    }

    /// Orientation of the layout.
    #[must_use]
    pub const fn orientation(&self) -> LayoutOrientation {
        self.orientation
    }
}

/// Everything collected from one layout file.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LayoutDocument {
    /// Root metadata; `None` if parsing failed before the root was read.
    pub keyboard: Option<KeyboardMetadata>,
    /// Files referenced by `import` elements, in document order.
    pub imports: Vec<String>,
    /// Layouts in document order.
    pub layouts: Vec<LayoutDescriptor>,
}
