//! # Keylayout Schema
//!
//! Validating parser for virtual-keyboard layout XML files.
//!
//! This crate provides:
//! - Value objects for keyboard metadata and layout descriptors
//! - A pull-based event source over `quick_xml` with well-formedness checks
//! - A recursive-descent parser enforcing the layout vocabulary
//!
//! ```
//! use keylayout_schema::{LayoutParser, LayoutType};
//!
//! let mut parser = LayoutParser::from_str(
//!     r#"<keyboard title="Deutsch"><layout type="email"><section/></layout></keyboard>"#,
//! );
//! assert!(parser.parse());
//! assert_eq!(parser.layouts()[0].layout_type(), LayoutType::Email);
//! ```

pub mod error;
pub mod parser;
pub mod source;
pub mod types;

pub use error::LayoutError;
pub use parser::LayoutParser;
pub use source::{Attributes, EventSource, XmlEvent, XmlEventSource};
pub use types::{
    DEFAULT_VERSION, KeyboardMetadata, Keyword, LayoutDescriptor, LayoutDocument,
    LayoutOrientation, LayoutType,
};
