//! Prelude module for convenient imports.
//!
//! ```ignore
//! use keylayout::prelude::*;
//! ```

pub use crate::error::LoadError;
pub use crate::load::{parse_file, parse_reader, parse_str};

pub use keylayout_schema::{
    EventSource, KeyboardMetadata, Keyword, LayoutDescriptor, LayoutDocument, LayoutError,
    LayoutOrientation, LayoutParser, LayoutType, XmlEventSource,
};
