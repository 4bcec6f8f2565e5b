//! # Keylayout
//!
//! Parsing and validation of virtual-keyboard layout files.
//!
//! A layout file is an XML document with a `keyboard` root that carries
//! metadata, `import` references to other layout files and `layout`
//! definitions made of `section`, `row`, `key` and `binding` elements.
//!
//! ## Quick Start
//!
//! ```no_run
//! use keylayout::prelude::*;
//!
//! let document = keylayout::parse_file("de.xml")?;
//! for layout in &document.layouts {
//!     println!("{} / {}", layout.layout_type(), layout.orientation());
//! }
//! # Ok::<(), keylayout::LoadError>(())
//! ```
//!
//! ## Crate Organization
//!
//! - [`schema`] - Value objects, event source and the validating parser
//! - [`load`] - Convenience entry points for strings, readers and files

pub mod error;
pub mod load;
pub mod prelude;

/// Layout schema parsing.
pub mod schema {
    pub use keylayout_schema::*;
}

pub use error::LoadError;
pub use load::{parse_file, parse_reader, parse_str};

pub use keylayout_schema::{
    KeyboardMetadata, LayoutDescriptor, LayoutDocument, LayoutError, LayoutOrientation,
    LayoutParser, LayoutType,
};
