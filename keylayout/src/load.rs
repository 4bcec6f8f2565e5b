//! Entry points for parsing layouts from strings, readers and files.

use crate::error::LoadError;
use keylayout_schema::{LayoutDocument, LayoutError, LayoutParser};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Parses a layout document held in memory.
///
/// # Errors
/// Returns `LayoutError` if the document is malformed or not a valid layout.
pub fn parse_str(xml: &str) -> Result<LayoutDocument, LayoutError> {
    LayoutParser::from_str(xml).into_result()
}

/// Parses a layout document from a buffered reader.
///
/// # Errors
/// Returns `LayoutError` if the document is malformed or not a valid layout.
/// Read failures are reported as [`LayoutError::Xml`].
pub fn parse_reader<R: BufRead>(reader: R) -> Result<LayoutDocument, LayoutError> {
    LayoutParser::from_reader(reader).into_result()
}

/// Parses the layout file at `path`.
///
/// Imported files are listed in the result but not loaded.
///
/// # Errors
/// Returns `LoadError::Io` if the file cannot be opened and
/// `LoadError::Layout` if its content is rejected.
pub fn parse_file(path: impl AsRef<Path>) -> Result<LayoutDocument, LoadError> {
    let path = path.as_ref();
    let file = File::open(path)?;

    match parse_reader(BufReader::new(file)) {
        Ok(document) => {
            tracing::info!(
                "Loaded {}: {} layout(s), {} import(s)",
                path.display(),
                document.layouts.len(),
                document.imports.len()
            );
            Ok(document)
        }
        Err(e) => {
            tracing::warn!("Rejected {}: {}", path.display(), e);
            Err(e.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use keylayout_schema::{LayoutDescriptor, LayoutOrientation, LayoutType};
    use std::io::Write;

    const LAYOUT: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<keyboard version="2.1" title="Suomi" language="fi" catalog="fi" autocapitalization="1">
    <import file="fi-common.xml"/>
    <layout type="general" orientation="portrait">
        <section id="main">
            <row><key><binding label="ä"/></key></row>
        </section>
    </layout>
</keyboard>
"#;

    fn write_temp(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(content.as_bytes()).expect("write");
        file.flush().expect("flush");
        file
    }

    #[test]
    fn test_parse_file() {
        let file = write_temp(LAYOUT);
        let document = parse_file(file.path()).expect("valid layout");

        let keyboard = document.keyboard.expect("keyboard metadata");
        assert_eq!(keyboard.version(), "2.1");
        assert_eq!(keyboard.title(), "Suomi");
        assert!(keyboard.autocapitalization());
        assert_eq!(document.imports, ["fi-common.xml"]);
        assert_eq!(
            document.layouts,
            [LayoutDescriptor::new(LayoutType::General, LayoutOrientation::Portrait)]
        );
    }

    #[test]
    fn test_parse_file_rejected() {
        let file = write_temp("<keyboard><layout/></keyboard>");
        let err = parse_file(file.path()).unwrap_err();
        let layout = err.layout().expect("layout error");
        assert!(layout.is_schema());
        assert_eq!(err.to_string(), "Expected '<section>'.");
    }

    #[test]
    fn test_parse_file_missing() {
        let dir = tempfile::tempdir().expect("temp dir");
        let err = parse_file(dir.path().join("missing.xml")).unwrap_err();
        assert!(matches!(err, LoadError::Io(_)));
        assert!(err.layout().is_none());
    }

    #[test]
    fn test_parse_str_matches_file() {
        let file = write_temp(LAYOUT);
        let from_file = parse_file(file.path()).expect("valid layout");
        let from_str = parse_str(LAYOUT).expect("valid layout");
        assert_eq!(from_file, from_str);
    }

    #[test]
    fn test_parse_reader_malformed() {
        let err = parse_reader("<keyboard>".as_bytes()).unwrap_err();
        assert_eq!(err, LayoutError::xml("Premature end of document."));
    }
}
