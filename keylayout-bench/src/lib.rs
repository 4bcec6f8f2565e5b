//! # Keylayout Bench
//!
//! Benchmarking utilities for keylayout performance testing.

use std::fmt::Write;

/// Builds a layout document with `layouts` layouts of `rows` rows and
/// `keys` keys per row, each key carrying two bindings.
#[must_use]
pub fn generate_layout(layouts: usize, rows: usize, keys: usize) -> String {
    let mut xml = String::from(r#"<?xml version="1.0" encoding="utf-8"?>"#);
    xml.push_str(r#"<keyboard title="Bench" version="1.0" language="en" catalog="en">"#);
    xml.push_str(r#"<import file="common.xml"/>"#);

    for layout in 0..layouts {
        let orientation = if layout % 2 == 0 { "landscape" } else { "portrait" };
        write!(xml, r#"<layout type="general" orientation="{orientation}">"#)
            .expect("write to String");
        xml.push_str(r#"<section id="main">"#);
        for _ in 0..rows {
            xml.push_str("<row>");
            for key in 0..keys {
                let label = char::from(b'a' + (key % 26) as u8);
                write!(
                    xml,
                    r#"<key><binding label="{label}"/><binding shift="true" label="{}"/></key>"#,
                    label.to_ascii_uppercase()
                )
                .expect("write to String");
            }
            xml.push_str("</row>");
        }
        xml.push_str("</section></layout>");
    }

    xml.push_str("</keyboard>");
    xml
}

#[cfg(test)]
mod tests {
    use super::*;
    use keylayout_schema::LayoutParser;

    #[test]
    fn test_generated_layout_is_valid() {
        let xml = generate_layout(2, 3, 10);
        let mut parser = LayoutParser::from_str(&xml);
        assert!(parser.parse(), "{}", parser.error_string());
        assert_eq!(parser.layouts().len(), 2);
        assert_eq!(parser.imports(), ["common.xml"]);
    }
}
