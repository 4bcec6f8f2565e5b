//! Validates keyboard layout files and prints what they contain.
//!
//! Run with: `cargo run --example validate -- path/to/layout.xml [...]`
//!
//! Set `RUST_LOG=debug` to trace the parser.

use keylayout::prelude::*;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let paths: Vec<String> = std::env::args().skip(1).collect();
    if paths.is_empty() {
        anyhow::bail!("usage: validate <layout.xml>...");
    }

    let mut failures = 0;

    for path in &paths {
        match parse_file(path) {
            Ok(document) => print_document(path, &document),
            Err(e) => {
                failures += 1;
                eprintln!("[{path}] invalid: {e}");
            }
        }
    }

    if failures > 0 {
        anyhow::bail!("{failures} of {} file(s) failed validation", paths.len());
    }

    Ok(())
}

fn print_document(path: &str, document: &LayoutDocument) {
    println!("[{path}] valid");

    if let Some(keyboard) = &document.keyboard {
        println!(
            "  keyboard: title='{}' version={} language='{}' catalog='{}' autocapitalization={}",
            keyboard.title(),
            keyboard.version(),
            keyboard.language(),
            keyboard.catalog(),
            keyboard.autocapitalization()
        );
    }

    for import in &document.imports {
        println!("  import: {import}");
    }

    for layout in &document.layouts {
        println!("  layout: {} ({})", layout.layout_type(), layout.orientation());
    }
}
