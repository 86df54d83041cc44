//! Generate IDENTITIES.md from the identity registry.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin gen-identities
//! ```
//!
//! The generated file is written to `soil_core/src/identities/IDENTITIES.md`.

use std::fs;
use std::path::Path;

use soil_core::identities::{generate_identities_markdown, ALL_IDENTITIES};

fn main() {
    println!("Generating IDENTITIES.md...");

    let markdown = generate_identities_markdown();

    // Relative to workspace root
    let output_path = Path::new("soil_core/src/identities/IDENTITIES.md");

    match fs::write(output_path, &markdown) {
        Ok(()) => {
            println!("Successfully wrote {} bytes to {}", markdown.len(), output_path.display());
            println!("{} identities documented.", ALL_IDENTITIES.len());
        }
        Err(e) => {
            eprintln!("Error writing file: {}", e);
            std::process::exit(1);
        }
    }
}
