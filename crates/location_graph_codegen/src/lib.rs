//! Code generation helpers for location_graph.
//!
//! This crate parses the hand-authored JSON tables under `data/`
//! and generates static Rust lookup data for the location pipeline.

mod models;
mod order_table;
mod trainer_aliases;

use std::path::Path;
use std::println;

/// Generate all code from the data directory into the output directory.
///
/// This is the main entry point called from location_graph's build.rs.
pub fn generate_all(out_dir: &Path, data_dir: &Path) {
    // Rerun if any data file changes
    for file in &["location_order.json", "trainer_aliases.json"] {
        println!("cargo:rerun-if-changed={}", data_dir.join(file).display());
    }

    order_table::generate(out_dir, data_dir);
    trainer_aliases::generate(out_dir, data_dir);
}
