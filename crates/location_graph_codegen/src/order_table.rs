//! Curated narrative order table generation.

use crate::models::{is_canonical_form, OrderTableFile};
use proc_macro2::TokenStream;
use quote::quote;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Generate CURATED_GROUPS and CURATED_LEN
pub fn generate(out_dir: &Path, data_dir: &Path) {
    let json =
        fs::read_to_string(data_dir.join("location_order.json")).expect("location_order.json");
    let table: OrderTableFile = serde_json::from_str(&json).expect("parse location_order");

    // Every key gets exactly one slot once the table is flattened
    let mut seen = HashSet::new();
    for group in &table.groups {
        for key in group.keys() {
            assert!(
                is_canonical_form(key),
                "location_order.json: `{}` is not a canonical key",
                key
            );
            assert!(
                seen.insert(key.to_string()),
                "location_order.json: `{}` listed twice",
                key
            );
        }
    }

    let count = seen.len();

    let groups: Vec<TokenStream> = table
        .groups
        .iter()
        .map(|group| {
            let keys = group.keys();
            quote! { &[#(#keys),*] }
        })
        .collect();

    let code = quote! {
        /// Curated narrative order: one group per landmark, followed by
        /// the floors, buildings and gates visited alongside it.
        pub static CURATED_GROUPS: &[&[&str]] = &[
            #(#groups),*
        ];

        /// Number of keys in the flattened table
        pub const CURATED_LEN: usize = #count;
    };

    let dest = out_dir.join("order_table.rs");
    fs::write(&dest, code.to_string()).expect("write order_table.rs");
}
