//! JSON deserialization structures for the curated data files.

use serde::Deserialize;
use std::collections::BTreeMap;

#[derive(Deserialize)]
pub struct OrderTableFile {
    pub groups: Vec<OrderGroup>,
}

/// One narrative stop: a landmark followed by the sub-areas visited with it.
#[derive(Deserialize)]
pub struct OrderGroup {
    pub landmark: String,
    #[serde(default)]
    pub areas: Vec<String>,
}

impl OrderGroup {
    /// Landmark first, then its areas in authored order.
    pub fn keys(&self) -> Vec<&str> {
        std::iter::once(self.landmark.as_str())
            .chain(self.areas.iter().map(String::as_str))
            .collect()
    }
}

#[derive(Deserialize)]
pub struct TrainerAliasFile {
    #[allow(dead_code)]
    pub description: Option<String>,
    pub aliases: BTreeMap<String, String>,
}

/// Curated keys are written already canonical: lowercase, underscore separated.
pub fn is_canonical_form(key: &str) -> bool {
    !key.is_empty()
        && !key.starts_with('_')
        && !key.ends_with('_')
        && !key.contains("__")
        && key
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
}
