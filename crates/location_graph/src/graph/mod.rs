//! Initial graph construction.
//!
//! Pass 1 ([`LocationGraphBuilder`]) collects every node identity from the
//! constant table and the per-map sources. Pass 2 ([`ConnectionResolver`])
//! attaches edges between them and refreshes the cached target names.

mod builder;
mod connections;
pub mod region_rules;

pub use builder::LocationGraphBuilder;
pub use connections::{patch_target_names, ConnectionResolver};
pub use region_rules::{infer_region, RegionRule, REGION_RULES};

use crate::model::{LocationMap, LocationNode};
use crate::normalize::display_name_guess;

/// Insert a placeholder node for `key` unless one exists. Returns true if created.
pub(crate) fn ensure_synthetic(map: &mut LocationMap, key: &str, raw: &str) -> bool {
    if map.contains_key(key) {
        return false;
    }
    let node = LocationNode::synthetic(key, display_name_guess(raw), infer_region(key));
    map.insert(key.to_string(), node);
    true
}
