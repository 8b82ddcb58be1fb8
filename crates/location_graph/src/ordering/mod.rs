//! Total, reproducible narrative order.
//!
//! Landmark ids are sparse and most sub-areas have none, so order comes
//! from region first, then the curated table, then inference from the
//! nearest listed prefix. Remaining ties fall back to landmark id,
//! landmark-before-synthetic, and finally the key itself.

mod table;

pub use table::{OrderTable, UNPLACED_OFFSET};

use crate::model::{LocationMap, LocationNode, REGION_SUFFIX};
use indexmap::IndexMap;
use std::cmp::Ordering;
use std::collections::HashMap;
use tracing::debug;

/// Canonical key -> order number
pub type OrderIndex = IndexMap<String, f64>;

/// A node with its computed order number.
#[derive(Clone, Debug, PartialEq)]
pub struct RankedLocation {
    pub order: f64,
    pub node: LocationNode,
}

/// Nodes sorted into their final order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct OrderedLocations {
    locations: Vec<RankedLocation>,
}

impl OrderedLocations {
    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RankedLocation> {
        self.locations.iter()
    }

    pub fn nodes(&self) -> impl Iterator<Item = &LocationNode> {
        self.locations.iter().map(|ranked| &ranked.node)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.nodes().map(|node| node.canonical_key.as_str())
    }

    pub fn get(&self, key: &str) -> Option<&LocationNode> {
        self.nodes().find(|node| node.canonical_key == key)
    }
}

pub struct OrderingEngine<'t> {
    table: &'t OrderTable,
}

impl<'t> OrderingEngine<'t> {
    pub fn new(table: &'t OrderTable) -> Self {
        Self { table }
    }

    /// Order number of every key in `map`, in discovery order.
    pub fn order_index(&self, map: &LocationMap) -> OrderIndex {
        let mut inferred: HashMap<&str, f64> = HashMap::new();
        let mut index = OrderIndex::with_capacity(map.len());
        let mut unplaced = 0usize;

        for key in map.keys() {
            let order = match self.table.position(key) {
                Some(position) => position as f64,
                None => match self.infer(key, &inferred) {
                    Some(order) => {
                        inferred.insert(key, order);
                        order
                    }
                    None => {
                        unplaced += 1;
                        self.table.unplaced_order()
                    }
                },
            };
            index.insert(key.clone(), order);
        }

        debug!(
            curated = index.len() - inferred.len() - unplaced,
            inferred = inferred.len(),
            unplaced,
            "computed order index"
        );
        index
    }

    /// Strip trailing tokens until a listed (or already inferred) parent is found.
    fn infer(&self, key: &str, inferred: &HashMap<&str, f64>) -> Option<f64> {
        if key.ends_with(REGION_SUFFIX) {
            return None;
        }
        let mut candidate = key;
        while let Some((parent, _)) = candidate.rsplit_once('_') {
            let parent_order = self
                .table
                .position(parent)
                .map(|position| position as f64)
                .or_else(|| inferred.get(parent).copied());
            if let Some(order) = parent_order {
                return Some(order + 0.5);
            }
            candidate = parent;
        }
        None
    }

    pub fn order(&self, map: LocationMap) -> OrderedLocations {
        let index = self.order_index(&map);
        let unplaced = self.table.unplaced_order();

        let mut locations: Vec<RankedLocation> = map
            .into_iter()
            .map(|(key, node)| RankedLocation {
                order: index.get(&key).copied().unwrap_or(unplaced),
                node,
            })
            .collect();
        locations.sort_by(compare_ranked);
        OrderedLocations { locations }
    }
}

/// Final comparator: region, order number, landmark id (both landmarks),
/// landmarks before synthetic nodes, key.
pub fn compare_ranked(a: &RankedLocation, b: &RankedLocation) -> Ordering {
    let (x, y) = (&a.node, &b.node);
    x.region
        .cmp(&y.region)
        .then_with(|| a.order.total_cmp(&b.order))
        .then_with(|| {
            if x.is_landmark() && y.is_landmark() {
                x.id.cmp(&y.id)
            } else {
                Ordering::Equal
            }
        })
        .then_with(|| y.is_landmark().cmp(&x.is_landmark()))
        .then_with(|| x.canonical_key.cmp(&y.canonical_key))
}
