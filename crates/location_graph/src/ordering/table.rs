//! Curated narrative order table.

use crate::order_table::CURATED_GROUPS;
use std::collections::HashMap;

/// Order numbers this far past the table mark keys nothing could place.
pub const UNPLACED_OFFSET: f64 = 10000.0;

/// Flattened curated groups: every listed key gets its position as order.
#[derive(Clone, Debug)]
pub struct OrderTable {
    positions: HashMap<String, usize>,
    len: usize,
}

impl OrderTable {
    /// The table generated from `data/location_order.json`
    pub fn curated() -> Self {
        Self::from_groups(CURATED_GROUPS)
    }

    /// Build from groups of keys, each a landmark followed by its sub-areas.
    /// A key listed twice keeps its first position.
    pub fn from_groups<G, S>(groups: &[G]) -> Self
    where
        G: AsRef<[S]>,
        S: AsRef<str>,
    {
        let mut positions = HashMap::new();
        let mut len = 0usize;
        for key in groups.iter().flat_map(|group| group.as_ref()) {
            positions.entry(key.as_ref().to_string()).or_insert(len);
            len += 1;
        }
        Self { positions, len }
    }

    pub fn position(&self, key: &str) -> Option<usize> {
        self.positions.get(key).copied()
    }

    /// Flattened table length
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Order number given to keys neither listed nor inferable
    pub fn unplaced_order(&self) -> f64 {
        self.len as f64 + UNPLACED_OFFSET
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order_table::CURATED_LEN;

    #[test]
    fn test_flattened_positions() {
        let table = OrderTable::from_groups(&[
            vec!["new_bark_town", "elms_lab"],
            vec!["route_29"],
            vec!["cherrygrove_city", "cherrygrove_mart"],
        ]);
        assert_eq!(table.len(), 5);
        assert_eq!(table.position("new_bark_town"), Some(0));
        assert_eq!(table.position("route_29"), Some(2));
        assert_eq!(table.position("cherrygrove_mart"), Some(4));
        assert_eq!(table.position("violet_city"), None);
        assert_eq!(table.unplaced_order(), 10005.0);
    }

    #[test]
    fn test_duplicate_keeps_first_position() {
        let table = OrderTable::from_groups(&[vec!["route_29", "route_30"], vec!["route_29"]]);
        assert_eq!(table.position("route_29"), Some(0));
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn test_curated_table_starts_in_new_bark() {
        let table = OrderTable::curated();
        assert_eq!(table.len(), CURATED_LEN);
        assert_eq!(table.position("new_bark_town"), Some(0));
        assert!(table.position("route_29") < table.position("violet_city"));
        assert!(table.position("sprout_tower_1f") < table.position("sprout_tower_2f"));
        assert!(table.position("pallet_town").is_some());
    }
}
