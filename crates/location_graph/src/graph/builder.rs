//! Pass 1: node identities.

use super::ensure_synthetic;
use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::model::{Coordinates, LocationMap, LocationNode, Region};
use crate::normalize::{constant_key, display_name_guess, normalize};
use crate::sources::{LandmarkConstant, MapAttributes, MapWarps};
use tracing::debug;

/// Builds the initial node map from the constant table and per-map sources.
pub struct LocationGraphBuilder<'a> {
    constants: &'a [LandmarkConstant],
    coordinates: &'a [Coordinates],
    attributes: &'a [MapAttributes],
    warps: &'a [MapWarps],
    sentinel: &'a str,
}

impl<'a> LocationGraphBuilder<'a> {
    pub fn new(constants: &'a [LandmarkConstant], sentinel: &'a str) -> Self {
        Self {
            constants,
            coordinates: &[],
            attributes: &[],
            warps: &[],
            sentinel,
        }
    }

    /// Coordinates aligned by position with the constant table
    pub fn coordinates(mut self, coordinates: &'a [Coordinates]) -> Self {
        self.coordinates = coordinates;
        self
    }

    pub fn attributes(mut self, attributes: &'a [MapAttributes]) -> Self {
        self.attributes = attributes;
        self
    }

    pub fn warps(mut self, warps: &'a [MapWarps]) -> Self {
        self.warps = warps;
        self
    }

    pub fn build(&self, diagnostics: &mut Diagnostics) -> LocationMap {
        let mut map = self.landmark_nodes(diagnostics);
        self.apply_coordinates(&mut map);
        let landmarks = map.len();
        self.synthesize_referenced(&mut map);

        debug!(
            landmarks,
            synthetic = map.len() - landmarks,
            "built location identities"
        );
        map
    }

    fn is_sentinel(&self, constant: &LandmarkConstant) -> bool {
        constant.name == self.sentinel
    }

    /// One node per constant; region carries forward from the last marker.
    fn landmark_nodes(&self, diagnostics: &mut Diagnostics) -> LocationMap {
        let mut map = LocationMap::with_capacity(self.constants.len());
        let mut region = Region::default();

        for constant in self.constants {
            if let Some(marker) = constant.region_marker {
                region = marker;
            }
            if self.is_sentinel(constant) {
                continue;
            }

            let key = constant_key(&constant.name);
            if map.contains_key(&key) {
                diagnostics.push(Diagnostic::MalformedRecord {
                    source: "constant table".to_string(),
                    detail: format!("duplicate constant {} at index {}", constant.name, constant.index),
                });
                continue;
            }

            let Ok(id) = i32::try_from(constant.index) else {
                diagnostics.push(Diagnostic::MalformedRecord {
                    source: "constant table".to_string(),
                    detail: format!("index {} of {} does not fit a landmark id", constant.index, constant.name),
                });
                continue;
            };

            let display_name = constant
                .display_name
                .clone()
                .unwrap_or_else(|| display_name_guess(&constant.name));
            let mut node = LocationNode::landmark(&key, id, display_name, region);
            node.flyable = constant.flyable;
            node.spawn_point = constant.spawn_point.clone();
            map.insert(key, node);
        }
        map
    }

    /// Coordinates attach by list position, not by name. If the two tables
    /// drift apart the pairs misattach; that is the upstream contract.
    fn apply_coordinates(&self, map: &mut LocationMap) {
        if self.coordinates.len() != self.constants.len() {
            debug!(
                constants = self.constants.len(),
                coordinates = self.coordinates.len(),
                "coordinate table length differs from constant table"
            );
        }

        for (constant, coordinates) in self.constants.iter().zip(self.coordinates) {
            if self.is_sentinel(constant) {
                continue;
            }
            if let Some(node) = map.get_mut(&constant_key(&constant.name)) {
                node.coordinates = *coordinates;
            }
        }
    }

    /// Placeholder nodes for maps that only attribute or warp data mention.
    fn synthesize_referenced(&self, map: &mut LocationMap) {
        for block in self.attributes {
            ensure_synthetic(map, &normalize(&block.map), &block.map);
            for connection in &block.connections {
                ensure_synthetic(map, &constant_key(&connection.target), &connection.target);
            }
        }
        for block in self.warps {
            ensure_synthetic(map, &normalize(&block.map), &block.map);
            for warp in &block.warps {
                ensure_synthetic(map, &constant_key(&warp.target), &warp.target);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NON_LANDMARK_ID;
    use crate::sources::{CardinalDirection, MapConnection, WarpTarget};

    fn constants(names: &[&str]) -> Vec<LandmarkConstant> {
        names
            .iter()
            .enumerate()
            .map(|(i, name)| LandmarkConstant::new(*name, i))
            .collect()
    }

    #[test]
    fn test_one_node_per_constant_except_sentinel() {
        let table = constants(&["SPECIAL_MAP", "NEW_BARK_TOWN", "ROUTE_29", "CHERRYGROVE_CITY"]);
        let mut diagnostics = Diagnostics::new();
        let map = LocationGraphBuilder::new(&table, "SPECIAL_MAP").build(&mut diagnostics);

        assert_eq!(map.len(), 3);
        assert!(!map.contains_key("special_map"));
        assert_eq!(map["new_bark_town"].id, 1);
        assert_eq!(map["route_29"].id, 2);
        assert_eq!(map["cherrygrove_city"].id, 3);
        assert_eq!(map["route_29"].display_name, "Route 29");
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_region_follows_nearest_marker() {
        let mut table = constants(&["NEW_BARK_TOWN", "ROUTE_29", "PALLET_TOWN", "ROUTE_1", "VALENCIA_ISLAND"]);
        table[2].region_marker = Some(Region::Kanto);
        table[4].region_marker = Some(Region::Orange);

        let mut diagnostics = Diagnostics::new();
        let map = LocationGraphBuilder::new(&table, "SPECIAL_MAP").build(&mut diagnostics);

        assert_eq!(map["new_bark_town"].region, Region::Johto);
        assert_eq!(map["route_29"].region, Region::Johto);
        assert_eq!(map["pallet_town"].region, Region::Kanto);
        assert_eq!(map["route_1"].region, Region::Kanto);
        assert_eq!(map["valencia_island"].region, Region::Orange);
    }

    #[test]
    fn test_coordinates_attach_by_position() {
        let table = constants(&["SPECIAL_MAP", "NEW_BARK_TOWN", "ROUTE_29"]);
        let coordinates = [Coordinates::new(0, 0), Coordinates::new(10, 5), Coordinates::new(12, 6)];
        let mut diagnostics = Diagnostics::new();
        let map = LocationGraphBuilder::new(&table, "SPECIAL_MAP")
            .coordinates(&coordinates)
            .build(&mut diagnostics);

        assert_eq!(map["new_bark_town"].coordinates, Coordinates::new(10, 5));
        assert_eq!(map["route_29"].coordinates, Coordinates::new(12, 6));
    }

    #[test]
    fn test_short_coordinate_table_shifts_nothing_in() {
        // One pair short: the last landmark stays unknown, the others keep their slot
        let table = constants(&["NEW_BARK_TOWN", "ROUTE_29", "VIOLET_CITY"]);
        let coordinates = [Coordinates::new(10, 5), Coordinates::new(12, 6)];
        let mut diagnostics = Diagnostics::new();
        let map = LocationGraphBuilder::new(&table, "SPECIAL_MAP")
            .coordinates(&coordinates)
            .build(&mut diagnostics);

        assert_eq!(map["route_29"].coordinates, Coordinates::new(12, 6));
        assert!(!map["violet_city"].coordinates.is_known());
    }

    #[test]
    fn test_misaligned_tables_misattach() {
        // Coordinates listed in a different order than constants land on the wrong node
        let table = constants(&["NEW_BARK_TOWN", "ROUTE_29"]);
        let coordinates = [Coordinates::new(12, 6), Coordinates::new(10, 5)];
        let mut diagnostics = Diagnostics::new();
        let map = LocationGraphBuilder::new(&table, "SPECIAL_MAP")
            .coordinates(&coordinates)
            .build(&mut diagnostics);

        assert_eq!(map["new_bark_town"].coordinates, Coordinates::new(12, 6));
    }

    #[test]
    fn test_referenced_maps_become_synthetic() {
        let table = constants(&["NEW_BARK_TOWN"]);
        let attributes = [MapAttributes {
            map: "NewBarkTown".to_string(),
            connections: vec![MapConnection {
                direction: CardinalDirection::West,
                target: "ROUTE_29".to_string(),
                offset: 0,
            }],
        }];
        let warps = [MapWarps {
            map: "ElmsLab".to_string(),
            warps: vec![WarpTarget {
                target: "NEW_BARK_TOWN".to_string(),
            }],
        }];

        let mut diagnostics = Diagnostics::new();
        let map = LocationGraphBuilder::new(&table, "SPECIAL_MAP")
            .attributes(&attributes)
            .warps(&warps)
            .build(&mut diagnostics);

        assert_eq!(map.len(), 3);
        assert_eq!(map["new_bark_town"].id, 0);
        assert_eq!(map["route_29"].id, NON_LANDMARK_ID);
        assert_eq!(map["elms_lab"].id, NON_LANDMARK_ID);
        assert_eq!(map["elms_lab"].display_name, "Elms Lab");
        assert_eq!(map["elms_lab"].region, Region::Johto);
    }

    #[test]
    fn test_synthetic_region_uses_markers() {
        let warps = [MapWarps {
            map: "CeladonMansionRoof".to_string(),
            warps: vec![],
        }];
        let mut diagnostics = Diagnostics::new();
        let map = LocationGraphBuilder::new(&[], "SPECIAL_MAP")
            .warps(&warps)
            .build(&mut diagnostics);

        assert_eq!(map["celadon_mansion_roof"].region, Region::Kanto);
    }

    #[test]
    fn test_duplicate_constant_is_reported() {
        let table = constants(&["ROUTE_29", "ROUTE_29"]);
        let mut diagnostics = Diagnostics::new();
        let map = LocationGraphBuilder::new(&table, "SPECIAL_MAP").build(&mut diagnostics);

        assert_eq!(map.len(), 1);
        assert_eq!(map["route_29"].id, 0);
        assert_eq!(diagnostics.count_kind("malformed_record"), 1);
    }

    #[test]
    fn test_index_out_of_id_range_is_reported() {
        let mut table = constants(&["NEW_BARK_TOWN", "ROUTE_29"]);
        table[1].index = i32::MAX as usize + 1;
        let mut diagnostics = Diagnostics::new();
        let map = LocationGraphBuilder::new(&table, "SPECIAL_MAP").build(&mut diagnostics);

        assert_eq!(map.len(), 1);
        assert!(!map.contains_key("route_29"));
        assert_eq!(diagnostics.count_kind("malformed_record"), 1);
    }
}
