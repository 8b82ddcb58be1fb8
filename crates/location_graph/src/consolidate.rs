//! Merges nodes whose keys collapse onto the same canonical key.
//!
//! Keys reach the graph through different spellings (`union_cave_b1f` from
//! the constant table, `union_cave_b_1f` from map labels). Every key is
//! normalized again here; members of the same group are folded into one
//! node, placed where the group's first member was discovered.

use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::graph::patch_target_names;
use crate::model::{LocationMap, LocationNode, REGION_SUFFIX};
use crate::normalize::normalize;
use indexmap::IndexMap;
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

/// Display names that carry a floor or number are the more specific ones.
static FLOOR_OR_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(b?\d+f|\d+)\b").unwrap());

pub fn consolidate(map: LocationMap, diagnostics: &mut Diagnostics) -> LocationMap {
    let before = map.len();

    let mut groups: IndexMap<String, Vec<(String, LocationNode)>> = IndexMap::new();
    for (key, node) in map {
        groups.entry(normalize(&key)).or_default().push((key, node));
    }

    let mut merged = LocationMap::with_capacity(groups.len());
    for (canonical, members) in groups {
        let node = if members.len() == 1 {
            members.into_iter().next().map(|(_, node)| node)
        } else {
            diagnostics.push(Diagnostic::ConsolidationGroup {
                key: canonical.clone(),
                members: members.iter().map(|(key, _)| key.clone()).collect(),
            });
            merge_group(&canonical, members, diagnostics)
        };
        if let Some(mut node) = node {
            node.canonical_key.clone_from(&canonical);
            merged.insert(canonical, node);
        }
    }

    for node in merged.values_mut() {
        for connection in &mut node.connections {
            connection.target_key = normalize(&connection.target_key);
        }
        let connections = std::mem::take(&mut node.connections);
        node.connections = dedup_by(connections, |a, b| a.dedup_key() == b.dedup_key());
    }

    merged.retain(|key, _| {
        let keep = !key.ends_with(REGION_SUFFIX);
        if !keep {
            diagnostics.push(Diagnostic::RegionFiltered { key: key.clone() });
        }
        keep
    });

    debug!(before, after = merged.len(), "consolidated locations");
    patch_target_names(merged)
}

fn merge_group(
    canonical: &str,
    members: Vec<(String, LocationNode)>,
    diagnostics: &mut Diagnostics,
) -> Option<LocationNode> {
    let display_name = members
        .iter()
        .map(|(_, node)| &node.display_name)
        .find(|name| FLOOR_OR_NUMBER.is_match(name))
        .cloned();
    let leaders = members
        .iter()
        .filter(|(_, node)| node.gym_leader.is_some())
        .count();

    let mut members = members.into_iter().map(|(_, node)| node);
    let mut base = members.next()?;

    for other in members {
        if !base.is_landmark() && other.is_landmark() {
            base.id = other.id;
            base.region = other.region;
        }
        if !base.coordinates.is_known() {
            base.coordinates = other.coordinates;
        }
        base.flyable |= other.flyable;
        if base.spawn_point.is_none() {
            base.spawn_point = other.spawn_point;
        }
        if base.gym_leader.is_none() {
            base.gym_leader = other.gym_leader;
        }

        base.connections.extend(other.connections);
        base.trades.extend(other.trades);
        base.items.extend(other.items);
        base.events.extend(other.events);
        base.tmhms.extend(other.tmhms);
        base.trainers.extend(other.trainers);
    }

    if let Some(name) = display_name {
        base.display_name = name;
    }
    if leaders > 1 {
        diagnostics.push(Diagnostic::AmbiguousMerge {
            key: canonical.to_string(),
            field: "gymLeader",
            candidates: leaders,
        });
    }

    base.trades = dedup_by(std::mem::take(&mut base.trades), |a, b| a.dedup_key() == b.dedup_key());
    base.items = dedup_by(std::mem::take(&mut base.items), |a, b| a.dedup_key() == b.dedup_key());
    base.events = dedup_by(std::mem::take(&mut base.events), |a, b| a.dedup_key() == b.dedup_key());
    base.tmhms = dedup_by(std::mem::take(&mut base.tmhms), |a, b| a.dedup_key() == b.dedup_key());
    base.trainers =
        dedup_by(std::mem::take(&mut base.trainers), |a, b| a.dedup_key() == b.dedup_key());
    Some(base)
}

/// Keep the first of every run of equivalent items, preserving order.
fn dedup_by<T>(items: Vec<T>, same: impl Fn(&T, &T) -> bool) -> Vec<T> {
    let mut kept: Vec<T> = Vec::with_capacity(items.len());
    for item in items {
        if !kept.iter().any(|k| same(k, &item)) {
            kept.push(item);
        }
    }
    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Connection, Coordinates, Direction, GymLeader, Region, Trade};

    fn node(key: &str, display: &str) -> LocationNode {
        LocationNode::synthetic(key, display, Region::Johto)
    }

    fn map_of(nodes: Vec<LocationNode>) -> LocationMap {
        nodes
            .into_iter()
            .map(|n| (n.canonical_key.clone(), n))
            .collect()
    }

    #[test]
    fn test_singletons_pass_through() {
        let mut route = node("route_29", "Route 29");
        route.connections.push(Connection::new(Direction::East, "new_bark_town", 0));
        let map = map_of(vec![route.clone(), node("route_30", "Route 30")]);

        let mut diagnostics = Diagnostics::new();
        let out = consolidate(map, &mut diagnostics);

        assert_eq!(out.len(), 2);
        assert_eq!(out["route_29"].connections, route.connections);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_constant_and_label_spellings_merge() {
        let mut landmark = LocationNode::landmark("union_cave_b1f", 14, "Union Cave", Region::Johto);
        landmark.coordinates = Coordinates::new(40, 80);
        let label = node("union_cave_b_1f", "Union Cave B1F");
        let map = map_of(vec![landmark, label]);

        let mut diagnostics = Diagnostics::new();
        let out = consolidate(map, &mut diagnostics);

        assert_eq!(out.len(), 1);
        let merged = &out["union_cave_b_1f"];
        assert_eq!(merged.canonical_key, "union_cave_b_1f");
        assert_eq!(merged.id, 14);
        assert_eq!(merged.coordinates, Coordinates::new(40, 80));
        assert_eq!(merged.display_name, "Union Cave B1F");
        assert_eq!(diagnostics.count_kind("consolidation_group"), 1);
    }

    #[test]
    fn test_synthetic_base_takes_landmark_id() {
        let synthetic = node("sprout_tower_1f", "Sprout Tower 1F");
        let landmark = LocationNode::landmark("SPROUT_TOWER_1F", 7, "SPROUT TOWER", Region::Johto);
        let out = consolidate(map_of(vec![synthetic, landmark]), &mut Diagnostics::new());

        assert_eq!(out["sprout_tower_1f"].id, 7);
        assert_eq!(out["sprout_tower_1f"].display_name, "Sprout Tower 1F");
    }

    #[test]
    fn test_lists_deduplicate_by_composite_key() {
        let trade = Trade {
            trader_name: "Mike".into(),
            wants_pokemon: "DROWZEE".into(),
            gives_pokemon: "MACHOP".into(),
            nickname: None,
            held_item: None,
        };
        let mut first = node("goldenrod_dept_store_5f", "Goldenrod Dept Store 5F");
        first.trades.push(trade.clone());
        let mut second = node("goldenrod_dept_store_5_f", "Goldenrod Dept Store");
        second.trades.push(Trade {
            nickname: Some("MUSCLE".into()),
            ..trade
        });

        let out = consolidate(map_of(vec![first, second]), &mut Diagnostics::new());
        let merged = &out["goldenrod_dept_store_5f"];
        assert_eq!(merged.trades.len(), 1);
        assert_eq!(merged.trades[0].nickname, None);
    }

    #[test]
    fn test_connection_targets_renormalized_and_deduplicated() {
        let mut cave = node("union_cave_1f", "Union Cave 1F");
        cave.connections.push(Connection::warp("union_cave_b1f"));
        cave.connections.push(Connection::warp("union_cave_b_1f"));
        let target = node("union_cave_b_1f", "Union Cave B1F");

        let out = consolidate(map_of(vec![cave, target]), &mut Diagnostics::new());
        let connections = &out["union_cave_1f"].connections;
        assert_eq!(connections.len(), 1);
        assert_eq!(connections[0].target_key, "union_cave_b_1f");
        assert_eq!(connections[0].target_display_name, "Union Cave B1F");
    }

    #[test]
    fn test_first_gym_leader_wins_and_is_reported() {
        let leader = |name: &str| GymLeader {
            name: name.into(),
            badge: None,
            pokemon: vec![],
        };
        let mut a = node("violet_gym", "Violet Gym");
        a.gym_leader = Some(leader("FALKNER"));
        let mut b = node("VioletGym", "Violet Gym");
        b.gym_leader = Some(leader("WHITNEY"));

        let mut diagnostics = Diagnostics::new();
        let out = consolidate(map_of(vec![a, b]), &mut diagnostics);

        assert_eq!(out["violet_gym"].gym_leader.as_ref().unwrap().name, "FALKNER");
        assert_eq!(diagnostics.count_kind("ambiguous_merge"), 1);
    }

    #[test]
    fn test_region_entries_are_filtered() {
        let map = map_of(vec![
            node("kanto_region", "Kanto"),
            node("pallet_town", "Pallet Town"),
        ]);
        let mut diagnostics = Diagnostics::new();
        let out = consolidate(map, &mut diagnostics);

        assert_eq!(out.keys().collect::<Vec<_>>(), vec!["pallet_town"]);
        assert_eq!(diagnostics.count_kind("region_filtered"), 1);
    }

    #[test]
    fn test_group_keeps_first_member_position() {
        let map = map_of(vec![
            node("route_32", "Route 32"),
            node("union_cave ", "Union Cave"),
            node("route_33", "Route 33"),
            node("union_cave", "Union Cave"),
        ]);
        let out = consolidate(map, &mut Diagnostics::new());
        assert_eq!(
            out.keys().collect::<Vec<_>>(),
            vec!["route_32", "union_cave", "route_33"]
        );
    }
}
