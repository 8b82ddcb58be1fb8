//! Pass 2: edges between known nodes.

use super::ensure_synthetic;
use crate::model::{Connection, Direction, LocationMap};
use crate::normalize::{constant_key, display_name_guess, normalize};
use crate::sources::{MapAttributes, MapWarps};
use std::collections::HashMap;
use tracing::debug;

/// Attaches declared map-edge connections and warps to their source nodes.
pub struct ConnectionResolver<'a> {
    attributes: &'a [MapAttributes],
    warps: &'a [MapWarps],
}

impl<'a> ConnectionResolver<'a> {
    pub fn new(attributes: &'a [MapAttributes], warps: &'a [MapWarps]) -> Self {
        Self { attributes, warps }
    }

    pub fn resolve(&self, mut map: LocationMap) -> LocationMap {
        let mut attached = 0usize;

        for block in self.attributes {
            let source = normalize(&block.map);
            for connection in &block.connections {
                let target = constant_key(&connection.target);
                attached += attach(
                    &mut map,
                    (source.as_str(), block.map.as_str()),
                    (target.as_str(), connection.target.as_str()),
                    connection.direction.into(),
                    connection.offset,
                ) as usize;
            }
        }

        // Several warp tiles often lead to the same map; each target is listed once
        for block in self.warps {
            let source = normalize(&block.map);
            for warp in &block.warps {
                let target = constant_key(&warp.target);
                attached += attach(
                    &mut map,
                    (source.as_str(), block.map.as_str()),
                    (target.as_str(), warp.target.as_str()),
                    Direction::Warp,
                    0,
                ) as usize;
            }
        }

        debug!(attached, "resolved connections");
        patch_target_names(map)
    }
}

/// Push one edge, creating either endpoint if needed. Returns false for a duplicate.
fn attach(
    map: &mut LocationMap,
    (source, raw_source): (&str, &str),
    (target, raw_target): (&str, &str),
    direction: Direction,
    offset: i32,
) -> bool {
    ensure_synthetic(map, source, raw_source);
    ensure_synthetic(map, target, raw_target);

    let Some(node) = map.get_mut(source) else {
        return false;
    };
    if node.has_connection(direction, target) {
        return false;
    }

    let mut connection = Connection::new(direction, target, offset);
    connection.target_display_name = display_name_guess(raw_target);
    node.connections.push(connection);
    true
}

/// Replace every cached target name with the target node's current display name.
///
/// Must run once every node exists; targets that still have no node keep
/// their provisional name.
pub fn patch_target_names(mut map: LocationMap) -> LocationMap {
    let names: HashMap<String, String> = map
        .iter()
        .map(|(key, node)| (key.clone(), node.display_name.clone()))
        .collect();

    for node in map.values_mut() {
        for connection in &mut node.connections {
            if let Some(name) = names.get(&connection.target_key) {
                connection.target_display_name.clone_from(name);
            }
        }
    }
    map
}
