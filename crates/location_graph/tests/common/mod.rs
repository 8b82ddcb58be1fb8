//! Shared helpers for the pipeline integration tests.

#![allow(dead_code)]

use location_graph::config::{PipelineConfig, DEFAULT_SENTINEL};
use location_graph::sources::{
    CardinalDirection, LandmarkConstant, MapAttributes, MapConnection, MapWarps, WarpTarget,
};
use location_graph::{Coordinates, Diagnostics, OrderTable, OrderedLocations, SourceBundle};
use std::path::PathBuf;

/// Constant table entries at their list positions, all in the default region.
pub fn constants(names: &[&str]) -> Vec<LandmarkConstant> {
    names
        .iter()
        .enumerate()
        .map(|(index, name)| LandmarkConstant::new(*name, index))
        .collect()
}

pub fn coordinates(pairs: &[(i32, i32)]) -> Vec<Coordinates> {
    pairs.iter().copied().map(Coordinates::from).collect()
}

pub fn attributes(map: &str, edges: &[(CardinalDirection, &str, i32)]) -> MapAttributes {
    MapAttributes {
        map: map.to_string(),
        connections: edges
            .iter()
            .map(|(direction, target, offset)| MapConnection {
                direction: *direction,
                target: target.to_string(),
                offset: *offset,
            })
            .collect(),
    }
}

pub fn warps(map: &str, targets: &[&str]) -> MapWarps {
    MapWarps {
        map: map.to_string(),
        warps: targets
            .iter()
            .map(|target| WarpTarget {
                target: target.to_string(),
            })
            .collect(),
    }
}

/// Run the whole pipeline against the curated table.
pub fn run(sources: &SourceBundle) -> (OrderedLocations, Diagnostics) {
    let mut diagnostics = Diagnostics::new();
    let ordered = location_graph::run(
        sources,
        &OrderTable::curated(),
        DEFAULT_SENTINEL,
        &mut diagnostics,
    );
    (ordered, diagnostics)
}

/// Repository sample sources under `data/sources`
pub fn sample_config() -> PipelineConfig {
    let mut config = PipelineConfig::default();
    config.sources.dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../data/sources");
    config
}
