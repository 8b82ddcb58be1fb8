//! Already-shaped source streams and their JSON loaders.
//!
//! Line-level parsing of the game's source files happens upstream; this
//! module only reads the tuple streams it produced. Loading never fails:
//! a missing file is an empty stream and a bad record is skipped, each with
//! one diagnostic.

use crate::config::{FactSourceConfig, SourceConfig};
use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::model::{
    Coordinates, Direction, EventFact, GymLeader, ItemFact, Region, TmHm, Trade, TrainerFact,
};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::Path;
use tracing::debug;

/// One entry of the master ordered constant table.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LandmarkConstant {
    pub name: String,
    /// 0-based position in the constant table
    pub index: usize,
    /// Set on the first entry of a new region
    #[serde(default)]
    pub region_marker: Option<Region>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub flyable: bool,
    #[serde(default)]
    pub spawn_point: Option<String>,
}

impl LandmarkConstant {
    pub fn new(name: impl Into<String>, index: usize) -> Self {
        Self {
            name: name.into(),
            index,
            region_marker: None,
            display_name: None,
            flyable: false,
            spawn_point: None,
        }
    }

    pub fn starting_region(mut self, region: Region) -> Self {
        self.region_marker = Some(region);
        self
    }
}

/// Map edge directions; warps are a separate stream.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardinalDirection {
    North,
    South,
    East,
    West,
}

impl From<CardinalDirection> for Direction {
    fn from(direction: CardinalDirection) -> Self {
        match direction {
            CardinalDirection::North => Direction::North,
            CardinalDirection::South => Direction::South,
            CardinalDirection::East => Direction::East,
            CardinalDirection::West => Direction::West,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct MapConnection {
    pub direction: CardinalDirection,
    /// Target map constant
    pub target: String,
    #[serde(default)]
    pub offset: i32,
}

/// Attribute block of one map: its label and declared edge connections.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct MapAttributes {
    pub map: String,
    #[serde(default)]
    pub connections: Vec<MapConnection>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct WarpTarget {
    /// Destination map constant
    pub target: String,
}

/// Warp statements of one map, one entry per warp tile.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct MapWarps {
    pub map: String,
    #[serde(default)]
    pub warps: Vec<WarpTarget>,
}

/// Output of the independent fact extractors, keyed by location.
#[derive(Clone, Debug, Default)]
pub struct FactSources {
    pub trades: BTreeMap<String, Vec<Trade>>,
    pub items: BTreeMap<String, Vec<ItemFact>>,
    pub events: BTreeMap<String, Vec<EventFact>>,
    pub tmhms: BTreeMap<String, Vec<TmHm>>,
    pub trainers: BTreeMap<String, Vec<TrainerFact>>,
    pub gym_leaders: BTreeMap<String, Vec<GymLeader>>,
}

/// Every stream one pipeline run consumes.
#[derive(Clone, Debug, Default)]
pub struct SourceBundle {
    pub constants: Vec<LandmarkConstant>,
    /// Positionally aligned with `constants`
    pub coordinates: Vec<Coordinates>,
    pub attributes: Vec<MapAttributes>,
    pub warps: Vec<MapWarps>,
    pub facts: FactSources,
}

/// Load every configured stream.
pub fn load_sources(config: &SourceConfig, diagnostics: &mut Diagnostics) -> SourceBundle {
    let coordinates: Vec<(i32, i32)> =
        load_records(&config.resolve(&config.coordinates), diagnostics);

    let bundle = SourceBundle {
        constants: load_records(&config.resolve(&config.constants), diagnostics),
        coordinates: coordinates.into_iter().map(Coordinates::from).collect(),
        attributes: load_records(&config.resolve(&config.map_attributes), diagnostics),
        warps: load_records(&config.resolve(&config.warps), diagnostics),
        facts: load_facts(config, &config.facts, diagnostics),
    };

    debug!(
        constants = bundle.constants.len(),
        coordinates = bundle.coordinates.len(),
        attributes = bundle.attributes.len(),
        warps = bundle.warps.len(),
        "loaded source streams"
    );
    bundle
}

fn load_facts(
    config: &SourceConfig,
    facts: &FactSourceConfig,
    diagnostics: &mut Diagnostics,
) -> FactSources {
    FactSources {
        trades: load_fact_map(&config.resolve(&facts.trades), diagnostics),
        items: load_fact_map(&config.resolve(&facts.items), diagnostics),
        events: load_fact_map(&config.resolve(&facts.events), diagnostics),
        tmhms: load_fact_map(&config.resolve(&facts.tmhms), diagnostics),
        trainers: load_fact_map(&config.resolve(&facts.trainers), diagnostics),
        gym_leaders: load_fact_map(&config.resolve(&facts.gym_leaders), diagnostics),
    }
}

fn read_json(path: &Path, diagnostics: &mut Diagnostics) -> Option<Value> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            diagnostics.push(Diagnostic::MissingSourceFile {
                path: path.to_path_buf(),
            });
            return None;
        }
        Err(e) => {
            diagnostics.push(Diagnostic::MalformedRecord {
                source: path.display().to_string(),
                detail: e.to_string(),
            });
            return None;
        }
    };

    match serde_json::from_str(&text) {
        Ok(value) => Some(value),
        Err(e) => {
            diagnostics.push(Diagnostic::MalformedRecord {
                source: path.display().to_string(),
                detail: format!("not valid JSON: {}", e),
            });
            None
        }
    }
}

/// Load a JSON array, decoding each element on its own.
pub fn load_records<T: DeserializeOwned>(path: &Path, diagnostics: &mut Diagnostics) -> Vec<T> {
    let Some(value) = read_json(path, diagnostics) else {
        return Vec::new();
    };
    let source = path.display().to_string();
    match value {
        Value::Array(elements) => decode_elements(&source, elements, diagnostics),
        _ => {
            diagnostics.push(Diagnostic::MalformedRecord {
                source,
                detail: "expected a JSON array".to_string(),
            });
            Vec::new()
        }
    }
}

/// Load a JSON object of `key -> [fact, ...]`, decoding each fact on its own.
pub fn load_fact_map<T: DeserializeOwned>(
    path: &Path,
    diagnostics: &mut Diagnostics,
) -> BTreeMap<String, Vec<T>> {
    let mut facts = BTreeMap::new();
    let Some(value) = read_json(path, diagnostics) else {
        return facts;
    };
    let source = path.display().to_string();

    let Value::Object(entries) = value else {
        diagnostics.push(Diagnostic::MalformedRecord {
            source,
            detail: "expected a JSON object keyed by location".to_string(),
        });
        return facts;
    };

    for (key, value) in entries {
        let Value::Array(elements) = value else {
            diagnostics.push(Diagnostic::MalformedRecord {
                source: source.clone(),
                detail: format!("`{}` is not a list of facts", key),
            });
            continue;
        };
        let decoded: Vec<T> = decode_elements(&format!("{}[{}]", source, key), elements, diagnostics);
        if !decoded.is_empty() {
            facts.insert(key, decoded);
        }
    }
    facts
}

fn decode_elements<T: DeserializeOwned>(
    source: &str,
    elements: Vec<Value>,
    diagnostics: &mut Diagnostics,
) -> Vec<T> {
    elements
        .into_iter()
        .enumerate()
        .filter_map(|(i, element)| match serde_json::from_value(element) {
            Ok(record) => Some(record),
            Err(e) => {
                diagnostics.push(Diagnostic::MalformedRecord {
                    source: source.to_string(),
                    detail: format!("record {}: {}", i, e),
                });
                None
            }
        })
        .collect()
}
