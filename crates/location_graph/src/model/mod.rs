//! Location graph records shared by every pipeline stage.

pub mod facts;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

pub use facts::{
    EventFact, GymLeader, ItemFact, ItemKind, TmHm, Trade, TrainerFact, TrainerPokemon,
};

/// Node map keyed by canonical key, in discovery order.
pub type LocationMap = IndexMap<String, LocationNode>;

/// Sentinel id for nodes that did not come from the constant table.
pub const NON_LANDMARK_ID: i32 = -1;

/// Keys with this suffix name an overworld region, not a visitable place.
pub const REGION_SUFFIX: &str = "_region";

/// Overworld region. Declaration order is sort precedence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    #[default]
    Johto,
    Kanto,
    Orange,
}

impl Region {
    pub const ALL: [Region; 3] = [Region::Johto, Region::Kanto, Region::Orange];

    pub fn as_str(self) -> &'static str {
        match self {
            Region::Johto => "johto",
            Region::Kanto => "kanto",
            Region::Orange => "orange",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Map tile position. `(-1, -1)` means unknown.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coordinates {
    pub x: i32,
    pub y: i32,
}

impl Coordinates {
    pub const UNKNOWN: Coordinates = Coordinates { x: -1, y: -1 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn is_known(self) -> bool {
        self != Self::UNKNOWN
    }
}

impl Default for Coordinates {
    fn default() -> Self {
        Self::UNKNOWN
    }
}

impl From<(i32, i32)> for Coordinates {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    North,
    South,
    East,
    West,
    Warp,
}

/// Edge from one location to another.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection {
    pub direction: Direction,
    #[serde(rename = "targetLocation")]
    pub target_key: String,
    /// Cached display name of the target, refreshed by the patch pass
    pub target_display_name: String,
    /// Pixel offset of a map edge connection (always 0 for warps)
    pub offset: i32,
}

impl Connection {
    pub fn new(direction: Direction, target_key: impl Into<String>, offset: i32) -> Self {
        let target_key = target_key.into();
        Self {
            direction,
            target_display_name: target_key.clone(),
            target_key,
            offset,
        }
    }

    pub fn warp(target_key: impl Into<String>) -> Self {
        Self::new(Direction::Warp, target_key, 0)
    }

    /// Identity used for deduplication
    pub fn dedup_key(&self) -> (Direction, &str) {
        (self.direction, self.target_key.as_str())
    }
}

/// One visitable place in the final graph.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationNode {
    pub canonical_key: String,
    /// Position in the constant table, or -1
    pub id: i32,
    pub display_name: String,
    pub region: Region,
    pub coordinates: Coordinates,
    pub flyable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spawn_point: Option<String>,
    #[serde(default)]
    pub connections: Vec<Connection>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub trades: Vec<Trade>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<ItemFact>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub events: Vec<EventFact>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tmhms: Vec<TmHm>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub trainers: Vec<TrainerFact>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gym_leader: Option<GymLeader>,
}

impl LocationNode {
    /// Create a node from the constant table at position `id`.
    pub fn landmark(key: impl Into<String>, id: i32, display_name: impl Into<String>, region: Region) -> Self {
        Self {
            canonical_key: key.into(),
            id,
            display_name: display_name.into(),
            region,
            coordinates: Coordinates::UNKNOWN,
            flyable: false,
            spawn_point: None,
            connections: Vec::new(),
            trades: Vec::new(),
            items: Vec::new(),
            events: Vec::new(),
            tmhms: Vec::new(),
            trainers: Vec::new(),
            gym_leader: None,
        }
    }

    /// Create a node for a map that only other sources refer to.
    pub fn synthetic(key: impl Into<String>, display_name: impl Into<String>, region: Region) -> Self {
        Self::landmark(key, NON_LANDMARK_ID, display_name, region)
    }

    #[inline]
    pub fn is_landmark(&self) -> bool {
        self.id >= 0
    }

    /// Whether a connection with the same direction and target already exists
    pub fn has_connection(&self, direction: Direction, target_key: &str) -> bool {
        self.connections
            .iter()
            .any(|c| c.direction == direction && c.target_key == target_key)
    }
}
