//! Facts attached to locations by the independent extractors.
//!
//! Each fact type exposes the composite key used to deduplicate it when
//! several raw nodes are merged into one.

use super::Coordinates;
use serde::{Deserialize, Serialize};

/// In-game NPC trade.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trade {
    pub trader_name: String,
    pub wants_pokemon: String,
    pub gives_pokemon: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub held_item: Option<String>,
}

impl Trade {
    pub fn dedup_key(&self) -> (&str, &str, &str) {
        (&self.trader_name, &self.wants_pokemon, &self.gives_pokemon)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Visible,
    Hidden,
    Tmhm,
}

/// Item ball, hidden item or TM/HM pickup.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemFact {
    #[serde(rename = "type")]
    pub kind: ItemKind,
    pub name: String,
    pub coordinates: Coordinates,
}

impl ItemFact {
    pub fn dedup_key(&self) -> (ItemKind, &str, i32, i32) {
        (self.kind, &self.name, self.coordinates.x, self.coordinates.y)
    }
}

/// Scripted event (gift, story trigger, item from an NPC...).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventFact {
    #[serde(rename = "type")]
    pub event_type: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
}

impl EventFact {
    pub fn dedup_key(&self) -> (&str, &str) {
        (&self.event_type, &self.description)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TmHm {
    /// `TM01`..`TM50`, `HM01`..`HM07`
    pub tm_number: String,
    pub move_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
}

impl TmHm {
    pub fn dedup_key(&self) -> (&str, &str) {
        (&self.tm_number, &self.move_name)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainerPokemon {
    pub species: String,
    pub level: u8,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainerFact {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trainer_class: Option<String>,
    pub coordinates: Coordinates,
    #[serde(default)]
    pub pokemon: Vec<TrainerPokemon>,
}

impl TrainerFact {
    pub fn dedup_key(&self) -> (&str, i32, i32) {
        (&self.name, self.coordinates.x, self.coordinates.y)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GymLeader {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub badge: Option<String>,
    #[serde(default)]
    pub pokemon: Vec<TrainerPokemon>,
}
