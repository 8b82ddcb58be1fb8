//! Trainer roster key reconciliation.
//!
//! Trainer data is grouped by roster, not by map, so its keys only
//! sometimes name a node. Each rule below is tried in order and the first
//! one that finds an existing node wins.

use crate::model::LocationMap;
use crate::normalize::normalize;
use crate::trainer_aliases::TRAINER_ALIASES;
use std::collections::HashMap;

/// Lookup structures over the node map shared by every rule.
///
/// Node keys from the constant table are only lowercased, so a fact keyed
/// by the output spelling may name no node until consolidation. The
/// canonical index maps each `normalize`d node key to the first node in
/// discovery order that carries it.
pub struct KeyIndex<'m> {
    map: &'m LocationMap,
    canonical: HashMap<String, &'m str>,
    stripped: HashMap<String, &'m str>,
}

impl<'m> KeyIndex<'m> {
    pub fn new(map: &'m LocationMap) -> Self {
        let mut canonical = HashMap::with_capacity(map.len());
        let mut stripped = HashMap::with_capacity(map.len());
        for key in map.keys() {
            canonical.entry(normalize(key)).or_insert(key.as_str());
            stripped.entry(strip_underscores(key)).or_insert(key.as_str());
        }
        Self {
            map,
            canonical,
            stripped,
        }
    }

    fn existing(&self, key: &str) -> Option<String> {
        self.map.contains_key(key).then(|| key.to_string())
    }

    /// Exact key, then the normalized key, then any node whose own key
    /// normalizes to the same spelling.
    pub fn resolve(&self, key: &str) -> Option<String> {
        if let Some(found) = self.existing(key) {
            return Some(found);
        }
        let key = normalize(key);
        self.existing(&key)
            .or_else(|| self.canonical.get(&key).map(|k| k.to_string()))
    }
}

pub struct TrainerKeyRule {
    pub name: &'static str,
    pub resolve: fn(&KeyIndex<'_>, &str) -> Option<String>,
}

pub static TRAINER_KEY_RULES: &[TrainerKeyRule] = &[
    TrainerKeyRule {
        name: "exact",
        resolve: exact,
    },
    TrainerKeyRule {
        name: "normalized",
        resolve: normalized,
    },
    TrainerKeyRule {
        name: "underscore_stripped",
        resolve: underscore_stripped,
    },
    TrainerKeyRule {
        name: "alias",
        resolve: alias,
    },
];

fn strip_underscores(key: &str) -> String {
    key.chars().filter(|&c| c != '_').collect()
}

fn exact(index: &KeyIndex<'_>, key: &str) -> Option<String> {
    index.existing(key)
}

fn normalized(index: &KeyIndex<'_>, key: &str) -> Option<String> {
    index.resolve(key)
}

fn underscore_stripped(index: &KeyIndex<'_>, key: &str) -> Option<String> {
    index
        .stripped
        .get(&strip_underscores(key))
        .map(|k| k.to_string())
}

fn alias(index: &KeyIndex<'_>, key: &str) -> Option<String> {
    let target = TRAINER_ALIASES
        .get(key)
        .or_else(|| TRAINER_ALIASES.get(normalize(key).as_str()))?;
    index.existing(target)
}

/// Location key for a trainer roster key, or None when no rule matches.
pub fn resolve_trainer_key(index: &KeyIndex<'_>, key: &str) -> Option<String> {
    resolve_with(TRAINER_KEY_RULES, index, key).map(|(_, key)| key)
}

/// Like [`resolve_trainer_key`], also naming the rule that matched.
pub fn resolve_with(
    rules: &[TrainerKeyRule],
    index: &KeyIndex<'_>,
    key: &str,
) -> Option<(&'static str, String)> {
    rules
        .iter()
        .find_map(|rule| (rule.resolve)(index, key).map(|found| (rule.name, found)))
}
