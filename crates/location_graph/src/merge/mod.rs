//! Attaches extractor facts to existing nodes.
//!
//! Facts never create nodes: a key without a node is dropped with one
//! diagnostic. Each extractor owns its own node field, so extractors
//! cannot conflict with each other here.

pub mod trainer_keys;

use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::model::{LocationMap, LocationNode};
use crate::sources::FactSources;
use std::collections::BTreeMap;
use tracing::debug;
use trainer_keys::{resolve_trainer_key, KeyIndex};

pub struct FactMerger<'a> {
    facts: &'a FactSources,
}

impl<'a> FactMerger<'a> {
    pub fn new(facts: &'a FactSources) -> Self {
        Self { facts }
    }

    pub fn merge(&self, mut map: LocationMap, diagnostics: &mut Diagnostics) -> LocationMap {
        attach(&mut map, "trade", &self.facts.trades, |n| &mut n.trades, diagnostics);
        attach(&mut map, "item", &self.facts.items, |n| &mut n.items, diagnostics);
        attach(&mut map, "event", &self.facts.events, |n| &mut n.events, diagnostics);
        attach(&mut map, "tmhm", &self.facts.tmhms, |n| &mut n.tmhms, diagnostics);
        self.attach_trainers(&mut map, diagnostics);
        self.attach_gym_leaders(&mut map, diagnostics);
        map
    }

    fn attach_trainers(&self, map: &mut LocationMap, diagnostics: &mut Diagnostics) {
        let resolved: Vec<(&String, Option<String>)> = {
            let index = KeyIndex::new(map);
            self.facts
                .trainers
                .keys()
                .map(|key| (key, resolve_trainer_key(&index, key)))
                .collect()
        };

        for (key, target) in resolved {
            let node = target.and_then(|target| map.get_mut(&target));
            match node {
                Some(node) => node.trainers.extend(self.facts.trainers[key].iter().cloned()),
                None => diagnostics.push(Diagnostic::UnmatchedFact {
                    kind: "trainer",
                    key: key.clone(),
                }),
            }
        }
    }

    fn attach_gym_leaders(&self, map: &mut LocationMap, diagnostics: &mut Diagnostics) {
        let resolved = resolve_keys(map, &self.facts.gym_leaders);
        for ((key, leaders), target) in self.facts.gym_leaders.iter().zip(resolved) {
            let Some(first) = leaders.first() else {
                diagnostics.push(Diagnostic::MalformedRecord {
                    source: "gym leaders".to_string(),
                    detail: format!("empty leader list for `{}`", key),
                });
                continue;
            };
            let Some(node) = target.and_then(|target| map.get_mut(&target)) else {
                diagnostics.push(Diagnostic::UnmatchedFact {
                    kind: "gym leader",
                    key: key.clone(),
                });
                continue;
            };

            let candidates = leaders.len() + node.gym_leader.is_some() as usize;
            if candidates > 1 {
                diagnostics.push(Diagnostic::AmbiguousMerge {
                    key: node.canonical_key.clone(),
                    field: "gymLeader",
                    candidates,
                });
            }
            if node.gym_leader.is_none() {
                node.gym_leader = Some(first.clone());
            }
        }
    }
}

/// Node key for every fact key, in the fact map's iteration order.
fn resolve_keys<T>(map: &LocationMap, facts: &BTreeMap<String, Vec<T>>) -> Vec<Option<String>> {
    let index = KeyIndex::new(map);
    facts.keys().map(|key| index.resolve(key)).collect()
}

fn attach<T: Clone>(
    map: &mut LocationMap,
    kind: &'static str,
    facts: &BTreeMap<String, Vec<T>>,
    field: fn(&mut LocationNode) -> &mut Vec<T>,
    diagnostics: &mut Diagnostics,
) {
    let mut attached = 0usize;
    let resolved = resolve_keys(map, facts);
    for ((key, entries), target) in facts.iter().zip(resolved) {
        match target.and_then(|target| map.get_mut(&target)) {
            Some(node) => {
                field(node).extend(entries.iter().cloned());
                attached += entries.len();
            }
            None => diagnostics.push(Diagnostic::UnmatchedFact {
                kind,
                key: key.clone(),
            }),
        }
    }
    debug!(kind, attached, "attached facts");
}
