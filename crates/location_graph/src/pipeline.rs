//! Stage wiring: sources in, ordered locations out.

use crate::config::PipelineConfig;
use crate::consolidate::consolidate;
use crate::diagnostics::Diagnostics;
use crate::graph::{ConnectionResolver, LocationGraphBuilder};
use crate::merge::FactMerger;
use crate::ordering::{OrderTable, OrderedLocations, OrderingEngine};
use crate::sources::{load_sources, SourceBundle};
use tracing::{debug, info};

/// Result of one run
#[derive(Debug)]
pub struct PipelineOutput {
    pub locations: OrderedLocations,
    pub diagnostics: Diagnostics,
}

/// Run every stage over already-loaded sources.
///
/// Each stage takes the previous stage's map by value and hands back a new one.
pub fn run(
    sources: &SourceBundle,
    table: &OrderTable,
    sentinel: &str,
    diagnostics: &mut Diagnostics,
) -> OrderedLocations {
    let map = LocationGraphBuilder::new(&sources.constants, sentinel)
        .coordinates(&sources.coordinates)
        .attributes(&sources.attributes)
        .warps(&sources.warps)
        .build(diagnostics);
    debug!(nodes = map.len(), "built node identities");

    let map = ConnectionResolver::new(&sources.attributes, &sources.warps).resolve(map);
    let map = FactMerger::new(&sources.facts).merge(map, diagnostics);
    let map = consolidate(map, diagnostics);

    let ordered = OrderingEngine::new(table).order(map);
    info!(
        locations = ordered.len(),
        diagnostics = diagnostics.len(),
        "pipeline finished"
    );
    ordered
}

/// Load sources named by `config` and run against the curated order table.
pub fn run_with_config(config: &PipelineConfig) -> PipelineOutput {
    let mut diagnostics = Diagnostics::new();
    let sources = load_sources(&config.sources, &mut diagnostics);
    let table = OrderTable::curated();
    let locations = run(&sources, &table, &config.no_location_sentinel, &mut diagnostics);
    PipelineOutput {
        locations,
        diagnostics,
    }
}
