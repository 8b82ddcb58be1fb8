//! location_graph - canonical location graph for the Johto, Kanto and Orange maps
//!
//! Turns the constant table, coordinate table, per-map connection and warp
//! streams and the fact extractors' output into one deduplicated,
//! deterministically ordered set of locations.
//!
//! Stages run strictly in order, each consuming the previous stage's map:
//! [`graph::LocationGraphBuilder`], [`graph::ConnectionResolver`],
//! [`merge::FactMerger`], [`consolidate::consolidate`] and
//! [`ordering::OrderingEngine`]. [`sink`] writes the result.

/// Curated narrative order table
pub mod order_table {
    include!(concat!(env!("OUT_DIR"), "/order_table.rs"));
}

/// Trainer grouping -> location key aliases
pub mod trainer_aliases {
    include!(concat!(env!("OUT_DIR"), "/trainer_aliases.rs"));
}

pub mod config;
pub mod consolidate;
pub mod diagnostics;
pub mod error;
pub mod graph;
pub mod merge;
pub mod model;
pub mod normalize;
pub mod ordering;
pub mod pipeline;
pub mod sink;
pub mod sources;

pub use config::PipelineConfig;
pub use diagnostics::{Diagnostic, Diagnostics};
pub use error::{ConfigError, SinkError};
pub use model::{Connection, Coordinates, Direction, LocationMap, LocationNode, Region};
pub use normalize::normalize;
pub use ordering::{OrderTable, OrderedLocations};
pub use pipeline::{run, run_with_config, PipelineOutput};
pub use sink::{write_artifacts, Artifacts, LocationSummary};
pub use sources::SourceBundle;
