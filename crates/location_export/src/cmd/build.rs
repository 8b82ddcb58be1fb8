use crate::utils::load_config;
use anyhow::Context;
use clap::Args;
use location_graph::{run_with_config, write_artifacts, LocationSummary, Region};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Directory holding the source streams (overrides the config)
    #[arg(short, long)]
    pub sources: Option<PathBuf>,

    /// Output directory (overrides the config)
    #[arg(short, long)]
    pub out: Option<PathBuf>,
}

pub fn execute(config_path: Option<&Path>, args: BuildArgs) -> anyhow::Result<()> {
    let mut config = load_config(config_path)?;
    if let Some(sources) = args.sources {
        config.sources.dir = sources;
    }
    if let Some(out) = args.out {
        config.output.dir = out;
    }
    debug!(?config, "resolved pipeline config");

    let output = run_with_config(&config);
    let written = write_artifacts(&output.locations, &config.output)
        .with_context(|| format!("no artifacts written to {}", config.output.dir.display()))?;

    let summary = LocationSummary::from_locations(&output.locations);
    println!("\n=== Location Graph ===");
    println!(
        "{} locations ({} landmarks, {} other, {} flyable)",
        summary.total, summary.landmarks, summary.non_landmarks, summary.flyable
    );
    for region in Region::ALL {
        let counts = summary.regions.get(region);
        println!(
            "  {:<8} {:>4} total {:>4} landmarks {:>4} flyable",
            region.as_str(), counts.total, counts.landmarks, counts.flyable
        );
    }

    let mut kinds: BTreeMap<&str, usize> = BTreeMap::new();
    for diagnostic in &output.diagnostics {
        *kinds.entry(diagnostic.kind()).or_default() += 1;
    }
    println!("\n{} diagnostics", output.diagnostics.len());
    for (kind, count) in kinds {
        println!("  {:<20} {}", kind, count);
    }

    println!("\nWrote:");
    for path in written {
        println!("  {}", path.display());
    }
    Ok(())
}
