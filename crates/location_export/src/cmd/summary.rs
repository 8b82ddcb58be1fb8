use crate::utils::load_config;
use anyhow::Context;
use clap::Args;
use location_graph::{LocationSummary, Region};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Args, Debug)]
pub struct SummaryArgs {
    /// Summary file to read (default: the configured output summary)
    pub path: Option<PathBuf>,

    /// Also list every location key per region
    #[arg(short, long)]
    pub locations: bool,
}

pub fn execute(config_path: Option<&Path>, args: SummaryArgs) -> anyhow::Result<()> {
    let path = match args.path {
        Some(path) => path,
        None => {
            let config = load_config(config_path)?;
            config.output.resolve(&config.output.summary)
        }
    };

    let text = fs::read_to_string(&path)
        .with_context(|| format!("cannot read {} (run `build` first?)", path.display()))?;
    let summary: LocationSummary = serde_json::from_str(&text)
        .with_context(|| format!("{} is not a location summary", path.display()))?;

    println!("{:<8} {:>6} {:>8} {:>10} {:>8}", "region", "total", "flyable", "landmarks", "other");
    for region in Region::ALL {
        let counts = summary.regions.get(region);
        println!(
            "{:<8} {:>6} {:>8} {:>10} {:>8}",
            region.as_str(), counts.total, counts.flyable, counts.landmarks, counts.non_landmarks
        );
    }
    println!(
        "{:<8} {:>6} {:>8} {:>10} {:>8}",
        "all", summary.total, summary.flyable, summary.landmarks, summary.non_landmarks
    );

    if args.locations {
        for region in Region::ALL {
            println!("\n[{}]", region);
            for key in &summary.regions.get(region).locations {
                println!("  {}", key);
            }
        }
    }
    Ok(())
}
