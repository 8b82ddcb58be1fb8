use anyhow::Context;
use location_graph::PipelineConfig;
use std::path::{Path, PathBuf};

/// Config file picked up from the project root when `--config` is absent
pub const DEFAULT_CONFIG_FILE: &str = "location_export.toml";

/// Nearest ancestor of the working directory holding a `Cargo.toml`.
pub fn find_project_root() -> anyhow::Result<PathBuf> {
    let cwd = std::env::current_dir().context("cannot read the working directory")?;
    let mut dir = cwd.clone();
    loop {
        if dir.join("Cargo.toml").exists() {
            return Ok(dir);
        }
        if !dir.pop() {
            return Ok(cwd);
        }
    }
}

/// Explicit config, else the project-root config file, else defaults.
///
/// Relative source and output directories are taken from the project root.
pub fn load_config(explicit: Option<&Path>) -> anyhow::Result<PipelineConfig> {
    let root = find_project_root()?;
    let mut config = match explicit {
        Some(path) => PipelineConfig::load(path)?,
        None => {
            let candidate = root.join(DEFAULT_CONFIG_FILE);
            if candidate.exists() {
                PipelineConfig::load(&candidate)?
            } else {
                PipelineConfig::default()
            }
        }
    };

    config.sources.dir = anchor(&root, &config.sources.dir);
    config.output.dir = anchor(&root, &config.output.dir);
    Ok(config)
}

pub fn anchor(root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}
