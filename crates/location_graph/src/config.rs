//! Pipeline configuration.
//!
//! Loaded from an optional TOML file; every field has a default so an
//! empty file (or no file at all) describes the standard layout.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default constant-table entry that stands for "no location"
pub const DEFAULT_SENTINEL: &str = "SPECIAL_MAP";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Constant that is skipped when building landmark nodes
    pub no_location_sentinel: String,
    pub sources: SourceConfig,
    pub output: OutputConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            no_location_sentinel: DEFAULT_SENTINEL.to_string(),
            sources: SourceConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

/// Source file locations, relative to `dir`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub dir: PathBuf,
    pub constants: PathBuf,
    pub coordinates: PathBuf,
    pub map_attributes: PathBuf,
    pub warps: PathBuf,
    pub facts: FactSourceConfig,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("data/sources"),
            constants: PathBuf::from("landmarks.json"),
            coordinates: PathBuf::from("landmark_coordinates.json"),
            map_attributes: PathBuf::from("map_attributes.json"),
            warps: PathBuf::from("map_warps.json"),
            facts: FactSourceConfig::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FactSourceConfig {
    pub trades: PathBuf,
    pub items: PathBuf,
    pub events: PathBuf,
    pub tmhms: PathBuf,
    pub trainers: PathBuf,
    pub gym_leaders: PathBuf,
}

impl Default for FactSourceConfig {
    fn default() -> Self {
        Self {
            trades: PathBuf::from("facts/trades.json"),
            items: PathBuf::from("facts/items.json"),
            events: PathBuf::from("facts/events.json"),
            tmhms: PathBuf::from("facts/tmhms.json"),
            trainers: PathBuf::from("facts/trainers.json"),
            gym_leaders: PathBuf::from("facts/gym_leaders.json"),
        }
    }
}

/// Output artifact locations, relative to `dir`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub dir: PathBuf,
    pub locations: PathBuf,
    pub ordered: PathBuf,
    pub summary: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("out"),
            locations: PathBuf::from("locations.json"),
            ordered: PathBuf::from("locations_ordered.json"),
            summary: PathBuf::from("location_summary.json"),
        }
    }
}

impl PipelineConfig {
    /// Load from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }
}

impl SourceConfig {
    pub fn resolve(&self, file: &Path) -> PathBuf {
        self.dir.join(file)
    }
}

impl OutputConfig {
    pub fn resolve(&self, file: &Path) -> PathBuf {
        self.dir.join(file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_is_default() {
        let config = PipelineConfig::from_toml("").unwrap();
        assert_eq!(config, PipelineConfig::default());
        assert_eq!(config.no_location_sentinel, "SPECIAL_MAP");
    }

    #[test]
    fn test_partial_override() {
        let config = PipelineConfig::from_toml(
            r#"
            no_location_sentinel = "NOWHERE"

            [sources]
            dir = "pokecrystal/extracted"

            [sources.facts]
            trades = "trades.json"

            [output]
            dir = "site/data"
            "#,
        )
        .unwrap();

        assert_eq!(config.no_location_sentinel, "NOWHERE");
        assert_eq!(
            config.sources.resolve(&config.sources.constants),
            PathBuf::from("pokecrystal/extracted/landmarks.json")
        );
        assert_eq!(config.sources.facts.trades, PathBuf::from("trades.json"));
        assert_eq!(config.sources.facts.items, PathBuf::from("facts/items.json"));
        assert_eq!(
            config.output.resolve(&config.output.summary),
            PathBuf::from("site/data/location_summary.json")
        );
    }

    #[test]
    fn test_shipped_config_matches_defaults() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../location_export.toml");
        assert_eq!(PipelineConfig::load(&path).unwrap(), PipelineConfig::default());
    }

    #[test]
    fn test_missing_file_is_a_read_error() {
        let err = PipelineConfig::load(Path::new("no/such/config.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_unknown_field_type_is_an_error() {
        assert!(PipelineConfig::from_toml("no_location_sentinel = 3").is_err());
    }
}
