//! Output artifacts.
//!
//! All three documents are rendered in memory before anything touches the
//! filesystem, then staged as temp files next to their destinations. The
//! destinations are only replaced once every document is staged.

use crate::config::OutputConfig;
use crate::error::SinkError;
use crate::model::{LocationNode, Region};
use crate::ordering::OrderedLocations;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info};

/// Aggregate counts over a set of nodes.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionSummary {
    pub total: usize,
    pub flyable: usize,
    pub landmarks: usize,
    pub non_landmarks: usize,
    pub locations: Vec<String>,
}

impl RegionSummary {
    fn add(&mut self, node: &LocationNode) {
        self.total += 1;
        self.flyable += usize::from(node.flyable);
        if node.is_landmark() {
            self.landmarks += 1;
        } else {
            self.non_landmarks += 1;
        }
        self.locations.push(node.canonical_key.clone());
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionSummaries {
    pub johto: RegionSummary,
    pub kanto: RegionSummary,
    pub orange: RegionSummary,
}

impl RegionSummaries {
    pub fn get(&self, region: Region) -> &RegionSummary {
        match region {
            Region::Johto => &self.johto,
            Region::Kanto => &self.kanto,
            Region::Orange => &self.orange,
        }
    }

    fn get_mut(&mut self, region: Region) -> &mut RegionSummary {
        match region {
            Region::Johto => &mut self.johto,
            Region::Kanto => &mut self.kanto,
            Region::Orange => &mut self.orange,
        }
    }
}

/// Contents of `location_summary.json`
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationSummary {
    pub total: usize,
    pub flyable: usize,
    pub landmarks: usize,
    pub non_landmarks: usize,
    pub regions: RegionSummaries,
}

impl LocationSummary {
    pub fn from_locations(locations: &OrderedLocations) -> Self {
        let mut summary = Self::default();
        for node in locations.nodes() {
            summary.total += 1;
            summary.flyable += usize::from(node.flyable);
            if node.is_landmark() {
                summary.landmarks += 1;
            } else {
                summary.non_landmarks += 1;
            }
            summary.regions.get_mut(node.region).add(node);
        }
        summary
    }
}

#[derive(Serialize)]
struct OrderedRecord<'a> {
    order: usize,
    #[serde(flatten)]
    node: &'a LocationNode,
}

/// Rendered documents, ready to be written.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Artifacts {
    pub locations: String,
    pub ordered: String,
    pub summary: String,
}

impl Artifacts {
    pub fn render(locations: &OrderedLocations) -> Result<Self, SinkError> {
        let by_key: IndexMap<&str, &LocationNode> = locations
            .nodes()
            .map(|node| (node.canonical_key.as_str(), node))
            .collect();
        let records: Vec<OrderedRecord> = locations
            .nodes()
            .enumerate()
            .map(|(order, node)| OrderedRecord { order, node })
            .collect();
        let summary = LocationSummary::from_locations(locations);

        Ok(Self {
            locations: to_json("locations", &by_key)?,
            ordered: to_json("ordered locations", &records)?,
            summary: to_json("summary", &summary)?,
        })
    }

    /// Write every document under `config.dir`, returning the written paths.
    ///
    /// On error no destination has been replaced, except when a rename
    /// fails midway; the documents already moved are then removed again.
    pub fn write(&self, config: &OutputConfig) -> Result<Vec<PathBuf>, SinkError> {
        fs::create_dir_all(&config.dir).map_err(|source| SinkError::Write {
            path: config.dir.clone(),
            source,
        })?;

        let documents = [
            (config.resolve(&config.locations), &self.locations),
            (config.resolve(&config.ordered), &self.ordered),
            (config.resolve(&config.summary), &self.summary),
        ];
        let mut staged = Vec::with_capacity(documents.len());
        for (path, text) in documents {
            let file = stage(&path, text, &config.dir)?;
            debug!(path = %path.display(), bytes = text.len(), "staged artifact");
            staged.push((file, path));
        }

        let mut written: Vec<PathBuf> = Vec::with_capacity(staged.len());
        for (file, path) in staged {
            if let Err(err) = file.persist(&path) {
                for done in &written {
                    let _ = fs::remove_file(done);
                }
                return Err(SinkError::Write {
                    path,
                    source: err.error,
                });
            }
            written.push(path);
        }
        info!(dir = %config.dir.display(), "wrote {} artifacts", written.len());
        Ok(written)
    }
}

/// Write `text` to a temp file in the destination's directory.
fn stage(path: &Path, text: &str, fallback_dir: &Path) -> Result<NamedTempFile, SinkError> {
    let write_err = |source| SinkError::Write {
        path: path.to_path_buf(),
        source,
    };
    if path.is_dir() {
        return Err(write_err(io::Error::other("destination is a directory")));
    }

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => fallback_dir,
    };
    let mut file = NamedTempFile::new_in(dir).map_err(write_err)?;
    file.write_all(text.as_bytes()).map_err(write_err)?;
    file.flush().map_err(write_err)?;
    Ok(file)
}

fn to_json<T: Serialize + ?Sized>(artifact: &'static str, value: &T) -> Result<String, SinkError> {
    let mut text = serde_json::to_string_pretty(value)
        .map_err(|source| SinkError::Serialize { artifact, source })?;
    text.push('\n');
    Ok(text)
}

/// Render and write all artifacts.
pub fn write_artifacts(
    locations: &OrderedLocations,
    config: &OutputConfig,
) -> Result<Vec<PathBuf>, SinkError> {
    Artifacts::render(locations)?.write(config)
}
