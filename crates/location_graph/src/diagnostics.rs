//! Informational diagnostics stream.
//!
//! Everything the pipeline tolerates (missing files, malformed records,
//! unmatched facts, ambiguous merges) is reported here and logged through
//! `tracing`, never raised. Recording a diagnostic cannot fail.

use std::fmt;
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Diagnostic {
    /// A source file was absent; its stream is treated as empty
    MissingSourceFile { path: PathBuf },
    /// A record did not have the expected shape and was skipped
    MalformedRecord { source: String, detail: String },
    /// A fact named a location that has no node; the fact was dropped
    UnmatchedFact { kind: &'static str, key: String },
    /// Several candidates competed for one slot; the first was kept
    AmbiguousMerge { key: String, field: &'static str, candidates: usize },
    /// Several raw keys collapsed onto one canonical key
    ConsolidationGroup { key: String, members: Vec<String> },
    /// An overworld region marker node was removed from the output
    RegionFiltered { key: String },
}

impl Diagnostic {
    /// Short machine-friendly name of the diagnostic class
    pub fn kind(&self) -> &'static str {
        match self {
            Diagnostic::MissingSourceFile { .. } => "missing_source_file",
            Diagnostic::MalformedRecord { .. } => "malformed_record",
            Diagnostic::UnmatchedFact { .. } => "unmatched_fact",
            Diagnostic::AmbiguousMerge { .. } => "ambiguous_merge",
            Diagnostic::ConsolidationGroup { .. } => "consolidation_group",
            Diagnostic::RegionFiltered { .. } => "region_filtered",
        }
    }

    fn is_warning(&self) -> bool {
        matches!(
            self,
            Diagnostic::MissingSourceFile { .. }
                | Diagnostic::MalformedRecord { .. }
                | Diagnostic::UnmatchedFact { .. }
                | Diagnostic::AmbiguousMerge { .. }
        )
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::MissingSourceFile { path } => {
                write!(f, "missing source file {}, continuing without it", path.display())
            }
            Diagnostic::MalformedRecord { source, detail } => {
                write!(f, "skipped malformed record in {}: {}", source, detail)
            }
            Diagnostic::UnmatchedFact { kind, key } => {
                write!(f, "no location `{}` for {} facts, dropped", key, kind)
            }
            Diagnostic::AmbiguousMerge { key, field, candidates } => write!(
                f,
                "{} candidates for {} of `{}`, kept the first",
                candidates, field, key
            ),
            Diagnostic::ConsolidationGroup { key, members } => {
                write!(f, "merged {:?} into `{}`", members, key)
            }
            Diagnostic::RegionFiltered { key } => write!(f, "filtered region entry `{}`", key),
        }
    }
}

/// Ordered collection of diagnostics for one run.
#[derive(Clone, Debug, Default)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record and log one diagnostic
    pub fn push(&mut self, diagnostic: Diagnostic) {
        if diagnostic.is_warning() {
            warn!(kind = diagnostic.kind(), "{}", diagnostic);
        } else {
            info!(kind = diagnostic.kind(), "{}", diagnostic);
        }
        self.entries.push(diagnostic);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter()
    }

    /// Number of diagnostics of one class (see [`Diagnostic::kind`])
    pub fn count_kind(&self, kind: &str) -> usize {
        self.entries.iter().filter(|d| d.kind() == kind).count()
    }

    pub fn extend(&mut self, other: Diagnostics) {
        self.entries.extend(other.entries);
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
