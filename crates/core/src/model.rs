use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp"];
pub const MODEL_EXTENSIONS: &[&str] = &["glb"];

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum AssetKind {
    Image,
    Model,
}

impl AssetKind {
    pub fn label(self) -> &'static str {
        match self {
            AssetKind::Image => "image",
            AssetKind::Model => "model",
        }
    }
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // `pad` so callers can align the kind column with `{:5}`.
        f.pad(self.label())
    }
}

/// One source-to-destination copy intent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyPlan {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub kind: AssetKind,
}

impl CopyPlan {
    pub fn new(source: PathBuf, destination: PathBuf, kind: AssetKind) -> Self {
        Self {
            source,
            destination,
            kind,
        }
    }

    pub fn source_name(&self) -> String {
        file_name_lossy(&self.source)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CopyOutcome {
    Copied,
    Skipped,
    WouldCopy,
    Error(String),
}

impl CopyOutcome {
    pub fn status(&self) -> CopyStatus {
        match self {
            CopyOutcome::Copied => CopyStatus::Copied,
            CopyOutcome::Skipped => CopyStatus::Skipped,
            CopyOutcome::WouldCopy => CopyStatus::WouldCopy,
            CopyOutcome::Error(_) => CopyStatus::Error,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, CopyOutcome::Error(_))
    }

    /// Console label, e.g. `skip (same size)` or `ERROR: permission denied`.
    pub fn label(&self) -> String {
        match self {
            CopyOutcome::Copied => "copied".to_string(),
            CopyOutcome::Skipped => "skip (same size)".to_string(),
            CopyOutcome::WouldCopy => "dry-run (would copy)".to_string(),
            CopyOutcome::Error(message) => format!("ERROR: {message}"),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CopyStatus {
    Copied,
    Skipped,
    WouldCopy,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyResult {
    pub plan: CopyPlan,
    pub outcome: CopyOutcome,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CopyFailure {
    pub source: String,
    pub destination: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct CopySummary {
    pub copied: u64,
    pub skipped: u64,
    #[serde(default)]
    pub would_copy: u64,
    pub errors: u64,
    #[serde(default)]
    pub failures: Vec<CopyFailure>,
}

impl CopySummary {
    pub fn from_results(results: &[CopyResult]) -> Self {
        results.iter().fold(Self::default(), |mut summary, result| {
            summary.record(result);
            summary
        })
    }

    pub fn record(&mut self, result: &CopyResult) {
        match &result.outcome {
            CopyOutcome::Copied => self.copied += 1,
            CopyOutcome::Skipped => self.skipped += 1,
            CopyOutcome::WouldCopy => self.would_copy += 1,
            CopyOutcome::Error(message) => {
                self.errors += 1;
                self.failures.push(CopyFailure {
                    source: result.plan.source.to_string_lossy().to_string(),
                    destination: result.plan.destination.to_string_lossy().to_string(),
                    message: message.clone(),
                });
            }
        }
    }

    pub fn total(&self) -> u64 {
        self.copied + self.skipped + self.would_copy + self.errors
    }

    pub fn has_errors(&self) -> bool {
        self.errors > 0
    }
}

pub(crate) fn file_name_lossy(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_default()
}
