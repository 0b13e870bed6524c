use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::execute::{ExecuteOptions, DEFAULT_WORKERS};
use crate::planner::Destinations;

/// Example source directory used when `--src` is not given.
pub const DEFAULT_SOURCE_DIR: &str = "deck_of_cards";
pub const DEFAULT_IMAGES_DIR: &str = "assets/cards/images";
pub const DEFAULT_MODELS_DIR: &str = "assets/cards/models";

/// Configuration as supplied by the caller, before path resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawConfig {
    pub source: PathBuf,
    pub project_root: Option<PathBuf>,
    pub images_dir: PathBuf,
    pub models_dir: PathBuf,
    pub workers: usize,
    pub dry_run: bool,
}

impl Default for RawConfig {
    fn default() -> Self {
        Self {
            source: PathBuf::from(DEFAULT_SOURCE_DIR),
            project_root: None,
            images_dir: PathBuf::from(DEFAULT_IMAGES_DIR),
            models_dir: PathBuf::from(DEFAULT_MODELS_DIR),
            workers: DEFAULT_WORKERS,
            dry_run: false,
        }
    }
}

/// Fully resolved run configuration. Every path is absolute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub source: PathBuf,
    pub project_root: PathBuf,
    pub images_dir: PathBuf,
    pub models_dir: PathBuf,
    pub workers: usize,
    pub dry_run: bool,
}

impl RunConfig {
    pub fn resolve(raw: RawConfig, cwd: &Path) -> Self {
        let project_root = match raw.project_root {
            Some(root) => absolutize(&root, cwd),
            None => infer_project_root(cwd),
        };
        Self {
            source: absolutize(&raw.source, cwd),
            images_dir: absolutize(&raw.images_dir, &project_root),
            models_dir: absolutize(&raw.models_dir, &project_root),
            project_root,
            workers: raw.workers.max(1),
            dry_run: raw.dry_run,
        }
    }

    pub fn validate_source(&self) -> Result<(), ConfigError> {
        if !self.source.exists() {
            return Err(ConfigError::SourceNotFound(self.source.clone()));
        }
        if !self.source.is_dir() {
            return Err(ConfigError::SourceNotDirectory(self.source.clone()));
        }
        Ok(())
    }

    pub fn destinations(&self) -> Destinations {
        Destinations::new(self.images_dir.clone(), self.models_dir.clone())
    }

    pub fn execute_options(&self) -> ExecuteOptions {
        ExecuteOptions {
            workers: self.workers,
            dry_run: self.dry_run,
        }
    }
}

/// Nearest ancestor of `start` (inclusive) holding an `assets` directory or a
/// `Cargo.toml`. Falls back to `start` itself.
pub fn infer_project_root(start: &Path) -> PathBuf {
    start
        .ancestors()
        .find(|dir| dir.join("assets").is_dir() || dir.join("Cargo.toml").is_file())
        .unwrap_or(start)
        .to_path_buf()
}

fn absolutize(path: &Path, base: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}
