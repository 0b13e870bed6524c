use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::model::{AssetKind, IMAGE_EXTENSIONS, MODEL_EXTENSIONS};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiscoveredFiles {
    pub images: Vec<PathBuf>,
    pub models: Vec<PathBuf>,
}

impl DiscoveredFiles {
    pub fn is_empty(&self) -> bool {
        self.images.is_empty() && self.models.is_empty()
    }

    pub fn len(&self) -> usize {
        self.images.len() + self.models.len()
    }
}

pub fn classify_extension(path: &Path) -> Option<AssetKind> {
    let extension = path.extension()?.to_string_lossy().to_lowercase();
    if IMAGE_EXTENSIONS.contains(&extension.as_str()) {
        Some(AssetKind::Image)
    } else if MODEL_EXTENSIONS.contains(&extension.as_str()) {
        Some(AssetKind::Model)
    } else {
        None
    }
}

/// List the direct regular files of `dir` and group them by asset kind.
///
/// Subdirectories are not descended into and unknown extensions are dropped.
/// Entries keep the order in which the directory listing returned them.
pub fn discover_files(dir: &Path) -> Result<DiscoveredFiles> {
    let mut discovered = DiscoveredFiles::default();

    let walker = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true);
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) if err.depth() == 0 => {
                return Err(err)
                    .with_context(|| format!("failed to list source directory {}", dir.display()));
            }
            Err(err) => {
                // Broken symlinks and entries that vanish mid-listing are not regular files.
                debug!("discovery skipped entry: {err}");
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.into_path();
        match classify_extension(&path) {
            Some(AssetKind::Image) => discovered.images.push(path),
            Some(AssetKind::Model) => discovered.models.push(path),
            None => {}
        }
    }

    info!(
        "discovered {} image(s) and {} model(s) in {}",
        discovered.images.len(),
        discovered.models.len(),
        dir.display()
    );
    Ok(discovered)
}
