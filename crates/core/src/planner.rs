use std::path::{Path, PathBuf};

use crate::discover::DiscoveredFiles;
use crate::model::{AssetKind, CopyPlan};
use crate::normalize::normalize_path_name;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Destinations {
    pub images_dir: PathBuf,
    pub models_dir: PathBuf,
}

impl Destinations {
    pub fn new(images_dir: impl Into<PathBuf>, models_dir: impl Into<PathBuf>) -> Self {
        Self {
            images_dir: images_dir.into(),
            models_dir: models_dir.into(),
        }
    }

    pub fn root_for(&self, kind: AssetKind) -> &Path {
        match kind {
            AssetKind::Image => &self.images_dir,
            AssetKind::Model => &self.models_dir,
        }
    }
}

/// One plan per discovered file: images first, then models, each in discovery order.
pub fn build_copy_plans(
    discovered: &DiscoveredFiles,
    destinations: &Destinations,
) -> Vec<CopyPlan> {
    let images = discovered
        .images
        .iter()
        .map(|path| (path, AssetKind::Image));
    let models = discovered
        .models
        .iter()
        .map(|path| (path, AssetKind::Model));

    images
        .chain(models)
        .map(|(source, kind)| {
            let destination = destinations
                .root_for(kind)
                .join(normalize_path_name(source));
            CopyPlan::new(source.clone(), destination, kind)
        })
        .collect()
}
