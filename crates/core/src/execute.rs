//! Copy execution over a fixed-size worker pool.

use std::fs;
use std::path::Path;

use filetime::FileTime;
use rayon::prelude::*;
use rayon::ThreadPoolBuilder;
use tracing::{debug, info, warn};

use crate::error::CopyError;
use crate::model::{CopyOutcome, CopyPlan, CopyResult, CopySummary};

pub const DEFAULT_WORKERS: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecuteOptions {
    /// Worker pool size. Zero is treated as one.
    pub workers: usize,
    /// Report what would be copied without touching the filesystem.
    pub dry_run: bool,
}

impl Default for ExecuteOptions {
    fn default() -> Self {
        Self {
            workers: DEFAULT_WORKERS,
            dry_run: false,
        }
    }
}

impl ExecuteOptions {
    pub fn worker_count(&self) -> usize {
        self.workers.max(1)
    }
}

#[derive(Debug, Clone, Default)]
pub struct CopyRunOutput {
    /// One result per plan, in plan order.
    pub results: Vec<CopyResult>,
    pub summary: CopySummary,
}

/// Execute one plan.
///
/// Order of checks: same-size skip, dry-run, ensure the parent directory, copy.
/// A dry run therefore never creates directories either.
pub fn copy_one(plan: &CopyPlan, dry_run: bool) -> CopyOutcome {
    if is_same_size(&plan.source, &plan.destination) {
        return CopyOutcome::Skipped;
    }
    if dry_run {
        return CopyOutcome::WouldCopy;
    }

    match ensure_parent_dir(&plan.destination)
        .and_then(|_| copy_file_with_metadata(&plan.source, &plan.destination))
    {
        Ok(()) => CopyOutcome::Copied,
        Err(err) => CopyOutcome::Error(err.to_string()),
    }
}

pub fn execute_plans(plans: Vec<CopyPlan>, options: &ExecuteOptions) -> CopyRunOutput {
    execute_plans_with_callback(plans, options, |_| {})
}

/// Run every plan on the pool and wait for all of them.
///
/// `on_result` is called from the worker thread as soon as a plan finishes, so
/// callbacks arrive in completion order. The returned results keep plan order.
pub fn execute_plans_with_callback<F>(
    plans: Vec<CopyPlan>,
    options: &ExecuteOptions,
    on_result: F,
) -> CopyRunOutput
where
    F: Fn(&CopyResult) + Sync,
{
    if plans.is_empty() {
        return CopyRunOutput::default();
    }

    let dry_run = options.dry_run;
    let n_workers = options.worker_count();
    let run_plan = |plan: CopyPlan| {
        let outcome = copy_one(&plan, dry_run);
        match &outcome {
            CopyOutcome::Error(message) => {
                warn!("copy failed for {}: {message}", plan.source.display())
            }
            other => debug!(
                "{} -> {}: {:?}",
                plan.source.display(),
                plan.destination.display(),
                other
            ),
        }
        let result = CopyResult { plan, outcome };
        on_result(&result);
        result
    };

    let results = if n_workers <= 1 {
        plans.into_iter().map(run_plan).collect::<Vec<_>>()
    } else {
        match ThreadPoolBuilder::new().num_threads(n_workers).build() {
            Ok(pool) => pool.install(|| plans.into_par_iter().map(run_plan).collect::<Vec<_>>()),
            Err(err) => {
                warn!("failed to build copy pool (workers={n_workers}): {err}; copying serially");
                plans.into_iter().map(run_plan).collect::<Vec<_>>()
            }
        }
    };

    let summary = CopySummary::from_results(&results);
    info!(
        "copy run finished: copied={} skipped={} would_copy={} errors={}",
        summary.copied, summary.skipped, summary.would_copy, summary.errors
    );
    CopyRunOutput { results, summary }
}

// Size equality is the only check; unreadable metadata means "not the same".
fn is_same_size(source: &Path, destination: &Path) -> bool {
    let Ok(meta_dst) = fs::metadata(destination) else {
        return false;
    };
    fs::metadata(source).is_ok_and(|meta_src| meta_src.len() == meta_dst.len())
}

fn ensure_parent_dir(destination: &Path) -> Result<(), CopyError> {
    let Some(parent) = destination.parent() else {
        return Ok(());
    };
    if parent.as_os_str().is_empty() {
        return Ok(());
    }
    fs::create_dir_all(parent).map_err(|source| CopyError::CreateDir {
        path: parent.to_path_buf(),
        source,
    })
}

fn copy_file_with_metadata(source: &Path, destination: &Path) -> Result<(), CopyError> {
    fs::copy(source, destination).map_err(|err| CopyError::Copy {
        path: destination.to_path_buf(),
        source: err,
    })?;

    let to_metadata_error = |err: std::io::Error| CopyError::Metadata {
        path: destination.to_path_buf(),
        source: err,
    };
    let meta_src = fs::metadata(source).map_err(to_metadata_error)?;
    filetime::set_file_times(
        destination,
        FileTime::from_last_access_time(&meta_src),
        FileTime::from_last_modification_time(&meta_src),
    )
    .map_err(to_metadata_error)
}
