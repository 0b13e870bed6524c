pub mod config;
pub mod discover;
pub mod error;
pub mod execute;
pub mod model;
pub mod normalize;
pub mod planner;
pub mod report;

pub use config::{
    infer_project_root, RawConfig, RunConfig, DEFAULT_IMAGES_DIR, DEFAULT_MODELS_DIR,
    DEFAULT_SOURCE_DIR,
};
pub use discover::{classify_extension, discover_files, DiscoveredFiles};
pub use error::{ConfigError, CopyError};
pub use execute::{
    copy_one, execute_plans, execute_plans_with_callback, CopyRunOutput, ExecuteOptions,
    DEFAULT_WORKERS,
};
pub use model::{
    AssetKind, CopyFailure, CopyOutcome, CopyPlan, CopyResult, CopyStatus, CopySummary,
    IMAGE_EXTENSIONS, MODEL_EXTENSIONS,
};
pub use normalize::{normalize_basename, normalize_path_name};
pub use planner::{build_copy_plans, Destinations};
pub use report::{
    build_run_report, format_config_lines, format_discovery_line, format_status_line,
    format_summary_lines, write_run_report, DiscoveredCounts, RunReport, RunReportEntry,
};
