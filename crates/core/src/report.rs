use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::config::RunConfig;
use crate::discover::DiscoveredFiles;
use crate::model::{AssetKind, CopyOutcome, CopyResult, CopyStatus, CopySummary};

pub fn format_config_lines(config: &RunConfig) -> Vec<String> {
    vec![
        format!("Source:        {}", config.source.display()),
        format!("Project root:  {}", config.project_root.display()),
        format!("Images dest:   {}", config.images_dir.display()),
        format!("Models dest:   {}", config.models_dir.display()),
        format!("Threads:       {}", config.workers),
        format!("Dry run:       {}", config.dry_run),
    ]
}

pub fn format_discovery_line(discovered: &DiscoveredFiles) -> String {
    format!(
        "Discovered:    {} images, {} models",
        discovered.images.len(),
        discovered.models.len()
    )
}

/// `[copied            ] image d1.png -> /project/assets/cards/images/da.png`
pub fn format_status_line(result: &CopyResult) -> String {
    format!(
        "[{:18}] {:5} {} -> {}",
        result.outcome.label(),
        result.plan.kind,
        result.plan.source_name(),
        result.plan.destination.display()
    )
}

pub fn format_summary_lines(summary: &CopySummary, dry_run: bool) -> Vec<String> {
    let mut lines = vec![
        "Summary:".to_string(),
        format!("  Copied: {}", summary.copied),
        format!("  Skipped(same size): {}", summary.skipped),
    ];
    if dry_run {
        lines.push(format!("  Would copy: {}", summary.would_copy));
    }
    lines.push(format!("  Errors: {}", summary.errors));
    lines
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunReport {
    pub generated_at: String,
    pub dry_run: bool,
    pub source: String,
    pub images_dir: String,
    pub models_dir: String,
    pub workers: usize,
    pub discovered: DiscoveredCounts,
    pub summary: CopySummary,
    pub results: Vec<RunReportEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DiscoveredCounts {
    pub images: usize,
    pub models: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RunReportEntry {
    pub kind: AssetKind,
    pub source: String,
    pub destination: String,
    pub status: CopyStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl From<&CopyResult> for RunReportEntry {
    fn from(result: &CopyResult) -> Self {
        let message = match &result.outcome {
            CopyOutcome::Error(message) => Some(message.clone()),
            _ => None,
        };
        Self {
            kind: result.plan.kind,
            source: result.plan.source.to_string_lossy().to_string(),
            destination: result.plan.destination.to_string_lossy().to_string(),
            status: result.outcome.status(),
            message,
        }
    }
}

pub fn build_run_report(
    config: &RunConfig,
    discovered: &DiscoveredFiles,
    results: &[CopyResult],
    summary: &CopySummary,
) -> RunReport {
    RunReport {
        generated_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        dry_run: config.dry_run,
        source: config.source.to_string_lossy().to_string(),
        images_dir: config.images_dir.to_string_lossy().to_string(),
        models_dir: config.models_dir.to_string_lossy().to_string(),
        workers: config.workers,
        discovered: DiscoveredCounts {
            images: discovered.images.len(),
            models: discovered.models.len(),
        },
        summary: summary.clone(),
        results: results.iter().map(RunReportEntry::from).collect(),
    }
}

pub fn write_run_report(report: &RunReport, output_path: impl AsRef<Path>) -> Result<()> {
    let path = output_path.as_ref();
    let payload = serde_json::to_string_pretty(report).context("failed to serialize run report")?;
    fs::write(path, payload)
        .with_context(|| format!("failed to write run report to {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use tempfile::TempDir;

    use super::{
        build_run_report, format_status_line, format_summary_lines, write_run_report, RunReport,
    };
    use crate::config::{RawConfig, RunConfig};
    use crate::discover::DiscoveredFiles;
    use crate::model::{AssetKind, CopyOutcome, CopyPlan, CopyResult, CopyStatus, CopySummary};

    fn result(kind: AssetKind, outcome: CopyOutcome) -> CopyResult {
        CopyResult {
            plan: CopyPlan::new(
                PathBuf::from("/deck/d1.png"),
                PathBuf::from("/game/assets/cards/images/da.png"),
                kind,
            ),
            outcome,
        }
    }

    #[test]
    fn status_line_pads_label_and_kind() {
        let line = format_status_line(&result(AssetKind::Image, CopyOutcome::Copied));
        assert_eq!(
            line,
            "[copied            ] image d1.png -> /game/assets/cards/images/da.png"
        );

        let line = format_status_line(&result(
            AssetKind::Model,
            CopyOutcome::Error("failed to copy to x: denied".to_string()),
        ));
        assert!(line.starts_with("[ERROR: failed to copy to x: denied] model d1.png"));
    }

    #[test]
    fn summary_lists_would_copy_only_for_dry_runs() {
        let summary = CopySummary {
            copied: 3,
            skipped: 1,
            would_copy: 2,
            errors: 0,
            failures: Vec::new(),
        };

        let lines = format_summary_lines(&summary, false);
        assert_eq!(
            lines,
            vec![
                "Summary:",
                "  Copied: 3",
                "  Skipped(same size): 1",
                "  Errors: 0"
            ]
        );
        assert!(format_summary_lines(&summary, true).contains(&"  Would copy: 2".to_string()));
    }

    #[test]
    fn run_report_is_written_as_json() {
        let temp = TempDir::new().expect("temp dir");
        let config = RunConfig::resolve(
            RawConfig {
                source: PathBuf::from("/deck"),
                project_root: Some(PathBuf::from("/game")),
                dry_run: true,
                ..RawConfig::default()
            },
            temp.path(),
        );
        let discovered = DiscoveredFiles {
            images: vec![PathBuf::from("/deck/d1.png")],
            models: Vec::new(),
        };
        let results = vec![result(AssetKind::Image, CopyOutcome::WouldCopy)];
        let summary = CopySummary::from_results(&results);

        let report = build_run_report(&config, &discovered, &results, &summary);
        let path = temp.path().join("report.json");
        write_run_report(&report, &path).expect("write report");

        let raw = std::fs::read_to_string(&path).expect("read report");
        let parsed: RunReport = serde_json::from_str(&raw).expect("parse report");
        assert_eq!(parsed, report);
        assert!(parsed.dry_run);
        assert_eq!(parsed.discovered.images, 1);
        assert_eq!(parsed.summary.would_copy, 1);
        assert_eq!(parsed.results[0].status, CopyStatus::WouldCopy);
        assert_eq!(parsed.results[0].message, None);
        assert!(raw.contains("\"would_copy\""));
    }

    #[test]
    fn write_run_report_fails_for_missing_parent() {
        let temp = TempDir::new().expect("temp dir");
        let config = RunConfig::resolve(RawConfig::default(), temp.path());
        let discovered = DiscoveredFiles::default();
        let report = build_run_report(&config, &discovered, &[], &CopySummary::default());
        let err = write_run_report(&report, temp.path().join("missing/report.json"))
            .expect_err("parent does not exist");
        assert!(err.to_string().contains("failed to write run report"));
    }
}
