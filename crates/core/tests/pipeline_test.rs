use std::fs;
use std::path::Path;

use anyhow::Result;
use card_assets_core::{
    build_copy_plans, discover_files, execute_plans, ExecuteOptions, RawConfig, RunConfig,
};
use tempfile::TempDir;

fn seed_deck(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir)?;
    fs::write(dir.join("d1.png"), b"diamond ace")?;
    fs::write(dir.join("dt.png"), b"diamond ten")?;
    fs::write(dir.join("HT.JPG"), b"heart ten")?;
    fs::write(dir.join("s5.webp"), b"spade five")?;
    fs::write(dir.join("c1.glb"), b"club ace model")?;
    fs::write(dir.join("readme.txt"), b"ignored")?;
    fs::create_dir_all(dir.join("extras"))?;
    fs::write(dir.join("extras").join("sq.png"), b"nested, ignored")?;
    Ok(())
}

fn config(temp: &TempDir, dry_run: bool) -> RunConfig {
    RunConfig::resolve(
        RawConfig {
            source: temp.path().join("deck"),
            project_root: Some(temp.path().join("game")),
            workers: 4,
            dry_run,
            ..RawConfig::default()
        },
        temp.path(),
    )
}

fn run(config: &RunConfig) -> Result<card_assets_core::CopyRunOutput> {
    config.validate_source()?;
    let discovered = discover_files(&config.source)?;
    let plans = build_copy_plans(&discovered, &config.destinations());
    Ok(execute_plans(plans, &config.execute_options()))
}

#[test]
fn copies_and_renames_into_asset_tree() -> Result<()> {
    let temp = TempDir::new()?;
    seed_deck(&temp.path().join("deck"))?;
    let config = config(&temp, false);

    let output = run(&config)?;
    assert_eq!(output.summary.copied, 5);
    assert_eq!(output.summary.errors, 0);

    let images = temp.path().join("game/assets/cards/images");
    let models = temp.path().join("game/assets/cards/models");
    assert_eq!(fs::read(images.join("da.png"))?, b"diamond ace");
    assert_eq!(fs::read(images.join("d10.png"))?, b"diamond ten");
    assert_eq!(fs::read(images.join("h10.jpg"))?, b"heart ten");
    assert_eq!(fs::read(images.join("s5.webp"))?, b"spade five");
    assert_eq!(fs::read(models.join("ca.glb"))?, b"club ace model");
    assert!(!images.join("sq.png").exists());
    assert!(!images.join("readme.txt").exists());

    Ok(())
}

#[test]
fn second_run_skips_everything() -> Result<()> {
    let temp = TempDir::new()?;
    seed_deck(&temp.path().join("deck"))?;
    let config = config(&temp, false);

    let first = run(&config)?;
    assert_eq!(first.summary.copied, 5);

    let second = run(&config)?;
    assert_eq!(second.summary.copied, 0);
    assert_eq!(second.summary.skipped, 5);
    assert_eq!(second.summary.errors, 0);

    Ok(())
}

#[test]
fn dry_run_leaves_no_trace() -> Result<()> {
    let temp = TempDir::new()?;
    seed_deck(&temp.path().join("deck"))?;
    let config = config(&temp, true);

    let output = run(&config)?;
    assert_eq!(output.summary.would_copy, 5);
    assert_eq!(output.summary.copied, 0);
    assert!(!temp.path().join("game").exists());

    Ok(())
}

#[test]
fn image_plans_come_before_model_plans() -> Result<()> {
    let temp = TempDir::new()?;
    seed_deck(&temp.path().join("deck"))?;
    let config = config(&temp, true);

    let output = run(&config)?;
    let kinds = output
        .results
        .iter()
        .map(|result| result.plan.kind.label())
        .collect::<Vec<_>>();
    assert_eq!(kinds, vec!["image", "image", "image", "image", "model"]);

    Ok(())
}

#[test]
fn missing_source_runs_no_plans() -> Result<()> {
    let temp = TempDir::new()?;
    let config = config(&temp, false);

    assert!(run(&config).is_err());
    assert!(!temp.path().join("game").exists());

    Ok(())
}
