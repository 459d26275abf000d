//! Batch orchestration: analyze once, then plan, refine, and export each goal.

use std::path::PathBuf;

use anyhow::{Context, Result};

use scout_core::export::{Manifest, export_plan, plan_path};
use scout_core::plan::build_plan;
use scout_core::refine::{Refiner, refine_plan};
use scout_core::repo::analyze_repo;

/// Inputs for one run.
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Repository root to analyze.
    pub root: PathBuf,
    pub out_dir: PathBuf,
    pub goals: Vec<String>,
}

/// Run every goal in order and write the manifest.
///
/// Plans are written as they are produced; the manifest only after the last
/// goal, so a failure part-way leaves earlier plans without an index.
/// Returns the manifest and its path.
pub fn run_batch(opts: &BatchOptions, refiner: &mut dyn Refiner) -> Result<(Manifest, PathBuf)> {
    let quoted: Vec<String> = opts.goals.iter().map(|g| format!("{g:?}")).collect();
    println!("Goals: {}", quoted.join(", "));

    let repo = analyze_repo(&opts.root)
        .with_context(|| format!("failed to analyze repository at {}", opts.root.display()))?;
    println!(
        "Analyzed {} files ({} degraded)",
        repo.files.len(),
        repo.degraded
    );

    let mut manifest = Manifest::default();
    for goal in &opts.goals {
        let mut plan =
            build_plan(goal, &repo).with_context(|| format!("failed to plan goal {goal:?}"))?;

        refine_plan(&mut plan, refiner)
            .with_context(|| format!("failed to refine plan for {goal:?}"))?;

        let written = export_plan(&plan, &plan_path(&opts.out_dir, goal))?;
        println!("Plan ready: {}", written.display());
        manifest.push(goal.as_str(), &written);
    }

    let manifest_path = manifest.write(&opts.out_dir)?;
    println!("Manifest written: {}", manifest_path.display());
    println!("Hand these JSON files to your coding agent.");

    Ok((manifest, manifest_path))
}
