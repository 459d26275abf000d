mod batch;
mod config;
mod goals;
#[cfg(test)]
mod test_util;
mod tui;

use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::Context;
use clap::{CommandFactory, Parser};
use clap_complete::Shell;

use scout_core::refine::{AcceptAll, Refiner};

use config::ScoutConfig;

#[derive(Parser)]
#[command(
    name = "scout",
    version,
    about = "Turn free-text refactor goals into JSON plans for coding agents"
)]
struct Cli {
    /// Goals to plan, one per argument
    #[arg(value_name = "GOAL")]
    goals: Vec<String>,

    /// Pipe-delimited list of goals (e.g. "add dark mode|fix navbar")
    #[arg(long = "goals", value_name = "LIST", conflicts_with = "goals_file")]
    goal_list: Option<String>,

    /// File with one goal per line; blank lines and `#` comments are skipped
    #[arg(long, value_name = "PATH")]
    goals_file: Option<PathBuf>,

    /// Skip interactive refinement and export every step
    #[arg(short = 'y', long)]
    yes: bool,

    /// Output directory for plan files (default: plans)
    #[arg(short = 'o', long, value_name = "DIR")]
    out: Option<PathBuf>,

    /// Repository root to analyze
    #[arg(long, value_name = "DIR", default_value = ".")]
    root: PathBuf,

    /// Print shell completions and exit
    #[arg(long, value_name = "SHELL", exclusive = true)]
    completions: Option<Shell>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Some(shell) = cli.completions {
        clap_complete::generate(shell, &mut Cli::command(), "scout", &mut std::io::stdout());
        return Ok(());
    }

    let resolved = ScoutConfig::resolve(cli.out.as_deref())?;

    let goals = goals::collect_goals(
        cli.goal_list.as_deref(),
        cli.goals_file.as_deref(),
        &cli.goals,
        &resolved.default_goal,
    )?;

    let mut refiner: Box<dyn Refiner> = if cli.yes {
        Box::new(AcceptAll)
    } else {
        if !std::io::stdin().is_terminal() {
            anyhow::bail!("interactive refinement needs a terminal; pass --yes to skip it");
        }
        Box::new(tui::StepPicker::default())
    };

    let options = batch::BatchOptions {
        root: cli.root,
        out_dir: resolved.out_dir,
        goals,
    };
    batch::run_batch(&options, refiner.as_mut()).context("plan batch failed")?;

    Ok(())
}
