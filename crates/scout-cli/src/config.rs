//! Configuration file handling for scout.
//!
//! An optional TOML file at `~/.config/scout/config.toml` supplies defaults.
//! Resolution chain: CLI flag > env var > config file > built-in default.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::goals::DEFAULT_GOAL;

/// Env var overriding the output directory.
pub const OUT_DIR_ENV: &str = "SCOUT_OUT_DIR";

/// Output directory used when nothing else is configured.
pub const DEFAULT_OUT_DIR: &str = "plans";

// -----------------------------------------------------------------------
// Config file types
// -----------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub output: OutputSection,
    #[serde(default)]
    pub goals: GoalsSection,
}

#[derive(Debug, Default, Deserialize)]
pub struct OutputSection {
    /// Directory plan files are written to.
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
pub struct GoalsSection {
    /// Goal used when none is given on the command line.
    pub default: Option<String>,
}

// -----------------------------------------------------------------------
// Paths
// -----------------------------------------------------------------------

/// Return the scout config directory.
///
/// Always uses XDG layout: `$XDG_CONFIG_HOME/scout` or `~/.config/scout`.
pub fn config_dir() -> PathBuf {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        return PathBuf::from(xdg).join("scout");
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("scout")
}

pub fn config_path() -> PathBuf {
    config_dir().join("config.toml")
}

// -----------------------------------------------------------------------
// Read
// -----------------------------------------------------------------------

/// Load the config file at `path`.
///
/// A missing file yields `Ok(None)`; an unreadable or malformed one is an
/// error.
pub fn load_config_from(path: &Path) -> Result<Option<ConfigFile>> {
    let contents = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(e)
                .with_context(|| format!("failed to read config file at {}", path.display()));
        }
    };
    let config: ConfigFile = toml::from_str(&contents)
        .with_context(|| format!("failed to parse config file at {}", path.display()))?;
    Ok(Some(config))
}

// -----------------------------------------------------------------------
// Resolved config
// -----------------------------------------------------------------------

/// Fully resolved settings for one run.
#[derive(Debug)]
pub struct ScoutConfig {
    pub out_dir: PathBuf,
    pub default_goal: String,
}

impl ScoutConfig {
    /// Resolve settings from the CLI flag, environment, and config file.
    ///
    /// - Output dir: `cli_out` > `SCOUT_OUT_DIR` > `output.dir` > `plans`
    /// - Default goal: `goals.default` > built-in goal
    pub fn resolve(cli_out: Option<&Path>) -> Result<Self> {
        let file_config = load_config_from(&config_path())?.unwrap_or_default();

        let out_dir = if let Some(dir) = cli_out {
            dir.to_path_buf()
        } else if let Some(dir) = std::env::var_os(OUT_DIR_ENV).filter(|v| !v.is_empty()) {
            PathBuf::from(dir)
        } else if let Some(dir) = file_config.output.dir {
            dir
        } else {
            PathBuf::from(DEFAULT_OUT_DIR)
        };

        let default_goal = file_config
            .goals
            .default
            .filter(|g| !g.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_GOAL.to_string());

        tracing::debug!(out_dir = %out_dir.display(), "configuration resolved");

        Ok(Self {
            out_dir,
            default_goal,
        })
    }
}

// -----------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------
