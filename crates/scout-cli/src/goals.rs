//! Goal sources: positional arguments, `--goals`, and `--goals-file`.

use std::path::Path;

use anyhow::{Context, Result};

/// Goal used when none is supplied anywhere.
pub const DEFAULT_GOAL: &str = "Refactor button props to shallow-merge deprecated & new slotProps";

/// Split a `|`-delimited goal list, trimming entries and dropping empties.
pub fn split_goal_list(list: &str) -> Vec<String> {
    list.split('|')
        .map(str::trim)
        .filter(|g| !g.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parse goals-file text: one goal per line, blank and `#` lines skipped.
pub fn parse_goals_file(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .map(str::to_string)
        .collect()
}

pub fn read_goals_file(path: &Path) -> Result<Vec<String>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read goals file: {}", path.display()))?;
    Ok(parse_goals_file(&text))
}

/// Assemble the run's goals.
///
/// `--goals` or `--goals-file` (never both) come first, followed by
/// positional goals as given. If the result is empty, `default_goal` is used
/// alone.
pub fn collect_goals(
    list: Option<&str>,
    file: Option<&Path>,
    positional: &[String],
    default_goal: &str,
) -> Result<Vec<String>> {
    let mut goals = match (list, file) {
        (_, Some(path)) => read_goals_file(path)?,
        (Some(list), None) => split_goal_list(list),
        (None, None) => Vec::new(),
    };
    goals.extend(positional.iter().cloned());

    if goals.is_empty() {
        goals.push(default_goal.to_string());
    }
    Ok(goals)
}
