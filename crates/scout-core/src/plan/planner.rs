//! Plan construction: candidate selection, target narrowing, template fill.

use std::sync::LazyLock;

use rand::Rng;
use regex::{Regex, RegexBuilder};

use super::templates::{TargetSets, TemplateKind};
use super::types::{Plan, PlanStep, StepIdGen};
use crate::goal::{GoalPattern, GoalPatternError};
use crate::repo::RepoSummary;

/// Maximum number of goal-matched candidate files.
pub const MAX_CANDIDATES: usize = 20;

pub const PLAN_NOTES: &[&str] = &[
    "Planner auto-focuses on files matching goal-derived keywords.",
    "You can reorder/remove steps before export.",
];

const NAVBAR_FALLBACK: &[&str] = &["src/components/Navbar.tsx", "src/components/Header.tsx"];
const STYLES_FALLBACK: &[&str] = &["src/styles/global.css", "tailwind.config.js"];
const UTILS_FALLBACK: &[&str] = &["src/utils/theme.ts"];

fn ci(pattern: &str) -> Regex {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .expect("built-in target pattern is valid")
}

static NAVBAR_PATH: LazyLock<Regex> = LazyLock::new(|| ci(r"navbar|header|app[-_/]?bar|topbar"));

static STYLE_PATH: LazyLock<Regex> = LazyLock::new(|| {
    ci(r"global\.css|globals\.css|styles?/.*\.css|tailwind\.config\.(js|ts)")
});

static UTIL_PATH: LazyLock<Regex> = LazyLock::new(|| {
    ci(r"utils?/.*theme.*\.(ts|tsx)|utils?/.*(http|api|request).*\.(ts|tsx)")
});

/// Paths from `paths` matching `rx`, or `fallback` when none do.
fn pick<'a>(paths: impl IntoIterator<Item = &'a str>, rx: &Regex, fallback: &[&str]) -> Vec<String> {
    let hits: Vec<String> = paths
        .into_iter()
        .filter(|p| rx.is_match(p))
        .map(str::to_string)
        .collect();
    if hits.is_empty() {
        fallback.iter().map(|s| s.to_string()).collect()
    } else {
        hits
    }
}

/// Compute the candidate and narrowed target lists for a goal pattern.
pub fn target_sets(pattern: &GoalPattern, repo: &RepoSummary) -> TargetSets {
    let candidates: Vec<String> = repo
        .paths()
        .filter(|p| pattern.is_match(p))
        .take(MAX_CANDIDATES)
        .map(str::to_string)
        .collect();

    let navbar = pick(candidates.iter().map(String::as_str), &NAVBAR_PATH, NAVBAR_FALLBACK);
    let styles = pick(repo.paths(), &STYLE_PATH, STYLES_FALLBACK);
    let utils = pick(repo.paths(), &UTIL_PATH, UTILS_FALLBACK);

    TargetSets {
        candidates,
        navbar,
        styles,
        utils,
    }
}

/// Build a plan for `goal` using thread-local randomness for step ids.
pub fn build_plan<'r>(goal: &str, repo: &'r RepoSummary) -> Result<Plan<'r>, GoalPatternError> {
    build_plan_with_rng(goal, repo, &mut rand::rng())
}

/// Build a plan for `goal`, drawing step ids from `rng`.
pub fn build_plan_with_rng<'r, R: Rng + ?Sized>(
    goal: &str,
    repo: &'r RepoSummary,
    rng: &mut R,
) -> Result<Plan<'r>, GoalPatternError> {
    let pattern = GoalPattern::from_goal(goal)?;
    let targets = target_sets(&pattern, repo);
    let kind = TemplateKind::classify(goal);

    tracing::debug!(
        goal,
        template = ?kind,
        candidates = targets.candidates.len(),
        "selected plan template"
    );

    let mut ids = StepIdGen::new(rng);
    let steps = kind
        .blueprints(&targets)
        .into_iter()
        .map(|bp| PlanStep::from_blueprint(ids.next_id(), bp))
        .collect();

    Ok(Plan {
        goal: goal.to_string(),
        repo,
        steps,
        notes: PLAN_NOTES.iter().map(|s| s.to_string()).collect(),
    })
}
