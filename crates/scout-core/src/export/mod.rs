//! On-disk JSON formats: the `plan.v1` agent payload and the batch manifest.

mod manifest;

use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::plan::{Plan, PlanStep};
use crate::repo::FileInfo;
use crate::slug::slugify;

pub use manifest::{MANIFEST_FILE_NAME, Manifest, ManifestEntry};

/// Payload kind tag written into every exported plan.
pub const PLAN_KIND: &str = "plan.v1";

/// Maximum number of repository files included as hints.
pub const MAX_REPO_HINTS: usize = 50;

/// Errors writing plan or manifest files.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to create directory {path:?}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize {what}: {source}")]
    Serialize {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// Top-level structure of an exported plan file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AgentPlan {
    /// Always [`PLAN_KIND`].
    pub kind: String,
    pub goal: String,
    pub steps: Vec<AgentStep>,
    /// Leading slice of the analyzed files, for agent orientation.
    pub repo_hints: Vec<FileInfo>,
    pub notes: Vec<String>,
}

/// One step as seen by the downstream agent. Risk and effort are omitted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AgentStep {
    pub id: String,
    pub title: String,
    pub rationale: String,
    pub targets: Vec<String>,
    pub instructions: Vec<String>,
    pub acceptance: Vec<String>,
    pub depends_on: Vec<String>,
}

impl From<&PlanStep> for AgentStep {
    fn from(s: &PlanStep) -> Self {
        Self {
            id: s.id.clone(),
            title: s.title.clone(),
            rationale: s.rationale.clone(),
            targets: s.target_files.clone(),
            instructions: s.instructions.clone(),
            acceptance: s.acceptance_criteria.clone(),
            depends_on: s.depends_on.clone().unwrap_or_default(),
        }
    }
}

impl From<&Plan<'_>> for AgentPlan {
    fn from(plan: &Plan<'_>) -> Self {
        Self {
            kind: PLAN_KIND.to_string(),
            goal: plan.goal.clone(),
            steps: plan.steps.iter().map(AgentStep::from).collect(),
            repo_hints: plan.repo.files.iter().take(MAX_REPO_HINTS).cloned().collect(),
            notes: plan.notes.clone(),
        }
    }
}

/// Render `plan` as indented `plan.v1` JSON.
pub fn render_plan(plan: &Plan<'_>) -> Result<String, ExportError> {
    serde_json::to_string_pretty(&AgentPlan::from(plan)).map_err(|source| {
        ExportError::Serialize {
            what: "plan",
            source,
        }
    })
}

/// Write `plan` to `path`, creating parent directories and overwriting any
/// existing file. Returns the written path.
pub fn export_plan(plan: &Plan<'_>, path: &Path) -> Result<PathBuf, ExportError> {
    let json = render_plan(plan)?;
    write_file(path, &json)?;
    tracing::debug!(path = %path.display(), steps = plan.steps.len(), "plan exported");
    Ok(path.to_path_buf())
}

/// Output path for `goal`'s plan: `<out_dir>/<slug>.json`, normalized.
pub fn plan_path(out_dir: &Path, goal: &str) -> PathBuf {
    normalize_path(&out_dir.join(format!("{}.json", slugify(goal))))
}

/// Lexically drop `.` components and fold `..` into a preceding name, so
/// `./plans/` and `plans` yield the same file paths. Symlinks are not
/// consulted.
pub(crate) fn normalize_path(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            other => out.push(other),
        }
    }
    if out.as_os_str().is_empty() {
        out.push(".");
    }
    out
}

pub(crate) fn write_file(path: &Path, contents: &str) -> Result<(), ExportError> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir).map_err(|source| ExportError::CreateDir {
            path: dir.to_path_buf(),
            source,
        })?;
    }
    std::fs::write(path, contents).map_err(|source| ExportError::Write {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::build_plan;
    use crate::repo::RepoSummary;
    use pretty_assertions::assert_eq;
    use serde_json::Value;
    use tempfile::TempDir;

    fn repo_with(n: usize) -> RepoSummary {
        RepoSummary {
            files: (0..n)
                .map(|i| FileInfo {
                    path: format!("src/f{i}.ts"),
                    lang: ".ts".into(),
                    imports: vec!["react".into()],
                    exports: vec![format!("f{i}")],
                })
                .collect(),
            degraded: 0,
        }
    }

    #[test]
    fn plan_path_is_normalized() {
        assert_eq!(plan_path(Path::new("plans"), "A"), PathBuf::from("plans/a.json"));
        assert_eq!(plan_path(Path::new("./plans/"), "A"), PathBuf::from("plans/a.json"));
        assert_eq!(
            plan_path(Path::new("out/../plans"), "Add Dark Mode"),
            PathBuf::from("plans/add-dark-mode.json")
        );
        assert_eq!(plan_path(Path::new("../shared"), "x"), PathBuf::from("../shared/x.json"));
        assert_eq!(plan_path(Path::new("/tmp/./p"), "x"), PathBuf::from("/tmp/p/x.json"));
    }

    #[test]
    fn normalizing_to_nothing_yields_current_dir() {
        assert_eq!(normalize_path(Path::new("./a/..")), PathBuf::from("."));
    }

    #[test]
    fn payload_has_fixed_shape() {
        let repo = repo_with(3);
        let plan = build_plan("add dark mode toggle", &repo).unwrap();
        let value: Value = serde_json::from_str(&render_plan(&plan).unwrap()).unwrap();

        let keys: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys.len(), 5);
        assert_eq!(value["kind"], "plan.v1");
        assert_eq!(value["goal"], "add dark mode toggle");
        assert_eq!(value["steps"].as_array().unwrap().len(), 5);
        assert_eq!(
            value["steps"][0]["title"],
            "Inventory theme entry points & Navbar mount"
        );
        assert_eq!(value["repoHints"][0]["path"], "src/f0.ts");
        assert_eq!(value["repoHints"][0]["lang"], ".ts");
        assert_eq!(value["notes"].as_array().unwrap().len(), 2);

        let step = value["steps"][0].as_object().unwrap();
        let mut step_keys: Vec<&str> = step.keys().map(String::as_str).collect();
        step_keys.sort();
        assert_eq!(
            step_keys,
            vec!["acceptance", "dependsOn", "id", "instructions", "rationale", "targets", "title"]
        );
        assert_eq!(step["dependsOn"], Value::Array(vec![]));
    }

    #[test]
    fn field_order_matches_format() {
        let repo = repo_with(1);
        let plan = build_plan("x", &repo).unwrap();
        let json = render_plan(&plan).unwrap();
        let kind = json.find("\"kind\"").unwrap();
        let goal = json.find("\"goal\"").unwrap();
        let steps = json.find("\"steps\"").unwrap();
        let hints = json.find("\"repoHints\"").unwrap();
        let notes = json.find("\"notes\"").unwrap();
        assert!(kind < goal && goal < steps && steps < hints && hints < notes);
        assert!(json.starts_with("{\n  \"kind\""), "expected 2-space indent");
    }

    #[test]
    fn repo_hints_are_truncated() {
        let repo = repo_with(120);
        let plan = build_plan("x", &repo).unwrap();
        let payload = AgentPlan::from(&plan);
        assert_eq!(payload.repo_hints.len(), MAX_REPO_HINTS);
        assert_eq!(payload.repo_hints[49].path, "src/f49.ts");
    }

    #[test]
    fn export_creates_directories_and_overwrites() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested/deeper/plan.json");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "stale").unwrap();

        let repo = repo_with(0);
        let plan = build_plan("fix login form validation", &repo).unwrap();
        let written = export_plan(&plan, &path).unwrap();

        assert_eq!(written, path);
        let back: AgentPlan =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(back.steps.len(), 4);
        assert_eq!(back.kind, PLAN_KIND);
    }

    #[test]
    fn export_into_fresh_directory_tree() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a/b/c.json");
        let repo = repo_with(0);
        let plan = build_plan("theme", &repo).unwrap();
        export_plan(&plan, &path).unwrap();
        assert!(path.is_file());
    }

    #[test]
    fn write_failure_is_reported() {
        let dir = TempDir::new().unwrap();
        // A file where a directory is needed.
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "").unwrap();
        let repo = repo_with(0);
        let plan = build_plan("theme", &repo).unwrap();
        let err = export_plan(&plan, &blocker.join("plan.json")).unwrap_err();
        assert!(matches!(err, ExportError::CreateDir { .. }));
    }
}
