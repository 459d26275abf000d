//! Plan and step types.

use std::collections::HashSet;
use std::fmt;

use rand::Rng;

use crate::repo::RepoSummary;

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Risk label attached to a step. Internal only; not exported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Risk {
    Low,
    Medium,
    High,
}

/// T-shirt effort estimate for a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effort {
    S,
    M,
    L,
}

impl fmt::Display for Effort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::S => "S",
            Self::M => "M",
            Self::L => "L",
        };
        f.write_str(s)
    }
}

// ---------------------------------------------------------------------------
// Steps
// ---------------------------------------------------------------------------

/// Fixed content of a template step, before an id is assigned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepBlueprint {
    pub title: &'static str,
    pub rationale: &'static str,
    pub targets: Vec<String>,
    pub instructions: &'static [&'static str],
    pub acceptance: &'static [&'static str],
    pub risk: Risk,
    pub effort: Effort,
}

/// One actionable step of a plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanStep {
    /// Opaque token, unique within the plan.
    pub id: String,
    pub title: String,
    pub rationale: String,
    /// Ordered, de-duplicated paths or globs the step touches.
    pub target_files: Vec<String>,
    pub instructions: Vec<String>,
    pub acceptance_criteria: Vec<String>,
    pub risk: Risk,
    pub estimated_effort: Effort,
    /// Ids of steps that must be done first.
    pub depends_on: Option<Vec<String>>,
}

impl PlanStep {
    pub fn from_blueprint(id: String, bp: StepBlueprint) -> Self {
        let to_owned = |lines: &[&'static str]| -> Vec<String> {
            lines.iter().map(|s| s.to_string()).collect()
        };
        Self {
            id,
            title: bp.title.to_string(),
            rationale: bp.rationale.to_string(),
            target_files: bp.targets,
            instructions: to_owned(bp.instructions),
            acceptance_criteria: to_owned(bp.acceptance),
            risk: bp.risk,
            estimated_effort: bp.effort,
            depends_on: None,
        }
    }
}

/// Issues step ids: 4 random bytes, hex-encoded, never repeated within one
/// generator.
pub struct StepIdGen<'g, R: Rng + ?Sized> {
    rng: &'g mut R,
    issued: HashSet<String>,
}

impl<'g, R: Rng + ?Sized> StepIdGen<'g, R> {
    pub fn new(rng: &'g mut R) -> Self {
        Self {
            rng,
            issued: HashSet::new(),
        }
    }

    pub fn next_id(&mut self) -> String {
        loop {
            let mut bytes = [0u8; 4];
            self.rng.fill(&mut bytes);
            let id = hex::encode(bytes);
            if self.issued.insert(id.clone()) {
                return id;
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Plan
// ---------------------------------------------------------------------------

/// A generated plan for one goal.
#[derive(Debug, Clone)]
pub struct Plan<'r> {
    pub goal: String,
    pub repo: &'r RepoSummary,
    pub steps: Vec<PlanStep>,
    pub notes: Vec<String>,
}

impl Plan<'_> {
    /// Remove every step whose id is in `ids`, keeping the order of the rest.
    ///
    /// Any `depends_on` entry that pointed at a removed step is dropped so the
    /// plan never references ids it does not contain. Returns the number of
    /// steps removed.
    pub fn remove_steps(&mut self, ids: &HashSet<String>) -> usize {
        let before = self.steps.len();
        self.steps.retain(|s| !ids.contains(&s.id));
        let removed = before - self.steps.len();

        let remaining: HashSet<String> = self.steps.iter().map(|s| s.id.clone()).collect();
        for step in &mut self.steps {
            let Some(deps) = step.depends_on.as_mut() else {
                continue;
            };
            deps.retain(|dep| {
                let keep = remaining.contains(dep);
                if !keep {
                    tracing::warn!(
                        step = %step.id,
                        dependency = %dep,
                        "dropping dependency on removed step"
                    );
                }
                keep
            });
        }

        removed
    }

    /// Pairs of `(step id, dependency id)` whose dependency is not in the plan.
    pub fn dangling_dependencies(&self) -> Vec<(String, String)> {
        let ids: HashSet<&str> = self.steps.iter().map(|s| s.id.as_str()).collect();
        self.steps
            .iter()
            .flat_map(|s| {
                s.depends_on
                    .iter()
                    .flatten()
                    .filter(|d| !ids.contains(d.as_str()))
                    .map(|d| (s.id.clone(), d.clone()))
            })
            .collect()
    }
}
