//! The two step templates and the classifier that selects between them.
//!
//! Templates are pure functions from [`TargetSets`] to step blueprints; all
//! prose, risk and effort labels are fixed per template.

use std::sync::LazyLock;

use regex::{Regex, RegexBuilder};

use super::types::{Effort, Risk, StepBlueprint};

/// Glob targets for the closing tests/guardrails step of both templates.
const TEST_TARGETS: &[&str] = &["src/**/__tests__/*.test.{ts,tsx}", ".eslintrc.*"];

static DARK_MODE_GOAL: LazyLock<Regex> = LazyLock::new(|| {
    RegexBuilder::new(r"dark\s*mode|theme")
        .case_insensitive(true)
        .build()
        .expect("built-in classifier pattern is valid")
});

/// Which template a goal is planned with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateKind {
    DarkMode,
    Generic,
}

impl TemplateKind {
    /// Classify a goal by its own text (not the derived keyword set).
    pub fn classify(goal: &str) -> Self {
        if DARK_MODE_GOAL.is_match(goal) {
            Self::DarkMode
        } else {
            Self::Generic
        }
    }

    pub fn blueprints(self, targets: &TargetSets) -> Vec<StepBlueprint> {
        match self {
            Self::DarkMode => dark_mode_steps(targets),
            Self::Generic => generic_steps(targets),
        }
    }
}

/// File lists a template draws its step targets from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TargetSets {
    /// Goal-matched paths, capped.
    pub candidates: Vec<String>,
    pub navbar: Vec<String>,
    pub styles: Vec<String>,
    pub utils: Vec<String>,
}

/// Order-preserving union without duplicates.
fn union(lists: &[&[String]]) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for path in lists.iter().flat_map(|l| l.iter()) {
        if !out.contains(path) {
            out.push(path.clone());
        }
    }
    out
}

fn test_targets() -> Vec<String> {
    TEST_TARGETS.iter().map(|s| s.to_string()).collect()
}

fn dark_mode_steps(t: &TargetSets) -> Vec<StepBlueprint> {
    vec![
        StepBlueprint {
            title: "Inventory theme entry points & Navbar mount",
            rationale: "Identify every relevant touchpoint before adding dark mode.",
            targets: union(&[
                t.candidates.as_slice(),
                t.navbar.as_slice(),
                t.styles.as_slice(),
            ]),
            instructions: &[
                "Search terms: 'Navbar', 'Header', 'ThemeProvider', 'dark', 'tailwind.config', 'global.css'.",
                "List all files where theme or color-scheme is handled.",
            ],
            acceptance: &[
                "A checklist of affected components/styles is added to plan notes.",
                "No obvious Navbar/theme file is missed (spot-check by search).",
            ],
            risk: Risk::Low,
            effort: Effort::S,
        },
        StepBlueprint {
            title: "Introduce theme manager utility",
            rationale: "Centralized toggle logic is reusable and testable.",
            targets: t.utils.clone(),
            instructions: &[
                "Create/extend 'src/utils/theme.ts' with: getPreferredTheme(), applyTheme(theme), toggleTheme().",
                "Implement: data-theme attribute on <html>, media query '(prefers-color-scheme: dark)'.",
                "Persist choice via localStorage (key: 'theme').",
            ],
            acceptance: &[
                "Toggling works without page reload.",
                "Theme preference persists across refresh and new tabs.",
                "No TypeScript errors.",
            ],
            risk: Risk::Low,
            effort: Effort::S,
        },
        StepBlueprint {
            title: "Wire Navbar toggle control",
            rationale: "User-facing switch is needed to trigger theme changes.",
            targets: t.navbar.clone(),
            instructions: &[
                "Add a toggle button/icon in Navbar; onClick calls toggleTheme().",
                "Use accessible pattern: role='switch' or aria-pressed; visible focus states.",
                "Show current state (icon/sr-only text) based on data-theme.",
            ],
            acceptance: &[
                "Toggle is keyboard-accessible.",
                "Navbar reflects theme instantly on click.",
                "No layout shift/regression.",
            ],
            risk: Risk::Medium,
            effort: Effort::M,
        },
        StepBlueprint {
            title: "Define light/dark design tokens & Tailwind config",
            rationale: "Consistent colors via CSS vars/Tailwind prevents drift.",
            targets: t.styles.clone(),
            instructions: &[
                "In global.css: define :root vars for light, and [data-theme='dark'] overrides.",
                "Tailwind: set darkMode: 'class'; map colors to CSS vars where applicable.",
                "Audit key components (Navbar, body bg, text, links) to use tokens.",
            ],
            acceptance: &[
                "Both themes readable with sufficient contrast (WCAG AA for text).",
                "No hardcoded hex colors remain in Navbar.",
                "Tailwind builds successfully.",
            ],
            risk: Risk::Medium,
            effort: Effort::M,
        },
        StepBlueprint {
            title: "Add tests & guardrails",
            rationale: "Prevent regressions and enforce correct theme usage.",
            targets: test_targets(),
            instructions: &[
                "Unit tests: theme util functions (applyTheme/toggleTheme).",
                "Component test: Navbar renders correct icon/state under both themes.",
                "ESLint rule/config: forbid hardcoded color literals in specified folders.",
            ],
            acceptance: &[
                "Tests pass locally/CI.",
                "ESLint flags hardcoded colors if reintroduced.",
            ],
            risk: Risk::Medium,
            effort: Effort::M,
        },
    ]
}

fn generic_steps(t: &TargetSets) -> Vec<StepBlueprint> {
    vec![
        StepBlueprint {
            title: "Clarify scope & find relevant files",
            rationale: "A plan that does not target the right files will be unreliable.",
            targets: union(&[t.candidates.as_slice()]),
            instructions: &[
                "Search by goal keywords across repo; list affected files.",
                "Confirm scope with brief notes (what's in/out).",
            ],
            acceptance: &[
                "Short scope note present.",
                "At least 3 likely target files identified (or rationale if fewer).",
            ],
            risk: Risk::Low,
            effort: Effort::S,
        },
        StepBlueprint {
            title: "Introduce supporting utility/module",
            rationale: "Centralize logic to avoid duplication.",
            targets: t.utils.clone(),
            instructions: &[
                "Create/extend utility with minimal API for this goal.",
                "Add unit tests for the utility.",
            ],
            acceptance: &[
                "No TS errors; tests pass.",
                "Call sites can import the utility cleanly.",
            ],
            risk: Risk::Low,
            effort: Effort::S,
        },
        StepBlueprint {
            title: "Refactor target components/services",
            rationale: "Apply utility and remove ad-hoc patterns.",
            targets: t.candidates.clone(),
            instructions: &[
                "Replace ad-hoc logic with utility calls.",
                "Keep changes small and commit logically.",
            ],
            acceptance: &[
                "No runtime regressions in changed areas.",
                "Type checks pass across refactored files.",
            ],
            risk: Risk::Medium,
            effort: Effort::M,
        },
        StepBlueprint {
            title: "Add tests & guardrails",
            rationale: "Prevent regressions for this goal's patterns.",
            targets: test_targets(),
            instructions: &[
                "Write tests covering new behavior.",
                "Lint/CI check for anti-patterns linked to this goal.",
            ],
            acceptance: &[
                "Tests pass locally/CI.",
                "ESLint flags known anti-patterns if reintroduced.",
            ],
            risk: Risk::Medium,
            effort: Effort::M,
        },
    ]
}
