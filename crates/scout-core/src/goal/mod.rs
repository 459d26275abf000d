//! Goal-to-pattern mapping.
//!
//! A goal string is checked against a fixed, ordered list of keyword rules.
//! Every rule whose trigger matches contributes its keywords; the union is
//! compiled into one case-insensitive alternation used to match file paths.

use std::sync::LazyLock;

use regex::{Regex, RegexBuilder};
use thiserror::Error;

/// A trigger expression and the path keywords it contributes.
#[derive(Debug)]
pub struct KeywordRule {
    /// Short label used in logs (e.g. `theme`).
    pub name: &'static str,
    trigger: Regex,
    pub keywords: &'static [&'static str],
}

impl KeywordRule {
    fn new(name: &'static str, trigger: &str, keywords: &'static [&'static str]) -> Self {
        let trigger = RegexBuilder::new(trigger)
            .case_insensitive(true)
            .build()
            .expect("built-in trigger pattern is valid");
        Self {
            name,
            trigger,
            keywords,
        }
    }

    /// Whether this rule fires for `goal`.
    pub fn fires(&self, goal: &str) -> bool {
        self.trigger.is_match(goal)
    }
}

/// Keywords used when no rule fires.
pub const FALLBACK_KEYWORDS: &[&str] = &["util", "config", "index", "app", "layout"];

/// The built-in rules, in evaluation order.
pub static KEYWORD_RULES: LazyLock<Vec<KeywordRule>> = LazyLock::new(|| {
    vec![
        KeywordRule::new(
            "theme",
            r"dark\s*mode|theme|light\s*/?\s*dark|color\s*scheme",
            &["dark", "theme", "toggle", "color", "scheme"],
        ),
        KeywordRule::new(
            "navigation",
            r"navbar|nav|header|app\s*bar|topbar",
            &["navbar", "header", "layout"],
        ),
        KeywordRule::new(
            "loading",
            r"skeleton|loading|placeholder",
            &["skeleton", "loading", "placeholder"],
        ),
        KeywordRule::new(
            "http",
            r"axios|fetch|http|request",
            &["axios", "fetch", "api", "service"],
        ),
    ]
});

/// Error compiling a goal pattern.
#[derive(Debug, Error)]
#[error("failed to compile goal pattern: {0}")]
pub struct GoalPatternError(#[from] regex::Error);

/// A compiled, case-insensitive path matcher derived from a goal.
#[derive(Debug, Clone)]
pub struct GoalPattern {
    keywords: Vec<&'static str>,
    fired: Vec<&'static str>,
    regex: Regex,
}

impl GoalPattern {
    /// Derive the pattern for `goal`.
    pub fn from_goal(goal: &str) -> Result<Self, GoalPatternError> {
        let mut keywords: Vec<&'static str> = Vec::new();
        let mut fired = Vec::new();

        for rule in KEYWORD_RULES.iter() {
            if !rule.fires(goal) {
                continue;
            }
            fired.push(rule.name);
            for &kw in rule.keywords {
                if !keywords.contains(&kw) {
                    keywords.push(kw);
                }
            }
        }

        if keywords.is_empty() {
            keywords.extend_from_slice(FALLBACK_KEYWORDS);
        }

        let alternation = keywords
            .iter()
            .map(|k| regex::escape(k))
            .collect::<Vec<_>>()
            .join("|");
        let regex = RegexBuilder::new(&alternation)
            .case_insensitive(true)
            .build()?;

        tracing::debug!(goal, rules = ?fired, keywords = ?keywords, "derived goal pattern");

        Ok(Self {
            keywords,
            fired,
            regex,
        })
    }

    /// Keywords in the alternation, in rule order.
    pub fn keywords(&self) -> &[&'static str] {
        &self.keywords
    }

    /// Names of the rules that fired. Empty means the fallback set is in use.
    pub fn fired_rules(&self) -> &[&'static str] {
        &self.fired
    }

    pub fn is_fallback(&self) -> bool {
        self.fired.is_empty()
    }

    /// Unanchored match against a file path.
    pub fn is_match(&self, path: &str) -> bool {
        self.regex.is_match(path)
    }

    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }
}
