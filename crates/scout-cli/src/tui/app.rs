//! Picker state: one row per plan step, each with a removal mark.

use std::collections::HashSet;

use scout_core::plan::Plan;

/// What the operator sees for a single step.
#[derive(Debug, Clone)]
pub struct StepRow {
    pub id: String,
    pub title: String,
    pub effort: String,
    pub targets: Vec<String>,
    /// Marked steps are removed on confirm.
    pub marked: bool,
}

/// How the picker loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Remove the marked steps.
    Confirm,
    /// Keep every step.
    KeepAll,
    /// Stop the whole run.
    Abort,
}

/// Application state for the step picker.
#[derive(Debug)]
pub struct PickerApp {
    pub goal: String,
    pub rows: Vec<StepRow>,
    pub selected: usize,
    pub outcome: Option<Outcome>,
}

impl PickerApp {
    pub fn new(plan: &Plan<'_>) -> Self {
        let rows = plan
            .steps
            .iter()
            .map(|s| StepRow {
                id: s.id.clone(),
                title: s.title.clone(),
                effort: s.estimated_effort.to_string(),
                targets: s.target_files.clone(),
                marked: false,
            })
            .collect();
        Self {
            goal: plan.goal.clone(),
            rows,
            selected: 0,
            outcome: None,
        }
    }

    // -- Navigation --

    pub fn move_up(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        }
    }

    pub fn move_down(&mut self) {
        if !self.rows.is_empty() && self.selected < self.rows.len() - 1 {
            self.selected += 1;
        }
    }

    // -- Actions --

    pub fn toggle(&mut self) {
        if let Some(row) = self.rows.get_mut(self.selected) {
            row.marked = !row.marked;
        }
    }

    pub fn finish(&mut self, outcome: Outcome) {
        self.outcome = Some(outcome);
    }

    pub fn marked_count(&self) -> usize {
        self.rows.iter().filter(|r| r.marked).count()
    }

    /// Ids to remove given how the loop ended.
    pub fn removals(&self) -> HashSet<String> {
        match self.outcome {
            Some(Outcome::Confirm) => self
                .rows
                .iter()
                .filter(|r| r.marked)
                .map(|r| r.id.clone())
                .collect(),
            _ => HashSet::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
