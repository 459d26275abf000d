//! The refinement port: where a human (or an automated stand-in) prunes
//! steps from a generated plan before export.
//!
//! The core never talks to a terminal. Front ends implement [`Refiner`];
//! `--yes` runs use [`AcceptAll`].

use std::collections::HashSet;

use thiserror::Error;

use crate::plan::Plan;

/// Errors raised by a refiner implementation.
#[derive(Debug, Error)]
pub enum RefineError {
    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("refinement aborted by operator")]
    Aborted,
}

/// Chooses which steps to drop from a plan.
///
/// Implementations may block indefinitely (e.g. waiting on a human). The
/// trait is object-safe so front ends can pick an implementation at runtime.
pub trait Refiner {
    /// Return the ids of the steps to remove. Unknown ids are ignored.
    fn select_removals(&mut self, plan: &Plan<'_>) -> Result<HashSet<String>, RefineError>;
}

const _: () = {
    fn _assert_object_safe(_: &dyn Refiner) {}
};

/// Keeps every step.
#[derive(Debug, Default, Clone, Copy)]
pub struct AcceptAll;

impl Refiner for AcceptAll {
    fn select_removals(&mut self, _plan: &Plan<'_>) -> Result<HashSet<String>, RefineError> {
        Ok(HashSet::new())
    }
}

/// Run `refiner` against `plan` and apply its removals.
///
/// Returns the number of steps removed.
pub fn refine_plan(plan: &mut Plan<'_>, refiner: &mut dyn Refiner) -> Result<usize, RefineError> {
    let removals = refiner.select_removals(plan)?;
    if removals.is_empty() {
        return Ok(0);
    }
    let removed = plan.remove_steps(&removals);
    debug_assert!(plan.dangling_dependencies().is_empty());
    tracing::info!(goal = %plan.goal, removed, remaining = plan.steps.len(), "plan refined");
    Ok(removed)
}
