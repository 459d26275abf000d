//! Plan model, templates, and the planner that fills them.

pub mod planner;
pub mod templates;
pub mod types;

pub use planner::{MAX_CANDIDATES, PLAN_NOTES, build_plan, build_plan_with_rng, target_sets};
pub use templates::{TargetSets, TemplateKind};
pub use types::{Effort, Plan, PlanStep, Risk, StepBlueprint, StepIdGen};
