//! Core library for `scout`: repository analysis, goal interpretation, plan
//! templating, refinement, and JSON export.
//!
//! Everything here is synchronous and side-effect free except
//! [`repo::analyze_repo`] (reads the tree) and the [`export`] writers.

pub mod export;
pub mod goal;
pub mod plan;
pub mod refine;
pub mod repo;
pub mod slug;
