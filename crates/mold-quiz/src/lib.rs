//! Domain library for the mold exposure self-assessment.
//!
//! The [`quiz`] module carries the whole assessment flow: the question bank,
//! the per-session wizard state machine, the scoring rubric with its profile
//! classifier, and the HTTP router that exposes them. [`config`], [`telemetry`],
//! and [`error`] provide the service plumbing shared with the API binary.

pub mod config;
pub mod error;
pub mod quiz;
pub mod telemetry;
