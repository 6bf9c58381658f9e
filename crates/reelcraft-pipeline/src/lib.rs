//! Pipeline sequencing for Reelcraft.
//!
//! Defines the agent roles, builds the ordered brand-specific task plan, and
//! runs it sequentially against an execution backend, wiring every task's
//! output into the next task's context.
//!
//! # Main types
//!
//! - [`AgentRole`] / [`AgentSpec`] — Role definitions and per-agent config.
//! - [`build_plan`] — The brand-substituted task sequence.
//! - [`Pipeline`] — Sequential engine with context wiring and run-status reporting.
//! - [`ExecutionBackend`] — The seam to the external LLM engine.

/// The sequential pipeline engine and execution-backend seam.
pub mod engine;
/// Task plan construction.
pub mod plan;
/// Agent role definitions and `roles.json` loading.
pub mod roles;
/// Shared pipeline types (AgentRole, AgentSpec, Task, TaskStatus).
pub mod types;

pub use engine::{
    ExecutionBackend, LlmExecutionBackend, Pipeline, PipelineReport, STATUS_FILENAME,
};
pub use plan::{build_plan, PlanOptions};
pub use roles::{default_agents, load_agents};
pub use types::{AgentRole, AgentSpec, Task, TaskStatus};
