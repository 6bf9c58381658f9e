use crate::types::{AgentRole, AgentSpec, Task, TaskStatus};
use async_trait::async_trait;
use chrono::Utc;
use reelcraft_agent::{AgentRunner, ModelConfig};
use reelcraft_core::ReelcraftResult;
use reelcraft_tools::ToolRegistry;
use serde::Serialize;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info};

/// Name of the per-run status file under the brand output directory.
pub const STATUS_FILENAME: &str = "run_status.txt";

/// The seam to the external execution engine.
///
/// The pipeline only sequences tasks and wires context; whatever actually
/// reasons about a task lives behind this trait.
#[async_trait]
pub trait ExecutionBackend: Send + Sync {
    /// Run one task prompt as the given agent and return its final text.
    async fn run_task(&self, agent: &AgentSpec, prompt: &str) -> ReelcraftResult<String>;
}

/// Production backend: a fresh agent loop per task over the configured
/// LLM provider.
pub struct LlmExecutionBackend {
    config: ModelConfig,
    registry: Arc<ToolRegistry>,
}

impl LlmExecutionBackend {
    /// Backend over the given model configuration and tool registry.
    pub fn new(config: ModelConfig, registry: Arc<ToolRegistry>) -> Self {
        Self { config, registry }
    }
}

#[async_trait]
impl ExecutionBackend for LlmExecutionBackend {
    async fn run_task(&self, agent: &AgentSpec, prompt: &str) -> ReelcraftResult<String> {
        let runner = AgentRunner::new(self.config.clone(), self.registry.clone());
        runner
            .run(&agent.system_prompt(), prompt, &agent.tools)
            .await
    }
}

/// Summary of one pipeline run.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineReport {
    /// How many tasks the plan contained.
    pub total_tasks: usize,
    /// How many completed.
    pub completed_tasks: usize,
    /// How many failed (at most one; the run stops at the first failure).
    pub failed_tasks: usize,
    /// Output of the final task, when the run completed.
    pub final_output: Option<String>,
    /// One-line human-readable result.
    pub summary: String,
}

/// The sequential pipeline engine.
///
/// Tasks run strictly in order; each task's prompt carries every upstream
/// task's output, labeled by role. The first failure stops the run and is
/// recorded in the status file — `kickoff` reports it rather than erroring,
/// so callers always get a report.
pub struct Pipeline {
    agents: HashMap<AgentRole, AgentSpec>,
    tasks: Vec<Task>,
    backend: Arc<dyn ExecutionBackend>,
    output_dir: PathBuf,
}

impl Pipeline {
    /// Assemble a pipeline from agents, a task plan, and a backend.
    /// `output_dir` is the per-brand directory the status file lands in.
    pub fn new(
        agents: Vec<AgentSpec>,
        tasks: Vec<Task>,
        backend: Arc<dyn ExecutionBackend>,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            agents: agents.into_iter().map(|a| (a.role, a)).collect(),
            tasks,
            backend,
            output_dir: output_dir.into(),
        }
    }

    /// The task list with current statuses and outputs.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Run every task in order.
    pub async fn kickoff(&mut self) -> ReelcraftResult<PipelineReport> {
        let start = Instant::now();
        info!(tasks = self.tasks.len(), "Pipeline: starting run");

        tokio::fs::create_dir_all(&self.output_dir).await?;

        let mut context: Vec<(AgentRole, String)> = Vec::new();

        for index in 0..self.tasks.len() {
            let (task_id, role) = (self.tasks[index].id, self.tasks[index].agent);

            let Some(agent) = self.agents.get(&role).cloned() else {
                return self
                    .fail(index, format!("No agent configured for role: {role}"))
                    .await;
            };

            let prompt = compose_prompt(
                &self.tasks[index].description,
                &self.tasks[index].expected_output,
                &context,
            );

            info!(task_id = %task_id, role = %role, step = index + 1, "Executing task");
            self.tasks[index].status = TaskStatus::Running;

            let result = self.backend.run_task(&agent, &prompt).await;
            match result {
                Ok(output) => {
                    let task = &mut self.tasks[index];
                    task.status = TaskStatus::Completed;
                    task.completed_at = Some(Utc::now());
                    task.output = Some(output.clone());
                    context.push((role, output));
                    info!(task_id = %task_id, role = %role, "Task completed");
                }
                Err(e) => {
                    error!(task_id = %task_id, role = %role, error = %e, "Task failed");
                    return self.fail(index, e.to_string()).await;
                }
            }
        }

        let final_output = context.last().map(|(_, output)| output.clone());
        self.write_status("SUCCESS", final_output.as_deref().unwrap_or(""))
            .await;

        let report = PipelineReport {
            total_tasks: self.tasks.len(),
            completed_tasks: self.tasks.len(),
            failed_tasks: 0,
            final_output,
            summary: format!("Workflow completed successfully: {} tasks", self.tasks.len()),
        };

        info!(
            duration_ms = start.elapsed().as_millis(),
            tasks = report.total_tasks,
            "Pipeline: run complete"
        );
        Ok(report)
    }

    /// Mark task `index` failed, record the status file, and build the
    /// terminal report. Tasks after `index` stay pending.
    async fn fail(&mut self, index: usize, reason: String) -> ReelcraftResult<PipelineReport> {
        let role = self.tasks[index].agent;
        self.tasks[index].status = TaskStatus::Failed {
            reason: reason.clone(),
        };

        self.write_status("FAILURE", &format!("{role}: {reason}")).await;

        Ok(PipelineReport {
            total_tasks: self.tasks.len(),
            completed_tasks: index,
            failed_tasks: 1,
            final_output: None,
            summary: "Workflow terminated due to error. See logs for details.".to_string(),
        })
    }

    /// Write `run_status.txt`. A status-file write failure is logged and
    /// swallowed; it must not mask the run's real outcome.
    async fn write_status(&self, outcome: &str, detail: &str) {
        let path = self.output_dir.join(STATUS_FILENAME);
        let body = format!("{outcome}\n{detail}\n");
        if let Err(e) = tokio::fs::write(&path, body).await {
            error!(path = %path.display(), error = %e, "Could not write run status");
        }
    }
}

/// Assemble the full prompt for one task: description, labeled upstream
/// outputs, and the expected-output line.
fn compose_prompt(
    description: &str,
    expected_output: &str,
    context: &[(AgentRole, String)],
) -> String {
    let mut prompt = description.to_string();
    if !context.is_empty() {
        prompt.push_str("\n\nContext from earlier steps:");
        for (role, output) in context {
            prompt.push_str(&format!("\n\n--- {role} ---\n{output}"));
        }
    }
    prompt.push_str(&format!("\n\nExpected output: {expected_output}"));
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_without_context_has_no_context_header() {
        let prompt = compose_prompt("Do the thing.", "A thing.", &[]);
        assert!(!prompt.contains("Context from earlier steps"));
        assert!(prompt.ends_with("Expected output: A thing."));
    }

    #[test]
    fn prompt_labels_upstream_outputs_by_role() {
        let context = vec![
            (AgentRole::BrandAnalyst, "warm and local".to_string()),
            (AgentRole::CreativeSynthesizer, "three themes".to_string()),
        ];
        let prompt = compose_prompt("Design vignettes.", "Concepts.", &context);
        assert!(prompt.contains("--- Brand Analyst ---\nwarm and local"));
        assert!(prompt.contains("--- Creative Synthesizer ---\nthree themes"));
        // Description comes first, context after.
        assert!(prompt.starts_with("Design vignettes."));
    }
}
