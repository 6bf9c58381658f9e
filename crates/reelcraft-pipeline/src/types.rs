use chrono::{DateTime, Utc};
use reelcraft_core::ReelcraftError;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Role of each agent in the pipeline.
///
/// Serialized under the human-readable role names used in `roles.json`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AgentRole {
    /// Extracts tone, style, and traits; assembles the mood board.
    #[serde(rename = "Brand Analyst")]
    BrandAnalyst,
    /// Grounds the campaign in a neighborhood-scale voice (small brands only).
    #[serde(rename = "SmallBusiness Localizer")]
    SmallBusinessLocalizer,
    /// Distills the analysis into core visual/experiential themes.
    #[serde(rename = "Creative Synthesizer")]
    CreativeSynthesizer,
    /// Turns themes into short vignette concepts.
    #[serde(rename = "Vignette Designer")]
    VignetteDesigner,
    /// Defines palettes, tone, and style references per vignette.
    #[serde(rename = "Visual Stylist")]
    VisualStylist,
    /// Produces the final structured video-generation prompts.
    #[serde(rename = "Prompt Architect")]
    PromptArchitect,
}

impl AgentRole {
    /// Every role, in pipeline order.
    pub const ALL: [AgentRole; 6] = [
        AgentRole::BrandAnalyst,
        AgentRole::SmallBusinessLocalizer,
        AgentRole::CreativeSynthesizer,
        AgentRole::VignetteDesigner,
        AgentRole::VisualStylist,
        AgentRole::PromptArchitect,
    ];
}

impl std::fmt::Display for AgentRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            AgentRole::BrandAnalyst => "Brand Analyst",
            AgentRole::SmallBusinessLocalizer => "SmallBusiness Localizer",
            AgentRole::CreativeSynthesizer => "Creative Synthesizer",
            AgentRole::VignetteDesigner => "Vignette Designer",
            AgentRole::VisualStylist => "Visual Stylist",
            AgentRole::PromptArchitect => "Prompt Architect",
        };
        write!(f, "{name}")
    }
}

impl std::str::FromStr for AgentRole {
    type Err = ReelcraftError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Brand Analyst" => Ok(AgentRole::BrandAnalyst),
            "SmallBusiness Localizer" => Ok(AgentRole::SmallBusinessLocalizer),
            "Creative Synthesizer" => Ok(AgentRole::CreativeSynthesizer),
            "Vignette Designer" => Ok(AgentRole::VignetteDesigner),
            "Visual Stylist" => Ok(AgentRole::VisualStylist),
            "Prompt Architect" => Ok(AgentRole::PromptArchitect),
            other => Err(ReelcraftError::Config(format!("Unknown agent role: {other}"))),
        }
    }
}

/// Configuration for one pipeline agent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentSpec {
    /// The role this spec configures.
    pub role: AgentRole,
    /// What the agent is trying to achieve.
    pub goal: String,
    /// Who the agent is; shapes its voice and judgment.
    pub backstory: String,
    /// Names of the tools this agent may use.
    #[serde(default)]
    pub tools: Vec<String>,
    /// Whether the engine should narrate this agent's reasoning.
    #[serde(default = "default_verbose")]
    pub verbose: bool,
    /// Whether the agent may hand work to another agent. Carried as
    /// configuration; no runtime delegation mechanism exists.
    #[serde(default)]
    pub allow_delegation: bool,
}

fn default_verbose() -> bool {
    true
}

impl AgentSpec {
    /// Render the system prompt handed to the execution engine.
    pub fn system_prompt(&self) -> String {
        format!(
            "You are the {}.\n\nGoal: {}\n\nBackstory: {}",
            self.role, self.goal, self.backstory
        )
    }
}

/// Status of a task in the pipeline sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Not started.
    Pending,
    /// Currently with the execution engine.
    Running,
    /// Finished; `Task::output` is populated.
    Completed,
    /// Failed with the given reason.
    Failed {
        /// Why the task failed.
        reason: String,
    },
}

/// One step in the pipeline sequence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    /// Unique task identifier.
    pub id: Uuid,
    /// Full task text handed to the agent (brand text already substituted).
    pub description: String,
    /// What a good result looks like.
    pub expected_output: String,
    /// Which agent runs this task.
    pub agent: AgentRole,
    /// Current status.
    pub status: TaskStatus,
    /// The agent's output, once completed.
    pub output: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Completion timestamp.
    pub completed_at: Option<DateTime<Utc>>,
}

impl Task {
    /// New pending task.
    pub fn new(
        description: impl Into<String>,
        expected_output: impl Into<String>,
        agent: AgentRole,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            description: description.into(),
            expected_output: expected_output.into(),
            agent,
            status: TaskStatus::Pending,
            output: None,
            created_at: Utc::now(),
            completed_at: None,
        }
    }
}
