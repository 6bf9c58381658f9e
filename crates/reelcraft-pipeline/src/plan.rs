use crate::types::{AgentRole, Task};
use reelcraft_core::{slugify, BrandProfile, BrandScale};
use std::path::{Path, PathBuf};

/// Knobs for building a task plan.
#[derive(Debug, Clone)]
pub struct PlanOptions {
    /// Root of the output tree; per-brand artifacts land under
    /// `<output_root>/<brand_slug>/`.
    pub output_root: PathBuf,
    /// When set, every task also writes a per-agent summary file so each
    /// step can be inspected in isolation.
    pub test_mode: bool,
}

impl Default for PlanOptions {
    fn default() -> Self {
        Self {
            output_root: PathBuf::from("output"),
            test_mode: false,
        }
    }
}

impl PlanOptions {
    /// The per-brand output directory for `brand`.
    pub fn brand_dir(&self, brand: &BrandProfile) -> PathBuf {
        self.output_root.join(brand.slug())
    }
}

/// Build the ordered task list for one brand.
///
/// The sequence is fixed — analyst, synthesizer, designer, stylist,
/// architect — except that small-scale brands get a localizer step right
/// after the analysis. Brand text is substituted into the task descriptions
/// here; context from earlier tasks is appended later by the engine.
pub fn build_plan(brand: &BrandProfile, options: &PlanOptions) -> Vec<Task> {
    let brand_dir = options.brand_dir(brand);
    let mood_board_dir = brand_dir.join("mood_board");

    let mut tasks = vec![brand_analyst_task(brand, &brand_dir, &mood_board_dir)];

    if brand.scale == BrandScale::Small {
        tasks.push(localizer_task(brand));
    }

    tasks.push(Task::new(
        "Take the brand analysis and propose 3 core visual/experiential themes. \
         If any upstream data is missing, proceed with best effort and note your \
         assumptions.",
        "3 concise themes with emotional framing.",
        AgentRole::CreativeSynthesizer,
    ));

    tasks.push(Task::new(
        "Create 6-8 second vignette ideas based on the visual themes. Each vignette \
         must be renderable as a single continuous shot. If any required information \
         is missing, use your best judgment and document your assumptions.",
        "Short vignette concepts suitable for video generation.",
        AgentRole::VignetteDesigner,
    ));

    tasks.push(Task::new(
        "Suggest color palettes, visual tone, and style references for each vignette, \
         grounded in the brand analysis, the themes, and the mood board. If any \
         information is missing, proceed with best effort and document your assumptions.",
        "A short guide to visual tone for use in cinematic vignette creation.",
        AgentRole::VisualStylist,
    ));

    tasks.push(prompt_architect_task(&brand_dir));

    if options.test_mode {
        for task in &mut tasks {
            append_test_mode_instruction(task, &brand_dir);
        }
    }

    tasks
}

fn brand_analyst_task(brand: &BrandProfile, brand_dir: &Path, mood_board_dir: &Path) -> Task {
    Task::new(
        format!(
            "Analyze the following brand and search the web to extract its tone, style, \
             and key traits.\n\nBRAND DATA:\n{}\n\
             Additionally, search for and download 5-10 relevant images that represent \
             the brand's visual style: logo variations, product photos, lifestyle \
             imagery, color palette examples, and aesthetic references. Only download \
             direct image URLs (ending in .jpg, .png, etc.). Do NOT use social media \
             page URLs (Instagram, Facebook, etc.); they will not work. Save the images \
             to '{}' for use in video production.\n\
             When searching, always pass a plain string as the query, such as the brand \
             name or a relevant phrase. Use the brand data as your primary reference; if \
             anything is missing or unclear, note it in your analysis and proceed with \
             best effort. Write any standalone notes into '{}'.",
            brand.summary(),
            mood_board_dir.display(),
            brand_dir.display(),
        ),
        "A brand summary with tone, positioning, style cues, and a collection of \
         relevant images for mood board creation.",
        AgentRole::BrandAnalyst,
    )
}

fn localizer_task(brand: &BrandProfile) -> Task {
    Task::new(
        format!(
            "The brand '{}' operates at neighborhood scale. Rework the brand analysis \
             into a local voice: name the kind of place it belongs to, keep claims \
             modest and concrete, and flag anything in the analysis that sounds like a \
             national ad campaign rather than a local business.",
            brand.name
        ),
        "A localized brand voice note to carry through the rest of the pipeline.",
        AgentRole::SmallBusinessLocalizer,
    )
}

fn prompt_architect_task(brand_dir: &Path) -> Task {
    Task::new(
        format!(
            "For each vignette you receive, create 3-4 structured JSON prompts suitable \
             for a video generation model. Select the model per vignette based on its \
             style, realism needs, or cinematic ambition.\n\n\
             Use both the visual style guide and the mood board; if they conflict, the \
             visual style guide is authoritative.\n\n\
             Return one JSON object per prompt with these fields:\n\
             - model: the target video model identifier\n\
             - reasoning (optional): why this model and framing\n\
             - scene: title, duration_seconds, fps, aspect_ratio,\n\
               style (render, lighting, camera_equipment),\n\
               character (name, appearance, emotional_journey),\n\
               environment (location, props, atmospherics),\n\
               script (a list of stage_direction and dialogue entries)\n\n\
             Use the file_writer tool to save the full JSON array into '{}' as \
             'ad_prompts.json'. Do not just return the JSON in your response — write it \
             to the file. If any required information is missing, proceed with best \
             effort and document your assumptions.",
            brand_dir.display()
        ),
        "A JSON file saved as ad_prompts.json containing structured video prompts for \
         each vignette.",
        AgentRole::PromptArchitect,
    )
}

fn append_test_mode_instruction(task: &mut Task, brand_dir: &Path) {
    let filename = format!("{}_test_output.txt", slugify(&task.agent.to_string()));
    task.description.push_str(&format!(
        "\nTEST MODE: In addition to your normal output, use the file_writer tool to \
         write a summary of your findings and assumptions into '{}' as '{}'.",
        brand_dir.display(),
        filename
    ));
}
