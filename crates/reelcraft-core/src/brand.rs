use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;
use tracing::warn;

/// How widely the brand operates. Drives the conditional localizer step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BrandScale {
    /// A single-location or neighborhood business.
    Small,
    /// A regional or national brand.
    #[default]
    Regional,
    /// An international brand.
    Global,
}

/// The structured brand description that seeds a pipeline run.
///
/// Loaded from `input/brand.json`. Everything except `name` is optional;
/// missing fields render as `UNKNOWN` in the summary handed to agents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrandProfile {
    /// Brand name. Also the source of the output directory slug.
    pub name: String,
    /// Year the brand launched.
    #[serde(default)]
    pub launch_year: Option<u32>,
    /// Where the brand comes from.
    #[serde(default)]
    pub origin: Option<String>,
    /// Key personality traits (e.g. "playful", "artisanal").
    #[serde(default)]
    pub key_traits: Vec<String>,
    /// Existing slogans or taglines.
    #[serde(default)]
    pub slogans: Vec<String>,
    /// Free-form notes from the brand owner.
    #[serde(default)]
    pub notes: Option<String>,
    /// Reference URLs (site, press, galleries).
    #[serde(default)]
    pub urls: Vec<String>,
    /// Operating scale.
    #[serde(default)]
    pub scale: BrandScale,
}

impl BrandProfile {
    /// Placeholder profile used when the input file is missing or malformed.
    pub fn unknown() -> Self {
        Self {
            name: "unknown_brand".to_string(),
            launch_year: None,
            origin: None,
            key_traits: Vec::new(),
            slogans: Vec::new(),
            notes: None,
            urls: Vec::new(),
            scale: BrandScale::default(),
        }
    }

    /// Load a brand profile from a JSON file.
    ///
    /// A missing or unparseable file logs a warning and falls back to
    /// [`BrandProfile::unknown`] — a bad input file degrades the run, it does
    /// not abort it.
    pub fn load(path: &Path) -> Self {
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Could not read brand file, using placeholder");
                return Self::unknown();
            }
        };
        match serde_json::from_str(&raw) {
            Ok(profile) => profile,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Could not parse brand file, using placeholder");
                Self::unknown()
            }
        }
    }

    /// Directory-safe slug derived from the brand name.
    pub fn slug(&self) -> String {
        slugify(&self.name)
    }

    /// Render the multi-line brand summary substituted into task text.
    pub fn summary(&self) -> String {
        let unknown = || "UNKNOWN".to_string();
        format!(
            "Brand Name: {}\n\
             Launch Year: {}\n\
             Origin: {}\n\
             Key Traits: {}\n\
             Slogans: {}\n\
             Notes: {}\n\
             URLs: {}\n",
            self.name,
            self.launch_year.map_or_else(unknown, |y| y.to_string()),
            self.origin.clone().unwrap_or_else(unknown),
            self.key_traits.join(", "),
            self.slogans.join(", "),
            self.notes.clone().unwrap_or_else(unknown),
            self.urls.join(", "),
        )
    }
}

static NON_ALNUM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("[^a-z0-9]+").expect("static pattern"));

/// Lowercase `text` and collapse every non-alphanumeric run into a single
/// underscore, trimming leading/trailing underscores.
pub fn slugify(text: &str) -> String {
    let lowered = text.to_lowercase();
    let replaced = NON_ALNUM.replace_all(&lowered, "_");
    replaced.trim_matches('_').to_string()
}
