//! `plan` command input file.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use serde::Deserialize;

use studyplan_ingest::{inventory_entries, load_text};
use studyplan_runtime::{PlanRequest, Planner, UserPreferences};
use studyplan_schedule::{HistoryBook, TopicInventoryEntry};

pub const DEFAULT_USER: &str = "local";

/// Where the topics come from: inline, or extracted from a syllabus file.
#[derive(Debug, Clone, Deserialize)]
pub struct SyllabusSource {
    pub path: PathBuf,
    #[serde(default)]
    pub discipline: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlanInput {
    #[serde(default = "default_user")]
    pub user_id: String,
    pub request: PlanRequest,
    #[serde(default)]
    pub preferences: UserPreferences,
    #[serde(default)]
    pub history: HistoryBook,
    #[serde(default)]
    pub inventory: Option<Vec<TopicInventoryEntry>>,
    #[serde(default)]
    pub syllabus: Option<SyllabusSource>,
}

fn default_user() -> String {
    DEFAULT_USER.to_string()
}

impl PlanInput {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let input: Self = serde_json::from_str(&content)
            .with_context(|| format!("Invalid plan input {}", path.display()))?;
        Ok(input)
    }

    /// Resolve the inventory. A relative syllabus path is taken relative to
    /// the input file's directory.
    pub fn inventory(
        &self,
        planner: &Planner,
        base_dir: &Path,
    ) -> anyhow::Result<Vec<TopicInventoryEntry>> {
        match (&self.inventory, &self.syllabus) {
            (Some(_), Some(_)) => bail!("Give either 'inventory' or 'syllabus', not both"),
            (Some(inventory), None) => Ok(inventory.clone()),
            (None, Some(source)) => {
                let path = if source.path.is_absolute() {
                    source.path.clone()
                } else {
                    base_dir.join(&source.path)
                };
                let text = load_text(&path)?;
                let topics = planner.ingest_syllabus(&text, &source.discipline);
                Ok(inventory_entries(&topics))
            }
            (None, None) => bail!("Plan input needs an 'inventory' or a 'syllabus'"),
        }
    }
}
