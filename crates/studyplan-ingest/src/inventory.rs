//! Outline → topic inventory materialization.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::outline::{Section, SyllabusOutline};
use studyplan_core::PlannerConfig;
use studyplan_schedule::{TopicId, TopicInventoryEntry};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubtopicEntry {
    #[serde(rename = "subtopic_name")]
    pub name: String,
    pub estimated_hours: u32,
}

/// A schedulable topic plus the outline context it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryTopic {
    #[serde(flatten)]
    pub entry: TopicInventoryEntry,
    pub section: String,
    pub description: String,
    pub subtopics: Vec<SubtopicEntry>,
}

/// Materialize with the configured extracted-topic and subtopic estimates.
pub fn materialize(outline: &SyllabusOutline, config: &PlannerConfig) -> Vec<InventoryTopic> {
    let topic_hours = config.extracted_topic_hours;
    materialize_with(outline, config.extracted_subtopic_hours, |_| topic_hours)
}

/// Materialize with a per-section topic estimate.
pub fn materialize_with<F>(
    outline: &SyllabusOutline,
    subtopic_hours: u32,
    topic_hours: F,
) -> Vec<InventoryTopic>
where
    F: Fn(&Section) -> u32,
{
    let mut inventory = Vec::with_capacity(outline.topic_count());

    for (section_idx, section) in outline.sections.iter().enumerate() {
        let hours = topic_hours(section);
        for (topic_idx, topic) in section.topics.iter().enumerate() {
            let id = topic_id(&outline.discipline, section_idx, topic_idx, &topic.name);
            let subtopics = topic
                .subtopics
                .iter()
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .map(|s| SubtopicEntry {
                    name: s.to_string(),
                    estimated_hours: subtopic_hours,
                })
                .collect();

            inventory.push(InventoryTopic {
                entry: TopicInventoryEntry::new(id, topic.name.clone(), hours),
                section: section.name.clone(),
                description: format!("Part of {}", section.name),
                subtopics,
            });
        }
    }

    debug!(
        "Materialized {} topics for '{}'",
        inventory.len(),
        outline.discipline
    );
    inventory
}

/// Scheduler input for a materialized inventory.
pub fn inventory_entries(topics: &[InventoryTopic]) -> Vec<TopicInventoryEntry> {
    topics.iter().map(|t| t.entry.clone()).collect()
}

/// Stable id from the topic's position and name: first 16 hex chars of SHA-256.
pub fn topic_id(discipline: &str, section_idx: usize, topic_idx: usize, name: &str) -> TopicId {
    let mut hasher = Sha256::new();
    hasher.update(discipline.as_bytes());
    hasher.update([0u8]);
    hasher.update(section_idx.to_le_bytes());
    hasher.update(topic_idx.to_le_bytes());
    hasher.update(name.as_bytes());
    let digest = hex::encode(hasher.finalize());
    TopicId::new(&digest[..16])
}
