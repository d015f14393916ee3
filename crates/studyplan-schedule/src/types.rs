//! Scheduler data model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use studyplan_core::{Error, Result};

/// Opaque topic identifier, unique within a syllabus.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TopicId(pub String);

impl TopicId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TopicId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TopicId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for TopicId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// One topic to be scheduled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicInventoryEntry {
    #[serde(rename = "topic_id")]
    pub id: TopicId,
    #[serde(rename = "topic_name")]
    pub name: String,
    /// Effort to master the topic absent constraints.
    pub estimated_hours: u32,
}

impl TopicInventoryEntry {
    pub fn new(id: impl Into<TopicId>, name: impl Into<String>, estimated_hours: u32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            estimated_hours,
        }
    }
}

/// A topic paired with the priority computed for one scheduling run.
///
/// The score is never persisted; it is recomputed on every generation call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PrioritizedTopic {
    pub topic: TopicInventoryEntry,
    pub priority_score: f64,
}

impl PrioritizedTopic {
    pub fn new(topic: TopicInventoryEntry, priority_score: f64) -> Self {
        Self {
            topic,
            priority_score,
        }
    }
}

/// The immutable scheduling request: an inclusive date range and a daily budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleWindow {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub daily_hours: u32,
}

impl ScheduleWindow {
    /// Build a window, rejecting `daily_hours == 0` and `start_date >= end_date`.
    pub fn new(start_date: NaiveDate, end_date: NaiveDate, daily_hours: u32) -> Result<Self> {
        let window = Self {
            start_date,
            end_date,
            daily_hours,
        };
        window.validate()?;
        Ok(window)
    }

    pub fn validate(&self) -> Result<()> {
        if self.daily_hours == 0 {
            return Err(Error::InvalidWindow("daily hours must be positive".into()));
        }
        if self.start_date >= self.end_date {
            return Err(Error::InvalidWindow(format!(
                "end date {} must be after start date {}",
                self.end_date, self.start_date
            )));
        }
        Ok(())
    }

    /// Number of calendar days in the window, both ends included.
    pub fn days_inclusive(&self) -> u64 {
        let days = (self.end_date - self.start_date).num_days() + 1;
        u64::try_from(days).unwrap_or(0)
    }

    pub fn total_available_hours(&self) -> u64 {
        self.days_inclusive() * u64::from(self.daily_hours)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }
}

/// One output unit: `hours` of study on `topic_id` on `date`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledSession {
    pub topic_id: TopicId,
    pub topic_name: String,
    #[serde(rename = "scheduled_date")]
    pub date: NaiveDate,
    #[serde(rename = "scheduled_hours")]
    pub hours: u32,
}
