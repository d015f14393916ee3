//! Runtime types: plan requests, plan and item records, lifecycle states.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use studyplan_core::{Error, RescalePolicy, Result};
use studyplan_schedule::{ScheduledSession, TopicAllocation};

pub const GENERATION_ALGORITHM: &str = "adaptive_priority_based";

/// Lifecycle of a study plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanStatus {
    #[default]
    Generated,
    Active,
    Completed,
    Archived,
}

/// Lifecycle of one scheduled session. The scheduler only ever produces
/// `Pending`; the rest are set by the user afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
    Skipped,
}

impl SessionStatus {
    pub fn all() -> &'static [SessionStatus] {
        &[Self::Pending, Self::InProgress, Self::Completed, Self::Skipped]
    }
}

impl std::fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::InProgress => write!(f, "in_progress"),
            Self::Completed => write!(f, "completed"),
            Self::Skipped => write!(f, "skipped"),
        }
    }
}

impl std::str::FromStr for SessionStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "pending" => Ok(Self::Pending),
            "in_progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            "skipped" => Ok(Self::Skipped),
            other => Err(Error::InvalidStatus(other.to_string())),
        }
    }
}

/// Stored preferences; request fields take precedence over these.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPreferences {
    #[serde(default)]
    pub daily_hours: Option<u32>,
    #[serde(default)]
    pub weak_areas: Vec<String>,
}

/// A plan-generation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanRequest {
    pub syllabus_id: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub daily_hours: Option<u32>,
    #[serde(default)]
    pub weak_areas: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanDetails {
    pub daily_hours: u32,
    pub weak_areas: Vec<String>,
    pub total_topics: usize,
    pub generation_algorithm: String,
    pub rescale: RescalePolicy,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudyPlan {
    pub plan_id: Uuid,
    pub user_id: String,
    pub syllabus_id: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub plan_status: PlanStatus,
    pub generated_at: DateTime<Utc>,
    pub plan_details: PlanDetails,
}

/// One session of a plan, as stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanItem {
    pub item_id: Uuid,
    pub plan_id: Uuid,
    #[serde(flatten)]
    pub session: ScheduledSession,
    pub status: SessionStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl PlanItem {
    pub fn pending(plan_id: Uuid, session: ScheduledSession) -> Self {
        Self {
            item_id: Uuid::new_v4(),
            plan_id,
            session,
            status: SessionStatus::Pending,
            notes: None,
        }
    }
}

/// Output of [`crate::Planner::generate`].
#[derive(Debug, Clone, Serialize)]
pub struct GeneratedPlan {
    pub plan: StudyPlan,
    pub items: Vec<PlanItem>,
    pub total_study_days: u64,
    /// Per-topic outcome in priority order.
    pub allocations: Vec<TopicAllocation>,
    /// Topics that got fewer hours than their adjusted demand.
    pub unscheduled_topics: Vec<TopicAllocation>,
}

impl GeneratedPlan {
    pub fn is_truncated(&self) -> bool {
        !self.unscheduled_topics.is_empty()
    }
}
