//! Schedule generation: reconcile effort, order by priority, allocate days.

use serde::Serialize;
use tracing::{info, warn};

use crate::allocate::{allocate, priority_order};
use crate::reconcile::{reconcile, total_demand};
use crate::types::*;
use studyplan_core::{RescalePolicy, Result};

/// Per-topic outcome of one generation run, in allocation order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopicAllocation {
    pub topic_id: TopicId,
    pub topic_name: String,
    pub priority_score: f64,
    pub estimated_hours: u32,
    pub adjusted_hours: u32,
    /// Hours actually placed in the window; below `adjusted_hours` when the
    /// topic was truncated.
    pub scheduled_hours: u32,
}

impl TopicAllocation {
    /// Rescaling left this topic no hours at all despite a nonzero estimate.
    pub fn is_dropped(&self) -> bool {
        self.estimated_hours > 0 && self.adjusted_hours == 0
    }

    /// Fewer hours placed than demanded, including topics dropped outright.
    pub fn is_truncated(&self) -> bool {
        self.scheduled_hours < self.adjusted_hours || self.is_dropped()
    }
}

/// Result of one generation run.
#[derive(Debug, Clone, Serialize)]
pub struct Schedule {
    pub window: ScheduleWindow,
    pub policy: RescalePolicy,
    /// Whether demand exceeded capacity and topics were scaled down.
    pub rescaled: bool,
    pub total_available_hours: u64,
    pub total_demand_hours: u64,
    pub total_adjusted_hours: u64,
    pub allocations: Vec<TopicAllocation>,
    pub sessions: Vec<ScheduledSession>,
}

impl Schedule {
    pub fn scheduled_hours(&self) -> u64 {
        self.sessions.iter().map(|s| u64::from(s.hours)).sum()
    }

    /// Topics that received fewer hours than their adjusted demand, or that
    /// rescaling dropped.
    pub fn unscheduled_topics(&self) -> Vec<&TopicAllocation> {
        self.allocations.iter().filter(|a| a.is_truncated()).collect()
    }

    pub fn is_truncated(&self) -> bool {
        self.allocations.iter().any(TopicAllocation::is_truncated)
    }

    /// Days in the window that received a session.
    pub fn study_days_used(&self) -> usize {
        // One session per day by construction.
        self.sessions.len()
    }

    pub fn into_sessions(self) -> Vec<ScheduledSession> {
        self.sessions
    }
}

/// First-fit-by-priority scheduler.
#[derive(Debug, Clone, Copy, Default)]
pub struct AdaptiveScheduler {
    policy: RescalePolicy,
}

impl AdaptiveScheduler {
    pub fn new(policy: RescalePolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> RescalePolicy {
        self.policy
    }

    /// Generate a schedule for `topics` inside `window`.
    ///
    /// Fails only on an invalid window. An empty topic list yields an empty
    /// schedule.
    pub fn generate(
        &self,
        topics: &[PrioritizedTopic],
        window: &ScheduleWindow,
    ) -> Result<Schedule> {
        window.validate()?;

        let total_available_hours = window.total_available_hours();
        let total_demand_hours = total_demand(topics);
        let adjusted = reconcile(topics, total_available_hours, self.policy);

        let mut allocations: Vec<TopicAllocation> = priority_order(topics)
            .into_iter()
            .map(|i| {
                let t = &topics[i];
                TopicAllocation {
                    topic_id: t.topic.id.clone(),
                    topic_name: t.topic.name.clone(),
                    priority_score: t.priority_score,
                    estimated_hours: t.topic.estimated_hours,
                    adjusted_hours: adjusted[i],
                    scheduled_hours: 0,
                }
            })
            .collect();

        let sessions = allocate(&mut allocations, window);

        let schedule = Schedule {
            window: *window,
            policy: self.policy,
            rescaled: total_demand_hours > total_available_hours,
            total_available_hours,
            total_demand_hours,
            total_adjusted_hours: adjusted.iter().map(|&h| u64::from(h)).sum(),
            allocations,
            sessions,
        };

        info!(
            "Generated schedule: {} topics, {} sessions, {}h of {}h (demand {}h, rescaled={})",
            topics.len(),
            schedule.sessions.len(),
            schedule.scheduled_hours(),
            total_available_hours,
            total_demand_hours,
            schedule.rescaled
        );

        let truncated = schedule.unscheduled_topics();
        if !truncated.is_empty() {
            let dropped = truncated.iter().filter(|a| a.is_dropped()).count();
            warn!(
                "{} topics could not be fully scheduled between {} and {} ({} dropped)",
                truncated.len(),
                window.start_date,
                window.end_date,
                dropped
            );
        }

        Ok(schedule)
    }
}

/// Generate the session sequence with the default rescale policy.
pub fn generate_schedule(
    topics: &[PrioritizedTopic],
    window: &ScheduleWindow,
) -> Result<Vec<ScheduledSession>> {
    AdaptiveScheduler::default()
        .generate(topics, window)
        .map(Schedule::into_sessions)
}
