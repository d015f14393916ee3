//! Plan lifecycle and progress tracking over stored plans and items.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, info};
use uuid::Uuid;

use studyplan_core::{Error, Result};
use studyplan_schedule::TopicId;

use crate::types::{PlanItem, PlanStatus, SessionStatus, StudyPlan};

/// Make `plan_id` the user's active plan, archiving any other active one.
pub fn activate<'a>(
    plans: &'a mut [StudyPlan],
    plan_id: Uuid,
    user_id: &str,
) -> Result<&'a StudyPlan> {
    let target = plans
        .iter()
        .position(|p| p.plan_id == plan_id && p.user_id == user_id)
        .ok_or_else(|| Error::NotFound(format!("plan {} for user {}", plan_id, user_id)))?;

    for (idx, plan) in plans.iter_mut().enumerate() {
        if idx != target && plan.user_id == user_id && plan.plan_status == PlanStatus::Active {
            debug!("Archiving plan {}", plan.plan_id);
            plan.plan_status = PlanStatus::Archived;
        }
    }

    plans[target].plan_status = PlanStatus::Active;
    info!("Activated plan {} for user {}", plan_id, user_id);
    Ok(&plans[target])
}

/// Apply a status and/or notes change to one item. The status string must be
/// one of `pending`, `in_progress`, `completed`, `skipped`.
pub fn update_item(item: &mut PlanItem, status: Option<&str>, notes: Option<String>) -> Result<()> {
    if let Some(status) = status {
        item.status = status.parse()?;
    }
    if notes.is_some() {
        item.notes = notes;
    }
    debug!("Updated item {}: status={}", item.item_id, item.status);
    Ok(())
}

/// Items scheduled on `date`.
pub fn sessions_on(items: &[PlanItem], date: NaiveDate) -> Vec<&PlanItem> {
    items.iter().filter(|i| i.session.date == date).collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopicProgress {
    pub topic_id: TopicId,
    pub topic_name: String,
    pub total_hours: u64,
    pub completed_hours: u64,
}

/// Aggregate progress over a set of plan items.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanSummary {
    pub total_items: usize,
    pub total_hours: u64,
    pub completed_items: usize,
    pub completion_percentage: f64,
    pub status_breakdown: BTreeMap<String, usize>,
    pub topics: Vec<TopicProgress>,
}

impl PlanSummary {
    pub fn from_items(items: &[PlanItem]) -> Self {
        Self::build(items.iter())
    }

    /// Summary restricted to items in `[from, to]`, either bound optional.
    pub fn between(items: &[PlanItem], from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        Self::build(items.iter().filter(|i| {
            from.map_or(true, |f| i.session.date >= f) && to.map_or(true, |t| i.session.date <= t)
        }))
    }

    /// Summary over the items currently in `status`.
    pub fn for_status(items: &[PlanItem], status: SessionStatus) -> Self {
        Self::build(items.iter().filter(|i| i.status == status))
    }

    fn build<'a>(items: impl Iterator<Item = &'a PlanItem>) -> Self {
        let mut status_breakdown: BTreeMap<String, usize> = SessionStatus::all()
            .iter()
            .map(|s| (s.to_string(), 0))
            .collect();
        let mut topics: Vec<TopicProgress> = Vec::new();
        let mut total_items = 0;
        let mut total_hours = 0u64;
        let mut completed_items = 0;

        for item in items {
            total_items += 1;
            let hours = u64::from(item.session.hours);
            total_hours += hours;
            *status_breakdown.entry(item.status.to_string()).or_default() += 1;

            let done = item.status == SessionStatus::Completed;
            if done {
                completed_items += 1;
            }

            let idx = match topics.iter().position(|t| t.topic_id == item.session.topic_id) {
                Some(idx) => idx,
                None => {
                    topics.push(TopicProgress {
                        topic_id: item.session.topic_id.clone(),
                        topic_name: item.session.topic_name.clone(),
                        total_hours: 0,
                        completed_hours: 0,
                    });
                    topics.len() - 1
                }
            };
            topics[idx].total_hours += hours;
            if done {
                topics[idx].completed_hours += hours;
            }
        }

        let completion_percentage = if total_items == 0 {
            0.0
        } else {
            completed_items as f64 * 100.0 / total_items as f64
        };

        Self {
            total_items,
            total_hours,
            completed_items,
            completion_percentage,
            status_breakdown,
            topics,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PlanDetails;
    use chrono::Utc;
    use studyplan_core::RescalePolicy;
    use studyplan_schedule::ScheduledSession;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn plan(user: &str, status: PlanStatus) -> StudyPlan {
        StudyPlan {
            plan_id: Uuid::new_v4(),
            user_id: user.to_string(),
            syllabus_id: "syl".into(),
            start_date: d("2026-01-01"),
            end_date: d("2026-01-31"),
            plan_status: status,
            generated_at: Utc::now(),
            plan_details: PlanDetails {
                daily_hours: 4,
                weak_areas: vec![],
                total_topics: 1,
                generation_algorithm: "adaptive_priority_based".into(),
                rescale: RescalePolicy::default(),
            },
        }
    }

    fn item(topic: &str, date: &str, hours: u32) -> PlanItem {
        PlanItem::pending(
            Uuid::nil(),
            ScheduledSession {
                topic_id: TopicId::new(topic),
                topic_name: topic.to_uppercase(),
                date: d(date),
                hours,
            },
        )
    }

    #[test]
    fn test_activate_archives_previous() {
        let mut plans = vec![
            plan("u1", PlanStatus::Active),
            plan("u1", PlanStatus::Generated),
            plan("u2", PlanStatus::Active),
        ];
        let target = plans[1].plan_id;

        let activated = activate(&mut plans, target, "u1").unwrap();
        assert_eq!(activated.plan_status, PlanStatus::Active);

        assert_eq!(plans[0].plan_status, PlanStatus::Archived);
        assert_eq!(plans[1].plan_status, PlanStatus::Active);
        // Other users are untouched.
        assert_eq!(plans[2].plan_status, PlanStatus::Active);
    }

    #[test]
    fn test_activate_wrong_user_not_found() {
        let mut plans = vec![plan("u1", PlanStatus::Generated)];
        let id = plans[0].plan_id;
        assert!(matches!(activate(&mut plans, id, "u2"), Err(Error::NotFound(_))));
        assert_eq!(plans[0].plan_status, PlanStatus::Generated);
    }

    #[test]
    fn test_update_item() {
        let mut it = item("a", "2026-01-01", 4);
        update_item(&mut it, Some("in_progress"), None).unwrap();
        assert_eq!(it.status, SessionStatus::InProgress);
        assert_eq!(it.notes, None);

        update_item(&mut it, None, Some("chapter 3 left".into())).unwrap();
        assert_eq!(it.status, SessionStatus::InProgress);
        assert_eq!(it.notes.as_deref(), Some("chapter 3 left"));

        let err = update_item(&mut it, Some("finished"), None).unwrap_err();
        assert!(matches!(err, Error::InvalidStatus(_)));
        assert_eq!(it.status, SessionStatus::InProgress);
    }

    #[test]
    fn test_sessions_on() {
        let items = vec![
            item("a", "2026-01-01", 4),
            item("a", "2026-01-02", 2),
            item("b", "2026-01-03", 4),
        ];
        let on = sessions_on(&items, d("2026-01-02"));
        assert_eq!(on.len(), 1);
        assert_eq!(on[0].session.hours, 2);
        assert!(sessions_on(&items, d("2026-02-01")).is_empty());
    }

    #[test]
    fn test_summary() {
        let mut items = vec![
            item("a", "2026-01-01", 4),
            item("a", "2026-01-02", 2),
            item("b", "2026-01-03", 4),
            item("c", "2026-01-04", 1),
        ];
        items[0].status = SessionStatus::Completed;
        items[2].status = SessionStatus::Skipped;

        let summary = PlanSummary::from_items(&items);
        assert_eq!(summary.total_items, 4);
        assert_eq!(summary.total_hours, 11);
        assert_eq!(summary.completed_items, 1);
        assert!((summary.completion_percentage - 25.0).abs() < 1e-9);
        assert_eq!(summary.status_breakdown["pending"], 2);
        assert_eq!(summary.status_breakdown["skipped"], 1);
        assert_eq!(summary.status_breakdown["in_progress"], 0);

        let a = &summary.topics[0];
        assert_eq!(a.topic_id.as_str(), "a");
        assert_eq!((a.total_hours, a.completed_hours), (6, 4));
        assert_eq!(summary.topics.len(), 3);
    }

    #[test]
    fn test_summary_date_range() {
        let items = vec![
            item("a", "2026-01-01", 4),
            item("a", "2026-01-02", 2),
            item("b", "2026-01-03", 4),
        ];
        let summary = PlanSummary::between(&items, Some(d("2026-01-02")), None);
        assert_eq!(summary.total_items, 2);
        assert_eq!(summary.total_hours, 6);

        let pending = PlanSummary::for_status(&items, SessionStatus::Pending);
        assert_eq!(pending.total_items, 3);
        assert_eq!(pending.status_breakdown["pending"], 3);

        let empty = PlanSummary::between(&items, Some(d("2026-02-01")), None);
        assert_eq!(empty.total_items, 0);
        assert_eq!(empty.completion_percentage, 0.0);
    }
}
