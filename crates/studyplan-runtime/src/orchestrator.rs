//! Planner — coordinates extraction, scoring and scheduling for one request.

use chrono::Utc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use studyplan_core::{Error, PlannerConfig, Result};
use studyplan_ingest::{materialize, InventoryTopic, OutlineExtractor};
use studyplan_schedule::{
    prioritize, AdaptiveScheduler, BaseScorer, HistoryBook, ScheduleWindow, TopicInventoryEntry,
    WeakAreaBoost,
};

use crate::types::*;

/// Top-level planner holding the configuration for every request it serves.
pub struct Planner {
    config: PlannerConfig,
    scheduler: AdaptiveScheduler,
}

impl Planner {
    pub fn new(config: PlannerConfig) -> Self {
        let scheduler = AdaptiveScheduler::new(config.rescale);
        info!(
            "Planner initialized: default_daily_hours={}, rescale={}",
            config.default_daily_hours, config.rescale
        );
        Self { config, scheduler }
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Extract an outline from syllabus text and materialize its topics.
    /// An empty result means nothing was recognized.
    pub fn ingest_syllabus(&self, text: &str, discipline: &str) -> Vec<InventoryTopic> {
        let outline = OutlineExtractor::new(discipline)
            .with_min_subtopic_chars(self.config.min_subtopic_chars)
            .extract(text);
        if outline.is_empty() {
            warn!("No sections recognized in syllabus for '{}'", discipline);
        }
        materialize(&outline, &self.config)
    }

    /// Daily budget: request, then preferences, then config.
    pub fn resolve_daily_hours(&self, request: &PlanRequest, prefs: &UserPreferences) -> u32 {
        request
            .daily_hours
            .or(prefs.daily_hours)
            .unwrap_or(self.config.default_daily_hours)
    }

    /// Weak areas: request if given (even empty), otherwise preferences.
    pub fn resolve_weak_areas(
        &self,
        request: &PlanRequest,
        prefs: &UserPreferences,
    ) -> Vec<String> {
        request
            .weak_areas
            .clone()
            .unwrap_or_else(|| prefs.weak_areas.clone())
    }

    /// Substitute the fallback estimate for topics with no estimate.
    fn normalize_inventory(&self, inventory: &[TopicInventoryEntry]) -> Vec<TopicInventoryEntry> {
        inventory
            .iter()
            .map(|t| {
                let mut t = t.clone();
                if t.estimated_hours == 0 {
                    debug!(
                        "Topic {} has no estimate, using {}h",
                        t.id, self.config.fallback_topic_hours
                    );
                    t.estimated_hours = self.config.fallback_topic_hours;
                }
                t
            })
            .collect()
    }

    /// Generate a study plan for `user_id`.
    ///
    /// Fails on an invalid window or an empty inventory. Truncation is not an
    /// error; it is reported through [`GeneratedPlan::unscheduled_topics`].
    pub fn generate(
        &self,
        user_id: &str,
        request: &PlanRequest,
        prefs: &UserPreferences,
        inventory: &[TopicInventoryEntry],
        history: &HistoryBook,
    ) -> Result<GeneratedPlan> {
        let daily_hours = self.resolve_daily_hours(request, prefs);
        let window = ScheduleWindow::new(request.start_date, request.end_date, daily_hours)?;

        if inventory.is_empty() {
            return Err(Error::EmptyInventory(request.syllabus_id.clone()));
        }

        let weak_areas = self.resolve_weak_areas(request, prefs);
        let topics = self.normalize_inventory(inventory);
        let scorer = WeakAreaBoost::new(BaseScorer, weak_areas.iter().cloned());
        let prioritized = prioritize(&scorer, &topics, history);

        let schedule = self.scheduler.generate(&prioritized, &window)?;

        let plan = StudyPlan {
            plan_id: Uuid::new_v4(),
            user_id: user_id.to_string(),
            syllabus_id: request.syllabus_id.clone(),
            start_date: window.start_date,
            end_date: window.end_date,
            plan_status: PlanStatus::Generated,
            generated_at: Utc::now(),
            plan_details: PlanDetails {
                daily_hours,
                weak_areas,
                total_topics: topics.len(),
                generation_algorithm: GENERATION_ALGORITHM.to_string(),
                rescale: schedule.policy,
            },
        };

        let unscheduled_topics = schedule
            .unscheduled_topics()
            .into_iter()
            .cloned()
            .collect();
        let total_study_days = window.days_inclusive();
        let allocations = schedule.allocations.clone();
        let items = schedule
            .into_sessions()
            .into_iter()
            .map(|session| PlanItem::pending(plan.plan_id, session))
            .collect::<Vec<_>>();

        info!(
            "Generated plan {} for user {}: {} items over {} days",
            plan.plan_id,
            user_id,
            items.len(),
            total_study_days
        );

        Ok(GeneratedPlan {
            plan,
            items,
            total_study_days,
            allocations,
            unscheduled_topics,
        })
    }
}

impl Default for Planner {
    fn default() -> Self {
        Self::new(PlannerConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use studyplan_core::RescalePolicy;
    use studyplan_schedule::{MasteryRecord, TopicId};

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn request(start: &str, end: &str) -> PlanRequest {
        PlanRequest {
            syllabus_id: "syl-1".into(),
            start_date: d(start),
            end_date: d(end),
            daily_hours: None,
            weak_areas: None,
        }
    }

    fn inventory() -> Vec<TopicInventoryEntry> {
        vec![
            TopicInventoryEntry::new("a", "Algorithms", 8),
            TopicInventoryEntry::new("b", "Databases", 4),
            TopicInventoryEntry::new("c", "Networks", 0),
        ]
    }

    #[test]
    fn test_daily_hours_precedence() {
        let planner = Planner::default();
        let mut req = request("2026-01-01", "2026-01-10");
        let prefs = UserPreferences {
            daily_hours: Some(6),
            weak_areas: vec![],
        };
        assert_eq!(planner.resolve_daily_hours(&req, &prefs), 6);
        req.daily_hours = Some(2);
        assert_eq!(planner.resolve_daily_hours(&req, &prefs), 2);
        assert_eq!(planner.resolve_daily_hours(&req, &UserPreferences::default()), 2);
        req.daily_hours = None;
        assert_eq!(planner.resolve_daily_hours(&req, &UserPreferences::default()), 4);
    }

    #[test]
    fn test_invalid_window_rejected() {
        let planner = Planner::default();
        let err = planner
            .generate(
                "u1",
                &request("2026-01-10", "2026-01-10"),
                &UserPreferences::default(),
                &inventory(),
                &HistoryBook::new(),
            )
            .unwrap_err();
        assert!(matches!(err, Error::InvalidWindow(_)));
    }

    #[test]
    fn test_empty_inventory_rejected() {
        let planner = Planner::default();
        let err = planner
            .generate(
                "u1",
                &request("2026-01-01", "2026-01-10"),
                &UserPreferences::default(),
                &[],
                &HistoryBook::new(),
            )
            .unwrap_err();
        assert!(matches!(err, Error::EmptyInventory(id) if id == "syl-1"));
    }

    #[test]
    fn test_generate_plan_records() {
        let planner = Planner::default();
        let plan = planner
            .generate(
                "u1",
                &request("2026-01-01", "2026-01-10"),
                &UserPreferences::default(),
                &inventory(),
                &HistoryBook::new(),
            )
            .unwrap();

        assert_eq!(plan.plan.plan_status, PlanStatus::Generated);
        assert_eq!(plan.plan.plan_details.generation_algorithm, "adaptive_priority_based");
        assert_eq!(plan.plan.plan_details.total_topics, 3);
        assert_eq!(plan.total_study_days, 10);
        assert!(plan.items.iter().all(|i| i.status == SessionStatus::Pending));
        assert!(plan.items.iter().all(|i| i.plan_id == plan.plan.plan_id));

        // Algorithms (8h > 6h) outranks the rest and goes first.
        assert_eq!(plan.items[0].session.topic_id.as_str(), "a");
        // Networks had no estimate and got the 4h fallback.
        let networks = plan.allocations.iter().find(|a| a.topic_id.as_str() == "c").unwrap();
        assert_eq!(networks.estimated_hours, 4);
        assert!(!plan.is_truncated());
    }

    #[test]
    fn test_weak_areas_and_history_reorder() {
        let planner = Planner::default();
        let mut req = request("2026-01-01", "2026-01-10");
        req.weak_areas = Some(vec!["Networks".into()]);

        let mut history = HistoryBook::new();
        history.add_mastery(&TopicId::new("b"), MasteryRecord::scored(10.0));

        let plan = planner
            .generate("u1", &req, &UserPreferences::default(), &inventory(), &history)
            .unwrap();

        let order: Vec<&str> = plan.allocations.iter().map(|a| a.topic_id.as_str()).collect();
        // b: 50 + 25 = 75, c: 50 + 20 = 70, a: 60
        assert_eq!(order, vec!["b", "c", "a"]);
    }

    #[test]
    fn test_truncation_reported() {
        let config = PlannerConfig {
            rescale: RescalePolicy::ProportionalFloor,
            ..Default::default()
        };
        let planner = Planner::new(config);
        let inventory: Vec<TopicInventoryEntry> = (0..5)
            .map(|i| TopicInventoryEntry::new(format!("t{}", i), format!("Topic {}", i), 1))
            .collect();
        let plan = planner
            .generate(
                "u1",
                &request("2026-01-01", "2026-01-02"),
                &UserPreferences::default(),
                &inventory,
                &HistoryBook::new(),
            )
            .unwrap();

        assert_eq!(plan.items.len(), 2);
        assert!(plan.is_truncated());
        assert_eq!(plan.unscheduled_topics.len(), 3);
    }

    #[test]
    fn test_dropped_topics_listed_as_unscheduled() {
        let planner = Planner::new(PlannerConfig {
            rescale: RescalePolicy::LargestRemainder,
            ..Default::default()
        });
        let inventory: Vec<TopicInventoryEntry> = (0..4)
            .map(|i| TopicInventoryEntry::new(format!("t{}", i), format!("Topic {}", i), 3))
            .collect();
        let mut req = request("2026-01-01", "2026-01-02");
        req.daily_hours = Some(1);

        let plan = planner
            .generate("u1", &req, &UserPreferences::default(), &inventory, &HistoryBook::new())
            .unwrap();

        assert_eq!(plan.items.len(), 2);
        assert!(plan.is_truncated());
        let unscheduled: Vec<&str> = plan
            .unscheduled_topics
            .iter()
            .map(|a| a.topic_id.as_str())
            .collect();
        assert_eq!(unscheduled, vec!["t2", "t3"]);
    }

    #[test]
    fn test_ingest_syllabus_uses_config() {
        let planner = Planner::default();
        let topics = planner.ingest_syllabus(
            "Engineering Mathematics\n1. Calculus\nLimits, continuity and differentiability",
            "Mathematics",
        );
        assert_eq!(topics.len(), 1);
        assert_eq!(topics[0].entry.estimated_hours, 2);
        assert_eq!(topics[0].subtopics.len(), 1);
    }
}
