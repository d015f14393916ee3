//! End-to-end plan generation: syllabus text on disk → outline → inventory →
//! scored, scheduled, tracked plan.

use chrono::NaiveDate;

use studyplan_core::{PlannerConfig, RescalePolicy};
use studyplan_ingest::{inventory_entries, load_text, sample_inventory};
use studyplan_runtime::{
    activate, sessions_on, update_item, PlanRequest, PlanStatus, PlanSummary, Planner,
    SessionStatus, UserPreferences,
};
use studyplan_schedule::{HistoryBook, MasteryRecord};

const SYLLABUS: &str = "\
GATE 2026 Syllabus

General Aptitude
1. Verbal Ability
English grammar, sentence completion, verbal analogies
2. Numerical Ability
Numerical computation and estimation

Engineering Mathematics
A. Linear Algebra
Matrices, determinants, eigenvalues
B. Calculus
Limits, continuity and differentiability

Physics
* Electromagnetic Theory
Maxwell's equations and linear vector spaces
* Classical Mechanics
Lagrangian and Hamiltonian formalisms
- Quantum Mechanics
";

fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

#[test]
fn test_syllabus_file_to_tracked_plan() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("physics.txt");
    std::fs::write(&path, SYLLABUS).unwrap();

    let planner = Planner::default();
    let text = load_text(&path).unwrap();
    let topics = planner.ingest_syllabus(&text, "Physics");
    assert_eq!(topics.len(), 7);
    assert_eq!(topics[4].section, "Physics");
    assert!(topics[6].subtopics.is_empty());

    let inventory = inventory_entries(&topics);
    let mut history = HistoryBook::new();
    history.add_mastery(&inventory[6].id, MasteryRecord::scored(10.0));

    let request = PlanRequest {
        syllabus_id: "physics-2026".into(),
        start_date: d("2026-03-01"),
        end_date: d("2026-03-14"),
        daily_hours: None,
        weak_areas: None,
    };
    let prefs = UserPreferences {
        daily_hours: Some(3),
        weak_areas: vec!["Calculus".into()],
    };

    let generated = planner
        .generate("user-1", &request, &prefs, &inventory, &history)
        .unwrap();

    assert_eq!(generated.plan.plan_details.daily_hours, 3);
    assert_eq!(generated.plan.plan_details.total_topics, 7);
    assert_eq!(generated.total_study_days, 14);
    assert!(!generated.is_truncated());

    // Quantum Mechanics (low mastery) first, Calculus (weak area) second.
    assert_eq!(generated.allocations[0].topic_name, "Quantum Mechanics");
    assert_eq!(generated.allocations[1].topic_name, "Calculus");

    // Seven 2h topics, one per day, within the window and the daily budget.
    assert_eq!(generated.items.len(), 7);
    for item in &generated.items {
        assert!(item.session.hours <= 3);
        assert!(item.session.date >= request.start_date && item.session.date <= request.end_date);
    }
    assert_eq!(generated.items[0].session.date, d("2026-03-01"));
    assert_eq!(generated.items[6].session.date, d("2026-03-07"));

    let mut plans = vec![generated.plan.clone()];
    let plan_id = plans[0].plan_id;
    activate(&mut plans, plan_id, "user-1").unwrap();
    assert_eq!(plans[0].plan_status, PlanStatus::Active);

    let mut items = generated.items;
    let today = sessions_on(&items, d("2026-03-01"));
    assert_eq!(today.len(), 1);
    let first_id = today[0].item_id;

    let first = items.iter_mut().find(|i| i.item_id == first_id).unwrap();
    update_item(first, Some("completed"), Some("done early".into())).unwrap();
    assert_eq!(first.status, SessionStatus::Completed);

    let summary = PlanSummary::from_items(&items);
    assert_eq!(summary.total_items, 7);
    assert_eq!(summary.total_hours, 14);
    assert_eq!(summary.completed_items, 1);
    assert_eq!(summary.topics[0].completed_hours, 2);
}

#[test]
fn test_sample_inventory_overflow_is_rescaled() {
    // 7 core topics at 8h plus 4 others at 4h is 72h against 20h.
    let inventory = inventory_entries(&sample_inventory());
    let request = PlanRequest {
        syllabus_id: "cse-sample".into(),
        start_date: d("2026-05-01"),
        end_date: d("2026-05-05"),
        daily_hours: Some(4),
        weak_areas: Some(vec![]),
    };

    for policy in [RescalePolicy::ProportionalFloor, RescalePolicy::LargestRemainder] {
        let planner = Planner::new(PlannerConfig {
            rescale: policy,
            ..Default::default()
        });
        let generated = planner
            .generate(
                "user-2",
                &request,
                &UserPreferences::default(),
                &inventory,
                &HistoryBook::new(),
            )
            .unwrap();

        let scheduled: u32 = generated.items.iter().map(|i| i.session.hours).sum();
        assert!(scheduled <= 20);
        // One topic per day across a five-day window.
        assert_eq!(generated.items.len(), 5);
        assert!(generated.is_truncated());
        assert_eq!(generated.plan.plan_details.rescale, policy);
    }
}
