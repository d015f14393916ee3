//! Priority scoring: an auditable additive heuristic over exam weightage,
//! user mastery and topic size, clamped to [0, 100].
//!
//! The weak-area boost is a separate combinator ([`WeakAreaBoost`]) wrapped
//! around the base scorer, so each term can be inspected on its own.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::types::{PrioritizedTopic, TopicId, TopicInventoryEntry};

pub const BASE_PRIORITY: f64 = 50.0;
pub const WEIGHTAGE_FACTOR: f64 = 2.0;
pub const MASTERY_THRESHOLD: f64 = 60.0;
pub const MASTERY_FACTOR: f64 = 0.5;
/// Topics estimated above this many hours get [`COMPLEX_TOPIC_BONUS`].
pub const COMPLEX_TOPIC_HOURS: u32 = 6;
pub const COMPLEX_TOPIC_BONUS: f64 = 10.0;
pub const WEAK_AREA_BONUS: f64 = 20.0;
pub const MIN_PRIORITY: f64 = 0.0;
pub const MAX_PRIORITY: f64 = 100.0;

/// One progress record for a topic. The score is absent when the user
/// studied the topic without being assessed.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MasteryRecord {
    #[serde(default)]
    pub mastery_score: Option<f64>,
    #[serde(default)]
    pub hours_studied: u32,
}

impl MasteryRecord {
    pub fn scored(mastery_score: f64) -> Self {
        Self {
            mastery_score: Some(mastery_score),
            hours_studied: 0,
        }
    }
}

/// History for a single topic, borrowed from a [`HistoryBook`].
#[derive(Debug, Clone, Copy, Default)]
pub struct HistoricalSignal<'a> {
    /// Average exam weightage per recorded exam year (0–100).
    pub weightages: &'a [f64],
    pub mastery: &'a [MasteryRecord],
}

impl<'a> HistoricalSignal<'a> {
    pub fn new(weightages: &'a [f64], mastery: &'a [MasteryRecord]) -> Self {
        Self {
            weightages,
            mastery,
        }
    }

    /// Mean of the finite weightage values, `None` without history.
    pub fn mean_weightage(&self) -> Option<f64> {
        let values: Vec<f64> = self
            .weightages
            .iter()
            .copied()
            .filter(|w| w.is_finite())
            .collect();
        if values.is_empty() {
            return None;
        }
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }

    /// Mean mastery over the user's records. Unscored records count toward
    /// the denominator and contribute nothing to the sum.
    pub fn mean_mastery(&self) -> Option<f64> {
        let usable: Vec<Option<f64>> = self
            .mastery
            .iter()
            .map(|r| r.mastery_score)
            .filter(|s| s.map_or(true, f64::is_finite))
            .collect();
        if usable.is_empty() {
            return None;
        }
        let sum: f64 = usable.iter().flatten().sum();
        Some(sum / usable.len() as f64)
    }
}

/// Per-topic weightage and mastery history, materialized by the caller.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HistoryBook {
    #[serde(default)]
    pub weightages: HashMap<TopicId, Vec<f64>>,
    #[serde(default)]
    pub mastery: HashMap<TopicId, Vec<MasteryRecord>>,
}

impl HistoryBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_weightage(&mut self, topic_id: &TopicId, average_weightage: f64) {
        self.weightages
            .entry(topic_id.clone())
            .or_default()
            .push(average_weightage);
    }

    pub fn add_mastery(&mut self, topic_id: &TopicId, record: MasteryRecord) {
        self.mastery.entry(topic_id.clone()).or_default().push(record);
    }

    /// Signal for one topic; missing history yields empty slices.
    pub fn signal_for(&self, topic_id: &TopicId) -> HistoricalSignal<'_> {
        HistoricalSignal {
            weightages: self.weightages.get(topic_id).map(Vec::as_slice).unwrap_or(&[]),
            mastery: self.mastery.get(topic_id).map(Vec::as_slice).unwrap_or(&[]),
        }
    }
}

/// Computes a topic's priority for one scheduling run.
pub trait PriorityScorer {
    fn score(&self, topic: &TopicInventoryEntry, signal: &HistoricalSignal<'_>) -> f64;
}

/// The base additive heuristic.
#[derive(Debug, Clone, Copy, Default)]
pub struct BaseScorer;

impl PriorityScorer for BaseScorer {
    fn score(&self, topic: &TopicInventoryEntry, signal: &HistoricalSignal<'_>) -> f64 {
        score_priority(topic, signal)
    }
}

/// Base score: 50, plus twice the mean weightage, plus half the mastery
/// shortfall below 60, plus 10 for topics over 6 hours; clamped to [0, 100].
pub fn score_priority(topic: &TopicInventoryEntry, signal: &HistoricalSignal<'_>) -> f64 {
    let mut score = BASE_PRIORITY;

    if let Some(weightage) = signal.mean_weightage() {
        score += weightage * WEIGHTAGE_FACTOR;
    }

    if let Some(mastery) = signal.mean_mastery() {
        if mastery < MASTERY_THRESHOLD {
            score += (MASTERY_THRESHOLD - mastery) * MASTERY_FACTOR;
        }
    }

    if topic.estimated_hours > COMPLEX_TOPIC_HOURS {
        score += COMPLEX_TOPIC_BONUS;
    }

    clamp_priority(score)
}

fn clamp_priority(score: f64) -> f64 {
    if score.is_nan() {
        return MIN_PRIORITY;
    }
    score.clamp(MIN_PRIORITY, MAX_PRIORITY)
}

/// Adds [`WEAK_AREA_BONUS`] to topics whose name is in the weak-area list,
/// then re-clamps.
#[derive(Debug, Clone)]
pub struct WeakAreaBoost<S> {
    inner: S,
    weak_areas: HashSet<String>,
}

impl<S: PriorityScorer> WeakAreaBoost<S> {
    pub fn new<I, T>(inner: S, weak_areas: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            inner,
            weak_areas: weak_areas.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_weak(&self, topic_name: &str) -> bool {
        self.weak_areas.contains(topic_name)
    }
}

impl<S: PriorityScorer> PriorityScorer for WeakAreaBoost<S> {
    fn score(&self, topic: &TopicInventoryEntry, signal: &HistoricalSignal<'_>) -> f64 {
        let base = self.inner.score(topic, signal);
        if self.is_weak(&topic.name) {
            clamp_priority(base + WEAK_AREA_BONUS)
        } else {
            base
        }
    }
}

/// Score every topic against its history, preserving inventory order.
pub fn prioritize<S: PriorityScorer>(
    scorer: &S,
    topics: &[TopicInventoryEntry],
    history: &HistoryBook,
) -> Vec<PrioritizedTopic> {
    topics
        .iter()
        .map(|topic| {
            let signal = history.signal_for(&topic.id);
            let score = scorer.score(topic, &signal);
            debug!(
                "Priority {} ({}): {:.1} [weightage={:?}, mastery={:?}]",
                topic.id,
                topic.name,
                score,
                signal.mean_weightage(),
                signal.mean_mastery()
            );
            PrioritizedTopic::new(topic.clone(), score)
        })
        .collect()
}
