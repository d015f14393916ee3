//! Adaptive scheduler — priority scoring, effort reconciliation, greedy allocation.
//!
//! Pure and synchronous: history lookups and persistence happen in the
//! caller, which passes materialized data in. Identical inputs always yield
//! the identical session sequence.

pub mod allocate;
pub mod priority;
pub mod reconcile;
pub mod scheduler;
pub mod types;

pub use priority::{
    prioritize, score_priority, BaseScorer, HistoricalSignal, HistoryBook, MasteryRecord,
    PriorityScorer, WeakAreaBoost,
};
pub use scheduler::{generate_schedule, AdaptiveScheduler, Schedule, TopicAllocation};
pub use studyplan_core::RescalePolicy;
pub use types::*;
