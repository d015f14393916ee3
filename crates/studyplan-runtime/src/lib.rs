//! Runtime orchestration: turns a plan request into a storable study plan.
//!
//! Resolves the request against user preferences and config, scores the
//! inventory against history, runs the scheduler, and wraps the sessions in
//! plan and item records. Also provides the lifecycle operations the store
//! applies afterwards: activation, item status updates, progress summaries.

pub mod orchestrator;
pub mod progress;
pub mod types;

pub use orchestrator::Planner;
pub use progress::{activate, sessions_on, update_item, PlanSummary, TopicProgress};
pub use types::*;
