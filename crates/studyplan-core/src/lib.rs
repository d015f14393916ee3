//! StudyPlan Core — error taxonomy and planner configuration.

pub mod config;
pub mod error;

pub use config::{PlannerConfig, RescalePolicy};
pub use error::{Error, Result};
