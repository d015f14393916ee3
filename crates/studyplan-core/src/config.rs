//! Planner configuration: defaults, JSON file, `STUDYPLAN_*` overrides.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Error, Result};

pub const DEFAULT_DAILY_HOURS: u32 = 4;
pub const DEFAULT_FALLBACK_TOPIC_HOURS: u32 = 4;
pub const DEFAULT_EXTRACTED_TOPIC_HOURS: u32 = 2;
pub const DEFAULT_EXTRACTED_SUBTOPIC_HOURS: u32 = 1;
pub const DEFAULT_MIN_SUBTOPIC_CHARS: usize = 10;

/// How total demand is scaled down when it exceeds the window's capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RescalePolicy {
    /// `max(1, floor(estimated * available / demand))` per topic. The realized
    /// total may land above or below capacity.
    #[default]
    ProportionalFloor,
    /// Largest-remainder apportionment. The realized total never exceeds
    /// capacity.
    LargestRemainder,
}

impl std::str::FromStr for RescalePolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "proportional-floor" | "floor" => Ok(Self::ProportionalFloor),
            "largest-remainder" | "exact" => Ok(Self::LargestRemainder),
            other => Err(Error::Config(format!("unknown rescale policy '{}'", other))),
        }
    }
}

impl std::fmt::Display for RescalePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ProportionalFloor => write!(f, "proportional-floor"),
            Self::LargestRemainder => write!(f, "largest-remainder"),
        }
    }
}

/// Top-level planner configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannerConfig {
    /// Daily budget used when neither the request nor the user's preferences set one.
    #[serde(default = "default_daily_hours")]
    pub default_daily_hours: u32,
    /// Estimate substituted for topics with a missing or zero estimate.
    #[serde(default = "default_fallback_topic_hours")]
    pub fallback_topic_hours: u32,
    /// Estimate assigned to topics materialized from an extracted outline.
    #[serde(default = "default_extracted_topic_hours")]
    pub extracted_topic_hours: u32,
    /// Estimate assigned to subtopics materialized from an extracted outline.
    #[serde(default = "default_extracted_subtopic_hours")]
    pub extracted_subtopic_hours: u32,
    /// Continuation lines of this length or shorter are dropped by the extractor.
    #[serde(default = "default_min_subtopic_chars")]
    pub min_subtopic_chars: usize,
    #[serde(default)]
    pub rescale: RescalePolicy,
}

fn default_daily_hours() -> u32 {
    DEFAULT_DAILY_HOURS
}
fn default_fallback_topic_hours() -> u32 {
    DEFAULT_FALLBACK_TOPIC_HOURS
}
fn default_extracted_topic_hours() -> u32 {
    DEFAULT_EXTRACTED_TOPIC_HOURS
}
fn default_extracted_subtopic_hours() -> u32 {
    DEFAULT_EXTRACTED_SUBTOPIC_HOURS
}
fn default_min_subtopic_chars() -> usize {
    DEFAULT_MIN_SUBTOPIC_CHARS
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            default_daily_hours: DEFAULT_DAILY_HOURS,
            fallback_topic_hours: DEFAULT_FALLBACK_TOPIC_HOURS,
            extracted_topic_hours: DEFAULT_EXTRACTED_TOPIC_HOURS,
            extracted_subtopic_hours: DEFAULT_EXTRACTED_SUBTOPIC_HOURS,
            min_subtopic_chars: DEFAULT_MIN_SUBTOPIC_CHARS,
            rescale: RescalePolicy::default(),
        }
    }
}

impl PlannerConfig {
    /// Load config from file (missing or unreadable file falls back to
    /// defaults), then apply `STUDYPLAN_*` environment overrides.
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let mut config: PlannerConfig = config_path
            .and_then(|p| std::fs::read_to_string(p).ok())
            .and_then(|s| serde_json::from_str(&s).ok())
            .unwrap_or_default();

        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;

        info!(
            "Planner config: daily_hours={}, fallback_topic_hours={}, rescale={}",
            config.default_daily_hours, config.fallback_topic_hours, config.rescale
        );
        Ok(config)
    }

    /// Apply overrides from a key lookup (the process environment in `load`).
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("STUDYPLAN_DAILY_HOURS") {
            self.default_daily_hours = parse_override("STUDYPLAN_DAILY_HOURS", &v)?;
        }
        if let Some(v) = lookup("STUDYPLAN_FALLBACK_TOPIC_HOURS") {
            self.fallback_topic_hours = parse_override("STUDYPLAN_FALLBACK_TOPIC_HOURS", &v)?;
        }
        if let Some(v) = lookup("STUDYPLAN_EXTRACTED_TOPIC_HOURS") {
            self.extracted_topic_hours = parse_override("STUDYPLAN_EXTRACTED_TOPIC_HOURS", &v)?;
        }
        if let Some(v) = lookup("STUDYPLAN_EXTRACTED_SUBTOPIC_HOURS") {
            self.extracted_subtopic_hours =
                parse_override("STUDYPLAN_EXTRACTED_SUBTOPIC_HOURS", &v)?;
        }
        if let Some(v) = lookup("STUDYPLAN_MIN_SUBTOPIC_CHARS") {
            self.min_subtopic_chars = parse_override("STUDYPLAN_MIN_SUBTOPIC_CHARS", &v)?;
        }
        if let Some(v) = lookup("STUDYPLAN_RESCALE") {
            self.rescale = v.parse()?;
        }
        Ok(())
    }

    /// Reject zero-hour budgets and estimates.
    pub fn validate(&self) -> Result<()> {
        let hours = [
            ("default_daily_hours", self.default_daily_hours),
            ("fallback_topic_hours", self.fallback_topic_hours),
            ("extracted_topic_hours", self.extracted_topic_hours),
            ("extracted_subtopic_hours", self.extracted_subtopic_hours),
        ];
        for (name, value) in hours {
            if value == 0 {
                return Err(Error::Config(format!("{} must be positive", name)));
            }
        }
        Ok(())
    }
}

fn parse_override<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    debug!("Config override {}={}", key, value);
    value
        .trim()
        .parse()
        .map_err(|_| Error::Config(format!("{} has invalid value '{}'", key, value)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = PlannerConfig::default();
        assert_eq!(config.default_daily_hours, 4);
        assert_eq!(config.fallback_topic_hours, 4);
        assert_eq!(config.extracted_topic_hours, 2);
        assert_eq!(config.min_subtopic_chars, 10);
        assert_eq!(config.rescale, RescalePolicy::ProportionalFloor);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: PlannerConfig =
            serde_json::from_str(r#"{"default_daily_hours": 6, "rescale": "largest-remainder"}"#)
                .unwrap();
        assert_eq!(config.default_daily_hours, 6);
        assert_eq!(config.fallback_topic_hours, 4);
        assert_eq!(config.rescale, RescalePolicy::LargestRemainder);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("planner.json");
        std::fs::write(&path, r#"{"extracted_topic_hours": 3}"#).unwrap();

        let config = PlannerConfig::load(Some(&path)).unwrap();
        assert_eq!(config.extracted_topic_hours, 3);
    }

    #[test]
    fn test_load_missing_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let config = PlannerConfig::load(Some(&dir.path().join("absent.json"))).unwrap();
        assert_eq!(config.extracted_subtopic_hours, 1);
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = [
            ("STUDYPLAN_DAILY_HOURS", "6"),
            ("STUDYPLAN_RESCALE", "largest-remainder"),
        ]
        .into_iter()
        .collect();

        let mut config = PlannerConfig::default();
        config
            .apply_overrides(|k| env.get(k).map(|v| v.to_string()))
            .unwrap();
        assert_eq!(config.default_daily_hours, 6);
        assert_eq!(config.rescale, RescalePolicy::LargestRemainder);
    }

    #[test]
    fn test_bad_override_is_config_error() {
        let mut config = PlannerConfig::default();
        let err = config
            .apply_overrides(|k| (k == "STUDYPLAN_DAILY_HOURS").then(|| "lots".to_string()))
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_zero_hours_rejected() {
        let config = PlannerConfig {
            default_daily_hours: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }
}
