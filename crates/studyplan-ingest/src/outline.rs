//! Heuristic syllabus outline extraction: sections → topics → subtopics.
//!
//! Line-oriented and single pass. A line naming a section marker opens a
//! section, a numbered or bulleted line opens a topic, and any other
//! sufficiently long line is attached to the latest topic as a subtopic.
//! Misses and noise are expected; the outline is reviewed downstream.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use studyplan_core::config::DEFAULT_MIN_SUBTOPIC_CHARS;

/// Section labels recognized in every discipline's syllabus.
pub const COMMON_SECTION_MARKERS: &[&str] =
    &["General Aptitude", "Engineering Mathematics", "Core Subject"];

/// Leading numeral, capital letter, or bullet marker followed by the topic text.
static TOPIC_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+\.?\s*|[A-Z]\.\s*|\*\s*|-\s*)(.+)").expect("valid regex"));

/// A topic and the continuation lines captured under it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutlineTopic {
    #[serde(rename = "topic_name")]
    pub name: String,
    pub subtopics: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    #[serde(rename = "section_name")]
    pub name: String,
    pub topics: Vec<OutlineTopic>,
}

/// Structured outline of one syllabus document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyllabusOutline {
    pub discipline: String,
    pub sections: Vec<Section>,
}

impl SyllabusOutline {
    /// True when no section with at least one topic was recognized.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn topic_count(&self) -> usize {
        self.sections.iter().map(|s| s.topics.len()).sum()
    }
}

/// Scan state threaded through the fold.
#[derive(Default)]
struct Scan {
    sections: Vec<Section>,
    current: Option<Section>,
}

impl Scan {
    /// Close the open section, keeping it only if it gathered a topic.
    fn flush(mut self) -> Self {
        if let Some(section) = self.current.take() {
            if !section.topics.is_empty() {
                self.sections.push(section);
            }
        }
        self
    }
}

/// Extractor configured for one discipline.
#[derive(Debug, Clone)]
pub struct OutlineExtractor {
    discipline: String,
    markers: Vec<String>,
    min_subtopic_chars: usize,
}

impl OutlineExtractor {
    pub fn new(discipline: &str) -> Self {
        let mut markers: Vec<String> = COMMON_SECTION_MARKERS
            .iter()
            .map(|m| m.to_string())
            .collect();
        // An empty label would match every line.
        if !discipline.trim().is_empty() {
            markers.push(discipline.to_string());
        }
        Self {
            discipline: discipline.to_string(),
            markers,
            min_subtopic_chars: DEFAULT_MIN_SUBTOPIC_CHARS,
        }
    }

    /// Continuation lines must be longer than this many characters.
    pub fn with_min_subtopic_chars(mut self, min_subtopic_chars: usize) -> Self {
        self.min_subtopic_chars = min_subtopic_chars;
        self
    }

    fn is_section_boundary(&self, line: &str) -> bool {
        self.markers.iter().any(|m| line.contains(m.as_str()))
    }

    fn step(&self, scan: Scan, line: &str) -> Scan {
        if self.is_section_boundary(line) {
            let mut scan = scan.flush();
            scan.current = Some(Section {
                name: line.to_string(),
                topics: Vec::new(),
            });
            return scan;
        }

        let Scan {
            sections,
            mut current,
        } = scan;

        if let Some(section) = current.as_mut() {
            if let Some(caps) = TOPIC_PATTERN.captures(line) {
                section.topics.push(OutlineTopic {
                    name: caps[2].trim().to_string(),
                    subtopics: Vec::new(),
                });
            } else if let Some(topic) = section.topics.last_mut() {
                if line.chars().count() > self.min_subtopic_chars {
                    topic.subtopics.push(line.to_string());
                } else {
                    debug!("Dropping short line: {:?}", line);
                }
            }
        }

        Scan { sections, current }
    }

    /// Extract the outline from raw syllabus text. Never fails; text with no
    /// recognized section yields an empty outline.
    pub fn extract(&self, text: &str) -> SyllabusOutline {
        let scan = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .fold(Scan::default(), |scan, line| self.step(scan, line))
            .flush();

        let outline = SyllabusOutline {
            discipline: self.discipline.clone(),
            sections: scan.sections,
        };

        info!(
            "Extracted {} sections, {} topics for '{}'",
            outline.sections.len(),
            outline.topic_count(),
            outline.discipline
        );
        outline
    }
}

/// Extract with the default short-line threshold.
pub fn extract(text: &str, discipline: &str) -> SyllabusOutline {
    OutlineExtractor::new(discipline).extract(text)
}
