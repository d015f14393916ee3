//! StudyPlan Ingest — syllabus text loading, heuristic outline extraction,
//! topic inventory materialization, discipline catalog.

pub mod catalog;
pub mod file;
pub mod inventory;
pub mod outline;

pub use catalog::{find_discipline, sample_inventory, sample_outline, DISCIPLINES};
pub use file::load_text;
pub use inventory::{
    inventory_entries, materialize, materialize_with, InventoryTopic, SubtopicEntry,
};
pub use outline::{extract, OutlineExtractor, OutlineTopic, Section, SyllabusOutline};
