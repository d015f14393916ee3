//! Exam discipline catalog and the built-in sample syllabus.

use crate::inventory::{materialize_with, InventoryTopic};
use crate::outline::{OutlineTopic, Section, SyllabusOutline};

pub const DISCIPLINES: &[&str] = &[
    "Aerospace Engineering",
    "Agricultural Engineering",
    "Architecture and Planning",
    "Biomedical Engineering",
    "Biotechnology",
    "Chemical Engineering",
    "Chemistry",
    "Civil Engineering",
    "Computer Science and Information Technology",
    "Electrical Engineering",
    "Electronics and Communication Engineering",
    "Engineering Sciences",
    "Environmental Science and Engineering",
    "Geology and Geophysics",
    "Instrumentation Engineering",
    "Mathematics",
    "Mechanical Engineering",
    "Metallurgical Engineering",
    "Mining Engineering",
    "Naval Architecture and Marine Engineering",
    "Ocean Engineering",
    "Petroleum Engineering",
    "Physics",
    "Production and Industrial Engineering",
    "Textile Engineering and Fibre Science",
];

pub const SAMPLE_DISCIPLINE: &str = "Computer Science and Information Technology";
const SAMPLE_CORE_SECTION: &str = "Computer Science";
const SAMPLE_CORE_HOURS: u32 = 8;
const SAMPLE_OTHER_HOURS: u32 = 4;
const SAMPLE_SUBTOPIC_HOURS: u32 = 2;

/// Case-insensitive lookup; returns the canonical name.
pub fn find_discipline(name: &str) -> Option<&'static str> {
    let needle = name.trim();
    DISCIPLINES
        .iter()
        .copied()
        .find(|d| d.eq_ignore_ascii_case(needle))
}

// Subtopic strings are kept verbatim from the published syllabus, including
// its U+2010 hyphens.
const SAMPLE: &[(&str, &[(&str, &[&str])])] = &[
    (
        "General Aptitude",
        &[
            (
                "Verbal Ability",
                &[
                    "English grammar",
                    "Sentence completion",
                    "Verbal analogies",
                    "Word groups",
                    "Critical reasoning",
                ],
            ),
            (
                "Numerical Ability",
                &[
                    "Numerical computation",
                    "Numerical estimation",
                    "Numerical reasoning",
                    "Data interpretation",
                ],
            ),
        ],
    ),
    (
        "Engineering Mathematics",
        &[
            (
                "Discrete Mathematics",
                &[
                    "Propositional and first order logic",
                    "Sets, relations, functions",
                    "Partial orders and lattices",
                    "Monoids, Groups",
                    "Graphs",
                ],
            ),
            (
                "Linear Algebra",
                &[
                    "Matrices",
                    "Determinants",
                    "System of linear equations",
                    "Eigenvalues and eigenvectors",
                    "LU decomposition",
                ],
            ),
        ],
    ),
    (
        SAMPLE_CORE_SECTION,
        &[
            (
                "Programming and Data Structures",
                &[
                    "Programming in C",
                    "Recursion",
                    "Arrays",
                    "Stacks",
                    "Queues",
                    "Linked Lists",
                    "Trees",
                    "Binary search trees",
                    "Binary heaps",
                    "Graphs",
                ],
            ),
            (
                "Algorithms",
                &[
                    "Searching",
                    "Sorting",
                    "Hashing",
                    "Asymptotic worst case time and space complexity",
                    "Algorithm design techniques",
                    "Graph traversals",
                    "Minimum spanning trees",
                    "Shortest paths",
                ],
            ),
            (
                "Theory of Computation",
                &[
                    "Regular expressions and finite automata",
                    "Context-free grammars and push-down automata",
                    "Regular and context-free languages",
                    "Pumping lemma",
                    "Turing machines and undecidability",
                ],
            ),
            (
                "Computer Organization and Architecture",
                &[
                    "Machine instructions and addressing modes",
                    "ALU",
                    "data‐path and control unit",
                    "Instruction pipelining",
                    "Pipeline hazards",
                    "Memory hierarchy",
                    "Cache",
                    "Main memory",
                    "Secondary storage",
                    "I/O interface",
                ],
            ),
            (
                "Operating System",
                &[
                    "System calls",
                    "Processes",
                    "Threads",
                    "Inter‐process communication",
                    "Concurrency and synchronization",
                    "Deadlock",
                    "CPU and I/O scheduling",
                    "Memory management and virtual memory",
                    "File systems",
                ],
            ),
            (
                "Databases",
                &[
                    "ER‐model",
                    "Relational model",
                    "Relational algebra",
                    "Tuple calculus",
                    "SQL",
                    "Integrity constraints",
                    "Normal forms",
                    "File organization",
                    "Indexing",
                    "B and B+ trees",
                    "Transactions and concurrency control",
                ],
            ),
            (
                "Computer Networks",
                &[
                    "Concept of layering",
                    "OSI and TCP/IP Protocol Stacks",
                    "Basics of packet, circuit and virtual circuit‐switching",
                    "Data link layer",
                    "Sliding window protocol",
                    "LAN technologies",
                    "Network layer",
                    "Routing algorithms",
                    "TCP/UDP and sockets",
                    "Application layer protocols",
                ],
            ),
        ],
    ),
];

/// Hand-curated outline for Computer Science and Information Technology.
pub fn sample_outline() -> SyllabusOutline {
    let sections = SAMPLE
        .iter()
        .map(|(section, topics)| Section {
            name: section.to_string(),
            topics: topics
                .iter()
                .map(|(name, subtopics)| OutlineTopic {
                    name: name.to_string(),
                    subtopics: subtopics.iter().map(|s| s.to_string()).collect(),
                })
                .collect(),
        })
        .collect();

    SyllabusOutline {
        discipline: SAMPLE_DISCIPLINE.to_string(),
        sections,
    }
}

/// The sample outline as an inventory: core topics 8h, the rest 4h, subtopics 2h.
pub fn sample_inventory() -> Vec<InventoryTopic> {
    materialize_with(&sample_outline(), SAMPLE_SUBTOPIC_HOURS, |section| {
        if section.name == SAMPLE_CORE_SECTION {
            SAMPLE_CORE_HOURS
        } else {
            SAMPLE_OTHER_HOURS
        }
    })
}
