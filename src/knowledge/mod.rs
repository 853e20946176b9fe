//! Markdown knowledge base reader.
//!
//! A knowledge base is a directory tree laid out as:
//!
//! ```text
//! <root>/
//!   by-topic/<topic>/*.md     entries (index.md excluded)
//!   by-speaker/*.md           speaker profiles (counted only)
//!   relationships/*.md        relationship notes (counted only)
//! ```
//!
//! Each entry is a markdown file with a `# Title` line, an optional
//! `## Executive Summary` section and an optional ```` ```json ```` metadata
//! block. Nothing is cached: every query re-reads the tree.

mod parser;
mod searcher;
mod stats;

pub use parser::{extract_metadata, extract_summary, extract_title, load_entry, parse_entry};
pub use searcher::{KnowledgeSearcher, TopicResult};
pub use stats::KnowledgeStats;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Name of the directory holding topic folders.
pub const BY_TOPIC_DIR: &str = "by-topic";
/// Name of the directory holding speaker profiles.
pub const BY_SPEAKER_DIR: &str = "by-speaker";
/// Name of the directory holding relationship notes.
pub const RELATIONSHIPS_DIR: &str = "relationships";
/// Extension of entry files.
pub const ENTRY_EXTENSION: &str = "md";

/// Structured metadata embedded in an entry.
///
/// The block is kept verbatim in `extra`; the recognised keys are read from
/// it leniently, so a value of an unexpected type leaves its field empty
/// instead of rejecting the entry. Serializes as the verbatim block.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EntryMetadata {
    /// Unique entry identifier, when `entry_id` is a string.
    #[serde(skip)]
    pub entry_id: Option<String>,
    /// String elements of `speakers`.
    #[serde(skip)]
    pub speakers: Vec<String>,
    /// String elements of `topics`.
    #[serde(skip)]
    pub topics: Vec<String>,
    /// The whole block as written.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl EntryMetadata {
    /// Build metadata from a parsed JSON object.
    pub fn from_map(map: serde_json::Map<String, serde_json::Value>) -> Self {
        Self {
            entry_id: map
                .get("entry_id")
                .and_then(|v| v.as_str())
                .map(String::from),
            speakers: string_list(map.get("speakers")),
            topics: string_list(map.get("topics")),
            extra: map,
        }
    }
}

/// String elements of a JSON array; anything else yields an empty list.
fn string_list(value: Option<&serde_json::Value>) -> Vec<String> {
    value
        .and_then(|v| v.as_array())
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item.as_str().map(String::from))
                .collect()
        })
        .unwrap_or_default()
}

/// A parsed knowledge entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    /// Path of the backing file.
    pub file_path: PathBuf,
    /// First `# ` heading, or the file stem.
    pub title: String,
    /// Executive summary text, empty when absent.
    pub summary: String,
    /// Embedded metadata, empty when absent.
    pub metadata: EntryMetadata,
}

impl Document {
    /// Identifier used when reporting this entry to others.
    ///
    /// Entries without an `entry_id` are reported by file path.
    pub fn reference(&self) -> String {
        self.metadata
            .entry_id
            .clone()
            .unwrap_or_else(|| self.file_path.display().to_string())
    }
}

/// A query result: a document plus an optional match count.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Hit {
    #[serde(flatten)]
    pub document: Document,
    /// Number of claim markers of the requested type.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matching_claims: Option<usize>,
    /// Number of occurrences of the free-text query.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub occurrences: Option<usize>,
}

impl From<Document> for Hit {
    fn from(document: Document) -> Self {
        Self {
            document,
            matching_claims: None,
            occurrences: None,
        }
    }
}

/// Kind of inline claim marker, written as `**[PREDICTION]**` etc.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ClaimType {
    Prediction,
    Data,
    Opinion,
    Recommendation,
}

impl ClaimType {
    /// Tag text inside the brackets.
    pub fn tag(&self) -> &'static str {
        match self {
            ClaimType::Prediction => "PREDICTION",
            ClaimType::Data => "DATA",
            ClaimType::Opinion => "OPINION",
            ClaimType::Recommendation => "RECOMMENDATION",
        }
    }

    /// Full marker literal, e.g. `**[DATA]**`.
    pub fn marker(&self) -> String {
        format!("**[{}]**", self.tag())
    }
}

impl std::str::FromStr for ClaimType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "prediction" => Ok(ClaimType::Prediction),
            "data" => Ok(ClaimType::Data),
            "opinion" => Ok(ClaimType::Opinion),
            "recommendation" => Ok(ClaimType::Recommendation),
            _ => Err(format!("Unknown claim type: {}", s)),
        }
    }
}

impl std::fmt::Display for ClaimType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.tag().to_lowercase())
    }
}

/// Typed relationship between two entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationKind {
    Confirms,
    Contradicts,
    Extends,
}

impl RelationKind {
    pub const ALL: [RelationKind; 3] = [
        RelationKind::Confirms,
        RelationKind::Contradicts,
        RelationKind::Extends,
    ];

    /// Label used in marker lines such as `**Confirms**: E123`.
    pub fn label(&self) -> &'static str {
        match self {
            RelationKind::Confirms => "Confirms",
            RelationKind::Contradicts => "Contradicts",
            RelationKind::Extends => "Extends",
        }
    }

    /// Whether `content` carries a marker of this kind pointing at `entry_id`.
    ///
    /// Accepts `**Label**: id` and `Label**: [id]`. Plain substring match,
    /// so `E12` also matches a line naming `E123`.
    pub fn is_marked_in(&self, content: &str, entry_id: &str) -> bool {
        let label = self.label();
        content.contains(&format!("**{}**: {}", label, entry_id))
            || content.contains(&format!("{}**: [{}]", label, entry_id))
    }
}

/// Relationships of one entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RelationshipReport {
    /// Target entry identifier.
    pub entry_id: String,
    /// Outgoing edges of the entry itself. Not extracted yet.
    pub confirms: Vec<String>,
    pub contradicts: Vec<String>,
    pub extends: Vec<String>,
    /// Entries whose markers reference the target.
    pub confirmed_by: Vec<String>,
    pub contradicted_by: Vec<String>,
    pub extended_by: Vec<String>,
}

impl RelationshipReport {
    pub fn new(entry_id: impl Into<String>) -> Self {
        Self {
            entry_id: entry_id.into(),
            ..Default::default()
        }
    }

    /// Record an incoming edge of the given kind.
    pub fn add_incoming(&mut self, kind: RelationKind, from: String) {
        match kind {
            RelationKind::Confirms => self.confirmed_by.push(from),
            RelationKind::Contradicts => self.contradicted_by.push(from),
            RelationKind::Extends => self.extended_by.push(from),
        }
    }

    /// Non-empty groups in display order, keyed by their field name.
    pub fn groups(&self) -> Vec<(&'static str, &[String])> {
        [
            ("confirms", self.confirms.as_slice()),
            ("contradicts", self.contradicts.as_slice()),
            ("extends", self.extends.as_slice()),
            ("confirmed_by", self.confirmed_by.as_slice()),
            ("contradicted_by", self.contradicted_by.as_slice()),
            ("extended_by", self.extended_by.as_slice()),
        ]
        .into_iter()
        .filter(|(_, ids)| !ids.is_empty())
        .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.groups().is_empty()
    }
}
