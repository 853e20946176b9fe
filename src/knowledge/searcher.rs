//! Query engine over the by-topic tree.

use super::parser::load_entry;
use super::{
    ClaimType, Document, Hit, RelationKind, RelationshipReport, BY_SPEAKER_DIR, BY_TOPIC_DIR,
    ENTRY_EXTENSION, RELATIONSHIPS_DIR,
};
use crate::config::Settings;
use crate::error::{KbError, Result};
use chrono::NaiveDate;
use regex::{Regex, RegexBuilder};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

static DATED_FILE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]{4})-([0-9]{2})-").expect("Invalid regex"));

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Outcome of a topic lookup.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TopicResult {
    pub documents: Vec<Document>,
    /// Topics containing the query, filled only when no exact match exists.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
}

/// An entry as read during a scan.
struct ScannedEntry {
    document: Document,
    content: String,
}

/// Searches a knowledge base directory.
///
/// Every call rescans the files it needs; nothing is cached between calls.
#[derive(Debug, Clone)]
pub struct KnowledgeSearcher {
    root: PathBuf,
    by_topic_dir: PathBuf,
    index_file: String,
}

impl KnowledgeSearcher {
    /// Create a searcher rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            by_topic_dir: root.join(BY_TOPIC_DIR),
            root,
            index_file: "index.md".to_string(),
        }
    }

    /// Create a searcher from settings, optionally overriding the root.
    pub fn from_settings(settings: &Settings, root: Option<PathBuf>) -> Self {
        let root = root.unwrap_or_else(|| settings.knowledge_root());
        Self::new(root).with_index_file(&settings.knowledge.index_file)
    }

    /// Set the per-topic index file name that is never an entry.
    pub fn with_index_file(mut self, name: &str) -> Self {
        self.index_file = name.to_string();
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn by_speaker_dir(&self) -> PathBuf {
        self.root.join(BY_SPEAKER_DIR)
    }

    pub fn relationships_dir(&self) -> PathBuf {
        self.root.join(RELATIONSHIPS_DIR)
    }

    /// Entries of one topic directory, by exact name.
    ///
    /// A missing topic yields no documents plus the names of topics that
    /// contain the query, compared case-insensitively.
    pub fn search_by_topic(&self, topic: &str) -> TopicResult {
        let topic_dir = self.by_topic_dir.join(topic);

        if topic.is_empty() || !topic_dir.is_dir() {
            let needle = topic.to_lowercase();
            let suggestions = self
                .list_topics()
                .into_iter()
                .filter(|t| t.to_lowercase().contains(&needle))
                .collect();
            return TopicResult {
                documents: Vec::new(),
                suggestions,
            };
        }

        let documents = self
            .entry_files(&topic_dir)
            .iter()
            .filter_map(|path| self.read_entry(path))
            .map(|entry| entry.document)
            .collect();

        TopicResult {
            documents,
            suggestions: Vec::new(),
        }
    }

    /// Entries with a speaker containing `speaker`, case-insensitively.
    pub fn search_by_speaker(&self, speaker: &str) -> Vec<Document> {
        let needle = speaker.to_lowercase();
        self.scan()
            .into_iter()
            .map(|entry| entry.document)
            .filter(|doc| {
                doc.metadata
                    .speakers
                    .iter()
                    .any(|s| s.to_lowercase().contains(&needle))
            })
            .collect()
    }

    /// Entries whose file name month falls within `[date_from, date_to]`.
    ///
    /// Bounds are `YYYY-MM-DD`. Entry dates come from a `YYYY-MM-` file name
    /// prefix and are taken as the 1st of that month; undated files never
    /// match.
    pub fn search_by_date_range(&self, date_from: &str, date_to: &str) -> Result<Vec<Document>> {
        let from = parse_bound(date_from)?;
        let to = parse_bound(date_to)?;

        Ok(self
            .scan()
            .into_iter()
            .map(|entry| entry.document)
            .filter(|doc| {
                entry_month(&doc.file_path).is_some_and(|date| from <= date && date <= to)
            })
            .collect())
    }

    /// Entries containing `**[TYPE]**` markers, with the marker count.
    pub fn search_by_claim_type(&self, claim_type: ClaimType) -> Result<Vec<Hit>> {
        let pattern = RegexBuilder::new(&regex::escape(&claim_type.marker()))
            .case_insensitive(true)
            .build()?;

        Ok(self
            .scan()
            .into_iter()
            .filter_map(|entry| {
                let count = pattern.find_iter(&entry.content).count();
                (count > 0).then(|| Hit {
                    matching_claims: Some(count),
                    ..Hit::from(entry.document)
                })
            })
            .collect())
    }

    /// Entries whose text contains `query`, case-insensitively, with the
    /// number of non-overlapping occurrences.
    pub fn search_by_query(&self, query: &str) -> Vec<Hit> {
        let needle = query.to_lowercase();
        self.scan()
            .into_iter()
            .filter_map(|entry| {
                let count = entry.content.to_lowercase().matches(needle.as_str()).count();
                (count > 0).then(|| Hit {
                    occurrences: Some(count),
                    ..Hit::from(entry.document)
                })
            })
            .collect()
    }

    /// Entries that confirm, contradict or extend `entry_id`.
    ///
    /// The entry's own outgoing relationships are not extracted; those
    /// fields of the report stay empty.
    pub fn find_relationships(&self, entry_id: &str) -> RelationshipReport {
        let mut report = RelationshipReport::new(entry_id);

        for entry in self.scan() {
            if entry.document.metadata.entry_id.as_deref() == Some(entry_id) {
                tracing::debug!("Found entry {} at {:?}", entry_id, entry.document.file_path);
                continue;
            }
            if !entry.content.contains(entry_id) {
                continue;
            }
            for kind in RelationKind::ALL {
                if kind.is_marked_in(&entry.content, entry_id) {
                    report.add_incoming(kind, entry.document.reference());
                }
            }
        }

        report
    }

    /// Topic directory names, sorted.
    pub fn list_topics(&self) -> Vec<String> {
        self.topic_dirs()
            .iter()
            .filter_map(|dir| dir.file_name().and_then(|n| n.to_str()).map(String::from))
            .collect()
    }

    /// Every speaker across all entries, deduplicated and sorted.
    pub fn list_speakers(&self) -> Vec<String> {
        let speakers: std::collections::BTreeSet<String> = self
            .scan()
            .into_iter()
            .flat_map(|entry| entry.document.metadata.speakers)
            .collect();
        speakers.into_iter().collect()
    }

    /// Topic directories, sorted by name. Empty when by-topic is missing.
    pub(super) fn topic_dirs(&self) -> Vec<PathBuf> {
        let mut dirs: Vec<PathBuf> = match std::fs::read_dir(&self.by_topic_dir) {
            Ok(entries) => entries
                .filter_map(|e| e.ok())
                .map(|e| e.path())
                .filter(|p| p.is_dir())
                .collect(),
            Err(e) => {
                tracing::debug!("No topic directory at {:?}: {}", self.by_topic_dir, e);
                Vec::new()
            }
        };
        dirs.sort();
        dirs
    }

    /// Entry files directly inside `dir`, excluding the index file.
    pub(super) fn entry_files(&self, dir: &Path) -> Vec<PathBuf> {
        let mut files: Vec<PathBuf> = markdown_files(dir)
            .into_iter()
            .filter(|p| p.file_name().and_then(|n| n.to_str()) != Some(self.index_file.as_str()))
            .collect();
        files.sort();
        files
    }

    /// Read every entry of every topic, skipping unreadable or malformed ones.
    fn scan(&self) -> Vec<ScannedEntry> {
        let mut entries = Vec::new();
        for topic_dir in self.topic_dirs() {
            tracing::debug!("Scanning topic {:?}", topic_dir);
            for path in self.entry_files(&topic_dir) {
                if let Some(entry) = self.read_entry(&path) {
                    entries.push(entry);
                }
            }
        }
        entries
    }

    fn read_entry(&self, path: &Path) -> Option<ScannedEntry> {
        match load_entry(path) {
            Ok((document, content)) => Some(ScannedEntry { document, content }),
            Err(e) => {
                tracing::warn!("Skipping {:?}: {}", path, e);
                None
            }
        }
    }
}

/// `*.md` files directly inside `dir`, unsorted. Empty when `dir` is unreadable.
pub(super) fn markdown_files(dir: &Path) -> Vec<PathBuf> {
    match std::fs::read_dir(dir) {
        Ok(entries) => entries
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| p.is_file())
            .filter(|p| p.extension().and_then(|ext| ext.to_str()) == Some(ENTRY_EXTENSION))
            .collect(),
        Err(_) => Vec::new(),
    }
}

fn parse_bound(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|e| {
        KbError::InvalidInput(format!("Invalid date '{}', expected YYYY-MM-DD: {}", raw, e))
    })
}

/// Year-month from a `YYYY-MM-` file name prefix, on day 1.
fn entry_month(path: &Path) -> Option<NaiveDate> {
    let name = path.file_name()?.to_str()?;
    let caps = DATED_FILE_REGEX.captures(name)?;
    let year = caps[1].parse().ok()?;
    let month = caps[2].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn entry(title: &str, entry_id: &str, speakers: &[&str], body: &str) -> String {
        let speakers = speakers
            .iter()
            .map(|s| format!("\"{}\"", s))
            .collect::<Vec<_>>()
            .join(", ");
        format!(
            "# {title}\n\n## Executive Summary\nSummary of {title}.\n\n{body}\n\n```json\n{{\"entry_id\": \"{entry_id}\", \"speakers\": [{speakers}], \"topics\": []}}\n```\n"
        )
    }

    fn fixture() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();

        write(
            root,
            "by-topic/housing-market/2025-09-15-foo.md",
            &entry(
                "Foo",
                "E123",
                &["Dave Meyer"],
                "**[PREDICTION]** Prices dip.\n**[prediction]** Rates fall.\nA Market Correction is near; market correction soon.",
            ),
        );
        write(
            root,
            "by-topic/housing-market/2025-10-01-bar.md",
            &entry("Bar", "E200", &["Henry Washington"], "**Confirms**: E123\n**[DATA]** 4% rates."),
        );
        write(root, "by-topic/housing-market/index.md", "# Index\n**Confirms**: E123\n");
        write(
            root,
            "by-topic/interest-rates/2025-08-31-baz.md",
            &entry("Baz", "E300", &["dave meyer", "Kathy Fettke"], "**Contradicts**: E123"),
        );
        write(
            root,
            "by-topic/interest-rates/2025-11-01-qux.md",
            &entry("Qux", "E400", &["Kathy Fettke"], "Extends**: [E123]"),
        );
        write(root, "by-topic/interest-rates/undated.md", &entry("Undated", "E500", &[], ""));
        write(root, "by-topic/interest-rates/notes.txt", "**[PREDICTION]**");
        write(
            root,
            "by-topic/interest-rates/2025-09-02-broken.md",
            "# Broken\n**[PREDICTION]**\n```json\n{\"entry_id\": }\n```\n",
        );
        fs::create_dir_all(root.join("by-topic/empty-topic")).unwrap();

        dir
    }

    fn titles(docs: &[Document]) -> Vec<&str> {
        docs.iter().map(|d| d.title.as_str()).collect()
    }

    #[test]
    fn test_search_by_topic() {
        let dir = fixture();
        let searcher = KnowledgeSearcher::new(dir.path());

        let result = searcher.search_by_topic("housing-market");
        assert_eq!(titles(&result.documents), vec!["Foo", "Bar"]);
        assert!(result.suggestions.is_empty());
    }

    #[test]
    fn test_search_by_topic_miss_suggests() {
        let dir = fixture();
        let searcher = KnowledgeSearcher::new(dir.path());

        let result = searcher.search_by_topic("MARKET");
        assert!(result.documents.is_empty());
        assert_eq!(result.suggestions, vec!["housing-market"]);

        let result = searcher.search_by_topic("crypto");
        assert!(result.documents.is_empty());
        assert!(result.suggestions.is_empty());
    }

    #[test]
    fn test_search_by_speaker_ignores_case() {
        let dir = fixture();
        let searcher = KnowledgeSearcher::new(dir.path());

        let lower = searcher.search_by_speaker("dave");
        let upper = searcher.search_by_speaker("DAVE");
        assert_eq!(lower, upper);
        assert_eq!(titles(&lower), vec!["Foo", "Baz"]);
    }

    #[test]
    fn test_search_by_date_range() {
        let dir = fixture();
        let searcher = KnowledgeSearcher::new(dir.path());

        let docs = searcher.search_by_date_range("2025-09-01", "2025-10-31").unwrap();
        assert_eq!(titles(&docs), vec!["Foo", "Bar"]);
    }

    #[test]
    fn test_date_range_uses_first_of_month() {
        let dir = fixture();
        let searcher = KnowledgeSearcher::new(dir.path());

        // 2025-09-15-foo.md is dated 2025-09-01, before the lower bound.
        let docs = searcher.search_by_date_range("2025-09-15", "2025-10-31").unwrap();
        assert_eq!(titles(&docs), vec!["Bar"]);
    }

    #[test]
    fn test_date_range_rejects_bad_bounds() {
        let dir = fixture();
        let searcher = KnowledgeSearcher::new(dir.path());

        let err = searcher.search_by_date_range("2025/09/01", "2025-10-31").unwrap_err();
        assert!(matches!(err, KbError::InvalidInput(_)));
        assert!(searcher.search_by_date_range("2025-09-01", "soon").is_err());
    }

    #[test]
    fn test_search_by_claim_type_counts_markers() {
        let dir = fixture();
        let searcher = KnowledgeSearcher::new(dir.path());

        let hits = searcher.search_by_claim_type(ClaimType::Prediction).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].document.title, "Foo");
        assert_eq!(hits[0].matching_claims, Some(2));
        assert_eq!(hits[0].occurrences, None);

        assert!(searcher.search_by_claim_type(ClaimType::Opinion).unwrap().is_empty());
    }

    #[test]
    fn test_search_by_query_counts_occurrences() {
        let dir = fixture();
        let searcher = KnowledgeSearcher::new(dir.path());

        let hits = searcher.search_by_query("market correction");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].occurrences, Some(2));
        assert_eq!(hits[0].matching_claims, None);
    }

    #[test]
    fn test_find_relationships() {
        let dir = fixture();
        let searcher = KnowledgeSearcher::new(dir.path());

        let report = searcher.find_relationships("E123");
        assert_eq!(report.confirmed_by, vec!["E200"]);
        assert_eq!(report.contradicted_by, vec!["E300"]);
        assert_eq!(report.extended_by, vec!["E400"]);
        assert!(report.confirms.is_empty());
        assert!(report.contradicts.is_empty());
        assert!(report.extends.is_empty());
    }

    #[test]
    fn test_list_topics_and_speakers() {
        let dir = fixture();
        let searcher = KnowledgeSearcher::new(dir.path());

        assert_eq!(
            searcher.list_topics(),
            vec!["empty-topic", "housing-market", "interest-rates"]
        );
        assert_eq!(
            searcher.list_speakers(),
            vec!["Dave Meyer", "Henry Washington", "Kathy Fettke", "dave meyer"]
        );
    }

    #[test]
    fn test_missing_root_yields_empty_results() {
        let dir = tempfile::tempdir().unwrap();
        let searcher = KnowledgeSearcher::new(dir.path().join("nowhere"));

        assert_eq!(searcher.search_by_topic("anything"), TopicResult::default());
        assert!(searcher.search_by_speaker("dave").is_empty());
        assert!(searcher.search_by_date_range("2025-01-01", "2025-12-31").unwrap().is_empty());
        assert!(searcher.search_by_claim_type(ClaimType::Data).unwrap().is_empty());
        assert!(searcher.search_by_query("x").is_empty());
        assert!(searcher.find_relationships("E1").is_empty());
        assert!(searcher.list_topics().is_empty());
        assert!(searcher.list_speakers().is_empty());
    }

    #[test]
    fn test_custom_index_file() {
        let dir = fixture();
        let searcher = KnowledgeSearcher::new(dir.path()).with_index_file("2025-09-15-foo.md");

        let result = searcher.search_by_topic("housing-market");
        assert_eq!(titles(&result.documents), vec!["Bar", "Index"]);
    }

    #[test]
    fn test_entries_with_unexpected_metadata_types_still_match() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        write(
            root,
            "by-topic/housing/a.md",
            "# A\nA market correction.\n```json\n{\"entry_id\": 42, \"speakers\": [\"Dave\"]}\n```\n",
        );
        write(
            root,
            "by-topic/housing/b.md",
            "# B\nAnother market correction.\n```json\n{\"entry_id\": \"E2\", \"speakers\": null}\n```\n",
        );
        let searcher = KnowledgeSearcher::new(root);

        assert_eq!(titles(&searcher.search_by_topic("housing").documents), vec!["A", "B"]);
        assert_eq!(searcher.search_by_query("market correction").len(), 2);
        assert_eq!(titles(&searcher.search_by_speaker("dave")), vec!["A"]);
    }

    #[test]
    fn test_entry_month() {
        assert_eq!(
            entry_month(Path::new("a/2025-09-15-foo.md")),
            NaiveDate::from_ymd_opt(2025, 9, 1)
        );
        assert_eq!(entry_month(Path::new("2025-13-01-x.md")), None);
        assert_eq!(entry_month(Path::new("notes-2025-09-x.md")), None);
    }
}
