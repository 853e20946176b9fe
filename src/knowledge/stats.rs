//! Knowledge base inventory: entry counts per topic plus the
//! by-speaker and relationships folders.

use super::searcher::markdown_files;
use super::KnowledgeSearcher;
use serde::Serialize;
use std::collections::BTreeMap;

/// Counts describing a knowledge base.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct KnowledgeStats {
    /// Entries per topic, index files excluded.
    pub topics: BTreeMap<String, usize>,
    /// Markdown profiles under by-speaker/.
    pub speaker_profiles: usize,
    /// Markdown notes under relationships/.
    pub relationship_notes: usize,
}

impl KnowledgeStats {
    pub fn total_entries(&self) -> usize {
        self.topics.values().sum()
    }
}

impl KnowledgeSearcher {
    /// Count entries and profiles without parsing any file.
    pub fn stats(&self) -> KnowledgeStats {
        let topics = self
            .topic_dirs()
            .into_iter()
            .filter_map(|dir| {
                let name = dir.file_name()?.to_str()?.to_string();
                Some((name, self.entry_files(&dir).len()))
            })
            .collect();

        KnowledgeStats {
            topics,
            speaker_profiles: markdown_files(&self.by_speaker_dir()).len(),
            relationship_notes: markdown_files(&self.relationships_dir()).len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_stats_counts() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("by-topic/housing")).unwrap();
        fs::create_dir_all(root.join("by-topic/rates")).unwrap();
        fs::create_dir_all(root.join("by-speaker")).unwrap();
        fs::write(root.join("by-topic/housing/a.md"), "# A").unwrap();
        fs::write(root.join("by-topic/housing/b.md"), "# B").unwrap();
        fs::write(root.join("by-topic/housing/index.md"), "# Index").unwrap();
        fs::write(root.join("by-topic/rates/c.txt"), "not an entry").unwrap();
        fs::write(root.join("by-speaker/dave-meyer.md"), "# Dave").unwrap();

        let stats = KnowledgeSearcher::new(root).stats();
        assert_eq!(stats.topics["housing"], 2);
        assert_eq!(stats.topics["rates"], 0);
        assert_eq!(stats.total_entries(), 2);
        assert_eq!(stats.speaker_profiles, 1);
        assert_eq!(stats.relationship_notes, 0);
    }

    #[test]
    fn test_stats_missing_root() {
        let dir = tempfile::tempdir().unwrap();
        let stats = KnowledgeSearcher::new(dir.path().join("missing")).stats();
        assert_eq!(stats, KnowledgeStats::default());
    }
}
