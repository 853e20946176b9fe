//! CLI command implementations.

mod config;
mod list;
mod relationships;
mod search;
mod stats;

pub use config::run_config;
pub use list::{run_list_speakers, run_list_topics};
pub use relationships::run_relationships;
pub use search::{run_search, SearchQuery};
pub use stats::run_stats;

use crate::cli::QueryMode;
use crate::config::Settings;
use crate::knowledge::KnowledgeSearcher;
use anyhow::Result;

/// Render options shared by all query commands.
#[derive(Debug, Clone, Copy)]
pub struct Render {
    pub json: bool,
    pub preview_chars: usize,
}

impl Render {
    pub fn new(json: bool, settings: &Settings) -> Self {
        Self {
            json,
            preview_chars: settings.output.summary_preview_chars,
        }
    }
}

/// Dispatch a query mode to its command.
pub fn run_query(searcher: &KnowledgeSearcher, mode: QueryMode, render: Render) -> Result<()> {
    match mode {
        QueryMode::Topic(topic) => run_search(searcher, SearchQuery::Topic(topic), render),
        QueryMode::Speaker(speaker) => run_search(searcher, SearchQuery::Speaker(speaker), render),
        QueryMode::DateRange { from, to } => {
            run_search(searcher, SearchQuery::DateRange { from, to }, render)
        }
        QueryMode::ClaimType(claim_type) => {
            run_search(searcher, SearchQuery::ClaimType(claim_type), render)
        }
        QueryMode::Query(text) => run_search(searcher, SearchQuery::Text(text), render),
        QueryMode::Relationships(entry_id) => run_relationships(searcher, &entry_id, render),
        QueryMode::ListTopics => run_list_topics(searcher, render),
        QueryMode::ListSpeakers => run_list_speakers(searcher, render),
        QueryMode::Stats => run_stats(searcher, render),
    }
}
