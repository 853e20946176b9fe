//! Search command implementation.

use super::Render;
use crate::cli::Output;
use crate::knowledge::{ClaimType, Hit, KnowledgeSearcher};
use anyhow::{Context, Result};
use std::io::Write;

/// A document-returning query.
#[derive(Debug, Clone)]
pub enum SearchQuery {
    Topic(String),
    Speaker(String),
    DateRange { from: String, to: String },
    ClaimType(ClaimType),
    Text(String),
}

impl SearchQuery {
    fn heading(&self) -> String {
        match self {
            SearchQuery::Topic(topic) => format!("Results for topic: {}", topic),
            SearchQuery::Speaker(speaker) => format!("Results for speaker: {}", speaker),
            SearchQuery::DateRange { from, to } => format!("Results from {} to {}", from, to),
            SearchQuery::ClaimType(claim_type) => {
                format!("Results for claim type: {}", claim_type)
            }
            SearchQuery::Text(text) => format!("Results for query: {}", text),
        }
    }
}

/// Run the search command.
pub fn run_search(searcher: &KnowledgeSearcher, query: SearchQuery, render: Render) -> Result<()> {
    let spinner = (!render.json).then(|| Output::spinner("Scanning knowledge base..."));

    let mut suggestions = Vec::new();
    let outcome: crate::Result<Vec<Hit>> = match &query {
        SearchQuery::Topic(topic) => {
            let result = searcher.search_by_topic(topic);
            suggestions = result.suggestions;
            Ok(result.documents.into_iter().map(Hit::from).collect())
        }
        SearchQuery::Speaker(speaker) => Ok(searcher
            .search_by_speaker(speaker)
            .into_iter()
            .map(Hit::from)
            .collect()),
        SearchQuery::DateRange { from, to } => searcher
            .search_by_date_range(from, to)
            .map(|docs| docs.into_iter().map(Hit::from).collect()),
        SearchQuery::ClaimType(claim_type) => searcher.search_by_claim_type(*claim_type),
        SearchQuery::Text(text) => Ok(searcher.search_by_query(text)),
    };

    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }

    let hits = outcome.context("Search failed")?;

    tracing::info!("{} matched {} entries", query.heading(), hits.len());

    if render.json {
        return Output::json(&hits);
    }

    if let SearchQuery::Topic(topic) = &query {
        if !suggestions.is_empty() {
            Output::warning(&format!(
                "Topic '{}' not found. Did you mean: {}?",
                topic,
                suggestions.join(", ")
            ));
        }
    }

    write_results(&mut std::io::stdout().lock(), &query.heading(), &hits, render.preview_chars)?;

    Ok(())
}

/// Write the text listing of a search, including the empty-result line.
fn write_results(
    out: &mut impl Write,
    heading: &str,
    hits: &[Hit],
    preview_chars: usize,
) -> std::io::Result<()> {
    Output::write_header(out, heading)?;

    if hits.is_empty() {
        return Output::write_info(out, "No results found.");
    }

    Output::write_success(out, &format!("Found {} entries", hits.len()))?;
    for (i, hit) in hits.iter().enumerate() {
        Output::write_hit(out, i + 1, hit, preview_chars)?;
    }
    writeln!(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::knowledge::{Document, EntryMetadata};
    use std::path::PathBuf;

    fn render() -> Render {
        Render {
            json: true,
            preview_chars: 150,
        }
    }

    #[test]
    fn test_empty_results_go_to_result_stream() {
        let mut out = Vec::new();
        write_results(&mut out, "Results for query: nothing", &[], 150).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Results for query: nothing"));
        assert!(text.contains("No results found."));
    }

    #[test]
    fn test_results_listing() {
        let hit = Hit {
            occurrences: Some(2),
            ..Hit::from(Document {
                file_path: PathBuf::from("by-topic/housing/a.md"),
                title: "Outlook".to_string(),
                summary: "Prices flatten.".to_string(),
                metadata: EntryMetadata::default(),
            })
        };

        let mut out = Vec::new();
        write_results(&mut out, "Results", &[hit], 150).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Found 1 entries"));
        assert!(text.contains("Outlook"));
        assert!(text.contains("Summary: Prices flatten."));
        assert!(text.contains("Occurrences:"));
        assert!(!text.contains("No results found."));
    }

    #[test]
    fn test_bad_date_bound_is_single_error() {
        let dir = tempfile::tempdir().unwrap();
        let searcher = KnowledgeSearcher::new(dir.path());
        let query = SearchQuery::DateRange {
            from: "2025/09/01".to_string(),
            to: "2025-10-31".to_string(),
        };

        let err = run_search(&searcher, query, render()).unwrap_err();
        assert_eq!(err.to_string(), "Search failed");
        assert!(format!("{:#}", err).contains("Invalid date '2025/09/01'"));
    }
}
