//! Stats command implementation.

use super::Render;
use crate::cli::Output;
use crate::knowledge::KnowledgeSearcher;
use anyhow::Result;

/// Run the stats command.
pub fn run_stats(searcher: &KnowledgeSearcher, render: Render) -> Result<()> {
    let stats = searcher.stats();
    if render.json {
        return Output::json(&stats);
    }

    Output::header(&format!("Knowledge base at {}", searcher.root().display()));
    for (topic, count) in &stats.topics {
        Output::kv(topic, &format!("{} entries", count));
    }

    println!();
    Output::kv("Topics", &stats.topics.len().to_string());
    Output::kv("Total entries", &stats.total_entries().to_string());
    Output::kv("Speaker profiles", &stats.speaker_profiles.to_string());
    Output::kv("Relationship notes", &stats.relationship_notes.to_string());

    Ok(())
}
