//! List command implementations.

use super::Render;
use crate::cli::Output;
use crate::knowledge::KnowledgeSearcher;
use anyhow::Result;

/// Run the list-topics command.
pub fn run_list_topics(searcher: &KnowledgeSearcher, render: Render) -> Result<()> {
    let topics = searcher.list_topics();
    if render.json {
        return Output::json(&topics);
    }

    if topics.is_empty() {
        Output::info(&format!("No topics found under {}", searcher.root().display()));
        return Ok(());
    }

    Output::header(&format!("Available topics ({})", topics.len()));
    for topic in &topics {
        Output::list_item(topic);
    }

    Ok(())
}

/// Run the list-speakers command.
pub fn run_list_speakers(searcher: &KnowledgeSearcher, render: Render) -> Result<()> {
    let spinner = (!render.json).then(|| Output::spinner("Collecting speakers..."));
    let speakers = searcher.list_speakers();
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }

    if render.json {
        return Output::json(&speakers);
    }

    if speakers.is_empty() {
        Output::info("No speakers found.");
        return Ok(());
    }

    Output::header(&format!("Known speakers ({})", speakers.len()));
    for speaker in &speakers {
        Output::list_item(speaker);
    }

    Ok(())
}
