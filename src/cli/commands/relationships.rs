//! Relationships command implementation.

use super::Render;
use crate::cli::Output;
use crate::knowledge::{KnowledgeSearcher, RelationshipReport};
use anyhow::Result;
use std::io::Write;

/// Run the relationships command.
pub fn run_relationships(searcher: &KnowledgeSearcher, entry_id: &str, render: Render) -> Result<()> {
    let report = searcher.find_relationships(entry_id);
    if render.json {
        return Output::json(&report);
    }

    write_report(&mut std::io::stdout().lock(), &report)?;
    Ok(())
}

fn write_report(out: &mut impl Write, report: &RelationshipReport) -> std::io::Result<()> {
    Output::write_header(out, &format!("Relationships for: {}", report.entry_id))?;

    if report.is_empty() {
        return Output::write_info(out, "No results found.");
    }

    for (group, ids) in report.groups() {
        writeln!(out, "\n{}:", group.replace('_', " ").to_uppercase())?;
        for id in ids {
            Output::write_list_item(out, id)?;
        }
    }

    Ok(())
}
