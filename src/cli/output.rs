//! CLI output formatting utilities.

use crate::knowledge::Hit;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::io::{self, Write};

/// Output helper for CLI formatting.
pub struct Output;

impl Output {
    /// Print an info message.
    pub fn info(msg: &str) {
        let _ = Self::write_info(&mut io::stdout(), msg);
    }

    /// Print a warning message.
    pub fn warning(msg: &str) {
        eprintln!("{} {}", style(">>").yellow().bold(), msg);
    }

    /// Print a header.
    pub fn header(msg: &str) {
        let _ = Self::write_header(&mut io::stdout(), msg);
    }

    /// Print a key-value pair.
    pub fn kv(key: &str, value: &str) {
        println!("  {}: {}", style(key).dim(), value);
    }

    /// Print a list item.
    pub fn list_item(msg: &str) {
        let _ = Self::write_list_item(&mut io::stdout(), msg);
    }

    /// Write one numbered search result.
    pub fn write_hit(out: &mut impl Write, index: usize, hit: &Hit, preview_chars: usize) -> io::Result<()> {
        let doc = &hit.document;
        writeln!(out, "\n{}. {}", index, style(&doc.title).bold())?;
        writeln!(out, "   {}", style(doc.file_path.display()).dim())?;
        if !doc.summary.is_empty() {
            writeln!(out, "   Summary: {}", content_preview(&doc.summary, preview_chars))?;
        }
        if let Some(count) = hit.matching_claims {
            writeln!(out, "   Matching claims: {}", style(count).cyan())?;
        }
        if let Some(count) = hit.occurrences {
            writeln!(out, "   Occurrences: {}", style(count).cyan())?;
        }
        if !doc.metadata.speakers.is_empty() {
            writeln!(out, "   Speakers: {}", doc.metadata.speakers.join(", "))?;
        }
        if !doc.metadata.topics.is_empty() {
            writeln!(out, "   Topics: {}", doc.metadata.topics.join(", "))?;
        }
        Ok(())
    }

    /// Write a header.
    pub fn write_header(out: &mut impl Write, msg: &str) -> io::Result<()> {
        writeln!(out, "\n{}", style(msg).bold().underlined())
    }

    /// Write an info message.
    pub fn write_info(out: &mut impl Write, msg: &str) -> io::Result<()> {
        writeln!(out, "{} {}", style(">>").cyan().bold(), msg)
    }

    /// Write a success message.
    pub fn write_success(out: &mut impl Write, msg: &str) -> io::Result<()> {
        writeln!(out, "{} {}", style(">>").green().bold(), msg)
    }

    /// Write a list item.
    pub fn write_list_item(out: &mut impl Write, msg: &str) -> io::Result<()> {
        writeln!(out, "  {} {}", style("*").cyan(), msg)
    }

    /// Print a value as pretty JSON on stdout.
    pub fn json<T: Serialize>(value: &T) -> anyhow::Result<()> {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }

    /// Create a spinner.
    pub fn spinner(msg: &str) -> ProgressBar {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb
    }
}

/// Flatten newlines and truncate to `max_chars` characters with an ellipsis.
fn content_preview(content: &str, max_chars: usize) -> String {
    let content = content.replace('\n', " ");
    if content.chars().count() <= max_chars {
        content
    } else {
        let truncated: String = content.chars().take(max_chars).collect();
        format!("{}...", truncated)
    }
}
