//! Entry parsing: title, metadata block and executive summary.

use super::{Document, EntryMetadata};
use crate::error::{KbError, Result};
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

static TITLE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^# (.+)$").expect("Invalid regex"));

static METADATA_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```json\s*(\{.*?\})\s*```").expect("Invalid regex"));

const SUMMARY_HEADING: &str = "## Executive Summary";

/// Read and parse an entry file. Returns the document and the raw text.
pub fn load_entry(path: &Path) -> Result<(Document, String)> {
    let content = std::fs::read_to_string(path)?;
    let document = parse_entry(path, &content)?;
    Ok((document, content))
}

/// Parse an entry from its text. Fails only on a malformed metadata block.
pub fn parse_entry(path: &Path, content: &str) -> Result<Document> {
    let metadata = extract_metadata(content).map_err(|e| KbError::MalformedEntry {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;

    let title = extract_title(content).unwrap_or_else(|| {
        path.file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("Untitled")
            .to_string()
    });

    Ok(Document {
        file_path: path.to_path_buf(),
        title,
        summary: extract_summary(content),
        metadata,
    })
}

/// First `# ` heading line.
pub fn extract_title(content: &str) -> Option<String> {
    TITLE_REGEX
        .captures(content)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Metadata from the first ```` ```json ```` block holding an object.
///
/// No block means empty metadata. Only invalid JSON is an error.
pub fn extract_metadata(content: &str) -> Result<EntryMetadata> {
    match METADATA_REGEX.captures(content).and_then(|caps| caps.get(1)) {
        Some(block) => {
            let map: serde_json::Map<String, serde_json::Value> =
                serde_json::from_str(block.as_str())?;
            Ok(EntryMetadata::from_map(map))
        }
        None => Ok(EntryMetadata::default()),
    }
}

/// Text under `## Executive Summary` up to the next `##` heading or bold
/// marker line, trimmed.
pub fn extract_summary(content: &str) -> String {
    for (start, _) in content.match_indices(SUMMARY_HEADING) {
        let after = &content[start + SUMMARY_HEADING.len()..];
        let body_offset = after.len() - after.trim_start().len();

        // The heading must end its line; the body starts on the first
        // non-blank line.
        if !after[..body_offset].contains('\n') {
            continue;
        }

        let body = &after[body_offset..];
        if body.is_empty() {
            return String::new();
        }

        let end = summary_end(body);
        return body[..end].trim().to_string();
    }

    String::new()
}

/// End of the summary body: the first position after at least one char
/// where a `\n##` or `\n**` begins, or the end of text (ignoring one
/// trailing newline).
fn summary_end(body: &str) -> usize {
    for (idx, _) in body.char_indices().skip(1) {
        let rest = &body[idx..];
        if rest.starts_with("\n##") || rest.starts_with("\n**") || rest == "\n" {
            return idx;
        }
    }
    body.len()
}
