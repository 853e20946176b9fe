//! CLI module for kbq.

pub mod commands;
mod output;

pub use output::Output;

use crate::knowledge::ClaimType;
use clap::{ArgGroup, Parser, Subcommand};

/// kbq - query a markdown knowledge base
///
/// Searches topic folders of markdown entries by topic, speaker, date,
/// claim type, free text or relationship.
#[derive(Parser, Debug)]
#[command(name = "kbq")]
#[command(version, about, long_about = None)]
#[command(group(
    ArgGroup::new("mode")
        .args([
            "topic",
            "speaker",
            "date_from",
            "claim_type",
            "query",
            "relationships",
            "list_topics",
            "list_speakers",
            "stats",
        ])
        .multiple(false)
))]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Knowledge base root (overrides the configured root)
    #[arg(long, env = "KBQ_ROOT", global = true)]
    pub root: Option<String>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Search by topic (e.g., housing-market)
    #[arg(long)]
    pub topic: Option<String>,

    /// Search by speaker name
    #[arg(long)]
    pub speaker: Option<String>,

    /// Start date (YYYY-MM-DD)
    #[arg(long, requires = "date_to")]
    pub date_from: Option<String>,

    /// End date (YYYY-MM-DD)
    #[arg(long, requires = "date_from")]
    pub date_to: Option<String>,

    /// Search by claim type
    #[arg(long, value_enum)]
    pub claim_type: Option<ClaimType>,

    /// Full-text search query
    #[arg(short, long)]
    pub query: Option<String>,

    /// Find relationships for an entry ID
    #[arg(long, value_name = "ENTRY_ID")]
    pub relationships: Option<String>,

    /// List all available topics
    #[arg(long)]
    pub list_topics: bool,

    /// List all speakers
    #[arg(long)]
    pub list_speakers: bool,

    /// Show entry and profile counts
    #[arg(long)]
    pub stats: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,
}

/// The single query selected by the mode flags.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryMode {
    Topic(String),
    Speaker(String),
    DateRange { from: String, to: String },
    ClaimType(ClaimType),
    Query(String),
    Relationships(String),
    ListTopics,
    ListSpeakers,
    Stats,
}

impl Cli {
    /// The query requested on the command line, if any.
    pub fn mode(&self) -> Option<QueryMode> {
        if let Some(topic) = &self.topic {
            return Some(QueryMode::Topic(topic.clone()));
        }
        if let Some(speaker) = &self.speaker {
            return Some(QueryMode::Speaker(speaker.clone()));
        }
        if let (Some(from), Some(to)) = (&self.date_from, &self.date_to) {
            return Some(QueryMode::DateRange {
                from: from.clone(),
                to: to.clone(),
            });
        }
        if let Some(claim_type) = self.claim_type {
            return Some(QueryMode::ClaimType(claim_type));
        }
        if let Some(query) = &self.query {
            return Some(QueryMode::Query(query.clone()));
        }
        if let Some(entry_id) = &self.relationships {
            return Some(QueryMode::Relationships(entry_id.clone()));
        }
        if self.list_topics {
            return Some(QueryMode::ListTopics);
        }
        if self.list_speakers {
            return Some(QueryMode::ListSpeakers);
        }
        if self.stats {
            return Some(QueryMode::Stats);
        }
        None
    }
}
