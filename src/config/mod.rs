//! Configuration module for kbq.
//!
//! Handles loading and managing application settings.

mod settings;

pub use settings::{GeneralSettings, KnowledgeSettings, OutputSettings, Settings};
