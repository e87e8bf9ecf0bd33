pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::adapters::WebDriverBrowser;
pub use crate::config::TomlConfig;
pub use crate::core::{bot::ScientistBot, extractor::PersonExtractor, writer::OutputWriter};
pub use crate::domain::model::{OutputFormat, PersonResult, RunOptions};
pub use crate::utils::error::{Result, ScraperError};
