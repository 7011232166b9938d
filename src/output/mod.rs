//! Output module for extracted items
//!
//! This module handles:
//! - The output handler trait used by the runner
//! - Logging items as they are extracted
//! - Writing items to a JSON Lines file

mod json_lines;
mod log;
mod traits;

pub use json_lines::JsonLinesOutput;
pub use log::LogOutput;
pub use traits::{Output, OutputError, OutputResult};

use crate::config::{OutputConfig, OutputKind};
use crate::extract::Item;
use std::path::Path;

/// The output selected by the `[output]` config section
pub enum ConfiguredOutput {
    Log(LogOutput),
    JsonLines(JsonLinesOutput),
}

impl ConfiguredOutput {
    /// Opens the configured output
    ///
    /// # Returns
    ///
    /// * `Ok(ConfiguredOutput)` - Ready to receive items
    /// * `Err(OutputError)` - The destination file could not be created
    pub fn from_config(config: &OutputConfig) -> OutputResult<Self> {
        match (config.kind, config.path.as_deref()) {
            (OutputKind::JsonLines, Some(path)) => {
                Ok(Self::JsonLines(JsonLinesOutput::create(Path::new(path))?))
            }
            (OutputKind::JsonLines, None) => Err(OutputError::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "json-lines output requires a path",
            ))),
            (OutputKind::Log, _) => Ok(Self::Log(LogOutput::new())),
        }
    }
}

impl Output for ConfiguredOutput {
    fn start(&mut self) -> OutputResult<()> {
        match self {
            Self::Log(output) => output.start(),
            Self::JsonLines(output) => output.start(),
        }
    }

    fn add(&mut self, item: &Item) -> OutputResult<()> {
        match self {
            Self::Log(output) => output.add(item),
            Self::JsonLines(output) => output.add(item),
        }
    }

    fn end(&mut self) -> OutputResult<()> {
        match self {
            Self::Log(output) => output.end(),
            Self::JsonLines(output) => output.end(),
        }
    }
}
