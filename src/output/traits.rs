//! Output handler trait and errors

use crate::extract::Item;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize item: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Trait for output handlers
///
/// The runner calls [`Output::start`] once, [`Output::add`] for every
/// extracted item, and [`Output::end`] once, including after a failed run.
pub trait Output {
    /// Prepares the output before the first item
    fn start(&mut self) -> OutputResult<()> {
        Ok(())
    }

    /// Records one extracted item
    fn add(&mut self, item: &Item) -> OutputResult<()>;

    /// Flushes and closes the output
    fn end(&mut self) -> OutputResult<()> {
        Ok(())
    }
}

impl<O: Output + ?Sized> Output for &mut O {
    fn start(&mut self) -> OutputResult<()> {
        (**self).start()
    }

    fn add(&mut self, item: &Item) -> OutputResult<()> {
        (**self).add(item)
    }

    fn end(&mut self) -> OutputResult<()> {
        (**self).end()
    }
}
