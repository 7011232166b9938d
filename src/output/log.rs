use crate::extract::Item;
use crate::output::{Output, OutputResult};

/// Logs every item at info level
#[derive(Debug, Default)]
pub struct LogOutput {
    items: u64,
}

impl LogOutput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of items logged so far
    pub fn items(&self) -> u64 {
        self.items
    }
}

impl Output for LogOutput {
    fn add(&mut self, item: &Item) -> OutputResult<()> {
        self.items += 1;
        tracing::info!("{:?}", item);
        Ok(())
    }

    fn end(&mut self) -> OutputResult<()> {
        tracing::debug!("Logged {} items", self.items);
        Ok(())
    }
}
