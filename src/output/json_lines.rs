//! JSON Lines output
//!
//! One object per line: the item's own fields plus a `collected-at` RFC 3339
//! timestamp.

use crate::extract::Item;
use crate::output::{Output, OutputResult};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

#[derive(Serialize)]
struct Record<'a> {
    #[serde(flatten)]
    item: &'a Item,

    #[serde(rename = "collected-at")]
    collected_at: DateTime<Utc>,
}

/// Writes items as JSON Lines
pub struct JsonLinesOutput<W: Write = BufWriter<File>> {
    writer: W,
    written: u64,
}

impl JsonLinesOutput {
    /// Creates (or truncates) the file at `path`
    pub fn create(path: &Path) -> OutputResult<Self> {
        let file = File::create(path)?;
        tracing::debug!("Writing items to {}", path.display());
        Ok(Self::from_writer(BufWriter::new(file)))
    }
}

impl<W: Write> JsonLinesOutput<W> {
    pub fn from_writer(writer: W) -> Self {
        Self { writer, written: 0 }
    }

    /// Number of lines written so far
    pub fn written(&self) -> u64 {
        self.written
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Output for JsonLinesOutput<W> {
    fn add(&mut self, item: &Item) -> OutputResult<()> {
        let record = Record {
            item,
            collected_at: Utc::now(),
        };
        serde_json::to_writer(&mut self.writer, &record)?;
        self.writer.write_all(b"\n")?;
        self.written += 1;
        Ok(())
    }

    fn end(&mut self) -> OutputResult<()> {
        self.writer.flush()?;
        tracing::debug!("Wrote {} items", self.written);
        Ok(())
    }
}
