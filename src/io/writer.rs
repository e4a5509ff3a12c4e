//! JSON report sink

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

use crate::common::errors::{Result, ScreenerError};
use crate::common::traits::ReportDeliverer;
use crate::common::types::Report;

/// Writes the report as a pretty-printed JSON array
#[derive(Debug, Clone)]
pub struct JsonReportWriter {
    path: PathBuf,
}

impl JsonReportWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn deliver_error(&self, reason: impl ToString) -> ScreenerError {
        ScreenerError::Deliver {
            path: self.path.clone(),
            reason: reason.to_string(),
        }
    }
}

impl ReportDeliverer for JsonReportWriter {
    #[instrument(skip(self, report), fields(path = %self.path.display(), selections = report.len()))]
    fn deliver(&self, report: &Report) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| self.deliver_error(e))?;
            }
        }

        let file = File::create(&self.path).map_err(|e| self.deliver_error(e))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, report).map_err(|e| self.deliver_error(e))?;
        writer.write_all(b"\n").map_err(|e| self.deliver_error(e))?;
        writer.flush().map_err(|e| self.deliver_error(e))?;

        info!("Finished writing output to {}", self.path.display());
        Ok(())
    }
}
