//! Aggregate report for a finished batch.

use crate::pipeline::outcome::UploadResult;
use serde::Serialize;
use std::fmt;

const RULE_WIDTH: usize = 80;

/// Every result of a batch, in request order.
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    /// Prompt the variations were derived from.
    pub base_prompt: String,
    /// One entry per request.
    pub results: Vec<UploadResult>,
}

impl BatchReport {
    /// Creates a report from already-ordered results.
    pub fn new(base_prompt: impl Into<String>, results: Vec<UploadResult>) -> Self {
        Self {
            base_prompt: base_prompt.into(),
            results,
        }
    }

    /// Successful results, in request order.
    pub fn successes(&self) -> impl Iterator<Item = &UploadResult> {
        self.results.iter().filter(|r| r.is_success())
    }

    /// Failed results, in request order.
    pub fn failures(&self) -> impl Iterator<Item = &UploadResult> {
        self.results.iter().filter(|r| !r.is_success())
    }

    /// Number of successful results.
    pub fn success_count(&self) -> usize {
        self.successes().count()
    }

    /// Number of requests issued.
    pub fn total(&self) -> usize {
        self.results.len()
    }
}

impl fmt::Display for BatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "=".repeat(RULE_WIDTH);
        writeln!(f, "{rule}")?;
        writeln!(f, "SUMMARY OF GENERATED IMAGES")?;
        writeln!(f, "{rule}")?;
        writeln!(f)?;
        writeln!(
            f,
            "Successfully generated and uploaded: {}/{} images",
            self.success_count(),
            self.total()
        )?;

        if self.success_count() > 0 {
            writeln!(f)?;
            writeln!(f, "Access your images at:")?;
            for result in self.successes() {
                if let UploadResult::Uploaded {
                    sequence,
                    cid,
                    gateway_url,
                } = result
                {
                    writeln!(f)?;
                    writeln!(f, "{sequence}. CID: {cid}")?;
                    writeln!(f, "   URL: {gateway_url}")?;
                }
            }
        }

        let failed = self.total() - self.success_count();
        if failed > 0 {
            writeln!(f)?;
            writeln!(f, "Failed uploads: {failed}")?;
            for result in self.failures() {
                if let UploadResult::Failed {
                    sequence, error, ..
                } = result
                {
                    writeln!(f, "   Image {sequence}: {error}")?;
                }
            }
        }

        writeln!(f)?;
        write!(f, "{rule}")
    }
}
