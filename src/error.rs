//! Error taxonomy of the generator.
//!
//! - [`RenderError`]: per-template failures. Absorbed by the driver, which
//!   logs them and moves on to the next artifact.
//! - [`DriftError`]: generated output disagrees with the committed tree.
//!   Aggregated over every file before it is raised once.
//! - Filesystem failures are not classified; they propagate as
//!   `anyhow::Error` with context attached.

pub use crate::format::FormatError;
pub use crate::scalar::ScalarError;

use std::fmt;
use thiserror::Error;

/// Failure to render one template for one spec.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Syntax Error: {template}:{}: {message}", display_line(.line))]
    Syntax {
        template: String,
        line: Option<usize>,
        message: String,
    },

    #[error("Template Error in {template}: {message}")]
    Evaluation { template: String, message: String },
}

fn display_line(line: &Option<usize>) -> String {
    line.map(|l| l.to_string()).unwrap_or_else(|| "?".to_string())
}

impl RenderError {
    pub fn template(&self) -> &str {
        match self {
            RenderError::Syntax { template, .. } | RenderError::Evaluation { template, .. } => {
                template
            }
        }
    }

    pub fn is_syntax(&self) -> bool {
        matches!(self, RenderError::Syntax { .. })
    }
}

/// Aggregated drift between generated and committed files.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DriftError {
    /// Committed paths that have no counterpart on disk.
    pub missing: Vec<String>,
    /// Unified diffs, one per differing file.
    pub diffs: Vec<String>,
}

impl DriftError {
    pub fn is_empty(&self) -> bool {
        self.missing.is_empty() && self.diffs.is_empty()
    }
}

impl fmt::Display for DriftError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut sections = Vec::new();
        if !self.missing.is_empty() {
            sections.push(format!(
                "*** Missing Generated Files:\n{}",
                self.missing.join("\n")
            ));
        }
        if !self.diffs.is_empty() {
            sections.push(format!(
                "*** Differing Generated Files:\n{}",
                self.diffs.join("\n\n")
            ));
        }
        write!(f, "\n{}", sections.join("\n"))
    }
}

impl std::error::Error for DriftError {}
