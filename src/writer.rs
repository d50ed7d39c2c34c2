//! Destination routing and change-only writes of generated files.

use anyhow::{Context, Result};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Generated files whose name starts with this go to the bindings area.
pub const BINDINGS_PREFIX: &str = "wrap";

/// Permanent destination directories of generated files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DestinationAreas {
    /// Declaration and implementation files.
    pub src: PathBuf,
    /// Python binding sources.
    pub bindings: PathBuf,
}

impl DestinationAreas {
    pub fn new(src: impl Into<PathBuf>, bindings: impl Into<PathBuf>) -> Self {
        Self {
            src: src.into(),
            bindings: bindings.into(),
        }
    }

    /// Directory a generated file named `output_name` belongs to.
    pub fn resolve(&self, output_name: &str) -> &Path {
        if output_name.starts_with(BINDINGS_PREFIX) {
            &self.bindings
        } else {
            &self.src
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteStatus {
    Unchanged,
    Wrote,
}

impl fmt::Display for WriteStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WriteStatus::Unchanged => f.write_str("unchanged"),
            WriteStatus::Wrote => f.write_str("wrote"),
        }
    }
}

/// Writes generated content, skipping files whose content is already current.
#[derive(Debug, Clone)]
pub struct OutputWriter {
    /// Suppresses per-file reports (validate mode).
    quiet: bool,
}

impl OutputWriter {
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }

    pub fn write(&self, path: &Path, content: &str) -> Result<WriteStatus> {
        let status = if path.exists() && read_text(path)? == content {
            WriteStatus::Unchanged
        } else {
            fs::write(path, content)
                .with_context(|| format!("failed to write generated file {}", path.display()))?;
            WriteStatus::Wrote
        };

        if !self.quiet {
            tracing::info!(path = %path.display(), "{}", status);
        }
        Ok(status)
    }
}

pub(crate) fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}
