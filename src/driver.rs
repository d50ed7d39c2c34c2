//! Generate / validate orchestration.
//!
//! ```text
//! spec builders → render (spec × template) → writer ──────────────→ source tree
//!                                           └→ scratch dir → validator
//! ```
//!
//! Template errors are logged per artifact and never abort the pass. Drift is
//! reported once, after every generated file has been compared.

use crate::config::{GeneratorConfig, Mode};
use crate::spec::{SpecSet, all_spec_sets};
use crate::template::TemplateEnvironment;
use crate::validate::validate_generated_files;
use crate::writer::{DestinationAreas, OutputWriter, WriteStatus};
use anyhow::{Context, Result};
use std::env;
use std::path::Path;
use tempfile::TempDir;

const SCRATCH_PREFIX: &str = "gf-codegen-";

/// Outcome counts of one rendering pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub written: usize,
    pub unchanged: usize,
    /// Artifacts skipped because their template failed to render.
    pub failed: usize,
}

impl RunSummary {
    fn record(&mut self, status: WriteStatus) {
        match status {
            WriteStatus::Wrote => self.written += 1,
            WriteStatus::Unchanged => self.unchanged += 1,
        }
    }
}

/// Runs a full generate or validate pass over every family.
pub fn run(config: &GeneratorConfig) -> Result<RunSummary> {
    config.validate()?;
    let env = TemplateEnvironment::new(&config.template_dir);
    let spec_sets = all_spec_sets();

    tracing::info!(
        mode = %config.mode,
        templates = %config.template_dir.display(),
        "starting code generation"
    );

    let summary = match config.mode {
        Mode::Generate => render_templates(&spec_sets, &env, &config.areas, None)?,
        Mode::Validate => {
            let scratch = create_scratch(config.scratch_parent.as_deref())?;
            let result = render_templates(&spec_sets, &env, &config.areas, Some(scratch.path()))
                .and_then(|summary| {
                    validate_generated_files(scratch.path(), &config.areas).map(|()| summary)
                });

            let scratch_path = scratch.path().to_path_buf();
            if let Err(e) = scratch.close() {
                tracing::warn!(
                    scratch = %scratch_path.display(),
                    "failed to remove scratch directory: {}",
                    e
                );
            }
            result?
        }
    };

    tracing::info!(
        written = summary.written,
        unchanged = summary.unchanged,
        failed = summary.failed,
        "code generation finished"
    );
    Ok(summary)
}

fn create_scratch(parent: Option<&Path>) -> Result<TempDir> {
    let parent = parent.map(Path::to_path_buf).unwrap_or_else(env::temp_dir);
    tempfile::Builder::new()
        .prefix(SCRATCH_PREFIX)
        .tempdir_in(&parent)
        .with_context(|| format!("failed to create scratch directory in {}", parent.display()))
}

/// Renders every template of every spec set.
///
/// With a `scratch` directory all files land there, flat, and per-file
/// reports are suppressed; otherwise files are routed into `areas`.
pub fn render_templates(
    spec_sets: &[SpecSet],
    env: &TemplateEnvironment,
    areas: &DestinationAreas,
    scratch: Option<&Path>,
) -> Result<RunSummary> {
    let writer = OutputWriter::new(scratch.is_some());
    let mut summary = RunSummary::default();

    for set in spec_sets {
        let _span = tracing::info_span!("family", family = %set.family).entered();

        for spec in &set.specs {
            for pattern in &set.templates {
                let template = pattern.template_name();
                let output_name = pattern.output_name(spec.file_suffix());
                let target_dir = scratch.unwrap_or_else(|| areas.resolve(&output_name));
                let path = target_dir.join(&output_name);

                match env.render(&template, spec) {
                    Ok(content) => summary.record(writer.write(&path, &content)?),
                    Err(e) => {
                        tracing::error!(template = %e.template(), output = %output_name, "{}", e);
                        summary.failed += 1;
                    }
                }
            }
        }
    }

    Ok(summary)
}
