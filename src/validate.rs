//! Drift detection between a fresh render and the committed tree.
//!
//! The scratch directory holds one flat render of every artifact. Each file
//! is matched to its committed counterpart with the same routing rule the
//! writer uses; all mismatches are collected before a single
//! [`DriftError`] is returned.

use crate::error::DriftError;
use crate::writer::{DestinationAreas, read_text};
use anyhow::{Context, Result};
use similar::TextDiff;
use std::path::Path;
use walkdir::WalkDir;

/// Number of context lines around each diff hunk.
const DIFF_CONTEXT: usize = 3;

/// Compares every file in `scratch` against `areas`.
///
/// Returns the collected drift, which is empty when everything matches.
pub fn find_drift(scratch: &Path, areas: &DestinationAreas) -> Result<DriftError> {
    let mut drift = DriftError::default();

    let entries = WalkDir::new(scratch)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name();
    for entry in entries {
        let entry = entry.with_context(|| format!("failed to scan {}", scratch.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }

        let name = entry.file_name().to_string_lossy();
        let committed = areas.resolve(&name).join(&*name);
        if !committed.exists() {
            drift.missing.push(committed.display().to_string());
            continue;
        }

        let source = read_text(&committed)?;
        let generated = read_text(entry.path())?;
        if source != generated {
            drift.diffs.push(unified_diff(&source, &generated, &committed, entry.path()));
        }
    }

    Ok(drift)
}

/// Fails with the aggregated report when the committed tree has drifted.
pub fn validate_generated_files(scratch: &Path, areas: &DestinationAreas) -> Result<()> {
    let drift = find_drift(scratch, areas)?;
    if drift.is_empty() {
        tracing::info!(scratch = %scratch.display(), "generated files are up to date");
        return Ok(());
    }

    tracing::error!(
        missing = drift.missing.len(),
        differing = drift.diffs.len(),
        "generated files have drifted from their templates"
    );
    Err(drift.into())
}

fn unified_diff(source: &str, generated: &str, source_path: &Path, generated_path: &Path) -> String {
    let from = format!("Source {}", source_path.display());
    let to = format!("Generated {}", generated_path.display());
    let diff = TextDiff::from_lines(source, generated);
    let mut unified = diff.unified_diff();
    unified.context_radius(DIFF_CONTEXT).header(&from, &to);
    unified.to_string().trim_end_matches('\n').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    struct Layout {
        _root: TempDir,
        scratch: std::path::PathBuf,
        areas: DestinationAreas,
    }

    fn layout() -> Layout {
        let root = TempDir::new().expect("temp dir");
        let scratch = root.path().join("scratch");
        let areas = DestinationAreas::new(root.path().join("src"), root.path().join("python"));
        for dir in [&scratch, &areas.src, &areas.bindings] {
            fs::create_dir_all(dir).expect("create dir");
        }
        Layout {
            _root: root,
            scratch,
            areas,
        }
    }

    #[test]
    fn test_matching_files_have_no_drift() -> Result<()> {
        let l = layout();
        fs::write(l.scratch.join("vec2d.h"), "same\n")?;
        fs::write(l.areas.src.join("vec2d.h"), "same\n")?;
        fs::write(l.scratch.join("wrapVec2d.cpp"), "bind\n")?;
        fs::write(l.areas.bindings.join("wrapVec2d.cpp"), "bind\n")?;

        assert!(find_drift(&l.scratch, &l.areas)?.is_empty());
        validate_generated_files(&l.scratch, &l.areas)?;
        Ok(())
    }

    #[test]
    fn test_differing_file_yields_one_diff() -> Result<()> {
        let l = layout();
        fs::write(l.scratch.join("vec2d.h"), "a\nX\nc\n")?;
        fs::write(l.areas.src.join("vec2d.h"), "a\nY\nc\n")?;

        let drift = find_drift(&l.scratch, &l.areas)?;
        assert!(drift.missing.is_empty());
        assert_eq!(drift.diffs.len(), 1);

        let diff = &drift.diffs[0];
        let committed = l.areas.src.join("vec2d.h");
        let generated = l.scratch.join("vec2d.h");
        assert!(diff.starts_with(&format!("--- Source {}", committed.display())));
        assert!(diff.contains(&format!("+++ Generated {}", generated.display())));
        assert!(diff.contains("@@ -1,3 +1,3 @@"));
        assert!(diff.contains("\n-Y\n+X"));
        Ok(())
    }

    #[test]
    fn test_missing_committed_file() -> Result<()> {
        let l = layout();
        fs::write(l.scratch.join("wrapQuatf.cpp"), "x\n")?;

        let drift = find_drift(&l.scratch, &l.areas)?;
        assert_eq!(
            drift.missing,
            vec![l.areas.bindings.join("wrapQuatf.cpp").display().to_string()]
        );
        assert!(drift.diffs.is_empty());

        let err = validate_generated_files(&l.scratch, &l.areas).unwrap_err();
        let drift = err.downcast_ref::<DriftError>().expect("drift error");
        assert_eq!(drift.missing.len(), 1);
        assert!(err.to_string().contains("*** Missing Generated Files:"));
        Ok(())
    }

    #[test]
    fn test_all_mismatches_are_collected() -> Result<()> {
        let l = layout();
        for name in ["quatd.h", "quatf.h", "vec3f.h"] {
            fs::write(l.scratch.join(name), "new\n")?;
        }
        fs::write(l.areas.src.join("quatd.h"), "old\n")?;
        fs::write(l.areas.src.join("quatf.h"), "old\n")?;

        let drift = find_drift(&l.scratch, &l.areas)?;
        assert_eq!(drift.missing.len(), 1);
        assert_eq!(drift.diffs.len(), 2);
        Ok(())
    }
}
