//! Template environment bound to a template root directory.
//!
//! Every render builds its own Tera instance holding the requested template
//! and the templates it references (`extends`, `import`, `include`), so a
//! broken template only affects the artifacts rendered from it, and the
//! variables of one spec can never leak into the render of another.

use super::helpers;
use crate::error::RenderError;
use crate::spec::Spec;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{HashSet, VecDeque};
use std::error::Error as StdError;
use std::fs;
use std::path::{Path, PathBuf};
use tera::Tera;

/// Names of templates referenced from another template.
static TEMPLATE_REFERENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"\{%-?\s*(?:extends|import|include|from)\s+["']([^"']+)["']"#)
        .expect("template reference pattern is valid")
});

/// Comments and raw blocks, whose tags Tera never evaluates.
static INERT_SECTION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)\{#.*?#\}|\{%-?\s*raw\s*-?%\}.*?\{%-?\s*endraw\s*-?%\}")
        .expect("inert section pattern is valid")
});

/// Parser position (`--> line:col`) in a Tera syntax error.
static PARSE_POSITION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"-->\s*(\d+):(\d+)").expect("parse position pattern is valid"));

/// Template named by Tera when it rejects a source.
static PARSE_FAILURE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Failed to parse '([^']+)'").expect("parse failure pattern is valid"));

#[derive(Debug, Clone)]
pub struct TemplateEnvironment {
    root: PathBuf,
}

impl TemplateEnvironment {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Renders `template` with the variables and bound helpers of `spec`.
    ///
    /// Non-empty output is always terminated by a newline.
    pub fn render(&self, template: &str, spec: &Spec) -> Result<String, RenderError> {
        let tera = self.engine_for(template, spec)?;
        let context = spec.to_context().map_err(|e| evaluation_error(template, &e))?;

        let mut content = tera
            .render(template, &context)
            .map_err(|e| evaluation_error(template, &e))?;
        if !content.is_empty() && !content.ends_with('\n') {
            content.push('\n');
        }
        Ok(content)
    }

    fn engine_for(&self, template: &str, spec: &Spec) -> Result<Tera, RenderError> {
        let sources = self.load_sources(template)?;

        let mut tera = Tera::default();
        tera.autoescape_on(Vec::new());
        helpers::register_globals(&mut tera);
        tera.register_function("LIST", spec.list());
        if let Some(matrix) = spec.matrix() {
            tera.register_function("MATRIX", matrix);
        }

        tera.add_raw_templates(sources)
            .map_err(|e| classify_load_error(template, &e))?;
        Ok(tera)
    }

    /// Reads `template` and every template it transitively references.
    ///
    /// Only `template` itself must exist. Unreadable references are left out
    /// so Tera decides whether they matter (`ignore missing`, missing parent).
    fn load_sources(&self, template: &str) -> Result<Vec<(String, String)>, RenderError> {
        let path = self.root.join(template);
        let source = fs::read_to_string(&path).map_err(|e| RenderError::Evaluation {
            template: template.to_string(),
            message: format!("template '{}' not found in {}: {}", template, self.root.display(), e),
        })?;

        let mut seen = HashSet::from([template.to_string()]);
        let mut queue = VecDeque::from(references(&source));
        let mut sources = vec![(template.to_string(), source)];

        while let Some(name) = queue.pop_front() {
            if !seen.insert(name.clone()) {
                continue;
            }
            match fs::read_to_string(self.root.join(&name)) {
                Ok(source) => {
                    queue.extend(references(&source));
                    sources.push((name, source));
                }
                Err(e) => {
                    tracing::debug!(
                        template = %template,
                        reference = %name,
                        "skipping unreadable reference: {}",
                        e
                    );
                }
            }
        }

        Ok(sources)
    }
}

/// Template names referenced by `source`, outside comments and raw blocks.
fn references(source: &str) -> Vec<String> {
    let live = INERT_SECTION.replace_all(source, "");
    TEMPLATE_REFERENCE
        .captures_iter(&live)
        .map(|caps| caps[1].to_string())
        .collect()
}

/// Error message including every `source()` in the chain.
fn chain_message(err: &tera::Error) -> String {
    let mut parts = vec![err.to_string()];
    let mut source = err.source();
    while let Some(cause) = source {
        parts.push(cause.to_string());
        source = cause.source();
    }
    parts.join(": ")
}

/// Parse failures are syntax errors attributed to the template that failed
/// to parse; anything else raised while loading is an evaluation error.
fn classify_load_error(template: &str, err: &tera::Error) -> RenderError {
    let message = chain_message(err);
    let Some(failed) = PARSE_FAILURE.captures(&message).map(|caps| caps[1].to_string()) else {
        return evaluation_error(template, err);
    };
    let line = PARSE_POSITION
        .captures(&message)
        .and_then(|caps| caps[1].parse::<usize>().ok());
    RenderError::Syntax {
        template: failed,
        line,
        message,
    }
}

fn evaluation_error(template: &str, err: &tera::Error) -> RenderError {
    RenderError::Evaluation {
        template: template.to_string(),
        message: chain_message(err),
    }
}
