//! Element-list and matrix-cell text expansion for templates.
//!
//! Templates need to spell out per-component code such as
//! `v[0], v[1], v[2]`. A [`ListFormatter`] or [`MatrixFormatter`] is bound to
//! the dimension of the spec being rendered and expands a printf-style format
//! (`%(i)s`, `%(j)s`, `%%`) once per element or cell.

use serde::Serialize;
use std::collections::HashMap;
use tera::{Function, Value};
use thiserror::Error;

pub const DEFAULT_SEPARATOR: &str = ", ";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("format '{format}' references unknown placeholder '{name}'")]
    UnknownPlaceholder { format: String, name: String },

    #[error("malformed placeholder in format '{format}' at byte {position}")]
    Malformed { format: String, position: usize },
}

/// Substitutes `%(name)s` placeholders in `fmt` with the matching values.
///
/// `%(name)d` is accepted as well and `%%` produces a literal percent sign.
pub fn interpolate(fmt: &str, values: &[(&str, usize)]) -> Result<String, FormatError> {
    let malformed = |position| FormatError::Malformed {
        format: fmt.to_string(),
        position,
    };

    let mut out = String::with_capacity(fmt.len());
    let mut rest = fmt;
    while let Some(pos) = rest.find('%') {
        out.push_str(&rest[..pos]);
        let offset = fmt.len() - rest.len() + pos;
        let tail = &rest[pos + 1..];

        if let Some(after) = tail.strip_prefix('%') {
            out.push('%');
            rest = after;
            continue;
        }

        let inner = tail.strip_prefix('(').ok_or_else(|| malformed(offset))?;
        let close = inner.find(')').ok_or_else(|| malformed(offset))?;
        let name = &inner[..close];
        let after = &inner[close + 1..];
        let after = after
            .strip_prefix('s')
            .or_else(|| after.strip_prefix('d'))
            .ok_or_else(|| malformed(offset))?;

        let value = values
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| *value)
            .ok_or_else(|| FormatError::UnknownPlaceholder {
                format: fmt.to_string(),
                name: name.to_string(),
            })?;
        out.push_str(&value.to_string());
        rest = after;
    }
    out.push_str(rest);
    Ok(out)
}

/// Expands a format once per element index `i`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ListFormatter {
    count: usize,
}

impl ListFormatter {
    pub fn new(count: usize) -> Self {
        Self { count }
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// Joins `fmt` expanded for every index with `sep`.
    ///
    /// A `num` of `None` or `Some(0)` uses the bound count.
    pub fn format(&self, fmt: &str, sep: &str, num: Option<usize>) -> Result<String, FormatError> {
        let count = num.filter(|n| *n > 0).unwrap_or(self.count);
        let items = (0..count)
            .map(|i| interpolate(fmt, &[("i", i)]))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(items.join(sep))
    }
}

/// Options accepted by [`MatrixFormatter::format`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatrixOptions<'a> {
    pub sep: &'a str,
    pub indent: usize,
    pub diag_fmt: Option<&'a str>,
    pub num: Option<usize>,
}

impl Default for MatrixOptions<'_> {
    fn default() -> Self {
        Self {
            sep: DEFAULT_SEPARATOR,
            indent: 0,
            diag_fmt: None,
            num: None,
        }
    }
}

/// Expands a format once per cell `(i, j)` of a square matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MatrixFormatter {
    dim: usize,
}

impl MatrixFormatter {
    pub fn new(dim: usize) -> Self {
        Self { dim }
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Expands every row; cells are joined by `options.sep`.
    pub fn rows(&self, fmt: &str, options: &MatrixOptions<'_>) -> Result<Vec<String>, FormatError> {
        let n = options.num.unwrap_or(self.dim);
        let diag_fmt = options.diag_fmt.filter(|d| !d.is_empty()).unwrap_or(fmt);

        (0..n)
            .map(|i| {
                let cells = (0..n)
                    .map(|j| {
                        let cell_fmt = if i == j { diag_fmt } else { fmt };
                        interpolate(cell_fmt, &[("i", i), ("j", j)])
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(cells.join(options.sep))
            })
            .collect()
    }

    /// Expands the whole matrix.
    ///
    /// Rows are joined by the separator followed by a newline and `indent`
    /// spaces, unless the separator already contains a newline.
    pub fn format(&self, fmt: &str, options: &MatrixOptions<'_>) -> Result<String, FormatError> {
        let row_sep = if options.sep.contains('\n') {
            options.sep.to_string()
        } else {
            format!("{}\n{}", options.sep, " ".repeat(options.indent))
        };
        Ok(self.rows(fmt, options)?.join(&row_sep))
    }
}

// =============================================================================
// Template bindings
// =============================================================================

fn required_str<'a>(args: &'a HashMap<String, Value>, name: &str, func: &str) -> tera::Result<&'a str> {
    match args.get(name) {
        Some(Value::String(s)) => Ok(s.as_str()),
        Some(other) => Err(tera::Error::msg(format!(
            "{}: argument '{}' must be a string, got {}",
            func, name, other
        ))),
        None => Err(tera::Error::msg(format!(
            "{}: missing required argument '{}'",
            func, name
        ))),
    }
}

fn optional_str<'a>(
    args: &'a HashMap<String, Value>,
    name: &str,
    func: &str,
) -> tera::Result<Option<&'a str>> {
    match args.get(name) {
        None | Some(Value::Null) => Ok(None),
        Some(_) => required_str(args, name, func).map(Some),
    }
}

fn optional_usize(
    args: &HashMap<String, Value>,
    name: &str,
    func: &str,
) -> tera::Result<Option<usize>> {
    match args.get(name) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => value.as_u64().map(|n| Some(n as usize)).ok_or_else(|| {
            tera::Error::msg(format!(
                "{}: argument '{}' must be a non-negative integer, got {}",
                func, name, value
            ))
        }),
    }
}

impl Function for ListFormatter {
    fn call(&self, args: &HashMap<String, Value>) -> tera::Result<Value> {
        let fmt = required_str(args, "fmt", "LIST")?;
        let sep = optional_str(args, "sep", "LIST")?.unwrap_or(DEFAULT_SEPARATOR);
        let num = optional_usize(args, "num", "LIST")?;
        self.format(fmt, sep, num)
            .map(Value::String)
            .map_err(|e| tera::Error::msg(format!("LIST: {}", e)))
    }

    fn is_safe(&self) -> bool {
        true
    }
}

impl Function for MatrixFormatter {
    fn call(&self, args: &HashMap<String, Value>) -> tera::Result<Value> {
        let fmt = required_str(args, "fmt", "MATRIX")?;
        let options = MatrixOptions {
            sep: optional_str(args, "sep", "MATRIX")?.unwrap_or(DEFAULT_SEPARATOR),
            indent: optional_usize(args, "indent", "MATRIX")?.unwrap_or(0),
            diag_fmt: optional_str(args, "diagFmt", "MATRIX")?,
            num: optional_usize(args, "num", "MATRIX")?,
        };
        self.format(fmt, &options)
            .map(Value::String)
            .map_err(|e| tera::Error::msg(format!("MATRIX: {}", e)))
    }

    fn is_safe(&self) -> bool {
        true
    }
}
