//! Template variable sets ("specs") for every generated type family.
//!
//! ## Families
//!
//! | Family          | Scalars                    | Dimensions |
//! |-----------------|----------------------------|------------|
//! | vector          | double, float, GfHalf, int | 2, 3, 4    |
//! | range           | double, float              | 1, 2, 3    |
//! | quaternion      | double, float, GfHalf      | (4)        |
//! | dual quaternion | double, float, GfHalf      | (4)        |
//! | matrix N        | double, float              | N          |
//!
//! Each family renders three artifacts per spec: a header, an implementation
//! file and a Python bindings file. A spec is a typed variant per family; the
//! template sees it as a flat set of upper-case variables.

pub mod builders;

pub use builders::{
    all_spec_sets, dual_quat_specs, matrix_specs, quat_specs, range_specs, vec_specs,
};

use crate::format::{ListFormatter, MatrixFormatter};
use crate::scalar::Scalar;
use serde::Serialize;
use std::fmt;
use tera::Context;

/// Placeholder replaced by the spec suffix in an output pattern.
pub const SUFFIX_PLACEHOLDER: &str = "{0}";

/// Infix replacing the placeholder to obtain the template file name.
pub const TEMPLATE_INFIX: &str = ".template";

// =============================================================================
// Families and output patterns
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    Vector,
    Range,
    Quaternion,
    DualQuaternion,
    Matrix(usize),
}

impl Family {
    /// Families in generation order.
    pub const ALL: [Family; 7] = [
        Family::Vector,
        Family::Range,
        Family::Quaternion,
        Family::DualQuaternion,
        Family::Matrix(2),
        Family::Matrix(3),
        Family::Matrix(4),
    ];

    pub fn scalars(self) -> &'static [Scalar] {
        match self {
            Family::Vector => &[Scalar::Double, Scalar::Float, Scalar::Half, Scalar::Int],
            Family::Range | Family::Matrix(_) => &[Scalar::Double, Scalar::Float],
            Family::Quaternion | Family::DualQuaternion => {
                &[Scalar::Double, Scalar::Float, Scalar::Half]
            }
        }
    }

    /// Dimension axis; empty for families without one.
    pub fn dimensions(self) -> Vec<usize> {
        match self {
            Family::Vector => vec![2, 3, 4],
            Family::Range => vec![1, 2, 3],
            Family::Quaternion | Family::DualQuaternion => Vec::new(),
            Family::Matrix(dim) => vec![dim],
        }
    }

    fn stem(self) -> String {
        match self {
            Family::Vector => "vec".to_string(),
            Family::Range => "range".to_string(),
            Family::Quaternion => "quat".to_string(),
            Family::DualQuaternion => "dualQuat".to_string(),
            Family::Matrix(dim) => format!("matrix{}", dim),
        }
    }

    /// Header, implementation and bindings patterns, in that order.
    pub fn output_patterns(self) -> Vec<OutputPattern> {
        let stem = self.stem();
        let mut capitalized = stem.clone();
        if let Some(first) = capitalized.get_mut(..1) {
            first.make_ascii_uppercase();
        }
        vec![
            OutputPattern::new(format!("{}{}.h", stem, SUFFIX_PLACEHOLDER)),
            OutputPattern::new(format!("{}{}.cpp", stem, SUFFIX_PLACEHOLDER)),
            OutputPattern::new(format!(
                "{}{}{}.cpp",
                crate::writer::BINDINGS_PREFIX,
                capitalized,
                SUFFIX_PLACEHOLDER
            )),
        ]
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Family::Vector => f.write_str("vector"),
            Family::Range => f.write_str("range"),
            Family::Quaternion => f.write_str("quaternion"),
            Family::DualQuaternion => f.write_str("dual quaternion"),
            Family::Matrix(dim) => write!(f, "matrix{}", dim),
        }
    }
}

/// Output file name pattern such as `vec{0}.h`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OutputPattern(String);

impl OutputPattern {
    pub fn new(pattern: impl Into<String>) -> Self {
        Self(pattern.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Name of the template file rendering this artifact, e.g. `vec.template.h`.
    pub fn template_name(&self) -> String {
        self.0.replace(SUFFIX_PLACEHOLDER, TEMPLATE_INFIX)
    }

    /// Generated file name for `suffix`, e.g. `vec3d.h`.
    pub fn output_name(&self, suffix: &str) -> String {
        self.0.replace(SUFFIX_PLACEHOLDER, suffix)
    }
}

impl fmt::Display for OutputPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================================
// Spec variants
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VectorSpec {
    #[serde(rename = "SCL")]
    pub scalar: Scalar,
    #[serde(rename = "DIM")]
    pub dim: usize,
    #[serde(rename = "SUFFIX")]
    pub suffix: String,
    #[serde(rename = "VEC")]
    pub vec: String,
    #[serde(rename = "EPS")]
    pub eps: &'static str,
    #[serde(rename = "SCALARS")]
    pub scalars: Vec<Scalar>,
    #[serde(skip)]
    pub list: ListFormatter,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RangeSpec {
    #[serde(rename = "SCL")]
    pub scalar: Scalar,
    #[serde(rename = "DIM")]
    pub dim: usize,
    #[serde(rename = "SUFFIX")]
    pub suffix: String,
    #[serde(rename = "RNG")]
    pub range: String,
    /// Bare scalar for one-dimensional ranges, the vector type otherwise.
    #[serde(rename = "MINMAX")]
    pub minmax: String,
    /// Parameter declaration for min/max arguments: by value for one
    /// dimension, by const reference above.
    #[serde(rename = "MINMAXPARM")]
    pub minmax_param: String,
    #[serde(rename = "SCALARS")]
    pub scalars: Vec<Scalar>,
    #[serde(skip)]
    pub list: ListFormatter,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuatSpec {
    #[serde(rename = "SCL")]
    pub scalar: Scalar,
    #[serde(rename = "SUFFIX")]
    pub suffix: String,
    #[serde(rename = "QUAT")]
    pub quat: String,
    #[serde(rename = "SCALARS")]
    pub scalars: Vec<Scalar>,
    #[serde(skip)]
    pub list: ListFormatter,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DualQuatSpec {
    #[serde(rename = "SCL")]
    pub scalar: Scalar,
    #[serde(rename = "SUFFIX")]
    pub suffix: String,
    #[serde(rename = "QUAT")]
    pub quat: String,
    #[serde(rename = "DUALQUAT")]
    pub dual_quat: String,
    #[serde(rename = "SCALARS")]
    pub scalars: Vec<Scalar>,
    #[serde(skip)]
    pub list: ListFormatter,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatrixSpec {
    #[serde(rename = "SCL")]
    pub scalar: Scalar,
    #[serde(rename = "DIM")]
    pub dim: usize,
    /// Scalar-only suffix used in file names (`matrix3d.h`).
    #[serde(rename = "FILESUFFIX")]
    pub file_suffix: String,
    /// Dimension plus scalar suffix used in type names (`GfMatrix3d`).
    #[serde(rename = "SUFFIX")]
    pub suffix: String,
    #[serde(rename = "MAT")]
    pub mat: String,
    #[serde(rename = "SCALARS")]
    pub scalars: Vec<Scalar>,
    #[serde(skip)]
    pub list: ListFormatter,
    #[serde(skip)]
    pub matrix: MatrixFormatter,
}

/// Variables for one (family, scalar[, dimension]) instance.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Spec {
    Vector(VectorSpec),
    Range(RangeSpec),
    Quat(QuatSpec),
    DualQuat(DualQuatSpec),
    Matrix(MatrixSpec),
}

impl Spec {
    pub fn scalar(&self) -> Scalar {
        match self {
            Spec::Vector(s) => s.scalar,
            Spec::Range(s) => s.scalar,
            Spec::Quat(s) => s.scalar,
            Spec::DualQuat(s) => s.scalar,
            Spec::Matrix(s) => s.scalar,
        }
    }

    pub fn suffix(&self) -> &str {
        match self {
            Spec::Vector(s) => &s.suffix,
            Spec::Range(s) => &s.suffix,
            Spec::Quat(s) => &s.suffix,
            Spec::DualQuat(s) => &s.suffix,
            Spec::Matrix(s) => &s.suffix,
        }
    }

    /// Suffix substituted into output file names.
    pub fn file_suffix(&self) -> &str {
        match self {
            Spec::Matrix(s) => &s.file_suffix,
            other => other.suffix(),
        }
    }

    pub fn list(&self) -> ListFormatter {
        match self {
            Spec::Vector(s) => s.list,
            Spec::Range(s) => s.list,
            Spec::Quat(s) => s.list,
            Spec::DualQuat(s) => s.list,
            Spec::Matrix(s) => s.list,
        }
    }

    pub fn matrix(&self) -> Option<MatrixFormatter> {
        match self {
            Spec::Matrix(s) => Some(s.matrix),
            _ => None,
        }
    }

    /// Looks up a template variable by name.
    pub fn get(&self, name: &str) -> Option<serde_json::Value> {
        match serde_json::to_value(self) {
            Ok(serde_json::Value::Object(mut vars)) => vars.remove(name),
            _ => None,
        }
    }

    /// Rendering context holding this spec's variables and nothing else.
    pub fn to_context(&self) -> tera::Result<Context> {
        Context::from_serialize(self)
    }
}

/// Output patterns and ordered specs of one family.
#[derive(Debug, Clone)]
pub struct SpecSet {
    pub family: Family,
    pub templates: Vec<OutputPattern>,
    pub specs: Vec<Spec>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_patterns() {
        let names: Vec<String> = Family::DualQuaternion
            .output_patterns()
            .iter()
            .map(|p| p.to_string())
            .collect();
        assert_eq!(
            names,
            vec!["dualQuat{0}.h", "dualQuat{0}.cpp", "wrapDualQuat{0}.cpp"]
        );

        let matrix = Family::Matrix(3).output_patterns();
        assert_eq!(matrix[2].as_str(), "wrapMatrix3{0}.cpp");
    }

    #[test]
    fn test_template_and_output_names() {
        let pattern = OutputPattern::new("wrapVec{0}.cpp");
        assert_eq!(pattern.template_name(), "wrapVec.template.cpp");
        assert_eq!(pattern.output_name("3f"), "wrapVec3f.cpp");
    }

    #[test]
    fn test_family_axes() {
        assert_eq!(Family::Vector.scalars().len(), 4);
        assert!(Family::Quaternion.dimensions().is_empty());
        assert_eq!(Family::Matrix(4).dimensions(), vec![4]);
    }
}
