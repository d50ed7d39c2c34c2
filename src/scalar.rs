//! Scalar element types supported by the generated Gf classes.
//!
//! Every generated type is parameterized by one of these scalars. The rank
//! order decides which conversions between generated types may be implicit.

use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Epsilon token used for comparisons of half-precision values.
pub const HALF_EPSILON: &str = "0.001";

/// Epsilon token used for every other scalar.
pub const DEFAULT_EPSILON: &str = "GF_MIN_VECTOR_LENGTH";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScalarError {
    #[error("unknown scalar type '{0}' (expected one of int, GfHalf, float, double)")]
    Unknown(String),
}

/// Element type of a generated class.
///
/// Variants are declared in rank order, so the derived `Ord` is the
/// conversion order: `Int < Half < Float < Double`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Scalar {
    Int,
    Half,
    Float,
    Double,
}

impl Scalar {
    pub const ALL: [Scalar; 4] = [Scalar::Int, Scalar::Half, Scalar::Float, Scalar::Double];

    /// Identifier used for this scalar inside the generated C++ sources.
    pub fn type_name(self) -> &'static str {
        match self {
            Scalar::Int => "int",
            Scalar::Half => "GfHalf",
            Scalar::Float => "float",
            Scalar::Double => "double",
        }
    }

    pub fn rank(self) -> usize {
        match self {
            Scalar::Int => 0,
            Scalar::Half => 1,
            Scalar::Float => 2,
            Scalar::Double => 3,
        }
    }

    pub fn is_floating_point(self) -> bool {
        !matches!(self, Scalar::Int)
    }

    /// Single character appended to generated type names.
    ///
    /// This is the first letter of the type name, except for `GfHalf`.
    pub fn suffix(self) -> char {
        match self {
            Scalar::Half => 'h',
            other => other.type_name().chars().next().unwrap_or('?'),
        }
    }

    pub fn epsilon(self) -> &'static str {
        match self {
            Scalar::Half => HALF_EPSILON,
            _ => DEFAULT_EPSILON,
        }
    }
}

/// Whether a value of `src` may be converted to `dst` without an explicit cast.
pub fn allow_implicit_conversion(src: Scalar, dst: Scalar) -> bool {
    src.rank() <= dst.rank()
}

impl FromStr for Scalar {
    type Err = ScalarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Scalar::ALL
            .into_iter()
            .find(|scalar| scalar.type_name() == s)
            .ok_or_else(|| ScalarError::Unknown(s.to_string()))
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

impl Serialize for Scalar {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.type_name())
    }
}
