//! Canonical names of the generated Gf classes.

use crate::scalar::Scalar;

pub fn vec_name(dim: usize, scalar: Scalar) -> String {
    format!("GfVec{}{}", dim, scalar.suffix())
}

pub fn range_name(dim: usize, scalar: Scalar) -> String {
    format!("GfRange{}{}", dim, scalar.suffix())
}

pub fn quat_name(scalar: Scalar) -> String {
    format!("GfQuat{}", scalar.suffix())
}

pub fn dual_quat_name(scalar: Scalar) -> String {
    format!("GfDualQuat{}", scalar.suffix())
}

pub fn matrix_name(dim: usize, scalar: Scalar) -> String {
    format!("GfMatrix{}{}", dim, scalar.suffix())
}

/// Dimension plus scalar suffix, e.g. `3d`.
pub fn dim_suffix(dim: usize, scalar: Scalar) -> String {
    format!("{}{}", dim, scalar.suffix())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names() {
        assert_eq!(vec_name(3, Scalar::Double), "GfVec3d");
        assert_eq!(vec_name(2, Scalar::Half), "GfVec2h");
        assert_eq!(range_name(1, Scalar::Float), "GfRange1f");
        assert_eq!(quat_name(Scalar::Half), "GfQuath");
        assert_eq!(dual_quat_name(Scalar::Double), "GfDualQuatd");
        assert_eq!(matrix_name(4, Scalar::Float), "GfMatrix4f");
        assert_eq!(dim_suffix(4, Scalar::Int), "4i");
    }
}
