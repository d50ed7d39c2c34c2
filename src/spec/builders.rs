//! Spec enumeration per family.
//!
//! Every builder walks the scalar × dimension product (dimension varying
//! fastest) and then stable-sorts by scalar rank, so equal-rank specs keep
//! their enumeration order.

use super::{
    DualQuatSpec, Family, MatrixSpec, QuatSpec, RangeSpec, Spec, SpecSet, VectorSpec,
};
use crate::format::{ListFormatter, MatrixFormatter};
use crate::naming::{dim_suffix, dual_quat_name, matrix_name, quat_name, range_name, vec_name};
use crate::scalar::Scalar;

/// Implicit dimension of quaternion-like families.
const QUAT_COMPONENTS: usize = 4;

fn sorted_by_rank(mut specs: Vec<Spec>) -> Vec<Spec> {
    specs.sort_by_key(|spec| spec.scalar().rank());
    specs
}

fn product(family: Family) -> impl Iterator<Item = (Scalar, usize)> {
    let dims = family.dimensions();
    family
        .scalars()
        .iter()
        .flat_map(move |&scl| dims.clone().into_iter().map(move |dim| (scl, dim)))
}

fn spec_set(family: Family, specs: Vec<Spec>) -> SpecSet {
    SpecSet {
        family,
        templates: family.output_patterns(),
        specs: sorted_by_rank(specs),
    }
}

pub fn vec_specs() -> SpecSet {
    let family = Family::Vector;
    let specs = product(family)
        .map(|(scl, dim)| {
            Spec::Vector(VectorSpec {
                scalar: scl,
                dim,
                suffix: dim_suffix(dim, scl),
                vec: vec_name(dim, scl),
                eps: scl.epsilon(),
                scalars: family.scalars().to_vec(),
                list: ListFormatter::new(dim),
            })
        })
        .collect();
    spec_set(family, specs)
}

/// Element type of a range's min/max corners.
fn minmax_type(dim: usize, scl: Scalar) -> String {
    if dim == 1 {
        scl.type_name().to_string()
    } else {
        vec_name(dim, scl)
    }
}

/// Declaration prefix of a min/max parameter, ready to be followed by a name.
fn minmax_param(dim: usize, scl: Scalar) -> String {
    let ty = minmax_type(dim, scl);
    if dim == 1 {
        format!("{} ", ty)
    } else {
        format!("const {} &", ty)
    }
}

pub fn range_specs() -> SpecSet {
    let family = Family::Range;
    let specs = product(family)
        .map(|(scl, dim)| {
            Spec::Range(RangeSpec {
                scalar: scl,
                dim,
                suffix: dim_suffix(dim, scl),
                range: range_name(dim, scl),
                minmax: minmax_type(dim, scl),
                minmax_param: minmax_param(dim, scl),
                scalars: family.scalars().to_vec(),
                list: ListFormatter::new(dim),
            })
        })
        .collect();
    spec_set(family, specs)
}

pub fn quat_specs() -> SpecSet {
    let family = Family::Quaternion;
    let specs = family
        .scalars()
        .iter()
        .map(|&scl| {
            Spec::Quat(QuatSpec {
                scalar: scl,
                suffix: scl.suffix().to_string(),
                quat: quat_name(scl),
                scalars: family.scalars().to_vec(),
                list: ListFormatter::new(QUAT_COMPONENTS),
            })
        })
        .collect();
    spec_set(family, specs)
}

pub fn dual_quat_specs() -> SpecSet {
    let family = Family::DualQuaternion;
    let specs = family
        .scalars()
        .iter()
        .map(|&scl| {
            Spec::DualQuat(DualQuatSpec {
                scalar: scl,
                suffix: scl.suffix().to_string(),
                quat: quat_name(scl),
                dual_quat: dual_quat_name(scl),
                scalars: family.scalars().to_vec(),
                list: ListFormatter::new(QUAT_COMPONENTS),
            })
        })
        .collect();
    spec_set(family, specs)
}

pub fn matrix_specs(dim: usize) -> SpecSet {
    let family = Family::Matrix(dim);
    let specs = product(family)
        .map(|(scl, dim)| {
            Spec::Matrix(MatrixSpec {
                scalar: scl,
                dim,
                file_suffix: scl.suffix().to_string(),
                suffix: dim_suffix(dim, scl),
                mat: matrix_name(dim, scl),
                scalars: family.scalars().to_vec(),
                list: ListFormatter::new(dim),
                matrix: MatrixFormatter::new(dim),
            })
        })
        .collect();
    spec_set(family, specs)
}

/// Spec sets of every family, in generation order.
pub fn all_spec_sets() -> Vec<SpecSet> {
    Family::ALL
        .iter()
        .map(|family| match *family {
            Family::Vector => vec_specs(),
            Family::Range => range_specs(),
            Family::Quaternion => quat_specs(),
            Family::DualQuaternion => dual_quat_specs(),
            Family::Matrix(dim) => matrix_specs(dim),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn suffixes(set: &SpecSet) -> Vec<&str> {
        set.specs.iter().map(|s| s.suffix()).collect()
    }

    #[test]
    fn test_vec_specs_sorted_by_rank_then_dimension() {
        let set = vec_specs();
        assert_eq!(
            suffixes(&set),
            vec!["2i", "3i", "4i", "2h", "3h", "4h", "2f", "3f", "4f", "2d", "3d", "4d"]
        );
        assert_eq!(set.templates[0].as_str(), "vec{0}.h");
    }

    #[test]
    fn test_vec3d_variables() {
        let set = vec_specs();
        let spec = set
            .specs
            .iter()
            .find(|s| s.suffix() == "3d")
            .expect("vec3d spec");
        assert_eq!(spec.get("VEC"), Some(json!("GfVec3d")));
        assert_eq!(spec.get("SUFFIX"), Some(json!("3d")));
        assert_eq!(spec.get("EPS"), Some(json!("GF_MIN_VECTOR_LENGTH")));
        assert_eq!(spec.get("SCL"), Some(json!("double")));
        assert_eq!(spec.get("DIM"), Some(json!(3)));
        assert_eq!(
            spec.get("SCALARS"),
            Some(json!(["double", "float", "GfHalf", "int"]))
        );
        assert_eq!(spec.list().count(), 3);
        assert_eq!(spec.get("LIST"), None);
    }

    #[test]
    fn test_half_vector_epsilon() {
        let set = vec_specs();
        let spec = set.specs.iter().find(|s| s.suffix() == "2h").expect("vec2h");
        assert_eq!(spec.get("EPS"), Some(json!("0.001")));
    }

    #[test]
    fn test_range_minmax_by_value_for_one_dimension() {
        let set = range_specs();
        assert_eq!(suffixes(&set), vec!["1f", "2f", "3f", "1d", "2d", "3d"]);

        for spec in &set.specs {
            let Spec::Range(range) = spec else {
                panic!("expected range spec");
            };
            if range.dim == 1 {
                assert!(!range.minmax_param.contains('&'));
                assert_eq!(range.minmax, range.scalar.type_name());
            } else {
                assert!(range.minmax_param.contains('&'));
                assert!(range.minmax_param.starts_with("const GfVec"));
            }
        }

        let r1d = set.specs.iter().find(|s| s.suffix() == "1d").expect("range1d");
        assert_eq!(r1d.get("MINMAXPARM"), Some(json!("double ")));
        let r3f = set.specs.iter().find(|s| s.suffix() == "3f").expect("range3f");
        assert_eq!(r3f.get("MINMAXPARM"), Some(json!("const GfVec3f &")));
        assert_eq!(r3f.get("RNG"), Some(json!("GfRange3f")));
    }

    #[test]
    fn test_quat_and_dual_quat_specs() {
        let quats = quat_specs();
        assert_eq!(suffixes(&quats), vec!["h", "f", "d"]);
        assert!(quats.specs.iter().all(|s| s.list().count() == 4));

        let duals = dual_quat_specs();
        let half = &duals.specs[0];
        assert_eq!(half.get("QUAT"), Some(json!("GfQuath")));
        assert_eq!(half.get("DUALQUAT"), Some(json!("GfDualQuath")));
        assert_eq!(duals.templates[2].output_name(half.file_suffix()), "wrapDualQuath.cpp");
    }

    #[test]
    fn test_matrix_file_suffix_is_scalar_only() {
        let set = matrix_specs(3);
        assert_eq!(suffixes(&set), vec!["3f", "3d"]);
        let spec = &set.specs[1];
        assert_eq!(spec.file_suffix(), "d");
        assert_eq!(spec.get("MAT"), Some(json!("GfMatrix3d")));
        assert_eq!(spec.matrix().map(|m| m.dim()), Some(3));
        assert_eq!(set.templates[0].output_name(spec.file_suffix()), "matrix3d.h");
    }

    #[test]
    fn test_all_spec_sets_order() {
        let families: Vec<Family> = all_spec_sets().iter().map(|s| s.family).collect();
        assert_eq!(families, Family::ALL.to_vec());
        let total: usize = all_spec_sets().iter().map(|s| s.specs.len()).sum();
        assert_eq!(total, 12 + 6 + 3 + 3 + 2 + 2 + 2);
    }
}
