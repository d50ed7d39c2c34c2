//! Property tests for scalar ranks, conversions and formatters

use gf_codegen::format::{ListFormatter, MatrixFormatter, MatrixOptions};
use gf_codegen::{Scalar, allow_implicit_conversion};
use proptest::prelude::*;

fn any_scalar() -> impl Strategy<Value = Scalar> {
    prop::sample::select(Scalar::ALL.to_vec())
}

proptest! {
    #[test]
    fn prop_conversion_matches_rank(src in any_scalar(), dst in any_scalar()) {
        prop_assert_eq!(allow_implicit_conversion(src, dst), src.rank() <= dst.rank());
    }

    #[test]
    fn prop_rank_is_antisymmetric(a in any_scalar(), b in any_scalar()) {
        if a != b {
            prop_assert_ne!(a.rank(), b.rank());
            prop_assert!(allow_implicit_conversion(a, b) != allow_implicit_conversion(b, a));
        }
    }

    #[test]
    fn prop_type_name_parses_back(scalar in any_scalar()) {
        prop_assert_eq!(scalar.type_name().parse::<Scalar>(), Ok(scalar));
    }

    #[test]
    fn prop_list_expands_once_per_element(count in 1usize..8) {
        let out = ListFormatter::new(count).format("x%(i)s", ",", None).unwrap();
        prop_assert_eq!(out.split(',').count(), count);
        let last = format!("x{}", count - 1);
        prop_assert!(out.ends_with(&last));
    }

    #[test]
    fn prop_matrix_has_dim_rows(dim in 1usize..6, indent in 0usize..6) {
        let options = MatrixOptions { indent, ..Default::default() };
        let out = MatrixFormatter::new(dim).format("%(i)s%(j)s", &options).unwrap();
        prop_assert_eq!(out.lines().count(), dim);
        let diagonal = (0..dim).filter(|i| out.contains(&format!("{}{}", i, i))).count();
        prop_assert_eq!(diagonal, dim);
    }
}
