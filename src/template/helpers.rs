//! Functions callable from every template.
//!
//! Tera functions take named arguments only, e.g.
//! `{{ VECNAME(dim=3, scl=SCL) }}` or
//! `{% if ALLOW_IMPLICIT_CONVERSION(src=S, dst=SCL) %}`.

use crate::naming;
use crate::scalar::{self, Scalar};
use std::collections::HashMap;
use tera::{Tera, Value};

type Args = HashMap<String, Value>;

/// Registers every global helper on `tera`.
pub fn register_globals(tera: &mut Tera) {
    tera.register_function("UPPER", upper);
    tera.register_function("LOWER", lower);
    tera.register_function("ALLOW_IMPLICIT_CONVERSION", allow_implicit_conversion);
    tera.register_function("IS_FLOATING_POINT", is_floating_point);
    tera.register_function("SCALAR_SUFFIX", scalar_suffix);
    tera.register_function("VECNAME", vec_name);
    tera.register_function("RNGNAME", range_name);
    tera.register_function("QUATNAME", quat_name);
    tera.register_function("DUALQUATNAME", dual_quat_name);
    tera.register_function("MATNAME", matrix_name);
}

fn string_arg<'a>(args: &'a Args, name: &str, func: &str) -> tera::Result<&'a str> {
    args.get(name)
        .and_then(Value::as_str)
        .ok_or_else(|| tera::Error::msg(format!("{}: expected string argument '{}'", func, name)))
}

fn scalar_arg(args: &Args, name: &str, func: &str) -> tera::Result<Scalar> {
    string_arg(args, name, func)?
        .parse::<Scalar>()
        .map_err(|e| tera::Error::msg(format!("{}: {}", func, e)))
}

fn dim_arg(args: &Args, func: &str) -> tera::Result<usize> {
    args.get("dim")
        .and_then(Value::as_u64)
        .map(|dim| dim as usize)
        .ok_or_else(|| tera::Error::msg(format!("{}: expected integer argument 'dim'", func)))
}

fn upper(args: &Args) -> tera::Result<Value> {
    Ok(Value::from(string_arg(args, "s", "UPPER")?.to_uppercase()))
}

fn lower(args: &Args) -> tera::Result<Value> {
    Ok(Value::from(string_arg(args, "s", "LOWER")?.to_lowercase()))
}

fn allow_implicit_conversion(args: &Args) -> tera::Result<Value> {
    let src = scalar_arg(args, "src", "ALLOW_IMPLICIT_CONVERSION")?;
    let dst = scalar_arg(args, "dst", "ALLOW_IMPLICIT_CONVERSION")?;
    Ok(Value::from(scalar::allow_implicit_conversion(src, dst)))
}

fn is_floating_point(args: &Args) -> tera::Result<Value> {
    let scl = scalar_arg(args, "scl", "IS_FLOATING_POINT")?;
    Ok(Value::from(scl.is_floating_point()))
}

fn scalar_suffix(args: &Args) -> tera::Result<Value> {
    let scl = scalar_arg(args, "scl", "SCALAR_SUFFIX")?;
    Ok(Value::from(scl.suffix().to_string()))
}

fn vec_name(args: &Args) -> tera::Result<Value> {
    let scl = scalar_arg(args, "scl", "VECNAME")?;
    Ok(Value::from(naming::vec_name(dim_arg(args, "VECNAME")?, scl)))
}

fn range_name(args: &Args) -> tera::Result<Value> {
    let scl = scalar_arg(args, "scl", "RNGNAME")?;
    Ok(Value::from(naming::range_name(dim_arg(args, "RNGNAME")?, scl)))
}

fn quat_name(args: &Args) -> tera::Result<Value> {
    let scl = scalar_arg(args, "scl", "QUATNAME")?;
    Ok(Value::from(naming::quat_name(scl)))
}

fn dual_quat_name(args: &Args) -> tera::Result<Value> {
    let scl = scalar_arg(args, "scl", "DUALQUATNAME")?;
    Ok(Value::from(naming::dual_quat_name(scl)))
}

fn matrix_name(args: &Args) -> tera::Result<Value> {
    let scl = scalar_arg(args, "scl", "MATNAME")?;
    Ok(Value::from(naming::matrix_name(dim_arg(args, "MATNAME")?, scl)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tera::Context;

    fn render(src: &str) -> tera::Result<String> {
        let mut tera = Tera::default();
        register_globals(&mut tera);
        tera.add_raw_template("t", src)?;
        tera.render("t", &Context::new())
    }

    #[test]
    fn test_name_helpers() {
        let out = render(
            "{{ VECNAME(dim=2, scl=\"GfHalf\") }} {{ RNGNAME(dim=1, scl=\"float\") }} \
             {{ QUATNAME(scl=\"double\") }} {{ DUALQUATNAME(scl=\"float\") }} \
             {{ MATNAME(dim=4, scl=\"double\") }} {{ SCALAR_SUFFIX(scl=\"int\") }}",
        )
        .unwrap();
        assert_eq!(out, "GfVec2h GfRange1f GfQuatd GfDualQuatf GfMatrix4d i");
    }

    #[test]
    fn test_predicate_helpers() {
        let out = render(
            "{% if ALLOW_IMPLICIT_CONVERSION(src=\"int\", dst=\"float\") %}yes{% endif %}\
             {% if ALLOW_IMPLICIT_CONVERSION(src=\"double\", dst=\"GfHalf\") %}no{% endif %}\
             {% if IS_FLOATING_POINT(scl=\"int\") %}no{% endif %}",
        )
        .unwrap();
        assert_eq!(out, "yes");
    }

    #[test]
    fn test_case_helpers() {
        assert_eq!(render("{{ UPPER(s=\"vec\") }}{{ LOWER(s=\"QUAT\") }}").unwrap(), "VECquat");
    }

    #[test]
    fn test_unknown_scalar_is_an_error() {
        assert!(render("{{ VECNAME(dim=2, scl=\"long\") }}").is_err());
    }
}
