use smol_str::{SmolStr, format_smolstr};

use crate::syntax::{Field, FuncType};

/// Give every parameter a name when the first one has none.
///
/// Go forbids mixing named and unnamed parameters, so an unnamed first
/// parameter means all are unnamed. They become `arg1`, `arg2`, ... in
/// order. Results are left alone.
pub fn auto_name(func: &FuncType) -> FuncType {
    let unnamed = func.params.first().is_some_and(Field::is_embedded);
    if !unnamed {
        return func.clone();
    }
    let params = func
        .params
        .iter()
        .enumerate()
        .map(|(i, param)| Field::named([format_smolstr!("arg{}", i + 1)], param.ty.clone()))
        .collect();
    FuncType::new(params, func.results.clone())
}

/// Parameter names in order, one per declared value.
pub fn param_names(func: &FuncType) -> Vec<SmolStr> {
    func.params
        .iter()
        .flat_map(|param| param.names.iter().cloned())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::{TypeExpr, method_signature};

    fn func(src: &str) -> FuncType {
        match crate::syntax::parse_type(src).unwrap() {
            TypeExpr::Func(func) => *func,
            other => panic!("not a func type: {other:?}"),
        }
    }

    #[test]
    fn test_unnamed_params_get_names() {
        let named = auto_name(&func("func(int, ...string) error"));
        assert_eq!(
            method_signature("M", &named),
            "M(arg1 int, arg2 ...string) error"
        );
        assert_eq!(param_names(&named), vec!["arg1", "arg2"]);
    }

    #[test]
    fn test_named_params_kept() {
        let original = func("func(a, b int, c string) (n int, err error)");
        let named = auto_name(&original);
        assert_eq!(named, original);
        assert_eq!(param_names(&named), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_no_params() {
        let original = func("func() bool");
        assert_eq!(auto_name(&original), original);
        assert!(param_names(&original).is_empty());
    }
}
