use crate::hir::MemberSet;
use crate::syntax::method_signature_at;

/// `type Name interface { ... }` listing `methods` in set order.
pub fn render_interface(name: &str, methods: &MemberSet) -> String {
    if methods.is_empty() {
        return format!("type {name} interface{{}}\n");
    }
    let mut out = format!("type {name} interface {{\n");
    for method in methods {
        out.push('\t');
        out.push_str(&method_signature_at(&method.name, &method.func, 1));
        out.push('\n');
    }
    out.push_str("}\n");
    out
}

/// Members present in every set with the same signature.
///
/// No sets at all yields the empty set.
pub fn intersect_all<I>(sets: I) -> MemberSet
where
    I: IntoIterator<Item = MemberSet>,
{
    let mut sets = sets.into_iter();
    let Some(first) = sets.next() else {
        return MemberSet::default();
    };
    sets.fold(first, |acc, set| acc.intersect(&set))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hir::MethodSignature;
    use crate::syntax::{Field, FuncType, TypeExpr};

    fn method(name: &str, results: &[&str]) -> MethodSignature {
        let results = results
            .iter()
            .map(|ty| Field::unnamed(TypeExpr::ident(*ty)))
            .collect();
        MethodSignature::new(name, FuncType::new(Vec::new(), results))
    }

    fn set(methods: &[(&str, &[&str])]) -> MemberSet {
        MemberSet::from_members(methods.iter().map(|(name, results)| method(name, results)))
    }

    #[test]
    fn test_render_interface() {
        let methods = set(&[("Close", &["error"]), ("Add", &[])]);
        assert_eq!(
            render_interface("Common", &methods),
            "type Common interface {\n\tAdd()\n\tClose() error\n}\n"
        );
    }

    #[test]
    fn test_render_empty_interface() {
        assert_eq!(
            render_interface("Nothing", &MemberSet::default()),
            "type Nothing interface{}\n"
        );
    }

    #[test]
    fn test_intersect_all() {
        let a = set(&[("A", &[]), ("B", &[]), ("C", &["int"])]);
        let b = set(&[("B", &["error"]), ("C", &["int"])]);
        let c = set(&[("C", &["int"]), ("D", &[])]);

        let common = intersect_all([a.clone(), b, c]);
        assert_eq!(common.names().collect::<Vec<_>>(), vec!["C"]);

        assert_eq!(intersect_all([a.clone()]), a);
        assert!(intersect_all(Vec::new()).is_empty());
    }
}
