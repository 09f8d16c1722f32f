//! Property-based tests for type qualification.
//!
//! Generates arbitrary type expressions over a small vocabulary of
//! exported, unexported, builtin and already-qualified names and checks
//! that qualification is idempotent and never touches what it must not.
#![cfg(feature = "proptest")]

use methodset::hir::qualify;
use methodset::syntax::{ChanDir, Field, FuncType, TypeExpr};
use proptest::prelude::*;

// ============================================================================
// PROPTEST STRATEGIES
// ============================================================================

/// Leaf type names: builtins, unexported, exported.
fn arb_ident() -> impl Strategy<Value = TypeExpr> {
    prop_oneof![
        prop::sample::select(vec!["int", "string", "error", "any", "byte"]).prop_map(TypeExpr::ident),
        "[a-z][a-z0-9]{0,6}".prop_map(TypeExpr::ident),
        "[A-Z][a-zA-Z0-9]{0,6}".prop_map(TypeExpr::ident),
    ]
}

fn arb_qualified() -> impl Strategy<Value = TypeExpr> {
    ("[a-z]{1,5}", "[A-Z][a-z]{0,5}").prop_map(|(package, name)| TypeExpr::qualified(package, name))
}

fn arb_field(inner: impl Strategy<Value = TypeExpr>) -> impl Strategy<Value = Field> {
    (prop::option::of("[a-z]{1,4}"), inner).prop_map(|(name, ty)| match name {
        Some(name) => Field::named([name], ty),
        None => Field::unnamed(ty),
    })
}

fn arb_chan_dir() -> impl Strategy<Value = ChanDir> {
    prop_oneof![Just(ChanDir::Both), Just(ChanDir::Send), Just(ChanDir::Recv)]
}

/// Arbitrary type expressions, nested a few levels deep.
fn arb_type() -> impl Strategy<Value = TypeExpr> {
    let leaf = prop_oneof![arb_ident(), arb_qualified()];
    leaf.prop_recursive(4, 32, 4, |inner| {
        prop_oneof![
            inner.clone().prop_map(TypeExpr::pointer),
            inner.clone().prop_map(TypeExpr::slice),
            (any::<u8>(), inner.clone()).prop_map(|(len, elem)| TypeExpr::Array {
                len: len.to_string().into(),
                elem: Box::new(elem),
            }),
            (inner.clone(), inner.clone()).prop_map(|(key, value)| TypeExpr::Map {
                key: Box::new(key),
                value: Box::new(value),
            }),
            (arb_chan_dir(), inner.clone()).prop_map(|(dir, elem)| TypeExpr::Chan {
                dir,
                elem: Box::new(elem),
            }),
            (
                prop::collection::vec(arb_field(inner.clone()), 0..3),
                prop::collection::vec(arb_field(inner.clone()), 0..2),
            )
                .prop_map(|(params, results)| TypeExpr::Func(Box::new(FuncType::new(params, results)))),
        ]
    })
}

// ============================================================================
// PROPERTIES
// ============================================================================

proptest! {
    #[test]
    fn qualify_is_idempotent(ty in arb_type(), owner in "[a-z]{1,6}") {
        let once = qualify(&owner, &ty);
        let twice = qualify(&owner, &once);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn qualify_leaves_builtins_and_unexported(name in "[a-z][a-z0-9]{0,6}", owner in "[a-z]{1,6}") {
        let ty = TypeExpr::ident(name);
        prop_assert_eq!(qualify(&owner, &ty), ty);
    }

    #[test]
    fn qualify_prefixes_exported(name in "[A-Z][a-zA-Z0-9]{0,6}", owner in "[a-z]{1,6}") {
        let qualified = qualify(&owner, &TypeExpr::ident(name.as_str()));
        prop_assert_eq!(qualified, TypeExpr::qualified(owner.as_str(), name.as_str()));
    }
}
