//! Type qualification: rewriting types so they read correctly from another
//! package.
//!
//! `Foo` declared in package `bar` becomes `bar.Foo`. Unexported names and
//! predeclared types stay as they are, already qualified names are left
//! alone, so qualifying twice is the same as qualifying once.

use crate::syntax::{Field, FuncType, TypeExpr, is_builtin, is_exported};

/// Qualify every exported identifier in `ty` with `owner`.
///
/// Struct, instantiated, union and `~T` types are returned unchanged.
pub fn qualify(owner: &str, ty: &TypeExpr) -> TypeExpr {
    match ty {
        TypeExpr::Ident(name) if is_exported(name) && !is_builtin(name) => {
            TypeExpr::qualified(owner, name.clone())
        }
        TypeExpr::Ident(_) | TypeExpr::Qualified { .. } => ty.clone(),
        TypeExpr::Pointer(inner) => TypeExpr::Pointer(Box::new(qualify(owner, inner))),
        TypeExpr::Slice(elem) => TypeExpr::Slice(Box::new(qualify(owner, elem))),
        TypeExpr::Array { len, elem } => TypeExpr::Array {
            len: len.clone(),
            elem: Box::new(qualify(owner, elem)),
        },
        TypeExpr::Map { key, value } => TypeExpr::Map {
            key: Box::new(qualify(owner, key)),
            value: Box::new(qualify(owner, value)),
        },
        TypeExpr::Chan { dir, elem } => TypeExpr::Chan {
            dir: *dir,
            elem: Box::new(qualify(owner, elem)),
        },
        TypeExpr::Func(func) => TypeExpr::Func(Box::new(qualify_func(owner, func))),
        TypeExpr::Interface(elems) => TypeExpr::Interface(qualify_fields(owner, elems)),
        TypeExpr::Ellipsis(elem) => TypeExpr::Ellipsis(Box::new(qualify(owner, elem))),
        TypeExpr::Struct(_) | TypeExpr::Instance { .. } | TypeExpr::Union(_) | TypeExpr::Approx(_) => {
            ty.clone()
        }
    }
}

/// Qualify the type of every field, keeping names and tags.
pub fn qualify_fields(owner: &str, fields: &[Field]) -> Vec<Field> {
    fields
        .iter()
        .map(|field| Field {
            names: field.names.clone(),
            ty: qualify(owner, &field.ty),
            tag: field.tag.clone(),
        })
        .collect()
}

pub fn qualify_func(owner: &str, func: &FuncType) -> FuncType {
    FuncType {
        params: qualify_fields(owner, &func.params),
        results: qualify_fields(owner, &func.results),
    }
}
