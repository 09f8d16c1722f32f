//! Declaration lookups over a module.
//!
//! Every lookup walks the module's files in file name order and each file's
//! declarations in source order; the first match wins.

use std::ops::ControlFlow;

use super::module::{Module, ModuleFile};
use crate::syntax::{Decl, Field, FuncDecl, TypeExpr, TypeSpec, is_exported};

/// Visit every top-level declaration until `f` breaks.
pub fn scan_decls<'m, B>(
    module: &'m Module,
    mut f: impl FnMut(&'m ModuleFile, &'m Decl) -> ControlFlow<B>,
) -> Option<B> {
    for file in module.files() {
        for decl in &file.syntax.decls {
            if let ControlFlow::Break(value) = f(file, decl) {
                return Some(value);
            }
        }
    }
    None
}

/// The first type declaration named `name`, with the file it lives in.
pub fn find_type<'m>(module: &'m Module, name: &str) -> Option<(&'m ModuleFile, &'m TypeSpec)> {
    let found = scan_decls(module, |file, decl| match decl {
        Decl::Types(specs) => match specs.iter().find(|spec| spec.name == name) {
            Some(spec) => ControlFlow::Break((file, spec)),
            None => ControlFlow::Continue(()),
        },
        Decl::Func(_) => ControlFlow::Continue(()),
    });
    tracing::trace!(module = module.path(), name, found = found.is_some(), "find_type");
    found
}

/// Fields of the struct declared as `name`.
///
/// `None` when the name is undeclared or declared as something else.
pub fn find_struct<'m>(module: &'m Module, name: &str) -> Option<(&'m ModuleFile, &'m [Field])> {
    match find_type(module, name)? {
        (file, TypeSpec { ty: TypeExpr::Struct(fields), .. }) => Some((file, fields)),
        _ => None,
    }
}

/// Elements of the interface declared as `name`.
pub fn find_interface<'m>(module: &'m Module, name: &str) -> Option<(&'m ModuleFile, &'m [Field])> {
    match find_type(module, name)? {
        (file, TypeSpec { ty: TypeExpr::Interface(elems), .. }) => Some((file, elems)),
        _ => None,
    }
}

/// Exported methods declared on `receiver` or `*receiver`, in scan order.
pub fn find_methods<'m>(module: &'m Module, receiver: &str) -> Vec<&'m FuncDecl> {
    let receiver = receiver.strip_prefix('*').unwrap_or(receiver);
    let mut methods = Vec::new();
    scan_decls::<()>(module, |_, decl| {
        if let Decl::Func(func) = decl {
            if is_exported(&func.name) && func.receiver_base() == Some(receiver) {
                methods.push(func);
            }
        }
        ControlFlow::Continue(())
    });
    methods
}
