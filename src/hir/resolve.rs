//! Symbol resolution: mapping a type reference in a file to the module
//! that declares it.
//!
//! Go type references are either bare (`Foo`, declared in the same package)
//! or qualified (`bar.Foo`), where `bar` is the local name of one of the
//! file's imports. An import without an explicit name is known by the
//! `package` clause of the module it points to, so resolving a qualifier
//! can require loading imports until one of them declares that name.

use std::sync::Arc;

use smol_str::SmolStr;

use super::diagnostics::ResolveError;
use super::module::Module;
use crate::project::ModuleLoader;
use crate::syntax::{SourceFile, TypeExpr};

/// Import path of the cgo pseudo-package, which has no source directory.
const CGO_IMPORT: &str = "C";

/// A resolved type reference.
#[derive(Clone, Debug)]
pub struct ResolvedType {
    /// Declaring module, or `None` for a bare name declared alongside the
    /// referencing file.
    pub module: Option<Arc<Module>>,
    pub name: SmolStr,
}

/// Resolves type references through a loader.
#[derive(Clone, Copy)]
pub struct Resolver<'l> {
    loader: &'l ModuleLoader,
}

impl<'l> Resolver<'l> {
    pub fn new(loader: &'l ModuleLoader) -> Self {
        Self { loader }
    }

    pub fn loader(&self) -> &'l ModuleLoader {
        self.loader
    }

    /// Resolve a type reference appearing in `file`.
    ///
    /// One leading `*` and any instantiation (`List[T]`) are looked
    /// through. A bare identifier never triggers a load.
    pub fn resolve_type(&self, file: &SourceFile, ty: &TypeExpr) -> Result<ResolvedType, ResolveError> {
        let target = match ty {
            TypeExpr::Pointer(inner) => inner.as_ref(),
            other => other,
        };
        let target = match target {
            TypeExpr::Instance { base, .. } => base.as_ref(),
            other => other,
        };

        match target {
            TypeExpr::Ident(name) => Ok(ResolvedType {
                module: None,
                name: name.clone(),
            }),
            TypeExpr::Qualified { package, name } => {
                let module = self.resolve_package(file, package)?;
                Ok(ResolvedType {
                    module: Some(module),
                    name: name.clone(),
                })
            }
            other => Err(ResolveError::TypeMismatch {
                name: SmolStr::new(ty.to_string()),
                expected: "a type name",
                found: describe(other).to_string(),
            }),
        }
    }

    /// Find the module `file` refers to as `alias`.
    ///
    /// Imports are tried in declaration order. An explicit import name
    /// matches by itself; an unnamed import is loaded and matches when its
    /// package clause equals `alias`.
    pub fn resolve_package(&self, file: &SourceFile, alias: &str) -> Result<Arc<Module>, ResolveError> {
        for import in &file.imports {
            match import.name.as_deref() {
                Some(name) if name == alias => {
                    return self
                        .loader
                        .load(&import.path)
                        .map_err(|err| err.in_import(import.path.clone()));
                }
                Some(_) => continue,
                None if import.path == CGO_IMPORT => continue,
                None => {
                    let module = self
                        .loader
                        .load(&import.path)
                        .map_err(|err| err.in_import(import.path.clone()))?;
                    if module.name() == alias {
                        return Ok(module);
                    }
                    tracing::trace!(import = %import.path, package = module.name(), alias, "import name does not match");
                }
            }
        }
        Err(ResolveError::PackageNotFound {
            alias: SmolStr::new(alias),
        })
    }
}

/// Short description of a type shape for error messages.
pub(crate) fn describe(ty: &TypeExpr) -> &'static str {
    match ty {
        TypeExpr::Ident(_) | TypeExpr::Qualified { .. } => "a named type",
        TypeExpr::Pointer(_) => "a pointer type",
        TypeExpr::Slice(_) => "a slice type",
        TypeExpr::Array { .. } => "an array type",
        TypeExpr::Map { .. } => "a map type",
        TypeExpr::Chan { .. } => "a channel type",
        TypeExpr::Func(_) => "a function type",
        TypeExpr::Interface(_) => "an interface",
        TypeExpr::Struct(_) => "a struct",
        TypeExpr::Ellipsis(_) => "a variadic parameter",
        TypeExpr::Instance { .. } => "an instantiated type",
        TypeExpr::Union(_) | TypeExpr::Approx(_) => "a type constraint",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::{LoaderConfig, ModuleLoader};
    use crate::syntax::{parse_file, parse_type};
    use rstest::rstest;

    fn loader() -> ModuleLoader {
        let loader = ModuleLoader::new(LoaderConfig::detached());
        loader
            .add_sources("github.com/example/bar", [("bar.go", "package bar\n\ntype Bar struct{}\n")])
            .unwrap();
        loader
            .add_sources("github.com/example/go-baz", [("baz.go", "package baz\n\ntype Baz struct{}\n")])
            .unwrap();
        loader
    }

    const FILE: &str = r#"package foo

import (
	"C"
	"github.com/example/go-baz"
	b2 "github.com/example/bar"
	"github.com/example/bar"
)
"#;

    #[rstest]
    #[case("Foo", None, "Foo")]
    #[case("*Foo", None, "Foo")]
    #[case("bar.Bar", Some("bar"), "Bar")]
    #[case("*bar.Bar", Some("bar"), "Bar")]
    #[case("b2.Bar", Some("bar"), "Bar")]
    #[case("baz.Baz", Some("baz"), "Baz")]
    #[case("bar.Bar[int]", Some("bar"), "Bar")]
    fn test_resolve_type(#[case] source: &str, #[case] module: Option<&str>, #[case] name: &str) {
        let loader = loader();
        let file = parse_file(FILE).unwrap();
        let resolved = Resolver::new(&loader)
            .resolve_type(&file, &parse_type(source).unwrap())
            .unwrap();
        assert_eq!(resolved.module.as_ref().map(|m| m.name()), module);
        assert_eq!(resolved.name, name);
    }

    #[test]
    fn test_bare_name_does_not_load() {
        let loader = ModuleLoader::new(LoaderConfig::detached());
        let file = parse_file("package foo\n\nimport \"github.com/missing/pkg\"\n").unwrap();
        let resolved = Resolver::new(&loader)
            .resolve_type(&file, &TypeExpr::ident("Foo"))
            .unwrap();
        assert!(resolved.module.is_none());
        assert!(loader.loaded().is_empty());
    }

    #[test]
    fn test_unknown_alias() {
        let loader = loader();
        let file = parse_file("package foo\n\nimport x \"github.com/example/bar\"\n").unwrap();
        let err = Resolver::new(&loader)
            .resolve_type(&file, &parse_type("bar.Bar").unwrap())
            .unwrap_err();
        assert!(matches!(err, ResolveError::PackageNotFound { ref alias } if alias == "bar"));
    }

    #[test]
    fn test_import_failure_is_wrapped() {
        let loader = ModuleLoader::new(LoaderConfig::detached());
        let file = parse_file("package foo\n\nimport \"github.com/missing/pkg\"\n").unwrap();
        let err = Resolver::new(&loader)
            .resolve_package(&file, "pkg")
            .unwrap_err();
        assert!(matches!(err, ResolveError::Import { .. }));
        assert!(matches!(err.root(), ResolveError::Resolution { .. }));
    }

    #[rstest]
    #[case("[]Foo")]
    #[case("**Foo")]
    #[case("map[string]Foo")]
    #[case("func()")]
    fn test_non_name_is_mismatch(#[case] source: &str) {
        let loader = loader();
        let file = parse_file(FILE).unwrap();
        let err = Resolver::new(&loader)
            .resolve_type(&file, &parse_type(source).unwrap())
            .unwrap_err();
        assert!(matches!(err, ResolveError::TypeMismatch { .. }), "{err}");
    }
}
