//! The methods an interface requires, with embedded interfaces flattened.

use std::sync::Arc;

use rustc_hash::FxHashSet;
use smol_str::SmolStr;

use crate::hir::resolve::describe;
use crate::hir::{
    MethodSignature, Module, ModuleFile, ResolveError, Resolver, TypeKey, find_type,
};
use crate::project::ModuleLoader;
use crate::syntax::{Field, FuncType, TypeExpr, TypeSpec};

/// Methods required by interface `name` declared in `module`.
///
/// Declared methods and the methods of embedded interfaces are listed in
/// declaration order; a name seen before is skipped. Each signature is
/// qualified with the package that declares it. Type set elements
/// (`~int | string`) carry no methods and are ignored.
pub fn interface_requires(
    loader: &ModuleLoader,
    module: &Arc<Module>,
    name: &str,
) -> Result<Vec<MethodSignature>, ResolveError> {
    let mut flattener = Flattener {
        resolver: Resolver::new(loader),
        stack: Vec::new(),
        seen: FxHashSet::default(),
        methods: Vec::new(),
    };
    flattener.interface(module, name)?;
    Ok(flattener.methods)
}

struct Flattener<'l> {
    resolver: Resolver<'l>,
    stack: Vec<TypeKey>,
    seen: FxHashSet<SmolStr>,
    methods: Vec<MethodSignature>,
}

impl Flattener<'_> {
    fn interface(&mut self, module: &Arc<Module>, name: &str) -> Result<(), ResolveError> {
        let key = module.type_key(name);
        if let Some(start) = self.stack.iter().position(|open| *open == key) {
            let mut cycle = self.stack[start..].to_vec();
            cycle.push(key);
            return Err(ResolveError::CyclicEmbedding { cycle });
        }

        let (file, elems) = match find_type(module, name) {
            Some((file, TypeSpec { ty: TypeExpr::Interface(elems), .. })) => (file, elems),
            Some((_, spec)) => {
                return Err(ResolveError::TypeMismatch {
                    name: SmolStr::new(name),
                    expected: "an interface",
                    found: describe(&spec.ty).to_string(),
                });
            }
            None if name == "error" => {
                self.add(error_method());
                return Ok(());
            }
            None => {
                return Err(ResolveError::TypeNotFound {
                    module: module.path_arc(),
                    name: SmolStr::new(name),
                });
            }
        };

        self.stack.push(key.clone());
        let result = self.elements(module, file, elems);
        self.stack.pop();
        result.map_err(|(embedded, err)| err.in_embedded(key, embedded))
    }

    fn elements(
        &mut self,
        module: &Arc<Module>,
        file: &ModuleFile,
        elems: &[Field],
    ) -> Result<(), (String, ResolveError)> {
        for elem in elems {
            match (elem.names.first(), &elem.ty) {
                (Some(method), TypeExpr::Func(func)) => {
                    self.add(MethodSignature::new(method.clone(), (**func).clone()).qualified(module.name()));
                }
                (None, TypeExpr::Union(_) | TypeExpr::Approx(_)) => {}
                (None, ty) => {
                    let failed = |err: ResolveError| (ty.to_string(), err);
                    let resolved = self.resolver.resolve_type(&file.syntax, ty).map_err(failed)?;
                    let target = resolved.module.unwrap_or_else(|| module.clone());
                    tracing::debug!(embedded = %ty, target = target.path(), "flattening embedded interface");
                    self.interface(&target, &resolved.name).map_err(failed)?;
                }
                (Some(_), _) => {}
            }
        }
        Ok(())
    }

    fn add(&mut self, method: MethodSignature) {
        if self.seen.insert(method.name.clone()) {
            self.methods.push(method);
        }
    }
}

/// `Error() string`, the only method of the predeclared `error`.
fn error_method() -> MethodSignature {
    MethodSignature::new(
        "Error",
        FuncType::new(Vec::new(), vec![Field::unnamed(TypeExpr::ident("string"))]),
    )
}
