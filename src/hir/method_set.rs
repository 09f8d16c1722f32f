//! Method sets: the exported methods of a struct type, including those
//! promoted from embedded fields, however deep and across packages.
//!
//! # Algorithm
//!
//! For `resolve_deep(module, T)`:
//!
//! 1. Exported methods declared on `T` or `*T` in `module` go into the
//!    result, keyed by name.
//! 2. `T` must be declared as a struct.
//! 3. Each embedded field is resolved through the imports of the file that
//!    declares `T` (a bare name stays in `module`) and expanded recursively.
//! 4. Expanded members are merged first-write-wins: own methods shadow
//!    promoted ones, and an earlier embedded field shadows a later one.
//! 5. Every member is qualified with the package that declares it, so the
//!    signatures read correctly from outside that package.
//! 6. The result is sorted by method name.
//!
//! Any failure aborts the whole expansion. A type that embeds itself,
//! directly or through other types, is reported as a cycle.

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use smol_str::SmolStr;

use super::diagnostics::ResolveError;
use super::ids::TypeKey;
use super::index::{find_methods, find_type};
use super::module::{Module, ModuleFile};
use super::qualify::qualify_func;
use super::resolve::{Resolver, describe};
use crate::project::ModuleLoader;
use crate::syntax::{Field, FuncDecl, FuncType, TypeExpr, method_signature};

// ============================================================================
// SIGNATURES
// ============================================================================

/// An exported method: its name and function type, receiver dropped.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct MethodSignature {
    pub name: SmolStr,
    pub func: FuncType,
}

impl MethodSignature {
    pub fn new(name: impl Into<SmolStr>, func: FuncType) -> Self {
        Self {
            name: name.into(),
            func,
        }
    }

    pub fn from_decl(decl: &FuncDecl) -> Self {
        Self::new(decl.name.clone(), decl.ty.clone())
    }

    pub fn params(&self) -> &[Field] {
        &self.func.params
    }

    pub fn results(&self) -> &[Field] {
        &self.func.results
    }

    /// This signature as seen from outside package `owner`.
    pub fn qualified(&self, owner: &str) -> Self {
        Self::new(self.name.clone(), qualify_func(owner, &self.func))
    }

    /// Name and types, ignoring parameter names.
    pub fn key(&self) -> SignatureKey {
        SignatureKey {
            name: self.name.clone(),
            params: expand_types(self.params()),
            results: expand_types(self.results()),
        }
    }
}

/// `Name(params) results`
impl fmt::Display for MethodSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&method_signature(&self.name, &self.func))
    }
}

/// The parts of a signature that decide whether two methods are the same:
/// `Read(p []byte) (n int, err error)` and `Read([]byte) (int, error)` are.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SignatureKey {
    pub name: SmolStr,
    /// One printed type per declared parameter, `a, b int` counting twice.
    pub params: Vec<String>,
    pub results: Vec<String>,
}

fn expand_types(fields: &[Field]) -> Vec<String> {
    fields
        .iter()
        .flat_map(|field| std::iter::repeat_n(field.ty.to_string(), field.arity()))
        .collect()
}

/// Orderings between method signatures.
pub mod compare {
    use super::*;

    /// By method name only; the order of a [`MemberSet`].
    pub fn by_name(a: &MethodSignature, b: &MethodSignature) -> Ordering {
        a.name.cmp(&b.name)
    }

    /// By name, then parameter and result types. Parameter names are
    /// ignored.
    pub fn by_signature(a: &MethodSignature, b: &MethodSignature) -> Ordering {
        a.key().cmp(&b.key())
    }
}

// ============================================================================
// MEMBER SET
// ============================================================================

/// Methods sorted by name, at most one per name.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemberSet {
    members: Vec<MethodSignature>,
}

impl MemberSet {
    /// Build from members in priority order: for a repeated name the first
    /// occurrence is kept.
    pub fn from_members(members: impl IntoIterator<Item = MethodSignature>) -> Self {
        let mut members: Vec<_> = members.into_iter().collect();
        members.sort_by(compare::by_name);
        members.dedup_by(|later, earlier| later.name == earlier.name);
        Self { members }
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MethodSignature> {
        self.members.iter()
    }

    pub fn as_slice(&self) -> &[MethodSignature] {
        &self.members
    }

    pub fn get(&self, name: &str) -> Option<&MethodSignature> {
        self.members
            .binary_search_by(|member| member.name.as_str().cmp(name))
            .ok()
            .map(|index| &self.members[index])
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.members.iter().map(|member| member.name.as_str())
    }

    /// Members present in both sets with the same signature.
    pub fn intersect(&self, other: &MemberSet) -> MemberSet {
        let members = self
            .members
            .iter()
            .filter(|member| {
                other
                    .get(&member.name)
                    .is_some_and(|theirs| compare::by_signature(member, theirs) == Ordering::Equal)
            })
            .cloned()
            .collect();
        MemberSet { members }
    }
}

impl IntoIterator for MemberSet {
    type Item = MethodSignature;
    type IntoIter = std::vec::IntoIter<MethodSignature>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.into_iter()
    }
}

impl<'a> IntoIterator for &'a MemberSet {
    type Item = &'a MethodSignature;
    type IntoIter = std::slice::Iter<'a, MethodSignature>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.iter()
    }
}

// ============================================================================
// DEEP RESOLUTION
// ============================================================================

/// Full exported method set of struct `type_name` declared in `module`.
pub fn resolve_deep(
    loader: &ModuleLoader,
    module: &Arc<Module>,
    type_name: &str,
) -> Result<MemberSet, ResolveError> {
    Expander {
        resolver: Resolver::new(loader),
        stack: Vec::new(),
    }
    .expand(module, type_name)
}

/// Load `import_path` and resolve the method set of `type_name` in it.
pub fn resolve_path(
    loader: &ModuleLoader,
    import_path: &str,
    type_name: &str,
) -> Result<MemberSet, ResolveError> {
    let module = loader
        .load(import_path)
        .map_err(|err| err.in_import(import_path))?;
    resolve_deep(loader, &module, type_name)
}

struct Expander<'l> {
    resolver: Resolver<'l>,
    /// Types currently being expanded, outermost first.
    stack: Vec<TypeKey>,
}

impl Expander<'_> {
    #[tracing::instrument(level = "debug", skip(self, module), fields(module = module.path()))]
    fn expand(&mut self, module: &Arc<Module>, name: &str) -> Result<MemberSet, ResolveError> {
        let key = module.type_key(name);
        if let Some(start) = self.stack.iter().position(|open| *open == key) {
            let mut cycle = self.stack[start..].to_vec();
            cycle.push(key);
            return Err(ResolveError::CyclicEmbedding { cycle });
        }

        let mut members: IndexMap<SmolStr, MethodSignature> = IndexMap::new();
        for decl in find_methods(module, name) {
            members
                .entry(decl.name.clone())
                .or_insert_with(|| MethodSignature::from_decl(decl).qualified(module.name()));
        }

        let Some((file, spec)) = find_type(module, name) else {
            return Err(ResolveError::TypeNotFound {
                module: module.path_arc(),
                name: SmolStr::new(name),
            });
        };
        let TypeExpr::Struct(fields) = &spec.ty else {
            return Err(ResolveError::TypeMismatch {
                name: SmolStr::new(name),
                expected: "a struct",
                found: describe(&spec.ty).to_string(),
            });
        };

        self.stack.push(key.clone());
        let merged = self.merge_embedded(module, file, fields, &mut members);
        self.stack.pop();
        merged.map_err(|err| err.in_embedded_context(key))?;

        Ok(MemberSet::from_members(members.into_values()))
    }

    fn merge_embedded(
        &mut self,
        module: &Arc<Module>,
        file: &ModuleFile,
        fields: &[Field],
        members: &mut IndexMap<SmolStr, MethodSignature>,
    ) -> Result<(), EmbeddedError> {
        for field in fields.iter().filter(|field| field.is_embedded()) {
            let failed = |error: ResolveError| EmbeddedError {
                embedded: field.ty.to_string(),
                error,
            };
            let resolved = self
                .resolver
                .resolve_type(&file.syntax, &field.ty)
                .map_err(failed)?;
            let target = resolved.module.unwrap_or_else(|| module.clone());
            tracing::debug!(
                embedded = %field.ty,
                target = target.path(),
                name = %resolved.name,
                "expanding embedded field"
            );

            let promoted = self.expand(&target, &resolved.name).map_err(failed)?;
            for member in promoted {
                if !members.contains_key(&member.name) {
                    members.insert(member.name.clone(), member.qualified(module.name()));
                }
            }
        }
        Ok(())
    }
}

/// A failure while expanding one embedded field, before the owning type is
/// attached.
struct EmbeddedError {
    embedded: String,
    error: ResolveError,
}

impl EmbeddedError {
    fn in_embedded_context(self, owner: TypeKey) -> ResolveError {
        self.error.in_embedded(owner, self.embedded)
    }
}
