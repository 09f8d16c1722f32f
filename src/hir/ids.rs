//! Identifiers for type declarations.

use std::fmt;
use std::sync::Arc;

use smol_str::SmolStr;

/// Identity of a named type: the import path of its module plus its name.
///
/// Used to track which types are currently being expanded during method
/// set resolution and to attach context to errors.
#[derive(Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct TypeKey {
    /// Import path of the declaring module
    pub module: Arc<str>,
    /// Declared type name
    pub name: SmolStr,
}

impl TypeKey {
    pub fn new(module: impl Into<Arc<str>>, name: impl Into<SmolStr>) -> Self {
        Self {
            module: module.into(),
            name: name.into(),
        }
    }
}

impl fmt::Debug for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeKey({self})")
    }
}

/// `github.com/example/foo.Foo`, the form `go doc` accepts.
impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.module, self.name)
    }
}
