//! Errors raised while loading modules and resolving types.
//!
//! Every failure in the crate is a [`ResolveError`]. Errors raised deep
//! inside a method set expansion are wrapped on the way out with the import
//! or embedding step that led to them, so the rendered chain reads from the
//! requested type down to the actual cause.

use std::path::PathBuf;
use std::sync::Arc;

use smol_str::SmolStr;
use thiserror::Error;

use super::ids::TypeKey;
use crate::syntax::ParseError;

// ============================================================================
// ERROR TYPE
// ============================================================================

#[derive(Debug, Error)]
pub enum ResolveError {
    /// The import path does not name a directory in any source root.
    #[error("cannot find module {path:?} in any of:{}", searched_list(.searched))]
    Resolution { path: Arc<str>, searched: Vec<PathBuf> },

    #[error("cannot read {}: {error}", .path.display())]
    Io {
        path: PathBuf,
        error: std::io::Error,
    },

    #[error("{}:{error}", .path.display())]
    Parse { path: PathBuf, error: ParseError },

    /// More than one non-`main` package in a directory.
    #[error("found packages {} in module {path:?}", .names.join(", "))]
    AmbiguousModule { path: Arc<str>, names: Vec<SmolStr> },

    /// The directory holds no buildable `.go` files.
    #[error("no Go files in module {path:?}")]
    NotFound { path: Arc<str> },

    #[error("type {name} is not declared in module {module:?}")]
    TypeNotFound { module: Arc<str>, name: SmolStr },

    /// No import of the file provides the given package name.
    #[error("no imported package named {alias}")]
    PackageNotFound { alias: SmolStr },

    #[error("{name} is {found}, expected {expected}")]
    TypeMismatch {
        name: SmolStr,
        expected: &'static str,
        found: String,
    },

    #[error("embedding cycle: {}", cycle_list(.cycle))]
    CyclicEmbedding { cycle: Vec<TypeKey> },

    #[error("while loading import {path:?}")]
    Import {
        path: SmolStr,
        #[source]
        source: Box<ResolveError>,
    },

    #[error("while resolving {embedded} embedded in {owner}")]
    Embedded {
        owner: TypeKey,
        embedded: String,
        #[source]
        source: Box<ResolveError>,
    },
}

fn searched_list(searched: &[PathBuf]) -> String {
    if searched.is_empty() {
        return " (no source roots)".to_string();
    }
    searched
        .iter()
        .map(|dir| format!("\n\t{}", dir.display()))
        .collect()
}

fn cycle_list(cycle: &[TypeKey]) -> String {
    cycle
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" -> ")
}

impl ResolveError {
    /// Wrap with the import path whose loading failed.
    pub fn in_import(self, path: impl Into<SmolStr>) -> Self {
        ResolveError::Import {
            path: path.into(),
            source: Box::new(self),
        }
    }

    /// Wrap with the embedded field that was being expanded.
    pub fn in_embedded(self, owner: TypeKey, embedded: impl Into<String>) -> Self {
        ResolveError::Embedded {
            owner,
            embedded: embedded.into(),
            source: Box::new(self),
        }
    }

    /// The innermost cause under any `Import`/`Embedded` context.
    pub fn root(&self) -> &ResolveError {
        let mut err = self;
        while let ResolveError::Import { source, .. } | ResolveError::Embedded { source, .. } = err {
            err = source;
        }
        err
    }

    /// Stable code of the root cause.
    pub fn code(&self) -> &'static str {
        match self {
            ResolveError::Import { source, .. } | ResolveError::Embedded { source, .. } => {
                source.code()
            }
            ResolveError::Resolution { .. } => codes::UNRESOLVED_MODULE,
            ResolveError::Io { .. } => codes::IO,
            ResolveError::Parse { .. } => codes::SYNTAX,
            ResolveError::AmbiguousModule { .. } => codes::AMBIGUOUS_MODULE,
            ResolveError::NotFound { .. } => codes::EMPTY_MODULE,
            ResolveError::TypeNotFound { .. } => codes::UNDEFINED_TYPE,
            ResolveError::PackageNotFound { .. } => codes::UNDEFINED_PACKAGE,
            ResolveError::TypeMismatch { .. } => codes::TYPE_MISMATCH,
            ResolveError::CyclicEmbedding { .. } => codes::CIRCULAR_EMBEDDING,
        }
    }

    /// Number of context frames above the root cause.
    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut err = self;
        while let ResolveError::Import { source, .. } | ResolveError::Embedded { source, .. } = err {
            depth += 1;
            err = source;
        }
        depth
    }
}

// ============================================================================
// DIAGNOSTIC CODES
// ============================================================================

/// Stable codes for the root causes of a [`ResolveError`].
pub mod codes {
    /// Import path not found in any source root.
    pub const UNRESOLVED_MODULE: &str = "E0001";
    /// Several packages in one directory.
    pub const AMBIGUOUS_MODULE: &str = "E0002";
    /// Type mismatch.
    pub const TYPE_MISMATCH: &str = "E0003";
    /// Directory with no Go files.
    pub const EMPTY_MODULE: &str = "E0004";
    /// Type not declared in the module.
    pub const UNDEFINED_TYPE: &str = "E0005";
    /// Qualifier not provided by any import.
    pub const UNDEFINED_PACKAGE: &str = "E0006";
    /// Circular embedding.
    pub const CIRCULAR_EMBEDDING: &str = "E0007";
    /// Syntax error in a source file.
    pub const SYNTAX: &str = "E0008";
    /// Filesystem failure.
    pub const IO: &str = "E0009";
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::LineCol;

    #[test]
    fn test_root_and_depth() {
        let err = ResolveError::PackageNotFound {
            alias: SmolStr::new("bar"),
        }
        .in_embedded(TypeKey::new("example.com/foo", "Foo"), "bar.Bar")
        .in_import("example.com/foo");

        assert_eq!(err.depth(), 2);
        assert!(matches!(err.root(), ResolveError::PackageNotFound { .. }));
        assert_eq!(err.code(), codes::UNDEFINED_PACKAGE);
    }

    #[test]
    fn test_messages() {
        let err = ResolveError::TypeNotFound {
            module: Arc::from("example.com/foo"),
            name: SmolStr::new("Missing"),
        };
        assert_eq!(
            err.to_string(),
            "type Missing is not declared in module \"example.com/foo\""
        );

        let err = ResolveError::Parse {
            path: PathBuf::from("foo.go"),
            error: ParseError::new(LineCol::new(2, 4), "expected type"),
        };
        assert_eq!(err.to_string(), "foo.go:3:5: expected type");

        let err = ResolveError::CyclicEmbedding {
            cycle: vec![TypeKey::new("m", "A"), TypeKey::new("m", "B"), TypeKey::new("m", "A")],
        };
        assert_eq!(err.to_string(), "embedding cycle: m.A -> m.B -> m.A");
    }

    #[test]
    fn test_context_chain() {
        let err = ResolveError::NotFound {
            path: Arc::from("example.com/empty"),
        }
        .in_import("example.com/empty");

        assert_eq!(err.to_string(), "while loading import \"example.com/empty\"");
        let source = std::error::Error::source(&err).map(ToString::to_string);
        assert_eq!(source.as_deref(), Some("no Go files in module \"example.com/empty\""));
    }

    #[test]
    fn test_resolution_lists_searched_dirs() {
        let err = ResolveError::Resolution {
            path: Arc::from("example.com/x"),
            searched: vec![PathBuf::from("/go/src/example.com/x")],
        };
        assert_eq!(
            err.to_string(),
            "cannot find module \"example.com/x\" in any of:\n\t/go/src/example.com/x"
        );
    }
}
