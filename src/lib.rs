//! # methodset
//!
//! Method sets of Go types, resolved across packages, and the interface,
//! mock and stub declarations generated from them.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! commands → CLI subcommands, one per generated artifact
//!   ↓
//! synth    → interface requirements, rendering of Go declarations
//!   ↓
//! hir      → declaration index, symbol resolution, deep method sets
//!   ↓
//! project  → locating import paths, loading and caching packages
//!   ↓
//! syntax   → tree-sitter-go lowering, declaration AST, gofmt-style printer
//!   ↓
//! base     → primitives (FileId, LineIndex, text ranges)
//! ```

// ============================================================================
// CORE
// ============================================================================

/// Foundation types: FileId, line/column lookup
pub mod base;

/// Go source: tokens, declarations, printing
pub mod syntax;

/// Import path lookup and the package cache
pub mod project;

/// Semantic model over loaded packages
pub mod hir;

/// Go code generation
pub mod synth;

// ============================================================================
// COMMAND LINE
// ============================================================================

pub mod cli;
pub mod commands;

// Re-export commonly needed items
pub use base::{FileId, LineCol, LineIndex, TextRange, TextSize};
pub use hir::{MemberSet, MethodSignature, Module, ResolveError, resolve_deep, resolve_path};
pub use project::{LoaderConfig, ModuleLoader};
