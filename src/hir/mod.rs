//! Semantic layer over parsed Go packages.
//!
//! ```text
//! method_set  → deep method sets, member set intersection
//!   ↓
//! resolve     → type reference → declaring module
//!   ↓
//! index       → declaration lookups within a module
//!   ↓
//! module      → a loaded package and its files
//! ```

pub mod diagnostics;
pub mod ids;
pub mod index;
pub mod method_set;
pub mod module;
pub mod qualify;
pub mod resolve;
mod source;

pub use diagnostics::{ResolveError, codes};
pub use ids::TypeKey;
pub use index::{find_interface, find_methods, find_struct, find_type, scan_decls};
pub use method_set::{MemberSet, MethodSignature, SignatureKey, compare, resolve_deep, resolve_path};
pub use module::{Module, ModuleFile};
pub use qualify::{qualify, qualify_fields, qualify_func};
pub use resolve::{ResolvedType, Resolver};
pub use source::FileSet;
