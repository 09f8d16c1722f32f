//! Foundation types shared by every layer.
//!
//! - [`FileId`] - handle for a parsed source file within one loader
//! - [`TextRange`], [`TextSize`] - byte positions of tokens
//! - [`LineCol`], [`LineIndex`] - line/column conversion for diagnostics
//!
//! This module has NO dependencies on other crate modules.

mod file_id;
mod span;

pub use file_id::FileId;
pub use span::{LineCol, LineIndex, TextRange, TextSize};

pub use text_size;
