// Go source syntax: tree-sitter lowering, declaration AST, and type printer
pub mod ast;
pub mod parser;
pub mod printer;

use thiserror::Error;

use crate::base::{LineCol, LineIndex, TextSize};

pub use ast::{
    ChanDir, Decl, Field, FuncDecl, FuncType, ImportSpec, SourceFile, TypeExpr, TypeSpec,
    is_builtin, is_exported,
};
pub use parser::{parse_file, parse_type};
pub use printer::{aligned_fields, field_list, method_signature, method_signature_at};

/// A syntax error with the position it was found at.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{position}: {message}")]
pub struct ParseError {
    pub position: LineCol,
    pub message: String,
}

impl ParseError {
    pub fn new(position: LineCol, message: impl Into<String>) -> Self {
        Self {
            position,
            message: message.into(),
        }
    }

    /// Build an error for a byte offset into `source`.
    pub fn at(source: &str, offset: TextSize, message: impl Into<String>) -> Self {
        Self::new(LineIndex::new(source).line_col(offset), message)
    }
}
