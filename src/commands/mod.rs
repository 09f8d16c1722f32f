// src/commands/mod.rs
//
// Each command resolves everything it needs first and returns the text to
// print, so a failure leaves stdout empty.

pub mod interface;
pub mod mock;
pub mod stub;

use thiserror::Error;

/// Arguments clap accepted but the command cannot use.
#[derive(Debug, Error)]
pub enum UsageError {
    #[error("invalid type {0:?}: expected import/path.TypeName")]
    InvalidTarget(String),
}
