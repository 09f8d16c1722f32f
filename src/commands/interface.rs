// src/commands/interface.rs

use anyhow::Context;
use rayon::prelude::*;

use super::UsageError;
use crate::hir::{MemberSet, resolve_path};
use crate::project::ModuleLoader;
use crate::synth::{intersect_all, render_interface};

/// `import/path.Type` split at the last dot.
pub fn split_target(target: &str) -> Result<(&str, &str), UsageError> {
    match target.rsplit_once('.') {
        Some((path, name)) if !path.is_empty() && !name.is_empty() => Ok((path, name)),
        _ => Err(UsageError::InvalidTarget(target.to_string())),
    }
}

/// Interface `out` made of the methods every target type has.
pub fn execute(loader: &ModuleLoader, out: &str, targets: &[String]) -> anyhow::Result<String> {
    let targets = targets
        .iter()
        .map(|target| split_target(target))
        .collect::<Result<Vec<_>, _>>()?;

    let sets = targets
        .par_iter()
        .map(|&(path, name)| {
            resolve_path(loader, path, name).with_context(|| format!("resolving {path}.{name}"))
        })
        .collect::<anyhow::Result<Vec<MemberSet>>>()?;

    tracing::debug!(targets = sets.len(), "intersecting method sets");
    Ok(render_interface(out, &intersect_all(sets)))
}
