//! Mapping import paths to source directories.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::config::LoaderConfig;
use crate::hir::ResolveError;

/// Finds the directory holding the sources of an import path.
pub trait Locate: Send + Sync {
    fn locate(&self, import_path: &str) -> Result<PathBuf, ResolveError>;
}

/// The enclosing Go module of the working directory.
#[derive(Clone, Debug, PartialEq, Eq)]
struct GoMod {
    root: PathBuf,
    module: String,
}

/// The go tool's search order: relative paths, the enclosing module
/// (vendor directory first), `GOROOT/src`, then each `GOPATH/src`.
#[derive(Clone, Debug)]
pub struct SourceRoots {
    working_dir: Option<PathBuf>,
    go_mod: Option<GoMod>,
    goroot: Option<PathBuf>,
    gopath: Vec<PathBuf>,
}

impl SourceRoots {
    pub fn new(config: &LoaderConfig) -> Self {
        let go_mod = config.working_dir.as_deref().and_then(find_go_mod);
        if let Some(go_mod) = &go_mod {
            tracing::debug!(root = %go_mod.root.display(), module = %go_mod.module, "found go.mod");
        }
        Self {
            working_dir: config.working_dir.clone(),
            go_mod,
            goroot: config.goroot.clone(),
            gopath: config.gopath.clone(),
        }
    }

    /// Directories tried for `import_path`, in order.
    pub fn candidates(&self, import_path: &str) -> Vec<PathBuf> {
        if is_local(import_path) {
            return vec![match &self.working_dir {
                Some(dir) => dir.join(import_path),
                None => PathBuf::from(import_path),
            }];
        }
        if Path::new(import_path).is_absolute() {
            return vec![PathBuf::from(import_path)];
        }

        let mut dirs = Vec::new();
        if let Some(go_mod) = &self.go_mod {
            dirs.push(go_mod.root.join("vendor").join(import_path));
            if import_path == go_mod.module {
                dirs.push(go_mod.root.clone());
            } else if let Some(rest) = import_path
                .strip_prefix(go_mod.module.as_str())
                .and_then(|rest| rest.strip_prefix('/'))
            {
                dirs.push(go_mod.root.join(rest));
            }
        }
        dirs.extend(self.goroot.iter().map(|root| root.join("src").join(import_path)));
        dirs.extend(self.gopath.iter().map(|root| root.join("src").join(import_path)));
        dirs
    }
}

impl Locate for SourceRoots {
    fn locate(&self, import_path: &str) -> Result<PathBuf, ResolveError> {
        let candidates = self.candidates(import_path);
        match candidates.iter().find(|dir| dir.is_dir()) {
            Some(dir) => Ok(dir.clone()),
            None => Err(ResolveError::Resolution {
                path: Arc::from(import_path),
                searched: candidates,
            }),
        }
    }
}

fn is_local(import_path: &str) -> bool {
    import_path == "." || import_path == ".." || import_path.starts_with("./") || import_path.starts_with("../")
}

fn find_go_mod(start: &Path) -> Option<GoMod> {
    start.ancestors().find_map(|dir| {
        let text = std::fs::read_to_string(dir.join("go.mod")).ok()?;
        Some(GoMod {
            root: dir.to_path_buf(),
            module: module_directive(&text)?,
        })
    })
}

/// The path of the `module` directive of a go.mod file.
fn module_directive(go_mod: &str) -> Option<String> {
    go_mod.lines().find_map(|line| {
        let line = line.split("//").next()?.trim();
        let rest = line.strip_prefix("module")?;
        if !rest.starts_with([' ', '\t', '"']) {
            return None;
        }
        let path = rest.trim().trim_matches(|c| c == '"' || c == '`');
        (!path.is_empty()).then(|| path.to_string())
    })
}
