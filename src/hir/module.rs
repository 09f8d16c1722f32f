//! Loaded Go packages.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use smol_str::SmolStr;

use super::diagnostics::ResolveError;
use super::ids::TypeKey;
use super::source::FileSet;
use crate::base::FileId;
use crate::syntax::{SourceFile, parse_file};

/// One parsed file of a module.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModuleFile {
    pub id: FileId,
    pub path: PathBuf,
    pub syntax: SourceFile,
}

impl ModuleFile {
    /// Parse `text` and register it in `files` as `path` of module `module`.
    pub fn parse(
        files: &FileSet,
        module: &str,
        path: PathBuf,
        text: Arc<str>,
    ) -> Result<Self, ResolveError> {
        let syntax = parse_file(&text).map_err(|error| ResolveError::Parse {
            path: path.clone(),
            error,
        })?;
        let id = files.add(module, &path, text);
        Ok(Self { id, path, syntax })
    }

    pub fn package(&self) -> &str {
        &self.syntax.package
    }
}

/// A Go package: every non-test file of one directory that shares a
/// `package` clause.
///
/// Immutable once built. Modules handed out by a loader are shared as
/// `Arc<Module>` between all resolutions that touch them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Module {
    name: SmolStr,
    path: Arc<str>,
    dir: Option<PathBuf>,
    files: Vec<ModuleFile>,
}

impl Module {
    /// Build a module from parsed files.
    ///
    /// Files are ordered by path. When the files declare several packages,
    /// `main` is dropped first; exactly one package has to remain.
    pub fn from_parsed(
        path: &str,
        dir: Option<PathBuf>,
        mut files: Vec<ModuleFile>,
    ) -> Result<Self, ResolveError> {
        files.sort_by(|a, b| a.path.cmp(&b.path));

        let mut names: Vec<SmolStr> = files.iter().map(|f| f.syntax.package.clone()).collect();
        names.sort_unstable();
        names.dedup();
        if names.len() > 1 {
            names.retain(|name| name != "main");
        }
        let name = match names.as_slice() {
            [] => return Err(ResolveError::NotFound { path: Arc::from(path) }),
            [name] => name.clone(),
            _ => {
                return Err(ResolveError::AmbiguousModule {
                    path: Arc::from(path),
                    names,
                });
            }
        };
        files.retain(|file| file.syntax.package == name);

        Ok(Self {
            name,
            path: Arc::from(path),
            dir,
            files,
        })
    }

    /// Parse in-memory `(file name, source)` pairs into a module.
    pub fn from_sources<I, P, S>(files: &FileSet, path: &str, sources: I) -> Result<Self, ResolveError>
    where
        I: IntoIterator<Item = (P, S)>,
        P: Into<PathBuf>,
        S: Into<Arc<str>>,
    {
        let parsed = sources
            .into_iter()
            .map(|(file, text)| ModuleFile::parse(files, path, file.into(), text.into()))
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_parsed(path, None, parsed)
    }

    /// Name from the `package` clause.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Import path the module was loaded under.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn path_arc(&self) -> Arc<str> {
        self.path.clone()
    }

    /// Directory the files were read from; `None` for in-memory modules.
    pub fn dir(&self) -> Option<&Path> {
        self.dir.as_deref()
    }

    pub fn files(&self) -> &[ModuleFile] {
        &self.files
    }

    pub fn file(&self, id: FileId) -> Option<&ModuleFile> {
        self.files.iter().find(|file| file.id == id)
    }

    /// Key for a type declared in this module.
    pub fn type_key(&self, name: &str) -> TypeKey {
        TypeKey::new(self.path.clone(), name)
    }
}
