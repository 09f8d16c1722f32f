//! File set management for loaded Go sources.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::RwLock;
use smol_str::SmolStr;

use crate::base::FileId;

/// Assigns stable [`FileId`]s to source files and keeps the text that was
/// parsed for each of them.
///
/// A file is identified by the import path of its module together with its
/// own path, so in-memory modules may reuse a file name such as `src.go`.
/// Shared by every module a loader produces, so ids are unique across
/// modules for the lifetime of the loader.
#[derive(Debug, Default)]
pub struct FileSet {
    inner: RwLock<FileSetInner>,
}

#[derive(Debug, Default)]
struct FileSetInner {
    /// (module, path) → FileId mapping; insertion order is id order
    ids: IndexMap<(SmolStr, PathBuf), FileId>,
    /// Text indexed by `FileId::index`
    contents: Vec<Arc<str>>,
}

impl FileSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `path` of module `module` with its text and return its id.
    ///
    /// A file seen before keeps its id; its text is replaced.
    pub fn add(&self, module: &str, path: &Path, contents: impl Into<Arc<str>>) -> FileId {
        let contents = contents.into();
        let key = (SmolStr::new(module), path.to_owned());
        let mut inner = self.inner.write();
        if let Some(&id) = inner.ids.get(&key) {
            inner.contents[id.index() as usize] = contents;
            return id;
        }
        let id = FileId::new(inner.contents.len() as u32);
        inner.ids.insert(key, id);
        inner.contents.push(contents);
        id
    }

    /// Id of an already registered file.
    pub fn file_id(&self, module: &str, path: &Path) -> Option<FileId> {
        self.inner
            .read()
            .ids
            .get(&(SmolStr::new(module), path.to_owned()))
            .copied()
    }

    pub fn path(&self, file: FileId) -> Option<PathBuf> {
        self.inner
            .read()
            .ids
            .get_index(file.index() as usize)
            .map(|((_, path), _)| path.clone())
    }

    pub fn contents(&self, file: FileId) -> Option<Arc<str>> {
        self.inner.read().contents.get(file.index() as usize).cloned()
    }

    pub fn len(&self) -> usize {
        self.inner.read().contents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
