//! Loading Go packages by import path.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::RwLock;
use rayon::prelude::*;
use rustc_hash::FxHashMap;

use super::config::LoaderConfig;
use super::file_loader;
use super::locate::{Locate, SourceRoots};
use crate::hir::{FileSet, Module, ModuleFile, ResolveError};

/// Loads modules and memoizes them by import path.
///
/// The cache lives as long as the loader; there is no global state. A
/// loader is `Sync`, so several resolutions may share one. When two of
/// them load the same path at once both parse it, the first result stored
/// wins, and both get that stored module back.
pub struct ModuleLoader {
    locator: Box<dyn Locate>,
    files: FileSet,
    cache: RwLock<FxHashMap<Arc<str>, Arc<Module>>>,
    /// Whether modules read from disk are kept.
    caching: bool,
}

impl ModuleLoader {
    pub fn new(config: LoaderConfig) -> Self {
        let locator = SourceRoots::new(&config);
        Self::with_locator(config, locator)
    }

    pub fn with_locator(config: LoaderConfig, locator: impl Locate + 'static) -> Self {
        Self {
            locator: Box::new(locator),
            files: FileSet::new(),
            cache: RwLock::new(FxHashMap::default()),
            caching: config.cache,
        }
    }

    /// Load the module for `path`, from the cache when possible.
    ///
    /// Modules added with [`insert`](Self::insert) are always served from
    /// the cache, even when caching of disk loads is turned off.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn load(&self, path: &str) -> Result<Arc<Module>, ResolveError> {
        if let Some(module) = self.get(path) {
            tracing::debug!("cache hit");
            return Ok(module);
        }
        tracing::debug!("cache miss");

        let module = self.load_fresh(path)?;
        if self.caching {
            Ok(self.insert(module))
        } else {
            Ok(Arc::new(module))
        }
    }

    /// Load `path` from disk, ignoring and not touching the cache.
    pub fn load_fresh(&self, path: &str) -> Result<Module, ResolveError> {
        let dir = self.locator.locate(path)?;
        let paths = file_loader::collect_file_paths(&dir)?;

        // Parse files in parallel
        let files = paths
            .par_iter()
            .map(|file| self.parse(path, file))
            .collect::<Result<Vec<_>, _>>()?;

        let module = Module::from_parsed(path, Some(dir), files)?;
        tracing::debug!(
            path,
            name = module.name(),
            dir = ?module.dir(),
            files = module.files().len(),
            "loaded module"
        );
        Ok(module)
    }

    fn parse(&self, module: &str, file: &Path) -> Result<ModuleFile, ResolveError> {
        let text = file_loader::read_source(file)?;
        ModuleFile::parse(&self.files, module, file.to_path_buf(), text)
    }

    /// Store `module` under its import path unless one is already stored,
    /// and return the stored module.
    pub fn insert(&self, module: Module) -> Arc<Module> {
        let mut cache = self.cache.write();
        cache
            .entry(module.path_arc())
            .or_insert_with(|| Arc::new(module))
            .clone()
    }

    /// Parse in-memory sources into a module and store it under `path`.
    pub fn add_sources<I, P, S>(&self, path: &str, sources: I) -> Result<Arc<Module>, ResolveError>
    where
        I: IntoIterator<Item = (P, S)>,
        P: Into<PathBuf>,
        S: Into<Arc<str>>,
    {
        let module = Module::from_sources(&self.files, path, sources)?;
        Ok(self.insert(module))
    }

    /// The stored module for `path`, if any.
    pub fn get(&self, path: &str) -> Option<Arc<Module>> {
        self.cache.read().get(path).cloned()
    }

    /// Import paths of every stored module, sorted.
    pub fn loaded(&self) -> Vec<Arc<str>> {
        let mut paths: Vec<_> = self.cache.read().keys().cloned().collect();
        paths.sort();
        paths
    }

    /// Every file parsed by this loader.
    pub fn file_set(&self) -> &FileSet {
        &self.files
    }
}

impl std::fmt::Debug for ModuleLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModuleLoader")
            .field("loaded", &self.loaded())
            .field("caching", &self.caching)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Serves every import path from one directory and counts lookups.
    struct Fixed {
        dir: PathBuf,
        calls: Arc<AtomicUsize>,
    }

    impl Locate for Fixed {
        fn locate(&self, _: &str) -> Result<PathBuf, ResolveError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.dir.clone())
        }
    }

    fn fixture(dir: &Path, cache: bool) -> (ModuleLoader, Arc<AtomicUsize>) {
        fs::write(dir.join("foo.go"), "package foo\n\ntype Foo struct{}\n").unwrap();
        let calls = Arc::new(AtomicUsize::new(0));
        let locator = Fixed {
            dir: dir.to_path_buf(),
            calls: calls.clone(),
        };
        let loader = ModuleLoader::with_locator(LoaderConfig::detached().with_cache(cache), locator);
        (loader, calls)
    }

    #[test]
    fn test_cache_hit_skips_disk() {
        let tmp = tempfile::tempdir().unwrap();
        let (loader, calls) = fixture(tmp.path(), true);

        let first = loader.load("example.com/foo").unwrap();
        let second = loader.load("example.com/foo").unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(loader.loaded(), vec![Arc::<str>::from("example.com/foo")]);
    }

    #[test]
    fn test_cache_disabled() {
        let tmp = tempfile::tempdir().unwrap();
        let (loader, calls) = fixture(tmp.path(), false);

        let first = loader.load("example.com/foo").unwrap();
        let second = loader.load("example.com/foo").unwrap();

        assert_eq!(first, second);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert!(loader.loaded().is_empty());
    }

    #[test]
    fn test_cached_equals_fresh() {
        let tmp = tempfile::tempdir().unwrap();
        let (loader, _) = fixture(tmp.path(), true);

        let cached = loader.load("example.com/foo").unwrap();
        let fresh = loader.load_fresh("example.com/foo").unwrap();
        assert_eq!(*cached, fresh);
    }

    #[test]
    fn test_first_insert_wins() {
        let loader = ModuleLoader::new(LoaderConfig::detached());
        let first = loader
            .add_sources("m", [("a.go", "package m\n\ntype A struct{}\n")])
            .unwrap();
        let second = loader
            .add_sources("m", [("b.go", "package m\n\ntype B struct{}\n")])
            .unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(loader.load("m").unwrap().files()[0].path, PathBuf::from("a.go"));
    }

    #[test]
    fn test_shared_file_name_across_modules() {
        let loader = ModuleLoader::new(LoaderConfig::detached());
        let foo = loader
            .add_sources("example.com/foo", [("src.go", "package foo\n")])
            .unwrap();
        let bar = loader
            .add_sources("example.com/bar", [("src.go", "package bar\n")])
            .unwrap();

        let (foo_id, bar_id) = (foo.files()[0].id, bar.files()[0].id);
        assert_ne!(foo_id, bar_id);
        assert_eq!(loader.file_set().len(), 2);
        assert_eq!(loader.file_set().contents(foo_id).as_deref(), Some("package foo\n"));
        assert_eq!(loader.file_set().contents(bar_id).as_deref(), Some("package bar\n"));
    }

    #[test]
    fn test_concurrent_loads_agree() {
        let tmp = tempfile::tempdir().unwrap();
        let (loader, _) = fixture(tmp.path(), true);

        let modules: Vec<_> = (0..8)
            .into_par_iter()
            .map(|_| loader.load("example.com/foo").unwrap())
            .collect();
        assert!(modules.windows(2).all(|pair| Arc::ptr_eq(&pair[0], &pair[1])));
    }

    #[test]
    fn test_unresolvable_path() {
        let loader = ModuleLoader::new(LoaderConfig::detached());
        let err = loader.load("example.com/nowhere").unwrap_err();
        assert!(matches!(err, ResolveError::Resolution { .. }));
    }
}
