//! Loader configuration.

use std::ffi::OsString;
use std::path::PathBuf;

/// Where a [`ModuleLoader`](super::ModuleLoader) looks for packages and
/// whether it memoizes what it loads.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoaderConfig {
    /// Directory relative imports and `go.mod` discovery start from.
    /// `None` disables both.
    pub working_dir: Option<PathBuf>,
    /// Go installation; its `src` directory holds the standard library.
    pub goroot: Option<PathBuf>,
    /// GOPATH workspaces, searched in order.
    pub gopath: Vec<PathBuf>,
    /// Keep loaded modules for the lifetime of the loader.
    pub cache: bool,
}

impl LoaderConfig {
    /// Configuration from `GOROOT`, `GOPATH` and the current directory.
    ///
    /// An unset or empty `GOPATH` falls back to `~/go` like the go tool.
    pub fn from_env() -> Self {
        Self::from_vars(
            std::env::current_dir().ok(),
            std::env::var_os("GOROOT"),
            std::env::var_os("GOPATH"),
            dirs::home_dir(),
        )
    }

    pub(crate) fn from_vars(
        working_dir: Option<PathBuf>,
        goroot: Option<OsString>,
        gopath: Option<OsString>,
        home: Option<PathBuf>,
    ) -> Self {
        let goroot = goroot.filter(|value| !value.is_empty()).map(PathBuf::from);
        let mut gopath: Vec<PathBuf> = gopath
            .map(|value| {
                std::env::split_paths(&value)
                    .filter(|path| !path.as_os_str().is_empty())
                    .collect()
            })
            .unwrap_or_default();
        if gopath.is_empty() {
            gopath.extend(home.map(|home| home.join("go")));
        }
        Self {
            working_dir,
            goroot,
            gopath,
            cache: true,
        }
    }

    /// No source roots at all; only modules added in memory can be loaded.
    pub fn detached() -> Self {
        Self {
            working_dir: None,
            goroot: None,
            gopath: Vec::new(),
            cache: true,
        }
    }

    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    pub fn with_goroot(mut self, goroot: impl Into<PathBuf>) -> Self {
        self.goroot = Some(goroot.into());
        self
    }

    /// Replace the GOPATH list.
    pub fn with_gopath<I, P>(mut self, gopath: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.gopath = gopath.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_cache(mut self, cache: bool) -> Self {
        self.cache = cache;
        self
    }
}
