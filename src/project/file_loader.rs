use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::hir::ResolveError;

/// Whether `path` is a Go source file that belongs to the package build
/// (`_test.go` files do not).
pub fn is_package_source(path: &Path) -> bool {
    let Some(name) = path.file_name().and_then(|name| name.to_str()) else {
        return false;
    };
    name.ends_with(".go") && !name.ends_with("_test.go")
}

/// Package source files directly inside `dir`, sorted by name.
pub fn collect_file_paths(dir: &Path) -> Result<Vec<PathBuf>, ResolveError> {
    let io_error = |error: std::io::Error| ResolveError::Io {
        path: dir.to_path_buf(),
        error,
    };
    let mut paths = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(io_error)? {
        let entry = entry.map_err(io_error)?;
        let path = entry.path();
        if is_package_source(&path) && path.is_file() {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

/// Read one source file.
pub fn read_source(path: &Path) -> Result<Arc<str>, ResolveError> {
    std::fs::read_to_string(path)
        .map(Arc::from)
        .map_err(|error| ResolveError::Io {
            path: path.to_path_buf(),
            error,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::fs;

    #[rstest]
    #[case("foo.go", true)]
    #[case("foo_test.go", false)]
    #[case("foo.go.orig", false)]
    #[case("testdata", false)]
    #[case("x_linux.go", true)]
    fn test_is_package_source(#[case] name: &str, #[case] expected: bool) {
        assert_eq!(is_package_source(Path::new(name)), expected);
    }

    #[test]
    fn test_collect_file_paths() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("b.go"), "package x").unwrap();
        fs::write(tmp.path().join("a.go"), "package x").unwrap();
        fs::write(tmp.path().join("a_test.go"), "package x").unwrap();
        fs::write(tmp.path().join("README.md"), "# x").unwrap();
        fs::create_dir(tmp.path().join("sub.go")).unwrap();

        let paths = collect_file_paths(tmp.path()).unwrap();
        let names: Vec<_> = paths
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap())
            .collect();
        assert_eq!(names, vec!["a.go", "b.go"]);
    }

    #[test]
    fn test_missing_dir_is_io_error() {
        let tmp = tempfile::tempdir().unwrap();
        let err = collect_file_paths(&tmp.path().join("nope")).unwrap_err();
        assert!(matches!(err, ResolveError::Io { .. }));
        assert!(matches!(read_source(&tmp.path().join("x.go")), Err(ResolveError::Io { .. })));
    }
}
