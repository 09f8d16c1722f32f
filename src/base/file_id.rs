//! File identifiers for parsed source files.

use std::fmt;

/// A handle for one `.go` file known to a [`FileSet`](crate::hir::FileSet).
///
/// Ids are handed out sequentially by the file set of a single loader, so
/// they are only meaningful within that loader's resolution run.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct FileId(pub u32);

impl FileId {
    #[inline]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Position in the owning file set.
    #[inline]
    pub const fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FileId({})", self.0)
    }
}
