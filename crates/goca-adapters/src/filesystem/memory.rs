//! In-memory filesystem adapter for testing and previews.

use std::{
    collections::{BTreeMap, BTreeSet},
    path::{Path, PathBuf},
    sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use goca_core::{
    application::{ApplicationError, ports::Filesystem},
    error::{GocaError, GocaResult},
};

/// In-memory filesystem for testing.
///
/// Clones share the same tree, so a test can keep a handle while the
/// services own another.
#[derive(Debug, Clone, Default)]
pub struct MemoryFilesystem {
    inner: Arc<RwLock<MemoryFilesystemInner>>,
}

#[derive(Debug, Default)]
struct MemoryFilesystemInner {
    files: BTreeMap<PathBuf, String>,
    directories: BTreeSet<PathBuf>,
}

impl MemoryFilesystem {
    /// Create a new empty memory filesystem.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a file, creating its parent directories (testing helper).
    pub fn with_file(self, path: impl AsRef<Path>, content: &str) -> Self {
        let path = path.as_ref();
        {
            let mut inner = self.write_lock();
            if let Some(parent) = path.parent() {
                insert_ancestors(&mut inner.directories, parent);
            }
            inner.files.insert(path.to_path_buf(), content.to_string());
        }
        self
    }

    /// Read a file's content (testing helper).
    pub fn read_file(&self, path: &Path) -> Option<String> {
        self.read_lock().files.get(path).cloned()
    }

    /// Every file path, sorted.
    pub fn all_files(&self) -> Vec<PathBuf> {
        self.read_lock().files.keys().cloned().collect()
    }

    /// Full content snapshot, for before/after comparisons.
    pub fn snapshot(&self) -> BTreeMap<PathBuf, String> {
        self.read_lock().files.clone()
    }

    fn read_lock(&self) -> RwLockReadGuard<'_, MemoryFilesystemInner> {
        self.inner.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write_lock(&self) -> RwLockWriteGuard<'_, MemoryFilesystemInner> {
        self.inner.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

fn insert_ancestors(directories: &mut BTreeSet<PathBuf>, path: &Path) {
    let mut current = PathBuf::new();
    for component in path.components() {
        current.push(component);
        directories.insert(current.clone());
    }
}

fn not_found(path: &Path, reason: &str) -> GocaError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: reason.into(),
    }
    .into()
}

impl Filesystem for MemoryFilesystem {
    fn create_dir_all(&self, path: &Path) -> GocaResult<()> {
        insert_ancestors(&mut self.write_lock().directories, path);
        Ok(())
    }

    fn write_file(&self, path: &Path, content: &str) -> GocaResult<()> {
        let mut inner = self.write_lock();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !inner.directories.contains(parent) {
                return Err(not_found(path, "Parent directory does not exist"));
            }
        }

        inner.files.insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn read_to_string(&self, path: &Path) -> GocaResult<String> {
        self.read_file(path)
            .ok_or_else(|| not_found(path, "No such file"))
    }

    fn copy_file(&self, from: &Path, to: &Path) -> GocaResult<()> {
        let content = self.read_to_string(from)?;
        self.write_file(to, &content)
    }

    fn exists(&self, path: &Path) -> bool {
        let inner = self.read_lock();
        inner.files.contains_key(path) || inner.directories.contains(path)
    }

    fn is_file(&self, path: &Path) -> bool {
        self.read_lock().files.contains_key(path)
    }

    fn list_files(&self, dir: &Path) -> GocaResult<Vec<PathBuf>> {
        let inner = self.read_lock();
        if !inner.directories.contains(dir) {
            return Err(not_found(dir, "No such directory"));
        }
        Ok(inner
            .files
            .keys()
            .filter(|p| p.parent() == Some(dir))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_requires_parent() {
        let fs = MemoryFilesystem::new();
        assert!(fs.write_file(Path::new("/p/a.go"), "x").is_err());
        fs.create_dir_all(Path::new("/p")).unwrap();
        fs.write_file(Path::new("/p/a.go"), "x").unwrap();
        assert_eq!(fs.read_file(Path::new("/p/a.go")).as_deref(), Some("x"));
    }

    #[test]
    fn clones_share_state() {
        let fs = MemoryFilesystem::new().with_file("/p/a.go", "x");
        let other = fs.clone();
        other.copy_file(Path::new("/p/a.go"), Path::new("/p/b.go")).unwrap();
        assert_eq!(fs.all_files().len(), 2);
    }

    #[test]
    fn list_files_is_shallow() {
        let fs = MemoryFilesystem::new()
            .with_file("/p/d/a.go", "")
            .with_file("/p/d/sub/b.go", "");
        assert_eq!(
            fs.list_files(Path::new("/p/d")).unwrap(),
            vec![PathBuf::from("/p/d/a.go")]
        );
        assert!(fs.exists(Path::new("/p/d/sub")));
        assert!(!fs.is_file(Path::new("/p/d/sub")));
    }
}
