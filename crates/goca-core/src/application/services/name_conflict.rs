//! Detects constructs that already exist in the project tree.
//!
//! Convention: one entity per file, directly inside the domain layer
//! directory. Support files sharing that directory are not entities.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, instrument};

use crate::{
    application::ports::Filesystem,
    domain::{DomainError, NON_ENTITY_STEMS, naming},
    error::GocaResult,
};

pub const DEFAULT_EXTENSION: &str = "go";

pub struct NameConflictDetector {
    filesystem: Arc<dyn Filesystem>,
    directory: PathBuf,
    extension: String,
    /// Normalized name → file name as found on disk.
    existing: BTreeMap<String, String>,
}

impl NameConflictDetector {
    pub fn new(filesystem: Arc<dyn Filesystem>, directory: impl Into<PathBuf>) -> Self {
        Self {
            filesystem,
            directory: directory.into(),
            extension: DEFAULT_EXTENSION.to_string(),
            existing: BTreeMap::new(),
        }
    }

    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Rebuild the set of existing entities from disk.
    ///
    /// A missing directory is an empty project, not an error.
    #[instrument(skip_all, fields(directory = %self.directory.display()))]
    pub fn scan_existing_entities(&mut self) -> GocaResult<Vec<String>> {
        self.existing.clear();

        if !self.filesystem.exists(&self.directory) {
            debug!("domain directory absent");
            return Ok(Vec::new());
        }

        for path in self.filesystem.list_files(&self.directory)? {
            if path.extension().and_then(|e| e.to_str()) != Some(self.extension.as_str()) {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            if stem.ends_with("_test") || NON_ENTITY_STEMS.contains(&stem) {
                continue;
            }
            let file_name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            self.existing.insert(naming::normalize(stem), file_name);
        }

        debug!(count = self.existing.len(), "entities scanned");
        Ok(self.existing.values().cloned().collect())
    }

    /// Fails if `name` matches a scanned entity, ignoring case and separators.
    pub fn check_name_conflict(&self, name: &str) -> GocaResult<()> {
        match self.existing.get(&naming::normalize(name)) {
            Some(existing) => Err(DomainError::DuplicateEntity {
                name: name.to_string(),
                existing: existing.clone(),
            }
            .into()),
            None => Ok(()),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.existing.contains_key(&naming::normalize(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{application::services::testing::FakeFilesystem, error::GocaError};

    fn detector(files: &[&str]) -> NameConflictDetector {
        let fs = FakeFilesystem::with_files(files.iter().map(|f| (*f, "package domain")));
        NameConflictDetector::new(Arc::new(fs), "/p/internal/domain")
    }

    #[test]
    fn missing_directory_is_empty() {
        let mut detector = detector(&[]);
        assert!(detector.scan_existing_entities().unwrap().is_empty());
        assert!(detector.check_name_conflict("User").is_ok());
    }

    #[test]
    fn conflicts_ignore_case() {
        for existing in ["user.go", "User.go", "USER.go"] {
            let path = format!("/p/internal/domain/{existing}");
            let mut detector = detector(&[path.as_str()]);
            detector.scan_existing_entities().unwrap();

            for candidate in ["User", "user", "USER"] {
                let err = detector.check_name_conflict(candidate).unwrap_err();
                assert!(matches!(
                    err,
                    GocaError::Domain(DomainError::DuplicateEntity { .. })
                ));
            }
        }
    }

    #[test]
    fn conflicts_ignore_separators() {
        let mut detector = detector(&["/p/internal/domain/order_item.go"]);
        detector.scan_existing_entities().unwrap();
        assert!(detector.contains("OrderItem"));
        assert!(detector.check_name_conflict("Order").is_ok());
    }

    #[test]
    fn support_files_are_not_entities() {
        let mut detector = detector(&[
            "/p/internal/domain/errors.go",
            "/p/internal/domain/validations.go",
            "/p/internal/domain/common.go",
            "/p/internal/domain/user_test.go",
            "/p/internal/domain/README.md",
            "/p/internal/domain/product.go",
            "/p/internal/domain/nested/order.go",
        ]);
        let found = detector.scan_existing_entities().unwrap();
        assert_eq!(found, ["product.go"]);
        assert!(detector.check_name_conflict("Errors").is_ok());
        assert!(detector.check_name_conflict("Order").is_ok());
    }

    #[test]
    fn rescan_reflects_current_tree() {
        let fs = Arc::new(FakeFilesystem::with_files([("/p/d/user.go", "")]));
        let mut detector = NameConflictDetector::new(fs.clone(), "/p/d");
        detector.scan_existing_entities().unwrap();
        assert!(!detector.contains("Order"));

        fs.write_file(Path::new("/p/d/order.go"), "").unwrap();
        let found = detector.scan_existing_entities().unwrap();
        assert_eq!(found, ["order.go", "user.go"]);
        assert!(detector.contains("Order"));
    }

    #[test]
    fn custom_extension() {
        let mut detector = detector(&["/p/internal/domain/user.rs"]).with_extension("rs");
        detector.scan_existing_entities().unwrap();
        assert!(detector.contains("User"));
    }
}
