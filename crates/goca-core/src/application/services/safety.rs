//! Safety Coordinator - every generated file goes through here.
//!
//! Per write:
//!
//! ```text
//! Requested ─▶ dry-run? ──yes──▶ record in ledger, no I/O
//!                 │no
//!                 ▼
//!          exists & !force? ──yes──▶ FileConflict
//!                 │no
//!                 ▼
//!          backup & exists? ──yes──▶ copy to backup dir (must succeed)
//!                 ▼
//!               write ─▶ record in ledger
//! ```

use std::fmt;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, instrument, trace};

use crate::{
    application::{ApplicationError, ports::Filesystem},
    error::{GocaError, GocaResult},
};

/// Default backup directory, relative to the project root.
pub const DEFAULT_BACKUP_DIR: &str = ".goca-backup";

/// Extension appended to backed-up file names.
pub const BACKUP_SUFFIX: &str = "backup";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SafetyOptions {
    /// Project root; relative write paths are resolved against it.
    pub root: PathBuf,
    pub dry_run: bool,
    pub force: bool,
    pub backup: bool,
    /// Relative to `root` unless absolute.
    pub backup_dir: PathBuf,
}

impl SafetyOptions {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            dry_run: false,
            force: false,
            backup: false,
            backup_dir: PathBuf::from(DEFAULT_BACKUP_DIR),
        }
    }

    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    pub fn backup(mut self, backup: bool) -> Self {
        self.backup = backup;
        self
    }

    pub fn backup_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.backup_dir = dir.into();
        self
    }
}

/// One ledger entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedWrite {
    pub path: PathBuf,
    pub bytes: usize,
    /// The target existed before this write.
    pub would_overwrite: bool,
}

/// What a run did (or, in dry-run, would do).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DryRunSummary {
    pub dry_run: bool,
    /// Ledger entries, paths relative to the project root.
    pub files: Vec<PlannedWrite>,
    /// Targets that exist and would be refused without `--force`.
    pub conflicts: Vec<PathBuf>,
    pub total_bytes: usize,
}

impl DryRunSummary {
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl fmt::Display for DryRunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = if self.dry_run { "would be written" } else { "written" };
        writeln!(
            f,
            "{} file(s) {verb} ({} bytes)",
            self.files.len(),
            self.total_bytes
        )?;
        for file in &self.files {
            let (marker, note) = if file.would_overwrite {
                ('~', ", overwrite")
            } else {
                ('+', "")
            };
            writeln!(
                f,
                "  {marker} {} ({} bytes{note})",
                file.path.display(),
                file.bytes
            )?;
        }
        if !self.conflicts.is_empty() {
            writeln!(f, "Conflicts (use --force to overwrite):")?;
            for path in &self.conflicts {
                writeln!(f, "  ! {}", path.display())?;
            }
        }
        Ok(())
    }
}

/// Wraps every file write with dry-run, conflict, backup and force handling.
///
/// Invocation-scoped: the ledger lives as long as the coordinator.
pub struct SafetyCoordinator {
    filesystem: Arc<dyn Filesystem>,
    options: SafetyOptions,
    ledger: Vec<PlannedWrite>,
    conflicts: Vec<PathBuf>,
}

impl SafetyCoordinator {
    pub fn new(filesystem: Arc<dyn Filesystem>, options: SafetyOptions) -> Self {
        Self {
            filesystem,
            options,
            ledger: Vec::new(),
            conflicts: Vec::new(),
        }
    }

    pub fn options(&self) -> &SafetyOptions {
        &self.options
    }

    pub fn is_dry_run(&self) -> bool {
        self.options.dry_run
    }

    /// Fails iff `path` exists and neither force nor dry-run is on.
    pub fn check_file_conflict(&self, path: &Path) -> GocaResult<()> {
        let path = self.absolute(path);
        if self.options.force || self.options.dry_run || !self.filesystem.exists(&path) {
            return Ok(());
        }
        Err(ApplicationError::FileConflict { path }.into())
    }

    /// Persist `content` at `path`, or only record it in dry-run.
    #[instrument(skip_all, fields(path = %path.display(), bytes = content.len()))]
    pub fn write_file(&mut self, path: &Path, content: &str) -> GocaResult<()> {
        let target = self.absolute(path);
        let exists = self.filesystem.exists(&target);
        let entry = PlannedWrite {
            path: target.clone(),
            bytes: content.len(),
            would_overwrite: exists,
        };

        if self.options.dry_run {
            if exists && !self.options.force {
                self.conflicts.push(target);
            }
            debug!(overwrite = exists, "dry-run: recorded");
            self.ledger.push(entry);
            return Ok(());
        }

        self.check_file_conflict(&target)?;

        if exists && self.options.backup {
            self.backup_file(&target)?;
        }

        if let Some(parent) = target.parent().filter(|p| !p.as_os_str().is_empty()) {
            self.filesystem.create_dir_all(parent)?;
        }
        self.filesystem.write_file(&target, content)?;
        debug!(overwrite = exists, "written");

        self.ledger.push(entry);
        Ok(())
    }

    /// Copy `path` to `<backup_dir>/<path relative to root>.backup`.
    ///
    /// Returns the backup location. Any failure is `BackupFailed`.
    #[instrument(skip_all, fields(path = %path.display()))]
    pub fn backup_file(&self, path: &Path) -> GocaResult<PathBuf> {
        let source = self.absolute(path);
        let destination = self.backup_path(&source);
        let failed = |err: GocaError| -> GocaError {
            ApplicationError::BackupFailed {
                path: source.clone(),
                reason: err.to_string(),
            }
            .into()
        };

        if let Some(parent) = destination.parent() {
            self.filesystem.create_dir_all(parent).map_err(failed)?;
        }
        self.filesystem
            .copy_file(&source, &destination)
            .map_err(failed)?;

        trace!(backup = %destination.display(), "backup written");
        Ok(destination)
    }

    /// Where `path` would be backed up to.
    pub fn backup_path(&self, path: &Path) -> PathBuf {
        let source = self.absolute(path);
        let relative: PathBuf = match source.strip_prefix(&self.options.root) {
            Ok(rel) => rel.to_path_buf(),
            Err(_) => source
                .components()
                .filter(|c| matches!(c, Component::Normal(_)))
                .collect(),
        };

        let mut file_name = relative.file_name().unwrap_or_default().to_os_string();
        file_name.push(".");
        file_name.push(BACKUP_SUFFIX);

        let backup_root = self.options.root.join(&self.options.backup_dir);
        backup_root.join(relative.with_file_name(file_name))
    }

    /// The ledger, in request order.
    pub fn created_files(&self) -> &[PlannedWrite] {
        &self.ledger
    }

    /// Targets found to exist during a dry run.
    pub fn conflicts(&self) -> &[PathBuf] {
        &self.conflicts
    }

    pub fn summary(&self) -> DryRunSummary {
        let files: Vec<PlannedWrite> = self
            .ledger
            .iter()
            .map(|w| PlannedWrite {
                path: self.relative(&w.path),
                ..w.clone()
            })
            .collect();

        DryRunSummary {
            dry_run: self.options.dry_run,
            total_bytes: files.iter().map(|w| w.bytes).sum(),
            conflicts: self.conflicts.iter().map(|p| self.relative(p)).collect(),
            files,
        }
    }

    fn absolute(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.options.root.join(path)
        }
    }

    fn relative(&self, path: &Path) -> PathBuf {
        path.strip_prefix(&self.options.root)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| path.to_path_buf())
    }
}
