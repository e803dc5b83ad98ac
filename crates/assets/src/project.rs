//! The asset projection engine.
//!
//! Projection materializes a [`StructureSection`] onto a project directory:
//! entry by entry, create the directory (unless a directory constraint
//! forbids it), then copy each file that passes its own constraint and
//! update gates from the platform directory.
//!
//! Failure policy:
//! - a directory that cannot be created aborts the whole run (no rollback
//!   of directories already created);
//! - a file that cannot be copied does NOT abort the run. The run continues
//!   with the next file; the failure is logged and recorded in the returned
//!   [`ProjectionReport`] so callers can distinguish partial success.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use mason_error::Error;
use mason_vfs::path::join_rel;
use mason_vfs::{Vfs, copy};

use crate::constraint::Constraints;
use crate::types::StructureSection;

/// Mode for directories the engine creates.
const DIR_MODE: u32 = 0o755;

/// Per-run inputs that aren't part of the structure config.
#[derive(Debug, Clone)]
pub struct ProjectionContext {
  /// Absolute destination root; `entry` and `to` paths resolve under it.
  pub project_dir: PathBuf,

  /// Absolute source root; `from` paths resolve under it.
  pub platform_dir: PathBuf,

  /// True when re-running on an existing project. Files with
  /// `update: false` are left untouched in this mode.
  pub update: bool,
}

/// A file copy that failed during a projection run.
#[derive(Debug)]
pub struct CopyFailure {
  pub from: PathBuf,
  pub to: PathBuf,
  pub error: Error,
}

/// What a projection run did.
#[derive(Debug, Default)]
pub struct ProjectionReport {
  /// Directories created by this run (pre-existing ones are not listed).
  pub dirs_created: Vec<PathBuf>,

  /// Destinations whose copy step succeeded. A destination left in place
  /// because it existed and `override` was false counts as copied.
  pub files_copied: Vec<PathBuf>,

  /// Destinations skipped by a constraint or update gate.
  pub files_skipped: Vec<PathBuf>,

  /// Copies that failed; the run continued past each of these.
  pub copy_failures: Vec<CopyFailure>,
}

impl ProjectionReport {
  /// True when every attempted copy succeeded.
  pub fn is_clean(&self) -> bool {
    self.copy_failures.is_empty()
  }
}

/// Project a structure section onto the project directory.
///
/// Entries are processed in config order and evaluated independently; a
/// skipped entry never short-circuits its siblings.
///
/// # Errors
///
/// Only directory creation failures abort the run. Per-file copy failures
/// are collected in the report (see module docs).
pub fn project(
  fs: &dyn Vfs,
  section: &StructureSection,
  constraints: &Constraints,
  ctx: &ProjectionContext,
) -> Result<ProjectionReport, Error> {
  let mut report = ProjectionReport::default();

  for entry in &section.paths {
    if !constraints.directories_allow(&entry.constraints) {
      debug!(entry = %entry.entry, "entry skipped by directory constraint");
      continue;
    }

    let dir = join_rel(&ctx.project_dir, Path::new(&entry.entry));
    if !copy::exists(fs, &dir) {
      fs.mkdir_all(&dir, DIR_MODE)
        .map_err(|e| Error::fatal(format!("failed to create directory '{}'", dir.display()), e))?;
      report.dirs_created.push(dir.clone());
    }

    for file in &entry.files {
      let to = join_rel(&dir, Path::new(&file.to));

      if !constraints.files_allow(&file.constraints) {
        debug!(to = %to.display(), "file skipped by file constraint");
        report.files_skipped.push(to);
        continue;
      }

      // Update mode protects files not marked updatable.
      if !file.update && ctx.update {
        debug!(to = %to.display(), "file skipped in update mode");
        report.files_skipped.push(to);
        continue;
      }

      let from = join_rel(&ctx.platform_dir, Path::new(&file.from));
      match copy::copy_file(fs, &from, &to, file.overwrite) {
        Ok(()) => report.files_copied.push(to),
        Err(error) => {
          warn!(from = %from.display(), to = %to.display(), %error, "asset copy failed, continuing");
          report.copy_failures.push(CopyFailure { from, to, error });
        }
      }
    }
  }

  Ok(report)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::types::{FileEntry, PathEntry};
  use mason_vfs::MemFs;
  use tracing_test::traced_test;

  fn section(entries: Vec<PathEntry>) -> StructureSection {
    StructureSection { paths: entries }
  }

  fn main_cpp_entry(update: bool) -> PathEntry {
    PathEntry {
      constraints: vec![],
      entry: "/src".to_string(),
      files: vec![FileEntry {
        constraints: vec!["cosa".to_string()],
        from: "tmpl/main.cpp".to_string(),
        to: "main.cpp".to_string(),
        overwrite: false,
        update,
      }],
    }
  }

  fn ctx(update: bool) -> ProjectionContext {
    ProjectionContext {
      project_dir: PathBuf::from("/proj"),
      platform_dir: PathBuf::from("/platform"),
      update,
    }
  }

  fn platform_with_main(fs: &MemFs) {
    fs.write(Path::new("/platform/tmpl/main.cpp"), b"int main() {}").unwrap();
  }

  #[test]
  fn satisfied_file_constraint_copies_the_file() {
    let fs = MemFs::new();
    platform_with_main(&fs);
    let constraints = Constraints::new().with_file("cosa", true);

    let report = project(&fs, &section(vec![main_cpp_entry(true)]), &constraints, &ctx(false)).unwrap();

    assert!(report.is_clean());
    assert_eq!(report.dirs_created, [PathBuf::from("/proj/src")]);
    assert_eq!(fs.read(Path::new("/proj/src/main.cpp")).unwrap(), b"int main() {}");
  }

  #[test]
  fn forbidden_file_constraint_still_creates_the_directory() {
    let fs = MemFs::new();
    platform_with_main(&fs);
    let constraints = Constraints::new().with_file("cosa", false);

    let report = project(&fs, &section(vec![main_cpp_entry(true)]), &constraints, &ctx(false)).unwrap();

    assert!(copy::exists(&fs, Path::new("/proj/src")));
    assert!(!copy::exists(&fs, Path::new("/proj/src/main.cpp")));
    assert_eq!(report.files_skipped, [PathBuf::from("/proj/src/main.cpp")]);
  }

  #[test]
  fn forbidden_directory_constraint_skips_entry_and_files() {
    let fs = MemFs::new();
    platform_with_main(&fs);

    let mut entry = main_cpp_entry(true);
    entry.constraints = vec!["header-only".to_string()];
    // The file would pass on its own; the directory gate must win.
    let constraints = Constraints::new().with_directory("header-only", false).with_file("cosa", true);

    let report = project(&fs, &section(vec![entry]), &constraints, &ctx(false)).unwrap();

    assert!(!copy::exists(&fs, Path::new("/proj/src")));
    assert!(report.dirs_created.is_empty());
    assert!(report.files_copied.is_empty());
  }

  #[test]
  fn absent_constraint_names_pass() {
    let fs = MemFs::new();
    platform_with_main(&fs);

    let report = project(
      &fs,
      &section(vec![main_cpp_entry(true)]),
      &Constraints::new(),
      &ctx(false),
    )
    .unwrap();

    assert_eq!(report.files_copied, [PathBuf::from("/proj/src/main.cpp")]);
  }

  #[test]
  fn update_mode_protects_non_updatable_files() {
    let fs = MemFs::new();
    platform_with_main(&fs);
    fs.write(Path::new("/proj/src/main.cpp"), b"hand edited").unwrap();

    let report = project(
      &fs,
      &section(vec![main_cpp_entry(false)]),
      &Constraints::new(),
      &ctx(true),
    )
    .unwrap();

    assert_eq!(fs.read(Path::new("/proj/src/main.cpp")).unwrap(), b"hand edited");
    assert_eq!(report.files_skipped, [PathBuf::from("/proj/src/main.cpp")]);
  }

  #[test]
  fn updatable_files_are_copied_in_update_mode() {
    let fs = MemFs::new();
    platform_with_main(&fs);

    let report = project(&fs, &section(vec![main_cpp_entry(true)]), &Constraints::new(), &ctx(true)).unwrap();
    assert_eq!(report.files_copied, [PathBuf::from("/proj/src/main.cpp")]);
  }

  #[test]
  fn rerunning_without_override_is_idempotent() {
    let fs = MemFs::new();
    platform_with_main(&fs);
    let tree = section(vec![main_cpp_entry(true)]);

    project(&fs, &tree, &Constraints::new(), &ctx(false)).unwrap();
    fs.write(Path::new("/platform/tmpl/main.cpp"), b"changed upstream").unwrap();
    let report = project(&fs, &tree, &Constraints::new(), &ctx(false)).unwrap();

    // override=false: the second run leaves the first run's output alone.
    assert!(report.is_clean());
    assert_eq!(fs.read(Path::new("/proj/src/main.cpp")).unwrap(), b"int main() {}");
    assert!(report.dirs_created.is_empty());
  }

  #[test]
  fn entries_are_independent_and_processed_in_order() {
    let fs = MemFs::new();
    platform_with_main(&fs);

    let mut gated = main_cpp_entry(true);
    gated.constraints = vec!["skip-me".to_string()];
    let second = PathEntry {
      constraints: vec![],
      entry: "/include".to_string(),
      files: vec![],
    };

    let constraints = Constraints::new().with_directory("skip-me", false);
    let report = project(&fs, &section(vec![gated, second]), &constraints, &ctx(false)).unwrap();

    // The skipped first entry must not short-circuit the second.
    assert_eq!(report.dirs_created, [PathBuf::from("/proj/include")]);
  }

  #[traced_test]
  #[test]
  fn copy_failure_is_recorded_and_does_not_abort() {
    let fs = MemFs::new();
    // Two files in one entry, the first has no source on the platform.
    let entry = PathEntry {
      constraints: vec![],
      entry: "/src".to_string(),
      files: vec![
        FileEntry {
          from: "missing/one.cpp".to_string(),
          to: "one.cpp".to_string(),
          update: true,
          ..FileEntry::default()
        },
        FileEntry {
          from: "tmpl/main.cpp".to_string(),
          to: "main.cpp".to_string(),
          update: true,
          ..FileEntry::default()
        },
      ],
    };
    platform_with_main(&fs);

    let report = project(&fs, &section(vec![entry]), &Constraints::new(), &ctx(false)).unwrap();

    assert!(!report.is_clean());
    assert_eq!(report.copy_failures.len(), 1);
    assert!(matches!(report.copy_failures[0].error, Error::PathNotFound { .. }));
    assert_eq!(report.files_copied, [PathBuf::from("/proj/src/main.cpp")]);
    assert!(logs_contain("asset copy failed"));
  }

  #[test]
  fn directory_creation_failure_aborts_the_run() {
    let fs = MemFs::new();
    platform_with_main(&fs);
    // A file where an ancestor of the entry directory should go makes
    // mkdir_all fail. (A file at the entry path itself would pass the
    // existence check and surface as a copy failure instead.)
    fs.write(Path::new("/proj"), b"in the way").unwrap();

    let err = project(
      &fs,
      &section(vec![main_cpp_entry(true)]),
      &Constraints::new(),
      &ctx(false),
    )
    .unwrap_err();

    assert!(matches!(err, Error::Fatal { .. }));
    assert!(err.to_string().contains("failed to create directory"));
  }

  #[test]
  fn file_at_entry_path_surfaces_as_copy_failure_not_fatal() {
    let fs = MemFs::new();
    platform_with_main(&fs);
    // The entry path exists (as a file), so directory creation is skipped
    // and the copy into it fails instead.
    fs.write(Path::new("/proj/src"), b"in the way").unwrap();

    let report = project(
      &fs,
      &section(vec![main_cpp_entry(true)]),
      &Constraints::new(),
      &ctx(false),
    )
    .unwrap();

    assert!(report.dirs_created.is_empty());
    assert_eq!(report.copy_failures.len(), 1);
    assert!(report.files_copied.is_empty());
  }

  #[test]
  fn destination_paths_are_cleaned() {
    let fs = MemFs::new();
    platform_with_main(&fs);

    let mut entry = main_cpp_entry(true);
    entry.entry = "/src/".to_string();
    entry.files[0].to = "./main.cpp".to_string();

    project(&fs, &section(vec![entry]), &Constraints::new(), &ctx(false)).unwrap();
    assert!(copy::exists(&fs, Path::new("/proj/src/main.cpp")));
  }
}
