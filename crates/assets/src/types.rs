//! Structure config types.
//!
//! These mirror the external `asset.json`/`asset.yml` format: a config keyed
//! by project category (`app`, `pkg`, `all`), each category holding an
//! ordered list of path entries. Loading is left to the caller (see
//! `mason-util::serial`); the projection engine consumes parsed values.
//!
//! Ordering matters: entries and files are processed in config order, so a
//! later file targeting the same destination wins only according to its own
//! overwrite flag.

use serde::{Deserialize, Serialize};

/// One file to copy into a path entry's directory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileEntry {
  /// Named constraints gating this file; all must pass.
  pub constraints: Vec<String>,

  /// Source path, relative to the platform directory.
  pub from: String,

  /// Destination path, relative to the owning entry's directory.
  pub to: String,

  /// Replace an existing destination file.
  #[serde(rename = "override")]
  pub overwrite: bool,

  /// Copy this file during update-mode runs. Files with `update: false`
  /// are protected from being clobbered when re-running on an existing
  /// project.
  pub update: bool,
}

/// One directory to create, plus the files that live in it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathEntry {
  /// Named constraints gating the whole entry; all must pass.
  pub constraints: Vec<String>,

  /// Directory path, relative to the project directory.
  pub entry: String,

  /// Files to copy into the directory, in order.
  pub files: Vec<FileEntry>,
}

/// An ordered list of path entries for one project category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StructureSection {
  pub paths: Vec<PathEntry>,
}

/// The full structure config: per-category sections.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StructureConfig {
  /// Entries for application-level projects.
  pub app: StructureSection,

  /// Entries for package-level projects.
  pub pkg: StructureSection,

  /// Entries shared by every project kind.
  pub all: StructureSection,
}
