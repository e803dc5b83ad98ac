//! mason-vfs: pluggable filesystem backend and copy utilities.
//!
//! This crate provides the storage seam the rest of the workspace builds on:
//! - [`Vfs`]: the backend capability trait
//! - [`OsFs`]: the real filesystem, backed by `std::fs`
//! - [`MemFs`]: a hermetic in-memory tree for tests
//! - [`copy`]: file/directory/batch copy helpers and existence checks
//! - [`path`]: lexical path normalization helpers
//!
//! The backend is always an explicit `&dyn Vfs` argument. There is no
//! process-wide default and no global swap; callers that want hermetic
//! behavior construct a [`MemFs`] and pass it down.

pub mod copy;
pub mod mem;
pub mod os;
pub mod path;

use std::ffi::OsString;
use std::io;
use std::path::Path;
use std::time::SystemTime;

pub use mem::MemFs;
pub use os::OsFs;

/// The kind of node a [`Metadata`] describes.
///
/// `read_dir` entries are classified without following links, so symlinks
/// are visible to callers that need to skip them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
  File,
  Dir,
  Symlink,
}

/// Backend-independent stat result.
#[derive(Debug, Clone)]
pub struct Metadata {
  pub file_type: FileType,
  /// Size in bytes; zero for directories on backends that don't report one.
  pub len: u64,
  /// Unix permission bits. Synthetic on backends without a mode concept.
  pub mode: u32,
  pub modified: SystemTime,
}

impl Metadata {
  pub fn is_dir(&self) -> bool {
    self.file_type == FileType::Dir
  }

  pub fn is_file(&self) -> bool {
    self.file_type == FileType::File
  }

  pub fn is_symlink(&self) -> bool {
    self.file_type == FileType::Symlink
  }
}

/// A single entry returned by [`Vfs::read_dir`].
#[derive(Debug, Clone)]
pub struct DirEntry {
  pub file_name: OsString,
  pub metadata: Metadata,
}

/// Storage backend capability set.
///
/// All operations are blocking and synchronous. Low-level backend failures
/// surface as [`io::Error`]; the higher-level helpers in [`copy`] wrap them
/// into the workspace error taxonomy.
pub trait Vfs: Send + Sync {
  /// Short backend identifier, e.g. `"os"` or `"mem"`.
  fn name(&self) -> &'static str;

  /// Stat a path, following symlinks.
  fn metadata(&self, path: &Path) -> io::Result<Metadata>;

  /// Read the entire contents of a file.
  fn read(&self, path: &Path) -> io::Result<Vec<u8>>;

  /// Create or truncate a file with the given contents, flushed to durable
  /// storage before returning.
  fn write(&self, path: &Path, data: &[u8]) -> io::Result<()>;

  /// Create a single directory. The parent must already exist.
  fn mkdir(&self, path: &Path, mode: u32) -> io::Result<()>;

  /// Create a directory and all missing ancestors. Succeeds if the
  /// directory already exists, in which case its mode is left unchanged.
  fn mkdir_all(&self, path: &Path, mode: u32) -> io::Result<()>;

  /// List a directory, sorted by file name. Entry metadata does not follow
  /// symlinks.
  fn read_dir(&self, path: &Path) -> io::Result<Vec<DirEntry>>;

  /// Remove a file or an empty directory.
  fn remove(&self, path: &Path) -> io::Result<()>;

  /// Remove a path and any children it contains. Succeeds if the path does
  /// not exist.
  fn remove_all(&self, path: &Path) -> io::Result<()>;

  /// Rename a file or directory, replacing any existing destination.
  fn rename(&self, from: &Path, to: &Path) -> io::Result<()>;

  /// Change the permission bits of the named file.
  fn chmod(&self, path: &Path, mode: u32) -> io::Result<()>;

  /// Change the access and modification times of the named file.
  fn chtimes(&self, path: &Path, atime: SystemTime, mtime: SystemTime) -> io::Result<()>;

  /// Create a hard link. Only meaningful on the OS backend.
  fn link(&self, original: &Path, link: &Path) -> io::Result<()>;

  /// Create a symbolic link. Only meaningful on the OS backend.
  fn symlink(&self, original: &Path, link: &Path) -> io::Result<()>;
}
