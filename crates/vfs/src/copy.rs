//! Copy helpers and existence checks over a [`Vfs`] backend.
//!
//! These wrap the low-level backend operations into the workspace error
//! taxonomy. Overwrite policy is uniform: an existing destination without
//! `overwrite` is a silent no-op, never an error.

use std::path::Path;

use mason_error::Error;
use tracing::debug;

use crate::{FileType, Vfs};

/// One source/destination pair for [`copy_many`].
#[derive(Debug, Clone)]
pub struct CopyJob {
  pub src: std::path::PathBuf,
  pub dst: std::path::PathBuf,
  pub overwrite: bool,
}

fn display(path: &Path) -> String {
  path.display().to_string()
}

/// Whether the path exists on the backend (any node type).
pub fn exists(fs: &dyn Vfs, path: &Path) -> bool {
  fs.metadata(path).is_ok()
}

/// Whether the path names a directory. Missing paths are an error.
pub fn is_dir(fs: &dyn Vfs, path: &Path) -> Result<bool, Error> {
  let meta = fs
    .metadata(path)
    .map_err(|e| Error::path_not_found_caused(display(path), e))?;
  Ok(meta.is_dir())
}

/// Whether the directory has no entries. Missing paths are an error.
pub fn is_dir_empty(fs: &dyn Vfs, path: &Path) -> Result<bool, Error> {
  let entries = fs
    .read_dir(path)
    .map_err(|e| Error::path_not_found_caused(display(path), e))?;
  Ok(entries.is_empty())
}

/// Read the entire contents of a file.
pub fn read(fs: &dyn Vfs, path: &Path) -> Result<Vec<u8>, Error> {
  fs.read(path).map_err(|e| Error::read_file(display(path), e))
}

/// Create or replace a file with the given contents.
pub fn write(fs: &dyn Vfs, path: &Path, data: &[u8]) -> Result<(), Error> {
  fs.write(path, data).map_err(|e| Error::write_file(display(path), e))
}

/// Copy a single file from `src` to `dst`.
///
/// The destination is created if missing; if it exists and `overwrite` is
/// false the call is a no-op. The copied bytes are flushed to durable
/// storage and the source's permission bits are applied to the destination.
///
/// # Errors
///
/// Fails when `src` does not exist, names a directory, or when the
/// underlying read/write fails.
pub fn copy_file(fs: &dyn Vfs, src: &Path, dst: &Path, overwrite: bool) -> Result<(), Error> {
  if exists(fs, dst) && !overwrite {
    debug!(dst = %dst.display(), "destination exists, skipping copy");
    return Ok(());
  }

  let meta = fs
    .metadata(src)
    .map_err(|e| Error::path_not_found_caused(display(src), e))?;
  if meta.is_dir() {
    return Err(Error::message(format!(
      "source path '{}' cannot be a directory",
      src.display()
    )));
  }

  let data = fs.read(src).map_err(|e| Error::read_file(display(src), e))?;
  fs.write(dst, &data).map_err(|e| Error::write_file(display(dst), e))?;
  fs.chmod(dst, meta.mode).map_err(|e| Error::write_file(display(dst), e))?;
  Ok(())
}

/// Recursively copy a directory tree, preserving permission bits.
///
/// If the destination exists and `overwrite` is false the call is a no-op;
/// with `overwrite` the existing destination is removed and rebuilt.
/// Symbolic links are neither followed nor copied.
///
/// # Errors
///
/// Fails with a path-not-found error when `src` does not exist; the
/// destination is left untouched in that case.
pub fn copy_dir(fs: &dyn Vfs, src: &Path, dst: &Path, overwrite: bool) -> Result<(), Error> {
  if exists(fs, dst) && !overwrite {
    debug!(dst = %dst.display(), "destination exists, skipping copy");
    return Ok(());
  }

  let meta = fs
    .metadata(src)
    .map_err(|e| Error::path_not_found_caused(display(src), e))?;
  if !meta.is_dir() {
    return Err(Error::message(format!("source path '{}' is not a directory", src.display())));
  }

  fs.remove_all(dst)
    .map_err(|e| Error::delete_directory(display(dst), e))?;
  fs.mkdir_all(dst, meta.mode)
    .map_err(|e| Error::write_file(display(dst), e))?;

  let entries = fs.read_dir(src).map_err(|e| Error::read_file(display(src), e))?;
  for entry in entries {
    let src_path = src.join(&entry.file_name);
    let dst_path = dst.join(&entry.file_name);
    match entry.metadata.file_type {
      FileType::Symlink => {
        debug!(path = %src_path.display(), "skipping symlink");
      }
      FileType::Dir => copy_dir(fs, &src_path, &dst_path, overwrite)?,
      FileType::File => copy_file(fs, &src_path, &dst_path, overwrite)?,
    }
  }
  Ok(())
}

/// Copy a file or a directory tree, dispatching on the source's type.
pub fn copy(fs: &dyn Vfs, src: &Path, dst: &Path, overwrite: bool) -> Result<(), Error> {
  if exists(fs, dst) && !overwrite {
    return Ok(());
  }

  let meta = fs
    .metadata(src)
    .map_err(|e| Error::path_not_found_caused(display(src), e))?;
  if meta.is_dir() {
    copy_dir(fs, src, dst, overwrite)
  } else {
    copy_file(fs, src, dst, overwrite)
  }
}

/// Run a batch of copies in order; the first failure aborts the batch.
pub fn copy_many(fs: &dyn Vfs, jobs: &[CopyJob]) -> Result<(), Error> {
  for job in jobs {
    copy(fs, &job.src, &job.dst, job.overwrite)?;
  }
  Ok(())
}

/// Delete every entry of a directory, keeping the directory itself.
pub fn remove_contents(fs: &dyn Vfs, dir: &Path) -> Result<(), Error> {
  let entries = fs.read_dir(dir).map_err(|e| Error::path_not_found_caused(display(dir), e))?;
  for entry in entries {
    let path = dir.join(&entry.file_name);
    fs.remove_all(&path).map_err(|e| {
      if entry.metadata.is_dir() {
        Error::delete_directory(display(&path), e)
      } else {
        Error::delete_file(display(&path), e)
      }
    })?;
  }
  Ok(())
}
