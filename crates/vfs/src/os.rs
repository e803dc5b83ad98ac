//! Real filesystem backend over `std::fs`.

use std::fs;
use std::io::{self, Write as _};
use std::path::Path;
use std::time::SystemTime;

use filetime::FileTime;

use crate::{DirEntry, FileType, Metadata, Vfs};

/// Backend backed by the operating system's filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsFs;

impl OsFs {
  pub fn new() -> Self {
    Self
  }
}

fn convert_metadata(meta: &fs::Metadata) -> Metadata {
  let file_type = if meta.file_type().is_symlink() {
    FileType::Symlink
  } else if meta.is_dir() {
    FileType::Dir
  } else {
    FileType::File
  };

  Metadata {
    file_type,
    len: meta.len(),
    mode: mode_bits(meta),
    modified: meta.modified().unwrap_or(SystemTime::UNIX_EPOCH),
  }
}

#[cfg(unix)]
fn mode_bits(meta: &fs::Metadata) -> u32 {
  use std::os::unix::fs::PermissionsExt;
  meta.permissions().mode()
}

#[cfg(not(unix))]
fn mode_bits(meta: &fs::Metadata) -> u32 {
  if meta.permissions().readonly() { 0o444 } else { 0o666 }
}

impl Vfs for OsFs {
  fn name(&self) -> &'static str {
    "os"
  }

  fn metadata(&self, path: &Path) -> io::Result<Metadata> {
    Ok(convert_metadata(&fs::metadata(path)?))
  }

  fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
    fs::read(path)
  }

  fn write(&self, path: &Path, data: &[u8]) -> io::Result<()> {
    let mut file = fs::File::create(path)?;
    file.write_all(data)?;
    // Flush to durable storage before reporting success.
    file.sync_all()
  }

  fn mkdir(&self, path: &Path, mode: u32) -> io::Result<()> {
    fs::create_dir(path)?;
    self.chmod(path, mode)
  }

  fn mkdir_all(&self, path: &Path, mode: u32) -> io::Result<()> {
    // An existing directory keeps its mode.
    if let Ok(meta) = fs::metadata(path) {
      if meta.is_dir() {
        return Ok(());
      }
    }
    fs::create_dir_all(path)?;
    self.chmod(path, mode)
  }

  fn read_dir(&self, path: &Path) -> io::Result<Vec<DirEntry>> {
    let mut entries = Vec::new();
    for entry in fs::read_dir(path)? {
      let entry = entry?;
      // lstat semantics so symlinks stay visible to callers.
      let meta = fs::symlink_metadata(entry.path())?;
      entries.push(DirEntry {
        file_name: entry.file_name(),
        metadata: convert_metadata(&meta),
      });
    }
    entries.sort_by(|a, b| a.file_name.cmp(&b.file_name));
    Ok(entries)
  }

  fn remove(&self, path: &Path) -> io::Result<()> {
    if fs::symlink_metadata(path)?.is_dir() {
      fs::remove_dir(path)
    } else {
      fs::remove_file(path)
    }
  }

  fn remove_all(&self, path: &Path) -> io::Result<()> {
    match fs::symlink_metadata(path) {
      Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
      Err(e) => Err(e),
      Ok(meta) if meta.is_dir() => fs::remove_dir_all(path),
      Ok(_) => fs::remove_file(path),
    }
  }

  fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
    fs::rename(from, to)
  }

  #[cfg(unix)]
  fn chmod(&self, path: &Path, mode: u32) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(mode))
  }

  #[cfg(not(unix))]
  fn chmod(&self, path: &Path, _mode: u32) -> io::Result<()> {
    // Windows has no permission bits to copy; existence check keeps the
    // not-found contract consistent with unix.
    fs::metadata(path).map(|_| ())
  }

  fn chtimes(&self, path: &Path, atime: SystemTime, mtime: SystemTime) -> io::Result<()> {
    filetime::set_file_times(path, FileTime::from_system_time(atime), FileTime::from_system_time(mtime))
  }

  fn link(&self, original: &Path, link: &Path) -> io::Result<()> {
    fs::hard_link(original, link)
  }

  #[cfg(unix)]
  fn symlink(&self, original: &Path, link: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(original, link)
  }

  #[cfg(windows)]
  fn symlink(&self, original: &Path, link: &Path) -> io::Result<()> {
    std::os::windows::fs::symlink_file(original, link)
  }
}
