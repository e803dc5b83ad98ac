//! Host platform helpers: OS identification and executable-root discovery.

use std::io;
use std::path::{Path, PathBuf};

use mason_vfs::path::normalize;

/// Operating systems the tooling distinguishes between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Os {
  Linux,
  MacOs,
  Windows,
}

impl Os {
  /// Detect the current operating system at runtime.
  ///
  /// Returns `None` on platforms the tooling does not distinguish.
  pub fn current() -> Option<Self> {
    match std::env::consts::OS {
      "linux" => Some(Self::Linux),
      "macos" => Some(Self::MacOs),
      "windows" => Some(Self::Windows),
      _ => None,
    }
  }

  /// Lowercase identifier as used in platform directory names.
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Linux => "linux",
      Self::MacOs => "darwin",
      Self::Windows => "windows",
    }
  }
}

impl std::fmt::Display for Os {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

/// Directory containing the running executable.
///
/// A symlinked executable is resolved one level: the returned root is the
/// directory of the link target, with a relative target resolved against
/// the link's own directory.
pub fn executable_root() -> io::Result<PathBuf> {
  let exe = std::env::current_exe()?;
  resolve_root(&exe)
}

fn resolve_root(exe: &Path) -> io::Result<PathBuf> {
  let meta = std::fs::symlink_metadata(exe)?;
  if !meta.file_type().is_symlink() {
    return Ok(exe.parent().unwrap_or(Path::new(".")).to_path_buf());
  }

  let target = std::fs::read_link(exe)?;
  let target_dir = target.parent().unwrap_or(Path::new(".")).to_path_buf();
  if target_dir.is_absolute() {
    Ok(target_dir)
  } else {
    let link_dir = exe.parent().unwrap_or(Path::new("."));
    Ok(normalize(&link_dir.join(target_dir)))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn current_os_is_recognized() {
    assert!(Os::current().is_some());
  }

  #[test]
  fn macos_maps_to_darwin() {
    assert_eq!(Os::MacOs.as_str(), "darwin");
    assert_eq!(Os::Linux.to_string(), "linux");
  }

  #[test]
  fn executable_root_is_an_existing_directory() {
    let root = executable_root().unwrap();
    assert!(root.is_dir());
  }

  #[cfg(unix)]
  #[test]
  fn symlinked_executable_resolves_to_target_directory() {
    let temp = tempfile::TempDir::new().unwrap();
    let bin_dir = temp.path().join("bin");
    std::fs::create_dir_all(&bin_dir).unwrap();
    let target = bin_dir.join("tool");
    std::fs::write(&target, b"").unwrap();

    let link = temp.path().join("tool-link");
    std::os::unix::fs::symlink(&target, &link).unwrap();

    assert_eq!(resolve_root(&link).unwrap(), bin_dir);
  }

  #[cfg(unix)]
  #[test]
  fn relative_link_target_resolves_against_link_directory() {
    let temp = tempfile::TempDir::new().unwrap();
    let bin_dir = temp.path().join("bin");
    std::fs::create_dir_all(&bin_dir).unwrap();
    std::fs::write(bin_dir.join("tool"), b"").unwrap();

    let link = temp.path().join("tool-link");
    std::os::unix::fs::symlink(Path::new("bin/tool"), &link).unwrap();

    assert_eq!(resolve_root(&link).unwrap(), normalize(&temp.path().join("bin")));
  }
}
