//! Lexical path helpers.
//!
//! These never touch the filesystem: normalization resolves `.` and `..`
//! purely from components, which is what the copy and projection layers need
//! when composing destination paths from config-supplied fragments.

use std::path::{Component, Path, PathBuf};

/// Normalize a path lexically, resolving `.` and `..` components.
///
/// `..` at the start of a relative path is kept (there is nothing to pop);
/// `..` directly under the root is dropped. An empty result becomes `.`.
pub fn normalize(path: &Path) -> PathBuf {
  let mut normalized = PathBuf::new();
  for component in path.components() {
    match component {
      Component::Prefix(prefix) => normalized.push(prefix.as_os_str()),
      Component::RootDir => normalized.push(component.as_os_str()),
      Component::CurDir => {}
      Component::ParentDir => match normalized.components().next_back() {
        Some(Component::Normal(_)) => {
          normalized.pop();
        }
        // `..` directly under the root stays at the root.
        Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
        // Nothing to pop: keep the `..` so relative paths stay relative.
        _ => normalized.push(".."),
      },
      Component::Normal(part) => normalized.push(part),
    }
  }

  if normalized.as_os_str().is_empty() {
    normalized.push(".");
  }
  normalized
}

/// Join a config-supplied relative fragment under a base directory.
///
/// Structure entries are written with a leading separator (`"/src"`), which
/// `Path::join` would treat as an absolute replacement. Root and prefix
/// components are stripped from the fragment before joining, and the result
/// is normalized.
pub fn join_rel(base: &Path, fragment: &Path) -> PathBuf {
  let stripped: PathBuf = fragment
    .components()
    .filter(|c| !matches!(c, Component::RootDir | Component::Prefix(_)))
    .collect();
  normalize(&base.join(stripped))
}
