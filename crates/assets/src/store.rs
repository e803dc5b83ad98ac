//! Read-only embedded asset store.
//!
//! The table is generated at build time from the crate's `static/`
//! directory (see `build.rs`), so the store is populated before `main` runs
//! and cannot be re-initialized. Keys are relative paths with forward-slash
//! separators; lookups tolerate a leading slash and backslash separators.

use std::path::Path;

use mason_error::Error;
use mason_vfs::Vfs;

mod generated {
  include!(concat!(env!("OUT_DIR"), "/embedded_assets.rs"));
}

fn canonical_key(path: &str) -> String {
  path.replace('\\', "/").trim_start_matches('/').to_string()
}

fn lookup(path: &str) -> Option<&'static [u8]> {
  let key = canonical_key(path);
  generated::FILES
    .binary_search_by(|(candidate, _)| (*candidate).cmp(key.as_str()))
    .ok()
    .map(|index| generated::FILES[index].1)
}

/// All embedded keys, sorted.
pub fn paths() -> impl Iterator<Item = &'static str> {
  generated::FILES.iter().map(|(key, _)| *key)
}

/// Read an embedded asset by its relative path.
///
/// # Errors
///
/// Returns [`Error::PathNotFound`] for keys not present in the table.
pub fn read_file(path: &str) -> Result<&'static [u8], Error> {
  lookup(path).ok_or_else(|| Error::path_not_found(canonical_key(path)))
}

/// Extract an embedded asset to `destination` on the given backend.
pub fn write_file(fs: &dyn Vfs, path: &str, destination: &Path) -> Result<(), Error> {
  let data = read_file(path)?;
  fs.write(destination, data)
    .map_err(|e| Error::write_file(destination.display().to_string(), e))
}
