//! Hermetic in-memory backend for tests.
//!
//! The tree is a flat map of normalized paths to nodes, guarded by a mutex.
//! Semantics are deliberately permissive where the real filesystem would
//! require setup ([`Vfs::write`] creates missing parent directories), and
//! deliberately absent where the concept has no in-memory meaning: `link`
//! and `symlink` fail with a descriptive error.

use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::SystemTime;

use crate::path::normalize;
use crate::{DirEntry, FileType, Metadata, Vfs};

const DEFAULT_FILE_MODE: u32 = 0o644;
const DEFAULT_DIR_MODE: u32 = 0o755;

#[derive(Debug, Clone)]
enum NodeKind {
  File(Vec<u8>),
  Dir,
}

#[derive(Debug, Clone)]
struct Node {
  kind: NodeKind,
  mode: u32,
  modified: SystemTime,
}

impl Node {
  fn file(data: Vec<u8>, mode: u32) -> Self {
    Self {
      kind: NodeKind::File(data),
      mode,
      modified: SystemTime::now(),
    }
  }

  fn dir(mode: u32) -> Self {
    Self {
      kind: NodeKind::Dir,
      mode,
      modified: SystemTime::now(),
    }
  }

  fn is_dir(&self) -> bool {
    matches!(self.kind, NodeKind::Dir)
  }

  fn metadata(&self) -> Metadata {
    let (file_type, len) = match &self.kind {
      NodeKind::File(data) => (FileType::File, data.len() as u64),
      NodeKind::Dir => (FileType::Dir, 0),
    };
    Metadata {
      file_type,
      len,
      mode: self.mode,
      modified: self.modified,
    }
  }
}

/// In-memory filesystem backend.
#[derive(Debug, Default)]
pub struct MemFs {
  nodes: Mutex<BTreeMap<PathBuf, Node>>,
}

impl MemFs {
  pub fn new() -> Self {
    Self::default()
  }

  fn lock(&self) -> std::sync::MutexGuard<'_, BTreeMap<PathBuf, Node>> {
    // A poisoned lock only means a test thread panicked mid-operation; the
    // map itself is still structurally valid.
    self.nodes.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
  }
}

fn key(path: &Path) -> PathBuf {
  normalize(path)
}

/// The implicit root of the tree: `/`, `.` or an empty parent.
fn is_root(path: &Path) -> bool {
  path.as_os_str().is_empty() || path == Path::new("/") || path == Path::new(".")
}

fn not_found(path: &Path) -> io::Error {
  io::Error::new(io::ErrorKind::NotFound, format!("'{}' not found", path.display()))
}

fn not_a_directory(path: &Path) -> io::Error {
  io::Error::new(
    io::ErrorKind::InvalidInput,
    format!("'{}' is not a directory", path.display()),
  )
}

fn is_a_directory(path: &Path) -> io::Error {
  io::Error::new(io::ErrorKind::InvalidInput, format!("'{}' is a directory", path.display()))
}

/// Insert missing ancestor directories of `path` into the tree.
fn ensure_parents(nodes: &mut BTreeMap<PathBuf, Node>, path: &Path) -> io::Result<()> {
  let ancestors: Vec<PathBuf> = path
    .ancestors()
    .skip(1)
    .take_while(|a| !is_root(a))
    .map(Path::to_path_buf)
    .collect();
  for ancestor in ancestors.into_iter().rev() {
    match nodes.get(&ancestor) {
      Some(node) if node.is_dir() => {}
      Some(_) => return Err(not_a_directory(&ancestor)),
      None => {
        nodes.insert(ancestor, Node::dir(DEFAULT_DIR_MODE));
      }
    }
  }
  Ok(())
}

impl Vfs for MemFs {
  fn name(&self) -> &'static str {
    "mem"
  }

  fn metadata(&self, path: &Path) -> io::Result<Metadata> {
    let path = key(path);
    if is_root(&path) {
      return Ok(Node::dir(DEFAULT_DIR_MODE).metadata());
    }
    let nodes = self.lock();
    nodes.get(&path).map(Node::metadata).ok_or_else(|| not_found(&path))
  }

  fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
    let path = key(path);
    let nodes = self.lock();
    match nodes.get(&path) {
      Some(node) => match &node.kind {
        NodeKind::File(data) => Ok(data.clone()),
        NodeKind::Dir => Err(is_a_directory(&path)),
      },
      None => Err(not_found(&path)),
    }
  }

  fn write(&self, path: &Path, data: &[u8]) -> io::Result<()> {
    let path = key(path);
    let mut nodes = self.lock();
    ensure_parents(&mut nodes, &path)?;
    let mode = match nodes.get(&path) {
      Some(node) if node.is_dir() => return Err(is_a_directory(&path)),
      Some(node) => node.mode,
      None => DEFAULT_FILE_MODE,
    };
    nodes.insert(path, Node::file(data.to_vec(), mode));
    Ok(())
  }

  fn mkdir(&self, path: &Path, mode: u32) -> io::Result<()> {
    let path = key(path);
    let mut nodes = self.lock();
    if nodes.contains_key(&path) {
      return Err(io::Error::new(
        io::ErrorKind::AlreadyExists,
        format!("'{}' already exists", path.display()),
      ));
    }
    match path.parent() {
      Some(parent) if is_root(parent) => {}
      Some(parent) => match nodes.get(parent) {
        Some(node) if node.is_dir() => {}
        Some(_) => return Err(not_a_directory(parent)),
        None => return Err(not_found(parent)),
      },
      None => {}
    }
    nodes.insert(path, Node::dir(mode));
    Ok(())
  }

  fn mkdir_all(&self, path: &Path, mode: u32) -> io::Result<()> {
    let path = key(path);
    if is_root(&path) {
      return Ok(());
    }
    let mut nodes = self.lock();
    ensure_parents(&mut nodes, &path)?;
    match nodes.get(&path) {
      Some(node) if node.is_dir() => Ok(()),
      Some(_) => Err(not_a_directory(&path)),
      None => {
        nodes.insert(path, Node::dir(mode));
        Ok(())
      }
    }
  }

  fn read_dir(&self, path: &Path) -> io::Result<Vec<DirEntry>> {
    let path = key(path);
    let nodes = self.lock();
    if !is_root(&path) {
      match nodes.get(&path) {
        Some(node) if node.is_dir() => {}
        Some(_) => return Err(not_a_directory(&path)),
        None => return Err(not_found(&path)),
      }
    }
    // BTreeMap iteration keeps the listing sorted by name.
    let entries = nodes
      .iter()
      .filter(|(candidate, _)| match candidate.parent() {
        Some(parent) => parent == path || (is_root(parent) && is_root(&path)),
        None => is_root(&path),
      })
      .filter_map(|(candidate, node)| {
        candidate.file_name().map(|name| DirEntry {
          file_name: name.to_os_string(),
          metadata: node.metadata(),
        })
      })
      .collect();
    Ok(entries)
  }

  fn remove(&self, path: &Path) -> io::Result<()> {
    let path = key(path);
    let mut nodes = self.lock();
    let node = nodes.get(&path).ok_or_else(|| not_found(&path))?;
    if node.is_dir() && nodes.keys().any(|k| k.parent() == Some(path.as_path())) {
      return Err(io::Error::new(
        io::ErrorKind::DirectoryNotEmpty,
        format!("'{}' is not empty", path.display()),
      ));
    }
    nodes.remove(&path);
    Ok(())
  }

  fn remove_all(&self, path: &Path) -> io::Result<()> {
    let path = key(path);
    let mut nodes = self.lock();
    nodes.retain(|k, _| !(k == &path || k.starts_with(&path)));
    Ok(())
  }

  fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
    let from = key(from);
    let to = key(to);
    let mut nodes = self.lock();
    if !nodes.contains_key(&from) {
      return Err(not_found(&from));
    }
    // Replace any existing destination, then re-root the moved subtree.
    nodes.retain(|k, _| !(k == &to || k.starts_with(&to)));
    let moved: Vec<(PathBuf, Node)> = nodes
      .iter()
      .filter(|(k, _)| *k == &from || k.starts_with(&from))
      .map(|(k, n)| (k.clone(), n.clone()))
      .collect();
    for (old_key, node) in moved {
      nodes.remove(&old_key);
      let new_key = match old_key.strip_prefix(&from) {
        Ok(rest) if rest.as_os_str().is_empty() => to.clone(),
        Ok(rest) => to.join(rest),
        Err(_) => old_key,
      };
      nodes.insert(new_key, node);
    }
    Ok(())
  }

  fn chmod(&self, path: &Path, mode: u32) -> io::Result<()> {
    let path = key(path);
    let mut nodes = self.lock();
    let node = nodes.get_mut(&path).ok_or_else(|| not_found(&path))?;
    node.mode = mode;
    Ok(())
  }

  fn chtimes(&self, path: &Path, _atime: SystemTime, mtime: SystemTime) -> io::Result<()> {
    let path = key(path);
    let mut nodes = self.lock();
    let node = nodes.get_mut(&path).ok_or_else(|| not_found(&path))?;
    node.modified = mtime;
    Ok(())
  }

  fn link(&self, _original: &Path, _link: &Path) -> io::Result<()> {
    Err(io::Error::new(
      io::ErrorKind::Unsupported,
      "hard links are only available on the os filesystem backend",
    ))
  }

  fn symlink(&self, _original: &Path, _link: &Path) -> io::Result<()> {
    Err(io::Error::new(
      io::ErrorKind::Unsupported,
      "symlinks are only available on the os filesystem backend",
    ))
  }
}
