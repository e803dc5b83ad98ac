//! Constraint maps and gate evaluation.
//!
//! A constraint is a named boolean supplied by the caller (CLI flags,
//! prompts). The structure config references constraints by name; a name
//! that the caller never supplied is unconstrained and passes. Only an
//! explicit `false` skips an entry, which the tri-state [`Gate`] makes
//! impossible to get wrong at call sites.

use std::collections::BTreeMap;

/// Result of looking one constraint name up in a map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
  /// The name is absent from the map: passes.
  Unconstrained,
  /// Present and `true`: passes.
  Required,
  /// Present and `false`: skips the gated entry.
  Forbidden,
}

impl Gate {
  pub fn allows(self) -> bool {
    self != Self::Forbidden
  }
}

/// Caller-supplied constraint values, split by what they gate.
///
/// Directory constraints gate whole path entries; file constraints gate
/// individual files within an entry that already passed.
#[derive(Debug, Clone, Default)]
pub struct Constraints {
  directories: BTreeMap<String, bool>,
  files: BTreeMap<String, bool>,
}

impl Constraints {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_directory(mut self, name: impl Into<String>, value: bool) -> Self {
    self.directories.insert(name.into(), value);
    self
  }

  pub fn with_file(mut self, name: impl Into<String>, value: bool) -> Self {
    self.files.insert(name.into(), value);
    self
  }

  pub fn directory_gate(&self, name: &str) -> Gate {
    lookup(&self.directories, name)
  }

  pub fn file_gate(&self, name: &str) -> Gate {
    lookup(&self.files, name)
  }

  /// Whether a path entry with the given constraint names passes.
  pub fn directories_allow(&self, names: &[String]) -> bool {
    names.iter().all(|name| self.directory_gate(name).allows())
  }

  /// Whether a file entry with the given constraint names passes.
  pub fn files_allow(&self, names: &[String]) -> bool {
    names.iter().all(|name| self.file_gate(name).allows())
  }
}

fn lookup(map: &BTreeMap<String, bool>, name: &str) -> Gate {
  match map.get(name) {
    None => Gate::Unconstrained,
    Some(true) => Gate::Required,
    Some(false) => Gate::Forbidden,
  }
}
