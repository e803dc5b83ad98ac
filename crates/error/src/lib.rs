//! Error taxonomy shared by the mason utility crates.
//!
//! Every fallible operation in the workspace returns [`Error`]. Each variant
//! except [`Error::Message`] carries a subject identifier (a path or file
//! name) and an optional wrapped cause. When a cause is present, rendering
//! appends its message on a new line indented by one space, so nested
//! failures read as a short diagnostic chain:
//!
//! ```text
//! "conf/app.json" file read failed
//!  path does not exist: conf/app.json
//! ```
//!
//! Causes are also exposed through [`std::error::Error::source`] for
//! programmatic chaining.

use thiserror::Error;

/// A boxed cause attached to an error variant.
pub type Cause = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Indentation prepended to a rendered cause line.
const INDENT: &str = " ";

/// Errors produced by the mason utility crates.
#[derive(Debug, Error)]
pub enum Error {
  /// A generic message with no subject or cause.
  #[error("{0}")]
  Message(String),

  #[error("\"{name}\" file read failed{}", render_cause(.source))]
  ReadFile {
    name: String,
    #[source]
    source: Option<Cause>,
  },

  #[error("\"{name}\" file write failed{}", render_cause(.source))]
  WriteFile {
    name: String,
    #[source]
    source: Option<Cause>,
  },

  #[error("data could not be serialized{}", render_cause(.source))]
  Serialization {
    #[source]
    source: Option<Cause>,
  },

  #[error("path does not exist: {path}{}", render_cause(.source))]
  PathNotFound {
    path: String,
    #[source]
    source: Option<Cause>,
  },

  #[error("\"{name}\" directory failed to be deleted{}", render_cause(.source))]
  DeleteDirectory {
    name: String,
    #[source]
    source: Option<Cause>,
  },

  #[error("\"{name}\" file failed to be deleted{}", render_cause(.source))]
  DeleteFile {
    name: String,
    #[source]
    source: Option<Cause>,
  },

  /// An unexpected condition that callers are not expected to recover from.
  #[error("a fatal error occurred\n{INDENT}{detail}{}", render_cause(.source))]
  Fatal {
    detail: String,
    #[source]
    source: Option<Cause>,
  },
}

fn render_cause(source: &Option<Cause>) -> String {
  match source {
    Some(cause) => format!("\n{INDENT}{cause}"),
    None => String::new(),
  }
}

impl Error {
  pub fn message(message: impl Into<String>) -> Self {
    Self::Message(message.into())
  }

  pub fn read_file(name: impl Into<String>, cause: impl Into<Cause>) -> Self {
    Self::ReadFile {
      name: name.into(),
      source: Some(cause.into()),
    }
  }

  pub fn write_file(name: impl Into<String>, cause: impl Into<Cause>) -> Self {
    Self::WriteFile {
      name: name.into(),
      source: Some(cause.into()),
    }
  }

  pub fn serialization(cause: impl Into<Cause>) -> Self {
    Self::Serialization {
      source: Some(cause.into()),
    }
  }

  pub fn path_not_found(path: impl Into<String>) -> Self {
    Self::PathNotFound {
      path: path.into(),
      source: None,
    }
  }

  pub fn path_not_found_caused(path: impl Into<String>, cause: impl Into<Cause>) -> Self {
    Self::PathNotFound {
      path: path.into(),
      source: Some(cause.into()),
    }
  }

  pub fn delete_directory(name: impl Into<String>, cause: impl Into<Cause>) -> Self {
    Self::DeleteDirectory {
      name: name.into(),
      source: Some(cause.into()),
    }
  }

  pub fn delete_file(name: impl Into<String>, cause: impl Into<Cause>) -> Self {
    Self::DeleteFile {
      name: name.into(),
      source: Some(cause.into()),
    }
  }

  pub fn fatal(detail: impl Into<String>, cause: impl Into<Cause>) -> Self {
    Self::Fatal {
      detail: detail.into(),
      source: Some(cause.into()),
    }
  }
}
