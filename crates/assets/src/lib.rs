//! mason-assets: declarative asset projection.
//!
//! A structure config describes a tree of directories and files to
//! materialize into a project directory, each annotated with named boolean
//! constraints. The projection engine evaluates the constraints against a
//! caller-supplied [`Constraints`] map and copies the surviving files from a
//! platform directory, applying per-file overwrite/update policy.
//!
//! The crate also carries the [`store`]: a read-only asset table embedded at
//! build time, holding the structure config and scaffolding payload shipped
//! with the tooling.

pub mod constraint;
pub mod project;
pub mod store;
pub mod types;

pub use constraint::{Constraints, Gate};
pub use project::{CopyFailure, ProjectionContext, ProjectionReport, project};
pub use types::{FileEntry, PathEntry, StructureConfig, StructureSection};
