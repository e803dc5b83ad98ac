//! mason-util: leaf helpers over the filesystem shim.
//!
//! - [`serial`]: read/write structured data as JSON or YAML files
//! - [`template`]: `{{key}}` token substitution, string and in-place file forms
//! - [`platform`]: OS detection and executable-root discovery

pub mod platform;
pub mod serial;
pub mod template;
