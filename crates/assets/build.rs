//! Embeds the `static/` directory tree into the crate as a read-only table.
//!
//! Generates `$OUT_DIR/embedded_assets.rs` containing a sorted
//! `&[(&str, &[u8])]` of relative key (forward-slash separators) to file
//! contents. `src/store.rs` includes the generated table and exposes the
//! lookup API.

use std::env;
use std::fs;
use std::path::PathBuf;

use walkdir::WalkDir;

fn main() {
  println!("cargo:rerun-if-changed=static");

  let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR not set"));
  let static_dir = manifest_dir.join("static");
  let out_file = PathBuf::from(env::var("OUT_DIR").expect("OUT_DIR not set")).join("embedded_assets.rs");

  let mut entries: Vec<(String, String)> = Vec::new();
  for entry in WalkDir::new(&static_dir).sort_by_file_name() {
    let entry = entry.expect("walk static asset tree");
    if !entry.file_type().is_file() {
      continue;
    }
    let rel = entry
      .path()
      .strip_prefix(&static_dir)
      .expect("entry is under the static root");
    let key = rel.to_string_lossy().replace('\\', "/");
    entries.push((key, entry.path().display().to_string()));
  }
  // Lookup relies on binary search over the keys.
  entries.sort_by(|a, b| a.0.cmp(&b.0));

  let mut source = String::new();
  source.push_str("/// Embedded asset table, sorted by key. Generated at build time.\n");
  source.push_str("pub static FILES: &[(&str, &[u8])] = &[\n");
  for (key, path) in &entries {
    source.push_str(&format!("  ({key:?}, include_bytes!({path:?})),\n"));
  }
  source.push_str("];\n");

  fs::write(&out_file, source).expect("write generated asset table");
}
