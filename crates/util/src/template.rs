//! Token-based template substitution.
//!
//! Tokens are written `{{key}}`. Every token whose key has a mapping entry
//! is replaced with the mapped value; tokens with no entry are left verbatim
//! (so partially-filled templates can be run through again later), and an
//! unterminated opening delimiter is treated as plain text.

use std::collections::HashMap;
use std::path::Path;

use tracing::debug;

use mason_error::Error;
use mason_vfs::Vfs;

/// Default opening delimiter.
pub const DEFAULT_START: &str = "{{";

/// Default closing delimiter.
pub const DEFAULT_END: &str = "}}";

/// Substitute `{{key}}` tokens in `input` using `values`.
pub fn replace(input: &str, values: &HashMap<String, String>) -> String {
  replace_delimited(input, DEFAULT_START, DEFAULT_END, values)
}

/// Substitute tokens with caller-chosen delimiters.
///
/// Scans left to right; a token is the shortest `start…end` span. Keys are
/// matched exactly, including any interior whitespace.
pub fn replace_delimited(input: &str, start: &str, end: &str, values: &HashMap<String, String>) -> String {
  let mut output = String::with_capacity(input.len());
  let mut rest = input;

  while let Some(open) = rest.find(start) {
    output.push_str(&rest[..open]);
    let after = &rest[open + start.len()..];

    match after.find(end) {
      Some(close) => {
        let key = &after[..close];
        match values.get(key) {
          Some(value) => output.push_str(value),
          None => {
            // Unknown key: keep the token verbatim.
            output.push_str(start);
            output.push_str(key);
            output.push_str(end);
          }
        }
        rest = &after[close + end.len()..];
      }
      None => {
        // Unterminated token: emit the remainder as-is.
        output.push_str(start);
        rest = after;
        break;
      }
    }
  }

  output.push_str(rest);
  output
}

/// Apply [`replace`] to a file in place.
///
/// # Errors
///
/// Wraps read failures as [`Error::ReadFile`] and write failures as
/// [`Error::WriteFile`]. Non-UTF-8 content is a read failure.
pub fn io_replace(fs: &dyn Vfs, path: &Path, values: &HashMap<String, String>) -> Result<(), Error> {
  let name = path.display().to_string();
  let data = fs.read(path).map_err(|e| Error::read_file(name.clone(), e))?;
  let text = String::from_utf8(data).map_err(|e| Error::read_file(name.clone(), e))?;

  let rendered = replace(&text, values);
  debug!(path = %path.display(), bytes = rendered.len(), "rendered template in place");
  fs.write(path, rendered.as_bytes()).map_err(|e| Error::write_file(name, e))
}
