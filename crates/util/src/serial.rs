//! JSON/YAML file helpers over the filesystem shim.
//!
//! Thin wrappers around serde_json/serde_yaml: file I/O failures wrap as
//! read/write errors, codec failures wrap as serialization errors with the
//! serde error preserved as the cause.

use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;

use mason_error::Error;
use mason_vfs::Vfs;

fn display(path: &Path) -> String {
  path.display().to_string()
}

/// Parse a JSON file into a deserializable value.
pub fn parse_json<T: DeserializeOwned>(fs: &dyn Vfs, path: &Path) -> Result<T, Error> {
  let data = fs.read(path).map_err(|e| Error::read_file(display(path), e))?;
  serde_json::from_slice(&data).map_err(Error::serialization)
}

/// Parse a YAML file into a deserializable value.
pub fn parse_yaml<T: DeserializeOwned>(fs: &dyn Vfs, path: &Path) -> Result<T, Error> {
  let data = fs.read(path).map_err(|e| Error::read_file(display(path), e))?;
  serde_yaml::from_slice(&data).map_err(Error::serialization)
}

/// Write a value to a file as pretty-printed JSON (two-space indent).
pub fn write_json<T: Serialize>(fs: &dyn Vfs, path: &Path, value: &T) -> Result<(), Error> {
  let data = serde_json::to_vec_pretty(value).map_err(Error::serialization)?;
  fs.write(path, &data).map_err(|e| Error::write_file(display(path), e))
}

/// Write a value to a file as YAML.
pub fn write_yaml<T: Serialize>(fs: &dyn Vfs, path: &Path, value: &T) -> Result<(), Error> {
  let data = serde_yaml::to_string(value).map_err(Error::serialization)?;
  fs.write(path, data.as_bytes())
    .map_err(|e| Error::write_file(display(path), e))
}

#[cfg(test)]
mod tests {
  use super::*;
  use mason_vfs::MemFs;
  use serde::Deserialize;
  use std::error::Error as _;

  #[derive(Debug, PartialEq, Serialize, Deserialize)]
  struct Target {
    name: String,
    cores: u32,
    features: Vec<String>,
  }

  fn sample() -> Target {
    Target {
      name: "atmega328p".to_string(),
      cores: 1,
      features: vec!["pwm".to_string(), "uart".to_string()],
    }
  }

  #[test]
  fn json_write_then_parse_round_trips() {
    let fs = MemFs::new();
    let path = Path::new("/conf/target.json");

    write_json(&fs, path, &sample()).unwrap();
    let loaded: Target = parse_json(&fs, path).unwrap();
    assert_eq!(loaded, sample());
  }

  #[test]
  fn written_json_is_pretty_printed() {
    let fs = MemFs::new();
    let path = Path::new("/conf/target.json");

    write_json(&fs, path, &sample()).unwrap();
    let raw = String::from_utf8(fs.read(path).unwrap()).unwrap();
    assert!(raw.contains("\n  \"name\": \"atmega328p\""));
  }

  #[test]
  fn yaml_write_then_parse_round_trips() {
    let fs = MemFs::new();
    let path = Path::new("/conf/target.yml");

    write_yaml(&fs, path, &sample()).unwrap();
    let loaded: Target = parse_yaml(&fs, path).unwrap();
    assert_eq!(loaded, sample());
  }

  #[test]
  fn missing_file_reports_read_failure() {
    let fs = MemFs::new();
    let err = parse_json::<Target>(&fs, Path::new("/conf/absent.json")).unwrap_err();
    assert!(matches!(err, Error::ReadFile { .. }));
    assert!(err.to_string().starts_with("\"/conf/absent.json\" file read failed"));
  }

  #[test]
  fn malformed_json_reports_serialization_failure_with_cause() {
    let fs = MemFs::new();
    let path = Path::new("/conf/broken.json");
    fs.write(path, b"{ \"name\": ").unwrap();

    let err = parse_json::<Target>(&fs, path).unwrap_err();
    assert!(matches!(err, Error::Serialization { .. }));
    assert!(err.source().is_some(), "serde cause should be chained");
  }

  #[test]
  fn malformed_yaml_reports_serialization_failure() {
    let fs = MemFs::new();
    let path = Path::new("/conf/broken.yml");
    fs.write(path, b"name: [unclosed").unwrap();

    let err = parse_yaml::<Target>(&fs, path).unwrap_err();
    assert!(matches!(err, Error::Serialization { .. }));
  }

  #[test]
  fn unrepresentable_map_keys_fail_to_serialize_as_json() {
    // serde_json requires string keys; a sequence key is a marshal failure
    // that must surface as a serialization error, not an I/O error.
    let fs = MemFs::new();
    let mut value = std::collections::BTreeMap::new();
    value.insert(vec![1u8, 2u8], "x");

    let err = write_json(&fs, Path::new("/conf/bad.json"), &value).unwrap_err();
    assert!(matches!(err, Error::Serialization { .. }));
    assert!(!mason_vfs::copy::exists(&fs, Path::new("/conf/bad.json")));
  }
}
