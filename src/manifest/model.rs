//! Deserialised form of the bundler's `manifest.json`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One manifest record: the hashed output for a source entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ManifestEntry {
  /// Output path relative to the build directory.
  pub file: String,
  /// Stylesheets emitted alongside the entry.
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub css: Vec<String>,
  /// Manifest keys of chunks the entry imports.
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub imports: Vec<String>,
  /// Logical alias assigned by the bundler.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub name: Option<String>,
}

impl ManifestEntry {
  /// Entry with only an output file.
  pub fn new(file: impl Into<String>) -> Self {
    Self {
      file: file.into(),
      css: Vec::new(),
      imports: Vec::new(),
      name: None,
    }
  }

  /// Attach stylesheet outputs.
  pub fn with_css<I, S>(mut self, css: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self.css = css.into_iter().map(Into::into).collect();
    self
  }

  /// Attach imported chunk keys.
  pub fn with_imports<I, S>(mut self, imports: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self.imports = imports.into_iter().map(Into::into).collect();
    self
  }

  /// Attach a logical name.
  pub fn with_name(mut self, name: impl Into<String>) -> Self {
    self.name = Some(name.into());
    self
  }
}

/// Immutable mapping from source entry keys to their build outputs.
///
/// Keys iterate in lexicographic order, so scans that take the first match are
/// independent of how the bundler happened to order the JSON object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Manifest {
  entries: BTreeMap<String, ManifestEntry>,
}

impl Manifest {
  /// Parse manifest JSON.
  pub fn from_json_str(content: &str) -> serde_json::Result<Self> {
    serde_json::from_str(content)
  }

  /// Exact-key lookup.
  pub fn get(&self, key: &str) -> Option<&ManifestEntry> {
    self.entries.get(key)
  }

  /// Output file for an exact key.
  pub fn file(&self, key: &str) -> Option<&str> {
    self.get(key).map(|entry| entry.file.as_str())
  }

  /// Iterate over `(key, entry)` pairs in key order.
  pub fn iter(&self) -> impl Iterator<Item = (&str, &ManifestEntry)> {
    self.entries.iter().map(|(key, entry)| (key.as_str(), entry))
  }

  /// Number of entries.
  pub fn len(&self) -> usize {
    self.entries.len()
  }

  /// `true` when the manifest holds no entries.
  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }
}

impl FromIterator<(String, ManifestEntry)> for Manifest {
  fn from_iter<T: IntoIterator<Item = (String, ManifestEntry)>>(iter: T) -> Self {
    Self {
      entries: iter.into_iter().collect(),
    }
  }
}
