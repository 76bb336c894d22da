//! Filesystem locations derived from the public root and build directory.

use std::path::{Path, PathBuf};

/// Supplies the public root and, optionally, an explicit manifest location.
///
/// Hosts usually already own a paths service; implementing this trait is all the
/// resolver needs from it.
pub trait PathProvider {
  /// Filesystem path of the public web root.
  fn public_path(&self) -> PathBuf;

  /// Explicit manifest location, checked before the conventional ones.
  fn manifest_path(&self) -> Option<PathBuf> {
    None
  }
}

impl PathProvider for Path {
  fn public_path(&self) -> PathBuf {
    self.to_path_buf()
  }
}

impl PathProvider for PathBuf {
  fn public_path(&self) -> PathBuf {
    self.clone()
  }
}

/// Build output locations for one public root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildPaths {
  public_path: PathBuf,
  build_directory: String,
}

impl BuildPaths {
  /// Describe the build output `build_directory` under `public_path`.
  pub fn new(public_path: impl Into<PathBuf>, build_directory: impl Into<String>) -> Self {
    Self {
      public_path: public_path.into(),
      build_directory: build_directory.into(),
    }
  }

  /// `{public}/{build}`.
  pub fn build_path(&self) -> PathBuf {
    self.public_path.join(&self.build_directory)
  }

  /// `{public}/{build}/assets`.
  pub fn build_assets_path(&self) -> PathBuf {
    self.build_path().join("assets")
  }

  /// Manifest locations in priority order: the explicit path, then
  /// `manifest.json` and `.vite/manifest.json` inside the build directory.
  pub fn manifest_candidates(&self, explicit: Option<&Path>) -> Vec<PathBuf> {
    let build = self.build_path();
    let mut candidates = Vec::with_capacity(3);
    if let Some(path) = explicit {
      candidates.push(path.to_path_buf());
    }
    for candidate in [build.join("manifest.json"), build.join(".vite").join("manifest.json")] {
      if !candidates.contains(&candidate) {
        candidates.push(candidate);
      }
    }
    candidates
  }
}
