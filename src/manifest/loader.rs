//! Locating and parsing the manifest from a list of candidate paths.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{AssetError, AssetResult};
use crate::manifest::Manifest;

/// Manifest together with the file it was read from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadedManifest {
  /// Parsed entries.
  pub manifest: Manifest,
  /// File the entries came from; `None` when nothing was loaded.
  pub source: Option<PathBuf>,
}

/// Loads the first candidate that exists and parses.
#[derive(Debug, Clone, Copy)]
pub struct ManifestLoader {
  allow_missing: bool,
}

impl ManifestLoader {
  /// Loader for dev mode: a missing manifest yields an empty mapping.
  pub fn lenient() -> Self {
    Self { allow_missing: true }
  }

  /// Loader for production mode: a missing manifest is an error.
  pub fn strict() -> Self {
    Self { allow_missing: false }
  }

  /// Loader matching the given mode.
  pub fn for_mode(is_dev: bool) -> Self {
    if is_dev { Self::lenient() } else { Self::strict() }
  }

  /// Try each candidate in order and stop at the first that parses.
  ///
  /// Unreadable and malformed candidates are skipped the same way as absent ones.
  pub fn load(&self, candidates: &[PathBuf]) -> AssetResult<LoadedManifest> {
    for candidate in candidates {
      if let Some(manifest) = read_candidate(candidate) {
        tracing::info!(
          path = %candidate.display(),
          entries = manifest.len(),
          "loaded vite manifest"
        );
        return Ok(LoadedManifest {
          manifest,
          source: Some(candidate.clone()),
        });
      }
    }

    if self.allow_missing {
      tracing::debug!("no vite manifest found; continuing with an empty manifest");
      Ok(LoadedManifest::default())
    } else {
      Err(AssetError::ManifestNotFound {
        candidates: candidates.to_vec(),
      })
    }
  }
}

fn read_candidate(path: &Path) -> Option<Manifest> {
  let content = match fs::read_to_string(path) {
    Ok(content) => content,
    Err(err) if err.kind() == ErrorKind::NotFound => {
      tracing::debug!(path = %path.display(), "manifest candidate absent");
      return None;
    }
    Err(err) => {
      tracing::warn!(path = %path.display(), error = %err, "failed to read manifest candidate");
      return None;
    }
  };

  match Manifest::from_json_str(&content) {
    Ok(manifest) => Some(manifest),
    Err(err) => {
      tracing::warn!(path = %path.display(), error = %err, "ignoring malformed manifest candidate");
      None
    }
  }
}
