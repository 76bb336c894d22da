//! Error types shared by the manifest loader, configuration and helper layers.

use std::path::PathBuf;

use thiserror::Error;

/// Result alias used by fallible operations in this crate.
pub type AssetResult<T> = Result<T, AssetError>;

/// Failures surfaced while constructing a resolver or dispatching template helpers.
///
/// Asset lookups themselves never fail; every miss has a fallback URL.
#[derive(Debug, Error)]
pub enum AssetError {
  /// Production mode was requested but no candidate manifest existed and parsed.
  #[error("vite manifest not found (searched: {})", display_paths(.candidates))]
  ManifestNotFound {
    /// Candidate paths checked, in priority order.
    candidates: Vec<PathBuf>,
  },
  /// Reading a configuration file failed.
  #[error("failed to read {}: {source}", .path.display())]
  Io {
    /// Path that caused the error.
    path: PathBuf,
    /// Source I/O error.
    source: std::io::Error,
  },
  /// A configuration file was not valid JSON for [`crate::ResolverConfig`].
  #[error("invalid resolver configuration in {}: {source}", .path.display())]
  Config {
    /// Path that caused the error.
    path: PathBuf,
    /// Source parse error.
    source: serde_json::Error,
  },
  /// A template called a helper name that was never registered.
  #[error("unknown template helper '{0}'")]
  UnknownHelper(String),
  /// A template helper was called without one of its required arguments.
  #[error("helper '{helper}' is missing argument {index}")]
  MissingArgument {
    /// Helper name.
    helper: String,
    /// Zero-based position of the missing argument.
    index: usize,
  },
}

fn display_paths(paths: &[PathBuf]) -> String {
  if paths.is_empty() {
    return "<none>".to_string();
  }
  paths
    .iter()
    .map(|path| path.display().to_string())
    .collect::<Vec<_>>()
    .join(", ")
}
