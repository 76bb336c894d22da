//! Resolver configuration describing build layout, dev server and static directories.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{AssetError, AssetResult};

const DEFAULT_CONFIG_FILE: &str = "vite-assets.config.json";

/// Lookup rules applied by the resolver in production mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolutionMode {
  /// Full lookup chain: exact key, basename, substring, `name` field, imported chunks.
  #[default]
  Standard,
  /// Compatibility rules: single script tag, exact-key stylesheets, fonts served statically.
  Legacy,
}

/// A static directory under the public root holding one kind of asset.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AssetDirectory {
  /// Directory relative to the public root, without leading or trailing slashes.
  pub dir: String,
  /// When set, static fallbacks are only used if the file exists on disk.
  #[serde(default)]
  pub verify_existence: bool,
}

impl AssetDirectory {
  /// Directory that is checked on disk before its paths are handed out.
  pub fn verified(dir: impl Into<String>) -> Self {
    Self {
      dir: dir.into(),
      verify_existence: true,
    }
  }

  /// Directory whose paths are returned without touching the filesystem.
  pub fn unverified(dir: impl Into<String>) -> Self {
    Self {
      dir: dir.into(),
      verify_existence: false,
    }
  }

  /// Directory name with surrounding slashes removed.
  pub fn trimmed(&self) -> &str {
    self.dir.trim_matches('/')
  }
}

/// Static directories for the asset kinds that are not always bundled.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AssetDirectories {
  /// Images served from the public root.
  pub images: AssetDirectory,
  /// Fonts served from the public root.
  pub fonts: AssetDirectory,
}

impl Default for AssetDirectories {
  fn default() -> Self {
    Self {
      images: AssetDirectory::verified("assets/images"),
      fonts: AssetDirectory::unverified("assets/fonts"),
    }
  }
}

/// Settings fixed for the lifetime of an [`crate::AssetResolver`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
  /// Serve assets from the dev server instead of the manifest.
  pub is_dev: bool,
  /// Base URL of the dev server.
  pub dev_server_url: String,
  /// Build output directory relative to the public root.
  pub build_directory: String,
  /// Filesystem path of the public web root.
  pub public_path: PathBuf,
  /// Explicit manifest location checked before the conventional ones.
  pub manifest_path: Option<PathBuf>,
  /// Static image and font directories.
  pub asset_directories: AssetDirectories,
  /// Production lookup rules.
  pub mode: ResolutionMode,
}

impl Default for ResolverConfig {
  fn default() -> Self {
    Self {
      is_dev: false,
      dev_server_url: "http://localhost:5173".into(),
      build_directory: "build".into(),
      public_path: PathBuf::from("public"),
      manifest_path: None,
      asset_directories: AssetDirectories::default(),
      mode: ResolutionMode::Standard,
    }
  }
}

impl ResolverConfig {
  /// Attempt to load configuration from the provided directory.
  ///
  /// A missing or malformed configuration file yields the defaults.
  pub fn discover(dir: &Path) -> Self {
    let candidate = dir.join(DEFAULT_CONFIG_FILE);
    match Self::from_path(&candidate) {
      Ok(config) => config,
      Err(err) => {
        tracing::debug!(path = %candidate.display(), error = %err, "using default resolver config");
        Self::default()
      }
    }
  }

  /// Read configuration from a specific JSON file.
  pub fn from_path(path: &Path) -> AssetResult<Self> {
    let content = fs::read_to_string(path).map_err(|source| AssetError::Io {
      path: path.to_path_buf(),
      source,
    })?;
    let config: Self = serde_json::from_str(&content).map_err(|source| AssetError::Config {
      path: path.to_path_buf(),
      source,
    })?;
    Ok(config.normalised())
  }

  /// Toggle dev mode.
  pub fn with_dev(mut self, is_dev: bool) -> Self {
    self.is_dev = is_dev;
    self
  }

  /// Override the dev server base URL.
  pub fn with_dev_server_url(mut self, url: impl Into<String>) -> Self {
    self.dev_server_url = url.into();
    self.normalised()
  }

  /// Override the build directory name.
  pub fn with_build_directory(mut self, dir: impl Into<String>) -> Self {
    self.build_directory = dir.into();
    self.normalised()
  }

  /// Override the public root.
  pub fn with_public_path(mut self, path: impl Into<PathBuf>) -> Self {
    self.public_path = path.into();
    self
  }

  /// Check `path` before the conventional manifest locations.
  pub fn with_manifest_path(mut self, path: impl Into<PathBuf>) -> Self {
    self.manifest_path = Some(path.into());
    self
  }

  /// Replace the static asset directories.
  pub fn with_asset_directories(mut self, dirs: AssetDirectories) -> Self {
    self.asset_directories = dirs;
    self
  }

  /// Select the production lookup rules.
  pub fn with_mode(mut self, mode: ResolutionMode) -> Self {
    self.mode = mode;
    self
  }

  /// `{public_path}/{build_directory}` on disk.
  pub fn build_path(&self) -> PathBuf {
    self.public_path.join(&self.build_directory)
  }

  fn normalised(mut self) -> Self {
    let url_len = self.dev_server_url.trim_end_matches('/').len();
    self.dev_server_url.truncate(url_len);
    self.build_directory = self.build_directory.trim_matches('/').to_string();
    self
  }
}
