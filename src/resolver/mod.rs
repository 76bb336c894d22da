//! Resolution of manifest entries into URLs and HTML tags.
//!
//! [`AssetResolver`] owns an immutable copy of the manifest and the configuration,
//! so a single instance can be shared read-only across requests. In dev mode every
//! operation points at the dev server; in production the manifest is consulted and
//! each miss falls back to a predictable URL instead of failing the render.

mod lookup;
mod media;
mod tags;

use std::path::{Path, PathBuf};

use crate::config::{ResolutionMode, ResolverConfig};
use crate::error::AssetResult;
use crate::manifest::{LoadedManifest, Manifest, ManifestLoader};
use crate::paths::{BuildPaths, PathProvider};

pub use lookup::{
  ScriptMatch, basename, basename_without, find_by_key_or_basename, find_script, find_stylesheets,
};
pub use tags::{escape_attr, module_script, raw_module_script, stylesheet_link};

/// Default source directory for images referenced through the manifest.
pub const DEFAULT_IMAGE_RESOURCE_PATH: &str = "resources/images";
/// Default image returned when nothing else matches.
pub const DEFAULT_IMAGE_PLACEHOLDER: &str = "placeholder.jpg";
/// Source directory for fonts referenced through the manifest.
pub const FONT_RESOURCE_PATH: &str = "resources/fonts";

/// Resolves entries against a loaded manifest.
#[derive(Debug, Clone)]
pub struct AssetResolver {
  config: ResolverConfig,
  loaded: LoadedManifest,
}

impl AssetResolver {
  /// Load the manifest described by `config`.
  ///
  /// In production mode a missing manifest is reported as
  /// [`crate::AssetError::ManifestNotFound`]; in dev mode it is treated as empty.
  pub fn new(config: ResolverConfig) -> AssetResult<Self> {
    let candidates = BuildPaths::new(&config.public_path, &config.build_directory)
      .manifest_candidates(config.manifest_path.as_deref());
    let loaded = ManifestLoader::for_mode(config.is_dev).load(&candidates)?;
    Ok(Self { config, loaded })
  }

  /// Build a resolver whose public root and manifest path come from `provider`.
  pub fn from_provider<P>(provider: &P, config: ResolverConfig) -> AssetResult<Self>
  where
    P: PathProvider + ?Sized,
  {
    let mut config = config.with_public_path(provider.public_path());
    if let Some(path) = provider.manifest_path() {
      config = config.with_manifest_path(path);
    }
    Self::new(config)
  }

  /// Use an in-memory manifest without touching the filesystem.
  pub fn with_manifest(config: ResolverConfig, manifest: Manifest) -> Self {
    Self {
      config,
      loaded: LoadedManifest {
        manifest,
        source: None,
      },
    }
  }

  /// Configuration this resolver was built with.
  pub fn config(&self) -> &ResolverConfig {
    &self.config
  }

  /// The loaded manifest.
  pub fn manifest(&self) -> &Manifest {
    &self.loaded.manifest
  }

  /// File the manifest was read from, if any.
  pub fn manifest_source(&self) -> Option<&Path> {
    self.loaded.source.as_deref()
  }

  /// Whether assets are served from the dev server.
  pub fn is_dev(&self) -> bool {
    self.config.is_dev
  }

  /// `{public}/{build}` on disk.
  pub fn build_path(&self) -> PathBuf {
    self.build_paths().build_path()
  }

  /// `{public}/{build}/assets` on disk.
  pub fn build_assets_path(&self) -> PathBuf {
    self.build_paths().build_assets_path()
  }

  /// URL of an asset, falling back to a basename match and then to a guess
  /// under `/{build}/assets/`.
  pub fn asset(&self, entry: &str) -> String {
    if self.config.is_dev {
      return self.dev_url(entry);
    }

    match find_by_key_or_basename(self.manifest(), entry) {
      Some(found) => self.build_url(&found.file),
      None => {
        tracing::debug!(entry, "asset not in manifest; guessing build path");
        self.guessed_asset_url(entry)
      }
    }
  }

  /// URL of an asset using the exact manifest key only; a miss yields `/{entry}`.
  pub fn asset_strict(&self, entry: &str) -> String {
    if self.config.is_dev {
      return self.dev_url(entry);
    }

    match self.manifest().file(entry) {
      Some(file) => self.build_url(file),
      None => {
        tracing::debug!(entry, "asset not in manifest; using public path");
        format!("/{}", entry.trim_start_matches('/'))
      }
    }
  }

  /// Script tags for an entry, imported chunks first and the entry itself last.
  ///
  /// In dev mode the entry is placed after the dev server URL as given.
  pub fn script_tags(&self, entry: &str) -> String {
    if self.config.is_dev {
      return raw_module_script(&self.dev_url(entry));
    }

    if self.config.mode == ResolutionMode::Legacy {
      return module_script(&self.asset(entry));
    }

    match find_script(self.manifest(), entry) {
      Some(ScriptMatch::Entry(found)) => {
        let mut tags = String::new();
        for import in &found.imports {
          match self.manifest().file(import) {
            Some(file) => tags.push_str(&module_script(&self.build_url(file))),
            None => tracing::warn!(
              entry,
              import = import.as_str(),
              "imported chunk missing from manifest"
            ),
          }
        }
        tags.push_str(&module_script(&self.build_url(&found.file)));
        tags
      }
      Some(ScriptMatch::File(file)) => module_script(&self.build_url(file)),
      None => {
        tracing::debug!(entry, "script entry not in manifest; guessing build path");
        module_script(&self.build_url(&format!("{entry}.js")))
      }
    }
  }

  /// Stylesheet link tags for an entry; empty in dev mode.
  pub fn link_tags(&self, entry: &str) -> String {
    self.link_tags_or(entry, None)
  }

  /// Stylesheet link tags, using `fallback` when the manifest yields none.
  ///
  /// Dev mode always returns an empty string since the dev runtime injects styles.
  pub fn link_tags_or(&self, entry: &str, fallback: Option<&str>) -> String {
    if self.config.is_dev {
      return String::new();
    }

    let files = match self.config.mode {
      ResolutionMode::Standard => find_stylesheets(self.manifest(), entry),
      ResolutionMode::Legacy => self
        .manifest()
        .get(entry)
        .map(|found| found.css.iter().map(String::as_str).collect())
        .unwrap_or_default(),
    };

    if files.is_empty() {
      return match fallback {
        Some(href) => {
          tracing::debug!(entry, href, "no stylesheets in manifest; using fallback");
          stylesheet_link(href)
        }
        None => String::new(),
      };
    }

    files
      .into_iter()
      .map(|file| stylesheet_link(&self.build_url(file)))
      .collect()
  }

  fn build_paths(&self) -> BuildPaths {
    BuildPaths::new(&self.config.public_path, &self.config.build_directory)
  }

  fn dev_url(&self, path: &str) -> String {
    format!("{}/{}", self.config.dev_server_url, path)
  }

  fn build_url(&self, file: &str) -> String {
    format!("/{}/{}", self.config.build_directory, file.trim_start_matches('/'))
  }

  fn guessed_asset_url(&self, entry: &str) -> String {
    format!("/{}/assets/{}", self.config.build_directory, basename(entry))
  }
}
