#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod helpers;
pub mod manifest;
pub mod paths;
pub mod resolver;

pub use config::{AssetDirectories, AssetDirectory, ResolutionMode, ResolverConfig};
pub use error::{AssetError, AssetResult};
pub use helpers::{Helper, HelperArgs, HelperTable, TemplateEngine, attach};
pub use manifest::{LoadedManifest, Manifest, ManifestEntry, ManifestLoader};
pub use paths::{BuildPaths, PathProvider};
pub use resolver::AssetResolver;
