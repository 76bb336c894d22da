//! Manifest data model and candidate-ordered loading.

mod loader;
mod model;

pub use loader::{LoadedManifest, ManifestLoader};
pub use model::{Manifest, ManifestEntry};
