//! Image and font URLs, which may live outside the bundle in static directories.

use crate::config::{AssetDirectory, ResolutionMode};

use super::{
  AssetResolver, DEFAULT_IMAGE_PLACEHOLDER, DEFAULT_IMAGE_RESOURCE_PATH, FONT_RESOURCE_PATH,
};

impl AssetResolver {
  /// URL of an image.
  ///
  /// Production lookup order: the manifest key `{resource_path}/{path}`, the static
  /// file under the images directory, then `placeholder` in that directory.
  pub fn image(&self, path: &str, resource_path: &str, placeholder: &str) -> String {
    let resource_path = resource_path.trim_end_matches('/');
    if self.config.is_dev {
      return self.dev_url(&format!("{resource_path}/{path}"));
    }

    let key = format!("{resource_path}/{path}");
    if let Some(file) = self.manifest().file(&key) {
      return self.build_url(file);
    }

    self.static_url(&self.config.asset_directories.images, path, Some(placeholder))
  }

  /// [`AssetResolver::image`] with the default resource path and placeholder.
  pub fn image_default(&self, path: &str) -> String {
    self.image(path, DEFAULT_IMAGE_RESOURCE_PATH, DEFAULT_IMAGE_PLACEHOLDER)
  }

  /// URL of a font: the manifest key `resources/fonts/{path}`, else the static
  /// path under the fonts directory.
  pub fn font(&self, path: &str) -> String {
    let fonts = &self.config.asset_directories.fonts;
    if self.config.mode == ResolutionMode::Legacy {
      return self.static_url(fonts, path, None);
    }

    if self.config.is_dev {
      return self.dev_url(&format!("{FONT_RESOURCE_PATH}/{path}"));
    }

    let key = format!("{FONT_RESOURCE_PATH}/{path}");
    match self.manifest().file(&key) {
      Some(file) => self.build_url(file),
      None => self.static_url(fonts, path, None),
    }
  }

  /// `/{dir}/{path}`, or `/{dir}/{placeholder}` when the directory is verified
  /// and the file is not on disk.
  ///
  /// Checks that fail (permissions and the like) count as "not on disk".
  fn static_url(
    &self,
    directory: &AssetDirectory,
    path: &str,
    placeholder: Option<&str>,
  ) -> String {
    let dir = directory.trimmed();
    let relative = path.trim_start_matches('/');
    let direct = format!("/{dir}/{relative}");
    if !directory.verify_existence {
      return direct;
    }

    let on_disk = self.config.public_path.join(dir).join(relative);
    let exists = on_disk.try_exists().unwrap_or_else(|err| {
      tracing::warn!(path = %on_disk.display(), error = %err, "could not check static asset");
      false
    });
    if exists {
      return direct;
    }

    match placeholder {
      Some(placeholder) => {
        tracing::debug!(
          path = %on_disk.display(),
          placeholder,
          "static asset missing; using placeholder"
        );
        format!("/{dir}/{placeholder}")
      }
      None => {
        tracing::debug!(path = %on_disk.display(), "static asset missing");
        direct
      }
    }
  }
}
