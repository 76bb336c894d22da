//! Template-engine seam: named helper functions backed by a shared resolver.
//!
//! Engine adapters implement [`TemplateEngine`]; [`attach`] hands them one
//! [`Helper`] per template function. Each helper closes over an
//! `Arc<AssetResolver>`, so nothing is stored in globals.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::error::{AssetError, AssetResult};
use crate::resolver::{AssetResolver, DEFAULT_IMAGE_PLACEHOLDER, DEFAULT_IMAGE_RESOURCE_PATH};

/// Positional string arguments passed from a template call.
#[derive(Debug, Clone, Copy)]
pub struct HelperArgs<'a> {
  helper: &'a str,
  values: &'a [&'a str],
}

impl<'a> HelperArgs<'a> {
  /// Wrap the arguments of a call to `helper`.
  pub fn new(helper: &'a str, values: &'a [&'a str]) -> Self {
    Self { helper, values }
  }

  /// Argument at `index`, or [`AssetError::MissingArgument`].
  pub fn required(&self, index: usize) -> AssetResult<&'a str> {
    self.optional(index).ok_or_else(|| AssetError::MissingArgument {
      helper: self.helper.to_string(),
      index,
    })
  }

  /// Argument at `index` when it was supplied.
  pub fn optional(&self, index: usize) -> Option<&'a str> {
    self.values.get(index).copied()
  }
}

type HelperFn = dyn Fn(HelperArgs<'_>) -> AssetResult<String> + Send + Sync;

/// A named template function.
#[derive(Clone)]
pub struct Helper {
  name: &'static str,
  is_safe_html: bool,
  call: Arc<HelperFn>,
}

impl Helper {
  fn new<F>(name: &'static str, is_safe_html: bool, call: F) -> Self
  where
    F: Fn(HelperArgs<'_>) -> AssetResult<String> + Send + Sync + 'static,
  {
    Self {
      name,
      is_safe_html,
      call: Arc::new(call),
    }
  }

  /// Name the template uses to call the helper.
  pub fn name(&self) -> &'static str {
    self.name
  }

  /// `true` when the output is markup the engine must not escape.
  pub fn is_safe_html(&self) -> bool {
    self.is_safe_html
  }

  /// Invoke the helper with positional arguments.
  pub fn call(&self, args: &[&str]) -> AssetResult<String> {
    (self.call)(HelperArgs::new(self.name, args))
  }
}

impl fmt::Debug for Helper {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Helper")
      .field("name", &self.name)
      .field("is_safe_html", &self.is_safe_html)
      .finish_non_exhaustive()
  }
}

/// Registration capability implemented once per templating system.
pub trait TemplateEngine {
  /// Make `helper` callable from templates under [`Helper::name`].
  fn register_helper(&mut self, helper: Helper);
}

/// Every helper backed by `resolver`, including the `vite_js` / `vite_css` aliases.
pub fn helpers(resolver: Arc<AssetResolver>) -> Vec<Helper> {
  let asset = Arc::clone(&resolver);
  let asset_strict = Arc::clone(&resolver);
  let scripts = Arc::clone(&resolver);
  let links = Arc::clone(&resolver);
  let image = Arc::clone(&resolver);
  let font = resolver;

  let script_helper = move |args: HelperArgs<'_>| -> AssetResult<String> {
    Ok(scripts.script_tags(args.required(0)?))
  };
  let link_helper = move |args: HelperArgs<'_>| -> AssetResult<String> {
    Ok(links.link_tags_or(args.required(0)?, args.optional(1)))
  };

  vec![
    Helper::new("vite_asset", false, move |args| Ok(asset.asset(args.required(0)?))),
    Helper::new("vite_asset_strict", false, move |args| {
      Ok(asset_strict.asset_strict(args.required(0)?))
    }),
    Helper::new("vite_entry_script_tags", true, script_helper.clone()),
    Helper::new("vite_js", true, script_helper),
    Helper::new("vite_entry_link_tags", true, link_helper.clone()),
    Helper::new("vite_css", true, link_helper),
    Helper::new("vite_image", false, move |args| {
      Ok(image.image(
        args.required(0)?,
        args.optional(1).unwrap_or(DEFAULT_IMAGE_RESOURCE_PATH),
        args.optional(2).unwrap_or(DEFAULT_IMAGE_PLACEHOLDER),
      ))
    }),
    Helper::new("vite_font", false, move |args| Ok(font.font(args.required(0)?))),
  ]
}

/// Register every helper with `engine`.
pub fn attach<E>(resolver: Arc<AssetResolver>, engine: &mut E)
where
  E: TemplateEngine + ?Sized,
{
  for helper in helpers(resolver) {
    tracing::debug!(helper = helper.name(), "registering template helper");
    engine.register_helper(helper);
  }
}

/// Function table for hosts that dispatch helpers by name.
#[derive(Debug, Clone, Default)]
pub struct HelperTable {
  helpers: BTreeMap<&'static str, Helper>,
}

impl HelperTable {
  /// Empty table.
  pub fn new() -> Self {
    Self::default()
  }

  /// Table with every helper for `resolver` registered.
  pub fn for_resolver(resolver: Arc<AssetResolver>) -> Self {
    let mut table = Self::new();
    attach(resolver, &mut table);
    table
  }

  /// Call the helper registered as `name`.
  pub fn call(&self, name: &str, args: &[&str]) -> AssetResult<String> {
    self
      .helpers
      .get(name)
      .ok_or_else(|| AssetError::UnknownHelper(name.to_string()))?
      .call(args)
  }

  /// Look up a registered helper.
  pub fn get(&self, name: &str) -> Option<&Helper> {
    self.helpers.get(name)
  }

  /// Registered helper names in order.
  pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
    self.helpers.keys().copied()
  }
}

impl TemplateEngine for HelperTable {
  fn register_helper(&mut self, helper: Helper) {
    self.helpers.insert(helper.name(), helper);
  }
}
