use std::fs;
use std::path::Path;
use std::sync::Arc;

use tempfile::{TempDir, tempdir};
use vite_assets::{AssetError, AssetResolver, HelperTable, PathProvider, ResolverConfig};

const MANIFEST: &str = r#"{
  "resources/js/app.js": {
    "file": "assets/app-ABC123.js",
    "src": "resources/js/app.js",
    "isEntry": true,
    "css": ["assets/app-DEF456.css"],
    "imports": ["_chunk-GHI789.js"]
  },
  "_chunk-GHI789.js": {
    "file": "assets/_chunk-GHI789-JKL012.js"
  },
  "resources/images/logo.png": {
    "file": "assets/logo-MNO345.png"
  },
  "resources/fonts/custom.woff2": {
    "file": "assets/custom-PQR678.woff2"
  }
}"#;

fn public_dir(manifest_location: &str, content: &str) -> TempDir {
  let public = tempdir().unwrap();
  let path = public.path().join(manifest_location);
  fs::create_dir_all(path.parent().unwrap()).unwrap();
  fs::write(path, content).unwrap();
  public
}

fn prod_resolver(public: &Path) -> AssetResolver {
  AssetResolver::new(ResolverConfig::default().with_public_path(public)).unwrap()
}

#[test]
fn loads_manifest_from_build_directory() {
  let public = public_dir("build/manifest.json", MANIFEST);
  let resolver = prod_resolver(public.path());

  assert_eq!(resolver.manifest().len(), 4);
  assert_eq!(resolver.manifest_source(), Some(public.path().join("build/manifest.json").as_path()));
  assert_eq!(resolver.build_path(), public.path().join("build"));
  assert_eq!(resolver.build_assets_path(), public.path().join("build/assets"));
  assert_eq!(resolver.asset("resources/js/app.js"), "/build/assets/app-ABC123.js");
}

#[test]
fn falls_back_to_dot_vite_manifest() {
  let public = public_dir("build/.vite/manifest.json", MANIFEST);
  fs::write(public.path().join("build/manifest.json"), "not json").unwrap();

  let resolver = prod_resolver(public.path());
  assert_eq!(
    resolver.manifest_source(),
    Some(public.path().join("build/.vite/manifest.json").as_path())
  );
}

#[test]
fn explicit_manifest_path_takes_priority() {
  let public = public_dir("build/manifest.json", MANIFEST);
  let explicit = public.path().join("custom.json");
  fs::write(&explicit, r#"{"resources/js/app.js": {"file": "assets/app-XYZ.js"}}"#).unwrap();

  let config = ResolverConfig::default()
    .with_public_path(public.path())
    .with_manifest_path(&explicit);
  let resolver = AssetResolver::new(config).unwrap();
  assert_eq!(resolver.asset("resources/js/app.js"), "/build/assets/app-XYZ.js");
}

#[test]
fn production_without_manifest_is_an_error() {
  let public = tempdir().unwrap();
  let config = ResolverConfig::default().with_public_path(public.path());
  let err = AssetResolver::new(config).unwrap_err();
  match err {
    AssetError::ManifestNotFound { candidates } => assert_eq!(candidates.len(), 2),
    other => panic!("unexpected error: {other}"),
  }
}

#[test]
fn dev_without_manifest_uses_dev_server() {
  let public = tempdir().unwrap();
  let config = ResolverConfig::default().with_public_path(public.path()).with_dev(true);
  let resolver = AssetResolver::new(config).unwrap();

  assert!(resolver.manifest().is_empty());
  for entry in ["resources/js/app.js", "x/y.js", "app"] {
    assert_eq!(
      resolver.script_tags(entry),
      format!(r#"<script type="module" src="http://localhost:5173/{entry}"></script>"#)
    );
    assert_eq!(resolver.link_tags(entry), "");
  }
}

#[test]
fn dev_mode_ignores_manifest_contents() {
  let public = public_dir("build/manifest.json", MANIFEST);
  let config = ResolverConfig::default().with_public_path(public.path()).with_dev(true);
  let resolver = AssetResolver::new(config).unwrap();

  assert_eq!(resolver.asset("resources/js/app.js"), "http://localhost:5173/resources/js/app.js");
  assert_eq!(
    resolver.image("logo.png", "resources/images", "placeholder.jpg"),
    "http://localhost:5173/resources/images/logo.png"
  );
  assert_eq!(resolver.font("custom.woff2"), "http://localhost:5173/resources/fonts/custom.woff2");
}

#[test]
fn imports_are_emitted_before_the_entry() {
  let public = public_dir("build/manifest.json", MANIFEST);
  let tags = prod_resolver(public.path()).script_tags("resources/js/app.js");

  let chunk = tags
    .find(r#"src="/build/assets/_chunk-GHI789-JKL012.js""#)
    .expect("chunk tag");
  let entry = tags.find(r#"src="/build/assets/app-ABC123.js""#).expect("entry tag");
  assert!(chunk < entry);
  assert_eq!(tags.matches("<script").count(), 2);
}

#[test]
fn single_entry_scenario() {
  let public = public_dir(
    "build/manifest.json",
    r#"{"a.js": {"file": "assets/a.abc.js", "css": ["assets/a.abc.css"]}}"#,
  );
  let resolver = prod_resolver(public.path());

  assert_eq!(
    resolver.link_tags("a.js"),
    r#"<link rel="stylesheet" href="/build/assets/a.abc.css">"#
  );
  assert_eq!(
    resolver.script_tags("a.js"),
    r#"<script type="module" src="/build/assets/a.abc.js"></script>"#
  );
}

#[test]
fn empty_manifest_guesses_asset_paths() {
  let public = public_dir("build/manifest.json", "{}");
  let resolver = prod_resolver(public.path());

  assert_eq!(resolver.asset("x/y.js"), "/build/assets/y.js");
  assert_eq!(resolver.asset("deep/nested/dir/file.css"), "/build/assets/file.css");
}

#[test]
fn image_branches_are_priority_ordered() {
  let public = public_dir("build/manifest.json", MANIFEST);
  fs::create_dir_all(public.path().join("assets/images")).unwrap();
  fs::write(public.path().join("assets/images/banner.jpg"), b"jpg").unwrap();
  fs::write(public.path().join("assets/images/logo.png"), b"png").unwrap();
  let resolver = prod_resolver(public.path());

  assert_eq!(resolver.image_default("logo.png"), "/build/assets/logo-MNO345.png");
  assert_eq!(resolver.image_default("banner.jpg"), "/assets/images/banner.jpg");
  assert_eq!(
    resolver.image("non-existent.png", "resources/images", "placeholder.jpg"),
    "/assets/images/placeholder.jpg"
  );
}

#[test]
fn fonts_use_manifest_then_static_directory() {
  let public = public_dir("build/manifest.json", MANIFEST);
  let resolver = prod_resolver(public.path());

  assert_eq!(resolver.font("custom.woff2"), "/build/assets/custom-PQR678.woff2");
  assert_eq!(resolver.font("missing.woff2"), "/assets/fonts/missing.woff2");
}

#[test]
fn two_instances_resolve_identically() {
  let public = public_dir("build/manifest.json", MANIFEST);
  let first = prod_resolver(public.path());
  let second = prod_resolver(public.path());

  for entry in ["resources/js/app.js", "_chunk-GHI789.js", "app", "x/y.js", "logo.png"] {
    assert_eq!(first.asset(entry), second.asset(entry));
    assert_eq!(first.script_tags(entry), second.script_tags(entry));
    assert_eq!(first.link_tags(entry), second.link_tags(entry));
  }
}

#[test]
fn path_provider_supplies_public_root_and_manifest() {
  struct Paths {
    root: std::path::PathBuf,
  }
  impl PathProvider for Paths {
    fn public_path(&self) -> std::path::PathBuf {
      self.root.clone()
    }
    fn manifest_path(&self) -> Option<std::path::PathBuf> {
      Some(self.root.join("elsewhere/manifest.json"))
    }
  }

  let public = public_dir("elsewhere/manifest.json", MANIFEST);
  let paths = Paths {
    root: public.path().to_path_buf(),
  };
  let resolver = AssetResolver::from_provider(&paths, ResolverConfig::default()).unwrap();
  assert_eq!(resolver.font("custom.woff2"), "/build/assets/custom-PQR678.woff2");
}

#[test]
fn shared_resolver_serves_template_helpers() {
  let public = public_dir("build/manifest.json", MANIFEST);
  let resolver = Arc::new(prod_resolver(public.path()));
  let helpers = HelperTable::for_resolver(Arc::clone(&resolver));

  let handles: Vec<_> = (0..4)
    .map(|_| {
      let resolver = Arc::clone(&resolver);
      std::thread::spawn(move || resolver.link_tags("resources/js/app.js"))
    })
    .collect();
  for handle in handles {
    assert_eq!(
      handle.join().unwrap(),
      helpers.call("vite_entry_link_tags", &["resources/js/app.js"]).unwrap()
    );
  }
}
