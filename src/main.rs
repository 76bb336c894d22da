//! Command-line access to the resolver, for checking what templates will render.
//!
//! Usage: vite-assets [OPTIONS] <COMMAND>

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use vite_assets::resolver::{DEFAULT_IMAGE_PLACEHOLDER, DEFAULT_IMAGE_RESOURCE_PATH};
use vite_assets::{AssetResolver, ResolutionMode, ResolverConfig};

/// Resolve Vite manifest entries into URLs and HTML tags
#[derive(Parser, Debug)]
#[command(name = "vite-assets")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// JSON configuration file (defaults to ./vite-assets.config.json when present)
  #[arg(short, long, global = true)]
  config: Option<PathBuf>,

  /// Resolve against the dev server instead of the manifest
  #[arg(long, global = true)]
  dev: bool,

  /// Public web root
  #[arg(long, global = true)]
  public: Option<PathBuf>,

  /// Build directory under the public root
  #[arg(long, global = true)]
  build_dir: Option<String>,

  /// Explicit manifest file
  #[arg(long, global = true)]
  manifest: Option<PathBuf>,

  /// Dev server base URL
  #[arg(long, global = true)]
  dev_server: Option<String>,

  /// Use the legacy lookup rules
  #[arg(long, global = true)]
  legacy: bool,

  /// Log every fallback taken
  #[arg(short, long, global = true)]
  verbose: bool,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
  /// Print the URL of an asset
  Asset {
    /// Manifest entry
    entry: String,
    /// Exact manifest key only
    #[arg(long)]
    strict: bool,
  },
  /// Print the script tags for an entry
  Script {
    /// Manifest entry
    entry: String,
  },
  /// Print the stylesheet link tags for an entry
  Css {
    /// Manifest entry
    entry: String,
    /// Stylesheet used when the manifest has none
    #[arg(long)]
    fallback: Option<String>,
  },
  /// Print the URL of an image
  Image {
    /// Image path relative to the resource and images directories
    path: String,
    /// Source directory of the image
    #[arg(long, default_value = DEFAULT_IMAGE_RESOURCE_PATH)]
    resource_path: String,
    /// Image used when nothing else matches
    #[arg(long, default_value = DEFAULT_IMAGE_PLACEHOLDER)]
    placeholder: String,
  },
  /// Print the URL of a font
  Font {
    /// Font path relative to the fonts directory
    path: String,
  },
  /// Print the loaded manifest as JSON
  Manifest,
}

fn main() -> Result<()> {
  let cli = Cli::parse();
  init_logging(cli.verbose);

  let config = load_config(&cli)?;
  let resolver = AssetResolver::new(config).context("failed to initialise asset resolver")?;

  let output = match cli.command {
    Commands::Asset { entry, strict } => {
      if strict {
        resolver.asset_strict(&entry)
      } else {
        resolver.asset(&entry)
      }
    }
    Commands::Script { entry } => resolver.script_tags(&entry),
    Commands::Css { entry, fallback } => resolver.link_tags_or(&entry, fallback.as_deref()),
    Commands::Image {
      path,
      resource_path,
      placeholder,
    } => resolver.image(&path, &resource_path, &placeholder),
    Commands::Font { path } => resolver.font(&path),
    Commands::Manifest => serde_json::to_string_pretty(resolver.manifest())
      .context("failed to serialise manifest")?,
  };

  println!("{output}");
  Ok(())
}

fn init_logging(verbose: bool) {
  let default = if verbose { "vite_assets=debug" } else { "vite_assets=warn" };
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_target(false)
    .with_writer(std::io::stderr)
    .init();
}

fn load_config(cli: &Cli) -> Result<ResolverConfig> {
  let mut config = match &cli.config {
    Some(path) => ResolverConfig::from_path(path)
      .with_context(|| format!("failed to load configuration from {}", path.display()))?,
    None => {
      let cwd = std::env::current_dir().context("failed to read current directory")?;
      ResolverConfig::discover(&cwd)
    }
  };

  if cli.dev {
    config = config.with_dev(true);
  }
  if cli.legacy {
    config = config.with_mode(ResolutionMode::Legacy);
  }
  if let Some(public) = &cli.public {
    config = config.with_public_path(public);
  }
  if let Some(build_dir) = &cli.build_dir {
    config = config.with_build_directory(build_dir);
  }
  if let Some(manifest) = &cli.manifest {
    config = config.with_manifest_path(manifest);
  }
  if let Some(url) = &cli.dev_server {
    config = config.with_dev_server_url(url);
  }
  Ok(config)
}
