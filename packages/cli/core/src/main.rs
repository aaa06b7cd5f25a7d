/* packages/cli/core/src/main.rs */

mod build;
mod config;
mod project;
mod render;
mod ui;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use config::resolve_config;
use render::RenderArgs;

/// Environment variable holding the tracing filter directive.
const LOG_ENV: &str = "QUIRE_LOG";

#[derive(Parser)]
#[command(name = "quire", version, about = "quire static-site generator")]
struct Cli {
  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// Render a single template for one locale
  Render {
    /// Template file to render
    template: PathBuf,
    /// Page data file (.yaml, .yml or .json)
    #[arg(short, long)]
    page: Option<PathBuf>,
    /// Path to quire.toml (auto-detected if omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Locale to render (defaults to i18n.default_locale)
    #[arg(short, long)]
    locale: Option<String>,
    /// Output file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,
  },
  /// Render every page for every locale into the output directory
  Build {
    /// Path to quire.toml (auto-detected if omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,
  },
}

fn init_tracing() {
  let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
  tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

fn main() -> Result<()> {
  init_tracing();
  let cli = Cli::parse();

  match cli.command {
    Command::Render { template, page, config, locale, out } => {
      render::run_render(RenderArgs { template, page, config, locale, out })?;
    }
    Command::Build { config } => {
      let (root, project) = resolve_config(config)?;
      build::run_build(&root, &project)?;
    }
  }

  Ok(())
}
