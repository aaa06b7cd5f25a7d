/* packages/cli/core/src/render.rs */

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use quire_engine::{Engine, PageData, ProjectConfig, Site};

use crate::config::{find_config, load_config, CONFIG_FILE};
use crate::project::{load_blocks, load_dictionaries, load_page};
use crate::ui;

pub struct RenderArgs {
  pub template: PathBuf,
  pub page: Option<PathBuf>,
  pub config: Option<PathBuf>,
  pub locale: Option<String>,
  pub out: Option<PathBuf>,
}

/// Explicit config, else discovered from cwd, else defaults rooted at cwd.
fn config_or_default(explicit: Option<PathBuf>) -> Result<(PathBuf, ProjectConfig)> {
  if explicit.is_some() {
    return crate::config::resolve_config(explicit);
  }
  let cwd = std::env::current_dir().context("failed to get cwd")?;
  match find_config(&cwd) {
    Ok(path) => {
      let config = load_config(&path)?;
      let root = path.parent().map_or_else(|| cwd.clone(), Path::to_path_buf);
      Ok((root, config))
    }
    Err(_) => {
      tracing::debug!("no {CONFIG_FILE} found, using defaults");
      Ok((cwd, ProjectConfig::default()))
    }
  }
}

/// Render one template for one locale; returns the rendered text.
pub fn render_one(args: &RenderArgs, root: &Path, config: &ProjectConfig) -> Result<String> {
  let template = std::fs::read_to_string(&args.template)
    .with_context(|| format!("failed to read {}", args.template.display()))?;
  let page = match &args.page {
    Some(path) => load_page(path)?,
    None => PageData::default(),
  };
  let dictionaries = load_dictionaries(root, config)?;
  let blocks = load_blocks(root, config)?;

  let engine = Engine::new();
  let site = Site { engine: &engine, config, dictionaries: &dictionaries, blocks: &blocks };
  let locale = args.locale.as_deref().unwrap_or(&config.i18n.default_locale);
  Ok(site.render_locale(&template, &page, locale).html)
}

pub fn run_render(args: RenderArgs) -> Result<()> {
  let (root, config) = config_or_default(args.config.clone())?;
  let html = render_one(&args, &root, &config)?;

  match &args.out {
    Some(out) => {
      if let Some(parent) = out.parent() {
        std::fs::create_dir_all(parent)
          .with_context(|| format!("failed to create {}", parent.display()))?;
      }
      std::fs::write(out, &html).with_context(|| format!("failed to write {}", out.display()))?;
      ui::ok(&format!("{}  {}", out.display(), ui::format_size(html.len() as u64)));
    }
    None => {
      let mut stdout = std::io::stdout().lock();
      stdout.write_all(html.as_bytes()).context("failed to write to stdout")?;
      stdout.flush().context("failed to write to stdout")?;
    }
  }
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn render_one_with_page_and_locale() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    std::fs::create_dir_all(root.join("locales")).unwrap();
    std::fs::write(root.join("locales/en.json"), r#"{"greeting": "Hello"}"#).unwrap();
    std::fs::write(root.join("locales/de.json"), r#"{"greeting": "Hallo"}"#).unwrap();
    std::fs::write(root.join("page.html"), "{{t:greeting}}, {{name}} {{url:/about}}").unwrap();
    std::fs::write(root.join("page.yaml"), "slug: about\nname: Ada\n").unwrap();

    let config: ProjectConfig = toml::from_str(
      "[i18n]\nenabled = true\ndefault_locale = \"en\"\nlocales = [\"en\", \"de\"]\n",
    )
    .unwrap();
    let args = RenderArgs {
      template: root.join("page.html"),
      page: Some(root.join("page.yaml")),
      config: None,
      locale: Some("de".into()),
      out: None,
    };
    assert_eq!(render_one(&args, root, &config).unwrap(), "Hallo, Ada /de/about");
  }

  #[test]
  fn render_one_missing_template() {
    let dir = tempfile::tempdir().unwrap();
    let args = RenderArgs {
      template: dir.path().join("nope.html"),
      page: None,
      config: None,
      locale: None,
      out: None,
    };
    let err = render_one(&args, dir.path(), &ProjectConfig::default()).unwrap_err();
    assert!(err.to_string().contains("failed to read"));
  }
}
