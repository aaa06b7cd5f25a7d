/* packages/cli/core/src/build.rs */

use std::path::Path;

use anyhow::{Context, Result};
use quire_engine::{Engine, ProjectConfig, Site};

use crate::project::{
  collect_pages, load_blocks, load_dictionaries, load_page, slug_from_path, DEFAULT_TEMPLATE,
};
use crate::ui;

#[derive(Debug, Default, PartialEq, Eq)]
pub struct BuildSummary {
  pub pages: usize,
  pub files: usize,
  pub bytes: u64,
}

/// Render every page file for every locale into `out_dir`.
pub fn build_site(root: &Path, config: &ProjectConfig) -> Result<BuildSummary> {
  let pages_dir = root.join(&config.build.pages_dir);
  let templates_dir = root.join(&config.build.templates_dir);
  let out_dir = root.join(&config.build.out_dir);

  let dictionaries = load_dictionaries(root, config)?;
  let blocks = load_blocks(root, config)?;
  let engine = Engine::new();
  let site = Site { engine: &engine, config, dictionaries: &dictionaries, blocks: &blocks };

  let mut summary = BuildSummary::default();
  for page_path in collect_pages(&pages_dir)? {
    let mut page = load_page(&page_path)?;
    if page.slug.is_empty() {
      page.slug = slug_from_path(&pages_dir, &page_path);
    }
    let template_name = page.template.as_deref().unwrap_or(DEFAULT_TEMPLATE);
    let template_path = templates_dir.join(template_name);
    let template = std::fs::read_to_string(&template_path).with_context(|| {
      format!("failed to read template {} for {}", template_path.display(), page_path.display())
    })?;

    for rendered in site.render_page(&template, &page) {
      let target = out_dir.join(&rendered.output_path);
      if let Some(parent) = target.parent() {
        std::fs::create_dir_all(parent)
          .with_context(|| format!("failed to create {}", parent.display()))?;
      }
      std::fs::write(&target, &rendered.html)
        .with_context(|| format!("failed to write {}", target.display()))?;
      ui::detail(&format!("{} [{}]", rendered.output_path, rendered.locale));
      summary.files += 1;
      summary.bytes += rendered.html.len() as u64;
    }
    summary.pages += 1;
  }
  Ok(summary)
}

pub fn run_build(root: &Path, config: &ProjectConfig) -> Result<()> {
  ui::banner("build");
  let locales = config.i18n.render_locales();
  ui::arrow(&format!("locales: {}", locales.join(", ")));

  let summary = build_site(root, config)?;
  if summary.pages == 0 {
    ui::warn(&format!("no page files found in {}", config.build.pages_dir));
  }
  ui::ok(&format!(
    "{} pages, {} files, {} -> {}",
    summary.pages,
    summary.files,
    ui::format_size(summary.bytes),
    config.build.out_dir
  ));
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, content).unwrap();
  }

  fn read(root: &Path, rel: &str) -> String {
    std::fs::read_to_string(root.join(rel)).unwrap()
  }

  #[test]
  fn builds_all_pages_and_locales() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    write(root, "locales/en.json", r#"{"nav": {"home": "Home", "about": "About"}}"#);
    write(root, "locales/de.json", r#"{"nav": {"home": "Start", "about": "Über uns"}}"#);
    write(
      root,
      "templates/page.html",
      concat!(
        "<html><nav><a class=\"{{active:/}}\" href=\"{{url:/}}\">{{t:nav.home}}</a>",
        "<a class=\"{{active:/about}}\" href=\"{{url:/about}}\">{{t:nav.about}}</a></nav>",
        "{{content}}</html>"
      ),
    );
    write(root, "templates/blocks/text.html", "<p>{{body}}</p>");
    write(root, "pages/index.yaml", "blocks:\n  - type: text\n    body: Welcome\n");
    write(root, "pages/about.yaml", "title: About\n");

    let config: ProjectConfig = toml::from_str(
      "[i18n]\nenabled = true\ndefault_locale = \"en\"\nlocales = [\"en\", \"de\"]\n",
    )
    .unwrap();
    let summary = build_site(root, &config).unwrap();
    assert_eq!(summary.pages, 2);
    assert_eq!(summary.files, 4);

    assert_eq!(
      read(root, "dist/index.html"),
      concat!(
        "<html lang=\"en\"><nav><a class=\"active\" href=\"/\">Home</a>",
        "<a class=\"\" href=\"/about\">About</a></nav><p>Welcome</p></html>"
      )
    );
    assert_eq!(
      read(root, "dist/de/about/index.html"),
      concat!(
        "<html lang=\"de\"><nav><a class=\"\" href=\"/\">Start</a>",
        "<a class=\"active\" href=\"/de/about\">Über uns</a></nav></html>"
      )
    );
    assert!(root.join("dist/about/index.html").is_file());
    assert!(root.join("dist/de/index.html").is_file());
  }

  #[test]
  fn missing_pages_dir_builds_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let summary = build_site(dir.path(), &ProjectConfig::default()).unwrap();
    assert_eq!(summary, BuildSummary::default());
    assert!(!dir.path().join("dist").exists());
  }

  #[test]
  fn missing_template_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "pages/index.yaml", "template: nope.html\n");
    let err = build_site(dir.path(), &ProjectConfig::default()).unwrap_err();
    assert!(err.to_string().contains("nope.html"));
  }
}
