/* packages/cli/core/src/project.rs */

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use quire_engine::{PageData, ProjectConfig};
use serde_json::Value;

/// Page template used when a page file names none.
pub const DEFAULT_TEMPLATE: &str = "page.html";
/// Block templates live in this subdirectory of `templates_dir`.
pub const BLOCKS_DIR: &str = "blocks";

const PAGE_EXTENSIONS: &[&str] = &["yaml", "yml", "json"];

fn read(path: &Path) -> Result<String> {
  std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

/// Load `<messages_dir>/<locale>.json` for every configured locale.
/// A missing file is not an error; the locale then borrows the default's keys.
pub fn load_dictionaries(root: &Path, config: &ProjectConfig) -> Result<BTreeMap<String, Value>> {
  let dir = root.join(&config.i18n.messages_dir);
  let mut locales = config.i18n.locales.clone();
  if !locales.contains(&config.i18n.default_locale) {
    locales.push(config.i18n.default_locale.clone());
  }

  let mut dictionaries = BTreeMap::new();
  for locale in locales {
    let path = dir.join(format!("{locale}.json"));
    if !path.is_file() {
      tracing::debug!(path = %path.display(), "no dictionary file");
      continue;
    }
    let data: Value = serde_json::from_str(&read(&path)?)
      .with_context(|| format!("failed to parse {}", path.display()))?;
    dictionaries.insert(locale, data);
  }
  Ok(dictionaries)
}

/// Load every `*.html` under `<templates_dir>/blocks`, keyed by file stem.
pub fn load_blocks(root: &Path, config: &ProjectConfig) -> Result<BTreeMap<String, String>> {
  let dir = root.join(&config.build.templates_dir).join(BLOCKS_DIR);
  let mut blocks = BTreeMap::new();
  if !dir.is_dir() {
    return Ok(blocks);
  }
  let entries =
    std::fs::read_dir(&dir).with_context(|| format!("failed to read {}", dir.display()))?;
  for entry in entries {
    let path = entry?.path();
    if path.extension().and_then(|e| e.to_str()) != Some("html") {
      continue;
    }
    if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
      blocks.insert(stem.to_string(), read(&path)?);
    }
  }
  Ok(blocks)
}

/// Parse a page file as YAML or JSON, by extension.
pub fn load_page(path: &Path) -> Result<PageData> {
  let content = read(path)?;
  let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
  let page = match ext {
    "yaml" | "yml" => serde_yaml::from_str(&content)
      .with_context(|| format!("failed to parse {}", path.display()))?,
    "json" => serde_json::from_str(&content)
      .with_context(|| format!("failed to parse {}", path.display()))?,
    _ => bail!("unsupported page file {} (expected .yaml, .yml or .json)", path.display()),
  };
  Ok(page)
}

/// All page files under `dir`, recursively, in path order. A missing `dir`
/// has no pages.
pub fn collect_pages(dir: &Path) -> Result<Vec<PathBuf>> {
  let mut pages = Vec::new();
  if !dir.is_dir() {
    return Ok(pages);
  }
  let mut pending = vec![dir.to_path_buf()];
  while let Some(current) = pending.pop() {
    let entries = std::fs::read_dir(&current)
      .with_context(|| format!("failed to read {}", current.display()))?;
    for entry in entries {
      let path = entry?.path();
      if path.is_dir() {
        pending.push(path);
      } else if path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| PAGE_EXTENSIONS.contains(&e))
      {
        pages.push(path);
      }
    }
  }
  pages.sort();
  Ok(pages)
}

/// Slug derived from a page file's location: `pages/blog/post.yaml` -> `blog/post`.
/// `index` files map to their directory.
pub fn slug_from_path(pages_dir: &Path, path: &Path) -> String {
  let relative = path.strip_prefix(pages_dir).unwrap_or(path).with_extension("");
  let parts: Vec<String> =
    relative.components().map(|c| c.as_os_str().to_string_lossy().into_owned()).collect();
  let slug = parts.join("/");
  match slug.strip_suffix("index") {
    Some(dir) if dir.is_empty() || dir.ends_with('/') => dir.trim_end_matches('/').to_string(),
    _ => slug,
  }
}
