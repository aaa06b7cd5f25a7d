/* packages/cli/core/src/config/loader.rs */

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use quire_engine::ProjectConfig;

pub const CONFIG_FILE: &str = "quire.toml";

/// Nearest `quire.toml` in `start` or one of its ancestors.
pub fn find_config(start: &Path) -> Result<PathBuf> {
  let absolute =
    start.canonicalize().with_context(|| format!("failed to canonicalize {}", start.display()))?;
  absolute
    .ancestors()
    .map(|dir| dir.join(CONFIG_FILE))
    .find(|candidate| candidate.is_file())
    .with_context(|| format!("no {CONFIG_FILE} in {} or any parent directory", start.display()))
}

/// Parse and validate a project config; errors name the offending file.
pub fn load_config(path: &Path) -> Result<ProjectConfig> {
  let content =
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
  let config: ProjectConfig =
    toml::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))?;
  super::validate(&config).with_context(|| format!("invalid project config {}", path.display()))?;
  Ok(config)
}

/// Resolve config path (explicit or auto-detected) and parse it.
/// Returns the project root alongside the config.
pub fn resolve_config(explicit: Option<PathBuf>) -> Result<(PathBuf, ProjectConfig)> {
  let path = match explicit {
    Some(p) => p,
    None => {
      let cwd = std::env::current_dir().context("failed to get cwd")?;
      find_config(&cwd)?
    }
  };
  let config = load_config(&path)?;
  let root = path.parent().map_or_else(|| PathBuf::from("."), Path::to_path_buf);
  Ok((root, config))
}
