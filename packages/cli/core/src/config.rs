/* packages/cli/core/src/config.rs */

mod loader;

pub use loader::{find_config, load_config, resolve_config, CONFIG_FILE};

use std::collections::HashSet;

use anyhow::{bail, Result};
use quire_engine::{I18nSection, ProjectConfig};

pub fn validate_i18n(i18n: &I18nSection) -> Result<()> {
  if !i18n.enabled {
    return Ok(());
  }
  if i18n.locales.is_empty() {
    bail!("i18n.locales must not be empty when i18n is enabled");
  }
  if !i18n.locales.contains(&i18n.default_locale) {
    bail!(
      "i18n.default_locale \"{}\" is not in i18n.locales {:?}",
      i18n.default_locale,
      i18n.locales
    );
  }
  let mut seen = HashSet::new();
  for locale in &i18n.locales {
    if !seen.insert(locale.as_str()) {
      bail!("duplicate locale in i18n.locales: {locale}");
    }
  }
  Ok(())
}

pub fn validate(config: &ProjectConfig) -> Result<()> {
  validate_i18n(&config.i18n)
}

#[cfg(test)]
mod tests;
