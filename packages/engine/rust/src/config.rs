/* packages/engine/rust/src/config.rs */

use quire_template::LocaleStrategy;
use serde::{Deserialize, Serialize};

/// Project configuration as read from `quire.toml`. Exposed to templates
/// under the `config` key with the same field names.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectConfig {
  #[serde(default)]
  pub site: SiteSection,
  #[serde(default)]
  pub i18n: I18nSection,
  #[serde(default)]
  pub theme: ThemeSection,
  #[serde(default)]
  pub build: BuildSection,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteSection {
  #[serde(default)]
  pub name: String,
  #[serde(default)]
  pub title: Option<String>,
  /// Prepended to every generated link, e.g. `https://example.com` or `/docs`
  #[serde(default)]
  pub base_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct I18nSection {
  #[serde(default)]
  pub enabled: bool,
  #[serde(default = "default_locale")]
  pub default_locale: String,
  #[serde(default)]
  pub locales: Vec<String>,
  #[serde(default)]
  pub strategy: LocaleStrategy,
  #[serde(default = "default_messages_dir")]
  pub messages_dir: String,
}

impl Default for I18nSection {
  fn default() -> Self {
    Self {
      enabled: false,
      default_locale: default_locale(),
      locales: Vec::new(),
      strategy: LocaleStrategy::default(),
      messages_dir: default_messages_dir(),
    }
  }
}

impl I18nSection {
  /// Locales a page is rendered for: all configured ones when i18n is on,
  /// otherwise just the default.
  pub fn render_locales(&self) -> Vec<String> {
    if self.enabled && !self.locales.is_empty() {
      self.locales.clone()
    } else {
      vec![self.default_locale.clone()]
    }
  }

  pub fn prefix_for(&self, locale: &str) -> String {
    quire_template::locale_prefix(locale, &self.default_locale, self.strategy, self.enabled)
  }
}

fn default_locale() -> String {
  "en".to_string()
}

fn default_messages_dir() -> String {
  "locales".to_string()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IconLibrary {
  #[default]
  Bootstrap,
  Lucide,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ThemeSection {
  #[serde(default)]
  pub icons: IconLibrary,
  /// CSS framework name; only meaningful to the asset pipeline
  #[serde(default)]
  pub css: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildSection {
  #[serde(default = "default_out_dir")]
  pub out_dir: String,
  #[serde(default = "default_pages_dir")]
  pub pages_dir: String,
  #[serde(default = "default_templates_dir")]
  pub templates_dir: String,
}

impl Default for BuildSection {
  fn default() -> Self {
    Self {
      out_dir: default_out_dir(),
      pages_dir: default_pages_dir(),
      templates_dir: default_templates_dir(),
    }
  }
}

fn default_out_dir() -> String {
  "dist".to_string()
}

fn default_pages_dir() -> String {
  "pages".to_string()
}

fn default_templates_dir() -> String {
  "templates".to_string()
}
