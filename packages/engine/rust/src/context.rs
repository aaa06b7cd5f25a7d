/* packages/engine/rust/src/context.rs */

use quire_template::keys;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::config::ProjectConfig;

/// One block placed on a page: its template name plus instance properties.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockInstance {
  #[serde(rename = "type")]
  pub kind: String,
  #[serde(flatten)]
  pub props: Map<String, Value>,
}

/// A page definition as read from a page file. Unknown keys become
/// template-visible properties.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageData {
  #[serde(default)]
  pub slug: String,
  #[serde(default)]
  pub active_nav: Option<String>,
  /// Page template name; the build picks a default when absent
  #[serde(default)]
  pub template: Option<String>,
  #[serde(default)]
  pub blocks: Vec<BlockInstance>,
  #[serde(flatten)]
  pub props: Map<String, Value>,
}

/// Assembles the mapping a template is rendered against.
///
/// Later layers win: page properties, then block properties, then the
/// reserved keys (`config`, `currentLang`, `langPrefix`, `localeData`,
/// `baseUrl`, `slug`, `activeNav`).
#[derive(Debug, Clone)]
pub struct ContextBuilder<'a> {
  config: &'a ProjectConfig,
  locale: Option<String>,
  locale_data: Option<Value>,
  page: Option<&'a PageData>,
  block: Map<String, Value>,
  extra: Map<String, Value>,
}

impl<'a> ContextBuilder<'a> {
  pub fn new(config: &'a ProjectConfig) -> Self {
    Self {
      config,
      locale: None,
      locale_data: None,
      page: None,
      block: Map::new(),
      extra: Map::new(),
    }
  }

  pub fn locale(mut self, locale: impl Into<String>) -> Self {
    self.locale = Some(locale.into());
    self
  }

  pub fn locale_data(mut self, data: Value) -> Self {
    self.locale_data = Some(data);
    self
  }

  pub fn page(mut self, page: &'a PageData) -> Self {
    self.page = Some(page);
    self
  }

  pub fn block(mut self, props: &Map<String, Value>) -> Self {
    self.block.extend(props.iter().map(|(k, v)| (k.clone(), v.clone())));
    self
  }

  /// Extra orchestrator-supplied value, applied after block properties.
  pub fn insert(mut self, key: impl Into<String>, value: Value) -> Self {
    self.extra.insert(key.into(), value);
    self
  }

  /// Locale the context renders for: explicit, else the configured default.
  pub fn resolved_locale(&self) -> &str {
    self.locale.as_deref().unwrap_or(&self.config.i18n.default_locale)
  }

  pub fn build(&self) -> Value {
    let mut ctx = self.page.map(|p| p.props.clone()).unwrap_or_default();
    ctx.extend(self.block.clone());
    ctx.extend(self.extra.clone());

    let locale = self.resolved_locale();
    let config = serde_json::to_value(self.config).unwrap_or_default();
    ctx.insert(keys::CONFIG.to_string(), config);
    ctx.insert(keys::CURRENT_LANG.to_string(), Value::from(locale));
    ctx.insert(keys::LANG_PREFIX.to_string(), Value::from(self.config.i18n.prefix_for(locale)));
    ctx.insert(
      keys::BASE_URL.to_string(),
      Value::from(self.config.site.base_url.trim_end_matches('/')),
    );
    if let Some(ref data) = self.locale_data {
      ctx.insert(keys::LOCALE_DATA.to_string(), data.clone());
    }
    if let Some(page) = self.page {
      ctx.insert(keys::SLUG.to_string(), Value::from(page.slug.as_str()));
      if let Some(ref nav) = page.active_nav {
        ctx.insert(keys::ACTIVE_NAV.to_string(), Value::from(nav.as_str()));
      }
    }
    Value::Object(ctx)
  }
}
