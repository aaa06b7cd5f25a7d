/* packages/engine/rust/src/page.rs */

use std::collections::BTreeMap;

use quire_template::Engine;
use serde_json::Value;

use crate::config::ProjectConfig;
use crate::context::{ContextBuilder, PageData};
use crate::i18n::dictionary_for;

/// Context key receiving the concatenated block output of a page.
pub const CONTENT_KEY: &str = "content";

/// One rendered page for one locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPage {
  pub locale: String,
  /// Relative to the output directory, `/`-separated
  pub output_path: String,
  pub html: String,
}

/// Everything a page render needs besides the page itself.
pub struct Site<'a> {
  pub engine: &'a Engine,
  pub config: &'a ProjectConfig,
  /// Locale code -> dictionary
  pub dictionaries: &'a BTreeMap<String, Value>,
  /// Block type -> block template
  pub blocks: &'a BTreeMap<String, String>,
}

impl Site<'_> {
  /// Render `page` once per configured locale.
  pub fn render_page(&self, template: &str, page: &PageData) -> Vec<RenderedPage> {
    self
      .config
      .i18n
      .render_locales()
      .iter()
      .map(|locale| self.render_locale(template, page, locale))
      .collect()
  }

  pub fn render_locale(&self, template: &str, page: &PageData, locale: &str) -> RenderedPage {
    let i18n = &self.config.i18n;
    let dictionary = dictionary_for(self.dictionaries, locale, &i18n.default_locale);
    let base = ContextBuilder::new(self.config).locale(locale).locale_data(dictionary).page(page);

    let content = self.render_blocks(&base, page);
    let ctx = base.insert(CONTENT_KEY, Value::String(content)).build();
    let mut html = self.engine.render(template, &ctx);
    if i18n.enabled {
      html = inject_html_lang(&html, locale);
    }

    tracing::debug!(slug = %page.slug, locale, "rendered page");
    RenderedPage {
      locale: locale.to_string(),
      output_path: output_path(&i18n.prefix_for(locale), &page.slug),
      html,
    }
  }

  fn render_blocks(&self, base: &ContextBuilder<'_>, page: &PageData) -> String {
    let mut out = String::new();
    for block in &page.blocks {
      let Some(template) = self.blocks.get(&block.kind) else {
        tracing::warn!(
          block = %block.kind,
          slug = %page.slug,
          "no template for block, skipping"
        );
        continue;
      };
      let ctx = base.clone().block(&block.props).build();
      out.push_str(&self.engine.render(template, &ctx));
    }
    out
  }
}

/// Output file for a page: `<locale prefix>/<slug>/index.html`, with the
/// root slug (`""` or `index`) written directly under the prefix.
pub fn output_path(prefix: &str, slug: &str) -> String {
  let mut parts: Vec<&str> = Vec::new();
  let prefix = prefix.trim_matches('/');
  if !prefix.is_empty() {
    parts.push(prefix);
  }
  let slug = slug.trim_matches('/');
  if !slug.is_empty() && slug != "index" {
    parts.push(slug);
  }
  parts.push("index.html");
  parts.join("/")
}

/// Set `lang` on the `<html>` element unless it already carries one.
pub fn inject_html_lang(html: &str, locale: &str) -> String {
  let Some(start) = html.find("<html") else {
    return html.to_string();
  };
  let after = start + "<html".len();
  let rest = &html[after..];
  if !rest.starts_with(|c: char| c == '>' || c.is_whitespace()) {
    return html.to_string();
  }
  let tag_end = rest.find('>').unwrap_or(rest.len());
  if rest[..tag_end].contains("lang=") {
    return html.to_string();
  }
  format!("{}<html lang=\"{locale}\"{}", &html[..start], rest)
}
