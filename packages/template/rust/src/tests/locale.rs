/* packages/template/rust/src/tests/locale.rs */

use serde_json::json;

use crate::{locale_prefix, render_template, LocaleStrategy};

fn ctx_for(locale: &str, strategy: LocaleStrategy) -> serde_json::Value {
  let prefix = locale_prefix(locale, "en", strategy, true);
  json!({
    "config": {"i18n": {"default_locale": "en", "locales": ["en", "de", "fr"]}},
    "currentLang": locale,
    "langPrefix": prefix,
  })
}

#[test]
fn root_and_page_links_for_secondary_locale() {
  let ctx = ctx_for("de", LocaleStrategy::PrefixExceptDefault);
  assert_eq!(render_template("{{url:/}}{{url:/about}}", &ctx), "//de/about");
}

#[test]
fn default_locale_unprefixed_except_with_prefix_strategy() {
  let ctx = ctx_for("en", LocaleStrategy::PrefixExceptDefault);
  assert_eq!(render_template("{{url:/about/}}", &ctx), "/about");
  let ctx = ctx_for("en", LocaleStrategy::Prefix);
  assert_eq!(render_template("{{url:/about/}}", &ctx), "/en/about");
}

#[test]
fn root_link_identical_across_locales() {
  for strategy in [LocaleStrategy::Prefix, LocaleStrategy::PrefixExceptDefault] {
    for locale in ["en", "de", "fr"] {
      assert_eq!(render_template("{{url:/}}", &ctx_for(locale, strategy)), "/");
    }
  }
}

#[test]
fn language_switcher() {
  let t = concat!(
    "{{#each languages}}",
    "<a class=\"{{langActive:de, current}}\" lang=\"{{code}}\">{{code}}</a>",
    "{{/each}}|{{currentLang:}}{{langPrefix:}}"
  );
  let mut ctx = ctx_for("de", LocaleStrategy::PrefixExceptDefault);
  ctx["languages"] = json!([{"code": "en"}, {"code": "de"}]);
  assert_eq!(
    render_template(t, &ctx),
    "<a class=\"current\" lang=\"en\">en</a><a class=\"current\" lang=\"de\">de</a>|de/de"
  );
}

#[test]
fn asset_never_prefixed() {
  let mut ctx = ctx_for("fr", LocaleStrategy::Prefix);
  ctx["baseUrl"] = json!("https://cdn.example/");
  assert_eq!(render_template("{{asset:img/logo.svg}}", &ctx), "https://cdn.example/img/logo.svg");
}
