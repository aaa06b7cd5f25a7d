/* packages/template/rust/src/locale.rs */

use serde::{Deserialize, Serialize};

/// How locale codes appear in generated URLs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocaleStrategy {
  /// Every locale, the default included, lives under `/<locale>`.
  Prefix,
  /// The default locale is served from the site root; others under `/<locale>`.
  #[default]
  PrefixExceptDefault,
}

/// URL prefix for `locale`: empty or `/<locale>`.
pub fn locale_prefix(
  locale: &str,
  default_locale: &str,
  strategy: LocaleStrategy,
  i18n_enabled: bool,
) -> String {
  if !i18n_enabled {
    return String::new();
  }
  match strategy {
    LocaleStrategy::PrefixExceptDefault if locale == default_locale => String::new(),
    _ => format!("/{locale}"),
  }
}

fn leading_slash(path: &str) -> String {
  if path.starts_with('/') { path.to_string() } else { format!("/{path}") }
}

/// Build a link target for `path` under the active locale prefix.
///
/// The site root is never prefixed: `/` always maps to `<base>/` so links
/// back to the root work from every locale. Other paths lose one trailing
/// slash and gain `<base><prefix>` in front. Paths are not inspected for
/// embedded locale segments; hardcode those links instead of routing them
/// through here.
pub fn localized_url(path: &str, base_url: &str, prefix: &str) -> String {
  let base = base_url.trim_end_matches('/');
  let path = leading_slash(path);
  if path == "/" {
    return format!("{base}/");
  }
  let path = path.strip_suffix('/').unwrap_or(&path);
  format!("{base}{prefix}{path}")
}

/// Static asset URL: base URL only, never a locale prefix.
pub fn asset_url(path: &str, base_url: &str) -> String {
  format!("{}{}", base_url.trim_end_matches('/'), leading_slash(path))
}

#[cfg(test)]
mod tests {
  use super::*;

  const STRATEGIES: [LocaleStrategy; 2] =
    [LocaleStrategy::Prefix, LocaleStrategy::PrefixExceptDefault];

  // -- locale_prefix --

  #[test]
  fn disabled_i18n_never_prefixes() {
    for strategy in STRATEGIES {
      assert_eq!(locale_prefix("de", "en", strategy, false), "");
      assert_eq!(locale_prefix("en", "en", strategy, false), "");
    }
  }

  #[test]
  fn prefix_except_default() {
    let s = LocaleStrategy::PrefixExceptDefault;
    assert_eq!(locale_prefix("en", "en", s, true), "");
    assert_eq!(locale_prefix("de", "en", s, true), "/de");
  }

  #[test]
  fn prefix_always() {
    let s = LocaleStrategy::Prefix;
    assert_eq!(locale_prefix("en", "en", s, true), "/en");
    assert_eq!(locale_prefix("fr", "en", s, true), "/fr");
  }

  #[test]
  fn strategy_serde_names() {
    let s: LocaleStrategy = serde_json::from_str(r#""prefix_except_default""#).unwrap();
    assert_eq!(s, LocaleStrategy::PrefixExceptDefault);
    assert_eq!(serde_json::to_string(&LocaleStrategy::Prefix).unwrap(), r#""prefix""#);
  }

  // -- localized_url --

  #[test]
  fn root_never_prefixed() {
    for strategy in STRATEGIES {
      for locale in ["en", "de", "fr"] {
        for enabled in [true, false] {
          let prefix = locale_prefix(locale, "en", strategy, enabled);
          assert_eq!(localized_url("/", "", &prefix), "/");
          assert_eq!(localized_url("", "", &prefix), "/");
          assert_eq!(localized_url("/", "https://x.dev", &prefix), "https://x.dev/");
        }
      }
    }
  }

  #[test]
  fn trailing_slash_stripped_and_prefix_injected() {
    assert_eq!(localized_url("/about/", "", "/de"), "/de/about");
    assert_eq!(localized_url("/about", "", "/de"), "/de/about");
  }

  #[test]
  fn missing_leading_slash_added() {
    assert_eq!(localized_url("about", "", "/de"), "/de/about");
    assert_eq!(localized_url("about", "", ""), "/about");
  }

  #[test]
  fn only_one_trailing_slash_stripped() {
    assert_eq!(localized_url("/a//", "", ""), "/a/");
  }

  #[test]
  fn base_url_prepended() {
    assert_eq!(localized_url("/blog/post", "https://x.dev/", "/fr"), "https://x.dev/fr/blog/post");
  }

  #[test]
  fn embedded_locale_not_inspected() {
    assert_eq!(localized_url("/de/about", "", "/de"), "/de/de/about");
  }

  // -- asset_url --

  #[test]
  fn asset_ignores_locale() {
    assert_eq!(asset_url("css/site.css", ""), "/css/site.css");
    assert_eq!(asset_url("/img/a.png", "https://cdn.x/"), "https://cdn.x/img/a.png");
  }
}
