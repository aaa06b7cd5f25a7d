/* packages/template/rust/src/keys.rs */

//! Reserved render-context keys shared by helpers and context builders.

pub const CONFIG: &str = "config";
pub const CURRENT_LANG: &str = "currentLang";
pub const LANG_PREFIX: &str = "langPrefix";
pub const LOCALE_DATA: &str = "localeData";
pub const ACTIVE_NAV: &str = "activeNav";
pub const SLUG: &str = "slug";
pub const BASE_URL: &str = "baseUrl";

/// Loop metadata injected into every `{{#each}}` iteration.
pub const LOOP_INDEX: &str = "index";
pub const LOOP_FIRST: &str = "isFirst";
pub const LOOP_LAST: &str = "isLast";
/// Non-object loop elements are bound here.
pub const LOOP_THIS: &str = "this";

/// Locale used when neither the context nor the project config names one.
pub const FALLBACK_LOCALE: &str = "de";
