/* packages/template/rust/src/builtins.rs */

use chrono::Datelike;
use serde_json::Value;

use crate::keys;
use crate::locale::{asset_url, localized_url};
use crate::registry::{unquote, HelperError, HelperRegistry};
use crate::value::{escape_html, resolve, stringify};

pub(crate) fn register_all(registry: &mut HelperRegistry) {
  registry
    .register("translate", translate)
    .register("t", translate)
    .register("currentLang", |ctx, _| Ok(current_lang(ctx).to_string()))
    .register("langPrefix", |ctx, _| Ok(str_key(ctx, keys::LANG_PREFIX).to_string()))
    .register("active", active)
    .register("langActive", lang_active)
    .register("icon", icon)
    .register("url", url)
    .register("asset", asset)
    .register("year", |_, _| Ok(chrono::Local::now().year().to_string()))
    .register("json", json)
    .register("escape", escape);
}

fn str_key<'a>(ctx: &'a Value, key: &str) -> &'a str {
  ctx.get(key).and_then(Value::as_str).unwrap_or("")
}

fn required<'a>(helper: &str, args: &'a [String], position: usize) -> Result<&'a str, HelperError> {
  args
    .get(position)
    .map(|a| unquote(a))
    .filter(|a| !a.is_empty())
    .ok_or_else(|| HelperError::missing(helper, position))
}

fn optional<'a>(args: &'a [String], position: usize, default: &'a str) -> &'a str {
  args.get(position).map(|a| unquote(a)).filter(|a| !a.is_empty()).unwrap_or(default)
}

/// Context locale, then the configured default, then the hard fallback.
fn current_lang(ctx: &Value) -> &str {
  let from_ctx = str_key(ctx, keys::CURRENT_LANG);
  if !from_ctx.is_empty() {
    return from_ctx;
  }
  ctx
    .get(keys::CONFIG)
    .and_then(|c| resolve("i18n.default_locale", c))
    .and_then(Value::as_str)
    .filter(|s| !s.is_empty())
    .unwrap_or(keys::FALLBACK_LOCALE)
}

fn translate(ctx: &Value, args: &[String]) -> Result<String, HelperError> {
  let key = required("translate", args, 0)?;
  let found = ctx.get(keys::LOCALE_DATA).and_then(|dict| resolve(key, dict));
  Ok(match found {
    Some(v @ (Value::String(_) | Value::Number(_) | Value::Bool(_))) => {
      let text = stringify(v);
      if text.is_empty() { key.to_string() } else { text }
    }
    _ => key.to_string(),
  })
}

fn with_trailing_slash(path: &str) -> String {
  if path.ends_with('/') { path.to_string() } else { format!("{path}/") }
}

fn active(ctx: &Value, args: &[String]) -> Result<String, HelperError> {
  let target = required("active", args, 0)?;
  let classes = optional(args, 1, "active");
  let nav = match str_key(ctx, keys::ACTIVE_NAV) {
    "" => str_key(ctx, keys::SLUG),
    nav => nav,
  };
  let current = format!("/{}", nav.trim_start_matches('/'));
  let is_active = with_trailing_slash(target) == with_trailing_slash(&current);
  Ok(if is_active { classes.to_string() } else { String::new() })
}

fn lang_active(ctx: &Value, args: &[String]) -> Result<String, HelperError> {
  let lang = required("langActive", args, 0)?;
  let classes = optional(args, 1, "active");
  let is_active = lang.eq_ignore_ascii_case(current_lang(ctx));
  Ok(if is_active { classes.to_string() } else { String::new() })
}

fn icon(ctx: &Value, args: &[String]) -> Result<String, HelperError> {
  let name = escape_html(required("icon", args, 0)?);
  let classes: Vec<&str> =
    args.iter().skip(1).map(|a| unquote(a)).filter(|a| !a.is_empty()).collect();
  let classes = escape_html(&classes.join(" "));
  let library = ctx
    .get(keys::CONFIG)
    .and_then(|c| resolve("theme.icons", c))
    .and_then(Value::as_str)
    .unwrap_or("bootstrap");

  Ok(match library {
    "lucide" if classes.is_empty() => format!(r#"<i data-lucide="{name}"></i>"#),
    "lucide" => format!(r#"<i data-lucide="{name}" class="{classes}"></i>"#),
    _ if classes.is_empty() => format!(r#"<i class="bi bi-{name}"></i>"#),
    _ => format!(r#"<i class="bi bi-{name} {classes}"></i>"#),
  })
}

fn url(ctx: &Value, args: &[String]) -> Result<String, HelperError> {
  let path = args.first().map(|a| unquote(a)).unwrap_or("/");
  Ok(localized_url(path, str_key(ctx, keys::BASE_URL), str_key(ctx, keys::LANG_PREFIX)))
}

fn asset(ctx: &Value, args: &[String]) -> Result<String, HelperError> {
  let path = required("asset", args, 0)?;
  Ok(asset_url(path, str_key(ctx, keys::BASE_URL)))
}

/// A context path when it resolves, the unquoted literal otherwise.
fn path_or_literal(helper: &str, ctx: &Value, args: &[String]) -> Result<Value, HelperError> {
  let arg = args.first().ok_or_else(|| HelperError::missing(helper, 0))?;
  if let Some(value) = resolve(arg, ctx) {
    return Ok(value.clone());
  }
  Ok(Value::String(unquote(arg).to_string()))
}

fn json(ctx: &Value, args: &[String]) -> Result<String, HelperError> {
  let value = path_or_literal("json", ctx, args)?;
  serde_json::to_string(&value).map_err(|e| HelperError::failed("json", e.to_string()))
}

fn escape(ctx: &Value, args: &[String]) -> Result<String, HelperError> {
  let value = path_or_literal("escape", ctx, args)?;
  Ok(escape_html(&stringify(&value)).replace("{{", "&#123;&#123;").replace("}}", "&#125;&#125;"))
}
