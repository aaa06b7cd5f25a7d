/* packages/engine/rust/src/i18n.rs */

use std::collections::BTreeMap;

use serde_json::Value;

fn is_missing(value: &Value) -> bool {
  match value {
    Value::Null => true,
    Value::String(s) => s.is_empty(),
    _ => false,
  }
}

/// Deep-merge a locale dictionary over the default locale's dictionary.
///
/// Keys missing from `target`, or holding an empty string, take the value
/// from `fallback`. Nested tables merge key by key.
pub fn with_fallback(target: &Value, fallback: &Value) -> Value {
  match (target, fallback) {
    (Value::Object(t), Value::Object(f)) => {
      let mut merged = f.clone();
      for (key, value) in t {
        let entry = match merged.get(key) {
          Some(base) => with_fallback(value, base),
          None => value.clone(),
        };
        merged.insert(key.clone(), entry);
      }
      Value::Object(merged)
    }
    (t, f) if is_missing(t) => f.clone(),
    (t, _) => t.clone(),
  }
}

/// Dictionary for `locale` with the default locale filling the gaps.
/// Unknown locales get the default dictionary; no dictionaries at all
/// yields an empty table.
pub fn dictionary_for(
  dictionaries: &BTreeMap<String, Value>,
  locale: &str,
  default_locale: &str,
) -> Value {
  let empty = Value::Object(Default::default());
  let fallback = dictionaries.get(default_locale).unwrap_or(&empty);
  match dictionaries.get(locale) {
    Some(target) if locale != default_locale => with_fallback(target, fallback),
    Some(target) => target.clone(),
    None => {
      tracing::debug!(locale, "no dictionary for locale, using default");
      fallback.clone()
    }
  }
}
