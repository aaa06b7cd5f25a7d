/* packages/template/rust/src/render.rs */

use std::cell::OnceCell;

use serde_json::{Map, Value};

use crate::ast::AstNode;
use crate::keys;
use crate::registry::{HelperError, HelperRegistry};
use crate::token::{tokenize, Tag, Token, TAG_OPEN};
use crate::value::{is_truthy, resolve, stringify};
use crate::Diagnostic;

pub(crate) struct RenderContext<'r> {
  pub(crate) registry: &'r HelperRegistry,
  pub(crate) diagnostics: Vec<Diagnostic>,
}

/// Lookup chain for paths: the innermost loop iteration first, then its
/// enclosing iterations, then the render context.
pub(crate) enum Scope<'a> {
  Root(&'a Value),
  Item(LoopItem<'a>),
}

pub(crate) struct LoopItem<'a> {
  parent: &'a Scope<'a>,
  item: &'a Value,
  index: Value,
  is_first: Value,
  is_last: Value,
  /// Merged object handed to helpers, built on first use.
  flat: OnceCell<Value>,
}

impl<'a> Scope<'a> {
  fn item(parent: &'a Scope<'a>, item: &'a Value, index: usize, len: usize) -> Self {
    Scope::Item(LoopItem {
      parent,
      item,
      index: Value::from(index),
      is_first: Value::Bool(index == 0),
      is_last: Value::Bool(index + 1 == len),
      flat: OnceCell::new(),
    })
  }

  /// Loop metadata, then element keys (or `this`), then outer scopes.
  fn head(&self, key: &str) -> Option<&Value> {
    match self {
      Scope::Root(data) => data.get(key),
      Scope::Item(frame) => match key {
        keys::LOOP_INDEX => Some(&frame.index),
        keys::LOOP_FIRST => Some(&frame.is_first),
        keys::LOOP_LAST => Some(&frame.is_last),
        _ => match frame.item {
          Value::Object(fields) => fields.get(key),
          other if key == keys::LOOP_THIS => Some(other),
          _ => None,
        }
        .or_else(|| frame.parent.head(key)),
      },
    }
  }

  pub(crate) fn lookup(&self, path: &str) -> Option<&Value> {
    match path.split_once('.') {
      Some((head, rest)) => resolve(rest, self.head(head)?),
      None => self.head(path),
    }
  }

  /// The whole scope as one object, for helpers.
  pub(crate) fn flatten(&self) -> &Value {
    match self {
      Scope::Root(data) => data,
      Scope::Item(frame) => frame.flat.get_or_init(|| {
        let mut scope = match frame.parent.flatten() {
          Value::Object(map) => map.clone(),
          _ => Map::new(),
        };
        match frame.item {
          Value::Object(fields) => {
            for (k, v) in fields {
              scope.insert(k.clone(), v.clone());
            }
          }
          other => {
            scope.insert(keys::LOOP_THIS.to_string(), other.clone());
          }
        }
        scope.insert(keys::LOOP_INDEX.to_string(), frame.index.clone());
        scope.insert(keys::LOOP_FIRST.to_string(), frame.is_first.clone());
        scope.insert(keys::LOOP_LAST.to_string(), frame.is_last.clone());
        Value::Object(scope)
      }),
    }
  }
}

/// Leading `!`s negate; the rest is a dotted path.
pub(crate) fn evaluate_condition(condition: &str, scope: &Scope<'_>) -> bool {
  let mut condition = condition.trim();
  let mut negated = false;
  while let Some(rest) = condition.strip_prefix('!') {
    negated = !negated;
    condition = rest.trim_start();
  }
  scope.lookup(condition).is_some_and(is_truthy) != negated
}

/// Plain `{{path}}` tags inside helper output are resolved once; anything else
/// in it stays literal.
fn substitute_variables(text: String, scope: &Scope<'_>) -> String {
  if !text.contains(TAG_OPEN) {
    return text;
  }
  tokenize(&text)
    .into_iter()
    .map(|token| match token {
      Token::Text(value) => value,
      Token::Tag { tag: Tag::Variable(path), .. } => {
        stringify(scope.lookup(&path).unwrap_or(&Value::Null))
      }
      Token::Tag { raw, .. } => raw,
    })
    .collect()
}

fn invoke_helper(
  name: &str,
  args: &str,
  raw: &str,
  scope: &Scope<'_>,
  ctx: &mut RenderContext<'_>,
) -> String {
  match ctx.registry.invoke(name, scope.flatten(), args) {
    Ok(out) => substitute_variables(out, scope),
    Err(HelperError::Unknown { .. }) => {
      tracing::warn!(helper = name, tag = raw, "unknown helper, leaving tag unresolved");
      ctx.diagnostics.push(Diagnostic::UnknownHelper { tag: raw.to_string() });
      raw.to_string()
    }
    Err(err) => {
      tracing::warn!(
        helper = name,
        tag = raw,
        error = %err,
        "helper failed, leaving tag unresolved"
      );
      ctx.diagnostics.push(Diagnostic::HelperFailed { tag: raw.to_string(), error: err });
      raw.to_string()
    }
  }
}

pub(crate) fn render(nodes: &[AstNode], scope: &Scope<'_>, ctx: &mut RenderContext<'_>) -> String {
  let mut out = String::new();

  for node in nodes {
    match node {
      AstNode::Text(value) => out.push_str(value),

      AstNode::Variable { path } => {
        out.push_str(&stringify(scope.lookup(path).unwrap_or(&Value::Null)));
      }

      AstNode::Helper { name, args, raw } => {
        out.push_str(&invoke_helper(name, args, raw, scope, ctx));
      }

      AstNode::If { condition, then_nodes, else_nodes } => {
        let branch = if evaluate_condition(condition, scope) { then_nodes } else { else_nodes };
        out.push_str(&render(branch, scope, ctx));
      }

      AstNode::Each { path, body_nodes } => {
        if let Some(Value::Array(arr)) = scope.lookup(path) {
          for (index, item) in arr.iter().enumerate() {
            let scoped = Scope::item(scope, item, index, arr.len());
            out.push_str(&render(body_nodes, &scoped, ctx));
          }
        }
      }
    }
  }

  out
}
