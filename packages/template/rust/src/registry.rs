/* packages/template/rust/src/registry.rs */

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::builtins;

/// Failure raised by a helper lookup or a helper body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HelperError {
  Unknown { name: String },
  MissingArgument { helper: String, position: usize },
  Failed { helper: String, message: String },
}

impl HelperError {
  pub fn missing(helper: impl Into<String>, position: usize) -> Self {
    Self::MissingArgument { helper: helper.into(), position }
  }

  pub fn failed(helper: impl Into<String>, message: impl Into<String>) -> Self {
    Self::Failed { helper: helper.into(), message: message.into() }
  }
}

impl fmt::Display for HelperError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Unknown { name } => write!(f, "no helper registered as \"{name}\""),
      Self::MissingArgument { helper, position } => {
        write!(f, "helper \"{helper}\" is missing argument #{}", position + 1)
      }
      Self::Failed { helper, message } => write!(f, "helper \"{helper}\" failed: {message}"),
    }
  }
}

impl std::error::Error for HelperError {}

/// A helper receives the render context and the raw, trimmed arguments.
pub type HelperFn = Arc<dyn Fn(&Value, &[String]) -> Result<String, HelperError> + Send + Sync>;

/// Name-to-function table consulted for `{{name:args}}` tags.
/// Read-only once handed to an engine, so it can be shared across threads.
#[derive(Clone, Default)]
pub struct HelperRegistry {
  helpers: HashMap<String, HelperFn>,
}

impl HelperRegistry {
  /// An empty registry, without built-ins.
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_builtins() -> Self {
    let mut registry = Self::new();
    builtins::register_all(&mut registry);
    registry
  }

  /// Register `helper` under `name`, replacing any earlier registration.
  pub fn register<F>(&mut self, name: impl Into<String>, helper: F) -> &mut Self
  where
    F: Fn(&Value, &[String]) -> Result<String, HelperError> + Send + Sync + 'static,
  {
    self.helpers.insert(name.into(), Arc::new(helper));
    self
  }

  pub fn contains(&self, name: &str) -> bool {
    self.helpers.contains_key(name)
  }

  pub fn names(&self) -> Vec<&str> {
    let mut names: Vec<&str> = self.helpers.keys().map(String::as_str).collect();
    names.sort_unstable();
    names
  }

  pub fn invoke(&self, name: &str, ctx: &Value, args: &str) -> Result<String, HelperError> {
    let helper =
      self.helpers.get(name).ok_or_else(|| HelperError::Unknown { name: name.to_string() })?;
    helper(ctx, &split_args(args))
  }
}

impl fmt::Debug for HelperRegistry {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("HelperRegistry").field("helpers", &self.names()).finish()
  }
}

/// Split helper arguments on top-level commas. Commas inside quotes or
/// brackets do not separate. Each argument is trimmed.
pub fn split_args(args: &str) -> Vec<String> {
  if args.trim().is_empty() {
    return Vec::new();
  }

  let mut out = Vec::new();
  let mut current = String::new();
  let mut quote: Option<char> = None;
  let mut depth = 0usize;

  for ch in args.chars() {
    match quote {
      Some(q) => {
        if ch == q {
          quote = None;
        }
        current.push(ch);
      }
      None => match ch {
        '"' | '\'' => {
          quote = Some(ch);
          current.push(ch);
        }
        '(' | '[' | '{' => {
          depth += 1;
          current.push(ch);
        }
        ')' | ']' | '}' => {
          depth = depth.saturating_sub(1);
          current.push(ch);
        }
        ',' if depth == 0 => {
          out.push(current.trim().to_string());
          current.clear();
        }
        c => current.push(c),
      },
    }
  }
  out.push(current.trim().to_string());
  out
}

/// Strip one pair of matching surrounding quotes from a literal argument.
pub fn unquote(arg: &str) -> &str {
  for q in ['"', '\''] {
    if arg.len() >= 2 && arg.starts_with(q) && arg.ends_with(q) {
      return &arg[1..arg.len() - 1];
    }
  }
  arg
}
