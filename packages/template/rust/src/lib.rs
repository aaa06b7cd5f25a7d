/* packages/template/rust/src/lib.rs */

//! Tag processor for quire templates.
//!
//! Templates mix plain text with `{{...}}` tags: `{{#if cond}}`/`{{#else}}`/`{{/if}}`,
//! `{{#each path}}`/`{{/each}}`, helper calls `{{name:args}}` and variables
//! `{{dotted.path}}`. Rendering never fails: missing data renders empty and
//! broken tags pass through verbatim.

mod ast;
mod builtins;
pub mod keys;
mod locale;
mod parser;
mod registry;
mod render;
mod token;
mod value;

pub use locale::{asset_url, locale_prefix, localized_url, LocaleStrategy};
pub use parser::{DiagnosticKind, ParseDiagnostic, MAX_NESTING};
pub use registry::{split_args, unquote, HelperError, HelperFn, HelperRegistry};
pub use value::{escape_html, is_truthy, resolve, stringify};

use std::fmt;
use std::sync::OnceLock;

use parser::parse_with_diagnostics;
use render::{render, RenderContext, Scope};
use serde_json::Value;
use token::tokenize;

/// Problems noticed while rendering. None of them affect the returned text
/// beyond leaving the offending tag in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
  Parse(ParseDiagnostic),
  UnknownHelper { tag: String },
  HelperFailed { tag: String, error: HelperError },
}

impl fmt::Display for Diagnostic {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Parse(d) => write!(f, "{d}"),
      Self::UnknownHelper { tag } => write!(f, "unknown helper in {tag}"),
      Self::HelperFailed { tag, error } => write!(f, "{error} in {tag}"),
    }
  }
}

/// Renders templates against JSON contexts with an injected helper registry.
#[derive(Debug, Clone)]
pub struct Engine {
  registry: HelperRegistry,
}

impl Default for Engine {
  fn default() -> Self {
    Self::new()
  }
}

impl Engine {
  /// Engine with the built-in helpers installed.
  pub fn new() -> Self {
    Self { registry: HelperRegistry::with_builtins() }
  }

  pub fn with_registry(registry: HelperRegistry) -> Self {
    Self { registry }
  }

  pub fn registry(&self) -> &HelperRegistry {
    &self.registry
  }

  pub fn render(&self, template: &str, ctx: &Value) -> String {
    self.render_with_diagnostics(template, ctx).0
  }

  /// Like `render` but also returns what went wrong along the way.
  pub fn render_with_diagnostics(
    &self,
    template: &str,
    ctx: &Value,
  ) -> (String, Vec<Diagnostic>) {
    let tokens = tokenize(template);
    let mut parse_diags = Vec::new();
    let ast = parse_with_diagnostics(&tokens, &mut parse_diags);
    for d in &parse_diags {
      tracing::warn!(directive = %d.directive, "{d}");
    }

    let mut rctx = RenderContext { registry: &self.registry, diagnostics: Vec::new() };
    let out = render(&ast, &Scope::Root(ctx), &mut rctx);

    let mut diagnostics: Vec<Diagnostic> =
      parse_diags.into_iter().map(Diagnostic::Parse).collect();
    diagnostics.append(&mut rctx.diagnostics);
    tracing::debug!(bytes = out.len(), diagnostics = diagnostics.len(), "rendered template");
    (out, diagnostics)
  }
}

/// Render with a shared engine holding only the built-in helpers.
pub fn render_template(template: &str, ctx: &Value) -> String {
  static DEFAULT: OnceLock<Engine> = OnceLock::new();
  DEFAULT.get_or_init(Engine::new).render(template, ctx)
}

#[cfg(test)]
mod tests;
