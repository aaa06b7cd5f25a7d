/* packages/template/rust/src/tests/helpers.rs */

use serde_json::{json, Value};

use crate::{render_template, Diagnostic, Engine, HelperError, HelperRegistry};

// -- Dispatch failures --

#[test]
fn unknown_helper_passes_through() {
  let engine = Engine::new();
  let (out, diags) = engine.render_with_diagnostics("a {{frobnicate:x}} b", &json!({}));
  assert_eq!(out, "a {{frobnicate:x}} b");
  assert_eq!(diags, vec![Diagnostic::UnknownHelper { tag: "{{frobnicate:x}}".to_string() }]);
}

#[test]
fn failing_helper_passes_through_and_rendering_continues() {
  let mut registry = HelperRegistry::with_builtins();
  registry.register("boom", |_, _| Err(HelperError::failed("boom", "bad input")));
  let engine = Engine::with_registry(registry);
  let (out, diags) = engine.render_with_diagnostics("{{boom:1}}|{{name}}", &json!({"name": "n"}));
  assert_eq!(out, "{{boom:1}}|n");
  assert_eq!(diags.len(), 1);
  assert!(matches!(&diags[0], Diagnostic::HelperFailed { tag, .. } if tag == "{{boom:1}}"));
}

#[test]
fn missing_required_argument_passes_through() {
  assert_eq!(render_template("{{icon:}}", &json!({})), "{{icon:}}");
}

// -- Registry injection --

#[test]
fn custom_registry_is_isolated() {
  let mut registry = HelperRegistry::new();
  registry.register("shout", |ctx: &Value, args: &[String]| {
    let value = ctx.get(&args[0]).and_then(Value::as_str).unwrap_or_default();
    Ok(value.to_uppercase())
  });
  let engine = Engine::with_registry(registry);
  assert_eq!(engine.render("{{shout:name}}{{year:}}", &json!({"name": "hey"})), "HEY{{year:}}");
}

#[test]
fn override_builtin() {
  let mut registry = HelperRegistry::with_builtins();
  registry.register("year", |_, _| Ok("1999".to_string()));
  let engine = Engine::with_registry(registry);
  assert_eq!(engine.render("(c) {{year:}}", &json!({})), "(c) 1999");
}

// -- Helper syntax vs variables --

#[test]
fn helper_without_colon_is_a_variable() {
  assert_eq!(render_template("[{{year}}]", &json!({})), "[]");
  assert_eq!(render_template("[{{year}}]", &json!({"year": 1})), "[1]");
}

#[test]
fn translate_in_template() {
  let ctx = json!({"localeData": {"hero": {"title": "Willkommen"}}});
  assert_eq!(
    render_template("<h1>{{t:hero.title}}</h1><p>{{translate:hero.missing}}</p>", &ctx),
    "<h1>Willkommen</h1><p>hero.missing</p>"
  );
}

#[test]
fn translation_placeholders_resolve_from_context() {
  let ctx = json!({"name": "Ada", "localeData": {"welcome": "Hi {{name}}, {{missing}}!"}});
  assert_eq!(render_template("{{t:welcome}}", &ctx), "Hi Ada, !");
}

#[test]
fn translation_placeholders_see_loop_scope() {
  let ctx = json!({
    "users": [{"name": "Ada"}, {"name": "Bo"}],
    "localeData": {"greet": "<{{name}}#{{index}}>"}
  });
  assert_eq!(render_template("{{#each users}}{{t:greet}}{{/each}}", &ctx), "<Ada#0><Bo#1>");
}

#[test]
fn helper_output_blocks_stay_literal() {
  let mut registry = HelperRegistry::new();
  registry.register("raw", |_, _| Ok("{{#if a}}{{x}}{{/if}}".to_string()));
  let engine = Engine::with_registry(registry);
  assert_eq!(engine.render("{{raw:}}", &json!({"a": true, "x": 1})), "{{#if a}}1{{/if}}");
}

#[test]
fn escape_prevents_tag_reinterpretation() {
  let ctx = json!({"sample": "{{#if x}}<b>{{/if}}"});
  let out = render_template("<pre>{{escape:sample}}</pre>", &ctx);
  assert_eq!(out, "<pre>&#123;&#123;#if x&#125;&#125;&lt;b&gt;&#123;&#123;/if&#125;&#125;</pre>");
  assert_eq!(render_template(&out, &ctx), out);
}

#[test]
fn json_helper_in_script() {
  let ctx = json!({"page": {"meta": {"a": [1, 2]}}});
  assert_eq!(render_template("var m = {{json:page.meta}};", &ctx), r#"var m = {"a":[1,2]};"#);
}
