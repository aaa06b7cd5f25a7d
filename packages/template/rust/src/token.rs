/* packages/template/rust/src/token.rs */

use std::sync::OnceLock;

use regex::Regex;

pub(crate) const TAG_OPEN: &str = "{{";
pub(crate) const TAG_CLOSE: &str = "}}";

fn helper_re() -> &'static Regex {
  static RE: OnceLock<Regex> = OnceLock::new();
  RE.get_or_init(|| Regex::new(r"(?s)^([a-zA-Z0-9_]+):(.*)$").unwrap())
}

fn variable_re() -> &'static Regex {
  static RE: OnceLock<Regex> = OnceLock::new();
  RE.get_or_init(|| Regex::new(r"^[a-zA-Z0-9_.]+$").unwrap())
}

#[derive(Debug, PartialEq)]
pub(crate) enum Tag {
  If(String),
  Else,
  EndIf,
  Each(String),
  EndEach,
  Helper { name: String, args: String },
  Variable(String),
}

#[derive(Debug)]
pub(crate) enum Token {
  Text(String),
  /// A recognized tag plus its verbatim source, kept for pass-through on failure.
  Tag { tag: Tag, raw: String },
}

/// Strip a block keyword, requiring whitespace and a non-empty operand after it.
fn block_operand<'a>(inner: &'a str, keyword: &str) -> Option<&'a str> {
  let rest = inner.strip_prefix(keyword)?;
  if !rest.starts_with(char::is_whitespace) {
    return None;
  }
  let operand = rest.trim();
  (!operand.is_empty()).then_some(operand)
}

fn classify(inner: &str) -> Option<Tag> {
  match inner.trim() {
    "#else" => return Some(Tag::Else),
    "/if" => return Some(Tag::EndIf),
    "/each" => return Some(Tag::EndEach),
    _ => {}
  }
  if let Some(cond) = block_operand(inner, "#if") {
    return Some(Tag::If(cond.to_string()));
  }
  if let Some(path) = block_operand(inner, "#each") {
    return Some(Tag::Each(path.to_string()));
  }
  if let Some(caps) = helper_re().captures(inner) {
    return Some(Tag::Helper { name: caps[1].to_string(), args: caps[2].to_string() });
  }
  if variable_re().is_match(inner) {
    return Some(Tag::Variable(inner.to_string()));
  }
  None
}

pub(crate) fn tokenize(template: &str) -> Vec<Token> {
  let mut tokens = Vec::new();
  let mut pos = 0;

  while pos < template.len() {
    let Some(rel) = template[pos..].find(TAG_OPEN) else {
      tokens.push(Token::Text(template[pos..].to_string()));
      break;
    };
    let first_open = pos + rel;
    let Some(close_rel) = template[first_open + TAG_OPEN.len()..].find(TAG_CLOSE) else {
      // Unclosed tag -- treat rest as text
      tokens.push(Token::Text(template[pos..].to_string()));
      break;
    };
    let close = first_open + TAG_OPEN.len() + close_rel;
    // `{{ {{name}}` -- the innermost opener before the close owns the tag
    let open = template[first_open..close].rfind(TAG_OPEN).map_or(first_open, |k| first_open + k);
    if open > pos {
      tokens.push(Token::Text(template[pos..open].to_string()));
    }

    let raw = &template[open..close + TAG_CLOSE.len()];
    let inner = &template[open + TAG_OPEN.len()..close];
    match classify(inner) {
      Some(tag) => tokens.push(Token::Tag { tag, raw: raw.to_string() }),
      None => tokens.push(Token::Text(raw.to_string())),
    }
    pos = close + TAG_CLOSE.len();
  }

  tokens
}

#[cfg(test)]
mod tests {
  use super::*;

  fn tag_at(tokens: &[Token], i: usize) -> &Tag {
    match &tokens[i] {
      Token::Tag { tag, .. } => tag,
      other => panic!("expected tag at {i}, got {other:?}"),
    }
  }

  #[test]
  fn tokenize_empty_template() {
    assert!(tokenize("").is_empty());
  }

  #[test]
  fn tokenize_plain_text() {
    let tokens = tokenize("<p>hello</p>");
    assert_eq!(tokens.len(), 1);
    assert!(matches!(&tokens[0], Token::Text(s) if s == "<p>hello</p>"));
  }

  #[test]
  fn tokenize_variable() {
    let tokens = tokenize("a{{page.title}}b");
    assert_eq!(tokens.len(), 3);
    assert_eq!(tag_at(&tokens, 1), &Tag::Variable("page.title".to_string()));
    assert!(matches!(&tokens[2], Token::Text(s) if s == "b"));
  }

  #[test]
  fn tokenize_block_tags() {
    let tokens = tokenize("{{#if  !show }}{{#else}}{{/if}}{{#each items}}{{/each}}");
    assert_eq!(tag_at(&tokens, 0), &Tag::If("!show".to_string()));
    assert_eq!(tag_at(&tokens, 1), &Tag::Else);
    assert_eq!(tag_at(&tokens, 2), &Tag::EndIf);
    assert_eq!(tag_at(&tokens, 3), &Tag::Each("items".to_string()));
    assert_eq!(tag_at(&tokens, 4), &Tag::EndEach);
  }

  #[test]
  fn tokenize_helper_keeps_raw_args() {
    let tokens = tokenize("{{active:/about, btn active}}");
    assert_eq!(
      tag_at(&tokens, 0),
      &Tag::Helper { name: "active".to_string(), args: "/about, btn active".to_string() }
    );
    assert!(matches!(&tokens[0], Token::Tag { raw, .. } if raw == "{{active:/about, btn active}}"));
  }

  #[test]
  fn tokenize_helper_with_empty_args() {
    let tokens = tokenize("{{year:}}");
    assert_eq!(tag_at(&tokens, 0), &Tag::Helper { name: "year".to_string(), args: String::new() });
  }

  #[test]
  fn tokenize_unrecognized_tag_is_text() {
    let tokens = tokenize("{{ spaced }}{{#if}}{{#iffy x}}");
    assert!(tokens.iter().all(|t| matches!(t, Token::Text(_))));
  }

  #[test]
  fn tokenize_unclosed_tag() {
    let tokens = tokenize("head{{name");
    assert_eq!(tokens.len(), 1);
    assert!(matches!(&tokens[0], Token::Text(s) if s == "head{{name"));
  }

  #[test]
  fn tokenize_innermost_opener_wins() {
    let tokens = tokenize("{{ {{name}}");
    assert_eq!(tokens.len(), 2);
    assert!(matches!(&tokens[0], Token::Text(s) if s == "{{ "));
    assert_eq!(tag_at(&tokens, 1), &Tag::Variable("name".to_string()));
  }
}
