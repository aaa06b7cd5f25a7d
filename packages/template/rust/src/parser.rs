/* packages/template/rust/src/parser.rs */

use std::fmt;

use crate::ast::AstNode;
use crate::token::{Tag, Token};

/// Diagnostic emitted when block tags are mismatched or unclosed.
/// The offending tags are still rendered verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseDiagnostic {
  pub kind: DiagnosticKind,
  pub directive: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticKind {
  /// Close or `{{#else}}` tag without a matching open (e.g. orphan `{{/if}}`)
  UnmatchedBlockClose,
  /// Block-open tag that never found its close
  UnclosedBlock,
  /// Block-open tag past `MAX_NESTING` open blocks, kept as text
  NestingTooDeep,
}

impl fmt::Display for ParseDiagnostic {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self.kind {
      DiagnosticKind::UnmatchedBlockClose => write!(f, "unmatched block close {}", self.directive),
      DiagnosticKind::UnclosedBlock => write!(f, "unclosed block {}", self.directive),
      DiagnosticKind::NestingTooDeep => {
        write!(f, "block nested deeper than {MAX_NESTING} levels {}", self.directive)
      }
    }
  }
}

/// Deepest block nesting the parser descends into. Openers beyond it stay text,
/// which also bounds the recursion depth of rendering.
pub const MAX_NESTING: usize = 64;

/// Open blocks on the descent stack. Closers only stop a level when some
/// enclosing frame can accept them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Frame {
  Then,
  Else,
  Each,
}

#[cfg(test)]
fn parse(tokens: &[Token]) -> Vec<AstNode> {
  let mut diagnostics = Vec::new();
  parse_with_diagnostics(tokens, &mut diagnostics)
}

pub(crate) fn parse_with_diagnostics(
  tokens: &[Token],
  diagnostics: &mut Vec<ParseDiagnostic>,
) -> Vec<AstNode> {
  let mut pos = 0;
  // No open frames at top level, so every closer is consumed as an orphan
  parse_until(tokens, &mut pos, &mut Vec::new(), diagnostics)
}

fn orphan(raw: &str, nodes: &mut Vec<AstNode>, diagnostics: &mut Vec<ParseDiagnostic>) {
  diagnostics.push(ParseDiagnostic {
    kind: DiagnosticKind::UnmatchedBlockClose,
    directive: raw.to_string(),
  });
  nodes.push(AstNode::Text(raw.to_string()));
}

fn in_if(frames: &[Frame]) -> bool {
  frames.iter().any(|f| matches!(f, Frame::Then | Frame::Else))
}

/// Parse nodes until a closer some open frame accepts (left unconsumed) or EOF.
fn parse_until(
  tokens: &[Token],
  pos: &mut usize,
  frames: &mut Vec<Frame>,
  diagnostics: &mut Vec<ParseDiagnostic>,
) -> Vec<AstNode> {
  let mut nodes = Vec::new();

  while let Some(token) = tokens.get(*pos) {
    let (tag, raw) = match token {
      Token::Text(value) => {
        nodes.push(AstNode::Text(value.clone()));
        *pos += 1;
        continue;
      }
      Token::Tag { tag, raw } => (tag, raw),
    };

    match tag {
      Tag::If(_) | Tag::Each(_) if frames.len() >= MAX_NESTING => {
        diagnostics.push(ParseDiagnostic {
          kind: DiagnosticKind::NestingTooDeep,
          directive: raw.clone(),
        });
        nodes.push(AstNode::Text(raw.clone()));
        *pos += 1;
      }
      Tag::If(condition) => {
        *pos += 1;
        nodes.extend(parse_if(tokens, pos, condition, raw, frames, diagnostics));
      }
      Tag::Each(path) => {
        *pos += 1;
        nodes.extend(parse_each(tokens, pos, path, raw, frames, diagnostics));
      }
      Tag::Else if frames.last() == Some(&Frame::Then) => return nodes,
      Tag::EndIf if in_if(frames) => return nodes,
      Tag::EndEach if frames.contains(&Frame::Each) => return nodes,
      Tag::Else | Tag::EndIf | Tag::EndEach => {
        orphan(raw, &mut nodes, diagnostics);
        *pos += 1;
      }
      Tag::Helper { name, args } => {
        nodes.push(AstNode::Helper { name: name.clone(), args: args.clone(), raw: raw.clone() });
        *pos += 1;
      }
      Tag::Variable(path) => {
        nodes.push(AstNode::Variable { path: path.clone() });
        *pos += 1;
      }
    }
  }

  nodes
}

fn next_is(tokens: &[Token], pos: usize, expected: &Tag) -> Option<String> {
  match tokens.get(pos) {
    Some(Token::Tag { tag, raw }) if tag == expected => Some(raw.clone()),
    _ => None,
  }
}

fn parse_if(
  tokens: &[Token],
  pos: &mut usize,
  condition: &str,
  raw: &str,
  frames: &mut Vec<Frame>,
  diagnostics: &mut Vec<ParseDiagnostic>,
) -> Vec<AstNode> {
  frames.push(Frame::Then);
  let then_nodes = parse_until(tokens, pos, frames, diagnostics);
  frames.pop();

  let else_branch = next_is(tokens, *pos, &Tag::Else).map(|else_raw| {
    *pos += 1;
    frames.push(Frame::Else);
    let nodes = parse_until(tokens, pos, frames, diagnostics);
    frames.pop();
    (else_raw, nodes)
  });

  if next_is(tokens, *pos, &Tag::EndIf).is_some() {
    *pos += 1;
    let else_nodes = else_branch.map(|(_, nodes)| nodes).unwrap_or_default();
    return vec![AstNode::If { condition: condition.to_string(), then_nodes, else_nodes }];
  }

  // Unclosed: keep the opener verbatim and let its body render inline
  diagnostics.push(ParseDiagnostic {
    kind: DiagnosticKind::UnclosedBlock,
    directive: raw.to_string(),
  });
  let mut nodes = vec![AstNode::Text(raw.to_string())];
  nodes.extend(then_nodes);
  if let Some((else_raw, else_nodes)) = else_branch {
    nodes.push(AstNode::Text(else_raw));
    nodes.extend(else_nodes);
  }
  nodes
}

fn parse_each(
  tokens: &[Token],
  pos: &mut usize,
  path: &str,
  raw: &str,
  frames: &mut Vec<Frame>,
  diagnostics: &mut Vec<ParseDiagnostic>,
) -> Vec<AstNode> {
  frames.push(Frame::Each);
  let body_nodes = parse_until(tokens, pos, frames, diagnostics);
  frames.pop();

  if next_is(tokens, *pos, &Tag::EndEach).is_some() {
    *pos += 1;
    return vec![AstNode::Each { path: path.to_string(), body_nodes }];
  }

  diagnostics.push(ParseDiagnostic {
    kind: DiagnosticKind::UnclosedBlock,
    directive: raw.to_string(),
  });
  let mut nodes = vec![AstNode::Text(raw.to_string())];
  nodes.extend(body_nodes);
  nodes
}
