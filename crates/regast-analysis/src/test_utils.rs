//! Test helpers: parsing literals and locating nodes by their source text.

use regast_core::{Ast, NodeId, NodeKind};

pub fn parse(literal: &str) -> Ast {
    regast_parser::parse_literal(literal).unwrap()
}

/// First alternative in preorder whose source text is `raw`.
pub fn find_alternative(ast: &Ast, raw: &str) -> NodeId {
    find_kind(ast, raw, |kind| {
        matches!(kind, NodeKind::Alternative { .. })
    })
}

/// First element in preorder whose source text is `raw`.
///
/// `a` in `/a/` is the pattern, an alternative and a character; this picks the character.
pub fn find_element(ast: &Ast, raw: &str) -> NodeId {
    find_kind(ast, raw, |kind| {
        !matches!(kind, NodeKind::Pattern { .. } | NodeKind::Alternative { .. })
    })
}

fn find_kind(ast: &Ast, raw: &str, accept: impl Fn(&NodeKind) -> bool) -> NodeId {
    ast.descendants(ast.pattern())
        .find(|&id| ast.raw(id) == raw && accept(ast.kind(id)))
        .unwrap_or_else(|| panic!("no node `{raw}` in `{}`", ast.source()))
}

/// Alternatives of the pattern itself.
pub fn top_alternatives(ast: &Ast) -> Vec<NodeId> {
    ast.children(ast.pattern()).to_vec()
}

/// Source text of each node, for readable assertions.
pub fn raws(ast: &Ast, nodes: &[NodeId]) -> Vec<String> {
    nodes.iter().map(|&n| ast.raw(n).to_owned()).collect()
}

/// Source text of each class, members joined with `|`.
pub fn classes(ast: &Ast, classes: &[Vec<NodeId>]) -> Vec<String> {
    classes.iter().map(|class| raws(ast, class).join("|")).collect()
}
