//! Every character an element may consume.

use regast_core::{CharSet, NodeId, NodeKind};

use crate::ancestry::has_some_descendant_with;
use crate::backref::is_empty_backreference;
use crate::{Cache, to_char_set};

/// Union of all characters consumed on any path through an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsumedChars {
    pub chars: CharSet,
    /// If false, `chars` is only a superset of the characters actually consumed.
    pub exact: bool,
}

/// Characters consumed by `element`, ignoring the contents of assertions.
///
/// Inexact if the element contains assertions, a class that matches nothing,
/// or a backreference to a group that may capture more than one character.
pub fn consumed_chars(cache: &Cache<'_>, element: NodeId) -> ConsumedChars {
    let ast = cache.ast();
    let mut chars = CharSet::empty(cache.max_char());
    let mut exact = true;
    let mut asserts = false;

    has_some_descendant_with(
        ast,
        element,
        |d| {
            match ast.kind(d) {
                NodeKind::Character { .. }
                | NodeKind::CharacterClass { .. }
                | NodeKind::CharacterSet(_) => {
                    let set = to_char_set(cache, d);
                    exact = exact && !set.is_empty();
                    chars = chars.union(&set);
                }
                NodeKind::Backreference { .. } if !is_empty_backreference(ast, d) => {
                    let resolved = consumed_chars(cache, ast.ensure_resolved(d));
                    exact = exact && resolved.exact && resolved.chars.size() < 2;
                    chars = chars.union(&resolved.chars);
                }
                _ => {}
            }
            // visit everything
            false
        },
        |d| match ast.kind(d) {
            NodeKind::CharacterClass { .. } => false,
            kind if kind.is_assertion() => {
                asserts = true;
                false
            }
            _ => true,
        },
    );

    ConsumedChars {
        chars,
        exact: exact && !asserts,
    }
}
