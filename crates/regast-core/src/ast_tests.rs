use crate::{AstBuilder, AstError, Flags, GroupRef, NodeKind, Span};

/// Builds `a|(b)\1` by hand.
fn sample() -> crate::Ast {
    let mut b = AstBuilder::new();
    let a = b.push(NodeKind::Character { value: 'a' as u32 }, Span::new(0, 1));
    let alt1 = b.push(NodeKind::Alternative { elements: vec![a] }, Span::new(0, 1));
    let ch = b.push(NodeKind::Character { value: 'b' as u32 }, Span::new(3, 4));
    let inner = b.push(NodeKind::Alternative { elements: vec![ch] }, Span::new(3, 4));
    let group = b.push(
        NodeKind::CapturingGroup {
            name: None,
            alternatives: vec![inner],
        },
        Span::new(2, 5),
    );
    let backref = b.push(
        NodeKind::Backreference {
            reference: GroupRef::Index(1),
        },
        Span::new(5, 7),
    );
    let alt2 = b.push(
        NodeKind::Alternative {
            elements: vec![group, backref],
        },
        Span::new(2, 7),
    );
    let root = b.push(
        NodeKind::Pattern {
            alternatives: vec![alt1, alt2],
        },
        Span::new(0, 7),
    );
    b.finish(root, r"a|(b)\1", Flags::new()).unwrap()
}

#[test]
fn finish_links_parents() {
    let ast = sample();
    let root = ast.pattern();

    assert_eq!(ast.parent(root), None);
    for id in ast.descendants(root).skip(1) {
        let parent = ast.parent(id).unwrap();
        assert!(ast.children(parent).contains(&id));
    }
}

#[test]
fn finish_resolves_backreferences() {
    let ast = sample();
    let group = ast.capturing_groups()[0];
    let backref = ast
        .descendants(ast.pattern())
        .find(|&id| matches!(ast.kind(id), NodeKind::Backreference { .. }))
        .unwrap();

    assert_eq!(ast.resolved(backref), Some(group));
    assert_eq!(ast.raw(group), "(b)");
    assert_eq!(ast.raw(backref), r"\1");
    assert_eq!(ast.resolved(group), None);
}

#[test]
fn descendants_are_preorder() {
    let ast = sample();
    let raws: Vec<&str> = ast.descendants(ast.pattern()).map(|id| ast.raw(id)).collect();

    assert_eq!(raws, ["a|(b)\\1", "a", "a", "(b)\\1", "(b)", "b", "b", "\\1"]);
}

#[test]
fn dump_tree() {
    let ast = sample();
    insta::assert_snapshot!(ast.dump(ast.pattern()), @r"
    Pattern
      Alternative
        Character 'a'
      Alternative
        CapturingGroup
          Alternative
            Character 'b'
        Backreference 1
    ");
}

#[test]
fn finish_rejects_unresolved_backreference() {
    let mut b = AstBuilder::new();
    let backref = b.push(
        NodeKind::Backreference {
            reference: GroupRef::Name("x".into()),
        },
        Span::new(0, 5),
    );
    let alt = b.push(
        NodeKind::Alternative {
            elements: vec![backref],
        },
        Span::new(0, 5),
    );
    let root = b.push(
        NodeKind::Pattern {
            alternatives: vec![alt],
        },
        Span::new(0, 5),
    );

    let err = b.finish(root, r"\k<x>", Flags::new()).unwrap_err();
    assert_eq!(err, AstError::UnresolvedBackreference("x".into()));
}

#[test]
fn finish_rejects_non_pattern_root() {
    let mut b = AstBuilder::new();
    let a = b.push(NodeKind::Character { value: 'a' as u32 }, Span::new(0, 1));

    let err = b.finish(a, "a", Flags::new()).unwrap_err();
    assert_eq!(err, AstError::RootNotPattern);
}
