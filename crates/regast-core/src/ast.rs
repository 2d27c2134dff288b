//! Arena-allocated regex AST.
//!
//! Nodes live in a single `Vec` and refer to each other by `NodeId`. Parent
//! links and backreference targets are computed once by `AstBuilder::finish`;
//! afterwards the tree is immutable, so a `NodeId` is a stable identity that
//! analyses can use as a memoization key.

use std::collections::HashMap;

use crate::Flags;

/// Handle to a node inside an `Ast`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    /// Raw index for serialization/debugging.
    #[inline]
    pub fn as_u32(self) -> u32 {
        self.0
    }

    #[inline]
    fn index(self) -> usize {
        self.0 as usize
    }
}

/// Byte range of a node within the pattern source.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum EdgeKind {
    /// `^`
    Start,
    /// `$`
    End,
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum LookaroundKind {
    Lookahead,
    Lookbehind,
}

#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum CharacterSetKind {
    /// `.`
    Any,
    /// `\d`, `\D`
    Digit { negate: bool },
    /// `\s`, `\S`
    Space { negate: bool },
    /// `\w`, `\W`
    Word { negate: bool },
    /// `\p{…}`, `\P{…}`
    Property {
        key: Option<String>,
        value: String,
        negate: bool,
    },
}

/// How a backreference names its group.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum GroupRef {
    Index(u32),
    Name(String),
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum NodeKind {
    Pattern {
        alternatives: Vec<NodeId>,
    },
    Alternative {
        elements: Vec<NodeId>,
    },
    Group {
        alternatives: Vec<NodeId>,
    },
    CapturingGroup {
        name: Option<String>,
        alternatives: Vec<NodeId>,
    },
    /// `max: None` means unbounded.
    Quantifier {
        min: u32,
        max: Option<u32>,
        greedy: bool,
        element: NodeId,
    },
    EdgeAssertion {
        kind: EdgeKind,
    },
    WordBoundary {
        negate: bool,
    },
    Lookaround {
        kind: LookaroundKind,
        negate: bool,
        alternatives: Vec<NodeId>,
    },
    Character {
        value: u32,
    },
    CharacterClass {
        negate: bool,
        elements: Vec<NodeId>,
    },
    CharacterClassRange {
        min: u32,
        max: u32,
    },
    CharacterSet(CharacterSetKind),
    Backreference {
        reference: GroupRef,
    },
    /// `[a&&b]` (unicodeSets only)
    ClassIntersection {
        operands: [NodeId; 2],
    },
    /// `[a--b]` (unicodeSets only)
    ClassSubtraction {
        operands: [NodeId; 2],
    },
}

impl NodeKind {
    /// Child nodes in source order.
    pub fn children(&self) -> &[NodeId] {
        match self {
            NodeKind::Pattern { alternatives }
            | NodeKind::Group { alternatives }
            | NodeKind::CapturingGroup { alternatives, .. }
            | NodeKind::Lookaround { alternatives, .. } => alternatives,
            NodeKind::Alternative { elements } | NodeKind::CharacterClass { elements, .. } => {
                elements
            }
            NodeKind::Quantifier { element, .. } => std::slice::from_ref(element),
            NodeKind::ClassIntersection { operands } | NodeKind::ClassSubtraction { operands } => {
                operands
            }
            NodeKind::EdgeAssertion { .. }
            | NodeKind::WordBoundary { .. }
            | NodeKind::Character { .. }
            | NodeKind::CharacterClassRange { .. }
            | NodeKind::CharacterSet(_)
            | NodeKind::Backreference { .. } => &[],
        }
    }

    /// Alternatives of a pattern, group, capturing group, or lookaround.
    pub fn alternatives(&self) -> Option<&[NodeId]> {
        match self {
            NodeKind::Pattern { alternatives }
            | NodeKind::Group { alternatives }
            | NodeKind::CapturingGroup { alternatives, .. }
            | NodeKind::Lookaround { alternatives, .. } => Some(alternatives),
            _ => None,
        }
    }

    pub fn is_assertion(&self) -> bool {
        matches!(
            self,
            NodeKind::EdgeAssertion { .. }
                | NodeKind::WordBoundary { .. }
                | NodeKind::Lookaround { .. }
        )
    }

    /// Group-like nodes whose alternatives are matched in the enclosing direction.
    pub fn is_group(&self) -> bool {
        matches!(self, NodeKind::Group { .. } | NodeKind::CapturingGroup { .. })
    }

    pub fn name(&self) -> &'static str {
        match self {
            NodeKind::Pattern { .. } => "Pattern",
            NodeKind::Alternative { .. } => "Alternative",
            NodeKind::Group { .. } => "Group",
            NodeKind::CapturingGroup { .. } => "CapturingGroup",
            NodeKind::Quantifier { .. } => "Quantifier",
            NodeKind::EdgeAssertion { .. } => "EdgeAssertion",
            NodeKind::WordBoundary { .. } => "WordBoundary",
            NodeKind::Lookaround { .. } => "Lookaround",
            NodeKind::Character { .. } => "Character",
            NodeKind::CharacterClass { .. } => "CharacterClass",
            NodeKind::CharacterClassRange { .. } => "CharacterClassRange",
            NodeKind::CharacterSet(_) => "CharacterSet",
            NodeKind::Backreference { .. } => "Backreference",
            NodeKind::ClassIntersection { .. } => "ClassIntersection",
            NodeKind::ClassSubtraction { .. } => "ClassSubtraction",
        }
    }
}

#[derive(Clone, Debug)]
pub struct Node {
    pub kind: NodeKind,
    pub span: Span,
    parent: Option<NodeId>,
}

impl Node {
    #[inline]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }
}

/// Errors from finishing an AST.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AstError {
    #[error("root node must be a pattern")]
    RootNotPattern,

    #[error("node {0} is referenced but was never allocated")]
    MissingNode(u32),

    #[error("node {0} has more than one parent")]
    SharedNode(u32),

    #[error("backreference to undefined group `{0}`")]
    UnresolvedBackreference(String),
}

/// Collects nodes bottom-up, then links them into an `Ast`.
#[derive(Debug, Default)]
pub struct AstBuilder {
    nodes: Vec<Node>,
}

impl AstBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, kind: NodeKind, span: Span) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node {
            kind,
            span,
            parent: None,
        });
        id
    }

    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.nodes[id.index()].kind
    }

    pub fn span(&self, id: NodeId) -> Span {
        self.nodes[id.index()].span
    }

    /// Links parents, numbers capturing groups, and resolves backreferences.
    pub fn finish(
        mut self,
        root: NodeId,
        source: impl Into<String>,
        flags: Flags,
    ) -> Result<Ast, AstError> {
        match self.nodes.get(root.index()) {
            Some(Node {
                kind: NodeKind::Pattern { .. },
                ..
            }) => {}
            Some(_) => return Err(AstError::RootNotPattern),
            None => return Err(AstError::MissingNode(root.0)),
        }

        // Preorder walk: capturing groups are numbered by their opening paren.
        let mut capturing_groups = Vec::new();
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            let node = &self.nodes[id.index()];
            if matches!(node.kind, NodeKind::CapturingGroup { .. }) {
                capturing_groups.push(id);
            }
            let children: Vec<NodeId> = node.kind.children().to_vec();
            for &child in children.iter().rev() {
                let Some(child_node) = self.nodes.get_mut(child.index()) else {
                    return Err(AstError::MissingNode(child.0));
                };
                if child_node.parent.is_some() || child == root {
                    return Err(AstError::SharedNode(child.0));
                }
                child_node.parent = Some(id);
                stack.push(child);
            }
        }

        let mut resolved = HashMap::new();
        for (index, node) in self.nodes.iter().enumerate() {
            let NodeKind::Backreference { reference } = &node.kind else {
                continue;
            };
            let group = match reference {
                GroupRef::Index(n) => (*n as usize)
                    .checked_sub(1)
                    .and_then(|i| capturing_groups.get(i))
                    .copied(),
                GroupRef::Name(name) => capturing_groups.iter().copied().find(|&g| {
                    matches!(
                        &self.nodes[g.index()].kind,
                        NodeKind::CapturingGroup { name: Some(n), .. } if n == name
                    )
                }),
            };
            let Some(group) = group else {
                let label = match reference {
                    GroupRef::Index(n) => n.to_string(),
                    GroupRef::Name(name) => name.clone(),
                };
                return Err(AstError::UnresolvedBackreference(label));
            };
            resolved.insert(NodeId(index as u32), group);
        }

        Ok(Ast {
            nodes: self.nodes,
            root,
            source: source.into(),
            flags,
            capturing_groups,
            resolved,
        })
    }
}

/// An immutable regex AST with its source text and flags.
#[derive(Clone, Debug)]
pub struct Ast {
    nodes: Vec<Node>,
    root: NodeId,
    source: String,
    flags: Flags,
    capturing_groups: Vec<NodeId>,
    resolved: HashMap<NodeId, NodeId>,
}

impl Ast {
    /// The root `Pattern` node.
    #[inline]
    pub fn pattern(&self) -> NodeId {
        self.root
    }

    #[inline]
    pub fn flags(&self) -> Flags {
        self.flags
    }

    #[inline]
    pub fn source(&self) -> &str {
        &self.source
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[inline]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    #[inline]
    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.node(id).kind
    }

    #[inline]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    #[inline]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.kind(id).children()
    }

    /// Source text of a node.
    pub fn raw(&self, id: NodeId) -> &str {
        let span = self.node(id).span;
        &self.source[span.start..span.end]
    }

    /// Capturing groups in order of their opening paren.
    pub fn capturing_groups(&self) -> &[NodeId] {
        &self.capturing_groups
    }

    /// The capturing group a backreference refers to, or `None` for other nodes.
    pub fn resolved(&self, backreference: NodeId) -> Option<NodeId> {
        self.resolved.get(&backreference).copied()
    }

    /// All nodes of the subtree rooted at `id`, in preorder.
    pub fn descendants(&self, id: NodeId) -> Descendants<'_> {
        Descendants {
            ast: self,
            stack: vec![id],
        }
    }

    /// Iterate over `(id, node)` for every node of the tree.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (NodeId(i as u32), node))
    }
}

/// Preorder iterator over a subtree.
pub struct Descendants<'a> {
    ast: &'a Ast,
    stack: Vec<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        self.stack
            .extend(self.ast.children(id).iter().rev().copied());
        Some(id)
    }
}
