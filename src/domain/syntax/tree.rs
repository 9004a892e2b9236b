//! Arena syntax tree.
//!
//! Parsers build an owned green tree (`GreenNode`/`GreenToken`) and hand it to
//! `SyntaxTree::new`, which lays it out into flat vectors addressed by index.
//! Every node records its parent index, so ancestry queries never need owning
//! back pointers. Rewrites go the other way: `to_green` clones a subtree into
//! an owned green tree that can be edited and laid out again.

use std::fmt;

use super::kind::{SyntaxKind, TriviaKind};
use super::text::{line_of, line_starts, TextRange};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trivia {
    pub kind: TriviaKind,
    pub text: String,
}

impl Trivia {
    pub fn new(kind: TriviaKind, text: impl Into<String>) -> Self {
        Self { kind, text: text.into() }
    }

    pub fn end_of_line() -> Self {
        Self::new(TriviaKind::EndOfLine, "\n")
    }

    pub fn space() -> Self {
        Self::new(TriviaKind::Whitespace, " ")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GreenToken {
    pub kind: SyntaxKind,
    pub text: String,
    pub leading: Vec<Trivia>,
    pub trailing: Vec<Trivia>,
    pub missing: bool,
}

impl GreenToken {
    pub fn new(kind: SyntaxKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
            leading: Vec::new(),
            trailing: Vec::new(),
            missing: false,
        }
    }

    /// Zero-width placeholder produced by error recovery.
    pub fn missing(kind: SyntaxKind) -> Self {
        Self {
            kind,
            text: String::new(),
            leading: Vec::new(),
            trailing: Vec::new(),
            missing: true,
        }
    }

    pub fn full_len(&self) -> usize {
        trivia_len(&self.leading) + self.text.len() + trivia_len(&self.trailing)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GreenElement {
    Node(GreenNode),
    Token(GreenToken),
}

impl GreenElement {
    pub fn kind(&self) -> SyntaxKind {
        match self {
            GreenElement::Node(n) => n.kind,
            GreenElement::Token(t) => t.kind,
        }
    }

    pub fn as_node(&self) -> Option<&GreenNode> {
        match self {
            GreenElement::Node(n) => Some(n),
            GreenElement::Token(_) => None,
        }
    }

    pub fn as_node_mut(&mut self) -> Option<&mut GreenNode> {
        match self {
            GreenElement::Node(n) => Some(n),
            GreenElement::Token(_) => None,
        }
    }
}

impl From<GreenNode> for GreenElement {
    fn from(node: GreenNode) -> Self {
        GreenElement::Node(node)
    }
}

impl From<GreenToken> for GreenElement {
    fn from(token: GreenToken) -> Self {
        GreenElement::Token(token)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GreenNode {
    pub kind: SyntaxKind,
    pub children: Vec<GreenElement>,
}

impl GreenNode {
    pub fn new(kind: SyntaxKind, children: Vec<GreenElement>) -> Self {
        Self { kind, children }
    }

    pub fn full_len(&self) -> usize {
        self.children
            .iter()
            .map(|c| match c {
                GreenElement::Node(n) => n.full_len(),
                GreenElement::Token(t) => t.full_len(),
            })
            .sum()
    }

    pub fn first_token_mut(&mut self) -> Option<&mut GreenToken> {
        for child in self.children.iter_mut() {
            let found = match child {
                GreenElement::Token(t) => Some(t),
                GreenElement::Node(n) => n.first_token_mut(),
            };
            if found.is_some() {
                return found;
            }
        }
        None
    }

    pub fn last_token_mut(&mut self) -> Option<&mut GreenToken> {
        for child in self.children.iter_mut().rev() {
            let found = match child {
                GreenElement::Token(t) => Some(t),
                GreenElement::Node(n) => n.last_token_mut(),
            };
            if found.is_some() {
                return found;
            }
        }
        None
    }
}

fn trivia_len(trivia: &[Trivia]) -> usize {
    trivia.iter().map(|t| t.text.len()).sum()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TokenId(u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl TokenId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementId {
    Node(NodeId),
    Token(TokenId),
}

#[derive(Debug, Clone)]
struct NodeData {
    kind: SyntaxKind,
    parent: Option<NodeId>,
    children: Vec<ElementId>,
    full_start: usize,
    full_len: usize,
}

#[derive(Debug, Clone)]
struct TokenData {
    kind: SyntaxKind,
    text: String,
    leading: Vec<Trivia>,
    trailing: Vec<Trivia>,
    missing: bool,
    parent: NodeId,
    full_start: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub message: String,
    pub span: TextRange,
}

impl Diagnostic {
    pub fn new(message: impl Into<String>, span: TextRange) -> Self {
        Self { message: message.into(), span }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.message, self.span)
    }
}

/// Immutable, full-fidelity syntax tree. The root is always node 0.
#[derive(Debug, Clone)]
pub struct SyntaxTree {
    text: String,
    line_starts: Vec<usize>,
    nodes: Vec<NodeData>,
    tokens: Vec<TokenData>,
    diagnostics: Vec<Diagnostic>,
    consumed_all: bool,
}

impl SyntaxTree {
    pub fn new(root: GreenNode, diagnostics: Vec<Diagnostic>) -> Self {
        let mut tree = SyntaxTree {
            text: String::with_capacity(root.full_len()),
            line_starts: Vec::new(),
            nodes: Vec::new(),
            tokens: Vec::new(),
            diagnostics,
            consumed_all: true,
        };
        tree.lay_out(root, None);
        tree.line_starts = line_starts(&tree.text);
        tree
    }

    /// Marks whether the parser reached the end of its input.
    pub fn with_consumed_all(mut self, consumed_all: bool) -> Self {
        self.consumed_all = consumed_all;
        self
    }

    fn lay_out(&mut self, green: GreenNode, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        let full_start = self.text.len();
        self.nodes.push(NodeData {
            kind: green.kind,
            parent,
            children: Vec::with_capacity(green.children.len()),
            full_start,
            full_len: 0,
        });
        for child in green.children {
            let element = match child {
                GreenElement::Node(node) => ElementId::Node(self.lay_out(node, Some(id))),
                GreenElement::Token(token) => {
                    let token_id = TokenId(self.tokens.len() as u32);
                    let token_start = self.text.len();
                    for t in &token.leading {
                        self.text.push_str(&t.text);
                    }
                    self.text.push_str(&token.text);
                    for t in &token.trailing {
                        self.text.push_str(&t.text);
                    }
                    self.tokens.push(TokenData {
                        kind: token.kind,
                        text: token.text,
                        leading: token.leading,
                        trailing: token.trailing,
                        missing: token.missing,
                        parent: id,
                        full_start: token_start,
                    });
                    ElementId::Token(token_id)
                }
            };
            self.nodes[id.index()].children.push(element);
        }
        self.nodes[id.index()].full_len = self.text.len() - full_start;
        id
    }

    pub fn root(&self) -> SyntaxNode<'_> {
        SyntaxNode { tree: self, id: NodeId(0) }
    }

    pub fn node(&self, id: NodeId) -> SyntaxNode<'_> {
        SyntaxNode { tree: self, id }
    }

    pub fn token(&self, id: TokenId) -> SyntaxToken<'_> {
        SyntaxToken { tree: self, id }
    }

    pub fn tokens(&self) -> impl Iterator<Item = SyntaxToken<'_>> + '_ {
        (0..self.tokens.len()).map(move |i| SyntaxToken { tree: self, id: TokenId(i as u32) })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn consumed_all(&self) -> bool {
        self.consumed_all
    }

    /// Zero-based line of a byte offset.
    pub fn line_of(&self, offset: usize) -> usize {
        line_of(&self.line_starts, offset)
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    pub fn to_green(&self) -> GreenNode {
        self.root().to_green()
    }

    /// Rebuilds the tree with every token passed through `f`. Structure is kept.
    pub fn map_tokens<F>(&self, mut f: F) -> SyntaxTree
    where
        F: FnMut(SyntaxToken<'_>) -> GreenToken,
    {
        let green = self.root().to_green_with(&mut f);
        SyntaxTree::new(green, self.diagnostics.clone()).with_consumed_all(self.consumed_all)
    }

    /// Bottom-up structural rewrite. `f` sees each original node together with
    /// its already rewritten green form and returns the replacement.
    pub fn rewrite<F>(&self, mut f: F) -> SyntaxTree
    where
        F: FnMut(SyntaxNode<'_>, GreenNode) -> GreenNode,
    {
        let green = rewrite_node(self.root(), &mut f);
        SyntaxTree::new(green, self.diagnostics.clone()).with_consumed_all(self.consumed_all)
    }
}

fn rewrite_node<'a, F>(node: SyntaxNode<'a>, f: &mut F) -> GreenNode
where
    F: FnMut(SyntaxNode<'a>, GreenNode) -> GreenNode,
{
    let children = node
        .children()
        .map(|child| match child {
            SyntaxElement::Node(n) => GreenElement::Node(rewrite_node(n, f)),
            SyntaxElement::Token(t) => GreenElement::Token(t.to_green()),
        })
        .collect();
    f(node, GreenNode::new(node.kind(), children))
}

#[derive(Clone, Copy)]
pub struct SyntaxNode<'a> {
    tree: &'a SyntaxTree,
    id: NodeId,
}

impl PartialEq for SyntaxNode<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.id == other.id
    }
}

impl Eq for SyntaxNode<'_> {}

impl fmt::Debug for SyntaxNode<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}@{}", self.kind(), self.span())
    }
}

impl<'a> SyntaxNode<'a> {
    fn data(&self) -> &'a NodeData {
        &self.tree.nodes[self.id.index()]
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn tree(&self) -> &'a SyntaxTree {
        self.tree
    }

    pub fn kind(&self) -> SyntaxKind {
        self.data().kind
    }

    pub fn parent(&self) -> Option<SyntaxNode<'a>> {
        self.data().parent.map(|id| SyntaxNode { tree: self.tree, id })
    }

    /// Strict ancestors, nearest first.
    pub fn ancestors(&self) -> impl Iterator<Item = SyntaxNode<'a>> {
        std::iter::successors(self.parent(), |n| n.parent())
    }

    pub fn first_ancestor(&self, pred: impl Fn(SyntaxKind) -> bool) -> Option<SyntaxNode<'a>> {
        self.ancestors().find(|n| pred(n.kind()))
    }

    pub fn children(&self) -> impl Iterator<Item = SyntaxElement<'a>> + 'a {
        let tree = self.tree;
        self.data().children.iter().map(move |c| match *c {
            ElementId::Node(id) => SyntaxElement::Node(SyntaxNode { tree, id }),
            ElementId::Token(id) => SyntaxElement::Token(SyntaxToken { tree, id }),
        })
    }

    pub fn child_nodes(&self) -> impl Iterator<Item = SyntaxNode<'a>> + 'a {
        self.children().filter_map(SyntaxElement::into_node)
    }

    pub fn child_tokens(&self) -> impl Iterator<Item = SyntaxToken<'a>> + 'a {
        self.children().filter_map(SyntaxElement::into_token)
    }

    pub fn child_node(&self, kind: SyntaxKind) -> Option<SyntaxNode<'a>> {
        self.child_nodes().find(|n| n.kind() == kind)
    }

    pub fn child_nodes_of(&self, kind: SyntaxKind) -> impl Iterator<Item = SyntaxNode<'a>> + 'a {
        self.child_nodes().filter(move |n| n.kind() == kind)
    }

    pub fn nth_child_node(&self, n: usize) -> Option<SyntaxNode<'a>> {
        self.child_nodes().nth(n)
    }

    /// First child token of `kind`, missing or not.
    pub fn token(&self, kind: SyntaxKind) -> Option<SyntaxToken<'a>> {
        self.child_tokens().find(|t| t.kind() == kind)
    }

    pub fn has_token(&self, kind: SyntaxKind) -> bool {
        self.child_tokens().any(|t| t.kind() == kind && !t.is_missing())
    }

    /// Pre-order walk of all nodes below this one, excluding itself.
    pub fn descendants(&self) -> Descendants<'a> {
        let mut stack: Vec<SyntaxNode<'a>> = self.child_nodes().collect();
        stack.reverse();
        Descendants { stack }
    }

    pub fn first_token(&self) -> Option<SyntaxToken<'a>> {
        self.children().find_map(|c| match c {
            SyntaxElement::Token(t) => Some(t),
            SyntaxElement::Node(n) => n.first_token(),
        })
    }

    pub fn last_token(&self) -> Option<SyntaxToken<'a>> {
        let children: Vec<_> = self.children().collect();
        children.into_iter().rev().find_map(|c| match c {
            SyntaxElement::Token(t) => Some(t),
            SyntaxElement::Node(n) => n.last_token(),
        })
    }

    pub fn full_span(&self) -> TextRange {
        let data = self.data();
        TextRange::new(data.full_start, data.full_start + data.full_len)
    }

    /// Span without the outer leading and trailing trivia.
    pub fn span(&self) -> TextRange {
        let full = self.full_span();
        let start = self.first_token().map(|t| t.span().start).unwrap_or(full.start);
        let end = self.last_token().map(|t| t.span().end).unwrap_or(full.end);
        if start > end {
            TextRange::empty(start)
        } else {
            TextRange::new(start, end)
        }
    }

    pub fn text(&self) -> &'a str {
        let span = self.span();
        &self.tree.text[span.start..span.end]
    }

    pub fn full_text(&self) -> &'a str {
        let span = self.full_span();
        &self.tree.text[span.start..span.end]
    }

    pub fn leading_trivia(&self) -> &'a [Trivia] {
        self.first_token().map(|t| t.leading()).unwrap_or(&[])
    }

    pub fn trailing_trivia(&self) -> &'a [Trivia] {
        self.last_token().map(|t| t.trailing()).unwrap_or(&[])
    }

    /// Zero-based line where the node's text starts.
    pub fn start_line(&self) -> usize {
        self.tree.line_of(self.span().start)
    }

    pub fn to_green(&self) -> GreenNode {
        self.to_green_with(&mut |t: SyntaxToken<'_>| t.to_green())
    }

    fn to_green_with<F>(&self, f: &mut F) -> GreenNode
    where
        F: FnMut(SyntaxToken<'a>) -> GreenToken,
    {
        let children = self
            .children()
            .map(|child| match child {
                SyntaxElement::Node(n) => GreenElement::Node(n.to_green_with(f)),
                SyntaxElement::Token(t) => GreenElement::Token(f(t)),
            })
            .collect();
        GreenNode::new(self.kind(), children)
    }
}

pub struct Descendants<'a> {
    stack: Vec<SyntaxNode<'a>>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = SyntaxNode<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        let mut children: Vec<_> = node.child_nodes().collect();
        children.reverse();
        self.stack.extend(children);
        Some(node)
    }
}

#[derive(Clone, Copy)]
pub struct SyntaxToken<'a> {
    tree: &'a SyntaxTree,
    id: TokenId,
}

impl PartialEq for SyntaxToken<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.id == other.id
    }
}

impl Eq for SyntaxToken<'_> {}

impl fmt::Debug for SyntaxToken<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({:?})@{}", self.kind(), self.text(), self.span())
    }
}

impl<'a> SyntaxToken<'a> {
    fn data(&self) -> &'a TokenData {
        &self.tree.tokens[self.id.index()]
    }

    pub fn id(&self) -> TokenId {
        self.id
    }

    pub fn kind(&self) -> SyntaxKind {
        self.data().kind
    }

    pub fn text(&self) -> &'a str {
        &self.data().text
    }

    pub fn leading(&self) -> &'a [Trivia] {
        &self.data().leading
    }

    pub fn trailing(&self) -> &'a [Trivia] {
        &self.data().trailing
    }

    pub fn is_missing(&self) -> bool {
        self.data().missing
    }

    pub fn parent(&self) -> SyntaxNode<'a> {
        SyntaxNode { tree: self.tree, id: self.data().parent }
    }

    /// Next token in document order, including missing ones.
    pub fn next_token(&self) -> Option<SyntaxToken<'a>> {
        let next = self.id.index() + 1;
        (next < self.tree.tokens.len()).then(|| SyntaxToken {
            tree: self.tree,
            id: TokenId(next as u32),
        })
    }

    pub fn prev_token(&self) -> Option<SyntaxToken<'a>> {
        let index = self.id.index();
        (index > 0).then(|| SyntaxToken {
            tree: self.tree,
            id: TokenId(index as u32 - 1),
        })
    }

    pub fn span(&self) -> TextRange {
        let data = self.data();
        let start = data.full_start + trivia_len(&data.leading);
        TextRange::new(start, start + data.text.len())
    }

    pub fn full_span(&self) -> TextRange {
        let data = self.data();
        let len = trivia_len(&data.leading) + data.text.len() + trivia_len(&data.trailing);
        TextRange::new(data.full_start, data.full_start + len)
    }

    pub fn start_line(&self) -> usize {
        self.tree.line_of(self.span().start)
    }

    pub fn to_green(&self) -> GreenToken {
        let data = self.data();
        GreenToken {
            kind: data.kind,
            text: data.text.clone(),
            leading: data.leading.clone(),
            trailing: data.trailing.clone(),
            missing: data.missing,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyntaxElement<'a> {
    Node(SyntaxNode<'a>),
    Token(SyntaxToken<'a>),
}

impl<'a> SyntaxElement<'a> {
    pub fn kind(&self) -> SyntaxKind {
        match self {
            SyntaxElement::Node(n) => n.kind(),
            SyntaxElement::Token(t) => t.kind(),
        }
    }

    pub fn into_node(self) -> Option<SyntaxNode<'a>> {
        match self {
            SyntaxElement::Node(n) => Some(n),
            SyntaxElement::Token(_) => None,
        }
    }

    pub fn into_token(self) -> Option<SyntaxToken<'a>> {
        match self {
            SyntaxElement::Token(t) => Some(t),
            SyntaxElement::Node(_) => None,
        }
    }

    pub fn full_span(&self) -> TextRange {
        match self {
            SyntaxElement::Node(n) => n.full_span(),
            SyntaxElement::Token(t) => t.full_span(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tok(kind: SyntaxKind, text: &str) -> GreenElement {
        GreenElement::Token(GreenToken::new(kind, text))
    }

    fn sample() -> SyntaxTree {
        // return x;
        let mut ret = GreenToken::new(SyntaxKind::ReturnKw, "return");
        ret.leading.push(Trivia::new(TriviaKind::Whitespace, "  "));
        ret.trailing.push(Trivia::space());
        let mut semi = GreenToken::new(SyntaxKind::Semicolon, ";");
        semi.trailing.push(Trivia::end_of_line());
        let name = GreenNode::new(
            SyntaxKind::IdentifierName,
            vec![tok(SyntaxKind::Identifier, "x")],
        );
        let stmt = GreenNode::new(
            SyntaxKind::ReturnStatement,
            vec![ret.into(), name.into(), semi.into()],
        );
        SyntaxTree::new(stmt, Vec::new())
    }

    #[test]
    fn test_full_fidelity_text() {
        let tree = sample();
        assert_eq!(tree.text(), "  return x;\n");
        let root = tree.root();
        assert_eq!(root.text(), "return x;");
        assert_eq!(root.full_text(), "  return x;\n");
        assert_eq!(root.span(), TextRange::new(2, 11));
    }

    #[test]
    fn test_parent_links_and_navigation() {
        let tree = sample();
        let root = tree.root();
        let name = root.child_node(SyntaxKind::IdentifierName).unwrap();
        assert_eq!(name.parent(), Some(root));
        assert_eq!(name.ancestors().count(), 1);
        let first = root.first_token().unwrap();
        assert_eq!(first.kind(), SyntaxKind::ReturnKw);
        assert_eq!(first.next_token().unwrap().text(), "x");
        assert_eq!(root.last_token().unwrap().kind(), SyntaxKind::Semicolon);
        assert_eq!(root.descendants().count(), 1);
    }

    #[test]
    fn test_green_round_trip() {
        let tree = sample();
        let again = SyntaxTree::new(tree.to_green(), Vec::new());
        assert_eq!(again.text(), tree.text());
    }

    #[test]
    fn test_map_tokens_changes_trivia_only() {
        let tree = sample();
        let mapped = tree.map_tokens(|t| {
            let mut g = t.to_green();
            g.leading.clear();
            g
        });
        assert_eq!(mapped.text(), "return x;\n");
        assert_eq!(mapped.root().kind(), SyntaxKind::ReturnStatement);
    }

    #[test]
    fn test_rewrite_bottom_up() {
        let tree = sample();
        let rewritten = tree.rewrite(|node, mut green| {
            if node.kind() == SyntaxKind::IdentifierName {
                green.children = vec![tok(SyntaxKind::Identifier, "y")];
            }
            green
        });
        assert_eq!(rewritten.root().text(), "return y;");
    }
}
