//! Position-aware, parent-linked handles over a green tree.
//!
//! Red handles are cheap to build and are created on demand while
//! navigating. They know their absolute offset and parent; the green element
//! they wrap does not.

use std::fmt;
use std::iter;

use text_size::{TextRange, TextSize};
use triomphe::Arc;
use verdant_errors::SyntaxDiagnostic;

use crate::{
    Green as _, GreenElement, GreenNode, GreenRef, GreenToken, GreenTrivia, GreenWalker, NodeFlags,
    NodeOrToken, SyntaxKind, walk_node,
};

pub type SyntaxElement = NodeOrToken<SyntaxNode, SyntaxToken>;

impl GreenElement {
    /// Wraps `self` in a red handle at `position`, the start of its full span.
    ///
    /// # Panics
    ///
    /// Trivia has its own projection, [`SyntaxTrivia`], built from the owning
    /// token, and panics here.
    pub fn create_red(
        &self,
        parent: Option<SyntaxNode>,
        position: TextSize,
        index: usize,
    ) -> SyntaxElement {
        match self {
            Self::Node(node) => SyntaxNode::new(parent, index, position, node.clone()).into(),
            Self::Token(token) => SyntaxToken::new(parent, index, position, token.clone()).into(),
            Self::Trivia(trivia) => {
                unreachable!("create_red is not supported for trivia ({:?})", trivia.kind())
            }
        }
    }
}

#[derive(Clone, PartialEq, Eq, Hash)]
pub struct SyntaxNode {
    data: Arc<NodeData>,
}

#[derive(PartialEq, Eq, Hash)]
struct NodeData {
    parent: Option<SyntaxNode>,
    index: usize,
    offset: TextSize,
    green: GreenNode,
}

impl SyntaxNode {
    fn new(parent: Option<Self>, index: usize, offset: TextSize, green: GreenNode) -> Self {
        Self { data: Arc::new(NodeData { parent, index, offset, green }) }
    }

    pub fn new_root(green: GreenNode) -> Self {
        Self::new(None, 0, TextSize::new(0), green)
    }

    pub fn green(&self) -> &GreenNode {
        &self.data.green
    }

    pub fn kind(&self) -> SyntaxKind {
        self.green().kind()
    }

    pub fn parent(&self) -> Option<&Self> {
        self.data.parent.as_ref()
    }

    /// Position among the parent's children.
    pub fn index(&self) -> usize {
        self.data.index
    }

    /// Range including the outermost leading and trailing trivia.
    pub fn text_range(&self) -> TextRange {
        TextRange::at(self.data.offset, self.green().full_width())
    }

    /// Range excluding the outermost leading and trailing trivia.
    pub fn trimmed_range(&self) -> TextRange {
        let start = self.data.offset + self.green().leading_trivia_width();
        TextRange::at(start, self.green().width())
    }

    pub fn ancestors(&self) -> impl Iterator<Item = Self> {
        iter::successors(Some(self.clone()), |node| node.parent().cloned())
    }

    pub fn children_with_tokens(&self) -> impl Iterator<Item = SyntaxElement> + '_ {
        let mut offset = self.data.offset;
        self.green().children().iter().enumerate().map(move |(index, child)| {
            let position = offset;
            offset += child.full_width();
            child.create_red(Some(self.clone()), position, index)
        })
    }

    pub fn children(&self) -> impl Iterator<Item = Self> + '_ {
        self.children_with_tokens().filter_map(NodeOrToken::into_node)
    }

    /// Every diagnostic in this subtree, with the absolute range it covers.
    /// Subtrees without diagnostics are skipped.
    pub fn diagnostics(&self) -> Vec<(TextRange, SyntaxDiagnostic)> {
        let mut found = Vec::new();
        let collect = |at: TextSize, element: GreenRef<'_>| {
            let diagnostics = element.head().overlay().diagnostics();
            found.extend(diagnostics.iter().map(|d| (d.range_at(at), d.clone())));
        };
        let mut collector =
            OverlayCollector::new(NodeFlags::CONTAINS_DIAGNOSTICS, self.data.offset, collect);
        self.green().accept_walker(&mut collector);
        found
    }

    /// Every element in this subtree carrying an annotation of `kind`, with
    /// its absolute full range. Subtrees without annotations are skipped.
    pub fn annotated_elements(&self, kind: &str) -> Vec<(TextRange, GreenElement)> {
        let mut found = Vec::new();
        let collect = |at: TextSize, element: GreenRef<'_>| {
            let annotations = element.head().overlay().annotations();
            if annotations.iter().any(|annotation| annotation.kind() == Some(kind)) {
                found.push((TextRange::at(at, element.full_width()), element.to_element()));
            }
        };
        let mut collector =
            OverlayCollector::new(NodeFlags::CONTAINS_ANNOTATIONS, self.data.offset, collect);
        self.green().accept_walker(&mut collector);
        found
    }
}

impl fmt::Display for SyntaxNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.green(), f)
    }
}

impl fmt::Debug for SyntaxNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}@{:?}", self.kind(), self.text_range())
    }
}

#[derive(Clone, PartialEq, Eq, Hash)]
pub struct SyntaxToken {
    data: Arc<TokenData>,
}

#[derive(PartialEq, Eq, Hash)]
struct TokenData {
    parent: Option<SyntaxNode>,
    index: usize,
    offset: TextSize,
    green: GreenToken,
}

impl SyntaxToken {
    fn new(parent: Option<SyntaxNode>, index: usize, offset: TextSize, green: GreenToken) -> Self {
        Self { data: Arc::new(TokenData { parent, index, offset, green }) }
    }

    pub fn green(&self) -> &GreenToken {
        &self.data.green
    }

    pub fn kind(&self) -> SyntaxKind {
        self.green().kind()
    }

    pub fn text(&self) -> &str {
        self.green().text()
    }

    pub fn parent(&self) -> Option<&SyntaxNode> {
        self.data.parent.as_ref()
    }

    pub fn index(&self) -> usize {
        self.data.index
    }

    /// Range including attached trivia.
    pub fn text_range(&self) -> TextRange {
        TextRange::at(self.data.offset, self.green().full_width())
    }

    /// Range of the token text alone.
    pub fn trimmed_range(&self) -> TextRange {
        let start = self.data.offset + self.green().leading_trivia_width();
        TextRange::at(start, self.green().width())
    }

    pub fn leading_trivia(&self) -> impl Iterator<Item = SyntaxTrivia> + '_ {
        self.trivia(self.green().leading_trivia(), self.data.offset)
    }

    pub fn trailing_trivia(&self) -> impl Iterator<Item = SyntaxTrivia> + '_ {
        self.trivia(self.green().trailing_trivia(), self.trimmed_range().end())
    }

    fn trivia<'a>(
        &'a self,
        trivia: &'a [GreenTrivia],
        start: TextSize,
    ) -> impl Iterator<Item = SyntaxTrivia> + 'a {
        let mut position = start;
        trivia.iter().enumerate().map(move |(index, green)| {
            let trivia = SyntaxTrivia {
                token: Some(self.clone()),
                green: green.clone(),
                position,
                index,
            };
            position += green.full_width();
            trivia
        })
    }
}

impl fmt::Display for SyntaxToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

impl fmt::Debug for SyntaxToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}@{:?} {:?}", self.kind(), self.trimmed_range(), self.text())
    }
}

/// A trivia leaf positioned in a file, optionally tied to the token that owns it.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct SyntaxTrivia {
    token: Option<SyntaxToken>,
    green: GreenTrivia,
    position: TextSize,
    index: usize,
}

impl SyntaxTrivia {
    pub fn token(&self) -> Option<&SyntaxToken> {
        self.token.as_ref()
    }

    pub fn green(&self) -> &GreenTrivia {
        &self.green
    }

    pub fn kind(&self) -> SyntaxKind {
        self.green.kind()
    }

    pub fn text(&self) -> &str {
        self.green.text()
    }

    /// Index within the owning token's leading or trailing list.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn text_range(&self) -> TextRange {
        TextRange::at(self.position, self.green.full_width())
    }
}

/// Detached trivia: no owning token, at position 0.
impl From<GreenTrivia> for SyntaxTrivia {
    fn from(green: GreenTrivia) -> Self {
        Self { token: None, green, position: TextSize::new(0), index: 0 }
    }
}

impl fmt::Debug for SyntaxTrivia {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}@{:?} {:?}", self.kind(), self.text_range(), self.text())
    }
}

impl From<SyntaxNode> for SyntaxElement {
    fn from(node: SyntaxNode) -> Self {
        Self::Node(node)
    }
}

impl From<SyntaxToken> for SyntaxElement {
    fn from(token: SyntaxToken) -> Self {
        Self::Token(token)
    }
}

impl SyntaxElement {
    pub fn kind(&self) -> SyntaxKind {
        match self {
            Self::Node(node) => node.kind(),
            Self::Token(token) => token.kind(),
        }
    }

    pub fn text_range(&self) -> TextRange {
        match self {
            Self::Node(node) => node.text_range(),
            Self::Token(token) => token.text_range(),
        }
    }
}

/// Walks a subtree tracking absolute offsets, skipping any element whose
/// flags lack `mask` and reporting the rest to `found`.
struct OverlayCollector<F> {
    mask: NodeFlags,
    offset: TextSize,
    found: F,
}

impl<F: FnMut(TextSize, GreenRef<'_>)> OverlayCollector<F> {
    fn new(mask: NodeFlags, offset: TextSize, found: F) -> Self {
        Self { mask, offset, found }
    }

    fn enter(&mut self, element: GreenRef<'_>) -> bool {
        if element.flags().contains(self.mask) {
            (self.found)(self.offset, element);
            true
        } else {
            self.offset += element.full_width();
            false
        }
    }
}

impl<F: FnMut(TextSize, GreenRef<'_>)> GreenWalker for OverlayCollector<F> {
    fn visit_node(&mut self, node: &GreenNode) {
        if self.enter(GreenRef::Node(node)) {
            walk_node(self, node);
        }
    }

    fn visit_token(&mut self, token: &GreenToken) {
        if !self.enter(GreenRef::Token(token)) {
            return;
        }
        for trivia in token.leading_trivia() {
            self.visit_trivia(trivia);
        }
        self.offset += TextSize::of(token.text());
        for trivia in token.trailing_trivia() {
            self.visit_trivia(trivia);
        }
    }

    fn visit_trivia(&mut self, trivia: &GreenTrivia) {
        if self.enter(GreenRef::Trivia(trivia)) {
            self.offset += trivia.full_width();
        }
    }
}

#[cfg(test)]
mod tests {
    use verdant_errors::DiagnosticCode;

    use super::*;
    use crate::SyntaxAnnotation;
    use crate::SyntaxKind::*;

    fn ws(text: &str) -> GreenTrivia {
        GreenTrivia::new(WHITESPACE_TRIVIA, text)
    }

    fn range(start: u32, end: u32) -> TextRange {
        TextRange::new(start.into(), end.into())
    }

    fn diagnostic(code: u16, offset: u32, width: u32) -> SyntaxDiagnostic {
        SyntaxDiagnostic::error(DiagnosticCode(code), TextSize::new(offset), TextSize::new(width))
    }

    /// `val x = 1` preceded by a comment line.
    fn decl() -> GreenNode {
        let comment = GreenTrivia::new(SINGLE_LINE_COMMENT_TRIVIA, "// c");
        let newline = GreenTrivia::new(END_OF_LINE_TRIVIA, "\n");
        let val = GreenToken::with_trivia(VAL_KW, "val", vec![comment, newline], vec![ws(" ")]);
        let name = GreenToken::with_trivia(IDENT, "x", Vec::new(), vec![ws(" ")]);
        let eq = GreenToken::with_trivia(EQ, "=", Vec::new(), vec![ws(" ")]);
        let value = GreenNode::new(LITERAL, vec![GreenToken::new(NUMBER, "1").into()]);
        GreenNode::new(VAL_DECL, vec![val.into(), name.into(), eq.into(), value.into()])
    }

    #[test]
    fn children_have_absolute_ranges() {
        let root = SyntaxNode::new_root(decl());
        assert_eq!(root.text_range(), range(0, 14));
        assert_eq!(root.trimmed_range(), range(5, 14));

        let ranges: Vec<_> = root
            .children_with_tokens()
            .map(|child| (child.kind(), child.text_range()))
            .collect();
        assert_eq!(
            ranges,
            [
                (VAL_KW, range(0, 9)),
                (IDENT, range(9, 11)),
                (EQ, range(11, 13)),
                (LITERAL, range(13, 14)),
            ]
        );

        let literal = root.children().next().unwrap();
        assert_eq!(literal.kind(), LITERAL);
        assert_eq!(literal.index(), 3);
        assert_eq!(literal.parent(), Some(&root));
        assert_eq!(literal.ancestors().count(), 2);
    }

    #[test]
    fn trivia_positions() {
        let root = SyntaxNode::new_root(decl());
        let val = root.children_with_tokens().next().and_then(NodeOrToken::into_token).unwrap();

        assert_eq!(val.trimmed_range(), range(5, 8));
        let leading: Vec<_> =
            val.leading_trivia().map(|t| (t.kind(), t.index(), t.text_range())).collect();
        assert_eq!(
            leading,
            [
                (SINGLE_LINE_COMMENT_TRIVIA, 0, range(0, 4)),
                (END_OF_LINE_TRIVIA, 1, range(4, 5)),
            ]
        );
        let trailing = val.trailing_trivia().next().unwrap();
        assert_eq!(trailing.text_range(), range(8, 9));
        assert_eq!(trailing.token(), Some(&val));
    }

    #[test]
    fn detached_trivia() {
        let trivia = SyntaxTrivia::from(ws("  "));
        assert_eq!(trivia.token(), None);
        assert_eq!(trivia.index(), 0);
        assert_eq!(trivia.text_range(), range(0, 2));
    }

    #[test]
    #[should_panic(expected = "create_red is not supported for trivia")]
    fn create_red_rejects_trivia() {
        let trivia: GreenElement = ws(" ").into();
        let _ = trivia.create_red(None, TextSize::new(0), 0);
    }

    #[test]
    fn collects_diagnostics_with_absolute_ranges() {
        let tree = decl();
        let GreenElement::Token(name) = &tree.children()[1] else { unreachable!() };
        let name = name.with_diagnostics(vec![diagnostic(1, 0, 1)]);
        let newline =
            GreenTrivia::new(END_OF_LINE_TRIVIA, "\n").with_diagnostics(vec![diagnostic(2, 0, 1)]);
        let GreenElement::Token(val) = &tree.children()[0] else { unreachable!() };
        let val = GreenToken::with_trivia(
            VAL_KW,
            "val",
            vec![val.leading_trivia()[0].clone(), newline],
            val.trailing_trivia().to_vec(),
        );
        let tree = tree
            .replace_child(0, val)
            .replace_child(1, name)
            .with_diagnostics(vec![diagnostic(3, 5, 9)]);

        let found: Vec<_> = SyntaxNode::new_root(tree)
            .diagnostics()
            .into_iter()
            .map(|(range, diagnostic)| (diagnostic.code().0, range))
            .collect();
        assert_eq!(
            found,
            [
                (3, range(5, 14)),
                (2, range(4, 5)),
                (1, range(9, 10)),
            ]
        );
    }

    #[test]
    fn annotated_elements_are_found_by_kind() {
        let tree = decl();
        let marker = SyntaxAnnotation::with_kind("marker");
        let literal = tree.children()[3].with_annotations(vec![marker.clone()]);
        let eq = tree.children()[2].with_annotations(vec![SyntaxAnnotation::with_kind("other")]);
        let tree = tree.replace_child(3, literal).replace_child(2, eq);
        let root = SyntaxNode::new_root(tree);

        let found = root.annotated_elements("marker");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].0, range(13, 14));
        assert!(found[0].1.has_annotation(&marker));
        assert!(root.annotated_elements("missing").is_empty());
    }

    #[test]
    fn clean_trees_report_nothing() {
        let root = SyntaxNode::new_root(decl());
        assert!(root.diagnostics().is_empty());
        assert!(root.annotated_elements("marker").is_empty());
    }
}
