use std::fmt;

use text_size::TextSize;
use triomphe::ThinArc;
use verdant_errors::SyntaxDiagnostic;

use super::{Green, GreenElement, GreenHead, GreenRef, GreenToken, total_width};
use crate::wire::{ObjectReader, ObjectWriter, ReadError, ReaderRegistry, RecordHeader, WriteError};
use crate::{
    GreenVisitor, GreenWalker, NodeFlags, Overlay, SyntaxAnnotation, SyntaxKind, SyntaxSet,
};

/// An interior node: a kind plus an ordered run of child nodes and tokens.
///
/// Trivia never appears directly among a node's children; it hangs off tokens.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct GreenNode {
    data: ThinArc<GreenHead, GreenElement>,
}

impl GreenNode {
    /// # Panics
    ///
    /// Panics if `kind` is not a node kind or any child is trivia.
    pub fn new(kind: SyntaxKind, children: Vec<GreenElement>) -> Self {
        Self::from_parts(kind, NodeFlags::empty(), children, Overlay::default())
    }

    /// # Panics
    ///
    /// Panics on a non-node kind, a trivia child, or a full width that
    /// overflows.
    fn from_parts(
        kind: SyntaxKind,
        intrinsic: NodeFlags,
        children: Vec<GreenElement>,
        overlay: Overlay,
    ) -> Self {
        Self::try_from_parts(kind, intrinsic, children, overlay)
            .unwrap_or_else(|| panic!("width of {kind:?} does not fit in a u32"))
    }

    /// Like `from_parts`, but returns `None` when the full width overflows.
    fn try_from_parts(
        kind: SyntaxKind,
        intrinsic: NodeFlags,
        children: Vec<GreenElement>,
        overlay: Overlay,
    ) -> Option<Self> {
        assert!(kind.is_node(), "{kind:?} is not a node kind");

        let mut flags = intrinsic & NodeFlags::INTRINSIC;
        for child in &children {
            assert!(
                !matches!(child, GreenElement::Trivia(_)),
                "trivia cannot be a direct child of {kind:?}"
            );
            flags |= child.flags().inherited();
        }
        let full_width = total_width(&children)?;

        let head = GreenHead::new(kind, flags, full_width, overlay);
        Some(Self { data: ThinArc::from_header_and_iter(head, children.into_iter()) })
    }

    pub fn children(&self) -> &[GreenElement] {
        &self.data.slice
    }

    /// Returns a copy of `self` with the child at `index` swapped for `child`.
    /// All other children are shared with `self`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds or `child` is trivia.
    #[must_use]
    pub fn replace_child(&self, index: usize, child: impl Into<GreenElement>) -> Self {
        let mut children = self.children().to_vec();
        children[index] = child.into();
        Self::from_parts(self.kind(), self.flags(), children, self.overlay().clone())
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.data.ptr(), other.data.ptr())
    }

    /// The first token that spans any text, searching depth first.
    pub fn first_terminal(&self) -> Option<&GreenToken> {
        let child = self.children().iter().find(|child| child.full_width() > TextSize::new(0))?;
        terminal(child, Self::first_terminal)
    }

    /// The last token that spans any text, searching depth first.
    pub fn last_terminal(&self) -> Option<&GreenToken> {
        let child =
            self.children().iter().rev().find(|child| child.full_width() > TextSize::new(0))?;
        terminal(child, Self::last_terminal)
    }

    fn rebuild(&self, overlay: Overlay) -> Self {
        Self::from_parts(self.kind(), self.flags(), self.children().to_vec(), overlay)
    }

    pub(crate) fn register(registry: &mut ReaderRegistry) {
        for kind in SyntaxSet::NODES.iter() {
            registry.register(kind, Self::read);
        }
    }

    fn read(reader: &mut ObjectReader<'_>, header: RecordHeader) -> Result<GreenElement, ReadError> {
        let RecordHeader { kind, flags, overlay } = header;
        if !kind.is_node() {
            return Err(ReadError::UnexpectedShape { expected: "node", found: kind });
        }

        let len = reader.read_len()?;
        let children = (0..len)
            .map(|_| reader.read_element_of(&SyntaxSet::CHILDREN, "node or token"))
            .collect::<Result<Vec<_>, _>>()?;
        Self::try_from_parts(kind, flags, children, overlay)
            .map(GreenElement::from)
            .ok_or(ReadError::WidthOverflow(kind))
    }
}

fn terminal<'a>(
    child: &'a GreenElement,
    descend: fn(&'a GreenNode) -> Option<&'a GreenToken>,
) -> Option<&'a GreenToken> {
    match child {
        GreenElement::Node(node) => descend(node),
        GreenElement::Token(token) => Some(token),
        GreenElement::Trivia(_) => None,
    }
}

impl Green for GreenNode {
    fn head(&self) -> &GreenHead {
        &self.data.header.header
    }

    fn leading_trivia_width(&self) -> TextSize {
        self.first_terminal().map_or(TextSize::new(0), Green::leading_trivia_width)
    }

    fn trailing_trivia_width(&self) -> TextSize {
        self.last_terminal().map_or(TextSize::new(0), Green::trailing_trivia_width)
    }

    fn slot_count(&self) -> usize {
        self.children().len()
    }

    fn slot(&self, index: usize) -> Option<&GreenElement> {
        self.children().get(index)
    }

    fn with_diagnostics(&self, diagnostics: Vec<SyntaxDiagnostic>) -> Self {
        self.rebuild(self.overlay().replace_diagnostics(diagnostics))
    }

    fn with_annotations(&self, annotations: Vec<SyntaxAnnotation>) -> Self {
        self.rebuild(self.overlay().replace_annotations(annotations))
    }

    fn is_equivalent_to(&self, other: &Self) -> bool {
        if self.ptr_eq(other) {
            return true;
        }
        self.head().is_equivalent_to(other.head())
            && self.slot_count() == other.slot_count()
            && self.children().iter().zip(other.children()).all(|(l, r)| l.is_equivalent_to(r))
    }

    fn write_text(&self, sink: &mut dyn fmt::Write, leading: bool, trailing: bool) -> fmt::Result {
        let spans_text = |child: &GreenElement| child.full_width() > TextSize::new(0);
        let first = self.children().iter().position(spans_text);
        let last = self.children().iter().rposition(spans_text);

        for (index, child) in self.children().iter().enumerate() {
            let leading = leading || Some(index) != first;
            let trailing = trailing || Some(index) != last;
            child.write_text(sink, leading, trailing)?;
        }
        Ok(())
    }

    fn accept<V: GreenVisitor + ?Sized>(&self, visitor: &mut V) -> V::Output {
        visitor.visit_node(self)
    }

    fn accept_walker<W: GreenWalker + ?Sized>(&self, walker: &mut W) {
        walker.visit_node(self);
    }

    fn write_payload(&self, writer: &mut ObjectWriter<'_>) -> Result<(), WriteError> {
        writer.write_len(self.children().len())?;
        self.children().iter().try_for_each(|child| writer.write_green(child))
    }
}

impl fmt::Display for GreenNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_text(f, false, false)
    }
}

impl fmt::Debug for GreenNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GreenNode")
            .field("kind", &self.kind())
            .field("full_width", &self.full_width())
            .field("flags", &self.flags())
            .field("children", &self.children().iter().map(GreenRef::from).collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}
