//! Immutable, position-independent syntax elements.
//!
//! A green element knows its kind, width, flags and content, but not where it
//! sits in a file or who its parent is. Elements never change after
//! construction; the `with_*` methods build a new element that shares every
//! unrelated subtree with the old one.

mod cache;
mod element;
mod node;
mod token;
mod trivia;

use std::fmt;

use text_size::TextSize;
use verdant_errors::SyntaxDiagnostic;

pub use self::cache::TriviaCache;
pub use self::element::{GreenElement, GreenRef};
pub use self::node::GreenNode;
pub use self::token::GreenToken;
pub use self::trivia::GreenTrivia;
use crate::wire::{ObjectWriter, WriteError};
use crate::{GreenVisitor, GreenWalker, NodeFlags, Overlay, SyntaxAnnotation, SyntaxKind};

/// The fields every green element shares.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct GreenHead {
    kind: SyntaxKind,
    flags: NodeFlags,
    full_width: TextSize,
    overlay: Overlay,
}

impl GreenHead {
    /// `flags` are the element's own and inherited bits; the overlay's
    /// presence bits are added here.
    pub(crate) fn new(
        kind: SyntaxKind,
        flags: NodeFlags,
        full_width: TextSize,
        overlay: Overlay,
    ) -> Self {
        Self { kind, flags: flags | overlay.flags(), full_width, overlay }
    }

    pub fn kind(&self) -> SyntaxKind {
        self.kind
    }

    pub fn flags(&self) -> NodeFlags {
        self.flags
    }

    pub fn full_width(&self) -> TextSize {
        self.full_width
    }

    pub fn overlay(&self) -> &Overlay {
        &self.overlay
    }

    /// Kind and structural flags; overlays are ignored.
    pub fn is_equivalent_to(&self, other: &Self) -> bool {
        self.kind == other.kind && self.flags.structural() == other.flags.structural()
    }
}

/// Sum of full widths, or `None` once it no longer fits in a `TextSize`.
pub(crate) fn total_width<'a, G: Green + 'a>(
    elements: impl IntoIterator<Item = &'a G>,
) -> Option<TextSize> {
    elements
        .into_iter()
        .try_fold(TextSize::new(0), |total, element| total.checked_add(element.full_width()))
}

/// Behaviour shared by every green element shape.
///
/// Shapes supply their head, children, text, overlay replacement and wire
/// payload; widths, flags and overlay queries are derived from those.
pub trait Green: Sized {
    fn head(&self) -> &GreenHead;

    fn kind(&self) -> SyntaxKind {
        self.head().kind()
    }

    fn flags(&self) -> NodeFlags {
        self.head().flags()
    }

    /// Width of everything the element spans, trivia included.
    fn full_width(&self) -> TextSize {
        self.head().full_width()
    }

    fn leading_trivia_width(&self) -> TextSize {
        TextSize::new(0)
    }

    fn trailing_trivia_width(&self) -> TextSize {
        TextSize::new(0)
    }

    /// Width without the outermost leading and trailing trivia.
    fn width(&self) -> TextSize {
        self.full_width() - self.leading_trivia_width() - self.trailing_trivia_width()
    }

    fn overlay(&self) -> &Overlay {
        self.head().overlay()
    }

    fn diagnostics(&self) -> &[SyntaxDiagnostic] {
        self.overlay().diagnostics()
    }

    fn annotations(&self) -> &[SyntaxAnnotation] {
        self.overlay().annotations()
    }

    fn is_missing(&self) -> bool {
        self.flags().contains(NodeFlags::IS_MISSING)
    }

    fn contains_diagnostics(&self) -> bool {
        self.flags().contains(NodeFlags::CONTAINS_DIAGNOSTICS)
    }

    fn contains_annotations(&self) -> bool {
        self.flags().contains(NodeFlags::CONTAINS_ANNOTATIONS)
    }

    fn contains_skipped_text(&self) -> bool {
        self.flags().contains(NodeFlags::CONTAINS_SKIPPED_TEXT)
    }

    fn has_annotation(&self, annotation: &SyntaxAnnotation) -> bool {
        self.annotations().contains(annotation)
    }

    fn annotations_of_kind<'a>(
        &'a self,
        kind: &'a str,
    ) -> impl Iterator<Item = &'a SyntaxAnnotation> + 'a {
        self.annotations().iter().filter(move |annotation| annotation.kind() == Some(kind))
    }

    fn slot_count(&self) -> usize {
        0
    }

    /// Returns the child at `index`.
    ///
    /// # Panics
    ///
    /// Leaves have no slots and panic for every index.
    fn slot(&self, index: usize) -> Option<&GreenElement>;

    /// Returns a copy of `self` carrying `diagnostics` instead of its current ones.
    #[must_use]
    fn with_diagnostics(&self, diagnostics: Vec<SyntaxDiagnostic>) -> Self;

    /// Returns a copy of `self` carrying `annotations` instead of its current ones.
    #[must_use]
    fn with_annotations(&self, annotations: Vec<SyntaxAnnotation>) -> Self;

    /// Structural equality: kind, structural flags and content, never overlays.
    fn is_equivalent_to(&self, other: &Self) -> bool;

    /// Writes the source text, optionally without the outermost leading and
    /// trailing trivia.
    fn write_text(&self, sink: &mut dyn fmt::Write, leading: bool, trailing: bool)
    -> fmt::Result;

    fn to_full_string(&self) -> String {
        let mut text = String::with_capacity(usize::from(self.full_width()));
        self.write_text(&mut text, true, true).expect("writing into a String cannot fail");
        text
    }

    fn accept<V: GreenVisitor + ?Sized>(&self, visitor: &mut V) -> V::Output;

    fn accept_walker<W: GreenWalker + ?Sized>(&self, walker: &mut W);

    /// Writes the shape-specific part of the record, after the shared head.
    fn write_payload(&self, writer: &mut ObjectWriter<'_>) -> Result<(), WriteError>;

    /// Writes the full record: head, overlay, then payload.
    fn write_to(&self, writer: &mut ObjectWriter<'_>) -> Result<(), WriteError> {
        writer.write_head(self.head())?;
        self.write_payload(writer)
    }
}
