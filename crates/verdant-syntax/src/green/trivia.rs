//! Trivia leaves: whitespace, newlines, comments and skipped text.

use std::fmt;

use text_size::TextSize;
use triomphe::Arc;
use verdant_errors::SyntaxDiagnostic;

use super::{Green, GreenElement, GreenHead};
use crate::wire::{ObjectReader, ObjectWriter, ReadError, ReaderRegistry, RecordHeader, WriteError};
use crate::{
    GreenVisitor, GreenWalker, NodeFlags, Overlay, SyntaxAnnotation, SyntaxKind, SyntaxSet,
};

/// A run of raw text with no children of its own.
///
/// Trivia is never decorated with trivia, so its width always equals its full
/// width, which always equals the length of its text.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct GreenTrivia {
    data: Arc<TriviaData>,
}

#[derive(PartialEq, Eq, Hash)]
struct TriviaData {
    head: GreenHead,
    text: Box<str>,
}

impl GreenTrivia {
    /// # Panics
    ///
    /// Panics if `kind` is not a trivia kind.
    pub fn new(kind: SyntaxKind, text: &str) -> Self {
        Self::with_overlay(kind, text, Overlay::default())
    }

    pub fn with_overlay(kind: SyntaxKind, text: impl Into<Box<str>>, overlay: Overlay) -> Self {
        Self::from_parts(kind, text.into(), overlay)
    }

    fn from_parts(kind: SyntaxKind, text: Box<str>, overlay: Overlay) -> Self {
        assert!(kind.is_trivia(), "{kind:?} is not a trivia kind");
        let full_width = TextSize::of(&*text);
        let head = GreenHead::new(kind, Self::kind_flags(kind), full_width, overlay);
        Self { data: Arc::new(TriviaData { head, text }) }
    }

    /// Flags implied by the kind alone. Preprocessing messages count as skipped
    /// text whatever they contain.
    fn kind_flags(kind: SyntaxKind) -> NodeFlags {
        if kind == SyntaxKind::PREPROCESSING_MESSAGE_TRIVIA {
            NodeFlags::CONTAINS_SKIPPED_TEXT
        } else {
            NodeFlags::empty()
        }
    }

    pub fn text(&self) -> &str {
        &self.data.text
    }

    /// Returns `true` if both handles point at the same allocation.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.data, &other.data)
    }

    pub(crate) fn register(registry: &mut ReaderRegistry) {
        for kind in SyntaxSet::TRIVIA.iter() {
            registry.register(kind, Self::read);
        }
    }

    /// Width is recomputed from the decoded text, never read from the stream.
    fn read(reader: &mut ObjectReader<'_>, header: RecordHeader) -> Result<GreenElement, ReadError> {
        let RecordHeader { kind, flags: _, overlay } = header;
        if !kind.is_trivia() {
            return Err(ReadError::UnexpectedShape { expected: "trivia", found: kind });
        }

        let text = reader.read_str()?;
        let trivia = if overlay.is_empty() {
            reader.trivia_cache().trivia(kind, &text)
        } else {
            Self::from_parts(kind, text, overlay)
        };
        Ok(trivia.into())
    }
}

impl Green for GreenTrivia {
    fn head(&self) -> &GreenHead {
        &self.data.head
    }

    fn width(&self) -> TextSize {
        debug_assert_eq!(self.full_width(), TextSize::of(self.text()));
        self.full_width()
    }

    fn slot(&self, index: usize) -> Option<&GreenElement> {
        unreachable!("trivia has no child slots (requested slot {index} of {:?})", self.kind())
    }

    fn with_diagnostics(&self, diagnostics: Vec<SyntaxDiagnostic>) -> Self {
        let overlay = self.overlay().replace_diagnostics(diagnostics);
        Self::from_parts(self.kind(), self.text().into(), overlay)
    }

    fn with_annotations(&self, annotations: Vec<SyntaxAnnotation>) -> Self {
        let overlay = self.overlay().replace_annotations(annotations);
        Self::from_parts(self.kind(), self.text().into(), overlay)
    }

    fn is_equivalent_to(&self, other: &Self) -> bool {
        self.head().is_equivalent_to(other.head()) && self.text() == other.text()
    }

    /// Trivia has no trivia of its own, so both flags are ignored.
    fn write_text(
        &self,
        sink: &mut dyn fmt::Write,
        _leading: bool,
        _trailing: bool,
    ) -> fmt::Result {
        sink.write_str(self.text())
    }

    fn to_full_string(&self) -> String {
        self.text().to_owned()
    }

    fn accept<V: GreenVisitor + ?Sized>(&self, visitor: &mut V) -> V::Output {
        visitor.visit_trivia(self)
    }

    fn accept_walker<W: GreenWalker + ?Sized>(&self, walker: &mut W) {
        walker.visit_trivia(self);
    }

    fn write_payload(&self, writer: &mut ObjectWriter<'_>) -> Result<(), WriteError> {
        writer.write_str(self.text())
    }
}

impl fmt::Display for GreenTrivia {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

impl fmt::Debug for GreenTrivia {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GreenTrivia")
            .field("kind", &self.kind())
            .field("text", &self.text())
            .field("flags", &self.flags())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use verdant_errors::DiagnosticCode;

    use super::*;
    use crate::SyntaxKind::*;

    fn diagnostic(code: u16) -> SyntaxDiagnostic {
        SyntaxDiagnostic::error(DiagnosticCode(code), TextSize::new(0), TextSize::new(1))
    }

    #[test]
    fn whitespace() {
        let trivia = GreenTrivia::new(WHITESPACE_TRIVIA, "   ");

        assert_eq!(trivia.full_width(), TextSize::new(3));
        assert_eq!(trivia.width(), TextSize::new(3));
        assert_eq!(trivia.leading_trivia_width(), TextSize::new(0));
        assert_eq!(trivia.trailing_trivia_width(), TextSize::new(0));
        assert!(!trivia.contains_skipped_text());
        assert_eq!(trivia.to_string(), "   ");
        assert_eq!(trivia.to_full_string(), "   ");
        assert_eq!(trivia.slot_count(), 0);
    }

    #[test]
    fn preprocessing_message_is_skipped_text() {
        let trivia = GreenTrivia::new(PREPROCESSING_MESSAGE_TRIVIA, "#error foo");
        assert!(trivia.contains_skipped_text());
        assert_eq!(trivia.full_width(), TextSize::new(10));

        let empty = GreenTrivia::new(PREPROCESSING_MESSAGE_TRIVIA, "");
        assert!(empty.contains_skipped_text());
        assert_eq!(empty.full_width(), TextSize::new(0));
    }

    #[test]
    fn classification_ignores_content() {
        for kind in SyntaxSet::TRIVIA.iter() {
            let trivia = GreenTrivia::new(kind, "#error looks skipped");
            assert_eq!(trivia.contains_skipped_text(), kind == PREPROCESSING_MESSAGE_TRIVIA);
        }
        let garbage = GreenTrivia::new(WHITESPACE_TRIVIA, "not whitespace \u{0}");
        assert_eq!(garbage.text(), "not whitespace \u{0}");
        assert!(!garbage.contains_skipped_text());
    }

    #[test]
    fn width_counts_utf8_bytes() {
        let trivia = GreenTrivia::new(SINGLE_LINE_COMMENT_TRIVIA, "// héllo");
        assert_eq!(trivia.full_width(), TextSize::new(9));
    }

    #[test]
    fn write_text_ignores_trivia_flags() {
        let trivia = GreenTrivia::new(SINGLE_LINE_COMMENT_TRIVIA, "// note");
        for (leading, trailing) in [(false, false), (true, false), (false, true), (true, true)] {
            let mut text = String::new();
            trivia.write_text(&mut text, leading, trailing).unwrap();
            assert_eq!(text, "// note");
        }
    }

    #[test]
    fn diagnostics_do_not_touch_the_original() {
        let original = GreenTrivia::new(WHITESPACE_TRIVIA, " ");
        let annotated = original.with_diagnostics(vec![diagnostic(1)]);

        assert!(original.diagnostics().is_empty());
        assert!(!original.contains_diagnostics());
        assert_eq!(annotated.diagnostics(), [diagnostic(1)]);
        assert!(annotated.contains_diagnostics());
        assert_eq!(annotated.kind(), original.kind());
        assert_eq!(annotated.text(), original.text());
    }

    #[test]
    fn overlays_keep_order_and_duplicates() {
        let trivia = GreenTrivia::new(WHITESPACE_TRIVIA, " ")
            .with_diagnostics(vec![diagnostic(3), diagnostic(1), diagnostic(3)]);
        let codes: Vec<_> = trivia.diagnostics().iter().map(|it| it.code().0).collect();
        assert_eq!(codes, [3, 1, 3]);
    }

    #[test]
    fn annotations_and_diagnostics_are_independent() {
        let marker = SyntaxAnnotation::with_kind("marker");
        let trivia = GreenTrivia::new(WHITESPACE_TRIVIA, " ")
            .with_annotations(vec![marker.clone()])
            .with_diagnostics(vec![diagnostic(2)]);

        assert!(trivia.has_annotation(&marker));
        assert_eq!(trivia.annotations_of_kind("marker").count(), 1);
        assert_eq!(trivia.annotations_of_kind("other").count(), 0);
        assert_eq!(trivia.flags(), NodeFlags::METADATA);

        let cleared = trivia.with_annotations(Vec::new());
        assert!(!cleared.contains_annotations());
        assert_eq!(cleared.diagnostics(), [diagnostic(2)]);
    }

    #[test]
    fn equivalence_ignores_metadata() {
        let trivia = GreenTrivia::new(END_OF_LINE_TRIVIA, "\n");
        let first = trivia.with_diagnostics(vec![diagnostic(1)]);
        let second = trivia.with_diagnostics(vec![diagnostic(2)]);
        let annotated = trivia.with_annotations(vec![SyntaxAnnotation::new()]);

        assert!(first.is_equivalent_to(&second));
        assert!(first.is_equivalent_to(&trivia));
        assert!(trivia.is_equivalent_to(&annotated));
        assert_ne!(first, second);
    }

    #[test]
    fn equivalence_compares_kind_and_text() {
        let space = GreenTrivia::new(WHITESPACE_TRIVIA, " ");
        assert!(!space.is_equivalent_to(&GreenTrivia::new(WHITESPACE_TRIVIA, "  ")));
        assert!(!space.is_equivalent_to(&GreenTrivia::new(DISABLED_TEXT_TRIVIA, " ")));
    }

    #[test]
    #[should_panic(expected = "trivia has no child slots")]
    fn slot_is_unreachable() {
        let trivia = GreenTrivia::new(WHITESPACE_TRIVIA, " ");
        let _ = trivia.slot(0);
    }

    #[test]
    fn slot_is_unreachable_for_every_index() {
        let trivia = GreenTrivia::new(MULTI_LINE_COMMENT_TRIVIA, "/* */");
        for index in [0, 1, 7, usize::MAX] {
            let result = std::panic::catch_unwind(|| {
                let _ = trivia.slot(index);
            });
            assert!(result.is_err(), "slot {index} should panic");
        }
    }

    #[test]
    #[should_panic(expected = "is not a trivia kind")]
    fn rejects_non_trivia_kinds() {
        let _ = GreenTrivia::new(IDENT, "x");
    }
}
