use std::fmt;

use text_size::TextSize;
use triomphe::Arc;
use verdant_errors::SyntaxDiagnostic;

use super::{Green, GreenElement, GreenHead, GreenTrivia, total_width};
use crate::wire::{ObjectReader, ObjectWriter, ReadError, ReaderRegistry, RecordHeader, WriteError};
use crate::{
    GreenVisitor, GreenWalker, NodeFlags, Overlay, SyntaxAnnotation, SyntaxKind, SyntaxSet,
};

/// A terminal with its own text and the trivia attached on either side.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct GreenToken {
    data: Arc<TokenData>,
}

#[derive(PartialEq, Eq, Hash)]
struct TokenData {
    head: GreenHead,
    text: Box<str>,
    leading: Box<[GreenTrivia]>,
    trailing: Box<[GreenTrivia]>,
    leading_width: TextSize,
    trailing_width: TextSize,
}

impl GreenToken {
    pub fn new(kind: SyntaxKind, text: &str) -> Self {
        Self::with_trivia(kind, text, Vec::new(), Vec::new())
    }

    /// # Panics
    ///
    /// Panics if `kind` is not a token kind.
    pub fn with_trivia(
        kind: SyntaxKind,
        text: &str,
        leading: Vec<GreenTrivia>,
        trailing: Vec<GreenTrivia>,
    ) -> Self {
        Self::from_parts(
            kind,
            NodeFlags::empty(),
            text.into(),
            leading.into(),
            trailing.into(),
            Overlay::default(),
        )
    }

    /// A zero-width token the parser expected but did not find.
    pub fn missing(kind: SyntaxKind) -> Self {
        Self::from_parts(
            kind,
            NodeFlags::IS_MISSING,
            Box::default(),
            Box::default(),
            Box::default(),
            Overlay::default(),
        )
    }

    /// # Panics
    ///
    /// Panics if `kind` is not a token kind or the full width overflows.
    fn from_parts(
        kind: SyntaxKind,
        intrinsic: NodeFlags,
        text: Box<str>,
        leading: Box<[GreenTrivia]>,
        trailing: Box<[GreenTrivia]>,
        overlay: Overlay,
    ) -> Self {
        Self::try_from_parts(kind, intrinsic, text, leading, trailing, overlay)
            .unwrap_or_else(|| panic!("width of {kind:?} does not fit in a u32"))
    }

    /// Like `from_parts`, but returns `None` when the full width overflows.
    fn try_from_parts(
        kind: SyntaxKind,
        intrinsic: NodeFlags,
        text: Box<str>,
        leading: Box<[GreenTrivia]>,
        trailing: Box<[GreenTrivia]>,
        overlay: Overlay,
    ) -> Option<Self> {
        assert!(kind.is_token(), "{kind:?} is not a token kind");

        let mut flags = intrinsic & NodeFlags::INTRINSIC;
        for trivia in leading.iter().chain(trailing.iter()) {
            flags |= trivia.flags().inherited();
        }
        let leading_width = total_width(leading.iter())?;
        let trailing_width = total_width(trailing.iter())?;
        let full_width =
            leading_width.checked_add(TextSize::of(&*text))?.checked_add(trailing_width)?;

        let head = GreenHead::new(kind, flags, full_width, overlay);
        let data = TokenData { head, text, leading, trailing, leading_width, trailing_width };
        Some(Self { data: Arc::new(data) })
    }

    /// The token's own text, without trivia.
    pub fn text(&self) -> &str {
        &self.data.text
    }

    pub fn leading_trivia(&self) -> &[GreenTrivia] {
        &self.data.leading
    }

    pub fn trailing_trivia(&self) -> &[GreenTrivia] {
        &self.data.trailing
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.data, &other.data)
    }

    fn rebuild(&self, overlay: Overlay) -> Self {
        Self::from_parts(
            self.kind(),
            self.flags(),
            self.text().into(),
            self.data.leading.clone(),
            self.data.trailing.clone(),
            overlay,
        )
    }

    pub(crate) fn register(registry: &mut ReaderRegistry) {
        for kind in SyntaxSet::TOKENS.iter() {
            registry.register(kind, Self::read);
        }
    }

    fn read(reader: &mut ObjectReader<'_>, header: RecordHeader) -> Result<GreenElement, ReadError> {
        let RecordHeader { kind, flags, overlay } = header;
        if !kind.is_token() {
            return Err(ReadError::UnexpectedShape { expected: "token", found: kind });
        }

        let text = reader.read_str()?;
        let leading = read_trivia_list(reader)?;
        let trailing = read_trivia_list(reader)?;
        Self::try_from_parts(kind, flags, text, leading, trailing, overlay)
            .map(GreenElement::from)
            .ok_or(ReadError::WidthOverflow(kind))
    }
}

fn read_trivia_list(reader: &mut ObjectReader<'_>) -> Result<Box<[GreenTrivia]>, ReadError> {
    let len = reader.read_len()?;
    (0..len).map(|_| reader.read_trivia()).collect()
}

fn write_trivia_list(
    writer: &mut ObjectWriter<'_>,
    trivia: &[GreenTrivia],
) -> Result<(), WriteError> {
    writer.write_len(trivia.len())?;
    trivia.iter().try_for_each(|trivia| writer.write_green(trivia))
}

impl Green for GreenToken {
    fn head(&self) -> &GreenHead {
        &self.data.head
    }

    fn leading_trivia_width(&self) -> TextSize {
        self.data.leading_width
    }

    fn trailing_trivia_width(&self) -> TextSize {
        self.data.trailing_width
    }

    fn slot(&self, index: usize) -> Option<&GreenElement> {
        unreachable!("tokens have no child slots (requested slot {index} of {:?})", self.kind())
    }

    fn with_diagnostics(&self, diagnostics: Vec<SyntaxDiagnostic>) -> Self {
        self.rebuild(self.overlay().replace_diagnostics(diagnostics))
    }

    fn with_annotations(&self, annotations: Vec<SyntaxAnnotation>) -> Self {
        self.rebuild(self.overlay().replace_annotations(annotations))
    }

    fn is_equivalent_to(&self, other: &Self) -> bool {
        fn same_trivia(lhs: &[GreenTrivia], rhs: &[GreenTrivia]) -> bool {
            lhs.len() == rhs.len() && lhs.iter().zip(rhs).all(|(l, r)| l.is_equivalent_to(r))
        }

        self.head().is_equivalent_to(other.head())
            && self.text() == other.text()
            && same_trivia(self.leading_trivia(), other.leading_trivia())
            && same_trivia(self.trailing_trivia(), other.trailing_trivia())
    }

    fn write_text(&self, sink: &mut dyn fmt::Write, leading: bool, trailing: bool) -> fmt::Result {
        if leading {
            self.leading_trivia().iter().try_for_each(|trivia| sink.write_str(trivia.text()))?;
        }
        sink.write_str(self.text())?;
        if trailing {
            self.trailing_trivia().iter().try_for_each(|trivia| sink.write_str(trivia.text()))?;
        }
        Ok(())
    }

    fn accept<V: GreenVisitor + ?Sized>(&self, visitor: &mut V) -> V::Output {
        visitor.visit_token(self)
    }

    fn accept_walker<W: GreenWalker + ?Sized>(&self, walker: &mut W) {
        walker.visit_token(self);
    }

    fn write_payload(&self, writer: &mut ObjectWriter<'_>) -> Result<(), WriteError> {
        writer.write_str(self.text())?;
        write_trivia_list(writer, self.leading_trivia())?;
        write_trivia_list(writer, self.trailing_trivia())
    }
}

impl fmt::Display for GreenToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

impl fmt::Debug for GreenToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GreenToken")
            .field("kind", &self.kind())
            .field("text", &self.text())
            .field("leading", &self.leading_trivia())
            .field("trailing", &self.trailing_trivia())
            .field("flags", &self.flags())
            .finish_non_exhaustive()
    }
}
