use std::fmt;

use text_size::TextSize;
use verdant_errors::SyntaxDiagnostic;

use super::{Green, GreenHead, GreenNode, GreenToken, GreenTrivia};
use crate::wire::{ObjectWriter, WriteError};
use crate::{GreenVisitor, GreenWalker, NodeFlags, SyntaxAnnotation, SyntaxKind};

/// Any green element, owned.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum GreenElement {
    Node(GreenNode),
    Token(GreenToken),
    Trivia(GreenTrivia),
}

impl GreenElement {
    pub fn as_node(&self) -> Option<&GreenNode> {
        match self {
            Self::Node(node) => Some(node),
            _ => None,
        }
    }

    pub fn as_token(&self) -> Option<&GreenToken> {
        match self {
            Self::Token(token) => Some(token),
            _ => None,
        }
    }

    pub fn as_trivia(&self) -> Option<&GreenTrivia> {
        match self {
            Self::Trivia(trivia) => Some(trivia),
            _ => None,
        }
    }

    pub fn as_green_ref(&self) -> GreenRef<'_> {
        GreenRef::from(self)
    }
}

impl Green for GreenElement {
    fn head(&self) -> &GreenHead {
        match self {
            Self::Node(node) => node.head(),
            Self::Token(token) => token.head(),
            Self::Trivia(trivia) => trivia.head(),
        }
    }

    fn leading_trivia_width(&self) -> TextSize {
        match self {
            Self::Node(node) => node.leading_trivia_width(),
            Self::Token(token) => token.leading_trivia_width(),
            Self::Trivia(trivia) => trivia.leading_trivia_width(),
        }
    }

    fn trailing_trivia_width(&self) -> TextSize {
        match self {
            Self::Node(node) => node.trailing_trivia_width(),
            Self::Token(token) => token.trailing_trivia_width(),
            Self::Trivia(trivia) => trivia.trailing_trivia_width(),
        }
    }

    fn slot_count(&self) -> usize {
        match self {
            Self::Node(node) => node.slot_count(),
            Self::Token(token) => token.slot_count(),
            Self::Trivia(trivia) => trivia.slot_count(),
        }
    }

    fn slot(&self, index: usize) -> Option<&GreenElement> {
        match self {
            Self::Node(node) => node.slot(index),
            Self::Token(token) => token.slot(index),
            Self::Trivia(trivia) => trivia.slot(index),
        }
    }

    fn with_diagnostics(&self, diagnostics: Vec<SyntaxDiagnostic>) -> Self {
        match self {
            Self::Node(node) => node.with_diagnostics(diagnostics).into(),
            Self::Token(token) => token.with_diagnostics(diagnostics).into(),
            Self::Trivia(trivia) => trivia.with_diagnostics(diagnostics).into(),
        }
    }

    fn with_annotations(&self, annotations: Vec<SyntaxAnnotation>) -> Self {
        match self {
            Self::Node(node) => node.with_annotations(annotations).into(),
            Self::Token(token) => token.with_annotations(annotations).into(),
            Self::Trivia(trivia) => trivia.with_annotations(annotations).into(),
        }
    }

    /// Elements of different shapes are never equivalent.
    fn is_equivalent_to(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Node(lhs), Self::Node(rhs)) => lhs.is_equivalent_to(rhs),
            (Self::Token(lhs), Self::Token(rhs)) => lhs.is_equivalent_to(rhs),
            (Self::Trivia(lhs), Self::Trivia(rhs)) => lhs.is_equivalent_to(rhs),
            _ => false,
        }
    }

    fn write_text(&self, sink: &mut dyn fmt::Write, leading: bool, trailing: bool) -> fmt::Result {
        match self {
            Self::Node(node) => node.write_text(sink, leading, trailing),
            Self::Token(token) => token.write_text(sink, leading, trailing),
            Self::Trivia(trivia) => trivia.write_text(sink, leading, trailing),
        }
    }

    fn accept<V: GreenVisitor + ?Sized>(&self, visitor: &mut V) -> V::Output {
        match self {
            Self::Node(node) => node.accept(visitor),
            Self::Token(token) => token.accept(visitor),
            Self::Trivia(trivia) => trivia.accept(visitor),
        }
    }

    fn accept_walker<W: GreenWalker + ?Sized>(&self, walker: &mut W) {
        match self {
            Self::Node(node) => node.accept_walker(walker),
            Self::Token(token) => token.accept_walker(walker),
            Self::Trivia(trivia) => trivia.accept_walker(walker),
        }
    }

    fn write_payload(&self, writer: &mut ObjectWriter<'_>) -> Result<(), WriteError> {
        match self {
            Self::Node(node) => node.write_payload(writer),
            Self::Token(token) => token.write_payload(writer),
            Self::Trivia(trivia) => trivia.write_payload(writer),
        }
    }
}

impl From<GreenNode> for GreenElement {
    fn from(node: GreenNode) -> Self {
        Self::Node(node)
    }
}

impl From<GreenToken> for GreenElement {
    fn from(token: GreenToken) -> Self {
        Self::Token(token)
    }
}

impl From<GreenTrivia> for GreenElement {
    fn from(trivia: GreenTrivia) -> Self {
        Self::Trivia(trivia)
    }
}

impl fmt::Display for GreenElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Node(node) => fmt::Display::fmt(node, f),
            Self::Token(token) => fmt::Display::fmt(token, f),
            Self::Trivia(trivia) => fmt::Display::fmt(trivia, f),
        }
    }
}

/// Borrowed view of a green element, handed to visitors' fallback method.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GreenRef<'a> {
    Node(&'a GreenNode),
    Token(&'a GreenToken),
    Trivia(&'a GreenTrivia),
}

impl<'a> GreenRef<'a> {
    pub fn head(self) -> &'a GreenHead {
        match self {
            Self::Node(node) => node.head(),
            Self::Token(token) => token.head(),
            Self::Trivia(trivia) => trivia.head(),
        }
    }

    pub fn kind(self) -> SyntaxKind {
        self.head().kind()
    }

    pub fn flags(self) -> NodeFlags {
        self.head().flags()
    }

    pub fn full_width(self) -> TextSize {
        self.head().full_width()
    }

    pub fn to_element(self) -> GreenElement {
        match self {
            Self::Node(node) => node.clone().into(),
            Self::Token(token) => token.clone().into(),
            Self::Trivia(trivia) => trivia.clone().into(),
        }
    }
}

impl<'a> From<&'a GreenElement> for GreenRef<'a> {
    fn from(element: &'a GreenElement) -> Self {
        match element {
            GreenElement::Node(node) => Self::Node(node),
            GreenElement::Token(token) => Self::Token(token),
            GreenElement::Trivia(trivia) => Self::Trivia(trivia),
        }
    }
}
