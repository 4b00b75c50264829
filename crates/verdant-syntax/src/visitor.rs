//! Double dispatch over green element shapes.
//!
//! `Green::accept` picks the method matching the element's concrete shape.
//! [`GreenVisitor`] returns a value per element and falls back to
//! [`GreenVisitor::default_visit`]; [`GreenWalker`] is for side effects and
//! recurses into children unless a method is overridden.

use crate::{Green as _, GreenNode, GreenRef, GreenToken, GreenTrivia};

pub trait GreenVisitor {
    type Output;

    fn default_visit(&mut self, element: GreenRef<'_>) -> Self::Output;

    fn visit_node(&mut self, node: &GreenNode) -> Self::Output {
        self.default_visit(GreenRef::Node(node))
    }

    fn visit_token(&mut self, token: &GreenToken) -> Self::Output {
        self.default_visit(GreenRef::Token(token))
    }

    fn visit_trivia(&mut self, trivia: &GreenTrivia) -> Self::Output {
        self.default_visit(GreenRef::Trivia(trivia))
    }
}

pub trait GreenWalker {
    fn visit_node(&mut self, node: &GreenNode) {
        walk_node(self, node);
    }

    fn visit_token(&mut self, token: &GreenToken) {
        walk_token(self, token);
    }

    fn visit_trivia(&mut self, _trivia: &GreenTrivia) {}
}

/// Visits every child of `node` in order.
pub fn walk_node<W: GreenWalker + ?Sized>(walker: &mut W, node: &GreenNode) {
    for child in node.children() {
        child.accept_walker(walker);
    }
}

/// Visits the leading trivia of `token`, then its trailing trivia.
pub fn walk_token<W: GreenWalker + ?Sized>(walker: &mut W, token: &GreenToken) {
    for trivia in token.leading_trivia().iter().chain(token.trailing_trivia()) {
        walker.visit_trivia(trivia);
    }
}
