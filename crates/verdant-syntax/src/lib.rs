//! Immutable green syntax trees with diagnostic overlays and a binary wire
//! format.
//!
//! Green elements carry kind, width and content, and are shared freely between
//! trees. Diagnostics and annotations ride alongside them without affecting
//! structural equivalence. Red handles add absolute positions and parent
//! links on demand.

mod annotation;
mod dump;
mod flags;
mod green;
mod node_or_token;
mod overlay;
mod red;
mod syntax_kind;
mod syntax_set;
mod visitor;
/// Binary reader and writer for green trees.
pub mod wire;

/// Tooling markers attached to green elements.
pub use annotation::SyntaxAnnotation;
/// Per-element summary bits.
pub use flags::NodeFlags;
/// Green element shapes and the trait they share.
pub use green::{
    Green, GreenElement, GreenHead, GreenNode, GreenRef, GreenToken, GreenTrivia, TriviaCache,
};
pub use node_or_token::NodeOrToken;
/// Diagnostics and annotations of one element.
pub use overlay::Overlay;
/// Positioned handles over green trees.
pub use red::{SyntaxElement, SyntaxNode, SyntaxToken, SyntaxTrivia};
/// Token and node kinds used throughout the tree.
pub use syntax_kind::SyntaxKind;
/// Compact set for grouping `SyntaxKind` values.
pub use syntax_set::SyntaxSet;
pub use verdant_errors::{DiagnosticCode, Severity, SyntaxDiagnostic, TextRange, TextSize};
pub use visitor::{GreenVisitor, GreenWalker, walk_node, walk_token};
