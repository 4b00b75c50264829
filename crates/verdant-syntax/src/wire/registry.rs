use std::fmt;
use std::sync::LazyLock;

use rustc_hash::FxHashMap;

use super::{ObjectReader, ReadError, RecordHeader};
use crate::{GreenElement, GreenNode, GreenToken, GreenTrivia, SyntaxKind};

/// Rebuilds an element from its decoded header and the payload that follows.
pub type ReadFn = fn(&mut ObjectReader<'_>, RecordHeader) -> Result<GreenElement, ReadError>;

/// Maps each kind tag to the function that reads its payload.
#[derive(Clone)]
pub struct ReaderRegistry {
    readers: FxHashMap<SyntaxKind, ReadFn>,
}

static STANDARD: LazyLock<ReaderRegistry> = LazyLock::new(ReaderRegistry::default);

impl ReaderRegistry {
    /// A registry that knows no kinds.
    pub fn empty() -> Self {
        Self { readers: FxHashMap::default() }
    }

    /// The shared registry covering every built-in shape.
    pub fn standard() -> &'static Self {
        &STANDARD
    }

    /// Registers `read` for `kind`, returning the reader it replaces.
    pub fn register(&mut self, kind: SyntaxKind, read: ReadFn) -> Option<ReadFn> {
        self.readers.insert(kind, read)
    }

    pub fn get(&self, kind: SyntaxKind) -> Option<ReadFn> {
        self.readers.get(&kind).copied()
    }

    pub fn len(&self) -> usize {
        self.readers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readers.is_empty()
    }
}

impl Default for ReaderRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        GreenTrivia::register(&mut registry);
        GreenToken::register(&mut registry);
        GreenNode::register(&mut registry);
        registry
    }
}

impl fmt::Debug for ReaderRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut kinds: Vec<_> = self.readers.keys().copied().collect();
        kinds.sort_unstable();
        f.debug_struct("ReaderRegistry").field("kinds", &kinds).finish()
    }
}
