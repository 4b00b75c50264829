use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// Opaque tooling marker attached to a green element.
///
/// Every annotation created in this process gets a fresh id, and equality is
/// decided by id alone, so two annotations with the same kind and data are
/// still distinct markers. Ids survive serialization.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SyntaxAnnotation {
    id: u64,
    kind: Option<Box<str>>,
    data: Option<Box<str>>,
}

impl SyntaxAnnotation {
    pub fn new() -> Self {
        Self { id: next_id(), kind: None, data: None }
    }

    pub fn with_kind(kind: impl Into<Box<str>>) -> Self {
        Self { id: next_id(), kind: Some(kind.into()), data: None }
    }

    pub fn with_data(kind: impl Into<Box<str>>, data: impl Into<Box<str>>) -> Self {
        Self { id: next_id(), kind: Some(kind.into()), data: Some(data.into()) }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn kind(&self) -> Option<&str> {
        self.kind.as_deref()
    }

    pub fn data(&self) -> Option<&str> {
        self.data.as_deref()
    }
}

impl Default for SyntaxAnnotation {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for SyntaxAnnotation {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for SyntaxAnnotation {}

impl Hash for SyntaxAnnotation {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

fn next_id() -> u64 {
    NEXT_ID.fetch_add(1, Ordering::Relaxed)
}
