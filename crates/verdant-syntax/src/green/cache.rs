use rustc_hash::FxHashMap;

use super::GreenTrivia;
use crate::SyntaxKind;

/// Interns overlay-free trivia by kind and text, so that every `" "` in a
/// tree can share one allocation.
#[derive(Debug, Default)]
pub struct TriviaCache {
    trivia: FxHashMap<SyntaxKind, FxHashMap<Box<str>, GreenTrivia>>,
}

impl TriviaCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// # Panics
    ///
    /// Panics if `kind` is not a trivia kind.
    pub fn trivia(&mut self, kind: SyntaxKind, text: &str) -> GreenTrivia {
        let by_text = self.trivia.entry(kind).or_default();
        if let Some(trivia) = by_text.get(text) {
            return trivia.clone();
        }

        let trivia = GreenTrivia::new(kind, text);
        by_text.insert(text.into(), trivia.clone());
        trivia
    }

    pub fn len(&self) -> usize {
        self.trivia.values().map(FxHashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
