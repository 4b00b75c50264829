use std::fmt;

use crate::SyntaxKind::{self, *};

const SLOTS: usize = SyntaxKind::ALL.len().div_ceil(u64::BITS as usize);

/// A set of kinds, one bit per wire tag.
///
/// The shape classes live here as constants: constructors assert against
/// them and the wire reader uses them to reject a misplaced record before
/// reading its payload.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SyntaxSet {
    bits: [u64; SLOTS],
}

impl SyntaxSet {
    pub const EMPTY: Self = Self { bits: [0; SLOTS] };

    pub const ALL: Self = Self::new(SyntaxKind::ALL);

    /// Leaf kinds that only ever hang off tokens.
    pub const TRIVIA: Self = Self::new([
        WHITESPACE_TRIVIA,
        END_OF_LINE_TRIVIA,
        SINGLE_LINE_COMMENT_TRIVIA,
        MULTI_LINE_COMMENT_TRIVIA,
        DOCUMENTATION_COMMENT_TRIVIA,
        DISABLED_TEXT_TRIVIA,
        SKIPPED_TOKENS_TRIVIA,
        PREPROCESSING_MESSAGE_TRIVIA,
    ]);

    pub const TOKENS: Self = Self::new([
        LEFT_PAREN,
        RIGHT_PAREN,
        LEFT_BRACE,
        RIGHT_BRACE,
        COMMA,
        SEMICOLON,
        DOT,
        EQ,
        PLUS,
        MINUS,
        STAR,
        SLASH,
        FUN_KW,
        VAL_KW,
        IF_KW,
        ELSE_KW,
        RETURN_KW,
        IDENT,
        NUMBER,
        STRING,
        UNKNOWN,
        EOF,
    ]);

    /// Composite kinds: everything that is neither trivia nor a token.
    pub const NODES: Self = Self::ALL.difference(&Self::TRIVIA.union(&Self::TOKENS));

    /// Kinds allowed directly under a node.
    pub const CHILDREN: Self = Self::TOKENS.union(&Self::NODES);

    const fn bit(kind: SyntaxKind) -> (usize, u64) {
        let raw = kind.to_raw() as usize;
        let bits = u64::BITS as usize;
        (raw / bits, 1 << (raw % bits))
    }

    pub const fn new<const N: usize>(kinds: [SyntaxKind; N]) -> Self {
        let mut set = Self::EMPTY;
        let mut i = 0;
        while i < N {
            set = set.with(kinds[i]);
            i += 1;
        }
        set
    }

    #[must_use]
    pub const fn with(mut self, kind: SyntaxKind) -> Self {
        let (slot, mask) = Self::bit(kind);
        self.bits[slot] |= mask;
        self
    }

    #[must_use]
    pub const fn union(mut self, other: &Self) -> Self {
        let mut i = 0;
        while i < SLOTS {
            self.bits[i] |= other.bits[i];
            i += 1;
        }
        self
    }

    #[must_use]
    pub const fn difference(mut self, other: &Self) -> Self {
        let mut i = 0;
        while i < SLOTS {
            self.bits[i] &= !other.bits[i];
            i += 1;
        }
        self
    }

    pub const fn contains(&self, kind: SyntaxKind) -> bool {
        let (slot, mask) = Self::bit(kind);
        self.bits[slot] & mask != 0
    }

    pub const fn len(&self) -> usize {
        let mut len = 0;
        let mut i = 0;
        while i < SLOTS {
            len += self.bits[i].count_ones() as usize;
            i += 1;
        }
        len
    }

    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Members in tag order.
    pub fn iter(self) -> impl Iterator<Item = SyntaxKind> {
        SyntaxKind::ALL.into_iter().filter(move |&kind| self.contains(kind))
    }
}

impl FromIterator<SyntaxKind> for SyntaxSet {
    fn from_iter<I: IntoIterator<Item = SyntaxKind>>(iter: I) -> Self {
        iter.into_iter().fold(Self::EMPTY, Self::with)
    }
}

impl fmt::Debug for SyntaxSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}
