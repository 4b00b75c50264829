use bitflags::bitflags;

bitflags! {
    /// Per-element summary bits, used to prune traversals.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct NodeFlags: u16 {
        /// A zero-width element synthesized by the parser.
        const IS_MISSING = 1 << 0;
        /// The element or one of its descendants carries diagnostics.
        const CONTAINS_DIAGNOSTICS = 1 << 1;
        /// The element or one of its descendants carries annotations.
        const CONTAINS_ANNOTATIONS = 1 << 2;
        /// The element or one of its descendants holds skipped or invalid text.
        const CONTAINS_SKIPPED_TEXT = 1 << 3;
    }
}

impl NodeFlags {
    /// Bits that only report overlay presence.
    pub const METADATA: Self = Self::CONTAINS_DIAGNOSTICS.union(Self::CONTAINS_ANNOTATIONS);
    /// Bits a parent takes over from its children.
    pub const INHERITED: Self = Self::METADATA.union(Self::CONTAINS_SKIPPED_TEXT);
    /// Bits that cannot be recomputed from kind and content; readers keep
    /// these from the stream and recompute the rest.
    pub const INTRINSIC: Self = Self::IS_MISSING;

    /// The bits that take part in structural equivalence.
    pub const fn structural(self) -> Self {
        self.difference(Self::METADATA)
    }

    pub(crate) fn inherited(self) -> Self {
        self & Self::INHERITED
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn structural_drops_metadata_only() {
        let flags = NodeFlags::all();
        assert_eq!(flags.structural(), NodeFlags::IS_MISSING | NodeFlags::CONTAINS_SKIPPED_TEXT);
        assert_eq!(NodeFlags::METADATA.structural(), NodeFlags::empty());
    }

    #[test]
    fn missing_is_not_inherited() {
        assert_eq!(NodeFlags::IS_MISSING.inherited(), NodeFlags::empty());
        assert_eq!(
            (NodeFlags::IS_MISSING | NodeFlags::CONTAINS_DIAGNOSTICS).inherited(),
            NodeFlags::CONTAINS_DIAGNOSTICS
        );
    }
}
