use verdant_errors::SyntaxDiagnostic;

use crate::{NodeFlags, SyntaxAnnotation};

/// Diagnostics and annotations riding alongside a green element.
///
/// Both sequences keep insertion order and may contain duplicates. None of this
/// takes part in structural equivalence.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Overlay {
    diagnostics: Box<[SyntaxDiagnostic]>,
    annotations: Box<[SyntaxAnnotation]>,
}

impl Overlay {
    pub fn new(diagnostics: Vec<SyntaxDiagnostic>, annotations: Vec<SyntaxAnnotation>) -> Self {
        Self { diagnostics: diagnostics.into(), annotations: annotations.into() }
    }

    pub fn diagnostics(&self) -> &[SyntaxDiagnostic] {
        &self.diagnostics
    }

    pub fn annotations(&self) -> &[SyntaxAnnotation] {
        &self.annotations
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty() && self.annotations.is_empty()
    }

    pub(crate) fn replace_diagnostics(&self, diagnostics: Vec<SyntaxDiagnostic>) -> Self {
        Self { diagnostics: diagnostics.into(), annotations: self.annotations.clone() }
    }

    pub(crate) fn replace_annotations(&self, annotations: Vec<SyntaxAnnotation>) -> Self {
        Self { diagnostics: self.diagnostics.clone(), annotations: annotations.into() }
    }

    /// Presence bits for this overlay alone.
    pub(crate) fn flags(&self) -> NodeFlags {
        let mut flags = NodeFlags::empty();
        flags.set(NodeFlags::CONTAINS_DIAGNOSTICS, !self.diagnostics.is_empty());
        flags.set(NodeFlags::CONTAINS_ANNOTATIONS, !self.annotations.is_empty());
        flags
    }
}
