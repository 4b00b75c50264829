use std::io::Read;

use bincode::Options as _;
use serde::de::DeserializeOwned;
use tracing::trace;
use verdant_errors::SyntaxDiagnostic;

use super::{ReadError, ReaderRegistry, STR_INLINE, STR_REF, WireConfig, overlay_codec};
use crate::{
    Green as _, GreenElement, GreenTrivia, NodeFlags, Overlay, SyntaxAnnotation, SyntaxKind,
    SyntaxSet, TriviaCache,
};

/// The shared fields of a record, decoded before the shape-specific payload.
#[derive(Clone, Debug)]
pub struct RecordHeader {
    pub kind: SyntaxKind,
    pub flags: NodeFlags,
    pub overlay: Overlay,
}

/// Decodes green records from a byte source, dispatching each record to the
/// reader registered for its kind.
pub struct ObjectReader<'r> {
    inner: &'r mut dyn Read,
    registry: &'r ReaderRegistry,
    config: &'r WireConfig,
    strings: Vec<Box<str>>,
    trivia: TriviaCache,
    depth: u32,
    records: usize,
}

impl<'r> ObjectReader<'r> {
    pub fn new(
        inner: &'r mut dyn Read,
        registry: &'r ReaderRegistry,
        config: &'r WireConfig,
    ) -> Self {
        Self {
            inner,
            registry,
            config,
            strings: Vec::new(),
            trivia: TriviaCache::default(),
            depth: 0,
            records: 0,
        }
    }

    pub fn read_u8(&mut self) -> Result<u8, ReadError> {
        let mut bytes = [0; 1];
        self.inner.read_exact(&mut bytes)?;
        Ok(bytes[0])
    }

    pub fn read_u16(&mut self) -> Result<u16, ReadError> {
        let mut bytes = [0; 2];
        self.inner.read_exact(&mut bytes)?;
        Ok(u16::from_le_bytes(bytes))
    }

    pub fn read_u32(&mut self) -> Result<u32, ReadError> {
        let mut bytes = [0; 4];
        self.inner.read_exact(&mut bytes)?;
        Ok(u32::from_le_bytes(bytes))
    }

    pub fn read_bool(&mut self) -> Result<bool, ReadError> {
        match self.read_u8()? {
            0 => Ok(false),
            1 => Ok(true),
            byte => Err(ReadError::InvalidBool(byte)),
        }
    }

    /// Reads a `u32` length prefix.
    pub fn read_len(&mut self) -> Result<usize, ReadError> {
        Ok(self.read_u32()? as usize)
    }

    /// Reads a tagged string written by [`super::ObjectWriter::write_str`].
    pub fn read_str(&mut self) -> Result<Box<str>, ReadError> {
        match self.read_u8()? {
            STR_INLINE => {
                let len = self.read_u32()?;
                let limit = self.config.max_string_len;
                if len > limit {
                    return Err(ReadError::StringTooLong { len, limit });
                }

                let mut bytes = vec![0; len as usize];
                self.inner.read_exact(&mut bytes)?;
                let text = String::from_utf8(bytes)?.into_boxed_str();
                self.strings.push(text.clone());
                Ok(text)
            }
            STR_REF => {
                let index = self.read_u32()?;
                self.strings
                    .get(index as usize)
                    .cloned()
                    .ok_or(ReadError::DanglingStringRef { index, known: self.strings.len() })
            }
            tag => Err(ReadError::InvalidStringTag(tag)),
        }
    }

    /// Reads a serde value with bincode, bounded by `max_overlay_bytes`.
    pub fn read_value<T: DeserializeOwned>(&mut self) -> Result<T, ReadError> {
        overlay_codec(self.config.max_overlay_bytes)
            .deserialize_from(&mut *self.inner)
            .map_err(ReadError::Overlay)
    }

    fn read_kind(&mut self) -> Result<SyntaxKind, ReadError> {
        let raw = self.read_u16()?;
        SyntaxKind::from_raw(raw).ok_or(ReadError::UnknownKind(raw))
    }

    fn read_overlay(&mut self) -> Result<Overlay, ReadError> {
        let diagnostics: Vec<SyntaxDiagnostic> =
            if self.read_bool()? { self.read_value()? } else { Vec::new() };
        let annotations: Vec<SyntaxAnnotation> =
            if self.read_bool()? { self.read_value()? } else { Vec::new() };
        Ok(Overlay::new(diagnostics, annotations))
    }

    /// Reads one complete record, children included.
    pub fn read_element(&mut self) -> Result<GreenElement, ReadError> {
        self.read_element_of(&SyntaxSet::ALL, "green")
    }

    /// Reads one complete record whose kind must be in `allowed`. A kind
    /// outside it is rejected before its payload is read.
    pub fn read_element_of(
        &mut self,
        allowed: &SyntaxSet,
        expected: &'static str,
    ) -> Result<GreenElement, ReadError> {
        if self.depth >= self.config.max_depth {
            return Err(ReadError::TooDeep(self.config.max_depth));
        }

        let kind = self.read_kind()?;
        if !allowed.contains(kind) {
            return Err(ReadError::UnexpectedShape { expected, found: kind });
        }
        let read = self.registry.get(kind).ok_or(ReadError::UnregisteredKind(kind))?;
        let flags = NodeFlags::from_bits_truncate(self.read_u16()?);
        let overlay = self.read_overlay()?;

        self.records += 1;
        trace!(?kind, depth = self.depth, "read record");

        self.depth += 1;
        let element = read(self, RecordHeader { kind, flags, overlay });
        self.depth -= 1;
        element
    }

    /// Reads a record that must be trivia.
    pub fn read_trivia(&mut self) -> Result<GreenTrivia, ReadError> {
        match self.read_element_of(&SyntaxSet::TRIVIA, "trivia")? {
            GreenElement::Trivia(trivia) => Ok(trivia),
            other => Err(ReadError::UnexpectedShape { expected: "trivia", found: other.kind() }),
        }
    }

    /// Overlay-free trivia read through this reader shares allocations.
    pub fn trivia_cache(&mut self) -> &mut TriviaCache {
        &mut self.trivia
    }

    pub fn records(&self) -> usize {
        self.records
    }

    pub fn distinct_strings(&self) -> usize {
        self.strings.len()
    }
}
