use std::io::Write;

use bincode::Options as _;
use rustc_hash::FxHashMap;
use serde::Serialize;
use tracing::trace;

use super::{STR_INLINE, STR_REF, WireConfig, WriteError, overlay_codec};
use crate::{Green, GreenHead};

/// Encodes green records into a byte sink.
///
/// Integers are little-endian. Strings and overlays go through
/// [`ObjectWriter::write_str`] and [`ObjectWriter::write_value`], which apply
/// the limits of the [`WireConfig`].
pub struct ObjectWriter<'w> {
    inner: &'w mut dyn Write,
    config: &'w WireConfig,
    strings: FxHashMap<Box<str>, u32>,
    records: usize,
}

impl<'w> ObjectWriter<'w> {
    pub fn new(inner: &'w mut dyn Write, config: &'w WireConfig) -> Self {
        Self { inner, config, strings: FxHashMap::default(), records: 0 }
    }

    pub fn write_u8(&mut self, value: u8) -> Result<(), WriteError> {
        self.inner.write_all(&[value])?;
        Ok(())
    }

    pub fn write_u16(&mut self, value: u16) -> Result<(), WriteError> {
        self.inner.write_all(&value.to_le_bytes())?;
        Ok(())
    }

    pub fn write_u32(&mut self, value: u32) -> Result<(), WriteError> {
        self.inner.write_all(&value.to_le_bytes())?;
        Ok(())
    }

    pub fn write_bool(&mut self, value: bool) -> Result<(), WriteError> {
        self.write_u8(u8::from(value))
    }

    /// Writes a `u32` length prefix.
    pub fn write_len(&mut self, len: usize) -> Result<(), WriteError> {
        let Ok(len) = u32::try_from(len) else {
            return Err(WriteError::TooLong(len));
        };
        self.write_u32(len)
    }

    /// Writes a tagged string: inline the first time it is seen, as an index
    /// into the strings written so far afterwards.
    pub fn write_str(&mut self, text: &str) -> Result<(), WriteError> {
        let limit = self.config.max_string_len;
        if text.len() > limit as usize {
            return Err(WriteError::StringTooLong { len: text.len(), limit });
        }

        if self.config.dedupe_strings
            && let Some(&index) = self.strings.get(text)
        {
            self.write_u8(STR_REF)?;
            return self.write_u32(index);
        }

        self.write_u8(STR_INLINE)?;
        self.write_len(text.len())?;
        self.inner.write_all(text.as_bytes())?;

        if self.config.dedupe_strings {
            let Ok(index) = u32::try_from(self.strings.len()) else {
                return Err(WriteError::TooLong(self.strings.len()));
            };
            self.strings.insert(text.into(), index);
        }
        Ok(())
    }

    /// Writes a serde value with bincode, bounded by `max_overlay_bytes`.
    pub fn write_value<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), WriteError> {
        overlay_codec(self.config.max_overlay_bytes)
            .serialize_into(&mut *self.inner, value)
            .map_err(WriteError::Overlay)
    }

    /// Writes the fields shared by every record: kind, flags, then each
    /// overlay half behind a presence byte.
    pub(crate) fn write_head(&mut self, head: &GreenHead) -> Result<(), WriteError> {
        self.write_u16(head.kind().to_raw())?;
        self.write_u16(head.flags().bits())?;

        let overlay = head.overlay();
        self.write_bool(!overlay.diagnostics().is_empty())?;
        if !overlay.diagnostics().is_empty() {
            self.write_value(overlay.diagnostics())?;
        }
        self.write_bool(!overlay.annotations().is_empty())?;
        if !overlay.annotations().is_empty() {
            self.write_value(overlay.annotations())?;
        }
        Ok(())
    }

    /// Writes one complete record for `element`, children included.
    pub fn write_green<G: Green>(&mut self, element: &G) -> Result<(), WriteError> {
        self.records += 1;
        trace!(kind = ?element.kind(), "write record");
        element.write_to(self)
    }

    pub fn records(&self) -> usize {
        self.records
    }

    pub fn distinct_strings(&self) -> usize {
        self.strings.len()
    }
}
