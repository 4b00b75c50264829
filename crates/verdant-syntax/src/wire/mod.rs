//! Binary encoding of green trees.
//!
//! A stream is the magic bytes `VGRN`, a version byte, and one root record.
//! Every record starts with a `u16` kind tag and `u16` flags, followed by the
//! element's diagnostics and annotations (each behind a presence byte, encoded
//! with bincode) and then a payload that depends on the shape:
//!
//! - trivia: its text;
//! - token: its text, then the leading and trailing trivia as counted lists
//!   of records;
//! - node: a counted list of child records.
//!
//! Widths are never stored. Readers recompute them, along with every flag
//! except `IS_MISSING`, from the decoded content.

mod config;
mod error;
mod reader;
mod registry;
mod writer;

use std::io::{Read, Write};

use tracing::debug;

pub use self::config::WireConfig;
pub use self::error::{ReadError, WriteError};
pub use self::reader::{ObjectReader, RecordHeader};
pub use self::registry::{ReadFn, ReaderRegistry};
pub use self::writer::ObjectWriter;
use crate::{Green, GreenElement};

pub const MAGIC: [u8; 4] = *b"VGRN";
pub const VERSION: u8 = 1;

const STR_INLINE: u8 = 0;
const STR_REF: u8 = 1;

fn overlay_codec(limit: u64) -> impl bincode::Options {
    use bincode::Options as _;

    bincode::DefaultOptions::new().with_limit(limit)
}

/// Writes the stream header and `root` to `sink`.
#[tracing::instrument(level = "debug", skip_all)]
pub fn write_tree<G: Green>(
    sink: &mut dyn Write,
    root: &G,
    config: &WireConfig,
) -> Result<(), WriteError> {
    sink.write_all(&MAGIC)?;
    sink.write_all(&[VERSION])?;

    let mut writer = ObjectWriter::new(sink, config);
    writer.write_green(root)?;
    debug!(
        kind = ?root.kind(),
        records = writer.records(),
        strings = writer.distinct_strings(),
        "wrote green tree"
    );
    Ok(())
}

/// Reads a stream header and one root record from `source`.
///
/// Bytes after the root record are left unread.
#[tracing::instrument(level = "debug", skip_all)]
pub fn read_tree(
    source: &mut dyn Read,
    registry: &ReaderRegistry,
    config: &WireConfig,
) -> Result<GreenElement, ReadError> {
    let mut magic = [0; 4];
    source.read_exact(&mut magic)?;
    if magic != MAGIC {
        return Err(ReadError::BadMagic);
    }
    let mut version = [0; 1];
    source.read_exact(&mut version)?;
    if version[0] != VERSION {
        return Err(ReadError::UnsupportedVersion(version[0]));
    }

    let mut reader = ObjectReader::new(source, registry, config);
    let root = reader.read_element()?;
    debug!(
        kind = ?root.kind(),
        records = reader.records(),
        strings = reader.distinct_strings(),
        "read green tree"
    );
    Ok(root)
}

/// Encodes `root` with the default configuration.
pub fn to_bytes<G: Green>(root: &G) -> Result<Vec<u8>, WriteError> {
    let mut bytes: Vec<u8> = Vec::new();
    write_tree(&mut bytes, root, &WireConfig::default())?;
    Ok(bytes)
}

/// Decodes a tree written by [`to_bytes`], rejecting anything after it.
pub fn from_bytes(bytes: &[u8]) -> Result<GreenElement, ReadError> {
    let mut rest = bytes;
    let root = read_tree(&mut rest, ReaderRegistry::standard(), &WireConfig::default())?;
    if !rest.is_empty() {
        return Err(ReadError::TrailingBytes(rest.len()));
    }
    Ok(root)
}
