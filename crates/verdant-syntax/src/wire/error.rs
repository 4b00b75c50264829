use std::io;
use std::string::FromUtf8Error;

use thiserror::Error;

use crate::SyntaxKind;

/// Failure while encoding a tree.
#[derive(Debug, Error)]
pub enum WriteError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("length {0} does not fit in a u32 prefix")]
    TooLong(usize),

    #[error("string of {len} bytes exceeds the limit of {limit}")]
    StringTooLong { len: usize, limit: u32 },

    #[error("failed to encode overlay: {0}")]
    Overlay(#[source] bincode::Error),
}

/// Failure while decoding a tree. The partially read tree is discarded.
#[derive(Debug, Error)]
pub enum ReadError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("stream does not start with the green tree magic")]
    BadMagic,

    #[error("unsupported wire version {0}")]
    UnsupportedVersion(u8),

    #[error("unknown syntax kind tag {0}")]
    UnknownKind(u16),

    #[error("no reader registered for {0:?}")]
    UnregisteredKind(SyntaxKind),

    #[error("expected a {expected} record, found {found:?}")]
    UnexpectedShape { expected: &'static str, found: SyntaxKind },

    #[error("invalid UTF-8 in string: {0}")]
    InvalidUtf8(#[from] FromUtf8Error),

    #[error("string of {len} bytes exceeds the limit of {limit}")]
    StringTooLong { len: u32, limit: u32 },

    #[error("string reference {index} points past the {known} strings read so far")]
    DanglingStringRef { index: u32, known: usize },

    #[error("invalid string tag {0}")]
    InvalidStringTag(u8),

    #[error("invalid boolean byte {0}")]
    InvalidBool(u8),

    #[error("tree is nested deeper than {0} records")]
    TooDeep(u32),

    #[error("width of {0:?} record does not fit in a u32")]
    WidthOverflow(SyntaxKind),

    #[error("{0} bytes left over after the root record")]
    TrailingBytes(usize),

    #[error("failed to decode overlay: {0}")]
    Overlay(#[source] bincode::Error),
}
