use serde::{Deserialize, Serialize};

/// Limits and options for the wire format.
///
/// Every field has a default, so hosts can embed a partial table in their own
/// configuration files.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WireConfig {
    /// Deepest record nesting the reader accepts.
    pub max_depth: u32,
    /// Largest string, in bytes, either side will handle.
    pub max_string_len: u32,
    /// Largest encoded diagnostics or annotations block.
    pub max_overlay_bytes: u64,
    /// Write repeated strings as back-references. Readers accept both forms
    /// regardless.
    pub dedupe_strings: bool,
}

impl Default for WireConfig {
    fn default() -> Self {
        Self {
            max_depth: 512,
            max_string_len: 16 * 1024 * 1024,
            max_overlay_bytes: 1024 * 1024,
            dedupe_strings: true,
        }
    }
}
