use thiserror::Error;

/// Errors returned by the MessagePack decode pass.
///
/// `TruncatedInput` aborts the pass at the offending tag; no partial node
/// for that tag is added. `IncompleteStructure` is reported after a clean
/// end of input when containers are still waiting for children; the
/// partially filled containers remain in the returned tree.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("truncated input at offset {offset}: need {needed} bytes, got {remaining}")]
    TruncatedInput {
        offset: usize,
        needed: usize,
        remaining: usize,
    },
    #[error("input exhausted with {open_frames} container(s) still open")]
    IncompleteStructure { open_frames: usize },
    /// Tag dispatch is exhaustive over all 256 byte values; this variant
    /// indicates a classifier bug, never malformed input.
    #[error("unreachable tag dispatch for byte 0x{tag:02x} at offset {offset}")]
    UnreachableTag { tag: u8, offset: usize },
    #[error("node budget exceeded: more than {limit} nodes")]
    TooManyNodes { limit: usize },
    #[error("nesting depth exceeded: more than {limit} open containers")]
    TooDeep { limit: usize },
}
