//! MessagePack tag decoding.
//!
//! The module follows a layered structure:
//! - `layout`: tag byte values and masks (source of truth)
//! - `reader`: bounds-checked sequential byte access
//! - `tags`: pure dispatch from a leading byte to its category
//! - `parser`: per-tag payload decoding into labeled items
//! - `error`: explicit, actionable errors
//!
//! Parsing is pure and contains no I/O; file access and report assembly
//! live in the `inspect` module.

pub(crate) mod error;
pub(crate) mod layout;
pub(crate) mod parser;
pub(crate) mod reader;
pub(crate) mod tags;
