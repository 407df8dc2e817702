//! mpview core library: MessagePack hex-inspection.
//!
//! This crate implements the decode pipeline used by the CLI: a single
//! forward pass turns a MessagePack byte buffer into a labeled, ordered
//! tree of nodes, each tagged with the byte offset of its leading tag
//! byte. The output is a display tree (type/value text plus offsets), not
//! a typed value graph. Decoding is byte-oriented and side-effect free;
//! all I/O is isolated in the `inspect` entry points.
//!
//! Invariants:
//! - Every read is bounds-checked; truncation is an error value, never an
//!   out-of-range access.
//! - Container nesting is tracked with an explicit frame stack; nesting
//!   depth never consumes call stack.
//! - Decoding the same buffer twice yields structurally identical trees.
//!
//! # Examples
//! ```
//! use mpview_core::decode;
//!
//! let tree = decode(&[0xa3, b'a', b'b', b'c'])?;
//! assert_eq!(tree.nodes[0].label, "fixstr: length 3");
//! assert_eq!(tree.nodes[0].children[0].label, "abc");
//! # Ok::<(), mpview_core::DecodeError>(())
//! ```

use serde::{Deserialize, Serialize};

mod decode;
mod inspect;
mod msgpack;
mod tree;

pub use decode::{DecodeLimits, decode, decode_partial, decode_with_limits};
pub use inspect::{InspectError, inspect_bytes, inspect_file, inspect_file_with_limits};
pub use msgpack::error::DecodeError;
pub use msgpack::reader::ByteCursor;
pub use tree::{Node, Row, Tree, Walk};

/// Current report schema version.
pub const REPORT_VERSION: u32 = 1;
/// Default timestamp used when no generation time is available.
pub const DEFAULT_GENERATED_AT: &str = "1970-01-01T00:00:00Z";

/// Versioned inspection report: input metadata, decode summary, and the
/// decoded tree.
///
/// # Examples
/// ```
/// use mpview_core::make_stub_report;
///
/// let report = make_stub_report("data.msgpack", 64);
/// assert_eq!(report.report_version, mpview_core::REPORT_VERSION);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    /// Report schema version (not the tool version).
    pub report_version: u32,
    /// Tool identification metadata.
    pub tool: ToolInfo,
    /// RFC3339 timestamp representing the report generation time.
    pub generated_at: String,
    /// Input file metadata.
    pub input: InputInfo,
    /// Decode outcome summary.
    pub summary: DecodeSummary,
    /// Decoded node tree (possibly partial; see `summary`).
    pub tree: Tree,
}

/// Tool metadata embedded in reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInfo {
    /// Tool name (e.g., "mpview").
    pub name: String,
    /// Tool version (semver).
    pub version: String,
}

/// Input metadata embedded in reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputInfo {
    /// Input path as provided to the inspector.
    pub path: String,
    /// Input size in bytes.
    pub bytes: u64,
}

/// Decode outcome summary.
///
/// # Examples
/// ```
/// use mpview_core::DecodeSummary;
///
/// let summary = DecodeSummary {
///     nodes_total: 3,
///     max_depth: 1,
///     complete: true,
///     error: None,
/// };
/// assert!(summary.complete);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecodeSummary {
    /// Total decoded nodes, leaves and containers alike.
    pub nodes_total: u64,
    /// Deepest nesting level reached.
    pub max_depth: u64,
    /// Whether the pass consumed the whole buffer with all containers
    /// satisfied.
    pub complete: bool,
    /// Description of the problem that stopped or degraded the pass.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Build a stub report with base fields filled and an empty tree.
///
/// # Examples
/// ```
/// use mpview_core::make_stub_report;
///
/// let report = make_stub_report("data.msgpack", 64);
/// assert!(report.tree.is_empty());
/// assert!(report.summary.complete);
/// ```
pub fn make_stub_report(input_path: &str, input_bytes: u64) -> Report {
    Report {
        report_version: REPORT_VERSION,
        tool: ToolInfo {
            name: "mpview".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        generated_at: DEFAULT_GENERATED_AT.to_string(),
        input: InputInfo {
            path: input_path.to_string(),
            bytes: input_bytes,
        },
        summary: DecodeSummary {
            nodes_total: 0,
            max_depth: 0,
            complete: true,
            error: None,
        },
        tree: Tree::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_omits_error_field_when_none() {
        let report = make_stub_report("data.msgpack", 1);
        let value = serde_json::to_value(&report).expect("report json");
        assert!(value["summary"].get("error").is_none());
        assert_eq!(value["tool"]["name"], "mpview");
        assert_eq!(value["tree"]["nodes"], serde_json::json!([]));
    }

    #[test]
    fn report_round_trips_through_json() {
        let mut report = make_stub_report("data.msgpack", 2);
        let (tree, _) = decode_partial(&[0x91, 0x01]);
        report.tree = tree;
        let json = serde_json::to_string(&report).expect("report json");
        let back: Report = serde_json::from_str(&json).expect("report from json");
        assert_eq!(back.tree, report.tree);
        assert_eq!(back.input.bytes, 2);
    }
}
