use std::fs;
use std::path::Path;

use thiserror::Error;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::decode::{DecodeLimits, decode_with_limits};
use crate::{DecodeSummary, Report, make_stub_report};

#[derive(Debug, Error)]
pub enum InspectError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Inspect a MessagePack file and build a versioned report.
///
/// Decode problems are not errors at this level: the report carries the
/// partial tree and the problem description in its summary, so shells can
/// render whatever was decoded.
pub fn inspect_file(path: &Path) -> Result<Report, InspectError> {
    inspect_file_with_limits(path, DecodeLimits::default())
}

/// [`inspect_file`] with explicit decode ceilings.
pub fn inspect_file_with_limits(path: &Path, limits: DecodeLimits) -> Result<Report, InspectError> {
    let data = fs::read(path)?;
    Ok(inspect_bytes(&path.display().to_string(), &data, limits))
}

/// Inspect an in-memory buffer (file loading already happened elsewhere).
pub fn inspect_bytes(input_path: &str, data: &[u8], limits: DecodeLimits) -> Report {
    let (tree, error) = decode_with_limits(data, limits);
    let mut report = make_stub_report(input_path, data.len() as u64);
    report.generated_at = now_rfc3339();
    report.summary = DecodeSummary {
        nodes_total: tree.node_count() as u64,
        max_depth: tree.max_depth() as u64,
        complete: error.is_none(),
        error: error.map(|err| err.to_string()),
    };
    report.tree = tree;
    report
}

fn now_rfc3339() -> String {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_else(|_| crate::DEFAULT_GENERATED_AT.to_string())
}
