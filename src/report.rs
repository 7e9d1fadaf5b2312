//! Rendering of fetched package records.

use anyhow::Result;
use indexmap::IndexMap;

use crate::registry::PackageRecord;

/// Records keyed by label, in fetch order.
pub type Report = IndexMap<String, PackageRecord>;

/// Render the report as 2-space indented JSON.
pub fn format(records: &Report) -> Result<String> {
    Ok(serde_json::to_string_pretty(records)?)
}

/// Render one `LABEL: integrity` line per record.
pub fn format_hashes(records: &Report) -> String {
    records
        .iter()
        .map(|(label, record)| format!("{}: {}\n", label.to_uppercase(), record.integrity))
        .collect()
}
