use anyhow::{Context, Result};
use log::debug;
use std::collections::HashSet;

use crate::{
    registry::{MetadataSource, PackageSpec},
    report::Report,
};

pub mod config;
mod hashes;
mod report;

pub use hashes::{hashes, write_hashes};
pub use report::{render_report, report};

/// Fetch every package in order, stopping at the first failure.
///
/// Each fetch completes before the next one starts.
#[tracing::instrument(skip(source))]
pub async fn collect_records<S: MetadataSource + ?Sized>(
    source: &S,
    packages: &[PackageSpec],
) -> Result<Report> {
    let mut seen = HashSet::new();
    for spec in packages {
        if !seen.insert(spec.label.as_str()) {
            anyhow::bail!("Duplicate package label '{}'.", spec.label);
        }
    }

    let mut report = Report::with_capacity(packages.len());
    for spec in packages {
        debug!("Fetching {}...", spec);
        let record = source
            .fetch(&spec.name, &spec.version)
            .await
            .with_context(|| format!("Failed to fetch {}@{}", spec.name, spec.version))?;
        report.insert(spec.label.clone(), record);
    }

    Ok(report)
}
