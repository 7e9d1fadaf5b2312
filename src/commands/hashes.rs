use anyhow::Result;
use log::{debug, info};
use std::path::{Path, PathBuf};

use crate::{
    registry::{MetadataSource, PackageSpec},
    report::format_hashes,
    runtime::Runtime,
};

use super::{collect_records, config::Config};

/// Write the integrity hash of every configured package to `output`
#[tracing::instrument(skip(runtime, registry_url))]
pub async fn hashes<R: Runtime>(
    runtime: R,
    registry_url: Option<String>,
    packages: Vec<PackageSpec>,
    output: PathBuf,
) -> Result<()> {
    let config = Config::new(runtime, registry_url, packages)?;
    write_hashes(&config.runtime, &config.source, &config.packages, &output).await?;
    println!("Hashes written to {}", output.display());
    Ok(())
}

/// Fetch all packages, then write the hashes file. The file is left
/// untouched when any fetch fails.
pub async fn write_hashes<R: Runtime, S: MetadataSource + ?Sized>(
    runtime: &R,
    source: &S,
    packages: &[PackageSpec],
    output: &Path,
) -> Result<()> {
    let records = collect_records(source, packages).await?;
    let contents = format_hashes(&records);

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        if !runtime.exists(parent) {
            debug!("Creating directory {:?}", parent);
            runtime.create_dir_all(parent)?;
        }
    }

    runtime.write(output, contents.as_bytes())?;
    info!("Wrote {} hashes to {:?}", records.len(), output);
    Ok(())
}
