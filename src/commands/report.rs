use anyhow::Result;

use crate::{
    registry::{MetadataSource, PackageSpec},
    report::format,
    runtime::Runtime,
};

use super::{collect_records, config::Config};

/// Print the JSON report for all configured packages
#[tracing::instrument(skip(runtime, registry_url))]
pub async fn report<R: Runtime>(
    runtime: R,
    registry_url: Option<String>,
    packages: Vec<PackageSpec>,
) -> Result<()> {
    let config = Config::new(runtime, registry_url, packages)?;
    let text = render_report(&config.source, &config.packages).await?;
    println!("{}", text);
    Ok(())
}

/// Fetch all packages and render them. Nothing is rendered unless every
/// fetch succeeds.
pub async fn render_report<S: MetadataSource + ?Sized>(
    source: &S,
    packages: &[PackageSpec],
) -> Result<String> {
    let records = collect_records(source, packages).await?;
    format(&records)
}
