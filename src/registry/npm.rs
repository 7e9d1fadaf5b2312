//! npm-compatible registry implementation.

use anyhow::Result;
use async_trait::async_trait;
use log::debug;
use reqwest::Client;

use crate::http::HttpClient;

use super::{MetadataSource, PackageRecord};

pub const DEFAULT_REGISTRY_URL: &str = "https://registry.npmjs.org";

/// License reported when the registry document carries none. This is a
/// fallback, not a verified fact.
pub const DEFAULT_LICENSE: &str = "MIT";

/// Registry response types (internal).
mod api {
    use serde::Deserialize;

    /// The per-version document served at `/<name>/<version>`.
    #[derive(Deserialize, Debug)]
    pub struct VersionDocument {
        pub version: String,
        pub dist: Dist,
        #[serde(default)]
        pub license: Option<License>,
    }

    #[derive(Deserialize, Debug)]
    pub struct Dist {
        pub tarball: String,
        pub integrity: String,
    }

    #[derive(Deserialize, Debug, PartialEq)]
    #[serde(untagged)]
    pub enum License {
        Spdx(String),
        /// Old packages publish `{"type": "MIT", "url": "..."}`
        Legacy {
            #[serde(rename = "type")]
            kind: String,
        },
        /// Anything else (arrays, numbers, objects without `type`)
        Other(serde_json::Value),
    }
}

/// Registry speaking the npm per-version metadata API.
pub struct NpmRegistry {
    http_client: HttpClient,
    registry_url: String,
}

impl NpmRegistry {
    /// Create a registry client for the public npm registry.
    pub fn new(client: Client) -> Self {
        Self::with_registry_url(client, DEFAULT_REGISTRY_URL)
    }

    /// Create a registry client for a custom base URL.
    pub fn with_registry_url(client: Client, registry_url: &str) -> Self {
        Self::from_http_client(HttpClient::new(client), registry_url)
    }

    /// Create from an existing HttpClient.
    pub fn from_http_client(http_client: HttpClient, registry_url: &str) -> Self {
        Self {
            http_client,
            registry_url: registry_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn registry_url(&self) -> &str {
        &self.registry_url
    }

    /// Package names are interpolated as-is.
    pub fn version_url(&self, package_name: &str, version: &str) -> String {
        format!("{}/{}/{}", self.registry_url, package_name, version)
    }
}

#[async_trait]
impl MetadataSource for NpmRegistry {
    #[tracing::instrument(skip(self))]
    async fn fetch(&self, package_name: &str, version: &str) -> Result<PackageRecord> {
        let url = self.version_url(package_name, version);
        debug!("Fetching {}@{} from {}...", package_name, version, url);

        let document: api::VersionDocument = self.http_client.get_json(&url).await?;
        if document.version != version {
            debug!(
                "Registry resolved {}@{} to version {}",
                package_name, version, document.version
            );
        }

        Ok(document.into())
    }
}

impl From<api::VersionDocument> for PackageRecord {
    fn from(doc: api::VersionDocument) -> Self {
        let license = match doc.license {
            Some(api::License::Spdx(id)) => id,
            Some(api::License::Legacy { kind }) => kind,
            Some(api::License::Other(value)) => value.to_string(),
            None => DEFAULT_LICENSE.to_string(),
        };

        PackageRecord {
            version: doc.version,
            resolved: doc.dist.tarball,
            integrity: doc.dist.integrity,
            license,
        }
    }
}
