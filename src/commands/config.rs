use anyhow::Result;
use log::debug;
use reqwest::Client;

use crate::{
    registry::{DEFAULT_REGISTRY_URL, MetadataSource, NpmRegistry, PackageSpec},
    runtime::Runtime,
};

pub struct Config<R: Runtime, S: MetadataSource> {
    pub runtime: R,
    pub source: S,
    pub packages: Vec<PackageSpec>,
}

impl<R: Runtime> Config<R, NpmRegistry> {
    /// Build the registry client. An empty `packages` list means
    /// [`PackageSpec::defaults`].
    pub fn new(
        runtime: R,
        registry_url: Option<String>,
        packages: Vec<PackageSpec>,
    ) -> Result<Self> {
        // No custom headers and no timeout override: requests go out with
        // reqwest's defaults.
        let client = Client::builder().build()?;

        let registry_url = registry_url.unwrap_or_else(|| DEFAULT_REGISTRY_URL.to_string());
        debug!("Using registry {}", registry_url);

        let source = NpmRegistry::with_registry_url(client, &registry_url);

        let packages = if packages.is_empty() {
            PackageSpec::defaults()
        } else {
            packages
        };

        Ok(Self {
            runtime,
            source,
            packages,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::MockRuntime;
    use mockito::{Matcher, Server};

    #[test]
    fn test_config_defaults() {
        let config = Config::new(MockRuntime::new(), None, vec![]).unwrap();
        assert_eq!(config.source.registry_url(), DEFAULT_REGISTRY_URL);
        assert_eq!(config.packages, PackageSpec::defaults());
    }

    #[test]
    fn test_config_custom_packages() {
        let packages = vec![PackageSpec::new("lodash", "lodash", "4.17.21")];
        let config = Config::new(
            MockRuntime::new(),
            Some("https://mirror.example".into()),
            packages.clone(),
        )
        .unwrap();

        assert_eq!(config.source.registry_url(), "https://mirror.example");
        assert_eq!(config.packages, packages);
    }

    #[tokio::test]
    async fn test_config_sends_no_credentials() {
        let mut server = Server::new_async().await;

        let mock = server
            .mock("GET", "/pkg/1.0.0")
            .match_header("authorization", Matcher::Missing)
            .with_status(200)
            .with_body(r#"{"version": "1.0.0", "dist": {"tarball": "t", "integrity": "i"}}"#)
            .create_async()
            .await;

        let config = Config::new(MockRuntime::new(), Some(server.url()), vec![]).unwrap();
        let record = config.source.fetch("pkg", "1.0.0").await.unwrap();

        mock.assert_async().await;
        assert_eq!(record.integrity, "i");
    }
}
