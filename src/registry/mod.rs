//! Package registry abstraction.
//!
//! A [`MetadataSource`] resolves one exact package version into a
//! [`PackageRecord`]. [`NpmRegistry`] is the HTTP implementation.

mod npm;

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub use npm::{DEFAULT_LICENSE, DEFAULT_REGISTRY_URL, NpmRegistry};

/// Normalized metadata for one published package version.
///
/// Field order is the serialized key order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageRecord {
    /// Version reported by the registry document, not the requested one
    pub version: String,
    /// Tarball URL
    pub resolved: String,
    /// Subresource-integrity string, e.g. "sha512-..."
    pub integrity: String,
    pub license: String,
}

/// A package to look up, with the label it is reported under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageSpec {
    pub label: String,
    pub name: String,
    pub version: String,
}

impl PackageSpec {
    pub fn new(
        label: impl Into<String>,
        name: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            label: label.into(),
            name: name.into(),
            version: version.into(),
        }
    }

    /// The packages looked up when none are given on the command line.
    pub fn defaults() -> Vec<PackageSpec> {
        vec![
            PackageSpec::new("iap", "react-native-iap", "14.4.46"),
            PackageSpec::new("nitro", "react-native-nitro-modules", "0.31.10"),
        ]
    }
}

impl fmt::Display for PackageSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}@{}", self.label, self.name, self.version)
    }
}

impl FromStr for PackageSpec {
    type Err = anyhow::Error;

    /// Parses `label=name@version`. A leading `@` on the name is a scope.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || {
            anyhow::anyhow!(
                "Invalid package '{}'. Expected 'label=name@version'.",
                s
            )
        };

        let (label, rest) = s.split_once('=').ok_or_else(invalid)?;
        let at = rest.rfind('@').filter(|&i| i > 0).ok_or_else(invalid)?;
        let (name, version) = (&rest[..at], &rest[at + 1..]);

        if label.is_empty() || name.is_empty() || version.is_empty() {
            return Err(invalid());
        }

        Ok(PackageSpec::new(label, name, version))
    }
}

/// Trait for registries that can resolve an exact package version.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MetadataSource: Send + Sync {
    /// Fetch metadata for `package_name` at exactly `version`.
    async fn fetch(&self, package_name: &str, version: &str) -> Result<PackageRecord>;
}
