use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// File-system seam for commands that produce files.
#[cfg_attr(test, mockall::automock)]
pub trait Runtime: Send + Sync {
    fn write(&self, path: &Path, contents: &[u8]) -> Result<()>;
    fn create_dir_all(&self, path: &Path) -> Result<()>;
    fn exists(&self, path: &Path) -> bool;
}

pub struct RealRuntime;

impl Runtime for RealRuntime {
    #[tracing::instrument(skip(self, contents))]
    fn write(&self, path: &Path, contents: &[u8]) -> Result<()> {
        fs::write(path, contents)
            .with_context(|| format!("Failed to write to {}", path.display()))?;
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    fn create_dir_all(&self, path: &Path) -> Result<()> {
        fs::create_dir_all(path)
            .with_context(|| format!("Failed to create directory {}", path.display()))?;
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_real_runtime_write_and_exists() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("a/b");
        let file = nested.join("hashes.txt");
        let runtime = RealRuntime;

        assert!(!runtime.exists(&nested));
        runtime.create_dir_all(&nested).unwrap();
        assert!(runtime.exists(&nested));

        runtime.write(&file, b"IAP: sha512-AAA\n").unwrap();
        assert_eq!(fs::read_to_string(&file).unwrap(), "IAP: sha512-AAA\n");
    }

    #[test]
    fn test_real_runtime_write_missing_parent_fails() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("missing/hashes.txt");

        let err = RealRuntime.write(&file, b"x").unwrap_err();
        assert!(err.to_string().contains("hashes.txt"));
    }
}
