//! Operation: write a default `Aarpub.toml`.

use std::path::{Path, PathBuf};

use aarpub_core::manifest::{DEFAULT_MANIFEST, MANIFEST_FILE};
use aarpub_util::errors::AarpubError;

/// Write the default manifest into `dir`. Fails if one already exists.
pub fn init(dir: &Path) -> miette::Result<PathBuf> {
    let manifest_path = dir.join(MANIFEST_FILE);
    if manifest_path.exists() {
        return Err(AarpubError::Generic {
            message: format!("{MANIFEST_FILE} already exists in this directory"),
        }
        .into());
    }
    std::fs::write(&manifest_path, DEFAULT_MANIFEST).map_err(AarpubError::Io)?;
    Ok(manifest_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use aarpub_core::manifest::Manifest;

    #[test]
    fn init_writes_loadable_manifest() {
        let tmp = tempfile::tempdir().unwrap();
        let path = init(tmp.path()).unwrap();
        let manifest = Manifest::from_path(&path).unwrap();
        assert_eq!(manifest.catalog().len(), 2);
    }

    #[test]
    fn init_refuses_to_overwrite() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join(MANIFEST_FILE), "custom").unwrap();
        assert!(init(tmp.path()).is_err());
        assert_eq!(
            std::fs::read_to_string(tmp.path().join(MANIFEST_FILE)).unwrap(),
            "custom"
        );
    }
}
