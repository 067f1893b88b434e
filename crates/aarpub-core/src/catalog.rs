//! The publication catalog: one descriptor per AAR to publish.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use aarpub_util::errors::AarpubError;

/// One `[[publication]]` entry in `Aarpub.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicationDescriptor {
    /// Publication name, unique within the catalog.
    pub name: String,
    /// Maven artifact id, unique within the project group.
    #[serde(rename = "artifact-id")]
    pub artifact_id: String,
    /// Path to the pre-built AAR, relative to the project root.
    pub archive: String,
    /// Human-readable name used in the POM.
    #[serde(rename = "display-name")]
    pub display_name: String,
}

impl PublicationDescriptor {
    /// Absolute path of the archive for a given project root.
    pub fn archive_path(&self, project_root: &Path) -> PathBuf {
        project_root.join(&self.archive)
    }
}

/// Ordered, borrowed view over the descriptors of a manifest.
#[derive(Debug, Clone, Copy)]
pub struct Catalog<'a> {
    entries: &'a [PublicationDescriptor],
}

impl<'a> Catalog<'a> {
    pub fn new(entries: &'a [PublicationDescriptor]) -> Self {
        Self { entries }
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a PublicationDescriptor> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up a descriptor by publication name.
    pub fn find(&self, name: &str) -> Option<&'a PublicationDescriptor> {
        self.entries.iter().find(|d| d.name == name)
    }

    /// Every descriptor when `name` is `None`, otherwise exactly the named one.
    pub fn select(&self, name: Option<&str>) -> miette::Result<Vec<&'a PublicationDescriptor>> {
        match name {
            None => Ok(self.entries.iter().collect()),
            Some(name) => {
                let found = self.find(name).ok_or_else(|| AarpubError::Catalog {
                    message: format!(
                        "No publication named '{name}'. Available: {}",
                        self.entries
                            .iter()
                            .map(|d| d.name.as_str())
                            .collect::<Vec<_>>()
                            .join(", ")
                    ),
                })?;
                Ok(vec![found])
            }
        }
    }

    /// Reject empty fields and duplicate names or artifact ids.
    pub fn validate(&self) -> miette::Result<()> {
        let mut names = HashSet::new();
        let mut artifact_ids = HashSet::new();

        for (index, d) in self.entries.iter().enumerate() {
            for (field, value) in [
                ("name", &d.name),
                ("artifact-id", &d.artifact_id),
                ("archive", &d.archive),
                ("display-name", &d.display_name),
            ] {
                if value.trim().is_empty() {
                    return Err(AarpubError::Catalog {
                        message: format!("publication #{} has an empty `{field}`", index + 1),
                    }
                    .into());
                }
            }
            if !names.insert(d.name.as_str()) {
                return Err(AarpubError::Catalog {
                    message: format!("duplicate publication name '{}'", d.name),
                }
                .into());
            }
            if !artifact_ids.insert(d.artifact_id.as_str()) {
                return Err(AarpubError::Catalog {
                    message: format!("duplicate artifact-id '{}'", d.artifact_id),
                }
                .into());
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor(name: &str, artifact_id: &str) -> PublicationDescriptor {
        PublicationDescriptor {
            name: name.to_string(),
            artifact_id: artifact_id.to_string(),
            archive: format!("{artifact_id}.aar"),
            display_name: name.to_string(),
        }
    }

    #[test]
    fn select_all_keeps_order() {
        let entries = vec![descriptor("B", "b"), descriptor("A", "a")];
        let catalog = Catalog::new(&entries);
        let names: Vec<_> = catalog
            .select(None)
            .unwrap()
            .iter()
            .map(|d| d.name.clone())
            .collect();
        assert_eq!(names, vec!["B", "A"]);
    }

    #[test]
    fn select_unknown_name_fails() {
        let entries = vec![descriptor("A", "a")];
        let err = Catalog::new(&entries).select(Some("Nope")).unwrap_err();
        assert!(err.to_string().contains("No publication named 'Nope'"));
    }

    #[test]
    fn duplicate_artifact_id_rejected() {
        let entries = vec![descriptor("A", "same"), descriptor("B", "same")];
        let err = Catalog::new(&entries).validate().unwrap_err();
        assert!(err.to_string().contains("duplicate artifact-id 'same'"));
    }

    #[test]
    fn duplicate_name_rejected() {
        let entries = vec![descriptor("A", "a"), descriptor("A", "b")];
        assert!(Catalog::new(&entries).validate().is_err());
    }

    #[test]
    fn empty_field_rejected() {
        let mut d = descriptor("A", "a");
        d.archive = " ".to_string();
        let entries = vec![d];
        let err = Catalog::new(&entries).validate().unwrap_err();
        assert!(err.to_string().contains("empty `archive`"));
    }
}
