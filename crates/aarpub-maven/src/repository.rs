//! Maven repository layout: coordinate paths, file names, repository kinds.

use std::path::{Path, PathBuf};

/// What kind of local repository files are installed into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepositoryKind {
    /// The staging directory handed to the portal. Every file gets checksum
    /// sidecars and the artifact keeps a `maven-metadata.xml`.
    Staging,
    /// The user's `~/.m2/repository`. No checksums; metadata goes to
    /// `maven-metadata-local.xml`.
    MavenLocal,
}

impl RepositoryKind {
    /// File name of the artifact-level metadata document.
    pub fn metadata_file_name(self) -> &'static str {
        match self {
            RepositoryKind::Staging => "maven-metadata.xml",
            RepositoryKind::MavenLocal => "maven-metadata-local.xml",
        }
    }

    pub fn writes_checksums(self) -> bool {
        matches!(self, RepositoryKind::Staging)
    }
}

/// A repository rooted in a local directory.
#[derive(Debug, Clone)]
pub struct LocalRepository {
    pub name: String,
    pub root: PathBuf,
    pub kind: RepositoryKind,
}

impl LocalRepository {
    /// The staging repository at `dir` (normally `build/repos/bundles`).
    pub fn staging(dir: &Path) -> Self {
        Self {
            name: "Local".to_string(),
            root: dir.to_path_buf(),
            kind: RepositoryKind::Staging,
        }
    }

    /// The user's Maven local repository, `~/.m2/repository`.
    pub fn maven_local() -> Self {
        Self {
            name: "MavenLocal".to_string(),
            root: maven_local_path(),
            kind: RepositoryKind::MavenLocal,
        }
    }

    /// Standard Maven layout path for a given coordinate.
    ///
    /// `com.michaeltchuang.algokit:algorand-foundation-crypto:0.1.0` becomes
    /// `com/michaeltchuang/algokit/algorand-foundation-crypto/0.1.0`
    pub fn coordinate_path(group: &str, artifact: &str, version: &str) -> String {
        format!("{}/{}/{}", group.replace('.', "/"), artifact, version)
    }

    /// Directory holding every version of an artifact.
    pub fn artifact_root(&self, group: &str, artifact: &str) -> PathBuf {
        self.root.join(group.replace('.', "/")).join(artifact)
    }

    /// Directory holding the files of one version.
    pub fn version_dir(&self, group: &str, artifact: &str, version: &str) -> PathBuf {
        self.artifact_root(group, artifact).join(version)
    }

    /// Path of the artifact-level metadata document.
    pub fn metadata_path(&self, group: &str, artifact: &str) -> PathBuf {
        self.artifact_root(group, artifact)
            .join(self.kind.metadata_file_name())
    }
}

/// Repository file name: `<artifact>-<version>[-<classifier>].<extension>`.
pub fn artifact_file_name(
    artifact: &str,
    version: &str,
    classifier: Option<&str>,
    extension: &str,
) -> String {
    match classifier {
        Some(c) => format!("{artifact}-{version}-{c}.{extension}"),
        None => format!("{artifact}-{version}.{extension}"),
    }
}

/// `~/.m2/repository`, falling back to `./.m2/repository` without a home.
pub fn maven_local_path() -> PathBuf {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .unwrap_or_else(|_| ".".to_string());
    Path::new(&home).join(".m2").join("repository")
}
