//! Publication assembly: one [`PublicationUnit`] per catalog descriptor.

use std::path::{Path, PathBuf};

use aarpub_core::catalog::PublicationDescriptor;
use aarpub_core::manifest::Manifest;
use aarpub_core::settings::PublishSettings;
use aarpub_util::errors::AarpubError;
use aarpub_util::fs::ensure_dir;

use crate::companion::{build_companions, CompanionKind};
use crate::pom::Pom;
use crate::repository::artifact_file_name;

/// What an [`Artifact`] is within its publication.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    /// The pre-built AAR.
    Primary,
    Sources,
    Javadoc,
    Pom,
}

impl ArtifactKind {
    pub fn classifier(self) -> Option<&'static str> {
        match self {
            ArtifactKind::Sources => Some(CompanionKind::Sources.classifier()),
            ArtifactKind::Javadoc => Some(CompanionKind::Javadoc.classifier()),
            ArtifactKind::Primary | ArtifactKind::Pom => None,
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            ArtifactKind::Primary => "aar",
            ArtifactKind::Sources | ArtifactKind::Javadoc => "jar",
            ArtifactKind::Pom => "pom",
        }
    }
}

/// A file belonging to a publication, with its detached signature once signed.
#[derive(Debug, Clone)]
pub struct Artifact {
    pub kind: ArtifactKind,
    pub file: PathBuf,
    pub signature: Option<PathBuf>,
}

impl Artifact {
    fn new(kind: ArtifactKind, file: PathBuf) -> Self {
        Self {
            kind,
            file,
            signature: None,
        }
    }

    /// File name of this artifact inside a Maven repository.
    pub fn repository_name(&self, artifact_id: &str, version: &str) -> String {
        artifact_file_name(
            artifact_id,
            version,
            self.kind.classifier(),
            self.kind.extension(),
        )
    }
}

/// Lifecycle of a publication unit. Each step is one-way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum UnitState {
    Assembled,
    Signed,
    Staged,
}

/// One named, publish-ready bundle: an AAR, its companions, and its POM.
#[derive(Debug, Clone)]
pub struct PublicationUnit {
    pub name: String,
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
    /// Primary archive, sources jar, javadoc jar, in that order.
    pub artifacts: Vec<Artifact>,
    pub pom: Pom,
    pub pom_file: Artifact,
    /// `build/publications/<name>`: the generated POM and every signature.
    pub work_dir: PathBuf,
    pub state: UnitState,
}

impl PublicationUnit {
    /// Maven coordinate string `group:artifact:version`.
    pub fn coordinate(&self) -> String {
        format!("{}:{}:{}", self.group_id, self.artifact_id, self.version)
    }

    /// Every file that is signed and installed: the artifacts then the POM.
    pub fn files(&self) -> impl Iterator<Item = &Artifact> {
        self.artifacts.iter().chain(std::iter::once(&self.pom_file))
    }

    pub fn files_mut(&mut self) -> impl Iterator<Item = &mut Artifact> {
        self.artifacts
            .iter_mut()
            .chain(std::iter::once(&mut self.pom_file))
    }

    /// Where the detached signature of `artifact` is written.
    pub fn signature_file(&self, artifact: &Artifact) -> PathBuf {
        self.work_dir.join(format!(
            "{}.asc",
            artifact.repository_name(&self.artifact_id, &self.version)
        ))
    }

    /// Move to `next`, which must be the state directly after the current one.
    pub fn advance(&mut self, next: UnitState) -> miette::Result<()> {
        let expected = match self.state {
            UnitState::Assembled => Some(UnitState::Signed),
            UnitState::Signed => Some(UnitState::Staged),
            UnitState::Staged => None,
        };
        if expected != Some(next) {
            return Err(AarpubError::Generic {
                message: format!(
                    "publication '{}' cannot move from {:?} to {next:?}",
                    self.name, self.state
                ),
            }
            .into());
        }
        self.state = next;
        Ok(())
    }
}

/// Directory that receives the companion jars.
pub fn companions_dir(build_dir: &Path) -> PathBuf {
    build_dir.join("companions")
}

/// Directory that receives the generated POM of a publication.
pub fn publication_dir(build_dir: &Path, publication: &str) -> PathBuf {
    build_dir.join("publications").join(publication)
}

/// Fail with [`AarpubError::MissingArchive`] on the first descriptor whose
/// archive is not on disk.
pub fn check_archives(
    settings: &PublishSettings,
    descriptors: &[&PublicationDescriptor],
) -> miette::Result<()> {
    for descriptor in descriptors {
        let archive = descriptor.archive_path(&settings.project_root);
        if !archive.is_file() {
            return Err(AarpubError::MissingArchive { path: archive }.into());
        }
    }
    Ok(())
}

/// Assemble every descriptor in `descriptors`.
///
/// All archives are checked before anything is written, so a missing archive
/// fails the run without producing any publication.
pub fn assemble_all(
    manifest: &Manifest,
    settings: &PublishSettings,
    descriptors: &[&PublicationDescriptor],
) -> miette::Result<Vec<PublicationUnit>> {
    check_archives(settings, descriptors)?;
    descriptors
        .iter()
        .map(|d| assemble(manifest, settings, d))
        .collect()
}

/// Assemble a single publication unit.
pub fn assemble(
    manifest: &Manifest,
    settings: &PublishSettings,
    descriptor: &PublicationDescriptor,
) -> miette::Result<PublicationUnit> {
    let archive = descriptor.archive_path(&settings.project_root);
    if !archive.is_file() {
        return Err(AarpubError::MissingArchive { path: archive }.into());
    }

    let group_id = manifest.project.group.clone();
    let version = settings.version.clone();
    let build_dir = settings.build_dir();

    let source_roots: Vec<PathBuf> = manifest
        .project
        .sources
        .iter()
        .map(|s| settings.project_root.join(s))
        .collect();
    let companions = build_companions(
        &descriptor.artifact_id,
        &version,
        &source_roots,
        &companions_dir(&build_dir),
    )?;

    let pom = Pom::generate(
        &descriptor.display_name,
        &group_id,
        &descriptor.artifact_id,
        &version,
        &manifest.pom,
    );
    let pom_dir = publication_dir(&build_dir, &descriptor.name);
    ensure_dir(&pom_dir).map_err(AarpubError::Io)?;
    let pom_path = pom_dir.join("pom-default.xml");
    std::fs::write(&pom_path, pom.to_xml()?).map_err(AarpubError::Io)?;

    tracing::info!(
        "assembled {} as {group_id}:{}:{version}",
        descriptor.name,
        descriptor.artifact_id
    );

    Ok(PublicationUnit {
        name: descriptor.name.clone(),
        group_id,
        artifact_id: descriptor.artifact_id.clone(),
        version,
        artifacts: vec![
            Artifact::new(ArtifactKind::Primary, archive),
            Artifact::new(ArtifactKind::Sources, companions.sources),
            Artifact::new(ArtifactKind::Javadoc, companions.javadoc),
        ],
        pom,
        pom_file: Artifact::new(ArtifactKind::Pom, pom_path),
        work_dir: pom_dir,
        state: UnitState::Assembled,
    })
}
