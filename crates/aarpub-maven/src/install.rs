//! Installing signed publication units into a local Maven repository.

use std::path::{Path, PathBuf};

use aarpub_util::errors::AarpubError;
use aarpub_util::fs::ensure_dir;

use crate::assemble::{PublicationUnit, UnitState};
use crate::checksum;
use crate::metadata::MavenMetadata;
use crate::repository::LocalRepository;
use crate::sign::signature_path;

/// Copy every file of `unit` (and its signatures) into `repo`, then record
/// the version in the artifact metadata. `timestamp` is `yyyyMMddHHmmss`.
///
/// Returns the paths written, in install order.
pub fn install(
    repo: &LocalRepository,
    unit: &mut PublicationUnit,
    timestamp: &str,
) -> miette::Result<Vec<PathBuf>> {
    if unit.state != UnitState::Signed {
        return Err(AarpubError::Generic {
            message: format!(
                "publication '{}' must be signed before it is installed (is {:?})",
                unit.name, unit.state
            ),
        }
        .into());
    }

    let dir = repo.version_dir(&unit.group_id, &unit.artifact_id, &unit.version);
    ensure_dir(&dir).map_err(AarpubError::Io)?;

    let mut written = Vec::new();
    for artifact in unit.files() {
        let dest = dir.join(artifact.repository_name(&unit.artifact_id, &unit.version));
        copy_file(&artifact.file, &dest)?;
        written.push(dest.clone());
        if repo.kind.writes_checksums() {
            written.extend(checksum::write_sidecars(&dest)?);
        }
        if let Some(ref sig) = artifact.signature {
            let sig_dest = signature_path(&dest);
            copy_file(sig, &sig_dest)?;
            written.push(sig_dest);
        }
    }

    let meta_path = repo.metadata_path(&unit.group_id, &unit.artifact_id);
    let mut meta = MavenMetadata::load_or_new(&meta_path, &unit.group_id, &unit.artifact_id)?;
    meta.record_version(&unit.version, timestamp);
    std::fs::write(&meta_path, meta.to_xml()?).map_err(AarpubError::Io)?;
    written.push(meta_path.clone());
    if repo.kind.writes_checksums() {
        written.extend(checksum::write_sidecars(&meta_path)?);
    }

    unit.advance(UnitState::Staged)?;
    tracing::info!(
        "installed {} into {} ({})",
        unit.coordinate(),
        repo.name,
        repo.root.display()
    );
    Ok(written)
}

fn copy_file(from: &Path, to: &Path) -> miette::Result<()> {
    std::fs::copy(from, to).map_err(|e| AarpubError::Generic {
        message: format!("Failed to copy {} to {}: {e}", from.display(), to.display()),
    })?;
    tracing::debug!("wrote {}", to.display());
    Ok(())
}
