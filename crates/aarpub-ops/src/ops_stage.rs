//! Operation: assemble, sign and install publications into a local repository.
//!
//! This is the pipeline shared by `stage`, `publish-local`, `bundle` and
//! `publish`: select -> assemble -> sign -> install. Each phase runs for every
//! selected publication before the next one starts, so a failure leaves no
//! partially staged publication behind a fully staged one.

use std::path::Path;

use aarpub_maven::assemble::{assemble_all, PublicationUnit};
use aarpub_maven::install::install;
use aarpub_maven::metadata::timestamp_now;
use aarpub_maven::repository::LocalRepository;
use aarpub_maven::sign::{sign_units, signer_for, Signer};
use aarpub_util::progress::{status, status_warn};

use crate::PublishContext;

/// Outcome of a staging run.
pub struct StageResult {
    pub repository: LocalRepository,
    pub units: Vec<PublicationUnit>,
    /// Every file written into the repository, signatures and checksums
    /// included.
    pub files_written: usize,
    pub signed: bool,
}

/// Stage `publication` (or every publication) into `build/repos/bundles`.
pub fn stage(project_root: &Path, publication: Option<&str>) -> miette::Result<StageResult> {
    let ctx = PublishContext::load(project_root)?;
    let repo = LocalRepository::staging(&ctx.settings.repo_dir);
    stage_into(&ctx, &repo, publication)
}

/// Run the pipeline for `publication` (or all) into `repo`.
pub fn stage_into(
    ctx: &PublishContext,
    repo: &LocalRepository,
    publication: Option<&str>,
) -> miette::Result<StageResult> {
    let selected = ctx.manifest.catalog().select(publication)?;
    let mut units = assemble_all(&ctx.manifest, &ctx.settings, &selected)?;
    for unit in &units {
        status("Assembled", &unit.coordinate());
    }

    let signer = signer_for(&ctx.settings.signing)?;
    let signed = signer.is_some();
    if !signed {
        status_warn("Unsigned", "GPG_PRIVATE_KEY is empty, skipping signatures");
    }
    sign_units(&mut units, signer.as_ref().map(|s| s as &dyn Signer))?;
    if signed {
        status("Signed", &format!("{} publication(s)", units.len()));
    }

    let timestamp = timestamp_now();
    let mut files_written = 0;
    for unit in &mut units {
        files_written += install(repo, unit, &timestamp)?.len();
        status(
            "Installed",
            &format!("{} into {}", unit.coordinate(), repo.name),
        );
    }
    tracing::info!(
        "staged {} publication(s), {files_written} files, into {}",
        units.len(),
        repo.root.display()
    );

    Ok(StageResult {
        repository: repo.clone(),
        units,
        files_written,
        signed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{context, write_project};
    use aarpub_maven::assemble::UnitState;

    #[test]
    fn stage_all_into_staging_repository() {
        let tmp = tempfile::tempdir().unwrap();
        write_project(tmp.path());
        let ctx = context(tmp.path());
        let repo = LocalRepository::staging(&ctx.settings.repo_dir);

        let result = stage_into(&ctx, &repo, None).unwrap();
        assert_eq!(result.units.len(), 2);
        assert!(!result.signed);
        assert!(result.units.iter().all(|u| u.state == UnitState::Staged));
        // 4 files x (1 + 4 checksums) + metadata x (1 + 4 checksums), per unit
        assert_eq!(result.files_written, 2 * (4 * 5 + 5));
        assert!(tmp
            .path()
            .join("build/repos/bundles/com/michaeltchuang/algokit/algorand-foundation-provider/0.1.0/algorand-foundation-provider-0.1.0.aar")
            .is_file());
    }

    #[test]
    fn stage_single_publication() {
        let tmp = tempfile::tempdir().unwrap();
        write_project(tmp.path());
        let ctx = context(tmp.path());
        let repo = LocalRepository::staging(&ctx.settings.repo_dir);

        let result = stage_into(&ctx, &repo, Some("AlgorandFoundationCrypto")).unwrap();
        assert_eq!(result.units.len(), 1);
        assert!(!tmp
            .path()
            .join("build/repos/bundles/com/michaeltchuang/algokit/algorand-foundation-provider")
            .exists());
    }

    #[test]
    fn unknown_publication_is_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        write_project(tmp.path());
        let ctx = context(tmp.path());
        let repo = LocalRepository::staging(&ctx.settings.repo_dir);

        let err = stage_into(&ctx, &repo, Some("Nope")).err().unwrap();
        assert!(err.to_string().contains("No publication named 'Nope'"));
        assert!(!tmp.path().join("build").exists());
    }
}
