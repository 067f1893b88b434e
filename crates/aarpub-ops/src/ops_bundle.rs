//! Operation: stage every publication and zip the staging repository.

use std::path::{Path, PathBuf};

use aarpub_maven::assemble::check_archives;
use aarpub_maven::bundle::create_bundle;
use aarpub_maven::repository::LocalRepository;
use aarpub_util::errors::AarpubError;
use aarpub_util::fs::remove_dir_if_exists;
use aarpub_util::progress::status;

use crate::ops_stage::{stage_into, StageResult};
use crate::PublishContext;

/// Outcome of a bundle run.
pub struct BundleResult {
    pub stage: StageResult,
    pub bundle_path: PathBuf,
    pub entries: usize,
}

/// `<project>/build/repos/bundle.zip`.
pub fn bundle_path(project_root: &Path) -> PathBuf {
    project_root.join("build").join("repos").join("bundle.zip")
}

/// Stage every publication into a fresh staging repository and zip it.
pub fn bundle(project_root: &Path) -> miette::Result<BundleResult> {
    let ctx = PublishContext::load(project_root)?;
    bundle_ctx(&ctx)
}

pub fn bundle_ctx(ctx: &PublishContext) -> miette::Result<BundleResult> {
    let selected = ctx.manifest.catalog().select(None)?;
    check_archives(&ctx.settings, &selected)?;

    // Versions staged by earlier runs must not ride along in the upload.
    if remove_dir_if_exists(&ctx.settings.repo_dir).map_err(AarpubError::Io)? {
        tracing::debug!("cleared {}", ctx.settings.repo_dir.display());
    }

    let repo = LocalRepository::staging(&ctx.settings.repo_dir);
    let stage = stage_into(ctx, &repo, None)?;

    let path = bundle_path(&ctx.project_root);
    let entries = create_bundle(&ctx.settings.repo_dir, &path)?;
    status("Bundled", &format!("{entries} files into {}", path.display()));

    Ok(BundleResult {
        stage,
        bundle_path: path,
        entries,
    })
}
