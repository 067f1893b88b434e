//! Operation: describe the publication catalog.

use std::path::Path;

use crate::PublishContext;

/// One catalog entry with its resolved coordinate.
#[derive(Debug, Clone)]
pub struct ListedPublication {
    pub name: String,
    pub coordinate: String,
    pub archive: String,
    pub archive_present: bool,
}

pub fn list(project_root: &Path) -> miette::Result<Vec<ListedPublication>> {
    let ctx = PublishContext::load(project_root)?;
    Ok(list_ctx(&ctx))
}

pub fn list_ctx(ctx: &PublishContext) -> Vec<ListedPublication> {
    ctx.manifest
        .catalog()
        .iter()
        .map(|d| ListedPublication {
            name: d.name.clone(),
            coordinate: format!(
                "{}:{}:{}",
                ctx.manifest.project.group, d.artifact_id, ctx.settings.version
            ),
            archive: d.archive.clone(),
            archive_present: d.archive_path(&ctx.project_root).is_file(),
        })
        .collect()
}
