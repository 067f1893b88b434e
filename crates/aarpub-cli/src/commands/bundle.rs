use miette::Result;

use aarpub_util::progress::status;

pub fn exec() -> Result<()> {
    let project_root = super::project_root()?;
    let result = aarpub_ops::ops_bundle::bundle(&project_root)?;
    status(
        "Finished",
        &format!(
            "{} ({} publication(s), {} files)",
            result.bundle_path.display(),
            result.stage.units.len(),
            result.entries
        ),
    );
    Ok(())
}
