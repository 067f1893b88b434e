use miette::Result;

use aarpub_util::progress::status;

pub fn exec(publication: Option<&str>, verbose: bool) -> Result<()> {
    let project_root = super::project_root()?;
    let result = aarpub_ops::ops_stage::stage(&project_root, publication)?;

    if verbose {
        for unit in &result.units {
            println!("  {}", unit.coordinate());
        }
    }
    status(
        "Finished",
        &format!(
            "{} publication(s) staged in {}",
            result.units.len(),
            result.repository.root.display()
        ),
    );
    Ok(())
}
