use miette::Result;

use aarpub_ops::ops_clean::{clean, CleanResult};

pub fn exec() -> Result<()> {
    let project_root = super::project_root()?;
    match clean(&project_root)? {
        CleanResult::Cleaned(dirs) => {
            for dir in &dirs {
                println!("Removed {}", dir.display());
            }
        }
        CleanResult::NothingToClean => println!("Nothing to clean"),
    }
    Ok(())
}
