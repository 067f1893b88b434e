use miette::Result;

use aarpub_util::errors::AarpubError;

pub fn exec() -> Result<()> {
    let cwd = std::env::current_dir().map_err(AarpubError::Io)?;
    let path = aarpub_ops::ops_init::init(&cwd)?;
    println!("Created {}", path.display());
    println!("Edit the [[publication]] entries, then run `aarpub stage`.");
    Ok(())
}
