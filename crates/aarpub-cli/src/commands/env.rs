use miette::Result;

pub fn exec(reveal: bool) -> Result<()> {
    let project_root = super::project_root()?;
    let entries = aarpub_ops::ops_env::env(&project_root, reveal)?;

    let width = entries.iter().map(|e| e.key.len()).max().unwrap_or(0);
    for entry in &entries {
        println!("  {:<width$} = {}", entry.key, entry.value);
    }
    Ok(())
}
