use console::Style;
use miette::Result;

pub fn exec() -> Result<()> {
    let project_root = super::project_root()?;
    let listed = aarpub_ops::ops_list::list(&project_root)?;

    let dim = Style::new().dim();
    let warn = Style::new().yellow();
    for p in &listed {
        let archive = if p.archive_present {
            dim.apply_to(p.archive.clone())
        } else {
            warn.apply_to(format!("{} (missing)", p.archive))
        };
        println!("{}  {}  {}", p.name, p.coordinate, archive);
    }
    Ok(())
}
