//! Handler for `aarpub publish`.

use miette::Result;

use aarpub_ops::ops_publish::{publish, PublishOptions};
use aarpub_util::errors::AarpubError;

pub fn exec() -> Result<()> {
    let project_root = super::project_root()?;

    let rt = tokio::runtime::Runtime::new().map_err(|e| AarpubError::Generic {
        message: format!("Failed to start async runtime: {e}"),
    })?;

    let result = rt.block_on(publish(&project_root, &PublishOptions::default()))?;
    for purl in &result.status.purls {
        println!("  {purl}");
    }
    Ok(())
}
