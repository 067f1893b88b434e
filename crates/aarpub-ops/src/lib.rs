pub mod ops_bundle;
pub mod ops_clean;
pub mod ops_env;
pub mod ops_init;
pub mod ops_list;
pub mod ops_publish;
pub mod ops_publish_local;
pub mod ops_stage;

use std::path::{Path, PathBuf};

use aarpub_core::manifest::{Manifest, MANIFEST_FILE};
use aarpub_core::properties::EnvSnapshot;
use aarpub_core::settings::PublishSettings;

/// Manifest and settings loaded once per command and shared by every stage.
#[derive(Debug, Clone)]
pub struct PublishContext {
    pub project_root: PathBuf,
    pub manifest: Manifest,
    pub settings: PublishSettings,
}

impl PublishContext {
    /// Load `Aarpub.toml` and resolve settings from `.aarpub.env` and the
    /// process environment.
    pub fn load(project_root: &Path) -> miette::Result<Self> {
        let manifest = Manifest::from_path(&project_root.join(MANIFEST_FILE))?;
        let settings = PublishSettings::from_environment(&manifest, project_root)?;
        Ok(Self {
            project_root: project_root.to_path_buf(),
            manifest,
            settings,
        })
    }

    /// Load `Aarpub.toml` and resolve settings from an explicit snapshot.
    pub fn with_env(project_root: &Path, env: &EnvSnapshot) -> miette::Result<Self> {
        let manifest = Manifest::from_path(&project_root.join(MANIFEST_FILE))?;
        let settings = PublishSettings::resolve(&manifest, project_root, env);
        Ok(Self {
            project_root: project_root.to_path_buf(),
            manifest,
            settings,
        })
    }
}
