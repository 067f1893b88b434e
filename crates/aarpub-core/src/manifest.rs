use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::catalog::{Catalog, PublicationDescriptor};

/// File name of the project manifest.
pub const MANIFEST_FILE: &str = "Aarpub.toml";

/// Manifest written by `aarpub init`.
pub const DEFAULT_MANIFEST: &str = include_str!("../templates/Aarpub.toml");

/// The parsed representation of an `Aarpub.toml` file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub project: ProjectConfig,

    #[serde(default)]
    pub pom: PomConfig,

    #[serde(default)]
    pub central: CentralConfig,

    #[serde(default)]
    pub publication: Vec<PublicationDescriptor>,
}

/// Project-wide coordinates and inputs from `[project]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
    #[serde(default = "default_group")]
    pub group: String,
    /// Version used when `VERSION_TAG` is not set.
    #[serde(default = "default_version")]
    pub version: String,
    /// Main source directories packed into every sources jar.
    #[serde(default = "default_sources")]
    pub sources: Vec<String>,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            group: default_group(),
            version: default_version(),
            sources: default_sources(),
        }
    }
}

fn default_group() -> String {
    "com.michaeltchuang.algokit".to_string()
}

fn default_version() -> String {
    "0.1.0".to_string()
}

fn default_sources() -> Vec<String> {
    vec!["src/main/java".to_string(), "src/main/kotlin".to_string()]
}

/// Fixed POM facts shared by every publication, from `[pom]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PomConfig {
    /// Description template; `{name}` is replaced with the display name.
    #[serde(default = "default_description")]
    pub description: String,
    #[serde(default = "default_project_url")]
    pub url: String,
    #[serde(default = "default_inception_year", rename = "inception-year")]
    pub inception_year: String,
    #[serde(default)]
    pub license: LicenseConfig,
    #[serde(default)]
    pub developer: DeveloperConfig,
    #[serde(default)]
    pub scm: ScmConfig,
}

impl Default for PomConfig {
    fn default() -> Self {
        Self {
            description: default_description(),
            url: default_project_url(),
            inception_year: default_inception_year(),
            license: LicenseConfig::default(),
            developer: DeveloperConfig::default(),
            scm: ScmConfig::default(),
        }
    }
}

fn default_description() -> String {
    "{name}: Android Foundation Libraries".to_string()
}

fn default_project_url() -> String {
    "https://github.com/michaeltchuang/upload-aar-to-mavencentral".to_string()
}

fn default_inception_year() -> String {
    "2025".to_string()
}

/// `<license>` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LicenseConfig {
    pub name: String,
    pub url: String,
}

impl Default for LicenseConfig {
    fn default() -> Self {
        Self {
            name: "The Apache License, Version 2.0".to_string(),
            url: "https://github.com/michaeltchuang/upload-aar-to-mavencentral/blob/main/LICENSE"
                .to_string(),
        }
    }
}

/// `<developer>` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeveloperConfig {
    pub id: String,
    pub name: String,
    pub email: String,
}

impl Default for DeveloperConfig {
    fn default() -> Self {
        Self {
            id: "michaeltchuang".to_string(),
            name: "Michael T Chuang".to_string(),
            email: "hello@michaeltchuang.com".to_string(),
        }
    }
}

/// `<scm>` block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScmConfig {
    pub connection: String,
    #[serde(rename = "developer-connection")]
    pub developer_connection: String,
    pub url: String,
}

impl Default for ScmConfig {
    fn default() -> Self {
        Self {
            connection: "scm:git:git://github.com/michaeltchuang/upload-aar-to-mavencentral.git"
                .to_string(),
            developer_connection:
                "scm:git:ssh://git@github.com/michaeltchuang/upload-aar-to-mavencentral.git"
                    .to_string(),
            url: "https://github.com/michaeltchuang/upload-aar-to-mavencentral".to_string(),
        }
    }
}

/// How the portal treats an uploaded deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PublishingType {
    /// Validated deployments wait for the user to release them in the portal.
    UserManaged,
    /// Validated deployments are released immediately.
    Automatic,
}

impl PublishingType {
    /// Query-string value expected by the portal API.
    pub fn as_str(self) -> &'static str {
        match self {
            PublishingType::UserManaged => "USER_MANAGED",
            PublishingType::Automatic => "AUTOMATIC",
        }
    }
}

impl std::fmt::Display for PublishingType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Central Publisher Portal settings from `[central]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CentralConfig {
    #[serde(default = "default_portal_url")]
    pub url: String,
    #[serde(default = "default_publishing_type", rename = "publishing-type")]
    pub publishing_type: PublishingType,
    /// Seconds to wait for the deployment to settle.
    #[serde(default = "default_max_wait", rename = "max-wait")]
    pub max_wait: u64,
}

impl Default for CentralConfig {
    fn default() -> Self {
        Self {
            url: default_portal_url(),
            publishing_type: default_publishing_type(),
            max_wait: default_max_wait(),
        }
    }
}

fn default_portal_url() -> String {
    "https://central.sonatype.com".to_string()
}

fn default_publishing_type() -> PublishingType {
    PublishingType::UserManaged
}

fn default_max_wait() -> u64 {
    500
}

impl Manifest {
    /// Load and parse an `Aarpub.toml` file, then validate its catalog.
    pub fn from_path(path: &Path) -> miette::Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            aarpub_util::errors::AarpubError::Manifest {
                message: format!("Failed to read {}: {e}", path.display()),
            }
        })?;
        let manifest = Self::parse_toml(&content)?;
        manifest.catalog().validate()?;
        Ok(manifest)
    }

    /// Parse an `Aarpub.toml` from a string. The catalog is not validated.
    pub fn parse_toml(content: &str) -> miette::Result<Self> {
        toml::from_str(content).map_err(|e| {
            aarpub_util::errors::AarpubError::Manifest {
                message: format!("Failed to parse Aarpub.toml: {e}"),
            }
            .into()
        })
    }

    /// The publication catalog, in declaration order.
    pub fn catalog(&self) -> Catalog<'_> {
        Catalog::new(&self.publication)
    }
}
