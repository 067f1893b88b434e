//! POM generation for AAR publications.

use aarpub_core::manifest::{DeveloperConfig, LicenseConfig, PomConfig, ScmConfig};

use crate::xml::XmlDoc;

const POM_NAMESPACE: &str = "http://maven.apache.org/POM/4.0.0";
const XSI_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema-instance";
const POM_SCHEMA_LOCATION: &str =
    "http://maven.apache.org/POM/4.0.0 https://maven.apache.org/xsd/maven-4.0.0.xsd";

/// The POM of one publication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pom {
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
    pub packaging: String,
    pub name: String,
    pub description: String,
    pub url: String,
    pub inception_year: String,
    pub license: LicenseConfig,
    pub developer: DeveloperConfig,
    pub scm: ScmConfig,
}

impl Pom {
    /// Build the POM for a display name from the project's fixed facts.
    pub fn generate(
        display_name: &str,
        group_id: &str,
        artifact_id: &str,
        version: &str,
        facts: &PomConfig,
    ) -> Self {
        Self {
            group_id: group_id.to_string(),
            artifact_id: artifact_id.to_string(),
            version: version.to_string(),
            packaging: "aar".to_string(),
            name: display_name.to_string(),
            description: describe(&facts.description, display_name),
            url: facts.url.clone(),
            inception_year: facts.inception_year.clone(),
            license: facts.license.clone(),
            developer: facts.developer.clone(),
            scm: facts.scm.clone(),
        }
    }

    /// Render as a `pom.xml` document. Identical input renders identical bytes.
    pub fn to_xml(&self) -> miette::Result<String> {
        let mut doc = XmlDoc::new()?;
        doc.start_with_attrs(
            "project",
            &[
                ("xmlns", POM_NAMESPACE),
                ("xmlns:xsi", XSI_NAMESPACE),
                ("xsi:schemaLocation", POM_SCHEMA_LOCATION),
            ],
        )?;
        doc.text("modelVersion", "4.0.0")?
            .text("groupId", &self.group_id)?
            .text("artifactId", &self.artifact_id)?
            .text("version", &self.version)?
            .text("packaging", &self.packaging)?
            .text("name", &self.name)?
            .text("description", &self.description)?
            .text("url", &self.url)?
            .text("inceptionYear", &self.inception_year)?;

        doc.start("licenses")?.start("license")?;
        doc.text("name", &self.license.name)?
            .text("url", &self.license.url)?;
        doc.end("license")?.end("licenses")?;

        doc.start("developers")?.start("developer")?;
        doc.text("id", &self.developer.id)?
            .text("name", &self.developer.name)?
            .text("email", &self.developer.email)?;
        doc.end("developer")?.end("developers")?;

        doc.start("scm")?;
        doc.text("connection", &self.scm.connection)?
            .text("developerConnection", &self.scm.developer_connection)?
            .text("url", &self.scm.url)?;
        doc.end("scm")?;

        doc.end("project")?;
        Ok(doc.finish())
    }
}

/// Expand the `{name}` placeholder of a description template.
pub fn describe(template: &str, display_name: &str) -> String {
    template.replace("{name}", display_name)
}
