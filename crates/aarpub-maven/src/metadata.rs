//! Artifact-level `maven-metadata.xml`: parsing existing documents and
//! recording newly installed versions.

use std::path::Path;

use quick_xml::events::Event;
use quick_xml::Reader;

use aarpub_util::errors::AarpubError;

use crate::xml::XmlDoc;

/// Artifact-level Maven metadata listing available versions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MavenMetadata {
    pub group_id: Option<String>,
    pub artifact_id: Option<String>,
    pub latest: Option<String>,
    pub release: Option<String>,
    pub versions: Vec<String>,
    pub last_updated: Option<String>,
}

impl MavenMetadata {
    /// Fresh metadata for a coordinate with no versions yet.
    pub fn for_artifact(group_id: &str, artifact_id: &str) -> Self {
        Self {
            group_id: Some(group_id.to_string()),
            artifact_id: Some(artifact_id.to_string()),
            ..Self::default()
        }
    }

    /// Read the document at `path`, or start fresh if there is none.
    pub fn load_or_new(path: &Path, group_id: &str, artifact_id: &str) -> miette::Result<Self> {
        if !path.is_file() {
            return Ok(Self::for_artifact(group_id, artifact_id));
        }
        let xml = std::fs::read_to_string(path).map_err(AarpubError::Io)?;
        let mut meta = parse_metadata(&xml)?;
        meta.group_id.get_or_insert_with(|| group_id.to_string());
        meta.artifact_id
            .get_or_insert_with(|| artifact_id.to_string());
        Ok(meta)
    }

    /// Record `version` as the newest one. Already-listed versions are not
    /// duplicated. `timestamp` is `yyyyMMddHHmmss`.
    pub fn record_version(&mut self, version: &str, timestamp: &str) {
        if !self.versions.iter().any(|v| v == version) {
            self.versions.push(version.to_string());
        }
        self.latest = Some(version.to_string());
        if !version.ends_with("-SNAPSHOT") {
            self.release = Some(version.to_string());
        }
        self.last_updated = Some(timestamp.to_string());
    }

    /// Render as a `maven-metadata.xml` document.
    pub fn to_xml(&self) -> miette::Result<String> {
        let mut doc = XmlDoc::new()?;
        doc.start("metadata")?;
        if let Some(ref g) = self.group_id {
            doc.text("groupId", g)?;
        }
        if let Some(ref a) = self.artifact_id {
            doc.text("artifactId", a)?;
        }
        doc.start("versioning")?;
        if let Some(ref latest) = self.latest {
            doc.text("latest", latest)?;
        }
        if let Some(ref release) = self.release {
            doc.text("release", release)?;
        }
        doc.start("versions")?;
        for v in &self.versions {
            doc.text("version", v)?;
        }
        doc.end("versions")?;
        if let Some(ref ts) = self.last_updated {
            doc.text("lastUpdated", ts)?;
        }
        doc.end("versioning")?.end("metadata")?;
        Ok(doc.finish())
    }
}

/// Current UTC time in the `lastUpdated` format.
pub fn timestamp_now() -> String {
    chrono::Utc::now().format("%Y%m%d%H%M%S").to_string()
}

/// Parse an artifact-level `maven-metadata.xml` that lists available versions.
pub fn parse_metadata(xml: &str) -> miette::Result<MavenMetadata> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut meta = MavenMetadata::default();
    let mut path: Vec<String> = Vec::new();
    let mut text_buf = String::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => {
                path.push(String::from_utf8_lossy(e.name().as_ref()).to_string());
                text_buf.clear();
            }
            Ok(Event::Text(ref e)) => {
                text_buf = e.unescape().unwrap_or_default().to_string();
            }
            Ok(Event::End(_)) => {
                let ctx = path.join(">");

                match ctx.as_str() {
                    "metadata>groupId" => meta.group_id = Some(text_buf.clone()),
                    "metadata>artifactId" => meta.artifact_id = Some(text_buf.clone()),
                    "metadata>versioning>latest" => meta.latest = Some(text_buf.clone()),
                    "metadata>versioning>release" => meta.release = Some(text_buf.clone()),
                    "metadata>versioning>lastUpdated" => {
                        meta.last_updated = Some(text_buf.clone());
                    }
                    "metadata>versioning>versions>version" => {
                        meta.versions.push(text_buf.clone());
                    }
                    _ => {}
                }

                path.pop();
                text_buf.clear();
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(AarpubError::Generic {
                    message: format!("Failed to parse maven-metadata.xml: {e}"),
                }
                .into());
            }
            _ => {}
        }
    }

    Ok(meta)
}
