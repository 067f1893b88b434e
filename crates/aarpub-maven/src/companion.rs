//! Companion jars published next to every AAR: a sources jar built from the
//! main source directories and an empty javadoc placeholder.

use std::collections::BTreeSet;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

use aarpub_util::errors::AarpubError;
use aarpub_util::fs::{collect_files, ensure_dir, relative_slash_path};

use crate::repository::artifact_file_name;

const JAR_MANIFEST: &[u8] = b"Manifest-Version: 1.0\r\n\r\n";

/// The two companion classifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompanionKind {
    Sources,
    Javadoc,
}

impl CompanionKind {
    pub fn classifier(self) -> &'static str {
        match self {
            CompanionKind::Sources => "sources",
            CompanionKind::Javadoc => "javadoc",
        }
    }
}

/// Both companion jars of one publication.
#[derive(Debug, Clone)]
pub struct Companions {
    pub sources: PathBuf,
    pub javadoc: PathBuf,
}

/// Build the sources and javadoc jars for `artifact_id` into `out_dir`.
///
/// Source roots that do not exist are skipped; the sources jar is then
/// empty apart from its manifest.
pub fn build_companions(
    artifact_id: &str,
    version: &str,
    source_roots: &[PathBuf],
    out_dir: &Path,
) -> miette::Result<Companions> {
    ensure_dir(out_dir).map_err(AarpubError::Io)?;

    let sources = out_dir.join(artifact_file_name(
        artifact_id,
        version,
        Some(CompanionKind::Sources.classifier()),
        "jar",
    ));
    write_jar(&sources, source_roots)?;

    let javadoc = out_dir.join(artifact_file_name(
        artifact_id,
        version,
        Some(CompanionKind::Javadoc.classifier()),
        "jar",
    ));
    write_jar(&javadoc, &[])?;

    Ok(Companions { sources, javadoc })
}

/// Write a jar containing a manifest plus every file under `roots`.
///
/// Entries are sorted and carry a fixed timestamp, so the same inputs always
/// produce the same bytes. When two roots contain the same relative path the
/// first root wins.
pub fn write_jar(jar_path: &Path, roots: &[PathBuf]) -> miette::Result<()> {
    let file = File::create(jar_path).map_err(AarpubError::Io)?;
    let mut zip = ZipWriter::new(file);
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(DateTime::default());

    zip.add_directory("META-INF/", options)
        .map_err(|e| jar_err(jar_path, e))?;
    zip.start_file("META-INF/MANIFEST.MF", options)
        .map_err(|e| jar_err(jar_path, e))?;
    zip.write_all(JAR_MANIFEST).map_err(AarpubError::Io)?;

    let mut seen = BTreeSet::new();
    for root in roots {
        if !root.is_dir() {
            tracing::warn!("source directory {} not found, skipping", root.display());
            continue;
        }
        for path in collect_files(root) {
            let Some(name) = relative_slash_path(root, &path) else {
                continue;
            };
            if !seen.insert(name.clone()) {
                tracing::debug!("duplicate jar entry {name} from {}", root.display());
                continue;
            }
            let data = std::fs::read(&path).map_err(AarpubError::Io)?;
            zip.start_file(name.as_str(), options)
                .map_err(|e| jar_err(jar_path, e))?;
            zip.write_all(&data).map_err(AarpubError::Io)?;
        }
    }

    zip.finish().map_err(|e| jar_err(jar_path, e))?;
    tracing::debug!("wrote {} ({} entries)", jar_path.display(), seen.len() + 1);
    Ok(())
}

fn jar_err(jar_path: &Path, e: zip::result::ZipError) -> AarpubError {
    AarpubError::Generic {
        message: format!("Failed to write {}: {e}", jar_path.display()),
    }
}
