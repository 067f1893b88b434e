//! Zipping the staging repository into the bundle the portal accepts.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

use aarpub_util::errors::AarpubError;
use aarpub_util::fs::{collect_files, ensure_dir, relative_slash_path};

/// Zip every file under `repo_dir` into `bundle_path`, keeping the Maven
/// layout. Artifact-level `maven-metadata*` files are left out; the portal
/// maintains its own. Returns the number of entries written.
pub fn create_bundle(repo_dir: &Path, bundle_path: &Path) -> miette::Result<usize> {
    let files: Vec<_> = collect_files(repo_dir)
        .into_iter()
        .filter(|p| !is_repository_metadata(p))
        .collect();
    if files.is_empty() {
        return Err(AarpubError::Generic {
            message: format!(
                "Nothing to bundle: {} is empty. Run `aarpub stage` first.",
                repo_dir.display()
            ),
        }
        .into());
    }

    if let Some(parent) = bundle_path.parent() {
        ensure_dir(parent).map_err(AarpubError::Io)?;
    }
    let file = File::create(bundle_path).map_err(AarpubError::Io)?;
    let mut zip = ZipWriter::new(file);
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(DateTime::default());

    for path in &files {
        let Some(name) = relative_slash_path(repo_dir, path) else {
            continue;
        };
        let data = std::fs::read(path).map_err(AarpubError::Io)?;
        zip.start_file(name.as_str(), options)
            .map_err(|e| bundle_err(bundle_path, e))?;
        zip.write_all(&data).map_err(AarpubError::Io)?;
    }
    zip.finish().map_err(|e| bundle_err(bundle_path, e))?;

    tracing::info!("bundled {} files into {}", files.len(), bundle_path.display());
    Ok(files.len())
}

fn is_repository_metadata(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with("maven-metadata"))
}

fn bundle_err(bundle_path: &Path, e: zip::result::ZipError) -> AarpubError {
    AarpubError::Generic {
        message: format!("Failed to write {}: {e}", bundle_path.display()),
    }
}
