//! Checksum sidecar files (MD5, SHA-1, SHA-256, SHA-512).

use std::path::{Path, PathBuf};

use aarpub_util::errors::AarpubError;
use aarpub_util::hash::{md5_bytes, sha1_bytes, sha256_bytes, sha512_bytes};

/// Digest algorithms written next to every staged file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChecksumAlgorithm {
    Md5,
    Sha1,
    Sha256,
    Sha512,
}

impl ChecksumAlgorithm {
    pub const ALL: [ChecksumAlgorithm; 4] = [
        ChecksumAlgorithm::Md5,
        ChecksumAlgorithm::Sha1,
        ChecksumAlgorithm::Sha256,
        ChecksumAlgorithm::Sha512,
    ];

    /// Sidecar extension without the leading dot.
    pub fn extension(self) -> &'static str {
        match self {
            ChecksumAlgorithm::Md5 => "md5",
            ChecksumAlgorithm::Sha1 => "sha1",
            ChecksumAlgorithm::Sha256 => "sha256",
            ChecksumAlgorithm::Sha512 => "sha512",
        }
    }

    /// Lowercase hex digest of `data`.
    pub fn digest(self, data: &[u8]) -> String {
        match self {
            ChecksumAlgorithm::Md5 => md5_bytes(data),
            ChecksumAlgorithm::Sha1 => sha1_bytes(data),
            ChecksumAlgorithm::Sha256 => sha256_bytes(data),
            ChecksumAlgorithm::Sha512 => sha512_bytes(data),
        }
    }
}

/// `<file>.<ext>` for a given algorithm.
pub fn sidecar_path(file: &Path, algorithm: ChecksumAlgorithm) -> PathBuf {
    let mut name = file.as_os_str().to_os_string();
    name.push(".");
    name.push(algorithm.extension());
    PathBuf::from(name)
}

/// Write one sidecar per algorithm next to `file`, containing just the hex
/// digest. Returns the sidecar paths.
pub fn write_sidecars(file: &Path) -> miette::Result<Vec<PathBuf>> {
    let data = std::fs::read(file).map_err(AarpubError::Io)?;
    let mut written = Vec::with_capacity(ChecksumAlgorithm::ALL.len());
    for algorithm in ChecksumAlgorithm::ALL {
        let path = sidecar_path(file, algorithm);
        std::fs::write(&path, algorithm.digest(&data)).map_err(AarpubError::Io)?;
        tracing::debug!("wrote {}", path.display());
        written.push(path);
    }
    Ok(written)
}
