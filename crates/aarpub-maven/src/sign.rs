//! Detached PGP signatures for every file of every publication.
//!
//! Signing is delegated to the system `gpg`. The in-memory key from the
//! environment is imported into a throwaway home directory that is removed
//! when the signer is dropped, so the user's keyring is never touched.

use std::path::{Path, PathBuf};

use tempfile::TempDir;

use aarpub_core::settings::SigningKeys;
use aarpub_util::errors::AarpubError;
use aarpub_util::process::CommandBuilder;

use crate::assemble::{PublicationUnit, UnitState};

/// Produces a detached signature for a file.
pub trait Signer {
    /// Sign `file`, writing the armored signature to `output`.
    fn sign(&self, file: &Path, output: &Path) -> miette::Result<()>;
}

/// `<file>.asc`.
pub fn signature_path(file: &Path) -> PathBuf {
    let mut name = file.as_os_str().to_os_string();
    name.push(".asc");
    PathBuf::from(name)
}

/// Signs with `gpg` using a key imported into a temporary home.
pub struct GpgSigner {
    program: String,
    home: TempDir,
    passphrase_file: Option<PathBuf>,
}

impl GpgSigner {
    /// Import `keys` into a fresh GnuPG home.
    pub fn import(keys: &SigningKeys) -> miette::Result<Self> {
        Self::import_with_program("gpg", keys)
    }

    pub fn import_with_program(program: &str, keys: &SigningKeys) -> miette::Result<Self> {
        let home = tempfile::Builder::new()
            .prefix("aarpub-gnupg-")
            .tempdir()
            .map_err(AarpubError::Io)?;
        restrict_permissions(home.path())?;

        let key_file = home.path().join("signing-key.asc");
        std::fs::write(&key_file, keys.private_key.as_bytes()).map_err(AarpubError::Io)?;

        let passphrase_file = if keys.passphrase.is_empty() {
            None
        } else {
            let path = home.path().join("passphrase");
            std::fs::write(&path, keys.passphrase.as_bytes()).map_err(AarpubError::Io)?;
            Some(path)
        };

        let signer = Self {
            program: program.to_string(),
            home,
            passphrase_file,
        };

        let output = signer
            .base_command()
            .arg("--import")
            .arg(key_file.to_string_lossy())
            .exec()
            .map_err(|e| AarpubError::Signing {
                message: format!("could not run {program}: {e}"),
            })?;
        std::fs::remove_file(&key_file).map_err(AarpubError::Io)?;

        if !output.status.success() {
            return Err(AarpubError::Signing {
                message: format!(
                    "key import failed: {}",
                    String::from_utf8_lossy(&output.stderr).trim()
                ),
            }
            .into());
        }
        tracing::debug!("imported signing key into {}", signer.home.path().display());
        Ok(signer)
    }

    fn base_command(&self) -> CommandBuilder {
        CommandBuilder::new(&self.program)
            .arg("--batch")
            .env("GNUPGHOME", self.home.path().to_string_lossy())
    }

    /// The command that signs `file` into `output`.
    pub fn sign_command(&self, file: &Path, output: &Path) -> CommandBuilder {
        let mut cmd = self
            .base_command()
            .arg("--yes")
            .args(["--pinentry-mode", "loopback"]);
        if let Some(ref pf) = self.passphrase_file {
            cmd = cmd.arg("--passphrase-file").arg(pf.to_string_lossy());
        }
        cmd.args(["--armor", "--detach-sign", "--output"])
            .arg(output.to_string_lossy())
            .arg(file.to_string_lossy())
    }
}

impl Signer for GpgSigner {
    fn sign(&self, file: &Path, output_path: &Path) -> miette::Result<()> {
        let cmd = self.sign_command(file, output_path);
        tracing::trace!("{}", cmd.display());
        let output = cmd
            .exec()
            .map_err(|e| AarpubError::Signing {
                message: format!("could not run {}: {e}", self.program),
            })?;
        if !output.status.success() {
            return Err(AarpubError::Signing {
                message: format!(
                    "{}: {}",
                    file.display(),
                    String::from_utf8_lossy(&output.stderr).trim()
                ),
            }
            .into());
        }
        tracing::debug!("signed {}", file.display());
        Ok(())
    }
}

#[cfg(unix)]
fn restrict_permissions(dir: &Path) -> miette::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(dir, std::fs::Permissions::from_mode(0o700))
        .map_err(AarpubError::Io)?;
    Ok(())
}

#[cfg(not(unix))]
fn restrict_permissions(_dir: &Path) -> miette::Result<()> {
    Ok(())
}

/// Build a signer for `keys`, or `None` when no key is configured.
pub fn signer_for(keys: &SigningKeys) -> miette::Result<Option<GpgSigner>> {
    if !keys.is_enabled() {
        return Ok(None);
    }
    GpgSigner::import(keys).map(Some)
}

/// Sign every file of every unit and move the units to [`UnitState::Signed`].
///
/// Signatures land in each unit's work directory, never next to the input
/// archive. With no signer the units still advance, unsigned.
pub fn sign_units(units: &mut [PublicationUnit], signer: Option<&dyn Signer>) -> miette::Result<()> {
    if signer.is_none() && !units.is_empty() {
        tracing::warn!("no signing key configured; publications will be unsigned");
    }
    for unit in units.iter_mut() {
        if let Some(signer) = signer {
            let outputs: Vec<PathBuf> = unit.files().map(|a| unit.signature_file(a)).collect();
            for (artifact, output) in unit.files_mut().zip(outputs) {
                signer.sign(&artifact.file, &output)?;
                artifact.signature = Some(output);
            }
        }
        unit.advance(UnitState::Signed)?;
    }
    Ok(())
}
