//! Operation: show the resolved publish settings.

use std::path::Path;

use aarpub_core::properties::ENV_FILE;
use aarpub_core::settings::{
    mask, PublishSettings, CENTRAL_PASSWORD, CENTRAL_TOKEN, CENTRAL_USERNAME, GPG_PASSPHRASE,
    GPG_PRIVATE_KEY,
};

use crate::PublishContext;

/// A single `key = value` line of the report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvEntry {
    pub key: &'static str,
    pub value: String,
}

/// Resolve settings for `project_root` and describe them. Secrets are
/// masked unless `reveal` is set.
pub fn env(project_root: &Path, reveal: bool) -> miette::Result<Vec<EnvEntry>> {
    let ctx = PublishContext::load(project_root)?;
    let env_file = project_root.join(ENV_FILE);
    let mut entries = describe(&ctx.settings, reveal);
    entries.push(EnvEntry {
        key: "env file",
        value: if env_file.is_file() {
            env_file.display().to_string()
        } else {
            format!("{} (absent)", env_file.display())
        },
    });
    Ok(entries)
}

pub fn describe(settings: &PublishSettings, reveal: bool) -> Vec<EnvEntry> {
    let secret = |value: &str| {
        if reveal {
            value.to_string()
        } else {
            mask(value).to_string()
        }
    };
    let entry = |key, value: String| EnvEntry { key, value };

    vec![
        entry("version", settings.version.clone()),
        entry(
            "signing",
            if settings.signing.is_enabled() {
                "enabled".to_string()
            } else {
                "disabled".to_string()
            },
        ),
        entry(GPG_PRIVATE_KEY, secret(&settings.signing.private_key)),
        entry(GPG_PASSPHRASE, secret(&settings.signing.passphrase)),
        entry(
            "token",
            format!(
                "{} (from {CENTRAL_USERNAME}/{CENTRAL_PASSWORD} or {CENTRAL_TOKEN})",
                secret(&settings.auth_token)
            ),
        ),
        entry("publishing type", settings.publishing_type.to_string()),
        entry("max wait", format!("{}s", settings.max_wait.as_secs())),
        entry("portal", settings.portal_url.clone()),
        entry("staging", settings.repo_dir.display().to_string()),
    ]
}
