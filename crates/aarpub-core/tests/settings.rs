use std::path::Path;
use std::time::Duration;

use aarpub_core::manifest::{Manifest, PublishingType, DEFAULT_MANIFEST};
use aarpub_core::properties::EnvSnapshot;
use aarpub_core::settings::{PublishSettings, CENTRAL_PASSWORD, CENTRAL_USERNAME, VERSION_TAG};

#[test]
fn test_resolve_defaults_from_manifest() {
    let manifest = Manifest::parse_toml(DEFAULT_MANIFEST).unwrap();
    let settings =
        PublishSettings::resolve(&manifest, Path::new("/project"), &EnvSnapshot::default());

    assert_eq!(settings.version, "0.1.0");
    assert_eq!(settings.auth_token, "");
    assert!(!settings.signing.is_enabled());
    assert_eq!(
        settings.repo_dir,
        Path::new("/project/build/repos/bundles")
    );
    assert_eq!(settings.publishing_type, PublishingType::UserManaged);
    assert_eq!(settings.max_wait, Duration::from_secs(500));
    assert_eq!(settings.build_dir(), Path::new("/project/build"));
}

#[test]
fn test_resolve_reads_env_values() {
    let manifest = Manifest::parse_toml(DEFAULT_MANIFEST).unwrap();
    let env = EnvSnapshot::from_pairs([
        (VERSION_TAG, "2.0.0"),
        (CENTRAL_USERNAME, "user"),
        (CENTRAL_PASSWORD, "pass"),
    ]);
    let settings = PublishSettings::resolve(&manifest, Path::new("/project"), &env);
    assert_eq!(settings.version, "2.0.0");
    assert_eq!(settings.auth_token, "dXNlcjpwYXNz");
}

#[test]
fn test_portal_url_trailing_slash_trimmed() {
    let manifest = Manifest::parse_toml("[central]\nurl = \"http://localhost:8080/\"\n").unwrap();
    let settings =
        PublishSettings::resolve(&manifest, Path::new("/p"), &EnvSnapshot::default());
    assert_eq!(settings.portal_url, "http://localhost:8080");
}

#[test]
fn test_empty_version_tag_falls_back_to_default() {
    let manifest = Manifest::parse_toml(DEFAULT_MANIFEST).unwrap();
    let env = EnvSnapshot::from_pairs([(VERSION_TAG, "")]);
    let settings = PublishSettings::resolve(&manifest, Path::new("/project"), &env);

    assert_eq!(settings.version, "0.1.0");
}
