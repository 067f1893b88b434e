use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

#[allow(deprecated)]
fn aarpub_cmd() -> Command {
    let mut cmd = Command::cargo_bin("aarpub").unwrap();
    for key in [
        "GPG_PRIVATE_KEY",
        "GPG_PASSPHRASE",
        "CENTRAL_USERNAME",
        "CENTRAL_PASSWORD",
        "CENTRAL_TOKEN",
        "VERSION_TAG",
    ] {
        cmd.env_remove(key);
    }
    cmd
}

fn init(tmp: &TempDir) {
    aarpub_cmd()
        .current_dir(tmp.path())
        .args(["init"])
        .assert()
        .success();
}

#[test]
fn test_env_without_manifest_fails() {
    let tmp = TempDir::new().unwrap();

    aarpub_cmd()
        .current_dir(tmp.path())
        .args(["env"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Could not find Aarpub.toml"));
}

#[test]
fn test_env_masks_secrets() {
    let tmp = TempDir::new().unwrap();
    init(&tmp);

    aarpub_cmd()
        .current_dir(tmp.path())
        .env("CENTRAL_TOKEN", "super-secret-token")
        .args(["env"])
        .assert()
        .success()
        .stdout(predicate::str::contains("********"))
        .stdout(predicate::str::contains("USER_MANAGED"))
        .stdout(predicate::str::contains("500s"))
        .stdout(predicate::str::contains("super-secret-token").not());
}

#[test]
fn test_env_reveal_shows_combined_token() {
    let tmp = TempDir::new().unwrap();
    init(&tmp);
    fs::write(
        tmp.path().join(".aarpub.env"),
        "CENTRAL_USERNAME=user\nCENTRAL_PASSWORD=pass\n",
    )
    .unwrap();

    aarpub_cmd()
        .current_dir(tmp.path())
        .env("CENTRAL_TOKEN", "ignored")
        .args(["env", "--reveal"])
        .assert()
        .success()
        .stdout(predicate::str::contains("dXNlcjpwYXNz"))
        .stdout(predicate::str::contains("disabled"));
}
