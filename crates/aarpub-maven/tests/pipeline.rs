use std::cell::Cell;
use std::path::Path;

use aarpub_core::manifest::{Manifest, DEFAULT_MANIFEST};
use aarpub_core::properties::EnvSnapshot;
use aarpub_core::settings::PublishSettings;
use aarpub_maven::assemble::{assemble_all, ArtifactKind, PublicationUnit, UnitState};
use aarpub_maven::install::install;
use aarpub_maven::metadata::parse_metadata;
use aarpub_maven::repository::{LocalRepository, RepositoryKind};
use aarpub_maven::sign::{sign_units, Signer};
use tempfile::TempDir;

struct FakeSigner {
    calls: Cell<usize>,
}

impl Signer for FakeSigner {
    fn sign(&self, file: &Path, output: &Path) -> miette::Result<()> {
        assert!(file.is_file());
        self.calls.set(self.calls.get() + 1);
        std::fs::write(output, "-----BEGIN PGP SIGNATURE-----").unwrap();
        Ok(())
    }
}

fn project(manifest_src: &str) -> (TempDir, Manifest, PublishSettings) {
    let tmp = TempDir::new().unwrap();
    let manifest = Manifest::parse_toml(manifest_src).unwrap();
    for d in manifest.catalog().iter() {
        std::fs::write(tmp.path().join(&d.archive), format!("AAR {}", d.name)).unwrap();
    }
    let src = tmp.path().join("src/main/kotlin/com/example");
    std::fs::create_dir_all(&src).unwrap();
    std::fs::write(src.join("Crypto.kt"), "object Crypto").unwrap();
    let settings = PublishSettings::resolve(&manifest, tmp.path(), &EnvSnapshot::default());
    (tmp, manifest, settings)
}

fn assemble(manifest: &Manifest, settings: &PublishSettings) -> Vec<PublicationUnit> {
    let selected = manifest.catalog().select(None).unwrap();
    assemble_all(manifest, settings, &selected).unwrap()
}

#[test]
fn test_every_descriptor_becomes_a_unit_with_three_artifacts() {
    let (_tmp, manifest, settings) = project(DEFAULT_MANIFEST);
    let units = assemble(&manifest, &settings);

    assert_eq!(units.len(), manifest.catalog().len());
    for (unit, descriptor) in units.iter().zip(manifest.catalog().iter()) {
        assert_eq!(unit.artifact_id, descriptor.artifact_id);
        assert_eq!(unit.group_id, "com.michaeltchuang.algokit");
        assert_eq!(unit.version, "0.1.0");
        assert_eq!(unit.state, UnitState::Assembled);
        let kinds: Vec<_> = unit.artifacts.iter().map(|a| a.kind).collect();
        assert_eq!(
            kinds,
            vec![ArtifactKind::Primary, ArtifactKind::Sources, ArtifactKind::Javadoc]
        );
        assert!(unit.pom_file.file.is_file());
        assert_eq!(unit.pom.name, descriptor.display_name);
    }
}

#[test]
fn test_missing_archive_aborts_before_any_output() {
    let (tmp, manifest, settings) = project(DEFAULT_MANIFEST);
    std::fs::remove_file(tmp.path().join("provider-debug.aar")).unwrap();

    let selected = manifest.catalog().select(None).unwrap();
    let err = assemble_all(&manifest, &settings, &selected).unwrap_err();
    assert!(err.to_string().contains("provider-debug.aar"), "got: {err}");
    assert!(!tmp.path().join("build/publications").exists());
    assert!(!tmp.path().join("build/companions").exists());
}

#[test]
fn test_appending_descriptor_leaves_existing_units_unchanged() {
    let extra = r#"
[[publication]]
name = "AlgorandFoundationWallet"
artifact-id = "algorand-foundation-wallet"
archive = "wallet-debug.aar"
display-name = "AlgorandFoundationWallet"
"#;
    let (_a, base_manifest, base_settings) = project(DEFAULT_MANIFEST);
    let (_b, ext_manifest, ext_settings) = project(&format!("{DEFAULT_MANIFEST}{extra}"));

    let base = assemble(&base_manifest, &base_settings);
    let extended = assemble(&ext_manifest, &ext_settings);
    assert_eq!(extended.len(), base.len() + 1);
    for (old, new) in base.iter().zip(extended.iter()) {
        assert_eq!(old.pom, new.pom);
        assert_eq!(
            std::fs::read(&old.pom_file.file).unwrap(),
            std::fs::read(&new.pom_file.file).unwrap()
        );
    }
    assert_eq!(extended[2].artifact_id, "algorand-foundation-wallet");
}

#[test]
fn test_sign_then_install_into_staging() {
    let (tmp, manifest, settings) = project(DEFAULT_MANIFEST);
    let mut units = assemble(&manifest, &settings);

    let signer = FakeSigner { calls: Cell::new(0) };
    sign_units(&mut units, Some(&signer)).unwrap();
    assert_eq!(signer.calls.get(), 8);
    assert!(units.iter().all(|u| u.state == UnitState::Signed));

    let repo = LocalRepository::staging(&settings.repo_dir);
    for unit in &mut units {
        install(&repo, unit, "20260101120000").unwrap();
        assert_eq!(unit.state, UnitState::Staged);
    }

    let dir = tmp
        .path()
        .join("build/repos/bundles/com/michaeltchuang/algokit/algorand-foundation-crypto/0.1.0");
    for name in [
        "algorand-foundation-crypto-0.1.0.aar",
        "algorand-foundation-crypto-0.1.0-sources.jar",
        "algorand-foundation-crypto-0.1.0-javadoc.jar",
        "algorand-foundation-crypto-0.1.0.pom",
    ] {
        assert!(dir.join(name).is_file(), "missing {name}");
        assert!(dir.join(format!("{name}.asc")).is_file(), "missing {name}.asc");
        for ext in ["md5", "sha1", "sha256", "sha512"] {
            assert!(dir.join(format!("{name}.{ext}")).is_file(), "missing {name}.{ext}");
        }
    }
    assert_eq!(
        std::fs::read_to_string(dir.join("algorand-foundation-crypto-0.1.0.aar")).unwrap(),
        "AAR AlgorandFoundationCrypto"
    );

    let meta_path = dir.parent().unwrap().join("maven-metadata.xml");
    let meta = parse_metadata(&std::fs::read_to_string(&meta_path).unwrap()).unwrap();
    assert_eq!(meta.versions, vec!["0.1.0"]);
    assert!(dir.parent().unwrap().join("maven-metadata.xml.sha1").is_file());
}

#[test]
fn test_install_without_signer_has_no_signatures() {
    let (tmp, manifest, settings) = project(DEFAULT_MANIFEST);
    let mut units = assemble(&manifest, &settings);
    sign_units(&mut units, None).unwrap();

    let repo = LocalRepository {
        name: "MavenLocal".to_string(),
        root: tmp.path().join("m2"),
        kind: RepositoryKind::MavenLocal,
    };
    let written = install(&repo, &mut units[0], "20260101120000").unwrap();
    assert_eq!(written.len(), 5);
    assert!(!written
        .iter()
        .any(|p| p.extension().is_some_and(|e| e == "asc")));
    assert!(tmp
        .path()
        .join("m2/com/michaeltchuang/algokit/algorand-foundation-crypto/maven-metadata-local.xml")
        .is_file());
}

#[test]
fn test_install_requires_signed_state() {
    let (_tmp, manifest, settings) = project(DEFAULT_MANIFEST);
    let mut units = assemble(&manifest, &settings);
    let repo = LocalRepository::staging(&settings.repo_dir);
    let err = install(&repo, &mut units[0], "20260101120000").unwrap_err();
    assert!(err.to_string().contains("must be signed"));
}

#[test]
fn test_second_version_is_merged_into_metadata() {
    let (tmp, manifest, mut settings) = project(DEFAULT_MANIFEST);
    let repo = LocalRepository::staging(&settings.repo_dir);

    for version in ["0.1.0", "0.2.0"] {
        settings.version = version.to_string();
        let mut units = assemble(&manifest, &settings);
        sign_units(&mut units, None).unwrap();
        install(&repo, &mut units[0], "20260101120000").unwrap();
    }

    let meta_path = tmp.path().join(
        "build/repos/bundles/com/michaeltchuang/algokit/algorand-foundation-crypto/maven-metadata.xml",
    );
    let meta = parse_metadata(&std::fs::read_to_string(meta_path).unwrap()).unwrap();
    assert_eq!(meta.versions, vec!["0.1.0", "0.2.0"]);
    assert_eq!(meta.latest.as_deref(), Some("0.2.0"));
}

#[test]
fn test_signatures_stay_inside_build_tree() {
    let (tmp, manifest, settings) = project(DEFAULT_MANIFEST);
    let mut units = assemble(&manifest, &settings);

    let signer = FakeSigner { calls: Cell::new(0) };
    sign_units(&mut units, Some(&signer)).unwrap();

    let stray: Vec<_> = std::fs::read_dir(tmp.path())
        .unwrap()
        .map(|e| e.unwrap().path())
        .filter(|p| p.extension().is_some_and(|e| e == "asc"))
        .collect();
    assert!(stray.is_empty(), "signatures written beside inputs: {stray:?}");

    let work_dir = tmp.path().join("build/publications/AlgorandFoundationCrypto");
    for name in [
        "algorand-foundation-crypto-0.1.0.aar.asc",
        "algorand-foundation-crypto-0.1.0-sources.jar.asc",
        "algorand-foundation-crypto-0.1.0-javadoc.jar.asc",
        "algorand-foundation-crypto-0.1.0.pom.asc",
    ] {
        assert!(work_dir.join(name).is_file(), "missing {name}");
    }
    let primary = &units[0].artifacts[0];
    assert_eq!(
        primary.signature.as_deref(),
        Some(work_dir.join("algorand-foundation-crypto-0.1.0.aar.asc").as_path())
    );
}
