//! Operation: publish to the user's Maven local repository.

use std::path::Path;

use aarpub_maven::repository::LocalRepository;

use crate::ops_stage::{stage_into, StageResult};
use crate::PublishContext;

/// Install `publication` (or every publication) into `~/.m2/repository`.
pub fn publish_local(project_root: &Path, publication: Option<&str>) -> miette::Result<StageResult> {
    let ctx = PublishContext::load(project_root)?;
    stage_into(&ctx, &LocalRepository::maven_local(), publication)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{context, write_project};
    use aarpub_maven::repository::RepositoryKind;

    #[test]
    fn maven_local_layout_has_no_checksums() {
        let tmp = tempfile::tempdir().unwrap();
        let project = tmp.path().join("project");
        std::fs::create_dir_all(&project).unwrap();
        write_project(&project);
        let ctx = context(&project);
        let repo = LocalRepository {
            name: "MavenLocal".to_string(),
            root: tmp.path().join("m2"),
            kind: RepositoryKind::MavenLocal,
        };

        let result = stage_into(&ctx, &repo, None).unwrap();
        // 4 files + metadata, per unit
        assert_eq!(result.files_written, 10);

        let artifact = tmp
            .path()
            .join("m2/com/michaeltchuang/algokit/algorand-foundation-crypto");
        assert!(artifact.join("maven-metadata-local.xml").is_file());
        assert!(artifact
            .join("0.1.0/algorand-foundation-crypto-0.1.0.pom")
            .is_file());
        assert!(!artifact
            .join("0.1.0/algorand-foundation-crypto-0.1.0.pom.sha1")
            .exists());
    }
}
