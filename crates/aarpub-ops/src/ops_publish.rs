//! Operation: upload the bundle to the Central Publisher Portal and wait for
//! the deployment to settle.

use std::path::Path;
use std::time::Duration;

use aarpub_maven::central::{
    wait_for_deployment, DeploymentState, DeploymentStatus, PortalClient, WaitPolicy,
    POLL_INTERVAL,
};
use aarpub_util::progress::{spinner, status, status_warn};

use crate::ops_bundle::bundle_ctx;
use crate::PublishContext;

/// Options for a publish invocation.
pub struct PublishOptions {
    pub poll_interval: Duration,
}

impl Default for PublishOptions {
    fn default() -> Self {
        Self {
            poll_interval: POLL_INTERVAL,
        }
    }
}

/// Outcome of a publish run.
pub struct PublishResult {
    pub deployment_id: String,
    pub status: DeploymentStatus,
}

/// Stage, bundle, upload, then poll until the deployment settles.
pub async fn publish(project_root: &Path, opts: &PublishOptions) -> miette::Result<PublishResult> {
    let ctx = PublishContext::load(project_root)?;
    let bundle = bundle_ctx(&ctx)?;
    let settings = &ctx.settings;

    if settings.auth_token.is_empty() {
        status_warn(
            "Credentials",
            "no CENTRAL_USERNAME/CENTRAL_PASSWORD or CENTRAL_TOKEN set",
        );
    }

    let client = PortalClient::new(&settings.portal_url, &settings.auth_token)?;
    let name = deployment_name(&ctx);

    let sp = spinner(&format!("Uploading {}...", bundle.bundle_path.display()));
    let uploaded = client
        .upload(&bundle.bundle_path, &name, settings.publishing_type)
        .await;
    sp.finish_and_clear();
    let deployment_id = uploaded?;
    status(
        "Uploaded",
        &format!("{name} as deployment {deployment_id} ({})", settings.publishing_type),
    );

    let policy = WaitPolicy {
        max_wait: settings.max_wait,
        poll_interval: opts.poll_interval,
    };
    let sp = spinner("Waiting for deployment...");
    let waited = wait_for_deployment(
        &client,
        &deployment_id,
        settings.publishing_type,
        policy,
        |state: &DeploymentState| sp.set_message(format!("Deployment is {state:?}...")),
    )
    .await;
    sp.finish_and_clear();
    let deployment = waited?;

    status(
        "Deployed",
        &format!("{deployment_id} is {}", deployment.deployment_state),
    );
    if deployment.state() == DeploymentState::Validated {
        status(
            "Next",
            "review and publish the deployment at https://central.sonatype.com/publishing/deployments",
        );
    }

    Ok(PublishResult {
        deployment_id,
        status: deployment,
    })
}

/// Name shown for the deployment in the portal: `<group>-<version>`.
fn deployment_name(ctx: &PublishContext) -> String {
    format!("{}-{}", ctx.manifest.project.group, ctx.settings.version)
}
