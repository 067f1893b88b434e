//! Maven Central Publisher Portal client: bundle upload and deployment
//! status polling.

use std::path::Path;
use std::time::Duration;

use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;

use aarpub_core::manifest::PublishingType;
use aarpub_util::errors::AarpubError;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(300);
const UPLOAD_PATH: &str = "/api/v1/publisher/upload";
const STATUS_PATH: &str = "/api/v1/publisher/status";

/// Default delay between two status requests.
pub const POLL_INTERVAL: Duration = Duration::from_secs(5);

/// State of a deployment as reported by the portal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeploymentState {
    Pending,
    Validating,
    Validated,
    Publishing,
    Published,
    Failed,
    Other(String),
}

impl DeploymentState {
    pub fn parse(s: &str) -> Self {
        match s {
            "PENDING" => DeploymentState::Pending,
            "VALIDATING" => DeploymentState::Validating,
            "VALIDATED" => DeploymentState::Validated,
            "PUBLISHING" => DeploymentState::Publishing,
            "PUBLISHED" => DeploymentState::Published,
            "FAILED" => DeploymentState::Failed,
            other => DeploymentState::Other(other.to_string()),
        }
    }

    /// Whether the deployment has gone as far as `publishing_type` takes it.
    pub fn is_settled(&self, publishing_type: PublishingType) -> bool {
        match publishing_type {
            PublishingType::UserManaged => matches!(
                self,
                DeploymentState::Validated
                    | DeploymentState::Publishing
                    | DeploymentState::Published
            ),
            PublishingType::Automatic => matches!(self, DeploymentState::Published),
        }
    }
}

/// Body of a status response.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentStatus {
    pub deployment_id: String,
    #[serde(default)]
    pub deployment_name: Option<String>,
    pub deployment_state: String,
    #[serde(default)]
    pub purls: Vec<String>,
    #[serde(default)]
    pub errors: Option<serde_json::Value>,
}

impl DeploymentStatus {
    pub fn state(&self) -> DeploymentState {
        DeploymentState::parse(&self.deployment_state)
    }
}

/// Anything that can report the status of a deployment.
#[allow(async_fn_in_trait)]
pub trait DeploymentStatusSource {
    async fn deployment_status(&self, deployment_id: &str) -> miette::Result<DeploymentStatus>;
}

/// How long and how often to poll.
#[derive(Debug, Clone, Copy)]
pub struct WaitPolicy {
    pub max_wait: Duration,
    pub poll_interval: Duration,
}

/// HTTP client for the portal API.
#[derive(Debug, Clone)]
pub struct PortalClient {
    client: Client,
    base_url: String,
    token: String,
}

impl PortalClient {
    pub fn new(base_url: &str, token: &str) -> miette::Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("aarpub/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AarpubError::Network {
                message: format!("Failed to create HTTP client: {e}"),
            })?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
        })
    }

    pub fn upload_url(&self) -> String {
        format!("{}{UPLOAD_PATH}", self.base_url)
    }

    pub fn status_url(&self) -> String {
        format!("{}{STATUS_PATH}", self.base_url)
    }

    /// Upload a bundle zip. Returns the deployment id assigned by the portal.
    pub async fn upload(
        &self,
        bundle: &Path,
        deployment_name: &str,
        publishing_type: PublishingType,
    ) -> miette::Result<String> {
        let data = tokio::fs::read(bundle).await.map_err(AarpubError::Io)?;
        let file_name = bundle
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "bundle.zip".to_string());
        let part = Part::bytes(data)
            .file_name(file_name)
            .mime_str("application/octet-stream")
            .map_err(|e| AarpubError::Network {
                message: format!("Invalid bundle part: {e}"),
            })?;
        let form = Form::new().part("bundle", part);

        let url = self.upload_url();
        let resp = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .query(&[
                ("publishingType", publishing_type.as_str()),
                ("name", deployment_name),
            ])
            .multipart(form)
            .send()
            .await
            .map_err(|e| AarpubError::Network {
                message: format!("Upload to {url} failed: {e}"),
            })?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| AarpubError::Network {
            message: format!("Failed to read upload response: {e}"),
        })?;
        if !status.is_success() {
            return Err(AarpubError::Deployment {
                message: format!("portal rejected upload with HTTP {status}: {}", body.trim()),
            }
            .into());
        }
        Ok(body.trim().to_string())
    }
}

impl DeploymentStatusSource for PortalClient {
    async fn deployment_status(&self, deployment_id: &str) -> miette::Result<DeploymentStatus> {
        let url = self.status_url();
        let resp = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .query(&[("id", deployment_id)])
            .send()
            .await
            .map_err(|e| AarpubError::Network {
                message: format!("Status request to {url} failed: {e}"),
            })?;
        let status = resp.status();
        if !status.is_success() {
            return Err(AarpubError::Network {
                message: format!("HTTP {status} from {url}"),
            }
            .into());
        }
        resp.json::<DeploymentStatus>()
            .await
            .map_err(|e| {
                AarpubError::Network {
                    message: format!("Unexpected status response from {url}: {e}"),
                }
                .into()
            })
    }
}

/// Poll until the deployment settles, fails, or `policy.max_wait` elapses.
///
/// `on_state` is called with every state observed, for progress display.
pub async fn wait_for_deployment<S: DeploymentStatusSource>(
    source: &S,
    deployment_id: &str,
    publishing_type: PublishingType,
    policy: WaitPolicy,
    mut on_state: impl FnMut(&DeploymentState),
) -> miette::Result<DeploymentStatus> {
    let started = tokio::time::Instant::now();
    loop {
        let status = source.deployment_status(deployment_id).await?;
        let state = status.state();
        tracing::debug!("deployment {deployment_id} is {}", status.deployment_state);
        on_state(&state);

        if state == DeploymentState::Failed {
            let errors = status
                .errors
                .as_ref()
                .map(|e| e.to_string())
                .unwrap_or_else(|| "no details".to_string());
            return Err(AarpubError::Deployment {
                message: format!("deployment {deployment_id} FAILED: {errors}"),
            }
            .into());
        }
        if state.is_settled(publishing_type) {
            return Ok(status);
        }
        if started.elapsed() >= policy.max_wait {
            return Err(AarpubError::Deployment {
                message: format!(
                    "deployment {deployment_id} still {} after {}s",
                    status.deployment_state,
                    policy.max_wait.as_secs()
                ),
            }
            .into());
        }
        tokio::time::sleep(policy.poll_interval).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_status_response() {
        let json = r#"{
            "deploymentId": "28570f16-da32-4c14-bd2e-c1acc0782365",
            "deploymentName": "algokit-0.1.0",
            "deploymentState": "VALIDATED",
            "purls": ["pkg:maven/com.michaeltchuang.algokit/algorand-foundation-crypto@0.1.0"]
        }"#;
        let status: DeploymentStatus = serde_json::from_str(json).unwrap();
        assert_eq!(status.state(), DeploymentState::Validated);
        assert_eq!(status.purls.len(), 1);
        assert!(status.errors.is_none());
    }

    #[test]
    fn user_managed_settles_at_validated() {
        assert!(DeploymentState::Validated.is_settled(PublishingType::UserManaged));
        assert!(!DeploymentState::Validating.is_settled(PublishingType::UserManaged));
        assert!(!DeploymentState::Validated.is_settled(PublishingType::Automatic));
        assert!(DeploymentState::Published.is_settled(PublishingType::Automatic));
    }

    #[test]
    fn unknown_state_is_kept() {
        assert_eq!(
            DeploymentState::parse("QUEUED"),
            DeploymentState::Other("QUEUED".to_string())
        );
    }

    #[test]
    fn urls_from_base() {
        let client = PortalClient::new("https://central.sonatype.com/", "t").unwrap();
        assert_eq!(
            client.upload_url(),
            "https://central.sonatype.com/api/v1/publisher/upload"
        );
        assert_eq!(
            client.status_url(),
            "https://central.sonatype.com/api/v1/publisher/status"
        );
    }
}
