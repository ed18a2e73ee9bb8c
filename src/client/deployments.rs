use std::fmt::{self, Display};

use crate::error::Result;

use super::core::{segment, DroneClient};
use super::response::ApiResponse;

/// Deployment action applied to an existing build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeployAction {
    Promote,
    Rollback,
    /// Any other action path the server understands.
    Other(String),
}

impl DeployAction {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Promote => "promote",
            Self::Rollback => "rollback",
            Self::Other(action) => action,
        }
    }
}

impl Display for DeployAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for DeployAction {
    fn from(value: &str) -> Self {
        match value {
            "promote" => Self::Promote,
            "rollback" => Self::Rollback,
            other => Self::Other(other.to_string()),
        }
    }
}

impl DroneClient {
    /// Promotes or rolls back a build to a deployment target.
    ///
    /// # Arguments
    ///
    /// * `build` - Build number to deploy
    /// * `action` - Deployment action (`promote`, `rollback`, ...)
    /// * `target` - Deployment environment (e.g., "production")
    pub async fn trigger_deployment(
        &self,
        namespace: &str,
        name: &str,
        build: impl Display,
        action: &DeployAction,
        target: &str,
    ) -> Result<ApiResponse> {
        let build = segment("build", build)?;
        let action = segment("action", action)?;
        let target = segment("target", target)?;

        let mut url =
            self.repo_endpoint(namespace, name, &["builds", build.as_str(), action.as_str()])?;
        url.query_pairs_mut().append_pair("target", &target);
        self.post(url).await
    }

    /// Approves a stage that is waiting on manual approval.
    pub async fn approve_stage(
        &self,
        namespace: &str,
        name: &str,
        build: impl Display,
        stage: impl Display,
    ) -> Result<ApiResponse> {
        let build = segment("build", build)?;
        let stage = segment("stage", stage)?;
        let url = self.repo_endpoint(
            namespace,
            name,
            &["builds", build.as_str(), "approve", stage.as_str()],
        )?;
        self.post(url).await
    }

    /// Declines a stage that is waiting on manual approval.
    pub async fn decline_stage(
        &self,
        namespace: &str,
        name: &str,
        build: impl Display,
        stage: impl Display,
    ) -> Result<ApiResponse> {
        let build = segment("build", build)?;
        let stage = segment("stage", stage)?;
        let url = self.repo_endpoint(
            namespace,
            name,
            &["builds", build.as_str(), "decline", stage.as_str()],
        )?;
        self.post(url).await
    }
}
