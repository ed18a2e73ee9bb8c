use std::fmt::Display;

use crate::error::Result;

use super::core::{segment, DroneClient};
use super::response::ApiResponse;

impl DroneClient {
    /// Fetches the log output of one step.
    ///
    /// # Arguments
    ///
    /// * `build` - Build number
    /// * `stage` - Stage number within the build
    /// * `step` - Step number within the stage
    pub async fn logs(
        &self,
        namespace: &str,
        name: &str,
        build: impl Display,
        stage: impl Display,
        step: impl Display,
    ) -> Result<ApiResponse> {
        let url = self.logs_endpoint(namespace, name, build, stage, step)?;
        self.get(url).await
    }

    /// Deletes the stored log output of one step.
    pub async fn purge_logs(
        &self,
        namespace: &str,
        name: &str,
        build: impl Display,
        stage: impl Display,
        step: impl Display,
    ) -> Result<ApiResponse> {
        let url = self.logs_endpoint(namespace, name, build, stage, step)?;
        self.delete(url).await
    }

    fn logs_endpoint(
        &self,
        namespace: &str,
        name: &str,
        build: impl Display,
        stage: impl Display,
        step: impl Display,
    ) -> Result<url::Url> {
        let build = segment("build", build)?;
        let stage = segment("stage", stage)?;
        let step = segment("step", step)?;

        self.repo_endpoint(
            namespace,
            name,
            &["builds", build.as_str(), "logs", stage.as_str(), step.as_str()],
        )
    }
}
