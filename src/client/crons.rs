use crate::error::Result;

use super::core::{segment, DroneClient};
use super::response::ApiResponse;
use super::RequestBody;

impl DroneClient {
    /// Lists cron jobs for a repository.
    ///
    /// Older facades sent this as a POST; the server only routes GET.
    pub async fn crons(&self, namespace: &str, name: &str) -> Result<ApiResponse> {
        let url = self.repo_endpoint(namespace, name, &["cron"])?;
        self.get(url).await
    }

    /// Creates a cron job from `cron` (`name`, `expr`, `branch`, ...).
    pub async fn create_cron(
        &self,
        namespace: &str,
        name: &str,
        cron: &RequestBody,
    ) -> Result<ApiResponse> {
        let url = self.repo_endpoint(namespace, name, &["cron"])?;
        self.post_json(url, cron).await
    }

    pub async fn cron(&self, namespace: &str, name: &str, cron: &str) -> Result<ApiResponse> {
        let cron = segment("cron", cron)?;
        let url = self.repo_endpoint(namespace, name, &["cron", cron.as_str()])?;
        self.get(url).await
    }

    pub async fn delete_cron(
        &self,
        namespace: &str,
        name: &str,
        cron: &str,
    ) -> Result<ApiResponse> {
        let cron = segment("cron", cron)?;
        let url = self.repo_endpoint(namespace, name, &["cron", cron.as_str()])?;
        self.delete(url).await
    }

    pub async fn update_cron(
        &self,
        namespace: &str,
        name: &str,
        cron: &str,
        patch: &RequestBody,
    ) -> Result<ApiResponse> {
        let cron = segment("cron", cron)?;
        let url = self.repo_endpoint(namespace, name, &["cron", cron.as_str()])?;
        self.patch_json(url, patch).await
    }

    /// Runs the cron job immediately.
    pub async fn exec_cron(&self, namespace: &str, name: &str, cron: &str) -> Result<ApiResponse> {
        let cron = segment("cron", cron)?;
        let url = self.repo_endpoint(namespace, name, &["cron", cron.as_str()])?;
        self.post(url).await
    }
}
