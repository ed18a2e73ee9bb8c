use crate::error::Result;

use super::core::{segment, DroneClient};
use super::response::ApiResponse;
use super::RequestBody;

impl DroneClient {
    /// Lists repository secrets. Values are never returned by the server.
    pub async fn secrets(&self, namespace: &str, name: &str) -> Result<ApiResponse> {
        let url = self.repo_endpoint(namespace, name, &["secrets"])?;
        self.get(url).await
    }

    /// Creates a secret from `secret` (`name`, `data`, `pull_request`, ...).
    pub async fn create_secret(
        &self,
        namespace: &str,
        name: &str,
        secret: &RequestBody,
    ) -> Result<ApiResponse> {
        let url = self.repo_endpoint(namespace, name, &["secrets"])?;
        self.post_json(url, secret).await
    }

    pub async fn secret(&self, namespace: &str, name: &str, secret: &str) -> Result<ApiResponse> {
        let secret = segment("secret", secret)?;
        let url = self.repo_endpoint(namespace, name, &["secrets", secret.as_str()])?;
        self.get(url).await
    }

    pub async fn delete_secret(
        &self,
        namespace: &str,
        name: &str,
        secret: &str,
    ) -> Result<ApiResponse> {
        let secret = segment("secret", secret)?;
        let url = self.repo_endpoint(namespace, name, &["secrets", secret.as_str()])?;
        self.delete(url).await
    }

    pub async fn update_secret(
        &self,
        namespace: &str,
        name: &str,
        secret: &str,
        patch: &RequestBody,
    ) -> Result<ApiResponse> {
        let secret = segment("secret", secret)?;
        let url = self.repo_endpoint(namespace, name, &["secrets", secret.as_str()])?;
        self.patch_json(url, patch).await
    }
}
