use crate::error::Result;

use super::core::DroneClient;
use super::response::ApiResponse;
use super::RequestBody;

impl DroneClient {
    /// Lists repositories visible to the authenticated user.
    ///
    /// # Arguments
    ///
    /// * `latest` - Include each repository's latest build; defaults to `true`
    pub async fn repos(&self, latest: Option<bool>) -> Result<ApiResponse> {
        let mut url = self.endpoint(&["repos"])?;
        url.query_pairs_mut()
            .append_pair("latest", &latest.unwrap_or(true).to_string());
        self.get(url).await
    }

    /// Fetches a single repository.
    pub async fn repo(&self, namespace: &str, name: &str) -> Result<ApiResponse> {
        let url = self.repo_endpoint(namespace, name, &[])?;
        self.get(url).await
    }

    /// Activates the repository on the server.
    pub async fn enable_repo(&self, namespace: &str, name: &str) -> Result<ApiResponse> {
        let url = self.repo_endpoint(namespace, name, &[])?;
        self.post(url).await
    }

    /// Deactivates the repository.
    pub async fn disable_repo(&self, namespace: &str, name: &str) -> Result<ApiResponse> {
        let url = self.repo_endpoint(namespace, name, &[])?;
        self.delete(url).await
    }

    /// Updates repository settings (visibility, timeout, config path, ...).
    pub async fn update_repo(
        &self,
        namespace: &str,
        name: &str,
        repo: &RequestBody,
    ) -> Result<ApiResponse> {
        let url = self.repo_endpoint(namespace, name, &[])?;
        self.patch_json(url, repo).await
    }

    /// Transfers repository ownership to the authenticated user.
    pub async fn chown_repo(&self, namespace: &str, name: &str) -> Result<ApiResponse> {
        let url = self.repo_endpoint(namespace, name, &["chown"])?;
        self.post(url).await
    }

    /// Re-registers the repository webhook and refreshes metadata.
    pub async fn repair_repo(&self, namespace: &str, name: &str) -> Result<ApiResponse> {
        let url = self.repo_endpoint(namespace, name, &["repair"])?;
        self.post(url).await
    }
}

#[cfg(test)]
mod tests {
    use mockito::Matcher;
    use serde_json::json;

    use super::*;
    use crate::client::test_support::{bearer, client_for};

    #[tokio::test]
    async fn test_repos_defaults_to_latest_true() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/repos")
            .match_header("authorization", bearer().as_str())
            .match_query(Matcher::UrlEncoded("latest".into(), "true".into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("[]")
            .create_async()
            .await;

        let response = client_for(&server).repos(None).await.unwrap();

        mock.assert_async().await;
        assert!(response.is_success());
        assert_eq!(response.text(), "[]");
    }

    #[tokio::test]
    async fn test_repos_latest_false() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/repos")
            .match_query(Matcher::UrlEncoded("latest".into(), "false".into()))
            .with_status(200)
            .create_async()
            .await;

        client_for(&server).repos(Some(false)).await.unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_repo_fetch() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/repos/octocat/hello-world")
            .match_header("authorization", "Bearer test-token")
            .with_status(200)
            .with_body(r#"{"slug":"octocat/hello-world","active":true}"#)
            .create_async()
            .await;

        let response = client_for(&server)
            .repo("octocat", "hello-world")
            .await
            .unwrap();

        mock.assert_async().await;
        let repo: serde_json::Value = response.json().unwrap();
        assert_eq!(repo["slug"], "octocat/hello-world");
    }

    #[tokio::test]
    async fn test_repo_lifecycle_verbs() {
        let mut server = mockito::Server::new_async().await;
        let client = client_for(&server);

        let enable = server
            .mock("POST", "/repos/octocat/hello-world")
            .match_header("authorization", bearer().as_str())
            .with_status(200)
            .create_async()
            .await;
        let disable = server
            .mock("DELETE", "/repos/octocat/hello-world")
            .match_header("authorization", bearer().as_str())
            .with_status(200)
            .create_async()
            .await;
        let chown = server
            .mock("POST", "/repos/octocat/hello-world/chown")
            .match_header("authorization", bearer().as_str())
            .with_status(200)
            .create_async()
            .await;
        let repair = server
            .mock("POST", "/repos/octocat/hello-world/repair")
            .match_header("authorization", bearer().as_str())
            .with_status(200)
            .create_async()
            .await;

        client.enable_repo("octocat", "hello-world").await.unwrap();
        client.disable_repo("octocat", "hello-world").await.unwrap();
        client.chown_repo("octocat", "hello-world").await.unwrap();
        client.repair_repo("octocat", "hello-world").await.unwrap();

        enable.assert_async().await;
        disable.assert_async().await;
        chown.assert_async().await;
        repair.assert_async().await;
    }

    #[tokio::test]
    async fn test_update_repo_sends_body() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("PATCH", "/repos/octocat/hello-world")
            .match_header("authorization", bearer().as_str())
            .match_header("content-type", "application/json")
            .match_body(Matcher::Json(json!({"visibility": "internal", "timeout": 90})))
            .with_status(200)
            .create_async()
            .await;

        let mut body = RequestBody::new();
        body.insert("visibility".to_string(), json!("internal"));
        body.insert("timeout".to_string(), json!(90));

        client_for(&server)
            .update_repo("octocat", "hello-world", &body)
            .await
            .unwrap();

        mock.assert_async().await;
    }
}
