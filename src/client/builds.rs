use std::fmt::Display;

use crate::error::Result;

use super::core::{segment, DroneClient};
use super::response::ApiResponse;

impl DroneClient {
    /// Lists builds for a repository, one page at a time.
    ///
    /// # Arguments
    ///
    /// * `namespace` - Repository owner
    /// * `name` - Repository name
    /// * `page` - Page number passed through to the server; defaults to `1`
    pub async fn builds(
        &self,
        namespace: &str,
        name: &str,
        page: Option<u32>,
    ) -> Result<ApiResponse> {
        let mut url = self.repo_endpoint(namespace, name, &["builds"])?;
        url.query_pairs_mut()
            .append_pair("page", &page.unwrap_or(1).to_string());
        self.get(url).await
    }

    pub async fn build(
        &self,
        namespace: &str,
        name: &str,
        build: impl Display,
    ) -> Result<ApiResponse> {
        let build = segment("build", build)?;
        let url = self.repo_endpoint(namespace, name, &["builds", build.as_str()])?;
        self.get(url).await
    }

    /// Stops a running build.
    pub async fn cancel_build(
        &self,
        namespace: &str,
        name: &str,
        build: impl Display,
    ) -> Result<ApiResponse> {
        let build = segment("build", build)?;
        let url = self.repo_endpoint(namespace, name, &["builds", build.as_str()])?;
        self.delete(url).await
    }

    /// Creates a new build from an existing one (the server restarts it
    /// with the same commit and parameters).
    pub async fn create_build(
        &self,
        namespace: &str,
        name: &str,
        build: impl Display,
    ) -> Result<ApiResponse> {
        let build = segment("build", build)?;
        let url = self.repo_endpoint(namespace, name, &["builds", build.as_str()])?;
        self.post(url).await
    }

    /// Latest build per branch.
    pub async fn branches(&self, namespace: &str, name: &str) -> Result<ApiResponse> {
        let url = self.repo_endpoint(namespace, name, &["builds", "branches"])?;
        self.get(url).await
    }

    /// Latest build per deployment target.
    pub async fn deployments(&self, namespace: &str, name: &str) -> Result<ApiResponse> {
        let url = self.repo_endpoint(namespace, name, &["builds", "deployments"])?;
        self.get(url).await
    }

    /// Recent builds across the user's repositories.
    pub async fn recent_builds(&self) -> Result<ApiResponse> {
        let url = self.endpoint(&["user", "builds", "recent"])?;
        self.post(url).await
    }
}

#[cfg(test)]
mod tests {
    use mockito::Matcher;

    use crate::client::test_support::{bearer, client_for};
    use crate::error::DroneError;

    #[tokio::test]
    async fn test_builds_defaults_to_first_page() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/repos/octocat/hello-world/builds")
            .match_header("authorization", bearer().as_str())
            .match_query(Matcher::UrlEncoded("page".into(), "1".into()))
            .with_status(200)
            .with_body("[]")
            .create_async()
            .await;

        client_for(&server)
            .builds("octocat", "hello-world", None)
            .await
            .unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_builds_explicit_page() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/repos/octocat/hello-world/builds")
            .match_query(Matcher::UrlEncoded("page".into(), "3".into()))
            .with_status(200)
            .create_async()
            .await;

        client_for(&server)
            .builds("octocat", "hello-world", Some(3))
            .await
            .unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_build_verbs() {
        let mut server = mockito::Server::new_async().await;
        let client = client_for(&server);

        let fetch = server
            .mock("GET", "/repos/octocat/hello-world/builds/42")
            .match_header("authorization", bearer().as_str())
            .with_status(200)
            .create_async()
            .await;
        let cancel = server
            .mock("DELETE", "/repos/octocat/hello-world/builds/42")
            .match_header("authorization", bearer().as_str())
            .with_status(200)
            .create_async()
            .await;
        let create = server
            .mock("POST", "/repos/octocat/hello-world/builds/42")
            .match_header("authorization", bearer().as_str())
            .with_status(200)
            .create_async()
            .await;

        client.build("octocat", "hello-world", 42).await.unwrap();
        client.cancel_build("octocat", "hello-world", 42u64).await.unwrap();
        client.create_build("octocat", "hello-world", "42").await.unwrap();

        fetch.assert_async().await;
        cancel.assert_async().await;
        create.assert_async().await;
    }

    #[tokio::test]
    async fn test_branches_and_deployments() {
        let mut server = mockito::Server::new_async().await;
        let client = client_for(&server);

        let branches = server
            .mock("GET", "/repos/octocat/hello-world/builds/branches")
            .match_header("authorization", bearer().as_str())
            .with_status(200)
            .create_async()
            .await;
        let deployments = server
            .mock("GET", "/repos/octocat/hello-world/builds/deployments")
            .match_header("authorization", bearer().as_str())
            .with_status(200)
            .create_async()
            .await;

        client.branches("octocat", "hello-world").await.unwrap();
        client.deployments("octocat", "hello-world").await.unwrap();

        branches.assert_async().await;
        deployments.assert_async().await;
    }

    #[tokio::test]
    async fn test_recent_builds_feed() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/user/builds/recent")
            .match_header("authorization", bearer().as_str())
            .with_status(200)
            .with_body("[]")
            .create_async()
            .await;

        client_for(&server).recent_builds().await.unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_empty_build_id_sends_nothing() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let err = client_for(&server)
            .build("octocat", "hello-world", "")
            .await
            .unwrap_err();

        assert!(matches!(err, DroneError::InvalidParameter("build")));
        mock.assert_async().await;
    }
}
