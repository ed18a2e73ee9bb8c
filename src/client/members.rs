use crate::error::Result;

use super::core::{segment, DroneClient};
use super::response::ApiResponse;

impl DroneClient {
    /// Lists repository collaborators and their permissions.
    pub async fn members(&self, namespace: &str, name: &str) -> Result<ApiResponse> {
        let url = self.repo_endpoint(namespace, name, &["collaborators"])?;
        self.get(url).await
    }

    pub async fn member(&self, namespace: &str, name: &str, user: &str) -> Result<ApiResponse> {
        let user = segment("user", user)?;
        let url = self.repo_endpoint(namespace, name, &["collaborators", user.as_str()])?;
        self.get(url).await
    }

    /// Removes a collaborator from the repository.
    pub async fn delete_member(
        &self,
        namespace: &str,
        name: &str,
        user: &str,
    ) -> Result<ApiResponse> {
        let user = segment("user", user)?;
        let url = self.repo_endpoint(namespace, name, &["collaborators", user.as_str()])?;
        self.delete(url).await
    }
}

#[cfg(test)]
mod tests {
    use crate::client::test_support::{bearer, client_for};

    #[tokio::test]
    async fn test_members_list() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/repos/octocat/hello-world/collaborators")
            .match_header("authorization", bearer().as_str())
            .with_status(200)
            .with_body(r#"[{"login":"octocat","permissions":{"admin":true}}]"#)
            .create_async()
            .await;

        let response = client_for(&server)
            .members("octocat", "hello-world")
            .await
            .unwrap();

        mock.assert_async().await;
        assert!(response.text().contains("octocat"));
    }

    #[tokio::test]
    async fn test_member_fetch_and_delete() {
        let mut server = mockito::Server::new_async().await;
        let client = client_for(&server);

        let fetch = server
            .mock("GET", "/repos/octocat/hello-world/collaborators/spaceghost")
            .match_header("authorization", bearer().as_str())
            .with_status(200)
            .create_async()
            .await;
        let delete = server
            .mock("DELETE", "/repos/octocat/hello-world/collaborators/spaceghost")
            .match_header("authorization", bearer().as_str())
            .with_status(204)
            .create_async()
            .await;

        client.member("octocat", "hello-world", "spaceghost").await.unwrap();
        client
            .delete_member("octocat", "hello-world", "spaceghost")
            .await
            .unwrap();

        fetch.assert_async().await;
        delete.assert_async().await;
    }
}
