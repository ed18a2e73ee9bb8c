use crate::error::Result;

use super::core::DroneClient;
use super::response::ApiResponse;

impl DroneClient {
    /// The account the token belongs to.
    pub async fn user(&self) -> Result<ApiResponse> {
        let url = self.endpoint(&["user"])?;
        self.get(url).await
    }

    /// Build agents registered with the server.
    pub async fn nodes(&self) -> Result<ApiResponse> {
        let url = self.endpoint(&["nodes"])?;
        self.get(url).await
    }
}

#[cfg(test)]
mod tests {
    use crate::client::test_support::{bearer, client_for};

    #[tokio::test]
    async fn test_user_and_nodes() {
        let mut server = mockito::Server::new_async().await;
        let client = client_for(&server);

        let user = server
            .mock("GET", "/user")
            .match_header("authorization", bearer().as_str())
            .with_status(200)
            .with_body(r#"{"login":"octocat","admin":false}"#)
            .create_async()
            .await;
        let nodes = server
            .mock("GET", "/nodes")
            .match_header("authorization", bearer().as_str())
            .with_status(200)
            .with_body("[]")
            .create_async()
            .await;

        let me = client.user().await.unwrap();
        client.nodes().await.unwrap();

        user.assert_async().await;
        nodes.assert_async().await;
        let me: serde_json::Value = me.json().unwrap();
        assert_eq!(me["login"], "octocat");
    }
}
