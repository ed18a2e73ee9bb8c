use log::debug;
use reqwest::{Client, Method};
use std::fmt::Display;
use std::time::Duration;
use url::Url;

use crate::auth::Token;
use crate::config::DroneConfig;
use crate::error::{DroneError, Result};

use super::response::ApiResponse;
use super::RequestBody;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Authenticated handle on a Drone server.
///
/// Holds a pooled HTTP client, the API base URL and the bearer token. It
/// keeps no per-call state, so clones can be shared freely across tasks.
#[derive(Clone, Debug)]
pub struct DroneClient {
    client: Client,
    server: Url,
    token: Token,
}

/// Builder for [`DroneClient`] with transport settings.
#[derive(Debug)]
pub struct ClientBuilder {
    server: String,
    token: Token,
    timeout: Duration,
    connect_timeout: Duration,
    user_agent: String,
}

impl ClientBuilder {
    /// Upper bound for a whole request, response body included.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Validates the server URL and token and builds the client.
    ///
    /// # Errors
    ///
    /// Returns [`DroneError::Config`] if the token is blank, or the server URL
    /// is blank, unparseable, not http(s), or cannot carry path segments.
    pub fn build(self) -> Result<DroneClient> {
        if self.token.is_empty() {
            return Err(DroneError::Config("Drone token must not be empty".to_string()));
        }

        let server = parse_server(&self.server)?;

        let client = Client::builder()
            .user_agent(self.user_agent)
            .timeout(self.timeout)
            .connect_timeout(self.connect_timeout)
            .build()
            .map_err(|e| DroneError::Config(format!("Failed to create HTTP client: {e}")))?;

        Ok(DroneClient {
            client,
            server,
            token: self.token,
        })
    }
}

fn parse_server(server: &str) -> Result<Url> {
    let server = server.trim();
    if server.is_empty() {
        return Err(DroneError::Config("Drone server URL must not be empty".to_string()));
    }

    let mut url = Url::parse(server)
        .map_err(|e| DroneError::Config(format!("Invalid server URL '{server}': {e}")))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(DroneError::Config(format!(
            "Unsupported server URL scheme '{}': expected http or https",
            url.scheme()
        )));
    }

    if url.cannot_be_a_base() {
        return Err(DroneError::Config(format!(
            "Server URL '{server}' cannot be used as a base URL"
        )));
    }

    url.set_query(None);
    url.set_fragment(None);

    Ok(url)
}

/// Rejects identifiers that cannot stand as a single path segment.
///
/// Blank values would collapse the path, and `.` / `..` are dropped or
/// resolved by URL normalization, so all of them address another resource.
pub(super) fn segment(name: &'static str, value: impl Display) -> Result<String> {
    let value = value.to_string();
    if value.trim().is_empty() || matches!(value.as_str(), "." | "..") {
        return Err(DroneError::InvalidParameter(name));
    }
    Ok(value)
}

impl DroneClient {
    /// Creates a client with default timeouts and user agent.
    ///
    /// # Arguments
    ///
    /// * `server` - Drone API base URL (e.g., "https://drone.example.com/api")
    /// * `token` - Personal access token sent as a bearer credential
    ///
    /// # Errors
    ///
    /// Returns [`DroneError::Config`] when the server URL or token is invalid.
    pub fn new(server: &str, token: Token) -> Result<Self> {
        Self::builder(server, token).build()
    }

    pub fn builder(server: &str, token: Token) -> ClientBuilder {
        ClientBuilder {
            server: server.to_string(),
            token,
            timeout: DEFAULT_TIMEOUT,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            user_agent: format!("dronectl/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    /// Creates a client from loaded configuration.
    ///
    /// # Errors
    ///
    /// Returns [`DroneError::Config`] if the server or token is missing or
    /// invalid.
    pub fn from_config(config: &DroneConfig) -> Result<Self> {
        let server = config.require_server()?;
        let token = Token::from(config.require_token()?);

        let mut builder = Self::builder(server, token)
            .timeout(config.timeout())
            .connect_timeout(config.connect_timeout());

        if let Some(user_agent) = &config.user_agent {
            builder = builder.user_agent(user_agent.clone());
        }

        builder.build()
    }

    /// API base URL every path is appended to.
    pub fn server(&self) -> &Url {
        &self.server
    }

    /// Appends percent-encoded segments to the server URL.
    pub(super) fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.server.clone();
        url.path_segments_mut()
            .map_err(|()| DroneError::Config("Server URL cannot be a base".to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Builds `/repos/{namespace}/{name}/...`.
    pub(super) fn repo_endpoint(&self, namespace: &str, name: &str, rest: &[&str]) -> Result<Url> {
        let namespace = segment("namespace", namespace)?;
        let name = segment("name", name)?;

        let mut segments = vec!["repos", namespace.as_str(), name.as_str()];
        segments.extend_from_slice(rest);

        self.endpoint(&segments)
    }

    async fn execute(
        &self,
        method: Method,
        url: Url,
        body: Option<&RequestBody>,
    ) -> Result<ApiResponse> {
        debug!("{method} {url}");

        let mut request = self
            .client
            .request(method.clone(), url.clone())
            .bearer_auth(self.token.as_str());

        if let Some(body) = body {
            request = request.json(body);
        }

        let response = ApiResponse::read(request.send().await?).await?;

        debug!("{method} {url} -> {}", response.status());

        Ok(response)
    }

    pub(super) async fn get(&self, url: Url) -> Result<ApiResponse> {
        self.execute(Method::GET, url, None).await
    }

    pub(super) async fn post(&self, url: Url) -> Result<ApiResponse> {
        self.execute(Method::POST, url, None).await
    }

    pub(super) async fn post_json(&self, url: Url, body: &RequestBody) -> Result<ApiResponse> {
        self.execute(Method::POST, url, Some(body)).await
    }

    pub(super) async fn patch_json(&self, url: Url, body: &RequestBody) -> Result<ApiResponse> {
        self.execute(Method::PATCH, url, Some(body)).await
    }

    pub(super) async fn delete(&self, url: Url) -> Result<ApiResponse> {
        self.execute(Method::DELETE, url, None).await
    }
}
