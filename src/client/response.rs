use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::borrow::Cow;

use crate::error::Result;

/// Raw HTTP response returned by every client operation.
///
/// Error statuses are not interpreted; callers branch on [`status`](Self::status)
/// and decode the body against the server's own schema.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: Vec<u8>,
}

impl ApiResponse {
    pub fn new(status: StatusCode, headers: HeaderMap, body: Vec<u8>) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// Drains a `reqwest` response. A failure while reading the body is a
    /// transport error.
    pub(crate) async fn read(response: reqwest::Response) -> Result<Self> {
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await?.to_vec();

        Ok(Self::new(status, headers, body))
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Looks up a header value, ignoring values that are not valid UTF-8.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    pub fn into_body(self) -> Vec<u8> {
        self.body
    }

    /// Body as text, replacing invalid UTF-8 sequences.
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }

    /// Decodes the body as JSON into the caller's type.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_slice(&self.body)?)
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    pub fn is_json(&self) -> bool {
        self.header("content-type")
            .is_some_and(|ct| ct.starts_with("application/json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::{HeaderValue, CONTENT_TYPE};

    fn json_response(status: u16, body: &str) -> ApiResponse {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        ApiResponse::new(
            StatusCode::from_u16(status).unwrap(),
            headers,
            body.as_bytes().to_vec(),
        )
    }

    #[test]
    fn test_json_decoding() {
        let response = json_response(200, r#"{"id": 42, "slug": "octocat/hello-world"}"#);
        let value: serde_json::Value = response.json().unwrap();
        assert_eq!(value["id"], 42);
        assert_eq!(value["slug"], "octocat/hello-world");
        assert!(response.is_json());
        assert!(response.is_success());
    }

    #[test]
    fn test_error_status_is_not_interpreted() {
        let response = json_response(404, r#"{"message": "Not Found"}"#);
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(!response.is_success());
        assert_eq!(response.text(), r#"{"message": "Not Found"}"#);
    }

    #[test]
    fn test_invalid_json_is_json_error() {
        let response = json_response(200, "<html>");
        let result: Result<serde_json::Value> = response.json();
        assert!(matches!(result, Err(crate::error::DroneError::Json(_))));
    }

    #[test]
    fn test_text_is_lossy() {
        let response = ApiResponse::new(StatusCode::OK, HeaderMap::new(), vec![b'o', b'k', 0xff]);
        assert_eq!(response.text(), "ok\u{fffd}");
        assert!(!response.is_json());
        assert_eq!(response.into_body().len(), 3);
    }
}
