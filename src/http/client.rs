//! HTTP client for single-shot registry lookups.

use anyhow::Result;
use log::debug;
use reqwest::Client;
use serde::de::DeserializeOwned;

use super::error::{FetchError, classify_error};

/// Thin wrapper that turns one GET into a typed JSON document.
///
/// There is no retry: every failure is classified into a [`FetchError`]
/// and returned to the caller as-is.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Creates a new HTTP client wrapping the given reqwest Client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Performs a GET request and deserializes the JSON response.
    ///
    /// The body is parsed twice over: first as generic JSON, so malformed
    /// bodies are reported as [`FetchError::Decode`], then into `T`, so a
    /// well-formed body with missing keys is a [`FetchError::Schema`].
    #[tracing::instrument(skip(self))]
    pub async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        debug!("GET JSON from {}...", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| classify_error(url, e))?;

        let response = response
            .error_for_status()
            .map_err(|e| classify_error(url, e))?;

        let body = response.text().await.map_err(|e| classify_error(url, e))?;
        debug!("Read {} bytes from {}", body.len(), url);

        let value: serde_json::Value =
            serde_json::from_str(&body).map_err(|e| FetchError::Decode {
                url: url.to_string(),
                message: e.to_string(),
            })?;

        let result = serde_json::from_value(value).map_err(|e| FetchError::Schema {
            url: url.to_string(),
            message: e.to_string(),
        })?;

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[derive(serde::Deserialize, Debug, PartialEq)]
    struct TestResponse {
        name: String,
        value: i32,
    }

    fn fetch_error(err: &anyhow::Error) -> &FetchError {
        err.downcast_ref::<FetchError>()
            .expect("error should be a FetchError")
    }

    #[tokio::test]
    async fn test_get_json_success() {
        let mut server = mockito::Server::new_async().await;
        let url = server.url();

        let mock = server
            .mock("GET", "/test")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"name": "test", "value": 42}"#)
            .create_async()
            .await;

        let client = HttpClient::new(Client::new());
        let result: TestResponse = client.get_json(&format!("{}/test", url)).await.unwrap();

        mock.assert_async().await;
        assert_eq!(result.name, "test");
        assert_eq!(result.value, 42);
    }

    #[tokio::test]
    async fn test_get_json_not_found() {
        let mut server = mockito::Server::new_async().await;
        let url = server.url();

        let mock = server
            .mock("GET", "/test")
            .with_status(404)
            .create_async()
            .await;

        let client = HttpClient::new(Client::new());
        let result: Result<serde_json::Value> = client.get_json(&format!("{}/test", url)).await;

        mock.assert_async().await;
        let err = result.unwrap_err();
        assert!(matches!(
            fetch_error(&err),
            FetchError::HttpStatus { status, .. } if *status == StatusCode::NOT_FOUND
        ));
    }

    #[tokio::test]
    async fn test_get_json_is_not_retried() {
        let mut server = mockito::Server::new_async().await;
        let url = server.url();

        let mock = server
            .mock("GET", "/test")
            .with_status(503)
            .expect(1)
            .create_async()
            .await;

        let client = HttpClient::new(Client::new());
        let result: Result<serde_json::Value> = client.get_json(&format!("{}/test", url)).await;

        mock.assert_async().await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_get_json_malformed_body() {
        let mut server = mockito::Server::new_async().await;
        let url = server.url();

        let _mock = server
            .mock("GET", "/test")
            .with_status(200)
            .with_body("<html>not json</html>")
            .create_async()
            .await;

        let client = HttpClient::new(Client::new());
        let result: Result<TestResponse> = client.get_json(&format!("{}/test", url)).await;

        let err = result.unwrap_err();
        assert!(matches!(fetch_error(&err), FetchError::Decode { .. }));
    }

    #[tokio::test]
    async fn test_get_json_missing_key() {
        let mut server = mockito::Server::new_async().await;
        let url = server.url();

        let _mock = server
            .mock("GET", "/test")
            .with_status(200)
            .with_body(r#"{"name": "test"}"#)
            .create_async()
            .await;

        let client = HttpClient::new(Client::new());
        let result: Result<TestResponse> = client.get_json(&format!("{}/test", url)).await;

        let err = result.unwrap_err();
        match fetch_error(&err) {
            FetchError::Schema { message, .. } => assert!(message.contains("value")),
            other => panic!("Expected schema error, got {:?}", other),
        }
    }
}
