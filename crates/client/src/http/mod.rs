//! REST backend client.
//!
//! Status handling and retries live here; the per-resource modules only build
//! requests and decode bodies.

use std::time::Duration;

use reqwest::StatusCode;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::{ClientConfig, ClientError, Result, Session};

mod admin;
mod marks;
mod rounds;

const USER_AGENT_VALUE: &str = concat!("jury-client/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
    session: Session,
    config: ClientConfig,
}

impl ApiClient {
    pub fn new(config: ClientConfig, session: Session) -> Result<Self> {
        if config.base_url.trim().is_empty() {
            return Err(ClientError::ConfigError("base URL is empty".to_string()));
        }

        let mut default_headers = HeaderMap::new();
        default_headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers(default_headers)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            session,
            config,
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Sends the request built by `build`, retrying transient failures.
    ///
    /// `build` runs once per attempt so bodies and query strings are rebuilt.
    async fn execute<F>(&self, build: F) -> Result<reqwest::Response>
    where
        F: Fn(&reqwest::Client) -> reqwest::RequestBuilder + Send + Sync,
    {
        let mut retries = 0;

        loop {
            match self.execute_once(&build).await {
                Ok(response) => return Ok(response),
                Err(e) if e.is_retryable() && retries < self.config.max_retries => {
                    retries += 1;
                    let backoff = self.config.backoff_for(retries);

                    warn!(
                        error = %e,
                        retry = retries,
                        max_retries = self.config.max_retries,
                        backoff_ms = backoff.as_millis() as u64,
                        "retrying request"
                    );

                    tokio::time::sleep(backoff).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn execute_once<F>(&self, build: &F) -> Result<reqwest::Response>
    where
        F: Fn(&reqwest::Client) -> reqwest::RequestBuilder + Send + Sync,
    {
        let response = build(&self.client)
            .bearer_auth(self.session.token())
            .send()
            .await?;

        let status = response.status();
        debug!(status = status.as_u16(), url = %response.url(), "response received");

        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(error_for_status(status, body))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.url(path);
        let response = self.execute(|client| client.get(&url)).await?;
        decode(response).await
    }
}

/// Maps a non-success status to the error taxonomy.
///
/// The backend reports a duplicate (team, round, juror) triple as a 400 whose
/// body names the unique constraint; that case is a conflict, not bad input.
fn error_for_status(status: StatusCode, body: String) -> ClientError {
    match status {
        StatusCode::UNAUTHORIZED => ClientError::Unauthorized(body),
        StatusCode::FORBIDDEN => ClientError::Forbidden(body),
        StatusCode::NOT_FOUND => ClientError::NotFound(body),
        StatusCode::CONFLICT => ClientError::Conflict(body),
        StatusCode::BAD_REQUEST if body.contains("unique") => ClientError::Conflict(body),
        StatusCode::TOO_MANY_REQUESTS => ClientError::RateLimited,
        _ => ClientError::Server {
            status: status.as_u16(),
            body,
        },
    }
}

async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let bytes = response.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert!(matches!(
            error_for_status(StatusCode::CONFLICT, String::new()),
            ClientError::Conflict(_)
        ));
        assert!(matches!(
            error_for_status(
                StatusCode::BAD_REQUEST,
                r#"{"non_field_errors":["The fields team_id, round_id, jury_id must make a unique set."]}"#
                    .to_string()
            ),
            ClientError::Conflict(_)
        ));
        assert!(matches!(
            error_for_status(StatusCode::BAD_REQUEST, "{}".to_string()),
            ClientError::Server { status: 400, .. }
        ));
        assert!(error_for_status(StatusCode::BAD_GATEWAY, String::new()).is_retryable());
        assert!(error_for_status(StatusCode::TOO_MANY_REQUESTS, String::new()).is_retryable());
        assert!(!error_for_status(StatusCode::FORBIDDEN, String::new()).is_retryable());
    }

    #[test]
    fn test_empty_base_url_is_rejected() {
        let result = ApiClient::new(ClientConfig::new("  "), Session::new("token"));
        assert!(matches!(result, Err(ClientError::ConfigError(_))));
    }
}
