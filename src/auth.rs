//! Login against a Docmost instance.
//!
//! The login endpoint takes the credentials as a URL-encoded form and hands the
//! token back either as an `authToken` cookie or in the JSON body, depending on
//! the server version.

use std::time::Duration;

use reqwest::header::{HeaderMap, ACCEPT, CONTENT_TYPE, SET_COOKIE};
use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;
use url::Url;

use crate::client::{build_http_client, describe_transport_error, join_url, DEFAULT_TIMEOUT_SECONDS};
use crate::endpoints;

pub const API_SUFFIX: &str = "/api";
pub const AUTH_COOKIE_NAME: &str = "authToken";

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid Docmost URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("Login failed: {0}")]
    LoginFailed(String),
    #[error("No token received from server")]
    NoToken,
    #[error("Connection error: {0}")]
    Connection(String),
}

/// Normalizes a user-supplied instance URL to its API root.
///
/// Trailing slashes are dropped and `/api` is appended unless already present.
pub fn normalize_api_url(url: &str) -> Result<String, AuthError> {
    let trimmed = url.trim().trim_end_matches('/');
    Url::parse(trimmed).map_err(|source| AuthError::InvalidUrl {
        url: url.to_string(),
        source,
    })?;

    if trimmed.ends_with(API_SUFFIX) {
        Ok(trimmed.to_string())
    } else {
        Ok(format!("{}{}", trimmed, API_SUFFIX))
    }
}

/// Token from an `authToken` cookie, if the server set one.
pub fn token_from_cookies(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .filter_map(|cookie| cookie.split(';').next())
        .filter_map(|pair| pair.split_once('='))
        .find(|(name, value)| name.trim() == AUTH_COOKIE_NAME && !value.trim().is_empty())
        .map(|(_, value)| value.trim().to_string())
}

/// Token from a login response body.
pub fn token_from_body(body: &Value) -> Option<String> {
    const CANDIDATES: [&[&str]; 5] = [
        &["token"],
        &["accessToken"],
        &["access_token"],
        &["data", "tokens", "accessToken"],
        &["data", "tokens", "access_token"],
    ];

    CANDIDATES.iter().find_map(|path| {
        path.iter()
            .try_fold(body, |value, key| value.get(*key))
            .and_then(Value::as_str)
            .filter(|token| !token.is_empty())
            .map(str::to_owned)
    })
}

pub fn extract_token(headers: &HeaderMap, body: &Value) -> Option<String> {
    token_from_cookies(headers).or_else(|| token_from_body(body))
}

/// Performs the login exchange against an API root.
#[derive(Debug, Clone)]
pub struct LoginClient {
    api_url: String,
    timeout: Duration,
}

impl LoginClient {
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECONDS),
        }
    }

    /// Exchanges credentials for a bearer token.
    pub async fn login(&self, email: &str, password: &str) -> Result<String, AuthError> {
        let url = join_url(&self.api_url, endpoints::AUTH_LOGIN.path);
        debug!("Logging in at {} as {}", url, email);

        let body = serde_urlencoded::to_string([("email", email), ("password", password)])
            .map_err(|e| AuthError::LoginFailed(e.to_string()))?;
        let client = build_http_client(self.timeout)
            .map_err(|e| AuthError::Connection(e.message().to_string()))?;

        let response = client
            .post(url.as_str())
            .header(CONTENT_TYPE, mime::APPLICATION_WWW_FORM_URLENCODED.as_ref())
            .header(ACCEPT, mime::APPLICATION_JSON.as_ref())
            .body(body)
            .send()
            .await
            .map_err(|e| AuthError::Connection(describe_transport_error(&e)))?;

        let status = response.status();
        debug!("Login responded with status {}", status);
        if status == StatusCode::UNAUTHORIZED {
            return Err(AuthError::InvalidCredentials);
        }

        let headers = response.headers().clone();
        let text = response
            .text()
            .await
            .map_err(|e| AuthError::Connection(describe_transport_error(&e)))?;

        if !status.is_success() {
            return Err(AuthError::LoginFailed(text));
        }

        let body = serde_json::from_str(&text).unwrap_or(Value::Null);
        extract_token(&headers, &body).ok_or(AuthError::NoToken)
    }
}
