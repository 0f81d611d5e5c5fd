//! HTTP client for the Docmost API.
//!
//! Every request the CLI sends goes through [`DocmostClient`]. The client owns
//! the base URL, the bearer token and the request timeout, encodes each body
//! the way its endpoint expects, and classifies every response into either an
//! unwrapped JSON value or an [`ApiError`].

use std::path::Path;
use std::time::Duration;

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder};
use serde_json::{json, Value};
use thiserror::Error;
use tracing::{debug, trace};

use crate::configuration::Configuration;
use crate::credentials::TokenStore;
use crate::endpoints::{Encoding, Endpoint};
use crate::envelope::unwrap_envelope;
use crate::payload::Payload;

pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
pub const UPLOAD_FIELD_NAME: &str = "file";
pub const UPLOAD_MEDIA_TYPE: &str = "text/markdown";
pub const USER_AGENT: &str = concat!("docmost-cli/", env!("CARGO_PKG_VERSION"));

pub const MISSING_URL_MESSAGE: &str =
    "No API URL configured. Set DOCMOST_URL or run 'docmost login'.";
pub const AUTHENTICATION_FAILED_MESSAGE: &str =
    "Authentication failed. Please run 'docmost login'.";

/// Category of an [`ApiError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    Authentication,
    NotFound,
    Validation,
    Api,
    Connection,
    Data,
}

/// Classified failure of a Docmost API call.
///
/// HTTP failures carry the status and the decoded response body, if any.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{message}")]
    Configuration { message: String },

    #[error("{message}")]
    Authentication {
        message: String,
        status: u16,
        body: Option<Value>,
    },

    #[error("{message}")]
    NotFound {
        message: String,
        status: u16,
        body: Option<Value>,
    },

    #[error("{message}")]
    Validation {
        message: String,
        status: u16,
        body: Option<Value>,
    },

    #[error("{message}")]
    Api {
        message: String,
        status: u16,
        body: Option<Value>,
    },

    #[error("Connection error: {message}")]
    Connection {
        message: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{message}")]
    Data { message: String },
}

impl ApiError {
    pub fn configuration(message: impl Into<String>) -> Self {
        ApiError::Configuration {
            message: message.into(),
        }
    }

    pub fn data(message: impl Into<String>) -> Self {
        ApiError::Data {
            message: message.into(),
        }
    }

    pub fn connection(source: reqwest::Error) -> Self {
        ApiError::Connection {
            message: describe_transport_error(&source),
            source,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::Configuration { .. } => ErrorKind::Configuration,
            ApiError::Authentication { .. } => ErrorKind::Authentication,
            ApiError::NotFound { .. } => ErrorKind::NotFound,
            ApiError::Validation { .. } => ErrorKind::Validation,
            ApiError::Api { .. } => ErrorKind::Api,
            ApiError::Connection { .. } => ErrorKind::Connection,
            ApiError::Data { .. } => ErrorKind::Data,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ApiError::Configuration { message }
            | ApiError::Authentication { message, .. }
            | ApiError::NotFound { message, .. }
            | ApiError::Validation { message, .. }
            | ApiError::Api { message, .. }
            | ApiError::Connection { message, .. }
            | ApiError::Data { message } => message,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Authentication { status, .. }
            | ApiError::NotFound { status, .. }
            | ApiError::Validation { status, .. }
            | ApiError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn body(&self) -> Option<&Value> {
        match self {
            ApiError::Authentication { body, .. }
            | ApiError::NotFound { body, .. }
            | ApiError::Validation { body, .. }
            | ApiError::Api { body, .. } => body.as_ref(),
            _ => None,
        }
    }

    /// Prefixes the message with `context`, keeping kind, status and body.
    pub fn with_context(mut self, context: &str) -> Self {
        match &mut self {
            ApiError::Configuration { message }
            | ApiError::Authentication { message, .. }
            | ApiError::NotFound { message, .. }
            | ApiError::Validation { message, .. }
            | ApiError::Api { message, .. }
            | ApiError::Connection { message, .. }
            | ApiError::Data { message } => {
                *message = format!("{}: {}", context, message);
            }
        }
        self
    }
}

/// Maps an error status to its [`ApiError`]; `None` for statuses below 400.
pub fn error_for_status(status: u16, body: Option<Value>) -> Option<ApiError> {
    let server_message = body
        .as_ref()
        .and_then(|body| body.get("message"))
        .and_then(Value::as_str)
        .map(str::to_owned);

    match status {
        401 => Some(ApiError::Authentication {
            message: AUTHENTICATION_FAILED_MESSAGE.to_string(),
            status,
            body,
        }),
        404 => Some(ApiError::NotFound {
            message: server_message.unwrap_or_else(|| "Resource not found".to_string()),
            status,
            body,
        }),
        400 => Some(ApiError::Validation {
            message: server_message.unwrap_or_else(|| "Validation error".to_string()),
            status,
            body,
        }),
        status if status >= 400 => Some(ApiError::Api {
            message: server_message.unwrap_or_else(|| format!("API error: {}", status)),
            status,
            body,
        }),
        _ => None,
    }
}

/// Classifies a decoded JSON response, unwrapping the envelope on success.
pub fn classify(status: u16, body: Value) -> Result<Value, ApiError> {
    match error_for_status(status, Some(body.clone())) {
        Some(error) => Err(error),
        None => Ok(unwrap_envelope(body)),
    }
}

/// Decodes a response body as JSON; anything else becomes `{"error": <text>}`.
pub fn decode_json_body(bytes: &[u8]) -> Value {
    serde_json::from_slice(bytes)
        .unwrap_or_else(|_| json!({ "error": String::from_utf8_lossy(bytes) }))
}

/// Joins the base URL and an endpoint path with exactly one slash.
pub fn join_url(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    if path.starts_with('/') {
        format!("{}{}", base, path)
    } else {
        format!("{}/{}", base, path)
    }
}

/// Flattens a transport error and its causes into one line.
pub(crate) fn describe_transport_error(error: &reqwest::Error) -> String {
    let mut message = error.to_string();
    let mut source = std::error::Error::source(error);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

pub(crate) fn build_http_client(timeout: Duration) -> Result<Client, ApiError> {
    Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .pool_max_idle_per_host(0)
        .build()
        .map_err(ApiError::connection)
}

/// Client for the Docmost REST API.
///
/// Requests are issued one at a time and each one uses a fresh connection.
#[derive(Debug, Clone)]
pub struct DocmostClient {
    url: String,
    token: Option<String>,
    timeout: Duration,
}

impl DocmostClient {
    /// Creates a client for `url`, failing when the URL is empty.
    pub fn new(url: impl Into<String>, token: Option<String>) -> Result<Self, ApiError> {
        let url = url.into();
        if url.trim().is_empty() {
            return Err(ApiError::configuration(MISSING_URL_MESSAGE));
        }
        Ok(Self {
            url: url.trim().to_string(),
            token: token.filter(|token| !token.is_empty()),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECONDS),
        })
    }

    /// Resolves the URL and token from explicit values, falling back to the
    /// configuration and the token store.
    pub fn resolve(
        url: Option<String>,
        token: Option<String>,
        configuration: &Configuration,
        tokens: &TokenStore,
    ) -> Result<Self, ApiError> {
        let url = url
            .filter(|url| !url.trim().is_empty())
            .or_else(|| configuration.url().map(str::to_owned))
            .ok_or_else(|| ApiError::configuration(MISSING_URL_MESSAGE))?;

        let token = match token {
            Some(token) => Some(token),
            None => tokens
                .get()
                .map_err(|e| ApiError::configuration(e.to_string()))?,
        };

        Self::new(url, token)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn endpoint_url(&self, path: &str) -> String {
        join_url(&self.url, path)
    }

    /// Calls `endpoint` with `payload`, encoded the way the endpoint expects.
    pub async fn call(&self, endpoint: &Endpoint, payload: &Payload) -> Result<Value, ApiError> {
        match endpoint.encoding {
            Encoding::Form => self.submit_form(endpoint.path, payload).await,
            Encoding::Json => self.submit_json(endpoint.path, payload).await,
        }
    }

    /// POST with a URL-encoded form body.
    pub async fn submit_form(&self, path: &str, fields: &Payload) -> Result<Value, ApiError> {
        let body = encode_form(fields)?;
        let url = self.endpoint_url(path);
        debug!("POST {} (form, {} field(s))", url, fields.len());

        self.execute_request(|client| {
            client
                .post(url.as_str())
                .header(CONTENT_TYPE, mime::APPLICATION_WWW_FORM_URLENCODED.as_ref())
                .header(ACCEPT, mime::APPLICATION_JSON.as_ref())
                .body(body)
        })
        .await
    }

    /// POST with a JSON object body.
    pub async fn submit_json(&self, path: &str, fields: &Payload) -> Result<Value, ApiError> {
        let url = self.endpoint_url(path);
        debug!("POST {} (json, {} field(s))", url, fields.len());

        self.execute_request(|client| {
            client
                .post(url.as_str())
                .header(CONTENT_TYPE, mime::APPLICATION_JSON.as_ref())
                .header(ACCEPT, mime::APPLICATION_JSON.as_ref())
                .json(&fields.to_json())
        })
        .await
    }

    /// POST a multipart body: the scalar `fields` followed by `file_path`
    /// as the `file` part, declared as markdown.
    pub async fn upload_file(
        &self,
        path: &str,
        file_path: &Path,
        fields: &Payload,
    ) -> Result<Value, ApiError> {
        let contents = tokio::fs::read(file_path).await.map_err(|e| {
            ApiError::data(format!("failed to read {}: {}", file_path.display(), e))
        })?;
        let file_name = file_path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("page.md")
            .to_string();

        let part = Part::bytes(contents)
            .file_name(file_name)
            .mime_str(UPLOAD_MEDIA_TYPE)
            .map_err(|e| ApiError::data(format!("invalid upload media type: {}", e)))?;
        let form = fields
            .form_pairs()
            .into_iter()
            .fold(Form::new(), |form, (name, value)| form.text(name, value))
            .part(UPLOAD_FIELD_NAME, part);

        let url = self.endpoint_url(path);
        debug!("POST {} (multipart, {})", url, file_path.display());

        self.execute_request(|client| {
            client
                .post(url.as_str())
                .header(ACCEPT, mime::APPLICATION_JSON.as_ref())
                .multipart(form)
        })
        .await
    }

    /// POST with a form body and return the raw response bytes on success.
    pub async fn fetch_raw(&self, path: &str, fields: &Payload) -> Result<Vec<u8>, ApiError> {
        let body = encode_form(fields)?;
        let url = self.endpoint_url(path);
        debug!("POST {} (form, raw response)", url);

        let (status, bytes) = self
            .send(|client| {
                client
                    .post(url.as_str())
                    .header(CONTENT_TYPE, mime::APPLICATION_WWW_FORM_URLENCODED.as_ref())
                    .body(body)
            })
            .await?;

        if status >= 400 {
            let body = serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
            if let Some(error) = error_for_status(status, Some(body)) {
                return Err(error);
            }
        }
        Ok(bytes)
    }

    async fn execute_request<F>(&self, request_builder: F) -> Result<Value, ApiError>
    where
        F: FnOnce(&Client) -> RequestBuilder,
    {
        let (status, bytes) = self.send(request_builder).await?;
        classify(status, decode_json_body(&bytes))
    }

    async fn send<F>(&self, request_builder: F) -> Result<(u16, Vec<u8>), ApiError>
    where
        F: FnOnce(&Client) -> RequestBuilder,
    {
        let client = build_http_client(self.timeout)?;
        let mut request = request_builder(&client);

        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(ApiError::connection)?;
        let status = response.status().as_u16();
        debug!("Docmost responded with status {}", status);

        let bytes = response.bytes().await.map_err(ApiError::connection)?;
        trace!("Received {} byte(s)", bytes.len());
        Ok((status, bytes.to_vec()))
    }
}

fn encode_form(fields: &Payload) -> Result<String, ApiError> {
    serde_urlencoded::to_string(fields.form_pairs())
        .map_err(|e| ApiError::data(format!("failed to encode form body: {}", e)))
}
