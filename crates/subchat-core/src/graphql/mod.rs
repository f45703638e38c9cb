//! GraphQL transport for the Hasura endpoint.
//!
//! One POST per operation carrying `{query, operationName, variables}`. The
//! response envelope is `{data, errors}`; a non-empty `errors` array wins over
//! any partial `data`. No retries and no timeouts beyond reqwest defaults.

pub mod operations;

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use url::Url;

/// Error code Hasura uses for expired or malformed access tokens.
pub const INVALID_JWT_CODE: &str = "invalid-jwt";

/// A named GraphQL document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Operation {
    pub name: &'static str,
    pub document: &'static str,
}

#[derive(Debug, thiserror::Error)]
pub enum GraphqlError {
    /// Network unreachable, connection reset, TLS failure, etc.
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-2xx response without a GraphQL error body.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The server answered with a non-empty `errors` array.
    #[error("{}", .messages.join("; "))]
    Response {
        messages: Vec<String>,
        code: Option<String>,
    },

    /// Neither `data` nor `errors` were present.
    #[error("Response contained no data")]
    MissingData,

    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl GraphqlError {
    /// True when the access token was rejected.
    pub fn is_unauthorized(&self) -> bool {
        match self {
            GraphqlError::Status { status, .. } => *status == StatusCode::UNAUTHORIZED.as_u16(),
            GraphqlError::Response { code, .. } => code.as_deref() == Some(INVALID_JWT_CODE),
            _ => false,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RequestBody<'a, V> {
    query: &'a str,
    operation_name: &'a str,
    variables: &'a V,
}

#[derive(Deserialize)]
struct Envelope<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<WireError>,
}

#[derive(Deserialize)]
struct WireError {
    message: String,
    #[serde(default)]
    extensions: Option<WireExtensions>,
}

#[derive(Deserialize)]
struct WireExtensions {
    code: Option<String>,
}

/// Thin client bound to one endpoint and (optionally) one access token.
#[derive(Debug, Clone)]
pub struct GraphqlClient {
    http: reqwest::Client,
    endpoint: Url,
    access_token: Option<String>,
}

impl GraphqlClient {
    pub fn new(endpoint: Url) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint,
            access_token: None,
        }
    }

    /// Attaches a bearer token sent with every request.
    #[must_use]
    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    pub fn set_access_token(&mut self, token: Option<String>) {
        self.access_token = token;
    }

    /// Executes an operation and decodes its `data` into `T`.
    ///
    /// # Errors
    /// See [`GraphqlError`] for the failure taxonomy.
    pub async fn execute<V, T>(
        &self,
        operation: &Operation,
        variables: &V,
    ) -> Result<T, GraphqlError>
    where
        V: Serialize,
        T: DeserializeOwned,
    {
        tracing::debug!(operation = operation.name, "graphql request");

        let body = RequestBody {
            query: operation.document,
            operation_name: operation.name,
            variables,
        };

        let mut request = self.http.post(self.endpoint.clone()).json(&body);
        if let Some(token) = &self.access_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.inspect_err(|e| {
            tracing::warn!(operation = operation.name, error = %e, "graphql transport error");
        })?;
        let status = response.status();
        let text = response.text().await?;

        let result = decode_response(status, &text);
        if let Err(e) = &result {
            tracing::warn!(operation = operation.name, error = %e, "graphql request failed");
        }
        result
    }
}

fn decode_response<T: DeserializeOwned>(status: StatusCode, text: &str) -> Result<T, GraphqlError> {
    if !status.is_success() {
        // Hasura reports some failures (e.g. bad JWT) with a GraphQL body on
        // non-2xx; surface those as Response so callers see the code.
        if let Ok(envelope) = serde_json::from_str::<Envelope<serde_json::Value>>(text)
            && !envelope.errors.is_empty()
        {
            return Err(response_error(envelope.errors));
        }
        return Err(GraphqlError::Status {
            status: status.as_u16(),
            body: text.to_string(),
        });
    }

    let envelope: Envelope<T> = serde_json::from_str(text)?;
    if !envelope.errors.is_empty() {
        return Err(response_error(envelope.errors));
    }
    envelope.data.ok_or(GraphqlError::MissingData)
}

fn response_error(errors: Vec<WireError>) -> GraphqlError {
    let code = errors
        .iter()
        .find_map(|e| e.extensions.as_ref().and_then(|ext| ext.code.clone()));
    GraphqlError::Response {
        messages: errors.into_iter().map(|e| e.message).collect(),
        code,
    }
}
