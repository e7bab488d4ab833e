use axum::{
    extract::rejection::QueryRejection,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use serde_json::Value;

/// Startup failures. None of these are per-request conditions.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} not found")]
    Missing(&'static str),
    #[error("{key} is not a valid URL: {source}")]
    InvalidUrl {
        key: &'static str,
        #[source]
        source: oauth2::url::ParseError,
    },
    #[error("{key} has an invalid value: {value:?}")]
    InvalidValue { key: &'static str, value: String },
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
}

/// Outcome of a failed call to the provider.
///
/// `Transport` carries no response at all, so there is no status or body to
/// pass through to the caller.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("Request to provider failed: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("Request failed with status code {}", .status.as_u16())]
    Status { status: StatusCode, body: Value },
    #[error("Unexpected provider response ({}): {reason}", .status.as_u16())]
    UnexpectedBody {
        status: StatusCode,
        body: Value,
        reason: String,
    },
}

impl ProviderError {
    pub fn status(&self) -> StatusCode {
        match self {
            ProviderError::Status { status, .. } => *status,
            ProviderError::Transport(_) | ProviderError::UnexpectedBody { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn body(&self) -> Option<&Value> {
        match self {
            ProviderError::Transport(_) => None,
            ProviderError::Status { body, .. } | ProviderError::UnexpectedBody { body, .. } => {
                Some(body)
            }
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Authorization code is missing")]
    MissingCode,
    #[error("Authorization token is missing")]
    MissingToken,
    #[error("text is required")]
    MissingText,
    #[error("Query string is invalid: {0}")]
    MalformedQuery(#[source] QueryRejection),
    #[error("Request body is not valid JSON: {0}")]
    MalformedBody(#[source] serde_json::Error),
    #[error(transparent)]
    Provider(#[from] ProviderError),
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<Value>,
    pub message: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingCode
            | ApiError::MissingText
            | ApiError::MalformedQuery(_)
            | ApiError::MalformedBody(_) => StatusCode::BAD_REQUEST,
            ApiError::MissingToken => StatusCode::UNAUTHORIZED,
            ApiError::Provider(err) => err.status(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        // Provider failures always report `response`, null when nothing came back.
        let response = match &self {
            ApiError::Provider(err) => Some(err.body().cloned().unwrap_or(Value::Null)),
            _ => None,
        };

        let body = Json(ErrorResponse {
            success: false,
            response,
            message: self.to_string(),
        });

        (status, body).into_response()
    }
}
