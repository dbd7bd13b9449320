use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use oauth2::{basic::BasicErrorResponse, RequestTokenError};
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;

/// Failure talking to the Graph API. `Display` is the message shown to the user.
#[derive(Debug, Error)]
pub enum GraphError {
    /// The provider answered with an error body carrying its own message.
    #[error("{0}")]
    Api(String),

    /// Never carries the request URL, which may hold the app secret.
    #[error("{0}")]
    Transport(reqwest::Error),

    #[error("{0}")]
    Decode(String),
}

#[derive(Deserialize)]
struct GraphErrorBody {
    error: GraphErrorDetail,
}

#[derive(Deserialize)]
struct GraphErrorDetail {
    message: Option<String>,
}

fn graph_error_message(body: &[u8]) -> Option<String> {
    serde_json::from_slice::<GraphErrorBody>(body)
        .ok()
        .and_then(|body| body.error.message)
        .filter(|message| !message.is_empty())
}

impl From<reqwest::Error> for GraphError {
    fn from(e: reqwest::Error) -> Self {
        Self::Transport(e.without_url())
    }
}

impl GraphError {
    pub fn from_error_body(status: u16, body: &[u8]) -> Self {
        match graph_error_message(body) {
            Some(message) => Self::Api(message),
            None => Self::Api(format!("Request failed with status code {status}")),
        }
    }

    pub fn from_token_error(err: RequestTokenError<reqwest::Error, BasicErrorResponse>) -> Self {
        match err {
            RequestTokenError::ServerResponse(response) => Self::Api(
                response
                    .error_description()
                    .cloned()
                    .unwrap_or_else(|| response.to_string()),
            ),
            RequestTokenError::Request(e) => Self::from(e),
            // Graph errors are objects, so they never parse as a standard OAuth error.
            RequestTokenError::Parse(e, body) => match graph_error_message(&body) {
                Some(message) => Self::Api(message),
                None => Self::Decode(e.to_string()),
            },
            RequestTokenError::Other(message) => Self::Decode(message),
        }
    }
}

#[derive(Debug, Error)]
pub enum CallbackError {
    #[error("{0}")]
    Denied(String),

    #[error("Invalid OAuth state")]
    StateMismatch,

    #[error("Missing authorization code")]
    MissingCode,

    #[error(transparent)]
    Graph(#[from] GraphError),
}

/// Errors returned as JSON from the API routes.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Graph API error: {0}")]
    Graph(#[from] GraphError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            Self::Graph(e) => {
                tracing::error!("Graph API error: {}", e);
                (StatusCode::BAD_REQUEST, e.to_string())
            }
        };

        (
            status,
            Json(json!({
                "success": false,
                "error": error_message,
            })),
        )
            .into_response()
    }
}
