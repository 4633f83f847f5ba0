//! Error taxonomy for calls against the bookstore services.

use reqwest::{Response, StatusCode};
use serde::Deserialize;
use thiserror::Error;

/// Error body shape the services answer with on failure.
///
/// FastAPI-style services put the text under `detail`; others use `message`.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

impl ErrorBody {
    fn into_detail(self) -> Option<String> {
        self.detail.or(self.message)
    }
}

/// Failure observed by a client call.
#[derive(Error, Debug)]
pub enum ApiError {
    /// The request never completed (connection refused, reset, DNS, ...)
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered with a non-2xx status
    #[error("service returned {status}")]
    Service {
        status: StatusCode,
        detail: Option<String>,
    },

    /// The service answered 2xx but the body did not match the wire model
    #[error("failed to decode response body: {0}")]
    Decode(#[source] reqwest::Error),
}

impl ApiError {
    /// Message shown to the user: the server's own detail verbatim when
    /// present, otherwise the caller's generic fallback.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Service {
                detail: Some(detail),
                ..
            } => detail.clone(),
            _ => fallback.to_string(),
        }
    }
}

/// Pass 2xx responses through; turn anything else into `ApiError::Service`,
/// salvaging the `detail`/`message` text when the body carries one.
pub(crate) async fn check_status(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let detail = response
        .json::<ErrorBody>()
        .await
        .ok()
        .and_then(ErrorBody::into_detail);

    tracing::debug!(status = %status, detail = ?detail, "service reported failure");

    Err(ApiError::Service { status, detail })
}

/// Decode a JSON body out of a response, after status checking.
pub(crate) async fn expect_json<T>(response: Response) -> Result<T, ApiError>
where
    T: serde::de::DeserializeOwned,
{
    let response = check_status(response).await?;
    response.json::<T>().await.map_err(ApiError::Decode)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_prefers_server_detail() {
        let error = ApiError::Service {
            status: StatusCode::NOT_FOUND,
            detail: Some("Order not found".to_string()),
        };
        assert_eq!(error.user_message("Error sending notification"), "Order not found");
    }

    #[test]
    fn test_user_message_falls_back_without_detail() {
        let error = ApiError::Service {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            detail: None,
        };
        assert_eq!(error.user_message("Error adding book"), "Error adding book");
    }

    #[test]
    fn test_error_body_detail_wins_over_message() {
        let body: ErrorBody =
            serde_json::from_str(r#"{"detail": "Insufficient stock", "message": "other"}"#)
                .unwrap();
        assert_eq!(body.into_detail().as_deref(), Some("Insufficient stock"));
    }

    #[test]
    fn test_error_body_message_used_when_detail_absent() {
        let body: ErrorBody = serde_json::from_str(r#"{"message": "boom"}"#).unwrap();
        assert_eq!(body.into_detail().as_deref(), Some("boom"));
    }

    #[test]
    fn test_error_body_tolerates_empty_object() {
        let body: ErrorBody = serde_json::from_str("{}").unwrap();
        assert_eq!(body.into_detail(), None);
    }
}
