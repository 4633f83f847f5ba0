use reqwest::Client;

use crate::error::{check_status, expect_json, ApiError};
use crate::models::{NotifyReceipt, NotifyRequest};

/// Client for the notification service (port 8003 by default).
///
/// Purely request-triggered: there is no polling or subscription surface.
#[derive(Debug, Clone)]
pub struct NotificationClient {
    http: Client,
    base: String,
}

impl NotificationClient {
    pub fn new(http: Client, base: &str) -> Self {
        Self {
            http,
            base: base.trim_end_matches('/').to_string(),
        }
    }

    /// `POST /notify` with `{"order_id": ...}`
    pub async fn notify(&self, order_id: i64) -> Result<NotifyReceipt, ApiError> {
        let response = self
            .http
            .post(format!("{}/notify", self.base))
            .json(&NotifyRequest { order_id })
            .send()
            .await?;
        expect_json(response).await
    }

    /// `GET /health`; reachability only, the body is ignored
    pub async fn health(&self) -> Result<(), ApiError> {
        let response = self
            .http
            .get(format!("{}/health", self.base))
            .send()
            .await?;
        check_status(response).await.map(drop)
    }
}
