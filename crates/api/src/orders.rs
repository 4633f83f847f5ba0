use reqwest::Client;

use crate::error::{check_status, expect_json, ApiError};
use crate::models::{CreateOrder, Order};

/// Client for the order service (port 8002 by default).
///
/// Order totals and stock checks happen server-side; a rejected order
/// (unknown book, insufficient stock) comes back as an ordinary
/// `ApiError::Service` with the service's detail text.
#[derive(Debug, Clone)]
pub struct OrderClient {
    http: Client,
    base: String,
}

impl OrderClient {
    pub fn new(http: Client, base: &str) -> Self {
        Self {
            http,
            base: base.trim_end_matches('/').to_string(),
        }
    }

    /// `GET /orders`
    pub async fn list(&self) -> Result<Vec<Order>, ApiError> {
        let response = self
            .http
            .get(format!("{}/orders", self.base))
            .send()
            .await?;
        expect_json(response).await
    }

    /// `GET /orders/{id}`
    pub async fn get(&self, id: i64) -> Result<Order, ApiError> {
        let response = self
            .http
            .get(format!("{}/orders/{}", self.base, id))
            .send()
            .await?;
        expect_json(response).await
    }

    /// `POST /orders`
    pub async fn create(&self, order: &CreateOrder) -> Result<Order, ApiError> {
        let response = self
            .http
            .post(format!("{}/orders", self.base))
            .json(order)
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
