use reqwest::Client;

use crate::error::{check_status, expect_json, ApiError};
use crate::models::{Book, CreateBook, UpdateBook};

/// Client for the book service (inventory CRUD on port 8001 by default).
#[derive(Debug, Clone)]
pub struct BookClient {
    http: Client,
    base: String,
}

impl BookClient {
    pub fn new(http: Client, base: &str) -> Self {
        Self {
            http,
            base: base.trim_end_matches('/').to_string(),
        }
    }

    /// `GET /books`
    pub async fn list(&self) -> Result<Vec<Book>, ApiError> {
        let response = self
            .http
            .get(format!("{}/books", self.base))
            .send()
            .await?;
        expect_json(response).await
    }

    /// `GET /books/{id}`
    pub async fn get(&self, id: i64) -> Result<Book, ApiError> {
        let response = self
            .http
            .get(format!("{}/books/{}", self.base, id))
            .send()
            .await?;
        expect_json(response).await
    }

    /// `POST /books`
    pub async fn create(&self, book: &CreateBook) -> Result<Book, ApiError> {
        let response = self
            .http
            .post(format!("{}/books", self.base))
            .json(book)
            .send()
            .await?;
        expect_json(response).await
    }

    /// `PUT /books/{id}`
    pub async fn update(&self, id: i64, changes: &UpdateBook) -> Result<Book, ApiError> {
        let response = self
            .http
            .put(format!("{}/books/{}", self.base, id))
            .json(changes)
            .send()
            .await?;
        expect_json(response).await
    }

    /// `DELETE /books/{id}`
    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        let response = self
            .http
            .delete(format!("{}/books/{}", self.base, id))
            .send()
            .await?;
        check_status(response).await.map(drop)
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
