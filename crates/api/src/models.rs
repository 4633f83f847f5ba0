use serde::{Deserialize, Serialize};

/// A book as the book service reports it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    /// Server-assigned identifier
    pub id: i64,
    pub title: String,
    pub author: String,
    /// Non-negative unit price
    pub price: f64,
    /// Remaining inventory; zero renders as unavailable
    pub stock: u32,
}

/// Payload for creating a book.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBook {
    pub title: String,
    pub author: String,
    pub price: f64,
    pub stock: u32,
}

/// Partial update for a book; omitted fields are left unchanged by the
/// service.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateBook {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock: Option<u32>,
}

/// Lifecycle states the order service assigns.
///
/// Unrecognized statuses deserialize as `Unknown` rather than failing the
/// whole collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Pending,
    Completed,
    Cancelled,
    #[serde(other)]
    Unknown,
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
            OrderStatus::Unknown => "unknown",
        })
    }
}

/// An order as the order service reports it.
///
/// `total_price` is computed server-side; clients display it and never
/// derive their own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Server-assigned identifier
    pub id: i64,
    /// Reference into the book service's id space
    pub book_id: i64,
    pub quantity: u32,
    pub total_price: f64,
    pub customer_name: String,
    pub customer_email: String,
    #[serde(default)]
    pub status: OrderStatus,
    /// ISO-8601 text; carried raw because the offset suffix varies by
    /// backend configuration
    pub created_at: String,
}

/// Payload for creating an order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOrder {
    pub book_id: i64,
    pub quantity: u32,
    pub customer_name: String,
    pub customer_email: String,
}

/// Body for `POST /notify`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotifyRequest {
    pub order_id: i64,
}

/// Receipt returned by the notification service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotifyReceipt {
    pub message: String,
    pub order_id: i64,
    pub customer_email: String,
    /// Dispatch status reported by the service; carried but not rendered
    #[serde(default)]
    pub status: Option<String>,
}
