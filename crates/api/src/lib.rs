//! Typed HTTP bindings for the three bookstore services.
//!
//! One binding per service, all sharing a single connection pool. Requests
//! are never retried; callers surface failures through
//! [`ApiError::user_message`] and keep whatever state they already had.

pub mod books;
pub mod error;
pub mod models;
pub mod notifications;
pub mod orders;

pub use books::BookClient;
pub use error::ApiError;
pub use notifications::NotificationClient;
pub use orders::OrderClient;

use reqwest::Client;
use shelf_kernel::settings::ServiceSettings;

/// Bindings for all three services, cloned from one `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct Clients {
    pub books: BookClient,
    pub orders: OrderClient,
    pub notifications: NotificationClient,
}

impl Clients {
    /// Build bindings from the configured base URLs.
    pub fn from_settings(services: &ServiceSettings) -> Self {
        let http = Client::new();
        Self {
            books: BookClient::new(http.clone(), &services.books),
            orders: OrderClient::new(http.clone(), &services.orders),
            notifications: NotificationClient::new(http, &services.notifications),
        }
    }
}
