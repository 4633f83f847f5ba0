//! Order list view: resolved book titles, totals, badges, and creation.

use std::sync::Mutex;

use async_trait::async_trait;
use shelf_api::models::{Book, CreateOrder, Order};
use shelf_api::{ApiError, BookClient, OrderClient};
use shelf_kernel::View;

use crate::utils::{format_price, humanize_timestamp, status_badge};

/// Empty-state line shown when the service reports no orders.
pub const EMPTY_ORDERS: &str = "No orders found. Create some orders!";

/// Title shown for orders whose book id is not in the cached book list.
pub const UNKNOWN_BOOK: &str = "Unknown Book";

/// Order list view.
///
/// Holds two caches: the order collection and its own copy of the book list,
/// used both for title resolution and as the creation form's options. The
/// book cache is deliberately independent of the books view's cache.
pub struct OrdersView {
    orders: OrderClient,
    books: BookClient,
    order_cache: Mutex<Vec<Order>>,
    book_options: Mutex<Vec<Book>>,
}

impl OrdersView {
    pub fn new(orders: OrderClient, books: BookClient) -> Self {
        Self {
            orders,
            books,
            order_cache: Mutex::new(Vec::new()),
            book_options: Mutex::new(Vec::new()),
        }
    }

    /// Re-fetch the order collection and, separately, the book options.
    pub async fn refresh(&self) -> Result<(), ApiError> {
        self.refresh_orders().await?;
        self.refresh_book_options().await?;
        Ok(())
    }

    pub async fn refresh_orders(&self) -> Result<(), ApiError> {
        let fetched = self.orders.list().await?;
        *self.order_cache.lock().expect("order cache poisoned") = fetched;
        Ok(())
    }

    /// Re-fetch only the book options cache.
    pub async fn refresh_book_options(&self) -> Result<(), ApiError> {
        let fetched = self.books.list().await?;
        *self.book_options.lock().expect("book options poisoned") = fetched;
        Ok(())
    }

    /// Resolve a book title by linear lookup in the cached options.
    pub fn book_title(&self, book_id: i64) -> String {
        self.book_options
            .lock()
            .expect("book options poisoned")
            .iter()
            .find(|book| book.id == book_id)
            .map(|book| book.title.clone())
            .unwrap_or_else(|| UNKNOWN_BOOK.to_string())
    }

    /// Selection labels for the creation form, in service order.
    pub fn book_option_labels(&self) -> Vec<String> {
        self.book_options
            .lock()
            .expect("book options poisoned")
            .iter()
            .map(|book| {
                format!(
                    "{}: {} - {} (Stock: {})",
                    book.id,
                    book.title,
                    format_price(book.price),
                    book.stock
                )
            })
            .collect()
    }

    /// Submit the creation form; success re-fetches the order list.
    ///
    /// Stock checks and the total happen server-side; a rejection surfaces
    /// as an ordinary service error with the server's detail text.
    pub async fn create(&self, form: &CreateOrder) -> Result<Order, ApiError> {
        let created = self.orders.create(form).await?;
        tracing::info!(order = created.id, book = created.book_id, "order created");
        self.refresh_orders().await?;
        Ok(created)
    }

    pub fn render_lines(&self) -> Vec<String> {
        let orders = self.order_cache.lock().expect("order cache poisoned");
        if orders.is_empty() {
            return vec![EMPTY_ORDERS.to_string()];
        }

        let mut lines = Vec::new();
        for order in orders.iter() {
            let badge = status_badge(order.status);
            lines.push(format!(
                "Order #{} [{} | {}]",
                order.id,
                order.status,
                badge.label()
            ));
            lines.push(format!("  Book: {}", self.book_title(order.book_id)));
            lines.push(format!("  Quantity: {}", order.quantity));
            lines.push(format!("  Total: {}", format_price(order.total_price)));
            lines.push(format!(
                "  Customer: {} <{}>",
                order.customer_name, order.customer_email
            ));
            lines.push(format!(
                "  Created: {}",
                humanize_timestamp(&order.created_at)
            ));
        }
        lines
    }
}

#[async_trait]
impl View for OrdersView {
    fn name(&self) -> &'static str {
        "orders"
    }

    fn title(&self) -> &'static str {
        "Orders"
    }

    async fn activate(&self) -> anyhow::Result<()> {
        Ok(self.refresh().await?)
    }

    fn render(&self) -> Vec<String> {
        self.render_lines()
    }
}
