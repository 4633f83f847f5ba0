//! Book list view: inventory cards plus the entry-dialog flows.

use std::sync::Mutex;

use async_trait::async_trait;
use shelf_api::models::{Book, CreateBook, UpdateBook};
use shelf_api::{ApiError, BookClient};
use shelf_kernel::{ConfirmPrompt, View};

use crate::utils::{format_price, stock_badge};
use crate::views::orders::OrdersView;

/// Empty-state line shown when the service reports no books.
pub const EMPTY_BOOKS: &str = "No books found. Add some books!";

/// Entry-dialog mode, chosen explicitly before the dialog opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Creating,
    Editing(i64),
}

/// Field values collected by the entry dialog.
#[derive(Debug, Clone)]
pub struct BookForm {
    pub title: String,
    pub author: String,
    pub price: f64,
    pub stock: u32,
}

impl BookForm {
    fn as_create(&self) -> CreateBook {
        CreateBook {
            title: self.title.clone(),
            author: self.author.clone(),
            price: self.price,
            stock: self.stock,
        }
    }

    fn as_update(&self) -> UpdateBook {
        UpdateBook {
            title: Some(self.title.clone()),
            author: Some(self.author.clone()),
            price: Some(self.price),
            stock: Some(self.stock),
        }
    }
}

/// Outcome of the confirm-gated delete flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Declined,
    Deleted,
}

/// Book list view.
///
/// Owns the cache backing the card rendering; the order form keeps its own,
/// separately refreshed copy of the book list.
pub struct BooksView {
    client: BookClient,
    books: Mutex<Vec<Book>>,
}

impl BooksView {
    pub fn new(client: BookClient) -> Self {
        Self {
            client,
            books: Mutex::new(Vec::new()),
        }
    }

    /// Re-fetch the book list, replacing the cache only on success.
    pub async fn refresh(&self) -> Result<(), ApiError> {
        let fetched = self.client.list().await?;
        *self.books.lock().expect("books cache poisoned") = fetched;
        Ok(())
    }

    /// Cached copy of a book, used to pre-fill the edit form.
    pub fn find(&self, id: i64) -> Option<Book> {
        self.books
            .lock()
            .expect("books cache poisoned")
            .iter()
            .find(|book| book.id == id)
            .cloned()
    }

    /// Submit the entry dialog.
    ///
    /// `Creating` posts a new book; `Editing` puts the form's fields to the
    /// existing one. Success re-fetches the list; failure leaves the cache
    /// untouched.
    pub async fn submit(&self, mode: FormMode, form: &BookForm) -> Result<Book, ApiError> {
        let saved = match mode {
            FormMode::Creating => self.client.create(&form.as_create()).await?,
            FormMode::Editing(id) => self.client.update(id, &form.as_update()).await?,
        };
        tracing::info!(book = saved.id, mode = ?mode, "book saved");
        self.refresh().await?;
        Ok(saved)
    }

    pub fn render_lines(&self) -> Vec<String> {
        let books = self.books.lock().expect("books cache poisoned");
        if books.is_empty() {
            return vec![EMPTY_BOOKS.to_string()];
        }

        let mut lines = Vec::new();
        for book in books.iter() {
            lines.push(format!("#{} {}", book.id, book.title));
            lines.push(format!("  Author: {}", book.author));
            lines.push(format!("  Price: {}", format_price(book.price)));
            lines.push(format!(
                "  Stock: {} [{}]",
                book.stock,
                stock_badge(book.stock)
            ));
        }
        lines
    }
}

#[async_trait]
impl View for BooksView {
    fn name(&self) -> &'static str {
        "books"
    }

    fn title(&self) -> &'static str {
        "Books"
    }

    async fn activate(&self) -> anyhow::Result<()> {
        Ok(self.refresh().await?)
    }

    fn render(&self) -> Vec<String> {
        self.render_lines()
    }
}

/// Delete a book behind the confirmation prompt.
///
/// Declining issues no request at all. A confirmed delete issues exactly one
/// DELETE and then invalidates both book caches: this view's list and the
/// order form's options.
pub async fn delete_book(
    books: &BooksView,
    orders: &OrdersView,
    id: i64,
    confirm: &dyn ConfirmPrompt,
) -> Result<DeleteOutcome, ApiError> {
    if !confirm.confirm(&format!("Are you sure you want to delete book #{id}?")) {
        tracing::debug!(book = id, "delete declined");
        return Ok(DeleteOutcome::Declined);
    }

    books.client.delete(id).await?;
    tracing::info!(book = id, "book deleted");

    books.refresh().await?;
    orders.refresh_book_options().await?;
    Ok(DeleteOutcome::Deleted)
}
