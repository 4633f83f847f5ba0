//! Interactive storefront shell: registry-driven navigation plus the
//! entry-dialog flows.

use std::io::Write as _;

use anyhow::Context;
use shelf_api::models::{Book, CreateOrder};
use shelf_api::Clients;
use shelf_kernel::{ConfirmPrompt, ViewRegistry};

use crate::views::books::{delete_book, BookForm, DeleteOutcome, FormMode};
use crate::views::{self, Views};

/// Confirmation prompt backed by stdin; `y`/`yes` confirms.
pub struct StdinConfirm;

impl ConfirmPrompt for StdinConfirm {
    fn confirm(&self, message: &str) -> bool {
        match prompt(&format!("{message} [y/N]: ")) {
            Ok(Some(answer)) => matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"),
            _ => false,
        }
    }
}

/// The interactive storefront session.
pub struct Shell {
    registry: ViewRegistry,
    views: Views,
}

impl Shell {
    pub fn new(clients: &Clients) -> Self {
        let mut registry = ViewRegistry::new();
        let views = views::register_all(&mut registry, clients);
        Self { registry, views }
    }

    /// Run the command loop until `quit` or end of input.
    pub async fn run(&self) -> anyhow::Result<()> {
        println!("Bookstore storefront. Type 'help' for commands.");
        loop {
            let Some(line) = prompt("> ")? else { break };
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            if matches!(line, "quit" | "exit") {
                break;
            }
            self.dispatch(line).await?;
        }
        Ok(())
    }

    async fn dispatch(&self, line: &str) -> anyhow::Result<()> {
        let mut parts = line.split_whitespace();
        let command = parts.next().unwrap_or_default();

        match command {
            "help" => print_help(),
            "books" | "orders" | "notifications" => self.show(command).await,
            "add-book" => self.add_book().await?,
            "edit-book" => match parse_id(parts.next()) {
                Some(id) => self.edit_book(id).await?,
                None => println!("usage: edit-book <id>"),
            },
            "delete-book" => match parse_id(parts.next()) {
                Some(id) => self.delete_book(id).await,
                None => println!("usage: delete-book <id>"),
            },
            "add-order" => self.add_order().await?,
            "notify" => match parse_id(parts.next()) {
                Some(id) => self.notify(id).await,
                None => println!("usage: notify <order-id>"),
            },
            other => println!("unknown command '{other}'; try 'help'"),
        }
        Ok(())
    }

    /// Navigate to a view: activate it and print its rendering.
    ///
    /// A failed activation keeps whatever was rendered before; the user only
    /// sees a generic loading error.
    async fn show(&self, name: &str) {
        match self.registry.activate(name).await {
            Ok(lines) => {
                if let Some(view) = self.registry.get(name) {
                    println!("== {} ==", view.title());
                }
                print_lines(&lines);
            }
            Err(err) => {
                tracing::error!(view = name, error = ?err, "view activation failed");
                println!("Error loading {name}");
            }
        }
    }

    async fn add_book(&self) -> anyhow::Result<()> {
        let Some(form) = read_book_form(None)? else {
            return Ok(());
        };
        match self.views.books.submit(FormMode::Creating, &form).await {
            Ok(_) => {
                println!("Book added successfully!");
                print_lines(&self.views.books.render_lines());
            }
            Err(err) => println!("{}", err.user_message("Error adding book")),
        }
        Ok(())
    }

    async fn edit_book(&self, id: i64) -> anyhow::Result<()> {
        let Some(existing) = self.views.books.find(id) else {
            println!("No cached book #{id}; open the books view first");
            return Ok(());
        };
        let Some(form) = read_book_form(Some(&existing))? else {
            return Ok(());
        };
        match self.views.books.submit(FormMode::Editing(id), &form).await {
            Ok(_) => {
                println!("Book updated successfully!");
                print_lines(&self.views.books.render_lines());
            }
            Err(err) => println!("{}", err.user_message("Error saving book")),
        }
        Ok(())
    }

    async fn delete_book(&self, id: i64) {
        match delete_book(&self.views.books, &self.views.orders, id, &StdinConfirm).await {
            Ok(DeleteOutcome::Deleted) => {
                println!("Book deleted successfully!");
                print_lines(&self.views.books.render_lines());
            }
            Ok(DeleteOutcome::Declined) => println!("Delete cancelled"),
            Err(err) => println!("{}", err.user_message("Error deleting book")),
        }
    }

    async fn add_order(&self) -> anyhow::Result<()> {
        // The form's options are fetched when the dialog opens.
        if let Err(err) = self.views.orders.refresh_book_options().await {
            println!("{}", err.user_message("Error loading books"));
            return Ok(());
        }

        println!("Select a book:");
        print_lines(&self.views.orders.book_option_labels());

        let Some(book_id) = prompt_parsed::<i64>("Book id")? else {
            return Ok(());
        };
        let Some(quantity) = prompt_parsed::<u32>("Quantity")? else {
            return Ok(());
        };
        let Some(customer_name) = prompt_field("Customer name", None)? else {
            return Ok(());
        };
        let Some(customer_email) = prompt_field("Customer email", None)? else {
            return Ok(());
        };

        let form = CreateOrder {
            book_id,
            quantity,
            customer_name,
            customer_email,
        };
        match self.views.orders.create(&form).await {
            Ok(order) => {
                println!("Order created successfully! (order #{})", order.id);
                print_lines(&self.views.orders.render_lines());
            }
            Err(err) => println!("{}", err.user_message("Error creating order")),
        }
        Ok(())
    }

    async fn notify(&self, order_id: i64) {
        match self.views.notifications.send(order_id).await {
            Ok(entry) => {
                println!(
                    "Notification sent for order {} to {}",
                    entry.order_id, entry.customer_email
                );
                print_lines(&self.views.notifications.render_lines());
            }
            Err(err) => println!("{}", err.user_message("Error sending notification")),
        }
    }
}

fn print_help() {
    println!("commands:");
    println!("  books | orders | notifications   show a view");
    println!("  add-book                         create a book");
    println!("  edit-book <id>                   edit a cached book");
    println!("  delete-book <id>                 delete a book (asks first)");
    println!("  add-order                        create an order");
    println!("  notify <order-id>                trigger a notification");
    println!("  quit");
}

fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{line}");
    }
}

fn parse_id(arg: Option<&str>) -> Option<i64> {
    arg.and_then(|raw| raw.parse().ok())
}

/// Prompt for one input line; `None` means end of input.
fn prompt(label: &str) -> anyhow::Result<Option<String>> {
    print!("{label}");
    std::io::stdout().flush().context("failed to flush prompt")?;

    let mut buf = String::new();
    let read = std::io::stdin()
        .read_line(&mut buf)
        .context("failed to read input")?;
    if read == 0 {
        return Ok(None);
    }
    Ok(Some(buf.trim_end().to_string()))
}

/// Prompt for a field, keeping the pre-filled value on empty input.
fn prompt_field(label: &str, default: Option<String>) -> anyhow::Result<Option<String>> {
    let shown = match &default {
        Some(value) => format!("{label} [{value}]: "),
        None => format!("{label}: "),
    };
    let Some(input) = prompt(&shown)? else {
        return Ok(None);
    };
    if input.is_empty() {
        if let Some(value) = default {
            return Ok(Some(value));
        }
    }
    Ok(Some(input))
}

/// Prompt for a numeric field; a value that does not parse aborts the form.
fn prompt_parsed<T: std::str::FromStr>(label: &str) -> anyhow::Result<Option<T>> {
    let Some(input) = prompt_field(label, None)? else {
        return Ok(None);
    };
    match input.trim().parse::<T>() {
        Ok(value) => Ok(Some(value)),
        Err(_) => {
            println!("{label} must be a number");
            Ok(None)
        }
    }
}

/// Prompt the four book fields, pre-filled from `prefill` when editing.
fn read_book_form(prefill: Option<&Book>) -> anyhow::Result<Option<BookForm>> {
    let Some(title) = prompt_field("Title", prefill.map(|book| book.title.clone()))? else {
        return Ok(None);
    };
    let Some(author) = prompt_field("Author", prefill.map(|book| book.author.clone()))? else {
        return Ok(None);
    };

    let Some(price_text) = prompt_field("Price", prefill.map(|book| book.price.to_string()))?
    else {
        return Ok(None);
    };
    let Ok(price) = price_text.trim().parse::<f64>() else {
        println!("Price must be a number");
        return Ok(None);
    };

    let Some(stock_text) = prompt_field("Stock", prefill.map(|book| book.stock.to_string()))?
    else {
        return Ok(None);
    };
    let Ok(stock) = stock_text.trim().parse::<u32>() else {
        println!("Stock must be a whole number");
        return Ok(None);
    };

    Ok(Some(BookForm {
        title,
        author,
        price,
        stock,
    }))
}
