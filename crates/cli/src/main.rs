use anyhow::{anyhow, Context};
use clap::{Parser, Subcommand};

use shelf_api::models::CreateOrder;
use shelf_api::Clients;
use shelf_app::shell::StdinConfirm;
use shelf_app::views::books::{delete_book, BookForm, BooksView, DeleteOutcome, FormMode};
use shelf_app::views::notifications::NotificationsView;
use shelf_app::views::orders::OrdersView;
use shelf_kernel::settings::Settings;
use shelf_kernel::ConfirmPrompt;

#[derive(Parser)]
#[command(name = "shelf", about = "Bookstore storefront client", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Inventory actions against the book service
    Books {
        #[command(subcommand)]
        action: BookAction,
    },
    /// Order actions against the order service
    Orders {
        #[command(subcommand)]
        action: OrderAction,
    },
    /// Trigger a notification for an existing order
    Notify { order_id: i64 },
}

#[derive(Subcommand)]
enum BookAction {
    /// List all books
    List,
    /// Add a new book
    Add {
        #[arg(long)]
        title: String,
        #[arg(long)]
        author: String,
        #[arg(long)]
        price: f64,
        #[arg(long)]
        stock: u32,
    },
    /// Delete a book by id
    Delete {
        id: i64,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum OrderAction {
    /// List all orders
    List,
    /// Create a new order
    Create {
        #[arg(long)]
        book_id: i64,
        #[arg(long)]
        quantity: u32,
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
    },
}

/// Used by `--yes`: the prompt was answered on the command line.
struct Preconfirmed;

impl ConfirmPrompt for Preconfirmed {
    fn confirm(&self, _message: &str) -> bool {
        true
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let settings = Settings::load().with_context(|| "failed to load SHELF settings")?;
    shelf_telemetry::init(&settings.telemetry);

    let clients = Clients::from_settings(&settings.services);
    probe_services(&clients).await;

    match cli.command {
        Command::Books { action } => run_books(action, &clients).await,
        Command::Orders { action } => run_orders(action, &clients).await,
        Command::Notify { order_id } => run_notify(order_id, &clients).await,
    }
}

/// Log reachability of each backing service at startup.
///
/// Diagnostic only: nothing is retried and the command proceeds regardless
/// of the outcome.
async fn probe_services(clients: &Clients) {
    let probes = [
        ("book-service", clients.books.health().await),
        ("order-service", clients.orders.health().await),
        ("notification-service", clients.notifications.health().await),
    ];
    for (service, result) in probes {
        match result {
            Ok(()) => tracing::info!(service, "service is running"),
            Err(err) => tracing::warn!(service, error = %err, "service might not be running"),
        }
    }
}

async fn run_books(action: BookAction, clients: &Clients) -> anyhow::Result<()> {
    let books = BooksView::new(clients.books.clone());

    match action {
        BookAction::List => {
            books
                .refresh()
                .await
                .map_err(|err| anyhow!(err.user_message("Error loading books")))?;
            print_lines(&books.render_lines());
        }
        BookAction::Add {
            title,
            author,
            price,
            stock,
        } => {
            let form = BookForm {
                title,
                author,
                price,
                stock,
            };
            books
                .submit(FormMode::Creating, &form)
                .await
                .map_err(|err| anyhow!(err.user_message("Error adding book")))?;
            println!("Book added successfully!");
            print_lines(&books.render_lines());
        }
        BookAction::Delete { id, yes } => {
            let orders = OrdersView::new(clients.orders.clone(), clients.books.clone());
            let confirm: &dyn ConfirmPrompt = if yes { &Preconfirmed } else { &StdinConfirm };

            let outcome = delete_book(&books, &orders, id, confirm)
                .await
                .map_err(|err| anyhow!(err.user_message("Error deleting book")))?;
            match outcome {
                DeleteOutcome::Deleted => println!("Book deleted successfully!"),
                DeleteOutcome::Declined => println!("Delete cancelled"),
            }
        }
    }
    Ok(())
}

async fn run_orders(action: OrderAction, clients: &Clients) -> anyhow::Result<()> {
    let orders = OrdersView::new(clients.orders.clone(), clients.books.clone());

    match action {
        OrderAction::List => {
            orders
                .refresh()
                .await
                .map_err(|err| anyhow!(err.user_message("Error loading orders")))?;
            print_lines(&orders.render_lines());
        }
        OrderAction::Create {
            book_id,
            quantity,
            name,
            email,
        } => {
            let form = CreateOrder {
                book_id,
                quantity,
                customer_name: name,
                customer_email: email,
            };
            let created = orders
                .create(&form)
                .await
                .map_err(|err| anyhow!(err.user_message("Error creating order")))?;
            println!("Order created successfully! (order #{})", created.id);
        }
    }
    Ok(())
}

async fn run_notify(order_id: i64, clients: &Clients) -> anyhow::Result<()> {
    let notifications = NotificationsView::new(clients.notifications.clone());
    let entry = notifications
        .send(order_id)
        .await
        .map_err(|err| anyhow!(err.user_message("Error sending notification")))?;
    println!(
        "Notification sent for order {} to {}",
        entry.order_id, entry.customer_email
    );
    Ok(())
}

fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{line}");
    }
}
