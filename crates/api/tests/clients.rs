//! Exercises the service bindings against in-process stub services.

use std::sync::{Arc, Mutex};

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use reqwest::Client;
use serde_json::{json, Value};

use shelf_api::models::{Book, CreateBook, CreateOrder, Order, OrderStatus, UpdateBook};
use shelf_api::{ApiError, BookClient, NotificationClient, OrderClient};

#[derive(Clone, Default)]
struct BookStub {
    log: Arc<Mutex<Vec<String>>>,
    books: Arc<Mutex<Vec<Book>>>,
}

async fn list_books(State(stub): State<BookStub>) -> Json<Vec<Book>> {
    stub.log.lock().unwrap().push("GET /books".to_string());
    Json(stub.books.lock().unwrap().clone())
}

async fn create_book(
    State(stub): State<BookStub>,
    Json(payload): Json<CreateBook>,
) -> Json<Book> {
    stub.log.lock().unwrap().push("POST /books".to_string());
    let mut books = stub.books.lock().unwrap();
    let book = Book {
        id: books.len() as i64 + 1,
        title: payload.title,
        author: payload.author,
        price: payload.price,
        stock: payload.stock,
    };
    books.push(book.clone());
    Json(book)
}

async fn get_book(
    State(stub): State<BookStub>,
    Path(id): Path<i64>,
) -> Result<Json<Book>, (StatusCode, Json<Value>)> {
    stub.log.lock().unwrap().push(format!("GET /books/{id}"));
    stub.books
        .lock()
        .unwrap()
        .iter()
        .find(|book| book.id == id)
        .cloned()
        .map(Json)
        .ok_or((StatusCode::NOT_FOUND, Json(json!({"detail": "Book not found"}))))
}

async fn update_book(
    State(stub): State<BookStub>,
    Path(id): Path<i64>,
    Json(changes): Json<Value>,
) -> Result<Json<Book>, (StatusCode, Json<Value>)> {
    stub.log.lock().unwrap().push(format!("PUT /books/{id}"));
    let mut books = stub.books.lock().unwrap();
    let book = books
        .iter_mut()
        .find(|book| book.id == id)
        .ok_or((StatusCode::NOT_FOUND, Json(json!({"detail": "Book not found"}))))?;
    if let Some(title) = changes.get("title").and_then(Value::as_str) {
        book.title = title.to_string();
    }
    if let Some(author) = changes.get("author").and_then(Value::as_str) {
        book.author = author.to_string();
    }
    if let Some(price) = changes.get("price").and_then(Value::as_f64) {
        book.price = price;
    }
    if let Some(stock) = changes.get("stock").and_then(Value::as_u64) {
        book.stock = stock as u32;
    }
    Ok(Json(book.clone()))
}

async fn delete_book(State(stub): State<BookStub>, Path(id): Path<i64>) -> StatusCode {
    stub.log.lock().unwrap().push(format!("DELETE /books/{id}"));
    stub.books.lock().unwrap().retain(|book| book.id != id);
    StatusCode::OK
}

async fn health() -> Json<Value> {
    Json(json!({"status": "healthy"}))
}

fn book_router(stub: BookStub) -> Router {
    Router::new()
        .route("/books", get(list_books).post(create_book))
        .route(
            "/books/{id}",
            get(get_book).put(update_book).delete(delete_book),
        )
        .route("/health", get(health))
        .with_state(stub)
}

async fn spawn(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

fn sample_book(id: i64, stock: u32) -> Book {
    Book {
        id,
        title: format!("Book {id}"),
        author: "Some Author".to_string(),
        price: 9.99,
        stock,
    }
}

#[tokio::test]
async fn list_returns_reported_books() {
    let stub = BookStub::default();
    stub.books
        .lock()
        .unwrap()
        .extend([sample_book(1, 3), sample_book(2, 0)]);
    let base = spawn(book_router(stub)).await;

    let client = BookClient::new(Client::new(), &base);
    let books = client.list().await.unwrap();

    assert_eq!(books.len(), 2);
    assert_eq!(books[0].title, "Book 1");
    assert_eq!(books[1].stock, 0);
}

#[tokio::test]
async fn create_sends_exact_payload() {
    let stub = BookStub::default();
    let base = spawn(book_router(stub.clone())).await;

    let client = BookClient::new(Client::new(), &base);
    let created = client
        .create(&CreateBook {
            title: "The Rust Programming Language".to_string(),
            author: "Steve Klabnik".to_string(),
            price: 39.95,
            stock: 12,
        })
        .await
        .unwrap();

    assert_eq!(created.id, 1);
    let stored = stub.books.lock().unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].title, "The Rust Programming Language");
    assert_eq!(stored[0].author, "Steve Klabnik");
    assert_eq!(stored[0].price, 39.95);
    assert_eq!(stored[0].stock, 12);
    assert_eq!(*stub.log.lock().unwrap(), vec!["POST /books"]);
}

#[tokio::test]
async fn update_applies_partial_changes() {
    let stub = BookStub::default();
    stub.books.lock().unwrap().push(sample_book(1, 3));
    let base = spawn(book_router(stub)).await;

    let client = BookClient::new(Client::new(), &base);
    let updated = client
        .update(
            1,
            &UpdateBook {
                stock: Some(7),
                ..UpdateBook::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.stock, 7);
    assert_eq!(updated.title, "Book 1");
}

#[tokio::test]
async fn delete_issues_single_request() {
    let stub = BookStub::default();
    stub.books.lock().unwrap().push(sample_book(1, 3));
    let base = spawn(book_router(stub.clone())).await;

    let client = BookClient::new(Client::new(), &base);
    client.delete(1).await.unwrap();

    assert!(stub.books.lock().unwrap().is_empty());
    assert_eq!(*stub.log.lock().unwrap(), vec!["DELETE /books/1"]);
}

#[tokio::test]
async fn missing_book_surfaces_service_detail() {
    let stub = BookStub::default();
    let base = spawn(book_router(stub)).await;

    let client = BookClient::new(Client::new(), &base);
    let err = client.get(42).await.unwrap_err();

    match &err {
        ApiError::Service { status, detail } => {
            assert_eq!(*status, StatusCode::NOT_FOUND);
            assert_eq!(detail.as_deref(), Some("Book not found"));
        }
        other => panic!("expected service error, got {other:?}"),
    }
    assert_eq!(err.user_message("Error loading books"), "Book not found");
}

#[tokio::test]
async fn unreachable_service_is_a_transport_error() {
    // Bind to grab a free port, then drop the listener so nothing answers.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = BookClient::new(Client::new(), &format!("http://{addr}"));
    let err = client.list().await.unwrap_err();

    assert!(matches!(err, ApiError::Transport(_)));
    assert_eq!(err.user_message("Error loading books"), "Error loading books");
}

#[tokio::test]
async fn health_reports_reachable_service() {
    let base = spawn(book_router(BookStub::default())).await;
    let client = BookClient::new(Client::new(), &base);
    client.health().await.unwrap();
}

#[derive(Clone, Default)]
struct OrderStub {
    orders: Arc<Mutex<Vec<Order>>>,
}

async fn list_orders(State(stub): State<OrderStub>) -> Json<Vec<Order>> {
    Json(stub.orders.lock().unwrap().clone())
}

async fn create_order(
    State(stub): State<OrderStub>,
    Json(payload): Json<CreateOrder>,
) -> Result<Json<Order>, (StatusCode, Json<Value>)> {
    if payload.quantity > 5 {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(json!({"detail": "Insufficient stock"})),
        ));
    }
    let mut orders = stub.orders.lock().unwrap();
    let order = Order {
        id: orders.len() as i64 + 1,
        book_id: payload.book_id,
        quantity: payload.quantity,
        total_price: 9.99 * payload.quantity as f64,
        customer_name: payload.customer_name,
        customer_email: payload.customer_email,
        status: OrderStatus::Pending,
        created_at: "2024-01-01T12:00:00".to_string(),
    };
    orders.push(order.clone());
    Ok(Json(order))
}

async fn get_order(
    State(stub): State<OrderStub>,
    Path(id): Path<i64>,
) -> Result<Json<Order>, (StatusCode, Json<Value>)> {
    stub.orders
        .lock()
        .unwrap()
        .iter()
        .find(|order| order.id == id)
        .cloned()
        .map(Json)
        .ok_or((StatusCode::NOT_FOUND, Json(json!({"detail": "Order not found"}))))
}

fn order_router(stub: OrderStub) -> Router {
    Router::new()
        .route("/orders", get(list_orders).post(create_order))
        .route("/orders/{id}", get(get_order))
        .route("/health", get(health))
        .with_state(stub)
}

#[tokio::test]
async fn order_creation_round_trips_server_fields() {
    let base = spawn(order_router(OrderStub::default())).await;
    let client = OrderClient::new(Client::new(), &base);

    let created = client
        .create(&CreateOrder {
            book_id: 3,
            quantity: 2,
            customer_name: "Jane Doe".to_string(),
            customer_email: "jane@example.com".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(created.id, 1);
    assert_eq!(created.status, OrderStatus::Pending);
    assert_eq!(created.total_price, 19.98);

    let orders = client.list().await.unwrap();
    assert_eq!(orders.len(), 1);
}

#[tokio::test]
async fn single_order_lookup_round_trips() {
    let stub = OrderStub::default();
    stub.orders.lock().unwrap().push(Order {
        id: 5,
        book_id: 1,
        quantity: 1,
        total_price: 9.99,
        customer_name: "Jane Doe".to_string(),
        customer_email: "jane@example.com".to_string(),
        status: OrderStatus::Completed,
        created_at: "2024-01-01T12:00:00".to_string(),
    });
    let base = spawn(order_router(stub)).await;
    let client = OrderClient::new(Client::new(), &base);

    let order = client.get(5).await.unwrap();
    assert_eq!(order.status, OrderStatus::Completed);

    let err = client.get(6).await.unwrap_err();
    assert_eq!(err.user_message("Error loading orders"), "Order not found");
}

#[tokio::test]
async fn rejected_order_carries_stock_detail() {
    let base = spawn(order_router(OrderStub::default())).await;
    let client = OrderClient::new(Client::new(), &base);

    let err = client
        .create(&CreateOrder {
            book_id: 3,
            quantity: 100,
            customer_name: "Jane Doe".to_string(),
            customer_email: "jane@example.com".to_string(),
        })
        .await
        .unwrap_err();

    assert_eq!(
        err.user_message("Error creating order"),
        "Insufficient stock"
    );
}

async fn notify_ok(Json(body): Json<Value>) -> Json<Value> {
    let order_id = body["order_id"].as_i64().unwrap();
    Json(json!({
        "message": format!("Notification sent for order {order_id}"),
        "order_id": order_id,
        "customer_email": "jane@example.com",
        "status": "sent"
    }))
}

async fn notify_unknown_order() -> (StatusCode, Json<Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({"detail": "Order not found"})),
    )
}

async fn notify_opaque_failure() -> (StatusCode, Json<Value>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({"message": "downstream failure"})),
    )
}

#[tokio::test]
async fn notify_returns_receipt() {
    let base = spawn(Router::new().route("/notify", post(notify_ok))).await;
    let client = NotificationClient::new(Client::new(), &base);

    let receipt = client.notify(7).await.unwrap();
    assert_eq!(receipt.order_id, 7);
    assert_eq!(receipt.customer_email, "jane@example.com");
    assert_eq!(receipt.message, "Notification sent for order 7");
}

#[tokio::test]
async fn notify_surfaces_detail_for_unknown_order() {
    let base = spawn(Router::new().route("/notify", post(notify_unknown_order))).await;
    let client = NotificationClient::new(Client::new(), &base);

    let err = client.notify(999).await.unwrap_err();
    assert_eq!(
        err.user_message("Error sending notification"),
        "Order not found"
    );
}

#[tokio::test]
async fn notify_falls_back_to_message_field() {
    let base = spawn(Router::new().route("/notify", post(notify_opaque_failure))).await;
    let client = NotificationClient::new(Client::new(), &base);

    let err = client.notify(1).await.unwrap_err();
    assert_eq!(
        err.user_message("Error sending notification"),
        "downstream failure"
    );
}
