pub mod books;
pub mod notifications;
pub mod orders;

use std::sync::Arc;

use shelf_api::Clients;
use shelf_kernel::ViewRegistry;

/// Concrete handles to the registered views.
///
/// Navigation goes through the registry; flows that cross a view boundary
/// (book deletion invalidating the order form's options) use these handles.
pub struct Views {
    pub books: Arc<books::BooksView>,
    pub orders: Arc<orders::OrdersView>,
    pub notifications: Arc<notifications::NotificationsView>,
}

/// Build all storefront views and register them for navigation.
pub fn register_all(registry: &mut ViewRegistry, clients: &Clients) -> Views {
    let books = Arc::new(books::BooksView::new(clients.books.clone()));
    let orders = Arc::new(orders::OrdersView::new(
        clients.orders.clone(),
        clients.books.clone(),
    ));
    let notifications = Arc::new(notifications::NotificationsView::new(
        clients.notifications.clone(),
    ));

    registry.register(books.clone());
    registry.register(orders.clone());
    registry.register(notifications.clone());

    Views {
        books,
        orders,
        notifications,
    }
}
