//! Notification trigger view: request-driven, feed held in memory only.

use std::sync::Mutex;

use async_trait::async_trait;
use shelf_api::{ApiError, NotificationClient};
use shelf_kernel::View;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::utils::format_local_timestamp;

/// Empty-state line shown before any notification has been sent.
pub const EMPTY_FEED: &str = "No notifications sent yet.";

/// One locally held notification record.
///
/// Never persisted; the feed is discarded when the process exits.
#[derive(Debug, Clone)]
pub struct NotificationEntry {
    pub id: Uuid,
    pub order_id: i64,
    pub customer_email: String,
    pub message: String,
    pub received_at: OffsetDateTime,
}

/// Notification trigger view.
pub struct NotificationsView {
    client: NotificationClient,
    feed: Mutex<Vec<NotificationEntry>>,
}

impl NotificationsView {
    pub fn new(client: NotificationClient) -> Self {
        Self {
            client,
            feed: Mutex::new(Vec::new()),
        }
    }

    /// Post the order id to the notification service.
    ///
    /// Success appends a record to the local feed; failure appends nothing.
    pub async fn send(&self, order_id: i64) -> Result<NotificationEntry, ApiError> {
        let receipt = self.client.notify(order_id).await?;

        let entry = NotificationEntry {
            id: Uuid::new_v4(),
            order_id: receipt.order_id,
            customer_email: receipt.customer_email,
            message: receipt.message,
            received_at: OffsetDateTime::now_utc(),
        };
        tracing::info!(order = entry.order_id, "notification sent");

        self.feed
            .lock()
            .expect("notification feed poisoned")
            .push(entry.clone());
        Ok(entry)
    }

    pub fn entry_count(&self) -> usize {
        self.feed.lock().expect("notification feed poisoned").len()
    }

    pub fn render_lines(&self) -> Vec<String> {
        let feed = self.feed.lock().expect("notification feed poisoned");
        if feed.is_empty() {
            return vec![EMPTY_FEED.to_string()];
        }

        let mut lines = Vec::new();
        for (index, entry) in feed.iter().enumerate() {
            if index > 0 {
                lines.push("----".to_string());
            }
            lines.push(format!("Notification for Order #{}", entry.order_id));
            lines.push(format!("  Customer: {}", entry.customer_email));
            lines.push(format!("  {}", entry.message));
            lines.push(format!(
                "  At: {}",
                format_local_timestamp(entry.received_at)
            ));
        }
        lines
    }
}

#[async_trait]
impl View for NotificationsView {
    fn name(&self) -> &'static str {
        "notifications"
    }

    fn title(&self) -> &'static str {
        "Notifications"
    }

    // Nothing to fetch: the feed is request-triggered and local.
    async fn activate(&self) -> anyhow::Result<()> {
        Ok(())
    }

    fn render(&self) -> Vec<String> {
        self.render_lines()
    }
}
