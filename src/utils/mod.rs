//! Shared rendering rules for the storefront views.

use shelf_api::models::OrderStatus;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{OffsetDateTime, PrimitiveDateTime};

/// Render a price with exactly two decimals, standard rounding.
pub fn format_price(amount: f64) -> String {
    format!("${amount:.2}")
}

/// Visual weight of a status badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Badge {
    Warning,
    Success,
    Error,
    Neutral,
}

impl Badge {
    pub fn label(self) -> &'static str {
        match self {
            Badge::Warning => "warning",
            Badge::Success => "success",
            Badge::Error => "error",
            Badge::Neutral => "neutral",
        }
    }
}

/// Badge color for an order status.
pub fn status_badge(status: OrderStatus) -> Badge {
    match status {
        OrderStatus::Pending => Badge::Warning,
        OrderStatus::Completed => Badge::Success,
        OrderStatus::Cancelled => Badge::Error,
        OrderStatus::Unknown => Badge::Neutral,
    }
}

/// Stock badge text; zero stock renders as unavailable.
pub fn stock_badge(stock: u32) -> &'static str {
    if stock == 0 {
        "unavailable"
    } else {
        "in stock"
    }
}

/// Human-readable rendering of a service timestamp.
///
/// The services emit ISO-8601 text whose offset suffix varies with backend
/// configuration, so parsing is tolerant: RFC 3339 first, then the naive
/// `YYYY-MM-DDTHH:MM:SS[.ssssss]` form, else the raw text unchanged.
pub fn humanize_timestamp(raw: &str) -> String {
    let display = format_description!("[year]-[month]-[day] [hour]:[minute]");

    if let Ok(parsed) = OffsetDateTime::parse(raw, &Rfc3339) {
        if let Ok(text) = parsed.format(display) {
            return text;
        }
    }

    let naive = format_description!(
        version = 2,
        "[year]-[month]-[day]T[hour]:[minute]:[second][optional [.[subsecond]]]"
    );
    if let Ok(parsed) = PrimitiveDateTime::parse(raw, naive) {
        if let Ok(text) = parsed.format(display) {
            return text;
        }
    }

    raw.to_string()
}

/// Display format for timestamps generated locally (the notification feed).
pub fn format_local_timestamp(at: OffsetDateTime) -> String {
    let display = format_description!("[year]-[month]-[day] [hour]:[minute]");
    at.format(display).unwrap_or_else(|_| at.to_string())
}
