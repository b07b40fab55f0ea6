//! Client-side order filtering and the stats strip.
//! Testable without HTTP.

use crate::types::order::{Order, OrderStatus, PaymentStatus};

/// Order-status filter AND payment-status filter AND text search.
/// `None` / empty fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderFilter {
    pub order_status: Option<OrderStatus>,
    pub payment_status: Option<PaymentStatus>,
    pub search: String,
}

impl OrderFilter {
    pub fn with_order_status(mut self, status: OrderStatus) -> Self {
        self.order_status = Some(status);
        self
    }

    pub fn with_payment_status(mut self, status: PaymentStatus) -> Self {
        self.payment_status = Some(status);
        self
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn matches(&self, order: &Order) -> bool {
        self.order_status.is_none_or(|s| order.order_status == s)
            && self.payment_status.is_none_or(|s| order.payment_status == s)
            && matches_search(order, &self.search)
    }

    pub fn apply<'a>(&self, orders: &'a [Order]) -> Vec<&'a Order> {
        orders.iter().filter(|order| self.matches(order)).collect()
    }
}

/// Case-insensitive substring match over order number, customer name/email
/// and item names.
pub fn matches_search(order: &Order, query: &str) -> bool {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    let hit = |haystack: &str| haystack.to_lowercase().contains(&needle);

    hit(&order.order_number)
        || order.customer_name().is_some_and(hit)
        || order.customer_email().is_some_and(hit)
        || order.items.iter().any(|item| hit(&item.name))
}

/// Counts shown above the order table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OrderStats {
    pub total: usize,
    pub processing: usize,
    pub paid: usize,
    pub pending_payment: usize,
}

pub fn order_stats(orders: &[Order]) -> OrderStats {
    orders.iter().fold(
        OrderStats {
            total: orders.len(),
            ..OrderStats::default()
        },
        |mut stats, order| {
            if order.order_status == OrderStatus::Processing {
                stats.processing += 1;
            }
            match order.payment_status {
                PaymentStatus::Paid => stats.paid += 1,
                PaymentStatus::Pending => stats.pending_payment += 1,
                PaymentStatus::Failed => {}
            }
            stats
        },
    )
}
