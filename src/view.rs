//! Plain-text rendering of the order table, detail summary and stats strip.

use crate::api::client::resolve_image_url;
use crate::filter::OrderStats;
use crate::types::order::Order;

const SHORT_ID_LEN: usize = 8;
const ITEM_PREVIEW: usize = 2;

fn tail(s: &str, n: usize) -> &str {
    let start = s.char_indices().rev().nth(n.saturating_sub(1)).map_or(0, |(i, _)| i);
    &s[start..]
}

/// `#` + order number, or the last 8 characters of the id when unnumbered.
pub fn display_number(order: &Order) -> String {
    if order.order_number.is_empty() {
        format!("#{}", tail(&order.id, SHORT_ID_LEN))
    } else {
        format!("#{}", order.order_number)
    }
}

/// `Rs. 12,345` with thousands grouping and at most two decimals.
pub fn format_amount(amount: f64) -> String {
    let negative = amount < 0.0;
    let cents = (amount.abs() * 100.0).round() as u64;
    let (whole, frac) = (cents / 100, cents % 100);

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if negative && cents > 0 { "-" } else { "" };
    match frac {
        0 => format!("Rs. {sign}{grouped}"),
        f if f % 10 == 0 => format!("Rs. {sign}{grouped}.{}", f / 10),
        f => format!("Rs. {sign}{grouped}.{f:02}"),
    }
}

/// `"3 items"` and the first two item names, with `...` when there are more.
pub fn items_summary(order: &Order) -> (String, String) {
    let count = format!("{} items", order.items.len());
    let mut names = order
        .items
        .iter()
        .take(ITEM_PREVIEW)
        .map(|item| item.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    if order.items.len() > ITEM_PREVIEW {
        names.push_str("...");
    }
    (count, names)
}

pub fn render_row(order: &Order) -> String {
    let (count, names) = items_summary(order);
    let customer = order.customer_name().unwrap_or("N/A");
    let email = order.customer_email().unwrap_or("");
    let payment_id = order
        .payment_id()
        .map(|id| format!(" ID: {}", tail(id, SHORT_ID_LEN)))
        .unwrap_or_default();
    let tracking = match order.tracking_number.as_deref() {
        Some(t) if !t.is_empty() => format!("Track: {t}"),
        _ => "(no tracking)".to_string(),
    };

    format!(
        "{:<14} {} <{}>  {} [{}]  {}  {} ({}){}  {}  {}  {}  [{}]",
        display_number(order),
        customer,
        email,
        count,
        names,
        format_amount(order.total_amount),
        order.payment_status,
        order.payment_method,
        payment_id,
        order.order_status,
        tracking,
        order.created_at.format("%Y-%m-%d"),
        order.id,
    )
}

pub fn render_table<'a>(orders: impl IntoIterator<Item = &'a Order>) -> String {
    let rows: Vec<String> = orders.into_iter().map(render_row).collect();
    if rows.is_empty() {
        return "No orders found".to_string();
    }
    rows.join("\n")
}

pub fn render_stats(stats: &OrderStats) -> String {
    format!(
        "Total Orders: {}  Processing: {}  Paid: {}  Pending Payment: {}",
        stats.total, stats.processing, stats.paid, stats.pending_payment
    )
}

/// Detail summary shown by `orders show`.
pub fn render_details(order: &Order, api_url: &str) -> String {
    let user = order.user.clone().unwrap_or_default();
    let shipping = order.shipping_address.clone().unwrap_or_default();

    let mut lines = vec![
        format!("Order {}", display_number(order)),
        format!("Customer: {} ({})", user.name, user.email),
        format!("Total: {}", format_amount(order.total_amount)),
        format!("Payment: {} ({})", order.payment_status, order.payment_method),
    ];
    if let Some(id) = order.payment_id() {
        lines.push(format!("Payment ID: {id}"));
    }
    lines.push(format!("Status: {}", order.order_status));
    if let Some(tracking) = order.tracking_number.as_deref().filter(|t| !t.is_empty()) {
        lines.push(format!("Tracking: {tracking}"));
    }
    lines.push(format!("Shipping: {}, {}", shipping.address, shipping.city));

    let items = order
        .items
        .iter()
        .map(|i| format!("{} x{}", i.name, i.quantity))
        .collect::<Vec<_>>()
        .join(", ");
    lines.push(format!("Items: {items}"));

    for item in &order.items {
        let images = item.product.as_ref().map(|p| p.images.as_slice()).unwrap_or_default();
        lines.extend(
            images
                .iter()
                .map(|image| format!("  {}: {}", item.name, resolve_image_url(api_url, image))),
        );
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}
