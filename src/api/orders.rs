//! Order endpoints: `GET /orders` and `PUT /orders/{id}`.

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde_json::Value;
use tracing::{debug, error, warn};

use crate::error::DeskError;
use crate::types::order::{Order, OrderUpdate};

/// The order-management API as the status manager sees it.
#[async_trait]
pub trait OrderApi: Send + Sync {
    /// Full order collection, unpaginated.
    async fn list_orders(&self) -> Result<Vec<Order>, DeskError>;

    /// Apply one partial update, authorized by `token`.
    async fn update_order(
        &self,
        order_id: &str,
        update: &OrderUpdate,
        token: &str,
    ) -> Result<(), DeskError>;
}

#[derive(Clone)]
pub struct HttpOrderApi {
    client: Client,
    base_url: String,
}

impl HttpOrderApi {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn orders_url(&self) -> String {
        format!("{}/orders", self.base_url)
    }
}

fn ensure_success(response: Response) -> Result<Response, DeskError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(DeskError::Status { status })
    }
}

/// Decode a `GET /orders` body. `null` is an empty list; an order that does
/// not decode is skipped so it cannot hide the rest.
pub fn decode_listing(body: &[u8]) -> Result<Vec<Order>, DeskError> {
    let entries: Option<Vec<Value>> = serde_json::from_slice(body)?;
    let orders = entries
        .unwrap_or_default()
        .into_iter()
        .filter_map(|entry| {
            let id = entry.get("_id").and_then(Value::as_str).unwrap_or("?").to_string();
            serde_json::from_value::<Order>(entry)
                .map_err(|e| warn!("Skipping order {id}: {e}"))
                .ok()
        })
        .collect();
    Ok(orders)
}

#[async_trait]
impl OrderApi for HttpOrderApi {
    async fn list_orders(&self) -> Result<Vec<Order>, DeskError> {
        let url = self.orders_url();
        let response = self.client.get(&url).send().await.map_err(|e| {
            error!("GET {url} failed: {e}");
            e
        })?;
        let body = ensure_success(response)?.bytes().await?;

        let orders = decode_listing(&body)?;
        debug!("Fetched {} orders", orders.len());
        Ok(orders)
    }

    async fn update_order(
        &self,
        order_id: &str,
        update: &OrderUpdate,
        token: &str,
    ) -> Result<(), DeskError> {
        let url = format!("{}/{}", self.orders_url(), order_id);
        let response = self
            .client
            .put(&url)
            .bearer_auth(token)
            .json(update)
            .send()
            .await?;
        ensure_success(response)?;
        debug!("PUT {url} set {}", update.field());
        Ok(())
    }
}
