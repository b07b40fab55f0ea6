use tracing::{debug, error, info, warn};

use crate::api::auth::Session;
use crate::api::orders::OrderApi;
use crate::error::DeskError;
use crate::filter::{OrderFilter, OrderStats, order_stats};
use crate::types::order::{Order, OrderStatus, OrderUpdate, PaymentStatus};

/// Holds the last fetched order list and pushes status changes to the API.
///
/// Every successful mutation is followed by a full refetch; there is no
/// optimistic update. Concurrent operators are last-write-wins.
pub struct OrderStatusManager<A> {
    api: A,
    session: Session,
    orders: Vec<Order>,
}

impl<A: OrderApi> OrderStatusManager<A> {
    pub fn new(api: A, session: Session) -> Self {
        Self {
            api,
            session,
            orders: Vec::new(),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Orders from the last fetch, unfiltered.
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn find(&self, order_id: &str) -> Option<&Order> {
        self.orders.iter().find(|o| o.id == order_id)
    }

    pub fn filtered(&self, filter: &OrderFilter) -> Vec<&Order> {
        filter.apply(&self.orders)
    }

    pub fn stats(&self) -> OrderStats {
        order_stats(&self.orders)
    }

    /// Fetch the full collection. On failure the list is left empty.
    pub async fn list_orders(&mut self) -> Result<&[Order], DeskError> {
        self.session.require_authenticated()?;
        self.refresh().await?;
        Ok(&self.orders)
    }

    async fn refresh(&mut self) -> Result<(), DeskError> {
        match self.api.list_orders().await {
            Ok(orders) => {
                info!("Loaded {} orders", orders.len());
                self.orders = orders;
                Ok(())
            }
            Err(e) => {
                error!("Error fetching orders: {e}");
                self.orders.clear();
                Err(e)
            }
        }
    }

    pub async fn set_order_status(
        &mut self,
        order_id: &str,
        status: OrderStatus,
    ) -> Result<(), DeskError> {
        // Transitions are unrestricted; leaving a terminal stage is only flagged.
        if let Some(current) = self.find(order_id).map(|o| o.order_status) {
            if current.is_terminal() && current != status {
                warn!("Order {order_id} moves from terminal status {current} to {status}");
            }
        }
        self.mutate(order_id, OrderUpdate::OrderStatus(status), DeskError::UpdateFailed)
            .await
    }

    pub async fn set_payment_status(
        &mut self,
        order_id: &str,
        status: PaymentStatus,
    ) -> Result<(), DeskError> {
        self.mutate(
            order_id,
            OrderUpdate::PaymentStatus(status),
            DeskError::UpdateFailed,
        )
        .await
    }

    /// Returns `false` without calling the API when `value` is blank or the
    /// loaded order already carries a tracking number; an existing number is
    /// never cleared or replaced this way.
    pub async fn set_tracking_number(
        &mut self,
        order_id: &str,
        value: &str,
    ) -> Result<bool, DeskError> {
        let value = value.trim();
        if value.is_empty() {
            debug!("Ignoring empty tracking number for order {order_id}");
            return Ok(false);
        }
        if self.find(order_id).is_some_and(Order::has_tracking) {
            warn!("Order {order_id} already has a tracking number, not replacing it");
            return Ok(false);
        }
        self.mutate(
            order_id,
            OrderUpdate::TrackingNumber(value.to_string()),
            DeskError::TrackingUpdateFailed,
        )
        .await?;
        Ok(true)
    }

    async fn mutate(
        &mut self,
        order_id: &str,
        update: OrderUpdate,
        alert: fn(Box<DeskError>) -> DeskError,
    ) -> Result<(), DeskError> {
        let token = self.session.require_admin()?;

        if let Err(e) = self.api.update_order(order_id, &update, token).await {
            error!("Error updating {} of order {order_id}: {e}", update.field());
            return Err(alert(Box::new(e)));
        }
        info!("Order {order_id}: {} updated", update.field());

        // The mutation already landed; a failed refetch only empties the view.
        if let Err(e) = self.refresh().await {
            warn!("Refetch after updating order {order_id} failed: {e}");
        }
        Ok(())
    }
}
