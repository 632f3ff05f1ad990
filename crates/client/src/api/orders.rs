//! Order endpoints: customer creation/history/cancel and the owner's
//! status transitions.
//!
//! Status is server-authoritative. The owner methods only request a
//! transition; what the order becomes is whatever the next fetch says.

use maejang_core::order::{Order, OrderDraft};
use maejang_core::types::OrderId;
use serde::Deserialize;
use tracing::instrument;

use crate::gateway::{ApiGateway, ApiResult};
use crate::storage::{KvStore, StorageError, StorageKey};

/// Response of `POST order/create`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedOrder {
    pub order_id: OrderId,
}

/// Order endpoint group.
pub struct OrderApi<S: KvStore> {
    gateway: ApiGateway<S>,
}

impl<S: KvStore> Clone for OrderApi<S> {
    fn clone(&self) -> Self {
        Self {
            gateway: self.gateway.clone(),
        }
    }
}

impl<S: KvStore> OrderApi<S> {
    /// Create the group.
    pub const fn new(gateway: ApiGateway<S>) -> Self {
        Self { gateway }
    }

    /// `POST order/create` - submit a draft, receive the new order id.
    #[instrument(skip(self, draft), fields(store_id = %draft.store_id))]
    pub async fn create(&self, draft: &OrderDraft) -> ApiResult<CreatedOrder> {
        self.gateway.post("order/create", draft).await
    }

    /// `GET order/history` - the customer's orders, newest first. A
    /// successful fetch refreshes the local mirror.
    #[instrument(skip(self))]
    pub async fn history(&self) -> ApiResult<Vec<Order>> {
        let result: ApiResult<Vec<Order>> = self.gateway.get("order/history").await;
        if let ApiResult::Ok(orders) = &result {
            // mirror refresh is best-effort; a storage hiccup must not turn
            // a successful fetch into a failure
            let _ = self.gateway.store().set(StorageKey::Orders, orders);
        }
        result
    }

    /// The locally mirrored history from the last successful fetch.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the mirror cannot be read.
    pub fn cached_history(&self) -> Result<Vec<Order>, StorageError> {
        Ok(self
            .gateway
            .store()
            .get::<Vec<Order>>(StorageKey::Orders)?
            .unwrap_or_default())
    }

    /// `DELETE order/delete?orderId=` - customer cancellation, only honored
    /// server-side while the order is still pending.
    #[instrument(skip(self), fields(order_id = %order_id))]
    pub async fn cancel(&self, order_id: OrderId) -> ApiResult<()> {
        self.gateway
            .delete(&format!("order/delete?orderId={order_id}"))
            .await
    }

    // =========================================================================
    // Owner-side transitions
    // =========================================================================

    /// `GET order/check` - the owner's live order feed.
    #[instrument(skip(self))]
    pub async fn live_feed(&self) -> ApiResult<Vec<Order>> {
        self.gateway.get("order/check").await
    }

    /// `POST order/ok?orderId=` - accept a pending order.
    #[instrument(skip(self), fields(order_id = %order_id))]
    pub async fn accept(&self, order_id: OrderId) -> ApiResult<()> {
        self.gateway
            .post_empty(&format!("order/ok?orderId={order_id}"))
            .await
    }

    /// `POST order/cancel?orderId=` - reject a pending order.
    #[instrument(skip(self), fields(order_id = %order_id))]
    pub async fn reject(&self, order_id: OrderId) -> ApiResult<()> {
        self.gateway
            .post_empty(&format!("order/cancel?orderId={order_id}"))
            .await
    }

    /// `POST order/complete?orderId=` - cooking finished, hand to delivery.
    #[instrument(skip(self), fields(order_id = %order_id))]
    pub async fn complete(&self, order_id: OrderId) -> ApiResult<()> {
        self.gateway
            .post_empty(&format!("order/complete?orderId={order_id}"))
            .await
    }

    /// `POST order/deliver?orderId=` - delivered to the customer.
    #[instrument(skip(self), fields(order_id = %order_id))]
    pub async fn deliver(&self, order_id: OrderId) -> ApiResult<()> {
        self.gateway
            .post_empty(&format!("order/deliver?orderId={order_id}"))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_created_order_shape() {
        let created: CreatedOrder =
            serde_json::from_str(r#"{"orderId": 1234}"#).expect("deserialize");
        assert_eq!(created.order_id, OrderId::new(1234));
    }
}
