//! Orders: the outgoing creation payload and the server-side echo.
//!
//! The client never owns an order. It sends an [`OrderDraft`], receives back
//! an id, and thereafter only mirrors what `order/history` returns. Status
//! lives server-side (see [`OrderStatus`](crate::types::OrderStatus)).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{AddressId, MenuId, OrderId, OrderStatus, StoreId, Won};

/// One item of an order payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub menu_id: MenuId,
    /// Selected option label, omitted for the default option.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub option: Option<String>,
    pub count: u32,
}

/// Payload for `POST order/create`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDraft {
    pub store_id: StoreId,
    pub address_id: AddressId,
    /// Free-form request to the kitchen ("no onions").
    #[serde(default)]
    pub request: String,
    pub items: Vec<OrderItem>,
}

/// An order as echoed back by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub order_id: OrderId,
    #[serde(default)]
    pub status: OrderStatus,
    #[serde(default)]
    pub items: Vec<OrderItem>,
    #[serde(default)]
    pub total_price: Won,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_serializes_camel_case() {
        let draft = OrderDraft {
            store_id: StoreId::new(3),
            address_id: AddressId::new(11),
            request: String::new(),
            items: vec![OrderItem {
                menu_id: MenuId::new(2),
                option: None,
                count: 2,
            }],
        };
        let json = serde_json::to_value(&draft).expect("serialize");
        assert_eq!(json["storeId"], 3);
        assert_eq!(json["addressId"], 11);
        assert_eq!(json["items"][0]["menuId"], 2);
        assert_eq!(json["items"][0]["count"], 2);
        // default option is omitted entirely
        assert!(json["items"][0].get("option").is_none());
    }

    #[test]
    fn test_order_echo_tolerates_sparse_payloads() {
        let order: Order =
            serde_json::from_str(r#"{"orderId": 77, "status": "CONFIRMED"}"#).expect("deserialize");
        assert_eq!(order.order_id, OrderId::new(77));
        assert_eq!(order.status, OrderStatus::Confirmed);
        assert!(order.items.is_empty());
        assert_eq!(order.total_price, Won::ZERO);
    }
}
