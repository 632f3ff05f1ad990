//! Resolved store/tenant context.

use serde::{Deserialize, Serialize};

use crate::types::{OwnerId, StoreId};

/// The identity of the store a session is scoped to.
///
/// Resolved once per session (subdomain) or once per owner login, then
/// treated as read-only. Every store-scoped API call carries ids from here
/// rather than from mutable globals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreContext {
    pub owner_id: OwnerId,
    pub store_id: StoreId,
    pub store_name: String,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    /// Maximum delivery distance in kilometers; `None` means unrestricted.
    #[serde(default, rename = "deliveryRadius")]
    pub delivery_radius_km: Option<f64>,
}

impl StoreContext {
    /// Whether the store has enough location data for a radius check.
    #[must_use]
    pub const fn has_delivery_bounds(&self) -> bool {
        self.latitude.is_some() && self.longitude.is_some() && self.delivery_radius_km.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_from_api_shape() {
        let ctx: StoreContext = serde_json::from_str(
            r#"{"ownerId": 5, "storeId": 3, "storeName": "피자스쿨 역삼점",
                "latitude": 37.5, "longitude": 127.03, "deliveryRadius": 3.0}"#,
        )
        .expect("deserialize");
        assert_eq!(ctx.store_id, StoreId::new(3));
        assert!(ctx.has_delivery_bounds());
    }

    #[test]
    fn test_missing_bounds() {
        let ctx: StoreContext = serde_json::from_str(
            r#"{"ownerId": 5, "storeId": 3, "storeName": "피자스쿨 역삼점"}"#,
        )
        .expect("deserialize");
        assert!(!ctx.has_delivery_bounds());
    }
}
