//! Store endpoints and the delivery-radius check.

use maejang_core::StoreContext;
use maejang_core::geo::haversine_km;
use maejang_core::types::StoreId;
use serde::Serialize;
use tracing::instrument;

use crate::gateway::{ApiGateway, ApiResult};
use crate::storage::KvStore;

/// Result of a delivery-radius check.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeliveryCheck {
    pub available: bool,
    /// Distance from the store, when the store publishes coordinates.
    pub distance_km: Option<f64>,
    pub max_radius_km: Option<f64>,
}

/// Owner payload for `POST store/update`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", rename = "deliveryRadius")]
    pub delivery_radius_km: Option<f64>,
}

/// Store endpoint group.
pub struct StoreApi<S: KvStore> {
    gateway: ApiGateway<S>,
}

impl<S: KvStore> Clone for StoreApi<S> {
    fn clone(&self) -> Self {
        Self {
            gateway: self.gateway.clone(),
        }
    }
}

impl<S: KvStore> StoreApi<S> {
    /// Create the group.
    pub const fn new(gateway: ApiGateway<S>) -> Self {
        Self { gateway }
    }

    /// `GET store/by-subdomain?subdomain=` - tenant lookup for customer
    /// sessions.
    #[instrument(skip(self), fields(subdomain = %subdomain))]
    pub async fn by_subdomain(&self, subdomain: &str) -> ApiResult<StoreContext> {
        self.gateway
            .get(&format!("store/by-subdomain?subdomain={subdomain}"))
            .await
    }

    /// `GET store/{id}`.
    #[instrument(skip(self), fields(store_id = %store_id))]
    pub async fn info(&self, store_id: StoreId) -> ApiResult<StoreContext> {
        self.gateway.get(&format!("store/{store_id}")).await
    }

    /// `POST store/update` (owner settings screen).
    #[instrument(skip(self, update))]
    pub async fn update(&self, update: &StoreUpdate) -> ApiResult<StoreContext> {
        self.gateway.post("store/update", update).await
    }
}

/// Check whether a point is inside the store's delivery radius.
///
/// A store that publishes no coordinates or no radius delivers everywhere;
/// the check only restricts when the store opted in.
#[must_use]
pub fn check_delivery(store: &StoreContext, latitude: f64, longitude: f64) -> DeliveryCheck {
    let (Some(store_lat), Some(store_lon), Some(radius)) = (
        store.latitude,
        store.longitude,
        store.delivery_radius_km,
    ) else {
        return DeliveryCheck {
            available: true,
            distance_km: None,
            max_radius_km: None,
        };
    };

    let distance = haversine_km(store_lat, store_lon, latitude, longitude);
    DeliveryCheck {
        available: distance <= radius,
        distance_km: Some(distance),
        max_radius_km: Some(radius),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use maejang_core::types::OwnerId;

    fn store_at(lat: Option<f64>, lon: Option<f64>, radius: Option<f64>) -> StoreContext {
        StoreContext {
            owner_id: OwnerId::new(5),
            store_id: StoreId::new(3),
            store_name: "피자스쿨 역삼점".to_string(),
            latitude: lat,
            longitude: lon,
            delivery_radius_km: radius,
        }
    }

    #[test]
    fn test_unbounded_store_delivers_everywhere() {
        let check = check_delivery(&store_at(None, None, None), 37.0, 127.0);
        assert!(check.available);
        assert!(check.distance_km.is_none());
    }

    #[test]
    fn test_inside_radius() {
        // store at Gangnam, customer at Yeoksam (~0.7 km), radius 3 km
        let store = store_at(Some(37.4979), Some(127.0276), Some(3.0));
        let check = check_delivery(&store, 37.5007, 127.0364);
        assert!(check.available);
        assert!(check.distance_km.is_some_and(|d| d < 3.0));
    }

    #[test]
    fn test_outside_radius() {
        // store in Seoul, customer in Busan
        let store = store_at(Some(37.5665), Some(126.9780), Some(3.0));
        let check = check_delivery(&store, 35.1796, 129.0756);
        assert!(!check.available);
        assert_eq!(check.max_radius_km, Some(3.0));
    }
}
