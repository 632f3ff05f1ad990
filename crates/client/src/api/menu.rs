//! Menu endpoints.
//!
//! The menu list is the hottest public read in the app (every page render
//! consults it), so listings are cached with a short-TTL `moka` cache.
//! Owner-side mutations invalidate the affected store's entry.

use std::sync::Arc;
use std::time::Duration;

use maejang_core::types::{MenuId, StoreId, Won};
use moka::future::Cache;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::gateway::{ApiGateway, ApiResult};
use crate::storage::KvStore;

const MENU_CACHE_CAPACITY: u64 = 100;
const MENU_CACHE_TTL: Duration = Duration::from_secs(300);

/// One menu item as listed to customers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub menu_id: MenuId,
    pub menu_name: String,
    pub price: Won,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub picture: Option<String>,
}

/// Owner payload for creating or updating a menu item.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuDraft {
    pub menu_name: String,
    pub price: Won,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,
}

/// Menu endpoint group.
pub struct MenuApi<S: KvStore> {
    gateway: ApiGateway<S>,
    list_cache: Cache<i64, Arc<Vec<MenuItem>>>,
}

impl<S: KvStore> Clone for MenuApi<S> {
    fn clone(&self) -> Self {
        Self {
            gateway: self.gateway.clone(),
            list_cache: self.list_cache.clone(),
        }
    }
}

impl<S: KvStore> MenuApi<S> {
    /// Create the group with a fresh listing cache.
    pub fn new(gateway: ApiGateway<S>) -> Self {
        let list_cache = Cache::builder()
            .max_capacity(MENU_CACHE_CAPACITY)
            .time_to_live(MENU_CACHE_TTL)
            .build();
        Self {
            gateway,
            list_cache,
        }
    }

    /// `GET menu/read?storeId=` - the store's menu, cached for 5 minutes.
    #[instrument(skip(self), fields(store_id = %store_id))]
    pub async fn list(&self, store_id: StoreId) -> ApiResult<Arc<Vec<MenuItem>>> {
        if let Some(cached) = self.list_cache.get(&store_id.as_i64()).await {
            debug!("menu cache hit");
            return ApiResult::Ok(cached);
        }

        let result: ApiResult<Vec<MenuItem>> = self
            .gateway
            .get(&format!("menu/read?storeId={store_id}"))
            .await;

        match result {
            ApiResult::Ok(items) => {
                let items = Arc::new(items);
                self.list_cache
                    .insert(store_id.as_i64(), Arc::clone(&items))
                    .await;
                ApiResult::Ok(items)
            }
            ApiResult::AuthError => ApiResult::AuthError,
            ApiResult::NetworkError(m) => ApiResult::NetworkError(m),
            ApiResult::DomainError(m) => ApiResult::DomainError(m),
        }
    }

    /// `GET menu/{id}` - one item's detail. Uncached; the detail page is a
    /// cold path.
    #[instrument(skip(self), fields(menu_id = %menu_id))]
    pub async fn detail(&self, menu_id: MenuId) -> ApiResult<MenuItem> {
        self.gateway.get(&format!("menu/{menu_id}")).await
    }

    /// `POST menu/create` (owner).
    #[instrument(skip(self, draft), fields(store_id = %store_id))]
    pub async fn create(&self, store_id: StoreId, draft: &MenuDraft) -> ApiResult<MenuItem> {
        let result = self.gateway.post("menu/create", draft).await;
        if result.is_ok() {
            self.list_cache.invalidate(&store_id.as_i64()).await;
        }
        result
    }

    /// `PATCH menu/update/{id}` (owner).
    #[instrument(skip(self, draft), fields(store_id = %store_id, menu_id = %menu_id))]
    pub async fn update(
        &self,
        store_id: StoreId,
        menu_id: MenuId,
        draft: &MenuDraft,
    ) -> ApiResult<MenuItem> {
        let result = self
            .gateway
            .patch(&format!("menu/update/{menu_id}"), draft)
            .await;
        if result.is_ok() {
            self.list_cache.invalidate(&store_id.as_i64()).await;
        }
        result
    }

    /// `DELETE menu/delete/{id}` (owner).
    #[instrument(skip(self), fields(store_id = %store_id, menu_id = %menu_id))]
    pub async fn delete(&self, store_id: StoreId, menu_id: MenuId) -> ApiResult<()> {
        let result: ApiResult<()> = self
            .gateway
            .delete(&format!("menu/delete/{menu_id}"))
            .await;
        if result.is_ok() {
            self.list_cache.invalidate(&store_id.as_i64()).await;
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_item_tolerates_sparse_fields() {
        let item: MenuItem = serde_json::from_str(
            r#"{"menuId": 2, "menuName": "불고기 피자", "price": 8900}"#,
        )
        .expect("deserialize");
        assert_eq!(item.price, Won::new(8900));
        assert!(item.category.is_none());
        assert!(item.picture.is_none());
    }

    #[test]
    fn test_draft_omits_absent_fields() {
        let draft = MenuDraft {
            menu_name: "새 메뉴".to_string(),
            price: Won::new(12000),
            category: None,
            description: None,
            picture: None,
        };
        let json = serde_json::to_value(&draft).expect("serialize");
        assert!(json.get("category").is_none());
        assert_eq!(json["menuName"], "새 메뉴");
    }
}
