//! Address endpoints and the local default-address mirror.
//!
//! The backend stores addresses; the client keeps a mirror so the checkout
//! screen renders instantly and so the "default address" invariant (at most
//! one `is_default`) can be enforced locally before the next sync.

use maejang_core::Address;
use maejang_core::types::AddressId;
use serde::Serialize;
use tracing::instrument;

use crate::gateway::{ApiGateway, ApiResult};
use crate::storage::{KvStore, StorageError, StorageKey};

/// Payload for `POST address/create`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAddress {
    pub label: String,
    pub full_address: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// Address endpoint group.
pub struct AddressApi<S: KvStore> {
    gateway: ApiGateway<S>,
}

impl<S: KvStore> Clone for AddressApi<S> {
    fn clone(&self) -> Self {
        Self {
            gateway: self.gateway.clone(),
        }
    }
}

impl<S: KvStore> AddressApi<S> {
    /// Create the group.
    pub const fn new(gateway: ApiGateway<S>) -> Self {
        Self { gateway }
    }

    /// `GET address/read` - all addresses; refreshes the local mirror on
    /// success.
    #[instrument(skip(self))]
    pub async fn list(&self) -> ApiResult<Vec<Address>> {
        let result: ApiResult<Vec<Address>> = self.gateway.get("address/read").await;
        if let ApiResult::Ok(addresses) = &result {
            let _ = self.gateway.store().set(StorageKey::Addresses, addresses);
        }
        result
    }

    /// `POST address/create`.
    #[instrument(skip(self, address))]
    pub async fn create(&self, address: &NewAddress) -> ApiResult<Address> {
        self.gateway.post("address/create", address).await
    }

    /// `DELETE address/delete/{id}`.
    #[instrument(skip(self), fields(address_id = %address_id))]
    pub async fn delete(&self, address_id: AddressId) -> ApiResult<()> {
        self.gateway
            .delete(&format!("address/delete/{address_id}"))
            .await
    }

    /// The mirrored address list from the last successful fetch.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the mirror cannot be read.
    pub fn cached(&self) -> Result<Vec<Address>, StorageError> {
        Ok(self
            .gateway
            .store()
            .get::<Vec<Address>>(StorageKey::Addresses)?
            .unwrap_or_default())
    }

    /// Mark one mirrored address as the default, unsetting all others
    /// first so at most one `is_default` survives.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the mirror cannot be read or persisted.
    pub fn set_default_local(&self, address_id: AddressId) -> Result<(), StorageError> {
        let mut addresses = self.cached()?;
        for address in &mut addresses {
            address.is_default = address.id == address_id;
        }
        self.gateway.store().set(StorageKey::Addresses, &addresses)
    }

    /// The mirrored default address, if one is marked.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the mirror cannot be read.
    pub fn default_address(&self) -> Result<Option<Address>, StorageError> {
        Ok(self.cached()?.into_iter().find(|a| a.is_default))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;
    use crate::storage::MemoryStore;
    use std::sync::Arc;

    fn api() -> AddressApi<MemoryStore> {
        let config = ClientConfig::new("https://pizzaschool.maejang.com").expect("config");
        let gateway =
            ApiGateway::new(&config, Arc::new(MemoryStore::new())).expect("gateway");
        AddressApi::new(gateway)
    }

    fn addr(id: i64, is_default: bool) -> Address {
        Address {
            id: AddressId::new(id),
            label: format!("주소 {id}"),
            full_address: "서울시 강남구 1-1".to_string(),
            latitude: 37.49,
            longitude: 127.03,
            is_default,
        }
    }

    #[test]
    fn test_set_default_unsets_all_others() {
        let api = api();
        api.gateway
            .store()
            .set(
                StorageKey::Addresses,
                &vec![addr(1, true), addr(2, false), addr(3, true)],
            )
            .expect("seed mirror");

        api.set_default_local(AddressId::new(2)).expect("set default");

        let addresses = api.cached().expect("cached");
        let defaults: Vec<_> = addresses.iter().filter(|a| a.is_default).collect();
        assert_eq!(defaults.len(), 1);
        assert_eq!(defaults.first().map(|a| a.id), Some(AddressId::new(2)));
    }

    #[test]
    fn test_default_address_on_empty_mirror() {
        let api = api();
        assert!(api.default_address().expect("default").is_none());
    }
}
