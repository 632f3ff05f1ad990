//! Store context resolver.
//!
//! Every store-scoped request needs the tenant identity (owner id, store
//! id, store name). Customer sessions resolve it from the subdomain; owner
//! sessions resolve it from their authenticated profile. Resolution happens
//! once: the first successful result is cached and every later await is
//! free. A failed resolution is NOT cached, but callers are expected to
//! show a dead-end "store not found" state rather than retry silently -
//! nothing in the app works without a store.
//!
//! There is no production fallback tenant. Only loopback hostnames map to
//! the configured development alias.

use maejang_core::StoreContext;
use maejang_core::types::UserRole;
use tokio::sync::OnceCell;
use tracing::{info, instrument, warn};

use crate::api::auth::AuthApi;
use crate::api::store::StoreApi;
use crate::error::ClientError;
use crate::gateway::ApiResult;
use crate::storage::KvStore;

/// Where the tenant identity comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentitySource {
    /// A hostname (or bare subdomain) from the customer-facing entry point.
    Subdomain(String),
    /// The authenticated owner session; requires an `OWNER` role profile.
    OwnerSession,
}

/// Resolves and caches the session's [`StoreContext`].
pub struct ContextResolver<S: KvStore> {
    source: IdentitySource,
    dev_subdomain: String,
    store_api: StoreApi<S>,
    auth_api: AuthApi<S>,
    resolved: OnceCell<StoreContext>,
}

impl<S: KvStore> ContextResolver<S> {
    /// Create a resolver for the given identity source.
    pub const fn new(
        source: IdentitySource,
        dev_subdomain: String,
        store_api: StoreApi<S>,
        auth_api: AuthApi<S>,
    ) -> Self {
        Self {
            source,
            dev_subdomain,
            store_api,
            auth_api,
            resolved: OnceCell::const_new(),
        }
    }

    /// The resolved context; performs the lookup on first call and serves
    /// the cached value afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::StoreUnavailable`] when the tenant cannot be
    /// resolved (unknown subdomain, non-owner role, transport failure), or
    /// [`ClientError::Auth`] when the owner path lacks a valid session.
    #[instrument(skip(self))]
    pub async fn resolve(&self) -> Result<StoreContext, ClientError> {
        self.resolved
            .get_or_try_init(|| self.resolve_uncached())
            .await
            .cloned()
    }

    /// The cached context, if resolution already succeeded.
    #[must_use]
    pub fn peek(&self) -> Option<&StoreContext> {
        self.resolved.get()
    }

    async fn resolve_uncached(&self) -> Result<StoreContext, ClientError> {
        match &self.source {
            IdentitySource::Subdomain(hostname) => {
                let subdomain = effective_subdomain(hostname, &self.dev_subdomain);
                let context = match self.store_api.by_subdomain(&subdomain).await {
                    ApiResult::Ok(ctx) => ctx,
                    ApiResult::DomainError(m) => {
                        warn!(%subdomain, message = %m, "store lookup refused");
                        return Err(ClientError::StoreUnavailable(m));
                    }
                    ApiResult::NetworkError(m) => return Err(ClientError::StoreUnavailable(m)),
                    ApiResult::AuthError => {
                        // store lookup is anonymous; an auth bounce here is
                        // a misconfigured backend
                        return Err(ClientError::StoreUnavailable(
                            "store lookup rejected".to_string(),
                        ));
                    }
                };
                info!(store_id = %context.store_id, store = %context.store_name, "store context resolved");
                Ok(context)
            }
            IdentitySource::OwnerSession => {
                let profile = match self.auth_api.me().await {
                    ApiResult::Ok(p) => p,
                    ApiResult::AuthError => return Err(ClientError::Auth),
                    ApiResult::NetworkError(m) => return Err(ClientError::StoreUnavailable(m)),
                    ApiResult::DomainError(m) => return Err(ClientError::StoreUnavailable(m)),
                };

                if profile.role != UserRole::Owner {
                    return Err(ClientError::StoreUnavailable(
                        "owner context requested for a non-owner account".to_string(),
                    ));
                }
                let Some(store_id) = profile.store_id else {
                    return Err(ClientError::StoreUnavailable(
                        "owner account has no store".to_string(),
                    ));
                };

                let context = match self.store_api.info(store_id).await {
                    ApiResult::Ok(ctx) => ctx,
                    ApiResult::AuthError => return Err(ClientError::Auth),
                    ApiResult::NetworkError(m) | ApiResult::DomainError(m) => {
                        return Err(ClientError::StoreUnavailable(m));
                    }
                };
                info!(store_id = %context.store_id, "owner store context resolved");
                Ok(context)
            }
        }
    }
}

/// Map a hostname to the tenant subdomain to look up.
///
/// Loopback hosts resolve to the development alias; everything else uses
/// its first label (`pizzaschool.maejang.com` → `pizzaschool`, and a bare
/// `pizzaschool` passes through unchanged).
fn effective_subdomain(hostname: &str, dev_alias: &str) -> String {
    let host = hostname.split(':').next().unwrap_or(hostname);
    let first_label = host.split('.').next().unwrap_or(host);
    if matches!(first_label, "localhost" | "127" | "0" | "[::1]") {
        dev_alias.to_string()
    } else {
        first_label.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subdomain_extraction() {
        assert_eq!(
            effective_subdomain("pizzaschool.maejang.com", "pizzaschool"),
            "pizzaschool"
        );
        assert_eq!(effective_subdomain("bbq.maejang.com", "pizzaschool"), "bbq");
        assert_eq!(effective_subdomain("bbq", "pizzaschool"), "bbq");
    }

    #[test]
    fn test_loopback_maps_to_dev_alias() {
        assert_eq!(effective_subdomain("localhost", "pizzaschool"), "pizzaschool");
        assert_eq!(effective_subdomain("127.0.0.1", "pizzaschool"), "pizzaschool");
        assert_eq!(effective_subdomain("localhost:8080", "pizzaschool"), "pizzaschool");
    }

    #[test]
    fn test_production_hostname_never_gets_alias() {
        // an unknown tenant stays unknown; the server decides its fate
        assert_eq!(
            effective_subdomain("no-such-store.maejang.com", "pizzaschool"),
            "no-such-store"
        );
    }
}
