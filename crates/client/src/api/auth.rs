//! Auth endpoints: login, signup, profile.
//!
//! Two backend generations disagree on where the login token travels: the
//! current one returns it in the `Authorization` response header, the older
//! one embeds it in the body. The difference is a [`TokenTransport`]
//! strategy on the client, not a fork.

use maejang_core::types::{Email, StoreId, UserId, UserRole};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::gateway::{ApiGateway, ApiResult};
use crate::storage::{KvStore, StorageKey};

/// Where the backend places the bearer token on login.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TokenTransport {
    /// `Authorization: Bearer <token>` response header (current backend).
    #[default]
    Header,
    /// `token` field in the response body (older backend).
    Body,
}

/// Authenticated profile as returned by login and `auth/me`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: UserId,
    pub email: Email,
    pub name: String,
    pub role: UserRole,
    /// Present for owner accounts.
    #[serde(default)]
    pub store_id: Option<StoreId>,
}

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SignupRequest<'a> {
    email: &'a str,
    password: &'a str,
    name: &'a str,
    role: UserRole,
}

/// Login response body; `token` is only present with
/// [`TokenTransport::Body`].
#[derive(Debug, Deserialize)]
struct LoginBody {
    #[serde(default)]
    token: Option<String>,
    #[serde(flatten)]
    profile: Profile,
}

/// Auth endpoint group.
pub struct AuthApi<S: KvStore> {
    gateway: ApiGateway<S>,
    transport: TokenTransport,
}

impl<S: KvStore> Clone for AuthApi<S> {
    fn clone(&self) -> Self {
        Self {
            gateway: self.gateway.clone(),
            transport: self.transport,
        }
    }
}

impl<S: KvStore> AuthApi<S> {
    /// Create the group with the default (header) token transport.
    pub fn new(gateway: ApiGateway<S>) -> Self {
        Self::with_transport(gateway, TokenTransport::default())
    }

    /// Create the group for a specific backend generation.
    pub const fn with_transport(gateway: ApiGateway<S>, transport: TokenTransport) -> Self {
        Self { gateway, transport }
    }

    /// `POST auth/login`. On success the bearer token and the profile are
    /// persisted, and the profile is returned.
    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn login(&self, email: &Email, password: &str) -> ApiResult<Profile> {
        let request = LoginRequest {
            email: email.as_str(),
            password,
        };

        let outcome = self
            .gateway
            .post_capturing_auth_header::<LoginBody>("auth/login", &request)
            .await;

        let (body, header_token) = match outcome {
            ApiResult::Ok(pair) => pair,
            ApiResult::AuthError => return ApiResult::AuthError,
            ApiResult::NetworkError(m) => return ApiResult::NetworkError(m),
            ApiResult::DomainError(m) => return ApiResult::DomainError(m),
        };

        let token = match self.transport {
            TokenTransport::Header => header_token,
            TokenTransport::Body => body.token,
        };

        let Some(token) = token else {
            return ApiResult::NetworkError("login response carried no token".to_string());
        };

        if let Err(e) = self.gateway.auth().set_token(&token) {
            return ApiResult::NetworkError(format!("token persist failed: {e}"));
        }
        if let Err(e) = self
            .gateway
            .store()
            .set(StorageKey::User, &body.profile)
        {
            return ApiResult::NetworkError(format!("profile persist failed: {e}"));
        }

        ApiResult::Ok(body.profile)
    }

    /// `POST users/sign_in` - account creation.
    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn signup(
        &self,
        email: &Email,
        password: &str,
        name: &str,
        role: UserRole,
    ) -> ApiResult<()> {
        let request = SignupRequest {
            email: email.as_str(),
            password,
            name,
            role,
        };
        self.gateway.post("users/sign_in", &request).await
    }

    /// `POST auth/me` - the authenticated profile. The backend binds this
    /// as POST, not GET.
    #[instrument(skip(self))]
    pub async fn me(&self) -> ApiResult<Profile> {
        self.gateway.post_empty("auth/me").await
    }

    /// Explicit logout: clears the token and the local profile mirror.
    /// This is the only place the SDK ever drops a token.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the local state cannot be cleared.
    pub fn logout(&self) -> Result<(), crate::storage::StorageError> {
        self.gateway.auth().clear_token()?;
        self.gateway.store().remove(StorageKey::User)
    }

    /// The locally mirrored profile from the last successful login.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the mirror cannot be read.
    pub fn cached_profile(&self) -> Result<Option<Profile>, crate::storage::StorageError> {
        self.gateway.store().get(StorageKey::User)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_deserializes_owner_shape() {
        let profile: Profile = serde_json::from_str(
            r#"{"id": 5, "email": "owner@maejang.com", "name": "사장님",
                "role": "OWNER", "storeId": 3}"#,
        )
        .expect("deserialize");
        assert_eq!(profile.role, UserRole::Owner);
        assert_eq!(profile.store_id, Some(StoreId::new(3)));
    }

    #[test]
    fn test_login_body_token_is_optional() {
        let body: LoginBody = serde_json::from_str(
            r#"{"id": 1, "email": "user@maejang.com", "name": "고객", "role": "CUSTOMER"}"#,
        )
        .expect("deserialize");
        assert!(body.token.is_none());

        let body: LoginBody = serde_json::from_str(
            r#"{"token": "abc", "id": 1, "email": "user@maejang.com",
                "name": "고객", "role": "CUSTOMER"}"#,
        )
        .expect("deserialize");
        assert_eq!(body.token.as_deref(), Some("abc"));
    }
}
