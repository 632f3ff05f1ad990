//! Typed endpoint groups over the [`ApiGateway`](crate::gateway::ApiGateway).
//!
//! One module per backend resource. Each group owns its wire types and
//! returns the gateway's tagged [`ApiResult`](crate::gateway::ApiResult);
//! nothing here retries, throws, or touches the auth session beyond reading
//! the token through the gateway.
//!
//! # Groups
//!
//! - [`auth`] - login/signup/profile; token capture strategies
//! - [`menu`] - public menu reads (cached) and owner menu CRUD
//! - [`orders`] - order creation, history, and owner status transitions
//! - [`address`] - address CRUD plus the local default-address mirror
//! - [`store`] - store lookup and the delivery-radius check
//! - [`images`] - multipart image upload

pub mod address;
pub mod auth;
pub mod images;
pub mod menu;
pub mod orders;
pub mod store;
