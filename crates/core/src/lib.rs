//! Maejang Core - Shared domain types.
//!
//! This crate provides the common types used across all Maejang client
//! components:
//! - `client` - The storefront/owner client SDK (cart, checkout, API access)
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients, no storage. This keeps it lightweight and allows it to be used
//! anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, money, emails, and statuses
//! - [`cart`] - Cart line items keyed by (menu, option)
//! - [`order`] - Order drafts and server-side order echoes
//! - [`address`] - Delivery addresses
//! - [`store`] - Resolved store/tenant context
//! - [`points`] - Reward-point arithmetic (accrual, redemption bounds)
//! - [`geo`] - Great-circle distance for delivery-radius checks

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod address;
pub mod cart;
pub mod geo;
pub mod order;
pub mod points;
pub mod store;
pub mod types;

pub use address::Address;
pub use cart::{CartKey, CartLine};
pub use order::{Order, OrderDraft, OrderItem};
pub use points::{DEFAULT_REWARD_RATE_PERCENT, MIN_PAYABLE_FLOOR};
pub use store::StoreContext;
pub use types::*;
