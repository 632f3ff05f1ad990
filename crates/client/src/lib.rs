//! Maejang client SDK.
//!
//! This crate implements the client side of the Maejang multi-tenant
//! food-ordering platform: the locally persisted cart and reward-point
//! ledger, the store-context resolver, the authenticated REST gateway, and
//! the checkout coordinator that ties them together. Rendering is out of
//! scope; a UI layer drives this crate and displays what it returns.
//!
//! # Architecture
//!
//! Local state (cart, points, addresses, session) lives behind the
//! [`storage::KvStore`] trait and is persisted in full on every mutation, so
//! a crash never loses more than the in-flight call. Remote access goes
//! through a single [`gateway::ApiGateway`] that normalizes every response
//! into a tagged [`gateway::ApiResult`] - callers match on the outcome
//! instead of catching exceptions. Checkout is an explicit state machine in
//! [`checkout`] with no automatic retries: any failure returns the flow to
//! idle with local state untouched.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod auth;
pub mod cart;
pub mod checkout;
pub mod config;
pub mod context;
pub mod error;
pub mod gateway;
pub mod rewards;
pub mod storage;
