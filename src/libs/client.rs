//! The letter wizard: local accounts, the compose/payment page flow and the
//! HTTP client for the letter store.
pub mod api;
pub mod auth;
pub mod kv_store;
pub mod pricing;
pub mod wizard;
