//! HTTP inbound adapter exposing REST endpoints.

pub mod admin;
pub mod auth;
pub mod cache_control;
pub mod carbon;
pub mod careers;
pub mod cart;
pub mod catalogue;
pub mod checkout;
pub mod contact;
pub mod error;
pub mod health;
pub mod idempotency;
pub mod news;
pub mod orders;
pub mod pricing;
pub mod routes;
pub mod schemas;
pub mod service_requests;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;

pub use error::ApiResult;
