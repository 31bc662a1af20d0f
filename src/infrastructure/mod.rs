//! Infrastructure layer: external integrations and adapters.

pub mod auth;
pub mod cache;
pub mod config;
pub mod database;
pub mod logging;
pub mod metrics;
