//! HTTP server module.
//!
//! Exposes the gateway's routes: the informational root page, `/download`,
//! and `/health`.

pub mod error;
pub mod models;
pub mod routes;
pub mod server;

pub use server::{ApiServer, ApiServerConfig, AppState};
