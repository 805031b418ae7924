//! HTTP server exposing the catalog service
//!
//! [`ServerBuilder`] wires the record store, the snapshot backend and the
//! routes together and serves them with graceful shutdown.

pub mod builder;
pub mod handlers;
pub mod router;

pub use builder::ServerBuilder;
pub use handlers::AppState;
pub use router::build_catalog_routes;
