//! # HTTP Server Module
//!
//! Maps CRUD verbs over `/products` onto the record store. Validation runs
//! before the store is touched; store envelopes are translated into status
//! codes and JSON bodies here and nowhere else.
//!
//! # Endpoints
//!
//! - `/health` - Health check
//! - `/metrics` - Operation counters
//! - `/products`, `/products/:id` - Product CRUD (also under `/api`)

pub mod config;
pub mod errors;
pub mod observability_routes;
pub mod product_routes;
pub mod response;
pub mod server;

pub use config::HttpServerConfig;
pub use errors::{ApiError, ApiResult, ErrorResponse};
pub use server::HttpServer;
