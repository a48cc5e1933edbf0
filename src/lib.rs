//! productdb - a product catalogue served over HTTP and persisted to a
//! single JSON file

pub mod cli;
pub mod http_server;
pub mod observability;
pub mod product;
pub mod store;
