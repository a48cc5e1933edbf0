//! # Record Store
//!
//! Owns the on-disk JSON array of products. Nothing else reads or writes
//! the backing file.
//!
//! Public operations never return `Err`: every outcome, including missing
//! records and I/O failures, comes back as a `DbResult` envelope the caller
//! branches on.

pub mod config;
pub mod envelope;
pub mod errors;
pub mod file;
pub mod ids;

pub use config::{IdPolicy, StoreConfig};
pub use envelope::{DbResult, Payload, NOT_FOUND_LABEL};
pub use errors::{StoreError, StoreResult};
pub use file::JsonFileStore;
