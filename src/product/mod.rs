//! # Product Module
//!
//! The product record and the field constraints every input boundary
//! enforces before anything reaches the store.

pub mod model;
pub mod validation;

pub use model::{NewProduct, Product, ProductId, ProductPatch};
pub use validation::{validate_new, validate_patch, FieldError, ValidationErrors};
