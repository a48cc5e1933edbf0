//! # Result Envelope
//!
//! Every store operation answers with a `DbResult`. It serializes to the
//! wire shape `{ success, data?, error?, message }`.

use serde::{Serialize, Serializer};

use super::errors::StoreError;
use crate::product::Product;

/// Label carried in `error` for missing records
pub const NOT_FOUND_LABEL: &str = "Not found";

/// Outcome of a store operation
#[derive(Debug)]
pub enum DbResult<T> {
    Success { data: T, message: String },
    Failure { error: StoreError, message: String },
}

impl<T> DbResult<T> {
    pub fn success(data: T, message: impl Into<String>) -> Self {
        DbResult::Success {
            data,
            message: message.into(),
        }
    }

    pub fn failure(error: StoreError, message: impl Into<String>) -> Self {
        DbResult::Failure {
            error,
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, DbResult::Success { .. })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, DbResult::Failure { error, .. } if error.is_not_found())
    }

    /// Human-readable message (present on both variants)
    pub fn message(&self) -> &str {
        match self {
            DbResult::Success { message, .. } | DbResult::Failure { message, .. } => message,
        }
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            DbResult::Success { data, .. } => Some(data),
            DbResult::Failure { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&StoreError> {
        match self {
            DbResult::Success { .. } => None,
            DbResult::Failure { error, .. } => Some(error),
        }
    }

    /// Machine-oriented failure label: "Not found" or the I/O error text
    pub fn error_label(&self) -> Option<String> {
        self.error().map(|e| e.to_string())
    }

    pub fn into_data(self) -> Option<T> {
        match self {
            DbResult::Success { data, .. } => Some(data),
            DbResult::Failure { .. } => None,
        }
    }

    pub fn into_result(self) -> Result<(T, String), (StoreError, String)> {
        match self {
            DbResult::Success { data, message } => Ok((data, message)),
            DbResult::Failure { error, message } => Err((error, message)),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> DbResult<U> {
        match self {
            DbResult::Success { data, message } => DbResult::Success {
                data: f(data),
                message,
            },
            DbResult::Failure { error, message } => DbResult::Failure { error, message },
        }
    }
}

/// Data a successful envelope can carry.
///
/// Confirmations with nothing to return (delete) report `has_payload` as
/// false and serialize without a `data` key.
pub trait Payload: Serialize {
    fn has_payload(&self) -> bool {
        true
    }
}

impl Payload for () {
    fn has_payload(&self) -> bool {
        false
    }
}

impl Payload for Product {}

impl<T: Serialize> Payload for Vec<T> {}

#[derive(Serialize)]
struct Envelope<'a, T: Serialize> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<&'a T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    message: &'a str,
}

impl<T: Payload> Serialize for DbResult<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let envelope = match self {
            DbResult::Success { data, message } => Envelope {
                success: true,
                data: data.has_payload().then_some(data),
                error: None,
                message,
            },
            DbResult::Failure { error, message } => Envelope {
                success: false,
                data: None,
                error: Some(error.to_string()),
                message,
            },
        };
        envelope.serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_success_envelope() {
        let result = DbResult::success(vec![1, 2, 3], "Products retrieved successfully");
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["success"], true);
        assert_eq!(json["data"], serde_json::json!([1, 2, 3]));
        assert_eq!(json["message"], "Products retrieved successfully");
        assert!(json.get("error").is_none());
    }

    #[test]
    fn test_unit_success_has_no_data() {
        let result = DbResult::success((), "Product deleted successfully");
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["success"], true);
        assert!(json.get("data").is_none());
    }

    #[test]
    fn test_empty_list_still_has_data() {
        let result: DbResult<Vec<Product>> = DbResult::success(Vec::new(), "Found 0 products");
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["data"], serde_json::json!([]));
    }

    #[test]
    fn test_not_found_envelope() {
        let result: DbResult<Product> =
            DbResult::failure(StoreError::NotFound(9), "Product with ID 9 not found");
        assert!(result.is_not_found());
        assert_eq!(result.error_label().as_deref(), Some(NOT_FOUND_LABEL));

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["error"], NOT_FOUND_LABEL);
        assert_eq!(json["message"], "Product with ID 9 not found");
        assert!(json.get("data").is_none());
    }

    #[test]
    fn test_io_failure_is_not_not_found() {
        let result: DbResult<()> = DbResult::failure(
            StoreError::io("failed to read products", io::Error::other("disk gone")),
            "Failed to read products",
        );
        assert!(!result.is_success());
        assert!(!result.is_not_found());
        assert_eq!(
            result.error_label().as_deref(),
            Some("failed to read products: disk gone")
        );
    }

    #[test]
    fn test_map_preserves_message() {
        let result = DbResult::success(vec![1, 2], "ok").map(|v| v.len());
        assert_eq!(result.data(), Some(&2));
        assert_eq!(result.message(), "ok");
    }
}
