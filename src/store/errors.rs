//! # Store Errors

use std::io;

use thiserror::Error;

use crate::product::ProductId;

/// Result type for internal store steps
pub type StoreResult<T> = Result<T, StoreError>;

/// Failures inside the record store.
///
/// These never cross the store's public boundary as `Err`; public
/// operations fold them into a `DbResult::Failure`.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No record has the requested id
    #[error("Not found")]
    NotFound(ProductId),

    /// Every id up to `ProductId::MAX` has been issued
    #[error("no product ids left to assign")]
    IdsExhausted,

    /// File system failure
    #[error("{context}: {source}")]
    Io {
        context: &'static str,
        #[source]
        source: io::Error,
    },

    /// Backing file exists but is not a JSON array of products
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// Records could not be encoded
    #[error("failed to serialize products: {0}")]
    Serialize(#[source] serde_json::Error),
}

impl StoreError {
    pub(crate) fn io(context: &'static str, source: io::Error) -> Self {
        StoreError::Io { context, source }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_label() {
        let err = StoreError::NotFound(3);
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Not found");
    }

    #[test]
    fn test_io_display_includes_context() {
        let err = StoreError::io(
            "failed to write products",
            io::Error::new(io::ErrorKind::PermissionDenied, "permission denied"),
        );
        assert!(!err.is_not_found());
        assert_eq!(err.to_string(), "failed to write products: permission denied");
    }
}
