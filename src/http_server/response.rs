//! # Response Formatting
//!
//! Success bodies share one shape: `{ "data": ..., "message": ... }`.
//! Deletes answer with `{ "message" }` only.

use serde::Serialize;

/// Body carrying a payload and the store's message
#[derive(Debug, Clone, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
    pub message: String,
}

impl<T: Serialize> DataResponse<T> {
    pub fn new(data: T, message: impl Into<String>) -> Self {
        Self {
            data,
            message: message.into(),
        }
    }
}

/// Body with only a message
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_data_response_serialization() {
        let response = DataResponse::new(json!({"id": 1}), "Product retrieved successfully");
        let json = serde_json::to_value(response).unwrap();
        assert_eq!(json["data"]["id"], 1);
        assert_eq!(json["message"], "Product retrieved successfully");
    }

    #[test]
    fn test_message_response_serialization() {
        let json = serde_json::to_value(MessageResponse::new("Product deleted successfully"))
            .unwrap();
        assert_eq!(json, json!({"message": "Product deleted successfully"}));
    }
}
