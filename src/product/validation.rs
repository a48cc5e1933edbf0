//! Product input validation
//!
//! Validation semantics:
//! - `name` is text of at least 3 characters
//! - `category` is text of at least 2 characters
//! - `price` is a positive number
//! - `stock` is a non-negative integer
//! - `rating` is a number in [0, 5]
//! - `imageUrl` is optional; empty string (or null) means absent,
//!   anything else must be an absolute URL
//!
//! Every field is checked and all failures are reported together, so a
//! client gets the complete list in one round trip. Unknown fields
//! (including a client-supplied `id`) are ignored. Validation never
//! mutates its input.

use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

use super::model::{NewProduct, ProductPatch};

pub const NAME_MIN_LEN: usize = 3;
pub const CATEGORY_MIN_LEN: usize = 2;
pub const RATING_MAX: f64 = 5.0;

const NAME_TOO_SHORT: &str = "Name must be at least 3 characters";
const CATEGORY_TOO_SHORT: &str = "Category is required";
const PRICE_NOT_POSITIVE: &str = "Price must be positive";
const STOCK_NEGATIVE: &str = "Stock must be non-negative integer";
const RATING_NEGATIVE: &str = "Rating cannot be negative";
const RATING_TOO_HIGH: &str = "Rating must be between 0 and 5";
const INVALID_URL: &str = "Must be a valid URL";
const REQUIRED: &str = "Required";

/// A single field-level failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Field name as it appears on the wire (e.g. "imageUrl")
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// All field failures found in one input
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("validation failed on {} field(s)", .0.len())]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self(vec![FieldError::new(field, message)])
    }

    pub fn fields(&self) -> &[FieldError] {
        &self.0
    }

    pub fn into_fields(self) -> Vec<FieldError> {
        self.0
    }

    /// Whether `field` has at least one failure
    pub fn has_field(&self, field: &str) -> bool {
        self.0.iter().any(|e| e.field == field)
    }
}

/// Validates a create body and converts it into a `NewProduct`.
pub fn validate_new(body: &Value) -> Result<NewProduct, ValidationErrors> {
    let obj = as_object(body)?;
    let mut errors = Vec::new();

    let name = required(obj, "name", &mut errors, |v| {
        read_text(v, NAME_MIN_LEN, NAME_TOO_SHORT)
    });
    let category = required(obj, "category", &mut errors, |v| {
        read_text(v, CATEGORY_MIN_LEN, CATEGORY_TOO_SHORT)
    });
    let price = required(obj, "price", &mut errors, read_price);
    let stock = required(obj, "stock", &mut errors, read_stock);
    let rating = required(obj, "rating", &mut errors, read_rating);
    let image_url = optional(obj, "imageUrl", &mut errors, read_image_url).flatten();

    match (name, category, price, stock, rating) {
        (Some(name), Some(category), Some(price), Some(stock), Some(rating))
            if errors.is_empty() =>
        {
            Ok(NewProduct {
                name,
                category,
                price,
                stock,
                rating,
                image_url,
            })
        }
        _ => Err(ValidationErrors(errors)),
    }
}

/// Validates a partial update body. Every field is optional but any
/// field that is present must satisfy the same constraints as on create.
pub fn validate_patch(body: &Value) -> Result<ProductPatch, ValidationErrors> {
    let obj = as_object(body)?;
    let mut errors = Vec::new();

    let patch = ProductPatch {
        name: optional(obj, "name", &mut errors, |v| {
            read_text(v, NAME_MIN_LEN, NAME_TOO_SHORT)
        }),
        category: optional(obj, "category", &mut errors, |v| {
            read_text(v, CATEGORY_MIN_LEN, CATEGORY_TOO_SHORT)
        }),
        price: optional(obj, "price", &mut errors, read_price),
        stock: optional(obj, "stock", &mut errors, read_stock),
        rating: optional(obj, "rating", &mut errors, read_rating),
        image_url: optional(obj, "imageUrl", &mut errors, read_image_url),
    };

    if errors.is_empty() {
        Ok(patch)
    } else {
        Err(ValidationErrors(errors))
    }
}

/// True for absolute URLs of the form `scheme://host[...]`
pub fn is_valid_url(candidate: &str) -> bool {
    static URL: OnceLock<Regex> = OnceLock::new();
    URL.get_or_init(|| {
        Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*://[^\s/?#]+[^\s]*$").expect("static URL pattern")
    })
    .is_match(candidate)
}

fn as_object(body: &Value) -> Result<&Map<String, Value>, ValidationErrors> {
    body.as_object()
        .ok_or_else(|| ValidationErrors::single("body", expected("object", body)))
}

fn required<T>(
    obj: &Map<String, Value>,
    field: &str,
    errors: &mut Vec<FieldError>,
    read: impl FnOnce(&Value) -> Result<T, String>,
) -> Option<T> {
    match obj.get(field) {
        None => {
            errors.push(FieldError::new(field, REQUIRED));
            None
        }
        Some(value) => collect(field, read(value), errors),
    }
}

fn optional<T>(
    obj: &Map<String, Value>,
    field: &str,
    errors: &mut Vec<FieldError>,
    read: impl FnOnce(&Value) -> Result<T, String>,
) -> Option<T> {
    obj.get(field)
        .and_then(|value| collect(field, read(value), errors))
}

fn collect<T>(field: &str, result: Result<T, String>, errors: &mut Vec<FieldError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(message) => {
            errors.push(FieldError::new(field, message));
            None
        }
    }
}

fn read_text(value: &Value, min_len: usize, too_short: &str) -> Result<String, String> {
    let text = value.as_str().ok_or_else(|| expected("string", value))?;
    if text.chars().count() < min_len {
        return Err(too_short.to_string());
    }
    Ok(text.to_string())
}

fn read_price(value: &Value) -> Result<f64, String> {
    let price = value.as_f64().ok_or_else(|| expected("number", value))?;
    if price.is_finite() && price > 0.0 {
        Ok(price)
    } else {
        Err(PRICE_NOT_POSITIVE.to_string())
    }
}

fn read_stock(value: &Value) -> Result<u64, String> {
    if let Some(stock) = value.as_u64() {
        return Ok(stock);
    }
    let stock = value.as_f64().ok_or_else(|| expected("number", value))?;
    if stock < 0.0 {
        Err(STOCK_NEGATIVE.to_string())
    } else if stock.fract() != 0.0 || stock > u64::MAX as f64 {
        Err(expected("integer", value))
    } else {
        // integral float such as 5.0
        Ok(stock as u64)
    }
}

fn read_rating(value: &Value) -> Result<f64, String> {
    let rating = value.as_f64().ok_or_else(|| expected("number", value))?;
    if rating < 0.0 {
        Err(RATING_NEGATIVE.to_string())
    } else if rating > RATING_MAX {
        Err(RATING_TOO_HIGH.to_string())
    } else {
        Ok(rating)
    }
}

fn read_image_url(value: &Value) -> Result<Option<String>, String> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) if s.is_empty() => Ok(None),
        Value::String(s) if is_valid_url(s) => Ok(Some(s.clone())),
        Value::String(_) => Err(INVALID_URL.to_string()),
        other => Err(expected("string", other)),
    }
}

fn expected(kind: &str, value: &Value) -> String {
    format!("Expected {}, received {}", kind, json_type_name(value))
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) => {
            if n.is_i64() || n.is_u64() {
                "integer"
            } else {
                "float"
            }
        }
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_body() -> Value {
        json!({
            "name": "Mouse",
            "category": "Electronics",
            "price": 9.99,
            "stock": 5,
            "rating": 4.2
        })
    }

    #[test]
    fn test_valid_create_body() {
        let product = validate_new(&valid_body()).unwrap();
        assert_eq!(product.name, "Mouse");
        assert_eq!(product.stock, 5);
        assert_eq!(product.image_url, None);
    }

    #[test]
    fn test_client_id_is_ignored() {
        let mut body = valid_body();
        body["id"] = json!(99);
        assert!(validate_new(&body).is_ok());
    }

    #[test]
    fn test_reports_every_failing_field() {
        let body = json!({
            "name": "Mo",
            "category": "E",
            "price": 0,
            "stock": -1,
            "rating": 7
        });
        let errors = validate_new(&body).unwrap_err();
        assert_eq!(errors.fields().len(), 5);
        assert!(errors.has_field("name"));
        assert!(errors.has_field("category"));
        assert!(errors.has_field("price"));
        assert!(errors.has_field("stock"));
        assert!(errors.has_field("rating"));
    }

    #[test]
    fn test_missing_fields_are_required() {
        let errors = validate_new(&json!({ "name": "Mouse" })).unwrap_err();
        let required: Vec<_> = errors
            .fields()
            .iter()
            .filter(|e| e.message == REQUIRED)
            .map(|e| e.field.as_str())
            .collect();
        assert_eq!(required, vec!["category", "price", "stock", "rating"]);
    }

    #[test]
    fn test_type_mismatch_message() {
        let mut body = valid_body();
        body["price"] = json!("cheap");
        let errors = validate_new(&body).unwrap_err();
        assert_eq!(
            errors.fields()[0],
            FieldError::new("price", "Expected number, received string")
        );
    }

    #[test]
    fn test_stock_must_be_integral() {
        let mut body = valid_body();
        body["stock"] = json!(2.5);
        assert!(validate_new(&body).unwrap_err().has_field("stock"));

        body["stock"] = json!(3.0);
        assert_eq!(validate_new(&body).unwrap().stock, 3);
    }

    #[test]
    fn test_rating_bounds_are_inclusive() {
        let mut body = valid_body();
        body["rating"] = json!(0);
        assert!(validate_new(&body).is_ok());
        body["rating"] = json!(5);
        assert!(validate_new(&body).is_ok());
        body["rating"] = json!(5.01);
        let errors = validate_new(&body).unwrap_err();
        assert_eq!(errors.fields()[0].message, RATING_TOO_HIGH);
    }

    #[test]
    fn test_image_url_rules() {
        let mut body = valid_body();
        body["imageUrl"] = json!("");
        assert_eq!(validate_new(&body).unwrap().image_url, None);

        body["imageUrl"] = json!("https://cdn.example.com/mouse.png");
        assert_eq!(
            validate_new(&body).unwrap().image_url.as_deref(),
            Some("https://cdn.example.com/mouse.png")
        );

        body["imageUrl"] = json!("not a url");
        assert!(validate_new(&body).unwrap_err().has_field("imageUrl"));
    }

    #[test]
    fn test_non_object_body() {
        let errors = validate_new(&json!([1, 2, 3])).unwrap_err();
        assert_eq!(
            errors.fields()[0],
            FieldError::new("body", "Expected object, received array")
        );
    }

    #[test]
    fn test_patch_accepts_subset() {
        let patch = validate_patch(&json!({ "price": 19.5 })).unwrap();
        assert_eq!(patch.price, Some(19.5));
        assert!(patch.name.is_none());
        assert!(patch.image_url.is_none());
    }

    #[test]
    fn test_patch_empty_image_clears() {
        let patch = validate_patch(&json!({ "imageUrl": "" })).unwrap();
        assert_eq!(patch.image_url, Some(None));
    }

    #[test]
    fn test_patch_still_enforces_constraints() {
        let errors = validate_patch(&json!({ "name": "ab", "stock": -2 })).unwrap_err();
        assert!(errors.has_field("name"));
        assert!(errors.has_field("stock"));
    }

    #[test]
    fn test_patch_rejects_null_for_required_fields() {
        let errors = validate_patch(&json!({ "name": null })).unwrap_err();
        assert_eq!(errors.fields()[0].message, "Expected string, received null");
    }

    #[test]
    fn test_url_pattern() {
        assert!(is_valid_url("http://localhost:3000/img.png"));
        assert!(is_valid_url("ftp://files.example.org"));
        assert!(!is_valid_url("example.com/img.png"));
        assert!(!is_valid_url("https://"));
        assert!(!is_valid_url("https://host with space"));
    }
}
