//! Product record types
//!
//! `Product` is the persisted shape. `NewProduct` and `ProductPatch` are the
//! validated inputs for create and partial update; neither carries an id.

use serde::{Deserialize, Deserializer, Serialize};

/// Store-assigned product identifier (always positive)
pub type ProductId = u64;

/// A persisted product record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub category: String,
    pub price: f64,
    pub stock: u64,
    pub rating: f64,
    /// Empty strings on disk are read back as `None`
    #[serde(
        default,
        deserialize_with = "empty_string_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub image_url: Option<String>,
}

/// Product fields for creation (id is assigned by the store)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub name: String,
    pub category: String,
    pub price: f64,
    pub stock: u64,
    pub rating: f64,
    #[serde(
        default,
        deserialize_with = "empty_string_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub image_url: Option<String>,
}

/// Partial update. `None` keeps the stored value.
///
/// `image_url` is doubly optional: `Some(None)` clears the image,
/// `Some(Some(url))` replaces it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub category: Option<String>,
    pub price: Option<f64>,
    pub stock: Option<u64>,
    pub rating: Option<f64>,
    pub image_url: Option<Option<String>>,
}

impl Product {
    /// Build a record from creation fields and an assigned id
    pub fn from_new(id: ProductId, new: NewProduct) -> Self {
        Self {
            id,
            name: new.name,
            category: new.category,
            price: new.price,
            stock: new.stock,
            rating: new.rating,
            image_url: new.image_url,
        }
    }

    /// Overwrite the fields present in `patch`. The id never changes.
    pub fn apply(&mut self, patch: ProductPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(stock) = patch.stock {
            self.stock = stock;
        }
        if let Some(rating) = patch.rating {
            self.rating = rating;
        }
        if let Some(image_url) = patch.image_url {
            self.image_url = image_url;
        }
    }
}

impl ProductPatch {
    /// True when no field would change
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.category.is_none()
            && self.price.is_none()
            && self.stock.is_none()
            && self.rating.is_none()
            && self.image_url.is_none()
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.is_empty()))
}
