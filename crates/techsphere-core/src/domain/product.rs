//! Product domain types.

use std::collections::BTreeMap;
use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::asset::AssetSource;
use super::catalog::{CatalogEntity, EntityDraft};
use crate::ports::CoreError;

/// Category assigned to new products when the draft does not name one.
pub const DEFAULT_PRODUCT_CATEGORY: &str = "Audio";

/// Opaque product identifier (document id in the `products` collection).
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Create a product id from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the inner string reference.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ProductId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ProductId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl AsRef<str> for ProductId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A catalog product as stored in the document store.
///
/// Cart items embed a full clone of this struct, so the price a shopper sees
/// in the cart is the price at the moment the product was added.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Document id.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Long-form description.
    pub description: String,
    /// Unit price.
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    /// Category name (e.g. "Laptops").
    pub category: String,
    /// Brand name.
    #[serde(default)]
    pub brand: String,
    /// Resolved image URLs, first one is the primary image.
    #[serde(default)]
    pub images: Vec<String>,
    /// Free-form specification table.
    #[serde(default)]
    pub specs: BTreeMap<String, String>,
}

impl Product {
    /// Primary image URL, if any.
    pub fn primary_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }
}

impl CatalogEntity for Product {
    const COLLECTION: &'static str = "products";

    fn id(&self) -> &str {
        self.id.as_str()
    }
}

/// Admin form values for creating or editing a product.
#[derive(Debug, Clone, Default)]
pub struct ProductDraft {
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub brand: String,
    /// Category override; new products fall back to [`DEFAULT_PRODUCT_CATEGORY`].
    pub category: Option<String>,
    /// Specs override; edits keep the previous specs when `None`.
    pub specs: Option<BTreeMap<String, String>>,
    /// Image sources in display order. Empty on edit keeps the previous images.
    pub images: Vec<AssetSource>,
}

impl EntityDraft for ProductDraft {
    type Entity = Product;

    fn validate(&self) -> Result<(), CoreError> {
        if self.name.trim().is_empty() {
            return Err(CoreError::Validation("Name is required".to_string()));
        }
        if self.description.trim().is_empty() {
            return Err(CoreError::Validation(
                "Description is required".to_string(),
            ));
        }
        if self.price <= Decimal::ZERO {
            return Err(CoreError::Validation(format!(
                "Price must be positive, got {}",
                self.price
            )));
        }
        if self.brand.trim().is_empty() {
            return Err(CoreError::Validation("Brand is required".to_string()));
        }
        for asset in &self.images {
            asset.validate()?;
        }
        Ok(())
    }

    fn take_assets(&mut self) -> Vec<AssetSource> {
        std::mem::take(&mut self.images)
    }

    fn build(self, id: String, assets: Option<Vec<String>>, previous: Option<&Product>) -> Product {
        let images = assets
            .or_else(|| previous.map(|p| p.images.clone()))
            .unwrap_or_default();
        let category = self
            .category
            .or_else(|| previous.map(|p| p.category.clone()))
            .unwrap_or_else(|| DEFAULT_PRODUCT_CATEGORY.to_string());
        let specs = self
            .specs
            .or_else(|| previous.map(|p| p.specs.clone()))
            .unwrap_or_default();

        Product {
            id: ProductId::new(id),
            name: self.name.trim().to_string(),
            description: self.description.trim().to_string(),
            price: self.price,
            category,
            brand: self.brand.trim().to_string(),
            images,
            specs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> ProductDraft {
        ProductDraft {
            name: "SoundWave Elite".to_string(),
            description: "Noise cancelling headphones".to_string(),
            price: Decimal::new(349, 0),
            brand: "SoundWave".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_validate_rejects_non_positive_price() {
        let mut d = draft();
        d.price = Decimal::ZERO;
        assert!(matches!(d.validate(), Err(CoreError::Validation(_))));

        d.price = Decimal::new(-5, 0);
        assert!(matches!(d.validate(), Err(CoreError::Validation(_))));
    }

    #[test]
    fn test_validate_rejects_blank_name() {
        let mut d = draft();
        d.name = "   ".to_string();
        assert!(matches!(d.validate(), Err(CoreError::Validation(_))));
    }

    #[test]
    fn test_build_defaults_category_for_new_product() {
        let product = draft().build("p1".to_string(), Some(vec!["u".to_string()]), None);
        assert_eq!(product.category, DEFAULT_PRODUCT_CATEGORY);
        assert!(product.specs.is_empty());
        assert_eq!(product.primary_image(), Some("u"));
    }

    #[test]
    fn test_build_preserves_previous_images_and_specs() {
        let mut specs = BTreeMap::new();
        specs.insert("Driver".to_string(), "40mm".to_string());
        let previous = Product {
            id: ProductId::new("p1"),
            name: "Old".to_string(),
            description: "Old".to_string(),
            price: Decimal::new(300, 0),
            category: "Headphones".to_string(),
            brand: "SoundWave".to_string(),
            images: vec!["https://cdn/old.png".to_string()],
            specs,
        };

        let product = draft().build("p1".to_string(), None, Some(&previous));
        assert_eq!(product.images, previous.images);
        assert_eq!(product.specs, previous.specs);
        assert_eq!(product.category, "Headphones");
        assert_eq!(product.price, Decimal::new(349, 0));
    }

    #[test]
    fn test_price_serializes_as_number() {
        let product = draft().build("p1".to_string(), Some(vec![]), None);
        let json = serde_json::to_value(&product).unwrap();
        assert_eq!(json["price"], serde_json::json!(349.0));

        let back: Product = serde_json::from_value(json).unwrap();
        assert_eq!(back.price, Decimal::new(349, 0));
    }
}
