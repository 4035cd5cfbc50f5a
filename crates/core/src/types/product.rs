//! Catalog product records.
//!
//! Products come from the catalog collaborator and are stored verbatim by the
//! session stores. Identity is the [`ProductId`]; nothing else is validated.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::ProductId;
use super::price::Price;

/// A product as listed in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    /// Unit price in the shop currency. Written as a decimal string; numeric
    /// JSON values are accepted when reading.
    pub price: Decimal,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Units on hand, when the catalog tracks stock.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f32>,
    /// Currency glyph supplied by the catalog (e.g. "₹").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
}

impl Product {
    /// Create a product with only the required catalog fields.
    #[must_use]
    pub fn new(
        id: ProductId,
        name: impl Into<String>,
        price: Decimal,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            category: category.into(),
            image: None,
            description: None,
            stock: None,
            rating: None,
            currency: None,
        }
    }

    /// Set the image URL.
    #[must_use]
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// Set the catalog rating.
    #[must_use]
    pub const fn with_rating(mut self, rating: f32) -> Self {
        self.rating = Some(rating);
        self
    }

    /// Set the currency glyph.
    #[must_use]
    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = Some(currency.into());
        self
    }

    /// Unit price in the shop's default currency.
    #[must_use]
    pub fn unit_price(&self) -> Price {
        Price::in_default_currency(self.price)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_optional_fields_are_omitted() {
        let product = Product::new(
            ProductId::new(1),
            "Eternal Gold Bangle",
            Decimal::from(45_000),
            "Bangles",
        );
        let json = serde_json::to_value(&product).unwrap();

        assert_eq!(json["id"], 1);
        assert_eq!(json["price"], "45000");
        assert!(json.get("image").is_none());
        assert!(json.get("rating").is_none());
    }

    #[test]
    fn test_reads_numeric_price() {
        let json = r#"{"id":2,"name":"Diamond Solitaire Ring","price":125000,"currency":"₹","category":"Rings","rating":4.9}"#;
        let product: Product = serde_json::from_str(json).unwrap();

        assert_eq!(product.id, ProductId::new(2));
        assert_eq!(product.price, Decimal::from(125_000));
        assert_eq!(product.currency.as_deref(), Some("₹"));
        assert!(product.image.is_none());
    }

    #[test]
    fn test_serde_roundtrip() {
        let product = Product::new(
            ProductId::new(3),
            "Ruby Pendant Necklace",
            Decimal::from(35_000),
            "Necklaces",
        )
        .with_image("https://images.example.com/ruby.jpg")
        .with_rating(4.7);
        let json = serde_json::to_string(&product).unwrap();
        let parsed: Product = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, product);
    }
}
