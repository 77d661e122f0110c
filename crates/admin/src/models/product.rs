//! Catalog products.

use serde::{Deserialize, Serialize};

use slooze_core::ProductId;

/// Caller-supplied product fields, everything except the id.
///
/// This is the payload of create and update: an update replaces all of these
/// at once, so an omitted `description` is cleared.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductFields {
    /// Product name.
    pub name: String,
    /// Free-form category label.
    pub category: String,
    /// Units in stock.
    pub quantity: i64,
    /// Unit weight.
    pub weight: f64,
    /// Unit price.
    pub price: f64,
    /// Optional long description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ProductFields {
    /// Name of the first numeric field that is NaN or infinite, if any.
    ///
    /// JSON has no encoding for those values, so they cannot be stored.
    #[must_use]
    pub fn non_finite_field(&self) -> Option<&'static str> {
        if !self.weight.is_finite() {
            Some("weight")
        } else if !self.price.is_finite() {
            Some("price")
        } else {
            None
        }
    }
}

/// A stored product: a store-assigned id plus its fields.
///
/// Serializes flat, e.g. `{"id":"9c1e","name":"Chair",...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Store-assigned identifier, immutable after creation.
    pub id: ProductId,
    /// Everything else.
    #[serde(flatten)]
    pub fields: ProductFields,
}

impl Product {
    /// Compose a product from an id and its fields.
    #[must_use]
    pub const fn new(id: ProductId, fields: ProductFields) -> Self {
        Self { id, fields }
    }

    /// Case-insensitive substring match on name or category.
    ///
    /// An empty term matches everything.
    #[must_use]
    pub fn matches(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        self.fields.name.to_lowercase().contains(&term)
            || self.fields.category.to_lowercase().contains(&term)
    }

    /// Stock value of this product (`price * quantity`).
    #[must_use]
    #[allow(clippy::cast_precision_loss)] // Stock counts stay far below 2^52
    pub fn stock_value(&self) -> f64 {
        self.fields.price * self.fields.quantity as f64
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn chair() -> Product {
        Product::new(
            ProductId::new("9c1e"),
            ProductFields {
                name: "Chair".to_string(),
                category: "Home".to_string(),
                quantity: 5,
                weight: 3.2,
                price: 49.99,
                description: None,
            },
        )
    }

    #[test]
    fn test_serializes_flat() {
        let json = serde_json::to_value(chair()).unwrap();
        assert_eq!(json["id"], "9c1e");
        assert_eq!(json["name"], "Chair");
        assert_eq!(json["quantity"], 5);
        assert!(json.get("fields").is_none());
        assert!(json.get("description").is_none());
    }

    #[test]
    fn test_deserializes_without_description() {
        let product: Product = serde_json::from_str(
            r#"{"id":"9c1e","name":"Chair","category":"Home","quantity":5,"weight":3.2,"price":49.99}"#,
        )
        .unwrap();
        assert_eq!(product, chair());
    }

    #[test]
    fn test_matches_name_or_category_ignoring_case() {
        let product = chair();
        assert!(product.matches("cha"));
        assert!(product.matches("HOME"));
        assert!(product.matches(""));
        assert!(!product.matches("garden"));
    }

    #[test]
    fn test_stock_value() {
        let value = chair().stock_value();
        assert!((value - 249.95).abs() < 1e-9);
    }

    #[test]
    fn test_non_finite_field() {
        let mut fields = chair().fields;
        assert_eq!(fields.non_finite_field(), None);

        fields.price = f64::NAN;
        assert_eq!(fields.non_finite_field(), Some("price"));

        fields.weight = f64::NEG_INFINITY;
        assert_eq!(fields.non_finite_field(), Some("weight"));
    }
}
