//! Catalog and cart product models.

use serde::{Deserialize, Serialize};

use super::{Price, ProductId};

/// A product as published by the catalog (`GET /products/{id}`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDetails {
    /// Product ID.
    pub id: ProductId,
    /// Display title.
    pub title: String,
    /// Unit price.
    pub price: Price,
    /// Image URL.
    pub image: String,
}

/// A cart line: catalog details plus the quantity in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Product ID. Unique within a cart.
    pub id: ProductId,
    /// Display title.
    pub title: String,
    /// Unit price.
    pub price: Price,
    /// Image URL.
    pub image: String,
    /// Quantity in the cart.
    pub amount: u32,
}

impl Product {
    /// Build a cart line from catalog details.
    #[must_use]
    pub fn from_details(details: ProductDetails, amount: u32) -> Self {
        Self {
            id: details.id,
            title: details.title,
            price: details.price,
            image: details.image,
            amount,
        }
    }

    /// Unit price times amount.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.price * self.amount
    }
}

/// Available quantity of a product (`GET /stock/{id}`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stock {
    /// Product ID, when the service echoes it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ProductId>,
    /// Units available. Oversold products report a negative amount.
    pub amount: i64,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_details_from_catalog_json() {
        let json = r#"{
            "id": 1,
            "title": "Tênis de Caminhada Leve Confortável",
            "price": 179.9,
            "image": "https://example.com/shoe.jpg"
        }"#;
        let details: ProductDetails = serde_json::from_str(json).unwrap();
        assert_eq!(details.id, ProductId::new(1));
        assert_eq!(details.price, "179.9".parse::<Price>().unwrap());

        let line = Product::from_details(details, 1);
        assert_eq!(line.amount, 1);
        assert_eq!(line.title, "Tênis de Caminhada Leve Confortável");
    }

    #[test]
    fn test_subtotal() {
        let line = Product {
            id: ProductId::new(2),
            title: "Tênis VR Caminhada".to_string(),
            price: "139.9".parse().unwrap(),
            image: String::new(),
            amount: 3,
        };
        assert_eq!(line.subtotal(), "419.7".parse::<Price>().unwrap());
    }

    #[test]
    fn test_stock_ignores_unknown_fields() {
        let stock: Stock = serde_json::from_str(r#"{"id": 3, "amount": 5, "warehouse": "sp"}"#)
            .unwrap();
        assert_eq!(stock.amount, 5);
        assert_eq!(stock.id, Some(ProductId::new(3)));

        let stock: Stock = serde_json::from_str(r#"{"amount": -1}"#).unwrap();
        assert_eq!(stock.amount, -1);

        let stock: Stock = serde_json::from_str(r#"{"amount": 0}"#).unwrap();
        assert_eq!(stock.id, None);
    }
}
