//! Cart payloads.

use serde::{Deserialize, Serialize};

use crate::types::{CartId, Price, ProductId, UserId};

/// One line of a cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    #[serde(rename = "idProduto")]
    pub product_id: ProductId,
    #[serde(rename = "quantidade")]
    pub quantity: u64,
    /// Filled in by the server when the cart is stored.
    #[serde(
        rename = "precoUnitario",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub unit_price: Option<Price>,
}

impl CartItem {
    /// A line item as submitted by a client.
    #[must_use]
    pub const fn new(product_id: ProductId, quantity: u64) -> Self {
        Self {
            product_id,
            quantity,
            unit_price: None,
        }
    }
}

/// Body of `POST /carrinhos`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NewCart {
    #[serde(rename = "produtos")]
    pub products: Vec<CartItem>,
}

/// A cart as returned by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    #[serde(rename = "_id")]
    pub id: CartId,
    #[serde(rename = "produtos")]
    pub products: Vec<CartItem>,
    #[serde(rename = "precoTotal")]
    pub total_price: Price,
    #[serde(rename = "quantidadeTotal")]
    pub total_quantity: u64,
    #[serde(rename = "idUsuario")]
    pub user_id: UserId,
}

impl Cart {
    /// Whether any line references `product_id`.
    #[must_use]
    pub fn contains(&self, product_id: &ProductId) -> bool {
        self.products.iter().any(|item| &item.product_id == product_id)
    }
}

/// A cart line described by product name, as fixtures describe it.
///
/// The API identifies products by generated id, so descriptors are
/// resolved against the product list before a cart is submitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemDescriptor {
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "quantidade")]
    pub quantity: u64,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_submitted_item_omits_unit_price() {
        let cart = NewCart {
            products: vec![CartItem::new(ProductId::new("BeeJh5lz3k6kSIzA"), 2)],
        };
        let body = serde_json::to_value(&cart).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"produtos": [{"idProduto": "BeeJh5lz3k6kSIzA", "quantidade": 2}]})
        );
    }

    #[test]
    fn test_stored_cart_parses() {
        let cart: Cart = serde_json::from_value(serde_json::json!({
            "produtos": [
                {"idProduto": "BeeJh5lz3k6kSIzA", "quantidade": 1, "precoUnitario": 470},
                {"idProduto": "K6leHdftCeOJj8BJ", "quantidade": 2, "precoUnitario": 5240}
            ],
            "precoTotal": 10950,
            "quantidadeTotal": 3,
            "idUsuario": "0uxuPY0cbmQhpEz1",
            "_id": "qbMqntef4iTOwWfg"
        }))
        .unwrap();

        assert_eq!(cart.total_quantity, 3);
        assert!(cart.contains(&ProductId::new("K6leHdftCeOJj8BJ")));
        assert!(!cart.contains(&ProductId::new("missing")));
    }
}
