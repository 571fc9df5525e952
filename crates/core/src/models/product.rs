//! Product payloads.

use serde::{Deserialize, Serialize};

use crate::types::{Price, ProductId};

/// Body of `POST /produtos` and `PUT /produtos/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProduct {
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "preco")]
    pub price: Price,
    #[serde(rename = "descricao")]
    pub description: String,
    /// Units in stock.
    #[serde(rename = "quantidade")]
    pub quantity: u64,
}

/// A product as returned by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: ProductId,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "preco")]
    pub price: Price,
    #[serde(rename = "descricao")]
    pub description: String,
    #[serde(rename = "quantidade")]
    pub quantity: u64,
}

impl Product {
    /// Attach a server-assigned id to a payload.
    #[must_use]
    pub fn from_new(id: ProductId, product: NewProduct) -> Self {
        Self {
            id,
            name: product.name,
            price: product.price,
            description: product.description,
            quantity: product.quantity,
        }
    }

    /// Whether this product matches every field of `product`.
    #[must_use]
    pub fn matches(&self, product: &NewProduct) -> bool {
        self.name == product.name
            && self.price == product.price
            && self.description == product.description
            && self.quantity == product.quantity
    }
}
